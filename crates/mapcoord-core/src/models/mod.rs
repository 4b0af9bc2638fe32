//! Data models: configuration, venue records and display theme.

pub mod config;
pub mod theme;
pub mod venue;
