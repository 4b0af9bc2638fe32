//! Regex patterns for coordinates embedded in map URLs and markup.
//!
//! Numbers inside URLs may be integers (`@40,-3,17z`). Patterns that scan
//! arbitrary markup require a fractional part so that ordinary integer
//! arrays like `[1,2]` are not mistaken for coordinates.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // !3d40.4280246!4d-3.6887462
    pub static ref PRECISE_MARKER: Regex = Regex::new(
        r"!3d(-?\d+(?:\.\d+)?)!4d(-?\d+(?:\.\d+)?)"
    ).unwrap();

    pub static ref PLACE_SEGMENT: Regex = Regex::new(
        r"/place/"
    ).unwrap();

    // /place/Some+Name/@40.4276243,-3.6897011,17z
    pub static ref PLACE_AT: Regex = Regex::new(
        r"/place/[^@]*@(-?\d+(?:\.\d+)?),(-?\d+(?:\.\d+)?),"
    ).unwrap();

    // [-3.6887462,40.4280246]
    pub static ref BRACKETED_PAIR: Regex = Regex::new(
        r"\[\s*(-?\d+\.\d+)\s*,\s*(-?\d+\.\d+)\s*\]"
    ).unwrap();

    // [3,-71.54449177677758,-32.973640155577314]
    pub static ref SECONDARY_MARKER: Regex = Regex::new(
        r"\[\s*3\s*,\s*(-?\d+\.\d+)\s*,\s*(-?\d+\.\d+)\s*\]"
    ).unwrap();

    // null,null,40.4280246,-3.6887462
    pub static ref NULL_PREFIXED: Regex = Regex::new(
        r"null\s*,\s*null\s*,\s*(-?\d+\.\d+)\s*,\s*(-?\d+\.\d+)"
    ).unwrap();

    // @40.4276243,-3.6897011,17z
    pub static ref BARE_AT: Regex = Regex::new(
        r"@(-?\d+(?:\.\d+)?),(-?\d+(?:\.\d+)?),"
    ).unwrap();
}
