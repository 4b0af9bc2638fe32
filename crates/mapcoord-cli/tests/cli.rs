use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const LAFUENTE: &str = "https://www.google.com/maps/place/Lafuente+Lorenzo+S.A./@40.4276243,-3.6897011,17z/data=!3m1!4b1!4m6!3m5!1s0xd4228e9d4ed2e5b:0x8c2c6b1b7d1b5b0f!8m2!3d40.4280246!4d-3.6887462!16s%2Fg%2F1tfz9wzs";

/// Temp dir holding an empty config so the user's own config never leaks in.
fn workspace() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, "{}").unwrap();
    (dir, config)
}

fn mapcoord(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mapcoord").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn extract_prefers_precise_marker() {
    let (_dir, config) = workspace();

    mapcoord(&config)
        .args(["extract", LAFUENTE])
        .assert()
        .success()
        .stdout(predicate::str::contains("40.4280246"))
        .stdout(predicate::str::contains("-3.6887462"))
        .stdout(predicate::str::contains("precise-pattern"));
}

#[test]
fn extract_rejects_unsupported_url() {
    let (_dir, config) = workspace();

    mapcoord(&config)
        .args(["extract", "https://example.com/@40.1,-3.2,17z"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"success\":false"));
}

#[test]
fn extract_raw_reads_swapped_marker() {
    let (_dir, config) = workspace();

    mapcoord(&config)
        .args([
            "extract",
            "--raw",
            "--format",
            "text",
            "window.APP_INITIALIZATION_STATE=[[[3,-71.54449177677758,-32.973640155577314]]]",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"\t-32\.97364\d*, -71\.54449\d*\t").unwrap());
}

#[test]
fn extract_page_file_fallback() {
    let (dir, config) = workspace();
    let page = dir.path().join("page.html");
    fs::write(&page, "<script>var s=[null,null,48.8583701,2.2944813];</script>").unwrap();

    mapcoord(&config)
        .args(["extract", "https://www.google.com/maps/place/Eiffel+Tower", "--page-file"])
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("48.8583701"))
        .stdout(predicate::str::contains("\"from_page\":true"));
}

#[test]
fn batch_writes_csv() {
    let (dir, config) = workspace();
    let list = dir.path().join("links.txt");
    fs::write(
        &list,
        format!(
            "# venues\n{}\nhttps://www.google.com/maps/@-33.8567844,151.213108,15z\n",
            LAFUENTE
        ),
    )
    .unwrap();
    let out = dir.path().join("out.csv");

    mapcoord(&config)
        .args(["batch", "--format", "csv", "-o"])
        .arg(&out)
        .arg(list.to_str().unwrap())
        .assert()
        .success();

    let csv = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("input,final_url,success,lat,lng"));
    assert!(lines[1].contains("40.4280246"));
    assert!(lines[2].contains("-33.8567844"));
}

#[test]
fn batch_stops_on_first_failure() {
    let (dir, config) = workspace();
    let list = dir.path().join("links.txt");
    fs::write(&list, "https://www.google.com/maps/place/Nowhere\n").unwrap();

    mapcoord(&config)
        .args(["batch"])
        .arg(list.to_str().unwrap())
        .assert()
        .failure();

    mapcoord(&config)
        .args(["batch", "--continue-on-error"])
        .arg(list.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("no coordinates found"));
}

#[test]
fn nearby_filters_by_default_radius() {
    let (dir, config) = workspace();
    let venues = dir.path().join("venues.json");
    fs::write(
        &venues,
        r#"[
            {"id": "far", "name": "Far Shop", "location": {"lat": 40.5518, "lng": -3.7038}},
            {"id": "near", "name": "Near Shop", "location": {"lat": 40.4618, "lng": -3.7038}}
        ]"#,
    )
    .unwrap();

    mapcoord(&config)
        .args(["nearby", "--lat", "40.4168", "--lng=-3.7038", "--format", "text"])
        .arg(&venues)
        .assert()
        .success()
        .stdout(predicate::str::contains("Near Shop"))
        .stdout(predicate::str::contains("Far Shop").not());

    mapcoord(&config)
        .args(["nearby", "--lat", "40.4168", "--lng=-3.7038", "--max-km", "20"])
        .arg(&venues)
        .assert()
        .success()
        .stdout(predicate::str::contains("Far Shop"));
}

#[test]
fn theme_prints_css_variables() {
    let (dir, config) = workspace();

    mapcoord(&config)
        .args(["theme", "--color", "#ff0000", "--overrides"])
        .arg(dir.path().join("missing.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("--primary: 0 100% 50%;"));
}

#[test]
fn config_set_then_get() {
    let (_dir, config) = workspace();

    mapcoord(&config)
        .args(["config", "set", "distance.default_max_km", "25"])
        .assert()
        .success();

    mapcoord(&config)
        .args(["config", "get", "distance.default_max_km"])
        .assert()
        .success()
        .stdout(predicate::str::contains("25"));
}
