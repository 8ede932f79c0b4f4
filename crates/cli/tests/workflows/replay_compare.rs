//! Replaying scenarios through the binary

use crate::common::TestWorkspace;
use crate::memolab;
use anyhow::Result;
use std::time::Duration;

const REBIND_SCENARIO: &str = r#"
name = "rebind"
delay_ms = 300

[[events]]
at_ms = 0
kind = "trigger"
args = "a"

[[events]]
at_ms = 100
kind = "trigger"
args = "ab"

[[events]]
at_ms = 120
kind = "render"

[[events]]
at_ms = 150
kind = "trigger"
args = "abc"
"#;

#[test]
fn test_replay_both_variants_json() -> Result<()> {
    let ws = TestWorkspace::new()?;
    let scenario = ws.write_scenario("rebind.toml", REBIND_SCENARIO)?;
    let config = ws.config_path();

    let result = memolab!(
        ws.path(),
        "--config",
        config.to_str().unwrap(),
        "replay",
        scenario.to_str().unwrap(),
        "--variant",
        "both",
        "--json"
    )
    .assert_success()?;

    // 150ms of events + 300ms delay + settle
    assert!(result.duration >= Duration::from_millis(450));

    let report = result.json()?;
    assert_eq!(report["scenario"], "rebind");
    assert_eq!(report["triggers"], 3);

    let naive = &report["variants"][0];
    let latest = &report["variants"][1];
    assert_eq!(naive["variant"], "naive");
    assert_eq!(naive["rebuilds"], 1);
    assert_eq!(naive["invocations"].as_array().unwrap().len(), 1);
    assert_eq!(naive["invocations"][0]["args"], "abc");
    assert_eq!(latest["variant"], "latest");
    assert_eq!(latest["rebuilds"], 0);
    assert_eq!(latest["invocations"][0]["args"], "abc");

    Ok(())
}

#[test]
fn test_replay_defaults_to_configured_variant() -> Result<()> {
    let ws = TestWorkspace::new()?;
    let scenario = ws.write_scenario("rebind.toml", REBIND_SCENARIO)?;
    let config = ws.config_path();
    let config = config.to_str().unwrap();

    memolab!(ws.path(), "--config", config, "config", "set", "debounce.variant", "broken")
        .assert_success()?;

    let report = memolab!(
        ws.path(),
        "--config",
        config,
        "replay",
        scenario.to_str().unwrap(),
        "--json"
    )
    .assert_success()?
    .json()?;

    let variants = report["variants"].as_array().unwrap();
    assert_eq!(variants.len(), 1);
    assert_eq!(variants[0]["variant"], "naive");

    Ok(())
}

#[test]
fn test_demo_spaced_shows_lost_calls() -> Result<()> {
    let ws = TestWorkspace::new()?;
    let config = ws.config_path();

    let result = memolab!(ws.path(), "--config", config.to_str().unwrap(), "demo", "spaced")
        .assert_success()?;

    assert!(result.stdout.contains("spaced"));
    assert!(result.stdout.contains("dropped 2 call(s)"));

    Ok(())
}

#[test]
fn test_invalid_scenario_fails() -> Result<()> {
    let ws = TestWorkspace::new()?;
    let scenario = ws.write_scenario("bad.toml", "name = \"bad\"\ndelay_ms = -300\n")?;
    let config = ws.config_path();

    let result = memolab!(
        ws.path(),
        "--config",
        config.to_str().unwrap(),
        "replay",
        scenario.to_str().unwrap()
    )
    .assert_failure()?;

    assert!(result.stderr.contains("non-negative"));

    Ok(())
}

#[test]
fn test_unknown_demo_fails() -> Result<()> {
    let ws = TestWorkspace::new()?;
    let config = ws.config_path();

    let result = memolab!(ws.path(), "--config", config.to_str().unwrap(), "demo", "quiz")
        .assert_failure()?;

    assert!(result.stderr.contains("Unknown demo"));

    Ok(())
}
