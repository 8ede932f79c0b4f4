//! Editing configuration through the binary

use crate::common::TestWorkspace;
use crate::memolab;
use anyhow::Result;

#[test]
fn test_config_set_get_roundtrip() -> Result<()> {
    let ws = TestWorkspace::new()?;
    let config = ws.config_path();
    let config = config.to_str().unwrap();

    memolab!(ws.path(), "--config", config, "config", "set", "debounce.delay_ms", "400")
        .assert_success()?;

    let result = memolab!(ws.path(), "--config", config, "config", "get", "debounce.delay_ms")
        .assert_success()?;
    assert_eq!(result.stdout.trim(), "400");

    // Values set earlier survive
    let result = memolab!(ws.path(), "--config", config, "config", "get", "counter.trace")
        .assert_success()?;
    assert_eq!(result.stdout.trim(), "silent");

    Ok(())
}

#[test]
fn test_config_rejects_negative_delay() -> Result<()> {
    let ws = TestWorkspace::new()?;
    let config = ws.config_path();
    let config = config.to_str().unwrap();

    memolab!(ws.path(), "--config", config, "config", "set", "debounce.delay_ms", "-1")
        .assert_failure()?;

    let result = memolab!(ws.path(), "--config", config, "config", "get", "debounce.delay_ms")
        .assert_success()?;
    assert_eq!(result.stdout.trim(), "250");

    Ok(())
}

#[test]
fn test_config_path_create() -> Result<()> {
    let ws = TestWorkspace::new()?;
    let target = ws.path().join("fresh/config.toml");

    let result = memolab!(
        ws.path(),
        "--config",
        target.to_str().unwrap(),
        "config",
        "path",
        "--create"
    )
    .assert_success()?;

    assert!(result.stdout.contains("Created config file"));
    assert!(target.exists());

    Ok(())
}

#[test]
fn test_config_example_is_printed() -> Result<()> {
    let ws = TestWorkspace::new()?;

    let result = memolab!(ws.path(), "config", "example").assert_success()?;
    assert!(result.stdout.contains("[debounce]"));
    assert!(result.stdout.contains("settle_ms"));

    Ok(())
}

#[test]
fn test_missing_explicit_config_fails() -> Result<()> {
    let ws = TestWorkspace::new()?;
    let missing = ws.path().join("nope.toml");

    memolab!(ws.path(), "--config", missing.to_str().unwrap(), "demo", "typing")
        .assert_failure()?;

    Ok(())
}
