// Tests for config loading and defaults.

use anyhow::Result;
use meeting_stream::Config;
use std::fs;

#[test]
fn loads_config_from_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("meeting-stream.toml");
    fs::write(
        &path,
        r#"
[service]
name = "meeting-stream-test"

[stream]
reorder_window = 4
channel_capacity = 16
"#,
    )?;

    let stem = path.with_extension("");
    let cfg = Config::load(stem.to_str().expect("utf-8 path"))?;
    assert_eq!(cfg.service.name, "meeting-stream-test");
    assert_eq!(cfg.stream.reorder_window, 4);
    assert_eq!(cfg.stream.channel_capacity, 16);
    Ok(())
}

#[test]
fn missing_fields_fall_back_to_defaults() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("partial.toml");
    fs::write(&path, "[service]\nname = \"partial\"\n")?;

    let stem = path.with_extension("");
    let cfg = Config::load(stem.to_str().expect("utf-8 path"))?;
    assert_eq!(cfg.service.name, "partial");
    assert_eq!(cfg.stream.reorder_window, 32);
    assert_eq!(cfg.stream.channel_capacity, 64);
    Ok(())
}

#[test]
fn defaults_are_sane() {
    let cfg = Config::default();
    assert_eq!(cfg.service.name, "meeting-stream");
    assert!(cfg.stream.reorder_window > 0);
    assert!(cfg.stream.channel_capacity > 0);
}
