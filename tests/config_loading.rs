// tests/config_loading.rs

use std::error::Error;
use std::io::Write;
use std::time::Duration;

use native_harness::config::{load_and_validate, load_from_path};
use native_harness::errors::HarnessError;
use native_harness::exec::NativeClient;
use tempfile::NamedTempFile;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn full_config_is_parsed_and_rebased() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Harness.toml");
    std::fs::write(
        &path,
        r#"
[harness]
executable = "bin/client"
timeout_ms = 1500
min_threads = 3
drain_timeout_ms = 250

[layout]
user_dir = "project"
properties_path = "home/conf/client.properties"
local_repository = "/abs/repo"
settings = "home/settings.xml"
java_home = "/opt/jdk"

[env]
LANG = "C"
"#,
    )?;

    let cfg = load_and_validate(&path)?;

    assert_eq!(cfg.harness.executable, dir.path().join("bin/client"));
    assert_eq!(cfg.timeout(), Duration::from_millis(1500));
    assert_eq!(cfg.drain_timeout(), Duration::from_millis(250));
    assert_eq!(cfg.harness.min_threads, 3);
    assert_eq!(cfg.layout.user_dir, dir.path().join("project"));
    assert_eq!(
        cfg.layout.properties_path,
        dir.path().join("home/conf/client.properties")
    );
    assert_eq!(cfg.layout.local_repository, std::path::PathBuf::from("/abs/repo"));
    assert_eq!(cfg.layout.settings, Some(dir.path().join("home/settings.xml")));
    assert_eq!(cfg.layout.runtime_home, None);
    assert_eq!(cfg.env.get("LANG").map(String::as_str), Some("C"));

    let client = NativeClient::from_config(&cfg);
    let (cmd, env) = client.prepare(&["verify"])?;
    assert!(cmd.as_slice().iter().any(|a| a == "-s"));
    assert_eq!(env.get("LANG").and_then(|v| v.to_str()), Some("C"));
    assert_eq!(env.get("JAVA_HOME").and_then(|v| v.to_str()), Some("/opt/jdk"));
    Ok(())
}

#[test]
fn defaults_apply_to_optional_fields() -> TestResult {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
[harness]
executable = "/bin/client"

[layout]
properties_path = "p"
local_repository = "r"
"#
    )?;

    let raw = load_from_path(file.path())?;
    assert_eq!(raw.harness.timeout_ms, 300_000);
    assert_eq!(raw.harness.min_threads, 2);
    assert_eq!(raw.harness.drain_timeout_ms, 5_000);
    assert!(raw.layout.settings.is_none());
    assert!(raw.env.is_empty());
    Ok(())
}

#[test]
fn zero_timeout_returns_config_error() -> TestResult {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
[harness]
executable = "/bin/client"
timeout_ms = 0

[layout]
properties_path = "p"
local_repository = "r"
"#
    )?;

    match load_and_validate(file.path()) {
        Err(HarnessError::ConfigError(msg)) => assert!(msg.contains("timeout_ms")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
    Ok(())
}

#[test]
fn zero_min_threads_returns_config_error() -> TestResult {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
[harness]
executable = "/bin/client"
min_threads = 0

[layout]
properties_path = "p"
local_repository = "r"
"#
    )?;

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, HarnessError::ConfigError(ref m) if m.contains("min_threads")));
    Ok(())
}

#[test]
fn missing_layout_is_a_toml_error() -> TestResult {
    let mut file = NamedTempFile::new()?;
    write!(file, "[harness]\nexecutable = \"/bin/client\"\n")?;

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, HarnessError::TomlError(_)), "got {err:?}");
    Ok(())
}

#[test]
fn invalid_env_name_is_rejected() -> TestResult {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"
[harness]
executable = "/bin/client"

[layout]
properties_path = "p"
local_repository = "r"

[env]
"A=B" = "x"
"#
    )?;

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, HarnessError::ConfigError(_)), "got {err:?}");
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_and_validate("/definitely/not/here/Harness.toml").unwrap_err();
    assert!(matches!(err, HarnessError::IoError(_)));
}
