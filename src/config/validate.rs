// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{HarnessError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = HarnessError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(
            raw.harness,
            raw.layout.into(),
            raw.env,
        ))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_harness(cfg)?;
    validate_env(cfg)?;
    Ok(())
}

fn validate_harness(cfg: &RawConfigFile) -> Result<()> {
    if cfg.harness.executable.as_os_str().is_empty() {
        return Err(HarnessError::ConfigError(
            "[harness].executable must not be empty".to_string(),
        ));
    }

    if cfg.harness.timeout_ms == 0 {
        return Err(HarnessError::ConfigError(
            "[harness].timeout_ms must be >= 1 (got 0)".to_string(),
        ));
    }

    if cfg.harness.min_threads == 0 {
        return Err(HarnessError::ConfigError(
            "[harness].min_threads must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn validate_env(cfg: &RawConfigFile) -> Result<()> {
    for name in cfg.env.keys() {
        if name.is_empty() || name.contains('=') || name.contains('\0') {
            return Err(HarnessError::ConfigError(format!(
                "[env] contains an invalid variable name '{}'",
                name
            )));
        }
    }
    Ok(())
}
