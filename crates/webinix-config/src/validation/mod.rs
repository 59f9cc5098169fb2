//! Configuration validation.
//!
//! Each check pushes a message into a shared list; the orchestrator joins
//! them into a single `ConfigError`.

mod helpers;

use crate::schema::WebinixConfig;
use helpers::{validate_range, validate_range_usize};
use webinix_common::ConfigError;

/// Upper bound for the script response buffer.
pub const MAX_RESPONSE_BYTES: usize = 16 * 1024 * 1024;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &WebinixConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_range(
        &mut errors,
        "startup.timeout_secs",
        config.startup.timeout_secs,
        1,
        3600,
    );
    validate_range_usize(
        &mut errors,
        "script.max_response_bytes",
        config.script.max_response_bytes,
        1,
        MAX_RESPONSE_BYTES,
    );
    validate_cache(&mut errors, config);
    validate_library(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_cache(errors: &mut Vec<String>, config: &WebinixConfig) {
    let dir = config.cache.dir.trim();
    if dir.is_empty() {
        errors.push("cache.dir must not be empty".into());
    } else if std::path::Path::new(dir).is_absolute() || dir.split(['/', '\\']).any(|c| c == "..")
    {
        errors.push(format!(
            "cache.dir = {dir:?} must be a relative path inside the working directory"
        ));
    }
}

fn validate_library(errors: &mut Vec<String>, config: &WebinixConfig) {
    if let Some(name) = &config.library.file_name {
        if name.trim().is_empty() || name.contains(['/', '\\']) {
            errors.push(format!("library.file_name = {name:?} must be a bare file name"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&WebinixConfig::default()).is_ok());
    }

    #[test]
    fn zero_response_buffer_is_rejected() {
        let mut config = WebinixConfig::default();
        config.script.max_response_bytes = 0;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("script.max_response_bytes = 0"));
    }

    #[test]
    fn startup_timeout_out_of_range() {
        let mut config = WebinixConfig::default();
        config.startup.timeout_secs = 0;
        assert!(validate(&config).is_err());
        config.startup.timeout_secs = 7200;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn cache_dir_must_stay_inside_working_directory() {
        let mut config = WebinixConfig::default();
        config.cache.dir = "../outside".into();
        assert!(validate(&config).is_err());

        config.cache.dir = String::new();
        assert!(validate(&config).is_err());

        config.cache.dir = "tmp/__intcache__".into();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn library_file_name_must_be_bare() {
        let mut config = WebinixConfig::default();
        config.library.file_name = Some("lib/webinix.so".into());
        assert!(validate(&config).is_err());

        config.library.file_name = Some("libwebinix.so".into());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn errors_are_collected() {
        let mut config = WebinixConfig::default();
        config.startup.timeout_secs = 0;
        config.script.max_response_bytes = 0;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("startup.timeout_secs"));
        assert!(err.contains("script.max_response_bytes"));
    }
}
