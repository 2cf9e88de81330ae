//! Config command handlers

use std::path::Path;

use anyhow::{Context, Result};

use company_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&Path>, output: &Output) -> Result<()> {
    let config = Config::load(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "log_file": config.log_file,
                    "notification_secs": config.notification_secs
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = Config::file_path(config_path);
            println!("Configuration:");
            println!("  data_dir:          {}", config.data_dir.display());
            println!(
                "  log_file:          {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!("  notification_secs: {}", config.notification_secs);
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String, config_path: Option<&Path>, output: &Output) -> Result<()> {
    let mut config = Config::load(config_path).context("Failed to load configuration")?;
    config.set(&key, &value)?;

    let saved = config
        .save(config_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {} in {}", key, value, saved.display()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_writes_explicit_config_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let data_dir = temp_dir.path().join("data");
        std::fs::write(
            &config_path,
            format!("data_dir = {:?}\n", data_dir.to_string_lossy()),
        )
        .unwrap();

        let output = Output::new(OutputFormat::Quiet);
        set(
            "notification_secs".to_string(),
            "7".to_string(),
            Some(config_path.as_path()),
            &output,
        )
        .unwrap();

        let config = Config::load(Some(&config_path)).unwrap();
        assert_eq!(config.notification_secs, 7);
        assert_eq!(config.data_dir, data_dir);
    }

    #[test]
    fn test_set_unknown_key_leaves_file_alone() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let body = format!(
            "data_dir = {:?}\nnotification_secs = 4\n",
            temp_dir.path().join("data").to_string_lossy()
        );
        std::fs::write(&config_path, &body).unwrap();

        let output = Output::new(OutputFormat::Quiet);
        let err = set(
            "colour".to_string(),
            "blue".to_string(),
            Some(config_path.as_path()),
            &output,
        )
        .unwrap_err();

        assert!(err.to_string().contains("Unknown configuration key"));
        assert_eq!(std::fs::read_to_string(&config_path).unwrap(), body);
    }
}
