// Configuration file handling for the lapse command line

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use log::warn;

use crate::models::Unit;
use crate::parse::{DecimalStyle, ParseOptions};

/// Parser defaults read from `~/.lapse/rc`
pub struct Config;

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".lapse").join("rc"))
    }

    /// Load options from the configuration file, or defaults if it does not exist
    pub fn load() -> Result<ParseOptions> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<ParseOptions> {
        if !path.exists() {
            return Ok(ParseOptions::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse_rc(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse `key=value` lines on top of the default options.
    /// Blank lines and `#` comments are ignored; unknown keys are skipped.
    pub fn parse_rc(content: &str) -> Result<ParseOptions> {
        let mut options = ParseOptions::default();

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                bail!("Line {}: expected key=value, got '{}'", index + 1, line);
            };
            let (key, value) = (key.trim(), value.trim());

            apply_setting(&mut options, key, value)
                .with_context(|| format!("Line {}: invalid value for '{}'", index + 1, key))?;
        }

        Ok(options)
    }
}

fn apply_setting(options: &mut ParseOptions, key: &str, value: &str) -> Result<()> {
    match key {
        "uncoloned.default" => options.uncoloned_default = parse_unit(value)?,
        "coloned.default" => options.coloned_default = parse_unit(value)?,
        "fail_on_unitless" => options.fail_on_unitless_number = parse_bool(value)?,
        "allow_unitless_zero" => options.allow_unitless_zero = parse_bool(value)?,
        "strict_order" => options.strict_big_to_small = parse_bool(value)?,
        "auto_units" => options.auto_units_if_too_many_colons = parse_bool(value)?,
        "day_hours" => options.allow_dot_separated_day_hours = parse_bool(value)?,
        "ignore_starting_colon" => options.ignore_starting_colon = parse_bool(value)?,
        "decimal.separator" => {
            let separator = parse_char(value)?
                .ok_or_else(|| anyhow!("decimal separator cannot be empty"))?;
            options.decimal_style = DecimalStyle::new(separator, options.decimal_style.group_separator);
        }
        "group.separator" => {
            let separator = parse_char(value)?;
            options.decimal_style = DecimalStyle::new(options.decimal_style.decimal_separator, separator);
        }
        _ => warn!("Ignoring unknown config key '{}'", key),
    }
    Ok(())
}

fn parse_unit(value: &str) -> Result<Unit> {
    value.parse::<Unit>().map_err(|e| anyhow!(e))
}

pub fn parse_bool(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => bail!("expected a boolean, got '{}'", value),
    }
}

/// A single character, or `None` for an empty value
pub fn parse_char(value: &str) -> Result<Option<char>> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(c), None) => Ok(Some(c)),
        _ => bail!("expected a single character, got '{}'", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        if let Ok(path) = Config::config_path() {
            assert!(path.to_string_lossy().contains(".lapse"));
            assert!(path.to_string_lossy().ends_with("rc"));
        }
    }

    #[test]
    fn test_parse_rc() {
        let content = "# parser defaults\n\
                       coloned.default=minutes\n\
                       uncoloned.default = s\n\
                       strict_order=off\n\
                       \n\
                       decimal.separator=,\n\
                       group.separator=.\n";
        let options = Config::parse_rc(content).unwrap();
        assert_eq!(options.coloned_default, Unit::Minutes);
        assert_eq!(options.uncoloned_default, Unit::Seconds);
        assert!(!options.strict_big_to_small);
        assert_eq!(options.decimal_style, DecimalStyle::new(',', Some('.')));
    }

    #[test]
    fn test_parse_rc_rejects_bad_values() {
        assert!(Config::parse_rc("strict_order=maybe").is_err());
        assert!(Config::parse_rc("coloned.default=fortnights").is_err());
        assert!(Config::parse_rc("decimal.separator=").is_err());
        assert!(Config::parse_rc("just some text").is_err());
    }

    #[test]
    fn test_unknown_keys_are_skipped() {
        let options = Config::parse_rc("data.location=./ledger.db\n").unwrap();
        assert_eq!(options, ParseOptions::default());
    }

    #[test]
    fn test_load_from_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let options = Config::load_from(&temp_dir.path().join("rc")).unwrap();
        assert_eq!(options, ParseOptions::default());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let rc = temp_dir.path().join("rc");
        fs::write(&rc, "fail_on_unitless=yes\n").unwrap();
        let options = Config::load_from(&rc).unwrap();
        assert!(options.fail_on_unitless_number);
    }
}
