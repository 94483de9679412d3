//! Configuration loader for the heatmap tool.
//!
//! Reads the YAML area description written by the data collection tooling
//! and turns it into the heatmap, kernel and evaluator parameters.
//!
//! Supports environment variable substitution using ${VAR} syntax.

use anyhow::{Context, Result};
use heatmap_common::{EvaluatorConfig, GeoBounds, HeatmapConfig, KernelConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Area description as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub heatmap_width: u32,
    pub heatmap_height: u32,
    pub lat_lo: f64,
    #[serde(rename = "lng_lo")]
    pub lon_lo: f64,
    pub lat_hi: f64,
    #[serde(rename = "lng_hi")]
    pub lon_hi: f64,
    pub min_price_limit: f64,
    pub max_price_limit: f64,
    pub heatmap_step: f64,
    #[serde(default)]
    pub kernel: KernelConfig,
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
}

impl DataConfig {
    pub fn heatmap(&self) -> HeatmapConfig {
        HeatmapConfig {
            width: self.heatmap_width,
            height: self.heatmap_height,
            bounds: GeoBounds::new(self.lon_lo, self.lon_hi, self.lat_lo, self.lat_hi),
            min_limit: self.min_price_limit,
            max_limit: self.max_price_limit,
            step: self.heatmap_step,
        }
    }
}

/// Validated configuration plus the directory it was read from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub name: Option<String>,
    pub heatmap: HeatmapConfig,
    pub kernel: KernelConfig,
    pub evaluator: EvaluatorConfig,
    /// Directory containing the config file
    pub base_dir: PathBuf,
}

/// Load, expand and validate a configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<LoadedConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {:?}", path))?;

    let mut loaded = parse_config(&content)
        .with_context(|| format!("Not a valid configuration file: {:?}", path))?;
    loaded.base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    Ok(loaded)
}

/// Parse and validate configuration text.
pub fn parse_config(content: &str) -> Result<LoadedConfig> {
    let expanded = expand_env_vars(content)?;
    let config: DataConfig =
        serde_yaml::from_str(&expanded).context("Failed to parse config YAML")?;

    let heatmap = config.heatmap();
    heatmap.validate()?;
    config.kernel.validate()?;
    config.evaluator.validate()?;

    Ok(LoadedConfig {
        name: config.name,
        heatmap,
        kernel: config.kernel,
        evaluator: config.evaluator,
        base_dir: PathBuf::new(),
    })
}

/// Expand `${VAR}` and `${VAR:-default}` references.
fn expand_env_vars(content: &str) -> Result<String> {
    let mut result = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find('}')
            .with_context(|| format!("Unclosed variable substitution: ${{{}", after))?;

        result.push_str(&resolve_var_expr(&after[..end])?);
        rest = &after[end + 1..];
    }
    result.push_str(rest);

    Ok(result)
}

fn resolve_var_expr(expr: &str) -> Result<String> {
    if let Some((var_name, default)) = expr.split_once(":-") {
        match std::env::var(var_name.trim()) {
            Ok(val) if !val.is_empty() => Ok(val),
            _ => Ok(default.to_string()),
        }
    } else {
        std::env::var(expr.trim()).with_context(|| format!("Environment variable {} not set", expr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heatmap_common::HeatmapError;
    use std::io::Write;
    use test_utils::{SAMPLE_CONFIG_YAML, STOCKHOLM};

    #[test]
    fn test_parse_reference_config() {
        let loaded = parse_config(SAMPLE_CONFIG_YAML).unwrap();
        assert_eq!(loaded.name.as_deref(), Some("stockholm"));
        assert_eq!(loaded.heatmap.width, 1000);
        assert_eq!(loaded.heatmap.height, 1000);
        assert_eq!(loaded.heatmap.bounds, STOCKHOLM);
        assert_eq!(loaded.heatmap.step, 10000.0);
        assert_eq!(loaded.kernel, KernelConfig::default());
        assert_eq!(loaded.evaluator, EvaluatorConfig::default());
    }

    #[test]
    fn test_optional_sections() {
        let yaml = format!(
            "{}kernel:\n  ignore_distance: 0.02\nevaluator:\n  workers: 2\n",
            SAMPLE_CONFIG_YAML
        );
        let loaded = parse_config(&yaml).unwrap();
        assert_eq!(loaded.kernel.ignore_distance, 0.02);
        assert_eq!(loaded.kernel.min_confident_samples, 3);
        assert_eq!(loaded.evaluator.workers, 2);
        assert_eq!(loaded.evaluator.queue_depth, 1);
    }

    #[test]
    fn test_invalid_values_name_the_field() {
        let yaml = SAMPLE_CONFIG_YAML.replace("heatmap_step: 10000", "heatmap_step: 0");
        let err = parse_config(&yaml).unwrap_err();
        let config_err = err.downcast_ref::<HeatmapError>().unwrap();
        assert!(matches!(
            config_err,
            HeatmapError::InvalidConfiguration { field: "step", .. }
        ));
    }

    #[test]
    fn test_missing_key_fails() {
        let yaml = SAMPLE_CONFIG_YAML.replace("heatmap_width: 1000\n", "");
        assert!(parse_config(&yaml).is_err());
    }

    #[test]
    fn test_expand_env_vars_with_default() {
        let expanded = expand_env_vars("w: ${HEATMAP_TEST_UNSET_WIDTH:-640}").unwrap();
        assert_eq!(expanded, "w: 640");
    }

    #[test]
    fn test_expand_env_vars_missing_required() {
        assert!(expand_env_vars("w: ${HEATMAP_TEST_UNSET_REQUIRED}").is_err());
        assert!(expand_env_vars("w: ${UNCLOSED").is_err());
    }

    #[test]
    fn test_load_config_records_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(SAMPLE_CONFIG_YAML.as_bytes()).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.base_dir, dir.path());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nonexistent/config.yml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
