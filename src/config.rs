//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgtree/orgtree.toml`
//! 3. Local config: `<chart_dir>/.orgtree.toml` (next to the chart file)
//! 4. Environment variables: `ORGTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{RenderStyle, SearchScope};

/// Unified configuration for orgtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Indent repeated per hierarchy level when rendering (default: two spaces)
    pub indent: String,
    /// Digits after the decimal point for salaries and budgets (default: 1)
    pub salary_precision: usize,
    /// Let name searches return departments too (default: employees only)
    pub search_departments: bool,
    /// Refuse charts containing negative salaries (default: accept)
    pub reject_negative_salary: bool,
    /// Chart used when `--chart` is not given; the demo chart otherwise
    pub default_chart: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        let style = RenderStyle::default();
        Self {
            indent: style.indent,
            salary_precision: style.salary_precision,
            search_departments: false,
            reject_negative_salary: false,
            default_chart: None,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub indent: Option<String>,
    pub salary_precision: Option<usize>,
    pub search_departments: Option<bool>,
    pub reject_negative_salary: Option<bool>,
    pub default_chart: Option<PathBuf>,
}

/// Get the XDG config directory for orgtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgtree.toml"))
}

/// Get the path to the local config file next to a chart.
pub fn local_config_path(chart_dir: &Path) -> PathBuf {
    chart_dir.join(".orgtree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    pub fn render_style(&self) -> RenderStyle {
        RenderStyle {
            indent: self.indent.clone(),
            salary_precision: self.salary_precision,
        }
    }

    pub fn search_scope(&self) -> SearchScope {
        if self.search_departments {
            SearchScope::AllUnits
        } else {
            SearchScope::EmployeesOnly
        }
    }

    /// Expand `~` and `$VAR` in the default chart path.
    fn expand_paths(&mut self) {
        if let Some(chart) = &self.default_chart {
            let raw = chart.to_string_lossy();
            let expanded = shellexpand::full(raw.as_ref())
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| raw.to_string());
            self.default_chart = Some(PathBuf::from(expanded));
        }
    }

    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            indent: overlay
                .indent
                .clone()
                .unwrap_or_else(|| self.indent.clone()),
            salary_precision: overlay.salary_precision.unwrap_or(self.salary_precision),
            search_departments: overlay
                .search_departments
                .unwrap_or(self.search_departments),
            reject_negative_salary: overlay
                .reject_negative_salary
                .unwrap_or(self.reject_negative_salary),
            default_chart: overlay
                .default_chart
                .clone()
                .or_else(|| self.default_chart.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `chart_dir` - Directory of the chart file, searched for `.orgtree.toml`
    pub fn load(chart_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = chart_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("local config: {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply ORGTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("ORGTREE").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("indent") {
            settings.indent = val;
        }
        if let Ok(val) = config.get_int("salary_precision") {
            settings.salary_precision = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("ORGTREE_SALARY_PRECISION out of range: {}", val),
            })?;
        }
        if let Ok(val) = config.get_bool("search_departments") {
            settings.search_departments = val;
        }
        if let Ok(val) = config.get_bool("reject_negative_salary") {
            settings.reject_negative_salary = val;
        }
        if let Ok(val) = config.get_string("default_chart") {
            settings.default_chart = Some(PathBuf::from(val));
        }

        Ok(settings)
    }

    /// Render current settings as TOML (for `orgtree config`).
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let base = Settings::default();
        let overlay = RawSettings {
            salary_precision: Some(2),
            search_departments: Some(true),
            ..Default::default()
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.indent, "  ");
        assert_eq!(merged.salary_precision, 2);
        assert_eq!(merged.search_scope(), SearchScope::AllUnits);
        assert!(!merged.reject_negative_salary);
    }

    #[test]
    fn given_defaults_when_building_render_style_then_matches_domain_default() {
        assert_eq!(Settings::default().render_style(), RenderStyle::default());
    }
}
