use crate::Result;
use crate::comparison::SearchLimits;
use crate::pipeline::AnalyzerSettings;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the current directory
pub const DEFAULT_CONFIG_FILE: &str = "reposcope.toml";

/// Largest page size the search endpoint serves
const MAX_RESULTS_PER_SEARCH: usize = 100;

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the GitHub REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Most recent commits fetched per repository
    #[serde(default = "default_commit_limit")]
    pub commit_limit: usize,

    /// Results requested from each similarity search query
    #[serde(default = "default_results_per_search")]
    pub results_per_search: usize,

    /// Similar repositories kept after deduplication
    #[serde(default = "default_max_similar_repositories")]
    pub max_similar_repositories: usize,

    /// Top similar repositories covered by the comparison summary
    #[serde(default = "default_comparison_set_size")]
    pub comparison_set_size: usize,

    /// Repositories analyzed at once in portfolio mode
    #[serde(default = "default_max_concurrent_repositories")]
    pub max_concurrent_repositories: usize,

    /// Timeout applied to each request to the hosting service
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

const fn default_commit_limit() -> usize {
    100
}

const fn default_results_per_search() -> usize {
    10
}

const fn default_max_similar_repositories() -> usize {
    20
}

const fn default_comparison_set_size() -> usize {
    5
}

const fn default_max_concurrent_repositories() -> usize {
    4
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `reposcope.toml` in `base_dir` is used when present.
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading reposcope configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading reposcope configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(app_err!("api_base_url must not be empty"));
        }

        for (name, value) in [
            ("commit_limit", self.commit_limit),
            ("results_per_search", self.results_per_search),
            ("max_similar_repositories", self.max_similar_repositories),
            ("comparison_set_size", self.comparison_set_size),
            ("max_concurrent_repositories", self.max_concurrent_repositories),
        ] {
            if value == 0 {
                return Err(app_err!("{name} must be greater than 0"));
            }
        }

        if self.results_per_search > MAX_RESULTS_PER_SEARCH {
            return Err(app_err!(
                "results_per_search must be at most {MAX_RESULTS_PER_SEARCH}, got {}",
                self.results_per_search
            ));
        }

        if self.comparison_set_size > self.max_similar_repositories {
            return Err(app_err!(
                "comparison_set_size ({}) must not exceed max_similar_repositories ({})",
                self.comparison_set_size,
                self.max_similar_repositories
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(app_err!("request_timeout must be greater than 0"));
        }

        Ok(())
    }

    /// Pipeline settings derived from this configuration
    #[must_use]
    pub const fn analyzer_settings(&self) -> AnalyzerSettings {
        AnalyzerSettings {
            commit_limit: self.commit_limit,
            search: SearchLimits {
                results_per_search: self.results_per_search,
                max_candidates: self.max_similar_repositories,
            },
            comparison_set_size: self.comparison_set_size,
            max_concurrent_repositories: self.max_concurrent_repositories,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
