//! Configuration loading.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::classifier::Thresholds;
use crate::engine::EngineConfig;
use crate::scoring::{AnswerPolicy, Weights};

/// Environment variable overriding `answer_policy`.
pub const POLICY_ENV_VAR: &str = "FITCHECK_ANSWER_POLICY";

/// Top-level fitcheck configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitcheckConfig {
    /// Catalog file to use instead of the built-in one.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// How malformed or unexpected answers are treated.
    #[serde(default)]
    pub answer_policy: AnswerPolicy,
    #[serde(default)]
    pub weights: Weights,
    #[serde(default)]
    pub thresholds: Thresholds,
    /// Directory of the response store.
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,
    /// Output directory for reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_store_dir() -> PathBuf {
    PathBuf::from("./.fitcheck")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./fitcheck-results")
}

impl Default for FitcheckConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            answer_policy: AnswerPolicy::default(),
            weights: Weights::default(),
            thresholds: Thresholds::default(),
            store_dir: default_store_dir(),
            output_dir: default_output_dir(),
        }
    }
}

impl FitcheckConfig {
    /// Scoring settings for the engine.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            policy: self.answer_policy,
            weights: self.weights.clone(),
            thresholds: self.thresholds.clone(),
        }
    }

    /// Load the configured catalog, or the built-in one.
    pub fn load_catalog(&self) -> Result<Arc<Catalog>> {
        let catalog = match &self.catalog {
            Some(path) => crate::parser::parse_catalog(path)?,
            None => Catalog::builtin()?,
        };
        Ok(Arc::new(catalog))
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted as-is and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `fitcheck.toml` in the current directory
/// 2. `~/.config/fitcheck/config.toml`
///
/// `FITCHECK_ANSWER_POLICY` overrides the policy from either file.
pub fn load_config() -> Result<FitcheckConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<FitcheckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("fitcheck.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => FitcheckConfig::default(),
    };

    if let Ok(policy) = std::env::var(POLICY_ENV_VAR) {
        config.answer_policy = policy
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {POLICY_ENV_VAR}: {e}"))?;
    }

    config.catalog = config.catalog.as_deref().map(resolve_path);
    config.store_dir = resolve_path(&config.store_dir);
    config.output_dir = resolve_path(&config.output_dir);

    Ok(config)
}

/// Parse and validate a configuration document.
pub fn parse_config(content: &str) -> Result<FitcheckConfig> {
    let config: FitcheckConfig = toml::from_str(content)?;
    config.weights.validate()?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("fitcheck"))
}
