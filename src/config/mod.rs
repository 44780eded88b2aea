// Configuration loading and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::diagnostic::{Scenario, Settings as DiagnosticSettings};
use crate::error::HashError;
use crate::hasher::{adaptive::validate_bits, DEFAULT_BITS};
use crate::stats::RescalePolicy;

#[cfg(test)]
pub mod test_config;

pub const PROD: &str = "prod";
pub const DEV: &str = "dev";
pub const TEST: &str = "test";

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_RESCALE_THRESHOLD: u32 = 1 << 30;
pub const DEFAULT_DIAGNOSTIC_COUNT: usize = 1000;
pub const DEFAULT_DIAGNOSTIC_SEED: u64 = 42;
pub const DEFAULT_RANDOM_KEY_BITS: u32 = 20;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdaptiveHash {
    #[serde(rename = "adaptive_hash")]
    pub adaptive_hash: AdaptiveHashBox,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdaptiveHashBox {
    pub env: String,
    pub logs: Option<Logs>,
    pub hasher: Option<Hasher>,
    pub stats: Option<Stats>,
    pub diagnostic: Option<Diagnostic>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logs {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Hasher {
    pub bits: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Stats {
    pub rescale: Option<Rescale>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Rescale {
    pub enabled: bool,
    pub threshold: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Diagnostic {
    pub scenario: Option<Scenario>,
    pub count: Option<usize>,
    pub seed: Option<u64>,
    #[serde(rename = "random_key_bits")]
    pub random_key_bits: Option<u32>,
}

// Config trait
pub trait ConfigTrait {
    fn logs(&self) -> Option<&Logs>;
    fn log_level(&self) -> &str;
    fn is_prod(&self) -> bool;
    fn is_dev(&self) -> bool;
    fn is_test(&self) -> bool;
    fn hasher(&self) -> Option<&Hasher>;
    fn stats(&self) -> Option<&Stats>;
    fn diagnostic(&self) -> Option<&Diagnostic>;
}

// Config type alias for convenience
pub type Config = AdaptiveHash;

impl ConfigTrait for Config {
    fn logs(&self) -> Option<&Logs> {
        self.adaptive_hash.logs.as_ref()
    }

    fn log_level(&self) -> &str {
        self.logs()
            .and_then(|logs| logs.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    fn is_prod(&self) -> bool {
        self.adaptive_hash.env == PROD
    }

    fn is_dev(&self) -> bool {
        self.adaptive_hash.env == DEV
    }

    fn is_test(&self) -> bool {
        self.adaptive_hash.env == TEST
    }

    fn hasher(&self) -> Option<&Hasher> {
        self.adaptive_hash.hasher.as_ref()
    }

    fn stats(&self) -> Option<&Stats> {
        self.adaptive_hash.stats.as_ref()
    }

    fn diagnostic(&self) -> Option<&Diagnostic> {
        self.adaptive_hash.diagnostic.as_ref()
    }
}

impl Default for Config {
    /// Built-in defaults used when no config file is found.
    fn default() -> Self {
        Self {
            adaptive_hash: AdaptiveHashBox {
                env: DEV.to_string(),
                logs: Some(Logs {
                    level: Some(DEFAULT_LOG_LEVEL.to_string()),
                }),
                hasher: Some(Hasher {
                    bits: Some(DEFAULT_BITS),
                }),
                stats: Some(Stats {
                    rescale: Some(Rescale {
                        enabled: false,
                        threshold: Some(DEFAULT_RESCALE_THRESHOLD),
                    }),
                }),
                diagnostic: Some(Diagnostic {
                    scenario: Some(Scenario::All),
                    count: Some(DEFAULT_DIAGNOSTIC_COUNT),
                    seed: Some(DEFAULT_DIAGNOSTIC_SEED),
                    random_key_bits: Some(DEFAULT_RANDOM_KEY_BITS),
                }),
            },
        }
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Resolve absolute path
        let abs_path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve absolute config filepath: {:?}", path))?;

        // Read file
        let data = std::fs::read_to_string(&abs_path)
            .with_context(|| format!("read config yaml file {:?}", abs_path))?;

        Self::parse(&data).with_context(|| format!("invalid config in {:?}", abs_path))
    }

    /// Parses and validates configuration from YAML text.
    pub fn parse(data: &str) -> Result<Self> {
        let cfg: Config = serde_yaml::from_str(data).context("unmarshal yaml")?;

        // Fail at load time rather than when the first hasher is built
        cfg.bits().context("hasher.bits")?;
        cfg.rescale_policy().context("stats.rescale")?;
        cfg.diagnostic_settings().context("diagnostic")?;

        Ok(cfg)
    }

    /// Number of bits per hash.
    pub fn bits(&self) -> Result<u32, HashError> {
        let bits = self.hasher().and_then(|h| h.bits).unwrap_or(DEFAULT_BITS);
        validate_bits(bits)?;
        Ok(bits)
    }

    /// Rescale policy for the bit tracker; disabled unless `stats.rescale.enabled` is set.
    pub fn rescale_policy(&self) -> Result<RescalePolicy, HashError> {
        match self.stats().and_then(|s| s.rescale.as_ref()) {
            Some(rescale) if rescale.enabled => {
                RescalePolicy::halve(rescale.threshold.unwrap_or(DEFAULT_RESCALE_THRESHOLD))
            }
            _ => Ok(RescalePolicy::Never),
        }
    }

    /// Resolved diagnostic run parameters.
    pub fn diagnostic_settings(&self) -> Result<DiagnosticSettings, HashError> {
        let diag = self.diagnostic();
        Ok(DiagnosticSettings {
            scenario: diag.and_then(|d| d.scenario).unwrap_or(Scenario::All),
            count: diag.and_then(|d| d.count).unwrap_or(DEFAULT_DIAGNOSTIC_COUNT),
            seed: diag.and_then(|d| d.seed).unwrap_or(DEFAULT_DIAGNOSTIC_SEED),
            random_key_bits: diag
                .and_then(|d| d.random_key_bits)
                .unwrap_or(DEFAULT_RANDOM_KEY_BITS),
            bits: self.bits()?,
        })
    }
}
