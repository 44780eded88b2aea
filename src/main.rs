// Diagnostic entrypoint: measures adaptive hash collisions over synthetic key sequences.

use adaptive_hash::config::{Config, ConfigTrait};
use adaptive_hash::diagnostic::{self, Scenario};
use adaptive_hash::BitStats;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

const CONFIG_PATH: &str = "cfg/adaptive_hash.cfg.yaml";
const CONFIG_PATH_LOCAL: &str = "cfg/adaptive_hash.cfg.local.yaml";

/// adaptive-hash - collision diagnostics for entropy-driven bit-selection hashing
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, value_name = "FILE")]
    cfg: Option<PathBuf>,

    /// Key sequence to measure (overrides config)
    #[arg(short, long, value_enum)]
    scenario: Option<Scenario>,

    /// Seed of the random scenario (overrides config)
    #[arg(long)]
    seed: Option<u64>,
}

/// Where the configuration came from, logged once the logger is up.
enum ConfigSource {
    File(PathBuf),
    Defaults,
}

/// Loads the configuration struct from YAML file.
/// Tries local config first, then the default config, then built-in defaults.
fn load_cfg(path: Option<PathBuf>) -> Result<(Config, ConfigSource)> {
    if let Some(custom_path) = path {
        let cfg = Config::load(&custom_path)
            .with_context(|| format!("failed to load custom config from {:?}", custom_path))?;
        return Ok((cfg, ConfigSource::File(custom_path)));
    }

    for candidate in [CONFIG_PATH_LOCAL, CONFIG_PATH] {
        let candidate = PathBuf::from(candidate);
        if candidate.exists() {
            let cfg = Config::load(&candidate)
                .with_context(|| format!("failed to load config from {:?}", candidate))?;
            return Ok((cfg, ConfigSource::File(candidate)));
        }
    }

    Ok((Config::default(), ConfigSource::Defaults))
}

/// Configures structured logging based on configuration.
fn configure_logger(cfg: &Config) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.log_level()));

    if cfg.is_prod() {
        // Production: JSON format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        // Development: Pretty console format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .init();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (cfg, source) = load_cfg(args.cfg)?;
    configure_logger(&cfg);

    match source {
        ConfigSource::File(path) => info!(
            component = "config",
            event = "load_success",
            path = ?path,
            "config loaded"
        ),
        ConfigSource::Defaults => warn!(
            component = "config",
            event = "load_defaults",
            "no config file found, using built-in defaults"
        ),
    }

    let mut settings = cfg
        .diagnostic_settings()
        .context("invalid diagnostic settings")?;
    if let Some(scenario) = args.scenario {
        settings.scenario = scenario;
    }
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }

    let policy = cfg.rescale_policy().context("invalid rescale policy")?;
    let stats = Arc::new(BitStats::with_policy(policy));

    info!(
        component = "main",
        event = "diagnostic_started",
        scenario = %settings.scenario,
        bits = settings.bits,
        count = settings.count,
        seed = settings.seed,
        policy = ?policy,
        "running collision diagnostics"
    );

    let reports = diagnostic::run(&stats, &settings).context("diagnostic run failed")?;
    for report in &reports {
        println!("{}", report);
    }

    let total_collisions: usize = reports.iter().map(|r| r.collisions).sum();
    info!(
        component = "main",
        event = "diagnostic_finished",
        passes = reports.len(),
        observed = stats.observed(),
        total_collisions,
        "collision diagnostics finished"
    );

    Ok(())
}
