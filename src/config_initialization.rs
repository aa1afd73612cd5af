//! Configuration initialization and hierarchy management

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::AppConfig;
use crate::cli::Cli;

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> Result<AppConfig> {
    resolve_configuration(cli, |name| std::env::var(name).ok())
}

/// Same hierarchy with an injectable environment
pub fn resolve_configuration<F>(cli: &Cli, env: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    // Steps 1 and 2: defaults, overlaid by the file when there is one
    let mut config = AppConfig::discover(cli.config.as_deref())?;

    // Step 3: environment variables
    let env_overrides = config
        .apply_overrides(env)
        .context("Invalid environment override")?;
    if env_overrides > 0 {
        info!("Applied {} environment variable overrides", env_overrides);
    }

    // Step 4: command line
    let cli_overrides = apply_cli_configuration_overrides(&mut config, cli);
    if cli_overrides > 0 {
        info!("Applied {} CLI configuration overrides", cli_overrides);
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn apply_cli_configuration_overrides(config: &mut AppConfig, cli: &Cli) -> usize {
    let mut cli_overrides = 0;

    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
        cli_overrides += 1;
    }
    if cli.log_json {
        config.log_json = true;
        cli_overrides += 1;
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
        cli_overrides += 1;
    }
    if let Some(ffmpeg) = &cli.ffmpeg {
        config.encoder.ffmpeg_path = ffmpeg.clone();
        cli_overrides += 1;
    }

    cli_overrides
}
