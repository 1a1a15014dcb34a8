use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow};
use config::{Config, File};
use serde::Deserialize;

use homescout::{DEFAULT_QUIET_PERIOD, SortKey};

use crate::app_dirs;
use crate::cli::CliArgs;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    search: SearchSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SearchSection {
    /// Quiet period for the viewport debouncer, in milliseconds.
    debounce_ms: Option<u64>,
    /// Ordering applied when the address carries no `sort` key:
    /// `priceAsc`, `priceDesc` or `newest`.
    default_sort: Option<String>,
}

/// Settings after merging defaults, configuration files, and environment.
pub(crate) struct ResolvedConfig {
    pub(crate) quiet_period: Duration,
    pub(crate) default_sort: SortKey,
}

impl ResolvedConfig {
    pub(crate) fn print_summary(&self) {
        println!("Effective configuration:");
        println!("  Debounce quiet period: {}ms", self.quiet_period.as_millis());
        println!(
            "  Default sort: {}",
            self.default_sort.as_param().unwrap_or("(input order)")
        );
    }
}

pub(crate) fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
    let raw: RawConfig = build_config(cli)?
        .try_deserialize()
        .map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
    raw.resolve()
}

fn build_config(cli: &CliArgs) -> Result<Config> {
    let mut builder = Config::builder();

    if !cli.no_config {
        for path in default_config_files() {
            builder = builder.add_source(File::from(path).required(false));
        }
    }

    for path in &cli.config {
        builder = builder.add_source(File::from(path.clone()).required(true));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("homescout")
            .separator("__")
            .try_parsing(true),
    );

    builder.build().map_err(|err| anyhow!("failed to load configuration: {err}"))
}

fn default_config_files() -> Vec<PathBuf> {
    match app_dirs::get_config_dir() {
        Ok(dir) => vec![dir.join("settings.toml")],
        Err(_) => Vec::new(),
    }
}

impl RawConfig {
    fn resolve(self) -> Result<ResolvedConfig> {
        let quiet_period = self
            .search
            .debounce_ms
            .map_or(DEFAULT_QUIET_PERIOD, Duration::from_millis);

        let default_sort = match self.search.default_sort.as_deref() {
            None => SortKey::None,
            Some(value) => {
                let key = SortKey::from_param(value);
                if key == SortKey::None {
                    return Err(anyhow!("unknown default_sort value '{value}'"));
                }
                key
            }
        };

        Ok(ResolvedConfig {
            quiet_period,
            default_sort,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_configured() {
        let resolved = RawConfig::default().resolve().expect("resolve");
        assert_eq!(resolved.quiet_period, DEFAULT_QUIET_PERIOD);
        assert_eq!(resolved.default_sort, SortKey::None);
    }

    #[test]
    fn configured_values_override_the_defaults() {
        let raw = RawConfig {
            search: SearchSection {
                debounce_ms: Some(250),
                default_sort: Some("newest".into()),
            },
        };
        let resolved = raw.resolve().expect("resolve");
        assert_eq!(resolved.quiet_period, Duration::from_millis(250));
        assert_eq!(resolved.default_sort, SortKey::Newest);
    }

    #[test]
    fn unknown_sort_names_are_rejected() {
        let raw = RawConfig {
            search: SearchSection {
                debounce_ms: None,
                default_sort: Some("cheapest".into()),
            },
        };
        assert!(raw.resolve().is_err());
    }
}
