use anyhow::{Context, Result};
use config;
use log::{info, warn};
use serde_derive::{Deserialize, Serialize};

use crate::authz::{AudiencePermissions, Domain, Permission};

const BUILTIN_DOMAIN: &str = "dev-jdsnf3lqod8nxlnv.us.auth0.com";

const BUILTIN_AUDIENCES: &[(&str, Permission)] = &[
    ("https://momsrecipebox-api", Permission::Any),
    ("https://momsrecipebox-admin-api", Permission::Admin),
    ("https://cruise-admin-api", Permission::Admin),
    ("https://cruise-viewer-api", Permission::Any),
];

////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    domain: Domain,
    audiences: AudiencePermissions,
}

impl Config {
    pub fn new(domain: Domain, audiences: AudiencePermissions) -> Self {
        Self { domain, audiences }
    }

    /// The table deployed with the validator.
    pub fn builtin() -> Self {
        Self {
            domain: Domain::from_static(BUILTIN_DOMAIN),
            audiences: AudiencePermissions::from_static(BUILTIN_AUDIENCES),
        }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn audiences(&self) -> &AudiencePermissions {
        &self.audiences
    }

    pub fn permission(&self, audience: &str) -> Option<Permission> {
        self.audiences.get(audience)
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Reads `filename` and applies `APP_*` environment overrides on top of it.
pub fn load(filename: &str) -> Result<Config> {
    let mut parser = config::Config::default();
    parser
        .merge(config::File::with_name(filename))
        .with_context(|| format!("Failed to read config file '{}'", filename))?;
    parser
        .merge(config::Environment::with_prefix("APP").separator("__"))
        .context("Failed to read config from environment")?;

    let config = parser
        .try_into::<Config>()
        .with_context(|| format!("Invalid config in '{}'", filename))?;

    log_loaded(&config, filename);
    Ok(config)
}

/// Parses a TOML document, without environment overrides.
pub fn parse(toml: &str) -> Result<Config> {
    let mut parser = config::Config::default();
    parser
        .merge(config::File::from_str(toml, config::FileFormat::Toml))
        .context("Failed to parse config")?;

    let config = parser.try_into::<Config>().context("Invalid config")?;
    log_loaded(&config, "<string>");
    Ok(config)
}

fn log_loaded(config: &Config, source: &str) {
    info!(
        "Loaded {} audience(s) for domain = '{}' from {}",
        config.audiences.len(),
        config.domain,
        source
    );

    if config.audiences.is_empty() {
        warn!("No audiences configured, every token audience is unknown");
    }
}

////////////////////////////////////////////////////////////////////////////////
