use std::io::Write;

use anyhow::{bail, format_err, Context, Result};
use log::{debug, info};
use serde_json::json;

use crate::conf::{self, Config};

const USAGE: &str = "Usage: audience-permissions [--config FILE] [AUDIENCE]";

////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Default, PartialEq)]
struct Options {
    config_filename: Option<String>,
    audience: Option<String>,
    help: bool,
}

fn parse_args<I>(args: I) -> Result<Options>
where
    I: IntoIterator<Item = String>,
{
    let mut opts = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => opts.help = true,
            "-c" | "--config" => {
                let filename = args
                    .next()
                    .ok_or_else(|| format_err!("missing value for '{}'\n{}", arg, USAGE))?;
                opts.config_filename = Some(filename);
            }
            val if val.starts_with('-') => bail!("unknown option: {}\n{}", val, USAGE),
            val if opts.audience.is_some() => {
                bail!("only one audience may be given: {}\n{}", val, USAGE)
            }
            val => opts.audience = Some(val.to_owned()),
        }
    }

    Ok(opts)
}

////////////////////////////////////////////////////////////////////////////////

pub(crate) fn run<I, W>(args: I, out: &mut W) -> Result<()>
where
    I: IntoIterator<Item = String>,
    W: Write,
{
    let opts = parse_args(args)?;

    if opts.help {
        writeln!(out, "{}", USAGE)?;
        return Ok(());
    }

    let config = match opts.config_filename {
        Some(ref filename) => conf::load(filename)?,
        None => {
            info!("No config file given, using the built-in audience table");
            Config::builtin()
        }
    };

    match opts.audience {
        Some(ref audience) => {
            let permission = config.permission(audience).ok_or_else(|| {
                format_err!(
                    "audience = '{}' is not configured for domain = '{}'",
                    audience,
                    config.domain()
                )
            })?;

            debug!("audience = '{}', permission = '{}'", audience, permission);
            writeln!(out, "{}", permission)?;
        }
        None => {
            let summary = json!({
                "domain": config.domain(),
                "issuer": config.domain().issuer(),
                "jwks_uri": config.domain().jwks_uri(),
                "audiences": config.audiences(),
            });

            let text = serde_json::to_string_pretty(&summary)
                .context("Failed to serialize the audience table")?;
            writeln!(out, "{}", text)?;
        }
    }

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
