pub use crate::authz::{AudiencePermissions, Domain, Entry, Permission};
pub use crate::conf::Config;

/// Runs the command-line tool, writing its report to stdout.
pub fn run<I>(args: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = String>,
{
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    app::run(args, &mut out)
}

mod app;
pub mod authz;
pub mod conf;
