use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use repofs::config::Config;
use repofs::session::Session;

/// Mount content-addressed repositories as a read-only filesystem.
#[derive(Debug, Parser)]
#[command(name = "repofs", version, about)]
struct Cli {
    /// Configuration directory.
    #[arg(
        short = 'c',
        long = "config",
        env = "REPOFS_CONF_DIR",
        value_name = "DIR"
    )]
    config_dir: Option<PathBuf>,

    /// Data directory holding the repositories (default: <config>/repos).
    #[arg(short = 'd', long = "data-dir", alias = "seafdir", value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Where to mount the filesystem.
    #[arg(value_name = "MOUNTPOINT")]
    mountpoint: PathBuf,

    /// Mount options, passed through to the FUSE layer unchanged.
    #[arg(short = 'o', value_name = "OPTIONS", action = clap::ArgAction::Append)]
    options: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("REPOFS_LOG", "info"))
        .init();

    let cli = Cli::parse();

    let config_dir = cli
        .config_dir
        .or_else(|| dirs::home_dir().map(|home| home.join(".repofs")))
        .context("cannot determine configuration directory; pass -c or set REPOFS_CONF_DIR")?;

    // Any failure from here to the mount call is fatal; once mounted,
    // per-call errors only fail the call that hit them.
    let config = Config::load(config_dir, cli.data_dir).context("failed to load configuration")?;
    let session = Session::start(config).context("failed to start session")?;

    let options: Vec<String> = cli
        .options
        .iter()
        .flat_map(|opt| opt.split(','))
        .map(str::to_string)
        .collect();

    repofs::fuse::mount(session.vfs(), &cli.mountpoint, &options)
        .context("failed to mount filesystem")?;
    Ok(())
}
