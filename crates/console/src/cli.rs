use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "health-console", version, about = "Health risk predictor web console")]
pub(crate) struct Args {
    /// Config file. Without it, config/console.toml is used when present.
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Overrides `listen_addr` from the config file.
    #[arg(long)]
    pub(crate) listen_addr: Option<String>,
    /// Also write JSON logs to a daily rolling file in this directory.
    #[arg(long)]
    pub(crate) log_dir: Option<PathBuf>,
    #[arg(long, default_value_t = false)]
    pub(crate) log_to_stderr: bool,
}
