//! CLI argument parsing.
//!
//! The platform starts the connector without arguments; everything it needs is
//! found under the data directory.
use crate::datadir::DEFAULT_DATA_DIR;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "finstat-connector",
    version,
    about = "Enrich ICO numbers with business-registry data",
    after_help = "Layout:\n  <data-dir>/config.json      connector parameters\n  <data-dir>/in/tables/*.csv  input table with the ICO column\n  <data-dir>/out/tables/      enriched and bad-ICO tables with manifests\n\nExit status: 0 success, 1 user error, 2 system error"
)]
pub struct RootArgs {
    /// Platform data directory holding config.json and the table folders
    #[arg(long, value_name = "DIR", env = "KBC_DATADIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,
}
