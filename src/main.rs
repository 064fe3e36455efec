use clap::Parser;
use std::process::ExitCode;

mod cli;
mod client;
mod component;
mod config;
mod datadir;
mod enrich;
mod error;
mod loader;
mod logging;
mod output;
mod schema;
#[cfg(test)]
mod testing;

use client::FinstatClient;
use config::LogSettings;
use datadir::DataDir;

fn main() -> ExitCode {
    let args = cli::RootArgs::parse();
    let _guard =
        tracing::subscriber::set_default(logging::stderr_subscriber(LogSettings::default()));

    let data_dir = DataDir::new(args.data_dir);
    let outcome = component::run(&data_dir, logging::stderr_subscriber, |config| {
        Box::new(FinstatClient::new(config))
    });
    match outcome {
        Ok(summary) => {
            tracing::info!(
                identifiers = summary.identifiers,
                enriched_rows = summary.enriched.rows,
                bad_ico_rows = summary.failed.rows,
                enriched = %summary.enriched.data_path.display(),
                bad_icos = %summary.failed.data_path.display(),
                enriched_manifest = %summary.enriched.manifest_path.display(),
                bad_icos_manifest = %summary.failed.manifest_path.display(),
                "run finished"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            let code = error::exit_code(&err);
            if code == error::EXIT_USER_ERROR {
                tracing::error!("{err:#}");
            } else {
                tracing::error!("{err:?}");
            }
            ExitCode::from(code)
        }
    }
}
