//! Failure classification for process exit.
//!
//! Only failures the user can fix by changing configuration or input are typed;
//! everything else travels as a plain `anyhow::Error` and counts as a system error.
use std::path::PathBuf;
use thiserror::Error;

pub const EXIT_USER_ERROR: u8 = 1;
pub const EXIT_SYSTEM_ERROR: u8 = 2;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("{0}")]
    Configuration(String),
    #[error("No input tables provided")]
    MissingInputTable,
    #[error("column {column:?} not found in input table {}", .path.display())]
    MissingColumn { column: String, path: PathBuf },
}

/// Map a run failure to the exit status reported to the platform.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    let is_user_error = err
        .chain()
        .any(|cause| cause.downcast_ref::<UserError>().is_some());
    if is_user_error {
        EXIT_USER_ERROR
    } else {
        EXIT_SYSTEM_ERROR
    }
}
