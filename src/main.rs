//! radshield CLI - shielding sizing and trajectory export.

use std::process::ExitCode;

use radshield::cli::{run_cli, Args};

fn main() -> ExitCode {
    run_cli(Args::parse())
}
