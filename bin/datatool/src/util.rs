//! Utility functions for the `peggy-datatool` binary.

use std::{fs, path::Path};

use peggy_common::logging::Rotation;
use peggy_params::ValidatorParams;

use crate::{args::Subcommand, cmd};

/// Executes a `datatool` subcommand.
pub(super) fn exec_subc(command: Subcommand) -> anyhow::Result<()> {
    match command {
        Subcommand::Params(subc) => cmd::params::exec(subc),
        Subcommand::Checkpoint(subc) => cmd::digest::exec_checkpoint(subc),
        Subcommand::GenesisDigest(subc) => cmd::digest::exec_genesis_digest(subc),
        Subcommand::WithdrawDigest(subc) => cmd::digest::exec_withdraw_digest(subc),
    }
}

/// Parses validator entries, one `<address>:<power>` per line.
///
/// Blank lines and lines starting with `#` are skipped.
pub(crate) fn parse_validator_lines(text: &str) -> anyhow::Result<Vec<ValidatorParams>> {
    let mut validators = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        validators.push(line.parse()?);
    }
    Ok(validators)
}

/// Reads validator entries from a file.
pub(crate) fn read_validators_file(path: &Path) -> anyhow::Result<Vec<ValidatorParams>> {
    let text = fs::read_to_string(path)?;
    parse_validator_lines(&text)
}

/// Parses a log file rotation period for `--log-rotation`.
pub(crate) fn parse_rotation(value: &str) -> Result<Rotation, String> {
    match value {
        "minutely" => Ok(Rotation::MINUTELY),
        "hourly" => Ok(Rotation::HOURLY),
        "daily" => Ok(Rotation::DAILY),
        "never" => Ok(Rotation::NEVER),
        other => Err(format!(
            "unknown rotation '{other}', expected minutely, hourly, daily or never"
        )),
    }
}

/// Writes `buf` to `output`, or prints it to stdout.
pub(crate) fn write_output(buf: &str, output: Option<&Path>) -> anyhow::Result<()> {
    if let Some(out_path) = output {
        fs::write(out_path, buf)?;
        eprintln!("wrote to file {out_path:?}");
    } else {
        println!("{buf}");
    }
    Ok(())
}
