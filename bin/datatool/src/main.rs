//! Command line tool for generating and inspecting Peggy bridge data.
//!
//! # Warning
//!
//! This tool is intended for use in testing and development only. It prints
//! the exact digests validators are expected to sign, which is convenient for
//! wiring up test signers but should not replace an audited signing flow.

mod args;
mod cmd;
mod util;

use std::process;

use args::resolve_subcommand;
use util::exec_subc;

fn main() {
    let args: args::Args = argh::from_env();
    let inner = || -> anyhow::Result<()> {
        let subc = resolve_subcommand(args)?;
        exec_subc(subc)?;
        Ok(())
    };
    if let Err(e) = inner() {
        eprintln!("ERROR\n{e:?}");
        process::exit(1);
    }
}
