//! Command line arguments for the `peggy-datatool` binary.

use std::path::PathBuf;

use argh::FromArgs;
use peggy_common::logging::{init_logging_from_config, LoggingInitConfig, Rotation};
use peggy_params::ValidatorParams;
use peggy_primitives::{Address, B256, U256};

use crate::util::parse_rotation;

/// Args.
#[derive(FromArgs)]
pub(crate) struct Args {
    #[argh(switch, description = "emit logs as JSON")]
    pub(crate) log_json: bool,

    #[argh(option, description = "also write logs to rolling files in this directory")]
    pub(crate) log_dir: Option<PathBuf>,

    #[argh(
        option,
        from_str_fn(parse_rotation),
        description = "log file rotation: minutely, hourly, daily or never (default daily)"
    )]
    pub(crate) log_rotation: Option<Rotation>,

    #[argh(subcommand)]
    pub(crate) subc: Subcommand,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub(crate) enum Subcommand {
    Params(SubcParams),
    Checkpoint(SubcCheckpoint),
    GenesisDigest(SubcGenesisDigest),
    WithdrawDigest(SubcWithdrawDigest),
}

/// Generate a bridge params file from inputs.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "genparams",
    description = "generates bridge params from inputs"
)]
pub(crate) struct SubcParams {
    #[argh(
        option,
        description = "output file path .json (default stdout)",
        short = 'o'
    )]
    pub(crate) output: Option<PathBuf>,

    #[argh(
        option,
        description = "deployment name, hashed into the bridge id (default \"peggy\")",
        short = 'n'
    )]
    pub(crate) name: Option<String>,

    #[argh(option, description = "power threshold", short = 't')]
    pub(crate) threshold: U256,

    #[argh(
        option,
        description = "add a validator as <address>:<power>, in checkpoint order",
        short = 'v'
    )]
    pub(crate) validator: Vec<ValidatorParams>,

    #[argh(
        option,
        description = "read validators as <address>:<power> by line from file, before any -v",
        short = 'V'
    )]
    pub(crate) validators: Option<PathBuf>,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "checkpoint",
    description = "prints the checkpoint of a params file's validator set"
)]
pub(crate) struct SubcCheckpoint {
    #[argh(positional, description = "params file path")]
    pub(crate) params: PathBuf,

    #[argh(option, description = "valset nonce (default 0)", short = 'n')]
    pub(crate) nonce: Option<u64>,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "genesis-digest",
    description = "prints the digest genesis validators sign at deployment"
)]
pub(crate) struct SubcGenesisDigest {
    #[argh(positional, description = "params file path")]
    pub(crate) params: PathBuf,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "withdraw-digest",
    description = "prints the digest validators sign to authorize a withdrawal"
)]
pub(crate) struct SubcWithdrawDigest {
    #[argh(positional, description = "params file path")]
    pub(crate) params: PathBuf,

    #[argh(option, description = "withdrawal id as 32-byte hex")]
    pub(crate) id: Option<B256>,

    #[argh(option, description = "withdrawal id derived by hashing a label")]
    pub(crate) id_label: Option<String>,

    #[argh(option, description = "amount", short = 'a')]
    pub(crate) amount: U256,

    #[argh(option, description = "destination address", short = 'd')]
    pub(crate) destination: Address,
}

/// Sets up logging and returns the subcommand to run.
pub(crate) fn resolve_subcommand(args: Args) -> anyhow::Result<Subcommand> {
    init_logging_from_config(LoggingInitConfig {
        service_base_name: "peggy-datatool",
        service_label: None,
        log_dir: args.log_dir.as_ref(),
        log_file_prefix: None,
        log_rotation: args.log_rotation,
        json_format: Some(args.log_json),
        use_stderr: true,
        default_log_prefix: "datatool",
    })?;

    Ok(args.subc)
}
