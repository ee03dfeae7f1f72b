//! `genparams` subcommand: generates bridge params from inputs.

use peggy_params::BridgeParams;
use tracing::{info, warn};

use crate::{
    args::SubcParams,
    util::{read_validators_file, write_output},
};

/// Deployment name used when none is given.
const DEFAULT_NAME: &str = "peggy";

/// Executes the `genparams` subcommand.
///
/// Builds and validates the params, then writes them to a file or stdout.
pub(crate) fn exec(cmd: SubcParams) -> anyhow::Result<()> {
    let mut validators = match &cmd.validators {
        Some(path) => read_validators_file(path)?,
        None => Vec::new(),
    };
    validators.extend(cmd.validator);

    let name = cmd.name.as_deref().unwrap_or(DEFAULT_NAME);
    let params = BridgeParams::from_name(name, cmd.threshold, validators);
    if let Err(e) = params.validate() {
        anyhow::bail!("invalid params: {e}");
    }
    if params.power_threshold.is_zero() {
        warn!("power threshold is zero, withdrawals will need no signatures");
    }

    info!(
        %name,
        bridge_id = %params.bridge_id,
        validators = params.validators.len(),
        threshold = %params.power_threshold,
        "generated params"
    );

    let params_buf = serde_json::to_string_pretty(&params)?;
    write_output(&params_buf, cmd.output.as_deref())
}
