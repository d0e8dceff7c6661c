use anyhow::Result;
use cardwire_rfc::rfc::vcard::{NormalizeOptions, normalize};

use crate::cmd::UpgradeArgs;
use crate::io::{read_input, write_output};

pub fn run(args: &UpgradeArgs) -> Result<()> {
    tracing::debug!(input = %args.io.input.display(), "Upgrading");

    let input = read_input(&args.io.input)?;
    let output = normalize(&input, NormalizeOptions { upgrade: true })?;
    write_output(args.io.output.as_deref(), &output)
}
