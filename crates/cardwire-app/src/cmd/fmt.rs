use anyhow::Result;
use cardwire_core::config::Settings;
use cardwire_rfc::rfc::vcard::{NormalizeOptions, normalize};

use crate::cmd::FmtArgs;
use crate::io::{read_input, write_output};

pub fn run(args: &FmtArgs, settings: &Settings) -> Result<()> {
    let options = NormalizeOptions {
        upgrade: args.upgrade || settings.codec.upgrade,
    };
    tracing::debug!(input = %args.io.input.display(), upgrade = options.upgrade, "Formatting");

    let input = read_input(&args.io.input)?;
    let output = normalize(&input, options)?;
    write_output(args.io.output.as_deref(), &output)
}
