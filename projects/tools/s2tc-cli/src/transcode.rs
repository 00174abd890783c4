//! `s2tc-cli transcode`: rewrites an existing S3TC DDS file into S2TC-conformant form.

use crate::error::CliError;
use argh::FromArgs;
use std::fs;
use std::path::PathBuf;

#[derive(FromArgs, Debug)]
/// Rewrite an existing S3TC (DXT1/DXT3/DXT5) DDS file into S2TC-conformant blocks.
#[argh(subcommand, name = "transcode")]
pub struct TranscodeCmd {
    /// input DDS file
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// output DDS file
    #[argh(option, short = 'o')]
    output: PathBuf,
}

pub fn handle_transcode(cmd: TranscodeCmd) -> Result<(), CliError> {
    let mut data = fs::read(&cmd.input)?;
    s2tc_transcode::transcode_dds(&mut data)?;
    fs::write(&cmd.output, &data)?;
    Ok(())
}
