//! Command-line front end: `encode` (TGA -> S2TC DDS) and `transcode` (S3TC DDS -> S2TC DDS).

mod encode;
mod error;
mod tga;
mod transcode;

use argh::FromArgs;
use error::CliError;
use std::process::ExitCode;

#[derive(FromArgs, Debug)]
/// S2TC: a patent-avoiding approximation of the S3TC/DXT block-compressed texture formats.
struct TopLevel {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Command {
    Encode(encode::EncodeCmd),
    Transcode(transcode::TranscodeCmd),
}

fn run() -> Result<(), CliError> {
    let cli: TopLevel = argh::from_env();
    match cli.command {
        Command::Encode(cmd) => encode::handle_encode(cmd),
        Command::Transcode(cmd) => transcode::handle_transcode(cmd),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("s2tc-cli: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
