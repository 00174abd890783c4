use crate::tga::TgaError;
use s2tc_dds::DdsWriteError;
use s2tc_encoder_api::S2tcEncodeError;
use s2tc_transcode::TranscodeDdsError;
use std::io;
use thiserror::Error;

/// Top-level CLI error. `exit_code` maps each variant to the process exit status §6 specifies:
/// 1 for a usage error, 2 for an I/O failure.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Tga(#[from] TgaError),
    #[error(transparent)]
    Encode(#[from] S2tcEncodeError),
    #[error(transparent)]
    DdsWrite(#[from] DdsWriteError),
    #[error(transparent)]
    Transcode(#[from] TranscodeDdsError),
}

impl CliError {
    /// Process exit code per §6: 1 for a usage/input-format error, 2 for an I/O failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 2,
            Self::Tga(_) | Self::Encode(_) | Self::DdsWrite(_) | Self::Transcode(_) => 1,
        }
    }
}
