//! `s2tc-cli encode`: loads a TGA, encodes it to S2TC, writes a DDS.

use crate::error::CliError;
use crate::tga::load_tga;
use argh::FromArgs;
use s2tc_common::ColorDistMetric;
use s2tc_dds::{write_dds_header, DdsFormat};
use s2tc_encoder_api::EncodeConfigBuilder;
use s2tc_encoder::{CandidateMode, DxtMode, RefineMode};
use std::fs;
use std::path::PathBuf;

#[derive(FromArgs, Debug)]
/// Encode a truecolor TGA image into an S2TC-conformant DDS file.
#[argh(subcommand, name = "encode")]
pub struct EncodeCmd {
    /// input TGA file
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// output DDS file
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// block layout: DXT1, DXT3, or DXT5 [default: DXT1]
    #[argh(option, short = 't', from_str_fn(parse_dxt_mode), default = "DxtMode::Dxt1")]
    dxt_mode: DxtMode,

    /// number of synthetic random candidates per tile (omit for no random candidates)
    #[argh(option, short = 'r')]
    random_candidates: Option<u32>,

    /// color distance metric: RGB, YUV, SRGB, SRGB_MIXED, AVG, WAVG, or NORMALMAP [default: WAVG]
    #[argh(option, short = 'c', from_str_fn(parse_metric), default = "ColorDistMetric::Wavg")]
    metric: ColorDistMetric,

    /// refinement strategy: never, always, check, or loop [default: loop]
    #[argh(option, from_str_fn(parse_refine_mode), default = "RefineMode::Loop")]
    refine: RefineMode,

    /// PRNG seed for random-candidate generation [default: 0]
    #[argh(option, default = "0")]
    seed: u64,
}

fn parse_dxt_mode(value: &str) -> Result<DxtMode, String> {
    match value.to_ascii_uppercase().as_str() {
        "DXT1" => Ok(DxtMode::Dxt1),
        "DXT3" => Ok(DxtMode::Dxt3),
        "DXT5" => Ok(DxtMode::Dxt5),
        other => Err(format!("unknown block layout '{other}', expected DXT1, DXT3, or DXT5")),
    }
}

fn parse_metric(value: &str) -> Result<ColorDistMetric, String> {
    match value.to_ascii_uppercase().as_str() {
        "RGB" => Ok(ColorDistMetric::Rgb),
        "YUV" => Ok(ColorDistMetric::Yuv),
        "SRGB" => Ok(ColorDistMetric::Srgb),
        "SRGB_MIXED" => Ok(ColorDistMetric::SrgbMixed),
        "AVG" => Ok(ColorDistMetric::Avg),
        "WAVG" => Ok(ColorDistMetric::Wavg),
        "NORMALMAP" => Ok(ColorDistMetric::Normalmap),
        other => Err(format!("unknown metric '{other}'")),
    }
}

fn parse_refine_mode(value: &str) -> Result<RefineMode, String> {
    match value.to_ascii_lowercase().as_str() {
        "never" => Ok(RefineMode::Never),
        "always" => Ok(RefineMode::Always),
        "check" => Ok(RefineMode::Check),
        "loop" => Ok(RefineMode::Loop),
        other => Err(format!("unknown refine mode '{other}', expected never, always, check, or loop")),
    }
}

fn dds_format_for(dxt_mode: DxtMode) -> DdsFormat {
    match dxt_mode {
        DxtMode::Dxt1 => DdsFormat::Dxt1,
        DxtMode::Dxt3 => DdsFormat::Dxt3,
        DxtMode::Dxt5 => DdsFormat::Dxt5,
    }
}

pub fn handle_encode(cmd: EncodeCmd) -> Result<(), CliError> {
    let tga_bytes = fs::read(&cmd.input)?;
    let (width, height, rgba) = load_tga(&tga_bytes)?;

    let candidates = match cmd.random_candidates {
        Some(count) => CandidateMode::Random { count, seed: cmd.seed },
        None => CandidateMode::Normal,
    };

    let config = EncodeConfigBuilder::new()
        .dxt_mode(cmd.dxt_mode)
        .metric(cmd.metric)
        .candidates(candidates)
        .refine(cmd.refine)
        .build();

    let blocks = s2tc_encoder_api::encode_image_allocating(
        width as usize,
        height as usize,
        &rgba,
        &config,
    )?;

    let dds_format = dds_format_for(cmd.dxt_mode);
    let mut out = vec![0u8; 128 + blocks.len()];
    let has_alpha = cmd.dxt_mode != DxtMode::Dxt1 || rgba.chunks_exact(4).any(|p| p[3] < 255);
    write_dds_header(&mut out, width, height, dds_format, has_alpha)?;
    out[128..].copy_from_slice(&blocks);

    fs::write(&cmd.output, &out)?;
    Ok(())
}
