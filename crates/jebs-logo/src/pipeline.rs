//! The two tracing pipelines.
//!
//! Both follow the same shape: build a white-on-black mask of the part of
//! the bitmap we want, take its outer edge, threshold to a 1-bit PBM, let
//! potrace vectorize it, and recolor the result white.

use crate::cmd::{Cmd, Tools};
use crate::svg;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Letter color of the sign
pub const RED: &str = "#c41e3a";
/// Sign background
pub const CREAM: &str = "#f5f0e8";
/// Background of the text-only artwork
pub const BLACK: &str = "#000000";

/// Potrace options for the full logo: drop speckles, smoother corners
const LOGO_POTRACE_OPTS: [&str; 4] = ["-t", "100", "-a", "2"];
const TEXT_POTRACE_OPTS: [&str; 4] = ["-t", "20", "-a", "1.5"];

/// Convert an outline image into a 1-bit bitmap potrace accepts
const FLATTEN_TO_BITMAP: [&str; 12] = [
    "-background", "white", "-alpha", "shape", "-background", "black", "-flatten", "-negate",
    "-colorspace", "gray", "-threshold", "50%",
];

/// Files written by `trace_text`
#[derive(Debug)]
pub struct TextOutputs {
    pub transparent_png: PathBuf,
    pub outline_svg: PathBuf,
}

/// Red text on transparent background, plus its white outline as SVG.
pub fn trace_text(tools: &Tools, source: &Path, assets_dir: &Path) -> Result<TextOutputs> {
    let scratch = tempfile::tempdir().context("Failed to create scratch directory")?;
    let mask = scratch.path().join("text_mask.png");
    let outline = scratch.path().join("text_outline.png");
    let pbm = scratch.path().join("text.pbm");

    let outputs = TextOutputs {
        transparent_png: assets_dir.join("logo-text-transparent.png"),
        outline_svg: assets_dir.join("logo-text-outline-white.svg"),
    };

    info!("1. Making background transparent...");
    Cmd::new(&tools.magick)
        .arg(source)
        .args(["-fuzz", "30%", "-transparent", BLACK])
        .arg(&outputs.transparent_png)
        .run()?;

    info!("2. Extracting text mask...");
    Cmd::new(&tools.magick)
        .arg(source)
        .args(["-fuzz", "30%", "-transparent", BLACK])
        .args(["-alpha", "extract", "-negate", "-threshold", "20%"])
        .arg(&mask)
        .run()?;

    info!("3. Extracting outline...");
    Cmd::new(&tools.magick)
        .arg(&mask)
        .args(["-morphology", "EdgeOut", "Diamond"])
        .arg(&outline)
        .run()?;

    info!("4. Potracing white outline...");
    Cmd::new(&tools.magick)
        .arg(&outline)
        .args(FLATTEN_TO_BITMAP)
        .arg(&pbm)
        .run()?;
    potrace(&tools.potrace, &pbm, &TEXT_POTRACE_OPTS, &outputs.outline_svg).run()?;

    let traced = read(&outputs.outline_svg)?;
    write(&outputs.outline_svg, &svg::recolor_fills(&traced, "#fff"))?;

    Ok(outputs)
}

/// White outline of the awning and the lettering, merged into one SVG.
pub fn trace_logo(tools: &Tools, source: &Path, assets_dir: &Path) -> Result<PathBuf> {
    let scratch = tempfile::tempdir().context("Failed to create scratch directory")?;
    let dir = scratch.path();
    let output = assets_dir.join("logo-outline-white.svg");

    info!("1. Extracting text mask (red)...");
    let text_mask = dir.join("text_mask.png");
    red_text_mask(&tools.magick, source, &text_mask).run()?;

    info!("2. Extracting awning mask (green roof)...");
    let awning_mask = dir.join("awning_mask.png");
    awning_mask_cmd(&tools.magick, source, &awning_mask).run()?;

    info!("3. Text outline...");
    let text_svg = trace_mask_outline(tools, &text_mask, dir, "text")?;

    info!("4. Awning outline...");
    let awning_svg = trace_mask_outline(tools, &awning_mask, dir, "awning")?;

    info!("5. Merging outlines...");
    let view_box = match svg::extract_view_box(&text_svg) {
        Some(vb) => vb.to_string(),
        None => {
            let dims = Cmd::new(&tools.magick)
                .arg(source)
                .args(["-format", "%w %h", "info:"])
                .run_stdout()?;
            let (w, h) = svg::parse_dimensions(&dims)
                .with_context(|| format!("Unexpected image dimensions {dims:?}"))?;
            format!("0 0 {w} {h}")
        }
    };

    write(&output, &svg::merge_outlines(&view_box, &[&awning_svg, &text_svg]))?;
    Ok(output)
}

/// Edge of `mask`, traced to SVG text
fn trace_mask_outline(tools: &Tools, mask: &Path, dir: &Path, name: &str) -> Result<String> {
    let pbm = dir.join(format!("{name}.pbm"));
    let out = dir.join(format!("{name}.svg"));

    edge_bitmap(&tools.magick, mask, &pbm).run()?;
    potrace(&tools.potrace, &pbm, &LOGO_POTRACE_OPTS, &out).run()?;

    read(&out)
}

fn red_text_mask(magick: &Path, source: &Path, out: &Path) -> Cmd {
    Cmd::new(magick)
        .arg(source)
        .args(["-fuzz", "25%", "-transparent", RED])
        .args(["-alpha", "extract", "-negate", "-threshold", "25%"])
        .args(["-morphology", "Dilate", "Diamond:1"])
        .arg(out)
}

/// Top 40% of the sign with the cream board and red letters knocked out,
/// widened so the roof reads as one solid shape
fn awning_mask_cmd(magick: &Path, source: &Path, out: &Path) -> Cmd {
    Cmd::new(magick)
        .arg(source)
        .args(["-crop", "100%x40%+0+0", "+repage"])
        .args(["-fuzz", "25%", "-transparent", CREAM, "-transparent", RED])
        .args(["-alpha", "extract", "-threshold", "15%"])
        .args(["-morphology", "Dilate", "Rectangle:20x5"])
        .arg(out)
}

fn edge_bitmap(magick: &Path, mask: &Path, out: &Path) -> Cmd {
    Cmd::new(magick)
        .arg(mask)
        .args(["-morphology", "EdgeOut", "Diamond"])
        .args(FLATTEN_TO_BITMAP)
        .arg(out)
}

fn potrace(potrace: &Path, pbm: &Path, opts: &[&str], out: &Path) -> Cmd {
    Cmd::new(potrace)
        .arg(pbm)
        .arg("-s")
        .args(opts)
        .arg("-o")
        .arg(out)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
