use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use thermomask::maximize::maximize_image;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Maximizes an 8-bit RGBA image file",
    long_about = "Maximizes an 8-bit RGBA image file.\nValues below 127 become 0, otherwise 255,\nirrespective of color channel.",
    arg_required_else_help = true
)]
struct Args {
    /// Image file to read
    input: PathBuf,
    /// Where to write the maximized image
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut img = image::open(&args.input)
        .with_context(|| format!("Failed to load image: {}", args.input.display()))?
        .to_rgba8();

    maximize_image(&mut img);

    img.save(&args.output)
        .with_context(|| format!("Failed to save output image: {}", args.output.display()))?;

    println!("Wrote: {}", args.output.display());
    Ok(())
}
