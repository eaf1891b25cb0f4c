use anyhow::{Context, Result};
use clap::Parser;
use edgetone::{DominantColors, HistogramSource, ImageMagick, NativeSource, Options};
use std::path::PathBuf;

/// Print the dominant top and bottom edge colors of images as JSON lines.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Images are shrunk to fit a square of this size before sampling
    #[arg(short = 'w', long, default_value_t = edgetone::DEFAULT_RESIZE_WIDTH)]
    resize_width: u32,

    /// Height of the full edge band, defaults to 5% of the resize width
    #[arg(long)]
    crop_height: Option<u32>,

    /// Height of the thin border band, defaults to 1.5% of the resize width
    #[arg(long)]
    border_crop_height: Option<u32>,

    /// Colors closer than this are merged together
    #[arg(short = 't', long, default_value_t = edgetone::DEFAULT_COLOR_DISTANCE_THRESHOLD)]
    threshold: f64,

    /// Process images in-process instead of running ImageMagick
    #[arg(long, conflicts_with = "magick")]
    native: bool,

    /// ImageMagick executable to run
    #[arg(long, default_value = "convert")]
    magick: String,
}

#[derive(serde::Serialize)]
struct Output<'a> {
    path: &'a std::path::Path,
    #[serde(flatten)]
    colors: DominantColors,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut options = Options::default()
        .resize_width(args.resize_width)
        .color_distance_threshold(args.threshold);

    if let Some(crop_height) = args.crop_height {
        options = options.crop_height(crop_height);
    }

    if let Some(border_crop_height) = args.border_crop_height {
        options = options.border_crop_height(border_crop_height);
    }

    let source: Box<dyn HistogramSource> = if args.native {
        Box::new(NativeSource::new())
    } else {
        Box::new(ImageMagick::new(&args.magick))
    };

    for input in &args.inputs {
        let colors = edgetone::find_dominant_colors_with(&source, input, &options)
            .with_context(|| format!("finding dominant colors of {}", input.display()))?;

        println!("{}", serde_json::to_string(&Output { path: input, colors })?);
    }

    Ok(())
}
