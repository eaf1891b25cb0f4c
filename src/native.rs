use crate::{
    color::Rgb,
    color_cut_quantizer::ColorCutQuantizer,
    error::{Error, Result},
    source::{CropSpec, Edge, HistogramSource},
};
use image::{imageops::FilterType, DynamicImage, ImageDecoder, ImageReader};
use std::{fmt::Write, path::Path};

/// A [`HistogramSource`] that does the resizing, cropping and quantizing in-process with the `image` crate instead of
/// calling out to ImageMagick.
///
/// The output uses the same text format as ImageMagick's `histogram:info:`, so both sources go through the exact same
/// parsing.
#[derive(Debug, Clone, Copy)]
pub struct NativeSource {
    filter: FilterType,
}

impl Default for NativeSource {
    fn default() -> Self {
        Self {
            filter: FilterType::Triangle,
        }
    }
}

impl NativeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// The filter used when shrinking the image.
    pub fn filter(self, filter: FilterType) -> Self {
        Self { filter }
    }

    /// Render the histogram of an already decoded image.
    pub fn histogram(&self, image: &DynamicImage, crop: &CropSpec) -> String {
        let resized;
        let image = if image.width() > crop.resize_width || image.height() > crop.resize_width {
            // fits the image within the square, keeping the aspect ratio
            resized = image.resize(crop.resize_width, crop.resize_width, self.filter);
            &resized
        } else {
            image
        };

        let (width, height) = (image.width(), image.height());
        let band_width = crop.resize_width.min(width);
        let band_height = crop.crop_height.min(height);
        let x = (width - band_width) / 2;
        let y = match crop.edge {
            Edge::Top => 0,
            Edge::Bottom => height - band_height,
        };

        let pixels = image
            .crop_imm(x, y, band_width, band_height)
            .to_rgb8()
            .pixels()
            .map(|pixel| Rgb::new(pixel[0], pixel[1], pixel[2]))
            .collect();
        let swatches = ColorCutQuantizer::new(pixels, crop.colors as usize).get_quantized_colors();

        let mut output = String::new();
        for swatch in swatches {
            let Rgb { r, g, b } = swatch.rgb();

            // writing into a String can't fail
            let _ = writeln!(
                output,
                "{:>10}: ({:>3},{:>3},{:>3}) {} srgb({},{},{})",
                swatch.population(),
                r,
                g,
                b,
                swatch.rgb(),
                r,
                g,
                b
            );
        }

        output
    }
}

impl HistogramSource for NativeSource {
    fn fetch_histogram(&self, image: &Path, crop: &CropSpec) -> Result<String> {
        log::debug!("computing {} {} histogram of {}", crop.edge, crop.kind, image.display());

        let image = open_oriented(image)?;
        Ok(self.histogram(&image, crop))
    }
}

fn open_oriented(path: &Path) -> Result<DynamicImage> {
    let load_error = |err: image::ImageError| Error::engine_with_source(format!("could not load {}", path.display()), err);

    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|err| Error::engine_with_source(format!("could not open {}", path.display()), err))?;

    let mut decoder = reader.into_decoder().map_err(load_error)?;
    let orientation = decoder.orientation().map_err(load_error)?;
    let mut image = DynamicImage::from_decoder(decoder).map_err(load_error)?;
    image.apply_orientation(orientation);

    Ok(image)
}
