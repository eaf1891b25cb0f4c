// Copyright 2022 Spanfile
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A library to find the dominant colors of an image's top and bottom edges.
//!
//! For each edge two bands are sampled: a thicker one quantized to 256 colors and a thin border one quantized to 16
//! colors. Both histograms have their perceptually close colors merged together. If the border's most common color
//! covers more than 60% of the border, it wins. Otherwise the thicker band's most common color is used.
//!
//! The image work itself (decoding, resizing, cropping and quantizing) is done by a [`HistogramSource`]. By default
//! that is ImageMagick's `convert`, but [`NativeSource`] does the same in-process.
//!
//! ```no_run
//! let colors = edgetone::find_dominant_colors("photo.jpg", &edgetone::Options::default())?;
//! println!("top {}, bottom {}", colors.top, colors.bottom);
//! # Ok::<(), edgetone::Error>(())
//! ```

mod color;
mod color_cut_quantizer;
mod error;
mod histogram;
mod native;
mod options;
mod source;
mod swatch;

pub use crate::{
    color::{Rgb, Yuv},
    error::{Error, HistogramKind, Result},
    histogram::{Histogram, DOMINANCE_RATIO},
    native::NativeSource,
    options::{Options, DEFAULT_COLOR_DISTANCE_THRESHOLD, DEFAULT_RESIZE_WIDTH},
    source::{CropSpec, Edge, HistogramSource, ImageMagick, BORDER_COLOR_COUNT, COLOR_DEPTH, FULL_COLOR_COUNT},
    swatch::Swatch,
};
pub use image;

use std::path::Path;

/// The dominant color of each horizontal edge of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DominantColors {
    pub top: Rgb,
    pub bottom: Rgb,
}

/// Find the dominant top and bottom colors of an image using ImageMagick.
pub fn find_dominant_colors<P>(image: P, options: &Options) -> Result<DominantColors>
where
    P: AsRef<Path>,
{
    find_dominant_colors_with(&ImageMagick::default(), image, options)
}

/// Find the dominant top and bottom colors of an image using the given histogram source.
///
/// Both edges are processed in parallel, and each edge fetches its two histograms in parallel. If any of the four
/// fails, the whole call fails with the first error; the other results are discarded.
pub fn find_dominant_colors_with<S, P>(source: &S, image: P, options: &Options) -> Result<DominantColors>
where
    S: HistogramSource + ?Sized,
    P: AsRef<Path>,
{
    options.validate()?;

    let image = image.as_ref();
    let (top, bottom) = rayon::join(
        || find_dominant_color(source, image, Edge::Top, options),
        || find_dominant_color(source, image, Edge::Bottom, options),
    );

    Ok(DominantColors {
        top: top?,
        bottom: bottom?,
    })
}

/// Find the dominant color of a single edge.
pub fn find_dominant_color<S>(source: &S, image: &Path, edge: Edge, options: &Options) -> Result<Rgb>
where
    S: HistogramSource + ?Sized,
{
    let (full, border) = rayon::join(
        || get_histogram(source, image, &CropSpec::full(edge, options), options),
        || get_histogram(source, image, &CropSpec::border(edge, options), options),
    );

    select_dominant_color(edge, &full?, &border?)
}

/// Pick the edge color from an edge's optimized full and border histograms.
///
/// The border's most common color is used if it covers strictly more than [`DOMINANCE_RATIO`] of the border, the
/// full band's most common color otherwise.
pub fn select_dominant_color(edge: Edge, full: &Histogram, border: &Histogram) -> Result<Rgb> {
    let full_color = full.most_prominent_color().ok_or(Error::EmptyHistogram {
        edge,
        kind: HistogramKind::Full,
    })?;
    let border_color = border.most_prominent_color().ok_or(Error::EmptyHistogram {
        edge,
        kind: HistogramKind::Border,
    })?;

    if border.has_dominant_color() {
        log::debug!(
            "{} edge: border color {} covers {:.3} of the border",
            edge,
            border_color,
            border.dominance_ratio().unwrap_or_default()
        );

        Ok(border_color)
    } else {
        log::debug!(
            "{} edge: no dominant border color ({:.3}), using {}",
            edge,
            border.dominance_ratio().unwrap_or_default(),
            full_color
        );

        Ok(full_color)
    }
}

fn get_histogram<S>(source: &S, image: &Path, crop: &CropSpec, options: &Options) -> Result<Histogram>
where
    S: HistogramSource + ?Sized,
{
    let raw = source.fetch_histogram(image, crop)?;
    let histogram = Histogram::parse(&raw).optimize(options.get_color_distance_threshold());

    log::debug!(
        "{} {} histogram of {}: {} colors after merging",
        crop.edge,
        crop.kind,
        image.display(),
        histogram.len()
    );

    Ok(histogram)
}
