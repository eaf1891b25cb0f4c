use crate::error::{Error, Result};

pub const DEFAULT_RESIZE_WIDTH: u32 = 300;
pub const DEFAULT_COLOR_DISTANCE_THRESHOLD: f64 = 22.0;

const CROP_HEIGHT_RATIO: f64 = 0.05;
const BORDER_CROP_HEIGHT_RATIO: f64 = 0.015;

/// Tunables for [`crate::find_dominant_colors`].
///
/// The crop heights follow the resize width unless they're set explicitly: by default the full band is 5% of the
/// resize width and the border band 1.5%, both rounded down and never less than one pixel. Explicitly set heights
/// always win, regardless of the order the setters are called in.
///
/// The one-pixel minimum differs from plain ImageMagick usage below a resize width of 67: a derived height of 0 would
/// make `convert -crop Wx0` sample the whole image height, here it samples a single row instead.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Options {
    resize_width: u32,
    crop_height: Option<u32>,
    border_crop_height: Option<u32>,
    color_distance_threshold: f64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            resize_width: DEFAULT_RESIZE_WIDTH,
            crop_height: None,
            border_crop_height: None,
            color_distance_threshold: DEFAULT_COLOR_DISTANCE_THRESHOLD,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resize_width(self, resize_width: u32) -> Self {
        Self { resize_width, ..self }
    }

    pub fn crop_height(self, crop_height: u32) -> Self {
        Self {
            crop_height: Some(crop_height),
            ..self
        }
    }

    pub fn border_crop_height(self, border_crop_height: u32) -> Self {
        Self {
            border_crop_height: Some(border_crop_height),
            ..self
        }
    }

    pub fn color_distance_threshold(self, color_distance_threshold: f64) -> Self {
        Self {
            color_distance_threshold,
            ..self
        }
    }

    /// Go back to deriving the crop heights from the resize width.
    pub fn clear_crop_heights(self) -> Self {
        Self {
            crop_height: None,
            border_crop_height: None,
            ..self
        }
    }

    pub fn get_resize_width(&self) -> u32 {
        self.resize_width
    }

    pub fn get_crop_height(&self) -> u32 {
        self.crop_height
            .unwrap_or_else(|| derive_height(self.resize_width, CROP_HEIGHT_RATIO))
    }

    pub fn get_border_crop_height(&self) -> u32 {
        self.border_crop_height
            .unwrap_or_else(|| derive_height(self.resize_width, BORDER_CROP_HEIGHT_RATIO))
    }

    pub fn get_color_distance_threshold(&self) -> f64 {
        self.color_distance_threshold
    }

    /// Check that the resolved options describe a crop the engine can produce.
    pub fn validate(&self) -> Result<()> {
        if self.resize_width == 0 {
            return Err(Error::invalid_option("resize_width", self.resize_width));
        }

        if self.get_crop_height() == 0 {
            return Err(Error::invalid_option("crop_height", self.get_crop_height()));
        }

        if self.get_border_crop_height() == 0 {
            return Err(Error::invalid_option("border_crop_height", self.get_border_crop_height()));
        }

        if !self.color_distance_threshold.is_finite() || self.color_distance_threshold < 0.0 {
            return Err(Error::invalid_option(
                "color_distance_threshold",
                self.color_distance_threshold,
            ));
        }

        Ok(())
    }
}

fn derive_height(resize_width: u32, ratio: f64) -> u32 {
    ((resize_width as f64 * ratio).floor() as u32).max(1)
}
