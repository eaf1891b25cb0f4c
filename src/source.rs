use crate::{
    error::{Error, HistogramKind, Result},
    options::Options,
};
use std::{
    ffi::OsString,
    path::Path,
    process::Command,
};

/// Number of colors the full band is quantized to.
pub const FULL_COLOR_COUNT: u32 = 256;
/// Number of colors the border band is quantized to.
pub const BORDER_COLOR_COUNT: u32 = 16;
pub const COLOR_DEPTH: u32 = 8;

/// The image edge a band is cropped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
}

impl Edge {
    /// The ImageMagick gravity that anchors a crop to this edge.
    pub fn gravity(self) -> &'static str {
        match self {
            Edge::Top => "north",
            Edge::Bottom => "south",
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Edge::Top => f.write_str("top"),
            Edge::Bottom => f.write_str("bottom"),
        }
    }
}

/// Everything an engine needs to produce one histogram: shrink the image to fit a `resize_width` square, crop a band
/// of `crop_height` pixels at `edge` and quantize it to `colors` colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropSpec {
    pub edge: Edge,
    pub kind: HistogramKind,
    pub resize_width: u32,
    pub crop_height: u32,
    pub colors: u32,
}

impl CropSpec {
    pub fn full(edge: Edge, options: &Options) -> Self {
        Self {
            edge,
            kind: HistogramKind::Full,
            resize_width: options.get_resize_width(),
            crop_height: options.get_crop_height(),
            colors: FULL_COLOR_COUNT,
        }
    }

    pub fn border(edge: Edge, options: &Options) -> Self {
        Self {
            edge,
            kind: HistogramKind::Border,
            resize_width: options.get_resize_width(),
            crop_height: options.get_border_crop_height(),
            colors: BORDER_COLOR_COUNT,
        }
    }
}

/// Something that can turn an image and a crop into a textual color histogram.
///
/// The output is expected in ImageMagick's `histogram:info:` format, one `<count>: (<r>,<g>,<b>[,<a>]) ...` entry per
/// line. Sources are shared between the threads that fetch histograms concurrently, hence `Sync`.
pub trait HistogramSource: Sync {
    fn fetch_histogram(&self, image: &Path, crop: &CropSpec) -> Result<String>;
}

impl<S> HistogramSource for &S
where
    S: HistogramSource + ?Sized,
{
    fn fetch_histogram(&self, image: &Path, crop: &CropSpec) -> Result<String> {
        (**self).fetch_histogram(image, crop)
    }
}

impl<S> HistogramSource for Box<S>
where
    S: HistogramSource + ?Sized,
{
    fn fetch_histogram(&self, image: &Path, crop: &CropSpec) -> Result<String> {
        (**self).fetch_histogram(image, crop)
    }
}

/// Runs ImageMagick's `convert` for every histogram.
#[derive(Debug, Clone)]
pub struct ImageMagick {
    program: OsString,
}

impl Default for ImageMagick {
    fn default() -> Self {
        Self::new("convert")
    }
}

impl ImageMagick {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &std::ffi::OsStr {
        &self.program
    }

    pub fn args(&self, image: &Path, crop: &CropSpec) -> Vec<OsString> {
        let width = crop.resize_width;

        vec![
            image.as_os_str().to_owned(),
            "-auto-orient".into(),
            "-resize".into(),
            format!("{width}x{width}>").into(),
            "-gravity".into(),
            crop.edge.gravity().into(),
            "-crop".into(),
            format!("{width}x{}+0+0", crop.crop_height).into(),
            "-colors".into(),
            crop.colors.to_string().into(),
            "-depth".into(),
            COLOR_DEPTH.to_string().into(),
            "-format".into(),
            "%c".into(),
            "histogram:info:".into(),
        ]
    }
}

impl HistogramSource for ImageMagick {
    fn fetch_histogram(&self, image: &Path, crop: &CropSpec) -> Result<String> {
        let args = self.args(image, crop);
        log::debug!("running {:?} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|err| Error::engine_with_source(format!("could not run {:?}", self.program), err))?;

        if !output.status.success() {
            return Err(Error::engine(format!(
                "{:?} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|err| Error::engine_with_source("histogram output is not valid UTF-8", err))
    }
}
