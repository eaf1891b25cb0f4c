use crate::color::{Rgb, Yuv};

/// A single histogram entry: a quantized color and the number of pixels that fell into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swatch {
    rgb: Rgb,
    yuv: Yuv,
    population: u64,
}

impl Swatch {
    pub fn new(rgb: impl Into<Rgb>, population: u64) -> Swatch {
        let rgb = rgb.into();

        Self {
            rgb,
            yuv: rgb.yuv(),
            population,
        }
    }

    pub fn rgb(self) -> Rgb {
        self.rgb
    }

    pub fn yuv(self) -> Yuv {
        self.yuv
    }

    pub fn population(self) -> u64 {
        self.population
    }

    pub(crate) fn with_population(self, population: u64) -> Swatch {
        Self { population, ..self }
    }
}
