/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A color in the integer YUV-like space used to compare histogram colors.
///
/// The components are truncated towards zero after conversion, so two colors that differ by less than one unit in a
/// component compare as equal in that component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Yuv {
    pub y: i32,
    pub u: i32,
    pub v: i32,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn components(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    pub fn yuv(self) -> Yuv {
        let (r, g, b) = (self.r as f64, self.g as f64, self.b as f64);

        // `as` truncates towards zero
        Yuv {
            y: (0.299 * r + 0.587 * g + 0.114 * b) as i32,
            u: (-0.169 * r - 0.331 * g + 0.499 * b + 128.0) as i32,
            v: (0.499 * r - 0.418 * g - 0.0813 * b + 128.0) as i32,
        }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for (u8, u8, u8) {
    fn from(rgb: Rgb) -> Self {
        rgb.components()
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Yuv {
    /// Euclidean distance between two colors.
    pub fn distance(self, other: Yuv) -> f64 {
        let dy = (self.y - other.y) as f64;
        let du = (self.u - other.u) as f64;
        let dv = (self.v - other.v) as f64;

        (dy * dy + du * du + dv * dv).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_with_truncation() {
        assert_eq!(Rgb::new(100, 100, 100).yuv(), Yuv { y: 100, u: 127, v: 127 });
        assert_eq!(Rgb::new(0, 0, 0).yuv(), Yuv { y: 0, u: 128, v: 128 });
        assert_eq!(Rgb::new(255, 255, 255).yuv(), Yuv { y: 255, u: 127, v: 127 });
        assert_eq!(Rgb::new(255, 0, 0).yuv(), Yuv { y: 76, u: 84, v: 255 });
        assert_eq!(Rgb::new(0, 255, 0).yuv(), Yuv { y: 149, u: 43, v: 21 });
        assert_eq!(Rgb::new(0, 0, 255).yuv(), Yuv { y: 29, u: 255, v: 107 });
        assert_eq!(Rgb::new(10, 20, 30).yuv(), Yuv { y: 18, u: 134, v: 122 });
        assert_eq!(Rgb::new(200, 100, 50).yuv(), Yuv { y: 124, u: 86, v: 181 });
    }

    #[test]
    fn distance_to_self_is_zero() {
        for rgb in [Rgb::new(0, 0, 0), Rgb::new(12, 200, 77), Rgb::new(255, 255, 255)] {
            assert_eq!(rgb.yuv().distance(rgb.yuv()), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Rgb::new(255, 0, 0).yuv();
        let b = Rgb::new(0, 0, 255).yuv();

        assert_eq!(a.distance(b), b.distance(a));
        assert!((a.distance(b) - 230.984_847_987_914_6).abs() < 1e-9);
    }

    #[test]
    fn displays_as_hex() {
        assert_eq!(Rgb::new(10, 20, 30).to_string(), "#0A141E");
    }
}
