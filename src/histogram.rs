use crate::{color::Rgb, swatch::Swatch};

/// The border histogram's top color wins if its share of the pixels is strictly above this ratio.
pub const DOMINANCE_RATIO: f64 = 0.6;

/// An ordered list of histogram entries.
///
/// A freshly parsed histogram keeps the order of the engine output. After [`Histogram::optimize`] the entries are
/// sorted by population, largest first, and none of them are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Histogram {
    swatches: Vec<Swatch>,
}

impl Histogram {
    pub fn new(swatches: Vec<Swatch>) -> Self {
        Self { swatches }
    }

    /// Parse the textual histogram an image engine prints, one `<count>: (<r>,<g>,<b>[,<a>]) ...` entry per line.
    ///
    /// Lines that don't match the format are skipped. Input with no usable lines gives an empty histogram.
    pub fn parse(raw: &str) -> Self {
        let swatches = raw
            .lines()
            .filter_map(|line| {
                let swatch = parse_line(line);

                if swatch.is_none() && !line.trim().is_empty() {
                    log::trace!("skipping histogram line {:?}", line);
                }

                swatch
            })
            .collect();

        Self { swatches }
    }

    /// Merge perceptually close colors into each other and sort the result by population, largest first.
    ///
    /// This is a single greedy pass: each surviving entry absorbs every later entry within `color_distance_threshold`
    /// of its own color, regardless of whether that later entry was already absorbed. Entries are only ever compared
    /// against their original colors, so the surviving colors may still be closer than the threshold to each other.
    /// Ties in population keep their original order. The total population is unchanged unless it exceeds `u64::MAX`, in
    /// which case merged populations saturate.
    pub fn optimize(&self, color_distance_threshold: f64) -> Histogram {
        let mut populations = self.swatches.iter().map(|swatch| swatch.population()).collect::<Vec<_>>();

        for (i, source) in self.swatches.iter().enumerate() {
            if populations[i] == 0 {
                continue;
            }

            for (j, target) in self.swatches.iter().enumerate().skip(i + 1) {
                if source.yuv().distance(target.yuv()) <= color_distance_threshold {
                    let absorbed = populations[j];
                    populations[i] = populations[i].saturating_add(absorbed);
                    populations[j] = 0;
                }
            }
        }

        let mut swatches = self
            .swatches
            .iter()
            .zip(populations)
            .filter(|(_, population)| *population > 0)
            .map(|(swatch, population)| swatch.with_population(population))
            .collect::<Vec<_>>();

        // sort_by is stable, equal populations stay in their original order
        swatches.sort_by(|lhs, rhs| rhs.population().cmp(&lhs.population()));

        Histogram { swatches }
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    pub fn first(&self) -> Option<Swatch> {
        self.swatches.first().copied()
    }

    pub fn total_population(&self) -> u64 {
        self.swatches
            .iter()
            .fold(0u64, |total, swatch| total.saturating_add(swatch.population()))
    }

    /// The first entry's share of the total population, or `None` if the histogram is empty or has no pixels.
    pub fn dominance_ratio(&self) -> Option<f64> {
        let first = self.first()?;
        let total = self.total_population();

        if total == 0 {
            return None;
        }

        Some(first.population() as f64 / total as f64)
    }

    pub fn has_dominant_color(&self) -> bool {
        self.dominance_ratio().is_some_and(|ratio| ratio > DOMINANCE_RATIO)
    }

    pub fn most_prominent_color(&self) -> Option<Rgb> {
        self.first().map(|swatch| swatch.rgb())
    }
}

impl FromIterator<Swatch> for Histogram {
    fn from_iter<I: IntoIterator<Item = Swatch>>(iter: I) -> Self {
        Self {
            swatches: iter.into_iter().collect(),
        }
    }
}

fn parse_line(line: &str) -> Option<Swatch> {
    let (count, rest) = line.trim().split_once(": (")?;

    // trailing fields after the closing parenthesis (hex, color name) are ignored, as is the alpha channel
    let channels = rest.split(')').next()?;
    let mut channels = channels.split(',');

    let red = parse_channel(channels.next()?)?;
    let green = parse_channel(channels.next()?)?;
    let blue = parse_channel(channels.next()?)?;
    let population = parse_leading_integer(count)?;

    Some(Swatch::new((red, green, blue), population))
}

fn parse_channel(value: &str) -> Option<u8> {
    u8::try_from(parse_leading_integer(value)?).ok()
}

/// Parse the run of decimal digits at the start of `value`, after any leading whitespace and an optional `+`.
fn parse_leading_integer(value: &str) -> Option<u64> {
    let value = value.trim_start();
    let value = value.strip_prefix('+').unwrap_or(value);
    let digits = value.find(|c: char| !c.is_ascii_digit()).unwrap_or(value.len());

    value[..digits].parse().ok()
}
