use crate::{color::Rgb, swatch::Swatch};
use std::collections::{BinaryHeap, HashMap};

const QUANTIZE_WORD_WIDTH: u32 = 5;
const QUANTIZE_WORD_MAX: u8 = (1 << QUANTIZE_WORD_WIDTH) - 1;

/// Median cut quantizer. If the pixels have at most `max_colors` distinct colors they're reported exactly. Otherwise
/// the color space is repeatedly split until there are at most `max_colors` boxes, each of which becomes the
/// population-weighted average of the 8-bit colors inside it. Box sizes and split axes are measured on colors reduced
/// to 5 bits per channel.
pub struct ColorCutQuantizer {
    pixels: Vec<Rgb>,
    max_colors: usize,
}

struct Vbox<'a> {
    colors: &'a mut [(Rgb, u64)],
    population: u64,
    red_range: (u8, u8),
    green_range: (u8, u8),
    blue_range: (u8, u8),
}

enum Component {
    Red,
    Green,
    Blue,
}

impl ColorCutQuantizer {
    pub fn new(pixels: Vec<Rgb>, max_colors: usize) -> Self {
        Self { pixels, max_colors }
    }

    /// The quantized colors, largest population first.
    pub fn get_quantized_colors(self) -> Vec<Swatch> {
        // begin by generating a histogram of the exact pixel values
        let mut hist = HashMap::new();
        for pixel in self.pixels.iter() {
            *hist.entry(*pixel).or_insert(0u64) += 1;
        }

        let mut colors = hist.into_iter().collect::<Vec<_>>();

        // HashMap order is random, give the boxes a deterministic starting order by packing the channels into a single
        // integer where red is the most significant and blue the least
        colors.sort_by_key(|(rgb, _)| ((rgb.r as u32) << 16) | ((rgb.g as u32) << 8) | rgb.b as u32);

        let mut swatches = if colors.len() <= self.max_colors {
            // there are less colors than requested, no need to split anything
            colors
                .into_iter()
                .map(|(rgb, count)| Swatch::new(rgb, count))
                .collect()
        } else {
            self.quantize_pixels(colors)
        };

        swatches.sort_by(|lhs, rhs| rhs.population().cmp(&lhs.population()));
        swatches
    }

    fn quantize_pixels(&self, mut colors: Vec<(Rgb, u64)>) -> Vec<Swatch> {
        // the queue always pops the largest Vbox by volume first, the one with more colors on ties
        let mut pq = BinaryHeap::with_capacity(self.max_colors);
        pq.push(Vbox::new(&mut colors));

        // go through the queue until there are enough colors or no more boxes to split
        self.split_boxes(&mut pq);

        pq.iter().map(|vbox| vbox.get_average_color()).collect()
    }

    fn split_boxes(&self, pq: &mut BinaryHeap<Vbox<'_>>) {
        while pq.len() < self.max_colors {
            match pq.pop() {
                Some(vbox) if vbox.can_split() => {
                    let (left, right) = vbox.split_box();

                    pq.push(left);
                    pq.push(right);
                }
                Some(vbox) => {
                    // the largest box is a single color, so every other box is one as well
                    pq.push(vbox);
                    return;
                }
                None => return,
            }
        }
    }
}

impl<'a> Vbox<'a> {
    fn new(colors: &'a mut [(Rgb, u64)]) -> Self {
        // compute the boundaries of the Vbox to tightly fit around the colors within it
        let mut population = 0;
        // min, max
        let (mut min_red, mut max_red) = (QUANTIZE_WORD_MAX, 0);
        let (mut min_green, mut max_green) = (QUANTIZE_WORD_MAX, 0);
        let (mut min_blue, mut max_blue) = (QUANTIZE_WORD_MAX, 0);

        for (rgb, count) in colors.iter() {
            let rgb = quantize(*rgb);
            population += count;

            min_red = min_red.min(rgb.r);
            max_red = max_red.max(rgb.r);
            min_green = min_green.min(rgb.g);
            max_green = max_green.max(rgb.g);
            min_blue = min_blue.min(rgb.b);
            max_blue = max_blue.max(rgb.b);
        }

        Self {
            colors,
            population,
            red_range: (min_red, max_red),
            green_range: (min_green, max_green),
            blue_range: (min_blue, max_blue),
        }
    }

    fn volume(&self) -> u32 {
        (self.red_range.1 - self.red_range.0 + 1) as u32
            * (self.green_range.1 - self.green_range.0 + 1) as u32
            * (self.blue_range.1 - self.blue_range.0 + 1) as u32
    }

    fn split_box(self) -> (Vbox<'a>, Vbox<'a>) {
        // split the Vbox at the population midpoint of its largest color dimension
        let longest_dimension = self.get_longest_dimension();
        let midpoint = self.population / 2;
        let colors = self.colors;

        colors.sort_by_key(|(rgb, _)| match longest_dimension {
            Component::Red => rgb.r,
            Component::Green => rgb.g,
            Component::Blue => rgb.b,
        });

        let split_point = find_split_point(colors, midpoint);
        let (old, new) = colors.split_at_mut(split_point);

        (Vbox::new(old), Vbox::new(new))
    }

    fn can_split(&self) -> bool {
        self.colors.len() > 1
    }

    fn get_longest_dimension(&self) -> Component {
        let red_length = self.red_range.1 - self.red_range.0;
        let green_length = self.green_range.1 - self.green_range.0;
        let blue_length = self.blue_range.1 - self.blue_range.0;

        if red_length >= green_length && red_length >= blue_length {
            Component::Red
        } else if green_length >= red_length && green_length >= blue_length {
            Component::Green
        } else {
            Component::Blue
        }
    }

    fn get_average_color(&self) -> Swatch {
        let (red_sum, green_sum, blue_sum) =
            self.colors
                .iter()
                .fold((0, 0, 0), |(red_sum, green_sum, blue_sum), (rgb, count)| {
                    (
                        red_sum + rgb.r as u64 * count,
                        green_sum + rgb.g as u64 * count,
                        blue_sum + rgb.b as u64 * count,
                    )
                });

        let pop = self.population.max(1) as f64;
        let mean = Rgb::new(
            (red_sum as f64 / pop).round() as u8,
            (green_sum as f64 / pop).round() as u8,
            (blue_sum as f64 / pop).round() as u8,
        );

        Swatch::new(mean, self.population)
    }
}

impl Eq for Vbox<'_> {}
impl PartialEq for Vbox<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Ord for Vbox<'_> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // colors sharing a 5-bit cell make a Vbox of volume 1 that can still be split
        self.volume()
            .cmp(&other.volume())
            .then(self.colors.len().cmp(&other.colors.len()))
    }
}

impl PartialOrd for Vbox<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

fn find_split_point(colors: &[(Rgb, u64)], midpoint: u64) -> usize {
    let mut pop = 0;

    // return the first color whose running population crosses the midpoint, but never index 0 so the Vbox always
    // splits in two
    for (i, (_, count)) in colors.iter().enumerate() {
        pop += count;

        if pop >= midpoint {
            return i.max(1);
        }
    }

    1
}

fn quantize(rgb: Rgb) -> Rgb {
    Rgb::new(
        modify_width(rgb.r, 8, QUANTIZE_WORD_WIDTH),
        modify_width(rgb.g, 8, QUANTIZE_WORD_WIDTH),
        modify_width(rgb.b, 8, QUANTIZE_WORD_WIDTH),
    )
}

fn modify_width(value: u8, current_width: u32, target_width: u32) -> u8 {
    if target_width > current_width {
        value.wrapping_shl(target_width - current_width)
    } else {
        value.wrapping_shr(current_width - target_width)
    }
}
