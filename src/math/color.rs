//! Representative colors and the matching distance between them

use image::Rgb;

/// Number of channels that take part in color matching
pub const CHANNELS: usize = 3;

/// An RGB color used both as an index key and as a query point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(pub [u8; CHANNELS]);

impl Color {
    /// Build a color from its red, green and blue channels
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self([red, green, blue])
    }

    /// Channel value along `axis` (0 = red, 1 = green, 2 = blue)
    ///
    /// Axes beyond the last channel read as zero.
    pub fn channel(self, axis: usize) -> u8 {
        self.0.get(axis).copied().unwrap_or(0)
    }

    /// Squared Euclidean distance over all three channels
    ///
    /// Exact in integer arithmetic, so equal distances compare equal.
    pub fn squared_distance(self, other: Self) -> u32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(&a, &b)| {
                let delta = u32::from(a.abs_diff(b));
                delta * delta
            })
            .sum()
    }
}

impl From<Rgb<u8>> for Color {
    fn from(pixel: Rgb<u8>) -> Self {
        Self(pixel.0)
    }
}

impl From<Color> for Rgb<u8> {
    fn from(color: Color) -> Self {
        Self(color.0)
    }
}
