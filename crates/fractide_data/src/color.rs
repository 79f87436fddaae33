use serde::{Deserialize, Serialize};

/// A 3-channel color value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Channel-wise RGB complement.
    #[must_use]
    pub fn complement(self) -> Self {
        let [r, g, b] = self.0;
        Self([255 - r, 255 - g, 255 - b])
    }

    /// A gray value: one intensity repeated across channels.
    #[must_use]
    pub fn gray(intensity: u8) -> Self {
        Self([intensity; 3])
    }
}

/// The two colors a frame is drawn with: dead cells and alive cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub dead: Rgb,
    pub alive: Rgb,
}

impl ColorScheme {
    #[must_use]
    pub fn new(dead: Rgb, alive: Rgb) -> Self {
        Self { dead, alive }
    }
}

impl Default for ColorScheme {
    /// Black on white, the plain scheme used when randomization is off.
    fn default() -> Self {
        Self {
            dead: Rgb([255, 255, 255]),
            alive: Rgb([0, 0, 0]),
        }
    }
}
