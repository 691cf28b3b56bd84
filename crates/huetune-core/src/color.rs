//! Colour psychology: maps a dominant colour to music characteristics.
//!
//! Brightness drives energy, hue drives valence (warm and yellow-green hues
//! read as positive, blues and violets as subdued), and saturation drives
//! acousticness (muted colours suggest acoustic timbre, saturated colours
//! produced or electronic timbre).

use serde::{Deserialize, Serialize};

use crate::model::{ColorProfile, Rgb};

/// A colour in HSV space.
///
/// `hue` is in whole degrees, `0.0..360.0`; `saturation` and `value` are
/// percentages, `0.0..=100.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

impl Hsv {
    /// Convert using the standard piecewise RGB to HSV formula.
    #[must_use]
    pub fn from_rgb(rgb: Rgb) -> Self {
        let r = f64::from(rgb.red) / 255.0;
        let g = f64::from(rgb.green) / 255.0;
        let b = f64::from(rgb.blue) / 255.0;

        let max_channel = rgb.max_channel();
        let max = f64::from(max_channel) / 255.0;
        let diff = max - f64::from(rgb.min_channel()) / 255.0;

        // Channel comparisons are done on the bytes so the branch choice is
        // exact. Red wins ties, then green.
        let sector = if max_channel == rgb.min_channel() {
            0.0
        } else if max_channel == rgb.red {
            ((g - b) / diff) % 6.0
        } else if max_channel == rgb.green {
            (b - r) / diff + 2.0
        } else {
            (r - g) / diff + 4.0
        };

        // Halves round toward +inf, so -0.5 degrees lands on 0 rather than
        // 359. `abs` folds a -0.0 back to 0.0.
        let hue = (sector * 60.0 + 0.5).floor().rem_euclid(360.0).abs();
        let saturation = if max_channel == 0 {
            0.0
        } else {
            diff / max * 100.0
        };

        Self {
            hue,
            saturation,
            value: max * 100.0,
        }
    }
}

/// Valence for a hue in degrees.
#[must_use]
pub fn valence_for_hue(hue: f64) -> f64 {
    match hue {
        h if h < 60.0 => 0.8,  // red to yellow
        h if h < 120.0 => 0.9, // yellow to green
        h if h < 180.0 => 0.7, // green to cyan
        h if h < 240.0 => 0.4, // cyan to blue
        h if h < 300.0 => 0.3, // blue to magenta
        _ => 0.6,              // magenta to red
    }
}

/// Map a dominant colour to energy, valence, and acousticness.
#[must_use]
pub fn analyze(rgb: Rgb) -> ColorProfile {
    let hsv = Hsv::from_rgb(rgb);
    ColorProfile {
        energy: hsv.value / 100.0,
        valence: valence_for_hue(hsv.hue),
        acousticness: 1.0 - hsv.saturation / 100.0,
    }
}

/// Describe a colour in words, e.g. `"bright muted cool blue"`.
///
/// The phrase joins a brightness term, a saturation term, and the dominant
/// hue family, and is used as one of the contextual query phrases.
#[must_use]
pub fn describe(rgb: Rgb) -> String {
    let Rgb { red, green, blue } = rgb;
    let sum = u16::from(red) + u16::from(green) + u16::from(blue);
    let spread = rgb.max_channel() - rgb.min_channel();

    // Average brightness above 200 / below 100, compared on the channel sum.
    let brightness = if sum > 600 {
        "bright"
    } else if sum < 300 {
        "dark"
    } else {
        "medium"
    };

    let saturation = if spread > 150 {
        "vibrant"
    } else if spread < 50 {
        "muted"
    } else {
        "balanced"
    };

    let hue = if red > green && red > blue {
        if green > blue {
            "warm orange"
        } else {
            "red"
        }
    } else if green > red && green > blue {
        "green"
    } else if blue > red && blue > green {
        "cool blue"
    } else {
        "neutral"
    };

    format!("{brightness} {saturation} {hue}")
}
