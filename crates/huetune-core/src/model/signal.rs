use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A dominant colour extracted from an image.
///
/// Channels are bytes, so every value is in `0..=255` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Largest channel value.
    #[must_use]
    pub fn max_channel(self) -> u8 {
        self.red.max(self.green).max(self.blue)
    }

    /// Smallest channel value.
    #[must_use]
    pub fn min_channel(self) -> u8 {
        self.red.min(self.green).min(self.blue)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.red, self.green, self.blue)
    }
}

/// Parses `"r,g,b"` (whitespace around components is ignored).
impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let [red, green, blue] = parts.as_slice() else {
            return Err(Error::InvalidData(format!(
                "expected colour as r,g,b but got '{s}'"
            )));
        };

        let channel = |name: &str, value: &str| {
            value.parse::<u8>().map_err(|e| {
                Error::InvalidData(format!("invalid {name} channel '{value}': {e}"))
            })
        };

        Ok(Self {
            red: channel("red", *red)?,
            green: channel("green", *green)?,
            blue: channel("blue", *blue)?,
        })
    }
}

/// The raw visual signal of one image: detected object labels plus the
/// dominant colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSignal {
    /// Detected object labels, most confident first.
    pub labels: Vec<String>,
    pub color: Rgb,
}

impl ImageSignal {
    #[must_use]
    pub fn new<I, S>(labels: I, color: Rgb) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            color,
        }
    }
}
