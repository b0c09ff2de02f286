//! Color types for sketchbook.
//!
//! Primitives are colored in a single hue/saturation/brightness/alpha model
//! ([`Hsba`]). Background overlays use plain [`Srgb`], which serializes as a
//! `"#rrggbb"` hex string.

use serde::{Deserialize, Serialize, Serializer};

/// Largest alpha value; fully opaque.
pub const ALPHA_OPAQUE: f64 = 255.0;

/// Hue in degrees [0, 360), saturation and brightness in [0, 100], alpha in
/// [0, 255].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsba {
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
    pub alpha: f64,
}

impl Hsba {
    /// Builds a color, wrapping hue into [0, 360) and clamping the rest.
    pub fn new(hue: f64, saturation: f64, brightness: f64, alpha: f64) -> Self {
        Self {
            hue: hue.rem_euclid(360.0),
            saturation: saturation.clamp(0.0, 100.0),
            brightness: brightness.clamp(0.0, 100.0),
            alpha: alpha.clamp(0.0, ALPHA_OPAQUE),
        }
    }

    /// Fully opaque color.
    pub fn opaque(hue: f64, saturation: f64, brightness: f64) -> Self {
        Self::new(hue, saturation, brightness, ALPHA_OPAQUE)
    }

    /// Opaque white.
    pub fn white() -> Self {
        Self::opaque(0.0, 0.0, 100.0)
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self::new(self.hue, self.saturation, self.brightness, alpha)
    }
}

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"`, quantized to 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    /// Builds a color from 8-bit channel values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        let r = (self.r.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (self.g.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (self.b.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}
