//! Length and volume units for gauge readings.
//!
//! Calibration data is stored in inches and gallons. Readings arrive in, and
//! results are reported in, either centimeters or inches for heights and
//! gallons or liters for volumes. Every conversion is a single multiplication
//! or division by a fixed factor, so converting and converting back returns
//! the original value up to floating point rounding.
//!
//! The gallon used here is the fixed factor [`LITERS_PER_GALLON`], which is
//! what published gauge tables are computed with. It differs from the exact
//! US liquid gallon in the sixth significant digit, so volumes passing through
//! [`uom`] quantities are routed through liters rather than `uom`'s gallon.

use std::fmt;

use uom::si::{
    f64::{Length, Volume},
    length::inch,
    volume::liter,
};

/// Centimeters in one inch (exact).
pub const CENTIMETERS_PER_INCH: f64 = 2.54;

/// Liters in one gallon.
pub const LITERS_PER_GALLON: f64 = 3.785_41;

/// Converts centimeters to inches.
#[must_use]
pub fn cm_to_inches(cm: f64) -> f64 {
    cm / CENTIMETERS_PER_INCH
}

/// Converts inches to centimeters.
#[must_use]
pub fn inches_to_cm(inches: f64) -> f64 {
    inches * CENTIMETERS_PER_INCH
}

/// Converts liters to gallons.
#[must_use]
pub fn liters_to_gallons(liters: f64) -> f64 {
    liters / LITERS_PER_GALLON
}

/// Converts gallons to liters.
#[must_use]
pub fn gallons_to_liters(gallons: f64) -> f64 {
    gallons * LITERS_PER_GALLON
}

/// Unit of a fill height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum LengthUnit {
    Centimeter,
    #[default]
    Inch,
}

impl LengthUnit {
    /// Every length unit, canonical unit first.
    pub const ALL: [Self; 2] = [Self::Inch, Self::Centimeter];

    /// Converts a height in this unit to inches.
    #[must_use]
    pub fn to_inches(self, value: f64) -> f64 {
        match self {
            Self::Centimeter => cm_to_inches(value),
            Self::Inch => value,
        }
    }

    /// Converts a height in inches to this unit.
    #[must_use]
    pub fn from_inches(self, inches: f64) -> f64 {
        match self {
            Self::Centimeter => inches_to_cm(inches),
            Self::Inch => inches,
        }
    }

    /// Returns the short display label for this unit.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Centimeter => "cm",
            Self::Inch => "in",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unit of a contained volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum VolumeUnit {
    #[default]
    Gallon,
    Liter,
}

impl VolumeUnit {
    /// Every volume unit, canonical unit first.
    pub const ALL: [Self; 2] = [Self::Gallon, Self::Liter];

    /// Converts a volume in this unit to gallons.
    #[must_use]
    pub fn to_gallons(self, value: f64) -> f64 {
        match self {
            Self::Gallon => value,
            Self::Liter => liters_to_gallons(value),
        }
    }

    /// Converts a volume in gallons to this unit.
    #[must_use]
    pub fn from_gallons(self, gallons: f64) -> f64 {
        match self {
            Self::Gallon => gallons,
            Self::Liter => gallons_to_liters(gallons),
        }
    }

    /// Returns the short display label for this unit.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Gallon => "gal",
            Self::Liter => "L",
        }
    }
}

impl fmt::Display for VolumeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Returns a dimensioned length as a height in inches.
#[must_use]
pub fn inches_from_length(length: Length) -> f64 {
    length.get::<inch>()
}

/// Returns a height in inches as a dimensioned length.
#[must_use]
pub fn length_from_inches(inches: f64) -> Length {
    Length::new::<inch>(inches)
}

/// Returns a dimensioned volume in gallons.
#[must_use]
pub fn gallons_from_volume(volume: Volume) -> f64 {
    liters_to_gallons(volume.get::<liter>())
}

/// Returns a volume in gallons as a dimensioned volume.
#[must_use]
pub fn volume_from_gallons(gallons: f64) -> Volume {
    Volume::new::<liter>(gallons_to_liters(gallons))
}
