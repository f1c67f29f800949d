//! Declared sizes and measurement constraints.
//!
//! [`DimenSpec`] is the declarative size a box is configured with:
//!
//! ```text
//! width:   auto  100px  50%  16:9  1wt  2em  unlimited
//! margin:  10px  1wt  5%  2em        (no auto/ratio/unlimited)
//! padding: 10px  5%  2em             (no weight either)
//! ```
//!
//! [`MeasureSpec`] is the constraint a parent passes into `measure`: a
//! pixel value plus a mode telling the child whether that value is exact
//! (`Pixel`), an upper bound (`Auto`), or advisory only (`Unlimited`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, de};

use crate::error::LayoutError;

/// Constraint mode for one axis of a `measure` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecMode {
    /// The value is the exact resolved size.
    Pixel,
    /// Wrap content; the value is an upper bound.
    #[default]
    Auto,
    /// Content may take whatever it needs; the value is advisory.
    Unlimited,
}

/// A measurement constraint: pixel value plus [`SpecMode`].
///
/// The original engine bit-packed this pair into an int32; an explicit
/// struct costs nothing and cannot be accidentally treated as a plain
/// pixel count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureSpec {
    value: i32,
    mode: SpecMode,
}

impl MeasureSpec {
    #[inline]
    pub const fn new(value: i32, mode: SpecMode) -> Self {
        Self { value, mode }
    }

    #[inline]
    pub const fn pixel(value: i32) -> Self {
        Self::new(value, SpecMode::Pixel)
    }

    #[inline]
    pub const fn auto(bound: i32) -> Self {
        Self::new(bound, SpecMode::Auto)
    }

    #[inline]
    pub const fn unlimited(hint: i32) -> Self {
        Self::new(hint, SpecMode::Unlimited)
    }

    #[inline]
    pub const fn value(self) -> i32 {
        self.value
    }

    #[inline]
    pub const fn mode(self) -> SpecMode {
        self.mode
    }

    #[inline]
    pub fn is_pixel(self) -> bool {
        self.mode == SpecMode::Pixel
    }
}

impl Default for MeasureSpec {
    fn default() -> Self {
        Self::unlimited(0)
    }
}

impl fmt::Display for MeasureSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            SpecMode::Pixel => write!(f, "{}px", self.value),
            SpecMode::Auto => write!(f, "auto({})", self.value),
            SpecMode::Unlimited => write!(f, "unlimited({})", self.value),
        }
    }
}

/// A declared size on one axis (or one margin/padding edge).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DimenSpec {
    /// Exact pixels.
    Pixel(f32),
    /// Percent of the container's inner size on the same axis, `[0, 100)`.
    Percent(f32),
    /// Relative share of leftover space among weighted siblings.
    Weight(f32),
    /// Width/height multiplier against the opposite axis.
    Ratio(f32),
    /// Multiple of the font-derived line height.
    Ems(f32),
    /// Wrap content.
    #[default]
    Auto,
    /// Take whatever the content needs.
    Unlimited,
}

impl DimenSpec {
    #[inline]
    pub const fn pixel(value: f32) -> Self {
        Self::Pixel(value)
    }

    /// Percent of the container's inner size. Values at or above 100
    /// would make the deferred-resolution division `1 - pct/100`
    /// diverge or go negative, so they are rejected up front.
    pub fn percent(value: f32) -> Result<Self, LayoutError> {
        if !(0.0..100.0).contains(&value) {
            return Err(LayoutError::PercentOutOfRange { value });
        }
        Ok(Self::Percent(value))
    }

    pub fn weight(value: f32) -> Result<Self, LayoutError> {
        if value <= 0.0 {
            return Err(LayoutError::InvalidDimension(format!(
                "weight must be positive, got {value}"
            )));
        }
        Ok(Self::Weight(value))
    }

    pub fn ratio(value: f32) -> Result<Self, LayoutError> {
        if value <= 0.0 {
            return Err(LayoutError::InvalidDimension(format!(
                "ratio must be positive, got {value}"
            )));
        }
        Ok(Self::Ratio(value))
    }

    pub fn ems(value: f32) -> Result<Self, LayoutError> {
        if value < 0.0 {
            return Err(LayoutError::InvalidDimension(format!(
                "em size must not be negative, got {value}"
            )));
        }
        Ok(Self::Ems(value))
    }

    /// The numeric payload; zero for `Auto`/`Unlimited`.
    #[inline]
    pub fn value(self) -> f32 {
        match self {
            Self::Pixel(v)
            | Self::Percent(v)
            | Self::Weight(v)
            | Self::Ratio(v)
            | Self::Ems(v) => v,
            Self::Auto | Self::Unlimited => 0.0,
        }
    }

    /// A literal-zero edge resolves to zero pixels immediately,
    /// whatever its mode, skipping all deferral bookkeeping.
    #[inline]
    pub fn is_zero(self) -> bool {
        match self {
            Self::Auto | Self::Unlimited => false,
            _ => self.value() == 0.0,
        }
    }

    pub fn mode_name(self) -> &'static str {
        match self {
            Self::Pixel(_) => "pixel",
            Self::Percent(_) => "percent",
            Self::Weight(_) => "weight",
            Self::Ratio(_) => "ratio",
            Self::Ems(_) => "em",
            Self::Auto => "auto",
            Self::Unlimited => "unlimited",
        }
    }
}

impl FromStr for DimenSpec {
    type Err = LayoutError;

    /// Parse the declarative string grammar: `"auto"`, `"unlimited"`,
    /// `"50%"`, `"10px"`, `"1wt"`, `"16:9"`, `"2em"`. A bare number is
    /// pixels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || LayoutError::InvalidDimension(s.to_string());
        if s.is_empty() || s == "auto" {
            return Ok(Self::Auto);
        }
        if s == "unlimited" {
            return Ok(Self::Unlimited);
        }
        if let Some(v) = s.strip_suffix('%') {
            let v: f32 = v.trim().parse().map_err(|_| invalid())?;
            return Self::percent(v);
        }
        if let Some(v) = s.strip_suffix("px") {
            let v: f32 = v.trim().parse().map_err(|_| invalid())?;
            return Ok(Self::Pixel(v));
        }
        if let Some(v) = s.strip_suffix("wt") {
            let v: f32 = v.trim().parse().map_err(|_| invalid())?;
            return Self::weight(v);
        }
        if let Some(v) = s.strip_suffix("em") {
            let v: f32 = v.trim().parse().map_err(|_| invalid())?;
            return Self::ems(v);
        }
        if let Some((w, h)) = s.split_once(':') {
            let w: f32 = w.trim().parse().map_err(|_| invalid())?;
            let h: f32 = h.trim().parse().map_err(|_| invalid())?;
            if w <= 0.0 || h <= 0.0 {
                return Err(invalid());
            }
            return Self::ratio(w / h);
        }
        let v: f32 = s.parse().map_err(|_| invalid())?;
        Ok(Self::Pixel(v))
    }
}

impl fmt::Display for DimenSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixel(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
            Self::Weight(v) => write!(f, "{v}wt"),
            Self::Ratio(v) => write!(f, "{v}:1"),
            Self::Ems(v) => write!(f, "{v}em"),
            Self::Auto => write!(f, "auto"),
            Self::Unlimited => write!(f, "unlimited"),
        }
    }
}

impl<'de> Deserialize<'de> for DimenSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DimenVisitor;

        impl de::Visitor<'_> for DimenVisitor {
            type Value = DimenSpec;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a dimension string like \"10px\", \"50%\", \"1wt\", or a number")
            }

            fn visit_str<E>(self, value: &str) -> Result<DimenSpec, E>
            where
                E: de::Error,
            {
                value.parse().map_err(E::custom)
            }

            fn visit_f64<E>(self, value: f64) -> Result<DimenSpec, E>
            where
                E: de::Error,
            {
                Ok(DimenSpec::Pixel(value as f32))
            }

            fn visit_i64<E>(self, value: i64) -> Result<DimenSpec, E>
            where
                E: de::Error,
            {
                Ok(DimenSpec::Pixel(value as f32))
            }

            fn visit_u64<E>(self, value: u64) -> Result<DimenSpec, E>
            where
                E: de::Error,
            {
                Ok(DimenSpec::Pixel(value as f32))
            }
        }

        deserializer.deserialize_any(DimenVisitor)
    }
}
