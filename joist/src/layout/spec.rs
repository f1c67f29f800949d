//! Declared sizing for one box: width/height plus optional margin and
//! padding edges, each a [`DimenSpec`].

use serde::Deserialize;

use crate::dimension::DimenSpec;
use crate::error::LayoutError;

/// Margin edges. Margins accept pixel, em, percent, and weight modes;
/// auto, unlimited, and ratio have no meaning on an edge.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: DimenSpec,
    pub top: DimenSpec,
    pub right: DimenSpec,
    pub bottom: DimenSpec,
}

impl Default for Margins {
    fn default() -> Self {
        Self::all(DimenSpec::Pixel(0.0))
    }
}

impl Margins {
    pub const fn all(edge: DimenSpec) -> Self {
        Self {
            left: edge,
            top: edge,
            right: edge,
            bottom: edge,
        }
    }

    fn validate(&self) -> Result<(), LayoutError> {
        for edge in [self.left, self.top, self.right, self.bottom] {
            match edge {
                DimenSpec::Auto | DimenSpec::Unlimited | DimenSpec::Ratio(_) => {
                    return Err(LayoutError::InvalidDimension(format!(
                        "margin edge can not be {}",
                        edge.mode_name()
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Padding edges. Like margins but without weight: padding never
/// competes for leftover space.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Paddings {
    pub left: DimenSpec,
    pub top: DimenSpec,
    pub right: DimenSpec,
    pub bottom: DimenSpec,
}

impl Default for Paddings {
    fn default() -> Self {
        Self::all(DimenSpec::Pixel(0.0))
    }
}

impl Paddings {
    pub const fn all(edge: DimenSpec) -> Self {
        Self {
            left: edge,
            top: edge,
            right: edge,
            bottom: edge,
        }
    }

    fn validate(&self) -> Result<(), LayoutError> {
        for edge in [self.left, self.top, self.right, self.bottom] {
            match edge {
                DimenSpec::Auto
                | DimenSpec::Unlimited
                | DimenSpec::Ratio(_)
                | DimenSpec::Weight(_) => {
                    return Err(LayoutError::InvalidDimension(format!(
                        "padding edge can not be {}",
                        edge.mode_name()
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Complete declared sizing of one box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct BoxSpec {
    pub width: DimenSpec,
    pub height: DimenSpec,
    pub margin: Option<Margins>,
    pub padding: Option<Paddings>,
}

impl BoxSpec {
    pub fn new(width: DimenSpec, height: DimenSpec) -> Self {
        Self {
            width,
            height,
            margin: None,
            padding: None,
        }
    }

    pub fn margin(mut self, margin: Margins) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn padding(mut self, padding: Paddings) -> Self {
        self.padding = Some(padding);
        self
    }

    /// Configuration checks that do not need the container: a box with
    /// both axes `Ratio` has no anchor, and edge specs only admit a
    /// subset of the modes.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if matches!(self.width, DimenSpec::Ratio(_))
            && matches!(self.height, DimenSpec::Ratio(_))
        {
            return Err(LayoutError::RatioBothAxes);
        }
        if let Some(margin) = &self.margin {
            margin.validate()?;
        }
        if let Some(padding) = &self.padding {
            padding.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_auto_no_edges() {
        let spec = BoxSpec::default();
        assert_eq!(spec.width, DimenSpec::Auto);
        assert_eq!(spec.height, DimenSpec::Auto);
        assert!(spec.margin.is_none());
        assert!(spec.padding.is_none());
    }

    #[test]
    fn test_both_ratio_rejected() {
        let spec = BoxSpec::new(DimenSpec::Ratio(2.0), DimenSpec::Ratio(0.5));
        assert_eq!(spec.validate(), Err(LayoutError::RatioBothAxes));
    }

    #[test]
    fn test_edge_mode_limits() {
        let spec = BoxSpec::default().margin(Margins::all(DimenSpec::Auto));
        assert!(spec.validate().is_err());
        let spec = BoxSpec::default().padding(Paddings::all(DimenSpec::Weight(1.0)));
        assert!(spec.validate().is_err());
        let spec = BoxSpec::default()
            .margin(Margins::all(DimenSpec::Weight(1.0)))
            .padding(Paddings::all(DimenSpec::Percent(10.0)));
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_deserialize() {
        let spec: BoxSpec = serde_json::from_str(
            r#"{
                "width": "50%",
                "height": "auto",
                "margin": { "left": "10px", "top": "1wt" },
                "padding": { "left": "2em" }
            }"#,
        )
        .unwrap();
        assert_eq!(spec.width, DimenSpec::Percent(50.0));
        assert_eq!(spec.height, DimenSpec::Auto);
        let margin = spec.margin.unwrap();
        assert_eq!(margin.left, DimenSpec::Pixel(10.0));
        assert_eq!(margin.top, DimenSpec::Weight(1.0));
        assert_eq!(margin.right, DimenSpec::Pixel(0.0));
        assert_eq!(spec.padding.unwrap().left, DimenSpec::Ems(2.0));
    }
}
