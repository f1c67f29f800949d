//! Child alignment within leftover container space.

use serde::Deserialize;

/// Horizontal placement of content inside a larger box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl HorizontalAlign {
    /// X offset of a box of `content` width inside `space`.
    #[inline]
    pub fn offset(self, space: i32, content: i32) -> i32 {
        match self {
            Self::Left => 0,
            Self::Center => (space - content) / 2,
            Self::Right => space - content,
        }
    }
}

/// Vertical placement of content inside a larger box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl VerticalAlign {
    /// Y offset of a box of `content` height inside `space`.
    #[inline]
    pub fn offset(self, space: i32, content: i32) -> i32 {
        match self {
            Self::Top => 0,
            Self::Middle => (space - content) / 2,
            Self::Bottom => space - content,
        }
    }
}

/// Combined alignment pair, used by stacks and layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Align {
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
}

impl Align {
    pub const TOP_LEFT: Align = Align {
        horizontal: HorizontalAlign::Left,
        vertical: VerticalAlign::Top,
    };

    pub const CENTER: Align = Align {
        horizontal: HorizontalAlign::Center,
        vertical: VerticalAlign::Middle,
    };
}
