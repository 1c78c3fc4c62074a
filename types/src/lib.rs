//! Shared configuration types for the shimmer text widget
//!
//! This crate contains serializable value types that are shared between
//! the geometry/animation core (shimmer-core), the renderer
//! (shimmer-overlay) and the interactive host (shimmer-cli).

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Color Type
// ─────────────────────────────────────────────────────────────────────────────

/// RGBA color as [r, g, b, a] bytes
pub type Color = [u8; 4];

// ─────────────────────────────────────────────────────────────────────────────
// Default Color Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Named colors understood by the color resolver
pub mod palette {
    use super::Color;

    pub const TRANSPARENT: Color = [0, 0, 0, 0];
    pub const WHITE: Color = [255, 255, 255, 255];
    pub const BLACK: Color = [0, 0, 0, 255];
    pub const DARKER_GRAY: Color = [170, 170, 170, 255]; // #AAAAAA
    pub const GRAY: Color = [136, 136, 136, 255];
    pub const LIGHT_GRAY: Color = [204, 204, 204, 255];
    pub const RED: Color = [255, 0, 0, 255];
    pub const GREEN: Color = [0, 255, 0, 255];
    pub const BLUE: Color = [0, 0, 255, 255];

    /// Look up a named color (case-insensitive, `-` and `_` interchangeable)
    pub fn by_name(name: &str) -> Option<Color> {
        let key = name.trim().to_ascii_lowercase().replace('-', "_");
        match key.as_str() {
            "transparent" => Some(TRANSPARENT),
            "white" => Some(WHITE),
            "black" => Some(BLACK),
            "darker_gray" | "darker_grey" => Some(DARKER_GRAY),
            "gray" | "grey" => Some(GRAY),
            "light_gray" | "light_grey" => Some(LIGHT_GRAY),
            "red" => Some(RED),
            "green" => Some(GREEN),
            "blue" => Some(BLUE),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Gravity
// ─────────────────────────────────────────────────────────────────────────────

/// Text direction used to resolve relative gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Horizontal alignment of each line inside the view
///
/// `Start` and `End` are relative and flip under [`LayoutDirection::Rtl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalGravity {
    #[default]
    Start,
    Left,
    Center,
    Right,
    End,
}

/// Horizontal alignment after resolving against a layout direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsoluteHorizontal {
    Left,
    Center,
    Right,
}

impl HorizontalGravity {
    pub fn resolve(self, direction: LayoutDirection) -> AbsoluteHorizontal {
        match (self, direction) {
            (Self::Left, _) => AbsoluteHorizontal::Left,
            (Self::Right, _) => AbsoluteHorizontal::Right,
            (Self::Center, _) => AbsoluteHorizontal::Center,
            (Self::Start, LayoutDirection::Ltr) | (Self::End, LayoutDirection::Rtl) => {
                AbsoluteHorizontal::Left
            }
            (Self::Start, LayoutDirection::Rtl) | (Self::End, LayoutDirection::Ltr) => {
                AbsoluteHorizontal::Right
            }
        }
    }
}

/// Vertical alignment of the whole text block inside the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalGravity {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Combined horizontal + vertical alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Gravity {
    #[serde(default)]
    pub horizontal: HorizontalGravity,
    #[serde(default)]
    pub vertical: VerticalGravity,
}

impl Gravity {
    pub fn new(horizontal: HorizontalGravity, vertical: VerticalGravity) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Centered on both axes
    pub fn center() -> Self {
        Self::new(HorizontalGravity::Center, VerticalGravity::Center)
    }

    /// Parse from user input such as `center`, `top-left`, `bottom end`
    ///
    /// A bare `center` only fills the axes no other word names, so
    /// `center left` and `left center` mean the same thing.
    pub fn from_input(input: &str) -> Option<Self> {
        let mut horizontal = None;
        let mut vertical = None;
        let mut center = false;
        let mut matched = false;
        for part in input
            .split(|c: char| c == '-' || c == '|' || c.is_whitespace())
            .filter(|p| !p.is_empty())
        {
            matched = true;
            match part.to_ascii_lowercase().as_str() {
                "top" => vertical = Some(VerticalGravity::Top),
                "bottom" => vertical = Some(VerticalGravity::Bottom),
                "left" => horizontal = Some(HorizontalGravity::Left),
                "right" => horizontal = Some(HorizontalGravity::Right),
                "start" => horizontal = Some(HorizontalGravity::Start),
                "end" => horizontal = Some(HorizontalGravity::End),
                "center" => center = true,
                "center_horizontal" | "hcenter" => horizontal = Some(HorizontalGravity::Center),
                "center_vertical" | "vcenter" => vertical = Some(VerticalGravity::Center),
                _ => return None,
            }
        }
        if !matched {
            return None;
        }
        let (fill_h, fill_v) = if center {
            (HorizontalGravity::Center, VerticalGravity::Center)
        } else {
            Default::default()
        };
        Some(Self::new(
            horizontal.unwrap_or(fill_h),
            vertical.unwrap_or(fill_v),
        ))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Serde Default Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn default_trace_color() -> Color {
    palette::DARKER_GRAY
}
fn default_shimmer_color() -> Color {
    palette::WHITE
}
fn default_text_color() -> Color {
    palette::BLACK
}
fn default_shimmer_alpha() -> u8 {
    0x40 // 25%
}
fn default_shimmer_width_ratio() -> f32 {
    0.33
}
fn default_inset_space() -> f32 {
    2.5
}
fn default_corner_radius() -> f32 {
    20.0
}
fn default_period_ms() -> u64 {
    1000
}
fn default_font_size() -> f32 {
    24.0
}

// ─────────────────────────────────────────────────────────────────────────────
// Shimmer Config
// ─────────────────────────────────────────────────────────────────────────────

/// Style and geometry settings for a shimmer text view
///
/// Color changes only need a redraw; `inset_space`, `corner_radius`,
/// `font_size` and `gravity` change the traced silhouette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShimmerConfig {
    #[serde(default = "default_trace_color")]
    pub trace_color: Color,
    #[serde(default = "default_shimmer_color")]
    pub shimmer_color: Color,
    #[serde(default = "default_text_color")]
    pub text_color: Color,
    /// Alpha applied on top of the shimmer gradient (0-255)
    #[serde(default = "default_shimmer_alpha")]
    pub shimmer_alpha: u8,
    /// Band width as a fraction of the silhouette width
    #[serde(default = "default_shimmer_width_ratio")]
    pub shimmer_width_ratio: f32,
    /// Padding removed from each side of a traced line rectangle
    #[serde(default = "default_inset_space")]
    pub inset_space: f32,
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f32,
    /// Default sweep period used by `start_shimmer`
    #[serde(default = "default_period_ms")]
    pub period_ms: u64,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default)]
    pub gravity: Gravity,
    #[serde(default)]
    pub layout_direction: LayoutDirection,
}

impl Default for ShimmerConfig {
    fn default() -> Self {
        Self {
            trace_color: default_trace_color(),
            shimmer_color: default_shimmer_color(),
            text_color: default_text_color(),
            shimmer_alpha: default_shimmer_alpha(),
            shimmer_width_ratio: default_shimmer_width_ratio(),
            inset_space: default_inset_space(),
            corner_radius: default_corner_radius(),
            period_ms: default_period_ms(),
            font_size: default_font_size(),
            gravity: Gravity::default(),
            layout_direction: LayoutDirection::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_end_flip_under_rtl() {
        assert_eq!(
            HorizontalGravity::Start.resolve(LayoutDirection::Ltr),
            AbsoluteHorizontal::Left
        );
        assert_eq!(
            HorizontalGravity::Start.resolve(LayoutDirection::Rtl),
            AbsoluteHorizontal::Right
        );
        assert_eq!(
            HorizontalGravity::End.resolve(LayoutDirection::Rtl),
            AbsoluteHorizontal::Left
        );
        assert_eq!(
            HorizontalGravity::Left.resolve(LayoutDirection::Rtl),
            AbsoluteHorizontal::Left
        );
    }

    #[test]
    fn gravity_from_input() {
        assert_eq!(Gravity::from_input("center"), Some(Gravity::center()));
        assert_eq!(
            Gravity::from_input("bottom-right"),
            Some(Gravity::new(HorizontalGravity::Right, VerticalGravity::Bottom))
        );
        assert_eq!(
            Gravity::from_input("top end"),
            Some(Gravity::new(HorizontalGravity::End, VerticalGravity::Top))
        );
        assert_eq!(Gravity::from_input("sideways"), None);
        assert_eq!(Gravity::from_input(""), None);
    }

    #[test]
    fn center_fills_only_unnamed_axes() {
        let left_center = Some(Gravity::new(HorizontalGravity::Left, VerticalGravity::Center));
        assert_eq!(Gravity::from_input("left center"), left_center);
        assert_eq!(Gravity::from_input("center left"), left_center);
        assert_eq!(
            Gravity::from_input("center-bottom"),
            Some(Gravity::new(HorizontalGravity::Center, VerticalGravity::Bottom))
        );
        assert_eq!(
            Gravity::from_input("hcenter"),
            Some(Gravity::new(HorizontalGravity::Center, VerticalGravity::Top))
        );
    }

    #[test]
    fn palette_lookup_is_forgiving() {
        assert_eq!(palette::by_name("Darker-Gray"), Some(palette::DARKER_GRAY));
        assert_eq!(palette::by_name(" white "), Some(palette::WHITE));
        assert_eq!(palette::by_name("mauve"), None);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: ShimmerConfig = toml::from_str("shimmer_color = [255, 0, 0, 255]").unwrap();
        assert_eq!(config.shimmer_color, palette::RED);
        assert_eq!(config.trace_color, palette::DARKER_GRAY);
        assert_eq!(config.shimmer_alpha, 0x40);
        assert_eq!(config.period_ms, 1000);
        assert_eq!(config.gravity, Gravity::default());
    }
}
