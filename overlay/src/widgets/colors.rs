//! Frequently used paint colors
use shimmer_types::palette;
use tiny_skia::Color;

use crate::utils::color_from_rgba;

#[inline]
pub fn transparent() -> Color {
    color_from_rgba(palette::TRANSPARENT)
}

#[inline]
pub fn white() -> Color {
    color_from_rgba(palette::WHITE)
}
