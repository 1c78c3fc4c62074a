//! Silhouette tracing
//!
//! Builds one rounded rectangle per visual line of text, approximating the
//! glyph bounding box of that line, plus the shimmer band sized from the
//! resulting bounds.
//!
//! The tracer never touches fonts directly. Anything that can report line
//! offsets, a line pitch and substring widths implements [`LineLayout`].

use std::ops::Range;

use shimmer_types::{
    AbsoluteHorizontal, Gravity, LayoutDirection, ShimmerConfig, VerticalGravity,
};

use crate::geometry::{Point, Rect, RoundedRect};

/// Vertical font metrics, relative to the baseline (ascent is negative)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
}

impl FontMetrics {
    /// Height of one text line
    #[inline]
    pub fn line_pitch(&self) -> f32 {
        self.descent - self.ascent
    }
}

/// Line-level view of laid-out text
pub trait LineLayout {
    /// Full text the layout was built from
    fn text(&self) -> &str;

    /// Number of visual lines (0 for empty text)
    fn line_count(&self) -> usize;

    /// Byte range of `line` within [`LineLayout::text`]
    fn line_range(&self, line: usize) -> Range<usize>;

    fn font_metrics(&self) -> FontMetrics;

    /// Width of the rendered glyph bounding box of `text`
    fn glyph_width(&mut self, text: &str) -> f32;
}

/// Inputs to a trace besides the layout itself
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceParams {
    pub view_width: f32,
    pub view_height: f32,
    pub gravity: Gravity,
    pub direction: LayoutDirection,
    pub inset: f32,
    pub corner_radius: f32,
    pub shimmer_width_ratio: f32,
}

impl TraceParams {
    pub fn from_config(config: &ShimmerConfig, view_width: f32, view_height: f32) -> Self {
        Self {
            view_width,
            view_height,
            gravity: config.gravity,
            direction: config.layout_direction,
            inset: config.inset_space,
            corner_radius: config.corner_radius,
            shimmer_width_ratio: config.shimmer_width_ratio,
        }
    }
}

/// Rounded rectangles covering each line, with their tight bounds
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Silhouette {
    lines: Vec<RoundedRect>,
    bounds: Rect,
}

impl Silhouette {
    /// Build from line rectangles; bounds are derived here and nowhere else
    pub fn from_lines(lines: Vec<RoundedRect>) -> Self {
        let bounds = Rect::bounding(lines.iter().map(|l| &l.rect)).unwrap_or(Rect::ZERO);
        Self { lines, bounds }
    }

    pub fn lines(&self) -> &[RoundedRect] {
        &self.lines
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Bounding box of the part of `area` that overlaps any traced line
    pub fn intersection_bounds(&self, area: &Rect) -> Option<Rect> {
        let overlaps: Vec<Rect> = self
            .lines
            .iter()
            .filter_map(|l| l.rect.intersect(area))
            .collect();
        Rect::bounding(&overlaps)
    }
}

/// The highlight shape swept across the silhouette
///
/// Stored anchored at the origin; drawing translates a copy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShimmerBand {
    corners: [Point; 4],
}

impl ShimmerBand {
    /// Band for the given silhouette bounds
    ///
    /// Both leading corners share x = 0, so the quad is an upright rectangle.
    pub fn for_bounds(bounds: &Rect, width_ratio: f32) -> Self {
        let w = bounds.width() * width_ratio;
        let h = bounds.height();
        Self {
            corners: [
                Point::new(0.0, 0.0),
                Point::new(w, 0.0),
                Point::new(w, h),
                Point::new(0.0, h),
            ],
        }
    }

    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            corners: self.corners.map(|p| p.offset(dx, dy)),
        }
    }

    pub fn bounding_rect(&self) -> Rect {
        let [first, rest @ ..] = &self.corners;
        let start = Rect::from_ltrb(first.x, first.y, first.x, first.y);
        rest.iter().fold(start, |r, p| {
            Rect::from_ltrb(
                r.left.min(p.x),
                r.top.min(p.y),
                r.right.max(p.x),
                r.bottom.max(p.y),
            )
        })
    }

    pub fn width(&self) -> f32 {
        self.bounding_rect().width()
    }
}

/// Result of one trace pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trace {
    pub silhouette: Silhouette,
    pub band: ShimmerBand,
}

impl Trace {
    pub fn bounds(&self) -> Rect {
        self.silhouette.bounds()
    }

    /// Band moved into place for a given progress (0-100)
    pub fn band_at(&self, progress: f32) -> ShimmerBand {
        let (dx, dy) = band_offset(&self.silhouette.bounds(), progress);
        self.band.translated(dx, dy)
    }
}

/// Translation applied to the band at `progress` (0-100)
pub fn band_offset(bounds: &Rect, progress: f32) -> (f32, f32) {
    let fraction = progress.clamp(0.0, 100.0) / 100.0;
    (bounds.left + bounds.width() * fraction, bounds.top)
}

/// Top of a text block of `block_height` inside a view of `view_height`
pub fn block_offset_y(gravity: VerticalGravity, view_height: f32, block_height: f32) -> f32 {
    match gravity {
        VerticalGravity::Top => 0.0,
        VerticalGravity::Center => (view_height - block_height) / 2.0,
        VerticalGravity::Bottom => view_height - block_height,
    }
}

/// Left edge of a line of `line_width` inside a view of `view_width`
pub fn line_offset_x(gravity: AbsoluteHorizontal, view_width: f32, line_width: f32) -> f32 {
    match gravity {
        AbsoluteHorizontal::Left => 0.0,
        AbsoluteHorizontal::Center => (view_width - line_width) / 2.0,
        AbsoluteHorizontal::Right => view_width - line_width,
    }
}

/// Trace the silhouette of `layout` inside a view of the given size
pub fn trace<L: LineLayout + ?Sized>(layout: &mut L, params: &TraceParams) -> Trace {
    let line_count = layout.line_count();
    let pitch = layout.font_metrics().line_pitch();
    let block_height = pitch * line_count as f32;

    let y_offset = block_offset_y(params.gravity.vertical, params.view_height, block_height);
    let horizontal = params.gravity.horizontal.resolve(params.direction);
    let inset = params.inset;

    let mut lines = Vec::with_capacity(line_count);
    for line in 0..line_count {
        let range = layout.line_range(line);
        // Line ends include the break and trailing spaces; ink bounds don't
        let line_text = layout.text().get(range).unwrap_or_default().trim_end().to_string();
        let line_width = layout
            .glyph_width(&line_text)
            .clamp(0.0, params.view_width.max(0.0));

        let x_offset = line_offset_x(horizontal, params.view_width, line_width);

        let line_top = y_offset + line as f32 * pitch;
        let left = x_offset + inset;
        let top = line_top + inset;
        let rect = Rect::from_ltrb(
            left,
            top,
            (x_offset + line_width - inset).max(left),
            (line_top + pitch - inset).max(top),
        );
        lines.push(RoundedRect::new(rect, params.corner_radius));
    }

    let silhouette = Silhouette::from_lines(lines);
    let band = ShimmerBand::for_bounds(&silhouette.bounds(), params.shimmer_width_ratio);
    tracing::debug!(
        lines = line_count,
        bounds = ?silhouette.bounds(),
        "traced text silhouette"
    );

    Trace { silhouette, band }
}
