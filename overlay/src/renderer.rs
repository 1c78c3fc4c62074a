//! Software renderer using tiny-skia and cosmic-text
//!
//! This provides cross-platform 2D rendering for shimmer text content.
//! All rendering is done on the CPU and produces an RGBA pixel buffer.
#![allow(clippy::too_many_arguments)]
use std::collections::HashMap;
use std::ops::Range;

use cosmic_text::{
    Attrs, Buffer, Color as CosmicColor, Family, FontSystem, LayoutGlyph, Metrics, Shaping,
    SwashCache, Wrap,
};
use shimmer_core::{FontMetrics, LineLayout, Rect as TraceRect, ShimmerBand, Silhouette};
use tiny_skia::{
    Color, FillRule, GradientStop, LinearGradient, Mask, Paint, Path, PathBuilder, PixmapMut,
    Point, Shader, SpreadMode, Transform,
};

/// Maximum entries in the text shaping cache (LRU eviction when exceeded)
const TEXT_CACHE_MAX_ENTRIES: usize = 512;

/// Line pitch as a multiple of the font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Largest frame side accepted by [`Renderer::create_buffer`]
pub const MAX_BUFFER_DIMENSION: u32 = 16_384;

/// Circle-approximating control distance for a cubic quarter arc
const ARC_KAPPA: f32 = 0.552_284_8;

/// Cached result of measuring a single line of text
struct CachedText {
    width: f32,
    height: f32,
    /// LRU tracking: incremented on each access
    last_used: u64,
}

/// Key for text cache: (text content, font size rounded to tenths)
type TextCacheKey = (String, u32);

/// One visual line of a laid-out text block
#[derive(Debug, Clone)]
pub struct TextLine {
    /// Byte range within the block text
    pub range: Range<usize>,
    pub glyphs: Vec<LayoutGlyph>,
    /// Baseline offset from the top of the block
    pub baseline: f32,
    /// Horizontal extent of the visible glyphs
    pub width: f32,
    /// Leftmost glyph x, used to re-anchor the line under gravity
    pub left: f32,
}

/// Text shaped and wrapped to a width, split into visual lines
#[derive(Debug, Clone)]
pub struct TextBlock {
    text: String,
    font_size: f32,
    lines: Vec<TextLine>,
}

impl TextBlock {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    pub fn line_height(&self) -> f32 {
        self.font_size * LINE_HEIGHT_FACTOR
    }

    /// Metrics whose pitch equals the layout line height
    pub fn font_metrics(&self) -> FontMetrics {
        FontMetrics {
            ascent: -self.font_size,
            descent: self.line_height() - self.font_size,
        }
    }
}

/// A [`TextBlock`] paired with the renderer that can measure substrings
pub struct MeasuredText<'a> {
    renderer: &'a mut Renderer,
    block: &'a TextBlock,
}

impl<'a> MeasuredText<'a> {
    pub fn new(renderer: &'a mut Renderer, block: &'a TextBlock) -> Self {
        Self { renderer, block }
    }
}

impl LineLayout for MeasuredText<'_> {
    fn text(&self) -> &str {
        &self.block.text
    }

    fn line_count(&self) -> usize {
        self.block.lines.len()
    }

    fn line_range(&self, line: usize) -> Range<usize> {
        self.block
            .lines
            .get(line)
            .map(|l| l.range.clone())
            .unwrap_or(0..0)
    }

    fn font_metrics(&self) -> FontMetrics {
        self.block.font_metrics()
    }

    fn glyph_width(&mut self, text: &str) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.renderer.measure_text(text, self.block.font_size).0
    }
}

/// A software renderer for shimmer text content
pub struct Renderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    /// Cache of measured text to avoid re-shaping on every trace
    text_cache: HashMap<TextCacheKey, CachedText>,
    /// Counter for LRU tracking
    cache_access_counter: u64,
}

impl Renderer {
    /// Create a new renderer backed by the system fonts
    pub fn new() -> Self {
        Self::with_font_system(FontSystem::new())
    }

    pub fn with_font_system(font_system: FontSystem) -> Self {
        Self {
            font_system,
            swash_cache: SwashCache::new(),
            text_cache: HashMap::with_capacity(256),
            cache_access_counter: 0,
        }
    }

    /// Evict least recently used entries if cache is too large
    fn evict_lru_if_needed(&mut self) {
        if self.text_cache.len() <= TEXT_CACHE_MAX_ENTRIES {
            return;
        }

        // Remove ~25% of cache, oldest first
        let target_size = TEXT_CACHE_MAX_ENTRIES * 3 / 4;
        let mut entries: Vec<_> = self
            .text_cache
            .iter()
            .map(|(k, v)| (k.clone(), v.last_used))
            .collect();
        entries.sort_by_key(|(_, last_used)| *last_used);

        for (key, _) in entries
            .into_iter()
            .take(self.text_cache.len() - target_size)
        {
            self.text_cache.remove(&key);
        }
    }

    fn new_buffer(&mut self, font_size: f32) -> Buffer {
        let metrics = Metrics::new(font_size, font_size * LINE_HEIGHT_FACTOR);
        Buffer::new(&mut self.font_system, metrics)
    }

    /// Measure single-line text dimensions (cached)
    pub fn measure_text(&mut self, text: &str, font_size: f32) -> (f32, f32) {
        let font_size_key = (font_size * 10.0).round() as u32;

        self.cache_access_counter += 1;
        let current_access = self.cache_access_counter;

        // Linear search avoids a String allocation on hit
        if let Some(cached) = self
            .text_cache
            .iter_mut()
            .find(|(k, _)| k.0 == text && k.1 == font_size_key)
            .map(|(_, v)| v)
        {
            cached.last_used = current_access;
            return (cached.width, cached.height);
        }

        let mut text_buffer = self.new_buffer(font_size);
        let attrs = Attrs::new().family(Family::SansSerif);
        text_buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        text_buffer.shape_until_scroll(&mut self.font_system, false);

        let mut width = 0.0f32;
        let mut height = 0.0f32;
        for run in text_buffer.layout_runs() {
            width = width.max(run.line_w);
            height += run.line_height;
        }

        self.text_cache.insert(
            (text.to_string(), font_size_key),
            CachedText {
                width,
                height,
                last_used: current_access,
            },
        );
        self.evict_lru_if_needed();

        (width, height)
    }

    /// Shape `text`, wrapping at `wrap_width`, and split it into visual lines
    ///
    /// Empty text produces no lines at all.
    pub fn layout_text(
        &mut self,
        text: &str,
        font_size: f32,
        wrap_width: Option<f32>,
    ) -> TextBlock {
        let mut lines = Vec::new();
        if text.is_empty() {
            return TextBlock {
                text: String::new(),
                font_size,
                lines,
            };
        }

        let mut text_buffer = self.new_buffer(font_size);
        text_buffer.set_wrap(&mut self.font_system, Wrap::WordOrGlyph);
        text_buffer.set_size(&mut self.font_system, wrap_width, None);
        let attrs = Attrs::new().family(Family::SansSerif);
        text_buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        text_buffer.shape_until_scroll(&mut self.font_system, false);

        let starts = paragraph_starts(text);

        for run in text_buffer.layout_runs() {
            let base = starts.get(run.line_i).copied().unwrap_or(text.len());
            let range = match (
                run.glyphs.iter().map(|g| g.start).min(),
                run.glyphs.iter().map(|g| g.end).max(),
            ) {
                (Some(start), Some(end)) => base + start..base + end,
                _ => base..base,
            };

            let visible = run.glyphs.iter().filter(|g| {
                !run.text
                    .get(g.start..g.end)
                    .is_some_and(|s| s.chars().all(char::is_whitespace))
            });
            let (left, right) = visible.fold((f32::MAX, f32::MIN), |(l, r), g| {
                (l.min(g.x), r.max(g.x + g.w))
            });
            let (left, width) = if left <= right {
                (left, right - left)
            } else {
                (0.0, 0.0)
            };

            lines.push(TextLine {
                range,
                glyphs: run.glyphs.to_vec(),
                baseline: run.line_y,
                width,
                left,
            });
        }

        tracing::debug!(lines = lines.len(), font_size, "laid out text block");
        TextBlock {
            text: text.to_string(),
            font_size,
            lines,
        }
    }

    /// Create a new pixel buffer (RGBA format)
    ///
    /// `None` when either side is zero or above [`MAX_BUFFER_DIMENSION`].
    pub fn create_buffer(width: u32, height: u32) -> Option<Vec<u8>> {
        if width == 0 || height == 0 || width.max(height) > MAX_BUFFER_DIMENSION {
            return None;
        }
        let len = (width as usize).checked_mul(height as usize)?.checked_mul(4)?;
        Some(vec![0u8; len])
    }

    /// Clear a pixel buffer with a color
    pub fn clear(&self, buffer: &mut [u8], width: u32, height: u32, color: Color) {
        if let Some(mut pixmap) = PixmapMut::from_bytes(buffer, width, height) {
            pixmap.fill(color);
        }
    }

    /// Fill every traced line of a silhouette
    pub fn fill_silhouette(
        &self,
        buffer: &mut [u8],
        width: u32,
        height: u32,
        silhouette: &Silhouette,
        color: Color,
    ) {
        let Some(mut pixmap) = PixmapMut::from_bytes(buffer, width, height) else {
            return;
        };
        let Some(path) = silhouette_path(silhouette) else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;

        pixmap.fill_path(
            &path,
            &paint,
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    /// Fill the part of `band` that overlaps `silhouette` with a repeating
    /// horizontal gradient spanning the band width
    ///
    /// Returns `false` when nothing could be drawn (empty band, no overlap).
    pub fn fill_shimmer(
        &self,
        buffer: &mut [u8],
        width: u32,
        height: u32,
        silhouette: &Silhouette,
        band: &ShimmerBand,
        stops: &[(f32, Color)],
    ) -> bool {
        let band_rect = band.bounding_rect();
        if band_rect.is_empty() || silhouette.intersection_bounds(&band_rect).is_none() {
            return false;
        }

        let Some(mut pixmap) = PixmapMut::from_bytes(buffer, width, height) else {
            return false;
        };
        let Some(clip_path) = silhouette_path(silhouette) else {
            return false;
        };
        let Some(band_path) = band_path(band) else {
            return false;
        };
        let Some(mut clip) = Mask::new(width, height) else {
            return false;
        };
        clip.fill_path(&clip_path, FillRule::Winding, true, Transform::identity());

        let Some(shader) = shimmer_gradient(&band_rect, stops) else {
            return false;
        };
        let paint = Paint {
            shader,
            anti_alias: true,
            ..Default::default()
        };

        pixmap.fill_path(
            &band_path,
            &paint,
            FillRule::Winding,
            Transform::identity(),
            Some(&clip),
        );
        true
    }

    /// Draw a laid-out text block, each line placed by `line_x` and the
    /// block top at `top`
    pub fn draw_text_block(
        &mut self,
        buffer: &mut [u8],
        buf_width: u32,
        buf_height: u32,
        block: &TextBlock,
        line_x: impl Fn(&TextLine) -> f32,
        top: f32,
        color: Color,
    ) {
        let Some(mut pixmap) = PixmapMut::from_bytes(buffer, buf_width, buf_height) else {
            return;
        };

        let text_color = CosmicColor::rgba(
            (color.red() * 255.0) as u8,
            (color.green() * 255.0) as u8,
            (color.blue() * 255.0) as u8,
            (color.alpha() * 255.0) as u8,
        );

        for line in block.lines() {
            let origin_x = line_x(line) - line.left;
            let baseline = top + line.baseline;

            for glyph in &line.glyphs {
                let physical_glyph = glyph.physical((origin_x, baseline), 1.0);

                if let Some(image) = self
                    .swash_cache
                    .get_image(&mut self.font_system, physical_glyph.cache_key)
                {
                    let glyph_x = physical_glyph.x + image.placement.left;
                    let glyph_y = physical_glyph.y - image.placement.top;

                    draw_glyph_to_pixmap(
                        &mut pixmap,
                        &image.data,
                        image.placement.width,
                        image.placement.height,
                        glyph_x,
                        glyph_y,
                        text_color,
                    );
                }
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte offset of each paragraph in `text`
///
/// Paragraphs end at `\r\n`, `\n` or a bare `\r`, the same breaks the shaping
/// buffer splits on, so index `i` lines up with a run's `line_i`.
fn paragraph_starts(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut starts = vec![0];
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                i += 1;
                starts.push(i + 1);
            }
            b'\r' | b'\n' => starts.push(i + 1),
            _ => {}
        }
        i += 1;
    }
    starts
}

/// Append a closed rounded rectangle with cubic corner arcs
fn push_rounded_rect(pb: &mut PathBuilder, x: f32, y: f32, w: f32, h: f32, r: f32) {
    let k = r * ARC_KAPPA;

    // Start at top-left, after the corner
    pb.move_to(x + r, y);

    // Top edge and top-right corner
    pb.line_to(x + w - r, y);
    pb.cubic_to(x + w - r + k, y, x + w, y + r - k, x + w, y + r);

    // Right edge and bottom-right corner
    pb.line_to(x + w, y + h - r);
    pb.cubic_to(x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h);

    // Bottom edge and bottom-left corner
    pb.line_to(x + r, y + h);
    pb.cubic_to(x + r - k, y + h, x, y + h - r + k, x, y + h - r);

    // Left edge and top-left corner
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);

    pb.close();
}

/// One path holding every non-empty line of the silhouette
pub fn silhouette_path(silhouette: &Silhouette) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for line in silhouette.lines() {
        let rect = line.rect;
        if rect.is_empty() {
            continue;
        }
        push_rounded_rect(
            &mut pb,
            rect.left,
            rect.top,
            rect.width(),
            rect.height(),
            line.effective_radius(),
        );
    }
    pb.finish()
}

fn band_path(band: &ShimmerBand) -> Option<Path> {
    let [first, rest @ ..] = band.corners();
    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    pb.close();
    pb.finish()
}

/// Horizontal gradient from the band's left edge across its width, tiled
fn shimmer_gradient(band_rect: &TraceRect, stops: &[(f32, Color)]) -> Option<Shader<'static>> {
    let stops = stops
        .iter()
        .map(|&(pos, color)| GradientStop::new(pos, color))
        .collect();
    LinearGradient::new(
        Point::from_xy(band_rect.left, 0.0),
        Point::from_xy(band_rect.right, 0.0),
        stops,
        SpreadMode::Repeat,
        Transform::identity(),
    )
}

/// Draw a glyph image onto a pixmap with alpha blending
fn draw_glyph_to_pixmap(
    pixmap: &mut PixmapMut,
    glyph_data: &[u8],
    glyph_width: u32,
    glyph_height: u32,
    dest_x: i32,
    dest_y: i32,
    color: CosmicColor,
) {
    let pixmap_width = pixmap.width() as i32;
    let pixmap_height = pixmap.height() as i32;
    let data = pixmap.data_mut();

    for gy in 0..glyph_height as i32 {
        let py = dest_y + gy;
        if py < 0 || py >= pixmap_height {
            continue;
        }

        for gx in 0..glyph_width as i32 {
            let px = dest_x + gx;
            if px < 0 || px >= pixmap_width {
                continue;
            }

            let glyph_idx = (gy as u32 * glyph_width + gx as u32) as usize;
            let Some(&alpha) = glyph_data.get(glyph_idx) else {
                continue;
            };
            if alpha == 0 {
                continue;
            }

            let pixel_idx = ((py as u32 * pixmap_width as u32 + px as u32) * 4) as usize;
            if pixel_idx + 3 >= data.len() {
                continue;
            }

            // Source-over onto premultiplied RGBA
            let src_a = (alpha as u32 * color.a() as u32) / 255;
            let inv_a = 255 - src_a;

            data[pixel_idx] =
                ((color.r() as u32 * src_a + data[pixel_idx] as u32 * inv_a) / 255) as u8;
            data[pixel_idx + 1] =
                ((color.g() as u32 * src_a + data[pixel_idx + 1] as u32 * inv_a) / 255) as u8;
            data[pixel_idx + 2] =
                ((color.b() as u32 * src_a + data[pixel_idx + 2] as u32 * inv_a) / 255) as u8;
            data[pixel_idx + 3] = (src_a + (data[pixel_idx + 3] as u32 * inv_a) / 255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shimmer_core::{Rect, RoundedRect, Trace};

    const W: u32 = 240;
    const H: u32 = 80;

    fn two_line_trace() -> Trace {
        let silhouette = Silhouette::from_lines(vec![
            RoundedRect::new(Rect::from_ltrb(2.5, 2.5, 180.0, 30.0), 20.0),
            RoundedRect::new(Rect::from_ltrb(2.5, 36.0, 90.0, 64.0), 20.0),
        ]);
        let band = ShimmerBand::for_bounds(&silhouette.bounds(), 0.33);
        Trace { silhouette, band }
    }

    fn opaque_stops() -> Vec<(f32, Color)> {
        let white = Color::from_rgba8(255, 255, 255, 255);
        let clear = Color::from_rgba8(255, 255, 255, 0);
        vec![(0.0, clear), (0.25, white), (0.75, white), (1.0, clear)]
    }

    fn alpha_at(buffer: &[u8], x: u32, y: u32) -> u8 {
        buffer[((y * W + x) * 4 + 3) as usize]
    }

    #[test]
    fn shimmer_pixels_stay_inside_silhouette() {
        let renderer = Renderer::with_font_system(FontSystem::new_with_fonts(Vec::new()));
        let trace = two_line_trace();

        let mut mask = Mask::new(W, H).unwrap();
        let path = silhouette_path(&trace.silhouette).unwrap();
        mask.fill_path(&path, FillRule::Winding, true, Transform::identity());

        for progress in [0.0, 10.0, 35.0, 50.0, 80.0, 100.0] {
            let mut shimmer = Renderer::create_buffer(W, H).unwrap();
            renderer.fill_shimmer(
                &mut shimmer,
                W,
                H,
                &trace.silhouette,
                &trace.band_at(progress),
                &opaque_stops(),
            );

            for y in 0..H {
                for x in 0..W {
                    if alpha_at(&shimmer, x, y) > 0 {
                        assert!(
                            mask.data()[(y * W + x) as usize] > 0,
                            "shimmer leaked at ({x}, {y}) for progress {progress}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn shimmer_draws_inside_the_band() {
        let renderer = Renderer::with_font_system(FontSystem::new_with_fonts(Vec::new()));
        let trace = two_line_trace();
        let band = trace.band_at(40.0);
        let band_rect = band.bounding_rect();

        let mut shimmer = Renderer::create_buffer(W, H).unwrap();
        assert!(renderer.fill_shimmer(
            &mut shimmer,
            W,
            H,
            &trace.silhouette,
            &band,
            &opaque_stops()
        ));

        // Middle of the band on the first line is fully lit
        let mid_x = ((band_rect.left + band_rect.right) / 2.0) as u32;
        assert!(alpha_at(&shimmer, mid_x, 15) > 200);
        // Nothing left of the band
        assert_eq!(alpha_at(&shimmer, (band_rect.left - 3.0) as u32, 15), 0);
    }

    #[test]
    fn empty_silhouette_draws_nothing() {
        let renderer = Renderer::with_font_system(FontSystem::new_with_fonts(Vec::new()));
        let trace = Trace::default();
        let mut buffer = Renderer::create_buffer(W, H).unwrap();

        renderer.fill_silhouette(&mut buffer, W, H, &trace.silhouette, Color::BLACK);
        let drew = renderer.fill_shimmer(
            &mut buffer,
            W,
            H,
            &trace.silhouette,
            &trace.band_at(50.0),
            &opaque_stops(),
        );
        assert!(!drew);
        assert!(buffer.iter().all(|&b| b == 0));
    }

    #[test]
    fn empty_text_lays_out_no_lines() {
        let mut renderer = Renderer::with_font_system(FontSystem::new_with_fonts(Vec::new()));
        let block = renderer.layout_text("", 24.0, Some(200.0));
        assert!(block.lines().is_empty());

        let mut measured = MeasuredText::new(&mut renderer, &block);
        assert_eq!(measured.line_count(), 0);
        assert_eq!(measured.glyph_width(""), 0.0);
        assert_eq!(measured.font_metrics().line_pitch(), 24.0 * LINE_HEIGHT_FACTOR);
    }

    #[test]
    fn silhouette_fill_respects_corners() {
        let renderer = Renderer::with_font_system(FontSystem::new_with_fonts(Vec::new()));
        let silhouette = Silhouette::from_lines(vec![RoundedRect::new(
            Rect::from_ltrb(10.0, 10.0, 110.0, 60.0),
            20.0,
        )]);
        let mut buffer = Renderer::create_buffer(W, H).unwrap();
        renderer.fill_silhouette(&mut buffer, W, H, &silhouette, Color::BLACK);

        assert_eq!(alpha_at(&buffer, 60, 35), 255);
        assert_eq!(alpha_at(&buffer, 11, 11), 0);
        assert_eq!(alpha_at(&buffer, 108, 58), 0);
    }

    #[test]
    fn paragraph_starts_honor_every_line_ending() {
        assert_eq!(paragraph_starts("Hello"), vec![0]);
        assert_eq!(paragraph_starts("Hello\rWorld"), vec![0, 6]);
        assert_eq!(paragraph_starts("Hello\r\nWorld"), vec![0, 7]);
        assert_eq!(paragraph_starts("a\nb\rc\r\nd"), vec![0, 2, 4, 7]);
    }

    #[test]
    fn carriage_return_line_points_into_its_own_text() {
        let mut renderer = Renderer::with_font_system(FontSystem::new_with_fonts(Vec::new()));
        let block = renderer.layout_text("Hello\rWorld", 24.0, Some(200.0));
        assert_eq!(block.lines().len(), 2);
        let second = &block.lines()[1].range;
        assert_eq!(second.start, 6);
        assert!(second.end <= block.text().len());
    }

    #[test]
    fn oversized_buffers_are_refused() {
        assert!(Renderer::create_buffer(40_000, 40_000).is_none());
        assert!(Renderer::create_buffer(0, 10).is_none());
        assert_eq!(Renderer::create_buffer(3, 2).map(|b| b.len()), Some(24));
    }
}
