//! Text view that can trace its own silhouette and sweep a shimmer over it
//!
//! Idle, the view renders its text with gravity applied. While shimmering,
//! the glyphs are replaced by rounded "skeleton" rectangles in the trace
//! color, with a gradient band sweeping left to right across them.
use std::time::{Duration, Instant};

use shimmer_core::colors::with_alpha;
use shimmer_core::{
    AnimationError, AnimationState, ColorError, Easing, Rect, ShimmerAnimator, ShimmerBand,
    ShimmerConfigExt, Silhouette, Trace, TraceParams, block_offset_y,
    line_offset_x, resolve_color, trace,
};
use shimmer_types::{Gravity, LayoutDirection, ShimmerConfig};
use tiny_skia::Color;

use crate::frame::Frame;
use crate::renderer::{MeasuredText, Renderer, TextBlock};
use crate::utils::color_from_rgba;

/// Gradient stop positions across the band
const STOP_POSITIONS: [f32; 4] = [0.0, 0.25, 0.75, 1.0];

#[derive(Debug)]
pub struct ShimmerTextView {
    config: ShimmerConfig,
    text: String,
    /// View size from the last layout pass
    size: Option<(f32, f32)>,
    block: Option<TextBlock>,
    trace: Trace,
    /// Geometry inputs changed since the last trace
    trace_stale: bool,
    animator: ShimmerAnimator,
    needs_render: bool,
}

impl ShimmerTextView {
    pub fn new(config: ShimmerConfig) -> Self {
        Self {
            config,
            text: String::new(),
            size: None,
            block: None,
            trace: Trace::default(),
            trace_stale: true,
            animator: ShimmerAnimator::new(Easing::default()),
            needs_render: true,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Content & style
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the text. The silhouette is recomputed at the next layout.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.invalidate_trace();
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_trace_color(&mut self, color: [u8; 4]) {
        self.config.trace_color = color;
        self.needs_render = true;
    }

    pub fn set_shimmer_color(&mut self, color: [u8; 4]) {
        self.config.shimmer_color = color;
        self.needs_render = true;
    }

    /// Set the trace color from a name or hex reference
    pub fn set_trace_color_ref(&mut self, reference: &str) -> Result<(), ColorError> {
        self.set_trace_color(resolve_color(reference)?);
        Ok(())
    }

    /// Set the shimmer color from a name or hex reference
    pub fn set_shimmer_color_ref(&mut self, reference: &str) -> Result<(), ColorError> {
        self.set_shimmer_color(resolve_color(reference)?);
        Ok(())
    }

    pub fn set_text_color(&mut self, color: [u8; 4]) {
        self.config.text_color = color;
        self.needs_render = true;
    }

    pub fn set_gravity(&mut self, gravity: Gravity) {
        if gravity != self.config.gravity {
            self.config.gravity = gravity;
            self.invalidate_trace();
        }
    }

    pub fn set_layout_direction(&mut self, direction: LayoutDirection) {
        if direction != self.config.layout_direction {
            self.config.layout_direction = direction;
            self.invalidate_trace();
        }
    }

    pub fn set_font_size(&mut self, font_size: f32) {
        if font_size > 0.0 && font_size != self.config.font_size {
            self.config.font_size = font_size;
            self.block = None;
            self.invalidate_trace();
        }
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.animator.set_easing(easing);
    }

    pub fn config(&self) -> &ShimmerConfig {
        &self.config
    }

    fn invalidate_trace(&mut self) {
        self.trace_stale = true;
        self.needs_render = true;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Layout
    // ─────────────────────────────────────────────────────────────────────────

    /// Measure pass: shape the text for the view size and retrace the
    /// silhouette if anything it depends on changed
    pub fn layout(&mut self, renderer: &mut Renderer, width: f32, height: f32) {
        if self.size != Some((width, height)) {
            self.size = Some((width, height));
            self.block = None;
            self.trace_stale = true;
        }

        let block_current = self
            .block
            .as_ref()
            .is_some_and(|b| b.text() == self.text && b.font_size() == self.config.font_size);
        if !block_current {
            self.block = Some(renderer.layout_text(
                &self.text,
                self.config.font_size,
                Some(width),
            ));
            self.trace_stale = true;
        }

        if self.trace_stale {
            if let Some(block) = &self.block {
                let params = TraceParams::from_config(&self.config, width, height);
                let mut measured = MeasuredText::new(renderer, block);
                self.trace = trace(&mut measured, &params);
            }
            self.trace_stale = false;
            self.needs_render = true;
        }
    }

    pub fn silhouette(&self) -> &Silhouette {
        &self.trace.silhouette
    }

    pub fn bounds(&self) -> Rect {
        self.trace.bounds()
    }

    /// The untranslated band
    pub fn band(&self) -> &ShimmerBand {
        &self.trace.band
    }

    /// The band where it sits at the current progress
    pub fn current_band(&self) -> ShimmerBand {
        self.trace.band_at(self.animator.progress())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Animation
    // ─────────────────────────────────────────────────────────────────────────

    /// Start (or restart) the sweep with the configured period
    pub fn start_shimmer(&mut self) -> Result<(), AnimationError> {
        self.start_shimmer_with_period(self.config.period())
    }

    pub fn start_shimmer_with_period(&mut self, period: Duration) -> Result<(), AnimationError> {
        self.start_shimmer_at(period, Instant::now())
    }

    pub fn start_shimmer_at(
        &mut self,
        period: Duration,
        now: Instant,
    ) -> Result<(), AnimationError> {
        self.animator.start_at(period, now)?;
        self.needs_render = true;
        Ok(())
    }

    /// Stop the sweep, reset progress and go back to plain text
    pub fn stop_shimmer(&mut self) {
        self.animator.stop();
        self.needs_render = true;
    }

    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Host frame tick. Returns `true` when the view wants a redraw.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        if self.animator.tick_at(now) {
            self.needs_render = true;
        }
        self.needs_render
    }

    pub fn progress(&self) -> f32 {
        self.animator.progress()
    }

    pub fn animation_state(&self) -> &AnimationState {
        self.animator.state()
    }

    pub fn is_shimmering(&self) -> bool {
        self.animator.is_running()
    }

    /// Clear and return the redraw request
    pub fn take_needs_render(&mut self) -> bool {
        std::mem::take(&mut self.needs_render)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Drawing
    // ─────────────────────────────────────────────────────────────────────────

    /// Gradient stops for the band: transparent, shimmer, shimmer, transparent
    pub fn shimmer_stops(&self) -> [(f32, Color); 4] {
        let shimmer = self.config.shimmer_color;
        let edge = color_from_rgba(with_alpha(shimmer, 0));
        let core = color_from_rgba(with_alpha(shimmer, self.config.shimmer_alpha));
        [
            (STOP_POSITIONS[0], edge),
            (STOP_POSITIONS[1], core),
            (STOP_POSITIONS[2], core),
            (STOP_POSITIONS[3], edge),
        ]
    }

    /// Lay out against the frame size and draw into it
    pub fn render(&mut self, frame: &mut Frame) {
        let (width, height) = (frame.width() as f32, frame.height() as f32);
        self.layout(frame.renderer_mut(), width, height);
        frame.begin_frame();
        self.draw(frame);
        self.needs_render = false;
    }

    /// Draw the current state. Call after [`layout`](Self::layout).
    pub fn draw(&self, frame: &mut Frame) {
        if self.animator.is_running() {
            frame.fill_silhouette(&self.trace.silhouette, color_from_rgba(self.config.trace_color));
            let band = self.current_band();
            let stops = self.shimmer_stops();
            frame.fill_shimmer(&self.trace.silhouette, &band, &stops);
        } else {
            self.draw_text(frame);
        }
    }

    fn draw_text(&self, frame: &mut Frame) {
        let Some(block) = &self.block else {
            return;
        };
        let (width, height) = self.size.unwrap_or((frame.width() as f32, frame.height() as f32));
        let horizontal = self
            .config
            .gravity
            .horizontal
            .resolve(self.config.layout_direction);
        let block_height = block.line_height() * block.lines().len() as f32;
        let top = block_offset_y(self.config.gravity.vertical, height, block_height);

        frame.draw_text_block(
            block,
            |line| line_offset_x(horizontal, width, line.width),
            top,
            color_from_rgba(self.config.text_color),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmic_text::FontSystem;
    use shimmer_core::RoundedRect;
    use shimmer_types::{HorizontalGravity, VerticalGravity, palette};

    fn frame() -> Frame {
        let renderer = Renderer::with_font_system(FontSystem::new_with_fonts(Vec::new()));
        Frame::with_renderer(renderer, 200, 50).unwrap()
    }

    fn view(text: &str) -> ShimmerTextView {
        let mut view = ShimmerTextView::new(ShimmerConfig::default());
        view.set_text(text);
        view
    }

    #[test]
    fn set_text_defers_trace_until_layout() {
        let mut f = frame();
        let mut v = view("Hi");
        v.render(&mut f);
        let before = v.bounds();

        v.set_text("Hi\nthere");
        assert!(v.take_needs_render());
        // Untouched until the next measure pass
        assert_eq!(v.bounds(), before);

        v.render(&mut f);
        assert_eq!(v.silhouette().lines().len(), 2);
    }

    #[test]
    fn layout_is_idempotent() {
        let mut f = frame();
        let mut v = view("Loading content");
        v.layout(f.renderer_mut(), 200.0, 50.0);
        let first = v.bounds();
        v.take_needs_render();

        v.layout(f.renderer_mut(), 200.0, 50.0);
        assert_eq!(v.bounds(), first);
        assert!(!v.take_needs_render());
    }

    #[test]
    fn color_change_mid_sweep_keeps_progress_and_bounds() {
        let mut f = frame();
        let mut v = view("Hi");
        v.render(&mut f);

        let t0 = Instant::now();
        v.start_shimmer_at(Duration::from_millis(1000), t0).unwrap();
        v.tick_at(t0 + Duration::from_millis(300));
        let progress = v.progress();
        let bounds = v.bounds();
        let stops = v.shimmer_stops();

        v.set_shimmer_color(palette::RED);
        assert!(v.take_needs_render());
        assert_eq!(v.progress(), progress);
        assert_eq!(v.bounds(), bounds);
        assert_ne!(v.shimmer_stops(), stops);
        assert_eq!(v.shimmer_stops()[1].1, Color::from_rgba8(255, 0, 0, 0x40));
    }

    #[test]
    fn stops_fade_to_transparent_at_edges() {
        let v = view("Hi");
        let stops = v.shimmer_stops();
        assert_eq!(stops.map(|(pos, _)| pos), STOP_POSITIONS);
        assert_eq!(stops[0].1.alpha(), 0.0);
        assert_eq!(stops[3].1.alpha(), 0.0);
        assert_eq!(stops[1].1, stops[2].1);
    }

    #[test]
    fn stop_returns_to_idle() {
        let mut v = view("Hi");
        let t0 = Instant::now();
        v.start_shimmer_at(Duration::from_millis(500), t0).unwrap();
        assert!(v.is_shimmering());
        v.tick_at(t0 + Duration::from_millis(200));

        v.stop_shimmer();
        assert_eq!(v.animation_state(), &AnimationState::Idle);
        assert_eq!(v.progress(), 0.0);
        // Stale ticks after stop change nothing
        v.take_needs_render();
        assert!(!v.tick_at(t0 + Duration::from_millis(400)));
        assert_eq!(v.progress(), 0.0);
    }

    #[test]
    fn stop_always_requests_redraw() {
        let mut v = view("Hi");
        v.take_needs_render();
        v.stop_shimmer();
        assert!(v.take_needs_render());
    }

    #[test]
    fn running_draw_paints_trace_under_the_band() {
        let mut f = frame();
        let mut v = view("Hi");
        let silhouette = Silhouette::from_lines(vec![
            RoundedRect::new(Rect::from_ltrb(2.5, 2.5, 180.0, 22.0), 20.0),
            RoundedRect::new(Rect::from_ltrb(2.5, 26.0, 90.0, 46.0), 20.0),
        ]);
        let band = ShimmerBand::for_bounds(&silhouette.bounds(), 0.33);
        v.trace = Trace { silhouette, band };

        v.start_shimmer_at(Duration::from_millis(1000), Instant::now()).unwrap();
        f.begin_frame();
        v.draw(&mut f);

        // Band sits at the left edge at progress 0 and spans x 2.5..61
        assert_eq!(f.pixel(120, 12), Some([170, 170, 170, 255]));
        let lit = f.pixel(40, 12).unwrap();
        assert!(lit[0] > 170, "band should lighten the trace, got {lit:?}");
        assert_eq!(lit[3], 255);
        // Outside every line nothing is painted
        assert_eq!(f.pixel(150, 36).map(|p| p[3]), Some(0));

        v.stop_shimmer();
        f.begin_frame();
        v.draw(&mut f);
        assert_eq!(f.pixel(120, 12).map(|p| p[3]), Some(0));
        assert_eq!(f.pixel(40, 12).map(|p| p[3]), Some(0));
    }

    #[test]
    fn zero_period_is_rejected() {
        let mut v = view("Hi");
        assert!(matches!(
            v.start_shimmer_with_period(Duration::ZERO),
            Err(AnimationError::InvalidPeriod { .. })
        ));
        assert!(!v.is_shimmering());
    }

    #[test]
    fn empty_text_draws_nothing() {
        let mut f = frame();
        let mut v = view("");
        v.start_shimmer().unwrap();
        v.render(&mut f);

        assert!(v.silhouette().is_empty());
        assert!(f.to_rgba().chunks(4).all(|p| p[3] == 0));
    }

    #[test]
    fn geometry_setters_mark_trace_stale() {
        let mut f = frame();
        let mut v = view("Hi");
        v.render(&mut f);
        assert!(!v.take_needs_render());

        v.set_gravity(Gravity::new(HorizontalGravity::Center, VerticalGravity::Center));
        assert!(v.take_needs_render());
        v.set_layout_direction(LayoutDirection::Rtl);
        assert!(v.take_needs_render());
        v.set_font_size(32.0);
        assert!(v.take_needs_render());

        // Same values again are no-ops
        v.set_font_size(32.0);
        v.set_layout_direction(LayoutDirection::Rtl);
        assert!(!v.take_needs_render());
    }

    #[test]
    fn unknown_color_reference_is_reported() {
        let mut v = view("Hi");
        assert!(v.set_trace_color_ref("#12").is_err());
        assert_eq!(v.config().trace_color, palette::DARKER_GRAY);
        v.set_trace_color_ref("gray").unwrap();
        assert_eq!(v.config().trace_color, palette::GRAY);
    }
}
