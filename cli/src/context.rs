use shimmer_core::{ShimmerConfig, ShimmerConfigExt};
use shimmer_overlay::{Frame, RenderError, ShimmerTextView, colors};

pub const DEFAULT_WIDTH: u32 = 320;
pub const DEFAULT_HEIGHT: u32 = 80;
const DEFAULT_TEXT: &str = "Loading content";

/// Holds all state for the CLI session.
/// Owned by the REPL loop; ticks and draws happen on the same thread.
pub struct CliContext {
    pub view: ShimmerTextView,
    pub frame: Frame,
}

impl CliContext {
    pub fn new() -> Result<Self, RenderError> {
        let config = match ShimmerConfig::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load config, using defaults");
                ShimmerConfig::default()
            }
        };
        let mut frame = Frame::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)?;
        frame.set_background(colors::white());
        Ok(Self::with_parts(config, frame))
    }

    pub fn with_parts(config: ShimmerConfig, frame: Frame) -> Self {
        let mut view = ShimmerTextView::new(config);
        view.set_text(DEFAULT_TEXT);
        Self { view, frame }
    }
}
