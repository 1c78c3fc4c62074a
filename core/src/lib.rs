pub mod animation;
pub mod colors;
pub mod config;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod trace;

// Re-exports for convenience
pub use animation::{AnimationState, RunningShimmer, ShimmerAnimator, progress_at};
pub use colors::resolve_color;
pub use config::{ShimmerConfig, ShimmerConfigExt};
pub use easing::Easing;
pub use error::{AnimationError, ColorError, ConfigError};
pub use geometry::{Point, Rect, RoundedRect};
pub use trace::{
    FontMetrics, LineLayout, ShimmerBand, Silhouette, Trace, TraceParams, block_offset_y,
    line_offset_x, trace,
};
