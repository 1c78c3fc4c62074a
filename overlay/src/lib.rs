//! Shimmer Overlay Library
//!
//! CPU rendering of shimmer text views into RGBA frames.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    widgets/                         │
//! │                 ShimmerTextView                     │
//! │     (text, silhouette trace, shimmer animation)     │
//! ├─────────────────────────────────────────────────────┤
//! │                    frame                            │
//! │                    Frame                            │
//! │          (renderer + pixel buffer + PNG)            │
//! ├─────────────────────────────────────────────────────┤
//! │                    renderer                         │
//! │            tiny-skia + cosmic-text                  │
//! │              (drawing primitives)                   │
//! ├─────────────────────────────────────────────────────┤
//! │                  shimmer-core                       │
//! │       trace geometry, animator, color resolver      │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod frame;
pub mod renderer;
pub mod utils;
pub mod widgets;

// Re-export commonly used types
pub use error::RenderError;
pub use frame::Frame;
pub use renderer::{MeasuredText, Renderer, TextBlock, TextLine};
pub use widgets::{ShimmerTextView, colors};

// Re-export tiny_skia Color for external use
pub use tiny_skia::Color;
