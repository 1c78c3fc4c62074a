//! Widgets that render into a [`Frame`](crate::frame::Frame)
//!
//! # Available Widgets
//!
//! - [`ShimmerTextView`] - Text view with a traced silhouette and shimmer sweep

pub mod colors;
mod shimmer_text;

pub use shimmer_text::ShimmerTextView;
