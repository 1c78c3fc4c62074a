//! Frame abstraction
//!
//! `Frame` owns an RGBA pixel buffer and the renderer that draws into it.
//! Widgets draw through the frame's helpers; the host decides what to do
//! with the finished pixels (blit them to a window, or export PNG).

use std::path::Path;

use shimmer_core::{ShimmerBand, Silhouette};
use tiny_skia::{Color, PixmapRef};

use crate::error::RenderError;
use crate::renderer::{Renderer, TextBlock, TextLine};
use crate::widgets::colors;

/// A drawable RGBA surface
pub struct Frame {
    renderer: Renderer,
    buffer: Vec<u8>,
    width: u32,
    height: u32,
    background: Color,
}

impl Frame {
    /// Create a frame with a system-font renderer
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        Self::with_renderer(Renderer::new(), width, height)
    }

    pub fn with_renderer(renderer: Renderer, width: u32, height: u32) -> Result<Self, RenderError> {
        Ok(Self {
            renderer,
            buffer: allocate(width, height)?,
            width,
            height,
            background: colors::transparent(),
        })
    }

    /// Set the color `begin_frame` clears to
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Resize, discarding current contents
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if (width, height) != (self.width, self.height) {
            self.buffer = allocate(width, height)?;
            self.width = width;
            self.height = height;
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Frame rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Begin a new frame: clear to the background color
    pub fn begin_frame(&mut self) {
        self.renderer
            .clear(&mut self.buffer, self.width, self.height, self.background);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Drawing helpers (delegate to renderer)
    // ─────────────────────────────────────────────────────────────────────────

    pub fn draw_text_block(
        &mut self,
        block: &TextBlock,
        line_x: impl Fn(&TextLine) -> f32,
        top: f32,
        color: Color,
    ) {
        self.renderer.draw_text_block(
            &mut self.buffer,
            self.width,
            self.height,
            block,
            line_x,
            top,
            color,
        );
    }

    pub fn fill_silhouette(&mut self, silhouette: &Silhouette, color: Color) {
        self.renderer
            .fill_silhouette(&mut self.buffer, self.width, self.height, silhouette, color);
    }

    pub fn fill_shimmer(
        &mut self,
        silhouette: &Silhouette,
        band: &ShimmerBand,
        stops: &[(f32, Color)],
    ) -> bool {
        self.renderer.fill_shimmer(
            &mut self.buffer,
            self.width,
            self.height,
            silhouette,
            band,
            stops,
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pixel access
    // ─────────────────────────────────────────────────────────────────────────

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// Raw premultiplied RGBA bytes
    pub fn pixels(&self) -> &[u8] {
        &self.buffer
    }

    /// Straight-alpha RGBA of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let pixmap = PixmapRef::from_bytes(&self.buffer, self.width, self.height)?;
        let c = pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Straight-alpha RGBA bytes, the layout PNG expects
    pub fn to_rgba(&self) -> Vec<u8> {
        let Some(pixmap) = PixmapRef::from_bytes(&self.buffer, self.width, self.height) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(self.buffer.len());
        for p in pixmap.pixels() {
            let c = p.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        out
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.to_rgba())?;
        }
        Ok(out)
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        let data = self.encode_png()?;
        std::fs::write(path, data).map_err(|source| RenderError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "frame written");
        Ok(())
    }
}

fn allocate(width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
    Renderer::create_buffer(width, height).ok_or(RenderError::InvalidSize { width, height })
}
