//! The drawing surface the renderer paints onto.
//!
//! Coordinates are in logical page units with the origin at the top-left
//! corner and Y growing downward. Text is positioned by its baseline.
//! Backends flip to their own coordinate system.

use thiserror::Error;

use crate::fonts::Helvetica;
use crate::logo::DecodedImage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    pub(crate) fn to_unit(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

/// Axis-aligned rectangle, top-left anchored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Region {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    pub fn intersects(&self, other: &Region) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("no page has been started")]
    NoPage,
    #[error("invalid coordinate in {0}")]
    InvalidCoordinate(&'static str),
    #[error("link on page {page} targets page {target}, document has {count} pages")]
    InvalidLinkTarget {
        page: usize,
        target: usize,
        count: usize,
    },
    #[error("image: {0}")]
    Image(String),
}

pub trait TextMeasure {
    fn text_width(&self, text: &str, font_size: f32) -> f32;

    /// Greedy word wrap. A word wider than `max_width` sits alone on its
    /// line rather than being broken. Always returns at least one line.
    fn wrap_text(&self, text: &str, font_size: f32, max_width: f32) -> Vec<String> {
        let space_w = self.text_width(" ", font_size);
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_w = 0.0f32;

        for word in text.split_whitespace() {
            let ww = self.text_width(word, font_size);
            if !current.is_empty() && current_w + space_w + ww > max_width {
                lines.push(std::mem::take(&mut current));
                current_w = 0.0;
            }
            if !current.is_empty() {
                current.push(' ');
                current_w += space_w;
            }
            current.push_str(word);
            current_w += ww;
        }

        if !current.is_empty() || lines.is_empty() {
            lines.push(current);
        }
        lines
    }
}

/// Capability set the renderer needs from a paged canvas.
pub trait DrawingSurface: TextMeasure {
    /// Starts a new page and returns its zero-based index.
    fn start_page(&mut self) -> usize;

    fn page_count(&self) -> usize;

    fn set_fill_color(&mut self, color: Rgb);

    fn set_text_color(&mut self, color: Rgb);

    fn fill_rect(&mut self, rect: Region) -> Result<(), SurfaceError>;

    /// Draws a single line of text with its baseline at `y`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_size: f32) -> Result<(), SurfaceError>;

    fn draw_image(&mut self, image: &DecodedImage, rect: Region) -> Result<(), SurfaceError>;

    /// Registers a clickable region on the current page that jumps to
    /// `target_page`. Targets are checked when the document is finalized,
    /// so links may point at pages that do not exist yet.
    fn add_link(&mut self, rect: Region, target_page: usize) -> Result<(), SurfaceError>;

    /// Adds a document outline entry for `target_page`.
    fn add_bookmark(&mut self, title: &str, target_page: usize);

    fn finalize(self) -> Result<Vec<u8>, SurfaceError>
    where
        Self: Sized;
}

/// One recorded drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillRect { rect: Region, color: Rgb },
    Text { text: String, x: f32, y: f32, font_size: f32, color: Rgb },
    Image { rect: Region, width_px: u32, height_px: u32 },
    Link { rect: Region, target_page: usize },
}

#[derive(Clone, Debug, Default)]
pub struct RecordedPage {
    pub ops: Vec<DrawOp>,
}

impl RecordedPage {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn links(&self) -> impl Iterator<Item = (&Region, usize)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Link { rect, target_page } => Some((rect, *target_page)),
            _ => None,
        })
    }

    pub fn has_image(&self) -> bool {
        self.ops.iter().any(|op| matches!(op, DrawOp::Image { .. }))
    }
}

/// In-memory surface that logs every operation per page. Measures text
/// with the same metrics as the PDF backend.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    metrics: Helvetica,
    pages: Vec<RecordedPage>,
    bookmarks: Vec<(String, usize)>,
    fill: Option<Rgb>,
    text: Option<Rgb>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[RecordedPage] {
        &self.pages
    }

    pub fn bookmarks(&self) -> &[(String, usize)] {
        &self.bookmarks
    }

    fn current(&mut self) -> Result<&mut RecordedPage, SurfaceError> {
        self.pages.last_mut().ok_or(SurfaceError::NoPage)
    }
}

impl TextMeasure for RecordingSurface {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        self.metrics.text_width(text, font_size)
    }
}

impl DrawingSurface for RecordingSurface {
    fn start_page(&mut self) -> usize {
        self.pages.push(RecordedPage::default());
        self.pages.len() - 1
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.fill = Some(color);
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.text = Some(color);
    }

    fn fill_rect(&mut self, rect: Region) -> Result<(), SurfaceError> {
        if !rect.is_finite() {
            return Err(SurfaceError::InvalidCoordinate("fill_rect"));
        }
        let color = self.fill.unwrap_or(Rgb::BLACK);
        self.current()?.ops.push(DrawOp::FillRect { rect, color });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_size: f32) -> Result<(), SurfaceError> {
        if !(x.is_finite() && y.is_finite() && font_size.is_finite()) {
            return Err(SurfaceError::InvalidCoordinate("draw_text"));
        }
        let color = self.text.unwrap_or(Rgb::BLACK);
        self.current()?.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            font_size,
            color,
        });
        Ok(())
    }

    fn draw_image(&mut self, image: &DecodedImage, rect: Region) -> Result<(), SurfaceError> {
        if !rect.is_finite() {
            return Err(SurfaceError::InvalidCoordinate("draw_image"));
        }
        self.current()?.ops.push(DrawOp::Image {
            rect,
            width_px: image.width,
            height_px: image.height,
        });
        Ok(())
    }

    fn add_link(&mut self, rect: Region, target_page: usize) -> Result<(), SurfaceError> {
        if !rect.is_finite() {
            return Err(SurfaceError::InvalidCoordinate("add_link"));
        }
        self.current()?.ops.push(DrawOp::Link { rect, target_page });
        Ok(())
    }

    fn add_bookmark(&mut self, title: &str, target_page: usize) {
        self.bookmarks.push((title.to_string(), target_page));
    }

    fn finalize(self) -> Result<Vec<u8>, SurfaceError> {
        let count = self.pages.len();
        for (page, recorded) in self.pages.iter().enumerate() {
            if let Some((_, target)) = recorded.links().find(|(_, t)| *t >= count) {
                return Err(SurfaceError::InvalidLinkTarget {
                    page,
                    target,
                    count,
                });
            }
        }
        Ok(Vec::new())
    }
}
