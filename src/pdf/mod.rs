//! pdf-writer backend for [`DrawingSurface`].

mod image;

use pdf_writer::types::{ActionType, AnnotationType};
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::fonts::{FONT_BASE_NAME, FONT_RESOURCE, Helvetica, to_winansi_bytes};
use crate::logo::DecodedImage;
use crate::surface::{DrawingSurface, Region, Rgb, SurfaceError, TextMeasure};

struct PageBuf {
    content: Content,
    links: Vec<(Rect, usize)>,
    /// Colour last written to the content stream's fill state.
    stream_fill: Option<Rgb>,
}

pub struct PdfSurface {
    pdf: Pdf,
    next_id: i32,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    page_width: f32,
    page_height: f32,
    metrics: Helvetica,
    pages: Vec<PageBuf>,
    image_xobjects: Vec<(String, Ref)>,
    bookmarks: Vec<(String, usize)>,
    fill: Rgb,
    text: Rgb,
}

fn check(values: &[f32], what: &'static str) -> Result<(), SurfaceError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SurfaceError::InvalidCoordinate(what))
    }
}

impl PdfSurface {
    pub fn new(page_width: f32, page_height: f32) -> Self {
        let mut surface = PdfSurface {
            pdf: Pdf::new(),
            next_id: 1,
            catalog_id: Ref::new(1),
            pages_id: Ref::new(1),
            font_id: Ref::new(1),
            page_width,
            page_height,
            metrics: Helvetica::default(),
            pages: Vec::new(),
            image_xobjects: Vec::new(),
            bookmarks: Vec::new(),
            fill: Rgb::BLACK,
            text: Rgb::BLACK,
        };
        surface.catalog_id = surface.alloc();
        surface.pages_id = surface.alloc();
        surface.font_id = surface.alloc();
        surface
    }

    fn alloc(&mut self) -> Ref {
        let r = Ref::new(self.next_id);
        self.next_id += 1;
        r
    }

    fn current(&mut self) -> Result<&mut PageBuf, SurfaceError> {
        self.pages.last_mut().ok_or(SurfaceError::NoPage)
    }

    /// Top-down logical Y to PDF user space.
    fn flip(&self, y: f32) -> f32 {
        self.page_height - y
    }

    fn pdf_rect(&self, r: Region) -> Rect {
        Rect::new(r.x, self.flip(r.bottom()), r.right(), self.flip(r.y))
    }

    fn apply_fill(page: &mut PageBuf, color: Rgb) {
        if page.stream_fill != Some(color) {
            let (r, g, b) = color.to_unit();
            page.content.set_fill_rgb(r, g, b);
            page.stream_fill = Some(color);
        }
    }
}

impl TextMeasure for PdfSurface {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        self.metrics.text_width(text, font_size)
    }
}

impl DrawingSurface for PdfSurface {
    fn start_page(&mut self) -> usize {
        self.pages.push(PageBuf {
            content: Content::new(),
            links: Vec::new(),
            stream_fill: None,
        });
        self.pages.len() - 1
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.fill = color;
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.text = color;
    }

    fn fill_rect(&mut self, rect: Region) -> Result<(), SurfaceError> {
        check(&[rect.x, rect.y, rect.width, rect.height], "fill_rect")?;
        let y = self.flip(rect.bottom());
        let color = self.fill;
        let page = self.current()?;
        Self::apply_fill(page, color);
        page.content
            .rect(rect.x, y, rect.width, rect.height)
            .fill_nonzero();
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_size: f32) -> Result<(), SurfaceError> {
        check(&[x, y, font_size], "draw_text")?;
        let bytes = to_winansi_bytes(text);
        if bytes.is_empty() {
            return Ok(());
        }
        let baseline = self.flip(y);
        let color = self.text;
        let page = self.current()?;
        Self::apply_fill(page, color);
        page.content
            .begin_text()
            .set_font(Name(FONT_RESOURCE), font_size)
            .next_line(x, baseline)
            .show(Str(&bytes))
            .end_text();
        Ok(())
    }

    fn draw_image(&mut self, image: &DecodedImage, rect: Region) -> Result<(), SurfaceError> {
        check(&[rect.x, rect.y, rect.width, rect.height], "draw_image")?;
        if self.pages.is_empty() {
            return Err(SurfaceError::NoPage);
        }
        let xobj_ref = {
            let next_id = &mut self.next_id;
            let mut alloc = || {
                let r = Ref::new(*next_id);
                *next_id += 1;
                r
            };
            self::image::embed(&mut self.pdf, image, &mut alloc)
        };
        let pdf_name = format!("Im{}", self.image_xobjects.len() + 1);
        self.image_xobjects.push((pdf_name.clone(), xobj_ref));

        let y = self.flip(rect.bottom());
        let page = self.current()?;
        page.content.save_state();
        page.content
            .transform([rect.width, 0.0, 0.0, rect.height, rect.x, y]);
        page.content.x_object(Name(pdf_name.as_bytes()));
        page.content.restore_state();
        Ok(())
    }

    fn add_link(&mut self, rect: Region, target_page: usize) -> Result<(), SurfaceError> {
        check(&[rect.x, rect.y, rect.width, rect.height], "add_link")?;
        let pdf_rect = self.pdf_rect(rect);
        self.current()?.links.push((pdf_rect, target_page));
        Ok(())
    }

    fn add_bookmark(&mut self, title: &str, target_page: usize) {
        self.bookmarks.push((title.to_string(), target_page));
    }

    fn finalize(mut self) -> Result<Vec<u8>, SurfaceError> {
        let n = self.pages.len();
        for (page, buf) in self.pages.iter().enumerate() {
            if let Some(&(_, target)) = buf.links.iter().find(|(_, t)| *t >= n) {
                return Err(SurfaceError::InvalidLinkTarget {
                    page,
                    target,
                    count: n,
                });
            }
        }
        if let Some((_, target)) = self.bookmarks.iter().find(|(_, t)| *t >= n) {
            return Err(SurfaceError::InvalidLinkTarget {
                page: 0,
                target: *target,
                count: n,
            });
        }

        let page_ids: Vec<Ref> = (0..n).map(|_| self.alloc()).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| self.alloc()).collect();
        let top = self.page_height;

        let mut page_annot_refs: Vec<Vec<Ref>> = Vec::with_capacity(n);
        for i in 0..n {
            let links = std::mem::take(&mut self.pages[i].links);
            let mut refs = Vec::with_capacity(links.len());
            for (rect, target) in links {
                let annot_ref = self.alloc();
                let mut annot = self.pdf.annotation(annot_ref);
                annot
                    .subtype(AnnotationType::Link)
                    .rect(rect)
                    .border(0.0, 0.0, 0.0, None);
                annot
                    .action()
                    .action_type(ActionType::GoTo)
                    .destination()
                    .page(page_ids[target])
                    .xyz(0.0, top, None);
                refs.push(annot_ref);
            }
            page_annot_refs.push(refs);
        }

        let outline_id = if self.bookmarks.is_empty() {
            None
        } else {
            let outline_id = self.alloc();
            let item_ids: Vec<Ref> = (0..self.bookmarks.len()).map(|_| self.alloc()).collect();
            for (i, (title, target)) in self.bookmarks.iter().enumerate() {
                let mut item = self.pdf.outline_item(item_ids[i]);
                item.title(TextStr(title)).parent(outline_id);
                if i > 0 {
                    item.prev(item_ids[i - 1]);
                }
                if i + 1 < item_ids.len() {
                    item.next(item_ids[i + 1]);
                }
                item.dest().page(page_ids[*target]).xyz(0.0, top, None);
            }
            self.pdf
                .outline(outline_id)
                .first(item_ids[0])
                .last(item_ids[item_ids.len() - 1])
                .count(item_ids.len() as i32);
            Some(outline_id)
        };

        for (i, page) in std::mem::take(&mut self.pages).into_iter().enumerate() {
            let raw = page.content.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            self.pdf
                .stream(content_ids[i], &compressed)
                .filter(Filter::FlateDecode);
        }

        {
            let mut catalog = self.pdf.catalog(self.catalog_id);
            catalog.pages(self.pages_id);
            if let Some(outline_id) = outline_id {
                catalog.outlines(outline_id);
            }
        }
        self.pdf
            .pages(self.pages_id)
            .kids(page_ids.iter().copied())
            .count(n as i32);

        self.pdf
            .type1_font(self.font_id)
            .base_font(Name(FONT_BASE_NAME))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        for i in 0..n {
            let mut page = self.pdf.page(page_ids[i]);
            page.media_box(Rect::new(0.0, 0.0, self.page_width, self.page_height))
                .parent(self.pages_id)
                .contents(content_ids[i]);
            if !page_annot_refs[i].is_empty() {
                page.annotations(page_annot_refs[i].iter().copied());
            }
            let mut resources = page.resources();
            resources.fonts().pair(Name(FONT_RESOURCE), self.font_id);
            if !self.image_xobjects.is_empty() {
                let mut xobjects = resources.x_objects();
                for (name, xobj_ref) in &self.image_xobjects {
                    xobjects.pair(Name(name.as_bytes()), *xobj_ref);
                }
            }
        }

        Ok(self.pdf.finish())
    }
}
