//! Pagination: turns sections into physical pages with placed text blocks.

mod flow;
pub mod paragraph;

use crate::error::Error;
use crate::model::{LayoutKind, ReportModel, SectionId};
use crate::nav::{FRONT_PAGES, PageIndexBinding};
use crate::surface::TextMeasure;

pub use paragraph::{BULLET, ParagraphKind, ParagraphStyle, classify};

/// Every layout constant, in logical page units (1 unit = 1pt in the PDF).
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,

    pub header_height: f32,
    pub header_title_y: f32,
    pub header_title_size: f32,
    pub jump_menu_rows_y: [f32; 2],
    pub jump_menu_size: f32,
    pub jump_menu_min_size: f32,
    pub jump_menu_item_gap: f32,

    pub margin_left: f32,
    pub margin_right: f32,
    pub content_start_y: f32,
    /// A column whose cursor is past this Y takes no more paragraphs on the page.
    pub overflow_threshold_y: f32,
    pub column_gap: f32,
    /// Left cursor lead (over the right) that forces the next paragraph right.
    pub rebalance_threshold: f32,

    pub bullet_indent: f32,
    pub body_font_size: f32,
    pub bullet_font_size: f32,
    pub body_line_height: f32,
    pub list_line_height: f32,
    pub body_gap: f32,
    pub list_gap: f32,

    pub page_number_y: f32,
    pub page_number_size: f32,

    pub toc_start_y: f32,
    pub toc_bottom_y: f32,
    pub toc_row_step: f32,
    pub toc_font_size: f32,
    pub toc_right_x: f32,
    /// Clearance kept between the dot leader and the text on either side.
    pub leader_margin: f32,

    pub cover_band_height: f32,
    pub cover_title_y: f32,
    pub cover_title_size: f32,
    pub cover_company_y: f32,
    pub cover_company_size: f32,
    pub cover_date_y: f32,
    pub cover_date_size: f32,
    pub logo_top_y: f32,
    pub logo_box: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            page_width: 1920.0,
            page_height: 1080.0,

            header_height: 160.0,
            header_title_y: 62.0,
            header_title_size: 40.0,
            jump_menu_rows_y: [108.0, 140.0],
            jump_menu_size: 20.0,
            jump_menu_min_size: 10.0,
            jump_menu_item_gap: 36.0,

            margin_left: 80.0,
            margin_right: 120.0,
            content_start_y: 220.0,
            overflow_threshold_y: 900.0,
            column_gap: 80.0,
            rebalance_threshold: 200.0,

            bullet_indent: 40.0,
            body_font_size: 32.0,
            bullet_font_size: 28.0,
            body_line_height: 1.5,
            list_line_height: 1.2,
            body_gap: 40.0,
            list_gap: 20.0,

            page_number_y: 1040.0,
            page_number_size: 24.0,

            toc_start_y: 260.0,
            toc_bottom_y: 1000.0,
            toc_row_step: 60.0,
            toc_font_size: 32.0,
            toc_right_x: 1840.0,
            leader_margin: 20.0,

            cover_band_height: 400.0,
            cover_title_y: 300.0,
            cover_title_size: 64.0,
            cover_company_y: 400.0,
            cover_company_size: 40.0,
            cover_date_y: 480.0,
            cover_date_size: 32.0,
            logo_top_y: 580.0,
            logo_box: 300.0,
        }
    }
}

impl LayoutConfig {
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    pub fn two_column_width(&self) -> f32 {
        (self.content_width() - self.column_gap) / 2.0
    }

    pub fn right_column_x(&self) -> f32 {
        self.margin_left + self.two_column_width() + self.column_gap
    }

    /// Rejects configurations under which a flow could never place a
    /// paragraph on a fresh page.
    pub fn validate(&self) -> Result<(), Error> {
        let fields = [
            self.page_width,
            self.page_height,
            self.content_start_y,
            self.overflow_threshold_y,
            self.body_font_size,
            self.bullet_font_size,
        ];
        if fields.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(Error::InvalidConfig(
                "page size, content start, overflow threshold and font sizes must be positive".into(),
            ));
        }
        if self.content_start_y > self.overflow_threshold_y {
            return Err(Error::InvalidConfig(format!(
                "content start {} lies below the overflow threshold {}",
                self.content_start_y, self.overflow_threshold_y
            )));
        }
        if self.two_column_width() <= self.bullet_indent {
            return Err(Error::InvalidConfig(format!(
                "column width {} leaves no room after the bullet indent {}",
                self.two_column_width(),
                self.bullet_indent
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnLayout {
    Single,
    TwoColumn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Left,
    Right,
}

/// A paragraph placed on a page. `y` is the baseline of the first line.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedBlock {
    /// Position among the section's non-blank paragraphs.
    pub paragraph: usize,
    pub kind: ParagraphKind,
    pub column: Column,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub font_size: f32,
    /// Absolute distance between baselines.
    pub line_height: f32,
    pub lines: Vec<String>,
}

impl PlacedBlock {
    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhysicalPage {
    /// Zero-based index in the finished document, front pages included.
    pub index: usize,
    pub section: SectionId,
    pub is_continuation: bool,
    pub columns: ColumnLayout,
    pub blocks: Vec<PlacedBlock>,
}

/// Result of pagination: content pages in document order plus the
/// section-to-first-page binding the navigation resolves links against.
#[derive(Clone, Debug)]
pub struct PagePlan {
    pub pages: Vec<PhysicalPage>,
    pub binding: PageIndexBinding,
}

impl PagePlan {
    pub fn total_pages(&self) -> usize {
        FRONT_PAGES + self.pages.len()
    }

    pub fn pages_for(&self, section: SectionId) -> impl Iterator<Item = &PhysicalPage> {
        self.pages.iter().filter(move |p| p.section == section)
    }
}

pub fn paginate(
    model: &ReportModel,
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
) -> Result<PagePlan, Error> {
    config.validate()?;

    let mut pages: Vec<PhysicalPage> = Vec::new();
    let mut binding = PageIndexBinding::default();

    for section in model.sections() {
        let first = FRONT_PAGES + pages.len();
        binding.record(section.id, first);

        let columns = match section.layout {
            LayoutKind::SingleColumn => ColumnLayout::Single,
            LayoutKind::TwoColumn => ColumnLayout::TwoColumn,
        };
        let mut pager = flow::Pager::open(&mut pages, section.id, columns, first);
        let end_y = match section.layout {
            LayoutKind::SingleColumn => flow::single_column(section, config, measure, &mut pager),
            LayoutKind::TwoColumn => flow::two_column(section, config, measure, &mut pager),
        };

        let span = FRONT_PAGES + pages.len() - first;
        log::debug!(
            "Section {} {:?} ({}): pages {}..{} ({span} page{}), end y={end_y:.1}",
            section.id,
            section.title,
            section.layout.as_str(),
            first + 1,
            first + span,
            if span == 1 { "" } else { "s" },
        );
    }

    Ok(PagePlan { pages, binding })
}
