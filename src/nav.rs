//! Cross-page navigation: section-to-page binding, table-of-contents rows
//! and the header jump menu.

use crate::error::Error;
use crate::layout::{LayoutConfig, PagePlan};
use crate::model::{ReportModel, Section, SectionId};
use crate::surface::{Region, TextMeasure};

/// Pages ahead of the first section: cover and table of contents.
pub const FRONT_PAGES: usize = 2;

/// 1-based page number a section at `position` lands on when no section
/// before it needed continuation pages.
pub fn declared_page_number(position: usize) -> usize {
    position + 1 + FRONT_PAGES
}

/// Section → zero-based index of its first physical page.
#[derive(Clone, Debug, Default)]
pub struct PageIndexBinding {
    entries: Vec<(SectionId, usize)>,
}

impl PageIndexBinding {
    /// Records the first page of a section. Later calls for the same section
    /// are ignored and return false.
    pub fn record(&mut self, section: SectionId, page: usize) -> bool {
        if self.first_page(section).is_some() {
            return false;
        }
        self.entries.push((section, page));
        true
    }

    pub fn first_page(&self, section: SectionId) -> Option<usize> {
        self.entries
            .iter()
            .find(|(id, _)| *id == section)
            .map(|&(_, page)| page)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A section paired with the first page its links jump to.
#[derive(Clone, Copy, Debug)]
pub struct SectionLink<'m> {
    pub section: &'m Section,
    pub first_page: usize,
}

/// Resolves every section of `model` against the plan it was paginated
/// into, in section order.
pub fn resolve_links<'m>(
    model: &'m ReportModel,
    plan: &PagePlan,
) -> Result<Vec<SectionLink<'m>>, Error> {
    model
        .sections()
        .iter()
        .map(|section| {
            plan.binding
                .first_page(section.id)
                .map(|first_page| SectionLink {
                    section,
                    first_page,
                })
                .ok_or(Error::PlanMismatch(section.id))
        })
        .collect()
}

/// Clickable band around a line of text whose baseline is at `baseline`.
fn text_band(x: f32, baseline: f32, width: f32, font_size: f32) -> Region {
    Region::new(x, baseline - font_size * 0.85, width, font_size * 1.1)
}

#[derive(Clone, Debug, PartialEq)]
pub struct TocEntry {
    pub section: SectionId,
    pub title: String,
    /// Zero-based link target.
    pub target_page: usize,
    /// Printed, 1-based.
    pub page_number: usize,
    pub font_size: f32,
    pub baseline_y: f32,
    pub title_x: f32,
    pub leader: String,
    pub leader_x: f32,
    pub number_x: f32,
    pub region: Region,
}

/// Number of `.` glyphs that fit between `from` and `to`.
pub fn leader_dots(measure: &dyn TextMeasure, from: f32, to: f32, font_size: f32) -> usize {
    let dot_w = measure.text_width(".", font_size);
    let available = to - from;
    if dot_w <= 0.0 || available <= 0.0 {
        return 0;
    }
    (available / dot_w).floor() as usize
}

/// One row per section, in section order, with right-aligned page numbers.
/// A title too wide for its row shrinks that row's font so title, leader
/// clearances and page number still fit.
pub fn toc_entries(
    links: &[SectionLink<'_>],
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
) -> Vec<TocEntry> {
    let rows = links.len().max(1) as f32;
    let step = config
        .toc_row_step
        .min((config.toc_bottom_y - config.toc_start_y) / rows);
    let base_size = config.toc_font_size.min(step * 0.75);
    let title_x = config.margin_left;
    let row_width = config.toc_right_x - title_x - 2.0 * config.leader_margin;

    links
        .iter()
        .enumerate()
        .map(|(i, link)| {
            let section = link.section;
            let target_page = link.first_page;
            let page_number = target_page + 1;
            let number_text = page_number.to_string();

            let natural = measure.text_width(&section.title, base_size)
                + measure.text_width(&number_text, base_size);
            let font_size = if natural > row_width {
                base_size * row_width / natural
            } else {
                base_size
            };

            let baseline_y = config.toc_start_y + i as f32 * step;
            let title_w = measure.text_width(&section.title, font_size);
            let number_w = measure.text_width(&number_text, font_size);
            let number_x = config.toc_right_x - number_w;

            let leader_x = title_x + title_w + config.leader_margin;
            let count = leader_dots(measure, leader_x, number_x - config.leader_margin, font_size);

            TocEntry {
                section: section.id,
                title: section.title.clone(),
                target_page,
                page_number,
                font_size,
                baseline_y,
                title_x,
                leader: ".".repeat(count),
                leader_x,
                number_x,
                region: text_band(title_x, baseline_y, config.toc_right_x - title_x, font_size),
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct JumpMenuItem {
    pub section: SectionId,
    pub title: String,
    pub target_page: usize,
    /// 0 for the upper row, 1 for the lower.
    pub row: usize,
    pub x: f32,
    pub baseline_y: f32,
    pub font_size: f32,
    pub region: Region,
}

/// The header jump menu, identical on every content page. The first half
/// of the titles (rounded up) sits on the upper row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JumpMenu {
    pub items: Vec<JumpMenuItem>,
}

impl JumpMenu {
    pub fn build(
        links: &[SectionLink<'_>],
        config: &LayoutConfig,
        measure: &dyn TextMeasure,
    ) -> Self {
        let split = links.len().div_ceil(2);
        let available = config.content_width();
        let mut items = Vec::with_capacity(links.len());

        for (row, chunk) in [&links[..split], &links[split..]].into_iter().enumerate() {
            if chunk.is_empty() {
                continue;
            }
            let natural: f32 = chunk
                .iter()
                .map(|l| measure.text_width(&l.section.title, config.jump_menu_size))
                .sum::<f32>()
                + config.jump_menu_item_gap * (chunk.len() - 1) as f32;
            let font_size = if natural > available {
                (config.jump_menu_size * available / natural).max(config.jump_menu_min_size)
            } else {
                config.jump_menu_size
            };
            let gap = config.jump_menu_item_gap * font_size / config.jump_menu_size;
            let baseline_y = config.jump_menu_rows_y[row];

            let mut x = config.margin_left;
            for link in chunk {
                let w = measure.text_width(&link.section.title, font_size);
                items.push(JumpMenuItem {
                    section: link.section.id,
                    title: link.section.title.clone(),
                    target_page: link.first_page,
                    row,
                    x,
                    baseline_y,
                    font_size,
                    region: text_band(x, baseline_y, w, font_size),
                });
                x += w + gap;
            }
        }
        JumpMenu { items }
    }

    pub fn row(&self, row: usize) -> impl Iterator<Item = &JumpMenuItem> {
        self.items.iter().filter(move |i| i.row == row)
    }
}
