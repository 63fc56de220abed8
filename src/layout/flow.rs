use crate::model::{Section, SectionId};
use crate::surface::TextMeasure;

use super::{Column, ColumnLayout, LayoutConfig, PhysicalPage, PlacedBlock, classify};

/// Appends a section's physical pages to the plan.
pub(super) struct Pager<'p> {
    pages: &'p mut Vec<PhysicalPage>,
    section: SectionId,
    columns: ColumnLayout,
    next_index: usize,
}

impl<'p> Pager<'p> {
    /// Opens the section's first (non-continuation) page at `index`.
    pub(super) fn open(
        pages: &'p mut Vec<PhysicalPage>,
        section: SectionId,
        columns: ColumnLayout,
        index: usize,
    ) -> Self {
        let mut pager = Pager {
            pages,
            section,
            columns,
            next_index: index,
        };
        pager.push(false);
        pager
    }

    fn push(&mut self, is_continuation: bool) {
        self.pages.push(PhysicalPage {
            index: self.next_index,
            section: self.section,
            is_continuation,
            columns: self.columns,
            blocks: Vec::new(),
        });
        self.next_index += 1;
    }

    fn break_page(&mut self) {
        self.push(true);
        log::debug!(
            "Section {} continues on page {}",
            self.section,
            self.next_index
        );
    }

    fn place(&mut self, block: PlacedBlock) {
        if let Some(page) = self.pages.last_mut() {
            page.blocks.push(block);
        }
    }
}

/// Classify and wrap one paragraph at the given column cursor.
fn layout_block(
    paragraph: usize,
    text: &str,
    column: Column,
    column_x: f32,
    column_width: f32,
    y: f32,
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
) -> (PlacedBlock, f32) {
    let style = classify(text, column_x, column_width, config);
    let lines = measure.wrap_text(text.trim(), style.font_size, style.width);
    let block = PlacedBlock {
        paragraph,
        kind: style.kind,
        column,
        x: style.x,
        y,
        width: style.width,
        font_size: style.font_size,
        line_height: style.font_size * style.line_height,
        lines,
    };
    let advance = block.height() + style.gap_after;
    (block, advance)
}

/// Flows paragraphs down one full-width column. Overflow is checked before
/// each paragraph; a paragraph is never split, even if taller than a page.
/// Returns the final cursor Y.
pub(super) fn single_column(
    section: &Section,
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
    pager: &mut Pager<'_>,
) -> f32 {
    let mut y = config.content_start_y;
    for (i, text) in section.paragraphs().enumerate() {
        if y > config.overflow_threshold_y {
            pager.break_page();
            y = config.content_start_y;
        }
        let (block, advance) = layout_block(
            i,
            text,
            Column::Left,
            config.margin_left,
            config.content_width(),
            y,
            config,
            measure,
        );
        pager.place(block);
        y += advance;
    }
    y
}

/// Flows paragraphs across two columns, choosing the next column from the
/// cursors rather than strictly alternating.
///
/// A paragraph that meets an overflowing column is retried on the fresh
/// page, so every paragraph is placed exactly once. A break decided after
/// the last paragraph is never realised, so no empty page trails the
/// section. Returns the larger of the two final cursors.
pub(super) fn two_column(
    section: &Section,
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
    pager: &mut Pager<'_>,
) -> f32 {
    let start = config.content_start_y;
    let width = config.two_column_width();
    let (mut left_y, mut right_y) = (start, start);
    let mut on_left = true;
    let mut break_pending = false;

    let paragraphs: Vec<&str> = section.paragraphs().collect();
    let mut i = 0;
    while i < paragraphs.len() {
        let cursor = if on_left { left_y } else { right_y };
        if break_pending || cursor > config.overflow_threshold_y {
            pager.break_page();
            left_y = start;
            right_y = start;
            on_left = true;
            break_pending = false;
            continue;
        }

        let (column, column_x) = if on_left {
            (Column::Left, config.margin_left)
        } else {
            (Column::Right, config.right_column_x())
        };
        let (block, advance) = layout_block(
            i,
            paragraphs[i],
            column,
            column_x,
            width,
            cursor,
            config,
            measure,
        );
        pager.place(block);
        if on_left {
            left_y += advance;
        } else {
            right_y += advance;
        }
        i += 1;

        if left_y - right_y > config.rebalance_threshold {
            on_left = false;
        } else if right_y > config.overflow_threshold_y {
            break_pending = true;
        } else {
            on_left = !on_left;
        }
    }
    left_y.max(right_y)
}
