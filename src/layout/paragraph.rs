use super::LayoutConfig;

pub const BULLET: char = '\u{2022}';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParagraphKind {
    Bullet,
    Numbered,
    Plain,
}

impl ParagraphKind {
    /// Classification looks only at the paragraph's own leading characters.
    pub fn of(text: &str) -> ParagraphKind {
        let text = text.trim();
        if text.starts_with(BULLET) {
            return ParagraphKind::Bullet;
        }
        let digits = text.bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 && text.as_bytes().get(digits) == Some(&b'.') {
            ParagraphKind::Numbered
        } else {
            ParagraphKind::Plain
        }
    }

    pub fn is_list_item(self) -> bool {
        matches!(self, ParagraphKind::Bullet | ParagraphKind::Numbered)
    }
}

/// Where and how large a paragraph draws inside a column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParagraphStyle {
    pub kind: ParagraphKind,
    pub x: f32,
    pub width: f32,
    pub font_size: f32,
    pub line_height: f32,
    /// Space added below the paragraph before the next one.
    pub gap_after: f32,
}

pub fn classify(text: &str, column_x: f32, column_width: f32, config: &LayoutConfig) -> ParagraphStyle {
    let kind = ParagraphKind::of(text);
    let gap_after = if kind.is_list_item() {
        config.list_gap
    } else {
        config.body_gap
    };
    match kind {
        ParagraphKind::Bullet => ParagraphStyle {
            kind,
            x: column_x + config.bullet_indent,
            width: column_width - config.bullet_indent,
            font_size: config.bullet_font_size,
            line_height: config.list_line_height,
            gap_after,
        },
        ParagraphKind::Numbered => ParagraphStyle {
            kind,
            x: column_x,
            width: column_width,
            font_size: config.body_font_size,
            line_height: config.list_line_height,
            gap_after,
        },
        ParagraphKind::Plain => ParagraphStyle {
            kind,
            x: column_x,
            width: column_width,
            font_size: config.body_font_size,
            line_height: config.body_line_height,
            gap_after,
        },
    }
}
