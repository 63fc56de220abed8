use crate::surface::TextMeasure;

/// Name the standard font is registered under in every page's resources.
pub(crate) const FONT_RESOURCE: &[u8] = b"F1";
pub(crate) const FONT_BASE_NAME: &[u8] = b"Helvetica";

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007F => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95, // bullet
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Characters outside the code page are dropped; tabs become spaces.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .filter_map(|c| match c {
            '\t' => Some(b' '),
            _ => match char_to_winansi(c) {
                0 => None,
                b => Some(b),
            },
        })
        .collect()
}

/// Helvetica advance widths at 1000 units/em for WinAnsi bytes 32..=255.
/// Printable ASCII comes from the standard AFM; the upper half is approximated.
fn helvetica_widths() -> [f32; 224] {
    const ASCII: [u16; 95] = [
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
        278, 278, 584, 584, 584, 556, 1015, // :..@
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
        278, 278, 278, 469, 556, 333, // [..`
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
        334, 260, 334, 584, // {..~
    ];
    let mut widths = [556.0f32; 224];
    for (i, w) in ASCII.iter().enumerate() {
        widths[i] = *w as f32;
    }
    for b in 127u8..=255 {
        widths[(b - 32) as usize] = match b {
            0x85 => 1000.0,              // ellipsis
            0x91 | 0x92 => 222.0,        // single quotes
            0x93 | 0x94 => 333.0,        // double quotes
            0x95 => 350.0,               // bullet
            0x96 => 556.0,               // en dash
            0x97 => 1000.0,              // em dash
            0x99 => 1000.0,              // trademark
            0xA0 => 278.0,               // nbsp
            0xC0..=0xC5 => 667.0,        // accented A
            0xE0..=0xE5 | 0xE8..=0xEB => 556.0,
            0xEC..=0xEF => 278.0,        // accented i
            _ => 556.0,
        };
    }
    widths
}

/// Text measurement for the built-in Helvetica face. Shared by the PDF
/// backend and the recording surface so plans and output agree.
#[derive(Clone, Debug)]
pub struct Helvetica {
    widths_1000: [f32; 224],
}

impl Default for Helvetica {
    fn default() -> Self {
        Helvetica {
            widths_1000: helvetica_widths(),
        }
    }
}

impl Helvetica {
    fn byte_width_1000(&self, byte: u8) -> f32 {
        if byte >= 32 {
            self.widths_1000[(byte - 32) as usize]
        } else {
            0.0
        }
    }
}

impl TextMeasure for Helvetica {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        to_winansi_bytes(text)
            .iter()
            .map(|&b| self.byte_width_1000(b) * font_size / 1000.0)
            .sum()
    }
}
