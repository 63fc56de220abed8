use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Stable identity of a section, assigned when the section joins a
/// [`ReportModel`]. Layout and link binding key on this, never on the
/// section's position in a slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(pub u32);

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutKind {
    SingleColumn,
    TwoColumn,
}

impl LayoutKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutKind::SingleColumn => "single-column",
            LayoutKind::TwoColumn => "two-column",
        }
    }
}

impl FromStr for LayoutKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "single-column" => Ok(LayoutKind::SingleColumn),
            "two-column" => Ok(LayoutKind::TwoColumn),
            other => Err(Error::InvalidInput(format!(
                "unrecognized layout kind {other:?} (expected \"single-column\" or \"two-column\")"
            ))),
        }
    }
}

/// Raw, still-encoded logo bytes (PNG or JPEG). Decoding happens at cover
/// time and may fail without failing the render.
#[derive(Clone, Debug)]
pub struct LogoImage {
    pub data: Vec<u8>,
}

#[derive(Clone, Debug, Default)]
pub struct HeaderInfo {
    pub report_title: String,
    pub company_name: String,
    pub report_date: String,
    pub logo: Option<LogoImage>,
}

#[derive(Clone, Debug)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    /// Newline-delimited paragraphs, unprocessed.
    pub body: String,
    pub layout: LayoutKind,
}

impl Section {
    /// Body split on newlines with blank-after-trim lines dropped.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.body.lines().filter(|p| !p.trim().is_empty())
    }
}

/// The read-only input of one render pass: header metadata plus sections in
/// document (and table-of-contents) order.
#[derive(Clone, Debug, Default)]
pub struct ReportModel {
    pub header: HeaderInfo,
    sections: Vec<Section>,
    next_id: u32,
}

impl ReportModel {
    pub fn new(header: HeaderInfo) -> Self {
        ReportModel {
            header,
            sections: Vec::new(),
            next_id: 0,
        }
    }

    pub fn push_section(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
        layout: LayoutKind,
    ) -> SectionId {
        let id = SectionId(self.next_id);
        self.next_id += 1;
        self.sections.push(Section {
            id,
            title: title.into(),
            body: body.into(),
            layout,
        });
        id
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}
