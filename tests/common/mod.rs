#![allow(dead_code)]

use std::collections::BTreeMap;

use slidedeck_pdf::layout::{LayoutConfig, PagePlan, paginate};
use slidedeck_pdf::surface::RecordingSurface;
use slidedeck_pdf::{HeaderInfo, Helvetica, LayoutKind, ReportModel, draw_report};

pub fn header(title: &str) -> HeaderInfo {
    HeaderInfo {
        report_title: title.to_string(),
        company_name: "EcoTech Solutions Inc.".to_string(),
        report_date: "2024-03-13".to_string(),
        logo: None,
    }
}

pub fn model(sections: &[(&str, String, LayoutKind)]) -> ReportModel {
    let mut model = ReportModel::new(header("2024 Sustainability Impact Report"));
    for (title, body, layout) in sections {
        model.push_section(*title, body.clone(), *layout);
    }
    model
}

/// `n` one-line bullet items.
pub fn bullets(n: usize) -> String {
    (1..=n)
        .map(|i| format!("\u{2022} Item {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `n` plain paragraphs of varying length (between 8 and 60 words).
pub fn plain_paragraphs(n: usize) -> String {
    (0..n)
        .map(|i| {
            let words = 8 + (i * 13) % 53;
            (0..words)
                .map(|w| if w % 5 == 0 { "sustainability" } else { "our" })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn plan(model: &ReportModel) -> PagePlan {
    paginate(model, &LayoutConfig::default(), &Helvetica::default()).expect("paginate")
}

pub fn record(model: &ReportModel) -> (PagePlan, RecordingSurface) {
    let config = LayoutConfig::default();
    let mut surface = RecordingSurface::new();
    let plan = paginate(model, &config, &surface).expect("paginate");
    draw_report(&mut surface, model, &plan, &config).expect("draw");
    (plan, surface)
}

/// Page count of a rendered PDF.
pub fn pdf_page_count(pdf: &[u8]) -> usize {
    let doc = lopdf::Document::load_mem(pdf).expect("parse generated PDF");
    doc.get_pages().len()
}

/// For each page (1-based), the 1-based pages its link annotations jump to.
pub fn pdf_link_targets(pdf: &[u8]) -> BTreeMap<u32, Vec<u32>> {
    let doc = lopdf::Document::load_mem(pdf).expect("parse generated PDF");
    let pages = doc.get_pages();
    let page_number = |id: lopdf::ObjectId| {
        pages
            .iter()
            .find(|(_, page_id)| **page_id == id)
            .map(|(n, _)| *n)
            .expect("link target is a page")
    };

    let mut out = BTreeMap::new();
    for (&n, &page_id) in &pages {
        let page = doc.get_dictionary(page_id).expect("page dictionary");
        let mut targets = Vec::new();
        if let Ok(annots) = page.get(b"Annots").and_then(|a| a.as_array()) {
            for annot in annots {
                let annot = doc
                    .get_dictionary(annot.as_reference().expect("annotation ref"))
                    .expect("annotation dictionary");
                let action = annot
                    .get(b"A")
                    .and_then(|a| a.as_dict())
                    .expect("link action");
                let dest = action
                    .get(b"D")
                    .and_then(|d| d.as_array())
                    .expect("GoTo destination");
                targets.push(page_number(dest[0].as_reference().expect("page ref")));
            }
        }
        out.insert(n, targets);
    }
    out
}

/// An image XObject found in a rendered PDF.
#[derive(Debug)]
pub struct PdfImage {
    pub filter: String,
    pub color_space: String,
    pub width: i64,
    pub has_smask: bool,
}

/// Every image XObject in the document, soft masks included.
pub fn pdf_images(pdf: &[u8]) -> Vec<PdfImage> {
    let doc = lopdf::Document::load_mem(pdf).expect("parse generated PDF");
    let name = |dict: &lopdf::Dictionary, key: &[u8]| {
        dict.get(key)
            .and_then(|o| o.as_name())
            .map(|n| String::from_utf8_lossy(n).into_owned())
            .unwrap_or_default()
    };
    doc.objects
        .values()
        .filter_map(|obj| match obj {
            lopdf::Object::Stream(stream) => Some(&stream.dict),
            _ => None,
        })
        .filter(|dict| name(dict, b"Subtype") == "Image")
        .map(|dict| PdfImage {
            filter: name(dict, b"Filter"),
            color_space: name(dict, b"ColorSpace"),
            width: dict
                .get(b"Width")
                .and_then(|w| w.as_i64())
                .expect("image width"),
            has_smask: dict.has(b"SMask"),
        })
        .collect()
}
