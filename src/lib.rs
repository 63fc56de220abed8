mod error;
mod fonts;
pub mod layout;
pub mod logo;
pub mod model;
pub mod nav;
pub mod pdf;
mod render;
pub mod request;
pub mod surface;

pub use error::Error;
pub use fonts::Helvetica;
pub use layout::LayoutConfig;
pub use model::{HeaderInfo, LayoutKind, LogoImage, ReportModel, Section, SectionId};
pub use render::{RenderedReport, TOC_HEADING, draw_report, page_heading, render_pdf};
pub use request::RenderRequest;

use std::path::Path;
use std::time::Instant;

/// Renders a wizard request with the default slide layout.
pub fn render_request(request: RenderRequest) -> Result<RenderedReport, Error> {
    let model = request.into_model()?;
    render_pdf(&model, &LayoutConfig::default())
}

/// Reads a JSON request, renders it and writes the PDF to `output`.
/// Returns the number of pages written.
pub fn convert_request_to_pdf(
    input: &Path,
    output: &Path,
    logo: Option<&Path>,
) -> Result<usize, Error> {
    let t0 = Instant::now();

    let mut request = RenderRequest::from_file(input)?;
    if let Some(logo) = logo {
        request.header.logo_image = Some(std::fs::read(logo)?);
    }
    let t_parse = t0.elapsed();

    let report = render_request(request)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &report.pdf)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: parse={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_parse.as_secs_f64() * 1000.0,
        (t_render - t_parse).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        report.pdf.len(),
    );

    Ok(report.page_count)
}
