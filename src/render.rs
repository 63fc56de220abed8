//! Draws the cover, the table of contents and every planned content page.

use crate::error::Error;
use crate::layout::{LayoutConfig, PagePlan, PhysicalPage, paginate};
use crate::model::ReportModel;
use crate::nav::{JumpMenu, TocEntry, resolve_links, toc_entries};
use crate::pdf::PdfSurface;
use crate::logo::{DecodedImage, decode_or_skip};
use crate::surface::{DrawingSurface, Region, Rgb, SurfaceError};

const COVER_BACKGROUND: Rgb = Rgb(250, 250, 250);
const COVER_BAND: Rgb = Rgb(240, 240, 240);
const COVER_TITLE: Rgb = Rgb(50, 50, 50);
const COVER_SUBTITLE: Rgb = Rgb(80, 80, 80);
const HEADER_BAR: Rgb = Rgb(70, 70, 70);
const JUMP_MENU: Rgb = Rgb(190, 190, 190);
const JUMP_MENU_CURRENT: Rgb = Rgb(255, 255, 255);
const BODY_TEXT: Rgb = Rgb(30, 30, 30);
const TOC_TEXT: Rgb = Rgb(80, 80, 80);
const PAGE_NUMBER: Rgb = Rgb(120, 120, 120);

pub const TOC_HEADING: &str = "Table of Contents";

/// A finished report.
#[derive(Debug)]
pub struct RenderedReport {
    pub pdf: Vec<u8>,
    pub page_count: usize,
    pub plan: PagePlan,
}

/// Header title for a content page.
pub fn page_heading(title: &str, is_continuation: bool) -> String {
    if is_continuation {
        format!("{title} (continued)")
    } else {
        title.to_string()
    }
}

fn centered_text<S: DrawingSurface>(
    surface: &mut S,
    config: &LayoutConfig,
    text: &str,
    y: f32,
    font_size: f32,
) -> Result<(), SurfaceError> {
    let w = surface.text_width(text, font_size);
    surface.draw_text(text, (config.page_width - w) / 2.0, y, font_size)
}

fn draw_cover<S: DrawingSurface>(
    surface: &mut S,
    model: &ReportModel,
    config: &LayoutConfig,
    logo: Option<&DecodedImage>,
) -> Result<(), SurfaceError> {
    let header = &model.header;
    surface.set_fill_color(COVER_BACKGROUND);
    surface.fill_rect(Region::new(0.0, 0.0, config.page_width, config.page_height))?;
    surface.set_fill_color(COVER_BAND);
    surface.fill_rect(Region::new(0.0, 0.0, config.page_width, config.cover_band_height))?;

    surface.set_text_color(COVER_TITLE);
    centered_text(surface, config, &header.report_title, config.cover_title_y, config.cover_title_size)?;
    surface.set_text_color(COVER_SUBTITLE);
    centered_text(surface, config, &header.company_name, config.cover_company_y, config.cover_company_size)?;
    centered_text(surface, config, &header.report_date, config.cover_date_y, config.cover_date_size)?;

    if let Some(img) = logo {
        let (w, h) = img.fit_within(config.logo_box, config.logo_box);
        let x = (config.page_width - w) / 2.0;
        let y = config.logo_top_y + (config.logo_box - h) / 2.0;
        surface.draw_image(img, Region::new(x, y, w, h))?;
    }
    Ok(())
}

fn draw_header_bar<S: DrawingSurface>(
    surface: &mut S,
    config: &LayoutConfig,
    heading: &str,
) -> Result<(), SurfaceError> {
    surface.set_fill_color(HEADER_BAR);
    surface.fill_rect(Region::new(0.0, 0.0, config.page_width, config.header_height))?;
    surface.set_text_color(Rgb::WHITE);
    surface.draw_text(heading, config.margin_left, config.header_title_y, config.header_title_size)
}

fn draw_page_number<S: DrawingSurface>(
    surface: &mut S,
    config: &LayoutConfig,
    page_index: usize,
) -> Result<(), SurfaceError> {
    let text = (page_index + 1).to_string();
    let w = surface.text_width(&text, config.page_number_size);
    surface.set_text_color(PAGE_NUMBER);
    surface.draw_text(&text, config.toc_right_x - w, config.page_number_y, config.page_number_size)
}

fn draw_toc<S: DrawingSurface>(
    surface: &mut S,
    entries: &[TocEntry],
    config: &LayoutConfig,
    page_index: usize,
) -> Result<(), SurfaceError> {
    draw_header_bar(surface, config, TOC_HEADING)?;
    surface.set_text_color(TOC_TEXT);
    for entry in entries {
        surface.draw_text(&entry.title, entry.title_x, entry.baseline_y, entry.font_size)?;
        if !entry.leader.is_empty() {
            surface.draw_text(&entry.leader, entry.leader_x, entry.baseline_y, entry.font_size)?;
        }
        surface.draw_text(
            &entry.page_number.to_string(),
            entry.number_x,
            entry.baseline_y,
            entry.font_size,
        )?;
        surface.add_link(entry.region, entry.target_page)?;
    }
    draw_page_number(surface, config, page_index)
}

fn draw_content_page<S: DrawingSurface>(
    surface: &mut S,
    title: &str,
    page: &PhysicalPage,
    menu: &JumpMenu,
    config: &LayoutConfig,
) -> Result<(), SurfaceError> {
    draw_header_bar(surface, config, &page_heading(title, page.is_continuation))?;

    for item in &menu.items {
        let color = if item.section == page.section {
            JUMP_MENU_CURRENT
        } else {
            JUMP_MENU
        };
        surface.set_text_color(color);
        surface.draw_text(&item.title, item.x, item.baseline_y, item.font_size)?;
        surface.add_link(item.region, item.target_page)?;
    }

    draw_page_number(surface, config, page.index)?;

    surface.set_text_color(BODY_TEXT);
    for block in &page.blocks {
        for (n, line) in block.lines.iter().enumerate() {
            let y = block.y + n as f32 * block.line_height;
            surface.draw_text(line, block.x, y, block.font_size)?;
        }
    }
    Ok(())
}

/// Draws the whole report onto `surface`, which must be empty, using the
/// plan `model` was paginated into. The logo is decoded before the cover
/// is drawn; a logo that fails to decode is left out.
pub fn draw_report<S: DrawingSurface>(
    surface: &mut S,
    model: &ReportModel,
    plan: &PagePlan,
    config: &LayoutConfig,
) -> Result<(), Error> {
    let links = resolve_links(model, plan)?;
    let logo = decode_or_skip(model.header.logo.as_ref());

    surface.start_page();
    draw_cover(surface, model, config, logo.as_ref()).map_err(Error::surface("cover page"))?;

    let toc_index = surface.start_page();
    let entries = toc_entries(&links, config, &*surface);
    draw_toc(surface, &entries, config, toc_index).map_err(Error::surface("table of contents"))?;

    let menu = JumpMenu::build(&links, config, &*surface);
    for page in &plan.pages {
        let index = surface.start_page();
        debug_assert_eq!(index, page.index, "surface and plan page indices diverged");
        let title = links
            .iter()
            .find(|l| l.section.id == page.section)
            .map(|l| l.section.title.as_str())
            .ok_or(Error::PlanMismatch(page.section))?;
        draw_content_page(surface, title, page, &menu, config).map_err(Error::surface(format!(
            "section {title:?} on page {}",
            page.index + 1
        )))?;
    }

    for link in &links {
        surface.add_bookmark(&link.section.title, link.first_page);
    }
    Ok(())
}

/// Paginates, draws and finalizes a report as PDF bytes.
pub fn render_pdf(model: &ReportModel, config: &LayoutConfig) -> Result<RenderedReport, Error> {
    let t0 = std::time::Instant::now();
    let mut surface = PdfSurface::new(config.page_width, config.page_height);

    let plan = paginate(model, config, &surface)?;
    let t_plan = t0.elapsed();

    draw_report(&mut surface, model, &plan, config)?;
    let page_count = surface.page_count();
    let t_draw = t0.elapsed();

    let pdf = surface
        .finalize()
        .map_err(Error::surface("document finalization"))?;
    let t_total = t0.elapsed();

    log::info!(
        "Render phases: plan={:.1}ms, draw={:.1}ms, finalize={:.1}ms ({} sections, {page_count} pages, {} bytes)",
        t_plan.as_secs_f64() * 1000.0,
        (t_draw - t_plan).as_secs_f64() * 1000.0,
        (t_total - t_draw).as_secs_f64() * 1000.0,
        model.sections().len(),
        pdf.len(),
    );

    Ok(RenderedReport {
        pdf,
        page_count,
        plan,
    })
}
