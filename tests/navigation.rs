mod common;

use slidedeck_pdf::layout::LayoutConfig;
use slidedeck_pdf::nav::{
    FRONT_PAGES, JumpMenu, PageIndexBinding, declared_page_number, leader_dots, resolve_links,
    toc_entries,
};
use slidedeck_pdf::surface::TextMeasure;
use slidedeck_pdf::{Helvetica, LayoutKind, SectionId};

use common::{bullets, model, plain_paragraphs, plan};

const TITLES: [&str; 7] = [
    "Introduction",
    "Management Role",
    "Organizational Structure",
    "Sustainability Targets",
    "Strategic Initiatives",
    "Performance Trends",
    "Summary",
];

fn seven_sections(targets_body: String) -> slidedeck_pdf::ReportModel {
    let sections: Vec<(&str, String, LayoutKind)> = TITLES
        .iter()
        .map(|&t| {
            let body = if t == "Sustainability Targets" {
                targets_body.clone()
            } else {
                plain_paragraphs(2)
            };
            let layout = if t == "Strategic Initiatives" {
                LayoutKind::TwoColumn
            } else {
                LayoutKind::SingleColumn
            };
            (t, body, layout)
        })
        .collect();
    model(&sections)
}

fn targets(model: &slidedeck_pdf::ReportModel) -> Vec<usize> {
    let plan = plan(model);
    model
        .sections()
        .iter()
        .map(|s| plan.binding.first_page(s.id).expect("bound"))
        .collect()
}

#[test]
fn binding_keeps_the_first_page() {
    let mut binding = PageIndexBinding::default();
    assert!(binding.record(SectionId(4), 2));
    assert!(!binding.record(SectionId(4), 3));
    assert!(binding.record(SectionId(1), 5));
    assert_eq!(binding.first_page(SectionId(4)), Some(2));
    assert_eq!(binding.first_page(SectionId(1)), Some(5));
    assert_eq!(binding.first_page(SectionId(9)), None);
    assert_eq!(binding.len(), 2);
}

#[test]
fn without_overflow_targets_match_declared_pages() {
    let model = seven_sections(bullets(3));
    let resolved = targets(&model);
    let declared: Vec<usize> = (0..7).map(|i| declared_page_number(i) - 1).collect();
    assert_eq!(resolved, declared);
    assert_eq!(resolved[0], FRONT_PAGES);
}

#[test]
fn continuation_pages_only_shift_later_sections() {
    let short = targets(&seven_sections(bullets(3)));
    let long_model = seven_sections(bullets(40));
    let long_plan = plan(&long_model);
    let long = targets(&long_model);

    let targets_id = long_model.sections()[3].id;
    let extra = long_plan.pages_for(targets_id).count() - 1;
    assert!(extra >= 2, "expected at least two continuation pages, got {extra}");

    assert_eq!(long[..=3], short[..=3]);
    for i in 4..7 {
        assert_eq!(long[i], short[i] + extra, "section {i}");
    }
}

#[test]
fn binding_follows_section_ids_not_positions() {
    let mut model = seven_sections(bullets(3));
    let late = model.push_section("Appendix", bullets(2), LayoutKind::SingleColumn);
    let plan = plan(&model);
    assert_eq!(late, SectionId(7));
    assert_eq!(plan.binding.first_page(late), Some(FRONT_PAGES + 7));
    assert!(plan.pages_for(late).all(|p| p.section == late));
}

#[test]
fn toc_has_one_row_per_section_in_order() {
    let config = LayoutConfig::default();
    let model = seven_sections(bullets(40));
    let plan = plan(&model);
    let links = resolve_links(&model, &plan).expect("links");
    let entries = toc_entries(&links, &config, &Helvetica::default());

    let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, TITLES);
    for (entry, section) in entries.iter().zip(model.sections()) {
        assert_eq!(entry.section, section.id);
        assert_eq!(Some(entry.target_page), plan.binding.first_page(section.id));
        assert_eq!(entry.page_number, entry.target_page + 1);
        assert_eq!(entry.region.x, entry.title_x);
        assert_eq!(entry.region.right(), config.toc_right_x);
    }
    for (i, a) in entries.iter().enumerate() {
        for b in &entries[i + 1..] {
            assert!(!a.region.intersects(&b.region), "{} overlaps {}", a.title, b.title);
        }
    }
}

#[test]
fn dot_leaders_never_touch_title_or_number() {
    let config = LayoutConfig::default();
    let measure = Helvetica::default();
    let model = seven_sections(bullets(3));
    let plan = plan(&model);

    let links = resolve_links(&model, &plan).expect("links");
    for entry in toc_entries(&links, &config, &measure) {
        assert!(entry.leader.chars().all(|c| c == '.'));
        assert!(!entry.leader.is_empty());
        let title_end = entry.title_x + measure.text_width(&entry.title, entry.font_size);
        let leader_end = entry.leader_x + measure.text_width(&entry.leader, entry.font_size);
        assert!(entry.leader_x - title_end >= config.leader_margin - 0.01);
        assert!(entry.number_x - leader_end >= config.leader_margin - 0.01);
        let number_w = measure.text_width(&entry.page_number.to_string(), entry.font_size);
        assert!((entry.number_x + number_w - config.toc_right_x).abs() < 0.01);
    }
}

#[test]
fn overlong_toc_title_shrinks_its_row() {
    let config = LayoutConfig::default();
    let measure = Helvetica::default();
    let long_title = "Sustainability ".repeat(12);
    let model = model(&[
        ("Introduction", bullets(2), LayoutKind::SingleColumn),
        (long_title.trim_end(), bullets(2), LayoutKind::SingleColumn),
    ]);
    let plan = plan(&model);
    let links = resolve_links(&model, &plan).expect("links");
    let entries = toc_entries(&links, &config, &measure);

    assert_eq!(entries[0].font_size, config.toc_font_size);
    let long = &entries[1];
    assert!(long.font_size < config.toc_font_size);
    assert!(long.leader.is_empty());
    let title_end = long.title_x + measure.text_width(&long.title, long.font_size);
    assert!(title_end + config.leader_margin <= long.number_x - config.leader_margin + 0.01);
    let number_w = measure.text_width(&long.page_number.to_string(), long.font_size);
    assert!((long.number_x + number_w - config.toc_right_x).abs() < 0.01);
}

#[test]
fn links_resolve_in_section_order() {
    let model = seven_sections(bullets(40));
    let plan = plan(&model);
    let links = resolve_links(&model, &plan).expect("links");
    let ids: Vec<SectionId> = links.iter().map(|l| l.section.id).collect();
    let expected: Vec<SectionId> = model.sections().iter().map(|s| s.id).collect();
    assert_eq!(ids, expected);
    assert!(links.windows(2).all(|w| w[0].first_page < w[1].first_page));
}

#[test]
fn leader_count_is_floored() {
    let measure = Helvetica::default();
    let dot = measure.text_width(".", 32.0);
    assert_eq!(leader_dots(&measure, 100.0, 100.0 + dot * 10.5, 32.0), 10);
    assert_eq!(leader_dots(&measure, 100.0, 100.0 + dot * 0.5, 32.0), 0);
    assert_eq!(leader_dots(&measure, 500.0, 100.0, 32.0), 0);
}

#[test]
fn jump_menu_splits_titles_over_two_rows() {
    let config = LayoutConfig::default();
    let model = seven_sections(bullets(3));
    let plan = plan(&model);
    let links = resolve_links(&model, &plan).expect("links");
    let menu = JumpMenu::build(&links, &config, &Helvetica::default());

    let upper: Vec<&str> = menu.row(0).map(|i| i.title.as_str()).collect();
    let lower: Vec<&str> = menu.row(1).map(|i| i.title.as_str()).collect();
    assert_eq!(upper, TITLES[..4]);
    assert_eq!(lower, TITLES[4..]);

    for item in &menu.items {
        assert!(item.region.bottom() <= config.header_height);
        assert!(item.region.right() <= config.page_width - config.margin_right + 0.01);
        assert_eq!(Some(item.target_page), plan.binding.first_page(item.section));
    }
    for (i, a) in menu.items.iter().enumerate() {
        for b in &menu.items[i + 1..] {
            assert!(!a.region.intersects(&b.region), "{} overlaps {}", a.title, b.title);
        }
    }
}

#[test]
fn crowded_jump_menu_shrinks_to_fit() {
    let config = LayoutConfig::default();
    let titles: Vec<String> = (0..16)
        .map(|i| format!("Extraordinarily Long Section Title {i}"))
        .collect();
    let sections: Vec<(&str, String, LayoutKind)> = titles
        .iter()
        .map(|t| (t.as_str(), bullets(1), LayoutKind::SingleColumn))
        .collect();
    let model = model(&sections);
    let plan = plan(&model);
    let links = resolve_links(&model, &plan).expect("links");
    let menu = JumpMenu::build(&links, &config, &Helvetica::default());

    assert_eq!(menu.items.len(), 16);
    assert!(menu.items.iter().all(|i| i.font_size < config.jump_menu_size));
    for row in 0..2 {
        let last = menu.row(row).last().unwrap();
        assert!(last.region.right() <= config.margin_left + config.content_width() + 0.5);
    }
}
