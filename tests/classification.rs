use slidedeck_pdf::layout::{LayoutConfig, ParagraphKind, classify};

fn single_column(text: &str) -> slidedeck_pdf::layout::ParagraphStyle {
    let config = LayoutConfig::default();
    classify(text, config.margin_left, config.content_width(), &config)
}

#[test]
fn bullet_is_indented_and_smaller() {
    let config = LayoutConfig::default();
    let style = single_column("\u{2022} Reduced emissions by 30%");
    assert_eq!(style.kind, ParagraphKind::Bullet);
    assert_eq!(style.x - config.margin_left, 40.0);
    assert_eq!(style.width, config.content_width() - 40.0);
    assert_eq!(style.font_size, 28.0);
    assert_eq!(style.line_height, 1.2);
    assert_eq!(style.gap_after, 20.0);
}

#[test]
fn numbered_item_keeps_column_start() {
    let config = LayoutConfig::default();
    let style = single_column("1. Introduction");
    assert_eq!(style.kind, ParagraphKind::Numbered);
    assert_eq!(style.x, config.margin_left);
    assert_eq!(style.width, config.content_width());
    assert_eq!(style.font_size, 32.0);
    assert_eq!(style.line_height, 1.2);
    assert_eq!(style.gap_after, 20.0);
}

#[test]
fn plain_paragraph_uses_body_metrics() {
    let style = single_column("At EcoTech Solutions, we are committed to sustainable practices.");
    assert_eq!(style.kind, ParagraphKind::Plain);
    assert_eq!(style.font_size, 32.0);
    assert_eq!(style.line_height, 1.5);
    assert_eq!(style.gap_after, 40.0);
}

#[test]
fn leading_whitespace_is_ignored() {
    assert_eq!(ParagraphKind::of("   \u{2022} 50% reduction"), ParagraphKind::Bullet);
    assert_eq!(ParagraphKind::of("\t12. Twelfth"), ParagraphKind::Numbered);
}

#[test]
fn numbers_without_a_dot_are_plain() {
    assert_eq!(ParagraphKind::of("2024 was a good year"), ParagraphKind::Plain);
    assert_eq!(ParagraphKind::of("1) not numbered"), ParagraphKind::Plain);
    assert_eq!(ParagraphKind::of(". starts with a dot"), ParagraphKind::Plain);
    assert_eq!(ParagraphKind::of("- dash list"), ParagraphKind::Plain);
}

#[test]
fn bullet_wins_over_numbering() {
    assert_eq!(ParagraphKind::of("\u{2022} 1. both"), ParagraphKind::Bullet);
}

#[test]
fn classification_is_idempotent() {
    let config = LayoutConfig::default();
    let samples = [
        "\u{2022} Solar panel installation across all facilities",
        "3. Innovation & Infrastructure",
        "Each department has designated sustainability leads.",
        "",
    ];
    for text in samples {
        let first = single_column(text);
        for _ in 0..3 {
            assert_eq!(single_column(text), first, "{text:?}");
        }
        let right = classify(text, config.right_column_x(), config.two_column_width(), &config);
        assert_eq!(right.kind, first.kind);
        assert_eq!(right.font_size, first.font_size);
    }
}

#[test]
fn two_column_bullet_indents_from_its_column() {
    let config = LayoutConfig::default();
    let style = classify(
        "\u{2022} Wind power partnerships",
        config.right_column_x(),
        config.two_column_width(),
        &config,
    );
    assert_eq!(style.x, config.right_column_x() + 40.0);
    assert_eq!(style.width, config.two_column_width() - 40.0);
}
