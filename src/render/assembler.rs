//! Document assembly: covers, tab content, section dividers, the index
//! page with forward page-number resolution, and footers.
//!
//! The full-plan export runs two passes. Pass one lays every section out
//! against a scratch builder and records how many pages it occupies, so
//! the page numbers promised on the index are exact even when a tab
//! paginates internally or a full-page image fires. Pass two renders for
//! real in the same fixed order using that table.

use chrono::Local;

use super::canvas::{DocumentBuilder, Rect};
use super::layout::{Cursor, LayoutEngine};
use super::metrics::text_width;
use super::theme::{
    section_color, Font, ACCENT, BOX_FILL, CONTENT_WIDTH, COPYRIGHT, COVER_CAPTION, FUNDING_ASK,
    INK, MUTED, NAVY, PAGE_HEIGHT, PAGE_WIDTH, PAPER, SIDE_MARGIN, WORDMARK,
};
use crate::error::Result;
use crate::model::{BusinessPlanCards, CardSection, Tab, TextSection};
use crate::sanitize::sanitize;
use crate::visuals::visual_block;

/// Where one section starts in the finished full-plan document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionStart {
    /// Stable section id
    pub id: String,
    /// Section title as rendered
    pub title: String,
    /// Zero-based physical page index of the section's divider
    pub page_index: usize,
    /// Page number as printed on the index card (footer numbering,
    /// which restarts at 1 on the first content page)
    pub display_number: usize,
    /// Pages the section occupies: divider plus its tabs
    pub span: usize,
}

/// A finished in-memory document plus the bookkeeping callers and tests
/// need to verify it.
pub struct RenderedDocument {
    /// The assembled PDF
    pub document: lopdf::Document,
    /// Total physical pages
    pub page_count: usize,
    /// Start-page table for the full-plan export; empty for single sections
    pub sections: Vec<SectionStart>,
}

/// Render a single section: cover page, one page per tab, footers on
/// everything but the cover.
pub fn render_section(section: &CardSection) -> Result<RenderedDocument> {
    let mut builder = DocumentBuilder::new();
    {
        let mut layout = LayoutEngine::new(&mut builder);
        draw_section_cover(&mut layout, section);
        for tab in &section.pages {
            let cursor = layout.start_page();
            render_tab_content(&mut layout, cursor, tab);
        }
    }
    apply_footers(&mut builder, 1);

    let page_count = builder.page_count();
    let document = builder.build(&section.title)?;
    Ok(RenderedDocument {
        document,
        page_count,
        sections: Vec::new(),
    })
}

/// Render the full six-section plan with cover, index, dividers, and
/// restarting footers.
pub fn render_full_plan(cards: &BusinessPlanCards) -> Result<RenderedDocument> {
    let ordered = cards.ordered();

    // Pass 1: exact page spans, divider included.
    let spans: Vec<usize> = ordered.iter().copied().map(section_page_span).collect();
    log::debug!("full-plan section spans: {spans:?}");

    // Cover is physical page 0, index is page 1, content starts at 2.
    let first_content = 2usize;
    let mut starts = Vec::with_capacity(ordered.len());
    let mut next = first_content;
    for (section, &span) in ordered.iter().copied().zip(&spans) {
        starts.push(SectionStart {
            id: section.id.clone(),
            title: section.title.clone(),
            page_index: next,
            display_number: next - first_content + 1,
            span,
        });
        next += span;
    }

    // Pass 2: render in the same fixed order.
    let mut builder = DocumentBuilder::new();
    {
        let mut layout = LayoutEngine::new(&mut builder);
        draw_plan_cover(&mut layout);
        draw_index_page(&mut layout, &ordered, &starts);
        for (ordinal, section) in ordered.iter().copied().enumerate() {
            draw_divider_page(&mut layout, ordinal, section);
            for tab in &section.pages {
                let cursor = layout.start_page();
                render_tab_content(&mut layout, cursor, tab);
            }
        }
    }
    apply_footers(&mut builder, first_content);

    let page_count = builder.page_count();
    let document = builder.build("Full Business Plan")?;
    Ok(RenderedDocument {
        document,
        page_count,
        sections: starts,
    })
}

/// Pages a section occupies in the full plan: however many pages its
/// divider and tabs actually lay out to.
///
/// The divider is laid out too, not assumed to be one page: its tab-title
/// list paginates like any other bullet list, and a tab-heavy section can
/// spill it onto a second page.
fn section_page_span(section: &CardSection) -> usize {
    let mut scratch = DocumentBuilder::new();
    {
        let mut layout = LayoutEngine::new(&mut scratch);
        draw_divider_page(&mut layout, 0, section);
        for tab in &section.pages {
            let cursor = layout.start_page();
            render_tab_content(&mut layout, cursor, tab);
        }
    }
    scratch.page_count()
}

/// Render one tab's content starting at `cursor` (a fresh page).
fn render_tab_content(layout: &mut LayoutEngine<'_>, cursor: Cursor, tab: &Tab) -> Cursor {
    let mut cursor = layout.title_block(cursor, &tab.title, NAVY, 18.0);
    cursor = layout.rule_line(cursor, ACCENT);

    if let Some(image) = &tab.image {
        cursor = layout.image_block(cursor, image, tab.image_layout, tab.image_alt.as_deref());
    }

    if let Some(overview) = &tab.content.overview {
        cursor = layout.filled_box(cursor, overview, BOX_FILL);
    }

    if tab.show_custom_visual {
        if let Some(key) = &tab.custom_visual_component {
            cursor = layout.heading_aware_block(cursor, visual_block(key));
        }
    }

    for section in &tab.content.sections {
        cursor = render_text_section(layout, cursor, section);
    }
    cursor
}

fn render_text_section(
    layout: &mut LayoutEngine<'_>,
    cursor: Cursor,
    section: &TextSection,
) -> Cursor {
    let mut cursor = layout.page_break_if_needed(cursor, 40.0);
    cursor = layout.title_block(cursor, &section.title, INK, 13.0);

    if let Some(subtitle) = &section.subtitle {
        cursor = layout.wrapped_text(
            cursor,
            subtitle,
            SIDE_MARGIN,
            CONTENT_WIDTH,
            11.0,
            Font::Oblique,
            ACCENT,
        );
        cursor.y += 4.0;
    }

    if let Some(members) = &section.team_members {
        cursor = layout.team_cards(cursor, members);
    }

    if let Some(items) = &section.items {
        cursor = layout.bullet_list(cursor, items);
    }

    if let Some(conclusion) = &section.conclusion {
        cursor = layout.conclusion_box(cursor, conclusion);
    }

    cursor.y += 18.0;
    cursor
}

/// Cover for a single-section export.
fn draw_section_cover(layout: &mut LayoutEngine<'_>, section: &CardSection) {
    let cursor = layout.start_page();
    let page = cursor.page;
    let builder = layout.builder();
    builder.fill_rect(
        page,
        Rect { x: 0.0, y: 0.0, width: PAGE_WIDTH, height: PAGE_HEIGHT },
        NAVY,
    );
    builder.text(page, SIDE_MARGIN, 140.0, Font::Bold, 30.0, PAPER, WORDMARK);
    builder.text(
        page,
        SIDE_MARGIN,
        320.0,
        Font::Bold,
        26.0,
        PAPER,
        &sanitize(&section.title),
    );
    builder.text(
        page,
        SIDE_MARGIN,
        352.0,
        Font::Regular,
        13.0,
        BOX_FILL,
        &sanitize(&section.subtitle),
    );
    builder.text(page, SIDE_MARGIN, 420.0, Font::Oblique, 11.0, BOX_FILL, COVER_CAPTION);
    builder.text(
        page,
        SIDE_MARGIN,
        PAGE_HEIGHT - 72.0,
        Font::Regular,
        10.0,
        BOX_FILL,
        &date_stamp(),
    );
}

/// Cover for the full-plan export, with the fixed funding ask.
fn draw_plan_cover(layout: &mut LayoutEngine<'_>) {
    let cursor = layout.start_page();
    let page = cursor.page;
    let builder = layout.builder();
    builder.fill_rect(
        page,
        Rect { x: 0.0, y: 0.0, width: PAGE_WIDTH, height: PAGE_HEIGHT },
        NAVY,
    );
    builder.text(page, SIDE_MARGIN, 140.0, Font::Bold, 30.0, PAPER, WORDMARK);
    builder.text(page, SIDE_MARGIN, 320.0, Font::Bold, 28.0, PAPER, "Full Business Plan");
    builder.text(page, SIDE_MARGIN, 368.0, Font::Bold, 16.0, PAPER, FUNDING_ASK);
    builder.text(page, SIDE_MARGIN, 412.0, Font::Oblique, 11.0, BOX_FILL, COVER_CAPTION);
    builder.text(
        page,
        SIDE_MARGIN,
        PAGE_HEIGHT - 72.0,
        Font::Regular,
        10.0,
        BOX_FILL,
        &date_stamp(),
    );
}

/// The index page: one colored, clickable card per section, citing the
/// resolved start page.
fn draw_index_page(
    layout: &mut LayoutEngine<'_>,
    sections: &[&CardSection; 6],
    starts: &[SectionStart],
) {
    let cursor = layout.start_page();
    let page = cursor.page;
    let mut cursor = layout.title_block(cursor, "Contents", NAVY, 22.0);
    cursor = layout.rule_line(cursor, ACCENT);
    cursor.y += 8.0;

    const CARD_HEIGHT: f64 = 92.0;
    const CARD_GAP: f64 = 14.0;

    for (ordinal, (section, start)) in sections.iter().zip(starts).enumerate() {
        let color = section_color(ordinal);
        let rect = Rect {
            x: SIDE_MARGIN,
            y: cursor.y,
            width: CONTENT_WIDTH,
            height: CARD_HEIGHT,
        };
        let builder = layout.builder();
        builder.fill_rounded_rect(page, rect, 8.0, color);

        let number = format!("{:02}", ordinal + 1);
        builder.text(page, rect.x + 18.0, rect.y + 48.0, Font::Bold, 30.0, PAPER, &number);

        let text_x = rect.x + 76.0;
        builder.text(
            page,
            text_x,
            rect.y + 34.0,
            Font::Bold,
            14.0,
            PAPER,
            &sanitize(&section.title),
        );
        let subtitle_line = sanitize(section.subtitle.lines().next().unwrap_or(""));
        builder.text(page, text_x, rect.y + 54.0, Font::Regular, 9.5, BOX_FILL, &subtitle_line);

        let page_label = format!("Page {}", start.display_number);
        let label_x =
            rect.x + rect.width - 18.0 - text_width(&page_label, Font::Bold, 11.0);
        builder.text(page, label_x, rect.y + 48.0, Font::Bold, 11.0, PAPER, &page_label);

        builder.link(page, rect, start.page_index);
        cursor.y += CARD_HEIGHT + CARD_GAP;
    }
}

/// Full-page section divider: colored header band, ordinal, title,
/// subtitle, and the section's tab titles.
fn draw_divider_page(layout: &mut LayoutEngine<'_>, ordinal: usize, section: &CardSection) {
    let cursor = layout.start_page();
    let page = cursor.page;
    let color = section_color(ordinal);

    {
        let builder = layout.builder();
        builder.fill_rect(
            page,
            Rect { x: 0.0, y: 0.0, width: PAGE_WIDTH, height: 150.0 },
            color,
        );
        builder.text(page, SIDE_MARGIN, 70.0, Font::Bold, 34.0, PAPER, &format!("{:02}", ordinal + 1));
        builder.text(
            page,
            SIDE_MARGIN,
            112.0,
            Font::Bold,
            24.0,
            PAPER,
            &sanitize(&section.title),
        );
    }

    let mut cursor = Cursor { page, y: 180.0 };
    cursor = layout.wrapped_text(
        cursor,
        &section.subtitle,
        SIDE_MARGIN,
        CONTENT_WIDTH,
        12.0,
        Font::Regular,
        INK,
    );
    cursor.y += 6.0;
    cursor = layout.rule_line(cursor, color);
    cursor.y += 10.0;

    cursor = layout.wrapped_text(
        cursor,
        "In this section",
        SIDE_MARGIN,
        CONTENT_WIDTH,
        11.0,
        Font::Bold,
        MUTED,
    );
    cursor.y += 2.0;
    let titles: Vec<String> = section.pages.iter().map(|t| t.title.clone()).collect();
    layout.bullet_list(cursor, &titles);
}

/// Apply "page n of content" footers to every page from
/// `first_content_page` on. Pages before it (cover, index) get none.
fn apply_footers(builder: &mut DocumentBuilder, first_content_page: usize) {
    let total = builder.page_count();
    let footer_y = PAGE_HEIGHT - 22.0;
    for page in first_content_page..total {
        let number = page - first_content_page + 1;
        builder.text(page, SIDE_MARGIN, footer_y, Font::Regular, 8.0, MUTED, COPYRIGHT);
        let label = format!("Page {number}");
        let x = PAGE_WIDTH - SIDE_MARGIN - text_width(&label, Font::Regular, 8.0);
        builder.text(page, x, footer_y, Font::Regular, 8.0, MUTED, &label);
    }
}

fn date_stamp() -> String {
    Local::now().format("%d %B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TabContent;

    fn tab(title: &str, bullet_count: usize) -> Tab {
        Tab::new(
            title,
            TabContent {
                overview: Some("Overview paragraph.".into()),
                sections: vec![TextSection::with_items(
                    "Detail",
                    (0..bullet_count).map(|i| format!("Item {i}")).collect(),
                )],
            },
        )
    }

    fn section(id: &str, title: &str, tabs: usize) -> CardSection {
        CardSection {
            id: id.into(),
            title: title.into(),
            subtitle: "A subtitle line".into(),
            pages: (0..tabs).map(|i| tab(&format!("{title} tab {i}"), 4)).collect(),
        }
    }

    #[test]
    fn test_single_section_page_count() {
        let rendered = render_section(&section("s", "Strategy", 3)).unwrap();
        // Cover plus one page per tab.
        assert_eq!(rendered.page_count, 4);
        assert_eq!(rendered.document.get_pages().len(), 4);
    }

    #[test]
    fn test_empty_section_renders_cover_only() {
        let rendered = render_section(&section("s", "Strategy", 0)).unwrap();
        assert_eq!(rendered.page_count, 1);
    }

    #[test]
    fn test_section_span_counts_divider_and_tabs() {
        assert_eq!(section_page_span(&section("s", "S", 0)), 1);
        assert_eq!(section_page_span(&section("s", "S", 3)), 4);
    }

    #[test]
    fn test_span_counts_divider_overflow() {
        // Forty tab titles overflow the divider's bullet list onto a
        // second page, so the section occupies 2 + 40 pages.
        let s = section("s", "S", 40);
        assert_eq!(section_page_span(&s), 42);
    }

    #[test]
    fn test_tab_heavy_section_keeps_index_exact() {
        let mut cards = BusinessPlanCards::default();
        cards.strategy_positioning = section("strategyPositioning", "Strategy", 40);
        cards.customers_market = section("customersMarket", "Customers", 1);
        cards.roadmap_product = section("roadmapProduct", "Roadmap", 1);
        cards.commercials = section("commercials", "Commercials", 1);
        cards.team = section("team", "Team", 1);
        cards.financials = section("financials", "Financials", 1);

        let rendered = render_full_plan(&cards).unwrap();
        // The start-page table must account for every page the document
        // actually has, divider spill included.
        let promised: usize = 2 + rendered.sections.iter().map(|s| s.span).sum::<usize>();
        assert_eq!(rendered.page_count, promised);
        assert!(rendered.sections[0].span > 41, "divider spill not counted");
        assert_eq!(
            rendered.sections[1].page_index,
            2 + rendered.sections[0].span
        );
    }

    #[test]
    fn test_span_counts_interior_pagination() {
        // A tab whose bullets overflow one page must count as two.
        let mut s = section("s", "S", 0);
        s.pages.push(tab("Tall", 120));
        assert!(section_page_span(&s) >= 3);
    }

    #[test]
    fn test_full_plan_start_pages_match_formula() {
        let mut cards = BusinessPlanCards::default();
        cards.strategy_positioning = section("strategyPositioning", "Strategy", 2);
        cards.customers_market = section("customersMarket", "Customers", 1);
        cards.roadmap_product = section("roadmapProduct", "Roadmap", 3);
        cards.commercials = section("commercials", "Commercials", 1);
        cards.team = section("team", "Team", 1);
        cards.financials = section("financials", "Financials", 2);

        let rendered = render_full_plan(&cards).unwrap();
        let tab_counts = [2, 1, 3, 1, 1, 2];

        // Cover = page 0, index = page 1; no tab here overflows, so each
        // start page follows directly from the tab counts.
        let mut expected = 2usize;
        for (i, start) in rendered.sections.iter().enumerate() {
            assert_eq!(start.page_index, expected, "section {i} start");
            assert_eq!(start.display_number, expected - 1, "section {i} display");
            assert_eq!(start.span, 1 + tab_counts[i], "section {i} span");
            expected += start.span;
        }
        assert_eq!(rendered.page_count, expected);
    }

    #[test]
    fn test_full_plan_order_is_fixed() {
        let mut cards = BusinessPlanCards::default();
        // Construct in reverse; rendering order must not care.
        cards.financials = section("financials", "Financials", 1);
        cards.team = section("team", "Team", 1);
        cards.commercials = section("commercials", "Commercials", 1);
        cards.roadmap_product = section("roadmapProduct", "Roadmap", 1);
        cards.customers_market = section("customersMarket", "Customers", 1);
        cards.strategy_positioning = section("strategyPositioning", "Strategy", 1);

        let rendered = render_full_plan(&cards).unwrap();
        let ids: Vec<&str> = rendered.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "strategyPositioning",
                "customersMarket",
                "roadmapProduct",
                "commercials",
                "team",
                "financials"
            ]
        );
    }

    #[test]
    fn test_unknown_visual_key_renders_like_none() {
        let mut with_unknown = tab("T", 2);
        with_unknown.show_custom_visual = true;
        with_unknown.custom_visual_component = Some("no-such-block".into());
        let mut without = tab("T", 2);
        without.show_custom_visual = false;

        let a = render_section(&CardSection {
            id: "s".into(),
            title: "S".into(),
            subtitle: "Sub".into(),
            pages: vec![with_unknown],
        })
        .unwrap();
        let b = render_section(&CardSection {
            id: "s".into(),
            title: "S".into(),
            subtitle: "Sub".into(),
            pages: vec![without],
        })
        .unwrap();
        assert_eq!(a.page_count, b.page_count);
    }
}
