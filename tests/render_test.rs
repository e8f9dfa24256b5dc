//! Integration tests for deck rendering: page counts, index resolution,
//! link targets, and file naming.

use hobson_deck::{
    derive_filename, export_full_plan, export_section, render_full_plan, render_section,
    BusinessPlanCards, CardSection, Tab, TabContent, TextSection,
};

fn tab(title: &str, bullets: usize) -> Tab {
    Tab::new(
        title,
        TabContent {
            overview: Some("What this page covers.".into()),
            sections: vec![TextSection::with_items(
                "Key points",
                (0..bullets).map(|i| format!("Point number {i}")).collect(),
            )],
        },
    )
}

fn section(id: &str, title: &str, tabs: usize) -> CardSection {
    CardSection {
        id: id.into(),
        title: title.into(),
        subtitle: format!("{title} in brief"),
        pages: (0..tabs).map(|i| tab(&format!("{title} {i}"), 5)).collect(),
    }
}

fn plan(tab_counts: [usize; 6]) -> BusinessPlanCards {
    BusinessPlanCards {
        strategy_positioning: section("strategyPositioning", "Strategy", tab_counts[0]),
        customers_market: section("customersMarket", "Customers", tab_counts[1]),
        roadmap_product: section("roadmapProduct", "Roadmap", tab_counts[2]),
        commercials: section("commercials", "Commercials", tab_counts[3]),
        team: section("team", "Team", tab_counts[4]),
        financials: section("financials", "Financials", tab_counts[5]),
    }
}

#[test]
fn test_full_plan_page_arithmetic() {
    let tab_counts = [2, 1, 3, 1, 2, 4];
    let rendered = render_full_plan(&plan(tab_counts)).unwrap();

    // Cover + index + per section (divider + tabs); no tab overflows here.
    let expected_total: usize = 2 + tab_counts.iter().map(|n| 1 + n).sum::<usize>();
    assert_eq!(rendered.page_count, expected_total);
    assert_eq!(rendered.document.get_pages().len(), expected_total);

    let mut expected_start = 2;
    for (i, start) in rendered.sections.iter().enumerate() {
        assert_eq!(start.page_index, expected_start, "section {i}");
        assert_eq!(start.span, 1 + tab_counts[i]);
        expected_start += start.span;
    }
}

#[test]
fn test_index_links_point_at_section_dividers() {
    let rendered = render_full_plan(&plan([1, 1, 2, 1, 1, 1])).unwrap();
    let doc = &rendered.document;
    let pages = doc.get_pages();

    // The index is physical page 2 in lopdf's 1-based numbering.
    let index_page = doc.get_dictionary(pages[&2]).unwrap();
    let annots = index_page
        .get(b"Annots")
        .expect("index page has link annotations")
        .as_array()
        .unwrap();
    assert_eq!(annots.len(), 6);

    for (annot, start) in annots.iter().zip(&rendered.sections) {
        let annot = doc.get_dictionary(annot.as_reference().unwrap()).unwrap();
        assert_eq!(annot.get(b"Subtype").unwrap().as_name().unwrap(), b"Link");
        let dest = annot.get(b"Dest").unwrap().as_array().unwrap();
        let target = dest[0].as_reference().unwrap();
        let expected = pages[&(start.page_index as u32 + 1)];
        assert_eq!(target, expected, "link target for {}", start.id);
    }
}

#[test]
fn test_index_stays_exact_when_divider_overflows() {
    // Forty tab titles push the first section's divider onto a second
    // page; the start-page table and link targets must account for it.
    let rendered = render_full_plan(&plan([40, 1, 1, 1, 1, 1])).unwrap();

    let promised: usize = 2 + rendered.sections.iter().map(|s| s.span).sum::<usize>();
    assert_eq!(rendered.page_count, promised);
    assert!(rendered.sections[0].span > 41);

    let doc = &rendered.document;
    let pages = doc.get_pages();
    let index_page = doc.get_dictionary(pages[&2]).unwrap();
    let annots = index_page.get(b"Annots").unwrap().as_array().unwrap();
    for (annot, start) in annots.iter().zip(&rendered.sections) {
        let annot = doc.get_dictionary(annot.as_reference().unwrap()).unwrap();
        let dest = annot.get(b"Dest").unwrap().as_array().unwrap();
        let expected = pages[&(start.page_index as u32 + 1)];
        assert_eq!(
            dest[0].as_reference().unwrap(),
            expected,
            "link target for {}",
            start.id
        );
    }
}

#[test]
fn test_full_plan_order_fixed_regardless_of_tab_counts() {
    let rendered = render_full_plan(&plan([4, 1, 1, 1, 1, 1])).unwrap();
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
fn test_empty_plan_renders_dividers_only() {
    let rendered = render_full_plan(&plan([0, 0, 0, 0, 0, 0])).unwrap();
    // Cover + index + six dividers.
    assert_eq!(rendered.page_count, 8);
    for (i, start) in rendered.sections.iter().enumerate() {
        assert_eq!(start.span, 1);
        assert_eq!(start.page_index, 2 + i);
        assert_eq!(start.display_number, i + 1);
    }
}

#[test]
fn test_single_section_counts() {
    let rendered = render_section(&section("financials", "Financials", 3)).unwrap();
    assert_eq!(rendered.page_count, 4);
    assert!(rendered.sections.is_empty());
}

#[test]
fn test_empty_section_is_cover_only() {
    let rendered = render_section(&section("financials", "Financials", 0)).unwrap();
    assert_eq!(rendered.page_count, 1);
}

#[test]
fn test_bullet_overflow_adds_pages() {
    let mut s = section("strategy", "Strategy", 0);
    s.pages.push(tab("Dense", 150));
    let rendered = render_section(&s).unwrap();
    // Cover plus at least two pages of bullets.
    assert!(rendered.page_count >= 3, "got {}", rendered.page_count);
}

#[test]
fn test_custom_visual_unknown_key_is_inert() {
    let mut with_unknown = section("s", "S", 1);
    with_unknown.pages[0].show_custom_visual = true;
    with_unknown.pages[0].custom_visual_component = Some("never-heard-of-it".into());
    let plain = section("s", "S", 1);

    let a = render_section(&with_unknown).unwrap();
    let b = render_section(&plain).unwrap();
    assert_eq!(a.page_count, b.page_count);
}

#[test]
fn test_known_visual_block_renders() {
    let mut s = section("financials", "Financials", 1);
    s.pages[0].show_custom_visual = true;
    s.pages[0].custom_visual_component = Some("revenue-projections".into());
    let rendered = render_section(&s).unwrap();
    assert!(rendered.page_count >= 2);
}

#[test]
fn test_malformed_image_is_skipped_not_fatal() {
    let mut s = section("s", "S", 1);
    s.pages[0].image = Some(b"definitely not a jpeg".to_vec());
    let rendered = render_section(&s).unwrap();
    assert_eq!(rendered.page_count, 2);
}

#[test]
fn test_export_writes_named_files() {
    let dir = tempfile::tempdir().unwrap();

    let path = export_section(&section("s", "My Plan: Q1/Q2", 1), dir.path()).unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "Hobson-My-Plan--Q1-Q2.pdf"
    );
    assert!(path.exists());
    assert!(std::fs::metadata(&path).unwrap().len() > 0);

    let path = export_full_plan(&plan([1, 1, 1, 1, 1, 1]), dir.path()).unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "Hobson-Full-Business-Plan.pdf"
    );
    assert!(path.exists());
}

#[test]
fn test_derive_filename_rule() {
    assert_eq!(derive_filename("Team & Hiring"), "Hobson-Team---Hiring.pdf");
    assert_eq!(derive_filename("2026 Roadmap"), "Hobson-2026-Roadmap.pdf");
}

#[test]
fn test_saved_file_reparses() {
    let dir = tempfile::tempdir().unwrap();
    let path = export_full_plan(&plan([1, 0, 1, 0, 1, 0]), dir.path()).unwrap();
    let doc = lopdf::Document::load(&path).unwrap();
    assert_eq!(doc.get_pages().len(), 2 + 6 + 3);
}
