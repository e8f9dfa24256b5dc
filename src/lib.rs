//! # hobson-deck
//!
//! Paginated business-plan deck renderer for Hobson. Converts a
//! structured plan tree (sections of tabs, each with overview text,
//! optional imagery, and bullet sections) into a multi-page PDF with
//! cover pages, section dividers, footers, and — for the full-plan
//! export — an index page whose page numbers and links are resolved
//! ahead of rendering.
//!
//! ## Quick Start
//!
//! ```no_run
//! use hobson_deck::{export_section, CardSection};
//!
//! fn main() -> hobson_deck::Result<()> {
//!     let section: CardSection =
//!         serde_json::from_str(&std::fs::read_to_string("financials.json")?)?;
//!     let path = export_section(&section, ".")?;
//!     println!("wrote {}", path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Design
//!
//! - **Sanitize first**: all content text is normalized to the base-14
//!   Helvetica repertoire before it is measured or drawn.
//! - **Explicit cursor**: every layout primitive is `(cursor, content) ->
//!   cursor'`, with one shared bottom-margin overflow guard.
//! - **Two-pass index**: section start pages are computed by a pure
//!   counting pass before anything is drawn, so index links are exact.
//! - **Save last**: nothing is written to disk until the whole document
//!   is assembled; a failed export leaves no partial file.

pub mod error;
pub mod model;
pub mod render;
pub mod sanitize;
pub mod visuals;

pub use error::{Error, Result};
pub use model::{
    BusinessPlanCards, CardSection, ImageLayout, ImageMode, Tab, TabContent, TeamMember,
    TextSection,
};
pub use render::{render_full_plan, render_section, RenderedDocument, SectionStart};
pub use sanitize::sanitize;
pub use visuals::visual_block;

use std::path::{Path, PathBuf};

/// Fixed output name for the full-plan export.
const FULL_PLAN_FILENAME: &str = "Hobson-Full-Business-Plan.pdf";

/// Derive the output filename for a section title.
///
/// Every non-alphanumeric character is replaced 1:1 with `-`; consecutive
/// specials stay consecutive dashes. This replacement rule is authoritative:
/// no dashes are added, dropped, or collapsed beyond it.
pub fn derive_filename(title: &str) -> String {
    let slug: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("Hobson-{slug}.pdf")
}

/// Render a single section and save it under `dir` as
/// `Hobson-<derived-title>.pdf`. Returns the written path.
///
/// The document is assembled fully in memory first; if rendering fails,
/// nothing is written.
pub fn export_section<P: AsRef<Path>>(section: &CardSection, dir: P) -> Result<PathBuf> {
    let mut rendered = render_section(section)?;
    let path = dir.as_ref().join(derive_filename(&section.title));
    rendered.document.save(&path)?;
    Ok(path)
}

/// Render the full six-section plan and save it under `dir` as
/// `Hobson-Full-Business-Plan.pdf`. Returns the written path.
pub fn export_full_plan<P: AsRef<Path>>(cards: &BusinessPlanCards, dir: P) -> Result<PathBuf> {
    let mut rendered = render_full_plan(cards)?;
    let path = dir.as_ref().join(FULL_PLAN_FILENAME);
    rendered.document.save(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_filename_one_to_one() {
        assert_eq!(derive_filename("My Plan: Q1/Q2"), "Hobson-My-Plan--Q1-Q2.pdf");
        assert_eq!(derive_filename("Financials"), "Hobson-Financials.pdf");
        // Consecutive specials are not collapsed.
        assert_eq!(derive_filename("a  b"), "Hobson-a--b.pdf");
        assert_eq!(derive_filename(""), "Hobson-.pdf");
    }
}
