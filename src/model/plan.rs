//! Content model for the business-plan deck.
//!
//! All types are immutable value types constructed fully formed by the
//! caller and consumed once per export. The renderer never mutates them.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One titled block of text content inside a tab.
///
/// Every field except `title` is optional; a section with nothing but a
/// title still renders (as the title alone).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSection {
    /// Section heading
    pub title: String,

    /// Optional accent-colored subheading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Bullet items, rendered in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,

    /// Closing remark, rendered in a rounded box
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,

    /// Team members, rendered as a card grid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_members: Option<Vec<TeamMember>>,
}

impl TextSection {
    /// Create a section with a title and bullet items.
    pub fn with_items(title: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            title: title.into(),
            items: Some(items),
            ..Default::default()
        }
    }
}

/// A person rendered as a fixed-size card in the team grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub role: String,

    /// Profile URL, shown in small print when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

/// The body content of a tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabContent {
    /// Lead-in paragraph drawn in a filled info box
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,

    /// Text sections, rendered in order
    #[serde(default)]
    pub sections: Vec<TextSection>,
}

/// How an embedded image is placed on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageMode {
    /// Placed in the text flow at a default wide aspect
    #[default]
    Inline,
    /// Given a dedicated page of its own before the text content
    FullPage,
}

/// Explicit image placement hint carried by the content author.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLayout {
    pub mode: ImageMode,
    /// Width divided by height of the drawn area
    pub aspect_ratio: f64,
}

impl Default for ImageLayout {
    fn default() -> Self {
        Self {
            mode: ImageMode::Inline,
            aspect_ratio: 16.0 / 9.0,
        }
    }
}

impl ImageLayout {
    /// Inline placement at the default wide aspect.
    pub fn inline() -> Self {
        Self::default()
    }

    /// Dedicated-page placement at a tall aspect, used for architecture
    /// diagrams and similar portrait artwork.
    pub fn full_page(aspect_ratio: f64) -> Self {
        Self {
            mode: ImageMode::FullPage,
            aspect_ratio,
        }
    }
}

/// One logical page of content within a section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    /// Tab heading, drawn above a rule line
    pub title: String,

    /// Body content
    #[serde(default)]
    pub content: TabContent,

    /// Raster image payload (JPEG or PNG bytes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<u8>>,

    /// Alt text drawn as a caption under the image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,

    /// Placement hint for `image`
    #[serde(default)]
    pub image_layout: ImageLayout,

    /// Substitute a pre-authored visual block for a chart
    #[serde(default)]
    pub show_custom_visual: bool,

    /// Key into the visual-block library, used when `show_custom_visual`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_visual_component: Option<String>,
}

impl Tab {
    /// Create a tab with a title and content.
    pub fn new(title: impl Into<String>, content: TabContent) -> Self {
        Self {
            title: title.into(),
            content,
            ..Default::default()
        }
    }
}

/// A top-level grouping of tabs, one card of the deck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardSection {
    /// Stable key, used for page-number lookup and CLI selection
    pub id: String,
    pub title: String,
    pub subtitle: String,

    /// Tabs, rendered in order
    #[serde(default)]
    pub pages: Vec<Tab>,
}

/// The exact fixed set of six deck sections.
///
/// Order is part of the rendering contract and fixed by field name, not by
/// construction order: strategy and positioning, customers and market,
/// roadmap and product, commercials, team, financials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessPlanCards {
    pub strategy_positioning: CardSection,
    pub customers_market: CardSection,
    pub roadmap_product: CardSection,
    pub commercials: CardSection,
    pub team: CardSection,
    pub financials: CardSection,
}

impl BusinessPlanCards {
    /// The sections in their fixed rendering order.
    pub fn ordered(&self) -> [&CardSection; 6] {
        [
            &self.strategy_positioning,
            &self.customers_market,
            &self.roadmap_product,
            &self.commercials,
            &self.team,
            &self.financials,
        ]
    }

    /// Look up a section by its stable id.
    pub fn section(&self, id: &str) -> Option<&CardSection> {
        self.ordered().into_iter().find(|s| s.id == id)
    }

    /// Parse a full plan from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl CardSection {
    /// Parse a single section from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_is_fixed_by_name() {
        let mut cards = BusinessPlanCards::default();
        // Assign out of order; the walk must not care.
        cards.financials.id = "financials".into();
        cards.team.id = "team".into();
        cards.strategy_positioning.id = "strategyPositioning".into();
        cards.customers_market.id = "customersMarket".into();
        cards.roadmap_product.id = "roadmapProduct".into();
        cards.commercials.id = "commercials".into();

        let ids: Vec<&str> = cards.ordered().iter().map(|s| s.id.as_str()).collect();
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
    fn test_section_lookup() {
        let mut cards = BusinessPlanCards::default();
        cards.team.id = "team".into();
        cards.team.title = "Team".into();
        assert_eq!(cards.section("team").map(|s| s.title.as_str()), Some("Team"));
        assert!(cards.section("missing").is_none());
    }

    #[test]
    fn test_plan_round_trips_through_json() {
        let mut cards = BusinessPlanCards::default();
        cards.commercials = CardSection {
            id: "commercials".into(),
            title: "Commercials".into(),
            subtitle: "Pricing and packaging".into(),
            pages: vec![Tab::new(
                "Pricing",
                TabContent {
                    overview: Some("Per-document pricing.".into()),
                    sections: vec![TextSection::with_items(
                        "Tiers",
                        vec!["Starter".into(), "Portfolio".into()],
                    )],
                },
            )],
        };

        let json = serde_json::to_string(&cards).unwrap();
        let back = BusinessPlanCards::from_json(&json).unwrap();
        assert_eq!(back, cards);
    }

    #[test]
    fn test_image_layout_defaults_inline_wide() {
        let layout = ImageLayout::default();
        assert_eq!(layout.mode, ImageMode::Inline);
        assert!((layout.aspect_ratio - 16.0 / 9.0).abs() < 1e-9);
    }
}
