//! Page geometry, fonts, and brand constants.

/// A4 portrait, points.
pub const PAGE_WIDTH: f64 = 595.28;
pub const PAGE_HEIGHT: f64 = 841.89;

/// Left/right page margin.
pub const SIDE_MARGIN: f64 = 48.0;

/// Top-of-page content start.
pub const TOP_MARGIN: f64 = 56.0;

/// Single bottom-margin constant used by every overflow check.
pub const BOTTOM_MARGIN: f64 = 40.0;

/// Usable content width.
pub const CONTENT_WIDTH: f64 = PAGE_WIDTH - 2.0 * SIDE_MARGIN;

/// Line height as a multiple of font size.
pub const LINE_HEIGHT: f64 = 1.4;

/// Product wordmark drawn on covers and footers.
pub const WORDMARK: &str = "Hobson";

/// Cover caption under the section title.
pub const COVER_CAPTION: &str = "Property documents, answered.";

/// Fixed funding-ask figure on the full-plan cover.
pub const FUNDING_ASK: &str = "Raising GBP 750,000";

/// Footer copyright line.
pub const COPYRIGHT: &str = "(c) Hobson AI Ltd. Confidential.";

/// The three resource fonts available to content streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
    Oblique,
}

impl Font {
    /// PDF resource name (/F1../F3).
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Oblique => "F3",
        }
    }

    /// Base-14 font name for the font dictionary.
    pub fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
            Font::Oblique => "Helvetica-Oblique",
        }
    }
}

/// An RGB color with components in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// Near-black body text.
pub const INK: Rgb = Rgb::new(0.13, 0.15, 0.18);

/// Secondary grey for captions and footers.
pub const MUTED: Rgb = Rgb::new(0.45, 0.48, 0.52);

/// Brand navy, used for covers and title blocks.
pub const NAVY: Rgb = Rgb::new(0.08, 0.14, 0.32);

/// Accent teal for subtitles and rules.
pub const ACCENT: Rgb = Rgb::new(0.05, 0.55, 0.55);

/// Filled info-box background.
pub const BOX_FILL: Rgb = Rgb::new(0.93, 0.95, 0.97);

/// Conclusion-box background.
pub const CONCLUSION_FILL: Rgb = Rgb::new(0.92, 0.97, 0.95);

/// White, for text on dark fills.
pub const PAPER: Rgb = Rgb::new(1.0, 1.0, 1.0);

/// Fixed six-color palette for index cards and section dividers,
/// cycled by section position.
pub const SECTION_PALETTE: [Rgb; 6] = [
    Rgb::new(0.08, 0.14, 0.32), // navy
    Rgb::new(0.05, 0.55, 0.55), // teal
    Rgb::new(0.76, 0.36, 0.10), // amber
    Rgb::new(0.44, 0.16, 0.46), // plum
    Rgb::new(0.13, 0.45, 0.22), // green
    Rgb::new(0.62, 0.13, 0.21), // crimson
];

/// Palette color for a section ordinal (0-based), cycling past six.
pub fn section_color(index: usize) -> Rgb {
    SECTION_PALETTE[index % SECTION_PALETTE.len()]
}
