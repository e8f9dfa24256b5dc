//! Pre-authored visual blocks.
//!
//! The deck substitutes literal text blocks for charts and graphics the
//! exporter does not render. Each block is an ordered list of lines: a line
//! ending in ":" is drawn bold as a heading, an empty line adds vertical
//! gap, and every other line is plain wrapped text. Content here is data,
//! not logic; it is maintained alongside the on-screen chart components.

/// Look up the lines for a named visual block.
///
/// Unknown keys return an empty slice, which renders as nothing. A tab
/// pointing at a missing block is indistinguishable from one with no
/// visual at all.
pub fn visual_block(key: &str) -> &'static [&'static str] {
    match key {
        "revenue-projections" => REVENUE_PROJECTIONS,
        "cost-structure" => COST_STRUCTURE,
        "unit-economics" => UNIT_ECONOMICS,
        "market-assumptions" => MARKET_ASSUMPTIONS,
        "funding-allocation" => FUNDING_ALLOCATION,
        _ => &[],
    }
}

const REVENUE_PROJECTIONS: &[&str] = &[
    "Revenue Projections (GBP):",
    "",
    "Year 1: 120,000 - pilot portfolios, 8 agency customers",
    "Year 2: 650,000 - 40 agencies, first enterprise landlord",
    "Year 3: 2,100,000 - 120 agencies, 4 enterprise accounts",
    "Year 4: 4,800,000 - channel partnerships live",
    "Year 5: 9,500,000 - UK coverage plus first overseas market",
    "",
    "Growth Drivers:",
    "",
    "Document volume grows with each managed property added, so revenue",
    "compounds within accounts rather than relying on new logos alone.",
    "Renewal pricing is indexed to portfolio size at renewal date.",
];

const COST_STRUCTURE: &[&str] = &[
    "Cost Structure:",
    "",
    "Engineering and product: 55% of operating spend through Year 2",
    "Model inference and hosting: 12%, falling per document with caching",
    "Sales and marketing: 20%, weighted to agency trade events",
    "Compliance and legal: 6%",
    "General and administrative: 7%",
    "",
    "Key Assumption:",
    "",
    "Inference cost per processed document falls 30% year on year as",
    "extraction moves from general models to tuned smaller ones.",
];

const UNIT_ECONOMICS: &[&str] = &[
    "Unit Economics (per agency account):",
    "",
    "Average contract value: GBP 7,800 per year",
    "Gross margin: 81% at current inference pricing",
    "Customer acquisition cost: GBP 2,400 blended",
    "Payback period: 4.5 months",
    "Net revenue retention: 118% (portfolio growth within accounts)",
    "",
    "Churn Profile:",
    "",
    "Logo churn concentrates in the first 90 days, before the document",
    "archive reaches critical mass; accounts past that point renew at 96%.",
];

const MARKET_ASSUMPTIONS: &[&str] = &[
    "Market Assumptions:",
    "",
    "4.6m privately rented homes in the UK, roughly 18,000 letting",
    "agencies, and a mean of 40 compliance documents per tenancy.",
    "",
    "Serviceable Market:",
    "",
    "Agencies managing 200+ properties: about 5,200 firms. At current",
    "pricing this is a GBP 40m serviceable annual market before",
    "enterprise landlords and build-to-rent operators are counted.",
    "",
    "Regulatory Tailwind:",
    "",
    "The Renters' Rights Act expands mandatory documentation per",
    "tenancy; every new requirement increases documents under management.",
];

const FUNDING_ALLOCATION: &[&str] = &[
    "Use of Funds:",
    "",
    "Engineering hires (4 roles): 45%",
    "Go-to-market (2 roles plus events): 25%",
    "Model training and evaluation infrastructure: 15%",
    "Compliance certifications (ISO 27001, Cyber Essentials Plus): 8%",
    "Working capital reserve: 7%",
    "",
    "Runway:",
    "",
    "The round funds 22 months at planned burn, reaching the Year 2",
    "revenue milestone with six months of margin.",
];
