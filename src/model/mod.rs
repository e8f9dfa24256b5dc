//! Content model for the deck renderer.
//!
//! This module defines the hierarchical plan structure the renderer
//! consumes: sections of tabs, each tab holding overview text, optional
//! imagery, and ordered text sections. The tree is produced fully formed
//! by the caller and consumed once per export.

mod plan;

pub use plan::{
    BusinessPlanCards, CardSection, ImageLayout, ImageMode, Tab, TabContent, TeamMember,
    TextSection,
};
