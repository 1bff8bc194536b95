pub mod aggregate;
pub mod dto;
pub mod edit_state;
pub mod pricing;

pub use aggregate::{
    parse_life_count, Catalog, CatalogEntry, ComparisonHeader, FieldUpdate, LegacyTotals,
    LifeSnapshot, Selection,
};
pub use edit_state::ComparisonEditState;
pub use pricing::{BandLine, ModeBreakdown, PlanValue, PricingContext};
