//! Structured analysis payloads
//!
//! Each analyst extracts one of these from every batch of search results.
//! All fields carry schema defaults, so a sparse model reply still yields a
//! complete value; merge semantics are launch-order (scalar groups take the
//! last unit's value, lists concatenate).

pub mod economic;
pub mod industry;

pub use economic::{
    DomesticEconomics, EconomicData, EconomicRiskItem, GlobalEconomics, IndustryEconomics,
};
pub use industry::{
    CompetitorItem, IndustryData, IndustryMetrics, NewsItem, PortersForce, ProjectionItem,
    RiskItem,
};
