//! Slab families, component discovery, and the vertical slab variant block.
#![forbid(unsafe_code)]

pub mod component;
pub mod family;
pub mod ledger;
pub mod registry;
pub mod types;
pub mod variant;

pub use component::{Component, ComponentKind, KindSet};
pub use family::Family;
pub use registry::FamilyRegistry;
pub use types::{DiscoveredBlock, Identifier};
pub use variant::{VariantBlock, VariantSet, VariantState};
