//! Generated resources: an in-memory resource pack plus the loot table,
//! tag, model, blockstate and lang generators that fill it.
#![forbid(unsafe_code)]

pub mod archive;
pub mod datagen;
pub mod error;
pub mod lang;

pub use archive::{PackMeta, ResourceType, VirtualPack};
pub use error::{PackError, Result};
pub use lang::{LangBuilder, LangManifest};
