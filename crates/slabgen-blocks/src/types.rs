use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Namespace used when a raw identity carries none.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("empty {part} in identifier {input:?}")]
    Empty { part: &'static str, input: String },
    #[error("invalid character {ch:?} in {part} of identifier {input:?}")]
    InvalidChar {
        part: &'static str,
        ch: char,
        input: String,
    },
}

/// Namespaced name, `namespace:path`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    namespace: String,
    path: String,
}

impl Identifier {
    pub fn new(namespace: &str, path: &str) -> Result<Self, IdentifierError> {
        let input = || format!("{namespace}:{path}");
        if namespace.is_empty() {
            return Err(IdentifierError::Empty {
                part: "namespace",
                input: input(),
            });
        }
        if path.is_empty() {
            return Err(IdentifierError::Empty {
                part: "path",
                input: input(),
            });
        }
        if let Some(ch) = namespace.chars().find(|c| !valid_namespace_char(*c)) {
            return Err(IdentifierError::InvalidChar {
                part: "namespace",
                ch,
                input: input(),
            });
        }
        if let Some(ch) = path.chars().find(|c| !valid_path_char(*c)) {
            return Err(IdentifierError::InvalidChar {
                part: "path",
                ch,
                input: input(),
            });
        }
        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Parses `namespace:path`, or a bare `path` in the default namespace.
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        match raw.split_once(':') {
            Some((ns, path)) => Self::new(ns, path),
            None => Self::new(DEFAULT_NAMESPACE, raw),
        }
    }

    #[inline]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Same namespace, `prefix` prepended to the path (e.g. `block/`).
    pub fn with_path_prefix(&self, prefix: &str) -> Identifier {
        Identifier {
            namespace: self.namespace.clone(),
            path: format!("{prefix}{}", self.path),
        }
    }
}

#[inline]
fn valid_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.')
}

#[inline]
fn valid_path_char(c: char) -> bool {
    valid_namespace_char(c) || c == '/'
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> String {
        id.to_string()
    }
}

/// Packed `0xRRGGBB` map color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MapColor(pub u32);

impl MapColor {
    pub const STONE: MapColor = MapColor(0x707070);
    pub const WOOD: MapColor = MapColor(0x8f7748);
}

/// Host-side data for a block seen during discovery.
#[derive(Clone, Debug, PartialEq)]
pub struct DiscoveredBlock {
    pub material: String,
    pub map_color: MapColor,
    pub sound_group: String,
    /// Item form, `None` when the block has no item.
    pub item: Option<Identifier>,
}

impl DiscoveredBlock {
    pub fn new(material: impl Into<String>, map_color: MapColor, sound_group: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            map_color,
            sound_group: sound_group.into(),
            item: None,
        }
    }

    pub fn with_item(mut self, item: Identifier) -> Self {
        self.item = Some(item);
        self
    }
}

/// Block settings handed to the host when a variant is registered.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockDescriptor {
    pub material: String,
    pub map_color: MapColor,
    pub sound_group: String,
    pub item_group: Option<Identifier>,
    pub with_item: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Fluid {
    #[default]
    Empty,
    Water,
    Lava,
    Other(Identifier),
}

/// Inputs of one placement attempt: the clicked side and the fluid already
/// at the target position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementContext {
    pub side: Direction,
    pub fluid: Fluid,
}

impl PlacementContext {
    pub fn new(side: Direction, fluid: Fluid) -> Self {
        Self { side, fluid }
    }
}
