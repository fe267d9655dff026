use std::fmt;

use thiserror::Error;

use crate::types::{DiscoveredBlock, Identifier, MapColor};

/// Picks the family a discovered block belongs to, `None` when the block is not this kind.
pub type Filter = fn(&Identifier, &DiscoveredBlock) -> Option<Identifier>;

/// Resolves the texture a family should use for a component of some kind.
pub type TextureProvider = fn(&Component) -> Identifier;

pub const BASIC_TEXTURE_PROVIDER: TextureProvider = Component::texture;

const SLAB_SUFFIX: &str = "_slab";

/// Closed set of component classifications, in priority order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Slab,
    Base,
}

struct KindRules {
    filter: Filter,
    texture: TextureProvider,
}

impl ComponentKind {
    pub const COUNT: usize = 2;
    /// Classification order; the first kind that matches wins.
    pub const ALL: [ComponentKind; Self::COUNT] = [ComponentKind::Slab, ComponentKind::Base];

    const fn rules(self) -> KindRules {
        match self {
            ComponentKind::Slab => KindRules {
                filter: slab_filter,
                texture: BASIC_TEXTURE_PROVIDER,
            },
            ComponentKind::Base => KindRules {
                filter: base_filter,
                texture: BASIC_TEXTURE_PROVIDER,
            },
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            ComponentKind::Slab => "slab",
            ComponentKind::Base => "base",
        }
    }

    /// Family identity for `id` under this kind, if `id` is this kind at all.
    pub fn filter(self, id: &Identifier, block: &DiscoveredBlock) -> Option<Identifier> {
        (self.rules().filter)(id, block)
    }

    pub fn texture(self, component: &Component) -> Identifier {
        (self.rules().texture)(component)
    }

    /// First kind in priority order that claims `id`, with the derived family identity.
    pub fn classify(id: &Identifier, block: &DiscoveredBlock) -> Option<(ComponentKind, Identifier)> {
        Self::ALL
            .into_iter()
            .find_map(|kind| kind.filter(id, block).map(|family| (kind, family)))
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn slab_filter(id: &Identifier, _block: &DiscoveredBlock) -> Option<Identifier> {
    let base = id.path().strip_suffix(SLAB_SUFFIX)?;
    // `_slab` alone or `dir/_slab` leaves no usable family name
    if base.is_empty() || base.ends_with('/') {
        return None;
    }
    Identifier::new(id.namespace(), base).ok()
}

fn base_filter(id: &Identifier, _block: &DiscoveredBlock) -> Option<Identifier> {
    Some(id.clone())
}

/// Set of component kinds.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct KindSet(u8);

impl KindSet {
    pub const EMPTY: KindSet = KindSet(0);

    pub fn of(kinds: &[ComponentKind]) -> Self {
        kinds.iter().copied().collect()
    }

    #[inline]
    pub fn insert(&mut self, kind: ComponentKind) {
        self.0 |= 1 << kind.index();
    }

    #[inline]
    pub fn with(mut self, kind: ComponentKind) -> Self {
        self.insert(kind);
        self
    }

    #[inline]
    pub fn contains(self, kind: ComponentKind) -> bool {
        self.0 & (1 << kind.index()) != 0
    }

    #[inline]
    pub fn is_subset_of(self, other: KindSet) -> bool {
        self.0 & !other.0 == 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = ComponentKind> {
        ComponentKind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

impl From<ComponentKind> for KindSet {
    fn from(kind: ComponentKind) -> Self {
        KindSet::EMPTY.with(kind)
    }
}

impl FromIterator<ComponentKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = ComponentKind>>(iter: I) -> Self {
        let mut set = KindSet::EMPTY;
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl fmt::Debug for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// A discovered block bound to a family under some kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Component {
    id: Identifier,
    block: DiscoveredBlock,
}

impl Component {
    pub fn new(id: Identifier, block: DiscoveredBlock) -> Self {
        Self { id, block }
    }

    #[inline]
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    #[inline]
    pub fn block(&self) -> &DiscoveredBlock {
        &self.block
    }

    pub fn material(&self) -> &str {
        &self.block.material
    }

    pub fn map_color(&self) -> MapColor {
        self.block.map_color
    }

    pub fn sound_group(&self) -> &str {
        &self.block.sound_group
    }

    pub fn item(&self) -> Option<&Identifier> {
        self.block.item.as_ref()
    }

    pub fn has_item(&self) -> bool {
        self.block.item.is_some()
    }

    /// Conventional texture location, `namespace:block/path`.
    pub fn texture(&self) -> Identifier {
        self.id.with_path_prefix("block/")
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComponentError {
    #[error("family already has a {kind} component ({existing}); refusing {incoming}")]
    Duplicate {
        kind: ComponentKind,
        existing: Identifier,
        incoming: Identifier,
    },
}

/// At most one component per kind; absence means "not discovered yet".
#[derive(Clone, Debug, Default)]
pub struct ComponentTable {
    entries: [Option<Component>; ComponentKind::COUNT],
}

impl ComponentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: ComponentKind, component: Component) -> Result<(), ComponentError> {
        let slot = &mut self.entries[kind.index()];
        if let Some(existing) = slot {
            return Err(ComponentError::Duplicate {
                kind,
                existing: existing.id().clone(),
                incoming: component.id().clone(),
            });
        }
        *slot = Some(component);
        Ok(())
    }

    #[inline]
    pub fn get(&self, kind: ComponentKind) -> Option<&Component> {
        self.entries[kind.index()].as_ref()
    }

    pub fn kinds(&self) -> KindSet {
        ComponentKind::ALL
            .into_iter()
            .filter(|k| self.entries[k.index()].is_some())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentKind, &Component)> {
        ComponentKind::ALL
            .into_iter()
            .filter_map(|k| self.get(k).map(|c| (k, c)))
    }
}
