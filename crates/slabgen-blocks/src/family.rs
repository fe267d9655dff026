use std::fmt;

use parking_lot::RwLock;

use crate::component::{Component, ComponentError, ComponentKind, ComponentTable, KindSet};
use crate::types::{DEFAULT_NAMESPACE, Identifier};

/// Every component discovered so far for one family, e.g. all of `granite`.
///
/// The identity and the derived names never change after construction; the
/// component table only grows.
pub struct Family {
    id: Identifier,
    path_name: String,
    absolute_lang_path: String,
    lang_path: String,
    components: RwLock<ComponentTable>,
}

impl Family {
    pub fn new(id: Identifier) -> Self {
        let path_name = path_name(&id);
        let absolute_lang_path = path_name.replace('/', ".");
        let lang_path = lang_path(&id);
        Self {
            id,
            path_name,
            absolute_lang_path,
            lang_path,
            components: RwLock::new(ComponentTable::new()),
        }
    }

    #[inline]
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Path for generated resources: the bare path for vanilla families,
    /// `namespace/path` otherwise.
    #[inline]
    pub fn path_name(&self) -> &str {
        &self.path_name
    }

    #[inline]
    pub fn absolute_lang_path(&self) -> &str {
        &self.absolute_lang_path
    }

    #[inline]
    pub fn lang_path(&self) -> &str {
        &self.lang_path
    }

    pub fn component(&self, kind: ComponentKind) -> Option<Component> {
        self.components.read().get(kind).cloned()
    }

    pub fn kinds(&self) -> KindSet {
        self.components.read().kinds()
    }

    #[inline]
    pub fn has(&self, kind: ComponentKind) -> bool {
        self.kinds().contains(kind)
    }

    /// Texture for generated models: the base block's if known, else the slab's.
    pub fn texture(&self) -> Option<Identifier> {
        let table = self.components.read();
        [ComponentKind::Base, ComponentKind::Slab]
            .into_iter()
            .find_map(|kind| table.get(kind).map(|c| kind.texture(c)))
    }

    /// Adds a component and returns the kinds present afterwards.
    pub(crate) fn add_component(
        &self,
        kind: ComponentKind,
        component: Component,
    ) -> Result<KindSet, ComponentError> {
        let mut table = self.components.write();
        table.insert(kind, component)?;
        Ok(table.kinds())
    }
}

fn path_name(id: &Identifier) -> String {
    if id.namespace() == DEFAULT_NAMESPACE {
        id.path().to_string()
    } else {
        format!("{}/{}", id.namespace(), id.path())
    }
}

fn lang_path(id: &Identifier) -> String {
    path_name(id).replace('/', ".")
}

impl fmt::Debug for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Family")
            .field("id", &self.id)
            .field("path_name", &self.path_name)
            .field("components", &self.kinds())
            .finish()
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiscoveredBlock, MapColor};

    fn id(s: &str) -> Identifier {
        Identifier::parse(s).unwrap()
    }

    #[test]
    fn vanilla_family_paths() {
        let f = Family::new(id("granite"));
        assert_eq!(f.path_name(), "granite");
        assert_eq!(f.absolute_lang_path(), "granite");
        assert_eq!(f.lang_path(), "granite");
    }

    #[test]
    fn modded_family_paths() {
        let f = Family::new(id("quark:stone/marble"));
        assert_eq!(f.path_name(), "quark/stone/marble");
        assert_eq!(f.absolute_lang_path(), "quark.stone.marble");
    }

    #[test]
    fn texture_prefers_base() {
        let f = Family::new(id("granite"));
        assert_eq!(f.texture(), None);
        let b = DiscoveredBlock::new("stone", MapColor::STONE, "stone");
        f.add_component(ComponentKind::Slab, Component::new(id("granite_slab"), b.clone()))
            .unwrap();
        assert_eq!(f.texture(), Some(id("block/granite_slab")));
        f.add_component(ComponentKind::Base, Component::new(id("granite"), b))
            .unwrap();
        assert_eq!(f.texture(), Some(id("block/granite")));
    }
}
