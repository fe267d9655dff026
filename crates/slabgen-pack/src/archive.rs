use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use slabgen_blocks::Identifier;

use crate::error::{PackError, Result};

pub const PACK_META_FILE: &str = "pack.mcmeta";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResourceType {
    ClientResources,
    ServerData,
}

impl ResourceType {
    /// Top-level directory inside a pack.
    pub const fn directory(self) -> &'static str {
        match self {
            ResourceType::ClientResources => "assets",
            ResourceType::ServerData => "data",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PackMeta {
    pub pack_format: u32,
    pub description: String,
}

/// In-memory pack: generated bytes keyed by their pack-relative path.
///
/// Entries survive until `clear`; rebuilds must clear first so that entries
/// from a previous world or asset set do not leak into the next.
#[derive(Debug)]
pub struct VirtualPack {
    kind: ResourceType,
    meta: PackMeta,
    resources: BTreeMap<String, Vec<u8>>,
    namespaces: BTreeSet<String>,
    debug_dir: Option<PathBuf>,
}

impl VirtualPack {
    pub fn new(kind: ResourceType, meta: PackMeta) -> Self {
        Self {
            kind,
            meta,
            resources: BTreeMap::new(),
            namespaces: BTreeSet::new(),
            debug_dir: None,
        }
    }

    /// Also mirror every entry to `dir` on disk.
    pub fn with_debug_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.debug_dir = Some(dir.into());
        self
    }

    #[inline]
    pub fn kind(&self) -> ResourceType {
        self.kind
    }

    pub fn clear(&mut self) {
        self.resources.clear();
        self.namespaces.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    pub fn namespaces(&self) -> &BTreeSet<String> {
        &self.namespaces
    }

    pub fn put_resource(&mut self, path: &str, data: Vec<u8>) {
        if let Some(dir) = &self.debug_dir {
            if let Err(e) = dump(dir, path, &data) {
                log::warn!(target: "pack", "debug dump of {path} failed: {e}");
            }
        }
        self.resources.insert(path.to_string(), data);
    }

    pub fn put_text(&mut self, path: &str, text: &str) {
        self.put_resource(path, text.as_bytes().to_vec());
    }

    /// Stores `json` at `<dir>/<namespace>/<path>.json` for this pack's type.
    pub fn put_json(&mut self, id: &Identifier, json: &Value) {
        self.namespaces.insert(id.namespace().to_string());
        let path = format!("{}.json", self.resource_path(id));
        self.put_json_at(&path, json);
    }

    /// Stores `json` at a raw pack path. Serialization failures are logged
    /// and the entry is skipped.
    pub fn put_json_at(&mut self, path: &str, json: &Value) {
        match serde_json::to_vec_pretty(json) {
            Ok(bytes) => self.put_resource(path, bytes),
            Err(e) => log::error!(target: "pack", "failed to write JSON at {path}: {e}"),
        }
    }

    /// Reads a root-level file; `pack.mcmeta` is synthesized unless one was generated.
    pub fn open_root(&self, file: &str) -> Result<Cow<'_, [u8]>> {
        if let Some(data) = self.resources.get(file) {
            return Ok(Cow::Borrowed(data));
        }
        if file == PACK_META_FILE {
            let meta = serde_json::json!({
                "pack": {
                    "pack_format": self.meta.pack_format,
                    "description": self.meta.description,
                }
            });
            return Ok(Cow::Owned(serde_json::to_vec_pretty(&meta)?));
        }
        Err(PackError::NotFound(file.to_string()))
    }

    pub fn open(&self, kind: ResourceType, id: &Identifier) -> Result<&[u8]> {
        self.check_kind(kind)?;
        let path = self.resource_path(id);
        self.resources
            .get(&path)
            .map(Vec::as_slice)
            .ok_or(PackError::NotFound(path))
    }

    /// Parses a stored JSON entry.
    pub fn open_json(&self, kind: ResourceType, id: &Identifier) -> Result<Value> {
        Ok(serde_json::from_slice(self.open(kind, id)?)?)
    }

    pub fn contains(&self, kind: ResourceType, id: &Identifier) -> bool {
        kind == self.kind && self.resources.contains_key(&self.resource_path(id))
    }

    /// Every entry under `<dir>/<namespace>/<prefix>` whose path passes `filter`.
    pub fn find_resources(
        &self,
        kind: ResourceType,
        namespace: &str,
        prefix: &str,
        filter: impl Fn(&str) -> bool,
    ) -> Vec<Identifier> {
        if kind != self.kind {
            return Vec::new();
        }
        let start = format!("{}/{namespace}/{prefix}", kind.directory());
        self.resources
            .range(start.clone()..)
            .map(|(k, _)| k)
            .take_while(|k| k.starts_with(&start))
            .filter(|k| filter(k.as_str()))
            .filter_map(|k| from_path(k))
            .collect()
    }

    fn resource_path(&self, id: &Identifier) -> String {
        format!("{}/{}/{}", self.kind.directory(), id.namespace(), id.path())
    }

    fn check_kind(&self, requested: ResourceType) -> Result<()> {
        if requested != self.kind {
            return Err(PackError::WrongType {
                requested,
                actual: self.kind,
            });
        }
        Ok(())
    }
}

fn dump(dir: &Path, path: &str, data: &[u8]) -> Result<()> {
    let target = dir.join(path);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(target, data)?;
    Ok(())
}

/// `assets/ns/some/path` → `ns:some/path`.
fn from_path(path: &str) -> Option<Identifier> {
    let rest = path
        .strip_prefix("assets/")
        .or_else(|| path.strip_prefix("data/"))?;
    let (ns, p) = rest.split_once('/')?;
    Identifier::new(ns, p).ok()
}
