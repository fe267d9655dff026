use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use slabgen_blocks::Identifier;

// Top-level slabgen.toml
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SlabGenConfig {
    // Namespace for generated blocks and resources
    #[serde(default = "default_namespace")]
    pub namespace: String,
    // Path prefix of every variant, `<namespace>:<prefix>/<family>`
    #[serde(default = "default_variant_prefix")]
    pub variant_prefix: String,
    #[serde(default)]
    pub item_group: Option<Identifier>,
    // Loot provider named by the second loot pool
    #[serde(default = "default_dynamic_drop")]
    pub dynamic_drop: Identifier,
    #[serde(default = "default_tag_name")]
    pub tag_name: String,
    #[serde(default = "default_fallback_locale")]
    pub fallback_locale: String,
    #[serde(default = "default_pack_format")]
    pub pack_format: u32,
    #[serde(default = "default_pack_description")]
    pub pack_description: String,
    // Families whose client assets are shipped statically
    #[serde(default)]
    pub skip_client_data: Vec<Identifier>,
    // When set, every generated entry is also written under this directory
    #[serde(default)]
    pub debug_dump_dir: Option<PathBuf>,
}

impl Default for SlabGenConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            variant_prefix: default_variant_prefix(),
            item_group: None,
            dynamic_drop: default_dynamic_drop(),
            tag_name: default_tag_name(),
            fallback_locale: default_fallback_locale(),
            pack_format: default_pack_format(),
            pack_description: default_pack_description(),
            skip_client_data: Vec::new(),
            debug_dump_dir: None,
        }
    }
}

impl SlabGenConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: SlabGenConfig = toml::from_str(toml_str)?;
        // namespace/prefix/tag must form valid identifiers
        Identifier::new(&cfg.namespace, &cfg.variant_prefix)?;
        Identifier::new(&cfg.namespace, &cfg.tag_name)?;
        Ok(cfg)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Config at `path`, or defaults when it is missing or unreadable.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("no config at {}; using defaults", path.display());
            return Self::default();
        }
        Self::load_from_path(path).unwrap_or_else(|e| {
            log::warn!("config {} unusable ({e}); using defaults", path.display());
            Self::default()
        })
    }
}

pub const DEFAULT_NAMESPACE: &str = "verticalslabgen";

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}
fn default_variant_prefix() -> String {
    "vertical_slab".to_string()
}
fn default_dynamic_drop() -> Identifier {
    Identifier::parse("verticalslabgen:vertical_slab").expect("valid default identifier")
}
fn default_tag_name() -> String {
    "vertical_slabs".to_string()
}
fn default_fallback_locale() -> String {
    "en_us".to_string()
}
fn default_pack_format() -> u32 {
    8
}
fn default_pack_description() -> String {
    "Generated vertical slabs".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(SlabGenConfig::from_toml_str("").unwrap(), SlabGenConfig::default());
    }

    #[test]
    fn overrides_and_identifiers() {
        let cfg = SlabGenConfig::from_toml_str(
            r#"
            namespace = "vsg"
            item_group = "vsg:vertical_slabs"
            skip_client_data = ["stone", "quark:marble"]
            fallback_locale = "fr_fr"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.namespace, "vsg");
        assert_eq!(cfg.item_group.unwrap().to_string(), "vsg:vertical_slabs");
        assert_eq!(cfg.skip_client_data[0].to_string(), "minecraft:stone");
        assert_eq!(cfg.skip_client_data[1].namespace(), "quark");
        assert_eq!(cfg.fallback_locale, "fr_fr");
        assert_eq!(cfg.tag_name, "vertical_slabs");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(SlabGenConfig::from_toml_str(r#"namespace = "Bad NS""#).is_err());
        assert!(SlabGenConfig::from_toml_str(r#"dynamic_drop = "x:Y""#).is_err());
        assert!(SlabGenConfig::from_toml_str(r#"pack_format = "eight""#).is_err());
    }

    #[test]
    fn missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = SlabGenConfig::load_or_default(dir.path().join("absent.toml"));
        assert_eq!(cfg, SlabGenConfig::default());
        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "namespace = [").unwrap();
        assert_eq!(SlabGenConfig::load_or_default(&bad), SlabGenConfig::default());
    }
}
