use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use slabgen_blocks::Identifier;

use crate::archive::VirtualPack;
use crate::error::Result;

/// Key → text table for one locale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LangManifest {
    code: String,
    values: BTreeMap<String, String>,
}

impl LangManifest {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            values: BTreeMap::new(),
        }
    }

    /// Reads a flat JSON object; non-string values are ignored.
    pub fn from_json_str(code: impl Into<String>, json: &str) -> Result<Self> {
        let mut manifest = Self::new(code);
        if let Value::Object(map) = serde_json::from_str::<Value>(json)? {
            for (k, v) in map {
                if let Value::String(s) = v {
                    manifest.put(k, s);
                }
            }
        }
        Ok(manifest)
    }

    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect::<Map<_, _>>(),
        )
    }
}

/// Builds generated lang files from the locales shipped in a lang directory.
///
/// Lookups fall back from the requested locale to the fallback locale, then
/// to the key itself.
#[derive(Debug)]
pub struct LangBuilder {
    fallback: String,
    loaded: BTreeMap<String, LangManifest>,
    building: BTreeMap<String, LangManifest>,
}

impl LangBuilder {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
            loaded: BTreeMap::new(),
            building: BTreeMap::new(),
        }
    }

    /// Replaces the loaded locales with every `<code>.json` in `dir`.
    ///
    /// A missing directory or unreadable file is logged and skipped; an
    /// unreadable locale still participates with an empty table.
    pub fn load(&mut self, dir: &Path) {
        self.loaded.clear();
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!(target: "datagen", "no lang files at {}: {e}", dir.display());
                return;
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(code) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let manifest = fs::read_to_string(&path)
                .map_err(Into::into)
                .and_then(|text| LangManifest::from_json_str(code, &text))
                .unwrap_or_else(|e| {
                    log::warn!(target: "datagen", "failed reading {}: {e}", path.display());
                    LangManifest::new(code)
                });
            log::debug!(target: "datagen", "loaded {} entries for {code}", manifest.len());
            self.insert_loaded(manifest);
        }
    }

    pub fn insert_loaded(&mut self, manifest: LangManifest) {
        self.loaded.insert(manifest.code().to_string(), manifest);
    }

    pub fn loaded_codes(&self) -> impl Iterator<Item = &str> {
        self.loaded.keys().map(String::as_str)
    }

    /// Text for `key` in `code`, falling back as described on the type.
    pub fn get(&self, code: &str, key: &str) -> String {
        self.loaded
            .get(code)
            .and_then(|m| m.get(key))
            .or_else(|| self.loaded.get(&self.fallback).and_then(|m| m.get(key)))
            .unwrap_or(key)
            .to_string()
    }

    /// For every loaded locale, sets `key` to the text of `from` formatted with
    /// the text of each of `format_keys`.
    pub fn add_entry(&mut self, key: &str, from: &str, format_keys: &[&str]) {
        for code in self.loaded.keys() {
            let args: Vec<String> = format_keys.iter().map(|k| self.get(code, k)).collect();
            let text = format(&self.get(code, from), &args);
            self.building
                .entry(code.clone())
                .or_insert_with(|| LangManifest::new(code.clone()))
                .put(key, text);
        }
    }

    pub fn built(&self, code: &str) -> Option<&LangManifest> {
        self.building.get(code)
    }

    /// Writes `<namespace>:lang/<code>` for every locale that received entries.
    pub fn write(&self, pack: &mut VirtualPack, namespace: &str) {
        for (code, manifest) in &self.building {
            match Identifier::new(namespace, &format!("lang/{code}")) {
                Ok(id) => pack.put_json(&id, &manifest.to_json()),
                Err(e) => log::error!(target: "datagen", "skipping lang {code}: {e}"),
            }
        }
    }
}

/// Substitutes `%s` (sequential) and `%N$s` (positional, 1-based) with
/// `args`; `%%` is a literal percent. Placeholders without a matching
/// argument are left as written.
pub fn format(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut next = 0usize;
    let mut rest = template;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let spec = &rest[pos + 1..];
        if let Some(after) = spec.strip_prefix('%') {
            out.push('%');
            rest = after;
            continue;
        }
        if let Some(after) = spec.strip_prefix('s') {
            match args.get(next) {
                Some(a) => out.push_str(a),
                None => out.push_str("%s"),
            }
            next += 1;
            rest = after;
            continue;
        }
        let digits = spec.chars().take_while(char::is_ascii_digit).count();
        if digits > 0 {
            if let Some(after) = spec[digits..].strip_prefix("$s") {
                let index: usize = spec[..digits].parse().unwrap_or(0);
                match index.checked_sub(1).and_then(|i| args.get(i)) {
                    Some(a) => out.push_str(a),
                    None => out.push_str(&rest[pos..pos + 1 + digits + 2]),
                }
                rest = after;
                continue;
            }
        }
        out.push('%');
        rest = spec;
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn format_sequential_and_positional() {
        assert_eq!(format("Vertical %s", &args(&["Stone"])), "Vertical Stone");
        assert_eq!(format("%2$s %1$s", &args(&["a", "b"])), "b a");
        assert_eq!(format("100%% %s", &args(&["x"])), "100% x");
        assert_eq!(format("%s and %s", &args(&["x"])), "x and %s");
        assert_eq!(format("%3$s", &args(&["x"])), "%3$s");
        assert_eq!(format("50% off", &[]), "50% off");
        assert_eq!(format("trailing %", &[]), "trailing %");
    }

    #[test]
    fn manifest_ignores_non_strings() {
        let m = LangManifest::from_json_str("en_us", r#"{"a": "A", "b": 3, "c": {"d": "e"}}"#).unwrap();
        assert_eq!(m.len(), 1);
        assert_eq!(m.get("a"), Some("A"));
        assert!(LangManifest::from_json_str("en_us", "not json").is_err());
    }

    #[test]
    fn lookup_falls_back_to_default_then_key() {
        let mut b = LangBuilder::new("en_us");
        let mut en = LangManifest::new("en_us");
        en.put("greeting", "Hello");
        en.put("only_en", "English");
        let mut fr = LangManifest::new("fr_fr");
        fr.put("greeting", "Bonjour");
        b.insert_loaded(en);
        b.insert_loaded(fr);
        assert_eq!(b.get("fr_fr", "greeting"), "Bonjour");
        assert_eq!(b.get("fr_fr", "only_en"), "English");
        assert_eq!(b.get("fr_fr", "missing"), "missing");
        assert_eq!(b.get("de_de", "greeting"), "Hello");
    }

    #[test]
    fn load_reads_locale_files_and_survives_bad_ones() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("en_us.json"), r#"{"k": "English"}"#).unwrap();
        fs::write(dir.path().join("fr_fr.json"), "{ broken").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut b = LangBuilder::new("en_us");
        b.load(dir.path());
        assert_eq!(b.loaded_codes().collect::<Vec<_>>(), vec!["en_us", "fr_fr"]);
        assert_eq!(b.get("fr_fr", "k"), "English");

        b.load(&dir.path().join("missing"));
        assert_eq!(b.loaded_codes().count(), 0);
    }

    #[test]
    fn add_entry_formats_per_locale() {
        let mut b = LangBuilder::new("en_us");
        let mut en = LangManifest::new("en_us");
        en.put("fmt", "Vertical %s");
        en.put("name", "Stone");
        let mut fr = LangManifest::new("fr_fr");
        fr.put("fmt", "%s vertical");
        b.insert_loaded(en);
        b.insert_loaded(fr);
        b.add_entry("block.x", "fmt", &["name"]);
        assert_eq!(b.built("en_us").unwrap().get("block.x"), Some("Vertical Stone"));
        assert_eq!(b.built("fr_fr").unwrap().get("block.x"), Some("Stone vertical"));
    }
}
