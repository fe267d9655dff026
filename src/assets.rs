use std::path::{Path, PathBuf};

/// Environment variable naming the assets root.
pub const ASSETS_ENV: &str = "SLABGEN_ASSETS";
pub const CONFIG_FILE: &str = "slabgen.toml";

/// Assets root: `explicit` if it exists, then `$SLABGEN_ASSETS`, then the
/// nearest ancestor (up to five levels) of the working directory or the
/// crate that holds a `slabgen.toml`, then the working directory.
pub fn resolve_assets_root(explicit: Option<PathBuf>) -> PathBuf {
    let from_env = std::env::var_os(ASSETS_ENV).map(PathBuf::from);
    if let Some(root) = explicit.into_iter().chain(from_env).find(|p| p.exists()) {
        return root;
    }
    let cwd = std::env::current_dir().ok();
    let search = cwd
        .iter()
        .map(PathBuf::as_path)
        .chain([Path::new(env!("CARGO_MANIFEST_DIR"))]);
    for base in search {
        if let Some(root) = base.ancestors().take(6).find(|dir| config_path(dir).exists()) {
            log::debug!("assets root {} (found {CONFIG_FILE})", root.display());
            return root.to_path_buf();
        }
    }
    cwd.unwrap_or_else(|| PathBuf::from("."))
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Shipped locale files, `assets/<namespace>/lang/<code>.json`.
pub fn lang_dir(root: &Path, namespace: &str) -> PathBuf {
    root.join("assets").join(namespace).join("lang")
}
