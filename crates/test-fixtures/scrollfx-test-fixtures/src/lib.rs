use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    pages: HashMap<String, PageEntry>,
    configs: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PageEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        hash: Option<String>,
    },
}

impl PageEntry {
    fn as_path(&self) -> &str {
        match self {
            PageEntry::Path(path) => path,
            PageEntry::Detailed { path, .. } => path,
        }
    }

    fn hash(&self) -> Option<&str> {
        match self {
            PageEntry::Path(_) => None,
            PageEntry::Detailed { hash, .. } => hash.as_deref(),
        }
    }
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = fixtures_root().join(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Page trees (`PageSpec` JSON) for the in-memory DOM.
pub mod pages {
    use super::*;

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.pages, "page", name)?;
        super::load_json(entry.as_path())
    }

    /// Location hash the page is opened with, if the manifest names one.
    pub fn hash(name: &str) -> Result<Option<String>> {
        let entry = lookup(&MANIFEST.pages, "page", name)?;
        Ok(entry.hash().map(str::to_string))
    }
}

/// Engine configuration documents.
pub mod configs {
    use super::*;

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        super::load_json(rel)
    }
}
