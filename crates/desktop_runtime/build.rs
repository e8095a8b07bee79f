use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const MANIFEST_SCHEMA_VERSION: u32 = 1;
const MIN_DEFAULT_WIDTH: i32 = 200;
const MIN_DEFAULT_HEIGHT: i32 = 120;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DefaultRect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    y: Option<i32>,
    width: i32,
    height: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppManifest {
    #[serde(skip_serializing)]
    schema_version: u32,
    id: String,
    name: String,
    icon: String,
    #[serde(default)]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_rect: Option<DefaultRect>,
}

/// Registration order of the built-in apps.
fn app_manifest_paths(root: &Path) -> Vec<PathBuf> {
    ["terminal", "files", "settings"]
        .iter()
        .map(|name| root.join("manifests").join(format!("{name}.toml")))
        .collect()
}

fn validate(path: &Path, manifest: &AppManifest) {
    if manifest.schema_version != MANIFEST_SCHEMA_VERSION {
        panic!(
            "manifest schema mismatch in {}: expected {MANIFEST_SCHEMA_VERSION} found {}",
            path.display(),
            manifest.schema_version
        );
    }
    let dotted = manifest.id.split('.').count() >= 2
        && manifest.id.split('.').all(|part| {
            !part.is_empty()
                && part
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        });
    if !dotted {
        panic!("invalid app id `{}` in {}", manifest.id, path.display());
    }
    if manifest.name.trim().is_empty() {
        panic!("empty app name in {}", path.display());
    }
    if !manifest.icon.starts_with("data:") && !manifest.icon.starts_with('/') {
        panic!(
            "icon in {} must be a data URL or an absolute path",
            path.display()
        );
    }
    if let Some(rect) = &manifest.default_rect {
        if rect.width < MIN_DEFAULT_WIDTH || rect.height < MIN_DEFAULT_HEIGHT {
            panic!(
                "default_rect in {} is below the {MIN_DEFAULT_WIDTH}x{MIN_DEFAULT_HEIGHT} minimum",
                path.display()
            );
        }
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let mut manifests = Vec::<AppManifest>::new();

    for path in app_manifest_paths(&crate_root) {
        println!("cargo:rerun-if-changed={}", path.display());
        let raw = fs::read_to_string(&path)
            .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
        let manifest: AppManifest = toml::from_str(&raw)
            .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
        validate(&path, &manifest);
        if manifests.iter().any(|existing| existing.id == manifest.id) {
            panic!("duplicate app id `{}` in {}", manifest.id, path.display());
        }
        manifests.push(manifest);
    }

    let json = serde_json::to_string_pretty(&manifests).expect("serialize app manifest catalog");
    let generated = format!(
        "/// Build-time generated app manifest catalog JSON.\n\
pub const APP_MANIFEST_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("app_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
