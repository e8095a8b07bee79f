//! Built-in application catalog.
//!
//! Manifests live as TOML under `manifests/`, are validated by the build script and embedded as
//! JSON; this module pairs each manifest with its placeholder view.

mod placeholders;

use desktop_app_contract::{
    AppDescriptor, AppManifest, AppModule, AppMountFn, AppRegistry, ApplicationId,
};
use thiserror::Error;

use crate::model::{OpenWindowRequest, PartialRect};

include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));

pub const TERMINAL_APP_ID: &str = "com.browseros.terminal";
pub const FILES_APP_ID: &str = "com.browseros.fileexplorer";
pub const SETTINGS_APP_ID: &str = "com.browseros.settings";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("built-in app catalog is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no view is registered for built-in app `{0}`")]
    MissingModule(ApplicationId),
}

/// Parses the embedded manifest catalog, in registration order.
pub fn builtin_manifests() -> Result<Vec<AppManifest>, CatalogError> {
    Ok(serde_json::from_str(APP_MANIFEST_CATALOG_JSON)?)
}

fn builtin_module(app_id: &ApplicationId) -> Option<AppModule> {
    let mount: AppMountFn = match app_id.as_str() {
        TERMINAL_APP_ID => placeholders::mount_terminal_app,
        FILES_APP_ID => placeholders::mount_files_app,
        SETTINGS_APP_ID => placeholders::mount_settings_app,
        _ => return None,
    };
    Some(AppModule::new(mount))
}

/// Registry pre-populated with Terminal, Files and Settings.
pub fn builtin_registry() -> Result<AppRegistry, CatalogError> {
    let mut registry = AppRegistry::new();
    for manifest in builtin_manifests()? {
        let module = builtin_module(&manifest.id)
            .ok_or_else(|| CatalogError::MissingModule(manifest.id.clone()))?;
        registry.register(AppDescriptor::new(manifest, module));
    }
    Ok(registry)
}

/// Request that opens a window for `descriptor` using its name, icon and default geometry.
pub fn open_request_for(descriptor: &AppDescriptor) -> OpenWindowRequest {
    let manifest = &descriptor.manifest;
    let request = OpenWindowRequest::new(manifest.id.as_str(), manifest.name.clone())
        .with_icon(manifest.icon.clone());
    match manifest.default_rect {
        Some(hint) => request.with_rect(PartialRect::from(hint)),
        None => request,
    }
}
