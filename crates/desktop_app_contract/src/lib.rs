//! Shared contract types between the desktop window manager runtime and hosted apps.
//!
//! The window manager stores only an [`ApplicationId`] per window and never resolves it; the
//! compositor resolves ids through an [`AppRegistry`] to decide what to mount inside a frame.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod registry;

use leptos::View;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use registry::{AppDescriptor, AppRegistry};

/// Stable identifier for a runtime-managed window, as exposed to hosted apps.
pub type WindowRuntimeId = u64;

/// Stable identifier for an app package/module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApplicationId(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Rejection reasons for [`ApplicationId::new`].
pub enum ApplicationIdError {
    /// The identifier was empty.
    #[error("application id must not be empty")]
    Empty,
    /// The identifier did not follow the `segment.segment...` policy.
    #[error("invalid application id `{0}`; expected namespaced dotted segments")]
    Malformed(String),
}

impl ApplicationId {
    /// Returns an app identifier when `raw` conforms to the `segment.segment...` policy.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationIdError`] when `raw` is empty or malformed.
    pub fn new(raw: impl Into<String>) -> Result<Self, ApplicationIdError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ApplicationIdError::Empty);
        }
        if is_valid_application_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(ApplicationIdError::Malformed(raw))
        }
    }

    /// Creates an id without validation.
    ///
    /// Windows may reference ids that were never registered; the window manager treats the id as
    /// an opaque weak reference.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ApplicationId {
    type Error = ApplicationIdError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<ApplicationId> for String {
    fn from(id: ApplicationId) -> Self {
        id.0
    }
}

fn is_valid_application_id(raw: &str) -> bool {
    if raw.len() > 120 {
        return false;
    }

    let mut count = 0usize;
    for part in raw.split('.') {
        count += 1;
        if part.is_empty() || part.len() > 32 {
            return false;
        }
        let bytes = part.as_bytes();
        if !bytes[0].is_ascii_lowercase() {
            return false;
        }
        if !bytes
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
        {
            return false;
        }
        if part.ends_with('-') {
            return false;
        }
    }

    count >= 2
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Optional default geometry an app requests for newly opened windows.
///
/// Unset fields fall back to the window manager's cascade position and default size.
pub struct WindowGeometryHint {
    /// Left edge in desktop coordinates.
    #[serde(default)]
    pub x: Option<i32>,
    /// Top edge in desktop coordinates.
    #[serde(default)]
    pub y: Option<i32>,
    /// Requested width in pixels.
    #[serde(default)]
    pub width: Option<i32>,
    /// Requested height in pixels.
    #[serde(default)]
    pub height: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Display metadata describing an application to launchers and window chrome.
pub struct AppManifest {
    /// Canonical app id.
    pub id: ApplicationId,
    /// Display name shown in launchers and used as the default window title.
    pub name: String,
    /// Icon URL or data URL.
    pub icon: String,
    /// Short human-readable description.
    #[serde(default)]
    pub description: String,
    /// Default window geometry.
    #[serde(default)]
    pub default_rect: Option<WindowGeometryHint>,
}

/// Context handed to an app module when its view is mounted inside a window frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppMountContext {
    /// App id the window was opened for.
    pub app_id: ApplicationId,
    /// Owning window id; apps use it to address their own window.
    pub window_id: WindowRuntimeId,
}

/// Static app mount function used by the runtime registry.
pub type AppMountFn = fn(AppMountContext) -> View;

#[derive(Debug, Clone, Copy)]
/// Mountable app module used by the runtime app registry.
pub struct AppModule {
    mount_fn: AppMountFn,
}

impl AppModule {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: AppMountFn) -> Self {
        Self { mount_fn }
    }

    /// Mounts the app view with a runtime-provided context.
    pub fn mount(self, context: AppMountContext) -> View {
        (self.mount_fn)(context)
    }
}
