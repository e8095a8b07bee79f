//! In-memory application registry consulted by launchers and the window compositor.

use crate::{AppManifest, AppModule, ApplicationId};

#[derive(Debug, Clone)]
/// Registered application: display metadata plus the module that renders its view.
pub struct AppDescriptor {
    /// Launcher/chrome metadata.
    pub manifest: AppManifest,
    /// View factory mounted inside the window body.
    pub module: AppModule,
}

impl AppDescriptor {
    /// Pairs a manifest with its module.
    pub fn new(manifest: AppManifest, module: AppModule) -> Self {
        Self { manifest, module }
    }

    /// Returns the descriptor's app id.
    pub fn id(&self) -> &ApplicationId {
        &self.manifest.id
    }
}

#[derive(Debug, Clone, Default)]
/// Ordered table of registered applications keyed by [`ApplicationId`].
pub struct AppRegistry {
    apps: Vec<AppDescriptor>,
}

impl AppRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `descriptor` and returns `true`, or returns `false` when the id is already taken.
    pub fn register(&mut self, descriptor: AppDescriptor) -> bool {
        if self.get(descriptor.id()).is_some() {
            return false;
        }
        self.apps.push(descriptor);
        true
    }

    /// Removes the app registered under `id`; unknown ids are ignored.
    pub fn unregister(&mut self, id: &ApplicationId) {
        self.apps.retain(|app| app.id() != id);
    }

    /// Looks up an app by id.
    pub fn get(&self, id: &ApplicationId) -> Option<&AppDescriptor> {
        self.apps.iter().find(|app| app.id() == id)
    }

    /// Returns all apps in registration order.
    pub fn apps(&self) -> &[AppDescriptor] {
        &self.apps
    }

    /// Returns apps whose name contains `query`, ignoring case. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&AppDescriptor> {
        let needle = query.trim().to_lowercase();
        self.apps
            .iter()
            .filter(|app| needle.is_empty() || app.manifest.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Number of registered apps.
    pub fn len(&self) -> usize {
        self.apps.len()
    }

    /// Returns whether no apps are registered.
    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use leptos::{IntoView, View};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::AppMountContext;

    fn mount_nothing(_: AppMountContext) -> View {
        ().into_view()
    }

    fn descriptor(id: &str, name: &str) -> AppDescriptor {
        AppDescriptor::new(
            AppManifest {
                id: ApplicationId::new(id).expect("valid id"),
                name: name.to_string(),
                icon: String::new(),
                description: "A test application".to_string(),
                default_rect: None,
            },
            AppModule::new(mount_nothing),
        )
    }

    #[test]
    fn registers_and_retrieves_by_id() {
        let mut registry = AppRegistry::new();
        assert!(registry.register(descriptor("test.app", "Test App")));

        let found = registry
            .get(&ApplicationId::trusted("test.app"))
            .expect("registered app");
        assert_eq!(found.manifest.name, "Test App");
        assert!(registry.get(&ApplicationId::trusted("no.such-app")).is_none());
    }

    #[test]
    fn duplicate_registration_is_ignored() {
        let mut registry = AppRegistry::new();
        assert!(registry.register(descriptor("test.app", "Test App")));
        assert!(!registry.register(descriptor("test.app", "Other Name")));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.apps()[0].manifest.name, "Test App");
    }

    #[test]
    fn unregister_removes_only_the_named_app() {
        let mut registry = AppRegistry::new();
        registry.register(descriptor("test.app", "Test App"));
        registry.register(descriptor("test.app2", "Test App 2"));

        registry.unregister(&ApplicationId::trusted("test.app"));
        registry.unregister(&ApplicationId::trusted("missing.app"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.apps()[0].id().as_str(), "test.app2");
    }

    #[test]
    fn search_matches_names_case_insensitively() {
        let mut registry = AppRegistry::new();
        registry.register(descriptor("com.browseros.terminal", "Terminal"));
        registry.register(descriptor("com.browseros.fileexplorer", "Files"));
        registry.register(descriptor("com.browseros.settings", "Settings"));

        let names = |query: &str| {
            registry
                .search(query)
                .into_iter()
                .map(|app| app.manifest.name.clone())
                .collect::<Vec<_>>()
        };

        assert_eq!(names("TERM"), vec!["Terminal".to_string()]);
        assert_eq!(names("s"), vec!["Files".to_string(), "Settings".to_string()]);
        assert_eq!(names("  ").len(), 3);
        assert!(names("paint").is_empty());
    }
}
