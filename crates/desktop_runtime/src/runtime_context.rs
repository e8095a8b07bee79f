//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived window manager, the reactive window snapshot the components
//! render from, the application registry and the lifecycle logger. UI composition stays in
//! [`crate::components`].

use desktop_app_contract::{AppRegistry, ApplicationId};
use leptos::*;

use crate::{
    apps,
    compositor::{compose_frames, WindowFrame},
    config::WindowManagerConfig,
    events::EventBus,
    model::{WindowId, WindowRecord, WindowRect},
    window_manager::{WindowCommand, WindowManager, WindowManagerError},
};

#[derive(Clone, Copy)]
/// Leptos context for reading window state and dispatching [`WindowCommand`] values.
pub struct DesktopRuntimeContext {
    /// The window store. Only [`DesktopRuntimeContext::dispatch`] writes to it.
    pub manager: StoredValue<WindowManager>,
    /// Reactive copy of the window table, refreshed after every command that changes it.
    pub windows: RwSignal<Vec<WindowRecord>>,
    /// Full browser viewport; maximized windows fill it minus the taskbar.
    pub viewport: RwSignal<WindowRect>,
    /// Registered applications available to the launcher.
    pub registry: StoredValue<AppRegistry>,
    pub start_menu_open: RwSignal<bool>,
    /// Command dispatch callback.
    pub dispatch: Callback<WindowCommand>,
}

impl DesktopRuntimeContext {
    /// Dispatches a command through the runtime context callback.
    pub fn dispatch_command(&self, command: WindowCommand) {
        self.dispatch.call(command);
    }

    pub fn dispatch_all(&self, commands: impl IntoIterator<Item = WindowCommand>) {
        for command in commands {
            self.dispatch_command(command);
        }
    }

    pub fn config(&self) -> WindowManagerConfig {
        self.manager.with_value(|manager| *manager.config())
    }

    /// Current record for `window_id` without subscribing to changes.
    pub fn window_untracked(&self, window_id: WindowId) -> Option<WindowRecord> {
        self.windows
            .with_untracked(|windows| windows.iter().find(|w| w.id == window_id).cloned())
    }

    /// Frames for the current snapshot, tracking both the window table and the viewport.
    pub fn frames(&self) -> Vec<WindowFrame> {
        let viewport = self.viewport.get();
        let config = self.config();
        self.windows
            .with(|windows| compose_frames(windows, viewport, &config))
    }

    /// Opens a new window for a registered app and closes the start menu.
    pub fn launch(&self, app_id: &ApplicationId) {
        let request = self
            .registry
            .with_value(|registry| registry.get(app_id).map(apps::open_request_for));
        match request {
            Some(request) => self.dispatch_command(WindowCommand::Open(request)),
            None => logging::warn!("cannot launch unregistered app `{app_id}`"),
        }
        self.start_menu_open.set(false);
    }
}

/// Current browser viewport, with a fixed fallback off the web.
pub fn desktop_viewport_rect() -> WindowRect {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(1024);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(768);

            return WindowRect::new(0, 0, width.max(320), height.max(240));
        }
    }

    WindowRect::new(0, 0, 1024, 768)
}

/// Applies `command`, refreshes the `windows` snapshot, then publishes the queued lifecycle
/// events. Listeners run after the store borrow is released, so they can read both the store and
/// the snapshot.
fn run_window_command(
    manager: StoredValue<WindowManager>,
    windows: RwSignal<Vec<WindowRecord>>,
    events: &EventBus,
    command: WindowCommand,
) -> Result<(), WindowManagerError> {
    let Some((outcome, snapshot, pending)) = manager.try_update_value(|store| {
        let outcome = store.apply(command);
        (outcome, store.snapshot(), store.take_events())
    }) else {
        logging::warn!("window manager disposed; command dropped");
        return Ok(());
    };

    if windows.with_untracked(|current| *current != snapshot) {
        windows.set(snapshot);
    }
    for event in &pending {
        events.emit(event);
    }
    outcome.map(|_| ())
}

fn builtin_registry_or_empty() -> AppRegistry {
    match apps::builtin_registry() {
        Ok(registry) => registry,
        Err(err) => {
            logging::warn!("built-in apps unavailable: {err}");
            AppRegistry::new()
        }
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(
    /// Window manager tuning; defaults when omitted.
    #[prop(optional)]
    config: Option<WindowManagerConfig>,
    children: Children,
) -> impl IntoView {
    let config = match config.map(|config| config.validate().map(|()| config)) {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            logging::warn!("ignoring window manager config: {err}");
            WindowManagerConfig::default()
        }
        None => WindowManagerConfig::default(),
    };

    let events = EventBus::new();
    let lifecycle_log = events.subscribe_all(|event| logging::log!("{event}"));
    let manager = store_value(WindowManager::new(config));
    let cleanup_events = events.clone();
    on_cleanup(move || cleanup_events.unsubscribe(lifecycle_log));

    let windows = create_rw_signal(Vec::<WindowRecord>::new());
    let viewport = create_rw_signal(desktop_viewport_rect());
    let registry = store_value(builtin_registry_or_empty());
    let start_menu_open = create_rw_signal(false);

    let dispatch = Callback::new(move |command: WindowCommand| {
        if let Err(err) = run_window_command(manager, windows, &events, command) {
            logging::warn!("window command rejected: {err}");
        }
    });

    let resize_listener = window_event_listener(ev::resize, move |_| {
        viewport.set(desktop_viewport_rect());
    });
    on_cleanup(move || resize_listener.remove());

    provide_context(DesktopRuntimeContext {
        manager,
        windows,
        viewport,
        registry,
        start_menu_open,
        dispatch,
    });

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
