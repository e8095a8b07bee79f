//! Window lifecycle notifications and the publish/subscribe channel that carries them.
//!
//! Dispatch is synchronous and fire-and-forget: every listener registered at emit time is called
//! in subscription order, and late subscribers never see earlier events.

use std::{cell::RefCell, rc::Rc};

use desktop_app_contract::ApplicationId;

use crate::model::WindowId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    Opened { id: WindowId, app_id: ApplicationId },
    Closed { id: WindowId },
    Focused { id: WindowId },
    Minimized { id: WindowId },
    Maximized { id: WindowId },
    Restored { id: WindowId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowEventKind {
    Opened,
    Closed,
    Focused,
    Minimized,
    Maximized,
    Restored,
}

impl WindowEventKind {
    /// Channel name, e.g. `window:opened`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Opened => "window:opened",
            Self::Closed => "window:closed",
            Self::Focused => "window:focused",
            Self::Minimized => "window:minimized",
            Self::Maximized => "window:maximized",
            Self::Restored => "window:restored",
        }
    }
}

impl WindowEvent {
    pub fn kind(&self) -> WindowEventKind {
        match self {
            Self::Opened { .. } => WindowEventKind::Opened,
            Self::Closed { .. } => WindowEventKind::Closed,
            Self::Focused { .. } => WindowEventKind::Focused,
            Self::Minimized { .. } => WindowEventKind::Minimized,
            Self::Maximized { .. } => WindowEventKind::Maximized,
            Self::Restored { .. } => WindowEventKind::Restored,
        }
    }

    pub fn window_id(&self) -> WindowId {
        match self {
            Self::Opened { id, .. }
            | Self::Closed { id }
            | Self::Focused { id }
            | Self::Minimized { id }
            | Self::Maximized { id }
            | Self::Restored { id } => *id,
        }
    }
}

impl std::fmt::Display for WindowEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Opened { id, app_id } => {
                write!(f, "{} {{id: {id}, app_id: {app_id}}}", self.kind().name())
            }
            _ => write!(f, "{} {{id: {}}}", self.kind().name(), self.window_id()),
        }
    }
}

type Listener = Rc<dyn Fn(&WindowEvent)>;

struct ListenerEntry {
    id: u64,
    /// `None` listens to every kind.
    kind: Option<WindowEventKind>,
    listener: Listener,
}

#[derive(Default)]
struct BusInner {
    next_listener_id: u64,
    listeners: Vec<ListenerEntry>,
}

/// Cloneable handle to a single-threaded lifecycle event channel.
///
/// Clones share the same listener table; the window manager is constructed with one handle and
/// the shell keeps another to subscribe.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<BusInner>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.inner.borrow().listeners.len())
            .finish()
    }
}

/// Handle returned by [`EventBus::subscribe`]; pass it back to stop receiving events.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "the listener stays registered until passed to `EventBus::unsubscribe`"]
pub struct Subscription {
    id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for events of `kind`.
    pub fn subscribe(
        &self,
        kind: WindowEventKind,
        listener: impl Fn(&WindowEvent) + 'static,
    ) -> Subscription {
        self.insert(Some(kind), Rc::new(listener))
    }

    /// Registers `listener` for every lifecycle event.
    pub fn subscribe_all(&self, listener: impl Fn(&WindowEvent) + 'static) -> Subscription {
        self.insert(None, Rc::new(listener))
    }

    /// Removes a listener. Unknown or already-removed subscriptions are ignored.
    pub fn unsubscribe(&self, subscription: Subscription) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|entry| entry.id != subscription.id);
    }

    /// Delivers `event` to every listener registered for its kind at the time of the call.
    ///
    /// The listener list is copied before dispatch, so listeners may subscribe or unsubscribe
    /// while being called.
    pub fn emit(&self, event: &WindowEvent) {
        let listeners = self.listeners_for(event.kind());
        for listener in listeners {
            listener(event);
        }
    }

    /// Number of listeners that would receive an event of `kind`.
    pub fn listener_count(&self, kind: WindowEventKind) -> usize {
        self.listeners_for(kind).len()
    }

    fn listeners_for(&self, kind: WindowEventKind) -> Vec<Listener> {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|entry| entry.kind.map_or(true, |wanted| wanted == kind))
            .map(|entry| Rc::clone(&entry.listener))
            .collect()
    }

    fn insert(&self, kind: Option<WindowEventKind>, listener: Listener) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push(ListenerEntry { id, kind, listener });
        Subscription { id }
    }
}
