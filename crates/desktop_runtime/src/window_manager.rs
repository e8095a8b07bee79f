//! The authoritative window table and the only code allowed to mutate it.
//!
//! Lifecycle operations queue a [`WindowEvent`] after mutating. The store never calls listeners
//! itself: the owner drains the queue with [`WindowManager::take_events`] once it has released
//! the store, so listeners always observe the post-operation table and may read it freely.
//! Operations on unknown ids are silent no-ops: ids can legitimately go stale between a pointer
//! event and the command it produces.

use thiserror::Error;

use crate::{
    config::WindowManagerConfig,
    events::WindowEvent,
    geometry::{self, ResizeLimits},
    model::{OpenWindowRequest, PartialRect, WindowId, WindowRecord, WindowState},
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Rejected open requests.
pub enum WindowManagerError {
    /// The request carried an empty application id.
    #[error("cannot open a window without an app id")]
    EmptyAppId,
    /// The request carried an empty title.
    #[error("cannot open a window without a title")]
    EmptyTitle,
}

#[derive(Debug, Clone, PartialEq)]
/// Command form of the window operations, dispatched by the shell.
pub enum WindowCommand {
    /// Open a new window.
    Open(OpenWindowRequest),
    /// Close and remove a window.
    Close {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus and raise a window.
    Focus {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Minimize a window to the taskbar.
    Minimize {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Toggle between maximized and normal.
    Maximize {
        /// Window to toggle.
        window_id: WindowId,
    },
    /// Force a window back to normal.
    Restore {
        /// Window to restore.
        window_id: WindowId,
    },
    /// Set a window's position.
    Move {
        /// Window to move.
        window_id: WindowId,
        /// New left edge.
        x: i32,
        /// New top edge.
        y: i32,
    },
    /// Merge a partial rect into a window's geometry.
    Resize {
        /// Window to resize.
        window_id: WindowId,
        /// Fields to overwrite.
        rect: PartialRect,
    },
}

#[derive(Debug)]
/// Owner of the window table, with lifecycle events queued for publication.
pub struct WindowManager {
    config: WindowManagerConfig,
    pending_events: Vec<WindowEvent>,
    next_window_id: u64,
    /// Open order; stacking is carried by `z_index`, not by position.
    windows: Vec<WindowRecord>,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new(WindowManagerConfig::default())
    }
}

impl WindowManager {
    /// Creates an empty window table.
    pub fn new(config: WindowManagerConfig) -> Self {
        Self {
            config,
            pending_events: Vec::new(),
            next_window_id: 1,
            windows: Vec::new(),
        }
    }

    pub fn config(&self) -> &WindowManagerConfig {
        &self.config
    }

    /// Drains lifecycle events queued since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<WindowEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Windows in the order they were opened.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn window(&self, window_id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == window_id)
    }

    pub fn focused_window_id(&self) -> Option<WindowId> {
        self.windows.iter().find(|w| w.is_focused).map(|w| w.id)
    }

    /// Windows ordered bottom to top.
    pub fn stacking_order(&self) -> Vec<&WindowRecord> {
        let mut ordered: Vec<_> = self.windows.iter().collect();
        ordered.sort_by_key(|w| w.z_index);
        ordered
    }

    /// Owned copy of the table for read-only consumers.
    pub fn snapshot(&self) -> Vec<WindowRecord> {
        self.windows.clone()
    }

    fn max_z_index(&self) -> u32 {
        self.windows.iter().map(|w| w.z_index).max().unwrap_or(0)
    }

    fn next_window_id(&mut self) -> WindowId {
        let id = WindowId(self.next_window_id);
        self.next_window_id = self.next_window_id.saturating_add(1);
        id
    }

    fn queue(&mut self, event: WindowEvent) {
        self.pending_events.push(event);
    }

    fn find_window_mut(&mut self, window_id: WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == window_id)
    }

    /// Opens a focused window on top of the stack and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`WindowManagerError`] when the app id or title is blank; the table is unchanged.
    pub fn open_window(
        &mut self,
        request: OpenWindowRequest,
    ) -> Result<WindowId, WindowManagerError> {
        if request.app_id.as_str().trim().is_empty() {
            return Err(WindowManagerError::EmptyAppId);
        }
        if request.title.trim().is_empty() {
            return Err(WindowManagerError::EmptyTitle);
        }

        let id = self.next_window_id();
        let rect = geometry::initial_rect(request.initial_rect, self.windows.len(), &self.config);
        let z_index = self.max_z_index() + 1;
        for window in &mut self.windows {
            window.is_focused = false;
        }
        self.windows.push(WindowRecord {
            id,
            app_id: request.app_id.clone(),
            title: request.title,
            icon: request.icon,
            rect,
            z_index,
            state: WindowState::Normal,
            is_focused: true,
        });

        self.queue(WindowEvent::Opened {
            id,
            app_id: request.app_id,
        });
        Ok(id)
    }

    /// Removes a window. Remaining z-indices are not renumbered.
    pub fn close_window(&mut self, window_id: WindowId) {
        let before_len = self.windows.len();
        self.windows.retain(|w| w.id != window_id);
        if self.windows.len() == before_len {
            return;
        }
        self.queue(WindowEvent::Closed { id: window_id });
    }

    /// Focuses and raises a window, bringing it back from the taskbar if minimized.
    pub fn focus_window(&mut self, window_id: WindowId) {
        if self.window(window_id).is_none() {
            return;
        }
        let z_index = self.max_z_index() + 1;
        for window in &mut self.windows {
            if window.id == window_id {
                window.is_focused = true;
                window.z_index = z_index;
                if window.state == WindowState::Minimized {
                    window.state = WindowState::Normal;
                }
            } else {
                window.is_focused = false;
            }
        }
        self.queue(WindowEvent::Focused { id: window_id });
    }

    /// Hides a window to the taskbar; its rect and z-index are kept for later.
    pub fn minimize_window(&mut self, window_id: WindowId) {
        let Some(window) = self.find_window_mut(window_id) else {
            return;
        };
        window.state = WindowState::Minimized;
        window.is_focused = false;
        self.queue(WindowEvent::Minimized { id: window_id });
    }

    /// Toggles maximized. The stored rect is untouched so un-maximizing returns to it exactly.
    pub fn maximize_window(&mut self, window_id: WindowId) {
        let Some(window) = self.find_window_mut(window_id) else {
            return;
        };
        let event = if window.state == WindowState::Maximized {
            window.state = WindowState::Normal;
            WindowEvent::Restored { id: window_id }
        } else {
            window.state = WindowState::Maximized;
            WindowEvent::Maximized { id: window_id }
        };
        self.queue(event);
    }

    /// Forces a window back to [`WindowState::Normal`].
    pub fn restore_window(&mut self, window_id: WindowId) {
        let Some(window) = self.find_window_mut(window_id) else {
            return;
        };
        window.state = WindowState::Normal;
        self.queue(WindowEvent::Restored { id: window_id });
    }

    /// Sets a window's position. Callers must not move maximized windows.
    pub fn move_window(&mut self, window_id: WindowId, x: i32, y: i32) {
        if let Some(window) = self.find_window_mut(window_id) {
            window.rect.x = x;
            window.rect.y = y;
        }
    }

    /// Merges `rect` into a window's geometry, raising the size to the configured minimum.
    pub fn resize_window(&mut self, window_id: WindowId, rect: PartialRect) {
        let limits = ResizeLimits::from(self.config);
        if let Some(window) = self.find_window_mut(window_id) {
            window.rect = geometry::clamp_to_limits(window.rect.merged(rect), limits);
        }
    }

    /// Applies a [`WindowCommand`], returning the new id for [`WindowCommand::Open`].
    ///
    /// # Errors
    ///
    /// Propagates [`WindowManager::open_window`] rejections.
    pub fn apply(
        &mut self,
        command: WindowCommand,
    ) -> Result<Option<WindowId>, WindowManagerError> {
        match command {
            WindowCommand::Open(request) => return self.open_window(request).map(Some),
            WindowCommand::Close { window_id } => self.close_window(window_id),
            WindowCommand::Focus { window_id } => self.focus_window(window_id),
            WindowCommand::Minimize { window_id } => self.minimize_window(window_id),
            WindowCommand::Maximize { window_id } => self.maximize_window(window_id),
            WindowCommand::Restore { window_id } => self.restore_window(window_id),
            WindowCommand::Move { window_id, x, y } => self.move_window(window_id, x, y),
            WindowCommand::Resize { window_id, rect } => self.resize_window(window_id, rect),
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        events::{EventBus, WindowEventKind},
        model::{WindowRect, WindowState},
    };

    fn open(manager: &mut WindowManager, app_id: &str, title: &str) -> WindowId {
        manager
            .open_window(OpenWindowRequest::new(app_id, title))
            .expect("open window")
    }

    fn record(manager: &WindowManager, window_id: WindowId) -> &WindowRecord {
        manager.window(window_id).expect("window")
    }

    #[test]
    fn second_open_takes_focus_and_stacks_above_first() {
        let mut manager = WindowManager::default();
        let first = open(&mut manager, "a", "A");
        let second = open(&mut manager, "b", "B");

        assert_eq!(manager.windows().len(), 2);
        assert!(record(&manager, second).is_focused);
        assert!(!record(&manager, first).is_focused);
        assert!(record(&manager, second).z_index > record(&manager, first).z_index);
        assert_eq!(manager.focused_window_id(), Some(second));
    }

    #[test]
    fn blank_app_id_or_title_is_rejected_without_mutation() {
        let mut manager = WindowManager::default();
        assert_eq!(
            manager.open_window(OpenWindowRequest::new("", "Title")),
            Err(WindowManagerError::EmptyAppId)
        );
        assert_eq!(
            manager.open_window(OpenWindowRequest::new("test.app", "  ")),
            Err(WindowManagerError::EmptyTitle)
        );
        assert!(manager.windows().is_empty());

        // Rejections do not burn ids.
        assert_eq!(open(&mut manager, "test.app", "Test"), WindowId(1));
    }

    #[test]
    fn ids_are_never_reused_after_close() {
        let mut manager = WindowManager::default();
        let first = open(&mut manager, "a", "A");
        manager.close_window(first);
        let second = open(&mut manager, "a", "A");
        assert_ne!(first, second);
    }

    #[test]
    fn minimize_then_focus_returns_to_normal() {
        let mut manager = WindowManager::default();
        let win = open(&mut manager, "test.app", "Test");
        let rect = record(&manager, win).rect;
        let z_index = record(&manager, win).z_index;

        manager.minimize_window(win);
        assert_eq!(record(&manager, win).state, WindowState::Minimized);
        assert!(!record(&manager, win).is_focused);
        assert_eq!(record(&manager, win).rect, rect);
        assert_eq!(record(&manager, win).z_index, z_index);
        assert_eq!(manager.focused_window_id(), None);

        manager.focus_window(win);
        assert_eq!(record(&manager, win).state, WindowState::Normal);
        assert!(record(&manager, win).is_focused);
    }

    #[test]
    fn maximize_toggles_and_preserves_rect() {
        let mut manager = WindowManager::default();
        let win = open(&mut manager, "test.app", "Test");
        let rect = record(&manager, win).rect;

        manager.maximize_window(win);
        assert_eq!(record(&manager, win).state, WindowState::Maximized);
        assert_eq!(record(&manager, win).rect, rect);

        manager.maximize_window(win);
        assert_eq!(record(&manager, win).state, WindowState::Normal);
        assert_eq!(record(&manager, win).rect, rect);
    }

    #[test]
    fn restoring_a_minimized_maximized_window_lands_in_normal() {
        let mut manager = WindowManager::default();
        let win = open(&mut manager, "test.app", "Test");
        manager.maximize_window(win);
        manager.minimize_window(win);
        assert_eq!(record(&manager, win).state, WindowState::Minimized);

        manager.restore_window(win);
        assert_eq!(record(&manager, win).state, WindowState::Normal);

        manager.maximize_window(win);
        manager.minimize_window(win);
        manager.focus_window(win);
        assert_eq!(record(&manager, win).state, WindowState::Normal);
    }

    #[test]
    fn focus_raises_above_every_other_window() {
        let mut manager = WindowManager::default();
        let first = open(&mut manager, "app1", "App 1");
        let second = open(&mut manager, "app2", "App 2");

        manager.focus_window(first);

        assert!(record(&manager, first).is_focused);
        assert!(!record(&manager, second).is_focused);
        assert!(record(&manager, first).z_index > record(&manager, second).z_index);
        let order: Vec<_> = manager.stacking_order().iter().map(|w| w.id).collect();
        assert_eq!(order, vec![second, first]);
    }

    #[test]
    fn close_leaves_gaps_in_z_order_and_is_idempotent() {
        let mut manager = WindowManager::default();
        let first = open(&mut manager, "a", "A");
        let middle = open(&mut manager, "b", "B");
        let last = open(&mut manager, "c", "C");

        manager.close_window(middle);
        manager.close_window(middle);

        assert_eq!(manager.windows().len(), 2);
        assert_eq!(record(&manager, first).z_index, 1);
        assert_eq!(record(&manager, last).z_index, 3);
    }

    #[test]
    fn move_and_resize_update_geometry_only() {
        let mut manager = WindowManager::default();
        let request =
            OpenWindowRequest::new("test.app", "Test").with_rect(PartialRect::position(100, 100));
        let win = manager.open_window(request).expect("open");

        manager.move_window(win, 200, 300);
        manager.resize_window(win, PartialRect::size(800, 600));

        assert_eq!(record(&manager, win).rect, WindowRect::new(200, 300, 800, 600));
        assert_eq!(record(&manager, win).state, WindowState::Normal);
    }

    #[test]
    fn unknown_ids_are_silent_noops() {
        let mut manager = WindowManager::default();
        let win = open(&mut manager, "a", "A");
        let before = manager.snapshot();
        let ghost = WindowId(99);

        manager.close_window(ghost);
        manager.focus_window(ghost);
        manager.minimize_window(ghost);
        manager.maximize_window(ghost);
        manager.restore_window(ghost);
        manager.move_window(ghost, 1, 1);
        manager.resize_window(ghost, PartialRect::size(300, 300));

        assert_eq!(manager.snapshot(), before);
        assert_eq!(manager.focused_window_id(), Some(win));
    }

    #[test]
    fn cascade_wraps_on_the_eleventh_window() {
        let mut manager = WindowManager::default();
        let ids: Vec<_> = (0..11)
            .map(|i| open(&mut manager, "a", &format!("W{i}")))
            .collect();
        let positions: Vec<_> = ids
            .iter()
            .map(|id| {
                let rect = record(&manager, *id).rect;
                (rect.x, rect.y)
            })
            .collect();

        let mut distinct = positions[..10].to_vec();
        distinct.sort();
        distinct.dedup();
        assert_eq!(distinct.len(), 10);
        assert_eq!(positions[10], positions[0]);
    }

    #[test]
    fn lifecycle_events_are_queued_in_order() {
        let mut manager = WindowManager::default();
        let win = open(&mut manager, "com.browseros.terminal", "Terminal");
        manager.minimize_window(win);
        manager.focus_window(win);
        manager.maximize_window(win);
        manager.maximize_window(win);
        manager.restore_window(win);
        manager.move_window(win, 5, 5);
        manager.resize_window(win, PartialRect::size(300, 300));
        manager.close_window(win);
        manager.close_window(win);

        let queued = manager.take_events();
        let kinds: Vec<_> = queued.iter().map(WindowEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![
                WindowEventKind::Opened,
                WindowEventKind::Minimized,
                WindowEventKind::Focused,
                WindowEventKind::Maximized,
                WindowEventKind::Restored,
                WindowEventKind::Restored,
                WindowEventKind::Closed,
            ]
        );
        assert_eq!(
            queued[0],
            WindowEvent::Opened {
                id: win,
                app_id: desktop_app_contract::ApplicationId::trusted("com.browseros.terminal"),
            }
        );
        assert!(manager.take_events().is_empty());
    }

    #[test]
    fn queued_events_published_after_mutation_see_the_table() {
        let mut manager = WindowManager::default();
        let events = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = events.subscribe_all(move |event| sink.borrow_mut().push(event.clone()));

        let win = open(&mut manager, "a", "A");
        assert!(seen.borrow().is_empty());

        for event in manager.take_events() {
            assert!(manager.window(event.window_id()).is_some());
            events.emit(&event);
        }
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].window_id(), win);
    }

    #[test]
    fn undersized_open_request_is_raised_to_minimum() {
        let mut manager = WindowManager::default();
        let request = OpenWindowRequest::new("a.b", "T").with_rect(PartialRect::size(50, 30));
        let win = manager.open_window(request).expect("open");

        assert_eq!(record(&manager, win).rect, WindowRect::new(80, 80, 200, 120));
    }

    #[test]
    fn resize_below_minimum_is_clamped() {
        let mut manager = WindowManager::default();
        let win = open(&mut manager, "a", "A");

        manager.resize_window(win, PartialRect::size(10, 500));

        let rect = record(&manager, win).rect;
        assert_eq!((rect.width, rect.height), (200, 500));
    }

    #[test]
    fn apply_routes_commands_to_operations() {
        let mut manager = WindowManager::default();
        let win = manager
            .apply(WindowCommand::Open(OpenWindowRequest::new("a", "A")))
            .expect("open")
            .expect("id");

        manager
            .apply(WindowCommand::Move {
                window_id: win,
                x: 12,
                y: 34,
            })
            .expect("move");
        manager
            .apply(WindowCommand::Minimize { window_id: win })
            .expect("minimize");

        let window = record(&manager, win);
        assert_eq!((window.rect.x, window.rect.y), (12, 34));
        assert_eq!(window.state, WindowState::Minimized);
        assert_eq!(
            manager.apply(WindowCommand::Open(OpenWindowRequest::new("a", ""))),
            Err(WindowManagerError::EmptyTitle)
        );
    }
}
