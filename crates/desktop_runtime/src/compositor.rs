//! Read-only projections of the window table used to render the desktop.
//!
//! The compositor derives what to draw (stacking, maximized bounds, taskbar buttons) from a
//! snapshot and expresses every user intent as a [`WindowCommand`]; it never writes geometry.

use desktop_app_contract::ApplicationId;

use crate::{
    config::WindowManagerConfig,
    geometry::maximized_bounds,
    model::{WindowId, WindowRecord, WindowRect, WindowState},
    window_manager::WindowCommand,
};

/// One window as it should appear on the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowFrame {
    pub id: WindowId,
    pub app_id: ApplicationId,
    pub title: String,
    pub icon: Option<String>,
    /// On-screen bounds; differs from the stored rect while maximized.
    pub bounds: WindowRect,
    pub z_index: u32,
    pub state: WindowState,
    pub is_focused: bool,
}

impl WindowFrame {
    pub fn is_visible(&self) -> bool {
        self.state != WindowState::Minimized
    }

    /// Resize handles exist only for normal windows.
    pub fn shows_resize_handles(&self) -> bool {
        self.state == WindowState::Normal
    }

    /// Inline style positioning the frame.
    pub fn style(&self) -> String {
        let mut style = format!(
            "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
            self.bounds.x, self.bounds.y, self.bounds.width, self.bounds.height, self.z_index
        );
        if !self.is_visible() {
            style.push_str("display:none;");
        }
        style
    }

    pub fn class_name(&self) -> String {
        let focused_class = if self.is_focused { " focused" } else { "" };
        let state_class = match self.state {
            WindowState::Normal => "",
            WindowState::Minimized => " minimized",
            WindowState::Maximized => " maximized",
        };
        format!("desktop-window{focused_class}{state_class}")
    }
}

/// Projects `windows` into frames ordered bottom to top.
pub fn compose_frames(
    windows: &[WindowRecord],
    surface: WindowRect,
    config: &WindowManagerConfig,
) -> Vec<WindowFrame> {
    let maximized = maximized_bounds(surface, config.taskbar_height);
    let mut frames: Vec<_> = windows
        .iter()
        .map(|window| WindowFrame {
            id: window.id,
            app_id: window.app_id.clone(),
            title: window.title.clone(),
            icon: window.icon.clone(),
            bounds: if window.is_maximized() {
                maximized
            } else {
                window.rect
            },
            z_index: window.z_index,
            state: window.state,
            is_focused: window.is_focused,
        })
        .collect();
    frames.sort_by_key(|frame| frame.z_index);
    frames
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarEntry {
    pub id: WindowId,
    pub title: String,
    pub icon: Option<String>,
    pub is_focused: bool,
    pub is_minimized: bool,
}

impl TaskbarEntry {
    pub fn class_name(&self) -> String {
        let focused_class = if self.is_focused { " focused" } else { "" };
        let minimized_class = if self.is_minimized { " minimized" } else { "" };
        format!("taskbar-window-button{focused_class}{minimized_class}")
    }
}

/// One taskbar button per window, in the order windows were opened.
pub fn taskbar_entries(windows: &[WindowRecord]) -> Vec<TaskbarEntry> {
    windows
        .iter()
        .map(|window| TaskbarEntry {
            id: window.id,
            title: window.title.clone(),
            icon: window.icon.clone(),
            is_focused: window.is_focused,
            is_minimized: window.is_minimized(),
        })
        .collect()
}

/// Commands for a taskbar button click: un-minimize and focus, minimize the focused window, or
/// bring any other window forward.
pub fn taskbar_activation(window: &WindowRecord) -> Vec<WindowCommand> {
    let window_id = window.id;
    if window.is_minimized() {
        vec![
            WindowCommand::Restore { window_id },
            WindowCommand::Focus { window_id },
        ]
    } else if window.is_focused {
        vec![WindowCommand::Minimize { window_id }]
    } else {
        vec![WindowCommand::Focus { window_id }]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{model::OpenWindowRequest, window_manager::WindowManager};

    const SURFACE: WindowRect = WindowRect::new(0, 0, 1280, 800);

    fn manager_with_two() -> (WindowManager, WindowId, WindowId) {
        let mut manager = WindowManager::default();
        let first = manager
            .open_window(OpenWindowRequest::new("com.browseros.terminal", "Terminal"))
            .expect("open");
        let second = manager
            .open_window(OpenWindowRequest::new("com.browseros.files", "Files"))
            .expect("open");
        (manager, first, second)
    }

    #[test]
    fn frames_are_sorted_bottom_to_top() {
        let (mut manager, first, second) = manager_with_two();
        manager.focus_window(first);

        let frames = compose_frames(manager.windows(), SURFACE, manager.config());
        let ids: Vec<_> = frames.iter().map(|frame| frame.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[test]
    fn maximized_frames_fill_surface_but_keep_stored_rect() {
        let (mut manager, first, _) = manager_with_two();
        let stored = manager.window(first).expect("window").rect;
        manager.maximize_window(first);

        let frames = compose_frames(manager.windows(), SURFACE, manager.config());
        let frame = frames.iter().find(|frame| frame.id == first).expect("frame");
        assert_eq!(frame.bounds, WindowRect::new(0, 0, 1280, 756));
        assert!(!frame.shows_resize_handles());
        assert!(frame.class_name().ends_with(" maximized"));
        assert_eq!(manager.window(first).expect("window").rect, stored);
    }

    #[test]
    fn minimized_frames_are_hidden() {
        let (mut manager, _, second) = manager_with_two();
        manager.minimize_window(second);

        let frames = compose_frames(manager.windows(), SURFACE, manager.config());
        let frame = frames.iter().find(|frame| frame.id == second).expect("frame");
        assert!(!frame.is_visible());
        assert!(frame.style().ends_with("display:none;"));
    }

    #[test]
    fn frame_style_positions_normal_window() {
        let (manager, first, _) = manager_with_two();
        let frames = compose_frames(manager.windows(), SURFACE, manager.config());
        let frame = frames.iter().find(|frame| frame.id == first).expect("frame");
        assert_eq!(
            frame.style(),
            "left:80px;top:80px;width:640px;height:480px;z-index:1;"
        );
        assert_eq!(frame.class_name(), "desktop-window");
    }

    #[test]
    fn taskbar_lists_windows_in_open_order() {
        let (mut manager, first, second) = manager_with_two();
        manager.focus_window(first);
        manager.minimize_window(second);

        let entries = taskbar_entries(manager.windows());
        assert_eq!(
            entries.iter().map(|entry| entry.id).collect::<Vec<_>>(),
            vec![first, second]
        );
        assert!(entries[0].is_focused);
        assert!(entries[1].is_minimized);
        assert_eq!(
            entries[1].class_name(),
            "taskbar-window-button minimized"
        );
    }

    #[test]
    fn taskbar_click_cycles_focus_minimize_restore() {
        let (mut manager, first, second) = manager_with_two();

        let click = |manager: &mut WindowManager, id: WindowId| {
            let window = manager.window(id).expect("window").clone();
            for command in taskbar_activation(&window) {
                manager.apply(command).expect("taskbar command");
            }
        };

        click(&mut manager, first);
        assert_eq!(manager.focused_window_id(), Some(first));

        click(&mut manager, first);
        assert!(manager.window(first).expect("window").is_minimized());
        assert_eq!(manager.focused_window_id(), None);

        click(&mut manager, first);
        let window = manager.window(first).expect("window");
        assert_eq!(window.state, WindowState::Normal);
        assert!(window.is_focused);
        assert!(!manager.window(second).expect("window").is_focused);
    }
}
