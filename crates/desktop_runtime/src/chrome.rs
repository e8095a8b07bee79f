//! Per-window chrome interaction state: wires the titlebar drag and edge resize controllers to
//! window commands.

use crate::{
    drag::DragController,
    geometry::ResizeLimits,
    model::{PartialRect, PointerSample, ResizeEdge, WindowId, WindowRecord, WindowState},
    resize::ResizeController,
    window_manager::WindowCommand,
};

/// Move command for a drag delta, or `None` when the window cannot move.
pub fn drag_command(window: &WindowRecord, dx: i32, dy: i32) -> Option<WindowCommand> {
    if window.state == WindowState::Maximized || (dx == 0 && dy == 0) {
        return None;
    }
    Some(WindowCommand::Move {
        window_id: window.id,
        x: window.rect.x + dx,
        y: window.rect.y + dy,
    })
}

pub fn resize_command(window_id: WindowId, rect: PartialRect) -> Option<WindowCommand> {
    if rect.is_empty() {
        return None;
    }
    Some(WindowCommand::Resize { window_id, rect })
}

/// Maximize button and titlebar double-click both toggle maximized.
pub fn titlebar_toggle(window_id: WindowId) -> WindowCommand {
    WindowCommand::Maximize { window_id }
}

/// Focus command for a pointer-down anywhere on the frame, skipped when already focused.
pub fn focus_on_pointer_down(window: &WindowRecord) -> Option<WindowCommand> {
    if window.is_focused && window.state != WindowState::Minimized {
        return None;
    }
    Some(WindowCommand::Focus {
        window_id: window.id,
    })
}

/// Gesture state for one window's titlebar and its eight resize handles.
#[derive(Debug, Clone)]
pub struct WindowChrome {
    drag: DragController,
    resize: Vec<ResizeController>,
}

impl WindowChrome {
    pub fn new(limits: ResizeLimits) -> Self {
        Self {
            drag: DragController::new(),
            resize: ResizeEdge::ALL
                .into_iter()
                .map(|edge| ResizeController::new(edge, limits))
                .collect(),
        }
    }

    fn resize_controller(&mut self, edge: ResizeEdge) -> Option<&mut ResizeController> {
        self.resize.iter_mut().find(|controller| controller.edge() == edge)
    }

    /// Returns `true` when the titlebar should capture the pointer.
    pub fn titlebar_down(&mut self, sample: &PointerSample) -> bool {
        self.drag.pointer_down(sample)
    }

    /// Translates a titlebar move into a move command against the window's current position.
    ///
    /// A window that disappeared mid-gesture ends the gesture.
    pub fn titlebar_move(
        &mut self,
        window: Option<&WindowRecord>,
        sample: &PointerSample,
    ) -> Option<WindowCommand> {
        let Some(window) = window else {
            self.drag.cancel();
            return None;
        };
        let (dx, dy) = self.drag.pointer_move(sample)?;
        drag_command(window, dx, dy)
    }

    /// Returns `true` when the titlebar should release pointer capture.
    pub fn titlebar_up(&mut self, pointer_id: i32) -> bool {
        self.drag.pointer_up(pointer_id)
    }

    /// Starts a resize on `edge`. Only normal windows can be resized.
    pub fn handle_down(
        &mut self,
        edge: ResizeEdge,
        window: &WindowRecord,
        sample: &PointerSample,
    ) -> bool {
        if window.state != WindowState::Normal {
            return false;
        }
        let rect = window.rect;
        self.resize_controller(edge)
            .map(|controller| controller.pointer_down(sample, rect))
            .unwrap_or(false)
    }

    pub fn handle_move(
        &mut self,
        edge: ResizeEdge,
        window_id: WindowId,
        sample: &PointerSample,
    ) -> Option<WindowCommand> {
        let rect = self.resize_controller(edge)?.pointer_move(sample)?;
        resize_command(window_id, rect)
    }

    pub fn handle_up(&mut self, edge: ResizeEdge, pointer_id: i32) -> bool {
        self.resize_controller(edge)
            .map(|controller| controller.pointer_up(pointer_id))
            .unwrap_or(false)
    }

    pub fn handle_cancel(&mut self, edge: ResizeEdge) {
        if let Some(controller) = self.resize_controller(edge) {
            controller.cancel();
        }
    }

    pub fn titlebar_cancel(&mut self) {
        self.drag.cancel();
    }

    pub fn is_interacting(&self) -> bool {
        self.drag.is_active() || self.resize.iter().any(ResizeController::is_active)
    }
}

impl Default for WindowChrome {
    fn default() -> Self {
        Self::new(ResizeLimits::default())
    }
}
