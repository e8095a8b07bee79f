//! Pure geometry helpers shared by the window manager, resize controller, and compositor.

use crate::{
    config::WindowManagerConfig,
    model::{PartialRect, ResizeEdge, WindowRect},
};

/// Minimum dimensions enforced by resize gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeLimits {
    pub min_width: i32,
    pub min_height: i32,
}

impl Default for ResizeLimits {
    fn default() -> Self {
        WindowManagerConfig::default().into()
    }
}

impl From<WindowManagerConfig> for ResizeLimits {
    fn from(config: WindowManagerConfig) -> Self {
        Self {
            min_width: config.min_width,
            min_height: config.min_height,
        }
    }
}

/// Spawn position for a new window given how many windows are already open.
///
/// Positions repeat every `cascade_wrap` windows so the cascade never drifts off-surface.
pub fn cascade_position(open_count: usize, config: &WindowManagerConfig) -> (i32, i32) {
    let wrap = config.cascade_wrap.max(1) as usize;
    let slot = (open_count % wrap) as i32;
    let offset = config.cascade_origin + slot * config.cascade_step;
    (offset, offset)
}

/// Resolves the rect of a newly opened window, filling unset fields from the cascade and defaults.
///
/// Requested sizes below the minimum are raised to it.
pub fn initial_rect(
    requested: Option<PartialRect>,
    open_count: usize,
    config: &WindowManagerConfig,
) -> WindowRect {
    let (x, y) = cascade_position(open_count, config);
    let rect = WindowRect {
        x,
        y,
        width: config.default_width,
        height: config.default_height,
    }
    .merged(requested.unwrap_or_default());
    clamp_to_limits(rect, ResizeLimits::from(*config))
}

/// Raises `rect` to the minimum size, keeping its origin.
pub fn clamp_to_limits(rect: WindowRect, limits: ResizeLimits) -> WindowRect {
    WindowRect {
        width: rect.width.max(limits.min_width),
        height: rect.height.max(limits.min_height),
        ..rect
    }
}

/// Applies a pointer delta measured from gesture start to `start`, dragging `edge`.
///
/// Only the fields the edge affects are returned. Dimensions are clamped to `limits`, and the
/// position on a west/north drag is derived from the clamped size so the opposite edge stays put.
pub fn resize_from_edge(
    start: WindowRect,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    limits: ResizeLimits,
) -> PartialRect {
    let mut update = PartialRect::default();

    if edge.moves_east() {
        update.width = Some((start.width + dx).max(limits.min_width));
    }
    if edge.moves_west() {
        let width = (start.width - dx).max(limits.min_width);
        update.x = Some(start.right() - width);
        update.width = Some(width);
    }
    if edge.moves_south() {
        update.height = Some((start.height + dy).max(limits.min_height));
    }
    if edge.moves_north() {
        let height = (start.height - dy).max(limits.min_height);
        update.y = Some(start.bottom() - height);
        update.height = Some(height);
    }

    update
}

/// Bounds a maximized window occupies: the whole surface minus the taskbar strip.
pub fn maximized_bounds(surface: WindowRect, taskbar_height: i32) -> WindowRect {
    WindowRect {
        height: (surface.height - taskbar_height).max(0),
        ..surface
    }
}
