use desktop_app_contract::{ApplicationId, WindowGeometryHint};
use serde::{Deserialize, Serialize};

/// Opaque window identifier assigned by the window manager. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "win-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// Returns a copy with every field present in `partial` overwritten.
    pub fn merged(self, partial: PartialRect) -> Self {
        Self {
            x: partial.x.unwrap_or(self.x),
            y: partial.y.unwrap_or(self.y),
            width: partial.width.unwrap_or(self.width),
            height: partial.height.unwrap_or(self.height),
        }
    }
}

/// Rect update where absent fields are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartialRect {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl PartialRect {
    pub fn position(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(width: i32, height: i32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.width.is_none() && self.height.is_none()
    }
}

impl From<WindowRect> for PartialRect {
    fn from(rect: WindowRect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.width),
            height: Some(rect.height),
        }
    }
}

impl From<WindowGeometryHint> for PartialRect {
    fn from(hint: WindowGeometryHint) -> Self {
        Self {
            x: hint.x,
            y: hint.y,
            width: hint.width,
            height: hint.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: ApplicationId,
    pub title: String,
    pub icon: Option<String>,
    pub rect: WindowRect,
    pub z_index: u32,
    pub state: WindowState,
    pub is_focused: bool,
}

impl WindowRecord {
    pub fn is_minimized(&self) -> bool {
        self.state == WindowState::Minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.state == WindowState::Maximized
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub app_id: ApplicationId,
    pub title: String,
    pub icon: Option<String>,
    pub initial_rect: Option<PartialRect>,
}

impl OpenWindowRequest {
    /// Builds a request for `app_id`. The id is not resolved against any registry.
    pub fn new(app_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            app_id: ApplicationId::trusted(app_id),
            title: title.into(),
            icon: None,
            initial_rect: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_rect(mut self, rect: impl Into<PartialRect>) -> Self {
        self.initial_rect = Some(rect.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

impl PointerKind {
    /// Maps a DOM `pointerType` string; unknown types are treated as pen input.
    pub fn from_dom(pointer_type: &str) -> Self {
        match pointer_type {
            "mouse" => Self::Mouse,
            "touch" => Self::Touch,
            _ => Self::Pen,
        }
    }
}

/// One pointer event as seen by the drag/resize controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerSample {
    pub pointer_id: i32,
    pub kind: PointerKind,
    /// DOM button index; `0` is the primary button.
    pub button: i16,
    pub is_primary: bool,
    pub position: PointerPosition,
}

impl PointerSample {
    /// Primary-button mouse sample at `(x, y)`.
    pub fn mouse(x: i32, y: i32) -> Self {
        Self {
            pointer_id: 1,
            kind: PointerKind::Mouse,
            button: 0,
            is_primary: true,
            position: PointerPosition { x, y },
        }
    }

    pub fn with_button(mut self, button: i16) -> Self {
        self.button = button;
        self
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = PointerPosition { x, y };
        self
    }

    /// Only the primary mouse button, or the primary touch/pen contact, may start a gesture.
    pub fn initiates_gesture(&self) -> bool {
        match self.kind {
            PointerKind::Mouse => self.button == 0,
            PointerKind::Touch | PointerKind::Pen => self.is_primary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::North,
        ResizeEdge::South,
        ResizeEdge::East,
        ResizeEdge::West,
        ResizeEdge::NorthEast,
        ResizeEdge::NorthWest,
        ResizeEdge::SouthEast,
        ResizeEdge::SouthWest,
    ];

    /// Compass code (`n`, `se`, ...) used for handle markup.
    pub fn code(self) -> &'static str {
        match self {
            Self::North => "n",
            Self::South => "s",
            Self::East => "e",
            Self::West => "w",
            Self::NorthEast => "ne",
            Self::NorthWest => "nw",
            Self::SouthEast => "se",
            Self::SouthWest => "sw",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|edge| edge.code() == code)
    }

    pub fn moves_north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    pub fn moves_south(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    pub fn moves_east(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    pub fn moves_west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn merged_rect_keeps_absent_fields() {
        let rect = WindowRect::new(10, 20, 300, 200);
        assert_eq!(
            rect.merged(PartialRect {
                width: Some(400),
                ..PartialRect::default()
            }),
            WindowRect::new(10, 20, 400, 200)
        );
        assert_eq!(rect.merged(PartialRect::default()), rect);
    }

    #[test]
    fn edge_codes_round_trip_and_axes_are_disjoint() {
        for edge in ResizeEdge::ALL {
            assert_eq!(ResizeEdge::from_code(edge.code()), Some(edge));
            assert!(!(edge.moves_east() && edge.moves_west()));
            assert!(!(edge.moves_north() && edge.moves_south()));
        }
        assert_eq!(ResizeEdge::from_code("x"), None);
    }

    #[test]
    fn secondary_mouse_buttons_do_not_start_gestures() {
        assert!(PointerSample::mouse(0, 0).initiates_gesture());
        assert!(!PointerSample::mouse(0, 0).with_button(2).initiates_gesture());

        let secondary_touch = PointerSample {
            kind: PointerKind::Touch,
            is_primary: false,
            ..PointerSample::mouse(0, 0)
        };
        assert!(!secondary_touch.initiates_gesture());
        assert!(PointerSample {
            is_primary: true,
            ..secondary_touch
        }
        .initiates_gesture());
    }

    #[test]
    fn window_ids_display_with_prefix() {
        assert_eq!(WindowId(7).to_string(), "win-7");
    }
}
