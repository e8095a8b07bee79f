//! Titlebar drag gesture tracking.
//!
//! The controller turns a pointer-down / pointer-move* / pointer-up stream into relative
//! `(dx, dy)` deltas. Each delta is measured from the previous event rather than from gesture
//! start, so the caller applies it to the window's current position.

use crate::model::{PointerPosition, PointerSample};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragGesture {
    pointer_id: i32,
    last_pointer: PointerPosition,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragController {
    gesture: Option<DragGesture>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a gesture. Returns `true` when the caller should capture the pointer.
    ///
    /// Non-primary input is ignored and leaves any in-flight gesture untouched.
    pub fn pointer_down(&mut self, sample: &PointerSample) -> bool {
        if !sample.initiates_gesture() {
            return false;
        }
        self.gesture = Some(DragGesture {
            pointer_id: sample.pointer_id,
            last_pointer: sample.position,
        });
        true
    }

    /// Returns the delta since the previous event of the active gesture.
    pub fn pointer_move(&mut self, sample: &PointerSample) -> Option<(i32, i32)> {
        let gesture = self.gesture.as_mut()?;
        if gesture.pointer_id != sample.pointer_id {
            return None;
        }
        let dx = sample.position.x - gesture.last_pointer.x;
        let dy = sample.position.y - gesture.last_pointer.y;
        gesture.last_pointer = sample.position;
        Some((dx, dy))
    }

    /// Ends the gesture. Returns `true` when a gesture was active and capture should be released.
    pub fn pointer_up(&mut self, pointer_id: i32) -> bool {
        match self.gesture {
            Some(gesture) if gesture.pointer_id == pointer_id => {
                self.gesture = None;
                true
            }
            _ => false,
        }
    }

    /// Drops the gesture after pointer-cancel or lost capture.
    pub fn cancel(&mut self) {
        self.gesture = None;
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::PointerKind;

    #[test]
    fn deltas_are_relative_to_previous_event() {
        let mut drag = DragController::new();
        let down = PointerSample::mouse(10, 10);
        assert!(drag.pointer_down(&down));

        assert_eq!(drag.pointer_move(&down.at(15, 12)), Some((5, 2)));
        assert_eq!(drag.pointer_move(&down.at(25, 12)), Some((10, 0)));
        assert_eq!(drag.pointer_move(&down.at(20, 2)), Some((-5, -10)));
    }

    #[test]
    fn moves_without_gesture_are_ignored() {
        let mut drag = DragController::new();
        assert_eq!(drag.pointer_move(&PointerSample::mouse(5, 5)), None);
        assert!(!drag.is_active());
    }

    #[test]
    fn secondary_button_does_not_start_drag() {
        let mut drag = DragController::new();
        let right_click = PointerSample::mouse(0, 0).with_button(2);
        assert!(!drag.pointer_down(&right_click));
        assert_eq!(drag.pointer_move(&right_click.at(40, 40)), None);
    }

    #[test]
    fn touch_drag_requires_primary_contact() {
        let mut drag = DragController::new();
        let touch = PointerSample {
            pointer_id: 9,
            kind: PointerKind::Touch,
            button: 0,
            is_primary: true,
            position: PointerPosition { x: 0, y: 0 },
        };
        assert!(drag.pointer_down(&touch));

        let other_finger = PointerSample {
            pointer_id: 10,
            ..touch.at(50, 50)
        };
        assert_eq!(drag.pointer_move(&other_finger), None);
        assert_eq!(drag.pointer_move(&touch.at(3, 4)), Some((3, 4)));
    }

    #[test]
    fn pointer_up_clears_gesture_and_duplicate_up_is_noop() {
        let mut drag = DragController::new();
        let down = PointerSample::mouse(0, 0);
        drag.pointer_down(&down);

        assert!(drag.pointer_up(down.pointer_id));
        assert!(!drag.pointer_up(down.pointer_id));
        assert_eq!(drag.pointer_move(&down.at(10, 10)), None);
    }

    #[test]
    fn cancel_prevents_stale_deltas_in_next_gesture() {
        let mut drag = DragController::new();
        let down = PointerSample::mouse(0, 0);
        drag.pointer_down(&down);
        drag.pointer_move(&down.at(30, 30));
        drag.cancel();
        assert!(!drag.is_active());

        drag.pointer_down(&down.at(200, 200));
        assert_eq!(drag.pointer_move(&down.at(201, 202)), Some((1, 2)));
    }
}
