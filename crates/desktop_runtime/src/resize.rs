//! Edge/corner resize gesture tracking.
//!
//! Unlike dragging, resize deltas are measured from the gesture's start pointer and applied to
//! the rect captured at pointer-down, so repeated moves never accumulate drift.

use crate::{
    geometry::{resize_from_edge, ResizeLimits},
    model::{PartialRect, PointerPosition, PointerSample, ResizeEdge, WindowRect},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ResizeGesture {
    pointer_id: i32,
    start_pointer: PointerPosition,
    start_rect: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeController {
    edge: ResizeEdge,
    limits: ResizeLimits,
    gesture: Option<ResizeGesture>,
}

impl ResizeController {
    pub fn new(edge: ResizeEdge, limits: ResizeLimits) -> Self {
        Self {
            edge,
            limits,
            gesture: None,
        }
    }

    pub fn edge(&self) -> ResizeEdge {
        self.edge
    }

    /// Starts a gesture anchored at `current_rect`. Returns `true` when the caller should capture
    /// the pointer.
    pub fn pointer_down(&mut self, sample: &PointerSample, current_rect: WindowRect) -> bool {
        if !sample.initiates_gesture() {
            return false;
        }
        self.gesture = Some(ResizeGesture {
            pointer_id: sample.pointer_id,
            start_pointer: sample.position,
            start_rect: current_rect,
        });
        true
    }

    /// Computes the partial rect for the current pointer position.
    pub fn pointer_move(&self, sample: &PointerSample) -> Option<PartialRect> {
        let gesture = self.gesture.as_ref()?;
        if gesture.pointer_id != sample.pointer_id {
            return None;
        }
        let dx = sample.position.x - gesture.start_pointer.x;
        let dy = sample.position.y - gesture.start_pointer.y;
        Some(resize_from_edge(
            gesture.start_rect,
            self.edge,
            dx,
            dy,
            self.limits,
        ))
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

    const START: WindowRect = WindowRect::new(100, 100, 640, 480);

    #[test]
    fn west_resize_is_anchored_at_gesture_start() {
        let mut resize = ResizeController::new(ResizeEdge::West, ResizeLimits::default());
        let down = PointerSample::mouse(100, 300);
        assert!(resize.pointer_down(&down, START));

        let first = resize.pointer_move(&down.at(130, 300)).expect("update");
        let second = resize.pointer_move(&down.at(150, 300)).expect("update");

        assert_eq!(START.merged(first), WindowRect::new(130, 100, 610, 480));
        // Measured from the start pointer, not from the previous move.
        assert_eq!(START.merged(second), WindowRect::new(150, 100, 590, 480));
    }

    #[test]
    fn clamped_resize_does_not_jitter_opposite_edge() {
        let mut resize = ResizeController::new(ResizeEdge::West, ResizeLimits::default());
        let down = PointerSample::mouse(100, 300);
        resize.pointer_down(&down, START);

        for x in [700, 900, 1100] {
            let rect = START.merged(resize.pointer_move(&down.at(x, 300)).expect("update"));
            assert_eq!(rect.width, 200);
            assert_eq!(rect.x, 540);
        }
    }

    #[test]
    fn custom_limits_are_honoured() {
        let limits = ResizeLimits {
            min_width: 320,
            min_height: 240,
        };
        let mut resize = ResizeController::new(ResizeEdge::SouthEast, limits);
        let down = PointerSample::mouse(740, 580);
        resize.pointer_down(&down, START);

        let update = resize.pointer_move(&down.at(0, 0)).expect("update");
        assert_eq!(update, PartialRect::size(320, 240));
    }

    #[test]
    fn idle_and_cancelled_controllers_produce_nothing() {
        let mut resize = ResizeController::new(ResizeEdge::South, ResizeLimits::default());
        let down = PointerSample::mouse(0, 0);
        assert_eq!(resize.pointer_move(&down), None);

        assert!(!resize.pointer_down(&down.with_button(1), START));
        assert!(!resize.is_active());

        resize.pointer_down(&down, START);
        resize.cancel();
        assert_eq!(resize.pointer_move(&down.at(0, 50)), None);
        assert!(!resize.pointer_up(down.pointer_id));
    }
}
