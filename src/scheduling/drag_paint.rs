use super::{availability_map::AvailabilityMap, slot_key::SlotKey};

/// Pointer gesture state for painting availability across several cells.
///
/// A pointer-down toggles the touched cell and remembers the resulting value,
/// every cell entered afterwards is set to that value until the gesture ends.
#[derive(Debug, Clone, Default)]
pub struct DragPainter {
    /// Value applied to entered cells, `Some` while a gesture is active.
    paint_value: Option<bool>,
    read_only: bool,
}

impl DragPainter {
    pub fn new() -> Self { Self::default() }

    /// A painter that ignores all pointer input (view-only grids).
    pub fn read_only() -> Self { Self { paint_value: None, read_only: true } }

    pub fn is_dragging(&self) -> bool { self.paint_value.is_some() }

    pub fn pointer_down(&mut self, map: &mut AvailabilityMap, key: SlotKey) {
        if self.read_only {
            return;
        }
        let value = map.toggle(key);
        self.paint_value = Some(value);
    }

    pub fn pointer_enter(&self, map: &mut AvailabilityMap, key: SlotKey) {
        if self.read_only {
            return;
        }
        if let Some(value) = self.paint_value {
            map.set(key, value);
        }
    }

    /// Ends the current gesture; covers pointer-up, pointer-leave and pointer-cancel.
    pub fn pointer_up(&mut self) { self.paint_value = None; }
}
