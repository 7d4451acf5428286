//! Pointer hit regions for the on-screen buttons.
//!
//! The view publishes where it drew each button (in terminal cells); mouse
//! clicks are resolved against that map.

use arrayvec::ArrayVec;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::map::{button_command, Button};
use crate::types::{Command, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRegion {
    pub button: Button,
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl HitRegion {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x
            && row >= self.y
            && u32::from(col) < u32::from(self.x) + u32::from(self.w)
            && u32::from(row) < u32::from(self.y) + u32::from(self.h)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    regions: ArrayVec<HitRegion, 8>,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Register a region, replacing any earlier one for the same button.
    pub fn insert(&mut self, region: HitRegion) {
        self.regions.retain(|r| r.button != region.button);
        // One slot per button, so this cannot overflow.
        let _ = self.regions.try_push(region);
    }

    pub fn regions(&self) -> &[HitRegion] {
        &self.regions
    }

    pub fn hit_test(&self, col: u16, row: u16) -> Option<Button> {
        self.regions
            .iter()
            .find(|r| r.contains(col, row))
            .map(|r| r.button)
    }
}

/// Resolve a left click to a command. Other mouse events are ignored.
pub fn handle_mouse_event(event: MouseEvent, hits: &HitMap, phase: Phase) -> Option<Command> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => hits
            .hit_test(event.column, event.row)
            .map(|button| button_command(button, phase)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn start_map() -> HitMap {
        let mut hits = HitMap::new();
        hits.insert(HitRegion {
            button: Button::Start,
            x: 10,
            y: 5,
            w: 7,
            h: 1,
        });
        hits.insert(HitRegion {
            button: Button::B,
            x: 20,
            y: 2,
            w: 3,
            h: 1,
        });
        hits
    }

    #[test]
    fn click_inside_region() {
        let hits = start_map();
        assert_eq!(hits.hit_test(10, 5), Some(Button::Start));
        assert_eq!(hits.hit_test(16, 5), Some(Button::Start));
        assert_eq!(hits.hit_test(17, 5), None);
        assert_eq!(hits.hit_test(10, 6), None);
    }

    #[test]
    fn click_maps_through_phase() {
        let hits = start_map();
        assert_eq!(
            handle_mouse_event(click(12, 5), &hits, Phase::NotStarted),
            Some(Command::Start)
        );
        assert_eq!(
            handle_mouse_event(click(12, 5), &hits, Phase::GameOver),
            Some(Command::Restart)
        );
        assert_eq!(
            handle_mouse_event(click(21, 2), &hits, Phase::Running),
            Some(Command::HardDrop)
        );
    }

    #[test]
    fn non_click_events_ignored() {
        let hits = start_map();
        let mut ev = click(12, 5);
        ev.kind = MouseEventKind::Moved;
        assert_eq!(handle_mouse_event(ev, &hits, Phase::NotStarted), None);
    }

    #[test]
    fn insert_replaces_same_button() {
        let mut hits = start_map();
        hits.insert(HitRegion {
            button: Button::Start,
            x: 0,
            y: 0,
            w: 1,
            h: 1,
        });
        assert_eq!(hits.regions().len(), 2);
        assert_eq!(hits.hit_test(12, 5), None);
        assert_eq!(hits.hit_test(0, 0), Some(Button::Start));
    }
}
