//! Logical input and edge detection
//!
//! The host maps whatever device it has onto [`Button`]s and hands over one
//! [`InputSnapshot`] per frame. [`InputTracker`] compares consecutive
//! snapshots so mode transitions only ever see "pressed this frame" edges,
//! while player movement reads the held state.

use super::player::Movement;

/// Logical buttons the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Button {
    Up = 1 << 0,
    Down = 1 << 1,
    Left = 1 << 2,
    Right = 1 << 3,
    /// Enter / select
    Confirm = 1 << 4,
    /// Escape / cancel
    Back = 1 << 5,
    Pause = 1 << 6,
    Resume = 1 << 7,
    Save = 1 << 8,
    /// Return to the main menu from the pause screen
    Menu = 1 << 9,
    /// Remove the highlighted save
    Delete = 1 << 10,
    /// Backspace in the save-name field
    Erase = 1 << 11,
}

/// Small bit set of [`Button`]s
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonSet(u16);

impl ButtonSet {
    pub const EMPTY: ButtonSet = ButtonSet(0);

    pub fn of(buttons: &[Button]) -> Self {
        let mut set = Self::EMPTY;
        for b in buttons {
            set.insert(*b);
        }
        set
    }

    pub fn insert(&mut self, button: Button) {
        self.0 |= button as u16;
    }

    pub fn contains(&self, button: Button) -> bool {
        self.0 & button as u16 != 0
    }

    /// Buttons in `self` that are not in `other`
    pub fn difference(&self, other: ButtonSet) -> ButtonSet {
        ButtonSet(self.0 & !other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Raw device state for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Buttons currently held down
    pub held: ButtonSet,
    /// Characters typed this frame (already edge-triggered by the host)
    pub text: Vec<char>,
}

impl InputSnapshot {
    pub fn holding(buttons: &[Button]) -> Self {
        Self {
            held: ButtonSet::of(buttons),
            text: Vec::new(),
        }
    }

    pub fn typing(text: &str) -> Self {
        Self {
            held: ButtonSet::EMPTY,
            text: text.chars().collect(),
        }
    }
}

/// Input for one tick: held state plus this frame's rising edges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub held: ButtonSet,
    pub pressed: ButtonSet,
    pub text: Vec<char>,
}

impl FrameInput {
    pub fn pressed(&self, button: Button) -> bool {
        self.pressed.contains(button)
    }

    pub fn held(&self, button: Button) -> bool {
        self.held.contains(button)
    }

    /// Movement axes from the held directional buttons
    pub fn movement(&self) -> Movement {
        Movement {
            up: self.held(Button::Up),
            down: self.held(Button::Down),
            left: self.held(Button::Left),
            right: self.held(Button::Right),
        }
    }
}

/// Remembers the previous snapshot to derive edges
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    previous: ButtonSet,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, snapshot: InputSnapshot) -> FrameInput {
        let pressed = snapshot.held.difference(self.previous);
        self.previous = snapshot.held;
        FrameInput {
            held: snapshot.held,
            pressed,
            text: snapshot.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_fires_once_while_held() {
        let mut tracker = InputTracker::new();
        let first = tracker.advance(InputSnapshot::holding(&[Button::Confirm]));
        assert!(first.pressed(Button::Confirm));

        let second = tracker.advance(InputSnapshot::holding(&[Button::Confirm]));
        assert!(!second.pressed(Button::Confirm));
        assert!(second.held(Button::Confirm));

        tracker.advance(InputSnapshot::default());
        let again = tracker.advance(InputSnapshot::holding(&[Button::Confirm]));
        assert!(again.pressed(Button::Confirm));
    }

    #[test]
    fn test_movement_reads_held_axes() {
        let mut tracker = InputTracker::new();
        tracker.advance(InputSnapshot::holding(&[Button::Up]));
        let frame = tracker.advance(InputSnapshot::holding(&[Button::Up, Button::Left]));
        let movement = frame.movement();
        assert!(movement.up && movement.left);
        assert!(!movement.down && !movement.right);
        assert!(frame.pressed(Button::Left));
        assert!(!frame.pressed(Button::Up));
    }

    #[test]
    fn test_button_set() {
        let set = ButtonSet::of(&[Button::Save, Button::Delete]);
        assert!(set.contains(Button::Save));
        assert!(!set.contains(Button::Erase));
        assert!(set.difference(set).is_empty());
    }
}
