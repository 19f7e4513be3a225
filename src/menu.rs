//! Menu cursors, the save browser and save-name entry
//!
//! Pure selection state. The coordinator in `game` decides what an activated
//! entry does; nothing here touches storage or the world.

use crate::sessions::SessionEntry;
use crate::settings::RoadStyle;

/// Longest save name the entry field accepts
pub const MAX_NAME_LEN: usize = 20;

/// Wrapping cursor over `len` entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuCursor {
    selected: usize,
    len: usize,
}

impl MenuCursor {
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Move down, wrapping to the top. No-op when empty.
    pub fn next(&mut self) {
        if self.len > 0 {
            self.selected = (self.selected + 1) % self.len;
        }
    }

    /// Move up, wrapping to the bottom. No-op when empty.
    pub fn previous(&mut self) {
        if self.len > 0 {
            self.selected = (self.selected + self.len - 1) % self.len;
        }
    }

    /// Change the entry count, keeping the cursor in range
    pub fn resize(&mut self, len: usize) {
        self.len = len;
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }
}

/// Main menu entries, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuOption {
    Play,
    Load,
    Options,
    HowToPlay,
    About,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 6] = [
        MenuOption::Play,
        MenuOption::Load,
        MenuOption::Options,
        MenuOption::HowToPlay,
        MenuOption::About,
        MenuOption::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::Play => "Play",
            MenuOption::Load => "Load",
            MenuOption::Options => "Options",
            MenuOption::HowToPlay => "How to Play",
            MenuOption::About => "About",
            MenuOption::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainMenu {
    cursor: MenuCursor,
}

impl Default for MainMenu {
    fn default() -> Self {
        Self {
            cursor: MenuCursor::new(MenuOption::ALL.len()),
        }
    }
}

impl MainMenu {
    pub fn cursor(&self) -> MenuCursor {
        self.cursor
    }

    pub fn next(&mut self) {
        self.cursor.next();
    }

    pub fn previous(&mut self) {
        self.cursor.previous();
    }

    pub fn selected(&self) -> MenuOption {
        MenuOption::ALL[self.cursor.selected()]
    }

    pub fn reset(&mut self) {
        self.cursor.reset();
    }
}

/// Road style picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionsMenu {
    cursor: MenuCursor,
}

impl Default for OptionsMenu {
    fn default() -> Self {
        Self {
            cursor: MenuCursor::new(RoadStyle::ALL.len()),
        }
    }
}

impl OptionsMenu {
    /// Start with the current style highlighted
    pub fn showing(style: RoadStyle) -> Self {
        let mut menu = Self::default();
        while menu.selected() != style {
            menu.cursor.next();
        }
        menu
    }

    pub fn cursor(&self) -> MenuCursor {
        self.cursor
    }

    pub fn next(&mut self) {
        self.cursor.next();
    }

    pub fn previous(&mut self) {
        self.cursor.previous();
    }

    pub fn selected(&self) -> RoadStyle {
        RoadStyle::ALL[self.cursor.selected()]
    }
}

/// Ranked list of saves with a highlighted row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveBrowser {
    entries: Vec<SessionEntry>,
    cursor: MenuCursor,
}

impl SaveBrowser {
    /// Replace the rows, keeping the cursor in range
    pub fn refresh(&mut self, entries: Vec<SessionEntry>) {
        self.cursor.resize(entries.len());
        self.entries = entries;
    }

    pub fn entries(&self) -> &[SessionEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> MenuCursor {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next(&mut self) {
        self.cursor.next();
    }

    pub fn previous(&mut self) {
        self.cursor.previous();
    }

    pub fn selected(&self) -> Option<&SessionEntry> {
        self.entries.get(self.cursor.selected())
    }

    pub fn reset(&mut self) {
        self.cursor.reset();
    }
}

/// Text field for naming a save
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameEntry {
    buffer: String,
}

impl NameEntry {
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Append typed characters. Only ASCII letters and digits are kept.
    pub fn type_chars(&mut self, chars: &[char]) {
        for &c in chars {
            if c.is_ascii_alphanumeric() && self.buffer.len() < MAX_NAME_LEN {
                self.buffer.push(c);
            }
        }
    }

    /// Backspace
    pub fn erase(&mut self) {
        self.buffer.pop();
    }

    pub fn is_blank(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::SessionRecord;
    use crate::sim::RoadType;
    use proptest::prelude::*;

    fn entry(name: &str, score: u32) -> SessionEntry {
        SessionEntry {
            key: format!("{}_0", name),
            record: SessionRecord {
                name: name.to_string(),
                score,
                level: 1,
                road_type: RoadType::Retro,
                save_time: "2024-01-01 00:00:00".to_string(),
            },
        }
    }

    #[test]
    fn test_main_menu_wraps() {
        let mut menu = MainMenu::default();
        assert_eq!(menu.selected(), MenuOption::Play);
        menu.previous();
        assert_eq!(menu.selected(), MenuOption::Exit);
        menu.next();
        menu.next();
        assert_eq!(menu.selected(), MenuOption::Load);
    }

    #[test]
    fn test_options_menu_starts_on_current_style() {
        let mut menu = OptionsMenu::showing(RoadStyle::Modern);
        assert_eq!(menu.selected(), RoadStyle::Modern);
        menu.next();
        assert_eq!(menu.selected(), RoadStyle::Retro);
        menu.previous();
        assert_eq!(menu.selected(), RoadStyle::Modern);
    }

    #[test]
    fn test_empty_browser_ignores_navigation() {
        let mut browser = SaveBrowser::default();
        browser.next();
        browser.previous();
        assert_eq!(browser.cursor().selected(), 0);
        assert!(browser.selected().is_none());
    }

    #[test]
    fn test_browser_clamps_after_shrinking() {
        let mut browser = SaveBrowser::default();
        browser.refresh(vec![entry("a", 3), entry("b", 2), entry("c", 1)]);
        browser.previous();
        assert_eq!(browser.selected().map(|e| e.record.score), Some(1));

        browser.refresh(vec![entry("a", 3), entry("b", 2)]);
        assert_eq!(browser.cursor().selected(), 1);
        browser.refresh(Vec::new());
        assert_eq!(browser.cursor().selected(), 0);
        assert!(browser.selected().is_none());
    }

    #[test]
    fn test_name_entry_filters_and_erases() {
        let mut name = NameEntry::default();
        assert!(name.is_blank());
        name.type_chars(&['A', 'n', ' ', '!', 'a', '7']);
        assert_eq!(name.as_str(), "Ana7");
        name.erase();
        assert_eq!(name.as_str(), "Ana");
        name.clear();
        name.erase();
        assert!(name.is_blank());
    }

    #[test]
    fn test_name_entry_caps_length() {
        let mut name = NameEntry::default();
        let long: Vec<char> = std::iter::repeat('x').take(MAX_NAME_LEN + 5).collect();
        name.type_chars(&long);
        assert_eq!(name.as_str().len(), MAX_NAME_LEN);
    }

    proptest! {
        #[test]
        fn prop_cursor_stays_in_range(len in 0usize..10, moves in prop::collection::vec(any::<bool>(), 0..40)) {
            let mut cursor = MenuCursor::new(len);
            for down in moves {
                if down { cursor.next() } else { cursor.previous() }
                prop_assert!(cursor.selected() < len.max(1));
            }
        }
    }
}
