//! Keyboard focus movement for result lists and tab strips.

/// A navigation key, already separated from whatever modifiers the caller
/// cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

/// The highlighted row in a list of search results.
///
/// Nothing is highlighted until the user presses Down (or Home/End); Up
/// from the first row returns focus to the search input by clearing the
/// highlight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListNavigator {
    len: usize,
    active: Option<usize>,
}

impl ListNavigator {
    pub fn new(len: usize) -> Self {
        Self { len, active: None }
    }

    /// The result list changed; forget the highlight.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.active = None;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Apply `key`. Returns whether it was handled; with no results nothing
    /// is.
    pub fn handle(&mut self, key: Key) -> bool {
        if self.len == 0 {
            return false;
        }
        let last = self.len - 1;
        self.active = match key {
            Key::Down => Some(self.active.map_or(0, |i| (i + 1).min(last))),
            Key::Up => self.active.and_then(|i| i.checked_sub(1)),
            Key::Home => Some(0),
            Key::End => Some(last),
            Key::Left | Key::Right => return false,
        };
        true
    }
}

/// Which arrow keys move between tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Tabs in a row: Left/Right.
    #[default]
    Horizontal,
    /// Tabs in a column: Up/Down.
    Vertical,
}

/// Roving focus over a strip of tabs. Movement wraps at both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabNavigator {
    len: usize,
    current: usize,
    orientation: Orientation,
    rtl: bool,
}

impl TabNavigator {
    pub fn new(len: usize, orientation: Orientation) -> Self {
        Self { len, current: 0, orientation, rtl: false }
    }

    /// Lay out right-to-left, which swaps Left and Right on a horizontal strip.
    pub fn right_to_left(mut self, rtl: bool) -> Self {
        self.rtl = rtl;
        self
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Focus tab `index` directly (e.g. on click). Ignored if out of range.
    pub fn focus(&mut self, index: usize) {
        if index < self.len {
            self.current = index;
        }
    }

    /// Apply `key` and return the newly focused tab, or `None` if the key
    /// does nothing in this orientation.
    pub fn handle(&mut self, key: Key) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let horizontal = self.orientation == Orientation::Horizontal;
        let forward = match key {
            Key::Left if horizontal => self.rtl,
            Key::Right if horizontal => !self.rtl,
            Key::Up if !horizontal => false,
            Key::Down if !horizontal => true,
            Key::Home => {
                self.current = 0;
                return Some(self.current);
            },
            Key::End => {
                self.current = self.len - 1;
                return Some(self.current);
            },
            _ => return None,
        };
        self.current = match forward {
            true => (self.current + 1) % self.len,
            false => self.current.checked_sub(1).unwrap_or(self.len - 1),
        };
        Some(self.current)
    }
}
