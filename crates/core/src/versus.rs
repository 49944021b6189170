//! Two-character comparison picker.
//!
//! Remote characters have no identity of their own, so selections are
//! positions in the currently loaded list.

/// Number of characters compared side by side.
pub const VERSUS_SLOTS: usize = 2;

/// Outcome of a [`VersusPicker::select`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The position was added; carries how many are now selected.
    Added(usize),
    AlreadySelected,
    /// Both slots are taken.
    Full,
}

#[derive(Debug, Clone, Default)]
pub struct VersusPicker {
    selected: Vec<usize>,
}

impl VersusPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, position: usize) -> Selection {
        if self.selected.contains(&position) {
            return Selection::AlreadySelected;
        }
        if self.selected.len() >= VERSUS_SLOTS {
            return Selection::Full;
        }
        self.selected.push(position);
        Selection::Added(self.selected.len())
    }

    pub fn is_selected(&self, position: usize) -> bool {
        self.selected.contains(&position)
    }

    pub fn is_ready(&self) -> bool {
        self.selected.len() == VERSUS_SLOTS
    }

    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    /// The two selected items, in selection order.
    ///
    /// `None` until both slots are filled or when a selected position no
    /// longer exists in `items`.
    pub fn pair<'a, T>(&self, items: &'a [T]) -> Option<(&'a T, &'a T)> {
        match self.selected.as_slice() {
            [first, second] => Some((items.get(*first)?, items.get(*second)?)),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.selected.clear();
    }
}
