use std::collections::BTreeSet;

use crate::registration::RegistrationId;

/// Checkbox state for the admin table. Lives for one page view; nothing here
/// is persisted.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: BTreeSet<RegistrationId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one row and report whether it is now selected.
    pub fn toggle(&mut self, id: &RegistrationId) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.clone());
            true
        }
    }

    pub fn select_all<'a, I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = &'a RegistrationId>,
    {
        self.selected.extend(ids.into_iter().cloned());
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Bulk buttons stay disabled until at least one row is checked.
    pub fn bulk_actions_enabled(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn is_selected(&self, id: &RegistrationId) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_ids(&self) -> Vec<RegistrationId> {
        self.selected.iter().cloned().collect()
    }
}
