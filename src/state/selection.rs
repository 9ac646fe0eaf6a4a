// Selection state - selected ids over the displayed list
use crate::model::Item;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectMode {
    /// Plain click
    Single,
    /// Ctrl/Cmd click
    Toggle,
    /// Shift click
    Range,
}

/// Selected ids plus the range anchor.
///
/// The id set is shared behind an `Arc` and replaced on every change, never
/// edited in place. Consumers can keep a snapshot and detect updates with
/// [`Arc::ptr_eq`].
#[derive(Clone, Debug, Default)]
pub struct SelectionState {
    selected: Arc<HashSet<String>>,
    last_selected: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, id: &str, mode: SelectMode, displayed: &[Item]) {
        match mode {
            SelectMode::Single => self.select_single(id),
            SelectMode::Toggle => {
                let mut next = (*self.selected).clone();
                if !next.remove(id) {
                    next.insert(id.to_string());
                }
                self.selected = Arc::new(next);
                self.last_selected = Some(id.to_string());
            }
            SelectMode::Range => match self.range_from_anchor(id, displayed) {
                Some(range) => {
                    self.selected = Arc::new(range);
                    self.last_selected = Some(id.to_string());
                }
                // Anchor missing or no longer displayed: plain select
                None => self.select_single(id),
            },
        }
    }

    fn select_single(&mut self, id: &str) {
        let mut next = HashSet::with_capacity(1);
        next.insert(id.to_string());
        self.selected = Arc::new(next);
        self.last_selected = Some(id.to_string());
    }

    fn range_from_anchor(&self, id: &str, displayed: &[Item]) -> Option<HashSet<String>> {
        let anchor = self.last_selected.as_deref()?;
        let ia = displayed.iter().position(|item| item.id == anchor)?;
        let it = displayed.iter().position(|item| item.id == id)?;
        let (lo, hi) = if ia <= it { (ia, it) } else { (it, ia) };
        Some(displayed[lo..=hi].iter().map(|item| item.id.clone()).collect())
    }

    /// Selects every non-folder item. Folders are left out of bulk actions.
    pub fn select_all(&mut self, displayed: &[Item]) {
        let next: HashSet<String> = displayed
            .iter()
            .filter(|item| !item.is_folder())
            .map(|item| item.id.clone())
            .collect();
        self.last_selected = displayed
            .iter()
            .rev()
            .find(|item| !item.is_folder())
            .map(|item| item.id.clone());
        self.selected = Arc::new(next);
    }

    /// Replaces the selection wholesale, e.g. from a box-select drag.
    pub fn replace(&mut self, ids: Arc<HashSet<String>>, anchor: Option<String>) {
        self.selected = ids;
        self.last_selected = anchor;
    }

    pub fn clear(&mut self) {
        if self.selected.is_empty() && self.last_selected.is_none() {
            return;
        }
        self.selected = Arc::new(HashSet::new());
        self.last_selected = None;
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selected(&self) -> &HashSet<String> {
        &self.selected
    }

    pub fn snapshot(&self) -> Arc<HashSet<String>> {
        Arc::clone(&self.selected)
    }

    pub fn last_selected(&self) -> Option<&str> {
        self.last_selected.as_deref()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in display order.
    pub fn ordered<'a>(&self, displayed: &'a [Item]) -> Vec<&'a Item> {
        displayed
            .iter()
            .filter(|item| self.selected.contains(&item.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Folder, ResourceType};

    fn list() -> Vec<Item> {
        vec![
            Folder::new("dir", "Dir", None).to_item(),
            Item::resource("a", ResourceType::Note, "a", None),
            Item::resource("b", ResourceType::Note, "b", None),
            Item::resource("c", ResourceType::Exam, "c", None),
            Item::resource("d", ResourceType::Exam, "d", None),
        ]
    }

    fn ids(state: &SelectionState) -> Vec<String> {
        let mut v: Vec<String> = state.selected().iter().cloned().collect();
        v.sort();
        v
    }

    #[test]
    fn test_single_replaces_selection() {
        let items = list();
        let mut sel = SelectionState::new();
        sel.select("a", SelectMode::Single, &items);
        sel.select("c", SelectMode::Single, &items);
        assert_eq!(ids(&sel), vec!["c"]);
        assert_eq!(sel.last_selected(), Some("c"));
    }

    #[test]
    fn test_toggle_updates_anchor_even_when_removing() {
        let items = list();
        let mut sel = SelectionState::new();
        sel.select("a", SelectMode::Toggle, &items);
        sel.select("b", SelectMode::Toggle, &items);
        sel.select("a", SelectMode::Toggle, &items);
        assert_eq!(ids(&sel), vec!["b"]);
        assert_eq!(sel.last_selected(), Some("a"));
    }

    #[test]
    fn test_toggle_is_commutative_for_distinct_ids() {
        let items = list();
        let mut forward = SelectionState::new();
        for id in ["a", "c", "d", "c"] {
            forward.select(id, SelectMode::Toggle, &items);
        }
        let mut backward = SelectionState::new();
        for id in ["c", "c", "d", "a"] {
            backward.select(id, SelectMode::Toggle, &items);
        }
        assert_eq!(ids(&forward), ids(&backward));
        assert_eq!(ids(&forward), vec!["a", "d"]);
    }

    #[test]
    fn test_range_is_independent_of_direction() {
        let items = list();
        let mut down = SelectionState::new();
        down.select("a", SelectMode::Single, &items);
        down.select("c", SelectMode::Range, &items);

        let mut up = SelectionState::new();
        up.select("c", SelectMode::Single, &items);
        up.select("a", SelectMode::Range, &items);

        assert_eq!(ids(&down), vec!["a", "b", "c"]);
        assert_eq!(ids(&down), ids(&up));
    }

    #[test]
    fn test_range_without_anchor_degrades_to_single() {
        let items = list();
        let mut sel = SelectionState::new();
        sel.select("b", SelectMode::Range, &items);
        assert_eq!(ids(&sel), vec!["b"]);

        // Anchor that is no longer displayed
        let mut sel = SelectionState::new();
        sel.select("gone", SelectMode::Single, &items);
        sel.select("c", SelectMode::Range, &items);
        assert_eq!(ids(&sel), vec!["c"]);
    }

    #[test]
    fn test_select_all_skips_folders() {
        let items = list();
        let mut sel = SelectionState::new();
        sel.select_all(&items);
        assert_eq!(ids(&sel), vec!["a", "b", "c", "d"]);
        assert!(!sel.is_selected("dir"));
    }

    #[test]
    fn test_every_change_replaces_the_set() {
        let items = list();
        let mut sel = SelectionState::new();
        sel.select("a", SelectMode::Single, &items);
        let before = sel.snapshot();
        sel.select("b", SelectMode::Toggle, &items);
        assert!(!Arc::ptr_eq(&before, &sel.snapshot()));
        assert_eq!(before.len(), 1);

        sel.clear();
        assert!(sel.is_empty());
        assert_eq!(sel.last_selected(), None);
    }
}
