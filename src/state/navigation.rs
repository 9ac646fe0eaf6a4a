// Navigation state - bounded back/forward history
use crate::model::{HistoryEntry, Location};
use std::collections::VecDeque;

pub const MAX_HISTORY_SIZE: usize = 50;

#[derive(Debug)]
pub struct NavigationHistory {
    entries: VecDeque<HistoryEntry>,
    index: usize,
    max_size: usize,
}

impl NavigationHistory {
    pub fn new(start: Location) -> Self {
        Self::with_capacity(start, MAX_HISTORY_SIZE)
    }

    pub fn with_capacity(start: Location, max_size: usize) -> Self {
        let mut entries = VecDeque::with_capacity(max_size.min(MAX_HISTORY_SIZE));
        entries.push_back(start);
        Self {
            entries,
            index: 0,
            max_size: max_size.max(1),
        }
    }

    pub fn navigate_to(&mut self, location: Location) {
        // Remove any forward history when navigating to a new location
        self.entries.truncate(self.index + 1);
        self.entries.push_back(location);
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
        self.index = self.entries.len() - 1;
    }

    pub fn go_back(&mut self) -> Option<&Location> {
        if self.index > 0 {
            self.index -= 1;
            self.entries.get(self.index)
        } else {
            None
        }
    }

    pub fn go_forward(&mut self) -> Option<&Location> {
        if self.index + 1 < self.entries.len() {
            self.index += 1;
            self.entries.get(self.index)
        } else {
            None
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn current(&self) -> Option<&Location> {
        self.entries.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LocationKind;

    fn folder(id: &str) -> Location {
        Location::new(LocationKind::Folder(id.to_string()), Vec::new())
    }

    fn ids(history: &NavigationHistory) -> Vec<String> {
        history
            .entries()
            .map(|l| l.folder_id().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_navigate_after_back_truncates_forward() {
        let mut history = NavigationHistory::new(folder("A"));
        history.navigate_to(folder("B"));
        history.navigate_to(folder("C"));
        assert_eq!(history.go_back(), Some(&folder("B")));

        history.navigate_to(folder("X"));
        assert_eq!(ids(&history), vec!["A", "B", "X"]);
        assert_eq!(history.current(), Some(&folder("X")));
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_back_forward_are_noops_at_ends() {
        let mut history = NavigationHistory::new(folder("A"));
        assert!(history.go_back().is_none());
        assert!(history.go_forward().is_none());
        history.navigate_to(folder("B"));
        assert!(history.go_forward().is_none());
        assert_eq!(history.go_back(), Some(&folder("A")));
        assert!(history.go_back().is_none());
        assert_eq!(history.go_forward(), Some(&folder("B")));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_bounded_history_evicts_oldest() {
        let mut history = NavigationHistory::with_capacity(folder("0"), 3);
        for i in 1..=5 {
            history.navigate_to(folder(&i.to_string()));
        }
        assert_eq!(ids(&history), vec!["3", "4", "5"]);
        assert_eq!(history.index(), 2);
        assert_eq!(history.go_back(), Some(&folder("4")));
        assert_eq!(history.go_back(), Some(&folder("3")));
        assert!(history.go_back().is_none());
    }

    #[test]
    fn test_default_bound() {
        let mut history = NavigationHistory::new(Location::root());
        for i in 0..(MAX_HISTORY_SIZE * 2) {
            history.navigate_to(folder(&i.to_string()));
            assert!(history.len() <= MAX_HISTORY_SIZE);
            assert_eq!(history.index(), history.len() - 1);
        }
    }
}
