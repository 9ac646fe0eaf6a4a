// Sort options for item listings
use crate::model::Item;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Name,
    Modified,
    Created,
    Type,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOptions {
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            sort_by: SortBy::Name,
            sort_order: SortOrder::Ascending,
        }
    }
}

impl SortOptions {
    pub fn new(sort_by: SortBy, sort_order: SortOrder) -> Self {
        Self { sort_by, sort_order }
    }

    pub fn cycle_sort_by(&mut self) {
        self.sort_by = match self.sort_by {
            SortBy::Name => SortBy::Modified,
            SortBy::Modified => SortBy::Created,
            SortBy::Created => SortBy::Type,
            SortBy::Type => SortBy::Name,
        };
    }

    pub fn toggle_order(&mut self) {
        self.sort_order = match self.sort_order {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        };
    }

    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        let ord = match self.sort_by {
            SortBy::Name => natural_cmp(&a.name, &b.name),
            SortBy::Modified => a.updated_at.cmp(&b.updated_at),
            SortBy::Created => a.created_at.cmp(&b.created_at),
            SortBy::Type => b
                .is_folder()
                .cmp(&a.is_folder())
                .then_with(|| a.kind.type_name().cmp(b.kind.type_name())),
        };
        // Ties fall back to name so equal keys keep a stable visual order
        let ord = ord.then_with(|| {
            if self.sort_by == SortBy::Name {
                a.name.cmp(&b.name)
            } else {
                natural_cmp(&a.name, &b.name)
            }
        });
        match self.sort_order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    }

    pub fn sort(&self, items: &mut [Item]) {
        items.sort_by(|a, b| self.compare(a, b));
    }
}

/// Lowercases both names and compares them char by char, ordering embedded
/// digit runs by value so "Chapter 2" sorts before "Chapter 10". No locale
/// collation is applied.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().flat_map(char::to_lowercase).peekable();
    let mut bi = b.chars().flat_map(char::to_lowercase).peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) if ca.is_ascii_digit() && cb.is_ascii_digit() => {
                let na = take_number(&mut ai);
                let nb = take_number(&mut bi);
                let ord = compare_digits(&na, &nb);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(ca), Some(cb)) => {
                if ca != cb {
                    return ca.cmp(&cb);
                }
                ai.next();
                bi.next();
            }
        }
    }
}

fn take_number<I: Iterator<Item = char>>(it: &mut std::iter::Peekable<I>) -> String {
    let mut digits = String::new();
    while let Some(c) = it.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        it.next();
    }
    digits
}

fn compare_digits(a: &str, b: &str) -> Ordering {
    let at = a.trim_start_matches('0');
    let bt = b.trim_start_matches('0');
    at.len()
        .cmp(&bt.len())
        .then_with(|| at.cmp(bt))
        // Same value: fewer leading zeros first
        .then_with(|| a.len().cmp(&b.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Folder, ResourceType};
    use chrono::{TimeZone, Utc};

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_natural_cmp() {
        assert_eq!(natural_cmp("Chapter 2", "chapter 10"), Ordering::Less);
        assert_eq!(natural_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(natural_cmp("a01", "a1"), Ordering::Greater);
        assert_eq!(natural_cmp("same", "SAME"), Ordering::Equal);
    }

    #[test]
    fn test_sort_by_name_descending() {
        let mut items = vec![
            Item::resource("1", ResourceType::Note, "b", None),
            Item::resource("2", ResourceType::Note, "A", None),
            Item::resource("3", ResourceType::Note, "c", None),
        ];
        SortOptions::new(SortBy::Name, SortOrder::Descending).sort(&mut items);
        assert_eq!(names(&items), vec!["c", "b", "A"]);
    }

    #[test]
    fn test_sort_by_type_puts_folders_first() {
        let mut items = vec![
            Item::resource("1", ResourceType::Note, "n", None),
            Folder::new("f", "z-folder", None).to_item(),
            Item::resource("2", ResourceType::Exam, "e", None),
        ];
        SortOptions::new(SortBy::Type, SortOrder::Ascending).sort(&mut items);
        assert_eq!(names(&items), vec!["z-folder", "e", "n"]);
    }

    #[test]
    fn test_sort_by_modified() {
        let t = |s| Utc.timestamp_opt(s, 0).unwrap();
        let mut items = vec![
            Item::resource("1", ResourceType::Note, "new", None).with_times(t(0), t(300)),
            Item::resource("2", ResourceType::Note, "old", None).with_times(t(0), t(100)),
        ];
        SortOptions::new(SortBy::Modified, SortOrder::Ascending).sort(&mut items);
        assert_eq!(names(&items), vec!["old", "new"]);
    }

    #[test]
    fn test_cycle_and_toggle() {
        let mut opts = SortOptions::default();
        opts.cycle_sort_by();
        assert_eq!(opts.sort_by, SortBy::Modified);
        opts.toggle_order();
        assert_eq!(opts.sort_order, SortOrder::Descending);
    }
}
