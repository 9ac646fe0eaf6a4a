use crate::model::{Item, ResourceType};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    pub case_sensitive: bool,
    pub type_filter: Option<ResourceType>,
    pub max_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            type_filter: None,
            max_results: 200,
        }
    }
}

/// Backend search query plus the local quick filter. Both are cleared on
/// navigation.
#[derive(Clone, Debug, Default)]
pub struct SearchState {
    pub query: String,
    pub filter: String,
    pub options: SearchOptions,
}

impl SearchState {
    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn reset(&mut self) {
        self.query.clear();
        self.filter.clear();
    }

    pub fn matches(&self, item: &Item) -> bool {
        fuzzy_match(&item.name, &self.filter)
    }
}

/// Subsequence match, ignoring ASCII case.
pub fn fuzzy_match(text: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let mut q_chars = query.chars();
    let mut q_char = match q_chars.next() {
        Some(c) => c,
        None => return true,
    };
    for t_char in text.chars() {
        if t_char.eq_ignore_ascii_case(&q_char) {
            q_char = match q_chars.next() {
                Some(c) => c,
                None => return true,
            };
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzy_match() {
        assert!(fuzzy_match("Linear Algebra", "lalg"));
        assert!(fuzzy_match("anything", ""));
        assert!(!fuzzy_match("Calculus", "xyz"));
        assert!(!fuzzy_match("ab", "ba"));
    }
}
