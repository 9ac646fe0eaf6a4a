pub mod box_select;
pub mod navigation;
pub mod rename;
pub mod search;
pub mod selection;
pub mod sort;

pub use box_select::{rects_intersect, BoxMode, BoxSelect, RectIndex, SpatialIndex};
pub use navigation::{NavigationHistory, MAX_HISTORY_SIZE};
pub use rename::{InlineEdit, RenameCommit, RenameState};
pub use search::{fuzzy_match, SearchOptions, SearchState};
pub use selection::{SelectMode, SelectionState};
pub use sort::{natural_cmp, SortBy, SortOptions, SortOrder};
