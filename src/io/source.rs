// Data access boundary - implemented by the native backend
use crate::error::SourceResult;
use crate::model::{BreadcrumbItem, Folder, Item, ResourceType};
use crate::state::{SearchOptions, SortOptions};

/// Which items a listing covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Items not inside any folder
    Root,
    Folder(String),
    /// Every folder
    All,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListQuery {
    pub scope: Scope,
    pub type_filter: Option<ResourceType>,
    pub sort: SortOptions,
    pub page: Option<Page>,
}

/// Calls into the backend. Implementations may block; the finder never
/// calls listing methods on the UI thread itself, it hands out
/// [`Request`](crate::io::Request)s instead. `breadcrumbs` is the one
/// synchronous call, used only when the folder tree cannot answer.
pub trait DataSource: Send + Sync {
    fn list_folders(&self) -> SourceResult<Vec<Folder>>;

    /// Typed (non-folder) items.
    fn list_items(&self, query: &ListQuery) -> SourceResult<Vec<Item>>;

    /// Root-to-folder trail, inclusive.
    fn breadcrumbs(&self, folder_id: &str) -> SourceResult<Vec<BreadcrumbItem>>;

    fn list_trash(&self) -> SourceResult<Vec<Item>>;

    fn list_recent(&self, limit: usize) -> SourceResult<Vec<Item>>;

    fn list_favorites(&self) -> SourceResult<Vec<Item>>;

    fn search(&self, query: &str, options: &SearchOptions) -> SourceResult<Vec<Item>>;

    fn search_in_folder(
        &self,
        folder_id: &str,
        query: &str,
        options: &SearchOptions,
    ) -> SourceResult<Vec<Item>>;
}
