// Loads described as data so the host decides where they run
use super::source::{DataSource, ListQuery, Page, Scope};
use crate::error::SourceResult;
use crate::latest::Ticket;
use crate::model::{Folder, Item, LocationKind};
use crate::state::{SearchOptions, SortOptions};

#[derive(Clone, Debug, PartialEq)]
pub enum LoadTarget {
    Location(LocationKind),
    Search {
        /// `None` searches every folder
        folder_id: Option<String>,
        query: String,
        options: SearchOptions,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoadRequest {
    pub ticket: Ticket,
    pub target: LoadTarget,
    pub sort: SortOptions,
    pub page: Option<Page>,
    pub recent_limit: usize,
}

/// Result of a listing load. `folders` is set when the load fetched the
/// full folder list along the way, so the tree can be refreshed for free.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Listing {
    pub items: Vec<Item>,
    pub folders: Option<Vec<Folder>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    Listing(LoadRequest),
    FolderTree(Ticket),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Listing {
        ticket: Ticket,
        result: SourceResult<Listing>,
    },
    FolderTree {
        ticket: Ticket,
        result: SourceResult<Vec<Folder>>,
    },
}

impl Request {
    pub fn ticket(&self) -> Ticket {
        match self {
            Request::Listing(req) => req.ticket,
            Request::FolderTree(ticket) => *ticket,
        }
    }

    /// Executes the request against `source`. Blocks for as long as the
    /// source does.
    pub fn run(&self, source: &dyn DataSource) -> Outcome {
        match self {
            Request::Listing(req) => Outcome::Listing {
                ticket: req.ticket,
                result: req.run(source),
            },
            Request::FolderTree(ticket) => Outcome::FolderTree {
                ticket: *ticket,
                result: source.list_folders(),
            },
        }
    }
}

impl LoadRequest {
    pub fn run(&self, source: &dyn DataSource) -> SourceResult<Listing> {
        match &self.target {
            LoadTarget::Location(kind) => self.load_location(kind, source),
            LoadTarget::Search {
                folder_id: Some(folder_id),
                query,
                options,
            } => Ok(Listing {
                items: source.search_in_folder(folder_id, query, options)?,
                folders: None,
            }),
            LoadTarget::Search {
                folder_id: None,
                query,
                options,
            } => Ok(Listing {
                items: source.search(query, options)?,
                folders: None,
            }),
        }
    }

    fn load_location(&self, kind: &LocationKind, source: &dyn DataSource) -> SourceResult<Listing> {
        let items = match kind {
            LocationKind::Root => return self.load_folder(None, source),
            LocationKind::Folder(id) => return self.load_folder(Some(id.as_str()), source),
            LocationKind::Trash => source.list_trash()?,
            LocationKind::Recent => source.list_recent(self.recent_limit)?,
            LocationKind::Favorites => source.list_favorites()?,
            LocationKind::Smart(ty) => source.list_items(&ListQuery {
                scope: Scope::All,
                type_filter: Some(*ty),
                sort: self.sort,
                page: self.page,
            })?,
        };
        Ok(Listing {
            items,
            folders: None,
        })
    }

    /// Child folders followed by the typed items of `folder_id`.
    fn load_folder(&self, folder_id: Option<&str>, source: &dyn DataSource) -> SourceResult<Listing> {
        let folders = source.list_folders()?;
        let scope = match folder_id {
            Some(id) => Scope::Folder(id.to_string()),
            None => Scope::Root,
        };
        let resources = source.list_items(&ListQuery {
            scope,
            type_filter: None,
            sort: self.sort,
            page: self.page,
        })?;

        let mut items: Vec<Item> = folders
            .iter()
            .filter(|f| f.parent_id.as_deref() == folder_id)
            .map(Folder::to_item)
            .collect();
        items.extend(resources);
        Ok(Listing {
            items,
            folders: Some(folders),
        })
    }
}
