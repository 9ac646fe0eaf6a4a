// Location - where the browser currently is
use crate::model::ResourceType;
use serde::{Deserialize, Serialize};

pub const ROOT_ID: &str = "root";
pub const TRASH_ID: &str = "trash";
pub const RECENT_ID: &str = "recent";
pub const FAVORITES_ID: &str = "favorites";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BreadcrumbItem {
    pub id: String,
    pub name: String,
}

impl BreadcrumbItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// What the active query is driven by. A folder and a type filter never
/// apply at the same time.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    Root,
    Folder(String),
    Trash,
    Recent,
    Favorites,
    /// Type-filtered view spanning all folders.
    Smart(ResourceType),
}

impl LocationKind {
    /// Maps a `(folder_id, type_filter)` pair onto a location kind.
    ///
    /// A concrete folder id wins over the type filter; a type filter on its
    /// own (or with the root sentinel) becomes a smart folder.
    pub fn resolve(folder_id: Option<&str>, type_filter: Option<ResourceType>) -> Self {
        match (folder_id, type_filter) {
            (None | Some(ROOT_ID), Some(ty)) => LocationKind::Smart(ty),
            (None | Some(ROOT_ID), None) => LocationKind::Root,
            (Some(TRASH_ID), _) => LocationKind::Trash,
            (Some(RECENT_ID), _) => LocationKind::Recent,
            (Some(FAVORITES_ID), _) => LocationKind::Favorites,
            (Some(id), _) => LocationKind::Folder(id.to_string()),
        }
    }

    pub fn folder_id(&self) -> Option<&str> {
        match self {
            LocationKind::Root => Some(ROOT_ID),
            LocationKind::Folder(id) => Some(id),
            LocationKind::Trash => Some(TRASH_ID),
            LocationKind::Recent => Some(RECENT_ID),
            LocationKind::Favorites => Some(FAVORITES_ID),
            LocationKind::Smart(_) => None,
        }
    }

    pub fn type_filter(&self) -> Option<ResourceType> {
        match self {
            LocationKind::Smart(ty) => Some(*ty),
            _ => None,
        }
    }
}

/// A location together with the breadcrumb trail computed when it was
/// entered. History entries share this shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub kind: LocationKind,
    pub breadcrumbs: Vec<BreadcrumbItem>,
}

pub type HistoryEntry = Location;

impl Location {
    pub fn new(kind: LocationKind, breadcrumbs: Vec<BreadcrumbItem>) -> Self {
        // Only folders have ancestry
        let breadcrumbs = match kind {
            LocationKind::Folder(_) => breadcrumbs,
            _ => Vec::new(),
        };
        Self { kind, breadcrumbs }
    }

    pub fn root() -> Self {
        Self::new(LocationKind::Root, Vec::new())
    }

    pub fn folder_id(&self) -> Option<&str> {
        self.kind.folder_id()
    }

    pub fn type_filter(&self) -> Option<ResourceType> {
        self.kind.type_filter()
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_sentinels() {
        assert_eq!(LocationKind::resolve(None, None), LocationKind::Root);
        assert_eq!(LocationKind::resolve(Some("root"), None), LocationKind::Root);
        assert_eq!(LocationKind::resolve(Some("trash"), None), LocationKind::Trash);
        assert_eq!(LocationKind::resolve(Some("recent"), None), LocationKind::Recent);
        assert_eq!(
            LocationKind::resolve(Some("favorites"), None),
            LocationKind::Favorites
        );
        assert_eq!(
            LocationKind::resolve(Some("f1"), None),
            LocationKind::Folder("f1".into())
        );
    }

    #[test]
    fn test_folder_clears_type_filter() {
        let kind = LocationKind::resolve(Some("f1"), Some(ResourceType::Note));
        assert_eq!(kind, LocationKind::Folder("f1".into()));
        assert_eq!(kind.type_filter(), None);

        let smart = LocationKind::resolve(None, Some(ResourceType::Exam));
        assert_eq!(smart.folder_id(), None);
        assert_eq!(smart.type_filter(), Some(ResourceType::Exam));
    }

    #[test]
    fn test_virtual_locations_have_no_breadcrumbs() {
        let loc = Location::new(LocationKind::Trash, vec![BreadcrumbItem::new("x", "X")]);
        assert!(loc.breadcrumbs.is_empty());
    }
}
