// In-memory data source for hosts without a backend, and for tests
use super::source::{DataSource, ListQuery, Scope};
use crate::breadcrumbs::FolderTree;
use crate::error::{SourceError, SourceResult};
use crate::model::{BreadcrumbItem, Folder, Item};
use crate::state::{SearchOptions, SortBy, SortOptions, SortOrder};
use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Store {
    folders: Vec<Folder>,
    items: Vec<Item>,
    trash: Vec<Item>,
    favorites: HashSet<String>,
    failures: VecDeque<SourceError>,
    calls: usize,
}

#[derive(Debug, Default)]
pub struct MemorySource {
    store: Mutex<Store>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        match self.store.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Counts the call and pops a queued failure, if any.
    fn begin(&self) -> SourceResult<MutexGuard<'_, Store>> {
        let mut store = self.lock();
        store.calls += 1;
        let failure = store.failures.pop_front();
        match failure {
            Some(err) => Err(err),
            None => Ok(store),
        }
    }

    pub fn add_folder(&self, folder: Folder) {
        self.lock().folders.push(folder);
    }

    pub fn add_item(&self, item: Item) {
        self.lock().items.push(item);
    }

    pub fn trash_item(&self, id: &str) -> bool {
        let mut store = self.lock();
        match store.items.iter().position(|i| i.id == id) {
            Some(pos) => {
                let item = store.items.remove(pos);
                store.trash.push(item);
                true
            }
            None => false,
        }
    }

    pub fn set_favorite(&self, id: &str, favorite: bool) {
        let mut store = self.lock();
        if favorite {
            store.favorites.insert(id.to_string());
        } else {
            store.favorites.remove(id);
        }
    }

    pub fn rename(&self, id: &str, name: &str) -> bool {
        let mut store = self.lock();
        if let Some(folder) = store.folders.iter_mut().find(|f| f.id == id) {
            folder.title = name.to_string();
            return true;
        }
        if let Some(item) = store.items.iter_mut().find(|i| i.id == id) {
            item.name = name.to_string();
            return true;
        }
        false
    }

    /// Makes the next call fail with `error`. Failures queue up.
    pub fn fail_next(&self, error: SourceError) {
        self.lock().failures.push_back(error);
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls
    }
}

fn name_matches(name: &str, query: &str, options: &SearchOptions) -> bool {
    if options.case_sensitive {
        name.contains(query)
    } else {
        name.to_lowercase().contains(&query.to_lowercase())
    }
}

fn search_in(
    store: &Store,
    query: &str,
    options: &SearchOptions,
    within: Option<&HashSet<String>>,
) -> Vec<Item> {
    // A type filter leaves folders out
    let folders = store
        .folders
        .iter()
        .filter(|_| options.type_filter.is_none())
        .map(Folder::to_item);
    let items = store.items.iter().cloned().filter(|item| {
        options
            .type_filter
            .map(|ty| item.kind.type_name() == ty.as_str())
            .unwrap_or(true)
    });
    folders
        .chain(items)
        .filter(|item| match within {
            Some(scope) => item
                .parent_id
                .as_ref()
                .map(|p| scope.contains(p))
                .unwrap_or(false),
            None => true,
        })
        .filter(|item| name_matches(&item.name, query, options))
        .take(options.max_results)
        .collect()
}

impl DataSource for MemorySource {
    fn list_folders(&self) -> SourceResult<Vec<Folder>> {
        Ok(self.begin()?.folders.clone())
    }

    fn list_items(&self, query: &ListQuery) -> SourceResult<Vec<Item>> {
        let store = self.begin()?;
        let mut items: Vec<Item> = store
            .items
            .iter()
            .filter(|item| match &query.scope {
                Scope::Root => item.parent_id.is_none(),
                Scope::Folder(id) => item.parent_id.as_deref() == Some(id.as_str()),
                Scope::All => true,
            })
            .filter(|item| {
                query
                    .type_filter
                    .map(|ty| item.kind.type_name() == ty.as_str())
                    .unwrap_or(true)
            })
            .cloned()
            .collect();
        query.sort.sort(&mut items);
        if let Some(page) = query.page {
            items = items.into_iter().skip(page.offset).take(page.limit).collect();
        }
        Ok(items)
    }

    fn breadcrumbs(&self, folder_id: &str) -> SourceResult<Vec<BreadcrumbItem>> {
        let store = self.begin()?;
        FolderTree::new(store.folders.clone())
            .path_to(folder_id)
            .ok_or_else(|| SourceError::NotFound(folder_id.to_string()))
    }

    fn list_trash(&self) -> SourceResult<Vec<Item>> {
        Ok(self.begin()?.trash.clone())
    }

    fn list_recent(&self, limit: usize) -> SourceResult<Vec<Item>> {
        let store = self.begin()?;
        let mut items = store.items.clone();
        SortOptions::new(SortBy::Modified, SortOrder::Descending).sort(&mut items);
        items.truncate(limit);
        Ok(items)
    }

    fn list_favorites(&self) -> SourceResult<Vec<Item>> {
        let store = self.begin()?;
        let folders = store.folders.iter().map(Folder::to_item);
        Ok(folders
            .chain(store.items.iter().cloned())
            .filter(|item| store.favorites.contains(&item.id))
            .collect())
    }

    fn search(&self, query: &str, options: &SearchOptions) -> SourceResult<Vec<Item>> {
        let store = self.begin()?;
        Ok(search_in(&store, query, options, None))
    }

    fn search_in_folder(
        &self,
        folder_id: &str,
        query: &str,
        options: &SearchOptions,
    ) -> SourceResult<Vec<Item>> {
        let store = self.begin()?;
        if !store.folders.iter().any(|f| f.id == folder_id) {
            return Err(SourceError::NotFound(folder_id.to_string()));
        }
        // The folder and all of its descendants
        let mut scope: HashSet<String> = HashSet::new();
        scope.insert(folder_id.to_string());
        let mut grew = true;
        while grew {
            grew = false;
            for folder in &store.folders {
                if let Some(parent) = &folder.parent_id {
                    if scope.contains(parent) && scope.insert(folder.id.clone()) {
                        grew = true;
                    }
                }
            }
        }
        Ok(search_in(&store, query, options, Some(&scope)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::Page;
    use crate::model::ResourceType;

    fn source() -> MemorySource {
        let source = MemorySource::new();
        source.add_folder(Folder::new("f1", "Physics", None));
        source.add_folder(Folder::new("f2", "Mechanics", Some("f1")));
        for (i, name) in ["d", "b", "a", "c"].iter().enumerate() {
            source.add_item(Item::resource(format!("n{}", i), ResourceType::Note, *name, None));
        }
        source.add_item(Item::resource("deep", ResourceType::Exam, "Physics final", Some("f2")));
        source
    }

    #[test]
    fn test_paged_listing_is_sorted_first() {
        let query = ListQuery {
            scope: Scope::Root,
            type_filter: None,
            sort: SortOptions::default(),
            page: Some(Page { offset: 1, limit: 2 }),
        };
        let names: Vec<String> = source()
            .list_items(&query)
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["b", "c"]);
    }

    #[test]
    fn test_search_in_folder_includes_descendants() {
        let found = source()
            .search_in_folder("f1", "final", &SearchOptions::default())
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "deep");
    }

    #[test]
    fn test_global_search_matches_folders() {
        let found = source().search("physics", &SearchOptions::default()).unwrap();
        let ids: Vec<&str> = found.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["f1", "deep"]);
    }

    #[test]
    fn test_trash_and_favorites() {
        let source = source();
        assert!(source.trash_item("n0"));
        source.set_favorite("f2", true);
        assert_eq!(source.list_trash().unwrap()[0].id, "n0");
        assert_eq!(source.list_favorites().unwrap()[0].id, "f2");
    }

    #[test]
    fn test_queued_failures_apply_in_order() {
        let source = source();
        source.fail_next(SourceError::Unavailable("a".into()));
        assert!(source.list_folders().is_err());
        assert!(source.list_folders().is_ok());
        assert_eq!(source.call_count(), 2);
    }
}
