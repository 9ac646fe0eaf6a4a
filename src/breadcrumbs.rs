//! Breadcrumb resolution.
//!
//! Trails are computed from the pre-loaded folder tree when possible and
//! otherwise fetched from the data source. Results are cached per folder for
//! the current session; replacing the tree drops the cache.

use crate::io::DataSource;
use crate::model::{BreadcrumbItem, Folder, LocationKind};
use crate::report::ErrorReporter;
use std::collections::{HashMap, HashSet};

/// Folder metadata indexed by id for parent walks.
#[derive(Debug, Default, Clone)]
pub struct FolderTree {
    folders: HashMap<String, Folder>,
}

impl FolderTree {
    pub fn new(folders: Vec<Folder>) -> Self {
        Self {
            folders: folders.into_iter().map(|f| (f.id.clone(), f)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Folder> {
        self.folders.get(id)
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Direct children of `parent` (`None` for top level), by sort order.
    pub fn children(&self, parent: Option<&str>) -> Vec<&Folder> {
        let mut children: Vec<&Folder> = self
            .folders
            .values()
            .filter(|f| f.parent_id.as_deref() == parent)
            .collect();
        children.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.title.cmp(&b.title))
        });
        children
    }

    /// Root-to-folder trail, or `None` if the chain is broken or cyclic.
    pub fn path_to(&self, id: &str) -> Option<Vec<BreadcrumbItem>> {
        let mut trail = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if !seen.insert(current) {
                return None;
            }
            let folder = self.folders.get(current)?;
            trail.push(BreadcrumbItem::new(folder.id.as_str(), folder.title.as_str()));
            cursor = folder.parent_id.as_deref();
        }
        trail.reverse();
        Some(trail)
    }
}

#[derive(Debug, Default)]
pub struct BreadcrumbResolver {
    tree: FolderTree,
    cache: HashMap<String, Vec<BreadcrumbItem>>,
}

impl BreadcrumbResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &FolderTree {
        &self.tree
    }

    pub fn set_tree(&mut self, tree: FolderTree) {
        self.tree = tree;
        self.cache.clear();
    }

    /// Trail for `kind`, inclusive of the folder itself. Empty for root and
    /// virtual views, and on lookup failure.
    pub fn resolve(
        &mut self,
        kind: &LocationKind,
        source: &dyn DataSource,
        reporter: &dyn ErrorReporter,
    ) -> Vec<BreadcrumbItem> {
        let LocationKind::Folder(id) = kind else {
            return Vec::new();
        };
        if let Some(cached) = self.cache.get(id) {
            return cached.clone();
        }

        let trail = match self.tree.path_to(id) {
            Some(trail) => trail,
            None => match source.breadcrumbs(id) {
                Ok(trail) => trail,
                Err(e) => {
                    reporter.report("resolve breadcrumbs", &e);
                    return Vec::new();
                }
            },
        };
        self.cache.insert(id.clone(), trail.clone());
        trail
    }

    /// Trail for a child entered from `parent` when its name is already
    /// known, skipping the lookup.
    pub fn extend(
        &mut self,
        parent: &[BreadcrumbItem],
        child_id: &str,
        child_name: &str,
    ) -> Vec<BreadcrumbItem> {
        let mut trail = parent.to_vec();
        trail.push(BreadcrumbItem::new(child_id, child_name));
        self.cache.insert(child_id.to_string(), trail.clone());
        trail
    }

    /// Renames a folder in the tree and in cached trails after a successful
    /// rename.
    pub fn rename(&mut self, id: &str, name: &str) {
        if let Some(folder) = self.tree.folders.get_mut(id) {
            folder.title = name.to_string();
        }
        for trail in self.cache.values_mut() {
            for crumb in trail.iter_mut().filter(|c| c.id == id) {
                crumb.name = name.to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::io::MemorySource;
    use crate::report::RecordingReporter;

    fn tree() -> FolderTree {
        FolderTree::new(vec![
            Folder::new("f1", "Physics", None),
            Folder::new("f2", "Mechanics", Some("f1")),
            Folder::new("f3", "Kinematics", Some("f2")),
        ])
    }

    fn ids(trail: &[BreadcrumbItem]) -> Vec<&str> {
        trail.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_walks_parent_links() {
        let trail = tree().path_to("f3").unwrap();
        assert_eq!(ids(&trail), vec!["f1", "f2", "f3"]);
        assert_eq!(trail[0].name, "Physics");
    }

    #[test]
    fn test_cycle_is_rejected() {
        let tree = FolderTree::new(vec![
            Folder::new("a", "A", Some("b")),
            Folder::new("b", "B", Some("a")),
        ]);
        assert!(tree.path_to("a").is_none());
    }

    #[test]
    fn test_virtual_locations_have_no_trail() {
        let source = MemorySource::new();
        let reporter = RecordingReporter::new();
        let mut resolver = BreadcrumbResolver::new();
        for kind in [LocationKind::Root, LocationKind::Trash, LocationKind::Recent] {
            assert!(resolver.resolve(&kind, &source, &reporter).is_empty());
        }
    }

    #[test]
    fn test_falls_back_to_source_lookup() {
        let source = MemorySource::new();
        source.add_folder(Folder::new("x", "Remote", None));
        source.add_folder(Folder::new("y", "Child", Some("x")));
        let reporter = RecordingReporter::new();
        let mut resolver = BreadcrumbResolver::new();

        let trail = resolver.resolve(&LocationKind::Folder("y".into()), &source, &reporter);
        assert_eq!(ids(&trail), vec!["x", "y"]);
        assert!(reporter.reports().is_empty());
    }

    #[test]
    fn test_lookup_failure_degrades_to_empty() {
        let source = MemorySource::new();
        source.fail_next(SourceError::Unavailable("ipc closed".into()));
        let reporter = RecordingReporter::new();
        let mut resolver = BreadcrumbResolver::new();

        let trail = resolver.resolve(&LocationKind::Folder("zz".into()), &source, &reporter);
        assert!(trail.is_empty());
        assert_eq!(reporter.reports().len(), 1);
    }

    #[test]
    fn test_cache_is_dropped_with_tree() {
        let source = MemorySource::new();
        let reporter = RecordingReporter::new();
        let mut resolver = BreadcrumbResolver::new();
        resolver.set_tree(tree());
        let kind = LocationKind::Folder("f2".into());
        assert_eq!(ids(&resolver.resolve(&kind, &source, &reporter)), vec!["f1", "f2"]);

        resolver.rename("f1", "Physics II");
        assert_eq!(resolver.resolve(&kind, &source, &reporter)[0].name, "Physics II");

        resolver.set_tree(tree());
        assert_eq!(resolver.resolve(&kind, &source, &reporter)[0].name, "Physics");
    }
}
