//! The finder store.
//!
//! Owns the current location, history, loaded items, selection and the small
//! bits of transient UI state around them. Every mutation goes through a
//! method here. Loads are not executed by the store: navigation returns a
//! [`Request`] for the host to run (see [`spawn_worker`](crate::io::spawn_worker))
//! and the result comes back through [`Finder::complete`]. Results that
//! arrive after a newer request was issued are dropped.

use crate::breadcrumbs::{BreadcrumbResolver, FolderTree};
use crate::config::{FinderOptions, Preferences, ViewMode};
use crate::error::{ConfigError, SourceError};
use crate::io::{DataSource, Listing, LoadRequest, LoadTarget, Outcome, Page, Request};
use crate::latest::{LatestSlot, Ticket};
use crate::model::{BreadcrumbItem, Folder, Item, Location, LocationKind, ResourceType};
use crate::report::{ErrorReporter, TracingReporter};
use crate::state::{
    BoxMode, BoxSelect, InlineEdit, NavigationHistory, RenameCommit, RenameState, SearchOptions,
    SearchState, SelectMode, SelectionState, SortOptions, SpatialIndex,
};
use egui::Pos2;
use std::collections::HashSet;
use std::sync::Arc;

pub struct Finder {
    source: Arc<dyn DataSource>,
    reporter: Arc<dyn ErrorReporter>,
    options: FinderOptions,
    preferences: Preferences,

    // Navigation
    location: Location,
    history: NavigationHistory,
    resolver: BreadcrumbResolver,

    // Loading
    listing_slot: LatestSlot,
    tree_slot: LatestSlot,
    error: Option<String>,

    // Entries
    items: Vec<Item>,
    displayed: Vec<Item>,
    displayed_ids: HashSet<String>,

    // Interaction
    selection: SelectionState,
    box_select: BoxSelect,
    search: SearchState,
    rename: RenameState,
}

impl Finder {
    /// Creates a store positioned at the root. Nothing is loaded until the
    /// host runs the request from [`Finder::load`].
    pub fn new(source: Arc<dyn DataSource>, options: FinderOptions) -> Self {
        let location = Location::root();
        Self {
            source,
            reporter: Arc::new(TracingReporter),
            preferences: options.preferences,
            history: NavigationHistory::with_capacity(location.clone(), options.max_history),
            box_select: BoxSelect::new(options.drag_threshold),
            options,
            location,
            resolver: BreadcrumbResolver::new(),
            listing_slot: LatestSlot::new(),
            tree_slot: LatestSlot::new(),
            error: None,
            items: Vec::new(),
            displayed: Vec::new(),
            displayed_ids: HashSet::new(),
            selection: SelectionState::new(),
            search: SearchState::default(),
            rename: RenameState::new(),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    // --- Navigation ---

    /// Navigates to `kind`, recording it in history.
    pub fn navigate_to(&mut self, kind: LocationKind) -> Request {
        let breadcrumbs =
            self.resolver
                .resolve(&kind, self.source.as_ref(), self.reporter.as_ref());
        self.enter(Location::new(kind, breadcrumbs))
    }

    /// Navigates by raw folder id. Sentinel ids ("root", "trash", ...) map to
    /// their views. When the folder is a child listed in the current view its
    /// trail is extended without a lookup.
    pub fn enter_folder(&mut self, folder_id: &str) -> Request {
        let kind = LocationKind::resolve(Some(folder_id), None);
        if let LocationKind::Folder(id) = &kind {
            let parent = match &self.location.kind {
                LocationKind::Root => Some(None),
                LocationKind::Folder(current) if !self.location.breadcrumbs.is_empty() => {
                    Some(Some(current.as_str()))
                }
                _ => None,
            };
            let child = self
                .items
                .iter()
                .find(|item| item.is_folder() && item.id == *id);
            if let (Some(parent), Some(child)) = (parent, child) {
                if child.parent_id.as_deref() == parent {
                    let trail =
                        self.resolver
                            .extend(&self.location.breadcrumbs, &child.id, &child.name);
                    return self.enter(Location::new(kind, trail));
                }
            }
        }
        self.navigate_to(kind)
    }

    pub fn go_root(&mut self) -> Request {
        self.navigate_to(LocationKind::Root)
    }

    pub fn open_trash(&mut self) -> Request {
        self.navigate_to(LocationKind::Trash)
    }

    pub fn open_recent(&mut self) -> Request {
        self.navigate_to(LocationKind::Recent)
    }

    pub fn open_favorites(&mut self) -> Request {
        self.navigate_to(LocationKind::Favorites)
    }

    /// Shows every item of `ty` across all folders.
    pub fn open_smart_folder(&mut self, ty: ResourceType) -> Request {
        self.navigate_to(LocationKind::Smart(ty))
    }

    /// Jumps to an ancestor in the current trail. Returns `None` for the
    /// current folder or an out-of-range index.
    pub fn jump_to_breadcrumb(&mut self, index: usize) -> Option<Request> {
        let crumbs = &self.location.breadcrumbs;
        if index >= crumbs.len().saturating_sub(1) {
            return None;
        }
        let target = crumbs.get(index)?.id.clone();
        let trail = crumbs[..=index].to_vec();
        Some(self.enter(Location::new(LocationKind::Folder(target), trail)))
    }

    /// Goes to the parent folder; virtual views and smart folders go to root.
    pub fn go_up(&mut self) -> Option<Request> {
        match self.location.kind.clone() {
            LocationKind::Root => None,
            LocationKind::Folder(id) => {
                let depth = self.location.breadcrumbs.len();
                if depth >= 2 {
                    return self.jump_to_breadcrumb(depth - 2);
                }
                let parent = self
                    .resolver
                    .tree()
                    .get(&id)
                    .and_then(|f| f.parent_id.clone());
                Some(match parent {
                    Some(parent) => self.navigate_to(LocationKind::Folder(parent)),
                    None => self.go_root(),
                })
            }
            _ => Some(self.go_root()),
        }
    }

    pub fn go_back(&mut self) -> Option<Request> {
        let location = self.history.go_back()?.clone();
        Some(self.revisit(location))
    }

    pub fn go_forward(&mut self) -> Option<Request> {
        let location = self.history.go_forward()?.clone();
        Some(self.revisit(location))
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    fn enter(&mut self, location: Location) -> Request {
        tracing::debug!(location = ?location.kind, "navigate");
        self.history.navigate_to(location.clone());
        self.revisit(location)
    }

    /// Switches to `location` without touching history.
    fn revisit(&mut self, location: Location) -> Request {
        self.location = location;
        self.reset_view();
        self.load()
    }

    /// The displayed list is about to change identity. Items stay until the
    /// new listing arrives so the view does not flash empty.
    fn reset_view(&mut self) {
        self.selection.clear();
        self.box_select.end();
        self.rename.cancel();
        self.search.reset();
        self.error = None;
        self.rebuild_displayed();
    }

    // --- Loading ---

    /// Issues a load for the current location, or the active search.
    pub fn load(&mut self) -> Request {
        let target = if self.search.is_searching() {
            LoadTarget::Search {
                folder_id: match &self.location.kind {
                    LocationKind::Folder(id) => Some(id.clone()),
                    _ => None,
                },
                query: self.search.query.clone(),
                options: SearchOptions {
                    type_filter: self.location.type_filter(),
                    ..self.search.options.clone()
                },
            }
        } else {
            LoadTarget::Location(self.location.kind.clone())
        };
        let ticket = self.listing_slot.issue();
        tracing::debug!(ticket = ticket.seq(), ?target, "load issued");
        Request::Listing(LoadRequest {
            ticket,
            target,
            sort: self.preferences.sort(),
            page: self.options.page_size.map(|limit| Page { offset: 0, limit }),
            recent_limit: self.options.recent_limit,
        })
    }

    pub fn refresh(&mut self) -> Request {
        self.selection.clear();
        self.load()
    }

    /// Clears the error and reissues the current load.
    pub fn retry(&mut self) -> Request {
        self.error = None;
        self.load()
    }

    /// Reloads the folder tree used for breadcrumbs and the sidebar.
    pub fn refresh_folders(&mut self) -> Request {
        Request::FolderTree(self.tree_slot.issue())
    }

    /// Applies a finished request. Returns false for stale results.
    pub fn complete(&mut self, outcome: Outcome) -> bool {
        match outcome {
            Outcome::Listing { ticket, result } => self.complete_listing(ticket, result),
            Outcome::FolderTree { ticket, result } => {
                match self.tree_slot.settle(ticket, result) {
                    Some(Ok(folders)) => {
                        self.set_folders(folders);
                        true
                    }
                    Some(Err(e)) => {
                        self.reporter.report("load folders", &e);
                        false
                    }
                    None => false,
                }
            }
        }
    }

    fn complete_listing(&mut self, ticket: Ticket, result: Result<Listing, SourceError>) -> bool {
        match self.listing_slot.settle(ticket, result) {
            None => false,
            Some(Ok(listing)) => {
                if let Some(folders) = listing.folders {
                    self.set_folders(folders);
                }
                let mut items = listing.items;
                self.preferences.sort().sort(&mut items);
                tracing::debug!(ticket = ticket.seq(), count = items.len(), "listing applied");
                self.items = items;
                self.error = None;
                self.selection.clear();
                self.rename.cancel();
                self.rebuild_displayed();
                true
            }
            Some(Err(e)) => {
                // Keep the stale items on screen
                self.reporter.report("load items", &e);
                self.error = Some(e.user_message());
                true
            }
        }
    }

    fn set_folders(&mut self, folders: Vec<Folder>) {
        self.resolver.set_tree(FolderTree::new(folders));
    }

    /// Runs `request` on the calling thread and applies the outcome.
    pub fn run_blocking(&mut self, request: Request) -> bool {
        let outcome = request.run(self.source.as_ref());
        self.complete(outcome)
    }

    pub fn is_loading(&self) -> bool {
        self.listing_slot.is_pending()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // --- Sorting & preferences ---

    pub fn set_sort(&mut self, sort: SortOptions) -> Request {
        self.preferences.set_sort(sort);
        self.refresh()
    }

    pub fn toggle_sort_order(&mut self) -> Request {
        let mut sort = self.preferences.sort();
        sort.toggle_order();
        self.set_sort(sort)
    }

    pub fn cycle_sort_by(&mut self) -> Request {
        let mut sort = self.preferences.sort();
        sort.cycle_sort_by();
        self.set_sort(sort)
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.preferences.view_mode = mode;
    }

    pub fn toggle_sidebar(&mut self) {
        self.preferences.sidebar_collapsed = !self.preferences.sidebar_collapsed;
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Writes the current preferences to the per-user config file. The store
    /// never saves on its own; hosts call this after the sort, view mode or
    /// sidebar changes, or on shutdown.
    pub fn save_preferences(&self) -> Result<(), ConfigError> {
        self.preferences.save()
    }

    // --- Search & filter ---

    /// Searches within the current folder, or everywhere elsewhere. A blank
    /// query goes back to the plain listing.
    pub fn search(&mut self, query: &str) -> Request {
        self.search.query = query.trim().to_string();
        self.search.filter.clear();
        self.selection.clear();
        self.rename.cancel();
        self.rebuild_displayed();
        self.load()
    }

    pub fn clear_search(&mut self) -> Option<Request> {
        if !self.search.is_searching() {
            return None;
        }
        Some(self.search(""))
    }

    pub fn search_query(&self) -> &str {
        &self.search.query
    }

    pub fn set_search_options(&mut self, options: SearchOptions) {
        self.search.options = options;
    }

    /// Narrows the loaded items locally by fuzzy name match.
    pub fn set_filter(&mut self, text: &str) {
        if self.search.filter == text {
            return;
        }
        self.search.filter = text.to_string();
        self.selection.clear();
        self.rebuild_displayed();
    }

    pub fn filter(&self) -> &str {
        &self.search.filter
    }

    fn rebuild_displayed(&mut self) {
        self.displayed = self
            .items
            .iter()
            .filter(|item| self.search.matches(item))
            .cloned()
            .collect();
        self.displayed_ids = self.displayed.iter().map(|item| item.id.clone()).collect();
    }

    // --- Selection ---

    /// Ids not in the displayed list are ignored.
    pub fn select(&mut self, id: &str, mode: SelectMode) {
        if !self.displayed_ids.contains(id) {
            tracing::trace!(id, "ignoring selection of item not on screen");
            return;
        }
        self.selection.select(id, mode, &self.displayed);
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&self.displayed);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Selected items in display order.
    pub fn selected_items(&self) -> Vec<&Item> {
        self.selection.ordered(&self.displayed)
    }

    pub fn begin_box_select(&mut self, origin: Pos2, additive: bool) {
        let mode = if additive { BoxMode::Add } else { BoxMode::Replace };
        self.box_select
            .begin(origin, mode, self.selection.snapshot());
    }

    /// Feeds a pointer move. Returns true when the selection changed.
    pub fn update_box_select<I: SpatialIndex + ?Sized>(&mut self, point: Pos2, index: &I) -> bool {
        let Some(mut ids) = self.box_select.update(point, index) else {
            return false;
        };
        // Rects can outlive their items between layout passes
        if !ids.iter().all(|id| self.displayed_ids.contains(id)) {
            ids = Arc::new(
                ids.iter()
                    .filter(|id| self.displayed_ids.contains(*id))
                    .cloned()
                    .collect(),
            );
        }
        let anchor = self
            .selection
            .last_selected()
            .filter(|anchor| ids.contains(*anchor))
            .map(str::to_string);
        self.selection.replace(ids, anchor);
        true
    }

    /// Ends the drag. Returns true if it was a box selection rather than a
    /// click.
    pub fn end_box_select(&mut self) -> bool {
        self.box_select.end()
    }

    pub fn box_select(&self) -> &BoxSelect {
        &self.box_select
    }

    // --- Inline rename ---

    /// Starts renaming a displayed item, cancelling any other edit.
    pub fn start_rename(&mut self, id: &str) -> bool {
        let Some(item) = self.displayed.iter().find(|item| item.id == id) else {
            return false;
        };
        self.rename.start(&item.id, item.kind, &item.name);
        true
    }

    pub fn cancel_rename(&mut self) -> Option<InlineEdit> {
        self.rename.cancel()
    }

    /// Finishes the edit and applies the new name locally. The host sends the
    /// returned commit to the backend.
    pub fn commit_rename(&mut self, new_name: &str) -> Option<RenameCommit> {
        let commit = self.rename.commit(new_name)?;
        for item in self
            .items
            .iter_mut()
            .chain(self.displayed.iter_mut())
            .filter(|item| item.id == commit.id)
        {
            item.name = commit.new_name.clone();
        }
        if commit.kind.is_folder() {
            self.resolver.rename(&commit.id, &commit.new_name);
        }
        Some(commit)
    }

    pub fn editing(&self) -> Option<&InlineEdit> {
        self.rename.active()
    }

    // --- Accessors ---

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn breadcrumbs(&self) -> &[BreadcrumbItem] {
        &self.location.breadcrumbs
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    /// All loaded items, sorted.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Loaded items after the quick filter; selection works on this list.
    pub fn displayed(&self) -> &[Item] {
        &self.displayed
    }

    pub fn folders(&self) -> &FolderTree {
        self.resolver.tree()
    }

    /// Sidebar rows under `parent` (`None` for top level).
    pub fn subfolders(&self, parent: Option<&str>) -> Vec<&Folder> {
        self.resolver.tree().children(parent)
    }
}
