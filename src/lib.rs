//! Navigation and selection state for a virtual file browser.
//!
//! The [`Finder`] store tracks where the browser is (a folder, the root, a
//! virtual view such as trash, or a type-filtered smart folder), keeps
//! back/forward history with breadcrumb trails, and owns the selection,
//! including rubber-band box selection. Listings come from a
//! [`DataSource`](io::DataSource) implemented by the backend; the store hands
//! out [`Request`](io::Request)s and applies their outcomes, keeping only the
//! newest.
//!
//! ```
//! use std::sync::Arc;
//! use vfs_finder::io::MemorySource;
//! use vfs_finder::model::{Folder, LocationKind};
//! use vfs_finder::{Finder, FinderOptions};
//!
//! let source = MemorySource::new();
//! source.add_folder(Folder::new("f1", "Physics", None));
//!
//! let mut finder = Finder::new(Arc::new(source), FinderOptions::default());
//! let request = finder.enter_folder("f1");
//! finder.run_blocking(request);
//! assert_eq!(finder.location().kind, LocationKind::Folder("f1".into()));
//! assert_eq!(finder.breadcrumbs()[0].name, "Physics");
//! ```

pub mod breadcrumbs;
pub mod config;
pub mod error;
pub mod finder;
pub mod io;
pub mod latest;
pub mod model;
pub mod report;
pub mod state;

pub use config::{FinderOptions, Preferences, ViewMode};
pub use error::{ConfigError, SourceError};
pub use finder::Finder;
pub use latest::{LatestSlot, Ticket};
pub use report::{ErrorReporter, RecordingReporter, TracingReporter};
