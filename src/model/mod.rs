pub mod item;
pub mod location;

pub use item::{Folder, Item, ItemKind, ResourceType};
pub use location::{BreadcrumbItem, HistoryEntry, Location, LocationKind};
