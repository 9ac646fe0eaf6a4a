mod memory;
mod request;
mod source;
mod worker;

pub use memory::MemorySource;
pub use request::{LoadRequest, LoadTarget, Listing, Outcome, Request};
pub use source::{DataSource, ListQuery, Page, Scope};
pub use worker::spawn_worker;
