//! Site generation: region pages as typed documents, Markdown output, and batch writing.

pub mod batch;
mod error;
pub mod manifest;
pub mod markdown;
pub mod page;

pub use batch::{BatchStats, write_index, write_pages, write_regions_json};
pub use error::SiteError;
pub use manifest::{PageGroup, SiteManifest};
pub use page::{Page, build_index, build_page};
