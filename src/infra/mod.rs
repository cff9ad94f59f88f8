//! Local storage, link rewriting and HTML helpers

mod html;
mod links;
mod local_storage;

pub use html::{escape_html, highlight};
pub use links::{DownloadLink, deep_link_id, download_url, drive_file_id, embeddable_url};
pub use local_storage::{FileStorage, LocalStorage, MemoryStorage, StorageError, keys};
