pub mod snapshot;

use crate::prelude::{AddressBook, AppError};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

pub use snapshot::{JsonSnapshot, load, save};

pub const DEFAULT_BOOK_PATH: &str = "./.instance/addressbook.json";
pub const BOOK_PATH_ENV: &str = "ADDRESS_BOOK_PATH";

pub trait BookStore {
    fn load(&self) -> Result<AddressBook, AppError>;

    fn save(&self, book: &AddressBook) -> Result<(), AppError>;

    fn path(&self) -> &Path;
}

pub fn create_file_parent(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        debug!("creating directory {}", parent.display());
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Directory the temporary snapshot is written to before the rename.
fn staging_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
