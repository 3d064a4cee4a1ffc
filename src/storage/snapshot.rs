use super::*;

use crate::prelude::Record;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use tempfile::NamedTempFile;

/// Address book persisted as one JSON document at `path`.
#[derive(Debug, Clone)]
pub struct JsonSnapshot {
    path: PathBuf,
}

impl JsonSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for JsonSnapshot {
    fn default() -> Self {
        Self::new(DEFAULT_BOOK_PATH)
    }
}

impl BookStore for JsonSnapshot {
    fn load(&self) -> Result<AddressBook, AppError> {
        load(&self.path)
    }

    fn save(&self, book: &AddressBook) -> Result<(), AppError> {
        save(book, &self.path)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    records: Vec<&'a Record>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Snapshot {
    records: Vec<Record>,
}

/// Writes the whole book to `destination`, replacing it atomically.
pub fn save(book: &AddressBook, destination: &Path) -> Result<(), AppError> {
    create_file_parent(destination)?;

    let mut records: Vec<&Record> = book.list_all().collect();
    // stable output between saves of the same data
    records.sort_by(|a, b| a.name().cmp(b.name()));

    let data = serde_json::to_vec_pretty(&SnapshotRef { records })?;

    let mut file = NamedTempFile::new_in(staging_dir(destination))?;
    file.write_all(&data)?;
    file.as_file().sync_all()?;
    file.persist(destination)?;
    sync_dir(&staging_dir(destination))?;

    info!(
        "saved {} contacts to {}",
        book.len(),
        destination.display()
    );
    Ok(())
}

/// Reads a book from `source`. A missing file yields an empty book.
pub fn load(source: &Path) -> Result<AddressBook, AppError> {
    let data = match fs::read(source) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(
                "no address book at {}, starting empty",
                source.display()
            );
            return Ok(AddressBook::new());
        }
        Err(err) => return Err(err.into()),
    };

    let snapshot: Snapshot = serde_json::from_slice(&data).map_err(|e| corrupt(source, e))?;
    let book = AddressBook::from_records(snapshot.records).map_err(|e| corrupt(source, e))?;

    info!("loaded {} contacts from {}", book.len(), source.display());
    Ok(book)
}

/// Flushes the directory entry so the rename survives a crash.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<(), AppError> {
    fs::File::open(dir)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<(), AppError> {
    Ok(())
}

fn corrupt(source: &Path, err: impl std::fmt::Display) -> AppError {
    warn!("{} is not a valid address book: {}", source.display(), err);
    AppError::CorruptData(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_book() -> Result<AddressBook, AppError> {
        let mut book = AddressBook::new();

        let mut alice = Record::with_phones("Alice", &["1234567890", "0987654321"])?;
        alice.set_birthday("15.01.1990")?;

        book.add(alice)?;
        book.add(Record::with_phones("Bob Marley", &["5555555555"])?)?;
        book.add(Record::new("Carol")?)?;
        Ok(book)
    }

    #[test]
    fn round_trip_preserves_book() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("book.json");

        let book = sample_book()?;
        save(&book, &path)?;

        assert_eq!(load(&path)?, book);
        Ok(())
    }

    #[test]
    fn round_trip_of_empty_book() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("book.json");

        save(&AddressBook::new(), &path)?;

        assert!(path.exists());
        assert!(load(&path)?.is_empty());
        Ok(())
    }

    #[test]
    fn missing_file_loads_empty_book() -> Result<(), AppError> {
        let dir = tempdir()?;

        let book = load(&dir.path().join("nonexistent-path"))?;

        assert!(book.is_empty());
        Ok(())
    }

    #[test]
    fn garbage_file_is_corrupt() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("book.json");
        fs::write(&path, [0xde, 0xad, 0xbe, 0xef, 0x00, 0x13])?;

        assert!(load(&path).unwrap_err().is_corrupt_data());
        Ok(())
    }

    #[test]
    fn empty_file_is_corrupt() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("book.json");
        fs::write(&path, "")?;

        assert!(load(&path).unwrap_err().is_corrupt_data());
        Ok(())
    }

    #[test]
    fn well_formed_json_breaking_invariants_is_corrupt() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("book.json");

        let cases = [
            r#"{"records":[{"name":"Alice"},{"name":"Alice"}]}"#,
            r#"{"records":[{"name":"","phones":[]}]}"#,
            r#"{"records":[{"name":" Bob","phones":[]}]}"#,
            r#"{"records":[{"name":"Alice","phones":["١٢٣٤٥٦٧٨٩٠"]}]}"#,
            r#"{"records":[{"name":"Alice","phones":["12345"]}]}"#,
            r#"{"records":[{"name":"Alice","phones":["1234567890","1234567890"]}]}"#,
            r#"{"contacts":[]}"#,
        ];

        for case in cases {
            fs::write(&path, case)?;
            assert!(load(&path).unwrap_err().is_corrupt_data(), "{case}");
        }
        Ok(())
    }

    #[test]
    fn save_overwrites_previous_snapshot() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("book.json");

        save(&sample_book()?, &path)?;

        let mut smaller = AddressBook::new();
        smaller.add(Record::with_phones("Dave", &["1112223333"])?)?;
        save(&smaller, &path)?;

        let loaded = load(&path)?;
        assert_eq!(loaded.len(), 1);
        assert!(loaded.find("Alice").unwrap_err().is_not_found());

        // Only the snapshot itself is left behind
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn save_syncs_the_snapshot_directory() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("book.json");

        save(&sample_book()?, &path)?;
        sync_dir(&staging_dir(&path))?;

        assert_eq!(load(&path)?.len(), 3);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn syncing_a_missing_directory_is_io_error() -> Result<(), AppError> {
        let dir = tempdir()?;

        let err = sync_dir(&dir.path().join("gone")).unwrap_err();

        assert!(matches!(err, AppError::Io(_)));
        Ok(())
    }

    #[test]
    fn save_creates_missing_parent_directories() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join(".instance").join("nested").join("book.json");

        let store = JsonSnapshot::new(&path);
        store.save(&sample_book()?)?;

        assert_eq!(store.load()?.len(), 3);
        assert_eq!(store.path(), path.as_path());
        Ok(())
    }
}
