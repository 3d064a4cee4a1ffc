use super::*;

use chrono::{Duration, NaiveDate};
use std::collections::{HashMap, hash_map};

pub const UPCOMING_BIRTHDAY_DAYS: i64 = 7;

/// In-memory address book keyed by exact contact name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AddressBook {
    mem: HashMap<String, Record>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self {
            mem: HashMap::new(),
        }
    }

    /// Builds a book from decoded records, rejecting repeated names.
    pub fn from_records<I>(records: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut book = AddressBook::new();
        for record in records {
            record.validate()?;
            book.add(record)?;
        }
        Ok(book)
    }

    pub fn add(&mut self, record: Record) -> Result<(), AppError> {
        match self.mem.entry(record.name().to_string()) {
            hash_map::Entry::Occupied(entry) => Err(AppError::DuplicateName(entry.key().clone())),
            hash_map::Entry::Vacant(entry) => {
                entry.insert(record);
                Ok(())
            }
        }
    }

    pub fn find(&self, name: &str) -> Result<&Record, AppError> {
        self.mem.get(name).ok_or_else(|| contact_not_found(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Result<&mut Record, AppError> {
        self.mem.get_mut(name).ok_or_else(|| contact_not_found(name))
    }

    pub fn remove(&mut self, name: &str) -> Result<Record, AppError> {
        self.mem.remove(name).ok_or_else(|| contact_not_found(name))
    }

    /// Iterates the current records. Order is unspecified.
    pub fn list_all(&self) -> Records<'_> {
        Records {
            inner: self.mem.values(),
        }
    }

    pub fn len(&self) -> usize {
        self.mem.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mem.is_empty()
    }

    /// Records whose next birthday falls within the coming week, `today` included.
    pub fn upcoming_birthdays(&self, today: NaiveDate) -> Vec<(&Record, NaiveDate)> {
        let last_day = today + Duration::days(UPCOMING_BIRTHDAY_DAYS);

        let mut upcoming: Vec<(&Record, NaiveDate)> = self
            .list_all()
            .filter_map(|record| {
                let next = record.birthday()?.next_occurrence(today);
                (next <= last_day).then_some((record, next))
            })
            .collect();

        upcoming.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.name().cmp(b.0.name())));
        upcoming
    }
}

pub struct Records<'a> {
    inner: hash_map::Values<'a, String, Record>,
}

impl<'a> Iterator for Records<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Records<'_> {}

fn contact_not_found(name: &str) -> AppError {
    AppError::NotFound(format!("Contact {}", name))
}
