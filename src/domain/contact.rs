use std::fmt;

use super::*;
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const BIRTHDAY_FORMAT: &str = "%d.%m.%Y";

pub struct ValidationReq;

impl ValidationReq {
    pub fn name_req() -> String {
        "Name cannot be empty or start or end with whitespace".to_string()
    }

    pub fn phone_req() -> String {
        "Phone number must contain exactly 10 digits".to_string()
    }

    pub fn birthday_req() -> String {
        "Birthday must be a valid date in DD.MM.YYYY format".to_string()
    }
}

/// Contact name. Never empty and never padded with whitespace, since it is
/// the exact key a record is stored and looked up under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    pub fn parse(name: &str) -> Result<Self, AppError> {
        if name.is_empty() || name.trim() != name {
            return Err(AppError::Validation(ValidationReq::name_req()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Name {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Name::parse(&value)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Exactly ten ASCII digits, nothing else
static PHONE_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$"));

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub fn parse(phone: &str) -> Result<Self, AppError> {
        let re = PHONE_PATTERN
            .as_ref()
            .map_err(|e| AppError::Regex(e.clone()))?;
        let phone = phone.trim();

        if !re.is_match(phone) {
            return Err(AppError::Validation(ValidationReq::phone_req()));
        }
        Ok(Self(phone.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Phone {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Phone::parse(&value)
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        phone.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Birthday date. Entered and displayed as `DD.MM.YYYY`, stored as ISO date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Birthday(NaiveDate);

impl Birthday {
    pub fn parse(date: &str) -> Result<Self, AppError> {
        NaiveDate::parse_from_str(date.trim(), BIRTHDAY_FORMAT)
            .map(Self)
            .map_err(|_| AppError::Validation(ValidationReq::birthday_req()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// First anniversary falling on or after `today`.
    pub fn next_occurrence(&self, today: NaiveDate) -> NaiveDate {
        let this_year = self.in_year(today.year());
        if this_year < today {
            self.in_year(today.year() + 1)
        } else {
            this_year
        }
    }

    // 29 February falls back to 28 February in common years
    fn in_year(&self, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, self.0.month(), self.0.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, self.0.month(), 28))
            .unwrap_or(self.0)
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(BIRTHDAY_FORMAT))
    }
}

/// One entry of the address book.
///
/// The name is fixed at construction; phones and birthday can change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: Name,

    #[serde(default)]
    phones: Vec<Phone>,

    #[serde(default)]
    birthday: Option<Birthday>,
}

impl Record {
    pub fn new(name: &str) -> Result<Self, AppError> {
        Ok(Record {
            name: Name::parse(name)?,
            phones: Vec::new(),
            birthday: None,
        })
    }

    pub fn with_phones(name: &str, phones: &[&str]) -> Result<Self, AppError> {
        let mut record = Record::new(name)?;
        for phone in phones {
            record.add_phone(phone)?;
        }
        Ok(record)
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    pub fn add_phone(&mut self, phone: &str) -> Result<(), AppError> {
        let phone = Phone::parse(phone)?;

        if self.phones.contains(&phone) {
            return Err(AppError::DuplicatePhone(phone.0));
        }
        self.phones.push(phone);
        Ok(())
    }

    pub fn remove_phone(&mut self, phone: &str) -> Result<Phone, AppError> {
        match self.phones.iter().position(|p| p.as_str() == phone.trim()) {
            Some(index) => Ok(self.phones.remove(index)),
            None => Err(self.phone_not_found(phone)),
        }
    }

    pub fn edit_phone(&mut self, old_phone: &str, new_phone: &str) -> Result<(), AppError> {
        let index = self
            .phones
            .iter()
            .position(|p| p.as_str() == old_phone.trim())
            .ok_or_else(|| self.phone_not_found(old_phone))?;

        let new_phone = Phone::parse(new_phone)?;

        if self.phones[index] == new_phone {
            return Ok(());
        }
        if self.phones.contains(&new_phone) {
            return Err(AppError::DuplicatePhone(new_phone.0));
        }

        self.phones[index] = new_phone;
        Ok(())
    }

    pub fn find_phone(&self, phone: &str) -> Option<&Phone> {
        self.phones.iter().find(|p| p.as_str() == phone.trim())
    }

    pub fn set_birthday(&mut self, date: &str) -> Result<(), AppError> {
        self.birthday = Some(Birthday::parse(date)?);
        Ok(())
    }

    /// Checks invariants that deserialization alone does not enforce.
    pub fn validate(&self) -> Result<(), AppError> {
        for (i, phone) in self.phones.iter().enumerate() {
            if self.phones[..i].contains(phone) {
                return Err(AppError::DuplicatePhone(phone.0.clone()));
            }
        }
        Ok(())
    }

    fn phone_not_found(&self, phone: &str) -> AppError {
        AppError::NotFound(format!("Phone {} of contact {}", phone.trim(), self.name))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phones = self
            .phones
            .iter()
            .map(Phone::as_str)
            .collect::<Vec<&str>>()
            .join("; ");

        match &self.birthday {
            Some(birthday) => write!(
                f,
                "Contact name: {}, phones: {}, birthday: {}",
                self.name, phones, birthday
            ),
            None => write!(
                f,
                "Contact name: {}, phones: {}, birthday: Not set",
                self.name, phones
            ),
        }
    }
}
