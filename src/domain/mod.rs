pub mod book;
pub mod contact;

use crate::errors::AppError;

pub use book::{AddressBook, Records};
pub use contact::{Birthday, Name, Phone, Record};
