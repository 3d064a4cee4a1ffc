pub use crate::cli::{command, run_app};
pub use crate::domain::{
    AddressBook, Birthday, Name, Phone, Record, Records,
    contact::{self, ValidationReq},
};
pub use crate::errors::AppError;
pub use crate::storage::{self, BookStore, JsonSnapshot};
