use crate::prelude::{
    AddressBook, AppError, BookStore, JsonSnapshot, Record,
    command::{Cli, Commands},
    contact::BIRTHDAY_FORMAT,
};
use chrono::{Local, NaiveDate};
use clap::Parser;
use dotenv::dotenv;
use log::debug;

/// Loads the book, runs one command against it and saves it back.
pub fn run_app() -> Result<(), AppError> {
    dotenv().ok();
    let cli = Cli::parse();

    let store = JsonSnapshot::new(cli.book);
    debug!("using address book at {}", store.path().display());

    // A book that fails to load is never saved over
    let mut book = store.load()?;

    let outcome = execute(cli.command, &mut book, Local::now().date_naive());

    store.save(&book)?;

    match outcome {
        Ok(message) => {
            println!("{}", message);
            Ok(())
        }
        Err(err) if err.is_recoverable() => {
            eprintln!("{}", err);
            Ok(())
        }
        Err(err) => Err(err),
    }
}

/// Applies `command` to `book` and returns the text to show the user.
pub fn execute(
    command: Commands,
    book: &mut AddressBook,
    today: NaiveDate,
) -> Result<String, AppError> {
    match command {
        Commands::Add { name, phone } => {
            if let Ok(record) = book.find_mut(&name) {
                if let Some(phone) = phone {
                    record.add_phone(&phone)?;
                }
                return Ok("Contact updated.".to_string());
            }

            let mut record = Record::new(&name)?;
            if let Some(phone) = phone {
                record.add_phone(&phone)?;
            }
            book.add(record)?;

            Ok("Contact added.".to_string())
        }

        Commands::Change { name, old, new } => {
            book.find_mut(&name)?.edit_phone(&old, &new)?;
            Ok(format!("Phone for {} changed from {} to {}.", name, old, new))
        }

        Commands::RemovePhone { name, phone } => {
            let removed = book.find_mut(&name)?.remove_phone(&phone)?;
            Ok(format!("Phone {} removed from {}.", removed, name))
        }

        Commands::Phone { name } => {
            let record = book.find(&name)?;
            if record.phones().is_empty() {
                return Ok(format!("{} has no phone numbers.", name));
            }

            let phones = record
                .phones()
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<&str>>()
                .join("; ");
            Ok(format!("Phones for {}: {}", name, phones))
        }

        Commands::All => {
            if book.is_empty() {
                return Ok("No contacts in the address book.".to_string());
            }

            let mut records: Vec<&Record> = book.list_all().collect();
            records.sort_by(|a, b| a.name().cmp(b.name()));

            Ok(records
                .iter()
                .map(|r| r.to_string())
                .collect::<Vec<String>>()
                .join("\n"))
        }

        Commands::Delete { name } => {
            book.remove(&name)?;
            Ok(format!("Contact {} deleted.", name))
        }

        Commands::AddBirthday { name, date } => {
            book.find_mut(&name)?.set_birthday(&date)?;
            Ok(format!("Birthday for {} added.", name))
        }

        Commands::ShowBirthday { name } => match book.find(&name)?.birthday() {
            Some(birthday) => Ok(format!("{}'s birthday: {}", name, birthday)),
            None => Ok(format!("{} does not have a birthday set.", name)),
        },

        Commands::Birthdays => {
            let upcoming = book.upcoming_birthdays(today);
            if upcoming.is_empty() {
                return Ok("No upcoming birthdays this week.".to_string());
            }

            Ok(upcoming
                .iter()
                .filter_map(|(record, next)| {
                    let birthday = record.birthday()?;
                    Some(format!(
                        "{}: {} (next on {})",
                        record.name(),
                        birthday,
                        next.format(BIRTHDAY_FORMAT)
                    ))
                })
                .collect::<Vec<String>>()
                .join("\n"))
        }
    }
}
