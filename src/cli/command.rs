use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::storage::{BOOK_PATH_ENV, DEFAULT_BOOK_PATH};

#[derive(Parser, Debug)]
#[command(name = "address-book", version, about = "Personal address book")]
pub struct Cli {
    /// Address book file
    #[arg(long, env = BOOK_PATH_ENV, default_value = DEFAULT_BOOK_PATH)]
    pub book: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommand and their flags
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a contact, or add a phone to an existing contact
    Add {
        /// Contact name
        #[arg(long)]
        name: String,

        /// Phone number (10 digits)
        #[arg(long)]
        phone: Option<String>,
    },
    /// Replace one phone number of a contact
    Change {
        #[arg(long)]
        name: String,

        /// Current phone number
        #[arg(long)]
        old: String,

        /// Replacement phone number
        #[arg(long)]
        new: String,
    },
    /// Remove one phone number from a contact
    RemovePhone {
        #[arg(long)]
        name: String,

        #[arg(long)]
        phone: String,
    },
    /// Show the phone numbers of a contact
    Phone {
        #[arg(long)]
        name: String,
    },
    /// Show every contact
    All,
    /// Delete a contact
    Delete {
        #[arg(long)]
        name: String,
    },
    /// Set the birthday of a contact
    AddBirthday {
        #[arg(long)]
        name: String,

        /// Date in DD.MM.YYYY format
        #[arg(long)]
        date: String,
    },
    /// Show the birthday of a contact
    ShowBirthday {
        #[arg(long)]
        name: String,
    },
    /// List birthdays coming up within the next week
    Birthdays,
}
