use core::fmt;

#[derive(Debug)]
pub enum AppError {
    Io(std::io::Error),
    NotFound(String),
    DuplicateName(String),
    DuplicatePhone(String),
    CorruptData(String),
    Validation(String),
    Json(serde_json::Error),
    Regex(regex::Error),
}

impl AppError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }

    pub fn is_duplicate_name(&self) -> bool {
        matches!(self, AppError::DuplicateName(_))
    }

    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, AppError::CorruptData(_))
    }

    /// Errors caused by user input that leave the book intact.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::NotFound(_)
                | AppError::DuplicateName(_)
                | AppError::DuplicatePhone(_)
                | AppError::Validation(_)
        )
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::Json(e) => Some(e),
            AppError::Regex(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<tempfile::PersistError> for AppError {
    fn from(err: tempfile::PersistError) -> Self {
        AppError::Io(err.error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Json(err)
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Regex(err)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => {
                write!(f, "I/O error while accessing a file or resource: {}", e)
            }
            AppError::NotFound(item) => {
                write!(f, "{} not found", item)
            }
            AppError::DuplicateName(name) => {
                write!(f, "Contact {} already exists", name)
            }
            AppError::DuplicatePhone(phone) => {
                write!(f, "Phone {} already belongs to this contact", phone)
            }
            AppError::CorruptData(msg) => {
                write!(f, "Address book file is corrupt: {}", msg)
            }
            AppError::Validation(msg) => {
                write!(f, "Validation failed: {}", msg)
            }
            AppError::Json(e) => {
                write!(f, "Could not encode address book: {}", e)
            }
            AppError::Regex(e) => {
                write!(f, "Invalid validation pattern: {}", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_not_found_message() {
        let err = AppError::NotFound("Contact Alice".to_string());

        assert_eq!(format!("{}", err), "Contact Alice not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn confirm_corrupt_data_message() {
        let err = AppError::CorruptData("expected value at line 1 column 1".to_string());

        assert!(format!("{}", err).starts_with("Address book file is corrupt: "));
        assert!(err.is_corrupt_data());
        assert!(!err.is_duplicate_name());
    }

    #[test]
    fn io_error_converts_and_exposes_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AppError = io.into();

        assert!(matches!(err, AppError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
