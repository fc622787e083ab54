//! Request models
//!
//! Incoming create/update payloads for books and readers, with the field
//! limits the catalog enforces before anything reaches a repository.

use serde::Deserialize;

use super::book::Book;
use super::entity::EntityId;
use super::reader::Reader;
use crate::error::{FieldError, ValidationError};

// == Field Limits ==
pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;
pub const MAX_NAME_LENGTH: usize = 100;

/// Collects field violations for one payload.
#[derive(Default)]
struct Checks(Vec<FieldError>);

impl Checks {
    fn required(&mut self, field: &'static str, value: &str, max: usize) {
        if value.is_empty() {
            self.0.push(FieldError::new(field, format!("{} is required", field)));
        } else {
            self.at_most(field, value, max);
        }
    }

    fn at_most(&mut self, field: &'static str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.0.push(FieldError::new(
                field,
                format!("{} must be at most {} characters", field, max),
            ));
        }
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.0))
        }
    }
}

/// Request body for creating a book.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBook {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl NewBook {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_book_fields(&self.title, &self.description)
    }

    /// Builds an unsaved book owned by `user_id`.
    pub fn into_book(self, user_id: EntityId) -> Book {
        Book::new(self.title, self.description, user_id)
    }
}

/// Request body for replacing a book's editable fields.
#[derive(Debug, Clone, Deserialize)]
pub struct BookUpdate {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl BookUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_book_fields(&self.title, &self.description)
    }

    pub fn apply_to(self, book: &mut Book) {
        book.title = self.title;
        book.description = self.description;
    }
}

fn validate_book_fields(title: &str, description: &str) -> Result<(), ValidationError> {
    let mut checks = Checks::default();
    checks.required("title", title, MAX_TITLE_LENGTH);
    checks.at_most("description", description, MAX_DESCRIPTION_LENGTH);
    checks.finish()
}

/// Request body for registering a reader.
#[derive(Debug, Clone, Deserialize)]
pub struct NewReader {
    pub name: String,
    pub surname: String,
}

impl NewReader {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_reader_fields(&self.name, &self.surname)
    }

    pub fn into_reader(self) -> Reader {
        Reader::new(self.name, self.surname)
    }
}

/// Request body for renaming a reader.
#[derive(Debug, Clone, Deserialize)]
pub struct ReaderUpdate {
    pub name: String,
    pub surname: String,
}

impl ReaderUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_reader_fields(&self.name, &self.surname)
    }

    pub fn apply_to(self, reader: &mut Reader) {
        reader.name = self.name;
        reader.surname = self.surname;
    }
}

fn validate_reader_fields(name: &str, surname: &str) -> Result<(), ValidationError> {
    let mut checks = Checks::default();
    checks.required("name", name, MAX_NAME_LENGTH);
    checks.required("surname", surname, MAX_NAME_LENGTH);
    checks.finish()
}
