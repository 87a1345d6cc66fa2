//! Raw input of the add-book form.
//!
//! [`BookForm`] holds exactly what the user typed. Validation turns it into a
//! [`NewBook`] or a single validation error naming the first missing field,
//! checked in on-screen order.

use crate::app::modes::FormField;
use crate::domain::error::{BookshelfError, Result};
use crate::domain::NewBook;

/// Text inputs and completion checkbox of the add form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    /// Year as typed; parsed on validation.
    pub year: String,
    pub is_complete: bool,
}

impl BookForm {
    /// A form pre-filled with the given inputs.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::app::BookForm;
    ///
    /// let form = BookForm::filled("Dune", "Frank Herbert", "1965", false);
    /// let book = form.validate()?;
    /// assert_eq!(book.year(), 1965);
    /// # Ok::<(), bookshelf::BookshelfError>(())
    /// ```
    #[must_use]
    pub fn filled(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
        is_complete: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: year.into(),
            is_complete,
        }
    }

    /// Checks that title, author, and year are present and the year is a number.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::Validation`] for the first field that fails.
    pub fn validate(&self) -> Result<NewBook> {
        if self.title.trim().is_empty() {
            return Err(BookshelfError::Validation("Title is required".to_string()));
        }
        if self.author.trim().is_empty() {
            return Err(BookshelfError::Validation("Author is required".to_string()));
        }

        let year_text = self.year.trim();
        if year_text.is_empty() {
            return Err(BookshelfError::Validation("Year is required".to_string()));
        }
        let year = year_text.parse::<i32>().map_err(|_| {
            BookshelfError::Validation(format!("Year must be a whole number, got \"{year_text}\""))
        })?;

        NewBook::new(&self.title, &self.author, year, self.is_complete)
    }

    /// Resets every input, including the checkbox.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Text buffer behind a field, `None` for the checkbox.
    pub fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Title => Some(&mut self.title),
            FormField::Author => Some(&mut self.author),
            FormField::Year => Some(&mut self.year),
            FormField::Complete => None,
        }
    }

    /// Display value of a field.
    #[must_use]
    pub fn display_value(&self, field: FormField) -> String {
        match field {
            FormField::Title => self.title.clone(),
            FormField::Author => self.author.clone(),
            FormField::Year => self.year.clone(),
            FormField::Complete => if self.is_complete { "[x]" } else { "[ ]" }.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(form: &BookForm) -> String {
        match form.validate() {
            Err(BookshelfError::Validation(m)) => m,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn missing_fields_are_reported_in_order() {
        assert_eq!(message(&BookForm::filled("", "", "", false)), "Title is required");
        assert_eq!(message(&BookForm::filled("Dune", " ", "", false)), "Author is required");
        assert_eq!(message(&BookForm::filled("Dune", "Herbert", "  ", false)), "Year is required");
    }

    #[test]
    fn non_numeric_year_is_rejected() {
        let msg = message(&BookForm::filled("Dune", "Herbert", "1965abc", false));
        assert!(msg.contains("1965abc"));
    }

    #[test]
    fn negative_years_are_allowed() {
        let book = BookForm::filled("The Odyssey", "Homer", "-700", true).validate().unwrap();
        assert_eq!(book.year(), -700);
        assert!(book.is_complete());
    }

    #[test]
    fn clear_resets_checkbox_too() {
        let mut form = BookForm::filled("Dune", "Herbert", "1965", true);
        form.clear();
        assert_eq!(form, BookForm::default());
    }

    #[test]
    fn checkbox_has_no_text_buffer() {
        let mut form = BookForm::default();
        assert!(form.text_mut(FormField::Complete).is_none());
        form.text_mut(FormField::Year).unwrap().push('7');
        assert_eq!(form.year, "7");
        assert_eq!(form.display_value(FormField::Complete), "[ ]");
    }
}
