//! Add-quote form.
//!
//! Holds the two text inputs and validates a submission before it reaches
//! the quote book.

use crate::error::QuotebookError;
use crate::quotes::Quote;

/// Message shown when a required field is blank.
pub const VALIDATION_MESSAGE: &str = "Please enter both quote text and category";

/// Confirmation shown after a successful add.
pub const ADDED_MESSAGE: &str = "Quote added successfully!";

/// Which input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Text,
    Category,
}

/// The add-quote inputs.
#[derive(Debug, Clone, Default)]
pub struct QuoteForm {
    pub text: String,
    pub category: String,
    pub focus: FormField,
}

impl QuoteForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The input that currently has focus.
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Text => &mut self.text,
            FormField::Category => &mut self.category,
        }
    }

    /// Move focus to the other input.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Text => FormField::Category,
            FormField::Category => FormField::Text,
        };
    }

    /// Validate the current inputs without clearing them.
    ///
    /// # Errors
    ///
    /// Returns `QuotebookError::Validation` if either input is blank.
    pub fn to_quote(&self) -> Result<Quote, QuotebookError> {
        validate(&self.text, &self.category)
    }

    /// Clear both inputs and return focus to the text field.
    pub fn clear(&mut self) {
        self.text.clear();
        self.category.clear();
        self.focus = FormField::Text;
    }
}

/// Trim both inputs and build a quote, rejecting blank fields.
///
/// # Errors
///
/// Returns `QuotebookError::Validation` if either input is empty after trimming.
pub fn validate(text: &str, category: &str) -> Result<Quote, QuotebookError> {
    let text = text.trim();
    let category = category.trim();

    if text.is_empty() || category.is_empty() {
        return Err(QuotebookError::Validation(VALIDATION_MESSAGE.to_string()));
    }

    Ok(Quote::new(text, category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_trims() {
        let quote = validate("  Keep going.  ", "\tMotivation ").unwrap();
        assert_eq!(quote, Quote::new("Keep going.", "Motivation"));
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        for (text, category) in [("", "X"), ("X", ""), ("", ""), ("   ", "X"), ("X", " \n")] {
            let err = validate(text, category).unwrap_err();
            assert!(matches!(err, QuotebookError::Validation(_)), "{text:?}/{category:?}");
        }
    }

    #[test]
    fn test_form_focus_and_clear() {
        let mut form = QuoteForm::new();
        form.focused_mut().push_str("text");
        form.toggle_focus();
        form.focused_mut().push_str("cat");

        assert_eq!(form.to_quote().unwrap(), Quote::new("text", "cat"));

        form.clear();
        assert!(form.text.is_empty());
        assert!(form.category.is_empty());
        assert_eq!(form.focus, FormField::Text);
    }
}
