//! Client-side form controller.
//!
//! Holds the raw input of the saint form, keeps the dynamic place-detail
//! fields in step with the checked place categories, and turns the input
//! into a [`NewRecord`] for submission through a [`RecordTransport`].
//!
//! The checked categories and their detail text live in one map, so the
//! rendered detail fields are always derived from the checked set:
//!
//! ```
//! use saints::form::RecordForm;
//! use saints::record::PlaceCategory;
//!
//! let mut form = RecordForm::new();
//! form.toggle(PlaceCategory::Birth, true);
//! form.set_detail(PlaceCategory::Birth, "Merta").unwrap();
//! assert_eq!(form.detail_fields().len(), 1);
//!
//! form.toggle(PlaceCategory::Birth, false);
//! assert!(form.detail_fields().is_empty());
//! ```

pub mod transport;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::record::{split_list, NewRecord, PlaceCategory};

pub use transport::{HttpTransport, RecordTransport, TransportError};

/// Shown when the submission fails before or without a server message.
const NETWORK_FAILURE: &str = "An error occurred while submitting the form.";

/// Errors raised by the form before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A required field is empty. Carries the field name for inline display.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// The category is not checked, so it has no detail field.
    #[error("no detail field for {0}: category is not selected")]
    NoDetailField(PlaceCategory),
}

/// Message shown to the user after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Error(m) => m,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Success(_))
    }
}

/// A detail input rendered for one checked category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField<'a> {
    pub category: PlaceCategory,
    pub label: String,
    pub input_id: String,
    pub placeholder: String,
    pub value: &'a str,
}

impl<'a> DetailField<'a> {
    fn new(category: PlaceCategory, value: &'a str) -> Self {
        Self {
            category,
            label: format!("Details for {category}"),
            input_id: category.input_id(),
            placeholder: format!("Enter details for {category}..."),
            value,
        }
    }
}

/// Raw form state.
///
/// Scalar inputs are public and written directly. Place categories go
/// through [`RecordForm::toggle`] and [`RecordForm::set_detail`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordForm {
    pub name: String,
    pub tradition: String,
    pub period: String,
    pub tradition_type: String,
    pub gender: String,
    pub language: String,
    pub deity: String,
    pub philosophy: String,
    /// Comma-separated influences, as typed.
    pub influence: String,
    /// Comma-separated texts, as typed.
    pub texts: String,
    /// Checked categories mapped to the text of their detail field.
    places: BTreeMap<PlaceCategory, String>,
}

impl RecordForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a checkbox change.
    ///
    /// Checking a category that already has a detail field keeps its text;
    /// unchecking removes the field and discards what it held.
    pub fn toggle(&mut self, category: PlaceCategory, checked: bool) {
        if checked {
            self.places.entry(category).or_default();
        } else {
            self.places.remove(&category);
        }
    }

    pub fn is_checked(&self, category: PlaceCategory) -> bool {
        self.places.contains_key(&category)
    }

    /// Checked categories in vocabulary order.
    pub fn checked(&self) -> impl Iterator<Item = PlaceCategory> + '_ {
        self.places.keys().copied()
    }

    /// Write into the detail field of a checked category.
    pub fn set_detail(
        &mut self,
        category: PlaceCategory,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        let slot = self
            .places
            .get_mut(&category)
            .ok_or(FormError::NoDetailField(category))?;
        *slot = value.into();
        Ok(())
    }

    /// The detail fields to render, one per checked category.
    pub fn detail_fields(&self) -> Vec<DetailField<'_>> {
        self.places
            .iter()
            .map(|(category, value)| DetailField::new(*category, value))
            .collect()
    }

    /// Assemble the record to submit.
    ///
    /// Fails with [`FormError::Required`] when the name is blank.
    pub fn build_record(&self) -> Result<NewRecord, FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::Required { field: "name" });
        }

        let place_associated_details = self
            .places
            .iter()
            .filter(|(_, detail)| !detail.trim().is_empty())
            .map(|(category, detail)| (*category, detail.clone()))
            .collect();

        Ok(NewRecord {
            name: self.name.clone(),
            tradition: present(&self.tradition),
            period: present(&self.period),
            tradition_type: present(&self.tradition_type),
            gender: present(&self.gender),
            language: present(&self.language),
            deity: present(&self.deity),
            philosophy: present(&self.philosophy),
            influence: split_list(&self.influence),
            texts: split_list(&self.texts),
            place_associated: self.checked().collect(),
            place_associated_details,
        })
    }

    /// Validate, send and react to the outcome.
    ///
    /// A validation failure returns `Err` without touching the transport.
    /// Otherwise exactly one request is made: on success the form is cleared,
    /// on failure it is left as it was so the user can retry. A 2xx reply
    /// whose body cannot be read still means the record was stored, so it
    /// clears the form too.
    pub async fn submit(&mut self, transport: &dyn RecordTransport) -> Result<Notice, FormError> {
        let record = self.build_record()?;

        match transport.submit(&record).await {
            Ok(stored) => {
                self.reset();
                Ok(Notice::Success(format!(
                    "Success: Saint '{}' added with ID: {}",
                    stored.name(),
                    stored.id
                )))
            }
            Err(TransportError::Decode(err)) => {
                tracing::warn!(%err, "Record stored but response was unreadable");
                let notice = Notice::Success(format!("Success: Saint '{}' added", record.name));
                self.reset();
                Ok(notice)
            }
            Err(TransportError::Rejected { status, message, error }) => {
                tracing::warn!(status, %error, "Submission rejected");
                Ok(Notice::Error(format!("Error: {message}")))
            }
            Err(err) => {
                tracing::warn!(%err, "Submission failed");
                Ok(Notice::Error(NETWORK_FAILURE.to_string()))
            }
        }
    }

    /// Clear every input and every detail field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn present(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
