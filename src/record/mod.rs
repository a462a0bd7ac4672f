//! The saint record and the shaping rules applied before it is stored.
//!
//! # Modules
//!
//! - [`category`] — `PlaceCategory`, the fixed place-association vocabulary
//! - [`fields`] — comma-list splitting and lenient JSON decoding helpers

pub mod category;
pub mod fields;

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ValidationError;

pub use category::{PlaceCategory, UnknownCategory};
pub use fields::{normalize_list, split_list};

/// A record as submitted, before the server assigns an id and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    /// Name of the saint. The only required field.
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tradition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tradition_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub philosophy: Option<String>,
    /// Saints or teachers who influenced this one.
    #[serde(default, deserialize_with = "fields::list_or_csv")]
    pub influence: Vec<String>,
    /// Texts composed by or associated with the saint.
    #[serde(default, deserialize_with = "fields::list_or_csv")]
    pub texts: Vec<String>,
    /// Selected place categories, in selection order.
    #[serde(default, deserialize_with = "fields::category_list")]
    pub place_associated: Vec<PlaceCategory>,
    /// Free-text detail per selected category.
    #[serde(default, deserialize_with = "fields::detail_map")]
    pub place_associated_details: BTreeMap<PlaceCategory, String>,
}

impl NewRecord {
    /// Create a record with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Validate the required name and bring the record into its stored shape.
    ///
    /// List fields are re-split and trimmed, duplicate categories collapse to
    /// their first occurrence and blank details are dropped. A detail keyed
    /// by a category that was not selected is rejected.
    pub fn normalized(mut self) -> Result<Self, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }

        self.influence = normalize_list(&self.influence);
        self.texts = normalize_list(&self.texts);

        let mut seen = BTreeSet::new();
        self.place_associated.retain(|c| seen.insert(*c));

        self.place_associated_details
            .retain(|_, detail| !detail.trim().is_empty());
        if let Some(orphan) = self
            .place_associated_details
            .keys()
            .find(|c| !seen.contains(*c))
        {
            return Err(ValidationError::UnselectedDetail(*orphan));
        }

        Ok(self)
    }
}

/// A stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: NewRecord,
    pub created_at: DateTime<Utc>,
    /// Always equal to `created_at`; records are never updated.
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Assign a fresh id and stamp the record with the current time.
    pub fn stamp(fields: NewRecord) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_rejects_blank_name() {
        assert_eq!(
            NewRecord::named("").normalized(),
            Err(ValidationError::MissingName)
        );
        assert_eq!(
            NewRecord::named("   ").normalized(),
            Err(ValidationError::MissingName)
        );
    }

    #[test]
    fn test_normalized_shapes_lists_and_places() {
        let mut record = NewRecord::named("Tukaram");
        record.influence = vec![" Namdev ".into(), "".into(), "Jnaneshwar, Eknath".into()];
        record.place_associated = vec![
            PlaceCategory::Birth,
            PlaceCategory::Samadhi,
            PlaceCategory::Birth,
        ];
        record
            .place_associated_details
            .insert(PlaceCategory::Birth, "Dehu".into());
        record
            .place_associated_details
            .insert(PlaceCategory::Samadhi, "  ".into());

        let record = record.normalized().unwrap();
        assert_eq!(record.influence, vec!["Namdev", "Jnaneshwar", "Eknath"]);
        assert_eq!(
            record.place_associated,
            vec![PlaceCategory::Birth, PlaceCategory::Samadhi]
        );
        assert_eq!(record.place_associated_details.len(), 1);
        assert_eq!(
            record.place_associated_details.get(&PlaceCategory::Birth),
            Some(&"Dehu".to_string())
        );
    }

    #[test]
    fn test_normalized_rejects_detail_for_unselected_place() {
        let mut record = NewRecord::named("Kabir");
        record.place_associated = vec![PlaceCategory::Birth];
        record
            .place_associated_details
            .insert(PlaceCategory::Samadhi, "Maghar".into());

        assert_eq!(
            record.normalized(),
            Err(ValidationError::UnselectedDetail(PlaceCategory::Samadhi))
        );
    }

    #[test]
    fn test_new_record_decodes_form_payload() {
        let json = serde_json::json!({
            "name": "Mirabai",
            "traditionType": "Bhakti",
            "influence": "Ravidas, Krishna ",
            "placeAssociated": "Birth",
            "placeAssociatedDetails": {"Birth": "Merta"},
        });
        let record: NewRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.tradition_type.as_deref(), Some("Bhakti"));
        assert_eq!(record.influence, vec!["Ravidas", "Krishna"]);
        assert_eq!(record.place_associated, vec![PlaceCategory::Birth]);
        assert_eq!(
            record.place_associated_details.get(&PlaceCategory::Birth),
            Some(&"Merta".to_string())
        );
    }

    #[test]
    fn test_record_wire_shape() {
        let record = Record::stamp(NewRecord::named("Lalleshwari"));
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["_id"], record.id.to_string());
        assert_eq!(json["name"], "Lalleshwari");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("tradition").is_none());
        assert_eq!(json["placeAssociated"], serde_json::json!([]));

        let back: Record = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
