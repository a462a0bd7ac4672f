//! Field shaping shared by the form controller and the server.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use super::category::PlaceCategory;

/// Split a comma-separated input into trimmed, non-empty segments.
///
/// `"Kabir, Ravidas ,  Tulsidas"` becomes `["Kabir", "Ravidas", "Tulsidas"]`.
/// Empty or all-whitespace input yields an empty vector.
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trim each entry of an already-split list and drop the empty ones.
pub fn normalize_list<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .flat_map(|s| split_list(s.as_ref()))
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(v) => v,
        }
    }
}

/// Accept either a JSON array of strings or one comma-separated string.
pub(crate) fn list_or_csv<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<OneOrMany<String>>::deserialize(deserializer)?;
    Ok(raw.map(|v| normalize_list(v.into_vec())).unwrap_or_default())
}

/// Accept either a JSON array of category labels or a single bare label.
pub(crate) fn category_list<'de, D>(deserializer: D) -> Result<Vec<PlaceCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<OneOrMany<String>>::deserialize(deserializer)?;
    raw.map(OneOrMany::into_vec)
        .unwrap_or_default()
        .iter()
        .map(|label| label.parse::<PlaceCategory>().map_err(D::Error::custom))
        .collect()
}

/// Accept a category-to-detail map, treating `null` as empty.
pub(crate) fn detail_map<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<PlaceCategory, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<PlaceCategory, String>>::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}
