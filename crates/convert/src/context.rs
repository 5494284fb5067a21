//! The catalog-supplied facts that drive a conversion run.
//!
//! These come out of the collection's AVUs and the project's contributor
//! metadata, not out of the XML document itself. The context is constructed
//! once per collection and is read-only for the duration of the run.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// A `{rdfs:label, @id}` reference to a vocabulary term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRef {
    #[serde(rename = "rdfs:label", default)]
    pub label: String,
    #[serde(rename = "@id", default)]
    pub id: String,
}

impl TermRef {
    pub fn new(label: impl Into<String>, id: impl Into<String>) -> Self {
        Self { label: label.into(), id: id.into() }
    }
}

/// A project contributor as delivered by the catalog, keyed by role in
/// [`ConversionContext::contributors`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributorRecord {
    #[serde(rename = "contributorFullName", default)]
    pub full_name: String,
    #[serde(rename = "contributorGivenName", default)]
    pub given_name: String,
    #[serde(rename = "contributorFamilyName", default)]
    pub family_name: String,
    #[serde(rename = "contributorEmail", default)]
    pub email: String,
    #[serde(rename = "contributorType", default)]
    pub contributor_type: TermRef,
    #[serde(rename = "contributorIdentifierScheme", default, skip_serializing_if = "Option::is_none")]
    pub identifier_scheme: Option<TermRef>,
}

/// The contributor role used to synthesize a contact person when the
/// metadata document carries no `<contact>` elements.
pub const PROJECT_MANAGER_ROLE: &str = "project manager";

/// Flat key-value bag of collection facts supplied by the caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversionContext {
    /// Versioned handle of the collection, e.g. `https://hdl.handle.net/<prefix>/<suffix>.1`
    #[serde(rename = "version_PID", default)]
    pub version_pid: String,
    #[serde(rename = "creatorGivenName", default)]
    pub creator_given_name: String,
    #[serde(rename = "creatorFamilyName", default)]
    pub creator_family_name: String,
    #[serde(rename = "creator_username", default)]
    pub creator_username: String,
    /// Date the collection was submitted, `YYYY-MM-DD`
    #[serde(rename = "submissionDate", default)]
    pub submission_date: String,
    /// Collection creation timestamp, `YYYY-MM-DDTHH:MM:SS`
    #[serde(default)]
    pub ctime: String,
    /// Project contributors keyed by role ("data manager", "project manager", ...)
    #[serde(default)]
    pub contributors: BTreeMap<String, ContributorRecord>,
    /// Optional path to the affiliation-string to JSON-LD block mapping
    #[serde(rename = "affiliation_mapping_file", default)]
    pub affiliation_mapping_file: Option<PathBuf>,
}

impl ConversionContext {
    pub fn project_manager(&self) -> Option<&ContributorRecord> {
        self.contributors.get(PROJECT_MANAGER_ROLE)
    }
}

/// Maps free-text affiliation strings to ready-made JSON-LD affiliation
/// blocks. Affiliations are operator-curated, so a miss is expected for new
/// institutes and degrades to an empty block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AffiliationMap {
    entries: serde_json::Map<String, Value>,
}

impl AffiliationMap {
    /// Looks up an affiliation block; an unmapped or absent affiliation
    /// yields an empty object, never an error.
    pub fn resolve(&self, affiliation: Option<&str>) -> Value {
        match affiliation.and_then(|name| self.entries.get(name)) {
            Some(block) => block.clone(),
            None => {
                if let Some(name) = affiliation {
                    warn!(affiliation = name, "affiliation not mapped, inserting empty block");
                }
                Value::Object(serde_json::Map::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn context_deserializes_catalog_keys() {
        let ctx: ConversionContext = serde_json::from_value(json!({
            "version_PID": "https://hdl.handle.net/21.T12996/P000000001C000000001.1",
            "creatorGivenName": "Ada",
            "creatorFamilyName": "Lovelace",
            "creator_username": "alovelace",
            "submissionDate": "2022-01-01",
            "ctime": "2022-01-01T09:30:00",
            "contributors": {
                "project manager": {
                    "contributorFullName": "Margaret Hamilton",
                    "contributorGivenName": "Margaret",
                    "contributorFamilyName": "Hamilton",
                    "contributorEmail": "m.hamilton@example.org",
                    "contributorType": {
                        "rdfs:label": "project manager",
                        "@id": "http://purl.org/zonmw/generic/10082"
                    }
                }
            }
        }))
        .unwrap();

        assert_eq!(ctx.creator_given_name, "Ada");
        let pm = ctx.project_manager().unwrap();
        assert_eq!(pm.family_name, "Hamilton");
        assert_eq!(pm.contributor_type.id, "http://purl.org/zonmw/generic/10082");
    }

    #[test]
    fn affiliation_miss_is_an_empty_object() {
        let map: AffiliationMap =
            serde_json::from_value(json!({ "Navy": { "@value": "US Navy" } })).unwrap();
        assert_eq!(map.resolve(Some("Navy")), json!({ "@value": "US Navy" }));
        assert_eq!(map.resolve(Some("Unknown Institute")), json!({}));
        assert_eq!(map.resolve(None), json!({}));
    }
}
