//! Constructors for the JSON-LD micro-formats of the instance document.
//!
//! Every function here is pure and returns exactly the block shape the
//! instance vocabulary expects; the orchestrator decides where the blocks
//! land in the template.

use itertools::Itertools;
use serde_json::{json, Value};

use crate::context::{AffiliationMap, ContributorRecord};
use crate::xml::{ContactRecord, OntologyTerm};

/// A date literal typed as `xsd:date`.
pub fn date_value(value: &str) -> Value {
    json!({
        "@value": value,
        "@type": "xsd:date"
    })
}

/// An ontology class reference.
pub fn ontology_value(term: &OntologyTerm) -> Value {
    json!({
        "@id": term.id,
        "rdfs:label": term.label
    })
}

/// One related-identifier block per article DOI. The relation and identifier
/// type are fixed: articles are documentation of the dataset.
pub fn publication_values(articles: &[String]) -> Value {
    Value::Array(
        articles
            .iter()
            .map(|article| {
                json!({
                    "relationType": {
                        "rdfs:label": "Is Documented By",
                        "@id": "http://vocab.fairdatacollective.org/gdmt/IsDocumentedBy"
                    },
                    "relatedResourceIdentifierType": {
                        "rdfs:label": "DOI",
                        "@id": "http://vocab.fairdatacollective.org/gdmt/DOI"
                    },
                    "@id": "https://repo.metadatacenter.org/template-elements/c13bdf4e-46a5-4364-925a-c33d33c13256",
                    "relatedResourceIdentifier": {
                        "@value": article
                    },
                    "@context": {
                        "relationType": "http://rs.tdwg.org/dwc/terms/relationshipOfResource",
                        "relatedResourceIdentifierType": "http://schema.org/propertyID",
                        "relatedResourceIdentifier": "http://purl.org/dc/terms/identifier"
                    }
                })
            })
            .collect(),
    )
}

/// Keyword blocks for the subject section.
pub fn keyword_values(factors: &[String]) -> Value {
    Value::Array(factors.iter().map(|factor| json!({ "@value": factor })).collect())
}

fn full_name(given: &str, family: &str) -> String {
    [given, family].iter().filter(|part| !part.is_empty()).join(" ")
}

/// The creator name fields, including the derived full name.
pub fn creator_values(given: &str, family: &str) -> Value {
    json!({
        "creatorGivenName": { "@value": given },
        "creatorFamilyName": { "@value": family },
        "creatorFullName": { "@value": full_name(given, family) }
    })
}

fn contact_person_term() -> Value {
    json!({
        "rdfs:label": "contact person",
        "@id": "http://purl.org/zonmw/generic/10089"
    })
}

/// A contact-person block from a `<contact>` element. The affiliation is
/// resolved through the operator-curated mapping; a miss yields `{}`.
pub fn contact_value(contact: &ContactRecord, affiliations: &AffiliationMap) -> Value {
    let given = contact.first_name.as_deref().unwrap_or_default();
    let family = contact.last_name.as_deref().unwrap_or_default();
    json!({
        "contactType": contact_person_term(),
        "contactFullName": { "@value": full_name(given, family) },
        "contactGivenName": { "@value": given },
        "contactFamilyName": { "@value": family },
        "contactEmail": { "@value": contact.email.as_deref().unwrap_or_default() },
        "contactAffiliation": affiliations.resolve(contact.affiliation.as_deref())
    })
}

/// A contributor block in the shape the catalog delivers project roles.
pub fn contributor_value(contributor: &ContributorRecord) -> Value {
    json!({
        "contributorType": {
            "rdfs:label": contributor.contributor_type.label,
            "@id": contributor.contributor_type.id
        },
        "contributorFullName": { "@value": contributor.full_name },
        "contributorGivenName": { "@value": contributor.given_name },
        "contributorFamilyName": { "@value": contributor.family_name },
        "contributorEmail": { "@value": contributor.email }
    })
}

/// The fallback contact person synthesized from a contributor (the project
/// manager) when the metadata document has no contacts of its own.
pub fn contact_from_contributor(contributor: &ContributorRecord) -> Value {
    json!({
        "contactType": contact_person_term(),
        "contactFullName": { "@value": contributor.full_name },
        "contactGivenName": { "@value": contributor.given_name },
        "contactFamilyName": { "@value": contributor.family_name },
        "contactEmail": { "@value": contributor.email },
        "contactAffiliation": {}
    })
}
