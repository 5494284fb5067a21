//! The DataHub general schema reference table.
//!
//! Every customized template must carry these top-level sections with the
//! structural properties listed here. The table is only ever compared
//! against, never mutated.

use std::sync::OnceLock;

use serde_json::{json, Map, Value};

/// Returns the reference table, keyed by section ID in checking order.
pub fn general_schema_fields() -> &'static Map<String, Value> {
    static TABLE: OnceLock<Value> = OnceLock::new();
    TABLE
        .get_or_init(build_table)
        .as_object()
        .expect("general schema table is an object")
}

fn build_table() -> Value {
    json!({
        "1_Identifier": {
            "type": "object",
            "fields": {
                "datasetIdentifier": {
                    "type": "object",
                    "_ui": { "inputType": "textfield", "hidden": true },
                    "_valueConstraints": { "requiredValue": false, "defaultValue": "" }
                },
                "datasetIdentifierType": {
                    "type": "object",
                    "_ui": { "inputType": "textfield", "hidden": true },
                    "_valueConstraints": {
                        "requiredValue": true,
                        "branches": [
                            {
                                "source": "Ontology for Generic Dataset Metadata Template (FDC-GDMT)",
                                "acronym": "FDC-GDMT",
                                "uri": "http://vocab.fairdatacollective.org/gdmt/IdentifierType",
                                "name": "Identifier Type",
                                "maxDepth": 0
                            }
                        ]
                    }
                }
            }
        },
        "2_Creator": {
            "type": "object",
            "fields": {
                "creatorIdentifier": {
                    "type": "object",
                    "_ui": { "inputType": "textfield" },
                    "_valueConstraints": { "defaultValue": "0000-0000-0000-0000" }
                },
                "creatorIdentifierScheme": {
                    "type": "object",
                    "_ui": { "inputType": "textfield", "hidden": true },
                    "_valueConstraints": {
                        "branches": [
                            {
                                "source": "Ontology for Generic Dataset Metadata Template (FDC-GDMT)",
                                "acronym": "FDC-GDMT",
                                "uri": "http://vocab.fairdatacollective.org/gdmt/IdentifierScheme",
                                "name": "Identifier Scheme",
                                "maxDepth": 0
                            }
                        ],
                        "defaultValue": { "termUri": "https://orcid.org/", "rdfs:label": "ORCiD" }
                    }
                },
                "creatorIdentifierSchemeIRI": {
                    "type": "object",
                    "_ui": { "inputType": "textfield", "hidden": true },
                    "_valueConstraints": {
                        "branches": [
                            {
                                "source": "Ontology for Generic Dataset Metadata Template (FDC-GDMT)",
                                "acronym": "FDC-GDMT",
                                "uri": "http://vocab.fairdatacollective.org/gdmt/IdentifierScheme",
                                "name": "Identifier Scheme",
                                "maxDepth": 0
                            }
                        ],
                        "defaultValue": { "termUri": "https://orcid.org/", "rdfs:label": "ORCiD" }
                    }
                },
                "creatorAffiliation": {
                    "type": "object",
                    "_ui": { "inputType": "textfield", "hidden": true },
                    "_valueConstraints": { "requiredValue": false }
                },
                "creatorGivenName": {
                    "type": "object",
                    "_ui": { "inputType": "textfield" },
                    "_valueConstraints": { "requiredValue": true }
                },
                "creatorFamilyName": {
                    "type": "object",
                    "_ui": { "inputType": "textfield" },
                    "_valueConstraints": { "requiredValue": true }
                },
                "creatorFullName": {
                    "type": "object",
                    "_ui": { "inputType": "textfield", "hidden": true },
                    "_valueConstraints": { "requiredValue": true }
                }
            }
        },
        "3_Title": {
            "type": "object",
            "fields": {
                "title": {
                    "type": "object",
                    "_ui": { "inputType": "textfield" },
                    "_valueConstraints": { "requiredValue": true }
                }
            }
        },
        "4_Publisher": {
            "type": "object",
            "fields": {
                "Publisher": {
                    "type": "object",
                    "_ui": { "inputType": "textfield", "hidden": true },
                    "_valueConstraints": { "requiredValue": true, "defaultValue": "DataHub" }
                }
            }
        },
        "6_Subject": {
            "type": "array",
            "fields": {
                "Subject": {
                    "type": "object",
                    "_ui": { "inputType": "textfield" }
                },
                "subjectSchemeIRI": {
                    "type": "object",
                    "_ui": { "inputType": "textfield", "hidden": true }
                },
                "valueURI": {
                    "type": "object",
                    "_ui": { "inputType": "textfield", "hidden": true },
                    "_valueConstraints": {
                        "ontologies": [
                            {
                                "numTerms": 28815,
                                "acronym": "EFO",
                                "name": "Experimental Factor Ontology",
                                "uri": "https://data.bioontology.org/ontologies/EFO"
                            }
                        ]
                    }
                }
            }
        },
        "7_ContactPerson": {
            "type": "array",
            "fields": {
                "contactType": {
                    "type": "object",
                    "_ui": { "inputType": "textfield", "hidden": true },
                    "_valueConstraints": {
                        "branches": [
                            {
                                "source": "undefined (ZONMW-GENERIC)",
                                "acronym": "ZONMW-GENERIC",
                                "uri": "http://purl.org/zonmw/generic/10075",
                                "name": "contributor type",
                                "maxDepth": 0
                            }
                        ],
                        "defaultValue": {
                            "termUri": "http://purl.org/zonmw/generic/10089",
                            "rdfs:label": "contact person"
                        }
                    }
                },
                "contactFullName": {
                    "type": "object",
                    "_ui": { "inputType": "textfield", "hidden": true },
                    "_valueConstraints": { "requiredValue": true }
                },
                "contactGivenName": {
                    "type": "object",
                    "_ui": { "inputType": "textfield" },
                    "_valueConstraints": { "requiredValue": true }
                },
                "contactFamilyName": {
                    "type": "object",
                    "_ui": { "inputType": "textfield" },
                    "_valueConstraints": { "requiredValue": true }
                },
                "contactEmail": {
                    "type": "object",
                    "_ui": { "inputType": "email" },
                    "_valueConstraints": { "requiredValue": true }
                },
                "contactNameIdentifier": {
                    "type": "object",
                    "_ui": { "inputType": "textfield" }
                },
                "contactNameIdentifierScheme": {
                    "type": "object",
                    "_ui": { "inputType": "textfield" },
                    "_valueConstraints": {
                        "branches": [
                            {
                                "source": "Ontology for Generic Dataset Metadata Template (FDC-GDMT)",
                                "acronym": "FDC-GDMT",
                                "uri": "http://vocab.fairdatacollective.org/gdmt/IdentifierScheme",
                                "name": "Identifier Scheme",
                                "maxDepth": 0
                            }
                        ]
                    }
                },
                "contactAffiliation": {
                    "type": "object",
                    "_ui": { "inputType": "textfield" },
                    "_valueConstraints": {
                        "branches": [
                            {
                                "source": "ZonMw Generic Terms (ZONMW-GENERIC)",
                                "acronym": "ZONMW-GENERIC",
                                "uri": "http://purl.org/zonmw/generic/10027",
                                "name": "institution",
                                "maxDepth": 0
                            }
                        ]
                    }
                }
            }
        },
        "7_Contributor": {
            "type": "array",
            "fields": {
                "contributorType": {
                    "type": "object",
                    "_ui": { "inputType": "textfield" },
                    "_valueConstraints": {
                        "branches": [
                            {
                                "source": "undefined (ZONMW-GENERIC)",
                                "acronym": "ZONMW-GENERIC",
                                "uri": "http://purl.org/zonmw/generic/10075",
                                "name": "contributor type",
                                "maxDepth": 0
                            }
                        ]
                    }
                },
                "contributorFullName": {
                    "type": "object",
                    "_ui": { "inputType": "textfield", "hidden": true },
                    "_valueConstraints": { "requiredValue": true }
                },
                "contributorGivenName": {
                    "type": "object",
                    "_ui": { "inputType": "textfield" },
                    "_valueConstraints": { "requiredValue": true }
                },
                "contributorFamilyName": {
                    "type": "object",
                    "_ui": { "inputType": "textfield" },
                    "_valueConstraints": { "requiredValue": true }
                },
                "contributorEmail": {
                    "type": "object",
                    "_ui": { "inputType": "email" }
                },
                "contributorIdentifier": {
                    "type": "object",
                    "_ui": { "inputType": "textfield" }
                },
                "contributorIdentifierScheme": {
                    "type": "object",
                    "_ui": { "inputType": "textfield" },
                    "_valueConstraints": {
                        "branches": [
                            {
                                "source": "Ontology for Generic Dataset Metadata Template (FDC-GDMT)",
                                "acronym": "FDC-GDMT",
                                "uri": "http://vocab.fairdatacollective.org/gdmt/IdentifierScheme",
                                "name": "Identifier Scheme",
                                "maxDepth": 0
                            }
                        ],
                        "defaultValue": { "termUri": "https://orcid.org/", "rdfs:label": "ORCiD" }
                    }
                },
                "contributorAffiliation": {
                    "type": "object",
                    "_ui": { "inputType": "textfield" },
                    "_valueConstraints": {
                        "branches": [
                            {
                                "source": "ZonMw Generic Terms (ZONMW-GENERIC)",
                                "acronym": "ZONMW-GENERIC",
                                "uri": "http://purl.org/zonmw/generic/10027",
                                "name": "institution",
                                "maxDepth": 0
                            }
                        ]
                    }
                }
            }
        },
        "8_Date": {
            "type": "object",
            "fields": {
                "datasetDate": {
                    "type": "object",
                    "_ui": { "inputType": "temporal" },
                    "_valueConstraints": { "requiredValue": true }
                },
                "datasetDateType": {
                    "type": "object",
                    "_ui": { "inputType": "textfield", "hidden": true },
                    "_valueConstraints": {
                        "requiredValue": true,
                        "defaultValue": {
                            "termUri": "http://vocab.fairdatacollective.org/gdmt/Submitted",
                            "rdfs:label": "Submitted"
                        },
                        "branches": [
                            {
                                "source": "Ontology for Generic Dataset Metadata Template (FDC-GDMT)",
                                "acronym": "FDC-GDMT",
                                "uri": "http://vocab.fairdatacollective.org/gdmt/DateType",
                                "name": "Date Type",
                                "maxDepth": 0
                            }
                        ]
                    }
                }
            }
        },
        "10_ResourceType": {
            "type": "object",
            "fields": {
                "resourceTypeDetail": {
                    "type": "object",
                    "_ui": { "inputType": "textfield", "hidden": true }
                },
                "resourceTypeGeneral": {
                    "type": "object",
                    "_ui": { "inputType": "textfield" },
                    "_valueConstraints": {
                        "branches": [
                            {
                                "source": "undefined (FDC-GDMT)",
                                "acronym": "FDC-GDMT",
                                "uri": "http://vocab.fairdatacollective.org/gdmt/ResourceTypeCategory",
                                "name": "Resource Type Category",
                                "maxDepth": 0
                            }
                        ],
                        "defaultValue": {
                            "termUri": "http://vocab.fairdatacollective.org/gdmt/Collection",
                            "rdfs:label": "Collection"
                        }
                    }
                }
            }
        },
        "12_RelatedIdentifier": {
            "type": "array",
            "fields": {
                "relatedResourceIdentifier": {
                    "type": "object",
                    "_ui": { "inputType": "textfield" }
                },
                "relatedResourceIdentifierType": {
                    "type": "object",
                    "_ui": { "inputType": "textfield" },
                    "_valueConstraints": {
                        "branches": [
                            {
                                "source": "Ontology for Generic Dataset Metadata Template (FDC-GDMT)",
                                "acronym": "FDC-GDMT",
                                "uri": "http://vocab.fairdatacollective.org/gdmt/IdentifierType",
                                "name": "Identifier Type",
                                "maxDepth": 0
                            }
                        ]
                    }
                },
                "relationType": {
                    "type": "object",
                    "_ui": { "inputType": "textfield" },
                    "_valueConstraints": {
                        "branches": [
                            {
                                "source": "Ontology for Generic Dataset Metadata Template (FDC-GDMT)",
                                "acronym": "FDC-GDMT",
                                "uri": "http://vocab.fairdatacollective.org/gdmt/RelationType",
                                "name": "Relation Type",
                                "maxDepth": 0
                            }
                        ]
                    }
                }
            }
        },
        "17_Description": {
            "type": "object",
            "fields": {
                "Description": {
                    "type": "object",
                    "_ui": { "inputType": "textarea" },
                    "_valueConstraints": { "requiredValue": true }
                },
                "descriptionType": {
                    "type": "object",
                    "_ui": { "inputType": "textfield", "hidden": true },
                    "_valueConstraints": { "defaultValue": "Abstract" }
                }
            }
        }
    })
}
