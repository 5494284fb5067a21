//! The section-by-section conversion of a metadata document into a filled
//! instance.
//!
//! The template is a trusted, schema-matched fixture: a section whose target
//! key is missing is a logged no-op, and lookup misses degrade softly so a
//! best-effort document always comes out. Only structurally absent required
//! XML tags abort the run.

use roxmltree::Node;
use serde_json::{json, Value};
use tracing::{debug, warn};

use datahub_document::merge_at_key;

use crate::context::{AffiliationMap, ConversionContext, PROJECT_MANAGER_ROLE};
use crate::jsonld;
use crate::xml::{self, XmlError};

/// Base of the user-profile URIs stamped into the provenance fields.
const USER_PROFILE_BASE: &str = "https://mdr.datahubmaastricht.nl/users";

/// Drives one conversion run over a single collection.
pub struct Conversion<'a, 'input> {
    xml: Node<'a, 'input>,
    context: &'a ConversionContext,
    affiliations: &'a AffiliationMap,
}

impl<'a, 'input> Conversion<'a, 'input> {
    pub fn new(
        xml: Node<'a, 'input>,
        context: &'a ConversionContext,
        affiliations: &'a AffiliationMap,
    ) -> Self {
        Self { xml, context, affiliations }
    }

    /// Fills the instance template in place. The section order is fixed but
    /// the sections are independent of one another.
    pub fn fill(&self, template: &mut Value) -> Result<(), XmlError> {
        self.add_identifier(template);
        self.add_creator(template);
        self.add_title(template)?;
        // 4_Publisher and 10_ResourceType keep their template defaults.
        self.add_subject(template);
        self.add_contributor(template);
        self.add_contact(template);
        self.add_date(template);
        self.add_related_identifier(template);
        self.add_description(template)?;
        self.add_extended_date(template)?;
        self.add_extended_experiment(template);
        self.add_provenance(template);
        Ok(())
    }

    fn add_identifier(&self, template: &mut Value) {
        merge_at_key(
            template,
            "datasetIdentifier",
            &json!({ "@value": self.context.version_pid }),
        );
    }

    fn add_creator(&self, template: &mut Value) {
        let creator = jsonld::creator_values(
            &self.context.creator_given_name,
            &self.context.creator_family_name,
        );
        merge_at_key(template, "2_Creator", &creator);
    }

    fn add_title(&self, template: &mut Value) -> Result<(), XmlError> {
        let title = xml::read_text(self.xml, "title")?;
        merge_at_key(template, "title", &json!({ "@value": title }));
        Ok(())
    }

    fn add_subject(&self, template: &mut Value) {
        let factors = xml::read_tag_node(self.xml, "factors");
        if factors.is_empty() {
            debug!("no keyword factors in metadata, leaving subject untouched");
            return;
        }
        merge_at_key(template, "Factors", &jsonld::keyword_values(&factors));
    }

    fn add_contributor(&self, template: &mut Value) {
        if self.context.contributors.is_empty() {
            debug!("no contributors supplied, leaving contributor section untouched");
            return;
        }
        let blocks: Vec<Value> = self
            .context
            .contributors
            .values()
            .map(jsonld::contributor_value)
            .collect();
        merge_at_key(template, "7_Contributor", &Value::Array(blocks));
    }

    fn add_contact(&self, template: &mut Value) {
        let contacts = xml::read_contacts(self.xml);
        if !contacts.is_empty() {
            let blocks: Vec<Value> = contacts
                .iter()
                .map(|contact| jsonld::contact_value(contact, self.affiliations))
                .collect();
            merge_at_key(template, "7_ContactPerson", &Value::Array(blocks));
        } else if let Some(manager) = self.context.project_manager() {
            let fallback = jsonld::contact_from_contributor(manager);
            merge_at_key(template, "7_ContactPerson", &json!([fallback]));
        } else {
            warn!(
                role = PROJECT_MANAGER_ROLE,
                "no contacts in metadata and no fallback contributor, leaving contact person untouched"
            );
        }
    }

    fn add_date(&self, template: &mut Value) {
        merge_at_key(
            template,
            "Date",
            &json!({ "@value": self.context.submission_date }),
        );
    }

    fn add_related_identifier(&self, template: &mut Value) {
        let articles = xml::read_tag_list(self.xml, "article");
        if articles.is_empty() {
            debug!("no articles in metadata, leaving related identifiers untouched");
            return;
        }
        merge_at_key(
            template,
            "12_RelatedIdentifier",
            &jsonld::publication_values(&articles),
        );
    }

    fn add_description(&self, template: &mut Value) -> Result<(), XmlError> {
        let description = xml::read_text(self.xml, "description")?;
        merge_at_key(template, "Description", &json!({ "@value": description }));
        Ok(())
    }

    fn add_extended_date(&self, template: &mut Value) -> Result<(), XmlError> {
        let date = xml::read_text(self.xml, "date")?;
        merge_at_key(template, "datasetDate", &jsonld::date_value(&date));
        Ok(())
    }

    fn add_extended_experiment(&self, template: &mut Value) {
        let organism = xml::read_single_ontology_tag(self.xml, "organism");
        merge_at_key(template, "organism", &jsonld::ontology_value(&organism));

        let tissue = xml::read_single_ontology_tag(self.xml, "tissue");
        merge_at_key(template, "tissue", &jsonld::ontology_value(&tissue));

        let technology = xml::read_single_ontology_tag(self.xml, "technology");
        merge_at_key(template, "technique", &jsonld::ontology_value(&technology));
    }

    fn add_provenance(&self, template: &mut Value) {
        let Value::Object(map) = template else {
            warn!("instance template root is not an object, skipping provenance stamps");
            return;
        };
        let profile = format!("{}/{}", USER_PROFILE_BASE, self.context.creator_username);
        map.insert("pav:createdOn".to_string(), json!(self.context.ctime));
        map.insert("pav:createdBy".to_string(), json!(profile));
        map.insert("pav:lastUpdatedOn".to_string(), json!(self.context.ctime));
        map.insert("oslc:modifiedBy".to_string(), json!(profile));
    }
}
