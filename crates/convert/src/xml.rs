//! Typed readers over the metadata XML document.
//!
//! All lookups are against *direct children* of the given element; only
//! [`read_tag_list`] descends further. A structurally absent required tag is
//! reported as [`XmlError::TagNotFound`] instead of being papered over,
//! because a metadata.xml without e.g. a `<title>` is a broken ingest.

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use roxmltree::Node;
use thiserror::Error;

/// Errors that can occur while reading or rewriting metadata XML.
#[derive(Debug, Error)]
pub enum XmlError {
    /// A required tag is structurally absent from the document
    #[error("required tag <{tag}> not found")]
    TagNotFound { tag: String },

    /// The document could not be parsed at all
    #[error("malformed XML document: {0}")]
    Malformed(#[from] roxmltree::Error),

    /// A streaming rewrite failed mid-document
    #[error("XML rewrite failed: {0}")]
    Rewrite(#[from] quick_xml::Error),

    /// Writing the rewritten document failed
    #[error("XML rewrite failed: {0}")]
    Io(#[from] std::io::Error),

    /// A rewrite produced a byte sequence that is not UTF-8
    #[error("XML rewrite produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl XmlError {
    fn tag_not_found(tag: impl Into<String>) -> Self {
        Self::TagNotFound { tag: tag.into() }
    }
}

/// An ontology class reference read from a tagged element.
///
/// `id` carries the element's `id` attribute when it looks like a URI,
/// otherwise it stays empty and only the label is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OntologyTerm {
    pub id: String,
    pub label: String,
}

/// One `<contact>` element of the metadata document.
///
/// Every field is optional; a record with no field at all is considered an
/// empty placeholder and dropped by [`read_contacts`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactRecord {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mid_initials: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub affiliation: Option<String>,
    pub role: Option<String>,
}

impl ContactRecord {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.mid_initials.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.affiliation.is_none()
            && self.role.is_none()
    }
}

fn matching_children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |child| child.is_element() && child.has_tag_name(tag))
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Returns the text of the first direct child matching `tag`.
///
/// A present but textless tag yields `Ok("")`; an absent tag is an error.
pub fn read_text(node: Node, tag: &str) -> Result<String, XmlError> {
    let child = matching_children(node, tag)
        .next()
        .ok_or_else(|| XmlError::tag_not_found(tag))?;
    Ok(child.text().unwrap_or_default().trim().to_string())
}

/// Collects the non-empty text of every element in the subtree of every
/// direct child matching `tag`, in document order.
pub fn read_tag_list(node: Node, tag: &str) -> Vec<String> {
    matching_children(node, tag)
        .flat_map(|child| child.descendants().filter(Node::is_element))
        .filter_map(|descendant| non_empty(descendant.text()))
        .collect()
}

/// Collects the non-empty text of the *immediate* element children of every
/// direct child matching `tag` (one level only, not recursive).
pub fn read_tag_node(node: Node, tag: &str) -> Vec<String> {
    matching_children(node, tag)
        .flat_map(|child| child.children().filter(Node::is_element))
        .filter_map(|grandchild| non_empty(grandchild.text()))
        .collect()
}

/// Reads a single ontology-tagged element into an [`OntologyTerm`].
///
/// An absent or textless tag yields an empty term. The `id` attribute is
/// only taken over when it contains `"http"`, i.e. looks like a class URI.
pub fn read_single_ontology_tag(node: Node, tag: &str) -> OntologyTerm {
    let Some(child) = matching_children(node, tag).next() else {
        return OntologyTerm::default();
    };
    let Some(label) = non_empty(child.text()) else {
        return OntologyTerm::default();
    };
    let id = child
        .attribute("id")
        .filter(|id| id.contains("http"))
        .unwrap_or_default()
        .to_string();
    OntologyTerm { id, label }
}

fn child_text(node: Node, tag: &str) -> Option<String> {
    matching_children(node, tag)
        .next()
        .and_then(|child| non_empty(child.text()))
}

/// Parses every `<contact>` child into a [`ContactRecord`], dropping fully
/// empty placeholder records.
pub fn read_contacts(node: Node) -> Vec<ContactRecord> {
    matching_children(node, "contact")
        .map(|contact| ContactRecord {
            first_name: child_text(contact, "firstName"),
            last_name: child_text(contact, "lastName"),
            mid_initials: child_text(contact, "midInitials"),
            email: child_text(contact, "email"),
            phone: child_text(contact, "phone"),
            address: child_text(contact, "address"),
            affiliation: child_text(contact, "affiliation"),
            role: child_text(contact, "role"),
        })
        .filter(|record| !record.is_empty())
        .collect()
}

/// Renames every `<from>` element to `<to>` in a streaming pass, leaving the
/// rest of the document (attributes, text, declaration) untouched.
pub fn rename_tag(input: &str, from: &str, to: &str) -> Result<String, XmlError> {
    let mut reader = Reader::from_str(input);
    let mut writer = Writer::new(Vec::new());

    loop {
        match reader.read_event()? {
            Event::Start(start) if start.name().as_ref() == from.as_bytes() => {
                let mut renamed = BytesStart::new(to);
                renamed.extend_attributes(start.attributes().flatten());
                writer.write_event(Event::Start(renamed))?;
            }
            Event::Empty(start) if start.name().as_ref() == from.as_bytes() => {
                let mut renamed = BytesStart::new(to);
                renamed.extend_attributes(start.attributes().flatten());
                writer.write_event(Event::Empty(renamed))?;
            }
            Event::End(end) if end.name().as_ref() == from.as_bytes() => {
                writer.write_event(Event::End(BytesEnd::new(to)))?;
            }
            Event::Eof => break,
            event => writer.write_event(event)?,
        }
    }

    Ok(String::from_utf8(writer.into_inner())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const METADATA: &str = r#"
        <metadata>
            <title>Cell atlas pilot</title>
            <description></description>
            <date>2022-01-01</date>
            <organism id="http://purl.obolibrary.org/obo/NCBITaxon_9606">Homo sapiens</organism>
            <tissue id="not-a-uri">liver</tissue>
            <technology></technology>
            <factors>
                <factor>age</factor>
                <factor>sex</factor>
                <factor></factor>
            </factors>
            <article>https://doi.org/10.1000/182</article>
            <article>https://doi.org/10.1000/183</article>
            <contact>
                <firstName>Grace</firstName>
                <lastName>Hopper</lastName>
                <email>g.hopper@example.org</email>
                <affiliation>Navy</affiliation>
            </contact>
            <contact>
                <firstName></firstName>
                <lastName></lastName>
            </contact>
        </metadata>"#;

    fn parse() -> roxmltree::Document<'static> {
        roxmltree::Document::parse(METADATA).unwrap()
    }

    #[test]
    fn read_text_returns_trimmed_content() {
        let doc = parse();
        assert_eq!(read_text(doc.root_element(), "title").unwrap(), "Cell atlas pilot");
    }

    #[test]
    fn read_text_empty_tag_is_empty_string() {
        let doc = parse();
        assert_eq!(read_text(doc.root_element(), "description").unwrap(), "");
    }

    #[test]
    fn read_text_missing_tag_is_an_error() {
        let doc = parse();
        let err = read_text(doc.root_element(), "no-such-tag").unwrap_err();
        assert!(matches!(err, XmlError::TagNotFound { tag } if tag == "no-such-tag"));
    }

    #[test]
    fn read_tag_list_collects_subtree_text_in_document_order() {
        let doc = parse();
        assert_eq!(
            read_tag_list(doc.root_element(), "article"),
            vec!["https://doi.org/10.1000/182", "https://doi.org/10.1000/183"]
        );
    }

    #[test]
    fn read_tag_node_collects_one_level_of_children() {
        let doc = parse();
        assert_eq!(read_tag_node(doc.root_element(), "factors"), vec!["age", "sex"]);
    }

    #[test]
    fn ontology_tag_with_uri_attribute() {
        let doc = parse();
        assert_eq!(
            read_single_ontology_tag(doc.root_element(), "organism"),
            OntologyTerm {
                id: "http://purl.obolibrary.org/obo/NCBITaxon_9606".into(),
                label: "Homo sapiens".into(),
            }
        );
    }

    #[test]
    fn ontology_tag_without_uri_keeps_label_only() {
        let doc = parse();
        assert_eq!(
            read_single_ontology_tag(doc.root_element(), "tissue"),
            OntologyTerm { id: String::new(), label: "liver".into() }
        );
    }

    #[test]
    fn ontology_tag_textless_or_absent_is_empty() {
        let doc = parse();
        assert_eq!(
            read_single_ontology_tag(doc.root_element(), "technology"),
            OntologyTerm::default()
        );
        assert_eq!(
            read_single_ontology_tag(doc.root_element(), "no-such-tag"),
            OntologyTerm::default()
        );
    }

    #[test]
    fn read_contacts_drops_empty_records() {
        let doc = parse();
        let contacts = read_contacts(doc.root_element());
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].first_name.as_deref(), Some("Grace"));
        assert_eq!(contacts[0].affiliation.as_deref(), Some("Navy"));
        assert_eq!(contacts[0].phone, None);
    }

    #[test]
    fn rename_tag_rewrites_elements_and_keeps_attributes() {
        let input = r#"<metadata><organ id="x">liver</organ><organ/></metadata>"#;
        let output = rename_tag(input, "organ", "tissue").unwrap();
        assert_eq!(output, r#"<metadata><tissue id="x">liver</tissue><tissue/></metadata>"#);
    }

    #[test]
    fn rename_tag_leaves_other_elements_alone() {
        let input = "<metadata><title>t</title></metadata>";
        assert_eq!(rename_tag(input, "organ", "tissue").unwrap(), input);
    }
}
