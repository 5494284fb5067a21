//! Conversion of DataHub metadata XML documents into JSON-LD instances.
//!
//! A project collection's `metadata.xml` plus a small bag of catalog facts
//! (PID, creator, dates, project contributors) are turned into a filled
//! CEDAR instance document by mutating an instance template section by
//! section. The XML side is handled by [`xml`], the JSON-LD micro-formats by
//! [`jsonld`], and the section wiring by [`conversion`].

pub mod context;
pub mod conversion;
pub mod jsonld;
pub mod xml;

pub use context::{AffiliationMap, ContributorRecord, ConversionContext, TermRef};
pub use conversion::Conversion;
pub use xml::{ContactRecord, OntologyTerm, XmlError};
