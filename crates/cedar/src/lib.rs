//! CEDAR schema handling for the DataHub metadata repository.
//!
//! A CEDAR template is a JSON-Schema-flavored document describing a metadata
//! form: fields with UI hints (`_ui`), value constraints
//! (`_valueConstraints`), and repeatable groups of sub-fields (formsets).
//! This crate classifies template nodes, walks a whole document, and checks
//! it against both the structural rules of the rendering application and the
//! DataHub general schema every customized template must agree with.

pub mod classify;
pub mod field;
pub mod general;
pub mod report;
pub mod validator;

pub use classify::{classify, NodeKind};
pub use field::CedarFieldKind;
pub use report::{Finding, Severity, ValidationRun};
pub use validator::{validate_general_fields, validate_structure, SchemaError};
