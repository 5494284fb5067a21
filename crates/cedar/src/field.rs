//! Field kinds a CEDAR template node can declare through `_ui.inputType`.

/// The closed set of CEDAR input types.
///
/// The last three exist in templates produced by the CEDAR workbench but are
/// not rendered by the metadata repository, so declaring them is a
/// validation error rather than a crash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CedarFieldKind {
    TextField,
    Temporal,
    Email,
    Numeric,
    Link,
    TextArea,
    Radio,
    Checkbox,
    PageBreak,
    SectionBreak,
    // Not supported (yet)
    List,
    PhoneNumber,
    AttributeValue,
}

impl CedarFieldKind {
    /// Maps an `inputType` string onto a kind; `None` for unknown strings.
    pub fn from_input_type(input_type: &str) -> Option<Self> {
        match input_type {
            "textfield" => Some(Self::TextField),
            "temporal" => Some(Self::Temporal),
            "email" => Some(Self::Email),
            "numeric" => Some(Self::Numeric),
            "link" => Some(Self::Link),
            "textarea" => Some(Self::TextArea),
            "radio" => Some(Self::Radio),
            "checkbox" => Some(Self::Checkbox),
            "page-break" => Some(Self::PageBreak),
            "section-break" => Some(Self::SectionBreak),
            "list" => Some(Self::List),
            "phone-number" => Some(Self::PhoneNumber),
            "attribute-value" => Some(Self::AttributeValue),
            _ => None,
        }
    }

    /// Whether the metadata repository can render this kind at all.
    pub fn is_supported(self) -> bool {
        !matches!(self, Self::List | Self::PhoneNumber | Self::AttributeValue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_input_types_parse() {
        assert_eq!(CedarFieldKind::from_input_type("textfield"), Some(CedarFieldKind::TextField));
        assert_eq!(CedarFieldKind::from_input_type("page-break"), Some(CedarFieldKind::PageBreak));
        assert_eq!(CedarFieldKind::from_input_type("attribute-value"), Some(CedarFieldKind::AttributeValue));
    }

    #[test]
    fn unknown_input_type_is_none() {
        assert_eq!(CedarFieldKind::from_input_type("hologram"), None);
    }

    #[test]
    fn reserved_kinds_are_unsupported() {
        assert!(CedarFieldKind::TextField.is_supported());
        assert!(!CedarFieldKind::List.is_supported());
        assert!(!CedarFieldKind::PhoneNumber.is_supported());
        assert!(!CedarFieldKind::AttributeValue.is_supported());
    }
}
