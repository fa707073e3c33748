//! Field rules for AWB generation.
//!
//! The table is plain data: field name to [`FieldRule`], in declaration
//! order. The validator walks it; nothing here has behavior of its own.

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::models::{Payer, ServiceType};

/// Service type field, checked before every other rule.
pub const SERVICE_TYPE_FIELD: &str = "tip_serviciu";

/// Constraints on one input field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRule {
    /// Field must be present and non-empty.
    pub required: bool,
    /// When set, a present value must be one of these.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
}

impl FieldRule {
    pub fn required() -> Self {
        Self {
            required: true,
            allowed_values: None,
        }
    }

    pub fn optional() -> Self {
        Self {
            required: false,
            allowed_values: None,
        }
    }

    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn allows(&self, value: &str) -> bool {
        self.allowed_values
            .as_ref()
            .map_or(true, |allowed| allowed.iter().any(|v| v == value))
    }
}

/// Ordered field name to rule table.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct FieldRules(Vec<(&'static str, FieldRule)>);

impl FieldRules {
    pub fn get(&self, field: &str) -> Option<&FieldRule> {
        self.0.iter().find(|(name, _)| *name == field).map(|(_, rule)| rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldRule)> {
        self.0.iter().map(|(name, rule)| (*name, rule))
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.iter().filter(|(_, rule)| rule.required).map(|(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Labels of the service types accepted by AWB generation.
pub fn allowed_service_labels() -> Vec<String> {
    ServiceType::for_awb_generation()
        .map(|s| s.label().to_string())
        .collect()
}

/// Rules for the AWB generation endpoint.
pub static AWB_FIELD_RULES: Lazy<FieldRules> = Lazy::new(|| {
    let optional = [
        "banca",
        "iban",
        "ramburs",
        "valoare_declarata",
        "persoana_contact_expeditor",
        "observatii",
        "continut",
        "nume_destinatar",
        "persoana_contact",
        "telefon",
        "fax",
        "email",
        "judet",
        "localitate",
        "strada",
        "nr",
        "cod_postal",
        "bl",
        "scara",
        "etaj",
        "apartament",
        "inaltime_pachet",
        "latime_pachet",
        "lungime_pachet",
        "restituire",
        "centru_cost",
        "optiuni",
        "packing",
        "date_personale",
    ];

    let mut rules = vec![
        (
            SERVICE_TYPE_FIELD,
            FieldRule::required().one_of(allowed_service_labels()),
        ),
        ("nr_plicuri", FieldRule::required()),
        ("nr_colete", FieldRule::required()),
        ("greutate", FieldRule::required()),
        ("plata_expeditie", FieldRule::required()),
        (
            "plata_ramburs_la",
            FieldRule::required().one_of([Payer::Recipient.label(), Payer::Sender.label()]),
        ),
    ];
    rules.extend(optional.into_iter().map(|name| (name, FieldRule::optional())));

    FieldRules(rules)
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_type_rule_excludes_export() {
        let rule = AWB_FIELD_RULES.get(SERVICE_TYPE_FIELD).unwrap();
        assert!(rule.required);
        assert!(rule.allows("Standard"));
        assert!(!rule.allows("Export"));
    }

    #[test]
    fn test_required_fields() {
        let required: Vec<_> = AWB_FIELD_RULES.required_fields().collect();
        assert_eq!(
            required,
            vec![
                "tip_serviciu",
                "nr_plicuri",
                "nr_colete",
                "greutate",
                "plata_expeditie",
                "plata_ramburs_la"
            ]
        );
    }

    #[test]
    fn test_optional_field_without_constraint() {
        let rule = AWB_FIELD_RULES.get("observatii").unwrap();
        assert!(!rule.required);
        assert!(rule.allows("anything"));
        assert!(AWB_FIELD_RULES.get("unknown_field").is_none());
        assert_eq!(AWB_FIELD_RULES.len(), 35);
    }
}
