//! # Inventory Model
//!
//! The hierarchy read from the input file: an [`Inventory`] holds
//! [`Property`] groups, each holding the DNS [`Record`]s that belong to it.
//!
//! Field names on the wire follow the long-standing YAML layout:
//!
//! ```yaml
//! properties:
//!   - property_name: shop
//!     property_records:
//!       - record_name: www.shop.example
//!         record_type: A
//!         record_value: 23.1.2.3
//!         record_value_is_provider_ip: true
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Record type code that takes part in coverage classification.
pub const ADDRESS_RECORD: &str = "A";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("property #{index} has an empty name")]
    BlankPropertyName { index: usize },
}

/// Top level of the input document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub properties: Vec<Property>,
}

impl Inventory {
    pub fn new(properties: Vec<Property>) -> Self {
        Self { properties }
    }

    /// Number of records across every property.
    pub fn record_count(&self) -> usize {
        self.properties.iter().map(|p| p.records.len()).sum()
    }

    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ModelError> {
        match self
            .properties
            .iter()
            .position(|p| p.name.trim().is_empty())
        {
            Some(index) => Err(ModelError::BlankPropertyName { index }),
            None => Ok(()),
        }
    }
}

/// A named group of records, e.g. one delivery configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "property_name")]
    pub name: String,
    #[serde(rename = "property_records", default)]
    pub records: Vec<Record>,
}

impl Property {
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }
}

/// A single DNS entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "record_name")]
    pub name: String,
    #[serde(rename = "record_type")]
    pub record_type: String,
    #[serde(rename = "record_value")]
    pub value: String,
    /// Whether the value is an address owned by the provider.
    ///
    /// Only meaningful for `A` records.
    #[serde(
        rename = "record_value_is_provider_ip",
        alias = "record_value_is_akamai_ip",
        default
    )]
    pub is_provider_ip: bool,
}

impl Record {
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        value: impl Into<String>,
        is_provider_ip: bool,
    ) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            value: value.into(),
            is_provider_ip,
        }
    }

    /// `true` when this record takes part in coverage classification.
    pub fn is_address(&self) -> bool {
        self.record_type == ADDRESS_RECORD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_count_sums_every_property() {
        let inventory = Inventory::new(vec![
            Property::new("a", vec![Record::new("x", "A", "1.1.1.1", true)]),
            Property::new("b", vec![]),
            Property::new(
                "c",
                vec![
                    Record::new("y", "CNAME", "x", false),
                    Record::new("z", "TXT", "v=spf1", false),
                ],
            ),
        ]);
        assert_eq!(inventory.record_count(), 3);
    }

    #[test]
    fn only_literal_a_is_an_address_record() {
        assert!(Record::new("x", "A", "1.1.1.1", false).is_address());
        assert!(!Record::new("x", "a", "1.1.1.1", false).is_address());
        assert!(!Record::new("x", "AAAA", "::1", false).is_address());
    }

    #[test]
    fn blank_property_name_is_rejected() {
        let inventory = Inventory::new(vec![
            Property::new("ok", vec![]),
            Property::new("  ", vec![]),
        ]);
        assert_eq!(
            inventory.validate(),
            Err(ModelError::BlankPropertyName { index: 1 })
        );
    }

    #[test]
    fn empty_inventory_is_valid() {
        assert!(Inventory::default().validate().is_ok());
    }
}
