//! # Coverage Aggregation
//!
//! Walks the inventory once, classifies every record and produces the
//! [`ReportResult`]: the totals plus the display rows in input order.
//!
//! Rows are first built per property, then flattened. Only the first row
//! of each group carries the property name; the others get a blank label.

use std::fmt;

use dnscover_common::model::{Property, Record};
use serde::{Serialize, Serializer};

/// How a single record relates to the provider's address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// `A` record pointing at a provider address
    Provider,
    /// `A` record pointing elsewhere
    Outside,
    /// Any other record type
    Exempt,
}

impl Coverage {
    pub fn classify(record: &Record) -> Self {
        match (record.is_address(), record.is_provider_ip) {
            (true, true) => Coverage::Provider,
            (true, false) => Coverage::Outside,
            (false, _) => Coverage::Exempt,
        }
    }

    /// Text shown in the last table column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Coverage::Provider => "true",
            Coverage::Outside => "false",
            Coverage::Exempt => "-",
        }
    }
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialized as the table text, so JSON rows match the report.
impl Serialize for Coverage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One line of the record table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRow {
    /// Property name on the first row of a property, empty otherwise
    pub property_label: String,
    pub name: String,
    pub record_type: String,
    pub value: String,
    pub coverage: Coverage,
}

impl RecordRow {
    /// The five table cells, in column order.
    pub fn cells(&self) -> [&str; 5] {
        [
            self.property_label.as_str(),
            self.name.as_str(),
            self.record_type.as_str(),
            self.value.as_str(),
            self.coverage.as_str(),
        ]
    }
}

/// Aggregated statistics plus the flattened table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportResult {
    total: usize,
    uncovered: usize,
    coverage_percent: f64,
    rows: Vec<RecordRow>,
}

impl ReportResult {
    /// Number of records across all properties
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of `A` records not pointing at the provider
    pub fn uncovered(&self) -> usize {
        self.uncovered
    }

    /// Share of records not pointing at the provider, in percent
    pub fn coverage_percent(&self) -> f64 {
        self.coverage_percent
    }

    pub fn rows(&self) -> &[RecordRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// A property with its classified records, before flattening.
struct Group<'a> {
    property: &'a Property,
    entries: Vec<(&'a Record, Coverage)>,
}

/// Computes totals and display rows for `properties`.
pub fn aggregate(properties: &[Property]) -> ReportResult {
    let mut total = 0;
    let mut uncovered = 0;
    let mut groups = Vec::with_capacity(properties.len());

    for property in properties {
        let mut entries = Vec::with_capacity(property.records.len());
        for record in &property.records {
            total += 1;
            let coverage = Coverage::classify(record);
            if coverage == Coverage::Outside {
                uncovered += 1;
            }
            entries.push((record, coverage));
        }
        groups.push(Group { property, entries });
    }

    ReportResult {
        total,
        uncovered,
        coverage_percent: percent_of(uncovered, total),
        rows: flatten(groups),
    }
}

fn flatten(groups: Vec<Group<'_>>) -> Vec<RecordRow> {
    let mut rows = Vec::new();
    for group in groups {
        let mut is_first = true;
        for (record, coverage) in group.entries {
            let property_label = if is_first {
                group.property.name.clone()
            } else {
                String::new()
            };
            is_first = false;
            rows.push(RecordRow {
                property_label,
                name: record.name.clone(),
                record_type: record.record_type.clone(),
                value: record.value.clone(),
                coverage,
            });
        }
    }
    rows
}

/// `part` as a percentage of `total`; zero when `total` is zero.
pub fn percent_of(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / total as f64
}
