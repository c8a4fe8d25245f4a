#![cfg(test)]
use dnscover_common::config::{Company, ReportConfig};
use dnscover_core::{Error, chart, coverage, input, render, report};
use pretty_assertions::assert_eq;

use crate::fixtures::{self, MIXED};

fn config() -> ReportConfig {
    ReportConfig::new(
        Company {
            name: "Example Corp".into(),
            phone: "+1 555 0100".into(),
            website: "example.com".into(),
            logo: None,
        },
        "Akamai",
    )
}

/// Runs the whole pipeline the way the `generate` command does.
fn generate(yaml: &std::path::Path, pdf: &std::path::Path) -> anyhow::Result<coverage::ReportResult> {
    let inventory = input::load_inventory(yaml)?;
    let result = coverage::aggregate(&inventory.properties);
    let distribution = chart::project(result.coverage_percent())?;
    let cfg = config();
    let document = report::compose(&cfg, &result, distribution);
    render::write_pdf(&document, pdf)?;
    Ok(result)
}

#[test]
fn mixed_inventory_end_to_end() {
    let yaml = fixtures::yaml_file(MIXED);
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("report.pdf");

    let result = generate(yaml.path(), &pdf).unwrap();

    assert_eq!(result.total(), 4);
    assert_eq!(result.uncovered(), 2);
    assert_eq!(result.coverage_percent(), 50.0);

    let rows: Vec<[&str; 5]> = result.rows().iter().map(|r| r.cells()).collect();
    assert_eq!(
        rows,
        vec![
            ["shop", "www.shop.example", "A", "23.1.2.3", "true"],
            ["", "api.shop.example", "A", "203.0.113.7", "false"],
            ["", "static.shop.example", "CNAME", "shop.edgesuite.example", "-"],
            ["blog", "blog.example", "A", "198.51.100.4", "false"],
        ]
    );

    let bytes = fixtures::read(&pdf);
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn row_count_matches_record_count() {
    let inventory = input::parse_inventory(MIXED).unwrap();
    let result = coverage::aggregate(&inventory.properties);
    assert_eq!(result.rows().len(), result.total());
    assert_eq!(result.total(), inventory.record_count());
    assert!(result.uncovered() <= result.total());
    assert!((0.0..=100.0).contains(&result.coverage_percent()));
}

#[test]
fn empty_inventory_still_produces_a_report() {
    let yaml = fixtures::yaml_file("properties: []\n");
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("empty.pdf");

    let result = generate(yaml.path(), &pdf).unwrap();

    assert_eq!(result.total(), 0);
    assert_eq!(result.coverage_percent(), 0.0);
    assert!(result.rows().is_empty());
    assert!(pdf.is_file());
}

#[test]
fn malformed_input_produces_no_output() {
    let yaml = fixtures::yaml_file("properties:\n  - property_name: [broken\n");
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("never.pdf");

    let err = generate(yaml.path(), &pdf).unwrap_err();

    let err = err.downcast::<Error>().unwrap();
    assert!(matches!(err, Error::InputMalformed { .. }));
    assert!(!pdf.exists());
}

#[test]
fn missing_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = generate(&dir.path().join("nope.yaml"), &dir.path().join("out.pdf")).unwrap_err();
    let err = err.downcast::<Error>().unwrap();
    assert!(matches!(err, Error::InputNotFound { .. }));
    assert!(err.to_string().contains("nope.yaml"));
}

#[test]
fn unwritable_output_is_reported() {
    let yaml = fixtures::yaml_file(MIXED);
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("no_such_dir").join("report.pdf");

    let err = generate(yaml.path(), &pdf).unwrap_err();
    let err = err.downcast::<Error>().unwrap();
    assert!(matches!(err, Error::OutputWriteFailed { .. }));
}

#[test]
fn chart_png_round_trips_through_disk() {
    let inventory = input::parse_inventory(MIXED).unwrap();
    let result = coverage::aggregate(&inventory.properties);
    let distribution = chart::project(result.coverage_percent()).unwrap();
    let png = chart::encode_png(&chart::rasterize(&distribution, 64)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.png");
    render::persist(&path, &png).unwrap();
    assert_eq!(fixtures::read(&path), png);
}
