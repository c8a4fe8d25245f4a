//! # Report Composition
//!
//! Arranges pre-computed values into the bands of the output document.
//! Nothing is calculated here beyond formatting; the renderer decides how
//! each band is drawn.

use std::path::PathBuf;

use dnscover_common::config::ReportConfig;

use crate::chart::ChartDistribution;
use crate::coverage::{RecordRow, ReportResult};

/// Relative widths (out of 12) of the five table columns.
pub const COLUMN_GRID: [u8; 5] = [3, 3, 1, 4, 1];

pub const TABLE_HEADING: &str = "Properties";

/// Column titles, in the fixed order the rows are laid out in.
pub fn columns(provider: &str) -> [String; 5] {
    [
        "Property Name".to_string(),
        "Domain".to_string(),
        "DNS Record Type".to_string(),
        "DNS Record Value".to_string(),
        format!("Resolves to {provider} IP?"),
    ]
}

/// Logo and contact details, repeated on every page.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderBand {
    pub logo: Option<PathBuf>,
    pub company_name: String,
    pub phone_line: String,
    pub website: String,
}

/// Pie chart next to the three headline numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryBand {
    pub chart: ChartDistribution,
    pub lines: [String; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableBand<'a> {
    pub heading: &'static str,
    pub columns: [String; 5],
    pub grid: [u8; 5],
    pub rows: &'a [RecordRow],
}

/// QR code of the company site and the site text, repeated on every page.
#[derive(Debug, Clone, PartialEq)]
pub struct FooterBand {
    /// `None` when no website was configured
    pub qr_payload: Option<String>,
    pub text: String,
}

/// Everything the renderer draws, in reading order.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<'a> {
    pub header: HeaderBand,
    pub title: String,
    pub summary: SummaryBand,
    pub table: TableBand<'a>,
    pub footer: FooterBand,
}

/// Builds the document description for one report.
pub fn compose<'a>(
    config: &ReportConfig,
    result: &'a ReportResult,
    chart: ChartDistribution,
) -> Document<'a> {
    let company = &config.company;
    let provider = config.provider.as_str();

    let has_site = !company.website.trim().is_empty();

    Document {
        header: HeaderBand {
            logo: company.logo.clone(),
            company_name: company.name.clone(),
            phone_line: format!("Tel: {}", company.phone),
            website: company.website.clone(),
        },
        title: format!("{provider} Domain Coverage Report"),
        summary: SummaryBand {
            chart,
            lines: summary_lines(provider, result),
        },
        table: TableBand {
            heading: TABLE_HEADING,
            columns: columns(provider),
            grid: COLUMN_GRID,
            rows: result.rows(),
        },
        footer: FooterBand {
            qr_payload: has_site.then(|| company.site_url()),
            text: company.website.clone(),
        },
    }
}

/// The three headline lines shown beside the chart.
pub fn summary_lines(provider: &str, result: &ReportResult) -> [String; 3] {
    [
        format!(
            "Percentage of domains not pointing to {provider}: {:.2}%",
            result.coverage_percent()
        ),
        format!("Total number of domains in {provider}: {}", result.total()),
        format!(
            "Number of domains not pointing to {provider}: {}",
            result.uncovered()
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::project;
    use crate::coverage::aggregate;
    use dnscover_common::config::Company;
    use dnscover_common::model::{Property, Record};
    use pretty_assertions::assert_eq;

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

    fn result() -> ReportResult {
        aggregate(&[Property::new(
            "web",
            vec![
                Record::new("www.example.com", "A", "1.2.3.4", true),
                Record::new("api.example.com", "A", "5.6.7.8", false),
                Record::new("cdn.example.com", "CNAME", "edge.example.net", false),
            ],
        )])
    }

    #[test]
    fn column_order_is_fixed() {
        assert_eq!(
            columns("Akamai"),
            [
                "Property Name",
                "Domain",
                "DNS Record Type",
                "DNS Record Value",
                "Resolves to Akamai IP?",
            ]
        );
    }

    #[test]
    fn summary_lines_use_two_decimals() {
        let lines = summary_lines("Akamai", &result());
        assert_eq!(
            lines,
            [
                "Percentage of domains not pointing to Akamai: 33.33%",
                "Total number of domains in Akamai: 3",
                "Number of domains not pointing to Akamai: 1",
            ]
        );
    }

    #[test]
    fn compose_passes_values_through() {
        let result = result();
        let chart = project(result.coverage_percent()).unwrap();
        let document = compose(&config(), &result, chart);

        assert_eq!(document.title, "Akamai Domain Coverage Report");
        assert_eq!(document.header.phone_line, "Tel: +1 555 0100");
        assert_eq!(document.table.rows.len(), 3);
        assert_eq!(document.table.rows, result.rows());
        assert_eq!(document.table.grid, COLUMN_GRID);
        assert_eq!(document.summary.chart, chart);
        assert_eq!(document.footer.qr_payload.as_deref(), Some("https://example.com"));
        assert_eq!(document.footer.text, "example.com");
    }

    #[test]
    fn compose_without_site_has_no_qr() {
        let mut config = config();
        config.company.website.clear();
        let result = aggregate(&[]);
        let document = compose(&config, &result, project(0.0).unwrap());
        assert!(document.footer.qr_payload.is_none());
        assert!(document.table.rows.is_empty());
    }

    #[test]
    fn provider_name_flows_everywhere() {
        let mut config = config();
        config.provider = "Fastly".into();
        let result = result();
        let document = compose(&config, &result, project(0.0).unwrap());
        assert_eq!(document.title, "Fastly Domain Coverage Report");
        assert_eq!(document.table.columns[4], "Resolves to Fastly IP?");
        assert!(document.summary.lines.iter().all(|l| l.contains("Fastly")));
    }
}
