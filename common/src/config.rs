use std::path::PathBuf;

/// Provider named in the report when none is given.
pub const DEFAULT_PROVIDER: &str = "Akamai";

#[derive(Debug, Default)]
pub struct Config {
    /// Suppresses banner and section headers when greater than zero.
    ///
    /// At level 2 only warnings, errors and the final result are printed.
    pub quiet: u8,
    pub no_banner: bool,
}

/// Contact details printed in the header and footer bands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Company {
    pub name: String,
    pub phone: String,
    pub website: String,
    pub logo: Option<PathBuf>,
}

impl Company {
    /// Link encoded in the footer QR code.
    pub fn site_url(&self) -> String {
        let site = self.website.trim();
        if site.starts_with("http://") || site.starts_with("https://") {
            site.to_string()
        } else {
            format!("https://{site}")
        }
    }
}

/// Everything the composer needs besides the computed numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub company: Company,
    /// Name of the CDN whose address space is being measured.
    pub provider: String,
}

impl ReportConfig {
    pub fn new(company: Company, provider: impl Into<String>) -> Self {
        Self {
            company,
            provider: provider.into(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::new(Company::default(), DEFAULT_PROVIDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_url_adds_scheme() {
        let company = Company {
            website: "example.com".into(),
            ..Default::default()
        };
        assert_eq!(company.site_url(), "https://example.com");
    }

    #[test]
    fn site_url_keeps_existing_scheme() {
        let company = Company {
            website: "http://example.com".into(),
            ..Default::default()
        };
        assert_eq!(company.site_url(), "http://example.com");
    }
}
