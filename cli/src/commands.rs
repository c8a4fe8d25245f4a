pub mod chart;
pub mod generate;
pub mod summary;

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use dnscover_common::config::{Company, DEFAULT_PROVIDER, ReportConfig};
use dnscover_common::model::Inventory;
use dnscover_core::input;

#[derive(Parser)]
#[command(name = "dnscover")]
#[command(about = "DNS coverage reports for CDN properties.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Print less; repeat to print only the result
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Print more diagnostics; repeat for trace output
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the PDF coverage report
    #[command(alias = "g")]
    Generate(GenerateArgs),
    /// Print coverage statistics and the record table
    #[command(alias = "s")]
    Summary(SummaryArgs),
    /// Render only the coverage pie chart as PNG
    #[command(alias = "c")]
    Chart(ChartArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// YAML file describing the properties and their records
    #[arg(short = 'f', long = "file", value_name = "YAML")]
    pub file: PathBuf,
}

impl InputArgs {
    pub fn load(&self) -> anyhow::Result<Inventory> {
        input::load_inventory(&self.file).context("loading inventory")
    }
}

#[derive(Args)]
pub struct ProviderArgs {
    /// CDN whose address space is measured
    #[arg(short, long, default_value = DEFAULT_PROVIDER)]
    pub provider: String,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// PDF file to write
    #[arg(short, long, value_name = "PDF")]
    pub output: PathBuf,

    /// Company name shown in the header
    #[arg(short, long, default_value = "")]
    pub company: String,

    /// Company phone shown in the header
    #[arg(short = 't', long, default_value = "")]
    pub phone: String,

    /// Company web site, shown in the header and encoded in the footer QR code
    #[arg(short = 's', long, default_value = "")]
    pub site: String,

    /// Company logo (PNG or JPEG)
    #[arg(short, long, value_name = "IMAGE")]
    pub logo: Option<PathBuf>,

    #[command(flatten)]
    pub provider: ProviderArgs,
}

impl GenerateArgs {
    pub fn report_config(&self) -> ReportConfig {
        let company = Company {
            name: self.company.clone(),
            phone: self.phone.clone(),
            website: self.site.clone(),
            logo: self.logo.clone(),
        };
        ReportConfig::new(company, self.provider.provider.clone())
    }
}

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub provider: ProviderArgs,

    /// Print the computed result as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ChartArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// PNG file to write
    #[arg(short, long, value_name = "PNG")]
    pub output: PathBuf,

    /// Edge length of the chart in pixels
    #[arg(long, default_value_t = dnscover_core::chart::DEFAULT_SIZE,
          value_parser = clap::value_parser!(u32).range(16..=4096))]
    pub size: u32,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
