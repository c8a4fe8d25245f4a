use std::time::Instant;

use anyhow::Context;
use colored::*;
use dnscover_common::config::Config;
use dnscover_core::{chart, coverage, render, report};
use tracing::{info, info_span};

use crate::commands::GenerateArgs;
use crate::commands::summary;
use crate::terminal::{colors, print};

pub fn generate(args: &GenerateArgs, cfg: &Config) -> anyhow::Result<()> {
    let start_time: Instant = Instant::now();
    let span = info_span!("generate", output = %args.output.display());
    let _guard = span.enter();

    let inventory = args.input.load()?;
    let result = coverage::aggregate(&inventory.properties);
    let distribution = chart::project(result.coverage_percent())?;

    let report_cfg = args.report_config();
    let document = report::compose(&report_cfg, &result, distribution);
    render::write_pdf(&document, &args.output).context("writing report")?;

    summary::print_statistics(&result, &report_cfg.provider, cfg);

    let elapsed: ColoredString = format!("{:.2}s", start_time.elapsed().as_secs_f64())
        .bold()
        .yellow();
    let output: ColoredString = args.output.display().to_string().color(colors::PRIMARY);
    let message: String = format!("Report written to {output} in {elapsed}");

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&message);
        }
        _ => info!("{}", message),
    }
    Ok(())
}
