use anyhow::Context;
use dnscover_common::config::Config;
use dnscover_core::{chart, coverage, render};
use tracing::info;

use crate::commands::ChartArgs;
use crate::terminal::print;

pub fn chart(args: &ChartArgs, cfg: &Config) -> anyhow::Result<()> {
    let inventory = args.input.load()?;
    let result = coverage::aggregate(&inventory.properties);
    let distribution = chart::project(result.coverage_percent())?;

    let bitmap = chart::rasterize(&distribution, args.size);
    let png = chart::encode_png(&bitmap)?;
    render::persist(&args.output, &png).context("writing chart")?;

    if cfg.quiet < 2 {
        print::set_key_width(distribution.slices().iter().map(|s| s.label));
        for slice in distribution.slices() {
            print::aligned_line(slice.label, format!("{:.2}%", slice.value));
        }
    }
    info!("Chart written to {} ({}x{} px)", args.output.display(), args.size, args.size);
    Ok(())
}
