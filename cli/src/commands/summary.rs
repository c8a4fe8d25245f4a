use dnscover_common::config::Config;
use dnscover_core::report::{self, columns};
use dnscover_core::{ReportResult, coverage};
use tracing::warn;

use crate::commands::SummaryArgs;
use crate::mprint;
use crate::terminal::{format, print};

const KEY_PERCENT: &str = "Not pointing to provider";
const KEY_TOTAL: &str = "Total records";
const KEY_UNCOVERED: &str = "Uncovered records";

pub fn summary(args: &SummaryArgs, cfg: &Config) -> anyhow::Result<()> {
    let inventory = args.input.load()?;
    let result = coverage::aggregate(&inventory.properties);
    let provider = args.provider.provider.as_str();

    if result.is_empty() {
        print::no_results();
        warn!("No records found in {}", args.input.file.display());
    } else if cfg.quiet < 2 {
        let table = format::records_table(&columns(provider), result.rows());
        print::block(&table);
        mprint!();
    }
    print_statistics(&result, provider, cfg);
    Ok(())
}

/// Prints the computed result as pretty JSON on stdout.
pub fn json(args: &SummaryArgs) -> anyhow::Result<()> {
    let inventory = args.input.load()?;
    let result = coverage::aggregate(&inventory.properties);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// The three headline numbers, as aligned key/value lines.
pub fn print_statistics(result: &ReportResult, provider: &str, cfg: &Config) {
    if cfg.quiet > 0 {
        for line in report::summary_lines(provider, result) {
            print::print_status(line);
        }
        return;
    }

    print::header("statistics", cfg.quiet);
    print::set_key_width([KEY_PERCENT, KEY_TOTAL, KEY_UNCOVERED]);
    print::aligned_line(KEY_PERCENT, format::percent(result.coverage_percent()));
    print::aligned_line(KEY_TOTAL, format::count(result.total()));
    print::aligned_line(KEY_UNCOVERED, format::count(result.uncovered()));
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;
    use crate::commands::{InputArgs, ProviderArgs};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn empty_inventory_still_prints_statistics() {
        colored::control::set_override(false);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"properties: []\n").unwrap();

        let args = SummaryArgs {
            input: InputArgs { file: file.path().to_path_buf() },
            provider: ProviderArgs { provider: "Akamai".into() },
            json: false,
        };
        let cfg = Config { quiet: 1, no_banner: true };
        let logs = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || summary(&args, &cfg)).unwrap();

        let out = logs.text();
        assert!(out.contains("No records found"));
        assert!(out.contains("Percentage of domains not pointing to Akamai: 0.00%"));
        assert!(out.contains("Total number of domains in Akamai: 0"));
        assert!(out.contains("Number of domains not pointing to Akamai: 0"));
    }
}
