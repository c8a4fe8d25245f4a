mod commands;
mod terminal;

use commands::{CommandLine, Commands, chart, generate, summary};
use dnscover_common::config::Config;
use terminal::{logging, print};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose);

    let cfg = Config {
        quiet: commands.quiet,
        no_banner: commands.no_banner,
    };

    match commands.command {
        Commands::Generate(args) => {
            print::banner(cfg.no_banner, cfg.quiet);
            print::header("generating report", cfg.quiet);
            generate::generate(&args, &cfg)?;
        }
        Commands::Summary(args) if args.json => summary::json(&args)?,
        Commands::Summary(args) => {
            print::banner(cfg.no_banner, cfg.quiet);
            print::header("coverage summary", cfg.quiet);
            summary::summary(&args, &cfg)?;
        }
        Commands::Chart(args) => {
            print::banner(cfg.no_banner, cfg.quiet);
            print::header("rendering chart", cfg.quiet);
            chart::chart(&args, &cfg)?;
        }
    }

    Ok(())
}
