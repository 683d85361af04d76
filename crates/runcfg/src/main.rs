//! runcfg binary

use clap::Parser;
use runcfg::cli::{Cli, USAGE};
use runcfg::{run, WriteMode};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = runcfg::logging::init(&cli.log_level) {
        eprintln!("error: {e:#}");
        std::process::exit(2);
    }

    let mode = cli.write_mode();
    match run(&cli.layout(), &cli.invocation(), mode) {
        Ok(outcome) => {
            if mode == WriteMode::DryRun {
                print!("{}", outcome.document);
            }
        }
        Err(e) => {
            let category = e.category();
            eprintln!("{category}: {e}");
            if category.is_user_input() {
                eprintln!();
                eprintln!("{USAGE}");
            }
            std::process::exit(category.exit_code());
        }
    }
}
