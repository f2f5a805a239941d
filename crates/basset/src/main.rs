use std::process::ExitCode;

use basset::cli::Cli;
use basset::runtime::{boot, run};
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();
    boot::init_logging(cli.debug);

    match run::run(&cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("error: {}", e);
            eprintln!("error: {e}\n\nFor more information, try '--help'.");
            ExitCode::from(1)
        }
    }
}
