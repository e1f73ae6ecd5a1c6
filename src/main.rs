use clap::Parser;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use stuckat::cmd::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    let res = match cli.command {
        Commands::Show(a) => a.run(),
        Commands::Simulate(a) => a.run(),
        Commands::Faults(a) => a.run(),
    };
    if let Err(e) = res {
        log::error!("{e}");
        std::process::exit(1);
    }
}
