//! Command line interface

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::io::{read_network_file, write_fault_report, write_truth_table};
use crate::sim::{
    simulate_faults, DetectionPolicy, FaultSimConfig, SimpleSimulator, DEFAULT_MAX_INPUTS,
};

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Increase the verbosity of the log messages
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Command line arguments
#[derive(Subcommand)]
pub enum Commands {
    /// Show statistics about a logic network
    ///
    /// Will print statistics on the number of inputs, outputs and gates in the network.
    #[clap()]
    Show(ShowArgs),

    /// Simulate a logic network on all input patterns
    ///
    /// Prints one line per pattern, with the input bits and the output bits:
    ///    3: 110 | 01
    #[clap(alias = "sim")]
    Simulate(SimulateArgs),

    /// Exhaustive stuck-at fault simulation of a logic network
    ///
    /// Each signal except the primary outputs is stuck at 0 then at 1, and the
    /// network is simulated on all input patterns to find which patterns expose
    /// the fault at the outputs.
    #[clap()]
    Faults(FaultsArgs),
}

/// Open the output file, or the standard output
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(BufWriter::new(File::create(p)?)),
        None => Box::new(BufWriter::new(stdout())),
    })
}

/// Command arguments for network informations
#[derive(Args)]
pub struct ShowArgs {
    /// Network to show
    file: PathBuf,
}

impl ShowArgs {
    /// Print the statistics of the network
    pub fn run(&self) -> Result<()> {
        use crate::network::stats::stats;
        let net = read_network_file(&self.file)?;
        println!("{}", stats(&net)?);
        Ok(())
    }
}

/// Command arguments for simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Network to simulate
    network: PathBuf,

    /// Output file for the truth table; standard output by default
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Maximum number of primary inputs
    #[arg(long, default_value_t = DEFAULT_MAX_INPUTS)]
    max_inputs: usize,
}

impl SimulateArgs {
    /// Simulate all patterns and write the truth table
    pub fn run(&self) -> Result<()> {
        let net = read_network_file(&self.network)?;
        let mut sim = SimpleSimulator::from_network(&net)?;
        let table = sim.run_exhaustive(self.max_inputs)?;
        let mut w = open_output(self.output.as_deref())?;
        write_truth_table(&mut w, &net, &table)?;
        w.flush()?;
        Ok(())
    }
}

/// Command arguments for fault simulation
#[derive(Args)]
pub struct FaultsArgs {
    /// Network to simulate
    network: PathBuf,

    /// Output file for the fault report; standard output by default
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Record every detecting pattern instead of the first one
    #[arg(long)]
    all_patterns: bool,

    /// Simulate faults on all threads
    #[arg(long)]
    parallel: bool,

    /// Maximum number of primary inputs
    #[arg(long, default_value_t = DEFAULT_MAX_INPUTS)]
    max_inputs: usize,

    /// Show a progress bar
    #[arg(long)]
    progress: bool,
}

impl FaultsArgs {
    /// Simulate all faults and write the report
    pub fn run(&self) -> Result<()> {
        let net = read_network_file(&self.network)?;
        let config = FaultSimConfig {
            policy: if self.all_patterns {
                DetectionPolicy::All
            } else {
                DetectionPolicy::FirstOnly
            },
            parallel: self.parallel,
            max_inputs: self.max_inputs,
            progress: self.progress,
            cancel: None,
        };
        let report = simulate_faults(&net, &config)?;
        let mut w = open_output(self.output.as_deref())?;
        write_fault_report(&mut w, &net, &report)?;
        w.flush()?;
        Ok(())
    }
}
