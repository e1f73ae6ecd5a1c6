//! Exhaustive simulation and stuck-at fault simulation of combinational netlists
//!
//! This crate evaluates small combinational circuits over every input pattern, and
//! measures which [single stuck-at faults](https://en.wikipedia.org/wiki/Stuck-at_fault)
//! are detected by some pattern at the primary outputs.
//!
//! # Usage
//!
//! ```bash
//! # Show available commands
//! # Netlists are read from .bench files or structural Verilog (.v)
//! stuckat help
//! # Show statistics on the netlist
//! stuckat show c17.bench
//! # Print the truth table of the circuit
//! stuckat simulate c17.v -o c17.tt
//! # Simulate every stuck-at fault, in parallel, listing all detecting patterns
//! stuckat faults c17.v --parallel --all-patterns
//! ```
//!
//! # Development
//!
//! ## Datastructures
//!
//! `Network` is an arena of named signals: primary inputs, primary outputs and
//! internal signals. Each gate drives one signal and reads one or two others.
//! Inverters on gate inputs are implicit, occupying just one bit in `Signal`.
//! Gates can be added in any order: the simulators compute an evaluation order
//! from the dependencies between gates, and reject combinational loops.
//!
//! For example, here is a single And gate and its fault simulation:
//! ```
//! # use stuckat::{Gate, Network};
//! use stuckat::sim::{simulate_exhaustive, simulate_faults, FaultSimConfig};
//! let mut net = Network::new();
//! let a = net.add_input("a")?;
//! let b = net.add_input("b")?;
//! let o = net.add_output("o")?;
//! net.add_gate(Gate::and(a, b), o)?;
//!
//! // Pattern i assigns bit j of i to input j
//! let table = simulate_exhaustive(&net)?;
//! assert_eq!(table, vec![vec![false], vec![false], vec![false], vec![true]]);
//!
//! // Faults on a and b, each detected by some pattern
//! let report = simulate_faults(&net, &FaultSimConfig::default())?;
//! assert_eq!(report.nb_faults(), 4);
//! assert_eq!(report.nb_detected(), 4);
//! # Ok::<(), stuckat::Error>(())
//! ```

#![warn(missing_docs)]

pub mod cmd;
pub mod error;
pub mod io;
pub mod network;
pub mod sim;

pub use error::{Error, Result};
pub use network::{stats, Gate, GateType, Network, Signal, SignalKind};
