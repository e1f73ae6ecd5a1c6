//! Representation and handling of combinational netlists

mod gates;
pub mod generators;
mod network;
mod signal;
pub mod stats;
pub mod topo;

pub use gates::{Gate, GateType};
pub use network::{Network, SignalKind};
pub use signal::Signal;
