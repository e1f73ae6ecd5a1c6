//! Error types for netlist construction, parsing and simulation

use thiserror::Error;

/// Errors that can occur while building, reading or simulating a network
#[derive(Debug, Error)]
pub enum Error {
    /// A signal name was declared twice
    #[error("Signal {0} is declared twice")]
    DuplicateSignal(String),

    /// A name does not refer to any declared signal
    #[error("Signal {0} is not declared anywhere")]
    UnknownSignal(String),

    /// A signal handle is out of range for the network
    #[error("Invalid signal {0}")]
    InvalidSignal(String),

    /// A gate cannot be added as given
    #[error("Invalid gate driving {output}: {reason}")]
    InvalidGate {
        /// Name of the signal the gate would drive
        output: String,
        /// What is wrong with the gate
        reason: String,
    },

    /// The gates do not form a directed acyclic graph
    #[error("Combinational loop through gate {gate} driving {signal}")]
    CombinationalLoop {
        /// Index of a gate on the loop
        gate: usize,
        /// Name of the signal driven by this gate
        signal: String,
    },

    /// The exhaustive sweep would be too large
    #[error("Exhaustive simulation of {nb_inputs} inputs exceeds the limit of {max_inputs}")]
    TooManyInputs {
        /// Number of primary inputs of the network
        nb_inputs: usize,
        /// Configured limit
        max_inputs: usize,
    },

    /// The sweep was cancelled from outside
    #[error("Simulation cancelled")]
    Cancelled,

    /// Malformed netlist file
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// Line number, starting at 1
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// Unsupported file type
    #[error("Unknown netlist extension {0}")]
    UnknownExtension(String),

    /// Error while reading or writing a file
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
