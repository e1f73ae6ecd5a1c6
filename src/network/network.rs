use core::fmt;
use std::collections::hash_map::Entry;

use fxhash::FxHashMap;
use log::warn;

use crate::error::{Error, Result};
use crate::network::gates::Gate;
use crate::network::signal::Signal;

/// Role of a signal in the network
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum SignalKind {
    /// Primary input
    Input,
    /// Primary output
    Output,
    /// Internal signal
    Internal,
}

#[derive(Debug, Clone)]
struct SignalData {
    name: String,
    kind: SignalKind,
}

/// Representation of a combinational netlist
///
/// Signals are stored in an arena and addressed by [`Signal`] handles. Each gate
/// drives a single output signal. The order of the primary inputs gives the bit
/// position of each input in a pattern index, and the order of the primary outputs
/// the layout of the output vectors.
#[derive(Debug, Clone, Default)]
pub struct Network {
    signals: Vec<SignalData>,
    names: FxHashMap<String, Signal>,
    inputs: Vec<Signal>,
    outputs: Vec<Signal>,
    internals: Vec<Signal>,
    gates: Vec<Gate>,
    gate_outputs: Vec<Signal>,
}

impl Network {
    /// Create a new network
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of primary inputs
    pub fn nb_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Return the number of primary outputs
    pub fn nb_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Return the number of internal signals
    pub fn nb_internals(&self) -> usize {
        self.internals.len()
    }

    /// Return the number of signals, of all kinds
    pub fn nb_signals(&self) -> usize {
        self.signals.len()
    }

    /// Return the number of gates in the network
    pub fn nb_gates(&self) -> usize {
        self.gates.len()
    }

    /// Get the input at index i
    pub fn input(&self, i: usize) -> Signal {
        self.inputs[i]
    }

    /// Get the output at index i
    pub fn output(&self, i: usize) -> Signal {
        self.outputs[i]
    }

    /// Get the internal signal at index i
    pub fn internal(&self, i: usize) -> Signal {
        self.internals[i]
    }

    /// Get the gate at index i
    pub fn gate(&self, i: usize) -> &Gate {
        &self.gates[i]
    }

    /// Get the signal driven by the gate at index i
    pub fn gate_output(&self, i: usize) -> Signal {
        self.gate_outputs[i]
    }

    /// All primary inputs, in declaration order
    pub fn inputs(&self) -> &[Signal] {
        &self.inputs
    }

    /// All primary outputs, in declaration order
    pub fn outputs(&self) -> &[Signal] {
        &self.outputs
    }

    /// All internal signals, in insertion order
    pub fn internals(&self) -> &[Signal] {
        &self.internals
    }

    /// Name of a signal
    pub fn name(&self, s: Signal) -> &str {
        &self.signals[s.index()].name
    }

    /// Role of a signal
    pub fn kind(&self, s: Signal) -> SignalKind {
        self.signals[s.index()].kind
    }

    /// Look up a signal by name
    pub fn signal_by_name(&self, name: &str) -> Option<Signal> {
        self.names.get(name).copied()
    }

    /// Add a new primary input
    pub fn add_input(&mut self, name: &str) -> Result<Signal> {
        let s = self.add_signal(name, SignalKind::Input)?;
        self.inputs.push(s);
        Ok(s)
    }

    /// Add a new primary output
    pub fn add_output(&mut self, name: &str) -> Result<Signal> {
        let s = self.add_signal(name, SignalKind::Output)?;
        self.outputs.push(s);
        Ok(s)
    }

    /// Add a new internal signal
    pub fn add_internal(&mut self, name: &str) -> Result<Signal> {
        let s = self.add_signal(name, SignalKind::Internal)?;
        self.internals.push(s);
        Ok(s)
    }

    fn add_signal(&mut self, name: &str, kind: SignalKind) -> Result<Signal> {
        let s = Signal::from_index(self.signals.len());
        match self.names.entry(name.to_string()) {
            Entry::Occupied(_) => return Err(Error::DuplicateSignal(name.to_string())),
            Entry::Vacant(e) => {
                e.insert(s);
            }
        }
        self.signals.push(SignalData {
            name: name.to_string(),
            kind,
        });
        Ok(s)
    }

    /// Add a new gate driving the given signal; returns the index of the gate
    pub fn add_gate(&mut self, gate: Gate, output: Signal) -> Result<usize> {
        for s in gate.dependencies() {
            if !self.is_valid(*s) {
                return Err(Error::InvalidSignal(s.to_string()));
            }
        }
        if !self.is_valid(output) {
            return Err(Error::InvalidSignal(output.to_string()));
        }
        if output.is_inverted() {
            return Err(Error::InvalidGate {
                output: self.name(output).to_string(),
                reason: "the output of a gate cannot be inverted".to_string(),
            });
        }
        if self.kind(output) == SignalKind::Input {
            return Err(Error::InvalidGate {
                output: self.name(output).to_string(),
                reason: "a primary input cannot be driven by a gate".to_string(),
            });
        }
        self.gates.push(gate);
        self.gate_outputs.push(output);
        Ok(self.gates.len() - 1)
    }

    /// Returns whether a signal is valid (within bounds) in the network
    pub(crate) fn is_valid(&self, s: Signal) -> bool {
        s.index() < self.nb_signals()
    }

    /// Check consistency of the datastructure
    ///
    /// Signals driven by several gates are reported as warnings: the simulation
    /// assumes a single driver per signal.
    pub fn check(&self) -> Result<()> {
        for (g, o) in self.gates.iter().zip(self.gate_outputs.iter()) {
            for s in g.dependencies() {
                if !self.is_valid(*s) {
                    return Err(Error::InvalidSignal(s.to_string()));
                }
            }
            if !self.is_valid(*o) || o.is_inverted() {
                return Err(Error::InvalidSignal(o.to_string()));
            }
        }
        let mut nb_drivers = vec![0usize; self.nb_signals()];
        for o in &self.gate_outputs {
            nb_drivers[o.index()] += 1;
        }
        for (i, nb) in nb_drivers.iter().enumerate() {
            let s = Signal::from_index(i);
            if *nb > 1 {
                warn!("Signal {} is driven by {} gates", self.name(s), nb);
            }
        }
        Ok(())
    }

    /// Format a signal read with its name, for messages
    pub fn signal_to_string(&self, s: Signal) -> String {
        let name = self.name(s);
        if s.is_inverted() {
            format!("~{name}")
        } else {
            name.to_string()
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Network with {} inputs, {} outputs, {} internal signals:",
            self.nb_inputs(),
            self.nb_outputs(),
            self.nb_internals()
        )?;
        for i in 0..self.nb_gates() {
            let g = self.gate(i);
            write!(f, "\t{} = {}(", self.name(self.gate_output(i)), g.gate_type())?;
            for (j, s) in g.dependencies().iter().enumerate() {
                if j != 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.signal_to_string(*s))?;
            }
            writeln!(f, ")")?;
        }
        Ok(())
    }
}
