//! Compute network statistics
//!
//! ```
//! # use stuckat::Network;
//! # let net = Network::new();
//! use stuckat::network::stats::stats;
//! let stats = stats(&net).unwrap();
//!
//! // Check that there is no Or gate
//! assert_eq!(stats.nb_or, 0);
//!
//! // Show the statistics
//! println!("{}", stats);
//! ```

use std::fmt;

use crate::error::Result;
use crate::network::topo::evaluation_order;
use crate::{Gate, Network};

/// Number of inputs, outputs and gates in a network
#[derive(Clone, Debug)]
pub struct NetworkStats {
    /// Number of inputs
    pub nb_inputs: usize,
    /// Number of outputs
    pub nb_outputs: usize,
    /// Number of internal signals
    pub nb_internals: usize,
    /// Number of And gates
    pub nb_and: usize,
    /// Number of Or gates
    pub nb_or: usize,
    /// Number of Not gates
    pub nb_not: usize,
    /// Number of Buf gates
    pub nb_buf: usize,
    /// Number of gate inputs read inverted
    pub nb_inverted_inputs: usize,
    /// Number of signals read by no gate and not a primary output
    pub nb_unused: usize,
    /// Length of the longest chain of gates
    pub depth: usize,
}

impl NetworkStats {
    /// Total number of gates
    pub fn nb_gates(&self) -> usize {
        self.nb_and + self.nb_or + self.nb_not + self.nb_buf
    }

    /// Number of single stuck-at faults considered by fault simulation
    pub fn nb_faults(&self) -> usize {
        2 * (self.nb_inputs + self.nb_internals)
    }
}

impl fmt::Display for NetworkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stats:")?;
        writeln!(f, "  Inputs: {}", self.nb_inputs)?;
        writeln!(f, "  Outputs: {}", self.nb_outputs)?;
        writeln!(f, "  Internal signals: {}", self.nb_internals)?;
        writeln!(f, "  Gates: {}", self.nb_gates())?;
        if self.nb_and != 0 {
            writeln!(f, "  And: {}", self.nb_and)?;
        }
        if self.nb_or != 0 {
            writeln!(f, "  Or: {}", self.nb_or)?;
        }
        if self.nb_not != 0 {
            writeln!(f, "  Not: {}", self.nb_not)?;
        }
        if self.nb_buf != 0 {
            writeln!(f, "  Buf: {}", self.nb_buf)?;
        }
        if self.nb_inverted_inputs != 0 {
            writeln!(f, "  Inverted inputs: {}", self.nb_inverted_inputs)?;
        }
        if self.nb_unused != 0 {
            writeln!(f, "  Unused signals: {}", self.nb_unused)?;
        }
        writeln!(f, "  Depth: {}", self.depth)?;
        writeln!(f, "  Faults: {}", self.nb_faults())?;
        fmt::Result::Ok(())
    }
}

/// Count the number of gate inputs reading each signal
pub fn count_signal_usage(a: &Network) -> Vec<u32> {
    let mut ret = vec![0; a.nb_signals()];
    for i in 0..a.nb_gates() {
        for s in a.gate(i).dependencies() {
            ret[s.index()] += 1;
        }
    }
    ret
}

/// Compute the number of gates on the longest path to each signal
///
/// Fails if the network has a combinational loop.
pub fn signal_depth(a: &Network) -> Result<Vec<usize>> {
    let order = evaluation_order(a)?;
    let mut ret = vec![0; a.nb_signals()];
    for i in order {
        let d = a
            .gate(i)
            .dependencies()
            .iter()
            .map(|s| ret[s.index()])
            .max()
            .unwrap_or(0);
        let o = a.gate_output(i).index();
        ret[o] = ret[o].max(d + 1);
    }
    Ok(ret)
}

/// Compute the statistics of the network
pub fn stats(a: &Network) -> Result<NetworkStats> {
    use Gate::*;
    let mut ret = NetworkStats {
        nb_inputs: a.nb_inputs(),
        nb_outputs: a.nb_outputs(),
        nb_internals: a.nb_internals(),
        nb_and: 0,
        nb_or: 0,
        nb_not: 0,
        nb_buf: 0,
        nb_inverted_inputs: 0,
        nb_unused: 0,
        depth: 0,
    };
    for i in 0..a.nb_gates() {
        let g = a.gate(i);
        match g {
            And(_) => ret.nb_and += 1,
            Or(_) => ret.nb_or += 1,
            Not(_) => ret.nb_not += 1,
            Buf(_) => ret.nb_buf += 1,
        }
        ret.nb_inverted_inputs += g.dependencies().iter().filter(|s| s.is_inverted()).count();
    }
    let usage = count_signal_usage(a);
    ret.nb_unused = a
        .inputs()
        .iter()
        .chain(a.internals())
        .filter(|s| usage[s.index()] == 0)
        .count();
    ret.depth = signal_depth(a)?.into_iter().max().unwrap_or(0);
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::generators;

    #[test]
    fn test_stats() {
        let net = generators::adder::ripple_carry(2);
        let s = stats(&net).unwrap();
        assert_eq!(s.nb_inputs, 4);
        assert_eq!(s.nb_outputs, 3);
        assert_eq!(s.nb_gates(), net.nb_gates());
        assert_eq!(s.nb_and, 9);
        assert_eq!(s.nb_or, 4);
        assert_eq!(s.nb_inverted_inputs, 6);
        assert_eq!(s.nb_unused, 0);
        assert_eq!(s.nb_faults(), 2 * (4 + net.nb_internals()));
        assert!(format!("{s}").contains("Depth: "));
        assert!(format!("{s}").starts_with("Stats:\n"));
    }

    #[test]
    fn test_depth() {
        let net = generators::testcases::inverter_chain(7);
        let s = stats(&net).unwrap();
        assert_eq!(s.depth, 7);
        let depth = signal_depth(&net).unwrap();
        assert_eq!(depth[net.input(0).index()], 0);
        assert_eq!(depth[net.output(0).index()], 7);
    }

    #[test]
    fn test_unused() {
        let mut net = generators::testcases::and2();
        net.add_input("c").unwrap();
        let s = stats(&net).unwrap();
        assert_eq!(s.nb_unused, 1);
        assert_eq!(count_signal_usage(&net), vec![1, 1, 0, 0]);
    }
}
