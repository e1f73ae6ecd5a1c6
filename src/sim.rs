//! Exhaustive simulation and stuck-at fault simulation of a network
//!
//! Input patterns are identified by their index: primary input `j` takes the value
//! of bit `j` of the index, and the exhaustive sweep of a network with `n` inputs
//! covers the indices `0..2^n` in increasing order.

mod fault;
mod simple_sim;

use crate::error::{Error, Result};
use crate::Network;

pub use fault::{
    detecting_patterns, simulate_faults, DetectionPolicy, Fault, FaultReport, FaultResult,
    FaultSimConfig,
};
pub use simple_sim::{SignalState, SimpleSimulator};

/// Default limit on the number of primary inputs for an exhaustive sweep
pub const DEFAULT_MAX_INPUTS: usize = 24;

/// Number of patterns of the exhaustive sweep, if the network is small enough
pub fn nb_exhaustive_patterns(a: &Network, max_inputs: usize) -> Result<usize> {
    let nb_inputs = a.nb_inputs();
    if nb_inputs > max_inputs || nb_inputs >= usize::BITS as usize {
        return Err(Error::TooManyInputs {
            nb_inputs,
            max_inputs,
        });
    }
    Ok(1usize << nb_inputs)
}

/// Input values for the pattern with the given index
pub fn pattern_from_index(index: usize, nb_inputs: usize) -> Vec<bool> {
    (0..nb_inputs).map(|j| (index >> j) & 1 != 0).collect()
}

/// Simulate a combinational network on a single pattern; return the output values
pub fn simulate_comb(a: &Network, input_values: &[bool]) -> Result<Vec<bool>> {
    let mut sim = SimpleSimulator::from_network(a)?;
    Ok(sim.run_pattern(input_values))
}

/// Simulate a combinational network on a single pattern with faults injected; return the output values
pub fn simulate_comb_with_faults(
    a: &Network,
    input_values: &[bool],
    faults: &[Fault],
) -> Result<Vec<bool>> {
    let mut sim = SimpleSimulator::from_network(a)?;
    for f in faults {
        sim.inject_fault(*f);
    }
    Ok(sim.run_pattern(input_values))
}

/// Simulate all input patterns; return the output values for each pattern index
pub fn simulate_exhaustive(a: &Network) -> Result<Vec<Vec<bool>>> {
    let mut sim = SimpleSimulator::from_network(a)?;
    sim.run_exhaustive(DEFAULT_MAX_INPUTS)
}

#[cfg(test)]
mod tests {
    use crate::network::generators;
    use crate::{Error, Gate, Network};

    use super::*;

    #[test]
    fn test_and_sweep() {
        let net = generators::testcases::and2();
        assert_eq!(
            simulate_exhaustive(&net).unwrap(),
            vec![vec![false], vec![false], vec![false], vec![true]]
        );
    }

    #[test]
    fn test_and_stuck_output() {
        let net = generators::testcases::and2();
        let o = net.output(0);
        for i in 0..4 {
            let pattern = pattern_from_index(i, 2);
            let sa0 = simulate_comb_with_faults(&net, &pattern, &[Fault::stuck_at_0(o)]).unwrap();
            let sa1 = simulate_comb_with_faults(&net, &pattern, &[Fault::stuck_at_1(o)]).unwrap();
            assert_eq!(sa0, vec![false]);
            assert_eq!(sa1, vec![true]);
        }
    }

    #[test]
    fn test_basic() {
        let mut net = Network::default();
        let i0 = net.add_input("i0").unwrap();
        let i1 = net.add_input("i1").unwrap();
        let i2 = net.add_input("i2").unwrap();
        let x1 = net.add_output("x1").unwrap();
        let x2 = net.add_internal("x2").unwrap();
        let x3 = net.add_output("x3").unwrap();
        net.add_gate(Gate::and(x2, !i1), x3).unwrap();
        net.add_gate(Gate::or(i0, i1), x1).unwrap();
        net.add_gate(Gate::and(i0, i2), x2).unwrap();

        assert_eq!(
            simulate_comb(&net, &[false, false, false]).unwrap(),
            vec![false, false]
        );
        assert_eq!(
            simulate_comb(&net, &[true, false, false]).unwrap(),
            vec![true, false]
        );
        assert_eq!(
            simulate_comb(&net, &[true, false, true]).unwrap(),
            vec![true, true]
        );
        assert_eq!(
            simulate_comb(&net, &[true, true, true]).unwrap(),
            vec![true, false]
        );
    }

    #[test]
    fn test_exhaustive_matches_patterns() {
        let net = generators::random::acyclic(5, 30, 7);
        let table = simulate_exhaustive(&net).unwrap();
        assert_eq!(table.len(), 32);
        for (i, outputs) in table.iter().enumerate() {
            let pattern = pattern_from_index(i, 5);
            assert_eq!(*outputs, simulate_comb(&net, &pattern).unwrap());
        }
        // No state leaks between sweeps
        assert_eq!(table, simulate_exhaustive(&net).unwrap());
    }

    #[test]
    fn test_adder() {
        let len = 3;
        let net = generators::adder::ripple_carry(len);
        let table = simulate_exhaustive(&net).unwrap();
        for (i, outputs) in table.iter().enumerate() {
            let pattern = pattern_from_index(i, 2 * len);
            let mut a = 0;
            let mut b = 0;
            for j in 0..len {
                a |= (pattern[2 * j] as usize) << j;
                b |= (pattern[2 * j + 1] as usize) << j;
            }
            let sum: usize = outputs
                .iter()
                .enumerate()
                .map(|(j, v)| (*v as usize) << j)
                .sum();
            assert_eq!(sum, a + b);
        }
    }

    #[test]
    fn test_disconnected() {
        let mut net = generators::testcases::and2();
        let c = net.add_input("c").unwrap();
        let d = net.add_input("d").unwrap();
        let w = net.add_internal("w").unwrap();
        net.add_gate(Gate::or(c, !d), w).unwrap();
        let mut sim = SimpleSimulator::from_network(&net).unwrap();
        assert_eq!(sim.order().iter().filter(|g| **g == 1).count(), 1);
        for i in 0..16 {
            sim.run_index(i);
            let c = (i >> 2) & 1 != 0;
            let d = (i >> 3) & 1 != 0;
            assert_eq!(sim.state(w).observed(), c | !d);
        }
    }

    #[test]
    fn test_no_input() {
        let mut net = Network::new();
        let o = net.add_output("o").unwrap();
        let w = net.add_internal("w").unwrap();
        net.add_gate(Gate::not(w), o).unwrap();
        assert_eq!(simulate_exhaustive(&net).unwrap(), vec![vec![true]]);
    }

    #[test]
    fn test_limits() {
        let net = generators::adder::ripple_carry(2);
        assert_eq!(nb_exhaustive_patterns(&net, 4).unwrap(), 16);
        assert!(matches!(
            nb_exhaustive_patterns(&net, 3),
            Err(Error::TooManyInputs { .. })
        ));
        assert_eq!(pattern_from_index(6, 4), vec![false, true, true, false]);
    }

    #[test]
    fn test_loop_is_rejected() {
        let mut net = Network::new();
        let a = net.add_input("a").unwrap();
        let o = net.add_output("o").unwrap();
        let w = net.add_internal("w").unwrap();
        net.add_gate(Gate::and(a, o), w).unwrap();
        net.add_gate(Gate::buf(w), o).unwrap();
        assert!(matches!(
            simulate_exhaustive(&net),
            Err(Error::CombinationalLoop { .. })
        ));
    }
}
