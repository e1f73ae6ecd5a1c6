use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::network::topo::evaluation_order;
use crate::{Network, Signal};

use super::fault::Fault;

/// Simulation state of a single signal
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SignalState {
    /// Value computed by the driving gate, or set for a primary input
    pub stored: bool,
    /// Stuck-at value overriding the stored value, if a fault is injected
    pub fault: Option<bool>,
}

impl SignalState {
    /// Value seen by the gates reading the signal
    pub fn observed(&self) -> bool {
        self.fault.unwrap_or(self.stored)
    }
}

/// Structure for simulation based directly on the network representation
///
/// The simulator owns the value of every signal, so that several simulators can
/// work on the same network concurrently. The network and the evaluation order
/// are only read.
#[derive(Clone, Debug)]
pub struct SimpleSimulator<'a> {
    net: &'a Network,
    order: Cow<'a, [usize]>,
    state: Vec<SignalState>,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a> SimpleSimulator<'a> {
    /// Build a simulator, computing the evaluation order of the network
    pub fn from_network(net: &'a Network) -> Result<SimpleSimulator<'a>> {
        let order = evaluation_order(net)?;
        Ok(SimpleSimulator {
            net,
            order: Cow::Owned(order),
            state: vec![SignalState::default(); net.nb_signals()],
            cancel: None,
        })
    }

    /// Build a simulator reusing an evaluation order computed beforehand
    pub fn with_order(net: &'a Network, order: &'a [usize]) -> SimpleSimulator<'a> {
        debug_assert_eq!(order.len(), net.nb_gates());
        SimpleSimulator {
            net,
            order: Cow::Borrowed(order),
            state: vec![SignalState::default(); net.nb_signals()],
            cancel: None,
        }
    }

    /// Evaluation order used by the simulator
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Abort sweeps with [`Error::Cancelled`] once the flag is set
    pub fn set_cancel_flag(&mut self, flag: Arc<AtomicBool>) {
        self.cancel = Some(flag);
    }

    pub(crate) fn check_cancelled(&self) -> Result<()> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(Error::Cancelled),
            _ => Ok(()),
        }
    }

    /// Current state of a signal
    pub fn state(&self, s: Signal) -> SignalState {
        self.state[s.index()]
    }

    /// Force a signal to a constant value for the following simulations
    pub fn inject_fault(&mut self, fault: Fault) {
        self.state[fault.signal.index()].fault = Some(fault.value);
    }

    /// Remove the fault on a signal, if any
    pub fn remove_fault(&mut self, s: Signal) {
        self.state[s.index()].fault = None;
    }

    /// Remove all faults
    pub fn clear_faults(&mut self) {
        for s in &mut self.state {
            s.fault = None;
        }
    }

    /// Reset the stored values, keeping the faults
    fn reset(&mut self) {
        for s in &mut self.state {
            s.stored = false;
        }
    }

    fn get_value(&self, s: Signal) -> bool {
        self.state[s.index()].observed() ^ s.is_inverted()
    }

    fn copy_inputs(&mut self, inputs: &[bool]) {
        assert_eq!(inputs.len(), self.net.nb_inputs());
        for (s, v) in self.net.inputs().iter().zip(inputs) {
            self.state[s.index()].stored = *v;
        }
    }

    fn copy_inputs_from_index(&mut self, index: usize) {
        for (j, s) in self.net.inputs().iter().enumerate() {
            self.state[s.index()].stored = (index >> j) & 1 != 0;
        }
    }

    fn run_comb(&mut self) {
        for &i in self.order.iter() {
            let v = self.net.gate(i).eval(|s| self.get_value(s));
            self.state[self.net.gate_output(i).index()].stored = v;
        }
    }

    fn get_output_values(&self) -> Vec<bool> {
        self.net
            .outputs()
            .iter()
            .map(|s| self.get_value(*s))
            .collect()
    }

    /// Simulate a single input pattern, given in input declaration order
    pub fn run_pattern(&mut self, pattern: &[bool]) -> Vec<bool> {
        self.copy_inputs(pattern);
        self.run_comb();
        self.get_output_values()
    }

    /// Simulate the input pattern with the given index: input j takes bit j of the index
    pub fn run_index(&mut self, index: usize) -> Vec<bool> {
        self.copy_inputs_from_index(index);
        self.run_comb();
        self.get_output_values()
    }

    /// Simulate all input patterns, in increasing index order
    ///
    /// Fails if the network has more than `max_inputs` inputs.
    pub fn run_exhaustive(&mut self, max_inputs: usize) -> Result<Vec<Vec<bool>>> {
        let nb_patterns = super::nb_exhaustive_patterns(self.net, max_inputs)?;
        self.reset();
        let mut ret = Vec::with_capacity(nb_patterns);
        for i in 0..nb_patterns {
            self.check_cancelled()?;
            ret.push(self.run_index(i));
        }
        Ok(ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::generators;
    use crate::Gate;

    #[test]
    fn test_fault_override() {
        let mut net = Network::new();
        let a = net.add_input("a").unwrap();
        let w = net.add_internal("w").unwrap();
        let o = net.add_output("o").unwrap();
        net.add_gate(Gate::buf(a), w).unwrap();
        net.add_gate(Gate::not(w), o).unwrap();

        let mut sim = SimpleSimulator::from_network(&net).unwrap();
        assert_eq!(sim.run_pattern(&[true]), vec![false]);
        sim.inject_fault(Fault {
            signal: w,
            value: false,
        });
        assert_eq!(sim.run_pattern(&[true]), vec![true]);
        // The gate still computes the stored value
        assert_eq!(
            sim.state(w),
            SignalState {
                stored: true,
                fault: Some(false)
            }
        );
        assert!(!sim.state(w).observed());
        sim.remove_fault(w);
        assert_eq!(sim.run_pattern(&[true]), vec![false]);
    }

    #[test]
    fn test_shared_order() {
        let net = generators::random::acyclic(5, 30, 3);
        let order = evaluation_order(&net).unwrap();
        let mut sim1 = SimpleSimulator::with_order(&net, &order);
        let mut sim2 = SimpleSimulator::from_network(&net).unwrap();
        assert_eq!(sim1.order(), sim2.order());
        assert_eq!(sim1.run_exhaustive(8).unwrap(), sim2.run_exhaustive(8).unwrap());
    }

    #[test]
    fn test_cancel() {
        let net = generators::testcases::and2();
        let mut sim = SimpleSimulator::from_network(&net).unwrap();
        let flag = Arc::new(AtomicBool::new(false));
        sim.set_cancel_flag(flag.clone());
        assert_eq!(sim.run_exhaustive(4).unwrap().len(), 4);
        flag.store(true, Ordering::Relaxed);
        assert!(matches!(sim.run_exhaustive(4), Err(Error::Cancelled)));
    }

    #[test]
    fn test_clear_faults() {
        let net = generators::testcases::and2();
        let mut sim = SimpleSimulator::from_network(&net).unwrap();
        let baseline = sim.run_exhaustive(4).unwrap();
        for f in Fault::all(&net) {
            sim.inject_fault(f);
        }
        sim.clear_faults();
        assert_eq!(sim.run_exhaustive(4).unwrap(), baseline);
    }
}
