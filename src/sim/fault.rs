use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use kdam::{tqdm, Bar, BarExt};
use log::{debug, info};
use rayon::prelude::*;

use crate::error::Result;
use crate::network::topo::evaluation_order;
use crate::{Network, Signal};

use super::simple_sim::SimpleSimulator;
use super::DEFAULT_MAX_INPUTS;

/// Representation of a single stuck-at fault
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Fault {
    /// Signal where the fault is located
    pub signal: Signal,
    /// Fault value
    pub value: bool,
}

impl Fault {
    /// Create a stuck-at-0 fault
    pub fn stuck_at_0(signal: Signal) -> Fault {
        Fault {
            signal,
            value: false,
        }
    }

    /// Create a stuck-at-1 fault
    pub fn stuck_at_1(signal: Signal) -> Fault {
        Fault {
            signal,
            value: true,
        }
    }

    /// Get all faults considered in a network
    ///
    /// Faults are located on every signal except the primary outputs: first the
    /// primary inputs in declaration order, then the internal signals. Each
    /// signal gets a stuck-at-0 then a stuck-at-1 fault.
    pub fn all(net: &Network) -> Vec<Fault> {
        let mut ret = Vec::new();
        for s in net.inputs().iter().chain(net.internals()) {
            for value in [false, true] {
                ret.push(Fault { signal: *s, value });
            }
        }
        ret
    }

    /// Description of the fault using the signal name
    pub fn describe(&self, net: &Network) -> String {
        format!("{} stuck-at-{}", net.name(self.signal), i32::from(self.value))
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} stuck-at-{}", self.signal, i32::from(self.value))
    }
}

/// Which differing patterns are recorded for a fault
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DetectionPolicy {
    /// Stop at the first pattern that detects the fault
    #[default]
    FirstOnly,
    /// Record every pattern that detects the fault
    All,
}

/// Outcome of the simulation of a single fault
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaultResult {
    /// Simulated fault
    pub fault: Fault,
    /// Indices of the patterns detecting the fault, in increasing order
    ///
    /// Contains at most one pattern with [`DetectionPolicy::FirstOnly`].
    pub detecting_patterns: Vec<usize>,
}

impl FaultResult {
    /// Returns true if some pattern detects the fault
    pub fn is_detected(&self) -> bool {
        !self.detecting_patterns.is_empty()
    }

    /// Lowest index of a pattern detecting the fault
    pub fn first_detecting_pattern(&self) -> Option<usize> {
        self.detecting_patterns.first().copied()
    }
}

/// Results of the fault simulation of a network
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaultReport {
    /// Policy used to record the detecting patterns
    pub policy: DetectionPolicy,
    /// Output values of the fault-free network, for each pattern index
    pub baseline: Vec<Vec<bool>>,
    /// Outcome for each fault, in the order of [`Fault::all`]
    pub results: Vec<FaultResult>,
}

impl FaultReport {
    /// Number of faults simulated
    pub fn nb_faults(&self) -> usize {
        self.results.len()
    }

    /// Number of faults detected by at least one pattern
    pub fn nb_detected(&self) -> usize {
        self.results.iter().filter(|r| r.is_detected()).count()
    }

    /// Fraction of the faults that are detected; 1.0 if there is no fault
    pub fn coverage(&self) -> f64 {
        if self.results.is_empty() {
            1.0
        } else {
            self.nb_detected() as f64 / self.nb_faults() as f64
        }
    }

    /// Faults not detected by any pattern
    pub fn undetected(&self) -> impl Iterator<Item = &Fault> {
        self.results
            .iter()
            .filter(|r| !r.is_detected())
            .map(|r| &r.fault)
    }
}

/// Parameters of the fault simulation
#[derive(Clone, Debug)]
pub struct FaultSimConfig {
    /// Which detecting patterns to record
    pub policy: DetectionPolicy,
    /// Simulate faults concurrently, each worker with its own simulator
    pub parallel: bool,
    /// Maximum number of primary inputs for the exhaustive sweep
    pub max_inputs: usize,
    /// Show a progress bar
    pub progress: bool,
    /// Abort the simulation with [`crate::Error::Cancelled`] once set
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for FaultSimConfig {
    fn default() -> Self {
        FaultSimConfig {
            policy: DetectionPolicy::FirstOnly,
            parallel: false,
            max_inputs: DEFAULT_MAX_INPUTS,
            progress: false,
            cancel: None,
        }
    }
}

/// Simulate a fault over all patterns and compare to the fault-free outputs
///
/// The fault is removed before returning, even on error.
fn simulate_fault(
    sim: &mut SimpleSimulator,
    baseline: &[Vec<bool>],
    fault: Fault,
    policy: DetectionPolicy,
) -> Result<FaultResult> {
    sim.inject_fault(fault);
    let detecting_patterns = compare_to_baseline(sim, baseline, policy);
    sim.remove_fault(fault.signal);
    Ok(FaultResult {
        fault,
        detecting_patterns: detecting_patterns?,
    })
}

fn compare_to_baseline(
    sim: &mut SimpleSimulator,
    baseline: &[Vec<bool>],
    policy: DetectionPolicy,
) -> Result<Vec<usize>> {
    let mut ret = Vec::new();
    for (i, expected) in baseline.iter().enumerate() {
        sim.check_cancelled()?;
        if sim.run_index(i) != *expected {
            ret.push(i);
            if policy == DetectionPolicy::FirstOnly {
                break;
            }
        }
    }
    Ok(ret)
}

/// Check which pattern indices detect a single fault
///
/// Simulates the network with and without the fault over all input patterns.
pub fn detecting_patterns(
    net: &Network,
    fault: Fault,
    policy: DetectionPolicy,
    max_inputs: usize,
) -> Result<Vec<usize>> {
    let mut sim = SimpleSimulator::from_network(net)?;
    let baseline = sim.run_exhaustive(max_inputs)?;
    Ok(simulate_fault(&mut sim, &baseline, fault, policy)?.detecting_patterns)
}

/// Run the exhaustive fault simulation of a network
///
/// The evaluation order and the fault-free outputs are computed once. Each fault of
/// [`Fault::all`] is then injected in turn, the network is simulated over all
/// input patterns, and the outputs are compared to the fault-free outputs in
/// increasing pattern order.
pub fn simulate_faults(net: &Network, config: &FaultSimConfig) -> Result<FaultReport> {
    let order = evaluation_order(net)?;
    let mut sim = new_simulator(net, &order, config);
    let baseline = sim.run_exhaustive(config.max_inputs)?;
    let faults = Fault::all(net);
    info!(
        "Simulating {} faults over {} patterns",
        faults.len(),
        baseline.len()
    );

    let progress = config.progress.then(|| Mutex::new(progress_bar(faults.len())));
    let results = if config.parallel {
        simulate_faults_parallel(net, &order, &baseline, &faults, config, progress.as_ref())?
    } else {
        simulate_faults_sequential(&mut sim, &baseline, &faults, config, progress.as_ref())?
    };
    let report = FaultReport {
        policy: config.policy,
        baseline,
        results,
    };
    info!(
        "Detected {}/{} faults ({:.2}% coverage)",
        report.nb_detected(),
        report.nb_faults(),
        100.0 * report.coverage()
    );
    Ok(report)
}

fn new_simulator<'a>(
    net: &'a Network,
    order: &'a [usize],
    config: &FaultSimConfig,
) -> SimpleSimulator<'a> {
    let mut sim = SimpleSimulator::with_order(net, order);
    if let Some(flag) = &config.cancel {
        sim.set_cancel_flag(flag.clone());
    }
    sim
}

fn progress_bar(nb_faults: usize) -> Bar {
    let mut pb = tqdm!(total = nb_faults);
    pb.set_description("Faults processed");
    pb
}

/// Advance the progress bar by one processed fault
fn advance(progress: Option<&Mutex<Bar>>) -> Result<()> {
    if let Some(pb) = progress {
        let mut pb = pb.lock().unwrap_or_else(|e| e.into_inner());
        pb.update(1)?;
    }
    Ok(())
}

fn simulate_faults_sequential(
    sim: &mut SimpleSimulator,
    baseline: &[Vec<bool>],
    faults: &[Fault],
    config: &FaultSimConfig,
    progress: Option<&Mutex<Bar>>,
) -> Result<Vec<FaultResult>> {
    let mut ret = Vec::with_capacity(faults.len());
    for fault in faults {
        let res = simulate_fault(sim, baseline, *fault, config.policy)?;
        debug!("{}: {:?}", fault, res.first_detecting_pattern());
        ret.push(res);
        advance(progress)?;
    }
    Ok(ret)
}

fn simulate_faults_parallel(
    net: &Network,
    order: &[usize],
    baseline: &[Vec<bool>],
    faults: &[Fault],
    config: &FaultSimConfig,
    progress: Option<&Mutex<Bar>>,
) -> Result<Vec<FaultResult>> {
    faults
        .par_iter()
        .map_init(
            || new_simulator(net, order, config),
            |sim, fault| {
                let res = simulate_fault(sim, baseline, *fault, config.policy)?;
                advance(progress)?;
                Ok(res)
            },
        )
        .collect()
}
