//! Dependency graph between gates and evaluation order
//!
//! A gate depends on another gate if it reads the signal the other gate drives.
//! The evaluation order lists every gate after all gates feeding it, so that a
//! single pass over the order evaluates the whole network.

use itertools::Itertools;
use log::debug;

use crate::error::{Error, Result};
use crate::Network;

/// Gates reading each signal, indexed by signal
///
/// A gate reading the same signal on both inputs appears once.
pub fn signal_readers(net: &Network) -> Vec<Vec<usize>> {
    let mut ret = vec![Vec::new(); net.nb_signals()];
    for i in 0..net.nb_gates() {
        for s in net.gate(i).dependencies().iter().map(|s| s.index()).unique() {
            ret[s].push(i);
        }
    }
    ret
}

/// Gates depending on each gate, indexed by gate
///
/// Each list is sorted and free of duplicates. A gate reading its own output
/// depends on itself.
pub fn dependency_graph(net: &Network) -> Vec<Vec<usize>> {
    let readers = signal_readers(net);
    (0..net.nb_gates())
        .map(|i| readers[net.gate_output(i).index()].clone())
        .collect()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

/// Compute an evaluation order for the gates of the network
///
/// Depth-first traversal of the dependency graph with an explicit stack: the
/// dependents of a gate are visited before the gate is recorded, and the recorded
/// order is reversed. Traversals start from each unvisited gate in index order, so
/// that disconnected parts of the network are covered.
///
/// Returns an error naming a gate on the loop if the network is not acyclic.
pub fn evaluation_order(net: &Network) -> Result<Vec<usize>> {
    let graph = dependency_graph(net);
    let mut marks = vec![Mark::Unvisited; net.nb_gates()];
    let mut post_order = Vec::with_capacity(net.nb_gates());
    // Gate being visited, and the position of the next dependent to explore
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..net.nb_gates() {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::OnPath;
        stack.push((root, 0));
        while let Some((gate, pos)) = stack.last_mut() {
            let gate = *gate;
            if let Some(&next) = graph[gate].get(*pos) {
                *pos += 1;
                match marks[next] {
                    Mark::Unvisited => {
                        marks[next] = Mark::OnPath;
                        stack.push((next, 0));
                    }
                    Mark::OnPath => {
                        return Err(Error::CombinationalLoop {
                            gate: next,
                            signal: net.name(net.gate_output(next)).to_string(),
                        });
                    }
                    Mark::Done => (),
                }
            } else {
                marks[gate] = Mark::Done;
                post_order.push(gate);
                stack.pop();
            }
        }
    }
    post_order.reverse();
    debug!("Evaluation order for {} gates computed", post_order.len());
    Ok(post_order)
}

/// Check that an order is a valid evaluation order for the network
///
/// Every gate must appear exactly once, after all the gates it depends on.
pub fn is_evaluation_order(net: &Network, order: &[usize]) -> bool {
    if order.len() != net.nb_gates() {
        return false;
    }
    let mut position = vec![usize::MAX; net.nb_gates()];
    for (p, &g) in order.iter().enumerate() {
        if g >= net.nb_gates() || position[g] != usize::MAX {
            return false;
        }
        position[g] = p;
    }
    dependency_graph(net)
        .iter()
        .enumerate()
        .all(|(g, deps)| deps.iter().all(|d| position[g] < position[*d]))
}
