//! Network generators and templates

/// Adder generators
pub mod adder {
    use crate::{Gate, Network, Signal};

    /// Build a Xor from And/Or gates with inverted inputs, using two internal signals
    fn xor(net: &mut Network, a: Signal, b: Signal, out: Signal, prefix: &str) {
        let l = net.add_internal(&format!("{prefix}_l")).unwrap();
        let r = net.add_internal(&format!("{prefix}_r")).unwrap();
        net.add_gate(Gate::and(a, !b), l).unwrap();
        net.add_gate(Gate::and(!a, b), r).unwrap();
        net.add_gate(Gate::or(l, r), out).unwrap();
    }

    /// A simple ripple-carry adder with inputs a0, b0, a1, b1... and outputs s0, s1... and cout
    pub fn ripple_carry(len: usize) -> Network {
        assert!(len > 0);
        let mut ret = Network::new();
        let mut ab = Vec::new();
        for i in 0..len {
            let a = ret.add_input(&format!("a{i}")).unwrap();
            let b = ret.add_input(&format!("b{i}")).unwrap();
            ab.push((a, b));
        }
        let sums: Vec<Signal> = (0..len)
            .map(|i| ret.add_output(&format!("s{i}")).unwrap())
            .collect();
        let cout = ret.add_output("cout").unwrap();

        let mut carry: Option<Signal> = None;
        for (i, (a, b)) in ab.into_iter().enumerate() {
            let next_carry = if i + 1 == len {
                cout
            } else {
                ret.add_internal(&format!("c{}", i + 1)).unwrap()
            };
            match carry {
                None => {
                    // Half adder
                    xor(&mut ret, a, b, sums[i], &format!("x{i}"));
                    ret.add_gate(Gate::and(a, b), next_carry).unwrap();
                }
                Some(c) => {
                    let p = ret.add_internal(&format!("p{i}")).unwrap();
                    xor(&mut ret, a, b, p, &format!("xp{i}"));
                    xor(&mut ret, p, c, sums[i], &format!("xs{i}"));
                    let g = ret.add_internal(&format!("g{i}")).unwrap();
                    let pc = ret.add_internal(&format!("pc{i}")).unwrap();
                    ret.add_gate(Gate::and(a, b), g).unwrap();
                    ret.add_gate(Gate::and(p, c), pc).unwrap();
                    ret.add_gate(Gate::or(g, pc), next_carry).unwrap();
                }
            }
            carry = Some(next_carry);
        }
        ret
    }
}

/// Simple generators to test functionality
pub mod testcases {
    use crate::{Gate, Network};

    /// A single 2-input And gate: o = a & b
    pub fn and2() -> Network {
        let mut ret = Network::new();
        let a = ret.add_input("a").unwrap();
        let b = ret.add_input("b").unwrap();
        let o = ret.add_output("o").unwrap();
        ret.add_gate(Gate::and(a, b), o).unwrap();
        ret
    }

    /// A chain of inverters of the given length, with the gates added from output to input
    pub fn inverter_chain(len: usize) -> Network {
        assert!(len > 0);
        let mut ret = Network::new();
        let input = ret.add_input("i").unwrap();
        let mut signals = vec![input];
        for i in 1..len {
            signals.push(ret.add_internal(&format!("w{i}")).unwrap());
        }
        signals.push(ret.add_output("o").unwrap());
        for i in (0..len).rev() {
            ret.add_gate(Gate::not(signals[i]), signals[i + 1]).unwrap();
        }
        ret
    }
}

/// Random network generators
pub mod random {
    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    use crate::{Gate, Network, Signal};

    /// A random acyclic network
    ///
    /// Each gate reads primary inputs or outputs of previously generated gates, with
    /// random inversions. The last gates (up to 3) drive the primary outputs. Gates
    /// are inserted in a random order, so that the gate order is not an evaluation order.
    pub fn acyclic(nb_inputs: usize, nb_gates: usize, seed: u64) -> Network {
        assert!(nb_inputs > 0);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut ret = Network::new();
        let mut available: Vec<Signal> = (0..nb_inputs)
            .map(|i| ret.add_input(&format!("i{i}")).unwrap())
            .collect();
        let nb_outputs = nb_gates.min(3);
        let mut gates = Vec::new();
        for i in 0..nb_gates {
            let out = if i + nb_outputs >= nb_gates {
                ret.add_output(&format!("o{}", i + nb_outputs - nb_gates))
                    .unwrap()
            } else {
                ret.add_internal(&format!("x{i}")).unwrap()
            };
            let a = available[rng.gen_range(0..available.len())] ^ rng.gen::<bool>();
            let b = available[rng.gen_range(0..available.len())] ^ rng.gen::<bool>();
            let g = match rng.gen_range(0..4) {
                0 => Gate::and(a, b),
                1 => Gate::or(a, b),
                2 => Gate::not(a),
                _ => Gate::buf(a),
            };
            gates.push((g, out));
            available.push(out);
        }
        gates.shuffle(&mut rng);
        for (g, out) in gates {
            ret.add_gate(g, out).unwrap();
        }
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        let net = adder::ripple_carry(4);
        assert_eq!(net.nb_inputs(), 8);
        assert_eq!(net.nb_outputs(), 5);
        net.check().unwrap();

        let net = testcases::inverter_chain(5);
        assert_eq!(net.nb_gates(), 5);
        assert_eq!(net.nb_internals(), 4);

        let net = random::acyclic(4, 20, 1);
        assert_eq!(net.nb_inputs(), 4);
        assert_eq!(net.nb_gates(), 20);
        assert_eq!(net.nb_outputs(), 3);
        assert_eq!(net.nb_internals(), 17);
    }
}
