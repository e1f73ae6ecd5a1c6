//! Text rendering of truth tables and fault simulation reports

use std::io::Write;

use itertools::Itertools;

use crate::error::Result;
use crate::sim::{pattern_from_index, DetectionPolicy, FaultReport, FaultResult};
use crate::Network;

fn bits_to_string(bits: &[bool]) -> String {
    bits.iter().map(|b| if *b { '1' } else { '0' }).collect()
}

/// Write the output values of an exhaustive simulation
///
/// The header lists the input names and the output names. Each following line
/// gives the pattern index, the input bits and the output bits:
/// ```text
/// # a b | o
/// 0: 00 | 0
/// 1: 10 | 0
/// 2: 01 | 0
/// 3: 11 | 1
/// ```
pub fn write_truth_table<W: Write>(w: &mut W, net: &Network, table: &[Vec<bool>]) -> Result<()> {
    writeln!(
        w,
        "# {} | {}",
        net.inputs().iter().map(|s| net.name(*s)).join(" "),
        net.outputs().iter().map(|s| net.name(*s)).join(" ")
    )?;
    for (i, outputs) in table.iter().enumerate() {
        let inputs = pattern_from_index(i, net.nb_inputs());
        writeln!(
            w,
            "{}: {} | {}",
            i,
            bits_to_string(&inputs),
            bits_to_string(outputs)
        )?;
    }
    Ok(())
}

fn describe_pattern(net: &Network, index: usize) -> String {
    pattern_from_index(index, net.nb_inputs())
        .iter()
        .zip(net.inputs())
        .map(|(v, s)| format!("{}={}", net.name(*s), i32::from(*v)))
        .join(" ")
}

fn write_fault_result<W: Write>(
    w: &mut W,
    net: &Network,
    res: &FaultResult,
    policy: DetectionPolicy,
) -> Result<()> {
    let fault = res.fault.describe(net);
    match (policy, res.first_detecting_pattern()) {
        (_, None) => writeln!(w, "{fault}: undetected")?,
        (DetectionPolicy::FirstOnly, Some(i)) => writeln!(
            w,
            "{fault}: detected by pattern {i} ({})",
            describe_pattern(net, i)
        )?,
        (DetectionPolicy::All, Some(_)) => writeln!(
            w,
            "{fault}: detected by patterns {}",
            res.detecting_patterns.iter().join(", ")
        )?,
    }
    Ok(())
}

/// Write the outcome of a fault simulation, one line per fault, and the fault coverage
///
/// With [`DetectionPolicy::FirstOnly`], a detected fault is shown with its first
/// detecting pattern and the corresponding input values. With [`DetectionPolicy::All`],
/// the line lists every detecting pattern index.
/// ```text
/// a stuck-at-0: detected by pattern 3 (a=1 b=1)
/// w stuck-at-1: undetected
/// Detected 5/6 faults (83.33% coverage)
/// ```
pub fn write_fault_report<W: Write>(w: &mut W, net: &Network, report: &FaultReport) -> Result<()> {
    for res in &report.results {
        write_fault_result(w, net, res, report.policy)?;
    }
    writeln!(
        w,
        "Detected {}/{} faults ({:.2}% coverage)",
        report.nb_detected(),
        report.nb_faults(),
        100.0 * report.coverage()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::generators;
    use crate::sim::{simulate_exhaustive, simulate_faults, DetectionPolicy, FaultSimConfig};
    use crate::{Gate, Network};

    #[test]
    fn test_truth_table() {
        let net = generators::testcases::and2();
        let table = simulate_exhaustive(&net).unwrap();
        let mut buf = Vec::new();
        write_truth_table(&mut buf, &net, &table).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "# a b | o\n0: 00 | 0\n1: 10 | 0\n2: 01 | 0\n3: 11 | 1\n");
    }

    #[test]
    fn test_fault_report() {
        let net = generators::testcases::and2();
        let report = simulate_faults(&net, &FaultSimConfig::default()).unwrap();
        let mut buf = Vec::new();
        write_fault_report(&mut buf, &net, &report).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "a stuck-at-0: detected by pattern 3 (a=1 b=1)");
        assert_eq!(lines[1], "a stuck-at-1: detected by pattern 2 (a=0 b=1)");
        assert_eq!(lines[4], "Detected 4/4 faults (100.00% coverage)");
    }

    #[test]
    fn test_undetected_and_all_patterns() {
        let mut net = generators::testcases::and2();
        let c = net.add_input("c").unwrap();
        let w = net.add_internal("w").unwrap();
        net.add_gate(Gate::buf(c), w).unwrap();
        let config = FaultSimConfig {
            policy: DetectionPolicy::All,
            ..Default::default()
        };
        let report = simulate_faults(&net, &config).unwrap();
        let mut buf = Vec::new();
        write_fault_report(&mut buf, &net, &report).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("a stuck-at-1: detected by patterns 2, 6\n"));
        assert!(text.contains("c stuck-at-0: undetected\n"));
        assert!(text.contains("w stuck-at-1: undetected\n"));
        assert!(text.ends_with("Detected 4/8 faults (50.00% coverage)\n"));
    }

    #[test]
    fn test_all_patterns_single_detection() {
        // o = a & b & c: a stuck at 0 is only visible with all inputs at 1
        let mut net = Network::new();
        let a = net.add_input("a").unwrap();
        let b = net.add_input("b").unwrap();
        let c = net.add_input("c").unwrap();
        let w = net.add_internal("w").unwrap();
        let o = net.add_output("o").unwrap();
        net.add_gate(Gate::and(a, b), w).unwrap();
        net.add_gate(Gate::and(w, c), o).unwrap();
        let config = FaultSimConfig {
            policy: DetectionPolicy::All,
            ..Default::default()
        };
        let report = simulate_faults(&net, &config).unwrap();
        let mut buf = Vec::new();
        write_fault_report(&mut buf, &net, &report).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("a stuck-at-0: detected by patterns 7\n"));
        assert!(!text.contains("(a=1 b=1 c=1)"));
    }
}
