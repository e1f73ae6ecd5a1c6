//! IO for .bench (ISCAS) files

use std::collections::HashSet;
use std::io::{BufRead, BufReader, Read};

use crate::error::{Error, Result};
use crate::{Gate, Network, Signal};

/// A gate statement: line number, output name, gate type and input names
struct Statement {
    line: usize,
    output: String,
    tp: String,
    inputs: Vec<String>,
}

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::Parse {
        line,
        message: message.into(),
    }
}

fn resolve(net: &Network, name: &str) -> Result<Signal> {
    net.signal_by_name(name)
        .ok_or_else(|| Error::UnknownSignal(name.to_string()))
}

fn build_gate(statement: &Statement, net: &Network) -> Result<Gate> {
    let sigs = statement
        .inputs
        .iter()
        .map(|n| resolve(net, n))
        .collect::<Result<Vec<Signal>>>()?;
    let tp = statement.tp.to_uppercase();
    let gate = match (tp.as_str(), sigs.as_slice()) {
        ("BUF" | "BUFF", [a]) => Gate::buf(*a),
        ("NOT", [a]) => Gate::not(*a),
        ("AND" | "OR", [a]) => Gate::buf(*a),
        ("NAND" | "NOR", [a]) => Gate::not(*a),
        ("AND", [a, b]) => Gate::and(*a, *b),
        ("OR", [a, b]) => Gate::or(*a, *b),
        ("NAND", [a, b]) => Gate::or(*a, *b).map(|s| !s),
        ("NOR", [a, b]) => Gate::and(*a, *b).map(|s| !s),
        ("BUF" | "BUFF" | "NOT" | "AND" | "OR" | "NAND" | "NOR", _) => {
            return Err(parse_error(
                statement.line,
                format!(
                    "{} gate with {} inputs is not supported",
                    statement.tp,
                    sigs.len()
                ),
            ));
        }
        _ => {
            return Err(parse_error(
                statement.line,
                format!("Unknown gate type {}", statement.tp),
            ))
        }
    };
    Ok(gate)
}

fn network_from_statements(
    statements: &[Statement],
    inputs: &[String],
    outputs: &[String],
) -> Result<Network> {
    let mut ret = Network::new();
    for name in inputs {
        ret.add_input(name)?;
    }
    for name in outputs {
        ret.add_output(name)?;
    }
    let mut driven = HashSet::new();
    for s in statements {
        if !driven.insert(s.output.as_str()) {
            return Err(parse_error(s.line, format!("{} is defined twice", s.output)));
        }
        if ret.signal_by_name(&s.output).is_none() {
            ret.add_internal(&s.output)?;
        }
    }
    for s in statements {
        let gate = build_gate(s, &ret)?;
        let output = resolve(&ret, &s.output)?;
        ret.add_gate(gate, output)?;
    }
    ret.check()?;
    Ok(ret)
}

/// Read a network in .bench format, as used by the ISCAS benchmarks
///
/// Only gates with one or two inputs are supported. Nand and Nor gates are
/// represented with inverted inputs. Signals that are neither inputs nor outputs
/// become internal signals:
/// ```text
///     # This is a comment
///     INPUT(i0)
///     INPUT(i1)
///     OUTPUT(x3)
///     x0 = AND(i0, i1)
///     x1 = NAND(x0, i1)
///     x2 = OR(x0, i0)
///     x3 = NOR(x2, x1)
///     x5 = BUF(x2)
///     x6 = NOT(x5)
/// ```
pub fn read_bench<R: Read>(r: R) -> Result<Network> {
    let mut statements = Vec::new();
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    for (i, l) in BufReader::new(r).lines().enumerate() {
        let line = i + 1;
        let s = l?;
        let t = s.trim();
        if t.is_empty() || t.starts_with('#') {
            continue;
        }
        if !t.contains('=') {
            let parts: Vec<_> = t
                .split(&['(', ')'])
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect();
            if parts.len() != 2 {
                return Err(parse_error(line, format!("Unexpected statement {t}")));
            }
            if ["INPUT", "PINPUT"].contains(&parts[0]) {
                inputs.push(parts[1].to_string());
            } else if ["OUTPUT", "POUTPUT"].contains(&parts[0]) {
                outputs.push(parts[1].to_string());
            } else {
                return Err(parse_error(line, format!("Unknown keyword {}", parts[0])));
            }
        } else {
            let parts: Vec<_> = t
                .split(&['=', '(', ',', ')'])
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .collect();
            if parts.len() < 2 {
                return Err(parse_error(line, format!("Unexpected statement {t}")));
            }
            statements.push(Statement {
                line,
                output: parts[0].clone(),
                tp: parts[1].clone(),
                inputs: parts[2..].to_vec(),
            });
        }
    }
    network_from_statements(&statements, &inputs, &outputs)
}

#[cfg(test)]
mod tests {
    use super::read_bench;
    use crate::sim::simulate_exhaustive;
    use crate::{Error, Gate};

    #[test]
    fn test_basic_read() {
        let example = "# .bench (ISCAS) file
INPUT(i0)
INPUT(i1)

OUTPUT(x3)
OUTPUT(x6)

x0 = AND(i0, i1)
x1 = NAND(i0, i1)
x2 = OR(x0, i0)
x3 = NOR(  x2, x1 )
x5 = BUFF(i0)
x6   =  NOT(x5)
";
        let net = read_bench(example.as_bytes()).unwrap();
        assert_eq!(net.nb_inputs(), 2);
        assert_eq!(net.nb_outputs(), 2);
        assert_eq!(net.nb_internals(), 4);
        assert_eq!(net.nb_gates(), 6);
        let i0 = net.signal_by_name("i0").unwrap();
        let i1 = net.signal_by_name("i1").unwrap();
        assert_eq!(net.gate(1), &Gate::or(!i0, !i1));

        // x3 = !(i0 | nand(i0, i1)), x6 = !i0
        let table = simulate_exhaustive(&net).unwrap();
        assert_eq!(
            table,
            vec![
                vec![false, true],
                vec![false, false],
                vec![false, true],
                vec![false, false],
            ]
        );
    }

    #[test]
    fn test_single_input_gates() {
        let example = "INPUT(a)
OUTPUT(o)
OUTPUT(p)
OUTPUT(q)
OUTPUT(r)
o = AND(a)
p = NAND(a)
q = OR(a)
r = NOR(a)
";
        let net = read_bench(example.as_bytes()).unwrap();
        let a = net.input(0);
        assert_eq!(net.gate(0), &Gate::buf(a));
        assert_eq!(net.gate(1), &Gate::not(a));
        assert_eq!(net.gate(2), &Gate::buf(a));
        assert_eq!(net.gate(3), &Gate::not(a));
        assert_eq!(
            simulate_exhaustive(&net).unwrap(),
            vec![
                vec![false, true, false, true],
                vec![true, false, true, false]
            ]
        );
    }

    #[test]
    fn test_errors() {
        let unknown = "INPUT(a)\nOUTPUT(o)\no = AND(a, b)\n";
        assert!(matches!(
            read_bench(unknown.as_bytes()),
            Err(Error::UnknownSignal(n)) if n == "b"
        ));
        let wide = "INPUT(a)\nINPUT(b)\nINPUT(c)\nOUTPUT(o)\no = AND(a, b, c)\n";
        assert!(matches!(
            read_bench(wide.as_bytes()),
            Err(Error::Parse { line: 5, .. })
        ));
        let xor = "INPUT(a)\nINPUT(b)\nOUTPUT(o)\no = XOR(a, b)\n";
        assert!(matches!(
            read_bench(xor.as_bytes()),
            Err(Error::Parse { line: 4, .. })
        ));
        let twice = "INPUT(a)\nOUTPUT(o)\no = NOT(a)\no = BUF(a)\n";
        assert!(matches!(
            read_bench(twice.as_bytes()),
            Err(Error::Parse { line: 4, .. })
        ));
    }
}
