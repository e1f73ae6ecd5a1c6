//! Reader for structural Verilog netlists made of continuous assignments

use std::collections::HashSet;
use std::io::Read;

use crate::error::{Error, Result};
use crate::{Gate, Network, Signal};

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::Parse {
        line,
        message: message.into(),
    }
}

/// Remove the comments, keeping the line breaks
fn strip_comments(text: &str) -> String {
    let mut ret = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '/' && chars.peek() == Some(&'/') {
            for c in chars.by_ref() {
                if c == '\n' {
                    ret.push('\n');
                    break;
                }
            }
        } else if c == '/' && chars.peek() == Some(&'*') {
            chars.next();
            let mut prev = ' ';
            for c in chars.by_ref() {
                if c == '\n' {
                    ret.push('\n');
                }
                if prev == '*' && c == '/' {
                    break;
                }
                prev = c;
            }
        } else {
            ret.push(c);
        }
    }
    ret
}

/// Split the text in statements separated by semicolons, with the line where each statement starts
fn split_statements(text: &str) -> Vec<(usize, String)> {
    let mut ret = Vec::new();
    let mut line = 1;
    let mut start_line = 1;
    let mut current = String::new();
    for c in text.chars() {
        if c == ';' {
            ret.push((start_line, current.trim().to_string()));
            current.clear();
            continue;
        }
        if current.trim().is_empty() {
            start_line = line;
        }
        if c == '\n' {
            line += 1;
        }
        current.push(c);
    }
    if !current.trim().is_empty() {
        ret.push((start_line, current.trim().to_string()));
    }
    ret
}

/// Split a statement into its keyword and the rest
fn split_keyword(statement: &str) -> (&str, &str) {
    let statement = statement.trim_start();
    match statement.find(char::is_whitespace) {
        Some(pos) => (&statement[..pos], statement[pos..].trim()),
        None => (statement, ""),
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '$' || c == '.')
}

/// Parse a comma-separated list of declared names
fn parse_names(line: usize, list: &str) -> Result<Vec<String>> {
    let mut ret = Vec::new();
    for name in list.split(',').map(|s| s.trim()) {
        if name.contains('[') {
            return Err(parse_error(line, format!("Bus {name} is not supported")));
        }
        if !is_valid_name(name) {
            return Err(parse_error(line, format!("Invalid signal name \"{name}\"")));
        }
        ret.push(name.to_string());
    }
    Ok(ret)
}

/// Parse an operand with optional negations
fn parse_operand(line: usize, net: &Network, operand: &str) -> Result<Signal> {
    let mut name = operand.trim();
    let mut inv = false;
    while let Some(rest) = name.strip_prefix('~') {
        inv = !inv;
        name = rest.trim_start();
    }
    if !is_valid_name(name) {
        return Err(parse_error(line, format!("Unsupported operand \"{operand}\"")));
    }
    let s = net
        .signal_by_name(name)
        .ok_or_else(|| Error::UnknownSignal(name.to_string()))?;
    Ok(s ^ inv)
}

/// Parse the right-hand side of an assignment
fn parse_expression(line: usize, net: &Network, expr: &str) -> Result<Gate> {
    let has_and = expr.contains('&');
    let has_or = expr.contains('|');
    if has_and && has_or {
        return Err(parse_error(line, format!("Mixed operators in \"{expr}\"")));
    }
    if has_and || has_or {
        let op = if has_and { '&' } else { '|' };
        let operands: Vec<&str> = expr.split(op).collect();
        if operands.len() != 2 {
            return Err(parse_error(
                line,
                format!("Only 2-input gates are supported in \"{expr}\""),
            ));
        }
        let a = parse_operand(line, net, operands[0])?;
        let b = parse_operand(line, net, operands[1])?;
        Ok(if has_and {
            Gate::and(a, b)
        } else {
            Gate::or(a, b)
        })
    } else {
        let a = parse_operand(line, net, expr)?;
        if a.is_inverted() {
            Ok(Gate::not(!a))
        } else {
            Ok(Gate::buf(a))
        }
    }
}

/// Read a network from a structural Verilog module
///
/// Only continuous assignments of single-bit signals are supported, with at most
/// one And or Or operator and negated operands:
/// ```text
///     // This is a comment
///     module c17 (N1, N2, N3, N22);
///     input N1, N2, N3;
///     output N22;
///     wire n1;
///     assign n1 = ~N1 & N2;
///     assign N22 = n1 | ~N3;
///     endmodule
/// ```
/// Inputs, outputs and wires become the primary inputs, primary outputs and
/// internal signals. An assignment of a plain name is a buffer, and of a single
/// negated name an inverter. All declarations are processed before the assignments.
pub fn read_verilog<R: Read>(mut r: R) -> Result<Network> {
    let mut text = String::new();
    r.read_to_string(&mut text)?;
    let text = strip_comments(&text);

    let mut ret = Network::new();
    let mut assignments = Vec::new();
    for (line, statement) in split_statements(&text) {
        let mut statement = statement.as_str();
        // endmodule is not followed by a semicolon
        while let Some(rest) = statement.strip_prefix("endmodule") {
            statement = rest.trim_start();
        }
        if statement.is_empty() {
            continue;
        }
        let (keyword, rest) = split_keyword(statement);
        match keyword {
            "module" => (),
            "input" => {
                for name in parse_names(line, rest)? {
                    ret.add_input(&name)?;
                }
            }
            "output" => {
                for name in parse_names(line, rest)? {
                    ret.add_output(&name)?;
                }
            }
            "wire" => {
                for name in parse_names(line, rest)? {
                    ret.add_internal(&name)?;
                }
            }
            "assign" => assignments.push((line, rest.to_string())),
            _ => {
                return Err(parse_error(
                    line,
                    format!("Unsupported statement \"{statement}\""),
                ))
            }
        }
    }

    let mut driven = HashSet::new();
    for (line, assignment) in assignments {
        let Some((lhs, rhs)) = assignment.split_once('=') else {
            return Err(parse_error(line, format!("Invalid assignment \"{assignment}\"")));
        };
        let lhs = lhs.trim();
        if !driven.insert(lhs.to_string()) {
            return Err(parse_error(line, format!("{lhs} is assigned twice")));
        }
        let output = ret
            .signal_by_name(lhs)
            .ok_or_else(|| Error::UnknownSignal(lhs.to_string()))?;
        let gate = parse_expression(line, &ret, rhs.trim())?;
        ret.add_gate(gate, output)?;
    }
    ret.check()?;
    Ok(ret)
}
