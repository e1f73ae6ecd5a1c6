use core::slice;
use std::fmt;

use crate::network::signal::Signal;

/// Basic types of logic gates
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub enum GateType {
    /// 2-input And gate
    And,
    /// 2-input Or gate
    Or,
    /// Inverter
    Not,
    /// Buffer
    Buf,
}

/// Logic gate representation
///
/// Each input may be inverted before the logic function is applied, using the
/// inversion bit of its [`Signal`]. The output of the gate is stored separately
/// by the network.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Gate {
    /// 2-input And gate
    And([Signal; 2]),
    /// 2-input Or gate
    Or([Signal; 2]),
    /// Inverter; the second input of the netlist is ignored
    Not(Signal),
    /// Buffer; the second input of the netlist is ignored
    Buf(Signal),
}

impl Gate {
    /// Create a 2-input And
    pub fn and(a: Signal, b: Signal) -> Gate {
        Gate::And([a, b])
    }

    /// Create a 2-input Or
    pub fn or(a: Signal, b: Signal) -> Gate {
        Gate::Or([a, b])
    }

    /// Create an inverter
    pub fn not(a: Signal) -> Gate {
        Gate::Not(a)
    }

    /// Create a buffer
    pub fn buf(a: Signal) -> Gate {
        Gate::Buf(a)
    }

    /// Type of the gate
    pub fn gate_type(&self) -> GateType {
        match self {
            Gate::And(_) => GateType::And,
            Gate::Or(_) => GateType::Or,
            Gate::Not(_) => GateType::Not,
            Gate::Buf(_) => GateType::Buf,
        }
    }

    /// Obtain all signals feeding this gate, with their inversion
    pub fn dependencies(&self) -> &[Signal] {
        use Gate::*;
        match self {
            And(s) | Or(s) => s,
            Not(s) | Buf(s) => slice::from_ref(s),
        }
    }

    /// Evaluate the gate, given a function returning the value of a non-inverted signal
    ///
    /// Input inversions are applied before the logic function.
    pub fn eval<F: Fn(Signal) -> bool>(&self, value: F) -> bool {
        let read = |s: &Signal| value(s.without_inversion()) ^ s.is_inverted();
        use Gate::*;
        match self {
            And([a, b]) => read(a) & read(b),
            Or([a, b]) => read(a) | read(b),
            Not(a) => !read(a),
            Buf(a) => read(a),
        }
    }

    /// Apply a function to every input of the gate
    pub fn map<F: Fn(Signal) -> Signal>(&self, f: F) -> Gate {
        use Gate::*;
        match self {
            And([a, b]) => And([f(*a), f(*b)]),
            Or([a, b]) => Or([f(*a), f(*b)]),
            Not(a) => Not(f(*a)),
            Buf(a) => Buf(f(*a)),
        }
    }

    /// Returns true if some input is read inverted
    pub fn has_inverted_input(&self) -> bool {
        self.dependencies().iter().any(|s| s.is_inverted())
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GateType::And => "AND",
            GateType::Or => "OR",
            GateType::Not => "NOT",
            GateType::Buf => "BUF",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.gate_type())?;
        for (i, s) in self.dependencies().iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{s}")?;
        }
        write!(f, ")")
    }
}
