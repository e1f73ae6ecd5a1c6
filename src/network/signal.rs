use std::fmt;
use std::ops::{BitXor, BitXorAssign, Not};

/// Handle to a signal of a network, with an optional inversion
///
/// The handle is an index in the signal arena of a [`crate::Network`].
/// The lowest bit marks an inverted read, and is only meaningful on gate inputs.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default)]
pub struct Signal {
    a: u32,
}

impl Signal {
    /// Create a signal from its index in the network
    pub fn from_index(i: usize) -> Signal {
        assert!(i < 0x8000_0000, "Signal index {i} out of range");
        Signal { a: (i as u32) << 1 }
    }

    /// Obtain the index of the signal in the network, ignoring the inversion
    pub fn index(&self) -> usize {
        (self.a >> 1) as usize
    }

    /// Returns true if the signal is read inverted
    pub fn is_inverted(&self) -> bool {
        self.a & 1 != 0
    }

    /// Clear the inversion, if set
    pub fn without_inversion(&self) -> Signal {
        Signal { a: self.a & !1u32 }
    }
}

impl Not for Signal {
    type Output = Signal;
    fn not(self) -> Signal {
        Signal { a: self.a ^ 1u32 }
    }
}

impl Not for &'_ Signal {
    type Output = Signal;
    fn not(self) -> Signal {
        Signal { a: self.a ^ 1u32 }
    }
}

impl BitXorAssign<bool> for Signal {
    fn bitxor_assign(&mut self, rhs: bool) {
        self.a ^= rhs as u32;
    }
}

impl BitXor<bool> for Signal {
    type Output = Signal;
    fn bitxor(self, rhs: bool) -> Self::Output {
        let mut l = self;
        l ^= rhs;
        l
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_inverted() {
            write!(f, "!")?;
        }
        write!(f, "s{}", self.index())
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
