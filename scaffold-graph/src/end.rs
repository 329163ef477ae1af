use serde::{Deserialize, Serialize};
use std::fmt;

/// The two ends of a vertex's linear sequence: head (left) and tail (right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum End {
    H,
    T,
}

impl End {
    pub fn flip(self) -> End {
        match self {
            End::H => End::T,
            End::T => End::H,
        }
    }
}

impl fmt::Display for End {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            End::H => write!(f, "H"),
            End::T => write!(f, "T"),
        }
    }
}

/// Whether a scaffold edge's second sequence is concatenated as-is (`Same`)
/// or reverse-complemented (`Reverse`); also reused for a contig's strand
/// within a vertex's ordering record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Same,
    Reverse,
}

impl Orientation {
    pub fn flip(self) -> Orientation {
        match self {
            Orientation::Same => Orientation::Reverse,
            Orientation::Reverse => Orientation::Same,
        }
    }

    pub fn as_bit(self) -> u8 {
        match self {
            Orientation::Same => 0,
            Orientation::Reverse => 1,
        }
    }

    pub fn from_bit(bit: u8) -> Option<Orientation> {
        match bit {
            0 => Some(Orientation::Same),
            1 => Some(Orientation::Reverse),
            _ => None,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Same => write!(f, "+"),
            Orientation::Reverse => write!(f, "-"),
        }
    }
}
