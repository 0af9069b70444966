//! Reel symbols and their fixed pay/weight table

use std::fmt;

use serde::{Deserialize, Serialize};

/// A reel symbol. Rarer symbols pay more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    A,
    B,
    C,
    D,
}

/// Every symbol in pool order
pub const SYMBOLS: [Symbol; 4] = [Symbol::A, Symbol::B, Symbol::C, Symbol::D];

impl Symbol {
    /// Payout per unit bet for three of a kind on a line
    pub fn multiplier(self) -> u64 {
        match self {
            Symbol::A => 5,
            Symbol::B => 4,
            Symbol::C => 3,
            Symbol::D => 2,
        }
    }

    /// Copies of this symbol in each reel's draw pool
    pub fn weight(self) -> usize {
        match self {
            Symbol::A => 2,
            Symbol::B => 4,
            Symbol::C => 6,
            Symbol::D => 8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::A => "A",
            Symbol::B => "B",
            Symbol::C => "C",
            Symbol::D => "D",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
