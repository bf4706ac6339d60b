// src/quantum/wires.rs
//! Wire labels and ordered wire registers
//!
//! A [`Wire`] names one qubit. A [`Wires`] value is an ordered sequence of
//! wires; its order fixes which tensor factor each qubit occupies whenever a
//! matrix is built over it (the first wire is the most significant qubit).

use std::fmt::{self, Display};
use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::{QuantumError, QuantumResult};

/// A single qubit label
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Wire {
    /// Integer label, the usual case
    Index(i64),

    /// Named label, e.g. `"ancilla"`
    Label(String),
}

impl Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wire::Index(i) => write!(f, "{}", i),
            Wire::Label(s) => write!(f, "{}", s),
        }
    }
}

impl From<i32> for Wire {
    fn from(i: i32) -> Self {
        Wire::Index(i as i64)
    }
}

impl From<i64> for Wire {
    fn from(i: i64) -> Self {
        Wire::Index(i)
    }
}

impl From<usize> for Wire {
    fn from(i: usize) -> Self {
        Wire::Index(i as i64)
    }
}

impl From<&str> for Wire {
    fn from(s: &str) -> Self {
        Wire::Label(s.to_string())
    }
}

impl From<String> for Wire {
    fn from(s: String) -> Self {
        Wire::Label(s)
    }
}

impl From<&Wire> for Wire {
    fn from(w: &Wire) -> Self {
        w.clone()
    }
}

/// An ordered sequence of wires
///
/// Duplicates are representable; code that needs distinct wires checks with
/// [`Wires::first_duplicate`] and reports [`QuantumError::DuplicateWire`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wires(Vec<Wire>);

impl Wires {
    /// Create a register from anything convertible to wires
    pub fn new<I, W>(wires: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<Wire>,
    {
        Wires(wires.into_iter().map(Into::into).collect())
    }

    /// The register `0, 1, ..., n - 1`
    pub fn range(n: usize) -> Self {
        Wires((0..n).map(Wire::from).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Wire> {
        self.0.iter()
    }

    pub fn get(&self, i: usize) -> Option<&Wire> {
        self.0.get(i)
    }

    pub fn as_slice(&self) -> &[Wire] {
        &self.0
    }

    pub fn contains(&self, wire: &Wire) -> bool {
        self.0.contains(wire)
    }

    /// Position of `wire` in this register
    pub fn index_of(&self, wire: &Wire) -> Option<usize> {
        self.0.iter().position(|w| w == wire)
    }

    /// Positions of every wire of `subset` in this register, in `subset` order
    pub fn indices(&self, subset: &Wires) -> QuantumResult<Vec<usize>> {
        subset.iter()
            .map(|w| {
                self.index_of(w).ok_or_else(|| QuantumError::WireNotInOrder {
                    wire: w.clone(),
                    wire_order: self.clone(),
                })
            })
            .collect()
    }

    /// Returns true if every wire of `other` is in this register
    pub fn contains_wires(&self, other: &Wires) -> bool {
        other.iter().all(|w| self.contains(w))
    }

    /// The first wire that appears more than once, if any
    pub fn first_duplicate(&self) -> Option<&Wire> {
        self.0.iter().enumerate()
            .find_map(|(k, w)| self.0[k + 1..].contains(w).then_some(w))
    }

    /// Fail with `DuplicateWire` unless all wires are distinct
    pub fn ensure_unique(&self) -> QuantumResult<()> {
        match self.first_duplicate() {
            Some(dup) => Err(QuantumError::DuplicateWire {
                wire: dup.clone(),
                wires: self.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Append `wire` unless it is already present
    pub fn push_unique(&mut self, wire: Wire) {
        if !self.contains(&wire) {
            self.0.push(wire);
        }
    }

    /// Wires present in every register, ordered as in the first
    pub fn shared_wires(list: &[Wires]) -> Wires {
        match list.split_first() {
            None => Wires::default(),
            Some((first, rest)) => Wires(
                first.iter()
                    .filter(|w| rest.iter().all(|other| other.contains(w)))
                    .cloned()
                    .collect(),
            ),
        }
    }

    /// Concatenation of all registers, order preserved
    pub fn all_wires(list: &[Wires]) -> Wires {
        Wires(list.iter().flat_map(|w| w.0.iter().cloned()).collect())
    }

    /// Union of all registers in first-occurrence order
    pub fn unique_wires(list: &[Wires]) -> Wires {
        let mut out = Wires::default();
        for wire in list.iter().flat_map(|w| w.iter()) {
            out.push_unique(wire.clone());
        }
        out
    }
}

impl Index<usize> for Wires {
    type Output = Wire;

    fn index(&self, i: usize) -> &Wire {
        &self.0[i]
    }
}

impl<W: Into<Wire>> FromIterator<W> for Wires {
    fn from_iter<I: IntoIterator<Item = W>>(iter: I) -> Self {
        Wires::new(iter)
    }
}

impl<W: Into<Wire>, const N: usize> From<[W; N]> for Wires {
    fn from(wires: [W; N]) -> Self {
        Wires::new(wires)
    }
}

impl<W: Into<Wire>> From<Vec<W>> for Wires {
    fn from(wires: Vec<W>) -> Self {
        Wires::new(wires)
    }
}

impl From<Wire> for Wires {
    fn from(wire: Wire) -> Self {
        Wires(vec![wire])
    }
}

impl<'a> IntoIterator for &'a Wires {
    type Item = &'a Wire;
    type IntoIter = std::slice::Iter<'a, Wire>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Wires {
    type Item = Wire;
    type IntoIter = std::vec::IntoIter<Wire>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Display for Wires {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.0.iter().map(|w| w.to_string()).collect();
        write!(f, "<Wires = [{}]>", labels.join(", "))
    }
}
