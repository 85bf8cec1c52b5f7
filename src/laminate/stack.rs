//! Ordered stacking sequence

use serde::{Deserialize, Serialize};

use super::Ply;

/// An ordered stack of plies analyzed as one structural unit.
///
/// Order is stack order from the bottom face to the top face and is never
/// re-sorted: the signed through-thickness coordinate of each ply, and with
/// it the bending coupling, follows directly from this ordering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Laminate {
    plies: Vec<Ply>,
}

impl Laminate {
    /// Create an empty laminate
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an existing ply sequence (bottom face first)
    pub fn from_plies(plies: Vec<Ply>) -> Self {
        Self { plies }
    }

    /// Append a ply on the top face
    pub fn push(&mut self, ply: Ply) {
        self.plies.push(ply);
    }

    /// Plies in stack order
    pub fn plies(&self) -> &[Ply] {
        &self.plies
    }

    pub fn len(&self) -> usize {
        self.plies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plies.is_empty()
    }

    /// Total thickness (sum of ply thicknesses)
    pub fn total_thickness(&self) -> f64 {
        self.plies.iter().map(|p| p.thickness).sum()
    }

    /// Ply boundary coordinates, centered so the mid-plane is z = 0.
    ///
    /// Returns `len() + 1` values: `z[k]` is the bottom face of ply `k`,
    /// `z[k + 1]` its top face. The centering is what makes the coupling
    /// matrix vanish for symmetric stacks.
    pub fn boundary_coordinates(&self) -> Vec<f64> {
        let half = self.total_thickness() / 2.0;
        let mut z = Vec::with_capacity(self.plies.len() + 1);
        let mut cursor = -half;
        z.push(cursor);
        for ply in &self.plies {
            cursor += ply.thickness;
            z.push(cursor);
        }
        z
    }

    /// True if ply k and ply n-1-k match in material, thickness and
    /// orientation for all k
    pub fn is_symmetric(&self) -> bool {
        let n = self.plies.len();
        (0..n / 2).all(|k| {
            let a = &self.plies[k];
            let b = &self.plies[n - 1 - k];
            a.material == b.material && a.thickness == b.thickness && a.angle_deg == b.angle_deg
        })
    }
}
