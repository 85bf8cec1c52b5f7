//! Aggregate analysis report

use serde::{Deserialize, Serialize};

use crate::failure::PlyMargin;
use crate::recovery::PlyResult;
use crate::solver::DeformationState;
use crate::stiffness::StiffnessMatrices;

/// Full result of one laminate analysis: effective stiffness, global
/// deformation, per-ply recovery, and per-ply failure margins.
///
/// The report is the sole output surface of the engine; downstream sizing
/// tools iterate on it (e.g. grow thickness until `min_margin` clears their
/// required safety factor).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Assembled laminate stiffness
    pub stiffness: StiffnessMatrices,
    /// Mid-plane strain and curvature under the applied load
    pub deformation: DeformationState,
    /// Whether the coupling matrix was zero within the symmetry tolerance
    pub coupling_negligible: bool,
    /// Local stress/strain per ply and sampled face
    pub ply_results: Vec<PlyResult>,
    /// Margin of safety per ply with governing mode
    pub ply_margins: Vec<PlyMargin>,
    /// Minimum margin across the whole laminate (first-ply-failure indicator)
    pub min_margin: f64,
    /// Ply index holding the minimum margin
    pub critical_ply: Option<usize>,
}

impl AnalysisReport {
    /// True if every ply clears the given required safety factor
    pub fn meets_margin(&self, required: f64) -> bool {
        self.min_margin >= required
    }

    /// Margin record for one ply, if present
    pub fn margin_for_ply(&self, ply_index: usize) -> Option<&PlyMargin> {
        self.ply_margins.iter().find(|m| m.ply_index == ply_index)
    }
}
