//! Analysis options

use serde::{Deserialize, Serialize};

use crate::failure::FailureCriterionKind;

/// Options for a laminate analysis run.
///
/// The numerical tolerances are deliberately configuration rather than
/// constants so boundary conditions can be probed precisely in tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Failure criterion applied to every ply
    pub criterion: FailureCriterionKind,
    /// Relative tolerance below which the coupled stiffness determinant is
    /// treated as singular
    pub singularity_tol: f64,
    /// Relative tolerance below which the coupling matrix is reported as zero
    pub symmetry_tol: f64,
    /// Also sample the mid-height of every ply during recovery
    pub sample_midplane: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            criterion: FailureCriterionKind::MaxStress,
            singularity_tol: 1e-12,
            symmetry_tol: 1e-9,
            sample_midplane: false,
        }
    }
}

impl AnalysisOptions {
    /// Options using the maximum-stress criterion
    pub fn max_stress() -> Self {
        Self::default()
    }

    /// Options using the Tsai-Wu interactive criterion
    pub fn tsai_wu() -> Self {
        Self {
            criterion: FailureCriterionKind::TsaiWu,
            ..Self::default()
        }
    }

    /// Set the singularity tolerance
    pub fn with_singularity_tol(mut self, tol: f64) -> Self {
        self.singularity_tol = tol;
        self
    }

    /// Set the symmetry-reporting tolerance
    pub fn with_symmetry_tol(mut self, tol: f64) -> Self {
        self.symmetry_tol = tol;
        self
    }

    /// Enable mid-height sampling
    pub fn with_midplane_sampling(mut self) -> Self {
        self.sample_midplane = true;
        self
    }
}
