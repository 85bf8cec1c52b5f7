//! Laminate model - material table, layup, and the analysis facade

use std::collections::HashMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisOptions;
use crate::error::{LaminateError, LaminateResult};
use crate::failure;
use crate::laminate::{Laminate, OrthotropicMaterial, Ply};
use crate::recovery;
use crate::results::AnalysisReport;
use crate::solver::{self, DeformationState, LoadCase};
use crate::stiffness::{EffectiveModuli, StiffnessMatrices};

/// The laminate analysis model: a read-only material table plus an ordered
/// layup.
///
/// Plies reference materials by name; the table owns them, so an arbitrary
/// number of plies can share one material without any pointer graph. The
/// model holds no solution state - `analyze` is a pure function of the model
/// and the load case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaminateModel {
    /// Materials in the model
    pub materials: HashMap<String, OrthotropicMaterial>,
    /// Ordered layup, bottom face first
    pub laminate: Laminate,
}

impl LaminateModel {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material to the table.
    ///
    /// Validates the engineering constants up front so an unphysical material
    /// is rejected at configuration time, not in the middle of an analysis.
    pub fn add_material(&mut self, name: &str, material: OrthotropicMaterial) -> LaminateResult<()> {
        if self.materials.contains_key(name) {
            return Err(LaminateError::DuplicateName(name.to_string()));
        }
        material.validate()?;
        self.materials.insert(name.to_string(), material);
        Ok(())
    }

    /// Append a ply on the top face of the layup
    pub fn add_ply(&mut self, ply: Ply) -> LaminateResult<()> {
        ply.validate()?;
        if !self.materials.contains_key(&ply.material) {
            return Err(LaminateError::MaterialNotFound(ply.material.clone()));
        }
        self.laminate.push(ply);
        Ok(())
    }

    /// Append `count` identical plies
    pub fn add_plies(&mut self, thickness: f64, angle_deg: f64, material: &str, count: usize) -> LaminateResult<()> {
        for _ in 0..count {
            self.add_ply(Ply::new(thickness, angle_deg, material))?;
        }
        Ok(())
    }

    /// Assemble the laminate stiffness matrices
    pub fn stiffness(&self) -> LaminateResult<StiffnessMatrices> {
        StiffnessMatrices::assemble(&self.laminate, &self.materials)
    }

    /// Effective in-plane engineering constants of the current layup
    pub fn effective_moduli(&self, options: &AnalysisOptions) -> LaminateResult<EffectiveModuli> {
        self.stiffness()?.effective_moduli(options.singularity_tol)
    }

    /// Run the full analysis chain for one load case: stiffness assembly,
    /// deformation solve, per-ply recovery, and failure evaluation.
    ///
    /// Margins below 1.0 in the returned report signal structural failure
    /// under the applied load; they are a successful computation, distinct
    /// from the `Err` cases (empty layup, unknown material, unphysical
    /// constants, singular stiffness).
    pub fn analyze(
        &self,
        load: &LoadCase,
        options: &AnalysisOptions,
    ) -> LaminateResult<AnalysisReport> {
        let stiffness = self.stiffness()?;
        let coupling_negligible = stiffness.coupling_is_negligible(options.symmetry_tol);
        debug!(
            "coupling {} within tol {:.1e}",
            if coupling_negligible { "negligible" } else { "present" },
            options.symmetry_tol
        );

        let deformation = solver::solve_deformation(&stiffness, load, options.singularity_tol)?;

        let ply_results = recovery::recover_ply_results(
            &self.laminate,
            &self.materials,
            &deformation,
            options.sample_midplane,
        )?;

        let plies = self.laminate.plies();
        let ply_margins = failure::ply_margins(
            &ply_results,
            |ply_index| self.materials[&plies[ply_index].material].strengths,
            options.criterion,
        );

        let (min_margin, critical_ply) = ply_margins
            .iter()
            .min_by(|a, b| a.margin.total_cmp(&b.margin))
            .map(|m| (m.margin, Some(m.ply_index)))
            .unwrap_or((f64::INFINITY, None));

        info!(
            "analysis complete: {} plies, min margin {:.3}{}",
            plies.len(),
            min_margin,
            critical_ply
                .map(|p| format!(" at ply {p}"))
                .unwrap_or_default()
        );

        Ok(AnalysisReport {
            stiffness,
            deformation,
            coupling_negligible,
            ply_results,
            ply_margins,
            min_margin,
            critical_ply,
        })
    }

    /// Forward direction: resultants produced by a prescribed deformation
    pub fn resultants_for(&self, deformation: &DeformationState) -> LaminateResult<LoadCase> {
        Ok(solver::resultants_for(&self.stiffness()?, deformation))
    }
}
