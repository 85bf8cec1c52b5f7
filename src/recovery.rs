//! Per-ply stress/strain recovery

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{LaminateError, LaminateResult};
use crate::laminate::{Laminate, OrthotropicMaterial};
use crate::math::{self, Vec3};
use crate::solver::DeformationState;

/// Through-thickness sampling location within a ply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlyFace {
    Bottom,
    Mid,
    Top,
}

impl PlyFace {
    pub fn label(&self) -> &'static str {
        match self {
            PlyFace::Bottom => "bottom",
            PlyFace::Mid => "mid",
            PlyFace::Top => "top",
        }
    }
}

/// Local (material-frame) stress and strain of one ply at one sampled
/// through-thickness coordinate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlyResult {
    /// Index of the ply in stack order (0 = bottom face)
    pub ply_index: usize,
    /// Sampled through-thickness coordinate in m (mid-plane = 0)
    pub z: f64,
    /// Which face of the ply was sampled
    pub face: PlyFace,
    /// Material-frame strain [e1, e2, gamma12]
    pub local_strain: Vec3,
    /// Material-frame stress [s1, s2, tau12] in Pa
    pub local_stress: Vec3,
}

/// Recover local ply states from the laminate deformation.
///
/// Strain varies linearly through the thickness (eps = eps0 + z * kappa), so
/// strain is continuous across ply boundaries while stress jumps wherever the
/// orientation changes. Sampling the top and bottom face of every ply
/// captures both extremes; `sample_midplane` adds the ply mid-height.
pub fn recover_ply_results(
    laminate: &Laminate,
    materials: &HashMap<String, OrthotropicMaterial>,
    deformation: &DeformationState,
    sample_midplane: bool,
) -> LaminateResult<Vec<PlyResult>> {
    if laminate.is_empty() {
        return Err(LaminateError::EmptyLaminate);
    }

    let z = laminate.boundary_coordinates();
    let eps0 = Vec3::new(deformation.ex, deformation.ey, deformation.exy);
    let kappa = Vec3::new(deformation.kx, deformation.ky, deformation.kxy);

    let samples_per_ply = if sample_midplane { 3 } else { 2 };
    let mut results = Vec::with_capacity(laminate.len() * samples_per_ply);

    for (k, ply) in laminate.plies().iter().enumerate() {
        let material = materials
            .get(&ply.material)
            .ok_or_else(|| LaminateError::MaterialNotFound(ply.material.clone()))?;
        let q = material.reduced_stiffness()?;
        let to_local = math::strain_transformation(ply.angle_rad());

        let mut faces = vec![(PlyFace::Bottom, z[k]), (PlyFace::Top, z[k + 1])];
        if sample_midplane {
            faces.insert(1, (PlyFace::Mid, 0.5 * (z[k] + z[k + 1])));
        }

        for (face, z_sample) in faces {
            let global_strain = eps0 + kappa * z_sample;
            let local_strain = to_local * global_strain;
            let local_stress = q * local_strain;

            results.push(PlyResult {
                ply_index: k,
                z: z_sample,
                face,
                local_strain,
                local_stress,
            });
        }
    }

    Ok(results)
}
