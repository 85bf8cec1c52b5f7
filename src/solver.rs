//! Load/deformation solver for the coupled stiffness relation

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::LaminateResult;
use crate::math::{self, Vec6};
use crate::stiffness::StiffnessMatrices;

/// Applied force and moment resultants per unit width, in the laminate
/// reference frame
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LoadCase {
    /// Normal force resultant along x in N/m
    pub nx: f64,
    /// Normal force resultant along y in N/m
    pub ny: f64,
    /// In-plane shear force resultant in N/m
    pub nxy: f64,
    /// Bending moment resultant about y (bending the x-direction) in N
    pub mx: f64,
    /// Bending moment resultant about x in N
    pub my: f64,
    /// Twisting moment resultant in N
    pub mxy: f64,
}

impl LoadCase {
    pub fn new(nx: f64, ny: f64, nxy: f64, mx: f64, my: f64, mxy: f64) -> Self {
        Self {
            nx,
            ny,
            nxy,
            mx,
            my,
            mxy,
        }
    }

    /// Pure axial load along the laminate x-axis
    pub fn axial(nx: f64) -> Self {
        Self {
            nx,
            ..Self::default()
        }
    }

    /// Pure bending about the laminate y-axis
    pub fn bending(mx: f64) -> Self {
        Self {
            mx,
            ..Self::default()
        }
    }

    /// Biaxial membrane loading of a cylindrical pressure shell: hoop
    /// resultant p*r and longitudinal resultant p*r/2
    pub fn pressure_shell(pressure: f64, radius: f64) -> Self {
        Self {
            nx: pressure * radius / 2.0,
            ny: pressure * radius,
            ..Self::default()
        }
    }

    pub fn to_vector(&self) -> Vec6 {
        Vec6::new(self.nx, self.ny, self.nxy, self.mx, self.my, self.mxy)
    }

    pub fn from_vector(v: &Vec6) -> Self {
        Self::new(v[0], v[1], v[2], v[3], v[4], v[5])
    }
}

/// Mid-plane strain and curvature in the laminate reference frame
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DeformationState {
    /// Mid-plane normal strain along x
    pub ex: f64,
    /// Mid-plane normal strain along y
    pub ey: f64,
    /// Mid-plane engineering shear strain
    pub exy: f64,
    /// Curvature in x in 1/m
    pub kx: f64,
    /// Curvature in y in 1/m
    pub ky: f64,
    /// Twist curvature in 1/m
    pub kxy: f64,
}

impl DeformationState {
    pub fn new(ex: f64, ey: f64, exy: f64, kx: f64, ky: f64, kxy: f64) -> Self {
        Self {
            ex,
            ey,
            exy,
            kx,
            ky,
            kxy,
        }
    }

    pub fn to_vector(&self) -> Vec6 {
        Vec6::new(self.ex, self.ey, self.exy, self.kx, self.ky, self.kxy)
    }

    pub fn from_vector(v: &Vec6) -> Self {
        Self::new(v[0], v[1], v[2], v[3], v[4], v[5])
    }
}

/// Solve the inverse relation: deformation from applied resultants.
///
/// Fails with `SingularLaminate` when the coupled matrix is not invertible
/// within `singularity_tol` (relative to the matrix scale) - a deliberate
/// failure rather than NaN propagation.
pub fn solve_deformation(
    stiffness: &StiffnessMatrices,
    load: &LoadCase,
    singularity_tol: f64,
) -> LaminateResult<DeformationState> {
    let abd = stiffness.abd();
    let x = math::solve_6x6(&abd, &load.to_vector(), singularity_tol)?;
    let deformation = DeformationState::from_vector(&x);
    debug!(
        "solved deformation: ex = {:.4e}, kx = {:.4e} 1/m",
        deformation.ex, deformation.kx
    );
    Ok(deformation)
}

/// Forward relation: resultants produced by a prescribed deformation.
///
/// Used for stiffness characterization under prescribed strain; always
/// well-defined, no inversion involved.
pub fn resultants_for(stiffness: &StiffnessMatrices, deformation: &DeformationState) -> LoadCase {
    let n = stiffness.abd() * deformation.to_vector();
    LoadCase::from_vector(&n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::laminate::{Laminate, OrthotropicMaterial, Ply};
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    fn sample_stiffness() -> StiffnessMatrices {
        let mut materials = HashMap::new();
        materials.insert("cfrp".to_string(), OrthotropicMaterial::carbon_epoxy());
        let t = 0.125e-3;
        let lam = Laminate::from_plies(vec![
            Ply::new(t, 0.0, "cfrp"),
            Ply::new(t, 45.0, "cfrp"),
            Ply::new(t, -45.0, "cfrp"),
            Ply::new(t, 90.0, "cfrp"),
        ]);
        StiffnessMatrices::assemble(&lam, &materials).unwrap()
    }

    #[test]
    fn test_round_trip_deformation() {
        let stiffness = sample_stiffness();
        let prescribed = DeformationState::new(1e-3, -2e-4, 5e-4, 0.1, -0.05, 0.02);

        let load = resultants_for(&stiffness, &prescribed);
        let recovered = solve_deformation(&stiffness, &load, 1e-12).unwrap();

        assert_relative_eq!(
            recovered.to_vector(),
            prescribed.to_vector(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_axial_load_produces_axial_strain() {
        let stiffness = sample_stiffness();
        let load = LoadCase::axial(1000.0);
        let deformation = solve_deformation(&stiffness, &load, 1e-12).unwrap();

        assert!(deformation.ex > 0.0);
        // transverse contraction
        assert!(deformation.ey < 0.0);
    }

    #[test]
    fn test_zero_thickness_stack_is_singular() {
        let mut materials = HashMap::new();
        materials.insert("cfrp".to_string(), OrthotropicMaterial::carbon_epoxy());
        let lam = Laminate::from_plies(vec![
            Ply::new(0.0, 0.0, "cfrp"),
            Ply::new(0.0, 90.0, "cfrp"),
        ]);
        let stiffness = StiffnessMatrices::assemble(&lam, &materials).unwrap();

        let result = solve_deformation(&stiffness, &LoadCase::axial(1000.0), 1e-12);
        assert!(matches!(
            result,
            Err(crate::error::LaminateError::SingularLaminate)
        ));
    }

    #[test]
    fn test_pressure_shell_resultants() {
        let load = LoadCase::pressure_shell(0.5e6, 1.0);
        assert_relative_eq!(load.ny, 0.5e6);
        assert_relative_eq!(load.nx, 0.25e6);
    }
}
