//! Laminate stiffness assembly (A, B, D matrices)

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{LaminateError, LaminateResult};
use crate::laminate::{Laminate, OrthotropicMaterial};
use crate::math::{self, Mat3, Mat6};

/// The three 3x3 stiffness matrices of classical laminate theory.
///
/// `a` relates in-plane resultants to mid-plane strain, `d` relates moments
/// to curvature, and `b` couples the two. `a` and `d` are symmetric; `b`
/// vanishes for symmetric stacking sequences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StiffnessMatrices {
    /// Extensional stiffness in N/m
    pub a: Mat3,
    /// Coupling stiffness in N
    pub b: Mat3,
    /// Bending stiffness in N*m
    pub d: Mat3,
    /// Total laminate thickness in m
    pub thickness: f64,
}

/// Effective in-plane engineering constants of the laminate
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EffectiveModuli {
    /// Effective modulus along the laminate x-axis in Pa
    pub ex: f64,
    /// Effective modulus along the laminate y-axis in Pa
    pub ey: f64,
    /// Effective in-plane shear modulus in Pa
    pub gxy: f64,
    /// Effective major Poisson ratio
    pub nu_xy: f64,
}

impl StiffnessMatrices {
    /// Assemble A, B, D from the ordered ply stack.
    ///
    /// Ply boundaries come from the centered through-thickness coordinates;
    /// each ply contributes its transformed stiffness weighted by the first,
    /// second and third moment of its z-interval, accumulated in stack order.
    pub fn assemble(
        laminate: &Laminate,
        materials: &HashMap<String, OrthotropicMaterial>,
    ) -> LaminateResult<Self> {
        if laminate.is_empty() {
            return Err(LaminateError::EmptyLaminate);
        }

        let z = laminate.boundary_coordinates();
        let mut a = Mat3::zeros();
        let mut b = Mat3::zeros();
        let mut d = Mat3::zeros();

        for (k, ply) in laminate.plies().iter().enumerate() {
            ply.validate()?;
            let material = materials
                .get(&ply.material)
                .ok_or_else(|| LaminateError::MaterialNotFound(ply.material.clone()))?;

            let q_bar = ply.transformed_stiffness(material)?;
            let (zb, zt) = (z[k], z[k + 1]);

            a += q_bar * (zt - zb);
            b += q_bar * (0.5 * (zt * zt - zb * zb));
            d += q_bar * ((zt * zt * zt - zb * zb * zb) / 3.0);
        }

        debug!(
            "assembled ABD for {} plies, thickness {:.4e} m",
            laminate.len(),
            laminate.total_thickness()
        );

        Ok(Self {
            a,
            b,
            d,
            thickness: laminate.total_thickness(),
        })
    }

    /// Assemble the coupled 6x6 relation: A top-left, B top-right, its
    /// transpose bottom-left, D bottom-right
    pub fn abd(&self) -> Mat6 {
        let mut abd = Mat6::zeros();
        abd.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.a);
        abd.fixed_view_mut::<3, 3>(0, 3).copy_from(&self.b);
        abd.fixed_view_mut::<3, 3>(3, 0).copy_from(&self.b.transpose());
        abd.fixed_view_mut::<3, 3>(3, 3).copy_from(&self.d);
        abd
    }

    /// True if the coupling matrix is zero relative to the extensional
    /// stiffness scale, i.e. the laminate behaves as a symmetric stack.
    ///
    /// The comparison normalizes B by the thickness so both operands carry
    /// the units of A.
    pub fn coupling_is_negligible(&self, tol: f64) -> bool {
        let a_scale = self.a.amax();
        if a_scale == 0.0 {
            return self.b.amax() == 0.0;
        }
        self.b.amax() / self.thickness.max(f64::MIN_POSITIVE) < tol * a_scale
    }

    /// Effective in-plane engineering constants from the inverted coupled
    /// relation. Fails with `SingularLaminate` for a stack with no stiffness
    /// in some direction.
    pub fn effective_moduli(&self, singularity_tol: f64) -> LaminateResult<EffectiveModuli> {
        let abd = self.abd();
        let scale = math::determinant_scale(&abd);
        let det = abd.determinant();
        if !det.is_finite() || scale == 0.0 || det.abs() < singularity_tol * scale {
            return Err(LaminateError::SingularLaminate);
        }
        let compliance = abd
            .try_inverse()
            .ok_or(LaminateError::SingularLaminate)?;

        let h = self.thickness;
        Ok(EffectiveModuli {
            ex: 1.0 / (h * compliance[(0, 0)]),
            ey: 1.0 / (h * compliance[(1, 1)]),
            gxy: 1.0 / (h * compliance[(2, 2)]),
            nu_xy: -compliance[(0, 1)] / compliance[(0, 0)],
        })
    }
}
