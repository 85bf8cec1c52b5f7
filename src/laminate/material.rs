//! Orthotropic ply material properties

use serde::{Deserialize, Serialize};

use crate::error::{LaminateError, LaminateResult};
use crate::math::Mat3;

/// Strength limits of a unidirectional ply, all stored as positive magnitudes
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StrengthLimits {
    /// Longitudinal (fiber direction) tensile strength in Pa
    pub xt: f64,
    /// Longitudinal compressive strength in Pa
    pub xc: f64,
    /// Transverse tensile strength in Pa
    pub yt: f64,
    /// Transverse compressive strength in Pa
    pub yc: f64,
    /// In-plane shear strength in Pa
    pub s: f64,
}

impl StrengthLimits {
    pub fn new(xt: f64, xc: f64, yt: f64, yc: f64, s: f64) -> Self {
        Self { xt, xc, yt, yc, s }
    }
}

/// Orthotropic material for a fiber-reinforced ply.
///
/// Four independent engineering constants in the material frame (1 = fiber
/// direction, 2 = transverse) plus strength limits. Shared read-only across
/// all plies that reference it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrthotropicMaterial {
    /// Longitudinal (fiber direction) modulus in Pa
    pub e1: f64,
    /// Transverse modulus in Pa
    pub e2: f64,
    /// In-plane shear modulus in Pa
    pub g12: f64,
    /// Major Poisson ratio (loading in 1, contraction in 2)
    pub nu12: f64,
    /// Strength limits
    pub strengths: StrengthLimits,
}

impl OrthotropicMaterial {
    /// Create a new orthotropic material with given engineering constants
    pub fn new(e1: f64, e2: f64, g12: f64, nu12: f64, strengths: StrengthLimits) -> Self {
        Self {
            e1,
            e2,
            g12,
            nu12,
            strengths,
        }
    }

    /// Create an isotropic-equivalent ply material from E and nu.
    /// G is calculated as E / (2 * (1 + nu)); strength is the same in both
    /// directions.
    pub fn isotropic(e: f64, nu: f64, tension: f64, compression: f64, shear: f64) -> Self {
        let g = e / (2.0 * (1.0 + nu));
        Self::new(
            e,
            e,
            g,
            nu,
            StrengthLimits::new(tension, compression, tension, compression, shear),
        )
    }

    /// Typical intermediate-modulus carbon/epoxy unidirectional ply (T300-class)
    pub fn carbon_epoxy() -> Self {
        Self::new(
            135e9,
            10e9,
            5e9,
            0.30,
            StrengthLimits::new(1500e6, 1200e6, 50e6, 250e6, 70e6),
        )
    }

    /// Typical E-glass/epoxy unidirectional ply
    pub fn glass_epoxy() -> Self {
        Self::new(
            39e9,
            8.6e9,
            3.8e9,
            0.28,
            StrengthLimits::new(1080e6, 620e6, 39e6, 128e6, 89e6),
        )
    }

    /// Minor Poisson ratio from the reciprocal relation nu21 = nu12 * E2 / E1
    pub fn nu21(&self) -> f64 {
        self.nu12 * self.e2 / self.e1
    }

    /// Check that the constants describe a physical material.
    ///
    /// Moduli must be positive and finite; positive-definiteness of the
    /// reduced stiffness is checked through its determinant rather than by
    /// range-checking the Poisson ratio.
    pub fn validate(&self) -> LaminateResult<()> {
        for (value, label) in [
            (self.e1, "E1"),
            (self.e2, "E2"),
            (self.g12, "G12"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LaminateError::InvalidMaterial(format!(
                    "{label} must be positive, got {value}"
                )));
            }
        }
        if !self.nu12.is_finite() {
            return Err(LaminateError::InvalidMaterial(format!(
                "nu12 must be finite, got {}",
                self.nu12
            )));
        }

        let q = self.reduced_stiffness_unchecked();
        let det = q.determinant();
        if !det.is_finite() || det <= 0.0 || q[(0, 0)] <= 0.0 {
            return Err(LaminateError::InvalidMaterial(format!(
                "reduced stiffness is not positive definite (nu12 = {})",
                self.nu12
            )));
        }

        let strengths = self.strengths;
        for (value, label) in [
            (strengths.xt, "Xt"),
            (strengths.xc, "Xc"),
            (strengths.yt, "Yt"),
            (strengths.yc, "Yc"),
            (strengths.s, "S"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LaminateError::InvalidMaterial(format!(
                    "strength {label} must be positive, got {value}"
                )));
            }
        }

        Ok(())
    }

    /// Plane-stress reduced stiffness matrix Q in the material frame
    pub fn reduced_stiffness(&self) -> LaminateResult<Mat3> {
        self.validate()?;
        Ok(self.reduced_stiffness_unchecked())
    }

    fn reduced_stiffness_unchecked(&self) -> Mat3 {
        let denom = 1.0 - self.nu12 * self.nu21();
        let q11 = self.e1 / denom;
        let q22 = self.e2 / denom;
        let q12 = self.nu12 * self.e2 / denom;
        let q66 = self.g12;

        Mat3::new(q11, q12, 0.0, q12, q22, 0.0, 0.0, 0.0, q66)
    }
}
