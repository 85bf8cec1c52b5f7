//! Metallic wall material properties

use serde::{Deserialize, Serialize};

use crate::error::{LaminateError, LaminateResult};

/// Isotropic metallic material for monocoque walls and tank shells
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MetallicMaterial {
    /// Young's modulus in Pa
    pub e: f64,
    /// Poisson's ratio
    pub nu: f64,
    /// 0.2% proof stress in Pa
    pub proof_stress: f64,
    /// Tensile rupture stress (optional) in Pa
    pub rupture_stress: Option<f64>,
    /// Density in kg/m^3
    pub density: f64,
}

impl MetallicMaterial {
    /// Create a new metallic material
    pub fn new(e: f64, nu: f64, proof_stress: f64, density: f64) -> Self {
        Self {
            e,
            nu,
            proof_stress,
            rupture_stress: None,
            density,
        }
    }

    /// Set the rupture stress
    pub fn with_rupture_stress(mut self, rupture_stress: f64) -> Self {
        self.rupture_stress = Some(rupture_stress);
        self
    }

    /// AL5056 aluminum alloy, the usual monocoque skin choice
    pub fn al5056() -> Self {
        Self::new(70e9, 0.3, 140e6, 2640.0)
    }

    /// AL6061-T6 aluminum alloy
    pub fn al6061_t6() -> Self {
        Self::new(68.9e9, 0.33, 276e6, 2700.0).with_rupture_stress(310e6)
    }

    /// SUS304 stainless steel
    pub fn sus304() -> Self {
        Self::new(193e9, 0.29, 205e6, 8000.0).with_rupture_stress(520e6)
    }

    pub fn validate(&self) -> LaminateResult<()> {
        for (value, label) in [
            (self.e, "E"),
            (self.proof_stress, "proof stress"),
            (self.density, "density"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LaminateError::InvalidMaterial(format!(
                    "{label} must be positive, got {value}"
                )));
            }
        }
        if !self.nu.is_finite() || self.nu <= -1.0 || self.nu >= 0.5 {
            return Err(LaminateError::InvalidMaterial(format!(
                "Poisson ratio {} outside (-1, 0.5)",
                self.nu
            )));
        }
        Ok(())
    }
}
