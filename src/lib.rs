//! CLT Solver - classical laminate theory and aerospace structural sizing
//!
//! This library analyzes composite laminates with classical (linear,
//! small-strain) laminate theory and feeds the resulting stiffness and
//! margins into simple sizing calculators for rocket structures:
//! - Per-ply stiffness transforms and A/B/D assembly
//! - Load <-> deformation solves of the coupled 6x6 relation
//! - Per-ply stress/strain recovery and failure margins
//!   (maximum-stress and Tsai-Wu criteria)
//! - Monocoque cylinder/cone buckling sizing (Bruhn, NASA SP-8019)
//! - Propellant tank stress and volume/mass sizing
//! - Semi-monocoque panel/stringer sizing
//!
//! ## Example
//! ```rust
//! use clt_solver::prelude::*;
//!
//! let mut model = LaminateModel::new();
//!
//! // Add a material
//! model.add_material("CFRP", OrthotropicMaterial::carbon_epoxy()).unwrap();
//!
//! // Quasi-isotropic layup, 0.125 mm plies
//! for angle in [0.0, 45.0, -45.0, 90.0] {
//!     model.add_ply(Ply::new(0.125e-3, angle, "CFRP")).unwrap();
//! }
//!
//! // Analyze under pure axial load
//! let report = model
//!     .analyze(&LoadCase::axial(100e3), &AnalysisOptions::default())
//!     .unwrap();
//!
//! assert!(report.min_margin.is_finite());
//! ```

pub mod analysis;
pub mod error;
pub mod failure;
pub mod laminate;
pub mod math;
pub mod model;
pub mod recovery;
pub mod results;
pub mod solver;
pub mod stiffness;
pub mod vessel;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::AnalysisOptions;
    pub use crate::error::{LaminateError, LaminateResult};
    pub use crate::failure::{FailureCriterionKind, FailureMode, PlyMargin};
    pub use crate::laminate::{Laminate, OrthotropicMaterial, Ply, StrengthLimits};
    pub use crate::model::LaminateModel;
    pub use crate::recovery::{PlyFace, PlyResult};
    pub use crate::results::AnalysisReport;
    pub use crate::solver::{DeformationState, LoadCase};
    pub use crate::stiffness::{EffectiveModuli, StiffnessMatrices};
    pub use crate::vessel::{
        BucklingMargin, MetallicMaterial, MomentEstimate, MonocoqueSizer, PanelDesign,
        SectionSpec, StringerDesign, StringerSpec, TankDesign, TankSpec,
    };
}
