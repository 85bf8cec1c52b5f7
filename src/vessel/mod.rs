//! Metallic vessel sizing calculators
//!
//! Conceptual-design companions to the laminate engine: monocoque buckling
//! sizing, propellant tank stress and mass budgets, and semi-monocoque
//! panel/stringer sizing. They share the engine's margin-of-safety
//! vocabulary but run on closed-form code-based formulas rather than the
//! stiffness solve.

pub mod buckling;
pub mod metal;
pub mod stringer;
pub mod tank;

pub use buckling::{BucklingMargin, MonocoqueSizer, SectionSpec};
pub use metal::MetallicMaterial;
pub use stringer::{PanelDesign, StringerDesign, StringerSpec};
pub use tank::{flight_bending_moment, MomentEstimate, TankDesign, TankSpec};
