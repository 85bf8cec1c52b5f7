//! Laminate building blocks: materials, plies, and stacking sequences

mod material;
mod ply;
mod stack;

pub use material::{OrthotropicMaterial, StrengthLimits};
pub use ply::Ply;
pub use stack::Laminate;
