//! Markov Observer math utilities.

pub mod math;

pub use math::dirichlet;
pub use math::dirichlet::DirichletParams;
pub use math::stable::*;
