//! Core BEM machinery: types, mesh handling, kernels, quadrature, assembly,
//! linear solve and post-processing.

pub mod assembly;
pub mod bem_solver;
pub mod error;
pub mod green;
pub mod incident;
pub mod integration;
pub mod mesh;
pub mod postprocess;
pub mod solver;
pub mod types;
