//! Boundary meshes: element geometry and canonical mesh generators.

pub mod element;
pub mod generators;
