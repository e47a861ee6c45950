//! Quadrature: static Gauss tables, regular/near-singular pair integration
//! and singular self-element integration.

pub mod gauss;
pub mod regular;
pub mod singular;
