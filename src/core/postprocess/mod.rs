//! Post-processing of solved boundary data.

pub mod field;
