//! Shared benchmark scaffolding.
//!
//! The case table here is the single source of the registered strategy names,
//! so the Criterion benches, the CLI renderer and the report tool all operate
//! on one case set.

pub mod cases;
