//! SPC review: analysis snapshot reconciliation and presentation
//!
//! Takes the raw JSON an SPC analysis engine returns, reconciles its
//! field-name and shape variants into one canonical model, and derives the
//! presentation artifacts: capability grading, control-point status,
//! normal curves and chart descriptors.

pub mod capability;
pub mod charts;
pub mod cli;
pub mod control;
pub mod core;
pub mod curve;
pub mod entities;
pub mod json;
pub mod reconcile;
pub mod session;
