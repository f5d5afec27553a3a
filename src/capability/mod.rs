//! Capability classification and process conclusion

pub mod classify;
pub mod conclusion;

pub use classify::{
    badge, classify, classify_cp, recommend, CapabilityGrade, CapabilityLevel, CpRating,
    Recommendation, UNKNOWN_COLOR,
};
pub use conclusion::{conclude, ConclusionCard, OverallStatus, ProcessConclusion};
