//! neowatch-ranker — NEO risk scoring and normalisation.
//! Turns raw upstream records into scored, rankable `NormalizedNeo` values.

pub mod extract;
pub mod scorer;
pub mod normalise;

pub use normalise::{normalize, NormalizedNeo};
pub use scorer::{score, RiskAssessment, RiskBreakdown, RiskFactors, RiskLabel};
