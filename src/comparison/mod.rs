// Statistical comparison of baseline and enhanced metric samples
//
// One-way ANOVA for the significance of the mean difference, Cohen's d for its
// magnitude, and a Student-t interval for the enhanced mean. The distribution
// functions are implemented locally on top of the regularized incomplete beta
// function, so every p-value and critical value is reproducible bit for bit.
//
// Modules:
// - descriptive:   count, mean, sample standard deviation
// - distributions: ln Gamma, incomplete beta, F survival, Student-t CDF/quantile
// - anova:         one-way ANOVA for k >= 2 groups
// - effect_size:   pooled standard deviation, Cohen's d
// - confidence:    mean confidence interval
// - comparator:    the per-metric chain producing a ComparisonResult

mod anova;
mod comparator;
mod confidence;
mod descriptive;
pub mod distributions;
mod effect_size;

pub use anova::{one_way_anova, AnovaResult, MIN_GROUP_SIZE};
pub use comparator::{compare, compare_values, ComparisonResult};
pub use confidence::{
    check_confidence_level, mean_confidence_interval, ConfidenceInterval,
    DEFAULT_CONFIDENCE_LEVEL,
};
pub use descriptive::Descriptive;
pub use effect_size::{cohens_d, pooled_std_dev};

#[cfg(test)]
mod tests;
