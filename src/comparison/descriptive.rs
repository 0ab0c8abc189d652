// Descriptive statistics for one group of observations
//
// Two-pass computation: mean first, then centered sum of squares. Sample variance
// uses the (n - 1) denominator throughout the comparator.
//
// A group whose values are all identical has exactly zero spread and its own value
// as mean, even when the summed mean would be off by an ulp.

use serde::{Deserialize, Serialize};

/// Count, mean and sample standard deviation of one group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Descriptive {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator); 0 for a single observation
    pub std_dev: f64,
}

impl Descriptive {
    /// Summarize a slice of observations
    ///
    /// An empty slice yields `count = 0` and NaN moments; callers check counts first.
    ///
    /// # Example
    /// ```
    /// use qwifi_stats::comparison::Descriptive;
    ///
    /// let d = Descriptive::of(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    /// assert_eq!(d.count, 8);
    /// assert_eq!(d.mean, 5.0);
    /// ```
    pub fn of(values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return Self {
                count,
                mean: f64::NAN,
                std_dev: f64::NAN,
            };
        }

        let mean = mean(values);
        let std_dev = if count > 1 {
            (centered_sum_of_squares(values, mean) / (count - 1) as f64).sqrt()
        } else {
            0.0
        };

        Self {
            count,
            mean,
            std_dev,
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }

    /// Standard error of the mean
    pub fn standard_error(&self) -> f64 {
        self.std_dev / (self.count as f64).sqrt()
    }
}

/// The shared value of a non-empty group whose values are all equal
fn constant_value(values: &[f64]) -> Option<f64> {
    let (&first, rest) = values.split_first()?;
    rest.iter().all(|&v| v == first).then_some(first)
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    match constant_value(values) {
        Some(value) => value,
        None => values.iter().sum::<f64>() / values.len() as f64,
    }
}

/// Sum of squared deviations from `center`; exactly zero for a constant group
pub(crate) fn centered_sum_of_squares(values: &[f64], center: f64) -> f64 {
    if constant_value(values).is_some() {
        return 0.0;
    }
    values.iter().map(|v| (v - center).powi(2)).sum()
}
