//! Numeric transforms on daily series.
//!
//! All functions are pure. Short input follows one rule everywhere: if there
//! are not enough values for at least one output element, the result is an
//! empty `Vec` (never a panic, never an error). Downstream code treats an empty
//! result as "nothing to plot".
//!
//! Growth rate uses the simple relative first difference; there is no
//! centered-rate variant. Both moving-average shapes exist under distinct names
//! and the caller picks one explicitly.

/// Convolution ("valid") moving average.
///
/// Output length is `x.len() - w + 1`; element `i` is the mean of
/// `x[i..i + w]`. Empty when `w == 0` or `w > x.len()`.
pub fn moving_average(x: &[f64], w: usize) -> Vec<f64> {
    if w == 0 || w > x.len() {
        return Vec::new();
    }
    let width = w as f64;
    x.windows(w).map(|win| win.iter().sum::<f64>() / width).collect()
}

/// Length-preserving moving average with edge clamping.
///
/// Element `i` averages the `w` samples at `i - w/2 + k` (`k = 0..w`); indices
/// before the start read `x[0]`, indices past the end read `x[len - 1]`.
/// Empty when `x` is empty or `w == 0`.
pub fn centered_moving_average(x: &[f64], w: usize) -> Vec<f64> {
    if w == 0 || x.is_empty() {
        return Vec::new();
    }
    let half = (w / 2) as isize;
    let last = x.len() as isize - 1;
    let width = w as f64;

    (0..x.len() as isize)
        .map(|i| {
            (0..w as isize)
                .map(|k| x[(i - half + k).clamp(0, last) as usize])
                .sum::<f64>()
                / width
        })
        .collect()
}

/// First difference: `x[i + 1] - x[i]`, length `n - 1`.
pub fn absolute_growth(x: &[f64]) -> Vec<f64> {
    x.windows(2).map(|p| p[1] - p[0]).collect()
}

/// Relative first difference: `(x[i + 1] - x[i]) / x[i]`, length `n - 1`.
///
/// A non-positive base yields `0.0` rather than a division by zero.
pub fn growth_rate(x: &[f64]) -> Vec<f64> {
    x.windows(2)
        .map(|p| if p[0] > 0.0 { (p[1] - p[0]) / p[0] } else { 0.0 })
        .collect()
}

/// Suffix starting at the first element strictly greater than `threshold`.
pub fn threshold_trim(x: &[f64], threshold: f64) -> Vec<f64> {
    x[threshold_start(x, threshold)..].to_vec()
}

/// Index of the first element strictly above `threshold` (`x.len()` if none).
pub fn threshold_start(x: &[f64], threshold: f64) -> usize {
    x.iter().position(|&v| v > threshold).unwrap_or(x.len())
}

/// Last `min(n, len)` elements.
pub fn tail(x: &[f64], n: usize) -> &[f64] {
    &x[x.len().saturating_sub(n)..]
}

/// A transformed series that remembers which day its first value belongs to.
///
/// Shortening transforms drop values from the front (or, for the trailing
/// moving average, attribute each mean to the last day of its window), so
/// `start_day` advances accordingly and `days()` always lines up with
/// `values`.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySeries {
    pub start_day: usize,
    pub values: Vec<f64>,
}

impl DaySeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self { start_day: 0, values }
    }

    pub fn from_slice(values: &[f64]) -> Self {
        Self::new(values.to_vec())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Day index of every value.
    pub fn days(&self) -> impl Iterator<Item = usize> + '_ {
        self.start_day..self.start_day + self.values.len()
    }

    pub fn moving_average(&self, w: usize) -> Self {
        Self {
            start_day: self.start_day + w.saturating_sub(1),
            values: moving_average(&self.values, w),
        }
    }

    pub fn centered_moving_average(&self, w: usize) -> Self {
        Self {
            start_day: self.start_day,
            values: centered_moving_average(&self.values, w),
        }
    }

    pub fn absolute_growth(&self) -> Self {
        Self {
            start_day: self.start_day + 1,
            values: absolute_growth(&self.values),
        }
    }

    pub fn growth_rate(&self) -> Self {
        Self {
            start_day: self.start_day + 1,
            values: growth_rate(&self.values),
        }
    }

    pub fn threshold_trim(&self, threshold: f64) -> Self {
        self.skip(threshold_start(&self.values, threshold))
    }

    pub fn tail(&self, n: usize) -> Self {
        self.skip(self.values.len().saturating_sub(n))
    }

    /// Drop the first `n` values.
    pub fn skip(&self, n: usize) -> Self {
        let n = n.min(self.values.len());
        Self {
            start_day: self.start_day + n,
            values: self.values[n..].to_vec(),
        }
    }

    /// Restrict to days `from..` (no-op if already later).
    pub fn from_day(&self, day: usize) -> Self {
        self.skip(day.saturating_sub(self.start_day))
    }

    /// Value for an absolute day index, if covered.
    pub fn at_day(&self, day: usize) -> Option<f64> {
        day.checked_sub(self.start_day).and_then(|i| self.values.get(i).copied())
    }
}
