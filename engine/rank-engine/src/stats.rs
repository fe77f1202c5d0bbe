//! Column statistics shared by the weight calculator and the scorer.

/// Standard deviations at or below this are treated as zero.
pub const STD_DEV_EPSILON: f64 = 1e-12;

/// Mean and population standard deviation of one stat column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl ColumnStats {
    /// Compute population statistics (N denominator) for a column.
    ///
    /// An empty column yields `count == 0` with zero mean and deviation.
    /// A column of identical values has exactly that value as its mean.
    pub fn from_values(values: &[f64]) -> Self {
        let Some(&first) = values.first() else {
            return Self { count: 0, mean: 0.0, std_dev: 0.0 };
        };

        if values.iter().all(|v| *v == first) {
            return Self { count: values.len(), mean: first, std_dev: 0.0 };
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        if mean.is_finite() && variance.is_finite() {
            return Self { count: values.len(), mean, std_dev: variance.sqrt() };
        }

        // Sums overflowed; redo the pass on values scaled into [-1, 1]
        let scale = values.iter().fold(0.0f64, |max, v| max.max(v.abs()));
        let mean = values.iter().map(|v| v / scale).sum::<f64>() / n;
        let variance = values.iter().map(|v| (v / scale - mean).powi(2)).sum::<f64>() / n;

        Self { count: values.len(), mean: mean * scale, std_dev: variance.sqrt() * scale }
    }

    pub fn is_degenerate(&self) -> bool {
        self.std_dev <= STD_DEV_EPSILON
    }

    /// Divisor used for z-scores; 1.0 when the column has no spread
    pub fn divisor(&self) -> f64 {
        if self.is_degenerate() {
            1.0
        } else {
            self.std_dev
        }
    }

    pub fn z_score(&self, value: f64) -> f64 {
        let divisor = self.divisor();
        let z = (value - self.mean) / divisor;
        if z.is_finite() {
            z
        } else {
            // value - mean overflowed
            value / divisor - self.mean / divisor
        }
    }
}

/// Pearson correlation of aligned `(x, y)` pairs.
///
/// Returns `None` when the coefficient is undefined: fewer than two pairs,
/// a column without variance, or a non-finite result.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }

    let (x0, y0) = pairs[0];
    if pairs.iter().all(|(x, _)| *x == x0) || pairs.iter().all(|(_, y)| *y == y0) {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    if !(denom > 0.0) {
        return None;
    }

    let r = sxy / denom;
    if r.is_finite() {
        Some(r.clamp(-1.0, 1.0))
    } else {
        None
    }
}
