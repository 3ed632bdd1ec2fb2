//! Descriptive statistics over score samples

/// Arithmetic mean, `None` for an empty sample
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; the average of the two middle values for an even count
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let len = sorted.len();
    let median = if len % 2 == 1 {
        sorted[len / 2]
    } else {
        (sorted[len / 2 - 1] + sorted[len / 2]) / 2.0
    };
    Some(median)
}

/// Pearson correlation coefficient of paired samples.
///
/// Undefined (`None`) for fewer than three pairs, samples of different
/// length, or a sample with zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 3 {
        return None;
    }

    let mx = mean(x)?;
    let my = mean(y)?;

    let num: f64 = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum();
    let den_x = x.iter().map(|a| (a - mx).powi(2)).sum::<f64>().sqrt();
    let den_y = y.iter().map(|b| (b - my).powi(2)).sum::<f64>().sqrt();

    if den_x == 0.0 || den_y == 0.0 {
        return None;
    }
    Some(num / (den_x * den_y))
}

/// Share of values at or above `threshold`, in `0.0..=1.0`
pub fn top_box(values: &[f64], threshold: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let hits = values.iter().filter(|&&v| v >= threshold).count();
    Some(hits as f64 / values.len() as f64)
}

/// Round to `places` decimal places
///
/// Rounds the exact binary value of `x`, with exact ties going to the even
/// digit: `2.5625` becomes `2.562` at three places.
pub fn round_to(x: f64, places: u32) -> f64 {
    format!("{:.*}", places as usize, x).parse().unwrap_or(x)
}
