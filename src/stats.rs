//! Descriptive statistics over TVL values
//!
//! Undefined values are `None`. Rolling windows follow the usual
//! min-periods = window semantics: a window with any undefined input, or
//! fewer than `window` inputs, produces `None`.

/// Period-over-period fractional change
///
/// The first element is always `None`; a change that is not finite
/// (division by zero) is `None` too.
pub fn pct_change(values: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    for (i, value) in values.iter().enumerate() {
        if i == 0 {
            out.push(None);
            continue;
        }
        let change = value / values[i - 1] - 1.0;
        out.push(change.is_finite().then_some(change));
    }
    out
}

/// Sample standard deviation (n - 1 denominator)
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Rolling sample standard deviation, aligned with the input
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }

    let mut buf = Vec::with_capacity(window);
    for end in (window - 1)..values.len() {
        buf.clear();
        buf.extend(values[end + 1 - window..=end].iter().flatten());
        if buf.len() == window {
            out[end] = sample_std(&buf);
        }
    }
    out
}

/// Mean over the defined values only
pub fn mean_defined(values: &[Option<f64>]) -> Option<f64> {
    let defined: Vec<f64> = values.iter().flatten().copied().collect();
    mean(&defined)
}
