//! Trailing-window statistics shared by the indicators.
//!
//! Every rolling statistic covers the inclusive window `[i - w + 1, i]`.
//! Rows with `i < w - 1`, or whose window contains an undefined input, are
//! `None`. A zero-length window yields an all-`None` series.

/// Smoothing factor for an exponential average of the given span.
pub fn smoothing_factor(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

fn rolling<F>(values: &[Option<f64>], window: usize, stat: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let mut out = Vec::with_capacity(values.len());
    let mut buf: Vec<f64> = Vec::with_capacity(window);

    for i in 0..values.len() {
        if window == 0 || i + 1 < window {
            out.push(None);
            continue;
        }
        buf.clear();
        let complete = values[i + 1 - window..=i].iter().all(|v| match v {
            Some(x) => {
                buf.push(*x);
                true
            }
            None => false,
        });
        out.push(if complete { stat(&buf) } else { None });
    }
    out
}

pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| Some(w.iter().sum::<f64>() / w.len() as f64))
}

pub fn rolling_sum(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| Some(w.iter().sum::<f64>()))
}

/// Sample standard deviation (divides by N-1); undefined for a 1-row window.
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| {
        if w.len() < 2 {
            return None;
        }
        let mean = w.iter().sum::<f64>() / w.len() as f64;
        let variance = w
            .iter()
            .map(|x| {
                let diff = x - mean;
                diff * diff
            })
            .sum::<f64>()
            / (w.len() - 1) as f64;
        Some(variance.sqrt())
    })
}

pub fn rolling_min(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| w.iter().copied().reduce(f64::min))
}

pub fn rolling_max(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| w.iter().copied().reduce(f64::max))
}

/// Exponential average with alpha = 2/(span+1), no bias adjustment.
///
/// Seeded with the first defined value; leading undefined rows stay `None`
/// and an undefined row after the seed carries the previous average forward.
pub fn ewm(values: &[Option<f64>], span: usize) -> Vec<Option<f64>> {
    let alpha = smoothing_factor(span);
    let mut out = Vec::with_capacity(values.len());
    let mut avg: Option<f64> = None;

    for value in values {
        avg = match (avg, value) {
            (None, Some(x)) => Some(*x),
            (Some(prev), Some(x)) => Some(alpha * x + (1.0 - alpha) * prev),
            (prev, None) => prev,
        };
        out.push(avg);
    }
    out
}

/// Lifts a fully-defined series into the optional form the statistics take.
pub fn defined(values: impl IntoIterator<Item = f64>) -> Vec<Option<f64>> {
    values.into_iter().map(Some).collect()
}
