//! Compound annual growth rates over most-recent-first series.

/// Annualized growth rate in percent over a most-recent-first series.
///
/// Undefined (`None`) when the series is shorter than two years or either
/// endpoint is not strictly positive: a fractional power of a non-positive
/// base has no real value, and a sign flip between endpoints has no
/// meaningful annualized rate.
pub fn cagr(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    annualized(values[0], values[values.len() - 1], values.len() - 1)
}

/// CAGR over a series that may contain undefined cells. Undefined endpoints
/// make the growth rate undefined.
pub fn cagr_series(series: &[Option<f64>]) -> Option<f64> {
    if series.len() < 2 {
        return None;
    }
    let latest = series[0]?;
    let earliest = series[series.len() - 1]?;
    annualized(latest, earliest, series.len() - 1)
}

fn annualized(latest: f64, earliest: f64, periods: usize) -> Option<f64> {
    if latest <= 0.0 || earliest <= 0.0 {
        tracing::warn!(
            latest,
            earliest,
            "growth rate undefined for non-positive endpoints"
        );
        return None;
    }
    Some(((latest / earliest).powf(1.0 / periods as f64) - 1.0) * 100.0)
}
