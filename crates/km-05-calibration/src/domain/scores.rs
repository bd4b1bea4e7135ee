//! Forecast scores.

/// Mean squared error of probability forecasts against 0/1 outcomes.
pub fn brier_score(y_true: &[bool], y_prob: &[f64]) -> f64 {
    mean(y_true.iter().zip(y_prob).map(|(&y, &p)| {
        let o = if y { 1.0 } else { 0.0 };
        (p - o) * (p - o)
    }))
}

pub fn mean_absolute_error(y_true: &[f64], y_pred: &[f64]) -> f64 {
    mean(y_true.iter().zip(y_pred).map(|(y, p)| (y - p).abs()))
}

/// Coefficient of determination.
///
/// Constant targets score 1.0 on a perfect fit and 0.0 otherwise.
pub fn r2_score(y_true: &[f64], y_pred: &[f64]) -> f64 {
    let mean_y = mean(y_true.iter().copied());
    let ss_res: f64 = y_true.iter().zip(y_pred).map(|(y, p)| (y - p).powi(2)).sum();
    let ss_tot: f64 = y_true.iter().map(|y| (y - mean_y).powi(2)).sum();
    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brier() {
        assert_eq!(brier_score(&[true, false], &[1.0, 0.0]), 0.0);
        assert!((brier_score(&[true, false], &[0.5, 0.5]) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_mae_and_r2() {
        let y = [1.0, 2.0, 3.0];
        assert_eq!(mean_absolute_error(&y, &[1.0, 2.0, 4.0]), 1.0 / 3.0);
        assert_eq!(r2_score(&y, &y), 1.0);
        assert!((r2_score(&y, &[2.0, 2.0, 2.0])).abs() < 1e-12);
        assert_eq!(r2_score(&[2.0, 2.0], &[2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_empty_is_nan() {
        assert!(brier_score(&[], &[]).is_nan());
    }
}
