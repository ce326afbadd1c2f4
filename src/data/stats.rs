//! Numeric kernels behind the regression overlays.
//!
//! Both fits work on complete `[x, y]` pairs in double precision; callers drop
//! rows with missing cells before calling in (see
//! [`Dataset::xy_pairs`](super::dataset::Dataset::xy_pairs)).

/// Ordinary least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fit over all points. Returns `None` for an empty input. When every x is the
    /// same the slope is zero and the line passes through the mean of y.
    pub fn fit(points: &[[f64; 2]]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let mean_x = points.iter().map(|p| p[0]).sum::<f64>() / n;
        let mean_y = points.iter().map(|p| p[1]).sum::<f64>() / n;
        let mut num = 0.0;
        let mut den = 0.0;
        for p in points {
            num += (p[0] - mean_x) * (p[1] - mean_y);
            den += (p[0] - mean_x).powi(2);
        }
        let slope = if den.abs() < f64::EPSILON { 0.0 } else { num / den };
        Some(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Default share of the data used for each local fit.
pub const LOWESS_DEFAULT_FRAC: f64 = 1.0 / 3.0;
/// Default number of robustifying passes after the initial fit.
pub const LOWESS_DEFAULT_ITERATIONS: usize = 3;

/// Locally weighted scatterplot smoothing (Cleveland 1979).
///
/// Each point is fitted by a weighted linear regression over its
/// `floor(frac * n)` (at least 2) nearest neighbours with tricube distance
/// weights, followed by `iterations` robustifying passes using bisquare
/// weights on the residuals.
/// The result is sorted ascending by x.
pub fn lowess(points: &[[f64; 2]], frac: f64, iterations: usize) -> Vec<[f64; 2]> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a[0].total_cmp(&b[0]));
    let n = sorted.len();
    if n < 3 {
        return sorted;
    }
    let xs: Vec<f64> = sorted.iter().map(|p| p[0]).collect();
    let ys: Vec<f64> = sorted.iter().map(|p| p[1]).collect();

    let k = ((frac.clamp(0.0, 1.0) * n as f64 + 1e-10) as usize).clamp(2, n);
    let y_scale = ys.iter().fold(0.0_f64, |m, v| m.max(v.abs())).max(1.0);

    let mut robust = vec![1.0; n];
    let mut fitted = vec![0.0; n];
    for pass in 0..=iterations {
        let mut left = 0;
        for i in 0..n {
            let x = xs[i];
            while left + k < n && xs[left + k] - x < x - xs[left] {
                left += 1;
            }
            let right = left + k - 1;
            let h = (x - xs[left]).max(xs[right] - x);
            fitted[i] = local_fit(&xs, &ys, &robust, left..=right, x, h).unwrap_or(ys[i]);
        }
        if pass == iterations {
            break;
        }

        let residuals: Vec<f64> = ys.iter().zip(&fitted).map(|(y, f)| y - f).collect();
        let s = median_abs(&residuals);
        if s <= 1e-12 * y_scale {
            break;
        }
        for (w, r) in robust.iter_mut().zip(&residuals) {
            let u = r / (6.0 * s);
            *w = if u.abs() < 1.0 { (1.0 - u * u).powi(2) } else { 0.0 };
        }
    }

    xs.into_iter().zip(fitted).map(|(x, y)| [x, y]).collect()
}

fn local_fit(
    xs: &[f64],
    ys: &[f64],
    robust: &[f64],
    window: std::ops::RangeInclusive<usize>,
    x: f64,
    h: f64,
) -> Option<f64> {
    let mut sw = 0.0;
    let mut sx = 0.0;
    let mut sy = 0.0;
    let weights: Vec<(usize, f64)> = window
        .map(|j| {
            let w = if h > 0.0 {
                tricube((xs[j] - x).abs() / h)
            } else {
                1.0
            } * robust[j];
            (j, w)
        })
        .collect();
    for &(j, w) in &weights {
        sw += w;
        sx += w * xs[j];
        sy += w * ys[j];
    }
    if sw <= 0.0 {
        return None;
    }
    let mx = sx / sw;
    let my = sy / sw;
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for &(j, w) in &weights {
        sxx += w * (xs[j] - mx).powi(2);
        sxy += w * (xs[j] - mx) * (ys[j] - my);
    }
    if h > 0.0 && sxx > 1e-12 * sw * h * h {
        Some(my + sxy / sxx * (x - mx))
    } else {
        Some(my)
    }
}

fn tricube(d: f64) -> f64 {
    if d >= 1.0 {
        0.0
    } else {
        (1.0 - d.powi(3)).powi(3)
    }
}

fn median_abs(values: &[f64]) -> f64 {
    let mut abs: Vec<f64> = values.iter().map(|v| v.abs()).collect();
    abs.sort_by(f64::total_cmp);
    let n = abs.len();
    if n == 0 {
        0.0
    } else if n % 2 == 1 {
        abs[n / 2]
    } else {
        0.5 * (abs[n / 2 - 1] + abs[n / 2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn linear_fit_recovers_exact_line() {
        let pts: Vec<[f64; 2]> = (0..10).map(|i| [i as f64, 2.0 * i as f64 + 1.0]).collect();
        let fit = LinearFit::fit(&pts).unwrap();
        assert!(close(fit.slope, 2.0, 1e-12));
        assert!(close(fit.intercept, 1.0, 1e-12));
    }

    #[test]
    fn linear_fit_constant_x_is_flat() {
        let fit = LinearFit::fit(&[[1.0, 2.0], [1.0, 4.0]]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert!(close(fit.predict(5.0), 3.0, 1e-12));
    }

    #[test]
    fn linear_fit_empty_is_none() {
        assert!(LinearFit::fit(&[]).is_none());
    }

    #[test]
    fn lowess_reproduces_linear_data() {
        let pts: Vec<[f64; 2]> = (0..30).rev().map(|i| [i as f64, 0.5 * i as f64 - 3.0]).collect();
        let out = lowess(&pts, LOWESS_DEFAULT_FRAC, LOWESS_DEFAULT_ITERATIONS);
        assert_eq!(out.len(), 30);
        for p in &out {
            assert!(close(p[1], 0.5 * p[0] - 3.0, 1e-9), "{:?}", p);
        }
    }

    #[test]
    fn lowess_output_is_sorted() {
        let pts = [[3.0, 1.0], [1.0, 2.0], [2.0, 0.5], [5.0, 4.0], [4.0, 3.0], [0.0, 1.0]];
        let out = lowess(&pts, 0.5, 2);
        assert!(out.windows(2).all(|w| w[0][0] <= w[1][0]));
    }

    #[test]
    fn lowess_downweights_outlier() {
        let mut pts: Vec<[f64; 2]> = (0..20).map(|i| [i as f64, i as f64]).collect();
        pts[10][1] = 100.0;
        let out = lowess(&pts, 0.5, 3);
        assert!(close(out[10][1], 10.0, 0.5), "{:?}", out[10]);
        assert!(close(out[0][1], 0.0, 1e-6));
    }

    #[test]
    fn median_of_even_count() {
        assert_eq!(median_abs(&[-1.0, 3.0, 2.0, -4.0]), 2.5);
    }
}
