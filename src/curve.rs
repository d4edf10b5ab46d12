use crate::points::Position;

pub const DEFAULT_STEP: f64 = 0.01;
/// Finest step accepted by `sample`.
pub const MIN_STEP: f64 = 0.001;

/// Binomial coefficient through the gamma function,
/// `C(n, k) = Γ(n+1) / (Γ(k+1) · Γ(n-k+1))`.
///
/// The quotient is rounded since it is an integer for every valid `n, k`.
/// Γ overflows `f64` past 170, so curves with more than ~170 control points
/// get non-finite weights. Zero when `k > n`.
pub fn binomial(n: u32, k: u32) -> f64 {
    if k > n {
        return 0.0;
    }
    let (n, k) = (f64::from(n), f64::from(k));
    let denom = libm::tgamma(k + 1.0) * libm::tgamma(n - k + 1.0);
    (libm::tgamma(n + 1.0) / denom).round()
}

/// Weight of control point `i` in a degree `n` curve at parameter `t`.
/// Indices past `n` weigh nothing.
pub fn bernstein(n: u32, i: u32, t: f64) -> f64 {
    if i > n {
        return 0.0;
    }
    binomial(n, i) * (1.0 - t).powi((n - i) as i32) * t.powi(i as i32)
}

/// Position on the curve through `points` at parameter `t`.
/// The slice order defines the index of each point and must not change
/// while a curve is being sampled.
pub fn evaluate(points: &[Position], t: f64) -> Option<Position> {
    let n = points.len().checked_sub(1)? as u32;
    let mut b = Position::default();
    for (i, point) in points.iter().enumerate() {
        let v = bernstein(n, i as u32, t);
        b.x += v * point.x;
        b.y += v * point.y;
    }
    Some(b)
}

/// Samples the curve at t = 0, step, 2·step, ... below 1 and then exactly at 1.
pub fn sample(points: &[Position], step: f64) -> Vec<Position> {
    if points.is_empty() {
        return Vec::new();
    }
    let step = if step.is_finite() && step >= MIN_STEP {
        step
    } else {
        log::warn!("invalid curve step {step}, using {DEFAULT_STEP}");
        DEFAULT_STEP
    };

    let step = step.min(1.0);
    let mut curve = Vec::with_capacity((1.0 / step).ceil() as usize + 1);
    let mut k = 0u32;
    loop {
        let t = f64::from(k) * step;
        if t >= 1.0 {
            break;
        }
        curve.extend(evaluate(points, t));
        k += 1;
    }
    // the endpoint is added explicitly so accumulated error never skips it
    curve.extend(evaluate(points, 1.0));
    curve
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_position_eq(a: Position, b: Position) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-9);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-9);
    }

    #[test]
    fn binomial_coefficients() {
        assert_eq!(binomial(5, 2), 10.0);
        assert_eq!(binomial(0, 0), 1.0);
        assert_eq!(binomial(4, 4), 1.0);
        assert_eq!(binomial(10, 3), 120.0);
        assert_eq!(binomial(2, 3), 0.0);
    }

    #[test]
    fn index_past_degree_weighs_nothing() {
        assert_eq!(bernstein(2, 3, 0.5), 0.0);
        assert_eq!(bernstein(0, 1, 1.0), 0.0);
    }

    #[test]
    fn bernstein_weights_sum_to_one() {
        for t in [0.0, 0.25, 0.5, 0.9, 1.0] {
            let total: f64 = (0..=6).map(|i| bernstein(6, i, t)).sum();
            assert_abs_diff_eq!(total, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn no_points_gives_empty_curve() {
        assert!(sample(&[], DEFAULT_STEP).is_empty());
        assert!(evaluate(&[], 0.5).is_none());
    }

    #[test]
    fn single_point_degenerates() {
        let p = Position::new(12.0, -3.5);
        let curve = sample(&[p], DEFAULT_STEP);
        assert_eq!(curve.len(), 101);
        assert!(curve.iter().all(|&q| q == p));
    }

    #[test]
    fn endpoints_match_control_points() {
        let points = [
            Position::new(10.0, 10.0),
            Position::new(80.0, 200.0),
            Position::new(300.0, 40.0),
            Position::new(420.0, 310.0),
        ];
        let curve = sample(&points, DEFAULT_STEP);
        assert_position_eq(curve[0], points[0]);
        assert_position_eq(*curve.last().unwrap(), points[3]);
    }

    #[test]
    fn quadratic_midpoint() {
        let points = [Position::new(0.0, 0.0), Position::new(50.0, 100.0), Position::new(100.0, 0.0)];
        let mid = evaluate(&points, 0.5).unwrap();
        assert_position_eq(mid, Position::new(50.0, 50.0));
    }

    #[test]
    fn coarse_step_still_reaches_end() {
        let points = [Position::new(0.0, 0.0), Position::new(10.0, 0.0)];
        let curve = sample(&points, 0.3);
        // t = 0, 0.3, 0.6, 0.9, then 1
        assert_eq!(curve.len(), 5);
        assert_position_eq(curve[4], Position::new(10.0, 0.0));
    }

    #[test]
    fn invalid_step_uses_default() {
        let points = [Position::new(0.0, 0.0), Position::new(10.0, 0.0)];
        assert_eq!(sample(&points, 0.0).len(), 101);
        assert_eq!(sample(&points, f64::NAN).len(), 101);
    }

    #[test]
    fn step_below_minimum_uses_default() {
        let points = [Position::new(0.0, 0.0), Position::new(10.0, 0.0)];
        assert_eq!(sample(&points, 1e-300).len(), 101);
        assert_eq!(sample(&points, MIN_STEP / 2.0).len(), 101);
    }

    #[test]
    fn step_above_one_samples_both_ends() {
        let points = [Position::new(0.0, 0.0), Position::new(10.0, 0.0)];
        let curve = sample(&points, 5.0);
        assert_eq!(curve.len(), 2);
        assert_position_eq(curve[0], points[0]);
        assert_position_eq(curve[1], points[1]);
    }
}
