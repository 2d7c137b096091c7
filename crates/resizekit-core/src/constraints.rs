//! Step snapping, bounds clamping and aspect-ratio correction.

use kurbo::Size;
use serde::{Deserialize, Serialize};

use crate::handles::Handle;

/// Step used when the configured one is unusable.
pub const DEFAULT_STEP: f64 = 1.0;

/// Quotients this close to a whole number count as already on the grid.
const GRID_EPSILON: f64 = 1e-9;

/// Lower and upper bound for one dimension.
///
/// Always satisfiable: `0 <= min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    /// No bounds beyond non-negativity.
    pub const UNBOUNDED: AxisBounds = AxisBounds { min: 0.0, max: f64::INFINITY };

    /// Build bounds from raw configuration values.
    ///
    /// A NaN or negative minimum becomes 0, a NaN maximum becomes unbounded,
    /// and a minimum above the maximum is lowered to the maximum.
    pub fn normalized(min: f64, max: f64) -> Self {
        let max = if max.is_nan() { f64::INFINITY } else { max.max(0.0) };
        let min = if min.is_nan() { 0.0 } else { min.max(0.0) };
        Self { min: min.min(max), max }
    }

    /// Check if a value lies within the bounds.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for AxisBounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// Normalize a configured step. Non-finite or non-positive steps fall back
/// to [`DEFAULT_STEP`].
pub fn normalize_step(step: f64) -> f64 {
    if step.is_finite() && step > 0.0 {
        step
    } else {
        DEFAULT_STEP
    }
}

/// Round `value` up to the next multiple of `step`.
pub fn snap_to_step(value: f64, step: f64) -> f64 {
    let step = normalize_step(step);
    let quotient = value / step;
    let nearest = quotient.round();
    if (quotient - nearest).abs() < GRID_EPSILON {
        nearest * step
    } else {
        quotient.ceil() * step
    }
}

/// Clamp a value into bounds. Total for any input; NaN maps to the minimum.
pub fn clamp_dimension(value: f64, bounds: AxisBounds) -> f64 {
    if value.is_nan() {
        return bounds.min;
    }
    value.max(bounds.min).min(bounds.max)
}

/// The full constraint pipeline for one resizable box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub width: AxisBounds,
    pub height: AxisBounds,
    pub step: f64,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            width: AxisBounds::UNBOUNDED,
            height: AxisBounds::UNBOUNDED,
            step: DEFAULT_STEP,
        }
    }
}

impl Constraints {
    /// Create constraints; the step is normalized.
    pub fn new(width: AxisBounds, height: AxisBounds, step: f64) -> Self {
        Self {
            width,
            height,
            step: normalize_step(step),
        }
    }

    /// Snap then clamp a dimension the handle drives directly.
    fn constrain_driven(&self, value: f64, bounds: AxisBounds) -> f64 {
        if !value.is_finite() {
            return bounds.min;
        }
        clamp_dimension(snap_to_step(value, self.step), bounds)
    }

    /// Constrain a candidate size produced by a drag on `handle`.
    ///
    /// Driven dimensions are snapped then clamped. A dimension the handle
    /// does not drive is only clamped. With `aspect_ratio` (width / height)
    /// set, the follower dimension is recomputed from the driving one and
    /// clamped without snapping. Corners treat width as the driver.
    pub fn apply(&self, handle: Handle, candidate: Size, aspect_ratio: Option<f64>) -> Size {
        let drives_width = handle.horizontal_sign() != 0.0;
        let drives_height = handle.vertical_sign() != 0.0;

        let mut width = if drives_width {
            self.constrain_driven(candidate.width, self.width)
        } else {
            clamp_dimension(candidate.width, self.width)
        };
        let mut height = if drives_height {
            self.constrain_driven(candidate.height, self.height)
        } else {
            clamp_dimension(candidate.height, self.height)
        };

        if let Some(ratio) = aspect_ratio.filter(|r| r.is_finite() && *r > 0.0) {
            if drives_width {
                height = clamp_dimension(width / ratio, self.height);
            } else {
                width = clamp_dimension(height * ratio, self.width);
            }
        }

        Size::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounded(min_w: f64, max_w: f64, min_h: f64, max_h: f64, step: f64) -> Constraints {
        Constraints::new(AxisBounds::normalized(min_w, max_w), AxisBounds::normalized(min_h, max_h), step)
    }

    #[test]
    fn test_snap_rounds_up() {
        assert_eq!(snap_to_step(215.0, 10.0), 220.0);
        assert_eq!(snap_to_step(211.0, 10.0), 220.0);
        assert_eq!(snap_to_step(220.0, 10.0), 220.0);
        assert_eq!(snap_to_step(-15.0, 10.0), -10.0);
    }

    #[test]
    fn test_default_step_rounds_fractions_up() {
        assert_eq!(snap_to_step(250.0, 1.0), 250.0);
        assert_eq!(snap_to_step(250.2, 1.0), 251.0);
    }

    #[test]
    fn test_snap_idempotent() {
        for step in [1.0, 0.1, 0.25, 3.0, 7.5, 10.0] {
            for value in [-33.3, 0.0, 0.3, 1.7, 99.99, 215.0, 1234.5] {
                let once = snap_to_step(value, step);
                assert_eq!(snap_to_step(once, step), once, "value {value} step {step}");
            }
        }
    }

    #[test]
    fn test_invalid_step_falls_back() {
        assert_eq!(normalize_step(-5.0), DEFAULT_STEP);
        assert_eq!(normalize_step(0.0), DEFAULT_STEP);
        assert_eq!(normalize_step(f64::NAN), DEFAULT_STEP);
        assert_eq!(normalize_step(f64::INFINITY), DEFAULT_STEP);
        assert_eq!(snap_to_step(12.5, -4.0), 13.0);
    }

    #[test]
    fn test_clamp_idempotent() {
        let bounds = AxisBounds::normalized(50.0, 300.0);
        for value in [-10.0, 0.0, 50.0, 120.0, 300.0, 1e9, f64::INFINITY, f64::NEG_INFINITY] {
            let once = clamp_dimension(value, bounds);
            assert_eq!(clamp_dimension(once, bounds), once);
            assert!(bounds.contains(once));
        }
    }

    #[test]
    fn test_bounds_normalization() {
        let inverted = AxisBounds::normalized(500.0, 100.0);
        assert_eq!(inverted, AxisBounds { min: 100.0, max: 100.0 });

        let negative = AxisBounds::normalized(-20.0, f64::NAN);
        assert_eq!(negative, AxisBounds::UNBOUNDED);

        let negative_max = AxisBounds::normalized(10.0, -5.0);
        assert_eq!(negative_max, AxisBounds { min: 0.0, max: 0.0 });
    }

    #[test]
    fn test_clamp_beats_step() {
        // 95 snaps to 100, but max 97 wins.
        let constraints = bounded(0.0, 97.0, 0.0, f64::INFINITY, 10.0);
        let size = constraints.apply(Handle::Right, Size::new(95.0, 40.0), None);
        assert_eq!(size.width, 97.0);
    }

    #[test]
    fn test_min_height_clamp() {
        let constraints = bounded(0.0, f64::INFINITY, 80.0, f64::INFINITY, 1.0);
        let size = constraints.apply(Handle::Bottom, Size::new(200.0, 50.0), None);
        assert_eq!(size, Size::new(200.0, 80.0));
    }

    #[test]
    fn test_negative_candidate_clamps_to_zero() {
        let size = Constraints::default().apply(Handle::TopLeft, Size::new(-40.0, -1.0), None);
        assert_eq!(size, Size::new(0.0, 0.0));
    }

    #[test]
    fn test_non_finite_candidate_uses_minimum() {
        let constraints = bounded(10.0, 500.0, 20.0, 500.0, 1.0);
        let size = constraints.apply(Handle::BottomRight, Size::new(f64::INFINITY, f64::NAN), None);
        assert_eq!(size, Size::new(10.0, 20.0));
    }

    #[test]
    fn test_orthogonal_not_snapped() {
        let constraints = bounded(0.0, f64::INFINITY, 0.0, f64::INFINITY, 10.0);
        let size = constraints.apply(Handle::Bottom, Size::new(203.0, 151.0), None);
        assert_eq!(size, Size::new(203.0, 160.0));
    }

    #[test]
    fn test_aspect_horizontal_handle_drives_height() {
        let constraints = Constraints::default();
        let size = constraints.apply(Handle::Right, Size::new(300.0, 150.0), Some(2.0));
        assert_eq!(size, Size::new(300.0, 150.0));

        let size = constraints.apply(Handle::Left, Size::new(100.0, 150.0), Some(2.0));
        assert_eq!(size, Size::new(100.0, 50.0));
    }

    #[test]
    fn test_aspect_vertical_handle_drives_width() {
        let size = Constraints::default().apply(Handle::Bottom, Size::new(200.0, 120.0), Some(4.0 / 3.0));
        assert!((size.width - 160.0).abs() < 1e-9);
        assert_eq!(size.height, 120.0);
    }

    #[test]
    fn test_aspect_corner_width_drives() {
        let size = Constraints::default().apply(Handle::BottomRight, Size::new(300.0, 999.0), Some(2.0));
        assert_eq!(size, Size::new(300.0, 150.0));
    }

    #[test]
    fn test_aspect_follower_is_clamped_not_snapped() {
        let constraints = bounded(0.0, f64::INFINITY, 0.0, 120.0, 10.0);
        let size = constraints.apply(Handle::Right, Size::new(301.0, 100.0), Some(1.5));
        // 301 snaps to 310; 310 / 1.5 = 206.67 clamps to 120.
        assert_eq!(size, Size::new(310.0, 120.0));

        let size = constraints.apply(Handle::Right, Size::new(151.0, 100.0), Some(1.5));
        assert!((size.height - 160.0 / 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_aspect_ignored() {
        let constraints = Constraints::default();
        for ratio in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let size = constraints.apply(Handle::Right, Size::new(250.0, 150.0), Some(ratio));
            assert_eq!(size, Size::new(250.0, 150.0));
        }
    }
}
