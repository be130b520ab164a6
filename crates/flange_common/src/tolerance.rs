/// Numeric tolerances used when comparing geometry.
///
/// Two values `a` and `b` are considered close when
/// `|a - b| <= absolute + relative * |b|`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Absolute tolerance.
    pub absolute: f64,

    /// Relative tolerance, scaled by the magnitude of the reference value.
    pub relative: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            absolute: 1e-9,
            relative: 1e-6,
        }
    }
}

impl Tolerance {
    /// Tolerance for values given to three decimals, e.g. frames copied from a teach pendant.
    pub fn coarse() -> Self {
        Self {
            absolute: 1e-3,
            relative: 0.0,
        }
    }

    /// Set the absolute tolerance.
    pub fn with_absolute(mut self, absolute: f64) -> Self {
        self.absolute = absolute;
        self
    }

    /// Set the relative tolerance.
    pub fn with_relative(mut self, relative: f64) -> Self {
        self.relative = relative;
        self
    }

    /// Returns true if `value` is close to `reference`.
    pub fn is_close(&self, value: f64, reference: f64) -> bool {
        (value - reference).abs() <= self.absolute + self.relative * reference.abs()
    }

    /// Component-wise [`Tolerance::is_close`] for 3-vectors.
    pub fn is_close3(&self, value: [f64; 3], reference: [f64; 3]) -> bool {
        value
            .iter()
            .zip(reference.iter())
            .all(|(v, r)| self.is_close(*v, *r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_tight() {
        let tol = Tolerance::default();
        assert!(tol.is_close(1.0, 1.0 + 1e-10));
        assert!(!tol.is_close(1.0, 1.001));
    }

    #[test]
    fn test_coarse_matches_three_decimals() {
        let tol = Tolerance::coarse();
        assert!(tol.is_close(-0.3634, -0.363));
        assert!(!tol.is_close(-0.365, -0.363));
        assert!(tol.is_close3([0.3881, -0.351, -0.8515], [0.388, -0.351, -0.852]));
    }

    #[test]
    fn test_relative_scales_with_reference() {
        let tol = Tolerance::default().with_absolute(0.0).with_relative(0.01);
        assert!(tol.is_close(1005.0, 1000.0));
        assert!(!tol.is_close(1.5, 1.0));
    }
}
