//! Linear regression refiner: `y = intercept + w · x`.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::{FEATURE_LEN, FeatureVector, RefineError, Refiner};

/// Serialized form: `{ "intercept": f64, "coefficients": [f64; 3] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearSpec {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearRefiner {
    intercept: f64,
    weights: Vector3<f64>,
}

impl LinearRefiner {
    pub fn new(intercept: f64, weights: [f64; FEATURE_LEN]) -> Self {
        Self {
            intercept,
            weights: Vector3::from(weights),
        }
    }

    /// Validate a serialized spec. The coefficient count must match the features.
    pub fn from_spec(spec: &LinearSpec) -> Result<Self, RefineError> {
        let weights: [f64; FEATURE_LEN] =
            spec.coefficients
                .as_slice()
                .try_into()
                .map_err(|_| RefineError::Shape {
                    expected: FEATURE_LEN,
                    got: spec.coefficients.len(),
                })?;
        Ok(Self::new(spec.intercept, weights))
    }
}

impl Refiner for LinearRefiner {
    fn predict(&self, features: &FeatureVector) -> Result<f64, RefineError> {
        let y = self.intercept + self.weights.dot(features.as_vector());
        if y.is_finite() { Ok(y) } else { Err(RefineError::NonFinite) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_refiner_evaluates_dot_product() {
        let r = LinearRefiner::new(1.0, [0.5, 0.0, 0.5]);
        let y = r.predict(&FeatureVector::new(28.0, 3.0, 30.0)).unwrap();
        assert!((y - 30.0).abs() < 1e-12);
    }

    #[test]
    fn wrong_coefficient_count_is_a_shape_error() {
        let spec = LinearSpec {
            intercept: 0.0,
            coefficients: vec![1.0, 2.0],
        };
        let err = LinearRefiner::from_spec(&spec).unwrap_err();
        assert!(matches!(err, RefineError::Shape { expected: 3, got: 2 }));
    }

    #[test]
    fn overflow_is_reported() {
        let r = LinearRefiner::new(f64::MAX, [f64::MAX, 0.0, 0.0]);
        assert!(matches!(
            r.predict(&FeatureVector::new(10.0, 1.0, 10.0)),
            Err(RefineError::NonFinite)
        ));
    }
}
