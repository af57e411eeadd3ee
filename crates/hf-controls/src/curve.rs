//! Polynomial performance curves.

use std::collections::HashMap;

use hf_core::CurveId;
use serde::{Deserialize, Serialize};

use crate::error::{ControlError, ControlResult};

/// Polynomial form of a curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CurveForm {
    /// `c0 + c1·x`
    Linear { c0: f64, c1: f64 },
    /// `c0 + c1·x + c2·x²`
    Quadratic { c0: f64, c1: f64, c2: f64 },
    /// `c0 + c1·x + c2·x² + c3·x³`
    Cubic { c0: f64, c1: f64, c2: f64, c3: f64 },
    /// `c0 + c1·x + c2·x² + c3·y + c4·y² + c5·x·y`
    Biquadratic { c: [f64; 6] },
}

impl CurveForm {
    /// Number of independent variables.
    pub fn dims(&self) -> usize {
        match self {
            CurveForm::Linear { .. } | CurveForm::Quadratic { .. } | CurveForm::Cubic { .. } => 1,
            CurveForm::Biquadratic { .. } => 2,
        }
    }

    fn raw(&self, x: f64, y: f64) -> f64 {
        match *self {
            CurveForm::Linear { c0, c1 } => c0 + c1 * x,
            CurveForm::Quadratic { c0, c1, c2 } => c0 + x * (c1 + x * c2),
            CurveForm::Cubic { c0, c1, c2, c3 } => c0 + x * (c1 + x * (c2 + x * c3)),
            CurveForm::Biquadratic { c } => {
                c[0] + c[1] * x + c[2] * x * x + c[3] * y + c[4] * y * y + c[5] * x * y
            }
        }
    }
}

/// A named curve with optional input and output limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub name: String,
    pub form: CurveForm,
    #[serde(default)]
    pub min_x: Option<f64>,
    #[serde(default)]
    pub max_x: Option<f64>,
    #[serde(default)]
    pub min_output: Option<f64>,
    #[serde(default)]
    pub max_output: Option<f64>,
}

impl Curve {
    pub fn new(name: impl Into<String>, form: CurveForm) -> Self {
        Self {
            name: name.into(),
            form,
            min_x: None,
            max_x: None,
            min_output: None,
            max_output: None,
        }
    }

    pub fn with_x_limits(mut self, min_x: f64, max_x: f64) -> Self {
        self.min_x = Some(min_x);
        self.max_x = Some(max_x);
        self
    }

    pub fn with_output_limits(mut self, min: f64, max: f64) -> Self {
        self.min_output = Some(min);
        self.max_output = Some(max);
        self
    }

    pub fn dims(&self) -> usize {
        self.form.dims()
    }

    /// Evaluate with the first input clamped to its limits and the result
    /// clamped to the output limits. `y` is ignored by one-input curves.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        let mut x = x;
        if let Some(lo) = self.min_x {
            x = x.max(lo);
        }
        if let Some(hi) = self.max_x {
            x = x.min(hi);
        }
        let mut out = self.form.raw(x, y);
        if let Some(lo) = self.min_output {
            out = out.max(lo);
        }
        if let Some(hi) = self.max_output {
            out = out.min(hi);
        }
        out
    }
}

/// Store of named curves.
#[derive(Debug, Default, Clone)]
pub struct CurveManager {
    curves: Vec<Curve>,
    by_name: HashMap<String, CurveId>,
}

impl CurveManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, curve: Curve) -> ControlResult<CurveId> {
        let key = curve.name.to_uppercase();
        if self.by_name.contains_key(&key) {
            return Err(ControlError::Duplicate { name: curve.name });
        }
        if let (Some(lo), Some(hi)) = (curve.min_x, curve.max_x) {
            if lo > hi {
                return Err(ControlError::InvalidArg {
                    what: "curve min_x exceeds max_x",
                });
            }
        }
        let id = CurveId::from_usize(self.curves.len());
        self.curves.push(curve);
        self.by_name.insert(key, id);
        Ok(id)
    }

    pub fn find(&self, name: &str) -> Option<CurveId> {
        self.by_name.get(&name.trim().to_uppercase()).copied()
    }

    pub fn get(&self, id: CurveId) -> ControlResult<&Curve> {
        self.curves
            .get(id.slot())
            .ok_or_else(|| ControlError::InvalidReference {
                what: format!("curve {id}"),
            })
    }

    /// Evaluate a one-input curve.
    pub fn value(&self, id: CurveId, x: f64) -> ControlResult<f64> {
        Ok(self.get(id)?.evaluate(x, 0.0))
    }

    /// Evaluate a two-input curve.
    pub fn value2(&self, id: CurveId, x: f64, y: f64) -> ControlResult<f64> {
        Ok(self.get(id)?.evaluate(x, y))
    }

    /// Confirm a curve has one of the accepted dimensions.
    pub fn check_curve_dims(&self, id: CurveId, expected: &[usize]) -> ControlResult<()> {
        let curve = self.get(id)?;
        let actual = curve.dims();
        if expected.contains(&actual) {
            Ok(())
        } else {
            tracing::debug!(curve = %curve.name, actual, ?expected, "curve dimension mismatch");
            Err(ControlError::CurveDimensions {
                curve: curve.name.clone(),
                expected: expected.to_vec(),
                actual,
            })
        }
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hf_core::{Tolerances, nearly_equal};

    #[test]
    fn quadratic_evaluates() {
        let c = Curve::new(
            "Eff",
            CurveForm::Quadratic {
                c0: 0.9,
                c1: 0.1,
                c2: -0.05,
            },
        );
        let v = c.evaluate(0.5, 0.0);
        assert!(nearly_equal(v, 0.9 + 0.05 - 0.0125, Tolerances::default()));
    }

    #[test]
    fn limits_clamp_input_and_output() {
        let c = Curve::new("L", CurveForm::Linear { c0: 0.0, c1: 2.0 })
            .with_x_limits(0.0, 1.0)
            .with_output_limits(0.0, 1.5);
        assert_eq!(c.evaluate(-3.0, 0.0), 0.0);
        assert_eq!(c.evaluate(0.5, 0.0), 1.0);
        assert_eq!(c.evaluate(5.0, 0.0), 1.5);
    }

    #[test]
    fn dimension_check() {
        let mut mgr = CurveManager::new();
        let one = mgr
            .add(Curve::new("One", CurveForm::Cubic { c0: 1.0, c1: 0.0, c2: 0.0, c3: 0.0 }))
            .unwrap();
        let two = mgr
            .add(Curve::new("Two", CurveForm::Biquadratic { c: [1.0, 0.0, 0.0, 0.0, 0.0, 0.0] }))
            .unwrap();
        assert!(mgr.check_curve_dims(one, &[1]).is_ok());
        let err = mgr.check_curve_dims(two, &[1]).unwrap_err();
        assert!(matches!(err, ControlError::CurveDimensions { actual: 2, .. }));
        assert_eq!(mgr.find("two"), Some(two));
    }

    #[test]
    fn serde_tagged_form() {
        let json = r#"{"name":"E","form":{"type":"Linear","c0":1.0,"c1":-0.2}}"#;
        let c: Curve = serde_json::from_str(json).unwrap();
        assert_eq!(c.form, CurveForm::Linear { c0: 1.0, c1: -0.2 });
        assert_eq!(c.min_x, None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn output_limits_hold(x in -10.0_f64..10.0, c1 in -5.0_f64..5.0) {
            let c = Curve::new("P", CurveForm::Linear { c0: 0.5, c1 })
                .with_output_limits(0.1, 1.0);
            let v = c.evaluate(x, 0.0);
            prop_assert!((0.1..=1.0).contains(&v));
        }
    }
}
