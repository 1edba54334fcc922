//! The predictor.
//!
//! A request is a list of period start dates plus an optional cycle length
//! override. The result is built in one pass:
//!
//! 1. `cl` = positive override, else the robust baseline
//! 2. anchor on the most recent date (calendar order, not input order)
//! 3. project `next = last + cl` (method `baseline`)
//! 4. if a refiner is configured, ask it for a cycle length; a usable answer
//!    replaces `cl` and `next` (method `ml`), anything else is discarded
//! 5. derive the ovulation window from the final `next`
//!
//! Only empty or malformed input fails a request. Refiner problems are logged
//! and never reach the caller.

use chrono::{NaiveDate, TimeDelta};
use tracing::{debug, warn};

use crate::domain::{Method, OvulationWindow, PeriodHistory, PredictionResult};
use crate::error::PredictError;
use crate::estimate::estimate;
use crate::predict::ovulation_window;
use crate::refine::{FeatureVector, SharedRefiner};

/// Stateless predictor with an optional injected refiner.
///
/// Cloning is cheap; the refiner is shared.
#[derive(Debug, Clone, Default)]
pub struct Predictor {
    refiner: Option<SharedRefiner>,
}

impl Predictor {
    /// Baseline-only predictor.
    pub fn new() -> Self {
        Self { refiner: None }
    }

    pub fn with_refiner(refiner: Option<SharedRefiner>) -> Self {
        Self { refiner }
    }

    pub fn has_refiner(&self) -> bool {
        self.refiner.is_some()
    }

    /// Predict from raw `YYYY-MM-DD` strings.
    pub fn predict<S: AsRef<str>>(
        &self,
        period_dates: &[S],
        cycle_length_override: Option<i64>,
    ) -> Result<PredictionResult, PredictError> {
        if period_dates.is_empty() {
            return Err(PredictError::EmptyHistory);
        }
        let history = PeriodHistory::parse(period_dates)?;
        self.predict_history(&history, cycle_length_override)
    }

    /// Predict from an already validated history.
    pub fn predict_history(
        &self,
        history: &PeriodHistory,
        cycle_length_override: Option<i64>,
    ) -> Result<PredictionResult, PredictError> {
        let last = history.last().ok_or(PredictError::EmptyHistory)?;

        let cl = match cycle_length_override {
            Some(n) if n > 0 => n,
            Some(n) => {
                if n < 0 {
                    warn!(cycle_length_override = n, "ignoring negative cycle length override");
                }
                estimate(history)
            }
            None => estimate(history),
        };

        let (next, window) = project(last, cl).ok_or(PredictError::DateOutOfRange)?;
        let baseline = PredictionResult {
            next_period_date: next,
            predicted_cycle_length: cl,
            ovulation_window: window,
            method: Method::Baseline,
        };

        let result = match &self.refiner {
            Some(refiner) => refine(refiner, history, last, cl).unwrap_or(baseline),
            None => baseline,
        };

        debug!(
            dates = history.len(),
            cycle_length = result.predicted_cycle_length,
            next_period = %result.next_period_date,
            method = %result.method,
            "prediction"
        );
        Ok(result)
    }
}

/// `last + cl` and its ovulation window.
fn project(last: NaiveDate, cycle_length: i64) -> Option<(NaiveDate, OvulationWindow)> {
    let next = last.checked_add_signed(TimeDelta::try_days(cycle_length)?)?;
    let window = ovulation_window(next)?;
    Some((next, window))
}

/// Ask the refiner for a cycle length. `None` means "keep the baseline".
fn refine(
    refiner: &SharedRefiner,
    history: &PeriodHistory,
    last: NaiveDate,
    baseline_cl: i64,
) -> Option<PredictionResult> {
    let features = FeatureVector::from_history(history, baseline_cl);

    let raw = match refiner.predict(&features) {
        Ok(v) => v,
        Err(err) => {
            warn!(error = %err, "refiner failed; keeping baseline");
            return None;
        }
    };
    if !raw.is_finite() {
        warn!(value = raw, "refiner returned a non-finite value; keeping baseline");
        return None;
    }

    // Truncate toward zero, as an integer cast of the model output would.
    let delta = raw.trunc() as i64;
    if delta <= 0 {
        warn!(value = raw, "refiner returned a non-positive cycle length; keeping baseline");
        return None;
    }

    let Some((next, window)) = project(last, delta) else {
        warn!(value = raw, "refined date out of calendar range; keeping baseline");
        return None;
    };

    debug!(baseline_cl, refined_cl = delta, "refinement applied");
    Some(PredictionResult {
        next_period_date: next,
        predicted_cycle_length: delta,
        ovulation_window: window,
        method: Method::Ml,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::refine::{RefineError, Refiner};

    const SAMPLE: [&str; 3] = ["2025-06-01", "2025-06-30", "2025-07-28"];

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[derive(Debug)]
    struct Fixed(f64);

    impl Refiner for Fixed {
        fn predict(&self, _features: &FeatureVector) -> Result<f64, RefineError> {
            Ok(self.0)
        }
    }

    #[derive(Debug)]
    struct Failing;

    impl Refiner for Failing {
        fn predict(&self, _features: &FeatureVector) -> Result<f64, RefineError> {
            Err(RefineError::Shape { expected: 3, got: 0 })
        }
    }

    #[derive(Debug, Default)]
    struct Recording {
        calls: AtomicUsize,
        seen: std::sync::Mutex<Option<FeatureVector>>,
    }

    impl Refiner for Recording {
        fn predict(&self, features: &FeatureVector) -> Result<f64, RefineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen.lock().unwrap() = Some(*features);
            Ok(features.mean_delta())
        }
    }

    fn with(refiner: impl Refiner + 'static) -> Predictor {
        let shared: SharedRefiner = Arc::new(refiner);
        Predictor::with_refiner(Some(shared))
    }

    #[test]
    fn baseline_prediction_for_sample_history() {
        let result = Predictor::new().predict(&SAMPLE, None).unwrap();
        assert_eq!(result.predicted_cycle_length, 28);
        assert_eq!(result.next_period_date, date("2025-08-25"));
        assert_eq!(result.ovulation_window.start, date("2025-08-09"));
        assert_eq!(result.ovulation_window.end, date("2025-08-13"));
        assert_eq!(result.method, Method::Baseline);
    }

    #[test]
    fn anchor_is_latest_date_not_last_input() {
        let result = Predictor::new()
            .predict(&["2025-07-28", "2025-06-01", "2025-06-30"], None)
            .unwrap();
        assert_eq!(result.next_period_date, date("2025-08-25"));
    }

    #[test]
    fn override_without_refiner_is_used_verbatim() {
        let result = Predictor::new().predict(&SAMPLE, Some(35)).unwrap();
        assert_eq!(result.predicted_cycle_length, 35);
        assert_eq!(result.next_period_date, date("2025-09-01"));
        assert_eq!(result.method, Method::Baseline);
    }

    #[test]
    fn override_with_refiner_can_be_replaced() {
        let result = with(Fixed(30.7)).predict(&SAMPLE, Some(35)).unwrap();
        assert_eq!(result.predicted_cycle_length, 30);
        assert_eq!(result.next_period_date, date("2025-08-27"));
        assert_eq!(result.method, Method::Ml);
    }

    #[test]
    fn zero_or_negative_override_means_none() {
        let p = Predictor::new();
        assert_eq!(p.predict(&SAMPLE, Some(0)).unwrap().predicted_cycle_length, 28);
        assert_eq!(p.predict(&SAMPLE, Some(-3)).unwrap().predicted_cycle_length, 28);
    }

    #[test]
    fn failing_refiner_falls_back_to_baseline() {
        let result = with(Failing).predict(&SAMPLE, None).unwrap();
        assert_eq!(result, Predictor::new().predict(&SAMPLE, None).unwrap());
        assert_eq!(result.method, Method::Baseline);
    }

    #[test]
    fn unusable_refiner_values_are_discarded() {
        for bad in [0.0, 0.9, -4.0, f64::NAN, f64::INFINITY, 1e300] {
            let result = with(Fixed(bad)).predict(&SAMPLE, None).unwrap();
            assert_eq!(result.method, Method::Baseline, "value {bad} should be discarded");
            assert_eq!(result.predicted_cycle_length, 28);
        }
    }

    #[test]
    fn refiner_sees_sorted_history_features() {
        let recording = Arc::new(Recording::default());
        let shared: SharedRefiner = recording.clone();
        let predictor = Predictor::with_refiner(Some(shared));

        let result = predictor
            .predict(&["2025-07-28", "2025-06-01", "2025-06-30"], None)
            .unwrap();

        assert_eq!(recording.calls.load(Ordering::SeqCst), 1);
        let features = recording.seen.lock().unwrap().unwrap();
        assert_eq!(features, FeatureVector::new(28.0, 2.0, 28.5));
        // 28.5 truncates to 28
        assert_eq!(result.predicted_cycle_length, 28);
        assert_eq!(result.method, Method::Ml);
    }

    #[test]
    fn single_date_features_use_baseline_cycle_length() {
        let recording = Arc::new(Recording::default());
        let shared: SharedRefiner = recording.clone();
        let predictor = Predictor::with_refiner(Some(shared));

        predictor.predict(&["2025-06-01"], Some(33)).unwrap();
        let features = recording.seen.lock().unwrap().unwrap();
        assert_eq!(features, FeatureVector::new(33.0, 1.0, 33.0));
    }

    #[test]
    fn invalid_input_fails_before_output() {
        let p = with(Fixed(30.0));
        assert_eq!(p.predict::<&str>(&[], None).unwrap_err(), PredictError::EmptyHistory);
        assert!(matches!(
            p.predict(&["not-a-date"], None).unwrap_err(),
            PredictError::MalformedDate { index: 0, .. }
        ));
        assert_eq!(
            p.predict_history(&PeriodHistory::default(), None).unwrap_err(),
            PredictError::EmptyHistory
        );
    }

    #[test]
    fn huge_override_is_out_of_range() {
        let err = Predictor::new().predict(&SAMPLE, Some(i64::MAX)).unwrap_err();
        assert_eq!(err, PredictError::DateOutOfRange);
    }

    #[test]
    fn duplicate_heavy_history_yields_zero_cycle_length() {
        // Gaps [0, 0, 1] average to 1/3, which rounds to 0. Not clamped.
        let dates = ["2025-06-01", "2025-06-01", "2025-06-01", "2025-06-02"];
        let result = Predictor::new().predict(&dates, None).unwrap();
        assert_eq!(result.predicted_cycle_length, 0);
        assert_eq!(result.next_period_date, date("2025-06-02"));
        assert_eq!(result.ovulation_window.start, date("2025-05-17"));
        assert_eq!(result.ovulation_window.end, date("2025-05-21"));
        assert_eq!(result.method, Method::Baseline);
    }

    #[test]
    fn predictions_are_repeatable() {
        let p = with(Fixed(31.0));
        assert_eq!(p.predict(&SAMPLE, None).unwrap(), p.predict(&SAMPLE, None).unwrap());
    }
}
