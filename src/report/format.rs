//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the estimation code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::BatchOutput;
use crate::domain::{Method, PredictionResult};
use crate::estimate::BaselineEstimate;

/// Format a single prediction.
pub fn format_prediction(result: &PredictionResult) -> String {
    let mut out = String::new();

    out.push_str("=== cyc - Next Period Prediction ===\n");
    out.push_str(&format!("Next period:      {}\n", result.next_period_date));
    out.push_str(&format!("Cycle length:     {} days\n", result.predicted_cycle_length));
    out.push_str(&format!(
        "Ovulation window: {} .. {}\n",
        result.ovulation_window.start, result.ovulation_window.end
    ));
    let method = match result.method {
        Method::Baseline => "baseline (robust average)",
        Method::Ml => "ml (learned refiner)",
    };
    out.push_str(&format!("Method:           {method}\n"));

    out
}

/// Format a baseline estimate with its intermediate values.
pub fn format_estimate(est: &BaselineEstimate) -> String {
    let mut out = String::new();

    out.push_str(&format!("Cycle length: {} days\n", est.cycle_length));
    if est.is_default {
        out.push_str("- fewer than 2 distinct dates: default used\n");
        return out;
    }

    out.push_str(&format!("- gaps:     {}\n", fmt_days(&est.deltas)));
    if let Some((q1, q3)) = est.quartiles {
        out.push_str(&format!("- q1/q3:    {q1:.2} / {q3:.2} (iqr {:.2})\n", q3 - q1));
    }
    out.push_str(&format!("- retained: {}\n", fmt_days(&est.retained)));
    if est.used_unfiltered {
        out.push_str("- filter removed every gap; unfiltered gaps used\n");
    }

    out
}

/// Format the per-row batch table plus a one-line summary.
pub fn format_batch(output: &BatchOutput) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<20} {:>6} {:<12} {:>4} {:<25} {:<8}",
            "id", "line", "next", "cl", "ovulation", "method"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<20} {:-<6} {:-<12} {:-<4} {:-<25} {:-<8}", "", "", "", "", "", "").trim_end());
    out.push('\n');

    for o in &output.outcomes {
        let row = match &o.result {
            Ok(r) => format!(
                "{:<20} {:>6} {:<12} {:>4} {:<25} {:<8}",
                truncate(&o.id, 20),
                o.line,
                r.next_period_date.to_string(),
                r.predicted_cycle_length,
                format!("{} .. {}", r.ovulation_window.start, r.ovulation_window.end),
                r.method.as_str(),
            ),
            Err(e) => format!("{:<20} {:>6} error: {e}", truncate(&o.id, 20), o.line),
        };
        out.push_str(row.trim_end());
        out.push('\n');
    }

    for e in &output.row_errors {
        out.push_str(&format!(
            "{:<20} {:>6} error: {}\n",
            truncate(e.id.as_deref().unwrap_or("-"), 20),
            e.line,
            e.message
        ));
    }

    out.push_str(&format!(
        "\nRows: read={} ok={} failed={}\n",
        output.rows_read,
        output.succeeded(),
        output.failed()
    ));
    out
}

fn fmt_days(v: &[i64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| x.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_batch;
    use crate::domain::PeriodHistory;
    use crate::estimate::estimate_detailed;
    use crate::io::ingest::read_histories;
    use crate::predict::Predictor;

    #[test]
    fn prediction_report_lists_all_fields() {
        let r = Predictor::new()
            .predict(&["2025-06-01", "2025-06-30", "2025-07-28"], None)
            .unwrap();
        let text = format_prediction(&r);
        assert!(text.contains("Next period:      2025-08-25"));
        assert!(text.contains("Cycle length:     28 days"));
        assert!(text.contains("2025-08-09 .. 2025-08-13"));
        assert!(text.contains("baseline"));
    }

    #[test]
    fn estimate_report_shows_retained_gaps() {
        let h = PeriodHistory::parse(&["2025-06-01", "2025-06-30", "2025-07-28"]).unwrap();
        let text = format_estimate(&estimate_detailed(&h));
        assert!(text.contains("- gaps:     [29, 28]"));
        assert!(text.contains("- retained: [29, 28]"));

        let text = format_estimate(&estimate_detailed(&PeriodHistory::default()));
        assert!(text.contains("default used"));
    }

    #[test]
    fn batch_report_summarizes_rows() {
        let csv = "id,period_dates\nalice,2025-06-01;2025-06-30;2025-07-28\nbob,oops\n";
        let output = run_batch(&Predictor::new(), read_histories(csv.as_bytes()).unwrap()).unwrap();
        let text = format_batch(&output);
        assert!(text.contains("2025-08-25"));
        assert!(text.contains("error: invalid date 'oops'"));
        assert!(text.contains("Rows: read=2 ok=1 failed=1"));
    }

    #[test]
    fn truncate_marks_cut_ids() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
