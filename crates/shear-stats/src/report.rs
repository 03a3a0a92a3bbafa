use std::fmt::Write as _;

use crate::jackknife::{BiasResult, Measurement};

/// Sigma multiple used for the reported 99.7% intervals.
pub const REPORT_SIGMAS: f64 = 3.0;

/// Formats `value` like C's `%.{precision}g`.
///
/// Uses fixed notation when the decimal exponent lies in `[-4, precision)`,
/// scientific notation otherwise, and strips trailing zeros in both cases.
pub fn format_g(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let precision = precision.max(1);
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // Rust's `{:e}` rounds to the requested digits first, so the exponent
    // already accounts for carries like 9.995 -> 1.00e1.
    let sci = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some(parts) => parts,
        None => return sci,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let mantissa = strip_trailing_zeros(mantissa);
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_trailing_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn named(result: &BiasResult) -> [(&'static str, Measurement); 4] {
    [
        ("R", result.r),
        ("m1", result.m1),
        ("c1", result.c1),
        ("c2", result.c2),
    ]
}

/// Renders the human readable summary: estimates with 3σ errors, then the
/// corresponding intervals.
pub fn render_report(result: &BiasResult) -> String {
    let mut out = String::new();
    for (name, m) in named(result) {
        let _ = writeln!(
            out,
            "{name}: {} +/- {} (99.7%)",
            format_g(m.value, 3),
            format_g(m.err * REPORT_SIGMAS, 3)
        );
    }
    out.push('\n');
    for (name, m) in named(result) {
        let (low, high) = m.interval(REPORT_SIGMAS);
        let _ = writeln!(
            out,
            "{} < {name} < {} (99.7%)",
            format_g(low, 3),
            format_g(high, 3)
        );
    }
    out
}
