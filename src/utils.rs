//! Small helpers.

pub fn sanitize_ticker(sym: &str) -> String {
    sym.trim().to_uppercase()
}

/// Round to 2 decimal places for currency-scale report columns.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Round to 1 decimal place (margin-of-safety column).
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
