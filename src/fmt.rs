/// Format a decimal with its shortest exact representation, keeping at least
/// one fractional digit: 100 -> "100.0", 2.5 -> "2.5", 507.14 -> "507.14".
pub fn decimal(val: f64) -> String {
    let s = format!("{val}");
    if val.is_finite() && !s.contains('.') && !s.contains('e') {
        format!("{s}.0")
    } else {
        s
    }
}
