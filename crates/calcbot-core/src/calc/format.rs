/// Canonical decimal rendering of a result.
///
/// Shortest representation that parses back to the same `f64`, never in
/// exponent form, without trailing zeros. Negative zero prints as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let s = value.to_string();
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}
