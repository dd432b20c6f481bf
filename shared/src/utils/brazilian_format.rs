// Brazilian number handling: lenient normalization of typed amounts and
// formatting back to the "1.234,56" convention.
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Longer markers first so "US$" is not left behind as "US".
const CURRENCY_MARKERS: [&str; 5] = ["US$", "R$", "r$", "$", "€"];

/// A numeric value as it arrives from a form field or a JSON payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
    #[default]
    Absent,
}

impl NumericInput {
    pub fn is_absent(&self) -> bool {
        matches!(self, NumericInput::Absent)
    }

    /// Absent, or text with nothing but whitespace: what an empty form field sends.
    pub fn is_blank(&self) -> bool {
        match self {
            NumericInput::Absent => true,
            NumericInput::Text(s) => s.chars().all(char::is_whitespace),
            NumericInput::Number(_) => false,
        }
    }

    pub fn normalize(&self) -> f64 {
        match self {
            NumericInput::Absent => 0.0,
            NumericInput::Number(n) => finite_or_zero(*n),
            NumericInput::Text(s) => normalize_str(s),
        }
    }
}

impl From<f64> for NumericInput {
    fn from(n: f64) -> Self {
        NumericInput::Number(n)
    }
}

impl From<i64> for NumericInput {
    fn from(n: i64) -> Self {
        NumericInput::Number(n as f64)
    }
}

impl From<i32> for NumericInput {
    fn from(n: i32) -> Self {
        NumericInput::Number(f64::from(n))
    }
}

impl From<u32> for NumericInput {
    fn from(n: u32) -> Self {
        NumericInput::Number(f64::from(n))
    }
}

impl From<&str> for NumericInput {
    fn from(s: &str) -> Self {
        NumericInput::Text(s.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(s: String) -> Self {
        NumericInput::Text(s)
    }
}

impl<T: Into<NumericInput>> From<Option<T>> for NumericInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(NumericInput::Absent, Into::into)
    }
}

impl From<&Value> for NumericInput {
    fn from(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map_or(NumericInput::Absent, NumericInput::Number),
            Value::String(s) => NumericInput::Text(s.clone()),
            _ => NumericInput::Absent,
        }
    }
}

/// Converts anything number-like into an `f64`, falling back to 0 for absent or
/// unparseable input. Never fails.
pub fn normalize_number(input: impl Into<NumericInput>) -> f64 {
    input.into().normalize()
}

/// Textual form of [`normalize_number`]. Accepts currency prefixes, thousands
/// separators and either comma or dot as the decimal separator.
pub fn normalize_str(raw: &str) -> f64 {
    let cleaned = strip_decorations(raw);
    canonicalize_separators(&cleaned)
        .parse::<f64>()
        .map(finite_or_zero)
        .unwrap_or(0.0)
}

fn finite_or_zero(n: f64) -> f64 {
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

fn strip_decorations(raw: &str) -> String {
    // char::is_whitespace covers U+00A0, which spreadsheets like to emit.
    let mut s: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    for marker in CURRENCY_MARKERS {
        if s.contains(marker) {
            s = s.replace(marker, "");
        }
    }
    s
}

fn canonicalize_separators(s: &str) -> String {
    match (s.rfind(','), s.rfind('.')) {
        // The separator that shows up last is the decimal point.
        (Some(comma), Some(dot)) => decimal_at(s, comma.max(dot)),
        (Some(comma), None) => decimal_at(s, comma),
        (None, Some(dot)) => dot_only(s, dot),
        (None, None) => s
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '-')
            .collect(),
    }
}

/// Keeps the separator at byte offset `pos` as the decimal point and drops
/// every other comma and dot.
fn decimal_at(s: &str, pos: usize) -> String {
    s.char_indices()
        .filter_map(|(i, c)| match c {
            _ if i == pos => Some('.'),
            ',' | '.' => None,
            other => Some(other),
        })
        .collect()
}

fn dot_only(s: &str, last_dot: usize) -> String {
    let fraction_len = s[last_dot + 1..].chars().count();
    if fraction_len == 0 || is_thousands_grouping(s) {
        return s.replace('.', "");
    }
    // 1-4 trailing digits read as a plain decimal ("20.0000"); longer tails
    // still use the final dot, with any earlier dots dropped.
    decimal_at(s, last_dot)
}

/// `1.234`, `-12.345.678`: one to three leading digits, then groups of exactly
/// three. A leading zero group ("0.500") is never a grouping.
fn is_thousands_grouping(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let mut groups = unsigned.split('.');
    let head = match groups.next() {
        Some(head) => head,
        None => return false,
    };
    if head.is_empty() || head.len() > 3 || head.starts_with('0') || !all_digits(head) {
        return false;
    }
    let mut tail_count = 0;
    for group in groups {
        if group.len() != 3 || !all_digits(group) {
            return false;
        }
        tail_count += 1;
    }
    tail_count > 0
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Formats `value` as "1.234,56" with `decimals` fractional digits.
pub fn format_decimal(value: f64, decimals: usize) -> String {
    let value = finite_or_zero(value);
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    // Rounded to zero prints without a sign.
    if value < 0.0 && formatted.bytes().any(|b| (b'1'..=b'9').contains(&b)) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// "R$ 1.234,56"; negatives as "-R$ 1,00".
pub fn format_currency(value: f64) -> String {
    let body = format_decimal(value, 2);
    match body.strip_prefix('-') {
        Some(unsigned) => format!("-R$ {}", unsigned),
        None => format!("R$ {}", body),
    }
}

pub fn round_cents(value: f64) -> f64 {
    (finite_or_zero(value) * 100.0).round() / 100.0
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_is_zero() {
        assert_eq!(normalize_number(NumericInput::Absent), 0.0);
        assert_eq!(normalize_number(None::<f64>), 0.0);
        assert_eq!(normalize_number(&Value::Null), 0.0);
    }

    #[test]
    fn test_native_numbers_pass_through() {
        assert_eq!(normalize_number(12.5), 12.5);
        assert_eq!(normalize_number(-3), -3.0);
        assert_eq!(normalize_number(f64::NAN), 0.0);
        assert_eq!(normalize_number(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_brazilian_currency() {
        assert_eq!(normalize_str("R$ 1.234,56"), 1234.56);
        assert_eq!(normalize_str("R$\u{a0}600.822.115,84"), 600822115.84);
        assert_eq!(normalize_str("-R$ 10,00"), -10.0);
        assert_eq!(normalize_str("123,45"), 123.45);
    }

    #[test]
    fn test_dot_decimal_convention() {
        assert_eq!(normalize_str("1,234.56"), 1234.56);
        assert_eq!(normalize_str("US$ 2,500.10"), 2500.10);
        assert_eq!(normalize_str("12.5"), 12.5);
    }

    #[test]
    fn test_lone_dot_heuristics() {
        assert_eq!(normalize_str("20.0000"), 20.0);
        assert_eq!(normalize_str("1.234"), 1234.0);
        assert_eq!(normalize_str("124.080"), 124080.0);
        assert_eq!(normalize_str("1.234.567"), 1234567.0);
        assert_eq!(normalize_str("0.500"), 0.5);
        assert_eq!(normalize_str("1."), 1.0);
        assert_eq!(normalize_str("3.14159"), 3.14159);
        assert_eq!(normalize_str("1.2.34567"), 12.34567);
    }

    #[test]
    fn test_multiple_commas_use_last_as_decimal() {
        assert_eq!(normalize_str("1,234,5"), 1234.5);
    }

    #[test]
    fn test_no_separators_strips_noise() {
        assert_eq!(normalize_str("42 un"), 42.0);
        assert_eq!(normalize_str("-7kg"), -7.0);
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(normalize_str(""), 0.0);
        assert_eq!(normalize_str("abc"), 0.0);
        assert_eq!(normalize_str("R$"), 0.0);
        assert_eq!(normalize_str("--"), 0.0);
        assert_eq!(normalize_str("1,2x"), 0.0);
    }

    #[test]
    fn test_blank_inputs() {
        assert!(NumericInput::Absent.is_blank());
        assert!(NumericInput::from("").is_blank());
        assert!(NumericInput::from(" \u{a0}\t").is_blank());
        assert!(!NumericInput::from("0").is_blank());
        assert!(!NumericInput::from(0.0).is_blank());
        assert!(!NumericInput::from("").is_absent());
    }

    #[test]
    fn test_json_values() {
        assert_eq!(normalize_number(&serde_json::json!("R$ 5,90")), 5.9);
        assert_eq!(normalize_number(&serde_json::json!(7)), 7.0);
        assert_eq!(normalize_number(&serde_json::json!(true)), 0.0);
    }

    #[test]
    fn test_numeric_input_deserializes_untagged() {
        #[derive(Deserialize)]
        struct Form {
            #[serde(default)]
            price: NumericInput,
            qty: NumericInput,
            note: NumericInput,
        }
        let form: Form = serde_json::from_str(r#"{"qty": "1,5", "note": null}"#).unwrap();
        assert!(form.price.is_absent());
        assert_eq!(form.qty, NumericInput::Text("1,5".to_string()));
        assert!(form.note.is_absent());
        assert_eq!(form.qty.normalize(), 1.5);
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(1234.56, 2), "1.234,56");
        assert_eq!(format_decimal(600822115.84, 2), "600.822.115,84");
        assert_eq!(format_decimal(0.5, 2), "0,50");
        assert_eq!(format_decimal(-1234.5, 2), "-1.234,50");
        assert_eq!(format_decimal(-0.001, 2), "0,00");
        assert_eq!(format_decimal(1234567.0, 0), "1.234.567");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.56), "R$ 1.234,56");
        assert_eq!(format_currency(-1.0), "-R$ 1,00");
    }

    #[test]
    fn test_formatted_values_normalize_back() {
        for n in [0.0, 0.01, 1.5, 12.0, 999.99, 1234.56, 20000.0, 600822115.84, -45.3] {
            assert_eq!(normalize_str(&format_decimal(n, 2)), n, "value {}", n);
            assert_eq!(normalize_str(&format_currency(n)), n, "value {}", n);
        }
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(10.005_f64 + 0.0001), 10.01);
        assert_eq!(round_cents(3.333), 3.33);
        assert_eq!(round_cents(f64::NAN), 0.0);
    }
}
