// Natural ordering for SKUs and other alphanumeric identifiers: digit runs
// compare by magnitude, so "H2" sorts before "H10".
use serde_json::Value;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Case-insensitive natural comparison, usable directly with `sort_by`.
pub fn compare_natural(a: &str, b: &str) -> Ordering {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let left = tokenize(&a);
    let right = tokenize(&b);

    for i in 0..left.len().max(right.len()) {
        let x = left.get(i).copied().unwrap_or("");
        let y = right.get(i).copied().unwrap_or("");
        let ord = compare_tokens(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Absent keys compare as the empty string.
pub fn compare_natural_opt(a: Option<&str>, b: Option<&str>) -> Ordering {
    compare_natural(a.unwrap_or(""), b.unwrap_or(""))
}

/// Returns a copy of `items` sorted ascending by the natural order of `key`.
/// The sort is stable and the input is left untouched.
pub fn sort_natural_by<T, F>(items: &[T], key: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Option<&str>,
{
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| compare_natural_opt(key(*a), key(*b)));
    sorted.into_iter().cloned().collect()
}

/// Field-name form of [`sort_natural_by`] for loosely typed records. Missing or
/// null fields sort as empty; numbers and booleans use their JSON text.
pub fn sort_by_field(records: &[Value], field: &str) -> Vec<Value> {
    let mut keyed: Vec<(String, &Value)> = records
        .iter()
        .map(|record| (field_text(record.get(field)), record))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_natural(a, b));
    keyed.into_iter().map(|(_, record)| record.clone()).collect()
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Splits into maximal runs that are either all ASCII digits or contain none.
fn tokenize(s: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut run_is_digits = None;

    for (i, c) in s.char_indices() {
        let is_digit = c.is_ascii_digit();
        if run_is_digits.is_some_and(|prev| prev != is_digit) {
            tokens.push(&s[start..i]);
            start = i;
        }
        run_is_digits = Some(is_digit);
    }
    if start < s.len() {
        tokens.push(&s[start..]);
    }
    tokens
}

fn compare_tokens(x: &str, y: &str) -> Ordering {
    if is_digit_run(x) && is_digit_run(y) {
        compare_magnitude(x, y)
    } else {
        locale_compare(x, y)
    }
}

fn is_digit_run(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

// Works on the digit text itself, so runs longer than any integer type still order correctly.
fn compare_magnitude(x: &str, y: &str) -> Ordering {
    let x = x.trim_start_matches('0');
    let y = y.trim_start_matches('0');
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}

/// Base letters first ("acao" and "ação" are neighbours), then the exact text.
fn locale_compare(x: &str, y: &str) -> Ordering {
    fold_accents(x)
        .cmp(&fold_accents(y))
        .then_with(|| x.cmp(y))
}

fn fold_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}
