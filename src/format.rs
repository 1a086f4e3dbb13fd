use textwrap::{wrap, Options, WordSeparator, WrapAlgorithm};

// ---------------------------------------------------------------------------
// Brazilian number formatting and label wrapping for the data table
// ---------------------------------------------------------------------------

/// Format with two decimals, `.` as thousands separator and `,` as decimal
/// separator, then drop zero cents: `1234.0` → `1.234`, `1234.5` → `1.234,5`,
/// `1234.56` → `1.234,56`.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    // "-0,00" would read oddly after rounding
    if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));

    let cents = cents.trim_end_matches('0');
    if !cents.is_empty() {
        out.push(',');
        out.push_str(cents);
    }
    out
}

/// Point label for a percentage-valued series.
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_value(value))
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

/// Word-wrap `text` to at most `width` characters per line without breaking
/// words. A word longer than `width` is kept whole on its own line.
pub fn wrap_label(text: &str, width: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    let options = Options::new(width)
        .break_words(false)
        .word_separator(WordSeparator::AsciiSpace)
        .wrap_algorithm(WrapAlgorithm::FirstFit);
    wrap(text, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}
