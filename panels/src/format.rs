//! Number formatting for point balances.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// `1234567` -> `"1,234,567"`.
#[must_use]
pub fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `1500` -> `"1,500P"`.
#[must_use]
pub fn points(value: i64) -> String {
    format!("{}P", thousands(value))
}

/// `1500` -> `"1,500 P"`, used where the unit is spaced.
#[must_use]
pub fn points_spaced(value: i64) -> String {
    format!("{} P", thousands(value))
}
