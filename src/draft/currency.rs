//! Rupiah display formatting.
//!
//! Matches the `id-ID` IDR currency style with zero fractional digits:
//! dot thousands separators behind an `Rp ` prefix.

/// Group the digits of `value` in threes with `.` separators.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Format an amount as Rupiah, e.g. `20000000` becomes `Rp 20.000.000`.
pub fn format_rupiah(amount: i64) -> String {
    let grouped = format_thousands(amount.unsigned_abs());
    if amount < 0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}
