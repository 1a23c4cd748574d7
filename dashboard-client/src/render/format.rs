//! Number and text formatting shared by the render functions

/// Format as US dollars: `$1,234.56`, negatives as `-$1,234.56`
pub fn usd(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${}", grouped(value.abs(), 2))
}

/// Group the integer part by thousands
pub fn grouped(value: f64, decimals: usize) -> String {
    let fixed = format!("{value:.decimals$}");
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(d) => ("-", d),
        None => ("", int_part),
    };

    let mut out = String::with_capacity(fixed.len() + digits.len() / 3);
    out.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Signed dollar change: `+$2,840.25` / `-$1.23`
pub fn signed_usd(value: f64) -> String {
    if value >= 0.0 {
        format!("+{}", usd(value))
    } else {
        usd(value)
    }
}

/// Signed percentage to 2 decimals: `+2.32%`
pub fn signed_percent(value: f64) -> String {
    if value >= 0.0 {
        format!("+{value:.2}%")
    } else {
        format!("{value:.2}%")
    }
}

/// CSS class for a change figure
pub fn change_class(value: f64) -> &'static str {
    if value >= 0.0 { "positive" } else { "negative" }
}

/// Escape text for interpolation into HTML content or attributes
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd() {
        assert_eq!(usd(1000.0), "$1,000.00");
        assert_eq!(usd(125_420.5), "$125,420.50");
        assert_eq!(usd(67_234.56), "$67,234.56");
        assert_eq!(usd(0.0), "$0.00");
        assert_eq!(usd(999.999), "$1,000.00");
        assert_eq!(usd(-1_234_567.891), "-$1,234,567.89");
    }

    #[test]
    fn test_signed_figures() {
        assert_eq!(signed_usd(2840.25), "+$2,840.25");
        assert_eq!(signed_usd(-1.23), "-$1.23");
        assert_eq!(signed_percent(2.32), "+2.32%");
        assert_eq!(signed_percent(-0.85), "-0.85%");
        assert_eq!(change_class(-0.01), "negative");
        assert_eq!(change_class(0.0), "positive");
    }

    #[test]
    fn test_grouped_without_decimals() {
        assert_eq!(grouped(1_234_567.0, 0), "1,234,567");
        assert_eq!(grouped(12.0, 0), "12");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }
}
