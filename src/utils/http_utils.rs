pub const DEFAULT_MODE: &str = "main";
pub const DEFAULT_PAGE: i64 = 1;

/// Resolves the `mode` query parameter. Missing or empty values fall back to `main`,
/// anything else is passed through untouched.
pub fn parse_mode(mode: Option<&str>) -> String {
    match mode {
        Some(mode) if !mode.is_empty() => mode.to_string(),
        _ => DEFAULT_MODE.to_string(),
    }
}

/// Resolves the `page` query parameter the lenient way: leading whitespace and a sign are
/// accepted, parsing stops at the first non-digit (`"2.7"` is page 2) and anything that
/// yields no number, or zero, becomes page 1.
pub fn parse_page(page: Option<&str>) -> i64 {
    let page = match page {
        Some(page) => page.trim_start(),
        None => return DEFAULT_PAGE,
    };

    let (negative, digits) = match page.as_bytes().first() {
        Some(b'-') => (true, &page[1..]),
        Some(b'+') => (false, &page[1..]),
        _ => (false, page),
    };

    let digits: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    let value = match digits.parse::<i64>() {
        Ok(value) => value,
        Err(_) => return DEFAULT_PAGE,
    };

    match if negative { -value } else { value } {
        0 => DEFAULT_PAGE,
        value => value,
    }
}
