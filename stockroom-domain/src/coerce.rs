//! 表单数值宽松解析
//!
//! 表单输入从不拒绝：数字字段取最长的合法数字前缀，
//! 无合法前缀时得到“非数”，以 `None` 表示（序列化为 `null`）。
//! 语义对齐浏览器的 `parseInt(s, 10)` / `parseFloat(s)`。
//!

/// 宽松整数解析：`" 42abc"` → `Some(42)`，`"12.7"` → `Some(12)`，`"abc"` → `None`
pub fn parse_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = split_sign(s);
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    // 溢出时饱和，避免把超长数字串当成非数
    let magnitude = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// 宽松小数解析：`"19.99usd"` → `Some(19.99)`，`"1e3"` → `Some(1000.0)`，`""` → `None`
pub fn parse_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let (negative, rest) = split_sign(s);

    if rest.starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let bytes = rest.as_bytes();
    let mut end = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    let mut mantissa_digits = end;

    if bytes.get(end) == Some(&b'.') {
        let frac = bytes[end + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        mantissa_digits += frac;
        if mantissa_digits > 0 {
            end += 1 + frac;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    // 指数部分仅在其后紧跟数字时生效
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut cursor = end + 1;
        if matches!(bytes.get(cursor), Some(b'+' | b'-')) {
            cursor += 1;
        }
        let exp_digits = bytes[cursor.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            end = cursor + exp_digits;
        }
    }

    let value: f64 = rest[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}
