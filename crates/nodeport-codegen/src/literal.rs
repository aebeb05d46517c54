//! JavaScript literal serialization
//!
//! Every value that reaches generated code goes through here.

use nodeport_core::Value;

use crate::identifier::is_identifier;

/// Serialize a socket value as a JavaScript literal
pub fn value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => float(*f),
        Value::String(s) => string(s),
        Value::Vector(components) => {
            let items: Vec<String> = components.iter().map(|c| float(*c)).collect();
            format!("[{}]", items.join(", "))
        }
    }
}

/// Serialize a float, always with a decimal point or exponent
pub fn float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f == f64::INFINITY {
        "Infinity".to_string()
    } else if f == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        format!("{:?}", f)
    }
}

/// Serialize a single-quoted string literal
pub fn string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Serialize an object key: bare when it is an identifier, quoted otherwise
pub fn key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        string(name)
    }
}

/// Serialize an RGB color as a hex literal
pub fn color(rgb: u32) -> String {
    format!("0x{:06x}", rgb)
}
