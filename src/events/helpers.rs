use chrono::{DateTime, Utc};
use serde_json::Value;

pub fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// Integer field; booleans count as 0/1 and missing values as 0.
pub fn int_field(value: &Value, key: &str) -> i64 {
    match value.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|v| v.min(i64::MAX as u64) as i64))
            .or_else(|| n.as_f64().map(|v| v as i64))
            .unwrap_or(0),
        Some(Value::Bool(b)) => i64::from(*b),
        _ => 0,
    }
}

pub fn bool_field(value: &Value, key: &str) -> bool {
    int_field(value, key) != 0
}

pub fn byte_count_field(value: &Value, key: &str) -> u64 {
    int_field(value, key).max(0) as u64
}

/// Last component of a slash separated path, ignoring trailing slashes.
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Everything before the last component of `path`, without a trailing slash.
pub fn parent_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[..idx],
        None => "",
    }
}

pub fn format_relative_time(unix_secs: i64) -> String {
    let Some(parsed) = DateTime::<Utc>::from_timestamp(unix_secs, 0) else {
        return String::new();
    };
    let duration = Utc::now().signed_duration_since(parsed);
    if duration.num_seconds() < 60 {
        "just now".to_string()
    } else if duration.num_minutes() < 60 {
        format!("{} min ago", duration.num_minutes())
    } else if duration.num_hours() < 24 {
        format!("{} h ago", duration.num_hours())
    } else {
        format!("{} d ago", duration.num_days())
    }
}
