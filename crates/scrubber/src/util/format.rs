use chrono::{DateTime, Local, Utc};

pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    let local: DateTime<Local> = DateTime::from(*dt);
    local.format("%Y-%m-%d %H:%M").to_string()
}

/// Parses sizes such as `512`, `10K`, `1.5 MB` or `2GiB` into bytes.
/// Units are binary; the `B`/`iB` tail is optional.
pub fn parse_size_string(s: &str) -> Result<u64, String> {
    let upper = s.trim().to_uppercase();
    let trimmed = upper
        .strip_suffix("IB")
        .or_else(|| upper.strip_suffix('B'))
        .unwrap_or(&upper);

    let (num_str, multiplier) = if let Some(stripped) = trimmed.strip_suffix('T') {
        (stripped, 1024_u64.pow(4))
    } else if let Some(stripped) = trimmed.strip_suffix('G') {
        (stripped, 1024_u64.pow(3))
    } else if let Some(stripped) = trimmed.strip_suffix('M') {
        (stripped, 1024_u64.pow(2))
    } else if let Some(stripped) = trimmed.strip_suffix('K') {
        (stripped, 1024)
    } else {
        (trimmed, 1)
    };

    let num: f64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid size value: {}", s.trim()))?;

    if !num.is_finite() || num < 0.0 {
        return Err(format!("Invalid size value: {}", s.trim()));
    }

    Ok((num * multiplier as f64) as u64)
}
