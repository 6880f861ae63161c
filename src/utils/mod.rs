use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Local};

use crate::error::ValidationError;
use crate::models::ItemImage;

pub fn format_decimal(value: f64) -> String {
    // `-0.0` would otherwise print as "-0.00".
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.2}", value)
}

pub fn format_money(symbol: &str, value: f64) -> String {
    format!("{}{}", symbol, format_decimal(value))
}

/// Parses a non-negative amount typed into a form. Accepts a comma as the
/// decimal separator.
pub fn parse_amount(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    let raw = value.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required { field });
    }
    let parsed = raw
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidNumber {
            field,
            value: raw.to_string(),
        })?;
    if !parsed.is_finite() {
        return Err(ValidationError::InvalidNumber {
            field,
            value: raw.to_string(),
        });
    }
    if parsed < 0.0 {
        return Err(ValidationError::Negative { field });
    }
    // "-0" passes the sign check; store it as plain zero.
    Ok(parsed + 0.0)
}

pub fn generate_order_no(prefix: &str, now: DateTime<Local>) -> String {
    format!("{}{}", prefix, now.timestamp_millis())
}

pub fn format_order_date(format: &str, now: DateTime<Local>) -> String {
    now.format(format).to_string()
}

pub fn decode_image(file_name: &str, content_type: &str, data: &str) -> Result<ItemImage, ValidationError> {
    // Browsers hand over `data:<mime>;base64,<payload>`; accept either form.
    let payload = match data.split_once(";base64,") {
        Some((_, rest)) => rest,
        None => data,
    };
    let bytes = general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| ValidationError::InvalidImage {
            name: file_name.to_string(),
            reason: e.to_string(),
        })?;
    Ok(ItemImage {
        file_name: file_name.to_string(),
        content_type: content_type.to_string(),
        bytes,
    })
}

pub fn image_data_url(image: &ItemImage) -> String {
    format!(
        "data:{};base64,{}",
        image.content_type,
        general_purpose::STANDARD.encode(&image.bytes)
    )
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
