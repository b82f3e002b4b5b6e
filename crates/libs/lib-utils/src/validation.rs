//! # Validation Utilities
//!
//! Checks run before a request leaves the client. Errors are plain strings
//! shown to the user as-is.

/// Basic shape check: something before and after a single `@`, and a dot in the domain.
pub fn validate_email(email: &str) -> Result<(), String> {
    let ok = match email.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.contains('@') && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };
    if ok {
        Ok(())
    } else {
        Err("Invalid email format".to_string())
    }
}

pub fn validate_min_length(value: &str, min: usize, field_name: &str) -> Result<(), String> {
    if value.chars().count() < min {
        Err(format!("{} must be at least {} characters", field_name, min))
    } else {
        Ok(())
    }
}

/// Canonical hyphenated UUID (8-4-4-4-12 hex).
pub fn validate_uuid(value: &str, field_name: &str) -> Result<(), String> {
    let groups: Vec<&str> = value.split('-').collect();
    let lens = [8, 4, 4, 4, 12];
    let ok = groups.len() == lens.len()
        && groups
            .iter()
            .zip(lens)
            .all(|(g, len)| g.len() == len && g.chars().all(|c| c.is_ascii_hexdigit()));
    if ok {
        Ok(())
    } else {
        Err(format!("{} must be a UUID", field_name))
    }
}

pub fn validate_http_url(value: &str, field_name: &str) -> Result<(), String> {
    let rest = value
        .strip_prefix("http://")
        .or_else(|| value.strip_prefix("https://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => Err(format!("{} must be an http(s) URL", field_name)),
    }
}
