/// Utilities for date and time formatting
///
/// Backend timestamps arrive as ISO 8601 strings; we format them for the UI
/// without a full chrono parse (the strings are already normalized).

/// Format ISO datetime string to DD.MM.YYYY HH:MM format
/// Example: "2024-03-15T14:02:26.123Z" -> "15.03.2024 14:02"
pub fn format_datetime(datetime_str: &str) -> String {
    let Some((date_part, time_part)) = datetime_str.split_once('T') else {
        return datetime_str.to_string();
    };
    let Some(date) = reorder_date(date_part) else {
        return datetime_str.to_string();
    };
    let hhmm: String = time_part.chars().take(5).collect();
    format!("{} {}", date, hhmm)
}

/// Format ISO date string to DD.MM.YYYY format
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15.03.2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    reorder_date(date_part).unwrap_or_else(|| date_str.to_string())
}

fn reorder_date(date_part: &str) -> Option<String> {
    let mut parts = date_part.splitn(3, '-');
    let year = parts.next()?;
    let month = parts.next()?;
    let day = parts.next()?;
    if year.len() != 4 {
        return None;
    }
    Some(format!("{}.{}.{}", day, month, year))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "15.03.2024 14:02");
        assert_eq!(format_datetime("2024-12-31T23:59:59Z"), "31.12.2024 23:59");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15.03.2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15.03.2024");
    }

    #[test]
    fn test_invalid_input_is_returned_as_is() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("invalid"), "invalid");
    }
}
