use chrono::{DateTime, Utc};

/// Human-readable age of a timestamp, e.g. "5m ago"
pub fn age_display(at: DateTime<Utc>) -> String {
    age_display_minutes((Utc::now() - at).num_minutes())
}

fn age_display_minutes(minutes: i64) -> String {
    if minutes < 1 {
        // Also covers clock skew
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        let hours = minutes / 60;
        if minutes % 60 >= 30 {
            format!("{}h ago", hours + 1)
        } else {
            format!("{}h ago", hours)
        }
    } else {
        let days = minutes / 1440;
        if (minutes % 1440) / 60 >= 12 {
            format!("{}d ago", days + 1)
        } else {
            format!("{}d ago", days)
        }
    }
}

/// Format a step timer, e.g. "1 hr 5 min"
pub fn format_minutes(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, 0) => "no timer".to_string(),
        (0, m) => format!("{} min", m),
        (h, 0) => format!("{} hr", h),
        (h, m) => format!("{} hr {} min", h, m),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_age_display() {
        assert_eq!(age_display(Utc::now()), "just now");
        assert_eq!(age_display(Utc::now() + Duration::minutes(5)), "just now");
        assert_eq!(age_display_minutes(5), "5m ago");
        assert_eq!(age_display_minutes(90), "2h ago");
        assert_eq!(age_display_minutes(70), "1h ago");
        assert_eq!(age_display_minutes(1440 * 2 + 60), "2d ago");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0), "no timer");
        assert_eq!(format_minutes(45), "45 min");
        assert_eq!(format_minutes(120), "2 hr");
        assert_eq!(format_minutes(65), "1 hr 5 min");
    }
}
