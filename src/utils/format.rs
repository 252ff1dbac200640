use chrono::{DateTime, Utc};

/// Format a decimal amount string for display, in EGP.
pub fn format_amount(amount: &str) -> String {
    format!("{} EGP", amount)
}

/// Human-readable age of a timestamp, for the status bar
/// ("just now", "5m ago", "2h ago").
pub fn age_display(at: DateTime<Utc>) -> String {
    let minutes = (Utc::now() - at).num_minutes();
    if minutes < 1 {
        // Also covers clock skew
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else {
        format!("{}h ago", minutes / 60)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount("1500.00"), "1500.00 EGP");
    }

    #[test]
    fn test_age_display_just_now() {
        assert_eq!(age_display(Utc::now()), "just now");
    }

    #[test]
    fn test_age_display_minutes_and_hours() {
        assert_eq!(age_display(Utc::now() - Duration::minutes(5)), "5m ago");
        assert_eq!(age_display(Utc::now() - Duration::minutes(130)), "2h ago");
    }

    #[test]
    fn test_age_display_clock_skew() {
        assert_eq!(age_display(Utc::now() + Duration::minutes(10)), "just now");
    }
}
