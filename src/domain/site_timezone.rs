use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;

/// Display format for subscription dates, e.g. `May 3, 2024 01:07 PM`
const DISPLAY_FORMAT: &str = "%B %-d, %Y %I:%M %p";

/// Timezone used to present subscription dates
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SiteTimezone {
    Named(Tz),
    ServerLocal,
}

impl SiteTimezone {
    /// Resolve an IANA timezone name, falling back to the server timezone
    pub fn from_setting(name: Option<&str>) -> Self {
        match name.map(str::trim).filter(|n| !n.is_empty()) {
            None => Self::ServerLocal,
            Some(name) => name.parse().map_or_else(
                |e| {
                    tracing::warn!(
                        error.message = %e,
                        "Unknown site timezone {name}, falling back to the server timezone"
                    );
                    Self::ServerLocal
                },
                Self::Named,
            ),
        }
    }

    /// Format a stored timestamp for display
    pub fn format(&self, at: DateTime<Utc>) -> String {
        match self {
            Self::Named(tz) => at.with_timezone(tz).format(DISPLAY_FORMAT).to_string(),
            Self::ServerLocal => at.with_timezone(&Local).format(DISPLAY_FORMAT).to_string(),
        }
    }
}
