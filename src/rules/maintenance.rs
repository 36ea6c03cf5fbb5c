//! Maintenance window safety
//!
//! A maintenance window descriptor has the form `ddd:HH:MM-ddd:HH:MM` in UTC
//! (e.g., `mon:13:00-mon:20:00`). A window is safe when it lies entirely within
//! the configured safe band.
//!
//! The day-of-week segments are ignored, and a window that crosses midnight
//! (end earlier than start) is always reported as unsafe.

const MINUTES_PER_HOUR: u32 = 60;

/// Safe band in minutes since midnight UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeWindow {
    start: u32,
    end: u32,
}

impl SafeWindow {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }
}

impl Default for SafeWindow {
    /// 13:00-20:00 UTC
    fn default() -> Self {
        Self {
            start: 13 * MINUTES_PER_HOUR,
            end: 20 * MINUTES_PER_HOUR,
        }
    }
}

/// Parse `HH:MM` into minutes since midnight
pub fn parse_time_of_day(value: &str) -> Option<u32> {
    let (hour, minute) = value.split_once(':')?;
    to_minutes(hour, minute)
}

fn to_minutes(hour: &str, minute: &str) -> Option<u32> {
    let hour: u32 = hour.trim().parse().ok()?;
    let minute: u32 = minute.trim().parse().ok()?;

    if hour > 23 || minute > 59 {
        return None;
    }

    Some(hour * MINUTES_PER_HOUR + minute)
}

/// Parse one `ddd:HH:MM` endpoint, ignoring the day
fn parse_endpoint(endpoint: &str) -> Option<u32> {
    let segments: Vec<&str> = endpoint.split(':').collect();
    if segments.len() != 3 {
        return None;
    }
    to_minutes(segments[1], segments[2])
}

/// Parse a descriptor into `(start, end)` minutes since midnight
pub fn parse_window(descriptor: &str) -> Option<(u32, u32)> {
    let endpoints: Vec<&str> = descriptor.split('-').collect();
    if endpoints.len() != 2 {
        return None;
    }

    let start = parse_endpoint(endpoints[0])?;
    let end = parse_endpoint(endpoints[1])?;
    Some((start, end))
}

/// Whether `descriptor` lies inside `safe`.
///
/// True iff the descriptor parses, `start >= safe.start`, `end <= safe.end`
/// and `end > start`.
pub fn is_window_valid(descriptor: &str, safe: &SafeWindow) -> bool {
    match parse_window(descriptor) {
        Some((start, end)) => start >= safe.start && end <= safe.end && end > start,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(descriptor: &str) -> bool {
        is_window_valid(descriptor, &SafeWindow::default())
    }

    #[test]
    fn test_default_safe_window_bounds() {
        let safe = SafeWindow::default();
        assert_eq!(safe.start(), 780);
        assert_eq!(safe.end(), 1200);
    }

    #[test]
    fn test_window_exactly_on_bounds_is_valid() {
        assert!(valid("mon:13:00-mon:20:00"));
    }

    #[test]
    fn test_window_inside_bounds_is_valid() {
        assert!(valid("wed:14:30-wed:15:00"));
    }

    #[test]
    fn test_window_starting_early_is_invalid() {
        assert!(!valid("mon:12:00-mon:20:00"));
        assert!(!valid("mon:12:59-mon:14:00"));
    }

    #[test]
    fn test_window_ending_late_is_invalid() {
        assert!(!valid("mon:19:00-mon:20:01"));
    }

    #[test]
    fn test_empty_window_is_invalid() {
        assert!(!valid("mon:13:00-mon:13:00"));
    }

    #[test]
    fn test_missing_day_segment_is_invalid() {
        assert!(!valid("13:00-20:00"));
    }

    #[test]
    fn test_malformed_descriptors_are_invalid() {
        assert!(!valid(""));
        assert!(!valid("mon:13:00"));
        assert!(!valid("mon:13:00-mon:14:00-mon:15:00"));
        assert!(!valid("mon:aa:00-mon:14:00"));
        assert!(!valid("mon:13:00-mon:14:99"));
    }

    #[test]
    fn test_day_of_week_is_ignored() {
        // Different days still compare on time of day only
        assert!(valid("sun:13:00-mon:14:00"));
    }

    #[test]
    fn test_window_crossing_midnight_is_always_invalid() {
        // 19:30 to 00:30 the next day lies partly in the safe band, but
        // end < start so it is reported invalid.
        assert!(!valid("mon:19:30-tue:00:30"));

        let whole_day = SafeWindow::new(0, 23 * 60 + 59);
        assert!(!is_window_valid("sat:23:00-sun:01:00", &whole_day));
    }

    #[test]
    fn test_custom_safe_window() {
        let night = SafeWindow::new(60, 300);
        assert!(is_window_valid("tue:01:00-tue:02:00", &night));
        assert!(!is_window_valid("tue:13:00-tue:14:00", &night));
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("13:00"), Some(780));
        assert_eq!(parse_time_of_day("00:00"), Some(0));
        assert_eq!(parse_time_of_day("23:59"), Some(1439));
        assert_eq!(parse_time_of_day("24:00"), None);
        assert_eq!(parse_time_of_day("1300"), None);
        assert_eq!(parse_time_of_day("one:00"), None);
    }
}
