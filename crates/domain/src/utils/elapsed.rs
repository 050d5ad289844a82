//! Elapsed-time formatting for the timer display

/// Format elapsed seconds as `HH:MM:SS`.
///
/// Hours are not wrapped at 24, so long sessions read `100:00:00`.
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_elapsed(0), "00:00:00");
    }

    #[test]
    fn formats_minutes_and_hours() {
        assert_eq!(format_elapsed(130), "00:02:10");
        assert_eq!(format_elapsed(3_661), "01:01:01");
        assert_eq!(format_elapsed(360_000), "100:00:00");
    }
}
