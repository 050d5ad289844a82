//! Window packaging
//!
//! Turns a closed chunk into the [`TimeWindow`] submitted to the backend.

use t3tracker_domain::{Selection, SystemSnapshot, TimeWindow};

/// Package the chunk `chunk_start..now` for `selection`.
///
/// `now` is clamped to `chunk_start` so a wall clock stepping backwards can
/// never produce `end < start`.
pub fn package_window(
    chunk_start: i64,
    now: i64,
    selection: &Selection,
    system: SystemSnapshot,
    timezone_offset: i64,
) -> TimeWindow {
    TimeWindow {
        start: chunk_start,
        end: now.max(chunk_start),
        timezone_offset,
        project_id: selection.project_id().to_string(),
        task_id: selection.task_id().to_string(),
        system,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection() -> Selection {
        Selection::new("p1", "t1").unwrap()
    }

    #[test]
    fn copies_selection_and_offset() {
        let snapshot = SystemSnapshot { computer: Some("host".into()), ..Default::default() };
        let window = package_window(1_000, 61_000, &selection(), snapshot.clone(), 7_200_000);

        assert_eq!(window.start, 1_000);
        assert_eq!(window.end, 61_000);
        assert_eq!(window.timezone_offset, 7_200_000);
        assert_eq!(window.project_id, "p1");
        assert_eq!(window.task_id, "t1");
        assert_eq!(window.system, snapshot);
    }

    #[test]
    fn backwards_clock_yields_empty_window() {
        let window = package_window(10_000, 9_000, &selection(), SystemSnapshot::default(), 0);
        assert_eq!(window.end, 10_000);
        assert_eq!(window.duration_ms(), 0);
    }
}
