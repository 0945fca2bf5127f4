//! Derived-state rule: a project whose progress reaches 100 is completed.

use chrono::NaiveDate;

use super::status::ProjectStatus;

/// Outcome of applying the completion rule after an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completion {
    pub status: ProjectStatus,
    pub actual_end_date: Option<NaiveDate>,
}

/// Apply the automatic completion transition.
///
/// When progress is 100 and the project is not yet completed, the status
/// becomes [`ProjectStatus::Completed`] and the actual end date is set to
/// `today` unless one is already recorded. The transition never runs in
/// reverse: dropping progress below 100 leaves status and end date alone.
#[must_use]
pub fn completion_rule(
    progress: i32,
    status: ProjectStatus,
    actual_end_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Completion {
    if progress == 100 && status != ProjectStatus::Completed {
        Completion {
            status: ProjectStatus::Completed,
            actual_end_date: actual_end_date.or(Some(today)),
        }
    } else {
        Completion {
            status,
            actual_end_date,
        }
    }
}

/// Clamp a raw progress value into the valid [0, 100] range.
#[must_use]
pub const fn clamp_progress(value: i32) -> i32 {
    if value < 0 {
        0
    } else if value > 100 {
        100
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_progress_100_completes_and_stamps_today() {
        let today = date(2026, 8, 6);
        let result = completion_rule(100, ProjectStatus::InExecution, None, today);
        assert_eq!(result.status, ProjectStatus::Completed);
        assert_eq!(result.actual_end_date, Some(today));
    }

    #[test]
    fn test_existing_end_date_is_kept() {
        let earlier = date(2026, 7, 1);
        let result =
            completion_rule(100, ProjectStatus::InExecution, Some(earlier), date(2026, 8, 6));
        assert_eq!(result.status, ProjectStatus::Completed);
        assert_eq!(result.actual_end_date, Some(earlier));
    }

    #[test]
    fn test_second_application_is_idempotent() {
        let today = date(2026, 8, 6);
        let first = completion_rule(100, ProjectStatus::InExecution, None, today);
        let second = completion_rule(
            100,
            first.status,
            first.actual_end_date,
            date(2026, 9, 1),
        );
        assert_eq!(second.actual_end_date, Some(today));
    }

    #[test]
    fn test_below_100_never_transitions() {
        let today = date(2026, 8, 6);
        let result = completion_rule(99, ProjectStatus::InExecution, None, today);
        assert_eq!(result.status, ProjectStatus::InExecution);
        assert_eq!(result.actual_end_date, None);
    }

    #[test]
    fn test_never_reverses_completion() {
        let end = date(2026, 7, 1);
        let result = completion_rule(40, ProjectStatus::Completed, Some(end), date(2026, 8, 6));
        assert_eq!(result.status, ProjectStatus::Completed);
        assert_eq!(result.actual_end_date, Some(end));
    }

    #[test]
    fn test_clamp_progress() {
        assert_eq!(clamp_progress(-5), 0);
        assert_eq!(clamp_progress(0), 0);
        assert_eq!(clamp_progress(55), 55);
        assert_eq!(clamp_progress(170), 100);
    }
}
