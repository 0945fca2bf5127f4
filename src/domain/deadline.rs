use chrono::NaiveDate;

use super::status::ProjectStatus;

/// Days until the planned end date, negative when past due.
/// `None` when the project has no planned end.
#[must_use]
pub fn days_remaining(planned_end: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    planned_end.map(|end| (end - today).num_days())
}

/// A project is overdue when its planned end has passed and it is not
/// completed. Projects without a planned end are never overdue.
#[must_use]
pub fn is_overdue(status: ProjectStatus, planned_end: Option<NaiveDate>, today: NaiveDate) -> bool {
    if status == ProjectStatus::Completed {
        return false;
    }
    planned_end.is_some_and(|end| today > end)
}
