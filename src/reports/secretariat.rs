//! Per-secretariat activity report.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{DateRange, round_rate};
use crate::domain::ProjectStatus;
use crate::entities::{projects, secretariats};

/// Aggregated numbers for one secretariat's project portfolio.
#[derive(Debug, Serialize)]
pub struct ProjectStats {
    pub total: usize,
    pub planning: usize,
    pub in_execution: usize,
    pub completed: usize,
    pub delayed: usize,
    pub funds_applied: Decimal,
    pub funds_pending: Decimal,
    /// Mean progress across the counted projects; 0 when there are none.
    pub average_progress: f64,
}

#[derive(Debug, Serialize)]
pub struct SecretariatReport {
    pub secretariat: secretariats::Model,
    pub stats: ProjectStats,
    /// The projects behind the numbers, for drill-down display.
    pub projects: Vec<projects::Model>,
}

/// Build one report per active secretariat.
///
/// Projects are matched to their secretariat by foreign key and filtered by
/// start date against `range`; projects without a start date drop out as soon
/// as either bound is set. Inactive secretariats are skipped entirely.
#[must_use]
pub fn secretariat_reports(
    secretariats: &[secretariats::Model],
    projects: &[projects::Model],
    range: &DateRange,
) -> Vec<SecretariatReport> {
    secretariats
        .iter()
        .filter(|s| s.active)
        .map(|s| {
            let selected: Vec<projects::Model> = projects
                .iter()
                .filter(|p| p.secretariat_id == s.id && range.contains_opt(p.start_date))
                .cloned()
                .collect();

            SecretariatReport {
                secretariat: s.clone(),
                stats: project_stats(&selected),
                projects: selected,
            }
        })
        .collect()
}

fn project_stats(projects: &[projects::Model]) -> ProjectStats {
    let count_status = |status: ProjectStatus| {
        projects
            .iter()
            .filter(|p| p.status == status.as_str())
            .count()
    };

    let total = projects.len();
    let progress_sum: i64 = projects.iter().map(|p| i64::from(p.progress)).sum();
    let average_progress = if total == 0 {
        0.0
    } else {
        round_rate(Decimal::from(progress_sum) / Decimal::from(total as u64))
    };

    ProjectStats {
        total,
        planning: count_status(ProjectStatus::Planning),
        in_execution: count_status(ProjectStatus::InExecution),
        completed: count_status(ProjectStatus::Completed),
        delayed: count_status(ProjectStatus::Delayed),
        funds_applied: projects.iter().map(|p| p.funds_applied).sum(),
        funds_pending: projects.iter().map(|p| p.funds_pending).sum(),
        average_progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn secretariat(id: i32, name: &str, active: bool) -> secretariats::Model {
        secretariats::Model {
            id,
            name: name.to_string(),
            responsible: "Somebody".to_string(),
            contact: None,
            email: None,
            phone: None,
            active,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn project(
        id: i32,
        secretariat_id: i32,
        status: ProjectStatus,
        progress: i32,
        start_date: Option<NaiveDate>,
    ) -> projects::Model {
        projects::Model {
            id,
            title: format!("Project {id}"),
            description: None,
            status: status.as_str().to_string(),
            start_date,
            planned_end_date: None,
            actual_end_date: None,
            progress,
            funds_applied: dec!(1000.00),
            funds_pending: Decimal::ZERO,
            notes: None,
            secretariat_id,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_empty_portfolio_averages_zero() {
        let secs = vec![secretariat(1, "Education", true)];
        let reports = secretariat_reports(&secs, &[], &DateRange::default());
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].stats.total, 0);
        assert_eq!(reports[0].stats.average_progress, 0.0);
        assert_eq!(reports[0].stats.funds_applied, Decimal::ZERO);
    }

    #[test]
    fn test_inactive_secretariats_are_skipped() {
        let secs = vec![
            secretariat(1, "Education", true),
            secretariat(2, "Defunct", false),
        ];
        let reports = secretariat_reports(&secs, &[], &DateRange::default());
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].secretariat.id, 1);
    }

    #[test]
    fn test_stats_count_every_status_and_average() {
        let secs = vec![secretariat(1, "Health", true)];
        let projects = vec![
            project(1, 1, ProjectStatus::InExecution, 80, None),
            project(2, 1, ProjectStatus::Completed, 100, None),
        ];
        let reports = secretariat_reports(&secs, &projects, &DateRange::default());
        let stats = &reports[0].stats;
        assert_eq!(stats.total, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.in_execution, 1);
        assert_eq!(stats.planning, 0);
        assert_eq!(stats.delayed, 0);
        assert!((stats.average_progress - 90.0).abs() < f64::EPSILON);
        assert_eq!(stats.funds_applied, dec!(2000.00));
    }

    #[test]
    fn test_projects_of_other_secretariats_excluded() {
        let secs = vec![secretariat(1, "Health", true)];
        let projects = vec![
            project(1, 1, ProjectStatus::Planning, 10, None),
            project(2, 9, ProjectStatus::Planning, 10, None),
        ];
        let reports = secretariat_reports(&secs, &projects, &DateRange::default());
        assert_eq!(reports[0].stats.total, 1);
        assert_eq!(reports[0].projects[0].id, 1);
    }

    #[test]
    fn test_date_window_filters_by_start_date() {
        let secs = vec![secretariat(1, "Works", true)];
        let projects = vec![
            project(1, 1, ProjectStatus::Planning, 0, Some(date(2026, 3, 1))),
            project(2, 1, ProjectStatus::Planning, 0, Some(date(2026, 6, 1))),
            // no start date: excluded once a bound exists
            project(3, 1, ProjectStatus::Planning, 0, None),
        ];
        let range = DateRange::new(Some(date(2026, 1, 1)), Some(date(2026, 4, 30)));
        let reports = secretariat_reports(&secs, &projects, &range);
        assert_eq!(reports[0].stats.total, 1);
        assert_eq!(reports[0].projects[0].id, 1);
    }
}
