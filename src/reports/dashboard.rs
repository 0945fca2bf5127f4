//! General dashboard aggregation and the resource-spend dashboard.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use super::percentage;
use crate::domain::ProjectStatus;
use crate::entities::{office_materials, paid_bills, projects, secretariats, strategic_resources};

/// Projects whose planned end falls within this many days trigger an alert.
const DEADLINE_WINDOW_DAYS: i64 = 7;

/// Materials received within this many days count as "recent".
const RECENT_MATERIAL_DAYS: i64 = 30;

#[derive(Debug, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct SecretariatCount {
    pub secretariat: String,
    pub total: usize,
}

/// One dashboard alert. Two independent scans produce these: deadline
/// proximity and pending funds; a single project can appear in both.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Alert {
    DeadlineApproaching {
        message: String,
        due_date: NaiveDate,
        project_id: i32,
    },
    PendingFunds {
        message: String,
        amount: Decimal,
        project_id: i32,
    },
}

#[derive(Debug, Serialize)]
pub struct DashboardTotals {
    pub active_secretariats: usize,
    pub total_projects: usize,
    pub completed_projects: usize,
    pub delayed_projects: usize,
    /// completed / total * 100, two decimals; 0 when there are no projects.
    pub completion_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct FinancialSummary {
    /// Bills whose reference month is the current month.
    pub current_month_spend: Decimal,
    /// Materials received in the last 30 days.
    pub recent_materials: usize,
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub totals: DashboardTotals,
    pub projects_by_status: Vec<StatusCount>,
    pub projects_by_secretariat: Vec<SecretariatCount>,
    pub alerts: Vec<Alert>,
    pub financial: FinancialSummary,
}

/// Build the general dashboard from full table snapshots.
#[must_use]
pub fn build_dashboard(
    secretariats: &[secretariats::Model],
    projects: &[projects::Model],
    bills: &[paid_bills::Model],
    materials: &[office_materials::Model],
    today: NaiveDate,
) -> Dashboard {
    let completed = count_with_status(projects, ProjectStatus::Completed);
    let delayed = count_with_status(projects, ProjectStatus::Delayed);

    let totals = DashboardTotals {
        active_secretariats: secretariats.iter().filter(|s| s.active).count(),
        total_projects: projects.len(),
        completed_projects: completed,
        delayed_projects: delayed,
        completion_rate: percentage(completed, projects.len()),
    };

    Dashboard {
        totals,
        projects_by_status: status_breakdown(projects),
        projects_by_secretariat: secretariat_breakdown(secretariats, projects),
        alerts: collect_alerts(projects, today),
        financial: FinancialSummary {
            current_month_spend: month_spend(bills, today),
            recent_materials: recent_material_count(materials, today),
        },
    }
}

fn count_with_status(projects: &[projects::Model], status: ProjectStatus) -> usize {
    projects
        .iter()
        .filter(|p| p.status == status.as_str())
        .count()
}

/// Group projects by status, preserving the order statuses first appear.
fn status_breakdown(projects: &[projects::Model]) -> Vec<StatusCount> {
    let mut counts: Vec<StatusCount> = Vec::new();
    for project in projects {
        match counts.iter_mut().find(|c| c.status == project.status) {
            Some(entry) => entry.total += 1,
            None => counts.push(StatusCount {
                status: project.status.clone(),
                total: 1,
            }),
        }
    }
    counts
}

/// Group projects under their secretariat's name, in secretariat order.
/// Secretariats without projects are omitted, mirroring an inner join.
fn secretariat_breakdown(
    secretariats: &[secretariats::Model],
    projects: &[projects::Model],
) -> Vec<SecretariatCount> {
    secretariats
        .iter()
        .filter_map(|s| {
            let total = projects
                .iter()
                .filter(|p| p.secretariat_id == s.id)
                .count();
            (total > 0).then(|| SecretariatCount {
                secretariat: s.name.clone(),
                total,
            })
        })
        .collect()
}

/// Two passes over the project list, each preserving input order:
/// deadline proximity first, then pending funds.
fn collect_alerts(projects: &[projects::Model], today: NaiveDate) -> Vec<Alert> {
    let deadline_cutoff = today + Duration::days(DEADLINE_WINDOW_DAYS);
    let mut alerts = Vec::new();

    for project in projects {
        let underway = ProjectStatus::parse(&project.status).is_some_and(ProjectStatus::is_underway);
        if let Some(due) = project.planned_end_date
            && underway
            && due <= deadline_cutoff
        {
            alerts.push(Alert::DeadlineApproaching {
                message: format!("Project \"{}\" is nearing its deadline", project.title),
                due_date: due,
                project_id: project.id,
            });
        }
    }

    for project in projects {
        if project.funds_pending > Decimal::ZERO {
            alerts.push(Alert::PendingFunds {
                message: format!(
                    "Project \"{}\" has pending funds: {}",
                    project.title, project.funds_pending
                ),
                amount: project.funds_pending,
                project_id: project.id,
            });
        }
    }

    alerts
}

fn month_spend(bills: &[paid_bills::Model], today: NaiveDate) -> Decimal {
    let current_month = today.format("%Y-%m").to_string();
    bills
        .iter()
        .filter(|b| b.reference_month == current_month)
        .map(|b| b.amount)
        .sum()
}

fn recent_material_count(materials: &[office_materials::Model], today: NaiveDate) -> usize {
    let cutoff = today - Duration::days(RECENT_MATERIAL_DAYS);
    materials
        .iter()
        .filter(|m| m.entry_date >= cutoff)
        .count()
}

#[derive(Debug, Serialize)]
pub struct ProjectTotals {
    pub total: usize,
    pub completed: usize,
    pub in_execution: usize,
    pub delayed: usize,
}

#[derive(Debug, Serialize)]
pub struct ProjectDashboard {
    pub totals: ProjectTotals,
    pub projects_by_secretariat: Vec<SecretariatCount>,
    /// Underway projects whose planned end is within the alert window.
    pub nearing_deadline: Vec<projects::Model>,
}

/// Project-centric dashboard slice.
#[must_use]
pub fn project_dashboard(
    secretariats: &[secretariats::Model],
    projects: &[projects::Model],
    today: NaiveDate,
) -> ProjectDashboard {
    let deadline_cutoff = today + Duration::days(DEADLINE_WINDOW_DAYS);
    let nearing_deadline = projects
        .iter()
        .filter(|p| {
            ProjectStatus::parse(&p.status).is_some_and(ProjectStatus::is_underway)
                && p.planned_end_date.is_some_and(|due| due <= deadline_cutoff)
        })
        .cloned()
        .collect();

    ProjectDashboard {
        totals: ProjectTotals {
            total: projects.len(),
            completed: count_with_status(projects, ProjectStatus::Completed),
            in_execution: count_with_status(projects, ProjectStatus::InExecution),
            delayed: count_with_status(projects, ProjectStatus::Delayed),
        },
        projects_by_secretariat: secretariat_breakdown(secretariats, projects),
        nearing_deadline,
    }
}

#[derive(Debug, Serialize)]
pub struct ResourceDashboard {
    /// Spend per bill category for the current calendar year.
    pub year_spend_by_category: BTreeMap<String, Decimal>,
    pub current_month_spend: Decimal,
    pub recent_materials: usize,
    pub resources_by_status: Vec<StatusCount>,
}

/// Dashboard for the resources section: current-year spending by category,
/// this month's spend, recent material intake and resource status counts.
#[must_use]
pub fn resource_dashboard(
    bills: &[paid_bills::Model],
    materials: &[office_materials::Model],
    resources: &[strategic_resources::Model],
    today: NaiveDate,
) -> ResourceDashboard {
    let year_prefix = today.format("%Y-").to_string();
    let mut year_spend_by_category: BTreeMap<String, Decimal> = BTreeMap::new();
    for bill in bills {
        if bill.reference_month.starts_with(&year_prefix) {
            *year_spend_by_category
                .entry(bill.category.clone())
                .or_default() += bill.amount;
        }
    }

    let mut resources_by_status: Vec<StatusCount> = Vec::new();
    for resource in resources {
        match resources_by_status
            .iter_mut()
            .find(|c| c.status == resource.status)
        {
            Some(entry) => entry.total += 1,
            None => resources_by_status.push(StatusCount {
                status: resource.status.clone(),
                total: 1,
            }),
        }
    }

    ResourceDashboard {
        year_spend_by_category,
        current_month_spend: month_spend(bills, today),
        recent_materials: recent_material_count(materials, today),
        resources_by_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    #[allow(clippy::needless_pass_by_value)]
    fn project(
        id: i32,
        secretariat_id: i32,
        status: ProjectStatus,
        progress: i32,
        planned_end: Option<NaiveDate>,
        funds_pending: Decimal,
    ) -> projects::Model {
        projects::Model {
            id,
            title: format!("Project {id}"),
            description: None,
            status: status.as_str().to_string(),
            start_date: None,
            planned_end_date: planned_end,
            actual_end_date: None,
            progress,
            funds_applied: Decimal::ZERO,
            funds_pending,
            notes: None,
            secretariat_id,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn bill(category: &str, month: &str, amount: Decimal) -> paid_bills::Model {
        paid_bills::Model {
            id: 0,
            category: category.to_string(),
            reference_month: month.to_string(),
            amount,
            payment_date: date(2026, 8, 1),
            receipt_file: None,
            notes: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn material(entry: NaiveDate) -> office_materials::Model {
        office_materials::Model {
            id: 0,
            name: "Paper".to_string(),
            description: None,
            quantity: 1,
            unit: None,
            supplier: None,
            entry_date: entry,
            unit_price: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_alert_scans_match_expected_projects() {
        let today = date(2026, 8, 6);
        let projects = vec![
            // P1: underway, due in 3 days, money pending -> both alerts
            project(
                1,
                1,
                ProjectStatus::InExecution,
                80,
                Some(today + Duration::days(3)),
                dec!(15000.00),
            ),
            // P2: already completed -> no alerts at all
            project(2, 1, ProjectStatus::Completed, 100, Some(today), Decimal::ZERO),
        ];
        let secs = vec![secretariat(1, "S1", true)];

        let dashboard = build_dashboard(&secs, &projects, &[], &[], today);

        let deadline: Vec<_> = dashboard
            .alerts
            .iter()
            .filter(|a| matches!(a, Alert::DeadlineApproaching { .. }))
            .collect();
        let pending: Vec<_> = dashboard
            .alerts
            .iter()
            .filter(|a| matches!(a, Alert::PendingFunds { .. }))
            .collect();

        assert_eq!(deadline.len(), 1);
        assert_eq!(pending.len(), 1);
        match deadline[0] {
            Alert::DeadlineApproaching { project_id, .. } => assert_eq!(*project_id, 1),
            Alert::PendingFunds { .. } => unreachable!(),
        }
        match pending[0] {
            Alert::PendingFunds { project_id, amount, .. } => {
                assert_eq!(*project_id, 1);
                assert_eq!(*amount, dec!(15000.00));
            }
            Alert::DeadlineApproaching { .. } => unreachable!(),
        }
    }

    #[test]
    fn test_no_deadline_alert_without_planned_end() {
        let today = date(2026, 8, 6);
        let projects = vec![project(
            1,
            1,
            ProjectStatus::Planning,
            0,
            None,
            Decimal::ZERO,
        )];
        let dashboard = build_dashboard(&[], &projects, &[], &[], today);
        assert!(dashboard.alerts.is_empty());
    }

    #[test]
    fn test_completion_rate_zero_when_no_projects() {
        let dashboard = build_dashboard(&[], &[], &[], &[], date(2026, 8, 6));
        assert_eq!(dashboard.totals.completion_rate, 0.0);
        assert_eq!(dashboard.totals.total_projects, 0);
    }

    #[test]
    fn test_completion_rate_rounds_to_two_decimals() {
        let projects = vec![
            project(1, 1, ProjectStatus::Completed, 100, None, Decimal::ZERO),
            project(2, 1, ProjectStatus::Planning, 0, None, Decimal::ZERO),
            project(3, 1, ProjectStatus::Planning, 0, None, Decimal::ZERO),
        ];
        let dashboard = build_dashboard(&[], &projects, &[], &[], date(2026, 8, 6));
        assert!((dashboard.totals.completion_rate - 33.33).abs() < f64::EPSILON);
    }

    #[test]
    fn test_breakdowns_preserve_order_and_skip_empty() {
        let secs = vec![
            secretariat(1, "Education", true),
            secretariat(2, "Health", true),
            secretariat(3, "Empty", true),
        ];
        let projects = vec![
            project(1, 2, ProjectStatus::Planning, 0, None, Decimal::ZERO),
            project(2, 1, ProjectStatus::Completed, 100, None, Decimal::ZERO),
            project(3, 2, ProjectStatus::Planning, 0, None, Decimal::ZERO),
        ];
        let dashboard = build_dashboard(&secs, &projects, &[], &[], date(2026, 8, 6));

        let by_status: Vec<(&str, usize)> = dashboard
            .projects_by_status
            .iter()
            .map(|c| (c.status.as_str(), c.total))
            .collect();
        assert_eq!(by_status, vec![("planning", 2), ("completed", 1)]);

        let by_sec: Vec<(&str, usize)> = dashboard
            .projects_by_secretariat
            .iter()
            .map(|c| (c.secretariat.as_str(), c.total))
            .collect();
        assert_eq!(by_sec, vec![("Education", 1), ("Health", 2)]);
    }

    #[test]
    fn test_financial_summary_month_and_recent_window() {
        let today = date(2026, 8, 6);
        let bills = vec![
            bill("energia", "2026-08", dec!(2500.00)),
            bill("energia", "2026-07", dec!(9999.00)),
        ];
        let materials = vec![
            material(today - Duration::days(30)), // inclusive lower bound
            material(today - Duration::days(31)), // just outside
            material(today),
        ];
        let dashboard = build_dashboard(&[], &[], &bills, &materials, today);
        assert_eq!(dashboard.financial.current_month_spend, dec!(2500.00));
        assert_eq!(dashboard.financial.recent_materials, 2);
    }

    #[test]
    fn test_project_dashboard_deadline_window() {
        let today = date(2026, 8, 6);
        let secs = vec![secretariat(1, "Works", true)];
        let projects = vec![
            // due inside the window
            project(
                1,
                1,
                ProjectStatus::InExecution,
                50,
                Some(today + Duration::days(7)),
                Decimal::ZERO,
            ),
            // due too far out
            project(
                2,
                1,
                ProjectStatus::InExecution,
                50,
                Some(today + Duration::days(8)),
                Decimal::ZERO,
            ),
            // completed projects never alert
            project(
                3,
                1,
                ProjectStatus::Completed,
                100,
                Some(today),
                Decimal::ZERO,
            ),
        ];

        let dashboard = project_dashboard(&secs, &projects, today);
        assert_eq!(dashboard.totals.total, 3);
        assert_eq!(dashboard.totals.completed, 1);
        assert_eq!(dashboard.nearing_deadline.len(), 1);
        assert_eq!(dashboard.nearing_deadline[0].id, 1);
        assert_eq!(dashboard.projects_by_secretariat[0].total, 3);
    }

    #[test]
    fn test_resource_dashboard_year_scope() {
        let today = date(2026, 8, 6);
        let bills = vec![
            bill("energia", "2026-01", dec!(100.00)),
            bill("energia", "2026-08", dec!(50.00)),
            bill("agua", "2025-12", dec!(75.00)),
        ];
        let resources = vec![
            strategic_resources::Model {
                id: 1,
                name: "Generator".to_string(),
                description: "backup power".to_string(),
                quantity: 1,
                arrival_date: today,
                destination: None,
                supplier: None,
                value: None,
                status: "received".to_string(),
                created_at: String::new(),
                updated_at: String::new(),
            },
        ];

        let dashboard = resource_dashboard(&bills, &[], &resources, today);
        assert_eq!(dashboard.year_spend_by_category["energia"], dec!(150.00));
        assert!(!dashboard.year_spend_by_category.contains_key("agua"));
        assert_eq!(dashboard.current_month_spend, dec!(50.00));
        assert_eq!(dashboard.resources_by_status.len(), 1);
        assert_eq!(dashboard.resources_by_status[0].total, 1);
    }
}
