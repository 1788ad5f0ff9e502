//! Response models for the dashboard endpoints.
//!
//! Field names map the backend's JSON keys (uppercase column names on the
//! schedule endpoints, camelCase on the report endpoints). Date values are
//! carried verbatim as strings; the backend mixes `YYYY-MM-DD` and
//! `YYYYMMDD` and formatting belongs to the caller.

use serde::{Deserialize, Serialize};

/// One project row from the progress and map-data endpoints.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ProjectProgress {
    #[serde(rename = "PROJM_NO")]
    pub project_no: String,
    #[serde(rename = "PROJM_SNAME")]
    pub project_name: String,
    /// Planned start date.
    #[serde(rename = "PST")]
    pub planned_start: Option<String>,
    /// Planned finish date.
    #[serde(rename = "PFI")]
    pub planned_finish: Option<String>,
    #[serde(rename = "WORK_DAY")]
    pub work_days: Option<i64>,
    #[serde(rename = "ACTUAL_WORK_DAY")]
    pub actual_work_days: Option<i64>,
    /// Company number; only the progress endpoint returns it.
    #[serde(rename = "COP_NO")]
    pub company_no: Option<String>,
    /// `active` / `completed` / `planned`; only some backend versions set it.
    #[serde(rename = "STATUS")]
    pub status: Option<String>,
}

/// KPI block of the performance endpoint.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub on_time_projects: f64,
    pub budget_compliance: f64,
    pub quality_score: f64,
    pub active_projects: u32,
}

/// One month of aggregated delivery metrics.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct MonthlyMetric {
    pub month: String,
    pub completed: u32,
    pub delayed: u32,
    pub budget: f64,
}

/// Payload of the performance endpoint.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PerformanceReport {
    pub kpi: Kpi,
    pub monthly: Vec<MonthlyMetric>,
}

/// One project in the weekly report, with per-item schedule detail.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyProject {
    pub id: String,
    pub name: String,
    /// Overall completion percentage.
    pub progress: f64,
    pub start_date: String,
    pub end_date: String,
    pub actual_days: u32,
    pub total_days: u32,
    #[serde(default)]
    pub work_items: Vec<WorkItem>,
    #[serde(default)]
    pub operation_items: Vec<OperationItem>,
}

/// Scheduled work item; actual dates are `None` until the item starts or
/// finishes.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub name: String,
    pub planned_start: Option<String>,
    pub planned_end: Option<String>,
    pub actual_start: Option<String>,
    pub actual_end: Option<String>,
    pub progress: f64,
}

/// Quantity-tracked operation item.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationItem {
    pub name: String,
    pub unit: String,
    pub planned_quantity: f64,
    pub completed_quantity: f64,
    pub completion_rate: f64,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{PerformanceReport, ProjectProgress, WeeklyProject};

    #[test]
    fn progress_row_maps_uppercase_columns() {
        let row: ProjectProgress = serde_json::from_value(json!({
            "PROJM_NO": "P2023001",
            "PROJM_SNAME": "台北商辦大樓",
            "PST": "2023-03-15",
            "PFI": "2024-05-20",
            "WORK_DAY": 180,
            "ACTUAL_WORK_DAY": 60,
            "COP_NO": "C01"
        }))
        .expect("must decode");

        assert_eq!(row.project_no, "P2023001");
        assert_eq!(row.work_days, Some(180));
        assert_eq!(row.company_no.as_deref(), Some("C01"));
        assert!(row.status.is_none());
    }

    #[test]
    fn map_data_row_decodes_without_company_no() {
        let row: ProjectProgress = serde_json::from_value(json!({
            "PROJM_NO": "P2023002",
            "PROJM_SNAME": "新竹科技園區",
            "PST": null,
            "PFI": null,
            "WORK_DAY": null,
            "ACTUAL_WORK_DAY": null
        }))
        .expect("must decode");

        assert!(row.company_no.is_none());
        assert!(row.planned_start.is_none());
    }

    #[test]
    fn performance_report_decodes_kpi_and_monthly() {
        let report: PerformanceReport = serde_json::from_value(json!({
            "kpi": {
                "onTimeProjects": 85,
                "budgetCompliance": 92,
                "qualityScore": 4.7,
                "activeProjects": 12
            },
            "monthly": [
                { "month": "一月", "completed": 2, "delayed": 1, "budget": 85 }
            ]
        }))
        .expect("must decode");

        assert_eq!(report.kpi.active_projects, 12);
        assert_eq!(report.kpi.quality_score, 4.7);
        assert_eq!(report.monthly.len(), 1);
        assert_eq!(report.monthly[0].completed, 2);
    }

    #[test]
    fn weekly_project_decodes_nested_items_with_null_dates() {
        let project: WeeklyProject = serde_json::from_value(json!({
            "id": "P001",
            "name": "台北商辦大樓",
            "progress": 65,
            "startDate": "20230315",
            "endDate": "20240520",
            "actualDays": 180,
            "totalDays": 280,
            "workItems": [
                {
                    "name": "機電工程",
                    "plannedStart": "20230815",
                    "plannedEnd": "20240215",
                    "actualStart": "20230825",
                    "actualEnd": null,
                    "progress": 70
                }
            ],
            "operationItems": [
                {
                    "name": "鋼筋綁紮",
                    "unit": "噸",
                    "plannedQuantity": 450,
                    "completedQuantity": 450,
                    "completionRate": 100,
                    "notes": "已完成"
                }
            ]
        }))
        .expect("must decode");

        assert_eq!(project.progress, 65.0);
        assert_eq!(project.work_items.len(), 1);
        assert!(project.work_items[0].actual_end.is_none());
        assert_eq!(project.operation_items[0].completion_rate, 100.0);
    }
}
