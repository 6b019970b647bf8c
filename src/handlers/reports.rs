// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;

use crate::{common::error::AppError, config::AppState, db::report_repo::DateWindow};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub period: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

// Traduz período nomeado (today/week/month/year) ou intervalo explícito
// na janela de datas dos relatórios.
fn resolve_window(query: &ReportQuery) -> DateWindow {
    if query.start_date.is_some() || query.end_date.is_some() {
        return DateWindow {
            start: query.start_date,
            end: query.end_date,
        };
    }

    let today = Utc::now().date_naive();
    let start = match query.period.as_deref().unwrap_or("month") {
        "today" => Some(today),
        "week" => Some(today - Duration::days(7)),
        "month" => Some(today - Duration::days(30)),
        "year" => Some(today - Duration::days(365)),
        _ => None,
    };
    DateWindow { start, end: None }
}

// GET /api/reports?type=&period=&startDate=&endDate=
pub async fn get_report(
    State(app_state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let window = resolve_window(&query);
    let pool = &app_state.db_pool;

    let body = match query.kind.as_deref().unwrap_or("financial") {
        "financial" => serde_json::to_value(app_state.report_repo.financial(pool, window).await?),
        "services" => serde_json::to_value(app_state.report_repo.services(pool, window).await?),
        "professionals" => {
            serde_json::to_value(app_state.report_repo.professionals(pool, window).await?)
        }
        "clients" => serde_json::to_value(app_state.report_repo.clients(pool).await?),
        "products" => serde_json::to_value(app_state.report_repo.products(pool, window).await?),
        "appointments" => {
            serde_json::to_value(app_state.report_repo.appointments(pool, window).await?)
        }
        _ => return Err(AppError::InvalidReportType),
    }
    .map_err(|e| AppError::InternalServerError(e.into()))?;

    Ok(Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_range_wins_over_period() {
        let query = ReportQuery {
            kind: None,
            period: Some("year".to_string()),
            start_date: Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
            end_date: Some(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()),
        };
        let window = resolve_window(&query);
        assert_eq!(window.start, query.start_date);
        assert_eq!(window.end, query.end_date);
    }

    #[test]
    fn default_period_is_last_30_days() {
        let query = ReportQuery {
            kind: None,
            period: None,
            start_date: None,
            end_date: None,
        };
        let window = resolve_window(&query);
        let expected = Utc::now().date_naive() - Duration::days(30);
        assert_eq!(window.start, Some(expected));
        assert_eq!(window.end, None);
    }
}
