use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::AppError;
use crate::service::AttendanceService;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// Day to report on, defaults to today
    #[param(example = "2026-03-02", value_type = Option<String>, format = Date)]
    pub date: Option<NaiveDate>,
}

/// Attendance report for one day
#[utoipa::path(
    get,
    path = "/report",
    params(ReportQuery),
    responses(
        (status = 200, description = "Records for the day, by roll number then session", body = [crate::model::attendance::ReportEntry]),
        (status = 400, description = "Malformed date"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn daily_report(
    service: web::Data<AttendanceService>,
    query: web::Query<ReportQuery>,
) -> Result<impl Responder, AppError> {
    let entries = service.report(query.date).await?;
    Ok(HttpResponse::Ok().json(entries))
}
