use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::model::attendance::Session;
use crate::service::{AttendanceOutcome, AttendanceService};

#[derive(Deserialize, ToSchema)]
pub struct MarkAttendance {
    /// Captured frame as a data URL
    #[schema(example = "data:image/jpeg;base64,/9j/4AAQSkZJRg...")]
    pub image: String,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceResponse {
    #[schema(example = "Attendance marked for 101 (MORNING)")]
    pub message: String,
    #[schema(example = "marked")]
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "101")]
    pub roll_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
}

impl From<AttendanceOutcome> for AttendanceResponse {
    fn from(outcome: AttendanceOutcome) -> Self {
        match outcome {
            AttendanceOutcome::Marked {
                roll_no, session, ..
            } => Self {
                message: format!("Attendance marked for {roll_no} ({session})"),
                code: "marked".to_string(),
                roll_no: Some(roll_no),
                session: Some(session),
            },
            AttendanceOutcome::NoFace => Self {
                message: "No face detected".to_string(),
                code: "no_face".to_string(),
                roll_no: None,
                session: None,
            },
            AttendanceOutcome::NoMatch => Self {
                message: "Face not recognized".to_string(),
                code: "no_match".to_string(),
                roll_no: None,
                session: None,
            },
        }
    }
}

/// Mark attendance from a captured face
#[utoipa::path(
    post,
    path = "/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 200, description = "Recognition outcome", body = AttendanceResponse, example = json!({
            "message": "Attendance marked for 101 (MORNING)",
            "code": "marked",
            "roll_no": "101",
            "session": "MORNING"
        })),
        (status = 400, description = "Image could not be decoded"),
        (status = 502, description = "Face service unavailable"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    service: web::Data<AttendanceService>,
    payload: web::Json<MarkAttendance>,
) -> Result<impl Responder, AppError> {
    let outcome = service.mark_attendance(&payload.image).await?;

    Ok(HttpResponse::Ok().json(AttendanceResponse::from(outcome)))
}
