use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::service::{AttendanceService, EnrollOutcome};

#[derive(Deserialize, ToSchema)]
pub struct RegisterFace {
    #[schema(example = "101")]
    pub roll_no: String,
    #[schema(example = "Asha")]
    pub name: String,
    /// Captured frame as a data URL
    #[schema(example = "data:image/jpeg;base64,/9j/4AAQSkZJRg...")]
    pub image: String,
}

#[derive(Serialize, ToSchema)]
pub struct RegisterResponse {
    #[schema(example = "success")]
    pub status: String,
    #[schema(example = "Face registered successfully")]
    pub message: String,
    #[schema(example = "enrolled")]
    pub code: String,
}

impl From<EnrollOutcome> for RegisterResponse {
    fn from(outcome: EnrollOutcome) -> Self {
        let (status, message, code) = match outcome {
            EnrollOutcome::Enrolled => ("success", "Face registered successfully", "enrolled"),
            EnrollOutcome::NoFace => ("fail", "No face detected", "no_face"),
            EnrollOutcome::UnknownRoll => ("fail", "Unknown roll number", "unknown_roll"),
        };
        Self {
            status: status.to_string(),
            message: message.to_string(),
            code: code.to_string(),
        }
    }
}

/// Enroll a student's face
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterFace,
    responses(
        (status = 200, description = "Enrollment outcome", body = RegisterResponse, example = json!({
            "status": "fail",
            "message": "No face detected",
            "code": "no_face"
        })),
        (status = 400, description = "Image could not be decoded", body = Object, example = json!({
            "message": "image is not valid base64: Invalid byte 64, offset 0.",
            "code": "invalid_image"
        })),
        (status = 502, description = "Face service unavailable"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Enrollment"
)]
pub async fn register_face(
    service: web::Data<AttendanceService>,
    payload: web::Json<RegisterFace>,
) -> Result<impl Responder, AppError> {
    let roll_no = payload.roll_no.trim();

    let outcome = service
        .enroll(roll_no, payload.name.trim(), &payload.image)
        .await?;

    Ok(HttpResponse::Ok().json(RegisterResponse::from(outcome)))
}
