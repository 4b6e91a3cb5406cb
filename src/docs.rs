use crate::api::attendance::{AttendanceResponse, MarkAttendance};
use crate::api::register::{RegisterFace, RegisterResponse};
use crate::model::attendance::{AttendanceStatus, ReportEntry, Session};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FaceTrack API",
        version = "1.0.0",
        description = r#"
## FaceTrack attendance backend

Marks class attendance from a captured face image.

### 🔹 Key Features
- **Enrollment**
  - Store the face descriptor of an existing student by roll number
- **Attendance**
  - Recognise a captured face and mark the student Present for the current session (MORNING before noon, AFTERNOON after)
- **Reports**
  - List every attendance record of a day

### 📦 Response Format
- JSON bodies. Recognition outcomes (`no_face`, `no_match`, `unknown_roll`) are returned with HTTP 200 and a `code` field.
- Images are sent as base64 data URLs.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::register::register_face,
        crate::api::attendance::mark_attendance,
        crate::api::report::daily_report
    ),
    components(
        schemas(
            RegisterFace,
            RegisterResponse,
            MarkAttendance,
            AttendanceResponse,
            ReportEntry,
            Session,
            AttendanceStatus
        )
    ),
    tags(
        (name = "Enrollment", description = "Face enrollment APIs"),
        (name = "Attendance", description = "Attendance marking and reporting APIs"),
    )
)]
pub struct ApiDoc;
