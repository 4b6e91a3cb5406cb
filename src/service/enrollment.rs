use tracing::{info, warn};

use super::AttendanceService;
use crate::error::AppError;
use crate::face::encoder::extract_descriptor;
use crate::face::image::decode_data_url;

#[derive(Debug, Clone, PartialEq)]
pub enum EnrollOutcome {
    Enrolled,
    UnknownRoll,
    NoFace,
}

impl AttendanceService {
    /// Stores the descriptor of the face in `image` against an existing roll
    /// number, overwriting the student's display name.
    pub async fn enroll(
        &self,
        roll_no: &str,
        name: &str,
        image: &str,
    ) -> Result<EnrollOutcome, AppError> {
        let image = decode_data_url(image)?;

        let Some(descriptor) = extract_descriptor(self.encoder.as_ref(), &image).await? else {
            info!(roll_no, "Enrollment rejected: no face detected");
            return Ok(EnrollOutcome::NoFace);
        };

        if !self.store.update_face(roll_no, name, &descriptor).await? {
            warn!(roll_no, "Enrollment for unknown roll number");
            return Ok(EnrollOutcome::UnknownRoll);
        }

        info!(roll_no, "Face enrolled");
        Ok(EnrollOutcome::Enrolled)
    }
}
