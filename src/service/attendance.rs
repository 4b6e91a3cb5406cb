use tracing::info;

use super::AttendanceService;
use crate::error::AppError;
use crate::face::encoder::extract_descriptor;
use crate::face::image::decode_data_url;
use crate::face::matcher::find_nearest;
use crate::model::attendance::{RecordChange, Session};

#[derive(Debug, Clone, PartialEq)]
pub enum AttendanceOutcome {
    Marked {
        roll_no: String,
        session: Session,
        change: RecordChange,
    },
    NoMatch,
    NoFace,
}

impl AttendanceService {
    /// Recognises the face in `image` and marks that student Present for the
    /// current session.
    pub async fn mark_attendance(&self, image: &str) -> Result<AttendanceOutcome, AppError> {
        let now = self.clock.now();
        let session = Session::at(now.time());

        let image = decode_data_url(image)?;

        let Some(query) = extract_descriptor(self.encoder.as_ref(), &image).await? else {
            info!("Attendance: no face detected");
            return Ok(AttendanceOutcome::NoFace);
        };

        let candidates = self
            .store
            .enrolled_faces()
            .await?
            .into_iter()
            .map(|face| ((face.student_id, face.roll_no), face.descriptor))
            .collect::<Vec<_>>();

        let Some(nearest) = find_nearest(&query, &candidates, self.match_threshold) else {
            info!(enrolled = candidates.len(), "Attendance: face not recognized");
            return Ok(AttendanceOutcome::NoMatch);
        };

        let (student_id, roll_no) = nearest.id;
        let change = self
            .store
            .mark_present(student_id, now.date(), now.time(), session)
            .await?;

        info!(
            roll_no = %roll_no,
            session = %session,
            distance = nearest.distance,
            ?change,
            "Attendance marked"
        );

        Ok(AttendanceOutcome::Marked {
            roll_no,
            session,
            change,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::image::png_data_url;
    use crate::model::attendance::AttendanceStatus;
    use crate::service::testing::harness;
    use chrono::NaiveTime;

    #[actix_web::test]
    async fn recognised_face_is_marked_present_once_per_session() {
        let h = harness();
        h.store.add_student("101", "Asha");
        h.service.enroll("101", "Asha", &png_data_url(3, 3)).await.unwrap();

        let first = h.service.mark_attendance(&png_data_url(3, 3)).await.unwrap();
        assert_eq!(
            first,
            AttendanceOutcome::Marked {
                roll_no: "101".into(),
                session: Session::Morning,
                change: RecordChange::Inserted,
            }
        );

        h.clock.set("2026-03-02 10:45:00");
        let second = h.service.mark_attendance(&png_data_url(3, 3)).await.unwrap();
        assert!(matches!(
            second,
            AttendanceOutcome::Marked { change: RecordChange::Updated, .. }
        ));

        let records = h.store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, AttendanceStatus::Present);
        assert_eq!(records[0].session, Session::Morning);
        assert_eq!(records[0].time, NaiveTime::from_hms_opt(10, 45, 0).unwrap());
    }

    #[actix_web::test]
    async fn afternoon_gets_its_own_record() {
        let h = harness();
        h.store.add_student("101", "Asha");
        h.service.enroll("101", "Asha", &png_data_url(3, 3)).await.unwrap();

        h.clock.set("2026-03-02 11:59:59");
        h.service.mark_attendance(&png_data_url(3, 3)).await.unwrap();
        h.clock.set("2026-03-02 12:00:00");
        let outcome = h.service.mark_attendance(&png_data_url(3, 3)).await.unwrap();

        assert!(matches!(
            outcome,
            AttendanceOutcome::Marked { session: Session::Afternoon, change: RecordChange::Inserted, .. }
        ));
        assert_eq!(h.store.records().len(), 2);
    }

    #[actix_web::test]
    async fn concurrent_scans_leave_a_single_row() {
        let h = harness();
        h.store.add_student("101", "Asha");
        h.service.enroll("101", "Asha", &png_data_url(3, 3)).await.unwrap();

        let image = png_data_url(3, 3);
        let scans = (0..8).map(|_| h.service.mark_attendance(&image));
        let outcomes = futures_util::future::join_all(scans).await;

        assert!(outcomes.iter().all(|o| matches!(o, Ok(AttendanceOutcome::Marked { .. }))));
        assert_eq!(h.store.records().len(), 1);
    }

    #[actix_web::test]
    async fn picks_the_nearest_enrolled_student() {
        let h = harness();
        h.store.add_student("101", "Asha");
        h.store.add_student("102", "Ravi");
        // descriptors filled with 0.03 and 0.05
        h.service.enroll("101", "Asha", &png_data_url(3, 3)).await.unwrap();
        h.service.enroll("102", "Ravi", &png_data_url(5, 5)).await.unwrap();

        let outcome = h.service.mark_attendance(&png_data_url(5, 2)).await.unwrap();

        assert!(matches!(outcome, AttendanceOutcome::Marked { ref roll_no, .. } if roll_no == "102"));
    }

    #[actix_web::test]
    async fn unknown_face_is_not_recognised() {
        let h = harness();
        h.store.add_student("101", "Asha");
        h.service.enroll("101", "Asha", &png_data_url(3, 3)).await.unwrap();
        let writes_after_enroll = h.store.writes();

        // filled(0.5) vs filled(0.03): distance 0.47 * sqrt(128), far outside
        let outcome = h.service.mark_attendance(&png_data_url(50, 2)).await.unwrap();

        assert_eq!(outcome, AttendanceOutcome::NoMatch);
        assert!(h.store.records().is_empty());
        assert_eq!(h.store.writes(), writes_after_enroll);
    }

    #[actix_web::test]
    async fn no_face_writes_nothing() {
        let h = harness();
        h.store.add_student("101", "Asha");
        h.service.enroll("101", "Asha", &png_data_url(3, 3)).await.unwrap();

        let outcome = h.service.mark_attendance(&png_data_url(1, 1)).await.unwrap();

        assert_eq!(outcome, AttendanceOutcome::NoFace);
        assert!(h.store.records().is_empty());
    }

    #[actix_web::test]
    async fn empty_roster_never_matches() {
        let h = harness();
        let outcome = h.service.mark_attendance(&png_data_url(3, 3)).await.unwrap();
        assert_eq!(outcome, AttendanceOutcome::NoMatch);
    }
}
