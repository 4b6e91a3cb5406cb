use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{FromRow, MySqlPool};
use std::str::FromStr;
use tracing::{debug, warn};

use super::AttendanceStore;
use crate::face::descriptor::Descriptor;
use crate::model::attendance::{
    AttendanceStatus, RecordChange, ReportEntry, Session, format_time,
};
use crate::model::student::{EnrolledFace, Student};

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ReportRow {
    roll_no: String,
    name: String,
    session: String,
    status: String,
    time: NaiveTime,
}

impl ReportRow {
    fn into_entry(self) -> Result<ReportEntry, sqlx::Error> {
        let session = Session::from_str(&self.session)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        let status = AttendanceStatus::from_str(&self.status)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(ReportEntry {
            roll_no: self.roll_no,
            name: self.name,
            session,
            status,
            time: format_time(self.time),
        })
    }
}

#[async_trait]
impl AttendanceStore for MySqlStore {
    async fn update_face(
        &self,
        roll_no: &str,
        name: &str,
        descriptor: &Descriptor,
    ) -> Result<bool, sqlx::Error> {
        let student_id = sqlx::query_scalar::<_, u64>(
            "SELECT student_id FROM students WHERE roll_no = ?",
        )
        .bind(roll_no)
        .fetch_optional(&self.pool)
        .await?;

        let Some(student_id) = student_id else {
            return Ok(false);
        };

        sqlx::query(
            r#"
            UPDATE students
            SET student_name = ?, face_encoding = ?
            WHERE student_id = ?
            "#,
        )
        .bind(name)
        .bind(descriptor.to_bytes())
        .bind(student_id)
        .execute(&self.pool)
        .await?;

        Ok(true)
    }

    async fn enrolled_faces(&self) -> Result<Vec<EnrolledFace>, sqlx::Error> {
        let students = sqlx::query_as::<_, Student>(
            r#"
            SELECT student_id, roll_no, student_name, face_encoding
            FROM students
            WHERE face_encoding IS NOT NULL
            ORDER BY student_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let faces = students
            .into_iter()
            .filter_map(|s| {
                let raw = s.face_encoding?;
                match Descriptor::from_stored(&raw) {
                    Ok(descriptor) => Some(EnrolledFace {
                        student_id: s.student_id,
                        roll_no: s.roll_no,
                        descriptor,
                    }),
                    Err(e) => {
                        warn!(
                            roll_no = %s.roll_no,
                            name = %s.student_name,
                            error = %e,
                            "Skipping unreadable face encoding"
                        );
                        None
                    }
                }
            })
            .collect::<Vec<_>>();

        debug!(count = faces.len(), "Loaded enrolled faces");
        Ok(faces)
    }

    async fn mark_present(
        &self,
        student_id: u64,
        date: NaiveDate,
        time: NaiveTime,
        session: Session,
    ) -> Result<RecordChange, sqlx::Error> {
        // uq_attendance_student_day_session turns a racing second insert into
        // a no-op; the loser then refreshes the winner's row.
        let inserted = sqlx::query(
            r#"
            INSERT IGNORE INTO attendance (student_id, date, time, status, session)
            VALUES (?, ?, ?, 'Present', ?)
            "#,
        )
        .bind(student_id)
        .bind(date)
        .bind(time)
        .bind(session.as_ref())
        .execute(&self.pool)
        .await?;

        if inserted.rows_affected() == 1 {
            return Ok(RecordChange::Inserted);
        }

        // Found rows, not changed rows: a same-second refresh still counts 1.
        let updated = sqlx::query(
            r#"
            UPDATE attendance
            SET status = 'Present', time = ?
            WHERE student_id = ? AND date = ? AND session = ?
            "#,
        )
        .bind(time)
        .bind(student_id)
        .bind(date)
        .bind(session.as_ref())
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            // INSERT IGNORE also swallows a missing student.
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(RecordChange::Updated)
    }

    /// Ordered by roll number under the column collation, then by session in
    /// ENUM declaration order (MORNING before AFTERNOON).
    async fn report(&self, date: NaiveDate) -> Result<Vec<ReportEntry>, sqlx::Error> {
        let rows = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT
                s.roll_no,
                s.student_name AS name,
                CAST(a.session AS CHAR) AS session,
                CAST(a.status AS CHAR) AS status,
                a.time
            FROM attendance a
            JOIN students s ON a.student_id = s.student_id
            WHERE a.date = ?
            ORDER BY s.roll_no, a.session
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ReportRow::into_entry).collect()
    }
}
