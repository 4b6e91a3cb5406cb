//! Persistence for the student roster and the attendance ledger.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use crate::face::descriptor::Descriptor;
use crate::model::attendance::{RecordChange, ReportEntry, Session};
use crate::model::student::EnrolledFace;

#[cfg(test)]
pub mod memory;
pub mod mysql;

pub use mysql::MySqlStore;

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Overwrites name and descriptor of the student with `roll_no`.
    /// Returns `false` when no such student exists; nothing is created.
    async fn update_face(
        &self,
        roll_no: &str,
        name: &str,
        descriptor: &Descriptor,
    ) -> Result<bool, sqlx::Error>;

    /// Every student with a stored descriptor, in a stable order.
    /// Rows whose descriptor cannot be decoded are skipped.
    async fn enrolled_faces(&self) -> Result<Vec<EnrolledFace>, sqlx::Error>;

    /// Atomically inserts or refreshes the Present record for
    /// `(student_id, date, session)`.
    async fn mark_present(
        &self,
        student_id: u64,
        date: NaiveDate,
        time: NaiveTime,
        session: Session,
    ) -> Result<RecordChange, sqlx::Error>;

    /// Records on `date` joined to the student, ordered by roll number then session.
    async fn report(&self, date: NaiveDate) -> Result<Vec<ReportEntry>, sqlx::Error>;
}
