use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use std::sync::Mutex;

use super::AttendanceStore;
use crate::face::descriptor::Descriptor;
use crate::model::attendance::{
    AttendanceStatus, RecordChange, ReportEntry, Session, format_time,
};
use crate::model::student::EnrolledFace;

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub student_id: u64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AttendanceStatus,
    pub session: Session,
}

struct StudentRow {
    id: u64,
    roll_no: String,
    name: String,
    descriptor: Option<Descriptor>,
}

#[derive(Default)]
struct Tables {
    students: Vec<StudentRow>,
    attendance: Vec<AttendanceRecord>,
}

/// Store used by tests. A single lock around both tables makes every
/// operation atomic, like the unique key does for MySQL.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    writes: Mutex<usize>,
}

impl MemoryStore {
    pub fn add_student(&self, roll_no: &str, name: &str) -> u64 {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.students.len() as u64 + 1;
        tables.students.push(StudentRow {
            id,
            roll_no: roll_no.to_string(),
            name: name.to_string(),
            descriptor: None,
        });
        id
    }

    pub fn records(&self) -> Vec<AttendanceRecord> {
        self.tables.lock().unwrap().attendance.clone()
    }

    pub fn student_name(&self, roll_no: &str) -> Option<String> {
        let tables = self.tables.lock().unwrap();
        tables
            .students
            .iter()
            .find(|s| s.roll_no == roll_no)
            .map(|s| s.name.clone())
    }

    pub fn enrolled_faces_len(&self) -> usize {
        let tables = self.tables.lock().unwrap();
        tables.students.iter().filter(|s| s.descriptor.is_some()).count()
    }

    /// Number of successful mutating statements.
    pub fn writes(&self) -> usize {
        *self.writes.lock().unwrap()
    }

    fn count_write(&self) {
        *self.writes.lock().unwrap() += 1;
    }
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn update_face(
        &self,
        roll_no: &str,
        name: &str,
        descriptor: &Descriptor,
    ) -> Result<bool, sqlx::Error> {
        let updated = {
            let mut tables = self.tables.lock().unwrap();
            match tables.students.iter_mut().find(|s| s.roll_no == roll_no) {
                Some(student) => {
                    student.name = name.to_string();
                    student.descriptor = Some(descriptor.clone());
                    true
                }
                None => false,
            }
        };
        if updated {
            self.count_write();
        }
        Ok(updated)
    }

    async fn enrolled_faces(&self) -> Result<Vec<EnrolledFace>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .students
            .iter()
            .filter_map(|s| {
                s.descriptor.clone().map(|descriptor| EnrolledFace {
                    student_id: s.id,
                    roll_no: s.roll_no.clone(),
                    descriptor,
                })
            })
            .collect())
    }

    async fn mark_present(
        &self,
        student_id: u64,
        date: NaiveDate,
        time: NaiveTime,
        session: Session,
    ) -> Result<RecordChange, sqlx::Error> {
        let change = {
            let mut tables = self.tables.lock().unwrap();
            let existing = tables
                .attendance
                .iter_mut()
                .find(|r| r.student_id == student_id && r.date == date && r.session == session);

            match existing {
                Some(record) => {
                    record.time = time;
                    record.status = AttendanceStatus::Present;
                    RecordChange::Updated
                }
                None => {
                    tables.attendance.push(AttendanceRecord {
                        student_id,
                        date,
                        time,
                        status: AttendanceStatus::Present,
                        session,
                    });
                    RecordChange::Inserted
                }
            }
        };
        self.count_write();
        Ok(change)
    }

    async fn report(&self, date: NaiveDate) -> Result<Vec<ReportEntry>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        let mut entries = tables
            .attendance
            .iter()
            .filter(|r| r.date == date)
            .filter_map(|r| {
                let student = tables.students.iter().find(|s| s.id == r.student_id)?;
                Some(ReportEntry {
                    roll_no: student.roll_no.clone(),
                    name: student.name.clone(),
                    session: r.session,
                    status: r.status,
                    time: format_time(r.time),
                })
            })
            .collect::<Vec<_>>();

        // Mirrors MySQL's default case-insensitive collation and ENUM order.
        entries.sort_by(|a, b| {
            a.roll_no
                .to_lowercase()
                .cmp(&b.roll_no.to_lowercase())
                .then(a.session.cmp(&b.session))
        });
        Ok(entries)
    }
}
