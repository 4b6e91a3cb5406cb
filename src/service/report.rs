use chrono::NaiveDate;

use super::AttendanceService;
use crate::error::AppError;
use crate::model::attendance::ReportEntry;

impl AttendanceService {
    /// Attendance for `date`, or for today when no date is given.
    pub async fn report(&self, date: Option<NaiveDate>) -> Result<Vec<ReportEntry>, AppError> {
        let date = date.unwrap_or_else(|| self.clock.now().date());
        Ok(self.store.report(date).await?)
    }
}
