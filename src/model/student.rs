use crate::face::descriptor::Descriptor;

#[derive(Debug, sqlx::FromRow)]
pub struct Student {
    pub student_id: u64,
    pub roll_no: String,
    pub student_name: String,
    pub face_encoding: Option<Vec<u8>>,
}

/// A student that has gone through enrollment, with its descriptor decoded.
#[derive(Debug, Clone)]
pub struct EnrolledFace {
    pub student_id: u64,
    pub roll_no: String,
    pub descriptor: Descriptor,
}
