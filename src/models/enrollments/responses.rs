use super::entities::Enrollment;
use serde::Serialize;
use ts_rs::TS;

// 选课结果；重复选课时 created 为 false
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollResponse {
    pub enrollment: Enrollment,
    pub created: bool,
}
