use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 测验作答记录，创建后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct Attempt {
    pub id: i64,
    pub quiz_id: i64,
    pub student_id: i64,
    pub score: i32,
    pub total_questions: i32,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

impl Attempt {
    /// 得分百分比，无题目时为 0
    pub fn percentage(&self) -> f64 {
        if self.total_questions <= 0 {
            return 0.0;
        }
        f64::from(self.score) / f64::from(self.total_questions) * 100.0
    }
}

// 作答明细，is_correct 在提交时确定
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct AttemptAnswer {
    pub id: i64,
    pub attempt_id: i64,
    pub question_id: i64,
    pub choice_id: i64,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttemptAnswer {
    pub question_id: i64,
    pub choice_id: i64,
    pub is_correct: bool,
}

// 待写入的作答记录（已评分）
#[derive(Debug, Clone)]
pub struct NewAttempt {
    pub quiz_id: i64,
    pub student_id: i64,
    pub score: i32,
    pub total_questions: i32,
    pub answers: Vec<NewAttemptAnswer>,
}

// 作答概览，附带测验标题
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct AttemptSummary {
    pub attempt: Attempt,
    pub quiz_title: String,
    pub course_id: i64,
    pub percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(score: i32, total: i32) -> Attempt {
        Attempt {
            id: 1,
            quiz_id: 1,
            student_id: 1,
            score,
            total_questions: total,
            submitted_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_percentage() {
        assert_eq!(attempt(0, 0).percentage(), 0.0);
        assert_eq!(attempt(3, 4).percentage(), 75.0);
        assert_eq!(attempt(2, 2).percentage(), 100.0);
    }
}
