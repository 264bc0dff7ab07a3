use super::entities::{Attempt, AttemptSummary};
use crate::models::quizzes::Quiz;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct SubmitAttemptResponse {
    pub attempt: Attempt,
    pub percentage: f64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct AttemptListResponse {
    pub items: Vec<AttemptSummary>,
}

/// 单题结果
///
/// `is_correct` 取自提交时记录的判分，`correct_choice_*` 取自测验当前的正确选项。
/// 讲师在作答之后修改正确选项时，两者可能不一致，已记录的得分不会重算。
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct QuestionResult {
    pub question_id: i64,
    pub text: String,
    pub selected_choice_id: Option<i64>,
    pub selected_choice_text: Option<String>,
    pub correct_choice_id: Option<i64>,
    pub correct_choice_text: Option<String>,
    pub is_correct: bool,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attempt.ts")]
pub struct AttemptResultResponse {
    pub attempt: Attempt,
    pub quiz: Quiz,
    pub percentage: f64,
    pub questions: Vec<QuestionResult>,
}
