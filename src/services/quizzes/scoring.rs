//! 测验评分
//!
//! 只做精确匹配：所选选项属于该题且是该题的正确选项才得分。

use std::collections::HashMap;

use crate::models::attempts::NewAttemptAnswer;
use crate::models::quizzes::QuizDetail;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredSubmission {
    pub score: i32,
    pub total_questions: i32,
    /// 需要记录的作答明细，不含未作答题目与无效选项
    pub answers: Vec<NewAttemptAnswer>,
}

/// `answers` 为 题目ID -> 选项ID。不属于本测验的题目被忽略，
/// 未作答与选了其他题目选项的都算错。
pub fn score_answers(detail: &QuizDetail, answers: &HashMap<i64, i64>) -> ScoredSubmission {
    let mut score = 0;
    let mut recorded = Vec::new();

    for question in &detail.questions {
        let Some(&choice_id) = answers.get(&question.id) else {
            continue;
        };
        let Some(choice) = question.choice(choice_id) else {
            continue;
        };

        if choice.is_correct {
            score += 1;
        }
        recorded.push(NewAttemptAnswer {
            question_id: question.id,
            choice_id: choice.id,
            is_correct: choice.is_correct,
        });
    }

    ScoredSubmission {
        score,
        total_questions: detail.questions.len() as i32,
        answers: recorded,
    }
}
