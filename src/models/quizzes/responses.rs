use super::entities::{Choice, Question, Quiz, QuizDetail};
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizListResponse {
    pub items: Vec<Quiz>,
}

// 选项视图；学生看不到 is_correct
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct ChoiceView {
    pub id: i64,
    pub text: String,
    pub position: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub is_correct: Option<bool>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuestionView {
    pub id: i64,
    pub text: String,
    pub position: i32,
    pub choices: Vec<ChoiceView>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizDetailResponse {
    pub quiz: Quiz,
    pub questions: Vec<QuestionView>,
    pub is_owner: bool,
}

impl QuizDetailResponse {
    /// reveal_answers 为 false 时去掉正确答案
    pub fn from_detail(detail: QuizDetail, reveal_answers: bool) -> Self {
        let questions = detail
            .questions
            .into_iter()
            .map(|q| QuestionView::from_question(q, reveal_answers))
            .collect();
        Self {
            quiz: detail.quiz,
            questions,
            is_owner: reveal_answers,
        }
    }
}

impl QuestionView {
    fn from_question(question: Question, reveal_answers: bool) -> Self {
        Self {
            id: question.id,
            text: question.text,
            position: question.position,
            choices: question
                .choices
                .into_iter()
                .map(|c| ChoiceView::from_choice(c, reveal_answers))
                .collect(),
        }
    }
}

impl ChoiceView {
    fn from_choice(choice: Choice, reveal_answers: bool) -> Self {
        Self {
            id: choice.id,
            text: choice.text,
            position: choice.position,
            is_correct: reveal_answers.then_some(choice.is_correct),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> QuizDetail {
        let now = chrono::Utc::now();
        QuizDetail {
            quiz: Quiz {
                id: 1,
                course_id: 1,
                title: "Quiz".into(),
                created_at: now,
                updated_at: now,
            },
            questions: vec![Question {
                id: 10,
                quiz_id: 1,
                text: "Pick B".into(),
                position: 0,
                choices: vec![
                    Choice {
                        id: 100,
                        question_id: 10,
                        text: "A".into(),
                        is_correct: false,
                        position: 0,
                    },
                    Choice {
                        id: 101,
                        question_id: 10,
                        text: "B".into(),
                        is_correct: true,
                        position: 1,
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_student_view_hides_answers() {
        let view = QuizDetailResponse::from_detail(detail(), false);
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("is_correct"));
        assert!(!view.is_owner);
    }

    #[test]
    fn test_owner_view_reveals_answers() {
        let view = QuizDetailResponse::from_detail(detail(), true);
        assert_eq!(view.questions[0].choices[1].is_correct, Some(true));
        assert_eq!(view.questions[0].choices[0].is_correct, Some(false));
    }
}
