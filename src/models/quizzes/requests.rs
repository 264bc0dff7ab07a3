use serde::Deserialize;
use std::collections::HashMap;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct CreateQuestionRequest {
    pub text: String,
    /// 选项文本，按顺序排列
    pub choices: Vec<String>,
    /// 正确选项在 choices 中的下标
    pub correct_choice: usize,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct CreateQuizRequest {
    pub title: String,
    pub questions: Vec<CreateQuestionRequest>,
}

impl CreateQuizRequest {
    /// 校验测验结构，返回第一处错误
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Quiz title is required".to_string());
        }
        if self.questions.is_empty() {
            return Err("A quiz needs at least one question".to_string());
        }
        for (i, question) in self.questions.iter().enumerate() {
            let n = i + 1;
            if question.text.trim().is_empty() {
                return Err(format!("Question {n} has no text"));
            }
            if question.choices.len() < 2 {
                return Err(format!("Question {n} needs at least two choices"));
            }
            if question.choices.iter().any(|c| c.trim().is_empty()) {
                return Err(format!("Question {n} has an empty choice"));
            }
            if question.correct_choice >= question.choices.len() {
                return Err(format!("Question {n} has no valid correct choice"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct UpdateChoiceRequest {
    pub id: i64,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct UpdateQuestionRequest {
    pub id: i64,
    pub text: Option<String>,
    #[serde(default)]
    pub choices: Vec<UpdateChoiceRequest>,
    /// 新的正确选项，必须属于本题
    pub correct_choice_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct UpdateQuizRequest {
    pub title: Option<String>,
    #[serde(default)]
    pub questions: Vec<UpdateQuestionRequest>,
}

// 提交答案：题目ID -> 所选选项ID
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct SubmitAnswersRequest {
    #[serde(default)]
    pub answers: HashMap<i64, i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(choices: &[&str], correct: usize) -> CreateQuestionRequest {
        CreateQuestionRequest {
            text: "2 + 2 = ?".into(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            correct_choice: correct,
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_quiz() {
        let req = CreateQuizRequest {
            title: "Arithmetic".into(),
            questions: vec![question(&["3", "4"], 1)],
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_structure() {
        let empty = CreateQuizRequest {
            title: "Empty".into(),
            questions: vec![],
        };
        assert!(empty.validate().is_err());

        let one_choice = CreateQuizRequest {
            title: "One".into(),
            questions: vec![question(&["4"], 0)],
        };
        assert!(one_choice.validate().is_err());

        let out_of_range = CreateQuizRequest {
            title: "Range".into(),
            questions: vec![question(&["3", "4"], 2)],
        };
        assert!(out_of_range.validate().is_err());

        let no_title = CreateQuizRequest {
            title: "  ".into(),
            questions: vec![question(&["3", "4"], 0)],
        };
        assert!(no_title.validate().is_err());
    }

    #[test]
    fn test_submit_answers_accepts_string_keys() {
        let req: SubmitAnswersRequest =
            serde_json::from_str(r#"{"answers":{"10":100,"11":205}}"#).unwrap();
        assert_eq!(req.answers.get(&10), Some(&100));
        assert_eq!(req.answers.len(), 2);

        let empty: SubmitAnswersRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.answers.is_empty());
    }
}
