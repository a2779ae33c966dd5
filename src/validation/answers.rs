//! Multiple-choice answer checking

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::page::Page;
use crate::scoring::{ScoreResult, calculate_score};

/// A quiz question as far as checking is concerned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub correct_answer: String,
}

impl Question {
    pub fn new(correct_answer: impl Into<String>) -> Self {
        Self { correct_answer: correct_answer.into() }
    }
}

/// Result of checking one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerCheck {
    /// 1-based question number
    pub question_number: usize,
    pub selected: Option<String>,
    pub correct: String,
    pub is_correct: bool,
}

/// Compare a selection against the expected answer (case-sensitive)
pub fn check_answer(question_number: usize, selected: Option<&str>, correct: &str) -> AnswerCheck {
    AnswerCheck {
        question_number,
        selected: selected.map(str::to_string),
        correct: correct.to_string(),
        is_correct: selected == Some(correct),
    }
}

/// Check every question, asking `selection` for the chosen value of each 1-based question number
pub fn check_answers<F>(questions: &[Question], mut selection: F) -> Vec<AnswerCheck>
where
    F: FnMut(usize) -> Option<String>,
{
    questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let number = index + 1;
            let selected = selection(number);
            check_answer(number, selected.as_deref(), &question.correct_answer)
        })
        .collect()
}

/// Check questions against the radio groups `q1`, `q2`, ... rendered on the page
pub fn validate_answers<P: Page + ?Sized>(page: &P, questions: &[Question]) -> Vec<AnswerCheck> {
    check_answers(questions, |number| page.checked_value(&format!("q{number}")))
}

/// Score a set of checked answers
pub fn score_answers(checks: &[AnswerCheck]) -> Result<ScoreResult> {
    let correct = checks.iter().filter(|c| c.is_correct).count();
    calculate_score(correct as u32, checks.len() as u32)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::page::Document;
    use crate::scoring::Grade;

    fn quiz_page(selections: &[(&str, &[&str], Option<&str>)]) -> Document {
        let mut doc = Document::new("https://coldreads.example/passages/p1.html");
        let body = doc.body();
        let form = doc.append_with_id(body, "form", "quiz");
        for (name, choices, picked) in selections {
            for choice in *choices {
                let radio = doc.append(form, "input");
                doc.set_attribute(radio, "type", "radio");
                doc.set_attribute(radio, "name", name);
                doc.set_value(radio, choice);
                doc.set_checked(radio, Some(*choice) == *picked);
            }
        }
        doc
    }

    #[test]
    fn exact_match_is_correct() {
        let check = check_answer(1, Some("B"), "B");
        assert!(check.is_correct);
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert!(!check_answer(1, Some("b"), "B").is_correct);
    }

    #[test]
    fn unanswered_question_is_incorrect() {
        let check = check_answer(3, None, "C");
        assert_eq!(
            check,
            AnswerCheck {
                question_number: 3,
                selected: None,
                correct: "C".to_string(),
                is_correct: false
            }
        );
    }

    #[test]
    fn results_follow_question_order() {
        let questions = vec![Question::new("A"), Question::new("D"), Question::new("B")];
        let checks = check_answers(&questions, |n| match n {
            1 => Some("A".to_string()),
            3 => Some("C".to_string()),
            _ => None,
        });

        assert_eq!(checks.len(), 3);
        assert_eq!(checks.iter().map(|c| c.question_number).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(checks.iter().map(|c| c.is_correct).collect::<Vec<_>>(), vec![true, false, false]);
    }

    #[test]
    fn validate_answers_reads_radio_groups() {
        let choices: &[&str] = &["A", "B", "C"];
        let doc = quiz_page(&[
            ("q1", choices, Some("B")),
            ("q2", choices, None),
            ("q3", choices, Some("C")),
        ]);
        let questions = vec![Question::new("B"), Question::new("A"), Question::new("A")];

        let checks = validate_answers(&doc, &questions);

        assert_eq!(checks[0].selected.as_deref(), Some("B"));
        assert!(checks[0].is_correct);
        assert_eq!(checks[1].selected, None);
        assert!(!checks[2].is_correct);
    }

    #[test]
    fn score_answers_counts_correct_checks() {
        let questions = vec![Question::new("A"); 4];
        let checks = check_answers(&questions, |n| (n != 4).then(|| "A".to_string()));
        let score = score_answers(&checks).unwrap();
        assert_eq!(score.percentage, 75);
        assert_eq!(score.grade, Grade::C);
    }

    #[test]
    fn scoring_an_empty_quiz_fails() {
        assert!(score_answers(&[]).is_err());
    }

    #[test]
    fn answer_check_serializes_camel_case() {
        let json = serde_json::to_string(&check_answer(1, Some("A"), "A")).unwrap();
        assert!(json.contains("\"questionNumber\":1"));
        assert!(json.contains("\"isCorrect\":true"));
    }
}
