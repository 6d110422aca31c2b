use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Every question offers exactly this many options.
pub const OPTION_COUNT: usize = 4;

/// A single multiple-choice question as stored under the `questions` key.
///
/// The JSON layout keeps the keys of the original question bank
/// (`question`, `correct`) so existing exports can be imported as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_correct_index"))]
pub struct Question {
    /// `0` means "not assigned yet"; the repository hands out a fresh id on save.
    #[serde(default)]
    pub id: u64,

    #[validate(range(min = 1, message = "Level must be 1 or higher"))]
    pub level: u32,

    #[serde(rename = "question", alias = "text")]
    #[validate(length(min = 1, message = "Question text must not be empty"))]
    pub text: String,

    #[validate(length(equal = 4, message = "Question must have exactly 4 options"))]
    pub options: Vec<String>,

    #[serde(rename = "correct", alias = "correctIndex")]
    pub correct_index: usize,

    #[serde(default)]
    pub explanation: String,
}

fn validate_correct_index(question: &Question) -> Result<(), ValidationError> {
    if question.correct_index < question.options.len() {
        return Ok(());
    }
    let mut err = ValidationError::new("correct_index_out_of_range");
    err.message = Some(
        format!(
            "Correct index {} is not a valid option index",
            question.correct_index
        )
        .into(),
    );
    Err(err)
}

impl Question {
    pub fn new(
        level: u32,
        text: impl Into<String>,
        options: [&str; OPTION_COUNT],
        correct_index: usize,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            level,
            text: text.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_index,
            explanation: explanation.into(),
        }
    }

    /// Validates the record and flattens validator output into one message.
    pub fn check(&self) -> Result<(), String> {
        self.validate().map_err(|errors| errors.to_string())
    }

    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }

    pub fn incorrect_indices(&self) -> Vec<usize> {
        (0..self.options.len())
            .filter(|i| *i != self.correct_index)
            .collect()
    }

    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }
}

/// Letter label used by the presentation layer (`A`..`D`).
pub fn option_label(index: usize) -> char {
    (b'A' + (index as u8 % 26)) as char
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question::new(1, "Capital of Indonesia?", ["Jakarta", "Bandung", "Surabaya", "Medan"], 0, "")
    }

    #[test]
    fn valid_question_passes() {
        assert!(sample().check().is_ok());
    }

    #[test]
    fn empty_text_is_rejected() {
        let mut q = sample();
        q.text.clear();
        assert!(q.check().is_err());
    }

    #[test]
    fn three_options_are_rejected() {
        let mut q = sample();
        q.options.pop();
        q.correct_index = 0;
        assert!(q.check().is_err());
    }

    #[test]
    fn out_of_range_correct_index_is_rejected() {
        let mut q = sample();
        q.correct_index = 4;
        let err = q.check().unwrap_err();
        assert!(err.contains("not a valid option index"));
    }

    #[test]
    fn incorrect_indices_skip_the_answer() {
        let mut q = sample();
        q.correct_index = 2;
        assert_eq!(q.incorrect_indices(), vec![0, 1, 3]);
    }

    #[test]
    fn deserializes_original_layout() {
        let raw = r#"{"id":7,"level":3,"question":"Gold symbol?","options":["Ag","Au","Fe","Cu"],"correct":1,"explanation":"aurum"}"#;
        let q: Question = serde_json::from_str(raw).unwrap();
        assert_eq!(q.id, 7);
        assert_eq!(q.text, "Gold symbol?");
        assert_eq!(q.correct_index, 1);
        assert_eq!(q.correct_option(), Some("Au"));
    }

    #[test]
    fn option_labels() {
        assert_eq!(option_label(0), 'A');
        assert_eq!(option_label(3), 'D');
    }
}
