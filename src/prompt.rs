//! Yes/no confirmation collaborator
//!
//! Questions are asked in linear batches; a cancelled or interrupted batch
//! answers "no" for every remaining question instead of erroring, so an
//! interrupt mid-confirmation degrades to "decline the rest".

use dialoguer::Confirm;
use std::collections::HashMap;

/// One yes/no question with a stable label and a default answer
#[derive(Debug, Clone)]
pub struct Question {
    /// Key the answer is returned under
    pub label: String,
    /// Text shown to the user
    pub prompt: String,
    /// Answer used when the user just presses enter
    pub default: bool,
}

impl Question {
    pub fn new(label: impl Into<String>, prompt: impl Into<String>, default: bool) -> Self {
        Self {
            label: label.into(),
            prompt: prompt.into(),
            default,
        }
    }
}

/// Asks a batch of questions and returns label -> answer
pub trait Prompter: Send + Sync {
    fn confirm_batch(&self, questions: &[Question]) -> HashMap<String, bool>;
}

/// Interactive terminal prompter
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm_batch(&self, questions: &[Question]) -> HashMap<String, bool> {
        let mut answers = HashMap::new();
        let mut cancelled = false;

        for question in questions {
            let answer = if cancelled {
                false
            } else {
                match Confirm::new()
                    .with_prompt(question.prompt.clone())
                    .default(question.default)
                    .interact()
                {
                    Ok(value) => value,
                    // interrupt or terminal error: decline all remaining
                    Err(_) => {
                        cancelled = true;
                        false
                    }
                }
            };
            answers.insert(question.label.clone(), answer);
        }

        answers
    }
}

/// Answers every question positively; backs `--yes`
pub struct AssumeYes;

impl Prompter for AssumeYes {
    fn confirm_batch(&self, questions: &[Question]) -> HashMap<String, bool> {
        questions
            .iter()
            .map(|q| (q.label.clone(), true))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_new() {
        let question = Question::new("jquery", "Update jquery?", true);
        assert_eq!(question.label, "jquery");
        assert_eq!(question.prompt, "Update jquery?");
        assert!(question.default);
    }

    #[test]
    fn test_assume_yes_answers_everything() {
        let questions = [
            Question::new("a", "A?", false),
            Question::new("b", "B?", true),
        ];
        let answers = AssumeYes.confirm_batch(&questions);
        assert_eq!(answers.len(), 2);
        assert!(answers["a"]);
        assert!(answers["b"]);
    }

    #[test]
    fn test_assume_yes_empty_batch() {
        assert!(AssumeYes.confirm_batch(&[]).is_empty());
    }
}
