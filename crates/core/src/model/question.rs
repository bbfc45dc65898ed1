use std::collections::HashSet;

use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("a question needs at least two options, got {0}")]
    TooFewOptions(usize),

    #[error("duplicate option: {0}")]
    DuplicateOption(String),

    #[error("correct answer {0:?} is not one of the options")]
    UnknownCorrectAnswer(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopicError {
    #[error("topic name cannot be empty")]
    EmptyName,

    #[error("topic {0:?} has no questions")]
    NoQuestions(String),

    #[error("duplicate topic: {0}")]
    DuplicateTopic(String),
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question with exactly one correct option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct_answer: String,
    hint: Option<String>,
}

impl Question {
    /// Creates a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, fewer than two options are
    /// given, options repeat, or the correct answer is not among the options.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
        hint: Option<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        let correct_answer = correct_answer.into();

        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions(options.len()));
        }
        let mut seen = HashSet::with_capacity(options.len());
        for option in &options {
            if !seen.insert(option.as_str()) {
                return Err(QuestionError::DuplicateOption(option.clone()));
            }
        }
        if !options.contains(&correct_answer) {
            return Err(QuestionError::UnknownCorrectAnswer(correct_answer));
        }

        let hint = hint
            .map(|h| h.trim().to_owned())
            .filter(|h| !h.is_empty());

        Ok(Self {
            prompt,
            options,
            correct_answer,
            hint,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Exact string comparison; no trimming or case folding.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }

    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Returns a copy whose hint is guaranteed present, falling back to a
    /// generic nudge that names the topic.
    #[must_use]
    pub fn with_hint_for(&self, topic_name: &str) -> Self {
        let mut question = self.clone();
        if question.hint.is_none() {
            question.hint = Some(default_hint(topic_name));
        }
        question
    }
}

/// Placeholder hint for questions authored without one.
#[must_use]
pub fn default_hint(topic_name: &str) -> String {
    format!("Think about the core concepts of {topic_name} related to this question.")
}

//
// ─── TOPIC ─────────────────────────────────────────────────────────────────────
//

/// Named, ordered bundle of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    name: String,
    questions: Vec<Question>,
}

impl Topic {
    /// # Errors
    ///
    /// Returns `TopicError` if the name is blank or there are no questions.
    pub fn new(name: impl Into<String>, questions: Vec<Question>) -> Result<Self, TopicError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TopicError::EmptyName);
        }
        if questions.is_empty() {
            return Err(TopicError::NoQuestions(name));
        }
        Ok(Self { name, questions })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
