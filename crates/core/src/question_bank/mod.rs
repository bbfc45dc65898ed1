use std::collections::HashSet;

use crate::error::Error;
use crate::model::{Question, Topic, TopicError};

mod builtin;

use builtin::{BUILTIN_TOPICS, SeedTopic};

/// Read-only catalog of quiz topics, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    topics: Vec<Topic>,
}

impl QuestionBank {
    /// Build a catalog from validated topics.
    ///
    /// # Errors
    ///
    /// Returns `TopicError::DuplicateTopic` if two topics share a name.
    pub fn from_topics(topics: Vec<Topic>) -> Result<Self, TopicError> {
        let mut seen = HashSet::with_capacity(topics.len());
        for topic in &topics {
            if !seen.insert(topic.name().to_owned()) {
                return Err(TopicError::DuplicateTopic(topic.name().to_owned()));
            }
        }
        Ok(Self { topics })
    }

    /// The catalog bundled with the application.
    ///
    /// # Errors
    ///
    /// Returns `Error` if a bundled question fails validation.
    pub fn builtin() -> Result<Self, Error> {
        let topics = BUILTIN_TOPICS
            .iter()
            .map(seed_to_topic)
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(Self::from_topics(topics)?)
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Exact, case-sensitive lookup by topic name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.name() == name)
    }

    pub fn topic_names(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(Topic::name)
    }
}

fn seed_to_topic(seed: &SeedTopic) -> Result<Topic, Error> {
    let questions = seed
        .questions
        .iter()
        .map(|q| {
            Question::new(
                q.prompt,
                q.options.iter().map(|o| (*o).to_owned()).collect(),
                q.correct_answer,
                q.hint.map(str::to_owned),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Topic::new(seed.name, questions)?)
}
