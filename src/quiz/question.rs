use std::{fmt, str::FromStr};

use rand::{seq::SliceRandom, Rng};

use super::{sampler, vocabulary::TagVocabulary};
use crate::error::QuizError;

/// Number of options shown with every question.
pub const CHOICES: usize = 4;

/// Where the correct label ends up among the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerSlot {
    /// Keep the sampler order: the answer is always the last variant.
    Last,
    /// Shuffle the variants so the answer can land in any grid cell.
    #[default]
    Random,
}

impl FromStr for AnswerSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last" => Ok(AnswerSlot::Last),
            "random" => Ok(AnswerSlot::Random),
            other => Err(format!("expected 'last' or 'random', got '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    answer: String,
    variants: Vec<String>,
}

impl Question {
    /// Builds a question around `vocabulary[answer_index]` with
    /// `CHOICES - 1` distinct distractors.
    pub fn build<R: Rng + ?Sized>(
        vocabulary: &TagVocabulary,
        answer_index: usize,
        rng: &mut R,
        slot: AnswerSlot,
    ) -> Result<Self, QuizError> {
        let indices = sampler::sample(rng, vocabulary.len(), CHOICES, answer_index)?;

        let mut variants: Vec<String> = indices
            .into_iter()
            .map(|index| vocabulary[index].to_owned())
            .collect();
        if slot == AnswerSlot::Random {
            variants.shuffle(rng);
        }

        Ok(Self {
            answer: vocabulary[answer_index].to_owned(),
            variants,
        })
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    pub fn position_of(&self, label: &str) -> Option<usize> {
        self.variants.iter().position(|variant| variant == label)
    }

    pub fn is_correct(&self, label: &str) -> bool {
        self.answer == label.trim()
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.answer, self.variants.join(", "))
    }
}
