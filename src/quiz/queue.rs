use std::ops::Index;

use rand::{seq::SliceRandom, Rng};

use super::{
    question::{AnswerSlot, Question, CHOICES},
    vocabulary::TagVocabulary,
};
use crate::error::QuizError;

/// One question per vocabulary tag, in shuffled order. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionQueue {
    questions: Vec<Question>,
}

impl QuestionQueue {
    /// Every tag becomes the answer of exactly one question. Fails before
    /// building anything when the vocabulary cannot fill a choice set.
    pub fn generate<R: Rng + ?Sized>(
        vocabulary: &TagVocabulary,
        rng: &mut R,
        slot: AnswerSlot,
    ) -> Result<Self, QuizError> {
        if vocabulary.len() < CHOICES {
            return Err(QuizError::InsufficientVocabulary {
                required: CHOICES,
                available: vocabulary.len(),
            });
        }

        let mut order: Vec<usize> = (0..vocabulary.len()).collect();
        order.shuffle(rng);

        let questions = order
            .into_iter()
            .map(|answer| Question::build(vocabulary, answer, rng, slot))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn answers(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(Question::answer)
    }
}

impl Index<usize> for QuestionQueue {
    type Output = Question;

    fn index(&self, index: usize) -> &Question {
        &self.questions[index]
    }
}

impl<'a> IntoIterator for &'a QuestionQueue {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
