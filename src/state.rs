use std::{str::FromStr, sync::Arc};

use dashmap::DashMap;

use crate::quiz::{Question, QuestionQueue};

#[derive(Debug, Clone)]
pub struct SessionCursor {
    queue: Arc<QuestionQueue>,
    current: usize,
}

impl SessionCursor {
    pub fn new(queue: Arc<QuestionQueue>) -> Self {
        Self { queue, current: 0 }
    }

    pub fn current(&self) -> &Question {
        &self.queue[self.current]
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn take_next(&mut self) -> (usize, Question) {
        let index = self.current;
        let question = self.queue[index].clone();
        self.current = (self.current + 1) % self.queue.len();
        (index, question)
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionScope {
    Global,
    #[default]
    PerChat,
}

impl FromStr for SessionScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(SessionScope::Global),
            "per-chat" | "per_chat" | "chat" => Ok(SessionScope::PerChat),
            other => Err(format!("expected 'global' or 'per-chat', got '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Wrong { expected: String },
    NotAnAnswer,
}

/// A question handed out by [`Sessions::take_next`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asked {
    pub index: usize,
    pub question: Question,
}

/// Cursors are keyed by scope, the last question asked by chat id. Each
/// cursor entry is locked on its own; grading and stepping for a chat happen
/// while that entry is held.
#[derive(Debug)]
pub struct Sessions {
    queue: Arc<QuestionQueue>,
    scope: SessionScope,
    cursors: DashMap<i64, SessionCursor>,
    last_asked: DashMap<i64, Question>,
}

const GLOBAL_KEY: i64 = 0;

fn judge(question: Option<&Question>, reply: &str) -> Verdict {
    let Some(question) = question else {
        return Verdict::NotAnAnswer;
    };

    let reply = reply.trim();
    if question.is_correct(reply) {
        Verdict::Correct
    } else if question.position_of(reply).is_some() {
        Verdict::Wrong {
            expected: question.answer().to_owned(),
        }
    } else {
        Verdict::NotAnAnswer
    }
}

impl Sessions {
    pub fn new(queue: QuestionQueue, scope: SessionScope) -> Self {
        Self {
            queue: Arc::new(queue),
            scope,
            cursors: DashMap::new(),
            last_asked: DashMap::new(),
        }
    }

    pub fn queue(&self) -> &QuestionQueue {
        &self.queue
    }

    pub fn scope(&self) -> SessionScope {
        self.scope
    }

    fn key(&self, chat: i64) -> i64 {
        match self.scope {
            SessionScope::Global => GLOBAL_KEY,
            SessionScope::PerChat => chat,
        }
    }

    /// Hands out the chat's current question and advances its cursor.
    pub fn take_next(&self, chat: i64) -> Asked {
        self.grade_and_take(chat, None).1
    }

    /// Grades `reply` against the chat's last question, then hands out the
    /// next one. Both happen under the cursor entry's lock.
    pub fn grade_and_take(&self, chat: i64, reply: Option<&str>) -> (Option<Verdict>, Asked) {
        let mut cursor = self
            .cursors
            .entry(self.key(chat))
            .or_insert_with(|| SessionCursor::new(Arc::clone(&self.queue)));

        let verdict = reply.map(|reply| judge(self.last_asked.get(&chat).as_deref(), reply));
        let (index, question) = cursor.take_next();
        self.last_asked.insert(chat, question.clone());

        (verdict, Asked { index, question })
    }

    pub fn position(&self, chat: i64) -> usize {
        self.cursors
            .get(&self.key(chat))
            .map(|cursor| cursor.index())
            .unwrap_or(0)
    }

    pub fn grade(&self, chat: i64, reply: &str) -> Verdict {
        judge(self.last_asked.get(&chat).as_deref(), reply)
    }

    pub fn reset(&self, chat: i64) {
        if let Some(mut cursor) = self.cursors.get_mut(&self.key(chat)) {
            cursor.reset();
        }
        self.last_asked.remove(&chat);
    }
}
