use std::{sync::Arc, time::Duration};

use teloxide::{
    payloads::SendPhotoSetters,
    prelude::Requester,
    types::{ChatAction, ChatId, InputFile, Message, MessageId},
    Bot,
};
use tracing::instrument;

use crate::{
    collage::{CollageSource, TILE_COUNT},
    error::QuizError,
    keyboard::question_keyboard,
    state::{Asked, Sessions, Verdict},
    HandlerResult,
};

/// The parts of an inbound message a round needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub text: Option<String>,
}

impl InboundEvent {
    pub fn from_message(msg: &Message) -> Result<Self, QuizError> {
        Self::validate(
            msg.chat.id,
            msg.id,
            msg.text().map(str::to_owned),
            msg.from.is_some(),
        )
    }

    pub(crate) fn validate(
        chat_id: ChatId,
        message_id: MessageId,
        text: Option<String>,
        has_sender: bool,
    ) -> Result<Self, QuizError> {
        if !has_sender {
            return Err(QuizError::MalformedInbound {
                reason: format!("message {} in chat {} has no sender", message_id.0, chat_id.0),
            });
        }

        Ok(Self {
            chat_id,
            message_id,
            text,
        })
    }
}

/// Verdict on the previous question plus the question to send next.
#[derive(Debug)]
pub struct Turn {
    pub chat_id: ChatId,
    pub verdict: Option<Verdict>,
    pub asked: Asked,
}

/// A question ready to send: what was asked and its collage.
#[derive(Debug)]
pub struct Round {
    pub asked: Asked,
    pub image: Vec<u8>,
}

/// Shared game state injected into every handler.
pub struct Quizmaster<Source> {
    sessions: Sessions,
    collages: Source,
    timeout: Duration,
}

impl<Source: CollageSource> Quizmaster<Source> {
    pub fn new(sessions: Sessions, collages: Source, timeout: Duration) -> Self {
        Self {
            sessions,
            collages,
            timeout,
        }
    }

    pub fn sessions(&self) -> &Sessions {
        &self.sessions
    }

    /// Grades the event's text and takes the chat's next question in one step.
    pub fn begin_turn(&self, event: &InboundEvent) -> Turn {
        let (verdict, asked) = self
            .sessions
            .grade_and_take(event.chat_id.0, event.text.as_deref());
        Turn {
            chat_id: event.chat_id,
            verdict,
            asked,
        }
    }

    /// Takes the chat's next question and fetches its collage.
    pub async fn prepare_round(&self, chat: ChatId) -> Result<Round, QuizError> {
        let asked = self.sessions.take_next(chat.0);
        self.fetch_round(chat, asked).await
    }

    /// The cursor has already moved, so a failed fetch still consumes the question.
    pub async fn fetch_round(&self, chat: ChatId, asked: Asked) -> Result<Round, QuizError> {
        log::info!(
            "{}: asking question #{}: {}",
            chat.0,
            asked.index + 1,
            asked.question
        );

        let image = tokio::time::timeout(
            self.timeout,
            self.collages.fetch(asked.question.answer(), TILE_COUNT),
        )
        .await
        .map_err(|_| QuizError::downstream("collage service", "timed out"))??;

        Ok(Round { asked, image })
    }
}

/// Sends the next question to `chat`.
pub(crate) async fn send_round<Source: CollageSource + Send + Sync>(
    bot: &Bot,
    chat: ChatId,
    master: &Quizmaster<Source>,
) -> HandlerResult {
    let asked = master.sessions().take_next(chat.0);
    send_asked(bot, chat, master, asked).await
}

/// Downstream failures are logged and swallowed so one bad event never
/// stops the dispatcher.
async fn send_asked<Source: CollageSource + Send + Sync>(
    bot: &Bot,
    chat: ChatId,
    master: &Quizmaster<Source>,
    asked: Asked,
) -> HandlerResult {
    if let Err(e) = bot.send_chat_action(chat, ChatAction::UploadPhoto).await {
        log::warn!("{}: can't send chat action: {}", chat.0, e);
    }

    let round = match master.fetch_round(chat, asked).await {
        Ok(round) => round,
        Err(e) => {
            log::error!("{}: can't prepare question: {}", chat.0, e);
            return Ok(());
        }
    };

    let photo = InputFile::memory(round.image).file_name("collage.jpg");
    if let Err(e) = bot
        .send_photo(chat, photo)
        .reply_markup(question_keyboard(&round.asked.question))
        .await
    {
        let e = QuizError::downstream("telegram", e);
        log::error!(
            "{}: can't send question #{}: {}",
            chat.0,
            round.asked.index + 1,
            e
        );
    }

    Ok(())
}

fn verdict_text(verdict: &Verdict) -> Option<String> {
    match verdict {
        Verdict::Correct => Some("Correct!✅".to_owned()),
        Verdict::Wrong { expected } => Some(format!("Wrong❌ It was {}.", expected)),
        Verdict::NotAnAnswer => None,
    }
}

/// Any plain message: grade it if it answers the last question, then ask
/// the next one.
#[instrument(level = "info", skip(bot, master))]
pub(crate) async fn answer<Source: CollageSource + Send + Sync>(
    bot: Bot,
    msg: Message,
    master: Arc<Quizmaster<Source>>,
) -> HandlerResult {
    let turn = match InboundEvent::from_message(&msg).map(|event| master.begin_turn(&event)) {
        Ok(turn) => turn,
        Err(e) => {
            log::warn!("Dropping update: {}", e);
            return Ok(());
        }
    };

    if let Some(verdict) = &turn.verdict {
        log::info!("{}: answered {:?}", turn.chat_id.0, verdict);
        if let Some(reply) = verdict_text(verdict) {
            if let Err(e) = bot.send_message(turn.chat_id, reply).await {
                log::warn!("{}: can't send verdict: {}", turn.chat_id.0, e);
            }
        }
    }

    send_asked(&bot, turn.chat_id, &master, turn.asked).await
}

#[instrument(level = "debug", skip(msg))]
pub(crate) async fn ignore_channel_post(msg: Message) -> HandlerResult {
    log::debug!("Ignoring post {} in channel {}", msg.id.0, msg.chat.id.0);
    Ok(())
}
