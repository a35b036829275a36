use std::sync::Arc;

use teloxide::{prelude::Requester, types::Message, utils::command::BotCommands, Bot};

use crate::{
    collage::CollageSource,
    runner::{send_round, Quizmaster},
    HandlerResult,
};

#[derive(Debug, Clone, BotCommands)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "display help.")]
    Help,
    #[command(description = "get the next picture.")]
    Start,
    #[command(description = "start over from the first picture.")]
    Reset,
}

pub(crate) async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

pub(crate) async fn start<Source: CollageSource + Send + Sync>(
    bot: Bot,
    msg: Message,
    master: Arc<Quizmaster<Source>>,
) -> HandlerResult {
    log::info!("{}: starts the quiz", msg.chat.id.0);
    send_round(&bot, msg.chat.id, &master).await
}

pub(crate) async fn reset<Source: CollageSource + Send + Sync>(
    bot: Bot,
    msg: Message,
    master: Arc<Quizmaster<Source>>,
) -> HandlerResult {
    master.sessions().reset(msg.chat.id.0);
    log::info!("{}: progress reset", msg.chat.id.0);
    bot.send_message(msg.chat.id, "Starting over.").await?;
    send_round(&bot, msg.chat.id, &master).await
}
