use teloxide::{
    dispatching::{UpdateFilterExt, UpdateHandler},
    dptree,
    types::Update,
};

use crate::{
    collage::CollageSource,
    commands::{help, reset, start, Command},
    runner,
};

/// Dispatch tree: commands first, every other message is treated as an
/// answer followed by the next question. Channel posts are dropped.
pub fn schema<Source>() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>>
where
    Source: CollageSource + Send + Sync + 'static,
{
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Help].endpoint(help))
        .branch(case![Command::Start].endpoint(start::<Source>))
        .branch(case![Command::Reset].endpoint(reset::<Source>));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .endpoint(runner::answer::<Source>);

    dptree::entry()
        .branch(message_handler)
        .branch(Update::filter_channel_post().endpoint(runner::ignore_channel_post))
}
