use std::error::Error;
use std::sync::Arc;

use axum::routing::get;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use tagquizbot::collage::HttpCollageService;
use tagquizbot::config::{Config, Webhook};
use tagquizbot::quiz::QuestionQueue;
use tagquizbot::runner::Quizmaster;
use tagquizbot::schema::schema;
use tagquizbot::state::Sessions;
use teloxide::error_handlers::IgnoringErrorHandlerSafe;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks::{self, Options};
use teloxide::update_listeners::UpdateListener;
use tracing::level_filters;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let config = Config::from_env()?;

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level_filters::LevelFilter::from_level(config.log_level))
        .json()
        .with_span_events(FmtSpan::ENTER)
        .log_internal_errors(true)
        .with_line_number(true)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    // `log` records from teloxide, reqwest and our handlers end up in the same stream.
    tracing_log::LogTracer::init()?;

    let mut rng = Pcg32::seed_from_u64(config.seed);
    let queue = QuestionQueue::generate(&config.tags, &mut rng, config.answer_slot)?;
    log::info!(
        "Built {} questions from tags [{}] (seed {})",
        queue.len(),
        config.tags,
        config.seed
    );

    let collages = HttpCollageService::new(config.collage_url.clone(), config.collage_timeout)?;
    let master = Arc::new(Quizmaster::new(
        Sessions::new(queue, config.session_scope),
        collages,
        config.collage_timeout,
    ));

    let bot = Bot::new(&config.token);
    log::info!("Starting bot...");

    let mut dispatcher = Dispatcher::builder(bot.clone(), schema::<HttpCollageService>())
        .dependencies(dptree::deps![master])
        .enable_ctrlc_handler()
        .build();

    if let Some(Webhook { addr, url }) = config.webhook {
        let on_root = url.path() == "/";
        let (mut listener, stop_flag, router) =
            webhooks::axum_to_router(bot, Options::new(addr, url)).await?;
        // Health check, unless the webhook itself lives at the root.
        let router = if on_root {
            router
        } else {
            router.route("/", get(|| async { "Hello world" }))
        };

        let stop_token = listener.stop_token();
        let tcp = tokio::net::TcpListener::bind(addr).await?;
        log::info!("Listening for webhook updates on {}", addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(tcp, router)
                .with_graceful_shutdown(stop_flag)
                .await
            {
                log::error!("Webhook server failed: {}", e);
                stop_token.stop();
            }
        });

        dispatcher
            .dispatch_with_listener(listener, Arc::new(IgnoringErrorHandlerSafe))
            .await
    } else {
        dispatcher.dispatch().await
    }

    Ok(())
}
