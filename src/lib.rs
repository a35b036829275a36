pub mod collage;
pub mod commands;
pub mod config;
pub mod error;
pub mod keyboard;
pub mod quiz;
pub mod runner;
pub mod schema;
pub mod state;

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;
