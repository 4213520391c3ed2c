//! Command dispatch.

mod conversation;
mod generate;
mod profile;
mod settings;
mod transfer;

use anyhow::Result;
use responder_application::AppBootstrap;
use responder_infrastructure::AppConfig;

use crate::cli::Command;

pub async fn handle(command: Command, app: &AppBootstrap, config: &AppConfig) -> Result<()> {
    let usecase = &app.usecase;
    usecase.initialize().await?;

    match command {
        Command::Profile { action } => profile::handle(usecase, action),
        Command::Conversation { action } => conversation::handle(usecase, action).await,
        Command::Generate(args) => generate::generate(usecase, config, args).await,
        Command::Feedback { item_id, feedback } => {
            generate::feedback(usecase, item_id, feedback).await
        }
        Command::Limit => generate::limit(usecase, config),
        Command::Export { out } => transfer::export(usecase, out.as_deref()),
        Command::Import { file } => transfer::import(usecase, &file).await,
        Command::Share { id } => transfer::share(usecase, id).await,
        Command::Open { link } => transfer::open(usecase, &link).await,
        Command::Theme { theme } => settings::theme(usecase, theme),
        Command::ApiKey { action } => settings::api_key(usecase, action),
        Command::Prompts => settings::prompts(usecase),
    }
}
