use std::io::{self, BufRead};

use anyhow::{Context, Result};
use responder_application::ResponderUseCase;
use responder_core::settings::Theme;

use crate::cli::ApiKeyAction;

pub fn theme(usecase: &ResponderUseCase, theme: Option<Theme>) -> Result<()> {
    let theme = match theme {
        Some(theme) => usecase.set_theme(theme)?,
        None => usecase.theme()?,
    };
    println!("{theme}");
    Ok(())
}

pub fn api_key(usecase: &ResponderUseCase, action: ApiKeyAction) -> Result<()> {
    match action {
        ApiKeyAction::Set { key } => {
            let key = match key {
                Some(key) => key,
                None => {
                    let mut line = String::new();
                    io::stdin()
                        .lock()
                        .read_line(&mut line)
                        .context("Failed to read API key from stdin")?;
                    line
                }
            };
            usecase.set_api_key(&key)?;
            println!("✓ API key saved");
        }
        ApiKeyAction::Clear => {
            usecase.clear_api_key()?;
            println!("✓ API key removed");
        }
    }
    Ok(())
}

pub fn prompts(usecase: &ResponderUseCase) -> Result<()> {
    for quick in usecase.quick_prompts()? {
        println!("{}\n  {}\n", quick.title, quick.prompt);
    }
    Ok(())
}
