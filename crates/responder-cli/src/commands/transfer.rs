use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use responder_application::ResponderUseCase;

pub fn export(usecase: &ResponderUseCase, out: Option<&Path>) -> Result<()> {
    let json = usecase.export_all()?;
    match out {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Exported to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub async fn import(usecase: &ResponderUseCase, file: &Path) -> Result<()> {
    let content =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let imported = usecase.import(&content).await?;

    println!("✓ Imported {} conversations", imported.len());
    for conversation in imported {
        println!("  {} {}", conversation.id, conversation.name);
    }
    Ok(())
}

pub async fn share(usecase: &ResponderUseCase, id: Option<i64>) -> Result<()> {
    println!("{}", usecase.share_link(id).await?);
    Ok(())
}

pub async fn open(usecase: &ResponderUseCase, link: &str) -> Result<()> {
    let conversation = usecase.open_shared(link).await?;
    println!(
        "✓ Opened {} [{}] with {} exchanges",
        conversation.name,
        conversation.id,
        conversation.history.len()
    );
    Ok(())
}
