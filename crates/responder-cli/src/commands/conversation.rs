use anyhow::Result;
use responder_application::ResponderUseCase;

use crate::cli::ConversationAction;

pub async fn handle(usecase: &ResponderUseCase, action: ConversationAction) -> Result<()> {
    match action {
        ConversationAction::List => {
            let active = usecase.active_conversation().await?.id;
            for conversation in usecase.conversations()? {
                let marker = if conversation.id == active { "*" } else { " " };
                println!(
                    "{marker} {:<15} {} ({} exchanges)",
                    conversation.id,
                    conversation.name,
                    conversation.history.len()
                );
            }
        }
        ConversationAction::New => {
            let conversation = usecase.new_conversation().await?;
            println!("✓ Active conversation: {} [{}]", conversation.name, conversation.id);
        }
        ConversationAction::Select { id } => {
            let conversation = usecase.select(id).await?;
            println!("✓ Active conversation: {} [{}]", conversation.name, conversation.id);
        }
        ConversationAction::Rename { id, name } => {
            let conversation = usecase.rename(id, &name).await?;
            println!("✓ Renamed to {}", conversation.name);
        }
        ConversationAction::Delete { id } => {
            usecase.delete(id).await?;
            println!("✓ Deleted conversation {id}");
        }
        ConversationAction::Clear { id } => {
            let conversation = usecase.clear_history(id).await?;
            println!("✓ Cleared {}", conversation.name);
        }
        ConversationAction::Copy { id } => {
            let id = match id {
                Some(id) => id,
                None => usecase.active_conversation().await?.id,
            };
            println!("{}", usecase.copy_transcript(id)?);
        }
    }
    Ok(())
}
