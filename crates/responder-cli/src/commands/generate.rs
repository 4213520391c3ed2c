use anyhow::{Result, bail};
use responder_application::ResponderUseCase;
use responder_core::conversation::Feedback;
use responder_core::generation::{GenerationOptions, ModelId, ResponseStyle, Tone};
use responder_core::prompt::find_quick_prompt;
use responder_infrastructure::AppConfig;

use crate::cli::GenerateArgs;

pub async fn generate(
    usecase: &ResponderUseCase,
    config: &AppConfig,
    args: GenerateArgs,
) -> Result<()> {
    let message = match (args.message, args.quick) {
        (Some(message), _) => message,
        (None, Some(title)) => {
            let role = usecase.profile()?.role;
            match find_quick_prompt(role, &title) {
                Some(quick) => quick.prompt.to_string(),
                None => bail!("No quick prompt titled '{title}' for {role}"),
            }
        }
        (None, None) => bail!("Provide a message or --quick <title>"),
    };

    let options = GenerationOptions {
        tone: args.tone.as_deref().map(Tone::from).unwrap_or_default(),
        style: args.style.as_deref().map(ResponseStyle::from).unwrap_or_default(),
        model: args
            .model
            .as_deref()
            .map(ModelId::from)
            .unwrap_or(config.gemini.default_model),
        use_search: args.search,
    };

    let result = usecase.generate(&message, options).await?;

    println!("{}", result.item.generated_response);
    if !result.item.search_results.is_empty() {
        println!("\nSources:");
        for source in &result.item.search_results {
            println!("  - {} <{}>", source.title, source.uri);
        }
    }
    println!(
        "\n[{} · {} · {} · id {}]",
        result.item.tone,
        result.item.response_style,
        result.item.model_id.display_name(),
        result.item.id
    );
    Ok(())
}

pub async fn feedback(usecase: &ResponderUseCase, item_id: i64, feedback: Feedback) -> Result<()> {
    usecase.set_feedback(item_id, feedback).await?;
    let label = match feedback {
        Feedback::Good => "good",
        Feedback::Bad => "bad",
    };
    println!("✓ Marked {item_id} as {label}");
    Ok(())
}

pub fn limit(usecase: &ResponderUseCase, config: &AppConfig) -> Result<()> {
    let status = usecase.rate_limit_status();
    let window_secs = config.rate_limit.window_ms / 1000;
    if status.is_limited {
        println!(
            "Limited: {} requests per {}s used, next request in {}s",
            config.rate_limit.max_requests,
            window_secs,
            status.wait_ms.div_ceil(1000)
        );
    } else {
        println!(
            "Available: up to {} requests per {}s",
            config.rate_limit.max_requests, window_secs
        );
    }
    Ok(())
}
