//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use responder_core::conversation::Feedback;
use responder_core::settings::Theme;

/// Draft replies to client messages in your own voice
#[derive(Parser)]
#[command(name = "responder", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to config.toml (default: platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show or edit the profile replies are written for
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Manage conversations
    Conversation {
        #[command(subcommand)]
        action: ConversationAction,
    },
    /// Draft a reply to a client message in the active conversation
    Generate(GenerateArgs),
    /// Rate a drafted reply of the active conversation
    Feedback {
        /// ID of the exchange
        item_id: i64,
        /// good or bad
        feedback: Feedback,
    },
    /// Export all conversations as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Import conversations from an exported JSON file
    Import { file: PathBuf },
    /// Print a share link for a conversation (default: the active one)
    Share { id: Option<i64> },
    /// Open a shared conversation from a link or raw payload
    Open { link: String },
    /// Show the local request budget
    Limit,
    /// Show the theme, or set it to dark or light
    Theme { theme: Option<Theme> },
    /// Store or remove the Gemini API key
    ApiKey {
        #[command(subcommand)]
        action: ApiKeyAction,
    },
    /// List quick prompts for the profile's role
    Prompts,
}

#[derive(Subcommand)]
pub enum ProfileAction {
    Show,
    /// Update profile fields; omitted fields keep their value
    Set {
        #[arg(long)]
        name: Option<String>,
        /// Freelancer, Student or Business Owner
        #[arg(long)]
        role: Option<String>,
        /// English, Spanish, French, Japanese or any other language name
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        skills: Option<String>,
        #[arg(long)]
        experience: Option<String>,
        /// Portfolio URL; pass an empty string to remove it
        #[arg(long)]
        portfolio: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConversationAction {
    List,
    /// Start a new conversation and select it
    New,
    Select { id: i64 },
    Rename { id: i64, name: String },
    Delete { id: i64 },
    /// Remove all exchanges, keeping the name
    Clear { id: i64 },
    /// Print the transcript, oldest exchange first
    Copy { id: Option<i64> },
}

#[derive(Subcommand)]
pub enum ApiKeyAction {
    /// Store a key; reads it from stdin when omitted
    Set { key: Option<String> },
    Clear,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// The client's message
    pub message: Option<String>,

    /// Use a quick prompt by title as the message
    #[arg(long, conflicts_with = "message")]
    pub quick: Option<String>,

    /// Casual, Formal or Enthusiastic
    #[arg(long)]
    pub tone: Option<String>,

    /// Default, "Short & Sweet" or "Detailed Explanation"
    #[arg(long)]
    pub style: Option<String>,

    /// Model ID or display name (default from config)
    #[arg(long)]
    pub model: Option<String>,

    /// Ground the reply in web search results
    #[arg(long)]
    pub search: bool,
}
