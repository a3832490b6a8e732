// This is the entry point of the content moderation bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic): keyword trie, post lifecycle
// - `infra/` = Implementations of core traits (in-memory store, word list loader)
// - `discord/` = Discord-specific adapters (slash commands)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Register commands

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::core::moderation::{KeywordTrie, ModerationService};
use crate::discord::commands::presence;
use crate::discord::{parse_moderator_ids, Data, Error};
use crate::infra::moderation::{load_keyword_trie, InMemoryPostStore};
use poise::serenity_prelude as serenity;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // Get Discord bot token from environment
    let token = std::env::var("DISCORD_TOKEN").expect(
        "Missing DISCORD_TOKEN environment variable! Create a .env file with your bot token.",
    );

    let moderator_ids = std::env::var("MODERATOR_USER_IDS")
        .map(|raw| parse_moderator_ids(&raw))
        .unwrap_or_default();
    tracing::info!(count = moderator_ids.len(), "Configured moderator accounts");

    // A broken seed list is a deployment mistake, so refuse to start.
    let keywords = match std::env::var("FORBIDDEN_WORDS_FILE") {
        Ok(path) => load_keyword_trie(&path).expect("Failed to load FORBIDDEN_WORDS_FILE"),
        Err(_) => {
            tracing::warn!("FORBIDDEN_WORDS_FILE not set, starting with an empty word list");
            KeywordTrie::new()
        }
    };

    let dev_guild_id = std::env::var("DEV_GUILD_ID")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|id| *id != 0);

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // This is the "composition root" where we wire everything together.

    let moderation_service = Arc::new(ModerationService::with_keywords(
        InMemoryPostStore::new(),
        keywords,
    ));

    let data = Data {
        moderation: Arc::clone(&moderation_service),
        moderator_ids: Arc::new(moderator_ids),
    };

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    // Slash commands only: no message content needed.
    let intents = serenity::GatewayIntents::GUILDS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                discord::commands::posts::post(),
                discord::commands::moderate::moderate(),
                discord::commands::words::words(),
            ],
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                tracing::info!("Bot is starting up...");

                match dev_guild_id {
                    // Guild registration is instant; handy while developing.
                    Some(guild_id) => {
                        poise::builtins::register_in_guild(
                            ctx,
                            &framework.options().commands,
                            serenity::GuildId::new(guild_id),
                        )
                        .await?;
                    }
                    // Global registration can take up to an hour to propagate.
                    None => {
                        poise::builtins::register_globally(ctx, &framework.options().commands)
                            .await?;
                    }
                }

                tracing::info!("Commands registered, bot is ready");
                presence::on_ready(ctx, data.moderation.forbidden_word_count());

                Ok::<Data, Error>(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .expect("Error creating client");

    client.start().await.expect("Error running bot");
}
