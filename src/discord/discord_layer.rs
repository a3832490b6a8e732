// Discord layer - commands and the glue between Discord users and core callers.

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "moderation/formatter.rs"]
pub mod formatter;

use crate::core::moderation::{Account, ModerationError, ModerationService};
use crate::infra::moderation::InMemoryPostStore;
use std::collections::HashSet;
use std::sync::Arc;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Shared state handed to every command.
pub struct Data {
    pub moderation: Arc<ModerationService<InMemoryPostStore>>,
    /// Discord user IDs that act as moderators outside the moderator-only commands.
    pub moderator_ids: Arc<HashSet<String>>,
}

/// Parse `MODERATOR_USER_IDS` ("123, 456") into a set of user IDs.
pub fn parse_moderator_ids(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

/// The core identity of whoever invoked the command.
pub fn caller(ctx: Context<'_>) -> Account {
    let user_id = ctx.author().id.to_string();
    if ctx.data().moderator_ids.contains(&user_id) {
        Account::moderator(user_id)
    } else {
        Account::user(user_id)
    }
}

/// Identity for commands gated by `MANAGE_MESSAGES`: poise has already
/// checked the permission before the command body runs.
pub fn moderator_caller(ctx: Context<'_>) -> Account {
    Account::moderator(ctx.author().id.to_string())
}

pub async fn say_ephemeral(ctx: Context<'_>, text: impl Into<String>) -> Result<(), Error> {
    ctx.send(
        poise::CreateReply::default()
            .content(text.into())
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Tell the user why their request was refused. Storage failures are real
/// errors and propagate to poise's error handler instead.
pub async fn report(ctx: Context<'_>, err: ModerationError) -> Result<(), Error> {
    match err {
        ModerationError::StorageError(e) => Err(e.into()),
        other => {
            tracing::debug!(user_id = %ctx.author().id, "Refused: {}", other);
            say_ephemeral(ctx, format!("❌ {}", other)).await
        }
    }
}
