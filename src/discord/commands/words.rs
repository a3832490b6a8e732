// Forbidden-word dictionary commands.

use crate::discord::commands::presence;
use crate::discord::formatter::format_word_list;
use crate::discord::{moderator_caller, report, say_ephemeral, Context, Error};

/// Manage the forbidden-word list.
#[poise::command(slash_command, subcommands("add", "remove", "list", "check"))]
pub async fn words(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

fn refresh_presence(ctx: Context<'_>) {
    let count = ctx.data().moderation.forbidden_word_count();
    presence::show_watch_status(ctx.serenity_context(), count);
}

/// Add a forbidden word.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn add(
    ctx: Context<'_>,
    #[description = "Word to forbid"] word: String,
) -> Result<(), Error> {
    match ctx
        .data()
        .moderation
        .add_forbidden_word(&moderator_caller(ctx), &word)
    {
        Ok(true) => {
            refresh_presence(ctx);
            say_ephemeral(ctx, format!("🚫 Forbidden word added: `{}`", word.trim())).await
        }
        Ok(false) => {
            say_ephemeral(ctx, format!("`{}` is already forbidden.", word.trim())).await
        }
        Err(e) => report(ctx, e).await,
    }
}

/// Remove a forbidden word.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "Word to allow again"] word: String,
) -> Result<(), Error> {
    match ctx
        .data()
        .moderation
        .remove_forbidden_word(&moderator_caller(ctx), &word)
    {
        Ok(_) => {
            refresh_presence(ctx);
            say_ephemeral(ctx, format!("✅ Forbidden word removed: `{}`", word.trim())).await
        }
        Err(e) => report(ctx, e).await,
    }
}

/// Show every forbidden word.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    let words = ctx.data().moderation.list_forbidden_words();
    say_ephemeral(ctx, format_word_list(&words)).await
}

/// Check whether some text would be flagged, without posting it.
#[poise::command(slash_command)]
pub async fn check(
    ctx: Context<'_>,
    #[description = "Text to check"] text: String,
) -> Result<(), Error> {
    let matches = ctx.data().moderation.check_content(&text);
    let reply = if matches.is_empty() {
        "✅ That text would not be flagged.".to_string()
    } else {
        format!("🚩 That text would be flagged for: {}", matches.join(", "))
    };
    say_ephemeral(ctx, reply).await
}
