// Moderator review commands. Gated by MANAGE_MESSAGES, like the old anti-spam
// commands were.

use crate::discord::formatter::{format_appeals, format_post, format_post_list};
use crate::discord::{moderator_caller, report, say_ephemeral, Context, Error};

/// Review posts and appeals.
#[poise::command(
    slash_command,
    subcommands("all", "flagged", "appeals", "approve", "reject"),
    required_permissions = "MANAGE_MESSAGES",
    guild_only
)]
pub async fn moderate(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// List every post.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn all(ctx: Context<'_>) -> Result<(), Error> {
    match ctx.data().moderation.list_all_posts().await {
        Ok(posts) => {
            ctx.send(
                poise::CreateReply::default()
                    .embed(format_post_list("📚 All Posts", &posts))
                    .ephemeral(true),
            )
            .await?;
            Ok(())
        }
        Err(e) => report(ctx, e).await,
    }
}

/// List posts waiting for review.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn flagged(ctx: Context<'_>) -> Result<(), Error> {
    match ctx.data().moderation.list_flagged_posts().await {
        Ok(posts) => {
            ctx.send(
                poise::CreateReply::default()
                    .embed(format_post_list("🚩 Flagged Posts", &posts))
                    .ephemeral(true),
            )
            .await?;
            Ok(())
        }
        Err(e) => report(ctx, e).await,
    }
}

/// List pending appeals, grouped by user.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn appeals(ctx: Context<'_>) -> Result<(), Error> {
    match ctx.data().moderation.list_appeals().await {
        Ok(grouped) => {
            ctx.send(
                poise::CreateReply::default()
                    .embed(format_appeals(&grouped))
                    .ephemeral(true),
            )
            .await?;
            Ok(())
        }
        Err(e) => report(ctx, e).await,
    }
}

/// Approve a flagged post and clear its flag.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn approve(
    ctx: Context<'_>,
    #[description = "ID of the flagged post"] post_id: String,
) -> Result<(), Error> {
    match ctx
        .data()
        .moderation
        .approve_post(&moderator_caller(ctx), &post_id)
        .await
    {
        Ok(post) => {
            ctx.send(
                poise::CreateReply::default()
                    .content("✅ Post approved.")
                    .embed(format_post(&post))
                    .ephemeral(true),
            )
            .await?;
            Ok(())
        }
        Err(e) => report(ctx, e).await,
    }
}

/// Reject a post and delete it.
#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_MESSAGES")]
pub async fn reject(
    ctx: Context<'_>,
    #[description = "ID of the post to reject"] post_id: String,
) -> Result<(), Error> {
    match ctx
        .data()
        .moderation
        .reject_post(&moderator_caller(ctx), &post_id)
        .await
    {
        Ok(()) => say_ephemeral(ctx, format!("🗑️ Post `{}` rejected and deleted.", post_id)).await,
        Err(e) => report(ctx, e).await,
    }
}
