// Post commands for everyone.
//
// Same pattern as every command file:
// 1. Turn the Discord author into a core caller
// 2. Call the moderation service
// 3. Format the result (or the refusal) for Discord

use crate::discord::formatter::{format_post, format_post_list};
use crate::discord::{caller, report, say_ephemeral, Context, Error};

/// Create and manage your posts.
#[poise::command(
    slash_command,
    subcommands("create", "edit", "delete", "appeal", "show", "mine")
)]
pub async fn post(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Publish a new post.
#[poise::command(slash_command)]
pub async fn create(
    ctx: Context<'_>,
    #[description = "Unique ID for the post"] post_id: String,
    #[description = "What you want to say"] content: String,
) -> Result<(), Error> {
    let moderation = &ctx.data().moderation;

    let post = match moderation.create_post(&caller(ctx), &post_id, &content).await {
        Ok(post) => post,
        Err(e) => return report(ctx, e).await,
    };

    let note = if post.flagged {
        format!(
            "🚩 Your post was flagged for review (matched: {}). Use `/post appeal` if you think this is a mistake.",
            moderation.check_content(&post.content).join(", ")
        )
    } else {
        "✅ Post published.".to_string()
    };

    ctx.send(
        poise::CreateReply::default()
            .content(note)
            .embed(format_post(&post)),
    )
    .await?;
    Ok(())
}

/// Replace the text of one of your posts.
#[poise::command(slash_command)]
pub async fn edit(
    ctx: Context<'_>,
    #[description = "ID of your post"] post_id: String,
    #[description = "New text"] content: String,
) -> Result<(), Error> {
    match ctx
        .data()
        .moderation
        .edit_post(&caller(ctx), &post_id, &content)
        .await
    {
        Ok(post) => {
            ctx.send(
                poise::CreateReply::default()
                    .content("✏️ Post updated.")
                    .embed(format_post(&post)),
            )
            .await?;
            Ok(())
        }
        Err(e) => report(ctx, e).await,
    }
}

/// Delete one of your posts.
#[poise::command(slash_command)]
pub async fn delete(
    ctx: Context<'_>,
    #[description = "ID of your post"] post_id: String,
) -> Result<(), Error> {
    match ctx
        .data()
        .moderation
        .delete_post(&caller(ctx), &post_id)
        .await
    {
        Ok(()) => say_ephemeral(ctx, format!("🗑️ Post `{}` deleted.", post_id)).await,
        Err(e) => report(ctx, e).await,
    }
}

/// Ask a moderator to re-review one of your flagged posts.
#[poise::command(slash_command)]
pub async fn appeal(
    ctx: Context<'_>,
    #[description = "ID of your flagged post"] post_id: String,
) -> Result<(), Error> {
    match ctx
        .data()
        .moderation
        .appeal_post(&caller(ctx), &post_id)
        .await
    {
        Ok(_) => {
            say_ephemeral(ctx, format!("📨 Appeal submitted for post `{}`.", post_id)).await
        }
        Err(e) => report(ctx, e).await,
    }
}

/// Show a single post.
#[poise::command(slash_command)]
pub async fn show(
    ctx: Context<'_>,
    #[description = "Post ID"] post_id: String,
) -> Result<(), Error> {
    match ctx.data().moderation.get_post(&post_id).await {
        Ok(Some(post)) => {
            ctx.send(poise::CreateReply::default().embed(format_post(&post)))
                .await?;
            Ok(())
        }
        Ok(None) => say_ephemeral(ctx, format!("❌ Post `{}` not found", post_id)).await,
        Err(e) => report(ctx, e).await,
    }
}

/// List your own posts.
#[poise::command(slash_command)]
pub async fn mine(ctx: Context<'_>) -> Result<(), Error> {
    let user_id = ctx.author().id.to_string();
    match ctx.data().moderation.list_own_posts(&user_id).await {
        Ok(posts) => {
            ctx.send(
                poise::CreateReply::default()
                    .embed(format_post_list("📝 Your Posts", &posts))
                    .ephemeral(true),
            )
            .await?;
            Ok(())
        }
        Err(e) => report(ctx, e).await,
    }
}
