use crate::core::moderation::{AppealsByUser, Post};
use poise::serenity_prelude::{self as serenity, CreateEmbed, CreateEmbedFooter};

// Discord embed limits.
const MAX_FIELDS: usize = 25;
const MAX_FIELD_VALUE: usize = 1024;

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

fn status_color(post: &Post) -> serenity::Color {
    if post.flagged {
        serenity::Color::from_rgb(255, 0, 0) // Red
    } else {
        serenity::Color::from_rgb(0, 255, 0) // Green
    }
}

fn status_label(post: &Post) -> &'static str {
    if post.flagged {
        "🚩 Flagged"
    } else {
        "✅ Safe"
    }
}

pub fn format_post(post: &Post) -> CreateEmbed {
    let mut embed = CreateEmbed::default()
        .title(format!("Post `{}`", post.post_id))
        .description(truncate(&post.content, 4000))
        .color(status_color(post))
        .field("Author", format!("<@{}>", post.owner_id), true)
        .field("Status", status_label(post), true);

    if let Ok(created) = serenity::Timestamp::from_unix_timestamp(post.created_at.timestamp()) {
        embed = embed.timestamp(created);
    }
    if let Some(edited_at) = post.edited_at {
        embed = embed.footer(CreateEmbedFooter::new(format!(
            "Edited {}",
            edited_at.format("%Y-%m-%d %H:%M UTC")
        )));
    }
    embed
}

/// One field per post. Anything past Discord's field limit is summarized
/// in the footer.
pub fn format_post_list(title: &str, posts: &[Post]) -> CreateEmbed {
    let mut embed = CreateEmbed::default()
        .title(title)
        .color(serenity::Color::BLUE);

    if posts.is_empty() {
        return embed.description("No posts.");
    }

    for post in posts.iter().take(MAX_FIELDS) {
        embed = embed.field(
            format!("{} `{}`", status_label(post), post.post_id),
            format!(
                "by <@{}>\n{}",
                post.owner_id,
                truncate(&post.content, MAX_FIELD_VALUE - 32)
            ),
            false,
        );
    }

    if posts.len() > MAX_FIELDS {
        embed = embed.footer(CreateEmbedFooter::new(format!(
            "Showing {} of {} posts",
            MAX_FIELDS,
            posts.len()
        )));
    }
    embed
}

pub fn format_appeals(appeals: &AppealsByUser) -> CreateEmbed {
    let mut embed = CreateEmbed::default()
        .title("📨 Pending Appeals")
        .color(serenity::Color::from_rgb(255, 165, 0)); // Orange

    if appeals.is_empty() {
        return embed.description("No pending appeals.");
    }

    for (user_id, user_appeals) in appeals.iter().take(MAX_FIELDS) {
        let lines: Vec<String> = user_appeals
            .iter()
            .map(|appeal| {
                format!(
                    "`{}` since {}",
                    appeal.post_id,
                    appeal.submitted_at.format("%Y-%m-%d %H:%M UTC")
                )
            })
            .collect();
        embed = embed.field(
            format!("User {}", user_id),
            truncate(&lines.join("\n"), MAX_FIELD_VALUE),
            false,
        );
    }
    embed
}

pub fn format_word_list(words: &[String]) -> String {
    if words.is_empty() {
        return "No forbidden words configured.".to_string();
    }
    let listed: Vec<String> = words.iter().map(|w| format!("`{}`", w)).collect();
    truncate(
        &format!("🚫 {} forbidden words: {}", words.len(), listed.join(", ")),
        1900,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
        assert_eq!(truncate("ééééé", 4), "é...");
    }

    #[test]
    fn test_format_word_list() {
        assert_eq!(format_word_list(&[]), "No forbidden words configured.");
        assert_eq!(
            format_word_list(&["cat".to_string(), "dog".to_string()]),
            "🚫 2 forbidden words: `cat`, `dog`"
        );
    }
}
