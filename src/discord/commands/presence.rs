// This module handles bot presence and lifecycle events.
//
// Discord-layer glue only: we work with Discord SDK types (Context,
// ActivityData, OnlineStatus) and keep the logic short.

use poise::serenity_prelude as serenity;

/// Show how many forbidden words the bot is watching for.
pub fn show_watch_status(ctx: &serenity::Context, word_count: usize) {
    let activity = serenity::ActivityData::watching(format!(
        "for {} forbidden word{}",
        word_count,
        if word_count == 1 { "" } else { "s" }
    ));
    ctx.set_presence(Some(activity), serenity::OnlineStatus::Online);
}

/// Called once the bot is ready so we announce a default presence message
/// without repeating the setup code at every call site.
pub fn on_ready(ctx: &serenity::Context, word_count: usize) {
    show_watch_status(ctx, word_count);
}
