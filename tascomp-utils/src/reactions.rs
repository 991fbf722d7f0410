use twilight_model::channel::{
    Message,
    message::{EmojiReactionType, Reaction},
};

/// Render a reaction emoji the way it is written in message content:
/// the glyph itself for unicode emoji, `<:name:id>` or `<a:name:id>` for
/// custom ones.
pub fn format_emoji(emoji: &EmojiReactionType) -> String {
    match emoji {
        EmojiReactionType::Unicode { name } => name.clone(),
        EmojiReactionType::Custom { animated, id, name } => {
            let prefix = if *animated { "a" } else { "" };
            format!("<{prefix}:{}:{}>", name.as_deref().unwrap_or_default(), id.get())
        }
    }
}

/// Whether the bot placed the reaction matching `emote`.
///
/// Only the first reaction with a matching glyph is considered; a glyph that
/// is present but not placed by the bot yields `false`.
pub fn has_bot_reacted_with(reactions: &[Reaction], emote: &str) -> bool {
    reactions
        .iter()
        .find(|reaction| format_emoji(&reaction.emoji) == emote)
        .is_some_and(|reaction| reaction.me)
}

pub fn message_has_bot_reaction(message: &Message, emote: &str) -> bool {
    has_bot_reacted_with(&message.reactions, emote)
}
