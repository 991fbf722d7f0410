use twilight_model::{
    id::{Id, marker::UserMarker},
    user::User,
};

use crate::parse::parse_target_user_id;

/// Whether `user` is the account this bot runs on.
pub fn is_this_user_this_bot(bot_id: Id<UserMarker>, user: &User) -> bool {
    user.id == bot_id
}

pub fn is_this_id_this_bot(bot_id: Id<UserMarker>, user_id: u64) -> bool {
    bot_id.get() == user_id
}

/// Whether a raw argument (`<@id>`, `<@!id>` or a plain id) names the bot.
pub fn is_bot_mention(bot_id: Id<UserMarker>, raw: &str) -> bool {
    parse_target_user_id(raw).is_some_and(|user_id| user_id == bot_id)
}
