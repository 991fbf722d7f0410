/// Generic embed builders shared across commands.
pub mod embed;
/// Bot-identity checks.
pub mod identity;
/// Fire-and-forget send, delete and direct-message helpers.
pub mod messaging;
/// Pure parser helpers.
pub mod parse;
/// Role and permission checks.
pub mod permissions;
/// Reaction lookups.
pub mod reactions;
