use std::error::Error;

use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder};

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x90_54_30;

/// Color of the panel sent when a command fails.
pub const ERROR_EMBED_COLOR: u32 = 0xB9_00_00;

pub const ERROR_EMBED_TITLE: &str = "Error ._.";

/// Body used when an error renders to an empty string.
pub const ERROR_FALLBACK_MESSAGE: &str = "The error has no message .__.";

const FIELD_NAME_LIMIT: usize = 256;
const FIELD_VALUE_LIMIT: usize = 1024;

/// Build a titled, described embed with the given color.
pub fn construct_embed(
    title: &str,
    description: impl Into<String>,
    color: u32,
) -> anyhow::Result<Embed> {
    let embed = EmbedBuilder::new()
        .title(title)
        .description(description)
        .color(color)
        .validate()?
        .build();

    Ok(embed)
}

/// [`construct_embed`] in the bot's default color.
pub fn construct_default_embed(
    title: &str,
    description: impl Into<String>,
) -> anyhow::Result<Embed> {
    construct_embed(title, description, DEFAULT_EMBED_COLOR)
}

/// Build the error panel for an error value.
///
/// The field is named after the error's type and carries its display text.
pub fn error_embed<E>(error: &E) -> anyhow::Result<Embed>
where
    E: Error + ?Sized,
{
    let message = error.to_string();
    error_embed_parts(simple_type_name(std::any::type_name::<E>()), Some(&message))
}

/// Build the error panel from an error kind and an optional message.
///
/// A missing or blank message is replaced with [`ERROR_FALLBACK_MESSAGE`].
pub fn error_embed_parts(kind: &str, message: Option<&str>) -> anyhow::Result<Embed> {
    let message = message
        .filter(|text| !text.trim().is_empty())
        .unwrap_or(ERROR_FALLBACK_MESSAGE);

    let kind = if kind.trim().is_empty() { "Error" } else { kind };

    let field = EmbedFieldBuilder::new(
        truncate_chars(kind, FIELD_NAME_LIMIT),
        truncate_chars(message, FIELD_VALUE_LIMIT),
    )
    .build();

    let embed = EmbedBuilder::new()
        .title(ERROR_EMBED_TITLE)
        .field(field)
        .color(ERROR_EMBED_COLOR)
        .validate()?
        .build();

    Ok(embed)
}

/// Reduce a full type path like `std::io::error::Error` or
/// `foo::Wrapper<bar::Inner>` to its last segment (`Error`, `Wrapper`).
///
/// For trait objects only the principal trait counts, so
/// `dyn Error + Send + Sync` reports `Error`.
pub fn simple_type_name(full: &str) -> &str {
    let without_generics = full.split('<').next().unwrap_or(full).trim();
    let without_dyn = without_generics
        .strip_prefix("dyn ")
        .unwrap_or(without_generics);
    let principal = without_dyn.split(" + ").next().unwrap_or(without_dyn).trim();

    principal.rsplit("::").next().unwrap_or(principal)
}

fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((cut, _)) => value[..cut].to_owned(),
        None => value.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::*;

    #[derive(Debug)]
    struct Boom(&'static str);

    impl fmt::Display for Boom {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    impl Error for Boom {}

    #[test]
    fn error_embed_uses_message_and_type_name() {
        let embed = error_embed(&Boom("boom")).unwrap();

        assert_eq!(embed.title.as_deref(), Some(ERROR_EMBED_TITLE));
        assert_eq!(embed.color, Some(ERROR_EMBED_COLOR));
        assert_eq!(embed.fields.len(), 1);
        assert_eq!(embed.fields[0].name, "Boom");
        assert_eq!(embed.fields[0].value, "boom");
        assert!(!embed.fields[0].inline);
    }

    #[test]
    fn error_embed_falls_back_when_message_is_empty() {
        let embed = error_embed(&Boom("")).unwrap();

        assert_eq!(embed.fields[0].value, ERROR_FALLBACK_MESSAGE);
    }

    #[test]
    fn error_embed_parts_without_message_uses_fallback() {
        let embed = error_embed_parts("IOException", None).unwrap();

        assert_eq!(embed.fields[0].name, "IOException");
        assert_eq!(embed.fields[0].value, ERROR_FALLBACK_MESSAGE);
    }

    #[test]
    fn oversized_error_message_is_truncated() {
        let long = "x".repeat(5000);
        let embed = error_embed_parts("Overflow", Some(&long)).unwrap();

        assert_eq!(embed.fields[0].value.chars().count(), FIELD_VALUE_LIMIT);
    }

    #[test]
    fn simple_type_name_strips_path_and_generics() {
        assert_eq!(simple_type_name("std::io::error::Error"), "Error");
        assert_eq!(simple_type_name("foo::Wrapper<bar::Inner>"), "Wrapper");
        assert_eq!(simple_type_name("dyn core::error::Error"), "Error");
        assert_eq!(simple_type_name("Plain"), "Plain");
        assert_eq!(
            simple_type_name("dyn core::error::Error + core::marker::Send + core::marker::Sync"),
            "Error"
        );
    }

    #[test]
    fn boxed_send_sync_error_reports_principal_type() {
        let boxed: Box<dyn Error + Send + Sync> = Box::new(Boom("boom"));
        let embed = error_embed(boxed.as_ref()).unwrap();

        assert_eq!(embed.fields[0].name, "Error");
        assert_eq!(embed.fields[0].value, "boom");
    }

    #[test]
    fn anyhow_error_reports_principal_type() {
        let error = anyhow::anyhow!("went sideways");
        let source: &(dyn Error + Send + Sync + 'static) = error.as_ref();
        let embed = error_embed(source).unwrap();

        assert_eq!(embed.fields[0].name, "Error");
        assert_eq!(embed.fields[0].value, "went sideways");
    }

    #[test]
    fn default_embed_uses_default_color() {
        let embed = construct_default_embed("Hello", "World").unwrap();

        assert_eq!(embed.color, Some(DEFAULT_EMBED_COLOR));
        assert_eq!(embed.title.as_deref(), Some("Hello"));
    }

    #[test]
    fn construct_embed_sets_title_description_and_color() {
        let embed = construct_embed("Hello", "World", 0x12_34_56).unwrap();

        assert_eq!(embed.title.as_deref(), Some("Hello"));
        assert_eq!(embed.description.as_deref(), Some("World"));
        assert_eq!(embed.color, Some(0x12_34_56));
    }
}
