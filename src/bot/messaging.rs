//! Common messaging utilities for Telegram bot.

use anyhow::Result;
use std::path::Path;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile, ParseMode};
use tracing::debug;

/// Send a local image with an HTML caption, skipping it if the file is absent.
///
/// Campaign artwork is optional: a missing file is not an error.
///
/// # Returns
///
/// `true` if the photo was sent, `false` if it was skipped.
///
/// # Errors
///
/// Returns an error if the file check or the Telegram request fails.
pub async fn send_photo_if_present(
    bot: &Bot,
    chat_id: ChatId,
    path: &Path,
    caption: impl Into<String>,
) -> Result<bool> {
    if !tokio::fs::try_exists(path).await? {
        debug!("Artwork {} is missing, skipping photo.", path.display());
        return Ok(false);
    }

    bot.send_photo(chat_id, InputFile::file(path))
        .caption(caption)
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(true)
}
