//! Referral codes and invitation links.
//!
//! A referral code is the `/start` deep-link payload `ref<user_id>`. The same
//! prefix is used when parsing and when building links.

use crate::storage::{ReferralStorage, StorageError};
use tracing::info;

/// Literal prefix of every referral code.
pub const REFERRAL_PREFIX: &str = "ref";

/// Extract the referrer id from a `/start` argument.
///
/// Only the first whitespace-separated token of the argument is considered.
/// Returns `None` when the argument is missing, does not carry the referral
/// prefix, has nothing after it, or names the user themself. The id is not
/// checked against known users.
#[must_use]
pub fn parse_referral_code(start_arg: Option<&str>, user_id: &str) -> Option<String> {
    let referrer = start_arg?
        .split_whitespace()
        .next()?
        .strip_prefix(REFERRAL_PREFIX)?;
    if referrer.is_empty() || referrer == user_id {
        return None;
    }
    Some(referrer.to_string())
}

/// Build the personal invitation link for `user_id`.
///
/// # Examples
///
/// ```
/// use referral_bot::referral::referral_link;
///
/// assert_eq!(
///     referral_link("https://t.me/some_bot", "42"),
///     "https://t.me/some_bot?start=ref42"
/// );
/// ```
#[must_use]
pub fn referral_link(bot_url: &str, user_id: &str) -> String {
    format!(
        "{}?start={REFERRAL_PREFIX}{user_id}",
        bot_url.trim_end_matches('/')
    )
}

/// Record the referrer carried by `start_arg`, if any.
///
/// Returns the referrer id only when a new record was created, which is the
/// signal to notify the administrator.
///
/// # Errors
///
/// Returns an error if the new record cannot be persisted.
pub async fn register_referral(
    store: &dyn ReferralStorage,
    user_id: &str,
    start_arg: Option<&str>,
) -> Result<Option<String>, StorageError> {
    let Some(referrer_id) = parse_referral_code(start_arg, user_id) else {
        return Ok(None);
    };

    if store.record(user_id, &referrer_id).await? {
        info!("User {user_id} was referred by {referrer_id}");
        Ok(Some(referrer_id))
    } else {
        Ok(None)
    }
}
