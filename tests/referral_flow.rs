//! End-to-end referral bookkeeping through the public API: start arguments
//! go through `register_referral` into a file-backed store, which is then
//! reloaded from disk.

use anyhow::Result;
use referral_bot::address::is_valid_address;
use referral_bot::referral::{referral_link, register_referral};
use referral_bot::storage::{JsonFileStore, ReferralStorage};
use std::path::Path;

async fn open(path: &Path) -> Result<JsonFileStore> {
    Ok(JsonFileStore::load(path).await?)
}

#[tokio::test]
async fn test_second_start_with_other_code_keeps_first_referrer() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = open(&dir.path().join("referrals.json")).await?;

    let first = register_referral(&store, "500", Some("ref1")).await?;
    let second = register_referral(&store, "500", Some("ref2")).await?;

    assert_eq!(first.as_deref(), Some("1"));
    assert_eq!(second, None);
    assert_eq!(store.referrer_of("500").await.as_deref(), Some("1"));
    Ok(())
}

#[tokio::test]
async fn test_self_referral_creates_no_record() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("referrals.json");
    let store = open(&path).await?;

    assert_eq!(register_referral(&store, "42", Some("ref42")).await?, None);
    assert!(store.snapshot().await.is_empty());
    assert!(!path.exists());
    Ok(())
}

#[tokio::test]
async fn test_start_without_code_is_a_no_op() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = open(&dir.path().join("referrals.json")).await?;

    assert_eq!(register_referral(&store, "9", None).await?, None);
    assert_eq!(register_referral(&store, "9", Some("hello")).await?, None);
    assert_eq!(store.referrer_of("9").await, None);
    Ok(())
}

#[tokio::test]
async fn test_counts_survive_restart() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("referrals.json");

    {
        let store = open(&path).await?;
        for (user, referrer) in [("A", "R1"), ("B", "R1"), ("C", "R2")] {
            let link = referral_link("https://t.me/promo_bot", referrer);
            let code = link.split("?start=").nth(1);
            register_referral(&store, user, code).await?;
        }
    }

    let store = open(&path).await?;
    assert_eq!(store.count_referrals_by("R1").await, 2);
    assert_eq!(store.count_referrals_by("R2").await, 1);
    assert_eq!(store.count_referrals_by("R1x").await, 0);
    Ok(())
}

#[test]
fn test_address_examples() {
    assert!(is_valid_address(
        "0xA3B1c4d5e6f708192a3b4c5d6e7f8091a2b3c4d5"
    ));
    assert!(!is_valid_address("0x123"));
    assert!(!is_valid_address("1234abcd"));
}
