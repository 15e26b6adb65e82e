#![deny(missing_docs)]
//! Referral campaign bot
//!
//! A Telegram bot that onboards users of a token campaign, tracks who invited
//! whom, and forwards submitted wallet addresses to an administrator.

/// Wallet address validation
pub mod address;
/// Telegram bot implementation
pub mod bot;
/// Configuration management
pub mod config;
/// Referral codes and links
pub mod referral;
/// Telegram runtime entrypoint
pub mod runner;
/// Storage layer (JSON file)
pub mod storage;
