use crate::address::is_valid_address;
use crate::bot::menu::{get_main_menu, MenuAction};
use crate::bot::messaging::send_photo_if_present;
use crate::bot::views::{CampaignView, DefaultCampaignView, Participant};
use crate::config::Settings;
use crate::referral::{referral_link, register_referral};
use crate::storage::ReferralStorage;
use anyhow::{anyhow, Result};
use std::path::Path;
use std::sync::Arc;
use teloxide::{
    prelude::*,
    types::{CallbackQuery, ChatId, Me, ParseMode},
    utils::command::BotCommands,
};
use tracing::{debug, info};

/// Supported commands for the bot
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    /// Start the bot, optionally with a referral code
    #[command(description = "Start the bot.")]
    Start(String),
    /// Show how many users the caller has referred
    #[command(description = "Show your referral count.")]
    Myrefs,
}

fn sender(msg: &Message) -> Result<Participant> {
    msg.from
        .as_ref()
        .map(Participant::from)
        .ok_or_else(|| anyhow!("Message without sender in chat {}", msg.chat.id))
}

/// Entry URL of the bot: the configured override or its t.me page.
#[must_use]
pub fn bot_entry_url(settings: &Settings, me: &Me) -> String {
    settings
        .bot_url
        .clone()
        .unwrap_or_else(|| format!("https://t.me/{}", me.username()))
}

/// Start handler
///
/// Records a new referral when the start argument carries one, then sends the
/// onboarding sequence.
///
/// # Errors
///
/// Returns an error if the referral cannot be persisted or a message cannot be sent.
pub async fn start(
    bot: Bot,
    msg: Message,
    start_arg: String,
    storage: Arc<dyn ReferralStorage>,
    settings: Arc<Settings>,
) -> Result<()> {
    let user = sender(&msg)?;
    info!(
        "User {} ({}) initiated /start command.",
        user.id, user.full_name
    );

    let start_arg = Some(start_arg.as_str()).filter(|arg| !arg.trim().is_empty());
    if let Some(referrer_id) = register_referral(storage.as_ref(), &user.id, start_arg).await? {
        bot.send_message(
            ChatId(settings.admin_chat_id),
            DefaultCampaignView::referral_notice(&user, &referrer_id),
        )
        .await?;
    }

    send_onboarding(&bot, msg.chat.id, &settings).await
}

async fn send_onboarding(bot: &Bot, chat_id: ChatId, settings: &Settings) -> Result<()> {
    send_photo_if_present(
        bot,
        chat_id,
        Path::new(&settings.start_image),
        DefaultCampaignView::welcome_caption(),
    )
    .await?;

    send_photo_if_present(
        bot,
        chat_id,
        Path::new(&settings.info_image),
        DefaultCampaignView::onboarding_info_caption(),
    )
    .await?;

    bot.send_message(chat_id, DefaultCampaignView::add_token_instructions())
        .parse_mode(ParseMode::Html)
        .await?;

    bot.send_message(chat_id, DefaultCampaignView::menu_prompt())
        .reply_markup(get_main_menu())
        .await?;

    Ok(())
}

/// Referral count handler
///
/// # Errors
///
/// Returns an error if the reply cannot be sent.
pub async fn myrefs(bot: Bot, msg: Message, storage: Arc<dyn ReferralStorage>) -> Result<()> {
    let user = sender(&msg)?;
    let count = storage.count_referrals_by(&user.id).await;
    info!("User {} has referred {count} user(s).", user.id);

    bot.send_message(msg.chat.id, DefaultCampaignView::referral_count(count))
        .await?;
    Ok(())
}

/// Whether a text message should be treated as a wallet submission.
///
/// Anything starting with `/` is a command, known or not, and is never an
/// address.
#[must_use]
pub fn is_wallet_candidate(text: &str) -> bool {
    !text.starts_with('/')
}

/// What to answer to a wallet submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletReplies {
    /// Reply to the sender
    pub reply: &'static str,
    /// Notice for the administrator, only for accepted addresses
    pub admin_notice: Option<String>,
}

/// Trim and validate a submitted address and build the replies.
///
/// A rejected address produces only the rejection notice; the referrer is
/// looked up only for accepted ones.
pub async fn wallet_replies(
    storage: &dyn ReferralStorage,
    user: &Participant,
    text: &str,
) -> WalletReplies {
    let address = text.trim();

    if !is_valid_address(address) {
        debug!("User {} sent an invalid address.", user.id);
        return WalletReplies {
            reply: DefaultCampaignView::invalid_address(),
            admin_notice: None,
        };
    }

    info!("User {} submitted wallet address {address}.", user.id);
    let referrer_id = storage.referrer_of(&user.id).await;
    WalletReplies {
        reply: DefaultCampaignView::address_received(),
        admin_notice: Some(DefaultCampaignView::wallet_notice(
            user,
            address,
            referrer_id.as_deref(),
        )),
    }
}

/// Free text handler: treats the message as a wallet address submission.
///
/// # Errors
///
/// Returns an error if a reply or the administrator notice cannot be sent.
pub async fn handle_wallet_text(
    bot: Bot,
    msg: Message,
    storage: Arc<dyn ReferralStorage>,
    settings: Arc<Settings>,
) -> Result<()> {
    let user = sender(&msg)?;
    let replies = wallet_replies(storage.as_ref(), &user, msg.text().unwrap_or_default()).await;

    bot.send_message(msg.chat.id, replies.reply)
        .parse_mode(ParseMode::Html)
        .await?;

    if let Some(notice) = replies.admin_notice {
        bot.send_message(ChatId(settings.admin_chat_id), notice)
            .await?;
    }

    Ok(())
}

/// Handle inline menu callbacks.
///
/// # Errors
///
/// Returns an error if Telegram API calls fail.
pub async fn handle_menu_callback(
    bot: Bot,
    q: CallbackQuery,
    settings: Arc<Settings>,
    me: Me,
) -> Result<()> {
    let _ = bot.answer_callback_query(q.id.clone()).await;

    let Some(action) = q.data.as_deref().and_then(MenuAction::from_callback_data) else {
        debug!("Ignoring unknown callback payload {:?}", q.data);
        return Ok(());
    };

    let chat_id = q
        .message
        .as_ref()
        .map(|msg| msg.chat().id)
        .ok_or_else(|| anyhow!("Callback message missing chat id"))?;

    match action {
        MenuAction::Info => {
            send_photo_if_present(
                &bot,
                chat_id,
                Path::new(&settings.info_image),
                DefaultCampaignView::info_caption(),
            )
            .await?;
        }
        MenuAction::GetReward => {
            bot.send_message(chat_id, DefaultCampaignView::reward_instructions())
                .parse_mode(ParseMode::Html)
                .await?;
        }
        MenuAction::Refer => {
            let user_id = q.from.id.0.to_string();
            let link = referral_link(&bot_entry_url(&settings, &me), &user_id);
            info!("Sending referral link to user {user_id}.");
            bot.send_message(chat_id, DefaultCampaignView::referral_link_message(&link))
                .await?;
        }
    }

    Ok(())
}
