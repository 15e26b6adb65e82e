use crate::bot;
use crate::bot::handlers::Command;
use crate::config::Settings;
use crate::storage::{JsonFileStore, ReferralStorage, StorageError};
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, Me};
use tracing::{error, info};

/// Run the Telegram transport runtime.
///
/// # Errors
///
/// Returns an error if the referral file cannot be loaded.
pub async fn run_bot(settings: Arc<Settings>) -> Result<(), StorageError> {
    let storage = init_storage(&settings).await?;

    let bot = Bot::new(settings.telegram_token.clone());
    let handler = setup_handler();

    info!(
        "Bot is running (admin chat {}, referrals in {}).",
        settings.admin_chat_id, settings.referrals_file
    );

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![storage, settings])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn init_storage(settings: &Settings) -> Result<Arc<dyn ReferralStorage>, StorageError> {
    match JsonFileStore::load(&settings.referrals_file).await {
        Ok(store) => {
            info!("Referral storage initialized.");
            Ok(Arc::new(store))
        }
        Err(e) => {
            error!(
                "Failed to load referral storage from {}: {}",
                settings.referrals_file, e
            );
            Err(e)
        }
    }
}

fn setup_handler() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handle_menu_callback))
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_command),
                )
                .branch(
                    // Free text that is not a command is a wallet submission
                    dptree::filter(|msg: Message| {
                        msg.text().is_some_and(bot::handlers::is_wallet_candidate)
                    })
                    .endpoint(handle_wallet_text),
                ),
        )
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    storage: Arc<dyn ReferralStorage>,
    settings: Arc<Settings>,
) -> Result<(), teloxide::RequestError> {
    let res = match cmd {
        Command::Start(arg) => bot::handlers::start(bot, msg, arg, storage, settings).await,
        Command::Myrefs => bot::handlers::myrefs(bot, msg, storage).await,
    };
    if let Err(e) = res {
        error!("Command error: {}", e);
    }
    respond(())
}

async fn handle_wallet_text(
    bot: Bot,
    msg: Message,
    storage: Arc<dyn ReferralStorage>,
    settings: Arc<Settings>,
) -> Result<(), teloxide::RequestError> {
    if let Err(e) = bot::handlers::handle_wallet_text(bot, msg, storage, settings).await {
        error!("Wallet text handler error: {}", e);
    }
    respond(())
}

async fn handle_menu_callback(
    bot: Bot,
    q: CallbackQuery,
    settings: Arc<Settings>,
    me: Me,
) -> Result<(), teloxide::RequestError> {
    if let Err(e) = bot::handlers::handle_menu_callback(bot, q, settings, me).await {
        error!("Menu callback handler error: {}", e);
    }
    respond(())
}
