//! Inline menu actions
//!
//! Keyboards and callback handlers share `MenuAction`, so the payload written
//! into a button and the payload matched on a press come from one place.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Action behind an inline menu button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Resend the token info artwork
    Info,
    /// Explain how to claim the reward
    GetReward,
    /// Send the personal referral link
    Refer,
}

impl MenuAction {
    /// Every action, in keyboard order.
    pub const ALL: [Self; 3] = [Self::Info, Self::GetReward, Self::Refer];

    /// Resolve callback data into an action. Unknown payloads yield `None`.
    #[must_use]
    pub fn from_callback_data(data: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.callback_data() == data)
    }

    /// Callback data carried by the button
    #[must_use]
    pub const fn callback_data(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::GetReward => "get_reward",
            Self::Refer => "refer",
        }
    }

    /// Button label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::GetReward => "🎁 Claim Reward",
            Self::Refer => "🔗 Refer Friends",
        }
    }
}

/// Create the main inline menu: one row with every action.
///
/// # Examples
///
/// ```
/// use referral_bot::bot::menu::get_main_menu;
/// let keyboard = get_main_menu();
/// assert_eq!(keyboard.inline_keyboard[0].len(), 3);
/// ```
#[must_use]
pub fn get_main_menu() -> InlineKeyboardMarkup {
    let row = MenuAction::ALL
        .into_iter()
        .map(|action| InlineKeyboardButton::callback(action.label(), action.callback_data()))
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(vec![row])
}
