//! Campaign UI texts
//!
//! Captions, replies and administrator notices. Texts that use markup are
//! written for `ParseMode::Html`; notices and plain replies are sent as-is.

use teloxide::types::User;

/// Token contract shown in every instruction block
pub const TOKEN_CONTRACT: &str = "0xb5e9541143c137b19286990223c0a140137c5f18";

/// Placeholder used when a user has no public username
pub const NO_USERNAME: &str = "No username";
/// Placeholder used when a wallet sender was not referred by anyone
pub const NO_REFERRER: &str = "No referrer";

/// The parts of a Telegram user that end up in notices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Numeric user id, as stored in the referral file
    pub id: String,
    /// First and last name
    pub full_name: String,
    /// Public username without the `@`
    pub username: Option<String>,
}

impl Participant {
    /// `@username`, or the placeholder when the user has none
    #[must_use]
    pub fn username_or_placeholder(&self) -> String {
        self.username
            .as_deref()
            .map_or_else(|| NO_USERNAME.to_string(), |name| format!("@{name}"))
    }
}

impl From<&User> for Participant {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0.to_string(),
            full_name: user.full_name(),
            username: user.username.clone(),
        }
    }
}

/// Trait for campaign view rendering
pub trait CampaignView {
    /// Caption of the start artwork
    fn welcome_caption() -> &'static str;

    /// Caption of the info artwork sent during onboarding
    fn onboarding_info_caption() -> String;

    /// Caption of the info artwork sent from the menu
    fn info_caption() -> String;

    /// How to add the token to a wallet
    fn add_token_instructions() -> String;

    /// Prompt shown above the inline menu
    fn menu_prompt() -> &'static str;

    /// Reward-claim instructions asking for a wallet address
    fn reward_instructions() -> String;

    /// Message carrying the personal referral link
    fn referral_link_message(link: &str) -> String;

    /// Reply to a malformed wallet address
    fn invalid_address() -> &'static str;

    /// Reply to an accepted wallet address
    fn address_received() -> &'static str;

    /// Reply to `/myrefs`
    fn referral_count(count: usize) -> String;

    /// Administrator notice about a new referral
    fn referral_notice(user: &Participant, referrer_id: &str) -> String;

    /// Administrator notice about a submitted wallet address
    fn wallet_notice(user: &Participant, address: &str, referrer_id: Option<&str>) -> String;
}

/// Default English implementation of `CampaignView`
pub struct DefaultCampaignView;

fn token_card(network: &str) -> String {
    format!(
        "🪙 Name: HESCO Token\n💠 Symbol: HESCO\n🔗 Network: {network}\n\
         🧾 Contract: <code>{TOKEN_CONTRACT}</code>"
    )
}

impl CampaignView for DefaultCampaignView {
    fn welcome_caption() -> &'static str {
        "🎉 Earn Rewards with HESCO Tokens! 🎉\n\n\
         Start your journey now! Register and get $5 worth of HESCO tokens as a welcome gift, \
         plus up to $2 for each referral!\n\n\
         HESCO Token is developed by Black Stone Construction to revolutionize the \
         construction industry using blockchain technology."
    }

    fn onboarding_info_caption() -> String {
        format!(
            "📩 Add HESCO Token to your wallet and send your receiving address to qualify \
             for your reward.\n\n{}",
            token_card("BNB Smart Chain (BSC)")
        )
    }

    fn info_caption() -> String {
        format!(
            "📩 Add HESCO Token to your wallet and send your receiving address to claim \
             your reward.\n\n{}",
            token_card("BNB Smart Chain (BSC)")
        )
    }

    fn add_token_instructions() -> String {
        format!(
            "🛠️ How to add HESCO token to your wallet:\n\n{}",
            token_card("BNB Smart Chain (BEP20)")
        )
    }

    fn menu_prompt() -> &'static str {
        "🔽 Please choose an option:"
    }

    fn reward_instructions() -> String {
        format!(
            "🎁 Please first add the HESCO token to your wallet:\n\n\
             🪙 Token Name: HESCO Token\n\
             💠 Symbol: HESCO\n\
             🔗 Network: BNB Smart Chain (BEP20)\n\
             📜 Contract Address:\n\
             <code>{TOKEN_CONTRACT}</code>\n\n\
             🔹 <b>Now please send your HESCO wallet address to receive your tokens.</b>"
        )
    }

    fn referral_link_message(link: &str) -> String {
        format!(
            "📢 Your personal referral link to share with friends:\n\n{link}\n\n\
             Earn up to $10 HESCO for each successful referral!"
        )
    }

    fn invalid_address() -> &'static str {
        "❌ Invalid address! The BSC address should start with <code>0x</code> and be 42 \
         characters long."
    }

    fn address_received() -> &'static str {
        "✅ Thank you! Your wallet address has been received."
    }

    fn referral_count(count: usize) -> String {
        format!("👥 You have referred {count} user(s) so far.")
    }

    fn referral_notice(user: &Participant, referrer_id: &str) -> String {
        format!(
            "User {} ({}), ID: {}, was referred by user ID: {referrer_id}",
            user.full_name,
            user.username_or_placeholder(),
            user.id
        )
    }

    fn wallet_notice(user: &Participant, address: &str, referrer_id: Option<&str>) -> String {
        format!(
            "💼 New wallet address received:\n\
             👤 User: {} ({})\n\
             🆔 User ID: {}\n\
             🏦 Address: {address}\n\
             🔗 Referrer ID: {}",
            user.full_name,
            user.username_or_placeholder(),
            user.id,
            referrer_id.unwrap_or(NO_REFERRER)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(username: Option<&str>) -> Participant {
        Participant {
            id: "42".to_string(),
            full_name: "Jane Doe".to_string(),
            username: username.map(str::to_string),
        }
    }

    #[test]
    fn test_username_placeholder() {
        assert_eq!(participant(Some("jane")).username_or_placeholder(), "@jane");
        assert_eq!(participant(None).username_or_placeholder(), NO_USERNAME);
    }

    #[test]
    fn test_referral_notice_fields() {
        let text = DefaultCampaignView::referral_notice(&participant(None), "7");
        assert_eq!(
            text,
            "User Jane Doe (No username), ID: 42, was referred by user ID: 7"
        );
    }

    #[test]
    fn test_wallet_notice_with_referrer() {
        let address = "0xA3B1c4d5e6f708192a3b4c5d6e7f8091a2b3c4d5";
        let text = DefaultCampaignView::wallet_notice(&participant(Some("jane")), address, Some("7"));

        assert!(text.contains("👤 User: Jane Doe (@jane)"));
        assert!(text.contains("🆔 User ID: 42"));
        assert!(text.contains(&format!("🏦 Address: {address}")));
        assert!(text.ends_with("🔗 Referrer ID: 7"));
    }

    #[test]
    fn test_wallet_notice_without_referrer() {
        let text = DefaultCampaignView::wallet_notice(&participant(None), "0x0", None);
        assert!(text.ends_with(&format!("🔗 Referrer ID: {NO_REFERRER}")));
    }

    #[test]
    fn test_instructions_carry_contract() {
        assert!(DefaultCampaignView::info_caption().contains(TOKEN_CONTRACT));
        assert!(DefaultCampaignView::onboarding_info_caption().contains(TOKEN_CONTRACT));
        assert!(DefaultCampaignView::add_token_instructions().contains("BEP20"));
        assert!(DefaultCampaignView::reward_instructions().contains(TOKEN_CONTRACT));
    }

    #[test]
    fn test_referral_count() {
        assert_eq!(
            DefaultCampaignView::referral_count(3),
            "👥 You have referred 3 user(s) so far."
        );
    }
}
