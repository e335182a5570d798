use crate::models::DropKind;
use serde::{Deserialize, Serialize};

/// Destination channel and drop-type filter configured by one owner chat.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelConfig {
    pub chat_id: i64,
    pub channel_id: String,
    pub drop_type: String,
}

impl ChannelConfig {
    /// `any` matches every kind, otherwise the stored text has to equal
    /// the drop's kind ignoring case. Unknown filter text never matches.
    pub fn matches(&self, kind: &DropKind) -> bool {
        let filter = self.drop_type.trim();

        filter.eq_ignore_ascii_case("any") || filter.eq_ignore_ascii_case(kind.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ChannelConfig;
    use crate::models::DropKind;

    fn config(drop_type: &str) -> ChannelConfig {
        ChannelConfig {
            chat_id: 42,
            channel_id: "@drops".to_string(),
            drop_type: drop_type.to_string(),
        }
    }

    #[test]
    fn any_matches_every_kind() {
        assert!(config("any").matches(&DropKind::NewMint));
        assert!(config("ANY").matches(&DropKind::Auction));
        assert!(config(" any ").matches(&DropKind::Other("raffle".to_string())));
    }

    #[test]
    fn exact_filter_matches_ignoring_case() {
        assert!(config("New Mint").matches(&DropKind::NewMint));
        assert!(config("auction").matches(&DropKind::Auction));
        assert!(!config("auction").matches(&DropKind::NewMint));
    }

    #[test]
    fn unrecognized_filter_matches_nothing_known() {
        let config = config("raffle");

        assert!(!config.matches(&DropKind::NewMint));
        assert!(!config.matches(&DropKind::Airdrop));
        assert!(config.matches(&DropKind::Other("Raffle".to_string())));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_string(&config("new mint")).unwrap();

        assert!(json.contains("\"chatId\":42"));
        assert!(json.contains("\"channelId\":\"@drops\""));
        assert!(json.contains("\"dropType\":\"new mint\""));
    }
}
