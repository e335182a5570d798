use serde::de::{IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// One approved drop as served by the backend.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DropPost {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "dropType")]
    pub kind: DropKind,
    pub project_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: DropDate,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub supply: Option<Scalar>,
    #[serde(rename = "likes", default, deserialize_with = "count_likes")]
    pub like_count: u64,
    #[serde(default)]
    pub price: Option<Scalar>,
    #[serde(rename = "wlPrice", default)]
    pub whitelist_price: Option<Scalar>,
    #[serde(default)]
    pub starting_price: Option<Scalar>,
    #[serde(default)]
    pub marketplace_link: Option<String>,
    #[serde(default)]
    pub project_link: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub x_com: Option<String>,
    #[serde(default)]
    pub telegram: Option<String>,
    #[serde(default)]
    pub discord: Option<String>,
    #[serde(rename = "image", default)]
    pub image_url: Option<String>,
}

/// Free text on the wire; unknown kinds are carried verbatim.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(from = "String")]
pub enum DropKind {
    NewMint,
    Auction,
    Airdrop,
    Other(String),
}

impl From<String> for DropKind {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "new mint" => DropKind::NewMint,
            "auction" => DropKind::Auction,
            "airdrop" => DropKind::Airdrop,
            _ => DropKind::Other(value.trim().to_string()),
        }
    }
}

impl DropKind {
    pub fn as_str(&self) -> &str {
        match self {
            DropKind::NewMint => "new mint",
            DropKind::Auction => "auction",
            DropKind::Airdrop => "airdrop",
            DropKind::Other(other) => other,
        }
    }
}

/// Drop dates are either scheduled or announced as the literal `TBA`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(from = "String")]
pub enum DropDate {
    #[default]
    Tba,
    Scheduled(String),
}

impl From<String> for DropDate {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("tba") {
            DropDate::Tba
        } else {
            DropDate::Scheduled(value)
        }
    }
}

/// Supply and prices arrive as numbers or as text like `0.5 ETH`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scalar::Int(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value}"),
            Scalar::Text(value) => write!(f, "{value}"),
        }
    }
}

// The wire carries full like records; only their number is kept.
fn count_likes<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct LikesVisitor;

    impl<'de> Visitor<'de> for LikesVisitor {
        type Value = u64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a list of likes")
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<u64, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut count = 0;

            while seq.next_element::<IgnoredAny>()?.is_some() {
                count += 1;
            }

            Ok(count)
        }
    }

    deserializer.deserialize_seq(LikesVisitor)
}
