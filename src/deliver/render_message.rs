use crate::models::{DropDate, DropKind, DropPost, Scalar};
use chrono::{DateTime, NaiveDate};
use typed_builder::TypedBuilder as Builder;

pub(crate) const MAX_CHARS: usize = 4000;

// Applied to the raw description before styling, leaving room for the
// field and link lines under MAX_CHARS.
const DESCRIPTION_MAX_CHARS: usize = 2500;

const MISSING_VALUE: &str = "N/A";
const MISSING_DESCRIPTION: &str = "No description provided.";

// The characters Telegram requires to be backslash-escaped in MarkdownV2.
const MARKDOWN_RESERVED: [char; 18] = [
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Markup dialect of rendered announcements.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dialect {
    Plain,
    Html,
    MarkdownV2,
}

impl Dialect {
    pub fn from_name(name: &str) -> Option<Dialect> {
        match name.trim().to_lowercase().as_str() {
            "plain" => Some(Dialect::Plain),
            "html" => Some(Dialect::Html),
            "markdownv2" => Some(Dialect::MarkdownV2),
            _ => None,
        }
    }
}

/// Renders one drop into an announcement message. Pure: the same post
/// with the same dialect always yields the same bytes.
#[derive(Builder)]
pub struct MessageRenderer<'a> {
    post: &'a DropPost,
    #[builder(default = Dialect::Html)]
    dialect: Dialect,
}

impl MessageRenderer<'_> {
    pub fn render(&self) -> String {
        let post = self.post;
        let mut lines = Vec::new();

        lines.push(self.bold(&post.project_name));
        let description = present(&post.description).unwrap_or(MISSING_DESCRIPTION);
        lines.push(self.italic(&truncate(description, DESCRIPTION_MAX_CHARS)));
        lines.push(String::new());

        self.push_field(&mut lines, "Drop Type:", post.kind.as_str());
        self.push_field(&mut lines, "Date:", &self.date(&post.date));
        self.push_field(
            &mut lines,
            "Time:",
            present(&post.time).unwrap_or(MISSING_VALUE),
        );
        self.push_field(&mut lines, "Supply:", &scalar_or_missing(&post.supply));
        self.push_field(&mut lines, "Likes:", &post.like_count.to_string());

        match &post.kind {
            DropKind::NewMint => {
                self.push_field(&mut lines, "Price:", &scalar_or_missing(&post.price));
                self.push_field(
                    &mut lines,
                    "Whitelist Price:",
                    &scalar_or_missing(&post.whitelist_price),
                );
            }
            DropKind::Auction => {
                self.push_field(
                    &mut lines,
                    "Starting Price:",
                    &scalar_or_missing(&post.starting_price),
                );
                self.push_link_or_missing(&mut lines, "Marketplace Link:", &post.marketplace_link);
            }
            DropKind::Airdrop => {
                self.push_link_or_missing(&mut lines, "Project Link:", &post.project_link);
            }
            DropKind::Other(_) => {}
        }

        self.push_link_if_present(&mut lines, "Website:", "Website", &post.website);
        self.push_link_if_present(&mut lines, "X.com:", "X.com", &post.x_com);
        self.push_link_if_present(&mut lines, "Telegram:", "Telegram", &post.telegram);
        self.push_link_if_present(&mut lines, "Discord:", "Discord", &post.discord);
        self.push_link_if_present(&mut lines, "Image:", "Image", &post.image_url);

        match self.dialect {
            Dialect::Plain => truncate(&lines.join("\n"), MAX_CHARS),
            Dialect::Html | Dialect::MarkdownV2 => join_within(&lines, "\n", MAX_CHARS),
        }
    }

    fn date(&self, date: &DropDate) -> String {
        match date {
            DropDate::Tba => "TBA".to_string(),
            DropDate::Scheduled(raw) => format_date(raw),
        }
    }

    fn push_field(&self, lines: &mut Vec<String>, label: &str, value: &str) {
        lines.push(format!("{} {}", self.bold(label), self.escape(value)));
    }

    fn push_link_if_present(
        &self,
        lines: &mut Vec<String>,
        label: &str,
        link_label: &str,
        url: &Option<String>,
    ) {
        if let Some(url) = present(url) {
            lines.push(format!("{} {}", self.bold(label), self.link(link_label, url)));
        }
    }

    fn push_link_or_missing(&self, lines: &mut Vec<String>, label: &str, url: &Option<String>) {
        match present(url) {
            Some(url) => lines.push(format!("{} {}", self.bold(label), self.link("Link", url))),
            None => self.push_field(lines, label, MISSING_VALUE),
        }
    }

    fn bold(&self, text: &str) -> String {
        match self.dialect {
            Dialect::Plain => text.to_string(),
            Dialect::Html => format!("<b>{}</b>", escape_html(text)),
            Dialect::MarkdownV2 => format!("*{}*", escape_markdown(text)),
        }
    }

    fn italic(&self, text: &str) -> String {
        match self.dialect {
            Dialect::Plain => text.to_string(),
            Dialect::Html => format!("<i>{}</i>", escape_html(text)),
            Dialect::MarkdownV2 => format!("_{}_", escape_markdown(text)),
        }
    }

    fn escape(&self, text: &str) -> String {
        match self.dialect {
            Dialect::Plain => text.to_string(),
            Dialect::Html => escape_html(text),
            Dialect::MarkdownV2 => escape_markdown(text),
        }
    }

    fn link(&self, label: &str, url: &str) -> String {
        match self.dialect {
            Dialect::Plain => url.to_string(),
            // Only quotes need care inside an href, entity-escaping the
            // rest would corrupt the target.
            Dialect::Html => format!(
                "<a href=\"{}\">{}</a>",
                url.replace('"', "&quot;"),
                escape_html(label)
            ),
            Dialect::MarkdownV2 => format!(
                "[{}]({})",
                escape_markdown(label),
                url.replace('\\', "\\\\").replace(')', "\\)")
            ),
        }
    }
}

fn format_date(raw: &str) -> String {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
        return date_time.date_naive().format("%Y-%m-%d").to_string();
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }

    raw.to_string()
}

fn scalar_or_missing(value: &Option<Scalar>) -> String {
    match value {
        Some(scalar) => scalar.to_string(),
        None => MISSING_VALUE.to_string(),
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn escape_html(text: &str) -> String {
    htmlescape::encode_minimal(text)
}

fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for character in text.chars() {
        if MARKDOWN_RESERVED.contains(&character) {
            escaped.push('\\');
        }
        escaped.push(character);
    }

    escaped
}

pub(crate) fn truncate(s: &str, max_chars: usize) -> String {
    let result = match s.char_indices().nth(max_chars) {
        None => String::from(s),
        Some((idx, _)) => {
            let mut string = String::from(&s[..idx]);

            string.push_str("...");

            string
        }
    };

    result.trim().to_string()
}

// Joins whole parts up to the limit. A part is never split, so markup
// stays balanced; the first part is always kept.
pub(crate) fn join_within(parts: &[String], separator: &str, max_chars: usize) -> String {
    let separator_chars = separator.chars().count();
    let mut text = String::new();
    let mut length = 0;

    for (index, part) in parts.iter().enumerate() {
        let mut added = part.chars().count();
        if index > 0 {
            added += separator_chars;
        }

        if index > 0 && length + added > max_chars {
            break;
        }

        if index > 0 {
            text.push_str(separator);
        }

        text.push_str(part);
        length += added;
    }

    text.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::{format_date, join_within, truncate, Dialect, MessageRenderer, MAX_CHARS};
    use crate::models::{DropDate, DropKind, DropPost, Scalar};

    fn post(kind: DropKind) -> DropPost {
        DropPost {
            id: "1".to_string(),
            kind,
            project_name: "Rocket Apes".to_string(),
            description: None,
            date: DropDate::Tba,
            time: None,
            supply: None,
            like_count: 0,
            price: None,
            whitelist_price: None,
            starting_price: None,
            marketplace_link: None,
            project_link: None,
            website: None,
            x_com: None,
            telegram: None,
            discord: None,
            image_url: None,
        }
    }

    fn render(post: &DropPost, dialect: Dialect) -> String {
        MessageRenderer::builder()
            .post(post)
            .dialect(dialect)
            .build()
            .render()
    }

    #[test]
    fn renders_a_full_new_mint_in_html() {
        let mut post = post(DropKind::NewMint);
        post.description = Some("Ape rockets to the moon.".to_string());
        post.date = DropDate::Scheduled("2024-05-01T00:00:00.000Z".to_string());
        post.time = Some("18:00 UTC".to_string());
        post.supply = Some(Scalar::Int(5000));
        post.like_count = 2;
        post.price = Some(Scalar::Float(1.5));
        post.whitelist_price = Some(Scalar::Int(1));
        post.website = Some("https://example.org".to_string());

        let expected = "<b>Rocket Apes</b>\n\
                        <i>Ape rockets to the moon.</i>\n\
                        \n\
                        <b>Drop Type:</b> new mint\n\
                        <b>Date:</b> 2024-05-01\n\
                        <b>Time:</b> 18:00 UTC\n\
                        <b>Supply:</b> 5000\n\
                        <b>Likes:</b> 2\n\
                        <b>Price:</b> 1.5\n\
                        <b>Whitelist Price:</b> 1\n\
                        <b>Website:</b> <a href=\"https://example.org\">Website</a>";

        assert_eq!(render(&post, Dialect::Html), expected);
    }

    #[test]
    fn renders_an_auction_without_links_in_plain_text() {
        let mut post = post(DropKind::Auction);
        post.project_name = "Silent Auction".to_string();
        post.starting_price = Some(Scalar::Text("0.5 ETH".to_string()));

        let expected = "Silent Auction\n\
                        No description provided.\n\
                        \n\
                        Drop Type: auction\n\
                        Date: TBA\n\
                        Time: N/A\n\
                        Supply: N/A\n\
                        Likes: 0\n\
                        Starting Price: 0.5 ETH\n\
                        Marketplace Link: N/A";

        assert_eq!(render(&post, Dialect::Plain), expected);
    }

    #[test]
    fn renders_an_airdrop_in_markdown() {
        let mut post = post(DropKind::Airdrop);
        post.project_name = "Sky Drop".to_string();
        post.project_link = Some("https://air.example/claim".to_string());

        let expected = "*Sky Drop*\n\
                        _No description provided\\._\n\
                        \n\
                        *Drop Type:* airdrop\n\
                        *Date:* TBA\n\
                        *Time:* N/A\n\
                        *Supply:* N/A\n\
                        *Likes:* 0\n\
                        *Project Link:* [Link](https://air.example/claim)";

        assert_eq!(render(&post, Dialect::MarkdownV2), expected);
    }

    #[test]
    fn rendering_twice_yields_identical_bytes() {
        let mut post = post(DropKind::NewMint);
        post.website = Some("https://example.org".to_string());

        let renderer = MessageRenderer::builder()
            .post(&post)
            .dialect(Dialect::Html)
            .build();

        assert_eq!(renderer.render(), renderer.render());
    }

    #[test]
    fn escapes_html_in_field_values() {
        let mut post = post(DropKind::Other("mix & <match>".to_string()));
        post.project_name = "Ape & <Sons>".to_string();

        let rendered = render(&post, Dialect::Html);

        assert!(rendered.starts_with("<b>Ape &amp; &lt;Sons&gt;</b>\n"));
        assert!(rendered.contains("<b>Drop Type:</b> mix &amp; &lt;match&gt;"));
    }

    #[test]
    fn escapes_markdown_reserved_characters() {
        let mut post = post(DropKind::NewMint);
        post.project_name = "a_b*c[d]".to_string();
        post.date = DropDate::Scheduled("2024-05-01".to_string());

        let rendered = render(&post, Dialect::MarkdownV2);

        assert!(rendered.starts_with("*a\\_b\\*c\\[d\\]*\n"));
        assert!(rendered.contains("*Date:* 2024\\-05\\-01"));
    }

    #[test]
    fn blank_links_are_omitted() {
        let mut post = post(DropKind::Other("raffle".to_string()));
        post.website = Some(String::new());
        post.discord = Some("   ".to_string());

        let rendered = render(&post, Dialect::Html);

        assert!(!rendered.contains("Website"));
        assert!(!rendered.contains("Discord"));
        assert!(!rendered.contains("Price"));
    }

    #[test]
    fn a_long_description_stays_valid_html() {
        let mut post = post(DropKind::NewMint);
        post.description = Some("long talk ".repeat(600));

        let rendered = render(&post, Dialect::Html);

        assert!(rendered.chars().count() <= MAX_CHARS);
        assert_eq!(rendered.matches("<i>").count(), 1);
        assert_eq!(rendered.matches("</i>").count(), 1);
        assert!(rendered.contains("...</i>"));
        assert!(rendered.contains("<b>Whitelist Price:</b> N/A"));
    }

    #[test]
    fn a_long_description_stays_valid_markdown() {
        let mut post = post(DropKind::NewMint);
        post.description = Some("hard sell. ".repeat(600));

        let rendered = render(&post, Dialect::MarkdownV2);

        assert!(rendered.chars().count() <= MAX_CHARS);
        assert_eq!(rendered.matches('_').count(), 2);
        assert!(rendered.contains("\\.\\.\\._"));
        assert!(!rendered.contains(".."));
    }

    #[test]
    fn formats_known_date_shapes() {
        assert_eq!(format_date("2024-05-01T00:00:00.000Z"), "2024-05-01");
        assert_eq!(format_date("2024-05-01"), "2024-05-01");
        assert_eq!(format_date("next week"), "next week");
    }

    #[test]
    fn truncates_on_character_boundaries() {
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("ab", 5), "ab");
    }

    #[test]
    fn join_within_keeps_whole_parts() {
        let parts = vec![
            "first".to_string(),
            "second".to_string(),
            "third".to_string(),
        ];

        assert_eq!(join_within(&parts, "\n\n", 14), "first\n\nsecond");
        assert_eq!(join_within(&parts, "\n\n", 100), "first\n\nsecond\n\nthird");
        assert_eq!(join_within(&parts, "\n\n", 3), "first");
    }
}
