use super::Command;
use super::Response;
use crate::deliver::render_message::{join_within, truncate, MAX_CHARS};
use crate::deliver::{Dialect, MessageRenderer};
use crate::App;
use frankenstein::Message;
use typed_builder::TypedBuilder;

static COMMAND: &str = "/alldrops";

#[derive(TypedBuilder)]
pub struct AllDrops<'a> {
    app: &'a App,
    message: &'a Message,
}

impl AllDrops<'_> {
    pub fn command() -> &'static str {
        COMMAND
    }
}

impl Command for AllDrops<'_> {
    fn response(&self) -> Response {
        let posts = match self.app.feed.fetch_approved(None) {
            Ok(posts) => posts,
            Err(error) => return Response::Simple(format!("Error fetching posts: {error}")),
        };

        if posts.is_empty() {
            return Response::Simple("No posts available.".to_string());
        }

        let rendered = posts
            .iter()
            .map(|post| {
                MessageRenderer::builder()
                    .post(post)
                    .dialect(self.app.dialect)
                    .build()
                    .render()
            })
            .collect::<Vec<String>>();

        let digest = match self.app.dialect {
            Dialect::Plain => truncate(&rendered.join("\n\n"), MAX_CHARS),
            Dialect::Html | Dialect::MarkdownV2 => join_within(&rendered, "\n\n", MAX_CHARS),
        };

        Response::Rendered(digest)
    }

    fn app(&self) -> &App {
        self.app
    }

    fn message(&self) -> &Message {
        self.message
    }
}
