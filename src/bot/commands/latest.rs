use super::Command;
use super::Response;
use crate::bot::conversation::ConversationStep;
use crate::deliver::MessageRenderer;
use crate::App;
use frankenstein::Message;
use typed_builder::TypedBuilder;

static COMMAND: &str = "/latest";

static LATEST_PROMPT: &str =
    "Which drops are you interested in? Reply with new mint, auction, airdrop or any.";

#[derive(TypedBuilder)]
pub struct Latest<'a> {
    app: &'a App,
    message: &'a Message,
    args: String,
}

impl Latest<'_> {
    pub fn command() -> &'static str {
        COMMAND
    }
}

/// Replies with the newest approved drop of the given kind. `any` asks
/// the backend for the unfiltered feed.
pub fn latest_drop_response(app: &App, kind: &str) -> Response {
    let drop_type = if kind.eq_ignore_ascii_case("any") {
        None
    } else {
        Some(kind)
    };

    match app.feed.fetch_approved(drop_type) {
        Ok(posts) => match posts.into_iter().next() {
            Some(post) => {
                let text = MessageRenderer::builder()
                    .post(&post)
                    .dialect(app.dialect)
                    .build()
                    .render();

                Response::Rendered(text)
            }
            None => Response::Simple("No posts available.".to_string()),
        },
        Err(error) => Response::Simple(format!("Error fetching posts: {error}")),
    }
}

impl Command for Latest<'_> {
    fn response(&self) -> Response {
        if self.args.is_empty() {
            self.app
                .conversations
                .start(self.message.chat.id, ConversationStep::AwaitingLatestKind);

            return Response::Simple(LATEST_PROMPT.to_string());
        }

        latest_drop_response(self.app, &self.args)
    }

    fn app(&self) -> &App {
        self.app
    }

    fn message(&self) -> &Message {
        self.message
    }
}
