use crate::deliver::render_message::MessageRenderer;
use crate::models::DropPost;
use crate::App;

/// Announces one newly detected drop to every configured channel whose
/// filter matches. The config list is snapshotted up front and the message
/// rendered once; sends run in parallel and a failed destination is logged
/// and never affects the others.
pub struct DeliverJob {
    post: DropPost,
}

impl DeliverJob {
    pub fn new(post: DropPost) -> Self {
        DeliverJob { post }
    }

    pub fn execute(&self, app: &App) {
        let configs = app.channel_configs.list_all();

        if configs.is_empty() {
            return;
        }

        let message = MessageRenderer::builder()
            .post(&self.post)
            .dialect(app.dialect)
            .build()
            .render();

        log::info!(
            "Delivering drop {} to {} configured channels",
            self.post.id,
            configs.len()
        );

        rayon::scope(|scope| {
            for config in &configs {
                if !config.matches(&self.post.kind) {
                    log::debug!(
                        "Skipping {} drop for chat {} configured for {}",
                        self.post.kind.as_str(),
                        config.chat_id,
                        config.drop_type
                    );
                    continue;
                }

                let message = &message;
                scope.spawn(move |_| {
                    if let Err(error) =
                        app.messenger
                            .send_text(&config.channel_id, message, app.dialect)
                    {
                        log::error!("Failed to deliver drop to {}: {}", config.channel_id, error);
                    }
                });
            }
        });
    }
}
