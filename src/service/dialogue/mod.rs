mod engine;
pub mod model;
mod reply;

pub use engine::{ConversationEngine, InboundMessage, Outcome};
pub use reply::{Keyboard, Reply};

use chrono::Utc;

use super::{content::ContentGenerator, user::UserService, ServiceError};

/// Runs one inbound message through the conversation: load, transition, generate, save.
#[derive(Clone)]
pub struct DialogueService {
    users: UserService,
    engine: ConversationEngine,
    content: ContentGenerator,
}

impl DialogueService {
    pub fn new(users: UserService, engine: ConversationEngine, content: ContentGenerator) -> Self {
        info!("Initializing dialogue service");
        Self { users, engine, content }
    }

    /// The profile is saved before the reply is returned. If the transition fails the stored
    /// profile is left as it was.
    pub async fn handle(&self, message: &InboundMessage) -> Result<Reply, ServiceError> {
        let _guard = self.users.lock(message.user_id).await;
        let now = Utc::now();

        let mut profile = self.users.resolve(message.user_id, &message.first_name, now).await?;
        debug!(
            "User {} in state {:?} sent {:?}",
            message.user_id, profile.state, message.input
        );

        let reply = match self.engine.step(&mut profile, message, now)? {
            Outcome::Reply(reply) => reply,
            Outcome::Generate { kind, quota } => {
                let generated = self.content.generate_or_fallback(&profile, kind).await;
                debug!(
                    "Generated {} post for user {} ({:?})",
                    kind.as_str(),
                    profile.user_id,
                    generated.source
                );
                self.engine.content_reply(&generated.text, &quota)
            }
        };

        self.users.save(&profile).await?;

        Ok(reply)
    }
}
