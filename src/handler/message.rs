use teloxide::{
    adaptors::Throttle,
    payloads::SendMessageSetters,
    prelude::Requester,
    types::{ChatId, Me, Message},
    Bot,
};

use crate::{
    error::HandlerResult,
    service::dialogue::{InboundMessage, Reply},
    state::AppState,
};

use super::{input::normalize, keyboard::render_keyboard};

pub async fn handle_message(bot: Throttle<Bot>, msg: Message, me: Me, state: AppState) -> HandlerResult<()> {
    let Some(user) = msg.from.as_ref() else {
        debug!("Dropping message {:?} without a sender", msg.id);
        return Ok(());
    };

    let first_name = if user.first_name.trim().is_empty() {
        t!("names.default_first_name").to_string()
    } else {
        user.first_name.clone()
    };

    let inbound = InboundMessage {
        user_id: user.id,
        first_name,
        input: normalize(msg.text(), me.username()),
    };

    let reply = match state.service_registry.dialogue.handle(&inbound).await {
        Ok(reply) => reply,
        Err(e) => {
            error!("Failed to handle message from user {}: {}", user.id, e);
            Reply::failure()
        }
    };

    deliver(&bot, msg.chat.id, reply).await;

    Ok(())
}

/// Sends a reply. The profile is already saved, so a failed send is only logged.
async fn deliver(bot: &Throttle<Bot>, chat_id: ChatId, reply: Reply) {
    let request = bot.send_message(chat_id, reply.text);
    let result = match reply.keyboard {
        Some(keyboard) => request.reply_markup(render_keyboard(keyboard)).await,
        None => request.await,
    };

    if let Err(e) = result {
        error!("Failed to send reply to chat {}: {}", chat_id, e);
    }
}
