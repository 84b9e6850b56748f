use teloxide::utils::command::BotCommands;

use crate::{command::Command, service::dialogue::model::Input};

use super::keyboard::Button;

/// Maps raw message text to a symbolic input. Non-text messages become empty text.
pub fn normalize(text: Option<&str>, bot_username: &str) -> Input {
    let Some(text) = text else {
        return Input::Text(String::new());
    };

    // `/start <payload>` from deep links still counts as /start
    let head = text.split_whitespace().next().unwrap_or_default();
    if let Ok(command) = Command::parse(head, bot_username) {
        return match command {
            Command::Start => Input::Start,
            Command::Help => Input::Help,
            Command::Plans => Input::SeePlans,
            Command::Stats => Input::Stats,
        };
    }

    if let Some(button) = Button::from_label(text.trim()) {
        return button.input();
    }

    Input::Text(text.to_string())
}
