use teloxide::types::{KeyboardButton, KeyboardMarkup};

use crate::service::dialogue::{model::ContentKind, model::Input, Keyboard};

/// A menu button. Labels live in the locale file; routing only ever sees the `Input`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    SetupTeam,
    SeePlans,
    MadePayment,
    Stats,
    SocialPost,
    SpecialOffer,
    FestivalPost,
}

impl Button {
    pub const ALL: [Button; 7] = [
        Button::SetupTeam,
        Button::SeePlans,
        Button::MadePayment,
        Button::Stats,
        Button::SocialPost,
        Button::SpecialOffer,
        Button::FestivalPost,
    ];

    pub fn label(&self) -> String {
        let key = match self {
            Button::SetupTeam => "buttons.setup_team",
            Button::SeePlans => "buttons.see_plans",
            Button::MadePayment => "buttons.made_payment",
            Button::Stats => "buttons.stats",
            Button::SocialPost => "buttons.social_post",
            Button::SpecialOffer => "buttons.special_offer",
            Button::FestivalPost => "buttons.festival_post",
        };
        t!(key).to_string()
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|button| button.label() == label)
    }

    pub fn input(&self) -> Input {
        match self {
            Button::SetupTeam => Input::SetupTeam,
            Button::SeePlans => Input::SeePlans,
            Button::MadePayment => Input::MadePayment,
            Button::Stats => Input::Stats,
            Button::SocialPost => Input::Generate(ContentKind::General),
            Button::SpecialOffer => Input::Generate(ContentKind::Offer),
            Button::FestivalPost => Input::Generate(ContentKind::Festival),
        }
    }
}

fn button(button: Button) -> KeyboardButton {
    KeyboardButton::new(button.label())
}

// voice choices are answered as plain text
fn voice(key: &str) -> KeyboardButton {
    KeyboardButton::new(t!(key))
}

pub fn render_keyboard(keyboard: Keyboard) -> KeyboardMarkup {
    let rows = match keyboard {
        Keyboard::Welcome => vec![vec![button(Button::SetupTeam)], vec![button(Button::SeePlans)]],
        Keyboard::BrandVoice => vec![
            vec![voice("buttons.voice.professional"), voice("buttons.voice.friendly")],
            vec![voice("buttons.voice.playful"), voice("buttons.voice.premium")],
        ],
        Keyboard::ContentMenu => vec![
            vec![button(Button::SocialPost), button(Button::SpecialOffer)],
            vec![button(Button::FestivalPost)],
            vec![button(Button::Stats), button(Button::SeePlans)],
        ],
        Keyboard::Upgrade => vec![vec![button(Button::SeePlans)], vec![button(Button::MadePayment)]],
    };

    KeyboardMarkup::new(rows).resize_keyboard().one_time_keyboard()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(markup: &KeyboardMarkup) -> Vec<Vec<String>> {
        markup
            .keyboard
            .iter()
            .map(|row| row.iter().map(|button| button.text.clone()).collect())
            .collect()
    }

    #[test]
    fn test_labels_round_trip_to_buttons() {
        for button in Button::ALL {
            assert_eq!(Button::from_label(&button.label()), Some(button));
        }
        assert_eq!(Button::from_label("Chai Point"), None);
    }

    #[test]
    fn test_labels_are_distinct() {
        let mut labels: Vec<String> = Button::ALL.iter().map(Button::label).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), Button::ALL.len());
    }

    #[test]
    fn test_render_welcome() {
        let markup = render_keyboard(Keyboard::Welcome);

        assert_eq!(
            labels(&markup),
            vec![vec![Button::SetupTeam.label()], vec![Button::SeePlans.label()]]
        );
        assert!(markup.resize_keyboard);
        assert!(markup.one_time_keyboard);
    }

    #[test]
    fn test_render_content_menu_offers_every_kind() {
        let inputs: Vec<Input> = labels(&render_keyboard(Keyboard::ContentMenu))
            .into_iter()
            .flatten()
            .filter_map(|label| Button::from_label(&label))
            .map(|button| button.input())
            .collect();

        for kind in [ContentKind::General, ContentKind::Offer, ContentKind::Festival] {
            assert!(inputs.contains(&Input::Generate(kind)));
        }
        assert!(inputs.contains(&Input::Stats));
    }

    #[test]
    fn test_brand_voice_buttons_are_free_text() {
        let labels = labels(&render_keyboard(Keyboard::BrandVoice));

        assert_eq!(labels.concat().len(), 4);
        assert!(labels.concat().iter().all(|label| Button::from_label(label).is_none()));
    }
}
