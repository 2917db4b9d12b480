//! Adapters from Telegram (teloxide) types to dbot_core types.
//! Depends only on teloxide and dbot_core type definitions.

use dbot_core::{Chat, Message, ToCoreMessage, ToCoreUser, User, VoiceNote};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let voice = self.voice_note();
        let content = self
            .0
            .text()
            .or_else(|| self.0.caption())
            .unwrap_or("")
            .to_string();
        let message_type = if voice.is_some() {
            "voice"
        } else if self.0.text().is_some() {
            "text"
        } else {
            "other"
        };

        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: self.0.chat.id.0,
                    username: None,
                    first_name: None,
                    last_name: None,
                }),
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: format!("{:?}", self.0.chat.kind),
            },
            content,
            message_type: message_type.to_string(),
            voice,
            created_at: chrono::Utc::now(),
        }
    }
}

impl<'a> TelegramMessageWrapper<'a> {
    /// Returns the attached voice note, if any.
    fn voice_note(&self) -> Option<VoiceNote> {
        self.0.voice().map(|v| VoiceNote {
            file_id: v.file.id.0.clone(),
            duration_secs: v.duration.seconds(),
            mime_type: v.mime_type.as_ref().map(|m| m.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: TelegramUserWrapper converts teloxide User to core User with correct id, username, first_name, last_name.**
    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(42),
            is_bot: false,
            first_name: "Анна".to_string(),
            last_name: None,
            username: Some("anna_pm".to_string()),
            language_code: Some("ru".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let core_user = TelegramUserWrapper(&user).to_core();

        assert_eq!(core_user.id, 42);
        assert_eq!(core_user.username, Some("anna_pm".to_string()));
        assert_eq!(core_user.first_name, Some("Анна".to_string()));
        assert_eq!(core_user.last_name, None);
    }
}
