//! Dialog Configuration
//!
//! Option records handed to the alert/dialog library. Field names serialize to
//! the library's camelCase option keys.

use serde::Serialize;

use crate::error::{ConsoleError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Success,
    Error,
    Warning,
    Info,
    Question,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    Center,
    Top,
    TopEnd,
    BottomEnd,
}

/// Blocking modal that resolves to a user decision
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogConfig {
    pub icon: Icon,
    pub title: String,
    pub html: String,
    pub focus_confirm: bool,
    pub show_confirm_button: bool,
    pub show_cancel_button: bool,
    pub allow_outside_click: bool,
    pub show_loader_on_confirm: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm_button_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_button_text: Option<String>,
}

impl DialogConfig {
    pub fn builder() -> DialogBuilder {
        DialogBuilder::default()
    }

    /// The "are you sure" prompt in front of every administrative action
    pub fn action_confirmation() -> Self {
        Self {
            icon: Icon::Warning,
            title: String::new(),
            html: "Are you sure you want to confirm?".to_string(),
            focus_confirm: false,
            show_confirm_button: true,
            show_cancel_button: true,
            allow_outside_click: true,
            show_loader_on_confirm: false,
            confirm_button_text: None,
            cancel_button_text: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DialogBuilder {
    config: DialogConfig,
}

impl Default for DialogBuilder {
    fn default() -> Self {
        Self {
            config: DialogConfig {
                icon: Icon::Info,
                title: String::new(),
                html: String::new(),
                focus_confirm: false,
                show_confirm_button: true,
                show_cancel_button: false,
                allow_outside_click: false,
                show_loader_on_confirm: false,
                confirm_button_text: None,
                cancel_button_text: None,
            },
        }
    }
}

impl DialogBuilder {
    pub fn icon(mut self, icon: Icon) -> Self {
        self.config.icon = icon;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.config.html = html.into();
        self
    }

    pub fn confirm_button(mut self, show: bool) -> Self {
        self.config.show_confirm_button = show;
        self
    }

    pub fn cancel_button(mut self, show: bool) -> Self {
        self.config.show_cancel_button = show;
        self
    }

    pub fn allow_outside_click(mut self, allow: bool) -> Self {
        self.config.allow_outside_click = allow;
        self
    }

    pub fn loader_on_confirm(mut self, show: bool) -> Self {
        self.config.show_loader_on_confirm = show;
        self
    }

    pub fn button_texts(mut self, confirm: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.config.confirm_button_text = Some(confirm.into());
        self.config.cancel_button_text = Some(cancel.into());
        self
    }

    /// A dialog needs content and some way for the user to close it
    pub fn build(self) -> Result<DialogConfig> {
        let c = &self.config;
        if c.title.is_empty() && c.html.is_empty() {
            return Err(ConsoleError::Config("dialog needs a title or a body".to_string()));
        }
        if !(c.show_confirm_button || c.show_cancel_button || c.allow_outside_click) {
            return Err(ConsoleError::Config("dialog cannot be dismissed".to_string()));
        }
        Ok(self.config)
    }
}

/// Informational modal (success / error)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertConfig {
    pub icon: Icon,
    pub title: String,
    pub text: String,
    pub footer: String,
    pub position: Position,
    pub show_confirm_button: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer: Option<u32>,
    pub timer_progress_bar: bool,
}

impl AlertConfig {
    pub fn new(icon: Icon, text: impl Into<String>) -> Self {
        Self {
            icon,
            title: String::new(),
            text: text.into(),
            footer: String::new(),
            position: Position::Center,
            show_confirm_button: true,
            timer: None,
            timer_progress_bar: false,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Icon::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Icon::Error, text)
    }
}

/// Transient corner notification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastConfig {
    pub toast: bool,
    pub icon: Icon,
    pub title: String,
    pub position: Position,
    pub show_confirm_button: bool,
    pub timer: u32,
    pub timer_progress_bar: bool,
}

impl ToastConfig {
    pub fn new(icon: Icon, message: impl Into<String>, duration_ms: u32) -> Self {
        Self {
            toast: true,
            icon,
            title: message.into(),
            position: Position::TopEnd,
            show_confirm_button: false,
            timer: duration_ms,
            timer_progress_bar: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn confirmation_prompt_options() {
        let value = serde_json::to_value(DialogConfig::action_confirmation()).unwrap();
        assert_eq!(value["icon"], json!("warning"));
        assert_eq!(value["showCancelButton"], json!(true));
        assert_eq!(value["allowOutsideClick"], json!(true));
        assert!(value.get("confirmButtonText").is_none());
    }

    #[test]
    fn builder_rejects_undismissable_dialog() {
        let err = DialogConfig::builder()
            .html("<form></form>")
            .confirm_button(false)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)));
    }

    #[test]
    fn builder_rejects_empty_dialog() {
        assert!(DialogConfig::builder().build().is_err());
    }

    #[test]
    fn toast_serializes_library_keys() {
        let value = serde_json::to_value(ToastConfig::new(Icon::Error, "Could not load page", 3000)).unwrap();
        assert_eq!(value["position"], json!("top-end"));
        assert_eq!(value["timer"], json!(3000));
        assert_eq!(value["toast"], json!(true));
    }
}
