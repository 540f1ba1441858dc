//! Toast and share content.

use serde::{Deserialize, Serialize};

use crate::designer::TileError;
use crate::document::Text;

pub const APP_TITLE: &str = "Feels";
pub const SHARE_DESCRIPTION: &str = "Share the weather conditions";
pub const SHARE_COMPLETED: &str = "Data copied!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastContent {
    pub texts: Vec<Text>,
}

/// Title and description of a share payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePackage {
    pub title: String,
    pub description: String,
}

/// In-app toast: the app title followed by the message
pub fn local_toast(message: &str) -> ToastContent {
    ToastContent {
        texts: vec![Text::new(APP_TITLE), Text::new(message)],
    }
}

pub fn share_completed_toast() -> ToastContent {
    local_toast(SHARE_COMPLETED)
}

pub fn share_package() -> SharePackage {
    SharePackage {
        title: APP_TITLE.to_string(),
        description: SHARE_DESCRIPTION.to_string(),
    }
}

pub trait ToastSink: Send + Sync {
    fn show(&self, toast: &ToastContent) -> Result<(), TileError>;
}

/// Shows toasts as log lines
#[derive(Debug, Default, Clone, Copy)]
pub struct LogToastSink;

impl ToastSink for LogToastSink {
    fn show(&self, toast: &ToastContent) -> Result<(), TileError> {
        let line: Vec<&str> = toast.texts.iter().map(|t| t.text.as_str()).collect();
        tracing::info!("Toast: {}", line.join(" | "));
        Ok(())
    }
}
