//! Transient status notices, debounced input handling, and the
//! acknowledgement template used by the bulk notification run.

pub mod board;
pub mod debounce;
pub mod template;

pub use board::{Notice, NoticeBoard, NOTICE_TTL_SECONDS};
pub use debounce::Debouncer;
pub use template::acknowledgement;

use serde::Serialize;

/// Visual tone shared by screening banners and transient notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageTone {
    Success,
    Warning,
    Error,
}

impl MessageTone {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}
