use std::fmt::Write as _;

use once_cell::sync::Lazy;
use time::error::InvalidFormatDescription;
use time::format_description::{self, OwnedFormatItem};
use time::OffsetDateTime;

use super::{Note, NoteBody};

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "[year]-[month]-[day] [hour]:[minute]:[second]";
pub const DEFAULT_MISSING_REMINDER: &str = "(none)";

static DEFAULT_OPTIONS: Lazy<RenderOptions> = Lazy::new(RenderOptions::default);

/// Controls how notes are turned into display lines.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    timestamp: OwnedFormatItem,
    show_ids: bool,
    missing_reminder_label: String,
}

impl RenderOptions {
    pub fn shared() -> &'static RenderOptions {
        &DEFAULT_OPTIONS
    }

    pub fn with_timestamp_format(
        mut self,
        spec: &str,
    ) -> Result<Self, InvalidFormatDescription> {
        self.timestamp = format_description::parse_owned::<2>(spec)?;
        Ok(self)
    }

    pub fn with_ids(mut self, show_ids: bool) -> Self {
        self.show_ids = show_ids;
        self
    }

    pub fn with_missing_reminder_label(mut self, label: impl Into<String>) -> Self {
        self.missing_reminder_label = label.into();
        self
    }

    pub fn format_timestamp(&self, at: OffsetDateTime) -> String {
        at.format(&self.timestamp)
            .unwrap_or_else(|_| at.unix_timestamp().to_string())
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            timestamp: format_description::parse_owned::<2>(DEFAULT_TIMESTAMP_FORMAT)
                .expect("valid default timestamp format"),
            show_ids: true,
            missing_reminder_label: DEFAULT_MISSING_REMINDER.to_string(),
        }
    }
}

impl Note {
    pub fn render_with(&self, options: &RenderOptions) -> String {
        let mut out = String::new();
        if options.show_ids {
            let _ = write!(&mut out, "#{} ", self.id);
        }
        let created = options.format_timestamp(self.created_at());
        match self.body() {
            NoteBody::Text => {
                let _ = write!(
                    &mut out,
                    "Text Note: {} (Created at: {created})",
                    self.content()
                );
            }
            NoteBody::Reminder { reminder_time } => {
                let reminder = reminder_time
                    .as_deref()
                    .unwrap_or(&options.missing_reminder_label);
                let _ = write!(
                    &mut out,
                    "Reminder Note: {} (Created at: {created}, Reminder at: {reminder})",
                    self.content()
                );
            }
        }
        out
    }
}
