//! Platform-neutral representation of rendered calendar messages.
//!
//! The renderer produces these plain values so it stays pure and testable; the gateway
//! converts them into serenity builders at the edge.

use chrono::{DateTime, Utc};

/// One embed field: a header and a size-bounded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayField {
    pub name: String,
    pub value: String,
}

impl DisplayField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Characters this field counts towards an embed's total limit.
    pub fn char_count(&self) -> usize {
        self.name.chars().count() + self.value.chars().count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarEmbed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: u32,
    pub fields: Vec<DisplayField>,
    pub footer: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// A message body: optional plain content plus embeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarMessage {
    pub content: Option<String>,
    pub embeds: Vec<CalendarEmbed>,
}

impl CalendarEmbed {
    /// Characters this embed counts towards a message's total limit.
    pub fn char_count(&self) -> usize {
        let text = |value: &Option<String>| value.as_deref().map_or(0, |v| v.chars().count());

        text(&self.title)
            + text(&self.description)
            + text(&self.footer)
            + self.fields.iter().map(DisplayField::char_count).sum::<usize>()
    }
}

impl CalendarMessage {
    /// Characters of all embeds together, as Discord counts them against its limit.
    pub fn char_count(&self) -> usize {
        self.embeds.iter().map(CalendarEmbed::char_count).sum()
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            embeds: Vec::new(),
        }
    }

    pub fn embed(embed: CalendarEmbed) -> Self {
        Self {
            content: None,
            embeds: vec![embed],
        }
    }
}
