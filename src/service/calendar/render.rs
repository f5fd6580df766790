//! Pure rendering of the calendar summary.
//!
//! Events are expanded into occurrences, grouped by month and formatted into text blocks
//! that are packed into size-bounded embed fields. Nothing here touches the store or
//! Discord, so the whole layout can be tested directly.

use chrono::{DateTime, Datelike, Utc};
use dioxus_logger::tracing;

use crate::{
    config::CalendarSettings,
    model::{
        display::{CalendarEmbed, CalendarMessage, DisplayField},
        event::Event,
        occurrence::OccurrenceView,
    },
    service::occurrence::occurrence_views,
};

pub const EMBED_TITLE: &str = "Upcoming Events";
pub const EMPTY_CALENDAR_HEADER: &str = "No events scheduled";
pub const TBC_HEADER: &str = "Date TBC";

/// Zero-width header for continuation fields, Discord rejects empty field names.
pub const CONTINUATION_HEADER: &str = "\u{200b}";

const EMPTY_CALENDAR_BODY: &str = "Use `/event add` to schedule one.";
const FOOTER: &str = "Last updated";
const CALENDAR_COLOR: u32 = 0x5865F2;
const ELLIPSIS: char = '…';
const BLOCK_SEPARATOR: &str = "\n\n";

const MAX_FIELDS_PER_EMBED: usize = 25;
const MAX_EMBEDS_PER_MESSAGE: usize = 10;
/// Budget for all embeds of one message together; Discord rejects messages over 6000.
const MAX_MESSAGE_CHARACTERS: usize = 5500;

/// Renders every event of a guild into embed fields.
///
/// # Arguments
/// - `events` - The guild's events
/// - `now` - Reference instant for occurrence expansion
/// - `settings` - Timezone, look-ahead and field budget
///
/// # Returns
/// - Fields in display order: one run per month, then the TBC bucket; a single
///   placeholder field when there is nothing to show
pub fn render_calendar(
    events: &[Event],
    now: DateTime<Utc>,
    settings: &CalendarSettings,
) -> Vec<DisplayField> {
    let budget = settings.field_character_budget;

    let mut views = occurrence_views(events, now, settings);
    views.sort_by(|a, b| {
        a.display_date
            .cmp(&b.display_date)
            .then_with(|| a.event.title.cmp(&b.event.title))
    });

    let mut fields = Vec::new();

    for month in views.chunk_by(|a, b| month_key(a) == month_key(b)) {
        let header = month[0].display_date.format("%B %Y").to_string();
        let blocks: Vec<String> = month.iter().map(format_occurrence_block).collect();
        push_section(&mut fields, header, &blocks, budget);
    }

    let tbc_blocks: Vec<String> = events
        .iter()
        .filter(|event| event.is_tbc())
        .map(format_tbc_block)
        .collect();
    push_section(&mut fields, TBC_HEADER.to_string(), &tbc_blocks, budget);

    if fields.is_empty() {
        fields.push(DisplayField::new(EMPTY_CALENDAR_HEADER, EMPTY_CALENDAR_BODY));
    }

    fields
}

fn month_key(view: &OccurrenceView<'_>) -> (i32, u32) {
    (view.display_date.year(), view.display_date.month())
}

/// Packs a section's blocks and appends its fields; only the first carries the header.
fn push_section(fields: &mut Vec<DisplayField>, header: String, blocks: &[String], budget: usize) {
    let mut header = Some(header);

    for chunk in pack_blocks(blocks, budget) {
        let name = header
            .take()
            .unwrap_or_else(|| CONTINUATION_HEADER.to_string());
        fields.push(DisplayField::new(name, chunk));
    }
}

/// Formats one occurrence of a dated event.
pub fn format_occurrence_block(view: &OccurrenceView<'_>) -> String {
    let event = view.event;

    let mut lines = vec![title_line(event), format_occurrence_date(view)];
    lines.extend(detail_lines(event, view.thread_id()));
    lines.join("\n")
}

/// `Friday 24/10/2025 at 19:00`, without the time for date-only events.
///
/// The time comes from the organiser-entered fields so it reads exactly as entered even
/// when the instant was shifted out of a daylight saving gap.
pub fn format_occurrence_date(view: &OccurrenceView<'_>) -> String {
    let event = view.event;

    let mut text = view.display_date.format("%A %d/%m/%Y").to_string();
    if event.has_time {
        text.push_str(&format!(
            " at {:02}:{:02}",
            event.original_hour, event.original_minute
        ));
    }
    text
}

/// Formats an event whose date is still to be confirmed.
pub fn format_tbc_block(event: &Event) -> String {
    let mut lines = vec![title_line(event), "Date: TBC".to_string()];
    lines.extend(detail_lines(event, event.thread_id));
    lines.join("\n")
}

fn title_line(event: &Event) -> String {
    if event.recurring {
        format!("**{}** (weekly)", event.title)
    } else {
        format!("**{}**", event.title)
    }
}

fn detail_lines(event: &Event, thread_id: Option<u64>) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(match event.organiser_id {
        Some(id) => format!("Organiser: <@{}>", id),
        None => "Organiser: TBC".to_string(),
    });
    if let Some(id) = event.squad_maker_id {
        lines.push(format!("Squad maker: <@{}>", id));
    }
    if let Some(description) = event.description.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(description.to_string());
    }
    if let Some(id) = thread_id {
        lines.push(format!("Thread: <#{}>", id));
    }

    lines
}

/// Greedily packs blocks into chunks of at most `budget` characters.
///
/// Blocks are joined by a blank line and never split across chunks. A single block that
/// exceeds the budget on its own is truncated with an ellipsis.
///
/// # Arguments
/// - `blocks` - Formatted blocks in display order
/// - `budget` - Maximum characters per chunk
///
/// # Returns
/// - Chunks in order; empty when there are no blocks
pub fn pack_blocks(blocks: &[String], budget: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for block in blocks {
        let block = truncate(block, budget);
        let block_len = block.chars().count();

        if current.is_empty() {
            current = block;
            current_len = block_len;
        } else if current_len + BLOCK_SEPARATOR.len() + block_len <= budget {
            current.push_str(BLOCK_SEPARATOR);
            current.push_str(&block);
            current_len += BLOCK_SEPARATOR.len() + block_len;
        } else {
            chunks.push(std::mem::replace(&mut current, block));
            current_len = block_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

fn truncate(block: &str, budget: usize) -> String {
    if block.chars().count() <= budget {
        return block.to_string();
    }

    let mut truncated: String = block.chars().take(budget.saturating_sub(1)).collect();
    truncated.push(ELLIPSIS);
    truncated
}

/// Distributes rendered fields over the embeds of one message.
///
/// A new embed starts when the current one holds the maximum number of fields. The
/// characters of every embed count towards one message-wide budget, together with the
/// title and footer. Fields that no longer fit the budget or the embed limit are dropped
/// with a warning, along with every field after them so the calendar keeps its order.
///
/// # Arguments
/// - `fields` - Output of `render_calendar`
/// - `now` - Timestamp shown on the last embed
///
/// # Returns
/// - Message whose first embed carries the title and last embed carries the footer
pub fn build_calendar_message(fields: Vec<DisplayField>, now: DateTime<Utc>) -> CalendarMessage {
    let mut embeds: Vec<CalendarEmbed> = Vec::new();
    let mut current = CalendarEmbed::default();
    let mut message_chars = EMBED_TITLE.chars().count() + FOOTER.chars().count();
    let mut dropped = 0;

    for field in fields {
        let field_chars = field.char_count();
        let embed_full = current.fields.len() >= MAX_FIELDS_PER_EMBED;
        let out_of_embeds = embed_full && embeds.len() + 1 >= MAX_EMBEDS_PER_MESSAGE;

        if dropped > 0 || out_of_embeds || message_chars + field_chars > MAX_MESSAGE_CHARACTERS {
            dropped += 1;
            continue;
        }

        if embed_full {
            embeds.push(std::mem::take(&mut current));
        }

        message_chars += field_chars;
        current.fields.push(field);
    }

    if !current.fields.is_empty() || embeds.is_empty() {
        embeds.push(current);
    }

    if dropped > 0 {
        tracing::warn!(
            "Calendar does not fit in one message, dropped {} field(s)",
            dropped
        );
    }

    for embed in embeds.iter_mut() {
        embed.color = CALENDAR_COLOR;
    }
    if let Some(first) = embeds.first_mut() {
        first.title = Some(EMBED_TITLE.to_string());
    }
    if let Some(last) = embeds.last_mut() {
        last.footer = Some(FOOTER.to_string());
        last.timestamp = Some(now);
    }

    CalendarMessage {
        content: None,
        embeds,
    }
}
