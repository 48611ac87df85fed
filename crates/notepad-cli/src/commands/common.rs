use std::io::{self, IsTerminal, Read};

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use notepad_core::db::SlotRepository;
use notepad_core::reminder::NotificationCenter;
use notepad_core::services::open_local;
use notepad_core::{
    truncate_chars, AppConfig, Category, CategoryId, LocalNotebook, Note, NoteId, NoteQuery,
    Notebook, Tag, TagId,
};
use serde::Serialize;

use crate::error::CliError;

const SHORT_ID_LEN: usize = 13;
const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub content: String,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub is_pinned: bool,
    pub image_count: usize,
    pub reminder: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    pub relative_time: String,
}

pub async fn open_notebook(config: &AppConfig) -> Result<LocalNotebook, CliError> {
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(open_local(config).await?)
}

pub fn list_notes<'a, S, N>(
    notebook: &'a Notebook<S, N>,
    category: Option<&str>,
    tag: Option<&str>,
    search: Option<&str>,
    limit: Option<usize>,
) -> Result<Vec<&'a Note>, CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let mut query = NoteQuery::all();
    if let Some(category) = category {
        query = query.in_category(resolve_category(category, notebook)?);
    }
    if let Some(tag) = tag {
        query = query.with_tag(resolve_tag(tag, notebook)?);
    }
    if let Some(search) = search.map(str::trim) {
        query = query.matching(search);
    }

    let mut notes = notebook.find_notes(&query);
    if let Some(limit) = limit {
        notes.truncate(limit);
    }
    Ok(notes)
}

pub fn resolve_note<S, N>(note_query: &str, notebook: &Notebook<S, N>) -> Result<NoteId, CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let note_query = normalize_note_identifier(note_query)?;
    let exact = NoteId::from(note_query.as_str());
    if notebook.note(&exact).is_some() {
        return Ok(exact);
    }

    let matches = notebook.notes_with_id_prefix(&note_query);
    match matches.as_slice() {
        [] => Err(CliError::NoteNotFound(note_query)),
        [note] => Ok(note.id.clone()),
        _ => {
            let options = matches
                .iter()
                .take(3)
                .map(|note| short_id(&note.id))
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousNoteId(format!(
                "ID prefix '{note_query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn resolve_category<S, N>(query: &str, notebook: &Notebook<S, N>) -> Result<CategoryId, CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    notebook
        .find_category(query.trim())
        .map(|category| category.id.clone())
        .ok_or_else(|| CliError::CategoryNotFound(query.to_string()))
}

pub fn resolve_tag<S, N>(query: &str, notebook: &Notebook<S, N>) -> Result<TagId, CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    notebook
        .find_tag(query.trim())
        .map(|tag| tag.id.clone())
        .ok_or_else(|| CliError::TagNotFound(query.to_string()))
}

pub fn format_note_lines(notes: &[&Note], tags: &[Tag]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    notes
        .iter()
        .map(|note| {
            let short_id = short_id(&note.id);
            let marker = if note.is_pinned { "*" } else { " " };
            let preview = note_preview(note, 40);
            let relative_time = format_relative_time(note.updated_at, now_ms);
            let tags = render_tags(note, tags);

            if tags.is_empty() {
                format!("{short_id:<13} {marker} {preview:<40}  {relative_time}")
            } else {
                format!("{short_id:<13} {marker} {preview:<40}  {relative_time:<10}  {tags}")
            }
        })
        .collect()
}

pub fn note_to_list_item(note: &Note, categories: &[Category], tags: &[Tag]) -> NoteListItem {
    let now_ms = Utc::now().timestamp_millis();
    let category = note.category_id.as_ref().and_then(|id| {
        categories
            .iter()
            .find(|category| &category.id == id)
            .map(|category| category.name.clone())
    });

    NoteListItem {
        id: note.id.to_string(),
        title: note.title.clone(),
        preview: note_preview(note, 80),
        content: note.content.clone(),
        category,
        tags: tag_names(note, tags),
        is_pinned: note.is_pinned,
        image_count: note.images.len(),
        reminder: note.reminder,
        created_at: note.created_at,
        updated_at: note.updated_at,
        relative_time: format_relative_time(note.updated_at, now_ms),
    }
}

pub fn note_preview(note: &Note, max_chars: usize) -> String {
    let source = note.title_preview(usize::MAX);
    let collapsed = source.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_chars(&collapsed, max_chars)
}

pub fn tag_names(note: &Note, tags: &[Tag]) -> Vec<String> {
    tags.iter()
        .filter(|tag| note.has_tag(&tag.id))
        .map(|tag| tag.name.clone())
        .collect()
}

pub fn render_tags(note: &Note, tags: &[Tag]) -> String {
    tag_names(note, tags)
        .into_iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn short_id(id: &NoteId) -> String {
    id.as_str().chars().take(SHORT_ID_LEN).collect()
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

/// Local wall-clock rendering of a Unix millisecond timestamp
pub fn format_timestamp(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map_or_else(|| timestamp_ms.to_string(), format_date_time)
}

pub fn format_date_time(date_time: DateTime<Utc>) -> String {
    date_time
        .with_timezone(&Local)
        .format(LOCAL_TIME_FORMAT)
        .to_string()
}

/// Parse `YYYY-MM-DD HH:MM` in local time, or an RFC 3339 timestamp.
pub fn parse_reminder_time(input: &str) -> Result<i64, CliError> {
    let trimmed = input.trim();
    if let Ok(date_time) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(date_time.timestamp_millis());
    }

    NaiveDateTime::parse_from_str(trimmed, LOCAL_TIME_FORMAT)
        .ok()
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
        .map(|date_time| date_time.timestamp_millis())
        .ok_or_else(|| CliError::InvalidReminderTime(input.to_string()))
}

/// Content from arguments, falling back to piped stdin
pub fn resolve_note_content(content_parts: &[String]) -> Result<Option<String>, CliError> {
    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok(Some(content));
    }
    read_piped_stdin()
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn normalize_note_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyNoteId)
    } else {
        Ok(trimmed.to_string())
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}
