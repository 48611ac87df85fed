use notepad_core::db::SlotRepository;
use notepad_core::reminder::NotificationCenter;
use notepad_core::{Note, Notebook};

use crate::commands::common::{
    format_note_lines, format_timestamp, list_notes, note_to_list_item, read_piped_stdin,
    render_tags, resolve_category, resolve_note, resolve_note_content, NoteListItem,
};
use crate::error::CliError;

pub async fn run_add<S, N>(
    notebook: &mut Notebook<S, N>,
    title: &str,
    category: Option<&str>,
    content_parts: &[String],
) -> Result<Note, CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let content = resolve_note_content(content_parts)?.unwrap_or_default();
    let draft = Note::new(title.trim(), content);
    if draft.is_empty() {
        return Err(CliError::EmptyNote);
    }

    let category_id = category
        .map(|category| resolve_category(category, notebook))
        .transpose()?;
    let note = notebook
        .create_note(draft.title, draft.content, category_id)
        .await?;

    println!("{}", note.id);
    Ok(note)
}

pub fn run_list<S, N>(
    notebook: &Notebook<S, N>,
    category: Option<&str>,
    tag: Option<&str>,
    search: Option<&str>,
    limit: Option<usize>,
    as_json: bool,
) -> Result<(), CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let notes = list_notes(notebook, category, tag, search, limit)?;

    if as_json {
        let json_items = notes
            .iter()
            .map(|note| note_to_list_item(note, notebook.categories(), notebook.tags()))
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for line in format_note_lines(&notes, notebook.tags()) {
            println!("{line}");
        }
    }

    Ok(())
}

pub async fn run_show<S, N>(notebook: &Notebook<S, N>, id: &str, as_json: bool) -> Result<(), CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let note_id = resolve_note(id, notebook)?;
    let Some(note) = notebook.note(&note_id) else {
        return Err(CliError::NoteNotFound(id.to_string()));
    };

    if as_json {
        let item = note_to_list_item(note, notebook.categories(), notebook.tags());
        println!("{}", serde_json::to_string_pretty(&item)?);
        return Ok(());
    }

    let category = note
        .category_id
        .as_ref()
        .and_then(|id| notebook.categories().iter().find(|c| &c.id == id))
        .map_or("-", |category| category.name.as_str());
    let tags = render_tags(note, notebook.tags());
    let reminder = match note.reminder {
        Some(at) => {
            let state = notebook.reminder_state(&note.id).await?;
            format!("{} ({state:?})", format_timestamp(at))
        }
        None => "-".to_string(),
    };

    println!("id:        {}", note.id);
    println!("title:     {}", note.title);
    println!("category:  {category}");
    println!("tags:      {}", if tags.is_empty() { "-" } else { tags.as_str() });
    println!("pinned:    {}", note.is_pinned);
    println!("reminder:  {reminder}");
    println!("created:   {}", format_timestamp(note.created_at));
    println!("updated:   {}", format_timestamp(note.updated_at));
    for (index, image) in note.images.iter().enumerate() {
        println!(
            "image {index}:   {} bytes  {}",
            image.data.len(),
            image.description
        );
    }
    if !note.content.is_empty() {
        println!();
        println!("{}", note.content);
    }
    Ok(())
}

pub async fn run_edit<S, N>(
    notebook: &mut Notebook<S, N>,
    id: &str,
    title: Option<String>,
    content: Option<String>,
    category: Option<&str>,
    no_category: bool,
) -> Result<Note, CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    if title.is_none() && content.is_none() && category.is_none() && !no_category {
        return Err(CliError::NothingToEdit);
    }

    let note_id = resolve_note(id, notebook)?;
    let content = match content.as_deref() {
        Some("-") => Some(read_piped_stdin()?.unwrap_or_default()),
        _ => content,
    };
    let category_id = category
        .map(|category| resolve_category(category, notebook))
        .transpose()?;

    let updated = notebook
        .update_note(&note_id, |note| {
            if no_category {
                note.clear_category();
            }
            if title.is_some() || content.is_some() || category_id.is_some() {
                note.update(title, content, category_id);
            }
        })
        .await?;

    println!("{}", updated.id);
    Ok(updated)
}

pub async fn run_pin<S, N>(notebook: &mut Notebook<S, N>, id: &str) -> Result<Note, CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let note_id = resolve_note(id, notebook)?;
    let note = notebook.toggle_pin(&note_id).await?;

    if note.is_pinned {
        println!("Pinned {}", note.id);
    } else {
        println!("Unpinned {}", note.id);
    }
    Ok(note)
}

pub async fn run_delete<S, N>(notebook: &mut Notebook<S, N>, id: &str) -> Result<(), CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let note_id = resolve_note(id, notebook)?;
    let removed = notebook.delete_note(&note_id).await?;

    println!("{}", removed.id);
    Ok(())
}
