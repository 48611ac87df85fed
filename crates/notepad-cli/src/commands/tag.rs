use notepad_core::db::SlotRepository;
use notepad_core::query::tag_note_count;
use notepad_core::reminder::NotificationCenter;
use notepad_core::{Note, Notebook, Tag};
use serde::Serialize;

use crate::commands::common::{resolve_note, resolve_tag};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct TagListItem {
    pub id: String,
    pub name: String,
    pub notes: usize,
}

pub async fn run_tag_create<S, N>(notebook: &mut Notebook<S, N>, name: &str) -> Result<Tag, CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let tag = notebook.create_tag(name).await?;
    println!("{}", tag.id);
    Ok(tag)
}

pub fn tag_list_items<S, N>(notebook: &Notebook<S, N>) -> Vec<TagListItem>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    notebook
        .tags()
        .iter()
        .map(|tag| TagListItem {
            id: tag.id.to_string(),
            name: tag.name.clone(),
            notes: tag_note_count(notebook.notes(), &tag.id),
        })
        .collect()
}

pub fn run_tag_list<S, N>(notebook: &Notebook<S, N>, as_json: bool) -> Result<(), CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let items = tag_list_items(notebook);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for item in items {
            println!("{:<24}  {:>4}  {}", item.name, item.notes, item.id);
        }
    }
    Ok(())
}

pub async fn run_tag_delete<S, N>(notebook: &mut Notebook<S, N>, tag: &str) -> Result<(), CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let tag_id = resolve_tag(tag, notebook)?;
    let removed = notebook.delete_tag(&tag_id).await?;
    println!("{}", removed.id);
    Ok(())
}

pub async fn run_tag_add<S, N>(
    notebook: &mut Notebook<S, N>,
    id: &str,
    tag: &str,
) -> Result<Note, CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let note_id = resolve_note(id, notebook)?;
    let tag_id = resolve_tag(tag, notebook)?;
    let note = notebook.tag_note(&note_id, &tag_id).await?;
    println!("{}", note.id);
    Ok(note)
}

pub async fn run_tag_remove<S, N>(
    notebook: &mut Notebook<S, N>,
    id: &str,
    tag: &str,
) -> Result<Note, CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let note_id = resolve_note(id, notebook)?;
    let tag_id = resolve_tag(tag, notebook)?;
    let note = notebook.untag_note(&note_id, &tag_id).await?;
    println!("{}", note.id);
    Ok(note)
}
