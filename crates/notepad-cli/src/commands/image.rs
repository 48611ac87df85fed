use std::path::Path;

use notepad_core::db::SlotRepository;
use notepad_core::reminder::NotificationCenter;
use notepad_core::{Note, Notebook};

use crate::commands::common::resolve_note;
use crate::error::CliError;

pub async fn run_image_add<S, N>(
    notebook: &mut Notebook<S, N>,
    id: &str,
    path: &Path,
    description: &str,
) -> Result<Note, CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let note_id = resolve_note(id, notebook)?;
    let data = std::fs::read(path)?;
    tracing::debug!("Attaching {} ({} bytes)", path.display(), data.len());

    let note = notebook
        .update_note(&note_id, |note| note.add_image(data, description.trim()))
        .await?;

    println!("{} has {} image(s)", note.id, note.images.len());
    Ok(note)
}

pub async fn run_image_remove<S, N>(
    notebook: &mut Notebook<S, N>,
    id: &str,
    index: usize,
) -> Result<Note, CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let note_id = resolve_note(id, notebook)?;
    let image_count = notebook.note(&note_id).map_or(0, |note| note.images.len());
    if index >= image_count {
        return Err(CliError::ImageIndexOutOfRange(index));
    }

    let note = notebook
        .update_note(&note_id, |note| note.remove_image(index))
        .await?;

    println!("{} has {} image(s)", note.id, note.images.len());
    Ok(note)
}
