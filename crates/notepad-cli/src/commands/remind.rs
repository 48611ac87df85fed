use chrono::Utc;
use notepad_core::db::SlotRepository;
use notepad_core::reminder::{NotificationCenter, NotificationRequest, SlotNotificationCenter};
use notepad_core::{Note, Notebook};

use crate::commands::common::{format_date_time, format_timestamp, parse_reminder_time, resolve_note};
use crate::error::CliError;

pub async fn run_remind_set<S, N>(
    notebook: &mut Notebook<S, N>,
    id: &str,
    when: &str,
) -> Result<Note, CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let note_id = resolve_note(id, notebook)?;
    let at = parse_reminder_time(when)?;
    let note = notebook.set_reminder(&note_id, Some(at)).await?;

    println!("Reminder for {} set for {}", note.id, format_timestamp(at));
    Ok(note)
}

pub async fn run_remind_clear<S, N>(notebook: &mut Notebook<S, N>, id: &str) -> Result<Note, CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let note_id = resolve_note(id, notebook)?;
    let note = notebook.set_reminder(&note_id, None).await?;

    println!("Reminder for {} cleared", note.id);
    Ok(note)
}

pub async fn run_remind_pending<S, N>(notebook: &Notebook<S, N>, as_json: bool) -> Result<(), CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let pending = notebook.pending_reminders().await?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&pending)?);
    } else {
        for line in format_request_lines(&pending) {
            println!("{line}");
        }
    }
    Ok(())
}

/// Print and dequeue every reminder due now from the local queue
pub async fn run_remind_due<S>(
    notebook: &Notebook<S, SlotNotificationCenter<S>>,
) -> Result<Vec<NotificationRequest>, CliError>
where
    S: SlotRepository,
{
    let due = notebook
        .scheduler()
        .center()
        .deliver_due(Utc::now())
        .await?;

    if due.is_empty() {
        println!("No reminders due");
    }
    for line in format_request_lines(&due) {
        println!("{line}");
    }
    Ok(due)
}

pub fn format_request_lines(requests: &[NotificationRequest]) -> Vec<String> {
    requests
        .iter()
        .map(|request| {
            format!(
                "{}  {}: {}",
                format_date_time(request.fire_at),
                request.title,
                request.body
            )
        })
        .collect()
}
