use chrono::{Duration, Utc};
use notepad_core::db::{MemorySlotRepository, SlotRepository};
use notepad_core::reminder::{
    AuthorizationStatus, InMemoryNotificationCenter, NotificationCenter, ReminderScheduler,
    SlotNotificationCenter,
};
use notepad_core::store::NoteStore;
use notepad_core::{Note, Notebook, SettingValue};
use pretty_assertions::assert_eq;

use crate::commands::category::{category_list_items, run_category_create, run_category_delete};
use crate::commands::common::{
    format_relative_time, format_timestamp, list_notes, normalize_content,
    normalize_note_identifier, note_preview, parse_reminder_time, resolve_note,
};
use crate::commands::image::{run_image_add, run_image_remove};
use crate::commands::note::{run_add, run_delete, run_edit, run_pin};
use crate::commands::remind::{run_remind_clear, run_remind_due, run_remind_set};
use crate::commands::settings::{run_settings_get, run_settings_set, run_settings_unset};
use crate::commands::tag::{
    run_tag_add, run_tag_create, run_tag_delete, run_tag_remove, tag_list_items,
};
use crate::error::CliError;

type TestNotebook = Notebook<MemorySlotRepository, InMemoryNotificationCenter>;

async fn test_notebook() -> TestNotebook {
    Notebook::open(
        NoteStore::new(MemorySlotRepository::new()),
        ReminderScheduler::new(InMemoryNotificationCenter::authorized()),
    )
    .await
    .unwrap()
}

async fn add<S, N>(notebook: &mut Notebook<S, N>, title: &str, content: &str) -> Note
where
    S: SlotRepository,
    N: NotificationCenter,
{
    notebook.create_note(title, content, None).await.unwrap()
}

#[test]
fn normalize_content_trims_and_rejects_empty() {
    assert_eq!(normalize_content("  hello  "), Some("hello".to_string()));
    assert_eq!(normalize_content(" \n\t "), None);
}

#[test]
fn normalize_note_identifier_rejects_blank() {
    assert_eq!(normalize_note_identifier(" abc ").unwrap(), "abc");
    assert!(matches!(
        normalize_note_identifier("   "),
        Err(CliError::EmptyNoteId)
    ));
}

#[test]
fn format_relative_time_units() {
    let now = 10_000_000;
    assert_eq!(format_relative_time(now - 30_000, now), "just now");
    assert_eq!(format_relative_time(now - 120_000, now), "2m ago");
    assert_eq!(format_relative_time(now - 2 * 60 * 60_000, now), "2h ago");
}

#[test]
fn note_preview_prefers_title_and_truncates() {
    let titled = Note::new("Groceries", "milk\neggs");
    assert_eq!(note_preview(&titled, 40), "Groceries");

    let untitled = Note::new("", "This is a very long sentence that should be shortened");
    assert_eq!(note_preview(&untitled, 20), "This is a very lo...");
}

#[test]
fn parse_reminder_time_accepts_rfc3339() {
    assert_eq!(
        parse_reminder_time("2030-01-01T09:30:00Z").unwrap(),
        1_893_490_200_000
    );
}

#[test]
fn parse_reminder_time_local_round_trip() {
    let at = parse_reminder_time("2030-06-15 14:45").unwrap();
    assert_eq!(format_timestamp(at), "2030-06-15 14:45");
}

#[test]
fn parse_reminder_time_rejects_garbage() {
    assert!(matches!(
        parse_reminder_time("tomorrow-ish"),
        Err(CliError::InvalidReminderTime(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn add_uses_default_or_named_category() {
    let mut notebook = test_notebook().await;
    let work = run_category_create(&mut notebook, "Work").await.unwrap();

    let plain = add(&mut notebook, "Plain", "").await;
    let filed = run_add(&mut notebook, "Filed", Some("Work"), &["body".to_string()])
        .await
        .unwrap();

    assert_eq!(
        plain.category_id.as_ref(),
        Some(&notebook.default_category().id)
    );
    assert_eq!(filed.category_id, Some(work.id));
    assert_eq!(filed.content, "body");
}

#[tokio::test(flavor = "multi_thread")]
async fn add_rejects_unknown_category() {
    let mut notebook = test_notebook().await;
    assert!(matches!(
        run_add(&mut notebook, "x", Some("Nope"), &["y".to_string()]).await,
        Err(CliError::CategoryNotFound(_))
    ));
    assert!(notebook.notes().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn resolve_note_supports_exact_and_prefix_id() {
    let mut notebook = test_notebook().await;
    let note = add(&mut notebook, "Only", "").await;
    let id = note.id.as_str();

    assert_eq!(resolve_note(id, &notebook).unwrap(), note.id);
    assert_eq!(resolve_note(&id[..id.len() - 1], &notebook).unwrap(), note.id);
}

#[tokio::test(flavor = "multi_thread")]
async fn resolve_note_rejects_ambiguous_prefix() {
    let mut notebook = test_notebook().await;
    let first = add(&mut notebook, "First", "").await;
    add(&mut notebook, "Second", "").await;

    let prefix = &first.id.as_str()[..1];
    let error = resolve_note(prefix, &notebook).unwrap_err();
    assert!(matches!(error, CliError::AmbiguousNoteId(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn resolve_note_rejects_missing_note() {
    let notebook = test_notebook().await;
    assert!(matches!(
        resolve_note("missing", &notebook),
        Err(CliError::NoteNotFound(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_notes_filters_by_tag_search_and_limit() {
    let mut notebook = test_notebook().await;
    let meeting = add(&mut notebook, "Meeting", "budget").await;
    add(&mut notebook, "Shopping", "milk").await;
    add(&mut notebook, "Gym", "legs").await;
    run_tag_create(&mut notebook, "urgent").await.unwrap();
    run_tag_add(&mut notebook, meeting.id.as_str(), "urgent")
        .await
        .unwrap();

    let tagged = list_notes(&notebook, None, Some("urgent"), None, None).unwrap();
    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0].id, meeting.id);

    let by_tag_name = list_notes(&notebook, None, None, Some("URG"), None).unwrap();
    assert_eq!(by_tag_name.len(), 1);

    let limited = list_notes(&notebook, None, None, None, Some(2)).unwrap();
    assert_eq!(limited.len(), 2);

    assert!(matches!(
        list_notes(&notebook, None, Some("ghost"), None, None),
        Err(CliError::TagNotFound(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_notes_trims_search_argument() {
    let mut notebook = test_notebook().await;
    add(&mut notebook, "Meeting", "budget").await;
    add(&mut notebook, "Gym", "legs").await;

    let found = list_notes(&notebook, None, None, Some("  meet "), None).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Meeting");

    let blank = list_notes(&notebook, None, None, Some("   "), None).unwrap();
    assert_eq!(blank.len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_notes_puts_pinned_first() {
    let mut notebook = test_notebook().await;
    let older = add(&mut notebook, "Older", "").await;
    add(&mut notebook, "Newer", "").await;
    run_pin(&mut notebook, older.id.as_str()).await.unwrap();

    let notes = list_notes(&notebook, None, None, None, None).unwrap();
    assert_eq!(notes[0].id, older.id);
    assert!(notes[0].is_pinned);
}

#[tokio::test(flavor = "multi_thread")]
async fn edit_updates_fields_and_category() {
    let mut notebook = test_notebook().await;
    let note = add(&mut notebook, "Draft", "old").await;
    run_category_create(&mut notebook, "Work").await.unwrap();

    let edited = run_edit(
        &mut notebook,
        note.id.as_str(),
        Some("Final".to_string()),
        Some("new".to_string()),
        Some("Work"),
        false,
    )
    .await
    .unwrap();
    assert_eq!(edited.title, "Final");
    assert_eq!(edited.content, "new");
    assert!(edited.updated_at >= note.updated_at);

    let detached = run_edit(&mut notebook, note.id.as_str(), None, None, None, true)
        .await
        .unwrap();
    assert_eq!(detached.category_id, None);

    assert!(matches!(
        run_edit(&mut notebook, note.id.as_str(), None, None, None, false).await,
        Err(CliError::NothingToEdit)
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_note_by_prefix() {
    let mut notebook = test_notebook().await;
    let note = add(&mut notebook, "Gone", "").await;
    let prefix = &note.id.as_str()[..note.id.as_str().len() - 2];

    run_delete(&mut notebook, prefix).await.unwrap();

    assert!(notebook.notes().is_empty());
    assert!(matches!(
        run_delete(&mut notebook, note.id.as_str()).await,
        Err(CliError::NoteNotFound(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn image_add_and_remove_keep_pairs_aligned() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.png");
    let second = dir.path().join("second.png");
    std::fs::write(&first, [1_u8, 2, 3]).unwrap();
    std::fs::write(&second, [9_u8]).unwrap();

    let mut notebook = test_notebook().await;
    let note = add(&mut notebook, "Photos", "").await;
    let id = note.id.as_str();

    run_image_add(&mut notebook, id, &first, "front").await.unwrap();
    run_image_add(&mut notebook, id, &second, "back").await.unwrap();
    let note = run_image_remove(&mut notebook, id, 0).await.unwrap();

    assert_eq!(note.images.len(), 1);
    assert_eq!(note.images[0].data, vec![9_u8]);
    assert_eq!(note.images[0].description, "back");

    assert!(matches!(
        run_image_remove(&mut notebook, id, 5).await,
        Err(CliError::ImageIndexOutOfRange(5))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn tag_delete_refused_while_in_use() {
    let mut notebook = test_notebook().await;
    let note = add(&mut notebook, "Taxes", "").await;
    run_tag_create(&mut notebook, "finance").await.unwrap();
    run_tag_add(&mut notebook, note.id.as_str(), "finance")
        .await
        .unwrap();

    let items = tag_list_items(&notebook);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].notes, 1);

    assert!(matches!(
        run_tag_delete(&mut notebook, "finance").await,
        Err(CliError::Core(notepad_core::Error::InUse(_, 1)))
    ));

    run_tag_remove(&mut notebook, note.id.as_str(), "finance")
        .await
        .unwrap();
    run_tag_delete(&mut notebook, "finance").await.unwrap();
    assert!(notebook.tags().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn category_delete_refused_while_in_use() {
    let mut notebook = test_notebook().await;
    run_category_create(&mut notebook, "Home").await.unwrap();
    let note = run_add(&mut notebook, "Plumber", Some("Home"), &["leak".to_string()])
        .await
        .unwrap();

    assert!(matches!(
        run_category_delete(&mut notebook, "Home").await,
        Err(CliError::Core(notepad_core::Error::InUse(_, 1)))
    ));

    run_delete(&mut notebook, note.id.as_str()).await.unwrap();
    run_category_delete(&mut notebook, "Home").await.unwrap();

    let items = category_list_items(&notebook);
    assert_eq!(items.len(), 1);
    assert!(items[0].is_default);
}

#[tokio::test(flavor = "multi_thread")]
async fn remind_set_and_clear() {
    let mut notebook = test_notebook().await;
    let note = add(&mut notebook, "Dentist", "").await;

    let reminded = run_remind_set(&mut notebook, note.id.as_str(), "2030-01-01T09:30:45Z")
        .await
        .unwrap();
    assert!(reminded.is_reminder_active());
    assert_eq!(notebook.pending_reminders().await.unwrap().len(), 1);

    let cleared = run_remind_clear(&mut notebook, note.id.as_str())
        .await
        .unwrap();
    assert_eq!(cleared.reminder, None);
    assert!(notebook.pending_reminders().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn remind_set_with_denied_permission_rolls_back() {
    let mut notebook = Notebook::open(
        NoteStore::new(MemorySlotRepository::new()),
        ReminderScheduler::new(InMemoryNotificationCenter::denying()),
    )
    .await
    .unwrap();
    let note = run_add(&mut notebook, "Dentist", None, &["x".to_string()])
        .await
        .unwrap();

    let error = run_remind_set(&mut notebook, note.id.as_str(), "2030-01-01T09:30:00Z")
        .await
        .unwrap_err();
    assert!(matches!(error, CliError::Core(notepad_core::Error::Reminder(_))));
    assert!(!notebook.note(&note.id).unwrap().is_reminder_active());
}

#[tokio::test(flavor = "multi_thread")]
async fn remind_due_dequeues_past_reminders() {
    let slots = MemorySlotRepository::new();
    let center = SlotNotificationCenter::new(slots.clone(), AuthorizationStatus::NotDetermined);
    let mut notebook = Notebook::open(NoteStore::new(slots), ReminderScheduler::new(center))
        .await
        .unwrap();

    let past = add(&mut notebook, "Past", "").await;
    let future = add(&mut notebook, "Future", "").await;
    let past_at = (Utc::now() - Duration::hours(1)).to_rfc3339();
    let future_at = (Utc::now() + Duration::days(1)).to_rfc3339();
    run_remind_set(&mut notebook, past.id.as_str(), &past_at)
        .await
        .unwrap();
    run_remind_set(&mut notebook, future.id.as_str(), &future_at)
        .await
        .unwrap();

    let due = run_remind_due(&notebook).await.unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].body, "Past");

    let pending = notebook.pending_reminders().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].body, "Future");
}

#[tokio::test(flavor = "multi_thread")]
async fn settings_set_get_unset() {
    let mut notebook = test_notebook().await;

    let value = run_settings_set(&mut notebook, "font_size", "14").await.unwrap();
    assert_eq!(value, SettingValue::Integer(14));
    assert_eq!(
        run_settings_get(&notebook, "font_size").unwrap(),
        SettingValue::Integer(14)
    );

    run_settings_unset(&mut notebook, "font_size").await.unwrap();
    assert!(matches!(
        run_settings_get(&notebook, "font_size"),
        Err(CliError::SettingNotFound(_))
    ));
    assert!(matches!(
        run_settings_set(&mut notebook, " ", "x").await,
        Err(CliError::EmptySettingKey)
    ));
}
