use notepad_core::db::SlotRepository;
use notepad_core::query::category_note_count;
use notepad_core::reminder::NotificationCenter;
use notepad_core::{Category, Notebook};
use serde::Serialize;

use crate::commands::common::resolve_category;
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct CategoryListItem {
    pub id: String,
    pub name: String,
    pub is_default: bool,
    pub notes: usize,
}

pub async fn run_category_create<S, N>(
    notebook: &mut Notebook<S, N>,
    name: &str,
) -> Result<Category, CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let category = notebook.create_category(name).await?;
    println!("{}", category.id);
    Ok(category)
}

pub fn category_list_items<S, N>(notebook: &Notebook<S, N>) -> Vec<CategoryListItem>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    notebook
        .categories()
        .iter()
        .map(|category| CategoryListItem {
            id: category.id.to_string(),
            name: category.name.clone(),
            is_default: category.is_default(),
            notes: category_note_count(notebook.notes(), &category.id),
        })
        .collect()
}

pub fn run_category_list<S, N>(notebook: &Notebook<S, N>, as_json: bool) -> Result<(), CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let items = category_list_items(notebook);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for item in items {
            let marker = if item.is_default { "*" } else { " " };
            println!("{marker} {:<24}  {:>4}  {}", item.name, item.notes, item.id);
        }
    }
    Ok(())
}

pub async fn run_category_delete<S, N>(
    notebook: &mut Notebook<S, N>,
    category: &str,
) -> Result<(), CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let category_id = resolve_category(category, notebook)?;
    let removed = notebook.delete_category(&category_id).await?;
    println!("{}", removed.id);
    Ok(())
}
