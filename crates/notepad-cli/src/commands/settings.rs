use notepad_core::db::SlotRepository;
use notepad_core::reminder::NotificationCenter;
use notepad_core::{Notebook, SettingValue};

use crate::error::CliError;

pub fn run_settings_list<S, N>(notebook: &Notebook<S, N>, as_json: bool) -> Result<(), CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    if as_json {
        println!("{}", serde_json::to_string_pretty(notebook.settings())?);
    } else {
        for (key, value) in notebook.settings() {
            println!("{key} = {value}");
        }
    }
    Ok(())
}

pub fn run_settings_get<S, N>(notebook: &Notebook<S, N>, key: &str) -> Result<SettingValue, CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let value = notebook
        .settings()
        .get(key)
        .cloned()
        .ok_or_else(|| CliError::SettingNotFound(key.to_string()))?;
    println!("{value}");
    Ok(value)
}

pub async fn run_settings_set<S, N>(
    notebook: &mut Notebook<S, N>,
    key: &str,
    raw_value: &str,
) -> Result<SettingValue, CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::EmptySettingKey);
    }

    let value = SettingValue::parse(raw_value);
    notebook.set_setting(key, value.clone()).await?;
    println!("{key} = {value}");
    Ok(value)
}

pub async fn run_settings_unset<S, N>(notebook: &mut Notebook<S, N>, key: &str) -> Result<(), CliError>
where
    S: SlotRepository,
    N: NotificationCenter,
{
    if notebook.remove_setting(key).await?.is_none() {
        return Err(CliError::SettingNotFound(key.to_string()));
    }
    println!("Removed {key}");
    Ok(())
}
