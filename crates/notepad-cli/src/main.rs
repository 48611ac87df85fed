//! Notepad CLI - notes, categories, tags, images and reminders from the terminal

mod cli;
mod commands;
mod error;
#[cfg(test)]
mod tests;

use clap::Parser;
use notepad_core::AppConfig;

use crate::cli::{
    CategoryCommand, Cli, Commands, ImageCommand, RemindCommand, SettingsCommand, TagCommand,
};
use crate::commands::category::{run_category_create, run_category_delete, run_category_list};
use crate::commands::common::open_notebook;
use crate::commands::image::{run_image_add, run_image_remove};
use crate::commands::note::{run_add, run_delete, run_edit, run_list, run_pin, run_show};
use crate::commands::remind::{
    run_remind_clear, run_remind_due, run_remind_pending, run_remind_set,
};
use crate::commands::settings::{
    run_settings_get, run_settings_list, run_settings_set, run_settings_unset,
};
use crate::commands::tag::{
    run_tag_add, run_tag_create, run_tag_delete, run_tag_list, run_tag_remove,
};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("notepad=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env(cli.db_path);
    let mut notebook = open_notebook(&config).await?;

    match cli.command {
        Commands::Add {
            title,
            category,
            content,
        } => {
            run_add(&mut notebook, &title, category.as_deref(), &content).await?;
        }
        Commands::List {
            category,
            tag,
            search,
            limit,
            json,
        } => run_list(
            &notebook,
            category.as_deref(),
            tag.as_deref(),
            search.as_deref(),
            limit,
            json,
        )?,
        Commands::Show { id, json } => run_show(&notebook, &id, json).await?,
        Commands::Edit {
            id,
            title,
            content,
            category,
            no_category,
        } => {
            run_edit(
                &mut notebook,
                &id,
                title,
                content,
                category.as_deref(),
                no_category,
            )
            .await?;
        }
        Commands::Pin { id } => {
            run_pin(&mut notebook, &id).await?;
        }
        Commands::Delete { id } => run_delete(&mut notebook, &id).await?,
        Commands::Image(command) => match command {
            ImageCommand::Add {
                id,
                path,
                description,
            } => {
                run_image_add(&mut notebook, &id, &path, &description).await?;
            }
            ImageCommand::Remove { id, index } => {
                run_image_remove(&mut notebook, &id, index).await?;
            }
        },
        Commands::Tag(command) => match command {
            TagCommand::Create { name } => {
                run_tag_create(&mut notebook, &name).await?;
            }
            TagCommand::List { json } => run_tag_list(&notebook, json)?,
            TagCommand::Delete { tag } => run_tag_delete(&mut notebook, &tag).await?,
            TagCommand::Add { id, tag } => {
                run_tag_add(&mut notebook, &id, &tag).await?;
            }
            TagCommand::Remove { id, tag } => {
                run_tag_remove(&mut notebook, &id, &tag).await?;
            }
        },
        Commands::Category(command) => match command {
            CategoryCommand::Create { name } => {
                run_category_create(&mut notebook, &name).await?;
            }
            CategoryCommand::List { json } => run_category_list(&notebook, json)?,
            CategoryCommand::Delete { category } => {
                run_category_delete(&mut notebook, &category).await?;
            }
        },
        Commands::Remind(command) => match command {
            RemindCommand::Set { id, when } => {
                run_remind_set(&mut notebook, &id, &when).await?;
            }
            RemindCommand::Clear { id } => {
                run_remind_clear(&mut notebook, &id).await?;
            }
            RemindCommand::Pending { json } => run_remind_pending(&notebook, json).await?,
            RemindCommand::Due => {
                run_remind_due(&notebook).await?;
            }
        },
        Commands::Settings(command) => match command {
            SettingsCommand::List { json } => run_settings_list(&notebook, json)?,
            SettingsCommand::Get { key } => {
                run_settings_get(&notebook, &key)?;
            }
            SettingsCommand::Set { key, value } => {
                run_settings_set(&mut notebook, &key, &value).await?;
            }
            SettingsCommand::Unset { key } => run_settings_unset(&mut notebook, &key).await?,
        },
    }

    Ok(())
}
