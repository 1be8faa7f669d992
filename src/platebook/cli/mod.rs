//! # CLI Layer
//!
//! One possible client for platebook. This is the only place that:
//! - Parses arguments
//! - Prompts on stdin
//! - Writes to stdout/stderr
//! - Installs the logging subscriber
//!
//! ## Structure
//!
//! - `run()`: parses, builds the context, dispatches (called by `main.rs`)
//! - `handle_*()`: per-command handlers that call the API and print the result
//! - `render`: tables and messages
//! - `setup`: clap definitions and grouped help

mod logging;
mod render;
mod setup;

use clap::Parser;
use platebook::api::{AddCheck, BackupTarget, ConfigAction, PlatebookApi};
use platebook::config::PlatebookConfig;
use platebook::error::Result;
use platebook::init::{initialize, resolve_data_dir};
use platebook::model::{RecordForm, SearchMode, SortOrder};
use platebook::store::sqlite::SqliteStore;
use render::{print_config, print_messages, print_records};
use setup::{
    print_grouped_help, print_subcommand_help, BackupFormatArg, Cli, Commands, DataCommands,
    MiscCommands, RecordCommands, SortArg,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;

const HOME_ENV: &str = "PLATEBOOK_HOME";

struct AppContext {
    api: PlatebookApi<SqliteStore>,
    config: PlatebookConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.help {
        if cli.command.is_none() {
            print_grouped_help();
        } else {
            print_subcommand_help(&cli.command);
        }
        return Ok(());
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Records(cmd)) => match cmd {
            RecordCommands::List { sort } => handle_list(&ctx, sort),
            RecordCommands::Search {
                first,
                second,
                phone,
                sort,
            } => handle_search(&ctx, &first, &second, phone, sort),
            RecordCommands::Add {
                part1,
                part2,
                phone,
                note,
                yes,
                no,
            } => {
                let form = RecordForm::new(part1, part2, phone, note);
                let answer = if yes {
                    Some(true)
                } else if no {
                    Some(false)
                } else {
                    None
                };
                handle_add(&mut ctx, &form, answer)
            }
            RecordCommands::Edit {
                id,
                part1,
                part2,
                phone,
                note,
            } => handle_edit(&mut ctx, id, &RecordForm::new(part1, part2, phone, note)),
            RecordCommands::Update { plate, phone, note } => {
                handle_update(&mut ctx, &plate, &phone, &note)
            }
            RecordCommands::Delete { plate, yes } => handle_delete(&mut ctx, &plate, yes),
        },
        Some(Commands::Data(cmd)) => match cmd {
            DataCommands::Backup { format, output } => handle_backup(&ctx, format, output),
            DataCommands::Init => handle_init(&mut ctx),
        },
        Some(Commands::Misc(MiscCommands::Config { key, value })) => {
            handle_config(&ctx, key, value)
        }
        None => handle_list(&ctx, None),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(std::env::var_os(HOME_ENV).map(PathBuf::from))?;
    logging::init_logging(&data_dir, cli.verbose);

    let ctx = initialize(data_dir, cli.db.clone())?;
    Ok(AppContext {
        api: ctx.api,
        config: ctx.config,
    })
}

/// Asks a yes/no question on stdout and reads the answer from stdin.
/// Anything but `y`/`yes` (including end of input) is a no.
fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(is_yes(&line))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn handle_list(ctx: &AppContext, sort: Option<SortArg>) -> Result<()> {
    let result = ctx.api.list_records(sort.map(SortOrder::from))?;
    print_records(&result.listed_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(
    ctx: &AppContext,
    first: &str,
    second: &str,
    phone: bool,
    sort: Option<SortArg>,
) -> Result<()> {
    let mode = if phone {
        SearchMode::Phone
    } else {
        SearchMode::Plate
    };
    let result = ctx
        .api
        .search_records(mode, first, second, sort.map(SortOrder::from))?;
    print_records(&result.listed_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, form: &RecordForm, answer: Option<bool>) -> Result<()> {
    let confirmed = match ctx.api.check_add(form)? {
        AddCheck::Clear => true,
        AddCheck::NeedsConfirmation { existing } => match answer {
            Some(decided) => decided,
            None => {
                println!("This plate is already registered:");
                print_records(&existing);
                confirm("Save it with the new phone number as well?")?
            }
        },
    };

    let result = ctx.api.add_record(form, confirmed)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, id: i64, form: &RecordForm) -> Result<()> {
    let result = ctx.api.edit_record(id, form)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(ctx: &mut AppContext, plate: &str, phone: &str, note: &str) -> Result<()> {
    let result = ctx.api.update_plate(plate, phone, note)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, plate: &str, yes: bool) -> Result<()> {
    if !yes {
        let doomed = ctx.api.preview_delete(plate)?;
        if !doomed.is_empty() {
            print_records(&doomed);
            if !confirm("Delete these records?")? {
                println!("Aborted.");
                return Ok(());
            }
        }
    }

    let result = ctx.api.delete_plate(plate)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_backup(ctx: &AppContext, format: BackupFormatArg, output: Option<PathBuf>) -> Result<()> {
    let dest = match (output, &ctx.config.backup_dir) {
        (Some(path), _) => BackupTarget::Path(path),
        (None, Some(dir)) => BackupTarget::Directory(dir.clone()),
        (None, None) => BackupTarget::Directory(std::env::current_dir()?),
    };
    let result = ctx.api.backup(format.into(), &dest)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
    }
}
