//! CLI command implementations

use crate::selector::SubjectSelector;
use crate::{Cli, Commands};
use anyhow::{Context, Result, bail};
use serde_json::json;
use spright_core::{
    Config, DocumentSymbol, DocumentSync, InputType, RopeBuffer, SubjectId, SubjectKind,
    SyncError, SyncOptions, TextBuffer, compute_patch,
};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub fn run(cli: Cli) -> Result<()> {
    let options = match &cli.options {
        Some(path) => SyncOptions::load(path)
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => SyncOptions::default(),
    };

    match cli.command {
        Commands::Outline { file } => outline_command(&file, options),
        Commands::Subjects { file } => subjects_command(&file, options),
        Commands::Get {
            file,
            subject,
            property,
        } => get_command(&file, options, subject, &property),
        Commands::Set {
            file,
            subject,
            property,
            parameters,
            dry_run,
        } => edit_file(&file, options, subject, dry_run, |config, id| {
            config.set_property(id, &property, &parameters)
        }),
        Commands::Remove {
            file,
            subject,
            property,
            dry_run,
        } => edit_file(&file, options, subject, dry_run, |config, id| {
            config.remove_property(id, &property)
        }),
        Commands::Clear {
            file,
            subject,
            dry_run,
        } => edit_file(&file, options, subject, dry_run, |config, id| {
            config.clear_subject(id)
        }),
        Commands::Delete {
            file,
            subject,
            dry_run,
        } => edit_file(&file, options, subject, dry_run, |config, id| {
            config.remove_subject(id)
        }),
        Commands::InputType {
            file,
            subject,
            new_type,
            dry_run,
        } => match new_type {
            Some(new_type) => edit_file(&file, options, subject, dry_run, |config, id| {
                config.replace_input_type(id, InputType::from(new_type))
            }),
            None => {
                let config = load_config(&file, options)?;
                let id = resolve(&config, subject, Some(SubjectKind::Input))?;
                println!("{}", config.input_type(id).token());
                Ok(())
            }
        },
        Commands::SpriteId {
            file,
            subject,
            id: new_id,
            dry_run,
        } => match new_id {
            Some(new_id) => edit_file(&file, options, subject, dry_run, |config, id| {
                config.replace_sprite_id(id, &new_id)
            }),
            None => {
                let config = load_config(&file, options)?;
                let id = resolve(&config, subject, Some(SubjectKind::Sprite))?;
                println!("{}", config.sprite_id(id));
                Ok(())
            }
        },
        Commands::Diff { current, proposed } => diff_command(&current, &proposed),
    }
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    String::from_utf8(bytes)
        .map_err(|e| SyncError::from(e.utf8_error()))
        .with_context(|| format!("reading {}", path.display()))
}

fn load_config(path: &Path, options: SyncOptions) -> Result<Config> {
    let mut sync = DocumentSync::new(options);
    sync.refresh(&read_text(path)?);
    Ok(sync.config().clone())
}

fn resolve(config: &Config, selector: SubjectSelector, kind: Option<SubjectKind>) -> Result<SubjectId> {
    let id = selector.resolve(config)?;
    if let Some(kind) = kind
        && config.subjects().kind(id) != Some(kind)
    {
        bail!("'{selector}' is not a {}", kind.token());
    }
    Ok(id)
}

/// Apply one model edit to `path` through a [`DocumentSync`] session and print the patch.
fn edit_file<F>(
    path: &Path,
    options: SyncOptions,
    selector: SubjectSelector,
    dry_run: bool,
    edit: F,
) -> Result<()>
where
    F: FnOnce(&mut Config, SubjectId) -> bool,
{
    let mut buffer = RopeBuffer::new(&read_text(path)?);
    let mut sync = DocumentSync::attach(&buffer, options);
    let id = resolve(sync.config(), selector, None)?;

    let (changed, patch) = sync.edit(&mut buffer, |config| edit(config, id))?;
    if !changed {
        info!(subject = %selector, "nothing to change");
    }

    match patch {
        Some(patch) => {
            println!("{}", serde_json::to_string_pretty(&patch)?);
            if dry_run {
                debug!("dry run, not writing {}", path.display());
            } else {
                fs::write(path, buffer.text())
                    .with_context(|| format!("writing {}", path.display()))?;
                info!(file = %path.display(), "updated");
            }
        }
        None => println!("null"),
    }
    Ok(())
}

fn print_symbol(symbol: &DocumentSymbol, depth: usize) {
    println!(
        "{:indent$}{} {}  (line {})",
        "",
        symbol.name,
        symbol.detail,
        symbol.line + 1,
        indent = depth * 2
    );
    for child in &symbol.children {
        print_symbol(child, depth + 1);
    }
}

fn outline_command(path: &Path, options: SyncOptions) -> Result<()> {
    let config = load_config(path, options)?;
    for symbol in &config.outline().symbols {
        print_symbol(symbol, 0);
    }
    Ok(())
}

fn subjects_command(path: &Path, options: SyncOptions) -> Result<()> {
    let config = load_config(path, options)?;
    let line = |id: SubjectId| {
        config
            .line_no(id)
            .map_or_else(|| "-".to_string(), |n| (n + 1).to_string())
    };

    for (n, sheet) in config.sheets().enumerate() {
        println!("sheet:{n}\tline {}", line(sheet));
    }
    for (i, input) in config.inputs().enumerate() {
        let file = config.subject_parameter(input, 0).unwrap_or_default();
        println!(
            "input:{i}\tline {}\t{}\t{}",
            line(input),
            config.input_type(input).token(),
            file
        );
        for (j, sprite) in config.sprites(input).enumerate() {
            println!("sprite:{i}.{j}\tline {}\t{}", line(sprite), config.sprite_id(sprite));
        }
    }
    Ok(())
}

fn get_command(
    path: &Path,
    options: SyncOptions,
    selector: SubjectSelector,
    property: &str,
) -> Result<()> {
    let config = load_config(path, options)?;
    let id = resolve(&config, selector, None)?;
    let report = json!({
        "direct": config.property_parameters(id, property),
        "common": config.common_property_parameters(id, property),
        "effective": config.effective_property_parameters(id, property),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn diff_command(current: &Path, proposed: &Path) -> Result<()> {
    let current_text = read_text(current)?;
    let proposed_text = read_text(proposed)?;
    let proposed_text = spright_core::LineEnding::detect_in_text(&proposed_text).normalize(&proposed_text);

    let patch = compute_patch(&current_text, &proposed_text);
    println!("{}", serde_json::to_string_pretty(&patch)?);
    Ok(())
}
