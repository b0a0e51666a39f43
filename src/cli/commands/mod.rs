//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Parses command-specific arguments (ids, payloads)
//! 2. Calls the record store or registry
//! 3. Formats and displays output
//!
//! Handlers return `anyhow::Result` with context attached; `main` prints
//! the chain and exits with status 1.

mod completion;
mod config_cmd;
mod create;
mod delete;
mod info;
mod list;
mod show;
mod stats;
mod types;
mod update;
mod validate;

pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use create::create;
pub use delete::delete;
pub use info::info;
pub use list::list;
pub use show::show;
pub use stats::stats;
pub use types::{list as types_list, show as types_show};
pub use update::update;
pub use validate::validate;

use anyhow::{Context as _, Result};

use crate::cli::args::{Command, ConfigAction, PayloadArgs, TypesAction};
use crate::cli::Context;
use crate::core::payload::FieldPayload;
use crate::core::types::{FieldMap, RecordId};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Info => info(ctx),
        Command::Types { action } => match action {
            TypesAction::List => types_list(ctx),
            TypesAction::Show { slug } => types_show(ctx, &slug),
        },
        Command::Create {
            type_slug,
            payload,
            title,
            status,
        } => create(
            ctx,
            &type_slug,
            &payload,
            title.as_deref(),
            status.as_deref(),
        ),
        Command::List { type_slug, json } => list(ctx, type_slug.as_deref(), json),
        Command::Show { id, json } => show(ctx, &id, json),
        Command::Update {
            id,
            payload,
            status,
        } => update(ctx, &id, &payload, status.as_deref()),
        Command::Delete { id, hard } => delete(ctx, &id, hard),
        Command::Validate { file, json } => validate(ctx, &file, json),
        Command::Stats { json } => stats(ctx, json),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_get(ctx, &key),
            ConfigAction::Set { key, value } => config_set(ctx, &key, &value),
            ConfigAction::List => config_list(ctx),
        },
        Command::Completion { shell } => completion(shell),
    }
}

/// Parse a user-supplied record id.
fn parse_id(id: &str) -> Result<RecordId> {
    RecordId::new(id).with_context(|| format!("Invalid record id '{}'", id))
}

/// Load the field map from `--data` or `--file`; empty if neither is given.
fn load_payload(args: &PayloadArgs) -> Result<FieldMap> {
    let payload = match (&args.data, &args.file) {
        (_, Some(path)) => FieldPayload::File(path.clone()),
        (Some(text), None) => FieldPayload::Inline(text.clone()),
        (None, None) => return Ok(FieldMap::new()),
    };
    payload.load().context("Invalid field data")
}
