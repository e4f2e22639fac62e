//! `travelform` - CLI for customer travel data entry
//!
//! This binary fills in the customer form from flags or interactively,
//! submits it to the spreadsheet endpoint and shows the locally stored list.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use travelform::cli::{Cli, Command, ConfigCommand, StatusCommand};
use travelform::mirror::{LocalRecordStore, RecordMirror};
use travelform::render::render;
use travelform::{
    init_logging, Config, Form, HttpEndpoint, NoticeBoard, NoticeKind, Storage, Submitter,
};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Submit(cmd) => {
            let form = cmd.to_form();
            submit(&config, form, cmd.foto).await
        }
        Command::Entry(cmd) => {
            let mut form = Form::new();
            {
                let stdin = std::io::stdin();
                let mut input = stdin.lock();
                let mut output = std::io::stdout();
                form.prompt(&mut input, &mut output)?;
            }
            submit(&config, form, cmd.foto).await
        }
        Command::List(cmd) => {
            let mirror = open_mirror(&config)?;
            let mut stdout = std::io::stdout().lock();
            render(mirror.records(), cmd.format.into(), &mut stdout)?;
            stdout.flush()?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Status(cmd) => {
            handle_status(&config, &cmd)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Config(cmd) => handle_config(&config, cli.config, cmd),
    }
}

fn open_mirror(config: &Config) -> anyhow::Result<RecordMirror<LocalRecordStore>> {
    let path = config.database_path();
    let storage = Storage::open(&path)
        .with_context(|| format!("opening local storage at {}", path.display()))?;
    let mirror = RecordMirror::open(LocalRecordStore::new(storage, &config.storage.key))?;
    Ok(mirror)
}

async fn submit(
    config: &Config,
    mut form: Form,
    foto: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    if let Some(path) = foto {
        if let Err(e) = form.attach_photo(&path).await {
            eprintln!("{}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    }

    let endpoint = HttpEndpoint::new(config.endpoint_url()?)?;
    let mut submitter = Submitter::new(endpoint, open_mirror(config)?)
        .with_sheet(&config.endpoint.sheet)
        .with_notices(NoticeBoard::new(config.notice_ttl()));

    let result = submitter.submit(&mut form).await;

    if let Some(notice) = submitter.notices().current() {
        match notice.kind {
            NoticeKind::Success => println!("{notice}"),
            NoticeKind::Failure => eprintln!("{notice}"),
        }
    }

    match result {
        Ok(record) => {
            println!("Data Tersimpan ({})", submitter.mirror().len());
            if let Some(link) = record.photo_link() {
                println!("Foto Passport: {link}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => Ok(ExitCode::FAILURE),
    }
}

fn handle_status(config: &Config, cmd: &StatusCommand) -> anyhow::Result<()> {
    let mirror = open_mirror(config)?;
    let storage = mirror.store().storage();
    let stats = storage.stats()?;
    let last_write = storage.updated_at(&config.storage.key)?;
    let keys = storage.keys()?;

    if cmd.json {
        let status = serde_json::json!({
            "database_path": config.database_path(),
            "storage_key": config.storage.key,
            "records": mirror.len(),
            "stored_keys": keys,
            "last_write": last_write,
            "db_size_bytes": stats.db_size_bytes,
            "endpoint": config.endpoint.url,
            "sheet": config.endpoint.sheet,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("travelform status");
        println!("-----------------");
        println!("Database:      {}", config.database_path().display());
        println!("Storage key:   {}", config.storage.key);
        println!("Records:       {}", mirror.len());
        println!("Stored keys:   {}", keys.join(", "));
        match last_write {
            Some(at) => println!("Last write:    {}", at.to_rfc3339()),
            None => println!("Last write:    never"),
        }
        println!("Database size: {} bytes", stats.db_size_bytes);
        println!("Endpoint:      {}", config.endpoint.url);
        println!("Sheet:         {}", config.endpoint.sheet);
    }
    Ok(())
}

fn handle_config(
    config: &Config,
    config_path: Option<PathBuf>,
    cmd: ConfigCommand,
) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Endpoint]");
                println!("  URL:                {}", config.endpoint.url);
                println!("  Sheet:              {}", config.endpoint.sheet);
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Key:                {}", config.storage.key);
                println!();
                println!("[Notice]");
                println!("  TTL (seconds):      {}", config.notice.ttl_secs);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::resolve_config_path(config_path).display());
        }
        ConfigCommand::Validate { file } => {
            let path = Config::resolve_config_path(file.or(config_path));
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
