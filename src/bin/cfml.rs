//! Command-line interface for cfml
//! This binary checks, formats, queries and edits cfml journal files.
//!
//! Usage:
//!   cfml check `<path>`                                   - Parse and report errors
//!   cfml fmt `<path>` [--write] [--sort]                  - Print or write the canonical form
//!   cfml dates `<path>`                                   - List block dates
//!   cfml find `<path>` [--sender] [--receiver] [--text] [--date] [--format]
//!   cfml add `<path>` --date --sender [--receiver] --body - Append a message
//!   cfml edit `<path>` --date --position [--sender] [--receiver | --clear-receiver] [--body]
//!   cfml delete `<path>` --date [--position]              - Delete a message or a whole block
//!   cfml inspect `<path>` [--format]                      - Render with a registered format
//!
//! Every command takes `--config <file>` to layer a TOML file over the defaults.

use chrono::NaiveDate;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::Path;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use cfml::cfml::config::{CfmlConfig, Loader};
use cfml::cfml::formats::{CfmlFormatter, FormatRegistry, Serializer};
use cfml::cfml::loader;
use cfml::{Document, Grammar, MessageAddress, MessageEdit, Query, Result};

fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cli() -> Command {
    let path = || {
        Arg::new("path")
            .help("Path to the cfml file")
            .required(true)
            .index(1)
    };
    let date = |required: bool| {
        Arg::new("date")
            .long("date")
            .short('d')
            .help("Block date as YYYY-MM-DD")
            .value_parser(parse_date)
            .required(required)
    };
    let formats = FormatRegistry::with_defaults().list_formats().join(", ");
    let format = move || {
        Arg::new("format")
            .long("format")
            .short('f')
            .help(format!(
                "Output format ({formats}). Defaults to output.format from the config"
            ))
    };

    Command::new("cfml")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for checking, formatting and editing cfml files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the default configuration"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug events to stderr"),
        )
        .subcommand(
            Command::new("check")
                .about("Parse a file and report the first error")
                .arg(path()),
        )
        .subcommand(
            Command::new("fmt")
                .about("Print the canonical form of a file")
                .arg(path())
                .arg(
                    Arg::new("write")
                        .long("write")
                        .short('w')
                        .action(ArgAction::SetTrue)
                        .help("Rewrite the file in place instead of printing"),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .action(ArgAction::SetTrue)
                        .help("Order date blocks chronologically"),
                ),
        )
        .subcommand(
            Command::new("dates")
                .about("List the dates of all blocks in order")
                .arg(path()),
        )
        .subcommand(
            Command::new("find")
                .about("Print the messages matching all given filters")
                .arg(path())
                .arg(Arg::new("sender").long("sender").help("Exact sender"))
                .arg(Arg::new("receiver").long("receiver").help("Exact receiver"))
                .arg(Arg::new("text").long("text").help("Substring of the body"))
                .arg(date(false))
                .arg(format()),
        )
        .subcommand(
            Command::new("add")
                .about("Append a message, creating the file or the block if needed")
                .arg(path())
                .arg(date(true))
                .arg(Arg::new("sender").long("sender").required(true))
                .arg(Arg::new("receiver").long("receiver"))
                .arg(Arg::new("body").long("body").default_value("")),
        )
        .subcommand(
            Command::new("edit")
                .about("Change fields of one message")
                .arg(path())
                .arg(date(true))
                .arg(position(true))
                .arg(Arg::new("sender").long("sender"))
                .arg(
                    Arg::new("receiver")
                        .long("receiver")
                        .conflicts_with("clear-receiver"),
                )
                .arg(
                    Arg::new("clear-receiver")
                        .long("clear-receiver")
                        .action(ArgAction::SetTrue),
                )
                .arg(Arg::new("body").long("body")),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete one message, or the whole block when no position is given")
                .arg(path())
                .arg(date(true))
                .arg(position(false)),
        )
        .subcommand(
            Command::new("inspect")
                .about("Render a file with a registered format")
                .arg(path())
                .arg(format()),
        )
}

fn position(required: bool) -> Arg {
    Arg::new("position")
        .long("position")
        .short('p')
        .help("Zero-based position within the block")
        .value_parser(clap::value_parser!(usize))
        .required(required)
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| format!("invalid date '{value}': {e}"))
}

/// Console logging to stderr, filtered by RUST_LOG (default `warn`)
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    // Ignore a second initialization
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}

/// Shared state of one invocation
struct Context {
    config: CfmlConfig,
    grammar: Grammar,
}

impl Context {
    fn load(matches: &ArgMatches) -> Result<Self> {
        let mut loader = Loader::new();
        if let Some(path) = matches.get_one::<String>("config") {
            loader = loader.with_file(path);
        }
        let config = loader.build()?;
        let grammar = config.grammar()?;
        debug!(dialect = ?config.dialect, "loaded configuration");
        Ok(Self { config, grammar })
    }

    fn read(&self, path: &str) -> Result<Document> {
        loader::load_with(path, &self.grammar)
    }

    fn write(&self, path: &str, doc: &Document) -> Result<()> {
        loader::save_with(path, doc, &self.grammar)
    }

    fn registry(&self) -> FormatRegistry {
        let mut registry = FormatRegistry::with_defaults();
        registry.register(CfmlFormatter::new(self.grammar.clone()));
        registry
    }

    fn render(&self, doc: &Document, format: Option<&String>) -> Result<String> {
        let format = format.unwrap_or(&self.config.output.format);
        Ok(self.registry().serialize(doc, format)?)
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let ctx = Context::load(matches)?;

    match matches.subcommand() {
        Some(("check", sub)) => handle_check_command(&ctx, path_arg(sub)),
        Some(("fmt", sub)) => handle_fmt_command(
            &ctx,
            path_arg(sub),
            sub.get_flag("write"),
            sub.get_flag("sort"),
        ),
        Some(("dates", sub)) => handle_dates_command(&ctx, path_arg(sub)),
        Some(("find", sub)) => handle_find_command(&ctx, sub),
        Some(("add", sub)) => handle_add_command(&ctx, sub),
        Some(("edit", sub)) => handle_edit_command(&ctx, sub),
        Some(("delete", sub)) => handle_delete_command(&ctx, sub),
        Some(("inspect", sub)) => {
            let doc = ctx.read(path_arg(sub))?;
            println!("{}", ctx.render(&doc, sub.get_one::<String>("format"))?);
            Ok(())
        }
        _ => unreachable!(),
    }
}

fn path_arg(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("path")
        .expect("path is required by every subcommand")
}

fn date_arg(matches: &ArgMatches) -> Option<NaiveDate> {
    matches.get_one::<NaiveDate>("date").copied()
}

/// Date of a subcommand that declares `--date` as required
fn required_date(matches: &ArgMatches) -> NaiveDate {
    date_arg(matches).expect("--date is required")
}

/// Handle the check command
fn handle_check_command(ctx: &Context, path: &str) -> Result<()> {
    let doc = ctx.read(path)?;
    println!(
        "ok: {} date blocks, {} messages",
        doc.len(),
        doc.message_count()
    );
    Ok(())
}

/// Handle the fmt command
fn handle_fmt_command(ctx: &Context, path: &str, write: bool, sort: bool) -> Result<()> {
    let mut doc = ctx.read(path)?;
    if sort {
        doc.sort_chronologically();
    }
    if write {
        ctx.write(path, &doc)
    } else {
        println!("{}", Serializer::new(&ctx.grammar).serialize(&doc));
        Ok(())
    }
}

/// Handle the dates command
fn handle_dates_command(ctx: &Context, path: &str) -> Result<()> {
    let doc = ctx.read(path)?;
    for date in doc.dates() {
        println!("{}", ctx.grammar.format_date(date));
    }
    Ok(())
}

/// Handle the find command
fn handle_find_command(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    let doc = ctx.read(path_arg(matches))?;

    let mut query = Query::new();
    if let Some(sender) = matches.get_one::<String>("sender") {
        query = query.sender(sender);
    }
    if let Some(receiver) = matches.get_one::<String>("receiver") {
        query = query.receiver(receiver);
    }
    if let Some(text) = matches.get_one::<String>("text") {
        query = query.text(text);
    }
    if let Some(date) = date_arg(matches) {
        query = query.date(date);
    }

    let mut found = Document::new();
    for located in doc.find(&query) {
        found.push_message(located.date, located.message.clone());
    }
    debug!(%query, matches = found.message_count(), "find");

    if !found.is_empty() {
        println!("{}", ctx.render(&found, matches.get_one::<String>("format"))?);
    }
    Ok(())
}

/// Handle the add command
fn handle_add_command(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    let path = path_arg(matches);
    let mut doc = if Path::new(path).exists() {
        ctx.read(path)?
    } else {
        Document::new()
    };

    let date = required_date(matches);
    let sender = matches
        .get_one::<String>("sender")
        .expect("--sender is required");
    let receiver = matches.get_one::<String>("receiver").map(String::as_str);
    let body = matches
        .get_one::<String>("body")
        .map(String::as_str)
        .unwrap_or_default();

    let position = doc.add_message(date, sender, receiver, body)?;
    ctx.write(path, &doc)?;
    println!("added {}", MessageAddress::at(date, position));
    Ok(())
}

/// Handle the edit command
fn handle_edit_command(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    let path = path_arg(matches);
    let mut doc = ctx.read(path)?;

    let date = required_date(matches);
    let position = *matches
        .get_one::<usize>("position")
        .expect("--position is required");

    let mut edit = MessageEdit::new();
    if let Some(sender) = matches.get_one::<String>("sender") {
        edit = edit.sender(sender);
    }
    if let Some(receiver) = matches.get_one::<String>("receiver") {
        edit = edit.receiver(receiver);
    }
    if matches.get_flag("clear-receiver") {
        edit = edit.clear_receiver();
    }
    if let Some(body) = matches.get_one::<String>("body") {
        edit = edit.body(body);
    }

    let address = MessageAddress::at(date, position);
    doc.edit_message(&address, edit)?;
    ctx.write(path, &doc)?;
    println!("edited {}", address);
    Ok(())
}

/// Handle the delete command
fn handle_delete_command(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    let path = path_arg(matches);
    let mut doc = ctx.read(path)?;
    let date = required_date(matches);

    match matches.get_one::<usize>("position") {
        Some(&position) => {
            let address = MessageAddress::at(date, position);
            doc.delete_message(&address)?;
            println!("deleted {}", address);
        }
        None => {
            let block = doc.delete_date_block(date)?;
            println!("deleted {} with {} messages", date, block.len());
        }
    }
    ctx.write(path, &doc)
}
