//! marketbrief CLI: pipe a raw research report in, get a structured brief out.
//!
//! Usage:
//!   marketbrief brief --query "crm tools" report.md --html --save
//!   curl ... | marketbrief brief --search-json -q "crm tools"
//!   marketbrief show <share-token> --html > brief.html

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use marketbrief_lib::error::BriefError;
use marketbrief_lib::export::{export_html, export_markdown};
use marketbrief_lib::render::render_report_html;
use marketbrief_lib::research::build_brief;
use marketbrief_lib::search::{compose_raw_report, parse_search_response};
use marketbrief_lib::state::{export_dir, load_config, load_config_from, store_path};
use marketbrief_lib::store::{BriefStore, JsonFileStore};
use marketbrief_lib::types::Config;

#[derive(Debug, Parser)]
#[command(name = "marketbrief", version, about = "Market research briefs from raw report text")]
struct Cli {
    /// Config file (defaults to ~/.marketbrief/config.json)
    #[arg(long, env = "MARKETBRIEF_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a brief from a raw report and print it as JSON
    Brief {
        /// Search query the report answers
        #[arg(short, long, default_value = "")]
        query: String,

        /// Treat the input as a search provider JSON response
        #[arg(long)]
        search_json: bool,

        /// Also write the HTML report to the export directory
        #[arg(long)]
        html: bool,

        /// Also write the raw markdown to the export directory
        #[arg(long)]
        markdown: bool,

        /// Save the brief and print its share token
        #[arg(long)]
        save: bool,

        /// Report file; reads stdin when omitted or `-`
        input: Option<PathBuf>,
    },
    /// Print a saved brief by share token
    Show {
        token: String,

        /// Print the HTML document instead of JSON
        #[arg(long)]
        html: bool,
    },
    /// List saved briefs, newest first
    List,
}

fn read_input(input: Option<&PathBuf>) -> Result<String, BriefError> {
    match input {
        Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn resolve_config(path: Option<&PathBuf>) -> Result<Config, BriefError> {
    match path {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
}

fn run(cli: Cli) -> Result<(), BriefError> {
    let config = resolve_config(cli.config.as_ref())?;

    match cli.command {
        Command::Brief {
            query,
            search_json,
            html,
            markdown,
            save,
            input,
        } => {
            let input = read_input(input.as_ref())?;
            let raw_report = if search_json {
                compose_raw_report(&parse_search_response(&input)?)
            } else {
                input
            };

            let brief = build_brief(&query, &raw_report, &config);
            if brief.is_empty() {
                log::warn!("No facts, pricing or insights found in the report");
            }

            let out_dir = export_dir(&config);
            if html {
                export_html(&out_dir, &brief)?;
            }
            if markdown {
                export_markdown(&out_dir, &brief)?;
            }
            if save {
                let store = JsonFileStore::new(store_path(&config)?);
                let saved = store.save(&brief)?;
                println!("{}", serde_json::to_string_pretty(&saved)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&brief)?);
            }
        }
        Command::Show { token, html } => {
            let store = JsonFileStore::new(store_path(&config)?);
            let saved = store.load(&token)?;
            if html {
                println!(
                    "{}",
                    render_report_html(
                        &saved.query,
                        &saved.key_facts,
                        &saved.pricing_highlights,
                        &saved.insight_sections,
                        &saved.hero_line,
                        &saved.raw_report,
                    )
                );
            } else {
                println!("{}", serde_json::to_string_pretty(&saved)?);
            }
        }
        Command::List => {
            let store = JsonFileStore::new(store_path(&config)?);
            for saved in store.list()? {
                println!(
                    "{}  {}  {}",
                    saved.share_token,
                    saved.created_at.format("%Y-%m-%d %H:%M"),
                    saved.query
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        eprintln!("{}", e.recovery_suggestion());
        std::process::exit(1);
    }
}
