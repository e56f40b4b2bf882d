//! entity-desc CLI - Describe entity mappings as JSON or Markdown
//!
//! Usage:
//!   entity-desc serve [--host <host>] [--port <port>] [--dynamic-routes]
//!   entity-desc markdown [--output <file>] [--locale <zh|en>]
//!   entity-desc tables [--locale <zh|en>]
//!   entity-desc routes
//!   entity-desc describe <table>
//!
//! Examples:
//!   entity-desc --config entity-desc.toml markdown --output docs/database.md
//!   ENTITY_METADATA_ROUTES=1 entity-desc serve --port 9000

use clap::{Parser, Subcommand, ValueEnum};
use entity_desc::config::Settings;
use entity_desc::describe::{LookupError, MetadataReader};
use entity_desc::projection::{Locale, Projector, TableDescription};
use entity_desc::routes;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "entity-desc")]
#[command(about = "entity-desc - Describe entity-to-table mappings as JSON or Markdown")]
#[command(version)]
struct Cli {
    /// Path to the settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve entity descriptions over HTTP
    #[cfg(feature = "server")]
    Serve {
        /// Address to bind (overrides settings)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides settings)
        #[arg(short, long)]
        port: Option<u16>,

        /// Register one route per table
        #[arg(long)]
        dynamic_routes: bool,
    },

    /// Generate the full database dictionary
    Markdown {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output language (overrides settings)
        #[arg(short, long)]
        locale: Option<LocaleArg>,
    },

    /// List tables and their comments
    Tables {
        /// Output language (overrides settings)
        #[arg(short, long)]
        locale: Option<LocaleArg>,
    },

    /// List the dynamic routes that would be registered
    Routes,

    /// Print the JSON column description of a table
    Describe {
        /// Physical table name
        table: String,
    },
}

#[derive(Clone, ValueEnum)]
enum LocaleArg {
    Zh,
    En,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::Zh => Locale::Zh,
            LocaleArg::En => Locale::En,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "failed to load settings");
            return ExitCode::FAILURE;
        }
    };

    let reader = match settings.reader() {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, "failed to configure metadata source");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        #[cfg(feature = "server")]
        Commands::Serve {
            host,
            port,
            dynamic_routes,
        } => cmd_serve(reader, &settings, host, port, dynamic_routes),
        Commands::Markdown { output, locale } => {
            let locale = locale.map(Into::into).unwrap_or(settings.docs.locale);
            cmd_markdown(reader, locale, output)
        }
        Commands::Tables { locale } => {
            let locale = locale.map(Into::into).unwrap_or(settings.docs.locale);
            cmd_tables(reader, locale)
        }
        Commands::Routes => cmd_routes(reader),
        Commands::Describe { table } => cmd_describe(reader, &table),
    }
}

#[cfg(feature = "server")]
fn cmd_serve(
    reader: MetadataReader,
    settings: &Settings,
    host: Option<String>,
    port: Option<u16>,
    dynamic_routes: bool,
) -> ExitCode {
    use entity_desc::routes::RouteRegistrar;
    use entity_desc::web;

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);
    let dynamic = routes::dynamic_routes_enabled(dynamic_routes || settings.routes.dynamic);

    // Owned here so dynamic routes are registered once for the process.
    let mut registrar = RouteRegistrar::new();
    let app = web::app(reader, &mut registrar, dynamic);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "failed to start async runtime");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::serve(app, &host, port)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server error");
            ExitCode::FAILURE
        }
    }
}

fn cmd_markdown(reader: MetadataReader, locale: Locale, output: Option<PathBuf>) -> ExitCode {
    let entities = reader.all_entities();
    let document = Projector::new(locale).to_document(&entities);

    match output {
        Some(path) => match fs::write(&path, &document) {
            Ok(()) => {
                info!(path = %path.display(), entities = entities.len(), "wrote database dictionary");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to write output");
                ExitCode::FAILURE
            }
        },
        None => {
            print!("{document}");
            ExitCode::SUCCESS
        }
    }
}

fn cmd_tables(reader: MetadataReader, locale: Locale) -> ExitCode {
    let entities = reader.all_entities();
    print!("{}", Projector::new(locale).to_markdown_table_list(&entities));
    ExitCode::SUCCESS
}

fn cmd_routes(reader: MetadataReader) -> ExitCode {
    let specs = routes::discover(&reader);
    if specs.is_empty() {
        println!("No tables found.");
        return ExitCode::SUCCESS;
    }

    for spec in specs {
        println!("{}  GET {}", spec.name, spec.path);
    }
    ExitCode::SUCCESS
}

fn cmd_describe(reader: MetadataReader, table: &str) -> ExitCode {
    let entity = match reader.find_by_table_name(table) {
        Ok(entity) => entity,
        Err(LookupError::NotFound(_)) => {
            eprintln!("Table not found: {table}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&TableDescription::from_entity(&entity)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "failed to serialize description");
            ExitCode::FAILURE
        }
    }
}
