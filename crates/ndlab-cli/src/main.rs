//! NDLab Command-Line Client
//!
//! Queries a nuclear-data database with NDLab field and filter expressions.

mod executor;
mod formatter;

use clap::Parser;
use executor::Request;
use formatter::OutputFormat;
use ndlab::{Config, Ndlab, SqliteExecutor};
use std::path::PathBuf;

/// NDLab Command-Line Client
#[derive(Parser, Debug)]
#[command(name = "ndlab")]
#[command(version, about = "Query nuclear structure and decay data")]
pub struct Args {
    /// Path of the NDLab database
    #[arg(short = 'd', long, default_value = ndlab::DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Fields to select, e.g. "LEVEL.ENERGY LEVEL.JP"
    #[arg(short = 'F', long, default_value = "")]
    pub fields: String,

    /// Filter, e.g. "LEVEL.NUC.Z = 54 ORDER BY LEVEL.ENERGY"
    #[arg(short = 'w', long, default_value = "")]
    pub filter: String,

    /// Output format
    #[arg(long, default_value = "table", value_enum)]
    pub format: OutputFormat,

    /// Print the SQL instead of executing it
    #[arg(long)]
    pub sql: bool,

    /// Only check that the request has one principal table
    #[arg(long)]
    pub check: bool,

    /// Print the join rules the request fires
    #[arg(long)]
    pub explain: bool,

    /// Describe an entity
    #[arg(long, value_name = "ENTITY")]
    pub describe: Option<String>,

    /// List the entities
    #[arg(long)]
    pub entities: bool,

    /// Always insert whitespace around entity references
    #[arg(long)]
    pub force_clean: bool,

    /// Log generated SQL
    #[arg(long)]
    pub print_sql: bool,
}

impl Args {
    /// Session configuration for these arguments.
    pub fn to_config(&self) -> Config {
        Config::new(&self.db)
            .with_force_clean(self.force_clean)
            .with_print_sql(self.print_sql)
    }

    /// The request these arguments describe.
    pub fn request(&self) -> Request {
        let fields = self.fields.clone();
        let filter = self.filter.clone();

        if self.entities {
            Request::Entities
        } else if let Some(entity) = &self.describe {
            Request::Describe(entity.to_uppercase())
        } else if self.check {
            Request::Check { fields, filter }
        } else if self.sql {
            Request::Sql { fields, filter }
        } else if self.explain {
            Request::Explain { fields, filter }
        } else {
            Request::Query { fields, filter }
        }
    }
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ndlab_cli=info".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let formatter = formatter::create_formatter(args.format);
    let request = args.request();

    // Only executed queries touch the database file
    let db = if matches!(request, Request::Query { .. }) {
        Ndlab::open(args.to_config())?
    } else {
        Ndlab::with_config(SqliteExecutor::open_in_memory()?, args.to_config())
    };

    match executor::execute(&db, &request, &*formatter) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", formatter.format_error(&e.to_string()));
            std::process::exit(1);
        }
    }
}
