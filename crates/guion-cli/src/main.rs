//! The guion interpreter CLI.
//!
//! Provides the `guion` command with the following subcommands:
//!
//! - `guion run <file>` - Run a guion source file and print its result
//! - `guion ast <file>` - Parse a guion source file and print its AST as JSON

use std::fs;
use std::path::PathBuf;
use std::process;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "guion", version, about = "The guion interpreter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a guion source file and print its result
    Run {
        /// Path to the source file
        file: PathBuf,
    },
    /// Parse a guion source file and print its AST as JSON
    Ast {
        /// Path to the source file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { file } => run_file(&file),
        Commands::Ast { file } => ast_file(&file),
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn read_source(file: &PathBuf) -> Result<String, i32> {
    fs::read_to_string(file).map_err(|err| {
        eprintln!("error: could not read '{}': {err}", file.display());
        1
    })
}

fn run_file(file: &PathBuf) -> Result<(), i32> {
    let source = read_source(file)?;
    match guion::run(&source) {
        Ok(value) => {
            println!("{}", render_value(&value));
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", render_diagnostic(&err, &source));
            Err(1)
        }
    }
}

fn ast_file(file: &PathBuf) -> Result<(), i32> {
    let source = read_source(file)?;
    match guion::ast(&source) {
        Ok(node) => {
            let json = serde_json::to_string_pretty(&node).expect("AST is always serializable");
            println!("{json}");
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", render_diagnostic(&err, &source));
            Err(1)
        }
    }
}

fn render_value(value: &guion::Value) -> String {
    match value {
        guion::Value::Html(_) => guion::to_html(value),
        guion::Value::Css(_) => guion::to_css(value),
        other => other.stringify(),
    }
}

/// Convert a 1-based (line, column) into a byte offset into `source`.
fn line_col_to_offset(source: &str, line: u32, column: u32) -> usize {
    let mut offset = 0;
    for (i, text_line) in source.split('\n').enumerate() {
        if i as u32 + 1 == line {
            return offset + (column.saturating_sub(1) as usize).min(text_line.len());
        }
        offset += text_line.len() + 1;
    }
    source.len()
}

fn render_diagnostic(err: &guion::Error, source: &str) -> String {
    let config = Config::default().with_color(false);

    let offset = match (err.line, err.column) {
        (Some(line), Some(column)) => line_col_to_offset(source, line, column),
        _ => 0,
    };
    let end = (offset + 1).min(source.len().max(1));
    let span = offset.min(end)..end;

    let report = Report::build(ReportKind::Error, span.clone())
        .with_message(format!("{}", err.kind))
        .with_config(config)
        .with_label(
            Label::new(span)
                .with_message(&err.message)
                .with_color(Color::Red),
        )
        .finish();

    let mut buf = Vec::new();
    report
        .write(Source::from(source), &mut buf)
        .expect("diagnostic rendering should not fail");
    String::from_utf8(buf).expect("diagnostic output should be valid UTF-8")
}
