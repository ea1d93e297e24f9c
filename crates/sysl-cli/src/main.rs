//! Sysl CLI - Command line interface for the Sysl model parser

use std::fs;
use std::path::{Path, PathBuf};

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sysl_ast::ToSysl;
use sysl_parser::{parse_rule_with_diagnostics, Diagnostic, Diagnostics, Node, Rule};

#[derive(Parser)]
#[command(name = "sysl")]
#[command(about = "Sysl model parser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that files are valid Sysl models
    Check {
        /// Input file(s)
        files: Vec<PathBuf>,
        /// Start rule (module, application, declaration, field, ...)
        #[arg(short, long, default_value = "module")]
        rule: Rule,
    },
    /// Parse a file and output the AST as JSON
    Parse {
        /// Input file
        file: PathBuf,
        #[arg(short, long, default_value = "module")]
        rule: Rule,
        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Print a model in canonical form
    Fmt {
        /// Input file
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let ok = match cli.command {
        Commands::Check { files, rule } => cmd_check(&files, rule),
        Commands::Parse { file, rule, pretty } => cmd_parse(&file, rule, pretty),
        Commands::Fmt { file } => cmd_fmt(&file),
    };

    if !ok {
        std::process::exit(1);
    }
}

fn read_source(file: &Path) -> Option<String> {
    match fs::read_to_string(file) {
        Ok(s) => Some(s),
        Err(e) => {
            eprintln!("ERROR: cannot read {}: {}", file.display(), e);
            None
        }
    }
}

fn cmd_check(files: &[PathBuf], rule: Rule) -> bool {
    if files.is_empty() {
        eprintln!("ERROR: Must provide file");
        return false;
    }

    let mut all_ok = true;
    for file in files {
        let Some(source) = read_source(file) else {
            all_ok = false;
            continue;
        };

        let parsed = parse_rule_with_diagnostics(&source, rule);
        if parsed.is_ok() {
            println!("{} is a valid Sysl model!", file.display());
        } else {
            eprintln!("{} is not a valid Sysl model:", file.display());
            for diagnostic in &parsed.diagnostics {
                eprintln!(" - {}", diagnostic);
            }
            report_diagnostics(&source, file, &parsed.diagnostics);
            all_ok = false;
        }
    }
    all_ok
}

fn cmd_parse(file: &Path, rule: Rule, pretty: bool) -> bool {
    let Some(source) = read_source(file) else {
        return false;
    };

    match parse_rule_with_diagnostics(&source, rule).into_result() {
        Ok(node) => print_json(&node, pretty),
        Err(diagnostics) => {
            report_diagnostics(&source, file, &diagnostics);
            false
        }
    }
}

fn cmd_fmt(file: &Path) -> bool {
    let Some(source) = read_source(file) else {
        return false;
    };

    match parse_rule_with_diagnostics(&source, Rule::Module).into_result() {
        Ok(Node::Module(module)) => {
            print!("{}", module.to_sysl(0));
            true
        }
        Ok(_) => false,
        Err(diagnostics) => {
            report_diagnostics(&source, file, &diagnostics);
            false
        }
    }
}

fn print_json(node: &Node, pretty: bool) -> bool {
    let json = if pretty {
        serde_json::to_string_pretty(node)
    } else {
        serde_json::to_string(node)
    };
    match json {
        Ok(json) => {
            println!("{}", json);
            true
        }
        Err(e) => {
            eprintln!("ERROR: cannot serialize AST: {}", e);
            false
        }
    }
}

fn report_diagnostics(source: &str, file: &Path, diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        if let Err(e) = report_diagnostic(source, file, diagnostic) {
            tracing::warn!(error = %e, "failed to render diagnostic");
        }
    }
}

fn report_diagnostic(source: &str, file: &Path, diagnostic: &Diagnostic) -> std::io::Result<()> {
    let name = file.to_string_lossy().to_string();
    let span = diagnostic.span;
    let title = match diagnostic.rule {
        Some(rule) => format!("{} in {}", diagnostic.stage, rule),
        None => diagnostic.stage.to_string(),
    };
    Report::build(ReportKind::Error, name.clone(), span.start)
        .with_message(title)
        .with_label(
            Label::new((name.clone(), span.start..span.end))
                .with_message(&diagnostic.message)
                .with_color(Color::Red),
        )
        .finish()
        .eprint((name, Source::from(source)))
}
