use clap::Parser;
use mango::{
    config::{self, CompilerConfig, TableConfig},
    tokenizer::token::print_tokens,
    vocabulary::standard_table,
    Compiler, InternalResult,
};
use std::{collections::BTreeMap, path::PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to compiler config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to keyword table file
    #[arg(short, long)]
    table: Option<PathBuf>,

    /// Print the token stream of each source instead of evaluating
    #[arg(long)]
    tokens: bool,

    /// Enable debug mode
    #[arg(short, long)]
    verbose: bool,

    /// Named sources, e.g. `z=5 x=z*2`
    #[arg(required = true, value_parser = parse_source)]
    sources: Vec<(String, String)>,
}

fn parse_source(arg: &str) -> Result<(String, String), String> {
    let (name, source) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=SOURCE, got '{}'", arg))?;
    if name.is_empty() {
        return Err(format!("missing name in '{}'", arg));
    }
    Ok((name.to_string(), source.to_string()))
}

fn run(cli: &Cli) -> InternalResult<()> {
    let config: CompilerConfig = match &cli.config {
        Some(path) => config::from_file(path)?,
        None => CompilerConfig::default(),
    };
    debug!("config: {:?}", config);

    let table = match &cli.table {
        Some(path) => config::from_file::<TableConfig, _>(path)?.build()?,
        None => standard_table()?,
    };
    info!("keyword table loaded with {} spellings.", table.len());

    let compiler = Compiler::new(&config, table)?;
    let sources: BTreeMap<String, String> = cli.sources.iter().cloned().collect();

    if cli.tokens {
        for (name, source) in &sources {
            let tokens = compiler.tokenize(source)?;
            let printed = tokens
                .iter()
                .map(|token| print_tokens(std::slice::from_ref(token)))
                .collect::<Result<Vec<_>, _>>()?;
            println!("{}: {}", name, printed.join(" | "));
        }
        return Ok(());
    }

    let interpretation = compiler.interpret_sources(&sources);
    for name in sources.keys() {
        match interpretation.value(name) {
            Some(value) => println!("{} = {}", name, value),
            None => println!("{} = absent", name),
        }
        if cli.verbose {
            if let Some(source) = interpretation.diagnostics.get(name) {
                println!("  {}", source);
            }
            if let Some(error) = interpretation.failures.get(name) {
                println!("  {}", error);
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
