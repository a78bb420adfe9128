//! Command-line interface for rulesplit
//! Tokenizes text with the built-in English grammar or a grammar file.
//!
//! Usage:
//!   rulesplit [TEXT]...                          - Tokenize the arguments (or stdin when none are given)
//!   rulesplit --grammar `<file>` [TEXT]...         - Layer a grammar file over the defaults
//!   rulesplit --no-defaults --grammar `<file>`     - Use only the given grammar file
//!   rulesplit --explain [TEXT]...                - Show how every chunk was decomposed
//!   rulesplit --list-rules                       - List the rules and exceptions
//!
//! Set `RUST_LOG=debug` (or `trace` to see every rule firing) for diagnostics.

use clap::{Arg, ArgAction, ArgMatches, Command};
use rulesplit::config::Loader;
use rulesplit::formats::{render_explanation, render_tokens, OutputFormat};
use rulesplit::Tokenizer;
use std::error::Error;
use std::io::Read;

fn main() {
    env_logger::init();

    let matches = Command::new("rulesplit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Split text into tokens with ordered grammar rules and an exception lexicon")
        .arg(
            Arg::new("text")
                .help("Text to tokenize; read from stdin when omitted")
                .num_args(0..)
                .index(1),
        )
        .arg(
            Arg::new("grammar")
                .long("grammar")
                .short('g')
                .help("Grammar file (.toml, .yaml or .json) layered over the defaults")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("no-defaults")
                .long("no-defaults")
                .help("Start from an empty grammar instead of the built-in one")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (simple, lines, json, yaml)")
                .default_value("simple"),
        )
        .arg(
            Arg::new("explain")
                .long("explain")
                .help("Print the decomposition tree of every chunk")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-rules")
                .long("list-rules")
                .help("List the grammar rules in priority order and the exception lexicon")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let tokenizer = build_tokenizer(matches)?;

    if matches.get_flag("list-rules") {
        handle_list_rules_command(&tokenizer);
        return Ok(());
    }

    let format: OutputFormat = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("simple")
        .parse()?;
    let text = read_input(matches)?;

    let output = if matches.get_flag("explain") {
        render_explanation(&tokenizer.explain(&text), format)?
    } else {
        render_tokens(&tokenizer.tokenize(&text), format)?
    };

    // YAML output already ends with a newline
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
    Ok(())
}

/// Load the grammar from the defaults and any `--grammar` files
fn build_tokenizer(matches: &ArgMatches) -> Result<Tokenizer, Box<dyn Error>> {
    let mut loader = if matches.get_flag("no-defaults") {
        Loader::bare()
    } else {
        Loader::new()
    };
    if let Some(files) = matches.get_many::<String>("grammar") {
        for file in files {
            log::debug!("layering grammar file {}", file);
            loader = loader.with_file(file);
        }
    }

    let config = loader.build()?;
    Ok(Tokenizer::from_config(&config)?)
}

fn read_input(matches: &ArgMatches) -> Result<String, Box<dyn Error>> {
    match matches.get_many::<String>("text") {
        Some(words) => Ok(words.map(String::as_str).collect::<Vec<_>>().join(" ")),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Handle the list-rules command
fn handle_list_rules_command(tokenizer: &Tokenizer) {
    println!("Rules in priority order:\n");
    for (i, rule) in tokenizer.rules().iter().enumerate() {
        println!("  {}. {} ({} groups)", i + 1, rule.name(), rule.group_count());
        println!("     {}", rule.pattern());
    }

    let mut exceptions: Vec<_> = tokenizer.exceptions().iter().collect();
    exceptions.sort_unstable_by_key(|(surface, _)| *surface);
    println!("\nExceptions ({}):\n", exceptions.len());
    for (surface, tokens) in exceptions {
        println!("  {} -> {}", surface, tokens.join(" "));
    }
}
