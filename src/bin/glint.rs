//! Command-line interface for glint
//! This binary highlights example-language snippets in generated pages, and
//! inspects how single snippets are tokenized and rendered.
//!
//! Usage:
//!   glint page `<path>` [-o `<out>`]                           - Highlight marked elements of an HTML page
//!   glint snippet `<path>` [--keywords `<list>`] [--types `<list>`] - Render one snippet as HTML
//!   glint tokens `<path>`                                      - Print the token stream as JSON
//!
//! A path of `-` reads from stdin. `--config <file>` layers a TOML file over the
//! built-in defaults.

use clap::{Arg, ArgAction, ArgMatches, Command};
use glint::config::Loader;
use glint::error::Result;
use glint::highlight::{tokenize, Driver, HtmlPage, Readiness};
use std::io::Read;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = Command::new("glint")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inline syntax highlighting for example-language snippets")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in configuration"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase logging verbosity (-v debug, -vv trace)"),
        )
        .subcommand(
            Command::new("page")
                .about("Highlight every marked element of an HTML page")
                .arg(path_arg("Path to the HTML page"))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write the highlighted page here instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("snippet")
                .about("Render a single snippet as HTML")
                .arg(path_arg("Path to the snippet source"))
                .arg(
                    Arg::new("keywords")
                        .long("keywords")
                        .short('k')
                        .help("Comma-separated keywords (default: configured vocabulary)"),
                )
                .arg(
                    Arg::new("types")
                        .long("types")
                        .short('t')
                        .help("Comma-separated type names (default: configured vocabulary)"),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream of a snippet as JSON")
                .arg(path_arg("Path to the snippet source")),
        )
        .get_matches();

    init_logging(matches.get_count("verbose"));

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn path_arg(help: &'static str) -> Arg {
    Arg::new("path").help(help).required(true).index(1)
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("glint={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &ArgMatches) -> Result<()> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    let driver = Driver::new(loader.build()?);

    match matches.subcommand() {
        Some(("page", page_matches)) => handle_page_command(&driver, page_matches),
        Some(("snippet", snippet_matches)) => handle_snippet_command(&driver, snippet_matches),
        Some(("tokens", tokens_matches)) => handle_tokens_command(tokens_matches),
        _ => unreachable!(),
    }
}

/// Handle the page command
fn handle_page_command(driver: &Driver, matches: &ArgMatches) -> Result<()> {
    let source = read_input(matches)?;
    let mut page = HtmlPage::parse(&source);

    // The page is fully parsed before highlighting starts, so it is already ready.
    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    let report = runtime.block_on(driver.init(&mut page, Readiness::Fired))?;
    for skipped in &report.skipped {
        eprintln!("Skipped element {}: {}", skipped.index, skipped.reason);
    }

    let html = page.to_html()?;
    match matches.get_one::<String>("output") {
        Some(output) => std::fs::write(output, html)?,
        None => print!("{}", html),
    }
    Ok(())
}

/// Handle the snippet command
fn handle_snippet_command(driver: &Driver, matches: &ArgMatches) -> Result<()> {
    let source = read_input(matches)?;
    let keywords = matches.get_one::<String>("keywords").map(String::as_str);
    let types = matches.get_one::<String>("types").map(String::as_str);
    println!("{}", driver.highlight_source(&source, keywords, types));
    Ok(())
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches) -> Result<()> {
    let source = read_input(matches)?;
    let tokens = tokenize(&source);
    println!("{}", serde_json::to_string_pretty(&tokens)?);
    Ok(())
}

fn read_input(matches: &ArgMatches) -> Result<String> {
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");
    if path == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}
