use anyhow::{Context, Result};
use reanchor_config::Config;
use reanchor_engine::{
    AnchorOptions, Document, TextRange, TextTree, anchor, describe, search, selectors_from_json,
};
use std::{env, fs, path::Path, process};

fn print_usage(program: &str) {
    eprintln!("Usage:");
    eprintln!("  {program} describe <file.md> <start> <end>");
    eprintln!("  {program} anchor <file.md> <selectors.json>");
    eprintln!("  {program} search <file.md> <pattern> [max-errors]");
    eprintln!();
    eprintln!("Offsets count characters of the document's rendered text.");
    eprintln!("Settings are read from {}", Config::config_path().display());
}

fn load_document(path: &str) -> Result<Document> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    Document::from_markdown(&content).with_context(|| format!("Failed to parse {path}"))
}

fn parse_offset(value: &str, name: &str) -> Result<usize> {
    value
        .parse()
        .with_context(|| format!("{name} must be a non-negative integer, got '{value}'"))
}

/// Print the selectors for a character range, with surrounding whitespace
/// trimmed off first.
fn run_describe(file: &str, start: usize, end: usize, options: &AnchorOptions) -> Result<()> {
    let doc = load_document(file)?;
    let root = doc.root();
    let range = TextRange::from_offsets(root, start, end)
        .trimmed(&doc)
        .and_then(|r| r.to_range(&doc))
        .with_context(|| format!("Cannot select {start}..{end} in {file}"))?;

    let selectors = describe(&doc, root, &range, options);
    log::info!("Described {} as {} selectors", file, selectors.len());
    println!("{}", serde_json::to_string_pretty(&selectors)?);
    Ok(())
}

fn run_anchor(file: &str, selectors_file: &str, options: &AnchorOptions) -> Result<()> {
    let doc = load_document(file)?;
    let root = doc.root();
    let json = fs::read_to_string(selectors_file)
        .with_context(|| format!("Failed to read {selectors_file}"))?;
    let selectors = selectors_from_json(&json)
        .with_context(|| format!("Invalid selectors in {selectors_file}"))?;

    let range = anchor(&doc, root, &selectors, options)
        .with_context(|| format!("Unable to anchor selectors in {file}"))?;
    let offsets = TextRange::from_range(&doc, &range)?.relative_to(&doc, root)?;
    let result = serde_json::json!({
        "start": offsets.start.offset,
        "end": offsets.end.offset,
        "text": range.text(&doc),
    });
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run_search(file: &str, pattern: &str, max_errors: Option<usize>, config: &Config) -> Result<()> {
    let doc = load_document(file)?;
    let text = doc.text_content(doc.root());
    let max_errors = max_errors
        .unwrap_or_else(|| config.max_quote_errors.min(pattern.chars().count() / 2));

    let matches = search(&text, pattern, max_errors);
    if matches.is_empty() {
        log::info!("No matches within {max_errors} errors");
    }
    let chars: Vec<char> = text.chars().collect();
    for m in matches {
        let matched: String = chars[m.start..m.end].iter().collect();
        println!("{} {} {} {:?}", m.start, m.end, m.errors, matched);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args
        .first()
        .map(|p| Path::new(p).file_name().unwrap_or_default().to_string_lossy().into_owned())
        .unwrap_or_else(|| "reanchor".to_string());

    let config = match Config::load() {
        Ok(Some(config)) => {
            log::debug!("Loaded config from {}", Config::config_path().display());
            config
        }
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };
    let options = config.anchor_options();

    let arg_refs: Vec<&str> = args.iter().skip(1).map(String::as_str).collect();
    match arg_refs.as_slice() {
        ["describe", file, start, end] => {
            let start = parse_offset(start, "start")?;
            let end = parse_offset(end, "end")?;
            run_describe(file, start, end, &options)
        }
        ["anchor", file, selectors] => run_anchor(file, selectors, &options),
        ["search", file, pattern] => run_search(file, pattern, None, &config),
        ["search", file, pattern, max_errors] => {
            let max_errors = parse_offset(max_errors, "max-errors")?;
            run_search(file, pattern, Some(max_errors), &config)
        }
        _ => {
            print_usage(&program);
            process::exit(1);
        }
    }
}
