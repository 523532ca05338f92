//! notare - highlight sentences in an HTML article from the command line

use std::io::{Read, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use notare::dom::SerializeOptions;
use notare::{Article, ClickAction, Config, Toggle, decode_text};

#[derive(Parser)]
#[command(name = "notare")]
#[command(version, about = "Segment an HTML article into words and highlight sentences", long_about = None)]
#[command(after_help = "EXAMPLES:
    notare article.html --words           List words with their indices
    notare article.html -c 3 -c 12        Highlight the sentences of words 3 and 12
    curl -s $URL | notare - --highlights  Read from stdin")]
struct Cli {
    /// Input HTML file, or - for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Click the word at this document-order index (repeatable, applied in order)
    #[arg(short, long = "click", value_name = "INDEX")]
    clicks: Vec<usize>,

    /// Hold the link modifier key for every click
    #[arg(short, long)]
    modifier: bool,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<String>,

    /// Encoding label to try when the input is not valid UTF-8
    #[arg(long, value_name = "LABEL")]
    encoding: Option<String>,

    /// List words instead of printing markup
    #[arg(long, conflicts_with = "highlights")]
    words: bool,

    /// List highlighted sentences instead of printing markup
    #[arg(long)]
    highlights: bool,

    /// Print listings as JSON
    #[arg(long)]
    json: bool,

    /// Annotate words and highlights with data-nid node handles
    #[arg(long)]
    node_ids: bool,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "notare=debug",
        _ => "notare=trace",
    };
    let filter = if verbose > 0 {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = match &cli.config {
        Some(path) => Config::load(path).map_err(|e| format!("{path}: {e}"))?,
        None => Config::default(),
    };

    let bytes = read_input(&cli.input)?;
    let html = decode_text(&bytes, cli.encoding.as_deref());
    let mut article = Article::render_with(&html, config);

    for &index in &cli.clicks {
        apply_click(&mut article, index, cli.modifier)?;
    }

    let out = if cli.words {
        list_words(&article, cli.json)?
    } else if cli.highlights {
        list_highlights(&article, cli.json)?
    } else {
        let mut html = article.to_html_with(SerializeOptions {
            node_ids: cli.node_ids,
        });
        html.push('\n');
        html
    };

    write_output(cli.output.as_deref(), &out)
}

fn read_input(input: &str) -> Result<Vec<u8>, String> {
    if input == "-" {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .map_err(|e| format!("stdin: {e}"))?;
        Ok(bytes)
    } else {
        std::fs::read(input).map_err(|e| format!("{input}: {e}"))
    }
}

fn apply_click(article: &mut Article, index: usize, modifier: bool) -> Result<(), String> {
    let node = article.word_at(index).ok_or_else(|| {
        format!(
            "word index {index} out of range ({} words)",
            article.word_nodes().len()
        )
    })?;
    let click = notare::Click { target: node, modifier };

    match article.click(click).action {
        ClickAction::Toggled(Toggle::Wrapped { span, .. }) => {
            eprintln!("word {index}: highlighted words {}..={} of block", span.start, span.end);
        }
        ClickAction::Toggled(Toggle::Unwrapped { .. }) => {
            eprintln!("word {index}: highlight removed");
        }
        ClickAction::Refused(e) => eprintln!("word {index}: {e}"),
        ClickAction::FollowLink => eprintln!("word {index}: link followed"),
        ClickAction::Ignored => {}
    }
    Ok(())
}

fn list_words(article: &Article, json: bool) -> Result<String, String> {
    let words = article.words();
    if json {
        return serde_json::to_string_pretty(&words)
            .map(|s| s + "\n")
            .map_err(|e| e.to_string());
    }

    let mut out = String::new();
    for word in &words {
        let mark = if word.highlighted { "*" } else { " " };
        let order = if word.in_block {
            word.order.to_string()
        } else {
            "-".to_string()
        };
        out.push_str(&format!("{:>5} {mark} {:>4}  {}\n", word.index, order, word.text));
    }
    Ok(out)
}

fn list_highlights(article: &Article, json: bool) -> Result<String, String> {
    let highlights = article.highlights();
    if json {
        return serde_json::to_string_pretty(&highlights)
            .map(|s| s + "\n")
            .map_err(|e| e.to_string());
    }

    Ok(highlights
        .iter()
        .map(|h| format!("{}\n", h.text))
        .collect())
}

fn write_output(path: Option<&str>, out: &str) -> Result<(), String> {
    match path {
        Some(path) => std::fs::write(path, out).map_err(|e| format!("{path}: {e}")),
        None => std::io::stdout()
            .write_all(out.as_bytes())
            .map_err(|e| e.to_string()),
    }
}
