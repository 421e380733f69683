//! doctomd — generate per-namespace markdown from XML API documentation.
//!
//! Supports two modes:
//!
//! - **stdin mode**: `doctomd < MyLib.xml` prints every namespace document
//! - **file mode**: `doctomd -o docs/api -p _prefix.md bin/*.xml`

use anyhow::{Context, Result};
use clap::Parser;
use doctomd::parser;
use doctomd::render::{Newline, RenderOptions};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "doctomd",
    about = "Generate per-namespace markdown from XML API documentation"
)]
struct Cli {
    /// Input files (glob patterns and directories supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Prefix template file or directory containing _prefix.md.
    /// Supports ${name} substitution with the namespace.
    #[arg(short = 'p', long)]
    prefix: Option<String>,

    /// Line separator for generated markdown: native (default), lf, crlf
    #[arg(long, default_value = "native")]
    newline: String,

    /// Prepend a member index to each namespace document
    #[arg(long)]
    toc: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = RenderOptions {
        newline: cli.newline.parse::<Newline>().map_err(anyhow::Error::msg)?,
        toc: cli.toc,
    };

    if cli.files.is_empty() {
        return stdin_mode(options);
    }

    file_mode(&cli, options)
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

/// stdin mode: read one XML file from stdin, write all namespaces to stdout.
fn stdin_mode(options: RenderOptions) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    for markdown in doctomd::convert_str(&input, options)?.values() {
        print!("{}", markdown);
    }
    Ok(())
}

/// file mode: process multiple files, merge by namespace, write one file per namespace.
fn file_mode(cli: &Cli, options: RenderOptions) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let prefix_template = resolve_prefix(cli.prefix.as_deref(), output_dir)?;

    let input_files = expand_globs(&cli.files)?;

    let mut corrected = Vec::new();
    for path in &input_files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let tree = parser::parse_file(path, &content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        corrected.push((path.to_string_lossy().to_string(), doctomd::correct(&tree)));
    }

    let merged = parser::merge::merge(corrected);
    let rendered = doctomd::render_all(&merged, options);

    let mut written: HashMap<&str, &str> = HashMap::new();
    for (namespace, markdown) in &rendered {
        let name = doctomd::output_name(namespace);
        if let Some(previous) = written.insert(name, namespace.as_str()) {
            anyhow::bail!(
                "namespaces `{}` and `{}` map to the same output file {}.md",
                previous,
                namespace,
                name
            );
        }
        let out_path = output_dir.join(format!("{}.md", name));

        let mut output = String::new();
        if let Some(ref tpl) = prefix_template {
            output.push_str(&tpl.replace("${name}", name));
            output.push('\n');
        }
        output.push_str(markdown);

        fs::write(&out_path, &output)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    Ok(())
}

const PREFIX_FILE: &str = "_prefix.md";

/// Resolve the prefix template from the -p flag: a file, a directory holding
/// `_prefix.md`, or a sibling `_prefix.md`. Without -p the output directory
/// is checked.
fn resolve_prefix(prefix_arg: Option<&str>, output_dir: &Path) -> Result<Option<String>> {
    match prefix_arg {
        Some(p) => {
            let path = Path::new(p);
            if path.is_file() {
                Ok(Some(fs::read_to_string(path).with_context(|| {
                    format!("failed to read prefix file: {}", path.display())
                })?))
            } else if path.is_dir() {
                read_optional(&path.join(PREFIX_FILE))
            } else {
                let candidate = path.with_file_name(PREFIX_FILE);
                if candidate.is_file() {
                    read_optional(&candidate)
                } else {
                    anyhow::bail!("prefix not found: {}", p);
                }
            }
        }
        None => read_optional(&output_dir.join(PREFIX_FILE)),
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read prefix file: {}", path.display()))?;
    Ok(Some(content))
}

/// File extensions recognized as documentation files.
const SUPPORTED_EXTENSIONS: &[&str] = &["xml"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for supported file types.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
        } else if path.is_dir() {
            files.extend(scan_dir(path)?);
        } else {
            let matches = glob_files(pattern)?;
            if matches.is_empty() {
                warn!("no files matched: {}", pattern);
            }
            files.extend(matches);
        }
    }
    // Sorted so merged namespaces come out the same on every run
    files.sort();
    files.dedup();
    Ok(files)
}

/// Supported files directly inside `dir` (non-recursive).
fn scan_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    Ok(entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && is_supported(p))
        .collect())
}

fn glob_files(pattern: &str) -> Result<Vec<PathBuf>> {
    Ok(glob::glob(pattern)
        .with_context(|| format!("invalid glob pattern: {}", pattern))?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect())
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}
