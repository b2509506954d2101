use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_compiler_html::{compile_to_markup, AttributeDialect, CompileOptions, StyleMode};
use pagecraft_evaluator::{SourceNode, Transformer};
use pagecraft_tree::Node;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// JSON file holding a node forest (or a single node)
    pub input: String,

    /// Where styles go (inline, classname)
    #[arg(long)]
    pub style_mode: Option<StyleMode>,

    /// Attribute dialect (default, jsx)
    #[arg(short, long)]
    pub dialect: Option<AttributeDialect>,

    /// Spaces per nesting level
    #[arg(long)]
    pub indent_step: Option<usize>,

    /// Spaces before every line
    #[arg(long)]
    pub base_indent: Option<usize>,

    /// Input is a layer-panel forest; run it through the transformer first
    #[arg(long)]
    pub source: bool,

    /// Output file (defaults to stdout, or the configured outDir)
    #[arg(short, long)]
    pub out: Option<String>,
}

/// Either a forest or a single root
#[derive(Deserialize)]
#[serde(untagged)]
enum Forest<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Forest<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Forest::Many(items) => items,
            Forest::One(item) => vec![item],
        }
    }
}

pub fn compile(args: CompileArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let options = resolve_options(&args, &config);

    let input_path = PathBuf::from(cwd).join(&args.input);
    if !input_path.exists() {
        return Err(anyhow!("Input file does not exist: {}", input_path.display()));
    }

    let content = fs::read_to_string(&input_path)
        .with_context(|| format!("Failed to read {}", input_path.display()))?;
    let nodes = load_nodes(&content, args.source)
        .with_context(|| format!("Failed to load {}", input_path.display()))?;

    tracing::info!(roots = nodes.len(), "Compiling {}", args.input);
    let markup = compile_to_markup(&nodes, &options)?;

    match output_path(&args, &config, cwd, &input_path, &options) {
        Some(output_file) => {
            if let Some(parent) = output_file.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output_file, &markup)?;
            eprintln!(
                "  {} {} → {}",
                "✓".green(),
                args.input,
                output_file.display()
            );
        }
        None => print!("{}", markup),
    }

    Ok(())
}

/// Config file values, overridden by any flags given
fn resolve_options(args: &CompileArgs, config: &Config) -> CompileOptions {
    let mut options = config.compiler_options.clone();

    if let Some(style_mode) = args.style_mode {
        options.style_mode = style_mode;
    }
    if let Some(dialect) = args.dialect {
        options.attribute_dialect = dialect;
    }
    if let Some(indent_step) = args.indent_step {
        options.indent_step = indent_step;
    }
    if let Some(base_indent) = args.base_indent {
        options.base_indent_offset = base_indent;
    }

    options
}

fn parse_forest<T: DeserializeOwned>(content: &str) -> Result<Vec<T>> {
    let forest: Forest<T> = serde_json::from_str(content)?;
    Ok(forest.into_vec())
}

fn load_nodes(content: &str, source: bool) -> Result<Vec<Node>> {
    if source {
        let forest: Vec<SourceNode> = parse_forest(content)?;
        Ok(Transformer::new().transform(&forest))
    } else {
        parse_forest(content)
    }
}

fn output_path(
    args: &CompileArgs,
    config: &Config,
    cwd: &str,
    input_path: &Path,
    options: &CompileOptions,
) -> Option<PathBuf> {
    if let Some(ref out) = args.out {
        return Some(PathBuf::from(cwd).join(out));
    }

    let extension = match options.attribute_dialect {
        AttributeDialect::Jsx => "jsx",
        AttributeDialect::Default => "html",
    };
    let file_name = input_path.file_name()?;
    config
        .get_out_dir(cwd)
        .map(|dir| dir.join(file_name).with_extension(extension))
}
