use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_compiler_html::{AttributeDialect, CompileOptions, StyleMode};
use pagecraft_tree::Node;
use std::fs;
use std::path::PathBuf;

const EXAMPLE_PAGE_NAME: &str = "page.json";

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Default style mode (inline, classname)
    #[arg(long, default_value = "inline")]
    pub style_mode: StyleMode,

    /// Default attribute dialect (default, jsx)
    #[arg(short, long, default_value = "default")]
    pub dialect: AttributeDialect,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Pagecraft project...".bright_blue().bold()
    );

    let example_file = PathBuf::from(cwd).join(EXAMPLE_PAGE_NAME);
    if !example_file.exists() {
        let example_content = serde_json::to_string_pretty(&example_page())?;
        fs::write(&example_file, example_content)?;
        println!("  {} Created {}", "✓".green(), EXAMPLE_PAGE_NAME);
    }

    let config = Config {
        compiler_options: CompileOptions {
            style_mode: args.style_mode,
            attribute_dialect: args.dialect,
            ..Default::default()
        },
        out_dir: Some("dist".to_string()),
    };

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}", EXAMPLE_PAGE_NAME);
    println!("  2. Run: pagecraft compile {}", EXAMPLE_PAGE_NAME);
    println!("  3. Check output in dist/");

    Ok(())
}

fn example_page() -> Vec<Node> {
    vec![Node::container("section", 0u64)
        .with_alias("Hero")
        .with_style("padding", 24)
        .with_style("backgroundColor", "#3366FF")
        .with_children(vec![
            Node::single("img", 1u64)
                .with_attr("src", "logo.png")
                .with_attr("alt", "Logo"),
            Node::container("h1", 2u64)
                .with_style("color", "white")
                .with_child(Node::text("Hello, Pagecraft", 3u64)),
        ])]
}
