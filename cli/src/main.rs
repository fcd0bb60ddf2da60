//! docpair CLI - two-pane viewer for structured document extraction results

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docpair::{
    detect_format_from_path, load_file_with_options, ChildOrder, Docpair, DocpairResult,
    JsonFormat, LoadOptions, ViewRules,
};

#[derive(Parser)]
#[command(name = "docpair")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Render structured documents as linked page/reading-order views", long_about = None)]
struct Cli {
    /// Input document (Docling JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    view: ViewArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by every command that composes a view.
#[derive(Args, Clone)]
struct ViewArgs {
    /// Page shown in the overlay pane (1-indexed)
    #[arg(long, env = "DOCPAIR_PAGE", default_value = "1")]
    page: u32,

    /// Child ordering within a parent
    #[arg(long, env = "DOCPAIR_ORDER", value_enum, default_value = "grouped")]
    order: Order,

    /// Rules file with relocations and pairings
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Reject duplicate or misplaced references
    #[arg(long)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document to all formats (HTML, Markdown, text, JSON)
    Convert {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Render the two-pane HTML viewer
    View {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        view: ViewArgs,

        /// Overlay scale factor
        #[arg(long, env = "DOCPAIR_SCALE", default_value = "1.0")]
        scale: f64,

        /// Page image URI (defaults to the document's own page image)
        #[arg(long, value_name = "URI")]
        page_image: Option<String>,

        /// Page title
        #[arg(long)]
        title: Option<String>,
    },

    /// Render the reading order as Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        view: ViewArgs,

        /// Table rendering mode
        #[arg(long, value_enum, default_value = "markdown")]
        table_mode: TableMode,

        /// Maximum heading level (1-6)
        #[arg(long, default_value = "6")]
        max_heading: u8,
    },

    /// Render the reading order as plain text
    Text {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Dump the composed view model as JSON
    Json {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        view: ViewArgs,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Order {
    /// Texts, then pictures, then tables, then groups
    Grouped,
    /// The parent's declared children order
    Document,
}

impl From<Order> for ChildOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Grouped => ChildOrder::Grouped,
            Order::Document => ChildOrder::Document,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TableMode {
    /// Standard Markdown tables
    Markdown,
    /// HTML tables when cells are merged
    Html,
}

impl From<TableMode> for docpair::TableFallback {
    fn from(mode: TableMode) -> Self {
        match mode {
            TableMode::Markdown => docpair::TableFallback::Markdown,
            TableMode::Html => docpair::TableFallback::Html,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            view,
        }) => cmd_convert(&input, output.as_deref(), &view),
        Some(Commands::View {
            input,
            output,
            view,
            scale,
            page_image,
            title,
        }) => cmd_view(&input, output.as_deref(), &view, scale, page_image, title),
        Some(Commands::Markdown {
            input,
            output,
            view,
            table_mode,
            max_heading,
        }) => cmd_markdown(&input, output.as_deref(), &view, table_mode, max_heading),
        Some(Commands::Text {
            input,
            output,
            view,
        }) => cmd_text(&input, output.as_deref(), &view),
        Some(Commands::Json {
            input,
            output,
            view,
            compact,
        }) => cmd_json(&input, output.as_deref(), &view, compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &cli.view)
            } else {
                println!("{}", "Usage: docpair <FILE> [OUTPUT]".yellow());
                println!("       docpair --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Builder preloaded with the shared view flags.
fn builder(args: &ViewArgs) -> Result<Docpair, Box<dyn std::error::Error>> {
    let mut builder = Docpair::new()
        .with_page(args.page)
        .with_order(args.order.into());

    if args.strict {
        builder = builder.strict();
    }
    if let Some(ref path) = args.rules {
        builder = builder.with_rules(ViewRules::from_file(path)?);
    }

    Ok(builder)
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    args: &ViewArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_view", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Loading document...");
    let result = builder(args)?.load(input)?;
    pb.inc(1);

    pb.set_message("Generating viewer...");
    fs::write(output_dir.join("view.html"), result.to_html()?)?;
    pb.inc(1);

    pb.set_message("Generating Markdown...");
    fs::write(output_dir.join("reading.md"), result.to_markdown()?)?;
    pb.inc(1);

    pb.set_message("Generating text...");
    fs::write(output_dir.join("reading.txt"), result.to_text()?)?;
    fs::write(
        output_dir.join("view.json"),
        result.to_json(JsonFormat::Pretty)?,
    )?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} view.html", "├─".dimmed());
    println!("  {} reading.md", "├─".dimmed());
    println!("  {} reading.txt", "├─".dimmed());
    println!("  {} view.json", "└─".dimmed());

    print_overlay_summary(&result);

    Ok(())
}

fn cmd_view(
    input: &Path,
    output: Option<&Path>,
    args: &ViewArgs,
    scale: f64,
    page_image: Option<String>,
    title: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = builder(args)?.with_scale(scale);
    if let Some(uri) = page_image {
        builder = builder.with_page_image(uri);
    }
    if let Some(title) = title {
        builder = builder.with_title(title);
    }

    let result = builder.load(input)?;
    write_output(output, &result.to_html()?)?;

    if output.is_some() {
        print_overlay_summary(&result);
    }

    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    args: &ViewArgs,
    table_mode: TableMode,
    max_heading: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let render_options = docpair::RenderOptions::new()
        .with_page(args.page)
        .with_child_order(args.order.into())
        .with_table_fallback(table_mode.into())
        .with_max_heading(max_heading);

    let result = builder(args)?
        .with_render_options(render_options)
        .load(input)?;

    write_output(output, &result.to_markdown()?)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    args: &ViewArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = builder(args)?.load(input)?;
    write_output(output, &result.to_text()?)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    args: &ViewArgs,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = builder(args)?.load(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    write_output(output, &result.to_json(format)?)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let format = detect_format_from_path(input)?;
    // Lenient: report what loads even when references are inconsistent
    let doc = load_file_with_options(input, LoadOptions::new().lenient())?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    if !doc.name.is_empty() {
        println!("{}: {}", "Name".bold(), doc.name);
    }
    if let Some(ref origin) = doc.origin {
        if !origin.filename.is_empty() {
            println!("{}: {}", "Source".bold(), origin.filename);
        }
        if !origin.mimetype.is_empty() {
            println!("{}: {}", "Source type".bold(), origin.mimetype);
        }
    }
    println!("{}: {}", "Pages".bold(), doc.page_count());

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let words: usize = doc
        .texts
        .iter()
        .map(|t| t.text.split_whitespace().count())
        .sum();

    println!("{}: {}", "Texts".bold(), doc.texts.len());
    println!("{}: {}", "Pictures".bold(), doc.pictures.len());
    println!("{}: {}", "Tables".bold(), doc.tables.len());
    println!("{}: {}", "Groups".bold(), doc.groups.len());
    println!("{}: {}", "Words".bold(), words);

    let orphans = doc.orphans();
    if !orphans.is_empty() {
        println!(
            "{}: {}",
            "Unreachable".bold().yellow(),
            orphans.len().to_string().yellow()
        );
    }

    Ok(())
}

fn print_overlay_summary(result: &DocpairResult) {
    let stats = &result.view().stats;
    println!(
        "\n{} {} overlay element(s), {} list entr(ies)",
        "Page".cyan(),
        stats.overlay_count,
        stats.entry_count()
    );
    if stats.overlay_skipped > 0 {
        println!(
            "{} {} text(s) on this page have no bounding box",
            "Note:".yellow(),
            stats.overlay_skipped
        );
    }
}

fn cmd_version() {
    println!("{} {}", "docpair".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Linked page and reading-order viewer for structured documents");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/docpair".dimmed());
    println!("License: MIT");
}
