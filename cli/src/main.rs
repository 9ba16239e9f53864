//! citeform CLI - citation analysis and manuscript layout tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;

use citeform::render::{paginate_text, to_paged_text};
use citeform::{
    AnalyzeOptions, Conversion, ConvertedCitation, Diagnostics, JsonFormat, LayoutGeometry,
    Margins, PageGeometry, PageSize, Severity, Style, Unit,
};

#[derive(Parser)]
#[command(name = "citeform")]
#[command(author = "citeform contributors")]
#[command(version)]
#[command(about = "Detect, convert and format MLA/APA/Chicago citations; lay out manuscripts", long_about = None)]
struct Cli {
    /// Scan sentences on a single thread
    #[arg(long, global = true)]
    sequential: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize citations, style and bibliography of a manuscript
    Analyze {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the full analysis as JSON
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,
    },

    /// Convert detected citations to another style
    Cite {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Target style
        #[arg(long, value_enum)]
        to: StyleArg,

        /// Source style (defaults to the dominant style)
        #[arg(long, value_enum)]
        from: Option<StyleArg>,
    },

    /// Format the bibliography in a style
    #[command(alias = "bibliography")]
    Bib {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output style
        #[arg(short, long, value_enum)]
        style: StyleArg,
    },

    /// Show page metrics for a geometry
    Layout {
        #[command(flatten)]
        geometry: GeometryArgs,

        /// Solve side margins for this many characters per line
        #[arg(long, value_name = "CHARS")]
        target_line_length: Option<usize>,
    },

    /// Wrap and paginate a manuscript
    Paginate {
        /// Input text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        geometry: GeometryArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct GeometryArgs {
    /// Named page size
    #[arg(long, value_enum, default_value = "letter")]
    page: PageArg,

    /// Page width (overrides --page, needs --height)
    #[arg(long, requires = "height")]
    width: Option<f64>,

    /// Page height (overrides --page, needs --width)
    #[arg(long, requires = "width")]
    height: Option<f64>,

    /// Unit for --width, --height and --margin
    #[arg(long, value_enum, default_value = "point")]
    unit: UnitArg,

    /// Margin applied to all four sides
    #[arg(long)]
    margin: Option<f64>,

    /// Font size in points
    #[arg(long, default_value = "12")]
    font_size: f64,
}

impl GeometryArgs {
    /// Assemble the whole page before validating, so margins are checked
    /// against the final page size only.
    fn build(&self) -> citeform::Result<LayoutGeometry> {
        let unit = Unit::from(self.unit);
        let (page_width, page_height) = match (self.width, self.height) {
            (Some(width), Some(height)) => (unit.to_points(width), unit.to_points(height)),
            _ => PageSize::from(self.page).dimensions(),
        };
        let margins = self
            .margin
            .map(|margin| Margins::uniform(unit.to_points(margin)))
            .unwrap_or_default();

        let geometry = LayoutGeometry::from_parts(
            PageGeometry {
                page_width,
                page_height,
                margins,
            },
            self.font_size,
        )?;
        log::debug!("layout geometry: {:?}", geometry.metrics());
        Ok(geometry)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum StyleArg {
    /// Modern Language Association
    Mla,
    /// American Psychological Association
    Apa,
    /// Chicago Manual of Style
    Chicago,
}

impl From<StyleArg> for Style {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Mla => Style::Mla,
            StyleArg::Apa => Style::Apa,
            StyleArg::Chicago => Style::Chicago,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PageArg {
    /// US Letter (8.5 x 11 in)
    Letter,
    /// ISO A4 (210 x 297 mm)
    A4,
    /// US Legal (8.5 x 14 in)
    Legal,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum UnitArg {
    /// Points (1/72 in)
    #[value(alias = "pt")]
    Point,
    /// Inches
    #[value(alias = "in")]
    Inch,
    /// Millimeters
    Mm,
    /// Pixels at 96 dpi
    #[value(alias = "px")]
    Pixel,
}

impl From<UnitArg> for Unit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Point => Unit::Point,
            UnitArg::Inch => Unit::Inch,
            UnitArg::Mm => Unit::Millimeter,
            UnitArg::Pixel => Unit::Pixel,
        }
    }
}

impl From<PageArg> for PageSize {
    fn from(page: PageArg) -> Self {
        match page {
            PageArg::Letter => PageSize::Letter,
            PageArg::A4 => PageSize::A4,
            PageArg::Legal => PageSize::Legal,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let options = if cli.sequential {
        AnalyzeOptions::new().sequential()
    } else {
        AnalyzeOptions::new()
    };

    let result = match cli.command {
        Some(Commands::Analyze {
            input,
            json,
            compact,
        }) => cmd_analyze(&input, &options, json, compact),
        Some(Commands::Cite { input, to, from }) => {
            cmd_cite(&input, &options, to.into(), from.map(Into::into))
        }
        Some(Commands::Bib { input, style }) => cmd_bib(&input, &options, style.into()),
        Some(Commands::Layout {
            geometry,
            target_line_length,
        }) => cmd_layout(&geometry, target_line_length),
        Some(Commands::Paginate {
            input,
            geometry,
            output,
        }) => cmd_paginate(&input, &geometry, output.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: citeform <COMMAND> <FILE>".yellow());
            println!("       citeform --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn print_diagnostics(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        match diagnostic.severity {
            Severity::Info => eprintln!("{} {}", "note:".dimmed(), diagnostic.message),
            Severity::Warning => eprintln!("{} {}", "warning:".yellow().bold(), diagnostic.message),
        }
    }
}

fn cmd_analyze(
    input: &Path,
    options: &AnalyzeOptions,
    json: bool,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let analysis = citeform::analyze_file(input, options)?;

    if json {
        let format = if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        println!("{}", citeform::render::to_json(&analysis, format)?);
        return Ok(());
    }

    println!("{}", "Manuscript Analysis".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(ref title) = analysis.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    match analysis.dominant_style {
        Some(style) => println!("{}: {}", "Dominant style".bold(), style.to_string().green()),
        None => println!("{}: {}", "Dominant style".bold(), "unknown".yellow()),
    }

    println!();
    println!("{}", "Citations".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (style, count) in analysis.citations.counts.iter() {
        println!("{}: {}", style.display_name().bold(), count);
    }

    println!();
    println!("{}", "Structure".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Paragraphs".bold(), analysis.structure.len());
    println!("{}: {}", "Sections".bold(), analysis.sections.len());
    println!("{}: {}", "Bibliography entries".bold(), analysis.bibliography.len());

    println!();
    print_diagnostics(&analysis.diagnostics);
    Ok(())
}

fn cmd_cite(
    input: &Path,
    options: &AnalyzeOptions,
    to: Style,
    from: Option<Style>,
) -> Result<(), Box<dyn std::error::Error>> {
    let analysis = citeform::analyze_file(input, options)?;

    let Some(from) = from.or(analysis.dominant_style) else {
        print_diagnostics(&analysis.diagnostics);
        return Err("no citations detected; pass --from to choose a source style".into());
    };

    let converted = distinct_conversions(analysis.convert_citations(from, to));
    for item in &converted {
        match &item.result {
            Conversion::Converted { text } => {
                println!("{} {} {}", item.original, "->".dimmed(), text.green())
            }
            Conversion::Unsupported { reason } => {
                println!("{} {} {}", item.original, "->".dimmed(), reason.yellow())
            }
        }
    }

    println!(
        "\n{} {} {} citations converted to {}",
        "Done!".green().bold(),
        converted.len(),
        from,
        to
    );
    Ok(())
}

/// Drop repeats of the same match, which happen when one pattern is
/// registered under several citation kinds.
fn distinct_conversions(converted: Vec<ConvertedCitation>) -> Vec<ConvertedCitation> {
    let mut seen = std::collections::HashSet::new();
    converted
        .into_iter()
        .filter(|item| seen.insert((item.position, item.original.clone())))
        .collect()
}

fn cmd_bib(
    input: &Path,
    options: &AnalyzeOptions,
    style: Style,
) -> Result<(), Box<dyn std::error::Error>> {
    let analysis = citeform::analyze_file(input, options)?;

    if analysis.bibliography.is_empty() {
        print_diagnostics(&analysis.diagnostics);
        return Err("no bibliography entries found".into());
    }

    for line in analysis.format_bibliography(style) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_layout(
    args: &GeometryArgs,
    target_line_length: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut geometry = args.build()?;
    if let Some(target) = target_line_length {
        geometry.calculate_optimal_margins(target)?;
    }

    let page = geometry.geometry();
    let margins = geometry.margins();
    let metrics = geometry.metrics();

    println!("{}", "Page Geometry".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!(
        "{}: {:.2} x {:.2} pt",
        "Page".bold(),
        page.page_width,
        page.page_height
    );
    println!(
        "{}: top {:.2}, right {:.2}, bottom {:.2}, left {:.2} pt",
        "Margins".bold(),
        margins.top,
        margins.right,
        margins.bottom,
        margins.left
    );
    println!("{}: {} pt", "Font size".bold(), metrics.font_size);

    println!();
    println!("{}", "Content Metrics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!(
        "{}: {:.2} x {:.2} pt",
        "Content area".bold(),
        metrics.content_width,
        metrics.content_height
    );
    println!("{}: {}", "Characters per line".bold(), metrics.chars_per_line);
    println!("{}: {}", "Lines per page".bold(), metrics.lines_per_page);
    Ok(())
}

fn cmd_paginate(
    input: &Path,
    args: &GeometryArgs,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let geometry = args.build()?;
    let text = fs::read_to_string(input)?;
    let document = paginate_text(&text, &geometry)?;
    let paged = to_paged_text(&document);

    if let Some(path) = output {
        fs::write(path, &paged)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", paged);
    }

    eprintln!(
        "{} {} lines on {} pages",
        "Layout:".cyan().bold(),
        document.line_count(),
        document.page_count()
    );
    for heading in document.headings.iter().filter(|h| h.was_moved()) {
        eprintln!(
            "{} heading at line {} moved to line {} (page {})",
            "note:".dimmed(),
            heading.original_position,
            heading.adjusted_position,
            heading.page
        );
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "citeform".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Citation analysis and manuscript layout tool");
    println!();
    println!("Styles: MLA, APA, Chicago");
    println!("License: MIT");
}
