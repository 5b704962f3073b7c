//! Markpress CLI - Markdown cleanup, glyph inlining and styled HTML assembly

#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use markpress::{
    load_mapping, ConvertOptions, Converter, ExtensionSet, GlyphEngine, GlyphMapping, Orientation,
    TableHandling, ThemeStore, DEFAULT_LIGHT_THEME, KNOWN_EXTENSIONS,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "mpress")]
#[command(author = "SciPenAI")]
#[command(version)]
#[command(about = "Markpress - Markdown cleanup, glyph inlining and styled HTML assembly", long_about = None)]
struct Cli {
    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Glyph mapping JSON file (glyph substitution is disabled without it)
    #[arg(long)]
    mapping: Option<PathBuf>,

    /// Icon asset tree root
    #[arg(long, default_value = "assets/icons")]
    icons: PathBuf,

    /// Themes directory (built-in themes are written here on first use)
    #[arg(long, default_value = "themes")]
    themes_dir: PathBuf,

    /// Theme stylesheet name
    #[arg(long, default_value = DEFAULT_LIGHT_THEME)]
    theme: String,

    /// Wide table handling policy
    #[arg(long, value_enum, default_value_t = TableMode::SmartFit)]
    table_handling: TableMode,

    /// Landscape page orientation (shifts the smart-fit thresholds)
    #[arg(long)]
    landscape: bool,

    /// Skip the structural repair passes
    #[arg(long)]
    no_repair: bool,

    /// Comma-separated renderer extensions to enable (replaces the default set)
    #[arg(long, value_delimiter = ',')]
    extensions: Option<Vec<String>>,

    /// List recognized renderer extensions and exit
    #[arg(long)]
    list_extensions: bool,

    /// Emit only the rendered body, without the document shell
    #[arg(long)]
    body_only: bool,

    /// Write a conversion report JSON to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum TableMode {
    /// Column-count aware compression
    SmartFit,
    /// Always use the compact font
    SmallerFont,
    /// Fixed layout with aggressive wrapping
    BreakWords,
}

#[cfg(feature = "cli")]
impl From<TableMode> for TableHandling {
    fn from(mode: TableMode) -> Self {
        match mode {
            TableMode::SmartFit => TableHandling::SmartFit,
            TableMode::SmallerFont => TableHandling::SmallerFont,
            TableMode::BreakWords => TableHandling::BreakWords,
        }
    }
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list_extensions {
        let mut names: Vec<_> = KNOWN_EXTENSIONS.entries().collect();
        names.sort_by_key(|(name, _)| *name);
        for (name, description) in names {
            println!("{:<18} {}", name, description);
        }
        return Ok(());
    }

    // Read input
    let (input, filename) = match cli.input_file {
        Some(ref path) => (fs::read_to_string(path)?, Some(PathBuf::from(path))),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            (buffer, None)
        }
    };

    let extensions = match cli.extensions {
        Some(ref names) => parse_extensions(names)?,
        None => ExtensionSet::default(),
    };

    let mapping = match cli.mapping {
        Some(ref path) => load_mapping(path),
        None => GlyphMapping::new(),
    };
    let glyphs = GlyphEngine::new(mapping, cli.icons.clone());

    let themes = ThemeStore::new(cli.themes_dir.clone());
    if let Err(err) = themes.ensure_builtin_themes() {
        log::warn!("could not set up built-in themes: {}", err);
    }

    let options = ConvertOptions {
        repair: !cli.no_repair,
        table_handling: cli.table_handling.into(),
        orientation: if cli.landscape {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        },
        theme: cli.theme.clone(),
        extensions,
        base_dir: filename
            .as_deref()
            .and_then(|path| path.parent())
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| dir.to_path_buf()),
    };

    let converter = Converter::new(glyphs, themes);

    let (output, report) = if cli.body_only {
        let body = converter
            .convert_body(&input, &options)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
        (body, None)
    } else {
        let (document, report) = converter
            .convert_document_with_report(&input, &options)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
        (document, Some(report))
    };

    if let (Some(path), Some(report)) = (cli.report.as_ref(), report.as_ref()) {
        let json = serde_json::to_string_pretty(report)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
        fs::write(path, json)?;
    }

    match cli.output {
        Some(ref path) => fs::write(path, output)?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(output.as_bytes())?;
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn parse_extensions(names: &[String]) -> io::Result<ExtensionSet> {
    let mut extensions = ExtensionSet::none();
    for name in names {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if !extensions.set(name, true) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "unknown extension '{}' (use --list-extensions to see the registry)",
                    name
                ),
            ));
        }
    }
    Ok(extensions)
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install markpress --features cli");
    eprintln!("  mpress [OPTIONS] [INPUT_FILE]");
}
