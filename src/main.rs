use anyhow::{Context, Result};
use button_themes::{
    compositor::{Compositor, TextCompositor},
    report::{write_report, BatchReport},
    theme_gen::DEFAULT_TEMPLATES,
    BatchConfig, Catalog, Color, InputRole, TokenKeys,
};
use clap::Parser;
use log::{error, info, LevelFilter};
use simplelog::{Config, SimpleLogger};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "button-themes",
    about = "Generate themed gradient buttons from a color catalog"
)]
struct Args {
    /// Path to the theme catalog (JSON array of `{ "<theme>": { <color tokens> } }`).
    #[clap(value_name = "CATALOG")]
    catalog: PathBuf,

    /// Directory containing the template images.
    #[clap(short, long, value_name = "DIR", default_value = "./images")]
    images: PathBuf,

    /// Output directory. One subdirectory is created per theme.
    #[clap(short, long, value_name = "DIR", default_value = "./themes")]
    output: PathBuf,

    /// Color token prefix; `<prefix>-200`, `-600` and `-900` are the gradient stops.
    #[clap(long, value_name = "PREFIX", default_value = button_themes::catalog::DEFAULT_TOKEN_PREFIX)]
    token_prefix: String,

    /// Template file names to recolor.
    #[clap(long, value_delimiter = ',', value_name = "FILES")]
    files: Option<Vec<String>>,

    /// Text drawn centered on a template, as FILE=TEXT. Can be repeated.
    #[clap(long, value_name = "FILE=TEXT", value_parser = parse_label, requires = "font")]
    label: Vec<(String, String)>,

    /// TrueType/OpenType font used for labels.
    #[clap(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Label height in pixels.
    #[clap(long, value_name = "PX", default_value_t = 24.0)]
    font_size: f32,

    /// Label color (CSS color format).
    #[clap(long, default_value = "#ffffff")]
    text_color: String,

    /// Write a JSON report of every generated and failed item.
    #[clap(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Stop at the first failure instead of continuing with the other themes.
    #[clap(long)]
    fail_fast: bool,

    /// Enable debug logging.
    #[clap(short, long)]
    verbose: bool,
}

fn parse_label(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((file, text)) if !file.is_empty() => Ok((file.to_string(), text.to_string())),
        _ => Err(format!("expected FILE=TEXT, got '{value}'")),
    }
}

impl Args {
    fn batch_config(&self) -> Result<BatchConfig> {
        let mut config = BatchConfig::new(&self.images, &self.output);
        config.fail_fast = self.fail_fast;

        if let Some(files) = &self.files {
            config.roles = files.iter().map(InputRole::new).collect();
        }
        for (file, text) in &self.label {
            let role = config
                .roles
                .iter_mut()
                .find(|r| &r.file_name == file)
                .with_context(|| {
                    format!(
                        "--label refers to '{file}', which is not a template (expected one of: {})",
                        self.template_names().join(", ")
                    )
                })?;
            role.label = Some(text.clone());
        }

        Ok(config)
    }

    fn template_names(&self) -> Vec<String> {
        match &self.files {
            Some(files) => files.clone(),
            None => DEFAULT_TEMPLATES.iter().map(|f| f.to_string()).collect(),
        }
    }

    fn compositor(&self) -> Result<Option<TextCompositor>> {
        let Some(font) = &self.font else {
            return Ok(None);
        };
        let color = Color::parse(&self.text_color)
            .with_context(|| format!("Invalid text color: {}", self.text_color))?;
        let compositor = TextCompositor::from_file(font, self.font_size, color)?;
        Ok(Some(compositor))
    }
}

fn run(args: &Args) -> Result<BatchReport> {
    let keys = TokenKeys::with_prefix(&args.token_prefix);
    let catalog = Catalog::from_file(&args.catalog, &keys)
        .with_context(|| format!("Failed to load catalog {}", args.catalog.display()))?;
    info!("Loaded {} themes from {}", catalog.len(), args.catalog.display());

    let config = args.batch_config()?;
    let compositor = args.compositor()?;

    let report = button_themes::generate_themes(
        &catalog,
        &config,
        compositor.as_ref().map(|c| c as &dyn Compositor),
    )?;

    if let Some(path) = &args.report {
        write_report(path, &report)?;
        info!("✓ Generated {}", path.display());
    }

    Ok(report)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::init(level, Config::default()).context("Failed to initialize logger")?;

    let report = run(&args)?;

    if !report.is_success() {
        for item in report.failures() {
            error!(
                "{}/{}: {}",
                item.theme,
                item.file,
                item.error.as_deref().unwrap_or("unknown error")
            );
        }
        std::process::exit(1);
    }

    Ok(())
}
