//! CLI entry point for sutgen.
//!
//! Reads a JSON source model, extracts a structural model for every type in
//! it, and prints the generated test-method descriptors.
//!
//! # Usage
//!
//! ```bash
//! sutgen [OPTIONS] <COMMAND>
//!
//! # Generate descriptors for every type in a model file
//! sutgen generate --input model.json
//!
//! # Readable output with a custom configuration
//! sutgen generate --input model.json --config sutgen.json --format text
//!
//! # Only one method of one type
//! sutgen generate --input model.json --type OrderService --select method:2
//!
//! # Print the default configuration
//! sutgen config
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::fmt::Write as _;
use std::io::Write as _;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{WrapErr, bail, eyre};
use sg_core::{Config, ItemSelector, MemberId, NamingContext, TypeModel};
use sg_generate::{GenerationOutput, TestGenerator};
use sg_model::{JsonSourceModel, ModelExtractor};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Decides which unit tests a type needs and how to build its instance.
#[derive(Parser)]
#[command(name = "sutgen", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (JSON). Defaults apply when omitted.
    #[arg(short, long, global = true, env = "SUTGEN_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Generate test-method descriptors for a source model.
    Generate {
        /// Source model file (JSON).
        #[arg(short, long)]
        input: Utf8PathBuf,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,

        /// Only generate for the type with this name.
        #[arg(long = "type", value_name = "NAME")]
        type_name: Option<String>,

        /// Restrict generation to one item of the selected type, such as
        /// `type`, `constructor:0` or `method:2`.
        #[arg(long, requires = "type_name")]
        select: Option<Selector>,
    },

    /// Print the effective configuration.
    Config,
}

/// Output format.
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// JSON format.
    Json,
    /// Human-readable listing.
    Text,
}

/// An [`ItemSelector`] parsed from the command line.
#[derive(Debug, Clone, Copy)]
struct Selector(ItemSelector);

impl FromStr for Selector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "type" {
            return Ok(Self(ItemSelector::Type));
        }
        let (kind, index) = s
            .split_once(':')
            .ok_or_else(|| format!("expected 'type' or '<kind>:<index>', got '{s}'"))?;
        let id = index
            .parse::<usize>()
            .map(MemberId::new)
            .map_err(|e| format!("invalid index '{index}': {e}"))?;
        let selector = match kind {
            "constructor" => ItemSelector::Constructor(id),
            "property" => ItemSelector::Property(id),
            "method" => ItemSelector::Method(id),
            "operator" => ItemSelector::Operator(id),
            "indexer" => ItemSelector::Indexer(id),
            other => return Err(format!("unknown item kind '{other}'")),
        };
        Ok(Self(selector))
    }
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default. Logs go
/// to stderr so they never mix with generated output.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(level)
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Loads the configuration file, or the defaults when none is given.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid
/// configuration.
fn load_config(path: Option<&Utf8Path>) -> color_eyre::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = std::fs::read_to_string(path.as_std_path())
        .wrap_err_with(|| format!("Failed to read configuration: {path}"))?;
    let config = Config::from_json_str(&text)
        .wrap_err_with(|| format!("Invalid configuration: {path}"))?;
    info!(path = %path, "Loaded configuration");
    Ok(config)
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Extracts models from `input`, generates descriptors and writes them.
///
/// Types whose model cannot be built are reported on stderr and skipped.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, the selected
/// type or item does not exist, or the output cannot be written.
fn run_generate(
    config: Config,
    input: &Utf8Path,
    format: OutputFormat,
    output: Option<&Utf8Path>,
    type_name: Option<&str>,
    select: Option<Selector>,
) -> color_eyre::Result<()> {
    info!(input = %input, "Reading source model");

    let text = std::fs::read_to_string(input.as_std_path())
        .wrap_err_with(|| format!("Failed to read source model: {input}"))?;
    let source = JsonSourceModel::from_json_str(&text)
        .wrap_err_with(|| format!("Invalid source model: {input}"))?;

    let generator = TestGenerator::new(config)?;
    let results = ModelExtractor::new(&source)
        .extract_all(|id| generator.policy().target_field_name(&NamingContext::new(id)));

    let mut models: Vec<TypeModel> = Vec::with_capacity(results.len());
    let mut failures = 0usize;
    for (id, result) in results {
        if type_name.is_some_and(|name| name != id) {
            continue;
        }
        match result {
            Ok(model) => models.push(model),
            Err(e) => {
                failures += 1;
                warn!(type_name = %id, error = %e, "Skipping type");
            }
        }
    }

    if let Some(name) = type_name {
        let Some(model) = models.first_mut() else {
            bail!("No buildable type named '{name}' in {input}");
        };
        if let Some(Selector(selector)) = select {
            model.select_single_item(selector)?;
        }
    }

    let outputs = generator.generate_all(&models);
    info!(
        types = outputs.len(),
        methods = outputs.iter().map(|o| o.methods.len()).sum::<usize>(),
        failures,
        "Generation complete"
    );

    let content = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&outputs)
            .map_err(|e| eyre!("Failed to serialize JSON: {e}"))?,
        OutputFormat::Text => render_text(&outputs),
    };
    write_output(&content, output)
}

/// Prints the effective configuration as JSON.
fn run_config(config: &Config) -> color_eyre::Result<()> {
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| eyre!("Failed to serialize JSON: {e}"))?;
    write_output(&content, None)
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Writes `content` to `output`, or to stdout.
fn write_output(content: &str, output: Option<&Utf8Path>) -> color_eyre::Result<()> {
    if let Some(path) = output {
        std::fs::write(path.as_std_path(), content)
            .wrap_err_with(|| format!("Failed to write output: {path}"))?;
        info!(path = %path, "Output written");
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{content}")?;
    }
    Ok(())
}

/// Renders outputs as an indented listing.
///
/// Methods that are not marked for generation are listed with `(skipped)`.
fn render_text(outputs: &[GenerationOutput]) -> String {
    let mut text = String::new();
    for output in outputs {
        let _ = writeln!(text, "{}", output.type_name);

        let setup = &output.setup;
        for field in &setup.fields {
            let _ = writeln!(
                text,
                "  field {} {} = {};",
                field.type_ref, field.name, field.initializer
            );
        }
        if let (Some(target), Some(construction)) =
            (&setup.target_field, &setup.target_construction)
        {
            let _ = writeln!(text, "  setup {target} = {construction};");
        }

        for method in &output.methods {
            let skipped = if method.should_generate { "" } else { " (skipped)" };
            let _ = writeln!(text, "  [{}] {}{skipped}", method.strategy, method.name);
            for statement in &method.body {
                let _ = writeln!(text, "      {statement}");
            }
        }

        if !output.required_assets.is_empty() {
            let assets: Vec<String> = output
                .required_assets
                .iter()
                .map(|a| format!("{a:?}"))
                .collect();
            let _ = writeln!(text, "  requires {}", assets.join(", "));
        }
        text.push('\n');
    }
    text
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    let config = load_config(cli.config.as_deref())?;

    // 4. Route to appropriate command
    match &cli.command {
        Commands::Generate {
            input,
            format,
            output,
            type_name,
            select,
        } => run_generate(
            config,
            input,
            *format,
            output.as_deref(),
            type_name.as_deref(),
            *select,
        ),
        Commands::Config => run_config(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sg_core::{ConstructorModel, TypeModelBuilder};

    #[test]
    fn test_selector_parsing() {
        assert!(matches!("type".parse::<Selector>(), Ok(Selector(ItemSelector::Type))));
        assert!(matches!(
            "method:2".parse::<Selector>(),
            Ok(Selector(ItemSelector::Method(id))) if id.index() == 2
        ));
        assert!("method".parse::<Selector>().is_err());
        assert!("field:1".parse::<Selector>().is_err());
        assert!("property:x".parse::<Selector>().is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_text_lists_setup_and_methods() {
        let mut model = TypeModelBuilder::new("Clock")
            .constructor(ConstructorModel::new([]))
            .build()
            .unwrap();
        model.select_single_item(ItemSelector::Constructor(MemberId::new(0))).unwrap();
        let generator = TestGenerator::new(Config::default()).unwrap();
        let text = render_text(&[generator.generate(&model)]);
        assert!(text.starts_with("Clock\n  setup _testClass = new Clock();\n"));
        assert!(text.contains("  [can_construct] CanConstruct\n"));
        assert!(text.contains("      Assert.NotNull(instance);\n"));
    }
}
