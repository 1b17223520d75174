//! # NEC CLI
//!
//! Command-line driver for `nec_core`. Reads `CalculationItem` JSON (one item
//! or an array) from a file or stdin, runs each calculator, and prints a
//! summary followed by the export record.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use nec_core::calculations::{BoxFillInput, CalculationItem, ConductorSizingInput, LoadCalculationInput};
use nec_core::compliance::Selection;
use nec_core::fill::{BoxConductor, BoxFillRequest, BoxVolume};
use nec_core::loads::{Diversity, LoadCategory, LoadEntry};
use nec_core::{ComplianceResult, EngineSettings, WireSize};

/// nec - NEC compliance calculations
#[derive(Parser, Debug)]
#[command(name = "nec")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Engine settings JSON file
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print only the export records as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run calculations from a JSON file ("-" for stdin)
    Run {
        /// Input file
        file: PathBuf,
    },

    /// Run the built-in demonstration scenarios
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let settings = match &cli.settings {
        Some(path) => load_settings(path)?,
        None => EngineSettings::default(),
    };

    let items = match &cli.command {
        Commands::Run { file } => read_items(file)?,
        Commands::Demo => demo_items(),
    };

    tracing::info!(count = items.len(), "running calculations");

    let mut records = Vec::with_capacity(items.len());
    for item in &items {
        let report = item
            .run(&settings)
            .with_context(|| format!("{} '{}' failed", item.calculator_name(), item.label()))?;
        if !cli.json {
            print_summary(item, &report);
        }
        records.push(
            report
                .to_export_record(item, &settings)
                .context("failed to build export record")?,
        );
    }

    if !cli.json {
        println!();
        println!("JSON Output:");
    }
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn load_settings(path: &Path) -> Result<EngineSettings> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid settings in {}", path.display()))
}

/// Accepts a single item or an array of items.
fn read_items(path: &Path) -> Result<Vec<CalculationItem>> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };

    let value: serde_json::Value = serde_json::from_str(&text).context("input is not valid JSON")?;
    let items = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|item| vec![item])
    };
    items.context("input is not a calculation item")
}

/// Conductor sizing, box fill, and neutral load scenarios.
fn demo_items() -> Vec<CalculationItem> {
    vec![
        CalculationItem::ConductorSizing(ConductorSizingInput {
            is_continuous: true,
            one_way_length_ft: Some(100.0),
            max_voltage_drop_percent: Some(3.0),
            ..ConductorSizingInput::new("20 A continuous, 100 ft", 20.0, 120.0)
        }),
        CalculationItem::BoxFill(BoxFillInput {
            label: "Single receptacle, 6 × 12 AWG".to_string(),
            request: BoxFillRequest {
                volume: BoxVolume::RatedIn3(18.0),
                conductors: vec![BoxConductor {
                    size: WireSize::Awg12,
                    count: 6,
                }],
                devices: 1,
                has_equipment_ground: true,
                has_internal_clamp: false,
                support_fittings: 0,
            },
        }),
        CalculationItem::LoadCalculation(LoadCalculationInput {
            label: "Range + general lighting".to_string(),
            loads: vec![
                LoadEntry::new(LoadCategory::Range, 50.0, 240.0).with_label("Range"),
                LoadEntry::new(LoadCategory::LineToNeutral, 30.0, 120.0).with_label("Lighting"),
            ],
            diversity: Diversity::None,
        }),
    ]
}

fn print_summary(item: &CalculationItem, report: &ComplianceResult) {
    println!("═══════════════════════════════════════");
    println!("  {}: {}", report.calculator.to_uppercase(), item.label());
    println!("═══════════════════════════════════════");

    match &report.selected {
        Some(Selection::Conductor(size)) => println!("  Selected:   {}", size),
        Some(Selection::Raceway(raceway)) => println!("  Selected:   {}", raceway),
        Some(Selection::Box(b)) => println!("  Box:        {} ({:.1} in³)", b, b.volume_in3()),
        Some(Selection::Breaker(rating)) => println!("  OCPD:       {:.0} A", rating),
        Some(Selection::Vfd(rating)) => println!("  VFD:        {:.1} A output", rating),
        None => println!("  Selected:   none"),
    }
    if let Some(ampacity) = report.ampacity {
        println!("  Ampacity:   {:.1} A", ampacity);
    }
    if let Some(margin) = report.margin_percent {
        println!("  Margin:     {:.1}%", margin);
    }
    if let (Some(volts), Some(pct)) = (report.voltage_drop_volts, report.voltage_drop_percent) {
        println!("  V-drop:     {:.2} V ({:.2}%)", volts, pct);
    }
    if let Some(pct) = report.diversity_percent {
        println!("  Diversity:  {:.0}%", pct);
    }
    if let (Some(fill), Some(max)) = (report.fill_percent, report.max_fill_percent) {
        println!("  Fill:       {:.1}% (max {:.0}%)", fill, max);
    }
    if let (Some(required), Some(rated)) = (report.required_volume_in3, report.rated_volume_in3) {
        println!("  Volume:     {:.2} / {:.2} in³", required, rated);
    }
    for violation in &report.violations {
        println!("  [FAIL] {}", violation);
    }
    for key in &report.unsupported {
        println!("  [N/A]  {}", key);
    }
    println!(
        "  RESULT: {}",
        if report.passes() { "PASS" } else { "FAIL" }
    );
    println!();
}
