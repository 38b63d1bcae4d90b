//! doc-pager CLI
//! Inspect the page catalogs, compute breaks for measured heights, and render
//! the print pages of a document plan. The main interface is through WASM
//! bindings.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use doc_pager::geometry::{margin_preset, margin_preset_names, page_format, page_format_names};
use doc_pager::pagination::{oversized_blocks, page_spans};
use doc_pager::{
    calculate_page_breaks, prepare_paginated_print, BreakConfig, DocumentPlan, LayoutConfig,
    Markers, Orientation,
};

#[derive(Parser)]
#[command(
    name = "doc-pager",
    about = "Page-break calculation and print pagination for paged documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the page formats and margin presets
    Formats,

    /// Compute page breaks for a list of block heights
    Breaks {
        /// Block heights in pixels, in document order
        #[arg(allow_negative_numbers = true)]
        heights: Vec<f64>,

        /// Content budget per page; derived from the layout when omitted
        #[arg(short, long)]
        content_height: Option<f64>,

        /// Overflow tolerance in pixels
        #[arg(short, long)]
        tolerance: Option<f64>,

        /// Page format used to derive the budget
        #[arg(short, long, default_value = "Letter")]
        format: String,

        /// Margin preset used to derive the budget
        #[arg(short, long)]
        margins: Option<String>,

        /// Use the landscape variant of the format
        #[arg(long)]
        landscape: bool,
    },

    /// Materialize the print pages of a JSON document plan as HTML
    Paginate {
        /// Plan file: {"layout": {...}, "blocks": [{"tag", "height", "text"}]}
        plan: PathBuf,

        /// Write the HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_pager=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Formats => {
            let formats: Vec<_> = page_format_names()
                .map(|name| json!({ "name": name, "format": page_format(name) }))
                .collect();
            let margins: Vec<_> = margin_preset_names()
                .map(|name| json!({ "name": name, "margins": margin_preset(name) }))
                .collect();
            let catalog = json!({ "formats": formats, "margins": margins });
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }

        Commands::Breaks {
            heights,
            content_height,
            tolerance,
            format,
            margins,
            landscape,
        } => {
            let mut layout = LayoutConfig::new(format);
            if let Some(margins) = margins {
                layout = layout.with_margins(margins);
            }
            if landscape {
                layout = layout.with_orientation(Orientation::Landscape);
            }
            let geometry = layout.resolve();

            let mut config =
                BreakConfig::new(content_height.unwrap_or_else(|| geometry.content_area_height()));
            if let Some(tolerance) = tolerance {
                config = config.with_tolerance(tolerance);
            }

            let breaks = calculate_page_breaks(heights.iter().copied(), &config);
            let report = json!({
                "pageContentAreaHeight": config.page_content_area_height,
                "overflowTolerance": config.tolerance(),
                "breaks": breaks,
                "pages": page_spans(&heights, &breaks, &config),
                "oversizedBlocks": oversized_blocks(&heights, geometry.max_content_child_height()),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Paginate { plan, output } => {
            let source = fs::read_to_string(&plan)
                .with_context(|| format!("failed to read plan {}", plan.display()))?;
            let plan = DocumentPlan::from_json(&source).context("invalid document plan")?;

            let markers = Markers::default();
            let mut planned = plan.build(&markers)?;
            let cleanup = prepare_paginated_print(&mut planned.document, &planned.root, &markers)?;

            let html = match cleanup {
                Some(mut cleanup) => {
                    let html = cleanup
                        .injected()
                        .iter()
                        .rev()
                        .map(|node| planned.document.to_html(*node))
                        .collect::<Vec<_>>()
                        .join("\n");
                    tracing::info!(pages = cleanup.page_count(), "materialized print pages");
                    cleanup.restore(&mut planned.document);
                    html
                }
                None => {
                    tracing::warn!("plan has no blocks, nothing to paginate");
                    String::new()
                }
            };

            match output {
                Some(path) => fs::write(&path, html)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{}", html),
            }
        }
    }

    Ok(())
}
