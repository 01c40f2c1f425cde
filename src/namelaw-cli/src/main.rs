// Copyright 2026 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use namelaw_engine::color::ColorScale;
use namelaw_engine::datamodel::{Dataset, GridTable, RuleTable, StateDirectory};
use namelaw_engine::grid::{Legend, TileMap};
use namelaw_engine::layout::{CorrelationChart, LabelLayoutConfig, Snapshot};
use namelaw_engine::points::builtin_points;
use namelaw_engine::regression::{RegressionLine, Segment};
use namelaw_engine::summary::percentage_bars;
use namelaw_engine::table::{Column, RuleTableView, SortOrder};
use namelaw_engine::{Category, validate};

const BAR_WIDTH: usize = 40;

/// Explore U.S. state laws on what names may be recorded on a birth
/// certificate.
#[derive(Parser)]
#[command(name = "namelaw", version, long_about = None)]
struct Cli {
    /// Log more (repeat for trace output).  RUST_LOG overrides this.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a name is allowed in a state
    Validate {
        /// Full state name, e.g. "Colorado"
        #[arg(long)]
        state: String,
        name: String,
    },

    /// Print the tile grid map for a dataset
    Grid {
        #[arg(value_enum)]
        dataset: DatasetArg,
    },

    /// Lay out the correlation plot labels and print the result as JSON
    Layout {
        #[arg(long, default_value_t = 600.0)]
        width: f64,
        #[arg(long, default_value_t = 400.0)]
        height: f64,
        /// JSON file overriding layout settings
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the per-state rule table
    Table {
        /// Keep rows whose state or abbreviation contains this text
        #[arg(long)]
        filter: Option<String>,
        #[arg(long, value_enum, default_value = "state")]
        sort: SortColumn,
        /// Sort descending
        #[arg(long)]
        desc: bool,
    },

    /// Print the share of states at each restriction level
    Summary {
        #[arg(value_enum)]
        dataset: DatasetArg,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum DatasetArg {
    Diacritics,
    Length,
}

impl From<DatasetArg> for Dataset {
    fn from(arg: DatasetArg) -> Self {
        match arg {
            DatasetArg::Diacritics => Dataset::Diacritics,
            DatasetArg::Length => Dataset::Length,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum SortColumn {
    State,
    Abbr,
    MaxLength,
}

impl From<SortColumn> for Column {
    fn from(arg: SortColumn) -> Self {
        match arg {
            SortColumn::State => Column::State,
            SortColumn::Abbr => Column::Abbr,
            SortColumn::MaxLength => Column::MaxLength,
        }
    }
}

#[derive(Serialize)]
struct LayoutOutput {
    snapshot: Snapshot,
    overlays: BTreeMap<Category, RegressionLine>,
    segments: BTreeMap<Category, Segment>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_validate(state: &str, name: &str) -> Result<ExitCode> {
    let verdict = validate(RuleTable::builtin(), state, name)?;
    println!("{verdict}");
    if let Some(link) = verdict.rule_link() {
        println!("see {link}");
    }
    Ok(if verdict.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_grid(dataset: Dataset) {
    let map = TileMap::build(GridTable::builtin(dataset), &ColorScale::for_dataset(dataset));
    print!("{}", map.render_text());

    let legend = Legend::for_dataset(dataset);
    println!();
    println!("{}", legend.title);
    for entry in &legend.entries {
        println!("  {} {}", entry.color, entry.label);
    }
    println!("{}", legend.note);
}

fn run_layout(width: f64, height: f64, config: Option<PathBuf>) -> Result<()> {
    let config = match config {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            LabelLayoutConfig::from_json(&json)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => LabelLayoutConfig::default(),
    };

    let points = builtin_points();
    debug!(points = points.len(), width, height, "laying out labels");
    let mut chart = CorrelationChart::new(width, height, config);
    let snapshot = chart.render(&points)?.run();

    let output = LayoutOutput {
        snapshot,
        overlays: chart.overlays().clone(),
        segments: chart.overlay_segments(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_table(filter: Option<&str>, sort: SortColumn, desc: bool) {
    let order = if desc {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };
    let view = RuleTableView::new(RuleTable::builtin(), StateDirectory::builtin())
        .filter(filter.unwrap_or(""))
        .sort_by(sort.into(), order);

    let yes_no = |b: bool| if b { "yes" } else { "no" };
    println!(
        "{:<22} {:<4} {:>6} {:<10} {:<7} {:<7}",
        "STATE", "ABBR", "MAX", "APOSTROPHE", "HYPHEN", "ACCENTS"
    );
    for row in view.rows() {
        let max = row
            .max_length
            .map_or_else(|| "-".to_owned(), |l| l.to_string());
        println!(
            "{:<22} {:<4} {:>6} {:<10} {:<7} {:<7}",
            row.state,
            row.abbr.as_deref().unwrap_or("-"),
            max,
            yes_no(row.allows_apostrophe),
            yes_no(row.allows_hyphen),
            yes_no(row.allows_accents),
        );
    }
}

fn run_summary(dataset: Dataset) {
    println!("{dataset}");
    for bar in percentage_bars(GridTable::builtin(dataset), dataset) {
        println!(
            "{:<20} {:>5.1}% ({:>2}) {}",
            bar.label,
            bar.percent,
            bar.count,
            bar.render(BAR_WIDTH)
        );
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Validate { state, name } => run_validate(&state, &name),
        Commands::Grid { dataset } => {
            run_grid(dataset.into());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Layout {
            width,
            height,
            config,
        } => run_layout(width, height, config).map(|()| ExitCode::SUCCESS),
        Commands::Table { filter, sort, desc } => {
            run_table(filter.as_deref(), sort, desc);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Summary { dataset } => {
            run_summary(dataset.into());
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
