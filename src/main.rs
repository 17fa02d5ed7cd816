// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canopy CLI entrypoint.
//!
//! By default this runs the interactive TUI on a forest document (or the built-in demo forest).
//! `--render` and `--json` print the laid-out forest instead and exit.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use canopy::gesture::{GestureContext, RenderOffsets};
use canopy::layout::{layout_forest, LayoutError, LayoutMetrics, ValidationPolicy};
use canopy::model::demo_forest;
use canopy::render::{render_forest_unicode, RenderError, RenderOptions};
use canopy::store::{
    ForestDocument, ForestDocumentFile, StoreError, ViewStateFile, Workspace, WriteDurability,
};
use canopy::tui::TuiError;
use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "CANOPY_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "canopy",
    version,
    about = "Columnar branch-forest viewer with drag-reorder and a focus separator"
)]
struct Cli {
    /// Forest document (JSON). The built-in demo forest is used when omitted.
    forest: Option<PathBuf>,

    /// Print the Unicode diagram and exit.
    #[arg(long, conflicts_with = "json")]
    render: bool,

    /// Print the layout as JSON (pixel metrics) and exit.
    #[arg(long)]
    json: bool,

    /// Skip cyclic and multi-parent edges instead of rejecting the forest.
    #[arg(long)]
    lenient: bool,

    /// View-state file [default: <forest>.view.json].
    #[arg(long, value_name = "PATH")]
    view_state: Option<PathBuf>,

    /// Sync files and directories to disk on every write.
    #[arg(long)]
    durable_writes: bool,

    /// Write logs here. Without it the TUI logs nothing and the other modes log to stderr.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn policy(&self) -> ValidationPolicy {
        if self.lenient {
            ValidationPolicy::Lenient
        } else {
            ValidationPolicy::Strict
        }
    }

    fn durability(&self) -> WriteDurability {
        if self.durable_writes {
            WriteDurability::Durable
        } else {
            WriteDurability::BestEffort
        }
    }

    fn is_interactive(&self) -> bool {
        !self.render && !self.json
    }

    fn view_state_file(&self) -> Option<ViewStateFile> {
        let file = match (&self.view_state, &self.forest) {
            (Some(path), _) => ViewStateFile::new(path),
            (None, Some(forest)) => ViewStateFile::beside(forest),
            (None, None) => return None,
        };
        Some(file.with_durability(self.durability()))
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Tui(#[from] TuiError),
    #[error("cannot encode layout: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot open log file {path:?}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot install logger: {0}")]
    Logger(String),
}

fn init_logging(cli: &Cli) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match (&cli.log_file, cli.is_interactive()) {
        (Some(path), _) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| CliError::LogFile { path: path.clone(), source })?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        // The TUI owns the terminal; stderr output would corrupt it.
        (None, true) => return Ok(()),
        (None, false) => builder.with_writer(io::stderr).try_init(),
    };
    result.map_err(|err| CliError::Logger(err.to_string()))
}

fn open_workspace(cli: &Cli) -> Result<Workspace, CliError> {
    let view_file = cli.view_state_file();
    let workspace = match &cli.forest {
        Some(path) => {
            let document_file = ForestDocumentFile::new(path).with_durability(cli.durability());
            Workspace::open(document_file, view_file)?
        }
        None => Workspace::in_memory(ForestDocument::from_forest(&demo_forest()), view_file)?,
    };
    Ok(workspace)
}

fn print_render(cli: &Cli, workspace: &Workspace) -> Result<(), CliError> {
    let metrics = workspace.metrics(LayoutMetrics::cells())?;
    let layout = layout_forest(&workspace.forest(), &metrics, cli.policy())?;
    let view = workspace.view();
    let ctx = GestureContext {
        layout: &layout,
        sibling_order: &view.sibling_order,
        separator_index: view.focus_separator_index,
        metrics: &metrics,
    };
    let offsets = RenderOffsets::compute(&ctx, None);
    let options =
        RenderOptions { separator_index: view.focus_separator_index, hide_separator: false };
    println!("{}", render_forest_unicode(&layout, &offsets, options)?);
    Ok(())
}

fn print_json(cli: &Cli, workspace: &Workspace) -> Result<(), CliError> {
    let metrics = workspace.metrics(LayoutMetrics::pixels())?;
    let layout = layout_forest(&workspace.forest(), &metrics, cli.policy())?;
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}

fn run(cli: &Cli) -> Result<(), CliError> {
    init_logging(cli)?;
    let workspace = open_workspace(cli)?;
    tracing::debug!(
        forest = ?cli.forest,
        view_state = ?workspace.view_file().map(ViewStateFile::path),
        "workspace opened"
    );

    if cli.render {
        print_render(cli, &workspace)
    } else if cli.json {
        print_json(cli, &workspace)
    } else {
        canopy::tui::run(workspace, cli.policy())?;
        Ok(())
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("canopy: {err}");
        std::process::exit(1);
    }
}
