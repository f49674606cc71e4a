use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use storygraph_core::DialogueGraph;
use storygraph_graph::adapters::grid_position;
use storygraph_graph::{EdgeStylePlanner, PlannerSettings, Renderer};
use storygraph_storage::{
    DEFAULT_DEBOUNCE, DebouncedWriter, JsonFilePositions, NodePositions, PositionRepository,
    load_or_default,
};
use tracing::{Level, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log planner details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan edge styles for a dialogue document and print the result as JSON
    Plan {
        /// Structured `{nodes, links}` document or session export
        file: PathBuf,

        /// Output schema: plan, cytoscape, vis or flow
        #[arg(short, long, default_value_t = Renderer::Plan)]
        renderer: Renderer,

        /// Planner settings JSON
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Saved node positions JSON [default: platform data dir]
        #[arg(short, long)]
        positions: Option<PathBuf>,

        /// Write grid positions for unplaced nodes back to the positions file
        #[arg(long)]
        save_positions: bool,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check a dialogue document for dangling or duplicate references
    Validate {
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(io::stderr)
        .init();

    match args.command {
        Command::Plan {
            file,
            renderer,
            config,
            positions,
            save_positions,
            output,
        } => plan(
            &file,
            renderer,
            config.as_deref(),
            positions,
            save_positions,
            output.as_deref(),
        ),
        Command::Validate { file } => validate(&file),
    }
}

fn load_graph(file: &Path) -> Result<DialogueGraph> {
    DialogueGraph::from_path(file)
        .with_context(|| format!("Failed to load dialogue document {:?}", file))
}

fn validate(file: &Path) -> Result<()> {
    let graph = load_graph(file)?;
    graph
        .validate()
        .with_context(|| format!("{:?} is not a valid dialogue graph", file))?;
    println!(
        "{}: {} nodes, {} edges",
        graph.id,
        graph.nodes.len(),
        graph.edges.len()
    );
    Ok(())
}

fn positions_repository(path: Option<PathBuf>) -> Option<JsonFilePositions> {
    match path {
        Some(path) => Some(JsonFilePositions::new(path)),
        None => match JsonFilePositions::open_default() {
            Ok(repo) => Some(repo),
            Err(err) => {
                warn!("No saved positions available: {}", err);
                None
            }
        },
    }
}

fn plan(
    file: &Path,
    renderer: Renderer,
    config: Option<&Path>,
    positions: Option<PathBuf>,
    save_positions: bool,
    output: Option<&Path>,
) -> Result<()> {
    let settings = match config {
        Some(path) => PlannerSettings::load(path)?,
        None => PlannerSettings::default(),
    };

    let graph = load_graph(file)?;
    let planner = EdgeStylePlanner::new(settings);
    let plan = planner
        .plan(&graph)
        .with_context(|| format!("Failed to plan {:?}", file))?;
    info!(
        graph = %graph.id,
        nodes = plan.nodes.len(),
        edges = plan.edges.len(),
        %renderer,
        "Planned dialogue graph"
    );

    let repo = positions_repository(positions);
    let saved = match &repo {
        // Saving over a store that failed to load would discard its layout.
        Some(repo) if save_positions => repo.load().with_context(|| {
            format!("Refusing to overwrite unreadable positions {:?}", repo.path())
        })?,
        Some(repo) => load_or_default(repo),
        None => NodePositions::new(),
    };

    let document = renderer
        .render(&plan, &graph, &saved)
        .context("Failed to serialize rendered graph")?;
    let text = serde_json::to_string_pretty(&document)?;

    match output {
        Some(path) => {
            fs::write(path, text + "\n")
                .with_context(|| format!("Failed to write {:?}", path))?;
            info!("Wrote {:?}", path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", text)?;
        }
    }

    if save_positions {
        match repo {
            Some(repo) => {
                let path = repo.path().to_path_buf();
                let placed = place_all(&graph, &saved);
                let writer = DebouncedWriter::spawn(repo, DEFAULT_DEBOUNCE);
                writer.submit(placed)?;
                writer
                    .flush()
                    .with_context(|| format!("Failed to save positions to {:?}", path))?;
                info!("Saved node positions to {:?}", path);
            }
            None => warn!("--save-positions given but there is no positions file to write"),
        }
    }

    Ok(())
}

/// Saved positions plus grid slots for every node that has none.
fn place_all(graph: &DialogueGraph, saved: &NodePositions) -> NodePositions {
    let mut placed = saved.clone();
    for (index, node) in graph.nodes.iter().enumerate() {
        placed
            .entry(node.id.clone())
            .or_insert_with(|| grid_position(index));
    }
    placed
}
