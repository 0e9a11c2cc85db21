// CLI Interface
//
// Demo command-line interface over the built-in sample workspace.

use crate::config::CarnetConfig;
use crate::knowledge::KnowledgeBase;
use anyhow::{Context, Result as AnyhowResult};
use clap::{Parser, Subcommand};
use legraphe::NodeCategory;
use lerecherche::CategoryFilter;
use std::path::PathBuf;

/// LeCarnet - Story knowledge index
#[derive(Parser, Debug)]
#[command(name = "lecarnet")]
#[command(author = "LeCarnet Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search and explore a writing workspace's documents, characters and places", long_about = None)]
pub struct Cli {
    /// Workspace directory holding `.lecarnet/config.toml`
    #[arg(global = true, long = "workspace", short = 'w')]
    pub workspace: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(global = true, long = "verbose", short = 'v')]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fuzzy search over titles, bodies and tags
    Search {
        /// Search query; empty lists everything
        #[arg(value_name = "QUERY", default_value = "")]
        query: String,

        /// Category filter: all, documents, characters, locations or notes
        #[arg(long = "filter", short = 'f', default_value = "all")]
        filter: CategoryFilter,
    },

    /// Show the connections of a graph node
    Neighbors {
        /// Node id, e.g. `sarah`
        #[arg(value_name = "NODE_ID")]
        node_id: String,
    },

    /// Show graph statistics
    Stats,

    /// Print renderer elements as JSON
    ExportGraph,
}

impl Cli {
    /// Run the CLI
    pub fn run(self) -> AnyhowResult<()> {
        init_logging_impl(self.verbose);

        let config = match self.workspace {
            Some(ref dir) => CarnetConfig::load(dir)
                .with_context(|| format!("Failed to load workspace config from {:?}", dir))?,
            None => match std::env::current_dir() {
                Ok(dir) => CarnetConfig::load_or_default(dir),
                Err(_) => CarnetConfig::default(),
            },
        };

        let kb = KnowledgeBase::sample(&config).context("Failed to build sample workspace")?;

        match self.command {
            Commands::Search { query, filter } => cmd_search_impl(&kb, &query, filter),
            Commands::Neighbors { node_id } => cmd_neighbors_impl(&kb, &node_id),
            Commands::Stats => cmd_stats_impl(&kb),
            Commands::ExportGraph => cmd_export_graph_impl(&kb),
        }
    }
}

/// Initialize logging to stderr
fn init_logging_impl(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Search command implementation
fn cmd_search_impl(kb: &KnowledgeBase, query: &str, filter: CategoryFilter) -> AnyhowResult<()> {
    let results = kb.search(query, filter);

    if query.trim().is_empty() {
        println!("{} entries ({})", results.len(), filter.label());
    } else {
        println!(
            "Found {} results for \"{}\" ({})",
            results.len(),
            query,
            filter.label()
        );
    }

    for result in &results {
        let entity = &result.entity;
        println!();
        println!(
            "  {:>3}%  {}  [{}]",
            result.match_percent(),
            entity.title,
            entity.category.display_name()
        );
        if !entity.tags.is_empty() {
            println!("        tags: {}", entity.tags.join(", "));
        }
        if !entity.last_modified.is_empty() {
            println!("        modified {}", entity.last_modified);
        }
    }

    Ok(())
}

/// Neighbors command implementation
fn cmd_neighbors_impl(kb: &KnowledgeBase, node_id: &str) -> AnyhowResult<()> {
    let view = match kb.neighbors_of(node_id) {
        Ok(view) => view,
        Err(e) => {
            if let Some(hint) = e.suggestion() {
                eprintln!("{}", hint);
            }
            return Err(e.into());
        }
    };

    println!("{} ({})", view.label, view.category);
    println!("Connections: {}", view.connection_count);
    if !view.neighbors.is_empty() {
        println!("Connected to: {}", view.neighbor_summary());
    }
    for connection in &view.connections {
        let arrow = if connection.outgoing { "->" } else { "<-" };
        println!(
            "  {} {} {} ({})",
            arrow, connection.relationship, connection.neighbor_label, connection.neighbor_id
        );
    }

    Ok(())
}

/// Stats command implementation
fn cmd_stats_impl(kb: &KnowledgeBase) -> AnyhowResult<()> {
    let stats = kb.statistics();

    println!("Nodes: {}", stats.total_nodes);
    println!("Edges: {}", stats.total_edges);
    for category in NodeCategory::ALL {
        println!("  {:<12} {}", category.legend_label(), stats[category]);
    }

    Ok(())
}

/// Export command implementation
fn cmd_export_graph_impl(kb: &KnowledgeBase) -> AnyhowResult<()> {
    let elements = kb.graph().render_elements();
    let json =
        serde_json::to_string_pretty(&elements).context("Failed to serialize graph elements")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["lecarnet", "search", "sarah", "--filter", "characters"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Search { ref query, filter: CategoryFilter::Characters } if query == "sarah"
        ));
    }

    #[test]
    fn test_search_defaults() {
        let cli = Cli::try_parse_from(["lecarnet", "search"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Search { ref query, filter: CategoryFilter::All } if query.is_empty()
        ));
    }

    #[test]
    fn test_bad_filter_rejected() {
        assert!(Cli::try_parse_from(["lecarnet", "search", "x", "--filter", "planets"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["lecarnet", "-v", "neighbors", "sarah", "-w", "/tmp"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.workspace, Some(PathBuf::from("/tmp")));
        assert!(matches!(cli.command, Commands::Neighbors { ref node_id } if node_id == "sarah"));
    }

    #[test]
    fn test_export_graph_command() {
        let cli = Cli::try_parse_from(["lecarnet", "export-graph"]).unwrap();
        assert!(matches!(cli.command, Commands::ExportGraph));
    }
}
