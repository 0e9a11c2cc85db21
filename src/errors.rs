// Error Handling
//
// *La Gestion des Erreurs* (The Error Management) - Workspace-level error type

use lecorpus::CorpusError;
use std::path::PathBuf;
use thiserror::Error;

#[cfg(feature = "graph")]
use legraphe::GraphError;

/// Result type for LeCarnet operations
pub type Result<T> = std::result::Result<T, LeCarnetError>;

/// LeCarnet error types
#[derive(Debug, Error)]
pub enum LeCarnetError {
    /// Corpus could not be built
    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),

    /// Search configuration was rejected
    #[cfg(feature = "search")]
    #[error("Search error: {0}")]
    Search(#[from] lerecherche::Error),

    /// Graph could not be built or queried
    #[cfg(feature = "graph")]
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong
        message: String,
        /// How to fix it
        suggestion: Option<String>,
    },

    /// I/O errors with context
    #[error("I/O error: {context} (path: {path:?})")]
    Io {
        /// Operation that failed
        context: String,
        /// File involved, if any
        path: Option<PathBuf>,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl LeCarnetError {
    /// Create a config error
    pub fn config_error(message: impl Into<String>, suggestion: Option<String>) -> Self {
        LeCarnetError::Config {
            message: message.into(),
            suggestion,
        }
    }

    /// Create an I/O error with context
    pub fn io_error(
        context: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        LeCarnetError::Io {
            context: context.into(),
            path,
            source,
        }
    }

    /// Check if this error is recoverable
    ///
    /// Only a lookup of a node that is not in the graph is a query-time miss
    /// the caller can shrug off; everything else means bad input data.
    pub fn is_recoverable(&self) -> bool {
        match self {
            #[cfg(feature = "graph")]
            LeCarnetError::Graph(GraphError::UnknownNode(_)) => true,
            _ => false,
        }
    }

    /// Get user-friendly suggestion for recovery
    pub fn suggestion(&self) -> Option<String> {
        match self {
            LeCarnetError::Config { suggestion, .. } => suggestion.clone(),
            LeCarnetError::Corpus(CorpusError::InvalidEntity { .. }) => {
                Some("Give every entity a unique, non-empty id.".to_string())
            }
            #[cfg(feature = "search")]
            LeCarnetError::Search(_) => Some(
                "Use non-negative weights with at least one above zero and a threshold between 0 and 1."
                    .to_string(),
            ),
            #[cfg(feature = "graph")]
            LeCarnetError::Graph(GraphError::UnknownNode(_)) => {
                Some("Pick a node id listed by the graph.".to_string())
            }
            #[cfg(feature = "graph")]
            LeCarnetError::Graph(GraphError::DanglingEdge { .. }) => {
                Some("Declare both endpoints of every edge as nodes.".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_suggestion() {
        let err = LeCarnetError::config_error("bad threshold", Some("Use 0.3".to_string()));
        assert_eq!(err.to_string(), "Configuration error: bad threshold");
        assert_eq!(err.suggestion().as_deref(), Some("Use 0.3"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_corpus_error_converts() {
        let err: LeCarnetError = CorpusError::InvalidEntity {
            position: 1,
            reason: "empty identifier".to_string(),
        }
        .into();
        assert!(!err.is_recoverable());
        assert!(err.suggestion().is_some());
    }

    #[cfg(feature = "graph")]
    #[test]
    fn test_unknown_node_is_recoverable() {
        let err: LeCarnetError = GraphError::UnknownNode("ghost".to_string()).into();
        assert!(err.is_recoverable());

        let err: LeCarnetError = GraphError::DuplicateNode("sarah".to_string()).into();
        assert!(!err.is_recoverable());
    }
}
