//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use crate::{dashboard::GraphStyle, dataset::SalesDataset};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The sales table, loaded once and shared read-only between requests.
    pub dataset: Arc<SalesDataset>,

    /// The cosmetic options applied to every chart.
    pub graph_style: GraphStyle,
}

impl AppState {
    /// Create a new [AppState] from a loaded dataset.
    pub fn new(dataset: SalesDataset, graph_style: GraphStyle) -> Self {
        Self {
            dataset: Arc::new(dataset),
            graph_style,
        }
    }
}
