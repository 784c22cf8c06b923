//! Statistics for one MCTS search
//!
//! Besides the usual throughput counters, a search records how much of the
//! tree it inherited from the previous turn, which shows whether root
//! relocation is paying off.

use std::time::Duration;

/// Statistics collected during an MCTS search
#[derive(Debug, Clone)]
pub struct SearchStatistics {
    /// Number of iterations performed
    pub iterations: usize,

    /// Wall-clock time of the search
    pub total_time: Duration,

    /// Number of nodes in the tree when the search ended
    pub tree_size: usize,

    /// Maximum depth below the root reached during selection and expansion
    pub max_depth: usize,

    /// Whether the time budget ended the search
    pub stopped_early: bool,

    /// Nodes below the root already present when the search started
    pub reused_nodes: usize,

    /// Simulations the root carried over from earlier searches
    pub reused_simulations: u64,
}

impl SearchStatistics {
    /// Creates statistics for a search that has not run yet
    pub fn new() -> Self {
        SearchStatistics {
            iterations: 0,
            total_time: Duration::ZERO,
            tree_size: 1,
            max_depth: 0,
            stopped_early: false,
            reused_nodes: 0,
            reused_simulations: 0,
        }
    }

    /// Returns true if the search started from an inherited subtree
    pub fn reused_tree(&self) -> bool {
        self.reused_nodes > 0 || self.reused_simulations > 0
    }

    /// Returns the number of iterations per second
    pub fn iterations_per_second(&self) -> f64 {
        let secs = self.total_time.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.iterations as f64 / secs
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        format!(
            "MCTS search: {} iterations in {:.3} s ({:.0}/s), {} nodes, depth {}, \
             reused {} nodes and {} root simulations{}",
            self.iterations,
            self.total_time.as_secs_f64(),
            self.iterations_per_second(),
            self.tree_size,
            self.max_depth,
            self.reused_nodes,
            self.reused_simulations,
            if self.stopped_early { ", stopped by time budget" } else { "" }
        )
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}
