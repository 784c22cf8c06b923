//! Main implementation of the Monte Carlo Tree Search algorithm
//!
//! This module contains the search driver, orchestrating the four phases of
//! selection, expansion, simulation and backpropagation over a
//! [`SearchTree`], and relocating the tree's root between turns so the
//! statistics gathered for the current position survive.

use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, trace};
use rand::{rngs::StdRng, RngCore, SeedableRng};

use crate::{
    board::{Board, Move, Player},
    config::{BestChildCriteria, MCTSConfig},
    policy::{
        backpropagation::{BackpropagationPolicy, StandardPolicy},
        expansion::{ExpansionPolicy, RandomExpansionPolicy},
        selection::{SelectionPolicy, UCB1Policy},
        simulation::{RandomPolicy, SimulationPolicy},
    },
    stats::SearchStatistics,
    tree::{MCTSNode, NodeId, SearchTree},
    Result, SearchError,
};

/// The Monte Carlo Tree Search driver
///
/// Owns the search tree, the phase policies and the random source. The same
/// driver is meant to be kept for a whole game: after each move, relocate
/// the root with [`advance`](Self::advance) or [`sync_to`](Self::sync_to)
/// instead of building a new tree.
pub struct MCTS {
    /// The search tree
    tree: SearchTree,

    /// Configuration for the search
    config: MCTSConfig,

    /// Statistics gathered during the last search
    statistics: SearchStatistics,

    /// Policy for selecting nodes during the selection phase
    selection_policy: Box<dyn SelectionPolicy>,

    /// Policy for choosing the move to expand
    expansion_policy: Box<dyn ExpansionPolicy>,

    /// Policy for simulating games during the simulation phase
    simulation_policy: Box<dyn SimulationPolicy>,

    /// Policy for backpropagating results
    backpropagation_policy: Box<dyn BackpropagationPolicy>,

    /// Random source shared by every phase
    rng: Box<dyn RngCore>,
}

impl MCTS {
    /// Creates a driver rooted at `board` with `player` to move
    pub fn new(board: Board, player: Player, config: MCTSConfig) -> Self {
        let rng: Box<dyn RngCore> = match config.seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_entropy()),
        };

        MCTS {
            tree: SearchTree::new(board, player),
            selection_policy: Box::new(UCB1Policy::new(config.exploration_constant)),
            expansion_policy: Box::new(RandomExpansionPolicy::new()),
            simulation_policy: Box::new(RandomPolicy::new()),
            backpropagation_policy: Box::new(StandardPolicy::new()),
            statistics: SearchStatistics::new(),
            config,
            rng,
        }
    }

    /// Sets the selection policy to use
    pub fn with_selection_policy<P: SelectionPolicy + 'static>(mut self, policy: P) -> Self {
        self.selection_policy = Box::new(policy);
        self
    }

    /// Sets the expansion policy to use
    pub fn with_expansion_policy<P: ExpansionPolicy + 'static>(mut self, policy: P) -> Self {
        self.expansion_policy = Box::new(policy);
        self
    }

    /// Sets the simulation policy to use
    pub fn with_simulation_policy<P: SimulationPolicy + 'static>(mut self, policy: P) -> Self {
        self.simulation_policy = Box::new(policy);
        self
    }

    /// Sets the backpropagation policy to use
    pub fn with_backpropagation_policy<P: BackpropagationPolicy + 'static>(
        mut self,
        policy: P,
    ) -> Self {
        self.backpropagation_policy = Box::new(policy);
        self
    }

    /// Replaces the random source
    pub fn with_rng<R: RngCore + 'static>(mut self, rng: R) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Returns the search tree
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Returns the search tree mutably
    pub fn tree_mut(&mut self) -> &mut SearchTree {
        &mut self.tree
    }

    /// Returns the configuration
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Returns the search statistics
    pub fn get_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Runs the configured search and returns the best move
    ///
    /// # Errors
    ///
    /// * [`SearchError::InvalidConfiguration`] if the configuration does not validate
    /// * [`SearchError::NoLegalMoves`] if the root position is full
    /// * [`SearchError::GameOver`] if the move into the root already won
    pub fn search(&mut self) -> Result<Move> {
        self.config.validate()?;
        self.run_search(self.config.time_budget)?;
        self.best_action(self.config.best_child_criteria)
    }

    /// Runs search iterations until `budget` has elapsed
    ///
    /// The deadline is checked between iterations only. The configured
    /// iteration limit, if any, also ends the search. A zero budget means
    /// no deadline, leaving the iteration limit as the only stop.
    pub fn run_search(&mut self, budget: Duration) -> Result<()> {
        self.ensure_moves()?;
        if budget.is_zero() && self.config.max_iterations.is_none() {
            return Err(SearchError::InvalidConfiguration(
                "a zero time budget needs an iteration limit".to_string(),
            ));
        }
        self.reset_statistics();

        let start_time = Instant::now();
        loop {
            if !budget.is_zero() && start_time.elapsed() >= budget {
                self.statistics.stopped_early = true;
                break;
            }
            if let Some(max) = self.config.max_iterations {
                if self.statistics.iterations >= max {
                    break;
                }
            }

            self.execute_iteration()?;
            self.statistics.iterations += 1;
        }

        self.statistics.total_time = start_time.elapsed();
        debug!(
            "MCTS ran {} iterations in {:.3} s, tree holds {} nodes",
            self.statistics.iterations,
            self.statistics.total_time.as_secs_f64(),
            self.statistics.tree_size
        );
        Ok(())
    }

    /// Runs exactly `iterations` search iterations
    pub fn run_iterations(&mut self, iterations: usize) -> Result<()> {
        self.ensure_moves()?;
        self.reset_statistics();

        let start_time = Instant::now();
        for _ in 0..iterations {
            self.execute_iteration()?;
            self.statistics.iterations += 1;
        }
        self.statistics.total_time = start_time.elapsed();
        Ok(())
    }

    /// Selects the best root move according to `criteria`
    ///
    /// If some root move has no child yet, search iterations are run first
    /// until every root move is expanded. Ties go to the lowest column.
    ///
    /// # Errors
    ///
    /// Fails like [`search`](Self::search) when the root is full or won.
    pub fn best_action(&mut self, criteria: BestChildCriteria) -> Result<Move> {
        self.ensure_moves()?;

        let mut extra = 0;
        while !self.tree.root_node().is_fully_expanded() {
            self.execute_iteration()?;
            extra += 1;
        }
        if extra > 0 {
            debug!("ran {} extra iterations to expand the root", extra);
        }

        let root = self.tree.root_node();
        let mut best: Option<(u64, Move)> = None;
        for (action, child) in root.expanded_children() {
            let node = self.tree.node(child);
            let value = match criteria {
                BestChildCriteria::MostWins => node.wins(),
                BestChildCriteria::MostSimulations => node.simulations(),
            };
            trace!(
                "column {}: wins {}, simulations {}",
                action,
                node.wins(),
                node.simulations()
            );

            if best.map_or(true, |(current, _)| value > current) {
                best = Some((value, action));
            }
        }

        best.map(|(_, action)| action).ok_or(SearchError::NoLegalMoves)
    }

    /// Relocates the root to the child reached by `action`
    ///
    /// The statistics of the kept subtree are preserved; everything else is
    /// discarded. Returns false if that child was never expanded, in which
    /// case the caller should start a fresh tree.
    pub fn advance(&mut self, action: Move) -> bool {
        let moved = self.tree.advance(action);
        if moved {
            debug!(
                "root advanced through column {}, kept {} nodes with {} simulations",
                action,
                self.tree.len(),
                self.tree.root_node().simulations()
            );
        }
        moved
    }

    /// Moves the root to the node matching `board` with `player` to move
    ///
    /// Succeeds if the root already matches or if one of its expanded
    /// children does (the opponent's reply to the previous search). Returns
    /// false if the position is not in the tree.
    pub fn sync_to(&mut self, board: &Board, player: Player) -> bool {
        let root = self.tree.root_node();
        if root.board == *board && root.player == player {
            return true;
        }

        let reply = root
            .expanded_children()
            .find(|&(_, id)| {
                let node = self.tree.node(id);
                node.board == *board && node.player == player
            })
            .map(|(action, _)| action);

        match reply {
            Some(action) => self.advance(action),
            None => false,
        }
    }

    /// Returns a visualization of the search tree down to `max_depth`
    pub fn visualize_tree(&self, max_depth: usize) -> String {
        let mut result = String::new();
        self.visualize_node(self.tree.root(), max_depth, &mut result);
        result
    }

    /// Helper method to visualize a node and its children
    fn visualize_node(&self, id: NodeId, max_depth: usize, output: &mut String) {
        let node = self.tree.node(id);
        let indent = "  ".repeat(node.depth);
        let action_str = match &node.action {
            Some(action) => format!("column {}", action),
            None => "Root".to_string(),
        };

        output.push_str(&format!(
            "{}{} (wins: {}, simulations: {}{})\n",
            indent,
            action_str,
            node.wins(),
            node.simulations(),
            if node.terminal { ", terminal" } else { "" }
        ));

        if node.depth < max_depth {
            for (_, child) in node.expanded_children() {
                self.visualize_node(child, max_depth, output);
            }
        }
    }

    /// Fails when there is nothing left to search from the root
    fn ensure_moves(&self) -> Result<()> {
        let root = self.tree.root_node();
        if root.terminal {
            return Err(SearchError::GameOver {
                winner: root.player.other(),
            });
        }
        if root.has_no_moves() {
            return Err(SearchError::NoLegalMoves);
        }
        Ok(())
    }

    fn reset_statistics(&mut self) {
        let root = self.tree.root_node();
        self.statistics = SearchStatistics::new();
        self.statistics.reused_nodes = self.tree.len() - 1;
        self.statistics.reused_simulations = root.simulations();
        self.statistics.tree_size = self.tree.len();
    }

    /// Execute a single iteration of the MCTS algorithm
    fn execute_iteration(&mut self) -> Result<()> {
        // 1. Selection phase
        let selected = self.selection();

        // 2. Expansion phase
        let simulation_point = self.expansion(selected)?;

        // 3. Simulation phase
        let winner = self.simulation(simulation_point)?;

        // 4. Backpropagation phase
        self.backpropagation(simulation_point, winner);

        Ok(())
    }

    /// Selection phase: descend through fully expanded nodes by UCB1
    fn selection(&mut self) -> NodeId {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.node(current);
            if node.terminal || node.has_no_moves() || !node.is_fully_expanded() {
                break;
            }

            match self
                .selection_policy
                .select_child(&self.tree, current, &mut *self.rng)
            {
                Some(child) => current = child,
                None => break,
            }
        }

        self.note_depth(current);
        current
    }

    /// Expansion phase: add one child to the selected node
    ///
    /// A terminal node is not expanded; it becomes the simulation point
    /// itself, as does a node without legal moves.
    fn expansion(&mut self, selected: NodeId) -> Result<NodeId> {
        let node = self.tree.node(selected);
        if node.terminal {
            return Ok(selected);
        }

        let Some(action) = self
            .expansion_policy
            .select_move_to_expand(node, &mut *self.rng)
        else {
            return Ok(selected);
        };

        let child = self.tree.expand(selected, action)?;
        self.statistics.tree_size = self.tree.len();
        self.note_depth(child);
        trace!("expanded column {} at depth {}", action, self.tree.node(child).depth);
        Ok(child)
    }

    /// Simulation phase: play the game out from the simulation point
    fn simulation(&mut self, point: NodeId) -> Result<Option<Player>> {
        let node: &MCTSNode = self.tree.node(point);
        if node.terminal {
            // The move into this node already won
            return Ok(Some(node.player.other()));
        }

        self.simulation_policy
            .simulate(&node.board, node.player, &mut *self.rng)
    }

    /// Backpropagation phase: update every node from the simulation point up to the root
    fn backpropagation(&mut self, point: NodeId, winner: Option<Player>) {
        let root = self.tree.root();
        let mut current = Some(point);

        while let Some(id) = current {
            let node = self.tree.node_mut(id);
            self.backpropagation_policy.update_stats(node, winner);
            current = if id == root { None } else { node.parent() };
        }
    }

    fn note_depth(&mut self, id: NodeId) {
        let depth = self.tree.node(id).depth;
        self.statistics.max_depth = self.statistics.max_depth.max(depth);
    }
}

impl fmt::Debug for MCTS {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MCTS")
            .field("config", &self.config)
            .field("tree_size", &self.tree.len())
            .field("root_player", &self.tree.root_node().player)
            .field("root_simulations", &self.tree.root_node().simulations())
            .finish()
    }
}
