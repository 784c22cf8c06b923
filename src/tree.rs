//! Tree data structures for Monte Carlo Tree Search
//!
//! Nodes live in an arena owned by [`SearchTree`] and refer to each other
//! through [`NodeId`] handles. Every node knows its parent so statistics can
//! be pushed upward after a simulation; the parent handle is never used to
//! modify anything but those statistics.

use std::collections::VecDeque;

use rand::{Rng, RngCore};

use crate::{
    board::{Board, Move, Player},
    utils, Result, SearchError,
};

/// Handle of a node inside a [`SearchTree`]
pub type NodeId = usize;

/// A node in the MCTS tree
///
/// The child table is keyed by every legal move of the node's board. The key
/// set is fixed when the node is created; expansion only fills in slots.
#[derive(Debug, Clone)]
pub struct MCTSNode {
    /// The board at this node
    pub board: Board,

    /// Player to move from this node
    pub player: Player,

    /// The move that led to this node (None for root)
    pub action: Option<Move>,

    /// True if the move that led to this node won the game
    pub terminal: bool,

    /// Depth of this node below the root (root = 0)
    pub depth: usize,

    wins: u64,
    simulations: u64,
    parent: Option<NodeId>,
    children: Vec<(Move, Option<NodeId>)>,
}

impl MCTSNode {
    fn new(
        board: Board,
        player: Player,
        action: Option<Move>,
        terminal: bool,
        parent: Option<NodeId>,
        depth: usize,
    ) -> Self {
        let children = board.legal_moves().into_iter().map(|m| (m, None)).collect();

        MCTSNode {
            board,
            player,
            action,
            terminal,
            depth,
            wins: 0,
            simulations: 0,
            parent,
            children,
        }
    }

    /// Returns the number of simulations that passed through this node
    pub fn simulations(&self) -> u64 {
        self.simulations
    }

    /// Returns the number of wins credited to the move leading into this node
    pub fn wins(&self) -> u64 {
        self.wins
    }

    /// Returns the parent handle (None for root)
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Records one simulation through this node, counting a win if `won`
    ///
    /// Wins and simulations only ever move together, so `wins <= simulations`
    /// holds at all times.
    pub fn record_simulation(&mut self, won: bool) {
        self.simulations += 1;
        if won {
            self.wins += 1;
        }
    }

    /// Returns the child slots in ascending column order
    pub fn children(&self) -> &[(Move, Option<NodeId>)] {
        &self.children
    }

    /// Returns the handle of the expanded child for `action`
    pub fn child(&self, action: Move) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(m, _)| *m == action)
            .and_then(|(_, child)| *child)
    }

    /// Returns the expanded children in ascending column order
    pub fn expanded_children(&self) -> impl Iterator<Item = (Move, NodeId)> + '_ {
        self.children
            .iter()
            .filter_map(|(m, child)| child.map(|id| (*m, id)))
    }

    /// Returns the legal moves whose child has not been created yet
    pub fn unexpanded_moves(&self) -> Vec<Move> {
        self.children
            .iter()
            .filter(|(_, child)| child.is_none())
            .map(|(m, _)| *m)
            .collect()
    }

    /// Returns true if every legal move has a child
    ///
    /// A node without legal moves is trivially fully expanded.
    pub fn is_fully_expanded(&self) -> bool {
        self.children.iter().all(|(_, child)| child.is_some())
    }

    /// Returns true if the node has no legal moves
    pub fn has_no_moves(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena-backed MCTS tree with a designated root
#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<MCTSNode>,
    root: NodeId,
}

impl SearchTree {
    /// Creates a tree holding a single root node
    pub fn new(board: Board, player: Player) -> Self {
        SearchTree {
            nodes: vec![MCTSNode::new(board, player, None, false, None, 0)],
            root: 0,
        }
    }

    /// Returns the handle of the root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the root node
    pub fn root_node(&self) -> &MCTSNode {
        &self.nodes[self.root]
    }

    /// Returns the node for a handle
    ///
    /// # Panics
    ///
    /// Panics if the handle does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &MCTSNode {
        &self.nodes[id]
    }

    /// Returns the node for a handle, mutably
    pub fn node_mut(&mut self, id: NodeId) -> &mut MCTSNode {
        &mut self.nodes[id]
    }

    /// Returns the number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds no nodes (never the case in practice)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all nodes
    pub fn iter(&self) -> impl Iterator<Item = &MCTSNode> {
        self.nodes.iter()
    }

    /// Expands the child of `id` reached by `action`
    ///
    /// The child receives the board after the node's player drops a piece in
    /// `action`, the opponent as player to move, and is marked terminal if
    /// the move won. Expanding an already expanded move returns the existing
    /// child.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidMove`] if `action` is not a legal move of
    /// the node's board.
    pub fn expand(&mut self, id: NodeId, action: Move) -> Result<NodeId> {
        let node = &self.nodes[id];
        let slot = node
            .children
            .iter()
            .position(|(m, _)| *m == action)
            .ok_or(SearchError::InvalidMove {
                column: action.column,
            })?;

        if let Some(existing) = node.children[slot].1 {
            return Ok(existing);
        }

        let board = node.board.apply_move(action, node.player)?;
        let terminal = board.is_win(node.player, action);
        let child = MCTSNode::new(
            board,
            node.player.other(),
            Some(action),
            terminal,
            Some(id),
            node.depth + 1,
        );

        let child_id = self.nodes.len();
        self.nodes.push(child);
        self.nodes[id].children[slot].1 = Some(child_id);
        Ok(child_id)
    }

    /// Calculates the UCB1 value of a node as seen from its parent
    ///
    /// A node without simulations gets a random integer placeholder in
    /// `[-5, 5]`, so unvisited children are neither always preferred nor
    /// always starved. The root has no parent and reports its win rate.
    pub fn ucb1(&self, id: NodeId, exploration_constant: f64, rng: &mut dyn RngCore) -> f64 {
        let node = &self.nodes[id];
        if node.simulations == 0 {
            return f64::from(rng.gen_range(-5i32..=5));
        }

        match node.parent {
            Some(parent) => utils::ucb1_value(
                node.wins,
                node.simulations,
                self.nodes[parent].simulations,
                exploration_constant,
            ),
            None => utils::win_rate(node.wins, node.simulations),
        }
    }

    /// Returns the handles from `id` up to the root, inclusive
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = id;
        while current != self.root {
            match self.nodes[current].parent {
                Some(parent) => {
                    path.push(parent);
                    current = parent;
                }
                None => break,
            }
        }
        path
    }

    /// Relocates the root to its expanded child for `action`
    ///
    /// Only the subtree of that child is kept; all other nodes are dropped
    /// and the arena is compacted. Statistics of the kept nodes are preserved.
    /// Returns false, leaving the tree untouched, if the child was never
    /// expanded.
    pub fn advance(&mut self, action: Move) -> bool {
        let Some(new_root) = self.nodes[self.root].child(action) else {
            return false;
        };

        let mut old_nodes: Vec<Option<MCTSNode>> =
            std::mem::take(&mut self.nodes).into_iter().map(Some).collect();
        let mut remap = vec![None; old_nodes.len()];
        let mut queue = VecDeque::from([new_root]);
        let mut order = Vec::new();

        // Breadth-first, so every parent is assigned a slot before its children
        while let Some(old) = queue.pop_front() {
            remap[old] = Some(order.len());
            order.push(old);
            if let Some(node) = &old_nodes[old] {
                queue.extend(node.children.iter().filter_map(|(_, child)| *child));
            }
        }

        let mut nodes: Vec<MCTSNode> = Vec::with_capacity(order.len());
        for old in order {
            let Some(mut node) = old_nodes[old].take() else {
                continue;
            };
            node.parent = if old == new_root {
                None
            } else {
                node.parent.and_then(|p| remap[p])
            };
            node.depth = node.parent.map_or(0, |p| nodes[p].depth + 1);
            for (_, child) in node.children.iter_mut() {
                *child = child.and_then(|c| remap[c]);
            }
            nodes.push(node);
        }

        self.nodes = nodes;
        self.root = 0;
        true
    }
}
