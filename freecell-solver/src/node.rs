use super::*;

use std::collections::TryReserveError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct SearchNode {
    pub board: Board,
    pub depth: u32,
    pub heuristic: i32,
    pub priority: i32,
    pub parent: Option<NodeId>,
    /// The move that produced this node; `None` for the root.
    pub action: Option<Action>,
    pub children: Vec<NodeId>,
    layout_hash: u64,
}

impl SearchNode {
    fn new(
        board: Board,
        depth: u32,
        parent: Option<NodeId>,
        action: Option<Action>,
        strategy: Strategy,
    ) -> Self {
        let heuristic = heuristic(&board);
        Self {
            layout_hash: layout_hash(&board),
            priority: strategy.priority(depth, heuristic),
            heuristic,
            depth,
            parent,
            action,
            children: Vec::new(),
            board,
        }
    }

    fn same_layout(&self, board: &Board, hash: u64) -> bool {
        self.layout_hash == hash && self.board.same_layout(board)
    }
}

/// Arena of search nodes. Nodes refer to their parent and children by index,
/// so the tree owns every node and no node owns another.
#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
    strategy: Strategy,
}

impl SearchTree {
    pub fn new(board: Board, strategy: Strategy) -> Result<Self, TryReserveError> {
        let mut nodes = Vec::new();
        nodes.try_reserve(1)?;
        nodes.push(SearchNode::new(board, 0, None, None, strategy));
        Ok(Self { nodes, strategy })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.index()]
    }

    #[cfg(test)]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    /// `id` followed by each of its ancestors up to the root.
    pub fn path(&self, id: NodeId) -> impl Iterator<Item = &SearchNode> + '_ {
        std::iter::successors(Some(self.get(id)), move |node| {
            node.parent.map(|parent| self.get(parent))
        })
    }

    /// Whether a child of `parent` holding `board` would repeat the tableau
    /// columns and freecells of `parent` or one of its ancestors.
    pub fn repeats_ancestor(&self, parent: NodeId, board: &Board) -> bool {
        let hash = layout_hash(board);
        self.path(parent).any(|node| node.same_layout(board, hash))
    }

    /// Links a new child under `parent`.
    pub fn push_child(
        &mut self,
        parent: NodeId,
        board: Board,
        action: Action,
    ) -> Result<NodeId, TryReserveError> {
        self.nodes.try_reserve(1)?;
        self.nodes[parent.index()].children.try_reserve(1)?;

        let id = NodeId(self.nodes.len() as u32);
        let depth = self.get(parent).depth + 1;
        self.nodes.push(SearchNode::new(
            board,
            depth,
            Some(parent),
            Some(action),
            self.strategy,
        ));
        self.nodes[parent.index()].children.push(id);
        Ok(id)
    }

    /// The moves leading from the root to `id`, first move first.
    pub fn extract_solution(&self, id: NodeId) -> Vec<Action> {
        let mut actions: Vec<Action> = self.path(id).filter_map(|node| node.action).collect();
        actions.reverse();
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEAL_STR: &str = "2\nH1 H0\nS1 S0\nD1 D0\nC1 C0";

    fn tree_with_root() -> SearchTree {
        SearchTree::new(Board::parse(DEAL_STR).unwrap(), Strategy::AStar).unwrap()
    }

    fn grow(tree: &mut SearchTree, parent: NodeId, mov: Move) -> NodeId {
        let (board, action) = mov.apply(&tree.get(parent).board);
        tree.push_child(parent, board, action).unwrap()
    }

    #[test]
    fn test_root_scores() {
        let tree = tree_with_root();
        let root = tree.get(NodeId::ROOT);
        assert_eq!(root.depth, 0);
        assert_eq!(root.heuristic, -24);
        assert_eq!(root.priority, -24);
        assert_eq!(root.parent, None);
        assert_eq!(root.action, None);
    }

    #[test]
    fn test_push_child() {
        let mut tree = tree_with_root();
        let child = grow(
            &mut tree,
            NodeId::ROOT,
            Move::new(MoveKind::Foundation, 0, FOUNDATION_START),
        );
        let node = tree.get(child);
        assert_eq!(node.depth, 1);
        assert_eq!(node.heuristic, 10 - 20 - 4);
        assert_eq!(node.priority, 1 + node.heuristic);
        assert_eq!(node.parent, Some(NodeId::ROOT));
        assert_eq!(tree.children(NodeId::ROOT), &[child]);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_repeats_ancestor() {
        let mut tree = tree_with_root();
        let a = grow(
            &mut tree,
            NodeId::ROOT,
            Move::new(MoveKind::Foundation, 0, FOUNDATION_START),
        );
        let b = grow(&mut tree, a, Move::new(MoveKind::Freecell, 0, FREECELL_START));
        let b_board = tree.get(b).board.clone();

        // Putting H1 back on its column recreates the layout of `a`.
        let (back, _) = Move::new(MoveKind::NewStack, FREECELL_START, 0).apply(&b_board);
        assert!(tree.repeats_ancestor(b, &back));

        let (elsewhere, _) = Move::new(MoveKind::NewStack, FREECELL_START, 4).apply(&b_board);
        assert!(!tree.repeats_ancestor(b, &elsewhere));

        // Foundations take no part in the comparison.
        let mut banked = tree.get(NodeId::ROOT).board.clone();
        banked.push(FOUNDATION_START + 3, Card::parse("C0").unwrap());
        assert!(tree.repeats_ancestor(b, &banked));
        assert!(!tree.repeats_ancestor(NodeId::ROOT, &b_board));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_extract_solution() {
        let mut tree = tree_with_root();
        let a = grow(
            &mut tree,
            NodeId::ROOT,
            Move::new(MoveKind::Foundation, 0, FOUNDATION_START),
        );
        let b = grow(&mut tree, a, Move::new(MoveKind::Stack, 1, 0));
        let c = grow(&mut tree, b, Move::new(MoveKind::Freecell, 2, FREECELL_START));

        let card = |s: &str| Card::parse(s).unwrap();
        let expected = vec![
            Action::Foundation(card("H0")),
            Action::Stack(card("S0"), card("H1")),
            Action::Freecell(card("D0")),
        ];
        assert_eq!(tree.extract_solution(c), expected);
        assert_eq!(tree.extract_solution(c), expected);
        assert_eq!(tree.extract_solution(c).len(), tree.get(c).depth as usize);
        assert!(tree.extract_solution(NodeId::ROOT).is_empty());
    }
}
