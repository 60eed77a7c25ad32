use anyhow::bail;
use std::{fmt, str::FromStr};

/// Search strategies. They differ only in how new nodes enter the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    #[default]
    DepthFirst,
    BreadthFirst,
    BestFirst,
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::DepthFirst,
        Strategy::BreadthFirst,
        Strategy::BestFirst,
        Strategy::AStar,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::DepthFirst => "depth",
            Strategy::BreadthFirst => "breadth",
            Strategy::BestFirst => "best",
            Strategy::AStar => "astar",
        }
    }

    /// Frontier priority of a node at `depth` with heuristic value `heuristic`.
    pub fn priority(&self, depth: u32, heuristic: i32) -> i32 {
        match self {
            Strategy::DepthFirst | Strategy::BreadthFirst => 0,
            Strategy::BestFirst => heuristic,
            Strategy::AStar => depth as i32 + heuristic,
        }
    }
}

impl FromStr for Strategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Strategy::ALL.iter().find(|strategy| strategy.name() == s) {
            Some(strategy) => Ok(*strategy),
            None => bail!("Unknown method '{s}', expected breadth|depth|best|astar"),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strategy() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>().unwrap(), strategy);
        }
        assert!("dfs".parse::<Strategy>().is_err());
        assert!("".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_priority() {
        assert_eq!(Strategy::DepthFirst.priority(7, 40), 0);
        assert_eq!(Strategy::BreadthFirst.priority(7, 40), 0);
        assert_eq!(Strategy::BestFirst.priority(7, 40), 40);
        assert_eq!(Strategy::AStar.priority(7, -40), -33);
    }
}
