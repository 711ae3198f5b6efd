//! Arena handles for nodes and connectors.
//!
//! Connectors point back at their node, and links point at connectors on
//! other nodes. Both are plain ids resolved through the [`super::Graph`].

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    pub fn is_input(self) -> bool {
        matches!(self, Self::Input)
    }

    pub fn is_output(self) -> bool {
        matches!(self, Self::Output)
    }
}

/// A connector addressed by its owning node, side and ordinal on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectorId {
    pub node: NodeId,
    pub direction: Direction,
    pub index: usize,
}

impl ConnectorId {
    pub fn input(node: NodeId, index: usize) -> Self {
        Self {
            node,
            direction: Direction::Input,
            index,
        }
    }

    pub fn output(node: NodeId, index: usize) -> Self {
        Self {
            node,
            direction: Direction::Output,
            index,
        }
    }
}

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.direction {
            Direction::Input => "in",
            Direction::Output => "out",
        };
        write!(f, "{}.{}[{}]", self.node, side, self.index)
    }
}
