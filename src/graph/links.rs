//! Connection protocol and link queries.
//!
//! Links are stored on whichever connector initiated them. An output that
//! was armed first records its inputs (fan-out, existing links kept); an
//! input that was armed first records its single upstream output and drops
//! every previous upstream, wherever that link was recorded.

use super::Graph;
use super::ids::{ConnectorId, Direction, NodeId};
use crate::error::{FlowError, FlowResult};
use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    Linked,
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    SameDirection,
    SameNode,
    /// One of the two node types refused the pairing
    Refused,
}

impl Graph {
    /// Link `pending` (the armed connector) to `target`.
    ///
    /// Fails only when either connector does not exist; incompatible pairs
    /// come back as [`ConnectOutcome::Rejected`] with the graph untouched.
    pub fn connect(&mut self, pending: ConnectorId, target: ConnectorId) -> FlowResult<ConnectOutcome> {
        let outcome = self.check_link(pending, target)?;
        if outcome != ConnectOutcome::Linked {
            tracing::debug!(%pending, %target, ?outcome, "Connection rejected");
            return Ok(outcome);
        }

        match pending.direction {
            Direction::Output => {
                if let Some(connector) = self.connector_mut(pending) {
                    connector.push_link(target);
                }
            }
            Direction::Input => {
                self.sever_upstream(pending);
                if let Some(connector) = self.connector_mut(pending) {
                    connector.replace_links(vec![target]);
                }
            }
        }

        tracing::debug!(%pending, %target, "Connectors linked");
        Ok(ConnectOutcome::Linked)
    }

    /// Would [`Graph::connect`] accept this pair? Both sides must approve.
    pub fn check_link(&self, pending: ConnectorId, target: ConnectorId) -> FlowResult<ConnectOutcome> {
        let pending_node = self
            .node(pending.node)
            .ok_or(FlowError::ConnectorNotFound(pending))?;
        let target_node = self
            .node(target.node)
            .ok_or(FlowError::ConnectorNotFound(target))?;
        let pending_conn = pending_node
            .connector(pending)
            .ok_or(FlowError::ConnectorNotFound(pending))?;
        let target_conn = target_node
            .connector(target)
            .ok_or(FlowError::ConnectorNotFound(target))?;

        if pending.direction == target.direction {
            return Ok(ConnectOutcome::Rejected(RejectReason::SameDirection));
        }
        if pending.node == target.node {
            return Ok(ConnectOutcome::Rejected(RejectReason::SameNode));
        }
        if !pending_node.behavior().can_connect(pending_conn, target_conn)
            || !target_node.behavior().can_connect(target_conn, pending_conn)
        {
            return Ok(ConnectOutcome::Rejected(RejectReason::Refused));
        }
        Ok(ConnectOutcome::Linked)
    }

    /// Remove `input` from the link list of every connector that records it.
    fn sever_upstream(&mut self, input: ConnectorId) {
        for node in &mut self.nodes {
            for connector in node.connectors_mut(Direction::Output) {
                if connector.remove_link(input) {
                    tracing::trace!(from = %connector.id, to = %input, "Severed link");
                }
            }
        }
    }

    /// Remove a single link regardless of which side recorded it.
    pub fn disconnect(&mut self, a: ConnectorId, b: ConnectorId) -> bool {
        let mut removed = false;
        if let Some(connector) = self.connector_mut(a) {
            removed |= connector.remove_link(b);
        }
        if let Some(connector) = self.connector_mut(b) {
            removed |= connector.remove_link(a);
        }
        removed
    }

    /// Every link as an `(output, input)` pair, each reported once.
    pub fn links(&self) -> Vec<(ConnectorId, ConnectorId)> {
        let mut links = Vec::new();
        for node in &self.nodes {
            for connector in node.all_connectors() {
                for &other in connector.linked_to() {
                    let pair = match connector.direction() {
                        Direction::Output => (connector.id, other),
                        Direction::Input => (other, connector.id),
                    };
                    if !links.contains(&pair) {
                        links.push(pair);
                    }
                }
            }
        }
        links
    }

    /// Outputs feeding `input`, whichever side recorded the link.
    pub fn upstreams(&self, input: ConnectorId) -> Vec<ConnectorId> {
        self.links()
            .into_iter()
            .filter(|(_, to)| *to == input)
            .map(|(from, _)| from)
            .collect()
    }

    /// Inputs fed by `output`, whichever side recorded the link.
    pub fn downstreams(&self, output: ConnectorId) -> Vec<ConnectorId> {
        self.links()
            .into_iter()
            .filter(|(from, _)| *from == output)
            .map(|(_, to)| to)
            .collect()
    }

    /// Bounding boxes (model space) of the link lines touching `node`.
    pub fn link_regions(&self, node: NodeId) -> Vec<Rect> {
        self.links()
            .into_iter()
            .filter(|(from, to)| from.node == node || to.node == node)
            .filter_map(|(from, to)| {
                let a = self.connector_anchor(from)?;
                let b = self.connector_anchor(to)?;
                Some(Rect::from_corners(a, b))
            })
            .collect()
    }
}
