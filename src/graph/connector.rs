//! Connectors - typed, directional attachment points owned by a node.

use super::ids::{ConnectorId, Direction};

#[derive(Debug, Clone)]
pub struct Connector {
    pub id: ConnectorId,
    /// Label drawn next to the glyph by the render collaborator
    pub label: String,
    /// Compatibility tag; only connectors with equal tags may link
    pub kind: String,
    /// How far the label paints outside the node body
    pub invalidation_width: f32,
    linked_to: Vec<ConnectorId>,
}

impl Connector {
    pub(crate) fn new(id: ConnectorId, spec: ConnectorSpec) -> Self {
        Self {
            id,
            label: spec.label,
            kind: spec.kind,
            invalidation_width: spec.invalidation_width,
            linked_to: Vec::new(),
        }
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.id.direction
    }

    #[inline]
    pub fn is_input(&self) -> bool {
        self.id.direction.is_input()
    }

    #[inline]
    pub fn is_output(&self) -> bool {
        self.id.direction.is_output()
    }

    /// Links recorded on this side, in the order they were made.
    pub fn linked_to(&self) -> &[ConnectorId] {
        &self.linked_to
    }

    pub fn is_linked_to(&self, other: ConnectorId) -> bool {
        self.linked_to.contains(&other)
    }

    /// Tag match, opposite direction, different owning node.
    pub fn is_compatible_with(&self, other: &Connector) -> bool {
        self.kind == other.kind
            && self.direction() != other.direction()
            && self.id.node != other.id.node
    }

    /// Append without duplicating. Returns false if already present.
    pub(crate) fn push_link(&mut self, other: ConnectorId) -> bool {
        if self.linked_to.contains(&other) {
            return false;
        }
        self.linked_to.push(other);
        true
    }

    pub(crate) fn remove_link(&mut self, other: ConnectorId) -> bool {
        let before = self.linked_to.len();
        self.linked_to.retain(|c| *c != other);
        before != self.linked_to.len()
    }

    pub(crate) fn replace_links(&mut self, links: Vec<ConnectorId>) {
        self.linked_to = links;
    }

    pub(crate) fn retain_links(&mut self, mut keep: impl FnMut(&ConnectorId) -> bool) {
        self.linked_to.retain(|c| keep(c));
    }
}

/// Declaration of a connector, used when building a node.
#[derive(Debug, Clone, Default)]
pub struct ConnectorSpec {
    pub label: String,
    pub kind: String,
    pub invalidation_width: f32,
}

impl ConnectorSpec {
    pub fn new(label: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: kind.into(),
            invalidation_width: 0.0,
        }
    }

    pub fn with_invalidation_width(mut self, width: f32) -> Self {
        self.invalidation_width = width;
        self
    }
}
