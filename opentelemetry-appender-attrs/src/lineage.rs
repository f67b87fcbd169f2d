use crate::Attr;
use opentelemetry::Key;
use std::sync::Arc;

/// One step in a [`Lineage`].
#[derive(Debug)]
pub(crate) enum Frame {
    /// Attributes added to the innermost open group.
    Attrs(Vec<Attr>),
    /// A new group nested in the innermost open group.
    Group(Key),
}

#[derive(Debug)]
struct Node {
    frame: Frame,
    parent: Option<Arc<Node>>,
}

/// The attribute and group state accumulated by `with_attrs` and
/// `with_group` calls.
///
/// A lineage is an immutable singly linked list from tip to root. Extending
/// it allocates one node pointing at the unchanged parent, so every lineage
/// derived from the same parent shares that parent's nodes and none of them
/// can observe the others' additions.
#[derive(Debug, Clone, Default)]
pub(crate) struct Lineage {
    tip: Option<Arc<Node>>,
}

impl Lineage {
    pub(crate) fn push(&self, frame: Frame) -> Lineage {
        Lineage {
            tip: Some(Arc::new(Node {
                frame,
                parent: self.tip.clone(),
            })),
        }
    }

    /// Frames from the root to the tip.
    pub(crate) fn frames(&self) -> Vec<&Frame> {
        let mut frames = Vec::new();
        let mut node = self.tip.as_deref();
        while let Some(current) = node {
            frames.push(&current.frame);
            node = current.parent.as_deref();
        }
        frames.reverse();
        frames
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tip.is_none()
    }

    #[cfg(test)]
    fn shares_prefix_with(&self, other: &Lineage) -> bool {
        let mut node = other.tip.as_ref();
        while let Some(current) = node {
            if let Some(tip) = &self.tip {
                if Arc::ptr_eq(tip, current) {
                    return true;
                }
            }
            node = current.parent.as_ref();
        }
        false
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        // Unlink iteratively so deep chains cannot overflow the stack.
        let mut parent = self.parent.take();
        while let Some(node) = parent {
            match Arc::try_unwrap(node) {
                Ok(mut node) => parent = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}
