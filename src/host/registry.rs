//! Element handles interned behind stable [`NodeId`]s.
//!
//! Each interned element is stamped with its id (see [`NODE_ATTRIBUTE`]),
//! so finding an element again is one attribute read instead of a scan.
//! Removed elements are released, which drops the registry's reference.

use std::collections::HashMap;

use super::NodeId;

/// Attribute carrying an element's registry id.
pub(crate) const NODE_ATTRIBUTE: &str = "data-folio-node";

/// An element handle that can carry a registry id.
pub(crate) trait Tagged: Clone {
    /// The stamped id, if any.
    fn tag(&self) -> Option<String>;
    /// Stamp `tag` onto the element.
    fn set_tag(&self, tag: &str);
    /// Whether both handles refer to the same element.
    fn same(&self, other: &Self) -> bool;
}

/// Live elements by id. Ids are never reused.
#[derive(Debug)]
pub(crate) struct Registry<E> {
    nodes: HashMap<u32, E>,
    next: u32,
}

impl<E> Default for Registry<E> {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            next: 0,
        }
    }
}

impl<E: Tagged> Registry<E> {
    /// Id of `element`, registering it on first sight.
    ///
    /// A stamp that points at a different element (copied markup, a
    /// cloned node) is overwritten with a fresh id.
    pub(crate) fn intern(&mut self, element: E) -> NodeId {
        let known = element
            .tag()
            .and_then(|tag| tag.parse::<u32>().ok())
            .filter(|id| {
                self.nodes.get(id).is_some_and(|live| live.same(&element))
            });
        if let Some(id) = known {
            return NodeId(id);
        }
        let id = self.next;
        self.next += 1;
        element.set_tag(&id.to_string());
        let _ = self.nodes.insert(id, element);
        NodeId(id)
    }

    pub(crate) fn get(&self, node: NodeId) -> Option<E> {
        self.nodes.get(&node.0).cloned()
    }

    /// Forget `node`, handing back its element.
    pub(crate) fn release(&mut self, node: NodeId) -> Option<E> {
        self.nodes.remove(&node.0)
    }

    pub(crate) fn live_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Stand-in element: identity is the allocation, the tag is its only
    /// attribute.
    #[derive(Debug, Clone, Default)]
    struct Element(Rc<RefCell<Option<String>>>);

    impl Tagged for Element {
        fn tag(&self) -> Option<String> {
            self.0.borrow().clone()
        }

        fn set_tag(&self, tag: &str) {
            *self.0.borrow_mut() = Some(tag.to_owned());
        }

        fn same(&self, other: &Self) -> bool {
            Rc::ptr_eq(&self.0, &other.0)
        }
    }

    #[test]
    fn same_element_same_id() {
        let mut registry = Registry::default();
        let a = Element::default();
        let b = Element::default();
        let first = registry.intern(a.clone());
        assert_eq!(registry.intern(a.clone()), first);
        assert_ne!(registry.intern(b), first);
        assert_eq!(a.tag(), Some(first.0.to_string()));
        assert_eq!(registry.live_count(), 2);
    }

    #[test]
    fn released_elements_are_dropped() {
        let mut registry = Registry::default();
        let root = registry.intern(Element::default());
        for _ in 0..100 {
            let toast = Element::default();
            let node = registry.intern(toast.clone());
            assert!(registry.release(node).is_some());
            assert!(registry.get(node).is_none());
            // Only the test's handle keeps the element alive.
            assert_eq!(Rc::strong_count(&toast.0), 1);
        }
        assert_eq!(registry.live_count(), 1);
        assert!(registry.get(root).is_some());
    }

    #[test]
    fn ids_are_not_reused_after_release() {
        let mut registry = Registry::default();
        let gone = registry.intern(Element::default());
        let _ = registry.release(gone);
        assert_ne!(registry.intern(Element::default()), gone);
    }

    #[test]
    fn copied_stamp_gets_a_fresh_id() {
        let mut registry = Registry::default();
        let original = Element::default();
        let id = registry.intern(original.clone());
        let copy = Element::default();
        copy.set_tag(&id.0.to_string());
        let copy_id = registry.intern(copy.clone());
        assert_ne!(copy_id, id);
        assert_eq!(copy.tag(), Some(copy_id.0.to_string()));
        assert_eq!(registry.intern(original), id);
    }

    #[test]
    fn garbage_stamp_is_replaced() {
        let mut registry = Registry::default();
        let element = Element::default();
        element.set_tag("not-a-number");
        let id = registry.intern(element.clone());
        assert_eq!(element.tag(), Some(id.0.to_string()));
    }
}
