cfg_if::cfg_if! {
    if #[cfg(feature = "no-std")] {
        use alloc::boxed::Box;
    } else {
        use std::boxed::Box;
    }
}

/// a heap allocated node of a [`ForwardList`](super::ForwardList). the list
/// is the single owner of every node; a node is reachable from exactly one
/// predecessor, either another node or the list's sentinel.
///
/// the link and the payload are separate fields so that a traversal can read
/// `next` through a raw pointer without forming a reference that overlaps an
/// element the caller is still mutably borrowing. `next` is only written
/// through the owning list; it is stored as `*const` to keep nodes, and the
/// read-only iterators over them, covariant in `T`.
pub(crate) struct ForwardListNode<T> {
    next: *const ForwardListNode<T>,
    kind: NodeKind<T>,
}

/// the private payload of a node, either the sentinel or user-provided data
enum NodeKind<T> {
    Sentinel,
    Data(T),
}

impl<T> ForwardListNode<T> {
    /// allocate the sentinel node for a new, empty list
    pub(crate) fn alloc_sentinel() -> *mut Self {
        Box::into_raw(Box::new(Self {
            next: core::ptr::null(),
            kind: NodeKind::Sentinel,
        }))
    }

    /// allocate a data node that links to `next`
    pub(crate) fn alloc(data: T, next: *mut Self) -> *mut Self {
        Box::into_raw(Box::new(Self {
            next,
            kind: NodeKind::Data(data),
        }))
    }

    /// free a node previously returned by [`alloc`](Self::alloc) or
    /// [`alloc_sentinel`](Self::alloc_sentinel), handing back its data if it
    /// held any
    ///
    /// # Safety
    /// `node` must have come from one of the allocation functions above, must
    /// not have been freed already and must no longer be linked from anywhere
    pub(crate) unsafe fn free(node: *mut Self) -> Option<T> {
        let node = Box::from_raw(node);
        match node.kind {
            NodeKind::Sentinel => None,
            NodeKind::Data(data) => Some(data),
        }
    }

    /// # Safety
    /// `node` must point to a live node
    pub(crate) unsafe fn next(node: *const Self) -> *mut Self {
        (*node).next as *mut Self
    }

    /// # Safety
    /// `node` must point to a live node
    pub(crate) unsafe fn set_next(node: *mut Self, next: *mut Self) {
        (*node).next = next;
    }

    /// # Safety
    /// `node` must point to a live node
    pub(crate) unsafe fn is_sentinel(node: *const Self) -> bool {
        matches!((*node).kind, NodeKind::Sentinel)
    }

    /// borrow the data of a node, or None for the sentinel
    ///
    /// # Safety
    /// `node` must point to a live node that outlives `'a`, and nothing may
    /// mutate its data during `'a`
    pub(crate) unsafe fn data<'a>(node: *const Self) -> Option<&'a T> {
        match &(*node).kind {
            NodeKind::Sentinel => None,
            NodeKind::Data(data) => Some(data),
        }
    }

    /// mutably borrow the data of a node, or None for the sentinel
    ///
    /// # Safety
    /// `node` must point to a live node that outlives `'a`, and no other
    /// reference to its data may exist during `'a`
    pub(crate) unsafe fn data_mut<'a>(node: *mut Self) -> Option<&'a mut T> {
        match &mut (*node).kind {
            NodeKind::Sentinel => None,
            NodeKind::Data(data) => Some(data),
        }
    }

    /// link a freshly allocated node holding `data` directly after `node` and
    /// return it
    ///
    /// # Safety
    /// `node` must point to a live node
    // Before: (node) -> (node.next)
    // After: (node) -> (new) -> (node.next)
    pub(crate) unsafe fn link_after(node: *mut Self, data: T) -> *mut Self {
        let new_node = Self::alloc(data, Self::next(node));
        Self::set_next(node, new_node);
        new_node
    }

    /// unlink the successor of `node`, returning it, or null if `node` is the
    /// last node. the caller takes ownership of the returned node.
    ///
    /// # Safety
    /// `node` must point to a live node
    // Before: (node) -> (old) -> (old.next)
    // After: (node) -> (old.next)
    pub(crate) unsafe fn unlink_next(node: *mut Self) -> *mut Self {
        let old = Self::next(node);
        if !old.is_null() {
            Self::set_next(node, Self::next(old));
            Self::set_next(old, core::ptr::null_mut());
        }
        old
    }
}
