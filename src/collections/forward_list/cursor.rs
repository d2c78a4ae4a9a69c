use core::fmt;

use super::node::ForwardListNode;
use super::{ForwardList, ForwardListError, ForwardListResult};

/// a position in a forward list: a node pointer, or null for the end
/// position. this is the traversal shared by [`Cursor`], [`CursorMut`] and
/// the borrowing iterators; it carries no lifetime and owns nothing, so every
/// dereference is the wrapper's responsibility.
pub(crate) struct RawCursor<T> {
    node: *const ForwardListNode<T>,
}

impl<T> RawCursor<T> {
    pub(crate) fn new(node: *mut ForwardListNode<T>) -> Self {
        Self { node }
    }

    pub(crate) fn end() -> Self {
        Self::new(core::ptr::null_mut())
    }

    pub(crate) fn node(&self) -> *mut ForwardListNode<T> {
        self.node as *mut ForwardListNode<T>
    }

    pub(crate) fn is_end(&self) -> bool {
        self.node.is_null()
    }

    /// # Safety
    /// the cursor must be at the end or at a live node
    pub(crate) unsafe fn is_before_begin(&self) -> bool {
        !self.is_end() && ForwardListNode::is_sentinel(self.node)
    }

    /// follow the successor link. advancing past the end is a caller bug; it
    /// trips a debug assertion and otherwise leaves the cursor at the end.
    ///
    /// # Safety
    /// the cursor must be at the end or at a live node
    pub(crate) unsafe fn advance(&mut self) {
        debug_assert!(
            !self.is_end(),
            "advanced a cursor past the end of a ForwardList"
        );
        if !self.is_end() {
            self.node = ForwardListNode::next(self.node);
        }
    }

    /// # Safety
    /// the cursor must be at the end or at a live node, which must outlive
    /// `'a` without being mutated
    pub(crate) unsafe fn get<'a>(&self) -> Option<&'a T> {
        if self.is_end() {
            None
        } else {
            ForwardListNode::data(self.node)
        }
    }

    /// # Safety
    /// the cursor must be at the end or at a live node, which must outlive
    /// `'a` with no other reference to its data
    pub(crate) unsafe fn get_mut<'a>(&self) -> Option<&'a mut T> {
        if self.is_end() {
            None
        } else {
            ForwardListNode::data_mut(self.node())
        }
    }

    /// # Safety
    /// the cursor must be at the end or at a live node
    pub(crate) unsafe fn successor(&self) -> Self {
        if self.is_end() {
            Self::end()
        } else {
            Self::new(ForwardListNode::next(self.node))
        }
    }
}

impl<T> Clone for RawCursor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RawCursor<T> {}

impl<T> PartialEq for RawCursor<T> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.node, other.node)
    }
}

impl<T> Eq for RawCursor<T> {}

/// a read-only position in a [`ForwardList`]
///
/// a cursor is at one of three kinds of position: before-begin (the list's
/// sentinel, see [`ForwardList::before_begin`]), an element, or the end.
/// only an element position yields data from [`current`](Self::current).
///
/// cursors compare equal when they refer to the same node, never by value.
/// a [`CursorMut`] converts into a `Cursor`, but not the other way around.
pub struct Cursor<'a, T> {
    raw: RawCursor<T>,
    _list: &'a ForwardList<T>,
}

impl<'a, T> Cursor<'a, T> {
    pub(super) fn new(list: &'a ForwardList<T>, raw: RawCursor<T>) -> Self {
        Self { raw, _list: list }
    }

    /// get the element at the cursor, or None at before-begin or the end
    pub fn current(&self) -> Option<&'a T> {
        // SAFETY: the list is borrowed for 'a so its nodes stay alive and
        // unmodified for 'a
        unsafe { self.raw.get() }
    }

    /// get the element after the cursor, or None if there is none
    pub fn peek_next(&self) -> Option<&'a T> {
        // SAFETY: see `current`
        unsafe { self.raw.successor().get() }
    }

    /// move the cursor forward one position. must not be called at the end.
    pub fn move_next(&mut self) {
        // SAFETY: the borrowed list keeps every reachable node alive
        unsafe { self.raw.advance() }
    }

    /// returns true if the cursor is past the last element
    pub fn is_end(&self) -> bool {
        self.raw.is_end()
    }

    /// returns true if the cursor is at the sentinel before the first element
    pub fn is_before_begin(&self) -> bool {
        // SAFETY: the borrowed list keeps every reachable node alive
        unsafe { self.raw.is_before_begin() }
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

// SAFETY: a Cursor only hands out shared references, like `&ForwardList<T>`
unsafe impl<T: Sync> Send for Cursor<'_, T> {}
unsafe impl<T: Sync> Sync for Cursor<'_, T> {}

impl<'a, T> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        Cursor::new(cursor.list, cursor.raw)
    }
}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.current()).finish()
    }
}

/// a position in a [`ForwardList`] with exclusive access to the list
///
/// besides reading and writing the element under it, a `CursorMut` can link
/// a new element in after its position and erase the element after its
/// position, both in O(1). a cursor at before-begin therefore operates on
/// the front of the list.
pub struct CursorMut<'a, T> {
    raw: RawCursor<T>,
    list: &'a mut ForwardList<T>,
}

impl<'a, T> CursorMut<'a, T> {
    pub(super) fn new(list: &'a mut ForwardList<T>, raw: RawCursor<T>) -> Self {
        Self { raw, list }
    }

    /// get the element at the cursor, or None at before-begin or the end
    pub fn current(&self) -> Option<&T> {
        // SAFETY: the list is exclusively borrowed by `self`, and the
        // returned borrow keeps `self` borrowed
        unsafe { self.raw.get() }
    }

    /// mutably get the element at the cursor, or None at before-begin or the
    /// end
    pub fn current_mut(&mut self) -> Option<&mut T> {
        // SAFETY: as in `current`, and `&mut self` makes the borrow unique
        unsafe { self.raw.get_mut() }
    }

    /// get the element after the cursor, or None if there is none
    pub fn peek_next(&self) -> Option<&T> {
        // SAFETY: see `current`
        unsafe { self.raw.successor().get() }
    }

    /// mutably get the element after the cursor, or None if there is none
    pub fn peek_next_mut(&mut self) -> Option<&mut T> {
        // SAFETY: see `current_mut`
        unsafe { self.raw.successor().get_mut() }
    }

    /// move the cursor forward one position. must not be called at the end.
    pub fn move_next(&mut self) {
        // SAFETY: the borrowed list keeps every reachable node alive
        unsafe { self.raw.advance() }
    }

    /// returns true if the cursor is past the last element
    pub fn is_end(&self) -> bool {
        self.raw.is_end()
    }

    /// returns true if the cursor is at the sentinel before the first element
    pub fn is_before_begin(&self) -> bool {
        // SAFETY: the borrowed list keeps every reachable node alive
        unsafe { self.raw.is_before_begin() }
    }

    /// a read-only view of this cursor's position
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.list, self.raw)
    }

    /// insert `data` directly after the cursor, increasing the length of the
    /// list by 1. the cursor moves onto the new element, so repeated calls
    /// insert in order.
    ///
    /// # Panics
    /// panics if the cursor is at the end, which has no node to link after.
    /// [`try_insert_after`](Self::try_insert_after) reports this instead.
    pub fn insert_after(&mut self, data: T) {
        assert!(
            !self.raw.is_end(),
            "cannot insert after the end of a ForwardList"
        );

        // SAFETY: the cursor is not at the end so it points to a live node of
        // the exclusively borrowed list
        let new_node = unsafe { ForwardListNode::link_after(self.raw.node(), data) };
        self.list.len += 1;
        self.raw = RawCursor::new(new_node);
    }

    /// like [`insert_after`](Self::insert_after), but hands `data` back if
    /// the cursor is at the end
    pub fn try_insert_after(&mut self, data: T) -> ForwardListResult<(), T> {
        if self.raw.is_end() {
            return Err(ForwardListError::PastTheEnd(data));
        }

        self.insert_after(data);
        Ok(())
    }

    /// remove the element after the cursor, decreasing the length of the list
    /// by 1, and return it. the cursor does not move; its successor is now
    /// the element that followed the removed one. returns None, leaving the
    /// list untouched, if the cursor is at the end or at the last element.
    pub fn erase_after(&mut self) -> Option<T> {
        if self.raw.is_end() {
            return None;
        }

        // SAFETY: the cursor points to a live node of the exclusively
        // borrowed list, and an unlinked node is owned by us alone
        unsafe {
            let erased = ForwardListNode::unlink_next(self.raw.node());
            if erased.is_null() {
                return None;
            }

            self.list.len -= 1;
            ForwardListNode::free(erased)
        }
    }
}

// SAFETY: a CursorMut behaves like `&mut ForwardList<T>`
unsafe impl<T: Send> Send for CursorMut<'_, T> {}
unsafe impl<T: Sync> Sync for CursorMut<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.current()).finish()
    }
}

impl<'a, 'b, T> PartialEq<Cursor<'b, T>> for Cursor<'a, T> {
    fn eq(&self, other: &Cursor<'b, T>) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<'a, 'b, T> PartialEq<CursorMut<'b, T>> for CursorMut<'a, T> {
    fn eq(&self, other: &CursorMut<'b, T>) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for CursorMut<'_, T> {}

impl<'a, 'b, T> PartialEq<Cursor<'b, T>> for CursorMut<'a, T> {
    fn eq(&self, other: &Cursor<'b, T>) -> bool {
        self.raw == other.raw
    }
}

impl<'a, 'b, T> PartialEq<CursorMut<'b, T>> for Cursor<'a, T> {
    fn eq(&self, other: &CursorMut<'b, T>) -> bool {
        self.raw == other.raw
    }
}
