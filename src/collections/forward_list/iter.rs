use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;

use super::cursor::RawCursor;
use super::ForwardList;

/// an immutable iterator over the elements of a [`ForwardList`], front to back
pub struct Iter<'a, T> {
    curr: RawCursor<T>,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(list: &'a ForwardList<T>) -> Self {
        Self {
            curr: list.first(),
            remaining: list.len(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // SAFETY: `remaining` counts the live data nodes left from `curr`,
        // and the list is borrowed for 'a
        unsafe {
            let to_return = self.curr.get();
            self.curr.advance();
            self.remaining -= 1;
            to_return
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

// SAFETY: an Iter only hands out shared references, like `&ForwardList<T>`
unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            curr: self.curr,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&Remaining(self.clone())).finish()
    }
}

/// the elements an iterator has not yielded yet, formatted as a list
struct Remaining<'a, T>(Iter<'a, T>);

impl<T: fmt::Debug> fmt::Debug for Remaining<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.clone()).finish()
    }
}

/// a mutable iterator over the elements of a [`ForwardList`], front to back
pub struct IterMut<'a, T> {
    curr: RawCursor<T>,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(super) fn new(list: &'a mut ForwardList<T>) -> Self {
        Self {
            curr: list.first(),
            remaining: list.len(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // SAFETY: as for `Iter`, with the list exclusively borrowed for 'a.
        // each node is yielded once, and advancing only reads the `next`
        // link, never the data we hand out
        unsafe {
            let to_return = self.curr.get_mut();
            self.curr.advance();
            self.remaining -= 1;
            to_return
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

// SAFETY: an IterMut behaves like `&mut ForwardList<T>`
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // the nodes not yet yielded have no outstanding borrows, and `&self`
        // keeps them from being handed out while we read them
        let remaining = Iter {
            curr: self.curr,
            remaining: self.remaining,
            _marker: PhantomData,
        };
        f.debug_tuple("IterMut").field(&Remaining(remaining)).finish()
    }
}

/// an owning iterator over the elements of a [`ForwardList`], front to back
pub struct IntoIter<T> {
    list: ForwardList<T>,
}

impl<T> IntoIter<T> {
    pub(super) fn new(list: ForwardList<T>) -> Self {
        Self { list }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}
