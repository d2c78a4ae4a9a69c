use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

cfg_if::cfg_if! {
    if #[cfg(feature = "no-std")] {
        use alloc::boxed::Box;
    } else {
        use std::boxed::Box;
    }
}

mod cursor;
mod iter;
mod node;

pub use cursor::{Cursor, CursorMut};
pub use iter::{IntoIter, Iter, IterMut};

use cursor::RawCursor;
use node::ForwardListNode;

pub type ForwardListResult<T, V> = Result<T, ForwardListError<V>>;

/// errors from the checked cursor operations. the rejected value is handed
/// back to the caller.
#[derive(Debug, PartialEq, Eq)]
pub enum ForwardListError<V> {
    /// an insertion was attempted after the end position
    PastTheEnd(V),
}

impl<V> ForwardListError<V> {
    /// take back the value the failed operation was given
    pub fn into_inner(self) -> V {
        match self {
            Self::PastTheEnd(v) => v,
        }
    }
}

impl<V> fmt::Display for ForwardListError<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PastTheEnd(_) => f.write_str("cannot insert after the end of a ForwardList"),
        }
    }
}

#[cfg(not(feature = "no-std"))]
impl<V: fmt::Debug> std::error::Error for ForwardListError<V> {}

/// an owning, singly-linked list
///
/// elements are pushed and popped at the front in O(1). anywhere else, a
/// [`CursorMut`] inserts or erases the element after its position in O(1).
/// a sentinel node sits before the first element so that "after the
/// sentinel" ([`before_begin_mut`](Self::before_begin_mut)) means "at the
/// front", and front operations take the same path as mid-list ones.
///
/// the list is not internally synchronized; sharing one for mutation across
/// threads needs an external lock.
pub struct ForwardList<T> {
    /// a sentinel node that always exists, even in empty lists. it is
    /// allocated once and never moves, so cursors may point at it.
    sentinel: *mut ForwardListNode<T>,
    /// the number of non-sentinel elements in the list
    len: usize,
    _marker: PhantomData<Box<ForwardListNode<T>>>,
}

impl<T> ForwardList<T> {
    /// create a new, empty ForwardList
    pub fn new() -> Self {
        Self {
            sentinel: ForwardListNode::alloc_sentinel(),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// get the length of the list, not including the sentinel node
    pub fn len(&self) -> usize {
        self.len
    }

    /// returns true if the length of the list is 0
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// get the first element, or None if the list is empty
    pub fn front(&self) -> Option<&T> {
        self.begin().current()
    }

    /// mutably get the first element, or None if the list is empty
    pub fn front_mut(&mut self) -> Option<&mut T> {
        // SAFETY: `&mut self` guarantees no other borrow of the first element
        unsafe { self.first().get_mut() }
    }

    /// push an element to the front of this list
    pub fn push_front(&mut self, data: T) {
        self.before_begin_mut().insert_after(data);
    }

    /// pop the first element of this list. if the list is empty, None is
    /// returned.
    pub fn pop_front(&mut self) -> Option<T> {
        self.before_begin_mut().erase_after()
    }

    /// remove every element, leaving the list as if freshly created
    pub fn clear(&mut self) {
        // the chain is detached before any node is freed; a panicking
        // destructor leaks the remainder rather than leaving freed nodes linked
        // SAFETY: the sentinel is live for the lifetime of the list
        let mut curr = unsafe {
            let first = ForwardListNode::next(self.sentinel);
            ForwardListNode::set_next(self.sentinel, core::ptr::null_mut());
            first
        };
        self.len = 0;

        while !curr.is_null() {
            // SAFETY: the detached chain is reachable only from `curr`, and
            // we read each successor before freeing its predecessor
            unsafe {
                let next = ForwardListNode::next(curr);
                ForwardListNode::free(curr);
                curr = next;
            }
        }
    }

    /// swap the contents of two lists in O(1). no element is moved or copied;
    /// the two chains and their lengths change owners.
    pub fn swap(&mut self, other: &mut Self) {
        // SAFETY: both sentinels are live and distinct, as `self` and `other`
        // cannot alias
        unsafe {
            let ours = ForwardListNode::next(self.sentinel);
            let theirs = ForwardListNode::next(other.sentinel);
            ForwardListNode::set_next(self.sentinel, theirs);
            ForwardListNode::set_next(other.sentinel, ours);
        }
        core::mem::swap(&mut self.len, &mut other.len);
    }

    /// reverse the order of the elements in place by relinking the nodes
    pub fn reverse(&mut self) {
        // SAFETY: we only relink nodes owned by this exclusively borrowed list,
        // and every node stays reachable from exactly one predecessor once
        // the sentinel is repointed
        unsafe {
            let mut prev: *mut ForwardListNode<T> = core::ptr::null_mut();
            let mut curr = ForwardListNode::next(self.sentinel);
            while !curr.is_null() {
                let next = ForwardListNode::next(curr);
                ForwardListNode::set_next(curr, prev);
                prev = curr;
                curr = next;
            }
            ForwardListNode::set_next(self.sentinel, prev);
        }
    }

    /// a cursor at the sentinel, one position before the first element. it
    /// never yields data; it exists to be moved forward or, for
    /// [`before_begin_mut`](Self::before_begin_mut), to operate on the front.
    pub fn before_begin(&self) -> Cursor<'_, T> {
        Cursor::new(self, RawCursor::new(self.sentinel))
    }

    /// a mutable cursor at the sentinel. inserting or erasing after it
    /// operates on the front of the list.
    pub fn before_begin_mut(&mut self) -> CursorMut<'_, T> {
        let sentinel = RawCursor::new(self.sentinel);
        CursorMut::new(self, sentinel)
    }

    /// a cursor at the first element, equal to [`end`](Self::end) if the list
    /// is empty
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.first())
    }

    /// a mutable cursor at the first element, at the end if the list is empty
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        let first = self.first();
        CursorMut::new(self, first)
    }

    /// a cursor one past the last element. it never yields data.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self, RawCursor::end())
    }

    /// return an immutable iterator for this list
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// return a mutable iterator for this list
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    fn first(&self) -> RawCursor<T> {
        // SAFETY: the sentinel is live for the lifetime of the list
        unsafe { RawCursor::new(self.sentinel).successor() }
    }
}

impl<T> Drop for ForwardList<T> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: the sentinel was allocated in `new`, is now unlinked from
        // every element, and is freed exactly once here
        unsafe { ForwardListNode::free(self.sentinel) };
    }
}

// SAFETY: a ForwardList owns its nodes the way a chain of `Box`es would, and
// its raw pointers are never shared outside of borrows of the list
unsafe impl<T: Send> Send for ForwardList<T> {}
unsafe impl<T: Sync> Sync for ForwardList<T> {}

impl<T> Default for ForwardList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ForwardList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    /// copy `source` into a fresh list and only then swap it in, so a
    /// panicking `T::clone` leaves `self` untouched
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T> FromIterator<T> for ForwardList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        let mut cursor = list.before_begin_mut();
        for data in iter {
            cursor.insert_after(data);
        }
        list
    }
}

impl<T, const N: usize> From<[T; N]> for ForwardList<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T> Extend<T> for ForwardList<T> {
    /// append to the back of the list, in iteration order
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut cursor = self.before_begin_mut();
        while cursor.peek_next().is_some() {
            cursor.move_next();
        }
        for data in iter {
            cursor.insert_after(data);
        }
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for ForwardList<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> IntoIterator for ForwardList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a ForwardList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ForwardList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: fmt::Debug> fmt::Debug for ForwardList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for ForwardList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for ForwardList<T> {}

impl<T: PartialOrd> PartialOrd for ForwardList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for ForwardList<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for ForwardList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        for data in self.iter() {
            data.hash(state);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn collect<T: Clone>(list: &ForwardList<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn forward_lists_are_sendable() {
        fn send<S: Send>(_: S) {}
        send(ForwardList::<u32>::new());
    }

    #[test]
    fn cursors_and_iterators_are_send_and_sync() {
        fn send_sync<S: Send + Sync>(_: S) {}

        let mut list: ForwardList<u32> = [1, 2].into();
        send_sync(list.before_begin());
        send_sync(list.iter());
        send_sync(list.before_begin_mut());
        send_sync(list.iter_mut());
    }

    #[test]
    fn cursor_can_be_read_from_another_thread() {
        let list: ForwardList<u32> = [1, 2].into();

        let cursor = list.begin();
        let seen = std::thread::scope(|s| {
            let handle = s.spawn(move || cursor.peek_next().copied());
            handle.join()
        });
        assert_eq!(seen.unwrap(), Some(2));
    }

    #[test]
    fn new_list_is_empty() {
        let list = ForwardList::<u32>::new();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert!(list.front().is_none());
        assert_eq!(list.begin(), list.end());
        assert_ne!(list.before_begin(), list.begin());
    }

    #[test]
    fn can_push_front() {
        let mut list = ForwardList::new();
        assert_eq!(list.len(), 0);
        list.push_front(73);
        assert_eq!(list.len(), 1);
        assert!(!list.is_empty());
        assert_eq!(list.front(), Some(&73));
        assert_eq!(list.begin().current(), Some(&73));
    }

    #[test]
    fn front_mut_updates_first_element() {
        let mut list: ForwardList<u32> = [1, 2].into();
        *list.front_mut().unwrap() = 10;
        assert_eq!(collect(&list), vec![10, 2]);

        let mut empty = ForwardList::<u32>::new();
        assert!(empty.front_mut().is_none());
    }

    #[test]
    fn pop_front_on_empty_list_returns_none() {
        let mut list = ForwardList::<u32>::new();
        assert!(list.pop_front().is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn pop_front_visits_iteration_order() {
        let mut list: ForwardList<u32> = [5, 6, 7, 8].into();
        let expected = collect(&list);
        let original_len = list.len();

        let mut popped = Vec::new();
        while let Some(v) = list.pop_front() {
            popped.push(v);
        }

        assert_eq!(popped, expected);
        assert_eq!(popped.len(), original_len);
        assert!(list.is_empty());
    }

    #[test]
    fn clear_empties_list_and_is_idempotent() {
        let mut list: ForwardList<u32> = [1, 2, 3].into();

        list.clear();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.begin(), list.end());

        list.clear();
        assert_eq!(list.len(), 0);
        assert_eq!(list.begin(), list.end());

        list.push_front(4);
        assert_eq!(collect(&list), vec![4]);
    }

    #[test]
    fn clear_drops_every_element() {
        use std::rc::Rc;

        let tracker = Rc::new(());
        let mut list: ForwardList<Rc<()>> = (0..5).map(|_| Rc::clone(&tracker)).collect();
        assert_eq!(Rc::strong_count(&tracker), 6);

        list.clear();
        assert_eq!(Rc::strong_count(&tracker), 1);

        list.push_front(Rc::clone(&tracker));
        drop(list);
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn smoke_test() {
        let mut list = ForwardList::new();
        list.push_front(3);
        list.push_front(2);
        list.push_front(1);
        assert_eq!(collect(&list), vec![1, 2, 3]);
        assert_eq!(list.len(), 3);

        list.begin_mut().insert_after(99);
        assert_eq!(collect(&list), vec![1, 99, 2, 3]);
        assert_eq!(list.len(), 4);

        assert_eq!(list.begin_mut().erase_after(), Some(99));
        assert_eq!(collect(&list), vec![1, 2, 3]);
        assert_eq!(list.len(), 3);

        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(collect(&list), vec![2, 3]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn collect_preserves_input_order() {
        let list: ForwardList<u32> = (0..10).collect();
        assert_eq!(collect(&list), (0..10).collect::<Vec<_>>());
        assert_eq!(list.len(), 10);
    }

    #[test]
    fn collect_frees_partial_list_when_producer_panics() {
        use std::panic::{catch_unwind, AssertUnwindSafe};
        use std::rc::Rc;

        let tracker = Rc::new(());
        let result = catch_unwind(AssertUnwindSafe(|| {
            (0..5)
                .map(|i| {
                    if i == 3 {
                        panic!("element construction failed");
                    }
                    Rc::clone(&tracker)
                })
                .collect::<ForwardList<_>>()
        }));

        assert!(result.is_err());
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn extend_appends_at_the_back() {
        let mut list: ForwardList<u32> = [1, 2].into();
        list.extend([3, 4]);
        list.extend(&[5]);
        assert_eq!(collect(&list), vec![1, 2, 3, 4, 5]);
        assert_eq!(list.len(), 5);

        let mut empty = ForwardList::<u32>::new();
        empty.extend(vec![7, 8]);
        assert_eq!(collect(&empty), vec![7, 8]);
    }

    #[test]
    fn clone_is_deep() {
        let original: ForwardList<u32> = [1, 2, 3].into();
        let mut copy = original.clone();
        assert_eq!(copy, original);
        assert_eq!(copy.len(), original.len());

        copy.push_front(0);
        *copy.iter_mut().last().unwrap() = 30;
        assert_eq!(collect(&original), vec![1, 2, 3]);
        assert_eq!(collect(&copy), vec![0, 1, 2, 30]);
    }

    #[test]
    fn clone_from_replaces_contents() {
        let source: ForwardList<u32> = [4, 5].into();
        let mut target: ForwardList<u32> = [1, 2, 3].into();

        target.clone_from(&source);
        assert_eq!(target, source);
        assert_eq!(target.len(), 2);
    }

    #[test]
    fn clone_from_leaves_target_untouched_when_clone_panics() {
        use std::panic::{catch_unwind, AssertUnwindSafe};

        #[derive(Debug, PartialEq)]
        struct Fragile(u32);

        impl Clone for Fragile {
            fn clone(&self) -> Self {
                if self.0 == 13 {
                    panic!("unlucky clone");
                }
                Fragile(self.0)
            }
        }

        let source: ForwardList<Fragile> = [Fragile(1), Fragile(13)].into();
        let mut target: ForwardList<Fragile> = [Fragile(7)].into();

        let result = catch_unwind(AssertUnwindSafe(|| target.clone_from(&source)));
        assert!(result.is_err());
        assert_eq!(target.len(), 1);
        assert_eq!(target.front(), Some(&Fragile(7)));
    }

    #[test]
    fn swap_exchanges_contents() {
        let mut a: ForwardList<u32> = [1, 2, 3].into();
        let mut b: ForwardList<u32> = [9].into();

        a.swap(&mut b);
        assert_eq!(collect(&a), vec![9]);
        assert_eq!(a.len(), 1);
        assert_eq!(collect(&b), vec![1, 2, 3]);
        assert_eq!(b.len(), 3);

        let mut empty = ForwardList::new();
        a.swap(&mut empty);
        assert!(a.is_empty());
        assert_eq!(a.begin(), a.end());
        assert_eq!(collect(&empty), vec![9]);
    }

    #[test]
    fn swap_moves_nodes_without_copying() {
        let mut a: ForwardList<u32> = [1, 2].into();
        let mut b = ForwardList::new();

        let first_node = a.first().node();
        a.swap(&mut b);
        assert_eq!(b.first().node(), first_node);
    }

    #[test]
    fn reverse_relinks_in_place() {
        let mut list: ForwardList<u32> = [1, 2, 3, 4].into();
        list.reverse();
        assert_eq!(collect(&list), vec![4, 3, 2, 1]);
        assert_eq!(list.len(), 4);

        let mut single: ForwardList<u32> = [1].into();
        single.reverse();
        assert_eq!(collect(&single), vec![1]);

        let mut empty = ForwardList::<u32>::new();
        empty.reverse();
        assert!(empty.is_empty());
    }

    #[test]
    fn equality_is_elementwise() {
        let a: ForwardList<u32> = [1, 2].into();
        let b: ForwardList<u32> = [1, 2].into();
        let longer: ForwardList<u32> = [1, 2, 3].into();
        let different: ForwardList<u32> = [1, 3].into();

        assert_eq!(a, b);
        assert_ne!(a, longer);
        assert_ne!(longer, a);
        assert_ne!(a, different);
        assert_eq!(ForwardList::<u32>::new(), ForwardList::new());
    }

    #[test]
    fn ordering_is_lexicographic() {
        let short: ForwardList<u32> = [1, 2].into();
        let prefixed: ForwardList<u32> = [1, 2, 3].into();
        let bigger: ForwardList<u32> = [1, 3].into();

        assert!(short < prefixed);
        assert!(short < bigger);
        assert!(prefixed < bigger);
        assert!(bigger > short);
        assert!(short <= short.clone());
        assert!(short >= short.clone());
        assert!(!(short > prefixed));
        assert!(ForwardList::new() < short);
        assert_eq!(short.cmp(&short.clone()), Ordering::Equal);
    }

    #[test]
    fn partial_ordering_handles_incomparable_elements() {
        let nan: ForwardList<f64> = [1.0, f64::NAN].into();
        let one: ForwardList<f64> = [1.0, 2.0].into();

        assert_eq!(nan.partial_cmp(&one), None);
        assert_ne!(nan, nan.clone());
    }

    #[test]
    fn equal_lists_hash_equally() {
        use std::collections::hash_map::DefaultHasher;

        fn hash_of(list: &ForwardList<u32>) -> u64 {
            let mut hasher = DefaultHasher::new();
            list.hash(&mut hasher);
            hasher.finish()
        }

        let a: ForwardList<u32> = [1, 2, 3].into();
        assert_eq!(hash_of(&a), hash_of(&a.clone()));
    }

    #[test]
    fn debug_lists_elements() {
        let list: ForwardList<u32> = [1, 2].into();
        assert_eq!(format!("{:?}", list), "[1, 2]");
    }

    #[test]
    fn error_hands_back_value() {
        let err = ForwardListError::PastTheEnd(42_u32);
        assert_eq!(
            err.to_string(),
            "cannot insert after the end of a ForwardList"
        );
        assert_eq!(err.into_inner(), 42);
    }
}

// proptest doesn't run under miri with default config
#[cfg(all(not(miri), test, not(feature = "loom")))]
mod proptests {
    use std::collections::VecDeque;

    use proptest::prelude::*;
    use proptest::sample::Index;
    use proptest::test_runner::Config;
    use proptest_state_machine::{ReferenceStateMachine, StateMachineTest};

    use super::*;

    proptest_state_machine::prop_state_machine! {
        #![proptest_config(Config {
            failure_persistence: None,
            .. Config::default()
        })]

        #[test]
        fn forward_list_state_machine_test(
            sequential
            1..200
            =>
            ForwardList<u32>
        );
    }

    /// The possible transitions of the state machine. Positions are resolved
    /// against the current length when the transition is applied.
    #[derive(Clone, Debug)]
    pub enum Transition {
        PushFront(u32),
        PopFront,
        InsertAfter(Index, u32),
        EraseAfter(Index),
        Clear,
        CloneFrom,
        Reverse,
    }

    pub struct ForwardListStateMachine;

    impl ReferenceStateMachine for ForwardListStateMachine {
        type State = VecDeque<u32>;
        type Transition = Transition;

        fn init_state() -> BoxedStrategy<Self::State> {
            Just(VecDeque::new()).boxed()
        }

        fn transitions(_state: &Self::State) -> BoxedStrategy<Self::Transition> {
            prop_oneof![
                3 => (any::<u32>()).prop_map(Transition::PushFront),
                2 => Just(Transition::PopFront),
                3 => (any::<Index>(), any::<u32>())
                    .prop_map(|(at, value)| Transition::InsertAfter(at, value)),
                2 => (any::<Index>()).prop_map(Transition::EraseAfter),
                1 => Just(Transition::Clear),
                1 => Just(Transition::CloneFrom),
                1 => Just(Transition::Reverse),
            ]
            .boxed()
        }

        fn apply(mut state: Self::State, transition: &Self::Transition) -> Self::State {
            match transition {
                Transition::PushFront(value) => state.push_front(*value),
                Transition::PopFront => {
                    state.pop_front();
                }
                Transition::InsertAfter(at, value) => {
                    let position = at.index(state.len() + 1);
                    state.insert(position, *value);
                }
                Transition::EraseAfter(at) => {
                    if !state.is_empty() {
                        let position = at.index(state.len());
                        state.remove(position);
                    }
                }
                Transition::Clear => state.clear(),
                Transition::CloneFrom => {}
                Transition::Reverse => {
                    state = state.into_iter().rev().collect();
                }
            }
            state
        }
    }

    /// a mutable cursor that has advanced `steps` positions past before-begin
    fn cursor_at(list: &mut ForwardList<u32>, steps: usize) -> CursorMut<'_, u32> {
        let mut cursor = list.before_begin_mut();
        for _ in 0..steps {
            cursor.move_next();
        }
        cursor
    }

    impl StateMachineTest for ForwardList<u32> {
        type SystemUnderTest = Self;
        type Reference = ForwardListStateMachine;

        fn init_test(
            _ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) -> Self::SystemUnderTest {
            Self::new()
        }

        fn apply(
            mut state: Self::SystemUnderTest,
            _ref_state: &<Self::Reference as ReferenceStateMachine>::State,
            transition: Transition,
        ) -> Self::SystemUnderTest {
            match transition {
                Transition::PushFront(value) => state.push_front(value),
                Transition::PopFront => {
                    state.pop_front();
                }
                Transition::InsertAfter(at, value) => {
                    let position = at.index(state.len() + 1);
                    cursor_at(&mut state, position).insert_after(value);
                }
                Transition::EraseAfter(at) => {
                    if !state.is_empty() {
                        let position = at.index(state.len());
                        assert!(cursor_at(&mut state, position).erase_after().is_some());
                    }
                }
                Transition::Clear => state.clear(),
                Transition::CloneFrom => {
                    let copy = state.clone();
                    state.clone_from(&copy);
                }
                Transition::Reverse => state.reverse(),
            }
            state
        }

        fn check_invariants(
            state: &Self::SystemUnderTest,
            ref_state: &<Self::Reference as ReferenceStateMachine>::State,
        ) {
            assert_eq!(state.len(), ref_state.len());
            assert_eq!(state.is_empty(), ref_state.is_empty());
            assert_eq!(state.is_empty(), state.begin() == state.end());
            assert_eq!(state.front(), ref_state.front());
            assert!(state.iter().eq(ref_state.iter()));
        }
    }

    proptest! {
        #[test]
        fn comparisons_match_vec(
            a in proptest::collection::vec(0_u8..4, 0..6),
            b in proptest::collection::vec(0_u8..4, 0..6),
        ) {
            let list_a: ForwardList<u8> = a.iter().copied().collect();
            let list_b: ForwardList<u8> = b.iter().copied().collect();

            prop_assert_eq!(list_a == list_b, a == b);
            prop_assert_eq!(list_a != list_b, a != b);
            prop_assert_eq!(list_a.cmp(&list_b), a.cmp(&b));
            prop_assert_eq!(list_a < list_b, a < b);
            prop_assert_eq!(list_a <= list_b, a <= b);
            prop_assert_eq!(list_a > list_b, a > b);
            prop_assert_eq!(list_a >= list_b, a >= b);
        }

        #[test]
        fn collect_then_iterate_round_trips(
            values in proptest::collection::vec(any::<u32>(), 0..64),
        ) {
            let list: ForwardList<u32> = values.iter().copied().collect();
            prop_assert_eq!(list.len(), values.len());
            prop_assert_eq!(list.into_iter().collect::<Vec<_>>(), values);
        }
    }
}

#[cfg(all(not(miri), test, not(feature = "loom")))]
mod longform {
    use std::collections::VecDeque;

    use proptest::collection::vec;
    use proptest::prelude::*;
    use proptest_derive::Arbitrary;
    use rand::Rng;

    use super::*;

    #[derive(Arbitrary, Debug)]
    enum Operation {
        PushFront(u32),
        PopFront,
        InsertAfterRandom(u32),
        EraseAfterRandom,
        Swap,
        Iterate,
    }

    /// a random position in `0..=len`, where 0 is before-begin
    fn get_random(len: usize) -> usize {
        rand::thread_rng().gen_range(0..=len)
    }

    proptest! {
        #[test]
        fn longform(ops in vec(any::<Operation>(), 256)) {
            let mut reference = VecDeque::new();
            let mut list = ForwardList::new();
            let mut spare = ForwardList::new();
            let mut spare_reference = VecDeque::new();

            for op in ops.iter() {
                match op {
                    Operation::PushFront(v) => {
                        reference.push_front(*v);
                        list.push_front(*v);
                    }
                    Operation::PopFront => {
                        prop_assert_eq!(list.pop_front(), reference.pop_front());
                    }
                    Operation::InsertAfterRandom(v) => {
                        let position = get_random(list.len());
                        let mut cursor = list.before_begin_mut();
                        for _ in 0..position {
                            cursor.move_next();
                        }
                        cursor.insert_after(*v);
                        reference.insert(position, *v);
                    }
                    Operation::EraseAfterRandom => {
                        let position = get_random(list.len());
                        let mut cursor = list.before_begin_mut();
                        for _ in 0..position {
                            cursor.move_next();
                        }
                        prop_assert_eq!(cursor.erase_after(), reference.remove(position));
                    }
                    Operation::Swap => {
                        list.swap(&mut spare);
                        core::mem::swap(&mut reference, &mut spare_reference);
                    }
                    Operation::Iterate => {
                        prop_assert!(list.iter().eq(reference.iter()));
                    }
                }
                prop_assert_eq!(list.len(), reference.len());
            }

            prop_assert!(list.iter().eq(reference.iter()));
            prop_assert!(spare.iter().eq(spare_reference.iter()));
        }
    }
}

#[cfg(all(not(feature = "no-std"), all(test, feature = "loom")))]
mod loom_tests {
    use loom::sync::{Arc, Mutex};
    use loom::thread;

    use super::*;

    #[test]
    fn list_can_move_between_threads() {
        loom::model(|| {
            let mut list = ForwardList::new();
            list.push_front(1_u32);

            let handle = thread::spawn(move || {
                list.push_front(2);
                list
            });

            let list = handle.join().unwrap();
            assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![2, 1]);
        });
    }

    #[test]
    fn externally_synchronized_list_stays_consistent() {
        loom::model(|| {
            let list = Arc::new(Mutex::new(ForwardList::new()));

            let handles: Vec<_> = (0..2_u32)
                .map(|i| {
                    let list = list.clone();
                    thread::spawn(move || {
                        let mut list = list.lock().unwrap();
                        list.before_begin_mut().insert_after(i);
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            let list = list.lock().unwrap();
            assert_eq!(list.len(), 2);
            let mut values: Vec<_> = list.iter().copied().collect();
            values.sort();
            assert_eq!(values, vec![0, 1]);
        });
    }
}
