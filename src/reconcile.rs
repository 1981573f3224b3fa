//! Keyed reconciliation for the previous-tracks list.
//!
//! [`reconcile`] compares the list on screen with the freshly polled one and
//! returns the operations that turn the former into the latter. Applying the
//! operations in order with [`apply`] always yields a list whose keys equal
//! the new list's keys.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOp<T> {
    /// Insert at `index`. `stagger` is the entrance slot for animations.
    Insert { index: usize, item: T, stagger: usize },
    Remove { index: usize },
    /// Replace the entry at `index` in place, without animation.
    Update { index: usize, item: T },
}

/// Plan the operations turning `old` into `new`.
///
/// - `old` empty: every entry is inserted, staggered top to bottom.
/// - `head_changed` (a new track started): the list is treated as having
///   shifted down. The oldest entries leave from the bottom and the new ones
///   enter at the top. A list whose keys did not move is left alone.
/// - otherwise: silent in-place updates where the key at a position differs.
pub fn reconcile<T, K, F>(old: &[T], new: &[T], head_changed: bool, key: F) -> Vec<ListOp<T>>
where
    T: Clone,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    if old.is_empty() {
        return new
            .iter()
            .enumerate()
            .map(|(i, item)| ListOp::Insert {
                index: i,
                item: item.clone(),
                stagger: i,
            })
            .collect();
    }

    let same_keys = old.len() == new.len() && old.iter().zip(new).all(|(o, n)| key(o) == key(n));
    if head_changed
        && !same_keys
        && let Some(shift) = find_shift(old, new, &key)
    {
        let kept = new.len() - shift;
        let mut ops: Vec<ListOp<T>> = (kept..old.len())
            .rev()
            .map(|index| ListOp::Remove { index })
            .collect();
        ops.extend(new[..shift].iter().enumerate().map(|(i, item)| ListOp::Insert {
            index: i,
            item: item.clone(),
            stagger: i,
        }));
        return ops;
    }

    positional(old, new, &key)
}

/// Smallest `k >= 1` such that `new[k..]` continues the head of `old`.
fn find_shift<T, K, F>(old: &[T], new: &[T], key: &F) -> Option<usize>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    (1..=new.len()).find(|&k| {
        let tail = &new[k..];
        tail.len() <= old.len() && tail.iter().zip(old).all(|(n, o)| key(n) == key(o))
    })
}

fn positional<T, K, F>(old: &[T], new: &[T], key: &F) -> Vec<ListOp<T>>
where
    T: Clone,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut ops = Vec::new();
    for (index, (o, n)) in old.iter().zip(new).enumerate() {
        if key(o) != key(n) {
            ops.push(ListOp::Update {
                index,
                item: n.clone(),
            });
        }
    }
    for (slot, index) in (old.len()..new.len()).enumerate() {
        ops.push(ListOp::Insert {
            index,
            item: new[index].clone(),
            stagger: slot,
        });
    }
    for index in (new.len()..old.len()).rev() {
        ops.push(ListOp::Remove { index });
    }
    ops
}

/// Apply `ops` in order.
pub fn apply<T>(list: &mut Vec<T>, ops: Vec<ListOp<T>>) {
    for op in ops {
        match op {
            ListOp::Insert { index, item, .. } => list.insert(index.min(list.len()), item),
            ListOp::Remove { index } => {
                if index < list.len() {
                    list.remove(index);
                }
            }
            ListOp::Update { index, item } => {
                if let Some(slot) = list.get_mut(index) {
                    *slot = item;
                }
            }
        }
    }
}
