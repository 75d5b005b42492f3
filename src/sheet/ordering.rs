//! Order index maintenance
//!
//! Every record carries an `order` index that must read `0..N-1` with no gaps
//! or duplicates within its partition after each mutation. Partitions are the
//! pinned/unpinned halves of the category list and each category's commands.

/// A record with a position inside its partition
pub trait Ordered {
    fn order(&self) -> u32;
    fn set_order(&mut self, order: u32);
}

/// Order index for an item appended to a partition of `len` items
pub fn next_order(len: usize) -> u32 {
    len as u32
}

/// Rewrite `order` to `0..count-1` following iteration order
pub fn renumber<'a, T, I>(items: I)
where
    T: Ordered + 'a,
    I: IntoIterator<Item = &'a mut T>,
{
    for (index, item) in items.into_iter().enumerate() {
        item.set_order(index as u32);
    }
}

/// Move the item at `from` so it ends up at `to`
///
/// Returns `false` without touching `items` when the indices are equal or
/// either is out of bounds. The caller renumbers on success.
pub fn move_within<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

/// Whether `order` values read `0..N-1` in iteration order
pub fn is_contiguous<'a, T, I>(items: I) -> bool
where
    T: Ordered + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .enumerate()
        .all(|(index, item)| item.order() == index as u32)
}
