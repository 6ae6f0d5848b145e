use alloc::vec::Vec;

use crate::fenwick::Fenwick;
use crate::{Error, Range, RangedValue, Result};

/// An ordered list of values, each owning a contiguous run of positions.
///
/// Ranges stretch and compress with their entry's size: entry `0` starts at `0` and every
/// entry starts where the previous one ends, so the union of all ranges is `[0, span)`.
///
/// Resizing an entry and looking up the entry that owns a position run in `O(log n)`.
/// Inserting or removing anywhere but the end rebuilds the prefix sums in `O(n)`.
#[derive(Clone, Debug)]
pub struct AccordionList<T> {
    values: Vec<T>,
    sizes: Vec<usize>,
    sums: Fenwick,
}

impl<T> Default for AccordionList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AccordionList<T> {
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            sizes: Vec::new(),
            sums: Fenwick::default(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Total number of positions covered by all entries.
    pub fn span(&self) -> usize {
        self.sums.total()
    }

    /// Inserts `value` at `index`, owning `size` positions starting where the previous
    /// entry ends. Later entries shift by `size`.
    pub fn insert(&mut self, index: usize, value: T, size: usize) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        self.values.insert(index, value);
        self.sizes.insert(index, size);
        if index == len {
            self.sums.push(size);
        } else {
            self.rebuild();
        }
        Ok(())
    }

    pub fn push(&mut self, value: T, size: usize) {
        self.values.push(value);
        self.sizes.push(size);
        self.sums.push(size);
    }

    /// Removes the entry at `index`. Later entries shift back by its size.
    pub fn remove(&mut self, index: usize) -> Result<RangedValue<T>> {
        let range = self.range(index)?;
        let value = self.values.remove(index);
        self.sizes.remove(index);
        if index == self.len() {
            self.sums.truncate(index);
        } else {
            self.rebuild();
        }
        Ok(RangedValue { value, range })
    }

    /// Replaces the entry at `index`, keeping its lower bound. Later entries shift by the
    /// size difference. Returns the replaced value with its old range.
    pub fn replace(&mut self, index: usize, value: T, size: usize) -> Result<RangedValue<T>> {
        let range = self.range(index)?;
        let old = core::mem::replace(&mut self.values[index], value);
        self.set_size(index, size);
        Ok(RangedValue { value: old, range })
    }

    /// Changes the size of the entry at `index` and returns its range from before the
    /// change.
    pub fn resize(&mut self, index: usize, size: usize) -> Result<Range> {
        let range = self.range(index)?;
        self.set_size(index, size);
        Ok(range)
    }

    pub fn clear(&mut self) {
        self.drain();
    }

    /// Removes every entry and returns the values in order.
    pub fn drain(&mut self) -> Vec<T> {
        self.sizes.clear();
        self.sums = Fenwick::default();
        core::mem::take(&mut self.values)
    }

    pub fn value(&self, index: usize) -> Result<&T> {
        self.values.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    pub fn range(&self, index: usize) -> Result<Range> {
        let len = self.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        Ok(Range::with_size(self.sums.prefix_sum(index), self.sizes[index]))
    }

    pub fn get(&self, index: usize) -> Result<RangedValue<&T>> {
        Ok(RangedValue {
            value: self.value(index)?,
            range: self.range(index)?,
        })
    }

    /// Returns the slot index of the entry that owns `position`.
    pub fn index_at(&self, position: usize) -> Result<usize> {
        let span = self.span();
        if position >= span {
            return Err(Error::PositionOutOfRange { position, span });
        }
        let index = self.sums.lower_bound(position);
        debug_assert!(index < self.len(), "lower_bound past the end for {position}");
        Ok(index)
    }

    /// Returns the entry that owns `position`, with its range.
    pub fn entry_containing(&self, position: usize) -> Result<RangedValue<&T>> {
        self.get(self.index_at(position)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = RangedValue<&T>> + '_ {
        let mut lower = 0usize;
        self.values
            .iter()
            .zip(self.sizes.iter())
            .map(move |(value, &size)| {
                let range = Range::with_size(lower, size);
                lower = range.upper;
                RangedValue { value, range }
            })
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.values.iter()
    }

    fn set_size(&mut self, index: usize, size: usize) {
        let old = core::mem::replace(&mut self.sizes[index], size);
        self.sums.add(index, size as isize - old as isize);
    }

    fn rebuild(&mut self) {
        self.sums = Fenwick::from_sizes(&self.sizes);
    }
}
