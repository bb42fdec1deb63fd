//! Random choice behind a seam so command bodies stay deterministic in
//! tests.

use rand::Rng;

/// Chooses one position out of `len`.
pub trait Picker: Send + Sync {
    /// Returns an index in `0..len`, or `None` when `len` is zero.
    fn pick_index(&self, len: usize) -> Option<usize>;
}

/// Picks one element of `items`.
#[must_use]
pub fn pick<'a, T>(picker: &dyn Picker, items: &'a [T]) -> Option<&'a T> {
    picker
        .pick_index(items.len())
        .and_then(|position| items.get(position))
}

/// Uniform choice from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPicker;

impl Picker for RandomPicker {
    fn pick_index(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| rand::thread_rng().gen_range(0..len))
    }
}

/// Always picks the same position, wrapped to the list length.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPicker {
    index: usize,
}

impl FixedPicker {
    /// Creates a picker returning `index` modulo the list length.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self { index }
    }
}

impl Picker for FixedPicker {
    fn pick_index(&self, len: usize) -> Option<usize> {
        self.index.checked_rem(len)
    }
}
