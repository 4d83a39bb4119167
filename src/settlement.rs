//! This module defines the shape of the values a promise is fulfilled with
//! when an error-first callback succeeds.

use thiserror::Error;

/// The success payload of an error-first callback, normalized by how many
/// values the callback received after its (absent) error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Settlement<V> {
    /// The callback received no values besides the error slot.
    Empty,
    /// The callback received exactly one value.
    Single(V),
    /// The callback received several values, kept in their original order.
    Multiple(Vec<V>),
}

/// Error returned when a settlement does not hold the expected number of
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected {expected} callback value(s), found {found}")]
pub struct ArityError {
    /// How many values were requested.
    pub expected: usize,
    /// How many values the callback actually produced.
    pub found: usize,
}

impl<V> Settlement<V> {
    /// Number of values the callback produced.
    pub fn len(&self) -> usize {
        match self {
            Settlement::Empty => 0,
            Settlement::Single(_) => 1,
            Settlement::Multiple(values) => values.len(),
        }
    }

    /// Tests whether the callback produced no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattens the settlement back into the values, in callback order.
    pub fn into_vec(self) -> Vec<V> {
        match self {
            Settlement::Empty => Vec::new(),
            Settlement::Single(value) => vec![value],
            Settlement::Multiple(values) => values,
        }
    }

    /// Extracts the only value. Fails unless the callback produced exactly
    /// one value.
    pub fn into_single(self) -> Result<V, ArityError> {
        let mut values = self.into_array::<1>()?.into_iter();
        values.next().ok_or(ArityError { expected: 1, found: 0 })
    }

    /// Extracts exactly `N` values.
    ///
    /// # Examples
    ///
    /// ```
    /// use errback::Settlement;
    ///
    /// let settlement = Settlement::from(vec![10, 20, 30]);
    /// assert_eq!(settlement.clone().into_array::<3>(), Ok([10, 20, 30]));
    /// assert!(settlement.into_array::<2>().is_err());
    /// ```
    pub fn into_array<const N: usize>(self) -> Result<[V; N], ArityError> {
        let found = self.len();
        <[V; N]>::try_from(self.into_vec())
            .map_err(|_| ArityError { expected: N, found })
    }

    /// Converts every value, keeping the shape.
    pub fn map<F, U>(self, mut mapper: F) -> Settlement<U>
    where
        F: FnMut(V) -> U,
    {
        match self {
            Settlement::Empty => Settlement::Empty,
            Settlement::Single(value) => Settlement::Single(mapper(value)),
            Settlement::Multiple(values) => {
                Settlement::Multiple(values.into_iter().map(mapper).collect())
            },
        }
    }
}

impl<V> Default for Settlement<V> {
    fn default() -> Self {
        Settlement::Empty
    }
}

impl<V> From<Vec<V>> for Settlement<V> {
    fn from(mut values: Vec<V>) -> Self {
        match values.len() {
            0 => Settlement::Empty,
            1 => values.pop().map_or(Settlement::Empty, Settlement::Single),
            _ => Settlement::Multiple(values),
        }
    }
}

impl<V> From<Settlement<V>> for Vec<V> {
    fn from(settlement: Settlement<V>) -> Self {
        settlement.into_vec()
    }
}

impl<V> FromIterator<V> for Settlement<V> {
    fn from_iter<I>(iterable: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        Self::from(iterable.into_iter().collect::<Vec<_>>())
    }
}
