//! CHAINED transformer - sequential, type-changing composition
//!
//! A [`ChainedTransformer`] applies its transformers one after another; each
//! [`chain`](ChainedTransformer::chain) call changes the output type.
//!
//! # Examples
//!
//! ```rust,ignore
//! use rulegraph::transform::{ChainedTransformer, ToDisplayString};
//!
//! let chain = ChainedTransformer::identity()
//!     .chain(|n: i32| n * 2)
//!     .chain(ToDisplayString);
//! assert_eq!(chain.transform(21), "42");
//! ```

use std::cell::Cell;
use std::marker::PhantomData;

use crate::foundation::{BoxTransformer, Disposable, Transformer};

use super::Identity;

/// Two transformers applied in sequence.
struct Composed<I, M, O> {
    first: BoxTransformer<I, M>,
    second: BoxTransformer<M, O>,
}

impl<I, M, O> Transformer<I, O> for Composed<I, M, O> {
    fn transform(&self, input: I) -> O {
        self.second.transform(self.first.transform(input))
    }

    fn as_disposable(&self) -> Option<&dyn Disposable> {
        Some(self)
    }
}

impl<I, M, O> Disposable for Composed<I, M, O> {
    fn dispose(&self) {
        if let Some(first) = self.first.as_disposable() {
            first.dispose();
        }
        if let Some(second) = self.second.as_disposable() {
            second.dispose();
        }
    }
}

// ============================================================================
// CHAINED TRANSFORMER
// ============================================================================

/// Sequence of transformers turning an `I` into an `O`.
///
/// With deep disposal (the default), disposing the chain disposes every
/// chained transformer exactly once, however often the chain itself is
/// disposed.
pub struct ChainedTransformer<I, O> {
    inner: BoxTransformer<I, O>,
    deep_dispose: bool,
    disposed: Cell<bool>,
    _types: PhantomData<fn(I) -> O>,
}

impl<I: 'static> ChainedTransformer<I, I> {
    /// Creates an empty chain, which returns its input unchanged.
    pub fn identity() -> Self {
        Self::new(Identity)
    }
}

impl<I: 'static, O: 'static> ChainedTransformer<I, O> {
    /// Creates a chain starting with `transformer`, with deep disposal.
    pub fn new(transformer: impl Transformer<I, O> + 'static) -> Self {
        Self::with_deep_dispose(transformer, true)
    }

    /// Creates a chain starting with `transformer`.
    ///
    /// When `deep_dispose` is `false`, disposing the chain leaves the chained
    /// transformers untouched.
    pub fn with_deep_dispose(
        transformer: impl Transformer<I, O> + 'static,
        deep_dispose: bool,
    ) -> Self {
        Self::from_boxed(Box::new(transformer), deep_dispose)
    }

    fn from_boxed(inner: BoxTransformer<I, O>, deep_dispose: bool) -> Self {
        Self {
            inner,
            deep_dispose,
            disposed: Cell::new(false),
            _types: PhantomData,
        }
    }

    /// Appends `next`, producing a chain with output `T`.
    pub fn chain<T: 'static>(
        self,
        next: impl Transformer<O, T> + 'static,
    ) -> ChainedTransformer<I, T> {
        let deep_dispose = self.deep_dispose;
        ChainedTransformer::from_boxed(
            Box::new(Composed {
                first: self.inner,
                second: Box::new(next),
            }),
            deep_dispose,
        )
    }

    /// Returns `true` when disposal cascades to the chained transformers.
    pub fn is_deep_dispose(&self) -> bool {
        self.deep_dispose
    }
}

impl<I, O> Transformer<I, O> for ChainedTransformer<I, O> {
    fn transform(&self, input: I) -> O {
        self.inner.transform(input)
    }

    fn as_disposable(&self) -> Option<&dyn Disposable> {
        Some(self)
    }
}

impl<I, O> Disposable for ChainedTransformer<I, O> {
    fn dispose(&self) {
        if !self.deep_dispose || self.disposed.replace(true) {
            return;
        }
        if let Some(inner) = self.inner.as_disposable() {
            inner.dispose();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{CastTransformer, Negate, ToDisplayString};
    use std::rc::Rc;

    struct CountingDisposal(Rc<Cell<u32>>);

    impl Transformer<i32, i32> for CountingDisposal {
        fn transform(&self, input: i32) -> i32 {
            input
        }

        fn as_disposable(&self) -> Option<&dyn Disposable> {
            Some(self)
        }
    }

    impl Disposable for CountingDisposal {
        fn dispose(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_identity_chain() {
        let chain = ChainedTransformer::<bool, bool>::identity();
        assert!(chain.transform(true));
    }

    #[test]
    fn test_negate_twice() {
        let once = ChainedTransformer::identity().chain(Negate);
        assert!(once.transform(false));

        let twice = once.chain(Negate);
        assert!(twice.transform(true));
    }

    #[test]
    fn test_type_changing_chain() {
        let chain = ChainedTransformer::new(CastTransformer::<i64, i32>::new())
            .chain(|n: Option<i32>| n.map_or(-1, |n| n * 2))
            .chain(ToDisplayString);

        assert_eq!(chain.transform(Some(21)), "42");
        assert_eq!(chain.transform(Some(i64::MAX)), "-1");
    }

    #[test]
    fn test_shallow_dispose_leaves_transformers_alone() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let chain = ChainedTransformer::with_deep_dispose(CountingDisposal(first.clone()), false)
            .chain(CountingDisposal(second.clone()));

        chain.dispose();
        chain.dispose();
        chain.dispose();

        assert_eq!((first.get(), second.get()), (0, 0));
    }

    #[test]
    fn test_deep_dispose_reaches_each_transformer_once() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let chain = ChainedTransformer::new(CountingDisposal(first.clone()))
            .chain(CountingDisposal(second.clone()));

        chain.dispose();
        chain.dispose();
        chain.dispose();

        assert_eq!((first.get(), second.get()), (1, 1));
    }
}
