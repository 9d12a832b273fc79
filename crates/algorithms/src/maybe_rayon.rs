//! Row iteration that is parallel with the `parallel` feature and sequential
//! without it.
//!
//! Index evaluation calls `(0..rows).into_par_iter().flat_map(..).collect()`.
//! With rayon enabled that is rayon's prelude; otherwise the shim below maps
//! `into_par_iter` to `into_iter` so the same chain resolves to `Iterator`.

#[cfg(feature = "parallel")]
pub use rayon::prelude::*;

#[cfg(not(feature = "parallel"))]
mod sequential {
    pub trait IntoParallelIterator {
        type Iter: Iterator<Item = Self::Item>;
        type Item;
        fn into_par_iter(self) -> Self::Iter;
    }

    impl<I: IntoIterator> IntoParallelIterator for I {
        type Iter = I::IntoIter;
        type Item = I::Item;
        fn into_par_iter(self) -> Self::Iter {
            self.into_iter()
        }
    }
}

#[cfg(not(feature = "parallel"))]
pub use sequential::IntoParallelIterator;
