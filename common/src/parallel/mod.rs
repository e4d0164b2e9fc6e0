//! Row-aligned parallel iteration over image-like buffers.

use rayon::prelude::*;

#[cfg(test)]
mod tests;

/// Chunks handed to each rayon worker on average.
const CHUNKS_PER_THREAD: usize = 3;

/// Number of rows per chunk so that `rows` split into roughly
/// `CHUNKS_PER_THREAD` chunks per rayon worker.
#[inline]
pub fn auto_chunk_rows(rows: usize) -> usize {
    let num_chunks = rayon::current_num_threads() * CHUNKS_PER_THREAD;
    (rows / num_chunks).max(1)
}

/// Extension trait for splitting a row-major buffer into row-aligned parallel chunks.
pub trait ParRowsMutAuto<T: Send> {
    /// Returns an iterator yielding `(chunk_start_row, chunk)` pairs where each
    /// chunk holds one or more complete rows of `width` elements.
    ///
    /// Panics if `width` is zero or the buffer length is not a multiple of `width`.
    fn par_rows_mut_auto<'a>(
        &'a mut self,
        width: usize,
    ) -> impl IndexedParallelIterator<Item = (usize, &'a mut [T])>
    where
        T: 'a;
}

impl<T: Send> ParRowsMutAuto<T> for [T] {
    fn par_rows_mut_auto<'a>(
        &'a mut self,
        width: usize,
    ) -> impl IndexedParallelIterator<Item = (usize, &'a mut [T])>
    where
        T: 'a,
    {
        assert!(width > 0, "row width must be positive");
        assert_eq!(
            self.len() % width,
            0,
            "buffer length must be a multiple of the row width"
        );

        let chunk_rows = auto_chunk_rows(self.len() / width);
        self.par_chunks_mut(width * chunk_rows)
            .enumerate()
            .map(move |(idx, chunk)| (idx * chunk_rows, chunk))
    }
}
