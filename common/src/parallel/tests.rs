use super::*;

/// Writes `y * 1000 + x` through the chunk API and checks every cell.
#[test]
fn test_chunk_start_row_maps_to_global_row() {
    let (width, height) = (10, 37);
    let mut grid = vec![0usize; width * height];

    grid.par_rows_mut_auto(width).for_each(|(first_row, chunk)| {
        for (offset, row) in chunk.chunks_exact_mut(width).enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = (first_row + offset) * 1000 + x;
            }
        }
    });

    for (y, row) in grid.chunks_exact(width).enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            assert_eq!(cell, y * 1000 + x);
        }
    }
}

#[test]
fn test_vertical_sum_reads_neighbour_rows() {
    // Each output row sums the source rows above and below; the source is
    // read through shared borrows while the output is split across chunks.
    let (width, height) = (4, 9);
    let source: Vec<f64> = (0..height)
        .flat_map(|y| std::iter::repeat(y as f64).take(width))
        .collect();
    let mut output = vec![0.0f64; width * height];

    output.par_rows_mut_auto(width).for_each(|(first_row, chunk)| {
        for (offset, row) in chunk.chunks_exact_mut(width).enumerate() {
            let y = first_row + offset;
            let above = if y > 0 { (y - 1) as f64 } else { 0.0 };
            let below = if y + 1 < height { (y + 1) as f64 } else { 0.0 };
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = above + source[y * width + x] + below;
            }
        }
    });

    assert_eq!(output[0], 1.0);
    assert_eq!(output[4 * width], 12.0);
    assert_eq!(output[(height - 1) * width + 3], 15.0);
}

#[test]
fn test_chunks_cover_buffer_with_whole_rows() {
    let width = 7;
    let mut data = vec![0u8; width * 50];

    let lengths: Vec<usize> = data
        .par_rows_mut_auto(width)
        .map(|(_, chunk)| chunk.len())
        .collect();

    assert!(lengths.iter().all(|len| len % width == 0));
    assert_eq!(lengths.iter().sum::<usize>(), data.len());
}

#[test]
fn test_single_row_is_one_chunk() {
    let mut row = vec![0.5f64; 5];
    let chunks: Vec<(usize, usize)> = row
        .par_rows_mut_auto(5)
        .map(|(first_row, chunk)| (first_row, chunk.len()))
        .collect();
    assert_eq!(chunks, [(0, 5)]);
}

#[test]
fn test_auto_chunk_rows_never_returns_zero() {
    assert_eq!(auto_chunk_rows(0), 1);
    assert_eq!(auto_chunk_rows(1), 1);
    assert!(auto_chunk_rows(100_000) >= 1);
}

#[test]
#[should_panic(expected = "buffer length must be a multiple of the row width")]
fn test_ragged_buffer_panics() {
    let mut data = vec![0u8; 11];
    let _ = data.par_rows_mut_auto(5).count();
}

#[test]
#[should_panic(expected = "row width must be positive")]
fn test_zero_width_panics() {
    let mut data = vec![0u8; 4];
    let _ = data.par_rows_mut_auto(0).count();
}
