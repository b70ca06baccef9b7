//! Cell segmentation: partition the flattened grid into 81 equal cells.

use crate::image::GrayImage;

/// Side length of the puzzle in cells.
pub const GRID_SIDE: usize = 9;

/// Split a W×H grid image into 81 (W/9)×(H/9) cells, row-major.
///
/// Pure partition: every source pixel lands in exactly one cell, nothing is
/// resized or padded. `None` when W or H is not divisible by 9 (the pipeline
/// validates its canvas size up front, so this is unreachable there).
pub fn split_cells(grid: &GrayImage) -> Option<Vec<GrayImage>> {
    if grid.w == 0 || grid.h == 0 || grid.w % GRID_SIDE != 0 || grid.h % GRID_SIDE != 0 {
        return None;
    }
    let cw = grid.w / GRID_SIDE;
    let ch = grid.h / GRID_SIDE;
    let mut cells = Vec::with_capacity(GRID_SIDE * GRID_SIDE);
    for row in 0..GRID_SIDE {
        for col in 0..GRID_SIDE {
            cells.push(grid.crop(col * cw, row * ch, cw, ch));
        }
    }
    Some(cells)
}

/// Center of the cell at (row, col) on a `w × h` canvas.
pub fn cell_center(row: usize, col: usize, w: usize, h: usize) -> [f32; 2] {
    let cw = w as f32 / GRID_SIDE as f32;
    let ch = h as f32 / GRID_SIDE as f32;
    [(col as f32 + 0.5) * cw, (row as f32 + 0.5) * ch]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_splits_into_81_cells_covering_every_pixel_once() {
        let mut grid = GrayImage::new(450, 450);
        for (i, px) in grid.data.iter_mut().enumerate() {
            *px = (i % 251) as u8;
        }
        let cells = split_cells(&grid).expect("450 divides by 9");
        assert_eq!(cells.len(), 81);

        // Reassemble and compare: proves no pixel is omitted or duplicated.
        let mut rebuilt = GrayImage::new(450, 450);
        for (i, cell) in cells.iter().enumerate() {
            assert_eq!((cell.w, cell.h), (50, 50));
            let (row, col) = (i / 9, i % 9);
            for y in 0..50 {
                for x in 0..50 {
                    rebuilt.set(col * 50 + x, row * 50 + y, cell.get(x, y));
                }
            }
        }
        assert_eq!(rebuilt, grid);
    }

    #[test]
    fn cells_are_row_major() {
        let mut grid = GrayImage::new(9, 9);
        for y in 0..9 {
            for x in 0..9 {
                grid.set(x, y, (y * 9 + x) as u8);
            }
        }
        let cells = split_cells(&grid).unwrap();
        assert_eq!(cells[0].data, vec![0]);
        assert_eq!(cells[1].data, vec![1]);
        assert_eq!(cells[9].data, vec![9]);
        assert_eq!(cells[80].data, vec![80]);
    }

    #[test]
    fn indivisible_dimensions_are_rejected() {
        assert!(split_cells(&GrayImage::new(100, 450)).is_none());
        assert!(split_cells(&GrayImage::new(450, 100)).is_none());
    }

    #[test]
    fn center_of_middle_cell_is_canvas_center() {
        assert_eq!(cell_center(4, 4, 450, 450), [225.0, 225.0]);
    }
}
