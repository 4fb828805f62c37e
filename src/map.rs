pub const MAP_WIDTH: usize = 8;
pub const MAP_HEIGHT: usize = 8;

/// Fixed world grid, baked in at compile time. 1 = wall, 0 = empty.
pub struct Map {
    cells: [[u8; MAP_WIDTH]; MAP_HEIGHT],
}

impl Map {
    pub fn new() -> Self {
        Self {
            cells: [
                [1, 1, 1, 1, 1, 1, 1, 1],
                [1, 0, 0, 0, 0, 0, 0, 1],
                [1, 0, 1, 1, 1, 1, 0, 1],
                [1, 0, 1, 0, 0, 1, 0, 1],
                [1, 0, 1, 0, 0, 1, 0, 1],
                [1, 0, 1, 1, 1, 1, 0, 1],
                [1, 0, 0, 0, 0, 0, 0, 1],
                [1, 1, 1, 1, 1, 1, 1, 1],
            ],
        }
    }

    /// Whether the cell containing world point (x, y) is a wall.
    /// Everything outside the grid reads as solid, so ray marches and
    /// movement probes terminate even if the map had no enclosing walls.
    pub fn solid_at(&self, x: f32, y: f32) -> bool {
        let i = x.floor() as isize;
        let j = y.floor() as isize;
        if i < 0 || j < 0 {
            return true;
        }
        let (i, j) = (i as usize, j as usize);
        if i >= MAP_WIDTH || j >= MAP_HEIGHT {
            return true;
        }
        self.cells[j][i] != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_cells_are_empty() {
        let map = Map::new();
        assert!(!map.solid_at(1.5, 1.5));
        assert!(!map.solid_at(3.5, 3.5));
    }

    #[test]
    fn border_cells_are_walls() {
        let map = Map::new();
        assert!(map.solid_at(0.5, 0.5));
        assert!(map.solid_at(7.9, 3.5));
        assert!(map.solid_at(3.5, 0.2));
    }

    #[test]
    fn out_of_bounds_reads_solid() {
        let map = Map::new();
        assert!(map.solid_at(-0.1, 3.5));
        assert!(map.solid_at(3.5, -2.0));
        assert!(map.solid_at(8.0, 3.5));
        assert!(map.solid_at(3.5, 100.0));
    }
}
