/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct used as the broad phase of the
 * collision pass. The canvas is divided into square cells; each tick every
 * boid index is bucketed into the cell(s) it touches and only boids sharing
 * a cell are tested against each other.
 *
 * Two bucketing schemes are available:
 * - Coarse: a boid goes only into the cell holding its centre
 * - Neighbour-aware: the centre plus eight probes offset by the boid's radius,
 *   so boids straddling a cell edge are still paired with their neighbours
 *
 * The same cells double as the tiles of the heat-map overlay.
 */

use crate::boid::Boid;
use crate::colour::{self, Colour};
use crate::vector::Vector2;

// Compass offsets (in radii) probed by neighbour-aware bucketing
const PROBES: [(f32, f32); 8] = [
    (0.0, -1.0),
    (1.0, -1.0),
    (1.0, 0.0),
    (1.0, 1.0),
    (0.0, 1.0),
    (-1.0, 1.0),
    (-1.0, 0.0),
    (-1.0, -1.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub column: usize,
    pub row: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Partition {
    Coarse,
    #[default]
    NeighbourAware,
}

impl Partition {
    // Member count that maps to a fully "hot" heat-map tile
    pub fn heat_normalisation(self) -> f32 {
        match self {
            Partition::Coarse => 32.0,
            Partition::NeighbourAware => 4.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cell {
    pub grid_pos: GridPosition,
    pub surface_pos: Vector2,
    pub colour: Colour,
    // Indices into the simulation's boid list, rebuilt every tick
    pub members: Vec<usize>,
}

pub struct SpatialGrid {
    pub cell_size: f32,
    cells: Vec<Vec<Cell>>,
    rows: usize,
    columns: usize,
}

impl SpatialGrid {
    /// Cover a `width` x `height` canvas with `cell_size` cells, plus one spare row and column
    /// so positions exactly on the far edge still map to a cell.
    pub fn new(width: f32, height: f32, cell_size: f32, colour: Colour) -> Self {
        let columns = (width / cell_size).ceil().max(0.0) as usize + 1;
        let rows = (height / cell_size).ceil().max(0.0) as usize + 1;

        let cells = (0..rows)
            .map(|row| {
                (0..columns)
                    .map(|column| Cell {
                        grid_pos: GridPosition { column, row },
                        surface_pos: Vector2::new(column as f32 * cell_size, row as f32 * cell_size),
                        colour,
                        members: Vec::new(),
                    })
                    .collect()
            })
            .collect();

        Self {
            cell_size,
            cells,
            rows,
            columns,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell(&self, at: GridPosition) -> Option<&Cell> {
        self.cells.get(at.row).and_then(|row| row.get(at.column))
    }

    // Row-major iteration over every cell
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut().flatten()
    }

    // Map a canvas position to its cell; `None` outside the grid
    #[inline]
    pub fn cell_position(&self, pos: Vector2) -> Option<GridPosition> {
        let row = (pos.y / self.cell_size).floor();
        let column = (pos.x / self.cell_size).floor();
        if row < 0.0 || column < 0.0 || row >= self.rows as f32 || column >= self.columns as f32 {
            return None;
        }
        Some(GridPosition {
            column: column as usize,
            row: row as usize,
        })
    }

    pub fn clear(&mut self) {
        for cell in self.iter_mut() {
            cell.members.clear();
        }
    }

    /// Put `boid_index` into the cell holding `position`. Returns false if the position is off-grid.
    #[inline]
    pub fn insert(&mut self, boid_index: usize, position: Vector2) -> bool {
        match self.cell_position(position) {
            Some(at) => {
                self.cells[at.row][at.column].members.push(boid_index);
                true
            }
            None => false,
        }
    }

    /// Put `boid_index` into every distinct cell touched by its centre or the eight
    /// radius-offset probes around it. Returns how many cells received it.
    pub fn insert_with_neighbours(&mut self, boid_index: usize, position: Vector2, radius: f32) -> usize {
        let mut touched: [Option<GridPosition>; 9] = [None; 9];
        let mut count = 0;

        let origin = std::iter::once(position);
        let probes = PROBES
            .iter()
            .map(|&(dx, dy)| position + Vector2::new(dx * radius, dy * radius));

        for probe in origin.chain(probes) {
            let Some(at) = self.cell_position(probe) else {
                continue;
            };
            if touched[..count].contains(&Some(at)) {
                continue;
            }
            touched[count] = Some(at);
            count += 1;
            self.cells[at.row][at.column].members.push(boid_index);
        }

        count
    }

    // Clear and re-bucket the whole population
    pub fn rebuild(&mut self, boids: &[Boid], partition: Partition) {
        self.clear();
        for (i, boid) in boids.iter().enumerate() {
            match partition {
                Partition::Coarse => {
                    self.insert(i, boid.pos);
                }
                Partition::NeighbourAware => {
                    self.insert_with_neighbours(i, boid.pos, boid.radius);
                }
            }
        }
    }

    pub fn occupied_cells(&self) -> usize {
        self.iter().filter(|cell| !cell.members.is_empty()).count()
    }

    pub fn colour_flat(&mut self, colour: Colour) {
        for cell in self.iter_mut() {
            cell.colour = colour;
        }
    }

    // Blend each tile from `cold` to `hot` by member count / `normalisation`
    pub fn colour_heat_map(&mut self, cold: Colour, hot: Colour, normalisation: f32) {
        for cell in self.iter_mut() {
            let heat = cell.members.len() as f32 / normalisation;
            cell.colour = colour::blend(cold, hot, heat);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::color::rgba;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid() -> SpatialGrid {
        SpatialGrid::new(800.0, 640.0, 32.0, rgba(0.0, 0.0, 0.0, 1.0))
    }

    fn random_boids(count: usize) -> Vec<Boid> {
        let mut rng = StdRng::seed_from_u64(42);
        (0..count)
            .map(|_| Boid::spawn_on_canvas(&mut rng, 800.0, 640.0, 4.0, 8.0, rgba(1.0, 1.0, 1.0, 1.0), 0.0))
            .collect()
    }

    fn cells_holding(grid: &SpatialGrid, index: usize) -> Vec<GridPosition> {
        grid.iter()
            .filter(|cell| cell.members.contains(&index))
            .map(|cell| cell.grid_pos)
            .collect()
    }

    #[test]
    fn dimensions_include_spare_edge_cells() {
        let g = grid();
        assert_eq!(g.columns(), 26);
        assert_eq!(g.rows(), 21);

        let odd = SpatialGrid::new(810.0, 650.0, 32.0, rgba(0.0, 0.0, 0.0, 1.0));
        assert_eq!(odd.columns(), 27);
        assert_eq!(odd.rows(), 22);
    }

    #[test]
    fn cells_know_their_surface_position() {
        let g = grid();
        let cell = g.cell(GridPosition { column: 3, row: 2 }).expect("in range");
        assert_eq!(cell.surface_pos, Vector2::new(96.0, 64.0));
        assert!(g.cell(GridPosition { column: 26, row: 0 }).is_none());
    }

    #[test]
    fn position_maps_by_floor() {
        let g = grid();
        assert_eq!(g.cell_position(Vector2::new(0.0, 0.0)), Some(GridPosition { column: 0, row: 0 }));
        assert_eq!(g.cell_position(Vector2::new(31.9, 32.0)), Some(GridPosition { column: 0, row: 1 }));
        assert_eq!(g.cell_position(Vector2::new(800.0, 640.0)), Some(GridPosition { column: 25, row: 20 }));
        assert_eq!(g.cell_position(Vector2::new(-0.1, 5.0)), None);
        assert_eq!(g.cell_position(Vector2::new(5.0, 900.0)), None);
    }

    #[test]
    fn coarse_bucketing_places_each_boid_once() {
        let boids = random_boids(300);
        let mut g = grid();
        g.rebuild(&boids, Partition::Coarse);

        for (i, boid) in boids.iter().enumerate() {
            let holding = cells_holding(&g, i);
            let expected = GridPosition {
                column: (boid.pos.x / 32.0).floor() as usize,
                row: (boid.pos.y / 32.0).floor() as usize,
            };
            assert_eq!(holding, vec![expected]);
        }
    }

    #[test]
    fn neighbour_aware_bucketing_is_bounded() {
        let boids = random_boids(300);
        let mut g = grid();
        g.rebuild(&boids, Partition::NeighbourAware);

        for (i, boid) in boids.iter().enumerate() {
            let holding = cells_holding(&g, i);
            assert!(!holding.is_empty() && holding.len() <= 9);
            assert!(holding.contains(&g.cell_position(boid.pos).expect("in bounds")));
            // No duplicates inside a single cell
            for at in &holding {
                let cell = g.cell(*at).expect("in range");
                assert_eq!(cell.members.iter().filter(|&&m| m == i).count(), 1);
            }
        }
    }

    #[test]
    fn boid_straddling_a_corner_touches_four_cells() {
        let mut g = grid();
        let added = g.insert_with_neighbours(0, Vector2::new(64.0, 64.0), 5.0);
        assert_eq!(added, 4);
        assert_eq!(g.occupied_cells(), 4);
    }

    #[test]
    fn boid_in_cell_middle_touches_one_cell() {
        let mut g = grid();
        assert_eq!(g.insert_with_neighbours(0, Vector2::new(48.0, 48.0), 5.0), 1);
    }

    #[test]
    fn rebuild_discards_previous_membership() {
        let mut boids = random_boids(10);
        let mut g = grid();
        g.rebuild(&boids, Partition::Coarse);
        boids.truncate(2);
        g.rebuild(&boids, Partition::Coarse);
        let total: usize = g.iter().map(|c| c.members.len()).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn heat_map_scales_with_occupancy() {
        let mut g = grid();
        let a = GridPosition { column: 0, row: 0 };
        for i in 0..2 {
            g.insert(i, Vector2::new(10.0, 10.0));
        }
        for i in 2..10 {
            g.insert(i, Vector2::new(40.0, 10.0));
        }
        let (black, white) = (rgba(0.0, 0.0, 0.0, 1.0), rgba(1.0, 1.0, 1.0, 1.0));
        g.colour_heat_map(black, white, Partition::NeighbourAware.heat_normalisation());

        let half = g.cell(a).expect("in range").colour;
        assert!(colour::approx_eq(&half, &rgba(0.5, 0.5, 0.5, 1.0)));
        let saturated = g.cell(GridPosition { column: 1, row: 0 }).expect("in range").colour;
        assert!(colour::approx_eq(&saturated, &white));
        let empty = g.cell(GridPosition { column: 5, row: 5 }).expect("in range").colour;
        assert!(colour::approx_eq(&empty, &black));

        let blue = rgba(0.0, 0.0, 1.0, 1.0);
        g.colour_flat(blue);
        assert!(g.iter().all(|c| colour::approx_eq(&c.colour, &blue)));
    }

    #[test]
    fn normalisation_per_partition() {
        assert_eq!(Partition::Coarse.heat_normalisation(), 32.0);
        assert_eq!(Partition::NeighbourAware.heat_normalisation(), 4.0);
        assert_eq!(Partition::default(), Partition::NeighbourAware);
    }
}
