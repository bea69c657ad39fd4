use glam::{I64Vec2, Vec2};

/// Marks a key with no entries in `start_indices`.
pub const EMPTY: usize = usize::MAX;

const HASH_K1: i64 = 15823;
const HASH_K2: i64 = 9737333;

/// 3x3 neighborhood, self cell included.
const CELL_OFFSETS: [I64Vec2; 9] = [
    I64Vec2::new(-1, -1),
    I64Vec2::new(0, -1),
    I64Vec2::new(1, -1),
    I64Vec2::new(-1, 0),
    I64Vec2::new(0, 0),
    I64Vec2::new(1, 0),
    I64Vec2::new(-1, 1),
    I64Vec2::new(0, 1),
    I64Vec2::new(1, 1),
];

/// One particle's slot in the sorted lookup table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridEntry {
    pub particle_index: usize,
    pub cell_key: usize,
    pub cell_hash: i64,
}

/// Spatial hash grid for bounded neighbor queries.
///
/// The bucket count equals the particle count, so unrelated cells regularly
/// share a key. Entries keep the full hash and queries compare it, which makes
/// those collisions harmless. The table never grows.
pub struct SpatialHashGrid {
    cell_size: f32,
    inv_cell_size: f32,
    /// Entries sorted by `cell_key`
    entries: Vec<GridEntry>,
    /// start_indices[key] = first slot in `entries` holding `key`, or `EMPTY`
    start_indices: Vec<usize>,
}

impl SpatialHashGrid {
    /// Create an empty grid. `cell_size` should equal the smoothing radius.
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            entries: Vec::new(),
            start_indices: Vec::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Change the cell size. Takes effect on the next `build`.
    pub fn set_cell_size(&mut self, cell_size: f32) {
        self.cell_size = cell_size;
        self.inv_cell_size = 1.0 / cell_size;
    }

    /// Rebuild everything from `positions`. Nothing carries over from the
    /// previous build.
    pub fn build(&mut self, positions: &[Vec2]) {
        let count = positions.len();

        self.entries.clear();
        self.entries.reserve(count);
        for (i, &pos) in positions.iter().enumerate() {
            let hash = hash_cell(self.cell_coords(pos));
            self.entries.push(GridEntry {
                particle_index: i,
                cell_key: key_from_hash(hash, count),
                cell_hash: hash,
            });
        }

        self.entries.sort_unstable_by_key(|e| e.cell_key);

        self.start_indices.clear();
        self.start_indices.resize(count, EMPTY);

        let mut prev_key = EMPTY;
        for (slot, entry) in self.entries.iter().enumerate() {
            if entry.cell_key != prev_key {
                self.start_indices[entry.cell_key] = slot;
            }
            prev_key = entry.cell_key;
        }
    }

    /// Candidates in the 3x3 block of cells around `pos`, including any
    /// particle sitting exactly at `pos`. No distance filtering is done.
    pub fn neighbors(&self, pos: Vec2) -> Neighbors<'_> {
        Neighbors {
            grid: self,
            origin: self.cell_coords(pos),
            offset: 0,
            cursor: None,
        }
    }

    /// Convert world position to cell coordinates. Out-of-range values
    /// saturate and NaN lands in cell 0.
    #[inline]
    pub fn cell_coords(&self, pos: Vec2) -> I64Vec2 {
        I64Vec2::new(
            (pos.x * self.inv_cell_size).floor() as i64,
            (pos.y * self.inv_cell_size).floor() as i64,
        )
    }

    /// Number of entries from the last build.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted entries from the last build.
    pub fn entries(&self) -> &[GridEntry] {
        &self.entries
    }

    /// Start table from the last build, indexed by key.
    pub fn start_indices(&self) -> &[usize] {
        &self.start_indices
    }
}

/// Cell coordinate -> hash. Not collision free.
#[inline]
pub fn hash_cell(cell: I64Vec2) -> i64 {
    cell.x
        .wrapping_mul(HASH_K1)
        .wrapping_add(cell.y.wrapping_mul(HASH_K2))
}

/// Reduce a hash to a bucket in `0..table_size`. Negative hashes wrap around.
#[inline]
pub fn key_from_hash(hash: i64, table_size: usize) -> usize {
    if table_size == 0 {
        return 0;
    }
    hash.rem_euclid(table_size as i64) as usize
}

/// Iterator over the neighbor candidates of one query.
///
/// Cheap to clone, so a caller can walk the same candidates twice.
#[derive(Clone)]
pub struct Neighbors<'a> {
    grid: &'a SpatialHashGrid,
    origin: I64Vec2,
    /// Next entry of `CELL_OFFSETS` to open
    offset: usize,
    /// (slot in entries, key, hash) of the bucket being scanned
    cursor: Option<(usize, usize, i64)>,
}

impl Iterator for Neighbors<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let entries = &self.grid.entries;
        loop {
            if let Some((slot, key, hash)) = self.cursor {
                match entries.get(slot) {
                    Some(entry) if entry.cell_key == key => {
                        self.cursor = Some((slot + 1, key, hash));
                        if entry.cell_hash == hash {
                            return Some(entry.particle_index);
                        }
                        continue;
                    }
                    _ => self.cursor = None,
                }
            }

            let offset = *CELL_OFFSETS.get(self.offset)?;
            self.offset += 1;

            // Saturated cells at the edge of i64 wrap instead of overflowing.
            let hash = hash_cell(self.origin.wrapping_add(offset));
            let key = key_from_hash(hash, entries.len());
            let start = self.grid.start_indices.get(key).copied().unwrap_or(EMPTY);
            if start != EMPTY {
                self.cursor = Some((start, key, hash));
            }
        }
    }
}
