//! Distance matrix store.
//!
//! On-disk format: a flat, row-major array of N*N unsigned 16-bit
//! little-endian integers with no header. N and the row stride come from
//! the companion gene index CSV, never from the file itself. The sentinel
//! 65535 means "no path / unreachable / too far".
//!
//! The write path allocates the file at full size, fills every cell with
//! the sentinel, zeroes the diagonal, and lets the distance computer fill
//! rows in place. The read path memory-maps the file so resident memory is
//! bounded by the rows actually touched, not the matrix size; any number of
//! concurrent readers is safe because the written file is immutable.

use std::fs::{File, OpenOptions};
use std::path::Path;

use memmap2::{Mmap, MmapMut};
use tracing::info;

use remedyx_common::{RemedyxError, Result};

/// Sentinel distance: no path between the two genes.
pub const NO_PATH: u16 = u16::MAX;

/// Bytes per matrix cell.
const CELL: usize = 2;

#[inline]
pub(crate) fn read_cell(row: &[u8], j: usize) -> u16 {
    u16::from_le_bytes([row[j * CELL], row[j * CELL + 1]])
}

#[inline]
pub(crate) fn write_cell(row: &mut [u8], j: usize, value: u16) {
    row[j * CELL..(j + 1) * CELL].copy_from_slice(&value.to_le_bytes());
}

// ---------------------------------------------------------------------------
// Write path
// ---------------------------------------------------------------------------

/// Writable, memory-mapped N x N distance matrix backing file.
pub struct MatrixWriter {
    mmap: MmapMut,
    n: usize,
}

impl MatrixWriter {
    /// Create the backing file sized exactly `n * n * 2` bytes, initialize
    /// every cell to [`NO_PATH`], and zero the diagonal for every universe
    /// gene (graph membership does not matter for self-distance).
    pub fn allocate(path: &Path, n: usize) -> Result<Self> {
        if n == 0 {
            return Err(RemedyxError::EmptyUniverse);
        }
        let bytes = n
            .checked_mul(n)
            .and_then(|cells| cells.checked_mul(CELL))
            .ok_or_else(|| {
                RemedyxError::Config(format!("matrix of {n} genes overflows the addressable size"))
            })?;

        info!(
            "Allocating distance matrix: {n} x {n} u16 ({bytes} bytes) at {}",
            path.display()
        );

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        file.set_len(bytes as u64)?;

        let mut mmap = unsafe { MmapMut::map_mut(&file)? };

        // 0xFF in every byte is the u16 sentinel in every cell.
        mmap.fill(0xFF);
        for i in 0..n {
            write_cell(&mut mmap[i * n * CELL..(i + 1) * n * CELL], i, 0);
        }

        Ok(Self { mmap, n })
    }

    /// Matrix dimension N.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Raw bytes of the whole matrix, for row-partitioned parallel fills.
    ///
    /// Row i occupies `bytes[i * n * 2 .. (i + 1) * n * 2]`.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.mmap
    }

    /// Flush all written rows to disk. Must succeed before the matrix is
    /// usable; a half-written matrix is indistinguishable from a corrupt
    /// one.
    pub fn finish(self) -> Result<()> {
        self.mmap.flush()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Read path
// ---------------------------------------------------------------------------

/// Read-only, memory-mapped distance matrix.
#[derive(Debug)]
pub struct DistanceMatrix {
    mmap: Mmap,
    n: usize,
}

impl DistanceMatrix {
    /// Open a matrix produced by [`MatrixWriter`]. `n` must come from the
    /// companion gene index; a file whose size disagrees is rejected.
    pub fn open(path: &Path, n: usize) -> Result<Self> {
        let file = File::open(path)?;
        let expected = (n * n * CELL) as u64;
        let actual = file.metadata()?.len();
        if actual != expected {
            return Err(RemedyxError::Config(format!(
                "distance matrix {} is {actual} bytes, expected {expected} for {n} genes",
                path.display()
            )));
        }
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self { mmap, n })
    }

    /// Matrix dimension N.
    pub fn n(&self) -> usize {
        self.n
    }

    fn check(&self, index: usize) -> Result<()> {
        if index >= self.n {
            return Err(RemedyxError::IndexOutOfRange {
                index,
                len: self.n,
            });
        }
        Ok(())
    }

    /// Point lookup of the distance between genes i and j.
    pub fn get(&self, i: usize, j: usize) -> Result<u16> {
        self.check(i)?;
        self.check(j)?;
        Ok(read_cell(&self.mmap[i * self.n * CELL..], j))
    }

    /// All distances from gene i, in index order.
    pub fn row(&self, i: usize) -> Result<MatrixRow<'_>> {
        self.check(i)?;
        Ok(MatrixRow {
            bytes: &self.mmap[i * self.n * CELL..(i + 1) * self.n * CELL],
            n: self.n,
        })
    }
}

/// A borrowed matrix row.
#[derive(Clone, Copy)]
pub struct MatrixRow<'a> {
    bytes: &'a [u8],
    n: usize,
}

impl MatrixRow<'_> {
    /// Distance to gene j.
    pub fn get(&self, j: usize) -> Result<u16> {
        if j >= self.n {
            return Err(RemedyxError::IndexOutOfRange { index: j, len: self.n });
        }
        Ok(read_cell(self.bytes, j))
    }

    /// Iterate all distances in index order.
    pub fn values(&self) -> impl Iterator<Item = u16> + '_ {
        self.bytes
            .chunks_exact(CELL)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
    }
}
