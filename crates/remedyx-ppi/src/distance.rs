//! All-pairs shortest-path distance computation.
//!
//! One breadth-first traversal per gene present in the graph, writing edge
//! counts into that gene's matrix row. Genes absent from the graph keep
//! their sentinel-only row (diagonal excepted). The sweep is parallelized
//! across sources: every source owns exactly one row, so writes never
//! overlap. In an unweighted graph BFS from A discovering B yields the same
//! distance as BFS from B discovering A, so no separate symmetric fill is
//! needed.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::info;

use crate::graph::PpiGraph;
use crate::matrix::{read_cell, write_cell, MatrixWriter, NO_PATH};

/// Log progress every this many completed sources.
const PROGRESS_CHUNK: usize = 100;

/// Fill the matrix with all-pairs shortest-path distances.
///
/// `cutoff` limits traversal depth; distances beyond it keep the sentinel.
/// Distances that would collide with the sentinel value itself are never
/// written, so 65535 always means "no path".
pub fn compute_all_pairs(graph: &PpiGraph, writer: &mut MatrixWriter, cutoff: Option<u16>) {
    let n = writer.n();
    let total_sources = graph.node_count();
    match cutoff {
        Some(c) => info!("BFS sweep over {total_sources} sources (cutoff {c})"),
        None => info!("BFS sweep over {total_sources} sources (no cutoff)"),
    }

    let done = AtomicUsize::new(0);
    writer
        .as_bytes_mut()
        .par_chunks_mut(n * 2)
        .enumerate()
        .for_each(|(source, row)| {
            if !graph.contains(source as u32) {
                return;
            }
            bfs_fill(graph, source as u32, cutoff, row);

            let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
            if finished % PROGRESS_CHUNK == 0 || finished == total_sources {
                info!("Processed {finished}/{total_sources} sources");
            }
        });
}

/// Single-source BFS writing distances directly into the source's row.
///
/// The row arrives sentinel-filled with the diagonal already zeroed, so the
/// sentinel doubles as the visited marker.
fn bfs_fill(graph: &PpiGraph, source: u32, cutoff: Option<u16>, row: &mut [u8]) {
    let mut queue: VecDeque<u32> = VecDeque::new();
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        let d = read_cell(row, u as usize);
        if let Some(c) = cutoff {
            if d >= c {
                continue;
            }
        }
        // d + 1 == NO_PATH would be indistinguishable from "no path".
        if d >= NO_PATH - 1 {
            continue;
        }
        for &v in graph.neighbors(u) {
            if read_cell(row, v as usize) == NO_PATH {
                write_cell(row, v as usize, d + 1);
                queue.push_back(v);
            }
        }
    }
}
