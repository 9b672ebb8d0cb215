// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Occupancy grid and turn-penalised A* search.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::model::{Point, Rect, Size};

use super::simplify::simplify;

/// Integer grid coordinate; pixel position is `col * step, row * step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCell {
    pub col: i64,
    pub row: i64,
}

impl GridCell {
    pub const fn new(col: i64, row: i64) -> Self {
        Self { col, row }
    }

    fn offset(self, dc: i64, dr: i64) -> Self {
        Self { col: self.col + dc, row: self.row + dr }
    }
}

/// Cells tried, in order, when a search endpoint lands on a blocked cell.
const NUDGE_ORDER: [(i64, i64); 8] =
    [(1, 0), (-1, 0), (0, 1), (0, -1), (2, 0), (-2, 0), (0, 2), (0, -2)];

/// Neighbour moves in expansion order: right, left, down, up.
const MOVES: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Entry directions per cell: "none" (the start) plus one per move.
const DIRS: usize = MOVES.len() + 1;

const NO_PARENT: u32 = u32::MAX;

/// Largest search space (cells times entry directions) [`find_path`] will allocate.
pub const MAX_SEARCH_STATES: usize = 1 << 22;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutingGrid {
    cols: usize,
    rows: usize,
    step: f64,
}

impl RoutingGrid {
    pub fn new(bounds: Size, step: f64) -> Self {
        let cols = (bounds.w / step).ceil().max(0.0) as usize;
        let rows = (bounds.h / step).ceil().max(0.0) as usize;
        Self { cols, rows, step }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.cols.saturating_mul(self.rows)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of (cell, entry direction) search states.
    pub fn states(&self) -> usize {
        self.len().saturating_mul(DIRS)
    }

    /// Nearest grid intersection, halves rounded away from zero.
    pub fn cell_at(&self, point: Point) -> GridCell {
        GridCell::new((point.x / self.step).round() as i64, (point.y / self.step).round() as i64)
    }

    pub fn point_of(&self, cell: GridCell) -> Point {
        Point::new(cell.col as f64 * self.step, cell.row as f64 * self.step)
    }

    fn idx_of(&self, cell: GridCell) -> Option<usize> {
        if cell.col < 0 || cell.row < 0 {
            return None;
        }
        let (col, row) = (cell.col as usize, cell.row as usize);
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(row * self.cols + col)
    }

    fn cell_of(&self, idx: usize) -> GridCell {
        GridCell::new((idx % self.cols) as i64, (idx / self.cols) as i64)
    }

    /// Inclusive cell span covered by `[lo, hi]`, clamped to `limit` cells.
    fn span(lo: f64, hi: f64, step: f64, limit: usize) -> Option<(usize, usize)> {
        let first = (lo / step).floor().max(0.0);
        let last = (hi / step).ceil().min(limit as f64 - 1.0);
        (limit > 0 && first <= last).then(|| (first as usize, last as usize))
    }
}

/// Reusable buffers for [`find_path`].
///
/// Per-state bookkeeping is invalidated by bumping a generation counter instead of clearing,
/// so repeated searches on the same grid size do not reallocate.
#[derive(Debug, Default)]
pub struct SearchScratch {
    grid: Option<RoutingGrid>,
    blocked: Vec<u8>,
    gen: u32,
    cost_gen: Vec<u32>,
    cost: Vec<u32>,
    closed_gen: Vec<u32>,
    came_from: Vec<u32>,
    heap: BinaryHeap<Reverse<(u32, u32, u32)>>,
    cells: Vec<GridCell>,
}

impl SearchScratch {
    pub fn new() -> Self {
        Self::default()
    }

    fn configure(&mut self, grid: RoutingGrid, obstacles: &[Rect]) {
        let len = grid.len();
        let states = len.saturating_mul(DIRS);
        if self.grid != Some(grid) {
            self.grid = Some(grid);
            self.blocked = vec![0u8; len];
            self.cost_gen = vec![0u32; states];
            self.cost = vec![0u32; states];
            self.closed_gen = vec![0u32; states];
            self.came_from = vec![NO_PARENT; states];
        } else {
            self.blocked.fill(0);
        }

        for rect in obstacles {
            self.mark(grid, rect);
        }
    }

    /// Blocks every cell the rectangle touches, partial overlap included.
    fn mark(&mut self, grid: RoutingGrid, rect: &Rect) {
        let Some((c0, c1)) = RoutingGrid::span(rect.x, rect.right(), grid.step, grid.cols) else {
            return;
        };
        let Some((r0, r1)) = RoutingGrid::span(rect.y, rect.bottom(), grid.step, grid.rows) else {
            return;
        };
        for row in r0..=r1 {
            let base = row * grid.cols;
            self.blocked[base + c0..=base + c1].fill(1);
        }
    }

    fn begin(&mut self) -> u32 {
        self.gen = self.gen.wrapping_add(1);
        if self.gen == 0 {
            self.cost_gen.fill(0);
            self.closed_gen.fill(0);
            self.gen = 1;
        }
        self.heap.clear();
        self.cells.clear();
        self.gen
    }

    pub(crate) fn is_passable(&self, cell: GridCell) -> bool {
        let Some(grid) = self.grid else {
            return false;
        };
        grid.idx_of(cell).is_some_and(|idx| self.blocked[idx] == 0)
    }

    /// Moves a blocked endpoint to the first free cell in [`NUDGE_ORDER`]; keeps it otherwise.
    fn nudge(&self, cell: GridCell) -> GridCell {
        if self.is_passable(cell) {
            return cell;
        }
        let nudged = NUDGE_ORDER
            .iter()
            .map(|&(dc, dr)| cell.offset(dc, dr))
            .find(|&candidate| self.is_passable(candidate));
        if nudged.is_none() {
            tracing::debug!(col = cell.col, row = cell.row, "no free cell near blocked endpoint");
        }
        nudged.unwrap_or(cell)
    }

    fn cost_of(&self, state: usize, gen: u32) -> u32 {
        if self.cost_gen[state] == gen {
            self.cost[state]
        } else {
            u32::MAX
        }
    }

    /// A* from `start` to `goal`, leaving the cell path in `self.cells`.
    ///
    /// The start may sit on a blocked cell; every other cell on the path, the goal included,
    /// must be free.
    fn search(&mut self, start: GridCell, goal: GridCell, turn_penalty: u32) -> bool {
        let Some(grid) = self.grid else {
            return false;
        };
        let (Some(start_idx), Some(goal_idx)) = (grid.idx_of(start), grid.idx_of(goal)) else {
            return false;
        };

        let gen = self.begin();
        if start_idx == goal_idx {
            self.cells.push(start);
            return true;
        }

        let heuristic = |cell: GridCell| -> u32 {
            ((cell.col - goal.col).unsigned_abs() + (cell.row - goal.row).unsigned_abs()) as u32
        };

        let start_state = start_idx * DIRS;
        self.cost_gen[start_state] = gen;
        self.cost[start_state] = 0;
        self.came_from[start_state] = NO_PARENT;
        let mut seq = 0u32;
        self.heap.push(Reverse((heuristic(start), seq, start_state as u32)));

        while let Some(Reverse((_, _, state))) = self.heap.pop() {
            let state = state as usize;
            if self.closed_gen[state] == gen {
                continue;
            }
            self.closed_gen[state] = gen;

            let idx = state / DIRS;
            if idx == goal_idx {
                self.reconstruct(grid, state);
                return true;
            }

            let entry = state % DIRS;
            let base_cost = self.cost[state];
            let cell = grid.cell_of(idx);
            for (move_no, &(dc, dr)) in MOVES.iter().enumerate() {
                let next = cell.offset(dc, dr);
                let Some(next_idx) = grid.idx_of(next) else {
                    continue;
                };
                if self.blocked[next_idx] != 0 {
                    continue;
                }

                let dir = move_no + 1;
                let turn = if entry != 0 && entry != dir { turn_penalty } else { 0 };
                let next_cost = base_cost.saturating_add(1).saturating_add(turn);
                let next_state = next_idx * DIRS + dir;
                if self.closed_gen[next_state] == gen || next_cost >= self.cost_of(next_state, gen) {
                    continue;
                }

                self.cost_gen[next_state] = gen;
                self.cost[next_state] = next_cost;
                self.came_from[next_state] = state as u32;
                seq = seq.wrapping_add(1);
                let f = next_cost.saturating_add(heuristic(next));
                self.heap.push(Reverse((f, seq, next_state as u32)));
            }
        }

        false
    }

    fn reconstruct(&mut self, grid: RoutingGrid, goal_state: usize) {
        self.cells.clear();
        let mut cursor = goal_state as u32;
        while cursor != NO_PARENT {
            let state = cursor as usize;
            self.cells.push(grid.cell_of(state / DIRS));
            cursor = self.came_from[state];
        }
        self.cells.reverse();
    }
}

/// Searches a turn-minimising orthogonal path, or `None` when the goal is unreachable, either
/// endpoint lies outside the grid, or the grid exceeds [`MAX_SEARCH_STATES`].
///
/// Blocked endpoints are nudged first. The result is simplified and starts and ends on the
/// (possibly nudged) grid points.
pub fn find_path(
    start: Point,
    goal: Point,
    obstacles: &[Rect],
    bounds: Size,
    step: f64,
    turn_penalty: u32,
    scratch: &mut SearchScratch,
) -> Option<Vec<Point>> {
    let grid = RoutingGrid::new(bounds, step);
    if grid.is_empty() {
        return None;
    }
    if grid.states() > MAX_SEARCH_STATES {
        tracing::debug!(cols = grid.cols(), rows = grid.rows(), "routing grid too large to search");
        return None;
    }
    scratch.configure(grid, obstacles);

    let s = scratch.nudge(grid.cell_at(start));
    let g = scratch.nudge(grid.cell_at(goal));
    if !scratch.search(s, g, turn_penalty) {
        return None;
    }

    let points = scratch.cells.iter().map(|&cell| grid.point_of(cell)).collect::<Vec<_>>();
    Some(simplify(&points))
}

/// Elbow used when no path exists: horizontal to the goal column, then vertical.
pub fn fallback(start: Point, goal: Point) -> Vec<Point> {
    simplify(&[start, Point::new(goal.x, start.y), goal])
}

/// [`find_path`] with the [`fallback`] elbow; always yields a path.
pub fn route_orthogonal(
    start: Point,
    goal: Point,
    obstacles: &[Rect],
    bounds: Size,
    step: f64,
    turn_penalty: u32,
    scratch: &mut SearchScratch,
) -> Vec<Point> {
    match find_path(start, goal, obstacles, bounds, step, turn_penalty, scratch) {
        Some(path) => path,
        None => {
            tracing::debug!(%start, %goal, "no orthogonal route; using fallback elbow");
            fallback(start, goal)
        }
    }
}
