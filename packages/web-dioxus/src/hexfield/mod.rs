//! Hexagon lattice behind every page.
//!
//! Nodes sit on an offset grid, drift slowly around their base position and
//! are pushed along a radial wave centred on the pointer. Everything here is
//! plain geometry; [`canvas`] paints it in the browser.

#[cfg(feature = "web")]
pub mod canvas;

use rand::Rng;
use std::f64::consts::{PI, SQRT_2};

pub const HEX_RADIUS: f64 = 100.0;

pub const PALETTE: [&str; 6] = [
    "rgba(15, 15, 15, 0.65)",
    "rgba(255, 112, 41, 0.55)",
    "rgba(255, 164, 98, 0.45)",
    "rgba(120, 120, 120, 0.4)",
    "rgba(80, 78, 78, 0.55)",
    "rgba(255, 250, 255, 0.55)",
];

pub const CONNECTION_STROKE: &str = "rgba(90, 90, 90, 0.2)";

const WAVE_FREQUENCY: f64 = 0.01;
const WAVE_SPEED: f64 = 0.003;
const WAVE_DECAY: f64 = 240.0;
const WAVE_STRENGTH: f64 = 16.0;
const IDLE_DAMPING: f64 = 0.5;
const MIN_DISTANCE: f64 = 0.001;

/// Outline radius relative to the grid radius, before per-node scaling
const OUTLINE_RATIO: f64 = 0.3;

/// Longest step a single frame may take, in milliseconds
const MAX_FRAME_DELTA: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub row: usize,
    pub col: usize,
    pub base: Point,
    /// Position after the last frame
    pub pos: Point,
    pub drift_radius: f64,
    pub drift_angle: f64,
    pub speed: f64,
    pub scale: f64,
    pub color: &'static str,
}

impl Node {
    fn random(row: usize, col: usize, base: Point, rng: &mut impl Rng) -> Self {
        Self {
            row,
            col,
            base,
            pos: base,
            drift_radius: 4.0 + rng.gen::<f64>() * 4.0,
            drift_angle: rng.gen::<f64>() * PI * 2.0,
            speed: 0.4 + rng.gen::<f64>() * 0.4,
            scale: 0.4 + rng.gen::<f64>() * 0.9,
            color: PALETTE[rng.gen_range(0..PALETTE.len())],
        }
    }

    /// Advance the drift and apply the pointer wave
    fn step(&mut self, pointer: &Pointer, time: f64, delta: f64) {
        self.drift_angle += self.speed * delta / 10_000.0;
        let drifted = Point::new(
            self.base.x + self.drift_angle.cos() * self.drift_radius,
            self.base.y + self.drift_angle.sin() * self.drift_radius,
        );

        let dx = drifted.x - pointer.pos.x;
        let dy = drifted.y - pointer.pos.y;
        let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
        let damping = if pointer.active { 1.0 } else { IDLE_DAMPING };
        let wave = (dist * WAVE_FREQUENCY - time * WAVE_SPEED).sin()
            * (-dist / WAVE_DECAY).exp()
            * damping;

        self.pos = Point::new(
            drifted.x + dx / dist * wave * WAVE_STRENGTH,
            drifted.y + dy / dist * wave * WAVE_STRENGTH,
        );
    }

    pub fn outline(&self, radius: f64) -> [Point; 6] {
        hexagon_vertices(self.pos, radius * OUTLINE_RATIO * self.scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub pos: Point,
    pub active: bool,
}

/// The whole lattice for one viewport size
#[derive(Debug, Clone)]
pub struct HexField {
    width: f64,
    height: f64,
    radius: f64,
    rows: usize,
    cols: usize,
    nodes: Vec<Node>,
    connections: Vec<(usize, usize)>,
    pointer: Pointer,
}

impl HexField {
    pub fn new(width: f64, height: f64, rng: &mut impl Rng) -> Self {
        let mut field = Self {
            width,
            height,
            radius: HEX_RADIUS,
            rows: 0,
            cols: 0,
            nodes: Vec::new(),
            connections: Vec::new(),
            pointer: Pointer {
                pos: Point::new(width / 2.0, height / 2.0),
                active: false,
            },
        };
        field.build(rng);
        field
    }

    /// Rebuild the grid for a new viewport; the pointer keeps its state
    pub fn resize(&mut self, width: f64, height: f64, rng: &mut impl Rng) {
        self.width = width;
        self.height = height;
        self.build(rng);
    }

    fn build(&mut self, rng: &mut impl Rng) {
        let r = self.radius;
        let horizontal = SQRT_2 * r;
        let vertical = r;

        self.nodes.clear();
        self.rows = 0;
        self.cols = 0;

        let mut y = -r;
        while y < self.height + r {
            let row = self.rows;
            let offset = (row % 2) as f64 * horizontal / 2.0;

            let mut col = 0;
            let mut x = -horizontal;
            while x < self.width + horizontal {
                let base = Point::new(x + offset, y);
                self.nodes.push(Node::random(row, col, base, rng));
                x += horizontal;
                col += 1;
            }

            self.cols = col;
            self.rows += 1;
            y += vertical;
        }

        self.connections = self.link();
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    fn link(&self) -> Vec<(usize, usize)> {
        let mut connections = Vec::new();

        for node in &self.nodes {
            let (r, c) = (node.row, node.col);
            let Some(from) = self.index(r, c) else {
                continue;
            };

            let (south_east, south_west) = if r % 2 == 1 {
                (self.index(r + 1, c + 1), self.index(r + 1, c))
            } else {
                (
                    self.index(r + 1, c),
                    c.checked_sub(1).and_then(|west| self.index(r + 1, west)),
                )
            };

            for to in [self.index(r, c + 1), south_east, south_west]
                .into_iter()
                .flatten()
            {
                connections.push((from, to));
            }
        }

        connections
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = Pointer {
            pos: Point::new(x, y),
            active: true,
        };
    }

    pub fn pointer_leave(&mut self) {
        self.pointer = Pointer {
            pos: Point::new(self.width / 2.0, self.height / 2.0),
            active: false,
        };
    }

    /// Advance one animation frame; `time` and `delta` are in milliseconds
    pub fn step(&mut self, time: f64, delta: f64) {
        let pointer = self.pointer;
        for node in &mut self.nodes {
            node.step(&pointer, time, delta);
        }
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, row: usize, col: usize) -> Option<&Node> {
        self.index(row, col).map(|i| &self.nodes[i])
    }

    /// Connected node pairs at their current positions
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.connections
            .iter()
            .map(|&(a, b)| (self.nodes[a].pos, self.nodes[b].pos))
    }

    pub fn is_connected(&self, from: (usize, usize), to: (usize, usize)) -> bool {
        match (self.index(from.0, from.1), self.index(to.0, to.1)) {
            (Some(a), Some(b)) => self.connections.contains(&(a, b)),
            _ => false,
        }
    }
}

/// Milliseconds between two frame timestamps; a tab resumed after a pause
/// advances by at most one capped step
pub fn frame_delta(last: f64, now: f64) -> f64 {
    (now - last).clamp(0.0, MAX_FRAME_DELTA)
}

/// Pointy-top hexagon: vertex k sits at `k * 60° + 30°`
pub fn hexagon_vertices(center: Point, radius: f64) -> [Point; 6] {
    std::array::from_fn(|k| {
        let angle = PI * 2.0 / 6.0 * k as f64 + PI / 6.0;
        Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )
    })
}
