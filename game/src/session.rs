use crate::songs::Song;

pub const TARGET_COUNT: usize = 6;

/// Target diameter in pixels; hit radius is half of this.
pub const BUTTON_SIZE: f32 = 200.0;

/// Distance from the window edge to the near side of each cluster.
pub const EDGE_ANCHOR: f32 = 150.0;

pub const HIT_AWARD: u32 = 100;

/// Expected activations per target per second, independent of frame rate.
pub const ACTIVATIONS_PER_TARGET_PER_SEC: f64 = 0.06;

/// Per-tick probability used when the frame rate is unknown.
pub const FALLBACK_ACTIVATION_PROBABILITY: f64 = 0.001;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub center: Vec2,
    pub radius: f32,
    pub lit: bool,
}

impl Target {
    fn at(center: Vec2) -> Self {
        Self {
            center,
            radius: BUTTON_SIZE / 2.0,
            lit: false,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.center.distance(point) <= self.radius
    }
}

/// The six tappable targets: two mirrored arrow-shaped clusters of three,
/// anchored to the left and right window edges at mid-height.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetField {
    targets: [Target; TARGET_COUNT],
}

impl TargetField {
    pub fn new(width: u32, height: u32) -> Self {
        let mut field = Self {
            targets: [Target::at(Vec2::ZERO); TARGET_COUNT],
        };
        field.reposition(width, height);
        field
    }

    /// Recomputes the six centers for the given window size. Lit state is
    /// untouched so a mid-session resize does not clear active targets.
    pub fn reposition(&mut self, width: u32, height: u32) {
        let mid = height as f32 / 2.0;
        let size = BUTTON_SIZE;
        let half = BUTTON_SIZE / 2.0;
        let lx = EDGE_ANCHOR;
        let rx = width as f32 - EDGE_ANCHOR;

        let centers = [
            // Left cluster, arrow pointing right: tip then upper/lower wing.
            Vec2::new(lx + half, mid + half),
            Vec2::new(lx + size + half, mid - size + half),
            Vec2::new(lx + size + half, mid + size + half),
            // Right cluster, mirrored.
            Vec2::new(rx - half, mid + half),
            Vec2::new(rx - size - half, mid - size + half),
            Vec2::new(rx - size - half, mid + size + half),
        ];
        for (target, center) in self.targets.iter_mut().zip(centers) {
            target.center = center;
        }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn is_lit(&self, index: usize) -> bool {
        self.targets.get(index).map(|t| t.lit).unwrap_or(false)
    }

    pub fn lit_count(&self) -> usize {
        self.targets.iter().filter(|t| t.lit).count()
    }

    pub fn light(&mut self, index: usize) {
        if let Some(target) = self.targets.get_mut(index) {
            target.lit = true;
        }
    }

    pub fn unlight(&mut self, index: usize) {
        if let Some(target) = self.targets.get_mut(index) {
            target.lit = false;
        }
    }

    /// Indices of every target whose center lies within the button radius
    /// of `point` (Euclidean distance). Overlapping hits all report.
    pub fn hit_test(&self, point: Vec2) -> Vec<usize> {
        self.targets
            .iter()
            .enumerate()
            .filter(|(_, t)| t.contains(point))
            .map(|(i, _)| i)
            .collect()
    }
}

// Small deterministic generator so sessions replay exactly from a seed.
#[derive(Debug, Clone)]
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        let seed = if seed == 0 {
            0x9E37_79B9_7F4A_7C15
        } else {
            seed
        };
        Self { state: seed }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        (x.wrapping_mul(0x2545_F491_4F6C_DD1D) >> 32) as u32
    }

    fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / f64::from(u32::MAX)
    }

    fn chance(&mut self, probability: f64) -> bool {
        probability > 0.0 && self.next_unit() < probability
    }
}

/// All mutable state for one PLAYING -> GAME_OVER cycle.
///
/// Owned by the app and passed by reference into the loop body; nothing
/// here is global.
#[derive(Debug, Clone)]
pub struct Session {
    song: Song,
    score: u32,
    tick: u64,
    targets: TargetField,
    rng: Rng,
    frame_rate: f64,
}

impl Session {
    pub fn new(song: Song, seed: u64) -> Self {
        Self {
            song,
            score: 0,
            tick: 0,
            targets: TargetField::new(1600, 1200),
            rng: Rng::new(seed),
            frame_rate: 0.0,
        }
    }

    pub fn song(&self) -> &Song {
        &self.song
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn targets(&self) -> &TargetField {
        &self.targets
    }

    pub fn targets_mut(&mut self) -> &mut TargetField {
        &mut self.targets
    }

    pub fn reposition(&mut self, width: u32, height: u32) {
        self.targets.reposition(width, height);
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    pub fn set_frame_rate(&mut self, frame_rate: f64) {
        self.frame_rate = frame_rate;
    }

    /// Per-tick Bernoulli probability for lighting one unlit target:
    /// `rate / fps`, so the expected activation rate per second does not
    /// depend on the video's frame rate.
    pub fn activation_probability(&self) -> f64 {
        if self.frame_rate > 0.0 {
            ACTIVATIONS_PER_TARGET_PER_SEC / self.frame_rate
        } else {
            FALLBACK_ACTIVATION_PROBABILITY
        }
    }

    /// One loop tick: bump the tick counter, then run the activation trial
    /// for every currently unlit target. Returns how many lit this tick.
    pub fn advance_tick(&mut self) -> usize {
        self.tick += 1;
        let probability = self.activation_probability();
        let mut newly_lit = 0;
        for index in 0..TARGET_COUNT {
            if !self.targets.is_lit(index) && self.rng.chance(probability) {
                self.targets.light(index);
                newly_lit += 1;
            }
        }
        newly_lit
    }

    /// Scores one pointer-down event. Every lit target the point lands on
    /// awards `HIT_AWARD` and goes dark; unlit targets ignore the press.
    pub fn handle_press(&mut self, point: Vec2) -> u32 {
        let mut awarded = 0;
        for index in self.targets.hit_test(point) {
            if self.targets.is_lit(index) {
                self.targets.unlight(index);
                awarded += HIT_AWARD;
            }
        }
        self.score += awarded;
        awarded
    }
}
