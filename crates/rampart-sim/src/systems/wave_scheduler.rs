//! Wave scheduler: turns wave definitions into timed spawn requests.
//!
//! Waves start in order once mission time reaches their start time. Each
//! started wave gets a `SpawnTimeline` polled every step; a timeline fires
//! every spawn whose scheduled time has passed, so large ticks never drop
//! spawns.

use rampart_core::config::WaveDef;

/// A request to spawn one enemy.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    pub wave_index: usize,
    pub enemy_kind: String,
    /// Already wrapped into the path set.
    pub path_index: usize,
    /// Scheduled time, which may be earlier than the tick that fires it.
    pub spawn_time: f64,
}

/// Spawn cadence of one started wave.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnTimeline {
    pub wave_index: usize,
    pub start_time: f64,
    pub interval: f64,
    pub enemy_kind: String,
    pub path_index: usize,
    pub fired: u32,
    pub count: u32,
}

impl SpawnTimeline {
    pub fn next_fire_time(&self) -> f64 {
        self.start_time + f64::from(self.fired) * self.interval
    }

    pub fn is_complete(&self) -> bool {
        self.fired >= self.count
    }
}

/// What one scheduler step produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dispatch {
    pub started: Vec<usize>,
    pub spawns: Vec<SpawnRequest>,
    pub completed: Vec<usize>,
    /// Set on the single step at which every wave has started and every
    /// timeline has run out.
    pub exhausted: bool,
}

#[derive(Debug, Clone, Default)]
pub struct WaveScheduler {
    waves: Vec<WaveDef>,
    next_wave_index: usize,
    active_wave_index: Option<usize>,
    timelines: Vec<SpawnTimeline>,
    exhausted_reported: bool,
    cancelled: bool,
}

impl WaveScheduler {
    /// Waves are expected sorted by start time; they are not re-sorted.
    pub fn new(waves: Vec<WaveDef>) -> Self {
        Self {
            waves,
            ..Default::default()
        }
    }

    pub fn waves(&self) -> &[WaveDef] {
        &self.waves
    }

    /// Index of the next wave to start, `None` once all have started.
    pub fn next_wave_index(&self) -> Option<usize> {
        (self.next_wave_index < self.waves.len()).then_some(self.next_wave_index)
    }

    /// Most recently started wave.
    pub fn active_wave_index(&self) -> Option<usize> {
        self.active_wave_index
    }

    pub fn timelines(&self) -> &[SpawnTimeline] {
        &self.timelines
    }

    /// Every wave started and every spawn emitted.
    pub fn is_exhausted(&self) -> bool {
        self.next_wave_index >= self.waves.len() && self.timelines.is_empty()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Drop all pending timers. Further steps do nothing.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.timelines.clear();
    }

    /// Start due waves and fire due spawns at mission time `time`.
    pub fn step(&mut self, time: f64, path_count: usize) -> Dispatch {
        let mut dispatch = Dispatch::default();
        if self.cancelled {
            return dispatch;
        }

        while let Some(wave) = self.waves.get(self.next_wave_index) {
            if time < wave.start_time {
                break;
            }
            let index = self.next_wave_index;
            self.timelines.push(SpawnTimeline {
                wave_index: index,
                start_time: wave.start_time,
                interval: wave.spawn_interval,
                enemy_kind: wave.enemy_kind.clone(),
                path_index: wave.path_index % path_count.max(1),
                fired: 0,
                count: wave.spawn_count,
            });
            self.active_wave_index = Some(index);
            self.next_wave_index += 1;
            dispatch.started.push(index);
        }

        for timeline in &mut self.timelines {
            while !timeline.is_complete() && timeline.next_fire_time() <= time {
                dispatch.spawns.push(SpawnRequest {
                    wave_index: timeline.wave_index,
                    enemy_kind: timeline.enemy_kind.clone(),
                    path_index: timeline.path_index,
                    spawn_time: timeline.next_fire_time(),
                });
                timeline.fired += 1;
            }
            if timeline.is_complete() {
                dispatch.completed.push(timeline.wave_index);
            }
        }
        self.timelines.retain(|t| !t.is_complete());

        if !self.exhausted_reported && self.is_exhausted() {
            self.exhausted_reported = true;
            dispatch.exhausted = true;
        }
        dispatch
    }
}
