use std::{
    collections::VecDeque,
    sync::mpsc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crate::{error::GridError, Grid};

/// Fate of a single cell under the B3/S23 rule.
pub fn next_state(alive: bool, neighbors: usize) -> bool {
    match (alive, neighbors) {
        (true, n) if n < 2 => false, // underpopulation
        (true, n) if n > 3 => false, // overpopulation
        (true, _) => true,           // survives with 2 or 3
        (false, 3) => true,          // birth
        (false, _) => false,
    }
}

/// Computes the generation following `current` into a freshly allocated grid.
pub fn advance(current: &Grid) -> Grid {
    let mut next = current.clone();
    evolve(current, &mut next);
    next
}

/// Computes the generation following `current` into `next`, which must have
/// the same dimensions. `next` is only read from `current`, never from itself.
pub fn advance_into(current: &Grid, next: &mut Grid) -> Result<(), GridError> {
    if current.dimensions() != next.dimensions() {
        return Err(GridError::DimensionMismatch {
            expected: current.dimensions(),
            found: next.dimensions(),
        });
    }
    evolve(current, next);
    Ok(())
}

fn evolve(current: &Grid, next: &mut Grid) {
    next.clear();
    for pos in current.positions() {
        let alive = current.is_alive(pos);
        let neighbors = current.count_live_neighbors(pos).unwrap_or_default();
        if next_state(alive, neighbors) {
            // positions() only yields in-bounds cells of a same-sized grid
            let _ = next.set(pos, true);
        }
    }
}

/// What the simulation thread reports when asked.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub grid: Grid,
    pub generation: u64,
    pub paused: bool,
    /// Period of the repetition that paused the simulation, if any.
    pub cycle: Option<usize>,
    pub tick_interval: Duration,
}

pub enum SimCmd {
    Snapshot(mpsc::Sender<Snapshot>),
    TogglePause,
    Accelerate,
    Decelerate,
    Stop,
}

#[derive(Clone)]
pub struct SimHandle {
    sender: mpsc::Sender<SimCmd>,
}

impl SimHandle {
    pub fn new(sender: mpsc::Sender<SimCmd>) -> Self {
        Self { sender }
    }

    pub fn snapshot(&self) -> Snapshot {
        let (sender, receiver) = mpsc::channel();
        self.sender.send(SimCmd::Snapshot(sender)).unwrap();
        receiver.recv().unwrap()
    }

    pub fn toggle_pause(&self) {
        self.send(SimCmd::TogglePause);
    }

    pub fn accelerate(&self) {
        self.send(SimCmd::Accelerate);
    }

    pub fn decelerate(&self) {
        self.send(SimCmd::Decelerate);
    }

    pub fn stop(&self) {
        self.send(SimCmd::Stop);
    }

    fn send(&self, cmd: SimCmd) {
        // the simulation may already be gone, nothing left to tell it then
        let _ = self.sender.send(cmd);
    }
}

#[derive(Debug)]
pub struct Sim {
    thread: JoinHandle<()>,
    sender: mpsc::Sender<SimCmd>,
}

impl Sim {
    /// Moves `grid` onto a simulation thread that advances it once per
    /// `tick_interval`.
    pub fn spawn(grid: Grid, tick_interval: Duration) -> Self {
        let state = State::new(grid, tick_interval);
        let (sender, receiver) = mpsc::channel();
        let thread = thread::spawn(move || sim_loop(receiver, state));

        Self { sender, thread }
    }

    pub fn handle(&self) -> SimHandle {
        SimHandle::new(self.sender.clone())
    }

    pub fn join(self) {
        drop(self.sender);
        self.thread.join().unwrap();
    }
}

pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(5);
pub const MAX_TICK_INTERVAL: Duration = Duration::from_secs(2);
const HISTORY_LEN: usize = 10;
const EVT_CHECK_TIMEOUT: Duration = Duration::from_millis(2);

#[derive(Debug)]
struct State {
    current: Grid,
    back: Grid,
    generation: u64,
    paused: bool,
    cycle: Option<usize>,
    tick_interval: Duration,
    history: VecDeque<u64>,
}

impl State {
    fn new(grid: Grid, tick_interval: Duration) -> Self {
        let mut history = VecDeque::with_capacity(HISTORY_LEN);
        history.push_back(grid.fingerprint());
        Self {
            back: grid.clone(),
            current: grid,
            generation: 0,
            paused: false,
            cycle: None,
            tick_interval,
            history,
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.current.clone(),
            generation: self.generation,
            paused: self.paused,
            cycle: self.cycle,
            tick_interval: self.tick_interval,
        }
    }

    fn tick(&mut self) {
        // both buffers come from the same seed grid, so they always match
        if advance_into(&self.current, &mut self.back).is_err() {
            self.back = advance(&self.current);
        }
        std::mem::swap(&mut self.current, &mut self.back);
        self.generation += 1;

        let fingerprint = self.current.fingerprint();
        if let Some(age) = self.history.iter().rev().position(|&h| h == fingerprint) {
            self.cycle = Some(age + 1);
            self.paused = true;
        }
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(fingerprint);
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if !self.paused {
            self.cycle = None;
            self.history.clear();
            self.history.push_back(self.current.fingerprint());
        }
    }

    fn scale_interval(&mut self, faster: bool) {
        let interval = if faster {
            self.tick_interval / 2
        } else {
            self.tick_interval * 2
        };
        self.tick_interval = interval.clamp(MIN_TICK_INTERVAL, MAX_TICK_INTERVAL);
    }
}

fn sim_loop(receiver: mpsc::Receiver<SimCmd>, state: State) {
    let mut state = state;
    let mut last_update = Instant::now();

    loop {
        match receiver.try_recv() {
            Ok(SimCmd::Snapshot(sender)) => {
                let _ = sender.send(state.snapshot());
            }
            Ok(SimCmd::TogglePause) => state.toggle_pause(),
            Ok(SimCmd::Accelerate) => state.scale_interval(true),
            Ok(SimCmd::Decelerate) => state.scale_interval(false),
            Ok(SimCmd::Stop) | Err(mpsc::TryRecvError::Disconnected) => return,
            Err(mpsc::TryRecvError::Empty) => (),
        }

        if !state.paused && last_update.elapsed() >= state.tick_interval {
            state.tick();
            last_update = Instant::now();
        }

        thread::sleep(EVT_CHECK_TIMEOUT);
    }
}
