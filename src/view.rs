use std::{
    io::{self, stdin, stdout, Write},
    sync::mpsc,
    thread::{self, JoinHandle},
    time::Duration,
};

use termion::{event::Key, input::TermRead, raw::IntoRawMode};

use crate::{pos, Pos, SimHandle, Snapshot};

pub use canvas::Canvas;
mod canvas;

pub struct View {
    thread: JoinHandle<io::Result<()>>,
}

impl View {
    /// Draws snapshots from `handle` every `refresh_interval` until the user
    /// quits, then stops the simulation.
    pub fn spawn(handle: SimHandle, refresh_interval: Duration) -> Self {
        let thread = thread::spawn(move || {
            let result = view_loop(&handle, refresh_interval);
            handle.stop();
            result
        });
        Self { thread }
    }

    pub fn join(self) -> io::Result<()> {
        self.thread.join().unwrap()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCmd {
    Exit,
    Move(Dir),
    TogglePause,
    Accelerate,
    Decelerate,
}

pub fn key_command(key: Key) -> Option<InputCmd> {
    let command = match key {
        Key::Char('q') | Key::Ctrl('c') => InputCmd::Exit,
        Key::Up => InputCmd::Move(Dir::Up),
        Key::Down => InputCmd::Move(Dir::Down),
        Key::Left => InputCmd::Move(Dir::Left),
        Key::Right => InputCmd::Move(Dir::Right),
        Key::Char(' ') => InputCmd::TogglePause,
        Key::Char('+') => InputCmd::Accelerate,
        Key::Char('-') => InputCmd::Decelerate,
        _ => return None,
    };
    Some(command)
}

fn input_loop(sender: mpsc::Sender<InputCmd>) {
    for key in stdin().keys() {
        let Ok(key) = key else { break };
        let Some(command) = key_command(key) else {
            continue;
        };
        if sender.send(command).is_err() {
            break;
        }
    }
}

const PAN_STEP: i32 = 4;

fn view_loop(handle: &SimHandle, refresh_interval: Duration) -> io::Result<()> {
    let mut stdout = stdout().into_raw_mode()?;
    write!(stdout, "{}", termion::cursor::Hide)?;

    let (sender, receiver) = mpsc::channel();
    let _input_handle = thread::spawn(|| input_loop(sender));

    let mut view_origin = pos!(0, 0);
    let result = loop {
        if !handle_inputs(&receiver, handle, &mut view_origin) {
            break Ok(());
        }
        let snapshot = handle.snapshot();
        let frame = Canvas::from_screen()
            .map(|canvas| draw_frame(canvas, view_origin, &snapshot))
            .and_then(|canvas| canvas.display(&mut stdout));
        if let Err(err) = frame {
            break Err(err);
        }
        thread::sleep(refresh_interval);
    };

    let clear = termion::clear::All;
    let home = termion::cursor::Goto(1, 1);
    let show = termion::cursor::Show;
    write!(stdout, "{clear}{home}{show}")?;
    stdout.flush()?;
    result
}

/// Applies pending commands. Returns `false` once the user asked to leave.
fn handle_inputs(
    receiver: &mpsc::Receiver<InputCmd>,
    handle: &SimHandle,
    view_origin: &mut Pos,
) -> bool {
    while let Ok(cmd) = receiver.try_recv() {
        match cmd {
            InputCmd::Exit => return false,
            InputCmd::Move(direction) => *view_origin = *view_origin + pan_offset(direction),
            InputCmd::TogglePause => handle.toggle_pause(),
            InputCmd::Accelerate => handle.accelerate(),
            InputCmd::Decelerate => handle.decelerate(),
        }
    }
    true
}

fn pan_offset(direction: Dir) -> Pos {
    match direction {
        Dir::Up => pos!(-PAN_STEP, 0),
        Dir::Down => pos!(PAN_STEP, 0),
        Dir::Left => pos!(0, -PAN_STEP),
        Dir::Right => pos!(0, PAN_STEP),
    }
}

/// Fills `canvas` with the part of the grid visible from `view_origin`, and
/// a status line below it.
pub fn draw_frame(mut canvas: Canvas, view_origin: Pos, snapshot: &Snapshot) -> Canvas {
    let grid = &snapshot.grid;
    let status_line = canvas.height().saturating_sub(1);
    canvas.layer(|screen_pos| {
        if screen_pos.row as usize >= status_line {
            return None;
        }
        let pos = view_origin + screen_pos;
        match grid.get(pos) {
            Ok(true) => Some('#'),
            Ok(false) => Some('.'),
            Err(_) => None,
        }
    });
    canvas.text(status_line, &status(snapshot));
    canvas
}

pub fn status(snapshot: &Snapshot) -> String {
    let state = match (snapshot.paused, snapshot.cycle) {
        (true, Some(1)) => "stable".to_string(),
        (true, Some(period)) => format!("repeating, period {period}"),
        (true, None) => "paused".to_string(),
        (false, _) => "running".to_string(),
    };
    format!(
        "generation {} | population {} | tick {}ms | {state} | q quit, space pause, +/- speed",
        snapshot.generation,
        snapshot.grid.population(),
        snapshot.tick_interval.as_millis(),
    )
}
