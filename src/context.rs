// BearPixel
// copyright bear_pixel developers 2025

//! Context carries the game-wide values a game object may read while it
//! updates or draws: screen size, elapsed time, the stage counter and the
//! input snapshot. It is the non-owning way from a node back to its game;
//! the scene hands it to every update and draw call.

use crate::event::{Event, InputState};

#[derive(Debug, Clone)]
pub struct Context {
    pub game_name: String,
    pub width: usize,
    pub height: usize,
    /// ms since the first frame, starts at -1 like a fresh game
    pub elapsed: f64,
    pub time_scale: f64,
    /// frames run so far
    pub stage: u32,
    /// read-only snapshot for the current frame
    pub input: InputState,
    /// raw events collected since the last frame
    pub input_events: Vec<Event>,
}

impl Context {
    pub fn new(name: &str, width: usize, height: usize) -> Self {
        Self {
            game_name: name.to_string(),
            width,
            height,
            elapsed: -1.0,
            time_scale: 1.0,
            stage: 0,
            input: InputState::new(),
            input_events: vec![],
        }
    }

    /// Fold the collected events into the input snapshot, once per frame.
    pub fn refresh_input(&mut self) {
        self.input.apply(&self.input_events);
        self.input_events.clear();
    }
}
