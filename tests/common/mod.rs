#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;

use getforce_shooter::entities::Rect;
use getforce_shooter::input::{FrameInput, InputSource};
use getforce_shooter::render::{Anchor, Canvas, Rgb};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Clear(Rgb),
    Rect(Rect, Rgb),
    Polygon(Vec<(i32, i32)>, Rgb),
    Circle((i32, i32), i32, Rgb),
    Text((i32, i32), Anchor, String, Rgb),
}

/// Canvas that remembers every primitive; `present` closes a frame.
#[derive(Default)]
pub struct RecordingCanvas {
    pub calls: Vec<Call>,
    pub frames: Vec<Vec<Call>>,
}

impl RecordingCanvas {
    pub fn texts(calls: &[Call]) -> Vec<String> {
        calls
            .iter()
            .filter_map(|c| match c {
                Call::Text(_, _, s, _) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn current_texts(&self) -> Vec<String> {
        Self::texts(&self.calls)
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, color: Rgb) {
        self.calls.clear();
        self.calls.push(Call::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.calls.push(Call::Rect(rect, color));
    }

    fn fill_polygon(&mut self, points: &[(i32, i32)], color: Rgb) {
        self.calls.push(Call::Polygon(points.to_vec(), color));
    }

    fn fill_circle(&mut self, center: (i32, i32), radius: i32, color: Rgb) {
        self.calls.push(Call::Circle(center, radius, color));
    }

    fn text(&mut self, pos: (i32, i32), anchor: Anchor, text: &str, color: Rgb) {
        self.calls.push(Call::Text(pos, anchor, text.to_string(), color));
    }

    fn present(&mut self) -> io::Result<()> {
        self.frames.push(std::mem::take(&mut self.calls));
        Ok(())
    }
}

/// Plays back a fixed list of frames, then keeps sending quit.
pub struct ScriptedInput {
    frames: VecDeque<FrameInput>,
    pub polled: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<FrameInput>) -> Self {
        ScriptedInput {
            frames: frames.into(),
            polled: 0,
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> io::Result<FrameInput> {
        self.polled += 1;
        Ok(self.frames.pop_front().unwrap_or_else(FrameInput::quitting))
    }
}
