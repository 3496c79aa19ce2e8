//! Platform boundary
//!
//! Independent producers (the clock, pointer input, window resizes, quit
//! keys) send [`InputEvent`]s into one [`EventQueue`]. The [`GameLoop`] is
//! the only consumer and applies them to the game state strictly in
//! arrival order, so the simulation is never touched from two threads.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use glam::IVec2;

use crate::sim::{GameState, Orientation, TickKind, TickReport, tick};

/// Everything the simulation loop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Periodic clock; runs one simulation step
    Clock,
    /// The window was resized; redraw only
    Resize,
    /// Primary click on a board tile
    Click { tile: IVec2, orientation: Orientation },
    /// Stop the loop; in-flight state is simply dropped
    Quit,
}

/// Pointer buttons the input layer cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
}

/// Tracks the cursor orientation and turns button presses into events.
/// The cursor starts vertical; the secondary button toggles it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pointer {
    pub orientation: Orientation,
}

impl Pointer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the cursor orientation and return the new one
    pub fn toggle(&mut self) -> Orientation {
        self.orientation = self.orientation.toggled();
        self.orientation
    }

    /// Handle a press on `tile`. Only primary presses become events.
    pub fn press(&mut self, button: Button, tile: IVec2) -> Option<InputEvent> {
        match button {
            Button::Primary => Some(InputEvent::Click {
                tile,
                orientation: self.orientation,
            }),
            Button::Secondary => {
                self.toggle();
                None
            }
        }
    }
}

/// Single ordered stream of input events
pub struct EventQueue {
    sender: Sender<InputEvent>,
    receiver: Receiver<InputEvent>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// A handle for one more producer
    pub fn sender(&self) -> Sender<InputEvent> {
        self.sender.clone()
    }

    /// Split into the consuming end. The queue's own sender is dropped, so
    /// the receiver disconnects once every producer handle is gone.
    pub fn into_receiver(self) -> Receiver<InputEvent> {
        self.receiver
    }
}

/// Send [`InputEvent::Clock`] every `period` until the receiver goes away
pub fn spawn_clock(sender: Sender<InputEvent>, period: Duration) -> JoinHandle<()> {
    thread::spawn(move || {
        loop {
            thread::sleep(period);
            if sender.send(InputEvent::Clock).is_err() {
                log::debug!("Clock stopped: game loop gone");
                break;
            }
        }
    })
}

/// Consumes the event queue and drives the game state
pub struct GameLoop {
    pub state: GameState,
}

impl GameLoop {
    pub fn new(state: GameState) -> Self {
        Self { state }
    }

    /// Apply one event. Returns the tick report for clock and resize events,
    /// `None` for clicks and quit.
    pub fn handle(&mut self, event: InputEvent) -> Option<TickReport> {
        match event {
            InputEvent::Clock => Some(tick(&mut self.state, TickKind::Clock)),
            InputEvent::Resize => Some(tick(&mut self.state, TickKind::Resize)),
            InputEvent::Click { tile, orientation } => {
                if !self.state.try_start_wall(tile, orientation) {
                    log::debug!("Ignored click at ({}, {})", tile.x, tile.y);
                }
                None
            }
            InputEvent::Quit => None,
        }
    }

    /// Process events in arrival order until `Quit` or until every sender
    /// has hung up. `observer` runs after each processed event.
    pub fn run<F>(&mut self, events: &Receiver<InputEvent>, mut observer: F)
    where
        F: FnMut(&GameState, &InputEvent, Option<&TickReport>),
    {
        for event in events.iter() {
            if event == InputEvent::Quit {
                log::info!("Quit at level {}", self.state.level);
                return;
            }
            let report = self.handle(event);
            observer(&self.state, &event, report.as_ref());
        }
        log::info!("Event queue closed");
    }
}
