#![no_std]

pub mod animator;
pub mod color;
pub mod frame_scheduler;
pub mod game;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod rng;

pub use animator::{Animator, StateAnimator};
pub use frame_scheduler::FrameScheduler;
pub use game::{GameEngine, GameEngineConfig, GameState, StateTimings};
pub use input::{InputMailbox, InputSample, InputSource};
pub use layout::{Lane, TreeLayout};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to push frames to the LED strip of a given
/// platform. The frame scheduler is generic over it.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
