//! Terminal Snake: a snake steered around a bounded board, growing on food
//! and dying on walls or its own body.
//!
//! The gameplay core (`position`, `snake`, `board`, `game`) is free of any
//! terminal code. `driver` runs the single control loop against the
//! [`input::InputSource`] and [`render::Renderer`] seams, which `term`
//! implements with crossterm.

pub mod board;
pub mod config;
pub mod driver;
pub mod error;
pub mod game;
pub mod input;
pub mod position;
pub mod render;
pub mod snake;
pub mod term;

pub type TermInt = u16;
pub type Coords = (u16, u16);

pub use error::{Error, Result};
