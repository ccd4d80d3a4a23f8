//! Simulation core of a tile-based side-scrolling platformer.
//!
//! Pure game logic: no terminal, image or audio I/O happens in this crate's
//! library half. The host feeds input in, receives a [`frame::Frame`] draw
//! list back, and reacts to callbacks through [`host::GameHost`].

pub mod assets;
pub mod config;
pub mod decoration;
pub mod enemy;
pub mod frame;
pub mod geometry;
pub mod host;
pub mod layout;
pub mod level;
pub mod particles;
pub mod player;
pub mod session;
pub mod settings;
pub mod tiles;
