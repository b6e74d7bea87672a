//! Enemy behavior and encounter-resolution engine for a top-down arena game.
//!
//! The library holds no I/O: the host owns a [`entities::GameState`], feeds
//! it one [`entities::TickInput`] per frame through [`compute::tick`], and
//! renders whatever the state looks like afterwards.

pub mod behavior;
pub mod collision;
pub mod compute;
pub mod config;
pub mod durability;
pub mod entities;
pub mod geometry;
pub mod level;
pub mod logging;
pub mod powerup;
pub mod projectile;
