//! termUI Installer Library
//!
//! Fetches the termUI sources from GitHub, unpacks them with the platform's
//! archive tool and copies the termUI folder to a location the user picks.

pub mod commands;
pub mod core;
pub mod error;
pub mod utils;
