// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Application configuration.
//!
//! This module manages the application configuration file. Timing values
//! are stored as plain integer milliseconds so that the on-disk format
//! stays hand-editable.

use serde::{Deserialize, Serialize};

use crate::input::buttons::DEFAULT_BUTTON_INTERVALS_MS;
use crate::seek::DECELERATED_INTERVALS_MS;

const CONFIG_NAME: &str = "tenfoot";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub version: u32,
    /// Key-repeat schedule, consumed back to front while a key is held.
    pub button_intervals_ms: Vec<u64>,
    /// Slower repeat schedule applied near the end of the media.
    pub decelerated_intervals_ms: Vec<u64>,
    /// Seconds skipped by a tap of a seek key.
    pub skip_seconds: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            button_intervals_ms: DEFAULT_BUTTON_INTERVALS_MS.to_vec(),
            decelerated_intervals_ms: DECELERATED_INTERVALS_MS.to_vec(),
            skip_seconds: 10.0,
        }
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

pub fn save_config(cfg: &AppConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}
