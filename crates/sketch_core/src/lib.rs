//! `sketch_core` — renderer-agnostic building blocks shared by the sketch
//! geometry crate and by host applications.
//!
//! | Module      | Responsibility                                         |
//! |-------------|--------------------------------------------------------|
//! | `color`     | `Color` with float / 8-bit / grey / named constructors |
//! | `transform` | Per-geometry `TransformStack` and model-matrix folding |
//! | `camera`    | `CameraView` seam + perspective reference `Camera`     |
//! | `config`    | `SketchConfig` loaded from TOML                        |
//! | `logging`   | One-shot `fern` logger initialisation                  |

pub mod camera;
pub mod color;
pub mod config;
pub mod logging;
pub mod transform;

pub use camera::{Camera, CameraView};
pub use color::{Color, ParseColorError};
pub use config::{ConfigError, SketchConfig};
pub use logging::{init_logging, LoggingConfig};
pub use transform::{TransformOp, TransformStack};

// glam is part of the public API (matrices, vectors) so re-export it.
pub use glam;
