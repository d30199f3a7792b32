//! Replayable drawing scripts.
//!
//! A [`Script`] is a named list of [`Command`]s stored as JSON. Colors are
//! written as packed `0xRRGGBBAA` integers and converted to the target
//! image's backend when the script runs.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::adjust;
use crate::color::{PixelFormat, Rgba};
use crate::draw;
use crate::error::{ImageError, Result};
use crate::image::Image;

/// One operation on an image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Fill {
        color: Rgba,
    },
    Pset {
        x: i32,
        y: i32,
        color: Rgba,
    },
    Line {
        from: (i32, i32),
        to: (i32, i32),
        color: Rgba,
    },
    Circle {
        center: (i32, i32),
        radius: i32,
        color: Rgba,
        #[serde(default)]
        filled: bool,
    },
    Rectangle {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Rgba,
        #[serde(default)]
        filled: bool,
    },
    Triangle {
        vertices: [(i32, i32); 3],
        color: Rgba,
        #[serde(default)]
        filled: bool,
    },
    Flood {
        x: i32,
        y: i32,
        color: Rgba,
    },
    Brightness {
        delta: f32,
    },
    Contrast {
        factor: f32,
    },
    Saturation {
        delta: f32,
    },
    Resize {
        width: u32,
        height: u32,
    },
    Rotate {
        degrees: f32,
    },
    Clip {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
}

impl Command {
    /// Run this command against `image`.
    ///
    /// Only the geometric transforms can fail; on failure `image` is left
    /// as it was.
    pub fn apply<C: PixelFormat>(&self, image: &mut Image<C>) -> Result<()> {
        let ink = |color: &Rgba| C::from_packed(color.0);
        match self {
            Command::Fill { color } => image.fill(ink(color)),
            Command::Pset { x, y, color } => image.set(*x, *y, ink(color)),
            Command::Line { from, to, color } => {
                draw::line(image, from.0, from.1, to.0, to.1, ink(color));
            }
            Command::Circle {
                center,
                radius,
                color,
                filled,
            } => draw::circle(image, center.0, center.1, *radius, ink(color), *filled),
            Command::Rectangle {
                x,
                y,
                width,
                height,
                color,
                filled,
            } => draw::rectangle(image, *x, *y, *width, *height, ink(color), *filled),
            Command::Triangle {
                vertices: [a, b, c],
                color,
                filled,
            } => draw::triangle(image, *a, *b, *c, ink(color), *filled),
            Command::Flood { x, y, color } => draw::flood(image, *x, *y, ink(color)),
            Command::Brightness { delta } => adjust::brightness(image, *delta),
            Command::Contrast { factor } => adjust::contrast(image, *factor),
            Command::Saturation { delta } => adjust::saturation(image, *delta),
            Command::Resize { width, height } => image.resize(*width, *height)?,
            Command::Rotate { degrees } => image.rotate(*degrees)?,
            Command::Clip {
                x,
                y,
                width,
                height,
            } => image.clip(*x, *y, *width, *height)?,
        }
        Ok(())
    }
}

/// A named sequence of commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub name: String,
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl Script {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: Command) -> &mut Self {
        self.commands.push(command);
        self
    }

    /// Run every command in order, stopping at the first failure
    pub fn apply<C: PixelFormat>(&self, image: &mut Image<C>) -> Result<()> {
        debug!("running script '{}' ({} commands)", self.name, self.commands.len());
        for (i, command) in self.commands.iter().enumerate() {
            command.apply(image).map_err(|e| {
                debug!("script '{}' stopped at command {i}: {e}", self.name);
                e
            })?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save script to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| ImageError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load script from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ImageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::new("untitled")
    }
}
