//! JSON-lines body state persistence
//!
//! One JSON object per line, fields `mass, radius, color, posX, posY,
//! velX, velY`. Loading is best-effort and never transactional: a
//! malformed line is skipped with a logged warning and the rest of the
//! file still loads. All numeric fields are truncated to their integer
//! part on load.

use std::io::{BufRead, Write};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::simulation::states::{Body, Vec2};

/// Wire form of one persisted body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyRecord {
    pub mass: f64,
    pub radius: f64,
    pub color: String,
    #[serde(rename = "posX")]
    pub pos_x: f64,
    #[serde(rename = "posY")]
    pub pos_y: f64,
    #[serde(rename = "velX")]
    pub vel_x: f64,
    #[serde(rename = "velY")]
    pub vel_y: f64,
}

impl BodyRecord {
    pub fn from_body(body: &Body) -> Self {
        Self {
            mass: body.mass(),
            radius: body.radius(),
            color: body.color.clone(),
            pos_x: body.position.x,
            pos_y: body.position.y,
            vel_x: body.velocity.x,
            vel_y: body.velocity.y,
        }
    }

    /// Rebuild a live body; fails if the persisted mass/radius violate
    /// the positivity invariant.
    pub fn into_body(self) -> Result<Body, SimError> {
        Body::new(
            self.mass,
            self.radius,
            Vec2::new(self.pos_x, self.pos_y),
            self.color,
            Vec2::new(self.vel_x, self.vel_y),
        )
    }

    fn truncated(mut self) -> Self {
        self.mass = self.mass.trunc();
        self.radius = self.radius.trunc();
        self.pos_x = self.pos_x.trunc();
        self.pos_y = self.pos_y.trunc();
        self.vel_x = self.vel_x.trunc();
        self.vel_y = self.vel_y.trunc();
        self
    }
}

/// Write one record per line for every body in the iterator.
pub fn write_state<'a, W, I>(writer: &mut W, bodies: I) -> std::io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Body>,
{
    for body in bodies {
        let record = BodyRecord::from_body(body);
        // a record is a flat struct of primitives, serialization cannot fail
        let line = serde_json::to_string(&record).map_err(std::io::Error::other)?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

/// Parse records line by line, skipping malformed ones with a warning.
/// Numeric fields come back truncated to integers.
pub fn read_state<R: BufRead>(reader: R) -> std::io::Result<Vec<BodyRecord>> {
    let mut records = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<BodyRecord>(&line) {
            Ok(record) => records.push(record.truncated()),
            Err(err) => {
                let err = SimError::Deserialization(err);
                warn!("line {}: {err}", lineno + 1);
            }
        }
    }
    Ok(records)
}
