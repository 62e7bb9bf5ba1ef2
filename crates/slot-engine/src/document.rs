//! JSON availability documents shared by the CLI and WASM bindings.
//!
//! A document carries the query window, every participant's schedule, and an
//! optional list of busy intervals to remove from the mutual result.

use serde::{Deserialize, Serialize};

use crate::availability::{mutual_availability_with_policy, Participant};
use crate::dst::DstPolicy;
use crate::error::Result;
use crate::interval::{parse_timezone, BoundWindow, Interval};
use crate::schedule::AvailabilityItem;
use crate::subtract::subtract;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantDocument {
    /// IANA timezone of the person whose schedule this is.
    #[serde(alias = "timeZone")]
    pub time_zone: String,
    pub availability: Vec<AvailabilityItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityDocument {
    pub window: BoundWindow,
    pub participants: Vec<ParticipantDocument>,
    #[serde(default)]
    pub busy: Vec<Interval>,
}

impl AvailabilityDocument {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve every participant's timezone.
    pub fn participants(&self) -> Result<Vec<Participant>> {
        self.participants
            .iter()
            .map(|p| {
                Ok(Participant::new(
                    parse_timezone(&p.time_zone)?,
                    p.availability.clone(),
                ))
            })
            .collect()
    }

    /// Mutual availability of all participants, with busy time removed.
    pub fn evaluate(&self, policy: DstPolicy) -> Result<Vec<Interval>> {
        let participants = self.participants()?;
        let free = mutual_availability_with_policy(&participants, &self.window, policy);
        let mut slots = subtract(&free, &self.busy);
        slots.sort();
        Ok(slots)
    }
}

/// Input for a bare subtraction: free intervals and the busy ones to remove.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtractionDocument {
    pub source: Vec<Interval>,
    #[serde(default)]
    pub excluded: Vec<Interval>,
}
