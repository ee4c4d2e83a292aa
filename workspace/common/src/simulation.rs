use model::DemandLevel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Playback interval suggested to the client, in milliseconds.
pub const DEFAULT_PLAY_SPEED_MS: u32 = 500;

/// One replayed week: model output next to the recorded demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SimulationFrame {
    pub week: i32,
    pub month: String,
    pub predicted_demand: DemandLevel,
    pub actual_demand: DemandLevel,
    /// Confidence rounded to two decimals
    pub confidence: f64,
    /// Whether the prediction equals the recorded demand
    #[serde(rename = "match")]
    pub is_match: bool,
}

/// Week-by-week playback of a historical range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SimulationResponse {
    /// Frames in ascending week order
    pub frames: Vec<SimulationFrame>,
    pub total_frames: usize,
    /// Playback interval in milliseconds
    pub play_speed: u32,
    /// Weeks in range the model could not score
    pub skipped_weeks: Vec<i32>,
}

impl SimulationResponse {
    pub fn new(frames: Vec<SimulationFrame>, skipped_weeks: Vec<i32>) -> Self {
        Self {
            total_frames: frames.len(),
            frames,
            play_speed: DEFAULT_PLAY_SPEED_MS,
            skipped_weeks,
        }
    }

    /// Share of frames whose prediction matched, or `None` without frames.
    pub fn match_rate(&self) -> Option<f64> {
        if self.frames.is_empty() {
            return None;
        }
        let matched = self.frames.iter().filter(|f| f.is_match).count();
        Some(matched as f64 / self.frames.len() as f64)
    }
}
