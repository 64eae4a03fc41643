//! Landmark source adapter.
//!
//! The hand landmark model runs outside this process. It writes one JSON
//! object per video frame, which this module reads on a dedicated delivery
//! thread and feeds straight into the [`FramePipeline`]:
//!
//! ```text
//! {"frame": 12, "timestamp_ms": 400, "hands": [[{"joint": "index_tip", "x": 0.41, "y": 0.22, "confidence": 0.93}, ...]]}
//! ```
//!
//! An absent or empty `hands` list means no hand was detected. Points with an
//! unrecognized joint name or malformed fields are dropped; the rest of the
//! frame is still classified.

use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::app::{AppEvent, FramePipeline};
use crate::config::Config;
use crate::gesture::{HandLandmarks, LandmarkPoint};

/// Frame metadata carried through to the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameInfo {
    pub index: u64,
    pub timestamp_ms: Option<u64>,
}

/// One line of source input.
#[derive(Debug, Clone, Deserialize)]
pub struct FrameRecord {
    pub frame: u64,
    #[serde(default)]
    pub timestamp_ms: Option<u64>,
    #[serde(default)]
    pub hands: Vec<Vec<serde_json::Value>>,
}

impl FrameRecord {
    /// Split into frame metadata and the first detected hand, if any.
    pub fn into_parts(self, flip_vertical: bool) -> (FrameInfo, Option<HandLandmarks>) {
        let info = FrameInfo {
            index: self.frame,
            timestamp_ms: self.timestamp_ms,
        };
        if self.hands.len() > 1 {
            log::trace!("Frame {} has {} hands, using the first", self.frame, self.hands.len());
        }
        let frame = self.frame;
        let hand = self.hands.into_iter().next().map(|points| {
            let total = points.len();
            let mut hand: HandLandmarks = points
                .into_iter()
                .filter_map(|p| serde_json::from_value::<LandmarkPoint>(p).ok())
                .collect();
            if hand.len() < total {
                log::trace!("Frame {frame}: dropped {} unusable point(s)", total - hand.len());
            }
            if flip_vertical {
                hand.flip_vertical();
            }
            hand
        });
        (info, hand)
    }
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<FrameRecord>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

#[derive(Debug, Clone, PartialEq)]
pub enum SourceInput {
    Stdin,
    File(PathBuf),
}

impl SourceInput {
    /// `None` or `-` reads stdin.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None | Some("-") => Self::Stdin,
            Some(path) => Self::File(PathBuf::from(path)),
        }
    }

    /// Name used in log lines.
    pub fn label(&self) -> String {
        match self {
            Self::Stdin => "stdin".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }

    pub fn open(&self) -> io::Result<Box<dyn BufRead + Send>> {
        match self {
            Self::Stdin => Ok(Box::new(BufReader::new(io::stdin()))),
            Self::File(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SourceOptions {
    pub flip_vertical: bool,
    pub frame_interval: Option<Duration>,
}

impl From<&Config> for SourceOptions {
    fn from(config: &Config) -> Self {
        Self {
            flip_vertical: config.flip_vertical,
            frame_interval: config
                .replay_fps
                .filter(|fps| fps.is_finite() && *fps > 0.0)
                .and_then(|fps| Duration::try_from_secs_f64(1.0 / fps).ok()),
        }
    }
}

/// Deliver every frame from `reader` to the pipeline in order. Stops at end
/// of input or when the pipeline is shut down. Returns frames delivered.
pub fn deliver_frames<R: BufRead>(
    reader: R,
    pipeline: &mut FramePipeline<FrameInfo>,
    options: SourceOptions,
) -> io::Result<u64> {
    let mut delivered = 0;
    for (line_no, line) in reader.lines().enumerate() {
        if pipeline.is_stopped() {
            break;
        }
        let line = line?;
        let record = match parse_line(&line) {
            Ok(Some(record)) => record,
            Ok(None) => continue,
            Err(e) => {
                log::warn!("Skipping malformed frame on line {}: {e}", line_no + 1);
                continue;
            }
        };
        let (info, hand) = record.into_parts(options.flip_vertical);
        pipeline.on_frame(info, hand.as_ref());
        delivered += 1;

        if let Some(interval) = options.frame_interval {
            std::thread::sleep(interval);
        }
    }
    Ok(delivered)
}

/// Start the delivery thread. It owns the pipeline and shuts it down when the
/// input ends, then reports [`AppEvent::SourceEnded`].
pub fn start_source(
    label: String,
    reader: Box<dyn BufRead + Send>,
    mut pipeline: FramePipeline<FrameInfo>,
    options: SourceOptions,
    events: async_channel::Sender<AppEvent>,
) -> io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("landmark-source".into())
        .spawn(move || {
            log::info!("Reading landmarks from {label}");
            let result = deliver_frames(reader, &mut pipeline, options);
            pipeline.shutdown();

            let reason = match result {
                Ok(frames) => {
                    log::info!(
                        "Delivered {frames} frames, {} processed",
                        pipeline.frames_processed()
                    );
                    None
                }
                Err(e) => Some(format!("{label}: {e}")),
            };
            let _ = events.send_blocking(AppEvent::SourceEnded(reason));
        })
}

/// JSON for one hand with all four fingertips at `tip_y` and knuckles at 0.5.
#[cfg(test)]
pub(crate) fn hand_json(tip_y: f32) -> String {
    let fingers = ["index", "middle", "ring", "little"];
    let points: Vec<String> = fingers
        .iter()
        .flat_map(|f| {
            [
                format!(r#"{{"joint":"{f}_mcp","x":0.5,"y":0.5,"confidence":0.9}}"#),
                format!(r#"{{"joint":"{f}_tip","x":0.5,"y":{tip_y},"confidence":0.9}}"#),
            ]
        })
        .collect();
    format!("[{}]", points.join(","))
}
