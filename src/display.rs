use tokio::sync::watch;

use crate::app::DisplaySnapshot;
use crate::gesture::Gesture;
use crate::source::FrameInfo;

/// Status text shown for a snapshot.
pub fn status_line(snapshot: &DisplaySnapshot<FrameInfo>) -> String {
    match &snapshot.frame {
        Some(frame) => match frame.timestamp_ms {
            Some(ms) => format!("Hand is: {} (frame {}, {ms} ms)", snapshot.gesture, frame.index),
            None => format!("Hand is: {} (frame {})", snapshot.gesture, frame.index),
        },
        None => format!("Hand is: {}", snapshot.gesture),
    }
}

/// Read-only display consumer. Wakes on each publish, skips intermediate
/// values it missed, and prints only when the gesture changes.
pub async fn run_display(mut snapshots: watch::Receiver<DisplaySnapshot<FrameInfo>>) {
    let mut shown: Option<Gesture> = None;
    while snapshots.changed().await.is_ok() {
        let snapshot = snapshots.borrow_and_update().clone();
        if shown != Some(snapshot.gesture) {
            shown = Some(snapshot.gesture);
            log::info!("{}", status_line(&snapshot));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_status_line() {
        let snapshot = DisplaySnapshot {
            gesture: Gesture::Closed,
            frame: Some(Arc::new(FrameInfo {
                index: 9,
                timestamp_ms: None,
            })),
            sequence: 10,
        };
        assert_eq!(status_line(&snapshot), "Hand is: closed (frame 9)");

        let snapshot = DisplaySnapshot {
            gesture: Gesture::Open,
            frame: Some(Arc::new(FrameInfo {
                index: 12,
                timestamp_ms: Some(400),
            })),
            sequence: 13,
        };
        assert_eq!(status_line(&snapshot), "Hand is: open (frame 12, 400 ms)");

        let snapshot = DisplaySnapshot::<FrameInfo>::default();
        assert_eq!(status_line(&snapshot), "Hand is: none");
    }
}
