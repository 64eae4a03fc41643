mod event_handler;
mod pipeline;
mod snapshot;
mod state;
mod worker;

use std::future::Future;
use std::io::{self, BufRead};
use std::sync::Arc;
use std::time::Duration;

pub use event_handler::handle_app_event;
pub use pipeline::FramePipeline;
pub use snapshot::DisplaySnapshot;
pub use state::{AppEvent, AppState};
pub use worker::run_action_worker;

use crate::action::{ActionDispatcher, ActionSink, CommandSink};
use crate::config::Config;
use crate::gesture::{build_tracker, GestureClassifier};
use crate::source::{self, SourceInput, SourceOptions};
use crate::stats::Stats;

/// Run against the configured commands until the source ends or Ctrl-C.
pub async fn run(config: Config, input: SourceInput) -> Result<(), Box<dyn std::error::Error>> {
    let reader = input.open()?;
    let sink = Arc::new(CommandSink::new(config.actions.clone()));
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::warn!("Cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
        log::info!("Interrupted");
    };

    let stats = run_session(config, sink, input.label(), reader, interrupt).await?;
    stats.log_summary();
    Ok(())
}

/// Wire source, pipeline, worker and display together and run until the
/// source ends or `interrupt` resolves.
///
/// On the way out the pipeline stops taking frames and the action queue is
/// closed. The worker gets `shutdown_grace_ms` to finish; after that it is
/// aborted and anything still queued is never performed.
pub async fn run_session(
    config: Config,
    sink: Arc<dyn ActionSink>,
    label: String,
    reader: Box<dyn BufRead + Send>,
    interrupt: impl Future<Output = ()>,
) -> io::Result<Stats> {
    let (events_tx, events_rx) = async_channel::unbounded::<AppEvent>();

    let bindings = config.action_bindings();
    if bindings.is_empty() {
        log::warn!("No transition bindings configured, gestures will not trigger actions");
    } else {
        log::info!("{} transition binding(s) configured", bindings.len());
    }
    let (dispatcher, requests) = ActionDispatcher::new(bindings, config.action_queue_capacity);
    let mut worker = tokio::spawn(run_action_worker(requests, sink, events_tx.clone()));

    let pipeline = FramePipeline::new(
        GestureClassifier::new(config.min_confidence),
        build_tracker(config.debounce_frames),
        dispatcher,
        config.publish_frames,
        events_tx.clone(),
    );
    let shutdown = pipeline.shutdown_handle();
    let snapshots = pipeline.subscribe();
    let display = tokio::spawn(crate::display::run_display(snapshots.clone()));

    let options = SourceOptions::from(&config);
    let source = source::start_source(label, reader, pipeline, options, events_tx)?;

    let mut state = AppState::new(config);
    tokio::pin!(interrupt);

    loop {
        tokio::select! {
            event = events_rx.recv() => match event {
                Ok(event) => {
                    if !handle_app_event(&mut state, event) {
                        break;
                    }
                }
                Err(_) => break,
            },
            _ = &mut interrupt => break,
        }
    }

    shutdown.shutdown();
    let grace = Duration::from_millis(state.config.shutdown_grace_ms);
    if tokio::time::timeout(grace, &mut worker).await.is_err() {
        log::warn!("Abandoning queued actions after {grace:?}");
        worker.abort();
    }
    while let Ok(event) = events_rx.try_recv() {
        handle_app_event(&mut state, event);
    }
    display.abort();

    // The delivery thread may still be blocked reading stdin; only join it
    // if it already finished.
    if source.is_finished() {
        let _ = source.join();
    }

    state.stats.frames = snapshots.borrow().sequence;
    Ok(state.stats)
}
