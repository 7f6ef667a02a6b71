/// Interactive screen runtime
pub mod model;
pub mod update;

use crate::app::model::{Cmd, Model, Msg, TICK_INTERVAL_MS};
use crate::app::update::update;
use crate::services::LookupService;
use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const INPUT_POLL_MS: u64 = 100;

/// Forwards completions into the event loop while the screen is alive and
/// silently drops them once it has been torn down.
#[derive(Clone)]
struct CompletionGate {
    tx: UnboundedSender<Msg>,
    live: CancellationToken,
}

impl CompletionGate {
    fn new(tx: UnboundedSender<Msg>, live: CancellationToken) -> Self {
        Self { tx, live }
    }

    fn emit(&self, msg: Msg) {
        if self.live.is_cancelled() {
            debug!("discarding completion that arrived after teardown");
            return;
        }
        let _ = self.tx.send(msg);
    }
}

/// Put the terminal into raw mode, run the screen, and restore the terminal
/// whatever the loop returned.
pub async fn run(service: LookupService) -> anyhow::Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let result = event_loop(&mut terminal, service).await;

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    service: LookupService,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let live = CancellationToken::new();
    let gate = CompletionGate::new(tx, live.clone());
    spawn_input_reader(gate.clone(), live.clone());

    let service = Arc::new(service);
    let mut model = Model::default();
    let mut ticker = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MS));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    info!("screen ready");
    loop {
        terminal
            .draw(|frame| crate::ui::render(frame, &model))
            .context("draw frame")?;

        let msg = tokio::select! {
            received = rx.recv() => match received {
                Some(msg) => msg,
                None => break,
            },
            _ = ticker.tick() => Msg::Tick,
        };

        for cmd in update(&mut model, msg) {
            dispatch(cmd, &service, &gate);
        }

        if model.quit {
            live.cancel();
            break;
        }
    }
    info!("screen torn down");
    Ok(())
}

/// Run one command. Network work is spawned so the loop keeps drawing;
/// results come back through the gate.
fn dispatch(cmd: Cmd, service: &Arc<LookupService>, gate: &CompletionGate) {
    match cmd {
        Cmd::Lookup { id } => {
            let service = Arc::clone(service);
            let gate = gate.clone();
            tokio::spawn(async move {
                let outcome = service.lookup_by_id(&id).await;
                if let Err(err) = &outcome {
                    warn!(%id, error = %err, "lookup failed");
                }
                gate.emit(Msg::LookupDone { id, outcome });
            });
        }
        Cmd::PickRandom => {
            let service = Arc::clone(service);
            let gate = gate.clone();
            tokio::spawn(async move {
                let outcome = service.random_candidate().await;
                if let Err(err) = &outcome {
                    warn!(error = %err, "random pick failed");
                }
                gate.emit(Msg::RandomPicked { outcome });
            });
        }
        Cmd::FetchImage { name } => {
            let service = Arc::clone(service);
            let gate = gate.clone();
            tokio::spawn(async move {
                let image = service.fetch_image(&name).await;
                gate.emit(Msg::ImageDone { image });
            });
        }
        Cmd::OpenUrl { url } => match open::that_detached(&url) {
            Ok(()) => info!(%url, "opened reference URL"),
            Err(err) => warn!(%url, error = %err, "don't know how to open URL"),
        },
    }
}

/// Blocking crossterm reads happen on a plain thread; key presses are fed
/// into the async loop through the gate.
fn spawn_input_reader(gate: CompletionGate, live: CancellationToken) {
    std::thread::spawn(move || {
        while !live.is_cancelled() {
            match event::poll(Duration::from_millis(INPUT_POLL_MS)) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        gate.emit(Msg::Key(key));
                    }
                    Ok(_) => {}
                    Err(err) => {
                        warn!(error = %err, "input read failed");
                        break;
                    }
                },
                Ok(false) => {}
                Err(err) => {
                    warn!(error = %err, "input poll failed");
                    break;
                }
            }
        }
    });
}
