/// Screen state and the messages that drive it
use crate::domain::{Asteroid, DisplayImage, RecentSearches};
use crate::errors::ApiError;
use crossterm::event::KeyEvent;

/// Shown when the user submits an empty identifier.
pub const EMPTY_ID_MESSAGE: &str = "Asteroid ID cannot be empty!";
/// Shown when a lookup fails for transport or decode reasons.
pub const TRANSPORT_ERROR_MESSAGE: &str = "Error fetching data. Please try again.";
/// Shown when the random pick itself fails.
pub const RANDOM_ERROR_MESSAGE: &str = "Error fetching random asteroid.";

/// How often the runtime emits a tick.
pub const TICK_INTERVAL_MS: u64 = 50;
/// How long the record entrance animation runs.
pub const ENTRANCE_ANIMATION_MS: u64 = 300;

/// Everything that can happen to the screen.
#[derive(Debug)]
pub enum Msg {
    Key(KeyEvent),
    Tick,
    LookupDone {
        id: String,
        outcome: Result<Asteroid, ApiError>,
    },
    RandomPicked {
        outcome: Result<String, ApiError>,
    },
    ImageDone {
        image: DisplayImage,
    },
}

/// Side effects requested by an update step. The runtime executes these;
/// the update logic itself stays pure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    Lookup { id: String },
    PickRandom,
    FetchImage { name: String },
    OpenUrl { url: String },
}

/// Outcome of the current lookup cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LookupPhase {
    #[default]
    Idle,
    Loading,
    Success,
    NotFound,
    TransportError,
}

/// Progress of the decorative image attached to the current record.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum ImagePhase {
    #[default]
    Idle,
    Loading,
    Done(DisplayImage),
}

/// Which part of the screen receives key input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Input,
    Recent,
}

#[derive(Debug, Default, Clone)]
pub struct Model {
    /// Text in the identifier field, exactly as typed.
    pub input: String,
    pub lookup: LookupPhase,
    /// The record on display, if any. Survives a random or recent-search
    /// reload until the replacement arrives.
    pub asteroid: Option<Asteroid>,
    /// Current banner text, if any.
    pub error: Option<String>,
    pub image: ImagePhase,
    pub history: RecentSearches,
    pub focus: Focus,
    /// Index of the highlighted recent-search chip.
    pub recent_selected: usize,
    /// Entrance animation progress, 0.0 to 1.0.
    pub animation: f32,
    /// Free-running counter for the loading spinner.
    pub spinner_frame: usize,
    pub quit: bool,
}

impl Model {
    pub fn is_loading(&self) -> bool {
        self.lookup == LookupPhase::Loading
    }
}
