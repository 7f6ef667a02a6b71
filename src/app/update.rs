/// Pure state transitions for the screen
use crate::app::model::{
    Cmd, Focus, ImagePhase, LookupPhase, Model, Msg, EMPTY_ID_MESSAGE, ENTRANCE_ANIMATION_MS,
    RANDOM_ERROR_MESSAGE, TICK_INTERVAL_MS, TRANSPORT_ERROR_MESSAGE,
};
use crate::domain::Asteroid;
use crate::errors::ApiError;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Apply one message to the model and return the side effects to run.
pub fn update(model: &mut Model, msg: Msg) -> Vec<Cmd> {
    match msg {
        Msg::Key(key) => handle_key(model, key),
        Msg::Tick => {
            advance_tick(model);
            Vec::new()
        }
        Msg::LookupDone { id, outcome } => apply_lookup(model, id, outcome),
        Msg::RandomPicked { outcome } => apply_random(model, outcome),
        Msg::ImageDone { image } => {
            model.image = ImagePhase::Done(image);
            Vec::new()
        }
    }
}

fn handle_key(model: &mut Model, key: KeyEvent) -> Vec<Cmd> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            model.quit = true;
            Vec::new()
        }
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => start_random(model),
        (KeyCode::Char('o'), KeyModifiers::CONTROL) => open_reference(model),
        (KeyCode::Tab, _) => {
            toggle_focus(model);
            Vec::new()
        }
        (KeyCode::Esc, _) => {
            if model.focus == Focus::Recent {
                model.focus = Focus::Input;
            } else {
                model.quit = true;
            }
            Vec::new()
        }
        _ => match model.focus {
            Focus::Input => input_key(model, key),
            Focus::Recent => recent_key(model, key),
        },
    }
}

fn input_key(model: &mut Model, key: KeyEvent) -> Vec<Cmd> {
    match key.code {
        KeyCode::Enter => submit(model),
        KeyCode::Backspace => {
            model.input.pop();
            Vec::new()
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            model.input.push(c);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn recent_key(model: &mut Model, key: KeyEvent) -> Vec<Cmd> {
    match key.code {
        KeyCode::Left => {
            model.recent_selected = model.recent_selected.saturating_sub(1);
            Vec::new()
        }
        KeyCode::Right => {
            if model.recent_selected + 1 < model.history.len() {
                model.recent_selected += 1;
            }
            Vec::new()
        }
        KeyCode::Enter => activate_recent(model),
        _ => Vec::new(),
    }
}

/// Validate and start a lookup for the typed identifier. A fresh submit
/// clears the record on display; reloads via random or recent do not.
fn submit(model: &mut Model) -> Vec<Cmd> {
    if model.is_loading() {
        return Vec::new();
    }
    let id = model.input.trim().to_string();
    if id.is_empty() {
        model.error = Some(EMPTY_ID_MESSAGE.to_string());
        return Vec::new();
    }
    model.asteroid = None;
    model.animation = 0.0;
    begin_lookup(model, id)
}

fn begin_lookup(model: &mut Model, id: String) -> Vec<Cmd> {
    model.error = None;
    model.lookup = LookupPhase::Loading;
    vec![Cmd::Lookup { id }]
}

fn start_random(model: &mut Model) -> Vec<Cmd> {
    if model.is_loading() {
        return Vec::new();
    }
    model.error = None;
    model.lookup = LookupPhase::Loading;
    vec![Cmd::PickRandom]
}

fn open_reference(model: &mut Model) -> Vec<Cmd> {
    match &model.asteroid {
        Some(asteroid) => vec![Cmd::OpenUrl {
            url: asteroid.nasa_jpl_url.clone(),
        }],
        None => Vec::new(),
    }
}

fn toggle_focus(model: &mut Model) {
    match model.focus {
        Focus::Input if !model.history.is_empty() => {
            model.focus = Focus::Recent;
            model.recent_selected = model.recent_selected.min(model.history.len() - 1);
        }
        Focus::Recent => model.focus = Focus::Input,
        Focus::Input => {}
    }
}

fn activate_recent(model: &mut Model) -> Vec<Cmd> {
    let id = match model.history.get(model.recent_selected) {
        Some(id) => id.to_string(),
        None => return Vec::new(),
    };
    model.input = id.clone();
    model.focus = Focus::Input;
    begin_lookup(model, id)
}

fn apply_lookup(model: &mut Model, id: String, outcome: Result<Asteroid, ApiError>) -> Vec<Cmd> {
    match outcome {
        Ok(asteroid) => {
            let name = asteroid.name.clone();
            model.history.record(&id);
            model.asteroid = Some(asteroid);
            model.lookup = LookupPhase::Success;
            model.error = None;
            model.animation = 0.0;
            model.image = ImagePhase::Loading;
            vec![Cmd::FetchImage { name }]
        }
        Err(ApiError::NotFound(message)) => {
            model.asteroid = None;
            model.lookup = LookupPhase::NotFound;
            model.error = Some(message);
            Vec::new()
        }
        Err(_) => {
            model.asteroid = None;
            model.lookup = LookupPhase::TransportError;
            model.error = Some(TRANSPORT_ERROR_MESSAGE.to_string());
            Vec::new()
        }
    }
}

fn apply_random(model: &mut Model, outcome: Result<String, ApiError>) -> Vec<Cmd> {
    match outcome {
        Ok(id) => {
            model.input = id.clone();
            begin_lookup(model, id)
        }
        Err(_) => {
            model.lookup = LookupPhase::TransportError;
            model.error = Some(RANDOM_ERROR_MESSAGE.to_string());
            Vec::new()
        }
    }
}

fn advance_tick(model: &mut Model) {
    model.spinner_frame = model.spinner_frame.wrapping_add(1);
    if model.asteroid.is_some() && model.animation < 1.0 {
        let step = TICK_INTERVAL_MS as f32 / ENTRANCE_ANIMATION_MS as f32;
        model.animation = (model.animation + step).min(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn sample_asteroid(id: &str) -> Asteroid {
        Asteroid {
            id: id.to_string(),
            name: format!("({})", id),
            nasa_jpl_url: format!("https://ssd.jpl.nasa.gov/?sstr={}", id),
            is_potentially_hazardous_asteroid: false,
            estimated_diameter: None,
            close_approach_data: Vec::new(),
        }
    }

    fn type_text(model: &mut Model, text: &str) {
        for c in text.chars() {
            update(model, Msg::Key(key(KeyCode::Char(c))));
        }
    }

    #[test]
    fn test_typing_and_backspace_edit_input() {
        let mut model = Model::default();
        type_text(&mut model, "354");
        update(&mut model, Msg::Key(key(KeyCode::Backspace)));
        assert_eq!(model.input, "35");
    }

    #[test]
    fn test_empty_submit_blocks_with_message() {
        let mut model = Model::default();
        let cmds = update(&mut model, Msg::Key(key(KeyCode::Enter)));
        assert!(cmds.is_empty());
        assert_eq!(model.error.as_deref(), Some(EMPTY_ID_MESSAGE));
        assert_eq!(model.lookup, LookupPhase::Idle);
    }

    #[test]
    fn test_whitespace_submit_blocks_and_keeps_record() {
        let mut model = Model {
            input: "   ".to_string(),
            asteroid: Some(sample_asteroid("3542519")),
            ..Model::default()
        };
        let cmds = update(&mut model, Msg::Key(key(KeyCode::Enter)));
        assert!(cmds.is_empty());
        assert_eq!(model.error.as_deref(), Some(EMPTY_ID_MESSAGE));
        assert!(model.asteroid.is_some());
    }

    #[test]
    fn test_submit_trims_and_clears_previous_record() {
        let mut model = Model {
            input: "  3542519  ".to_string(),
            asteroid: Some(sample_asteroid("2000433")),
            error: Some("old banner".to_string()),
            ..Model::default()
        };
        let cmds = update(&mut model, Msg::Key(key(KeyCode::Enter)));
        assert_eq!(
            cmds,
            vec![Cmd::Lookup {
                id: "3542519".to_string()
            }]
        );
        assert!(model.asteroid.is_none());
        assert!(model.error.is_none());
        assert!(model.is_loading());
    }

    #[test]
    fn test_lookup_success_records_history_and_requests_image() {
        let mut model = Model {
            lookup: LookupPhase::Loading,
            ..Model::default()
        };
        let cmds = update(
            &mut model,
            Msg::LookupDone {
                id: "3542519".to_string(),
                outcome: Ok(sample_asteroid("3542519")),
            },
        );
        assert_eq!(
            cmds,
            vec![Cmd::FetchImage {
                name: "(3542519)".to_string()
            }]
        );
        assert_eq!(model.lookup, LookupPhase::Success);
        assert!(!model.is_loading());
        assert_eq!(model.history.items(), ["3542519"]);
        assert_eq!(model.image, ImagePhase::Loading);
        assert_eq!(model.animation, 0.0);
    }

    #[test]
    fn test_lookup_not_found_shows_server_message() {
        let mut model = Model {
            lookup: LookupPhase::Loading,
            ..Model::default()
        };
        let cmds = update(
            &mut model,
            Msg::LookupDone {
                id: "999999".to_string(),
                outcome: Err(ApiError::NotFound(
                    "Asteroid with id 999999 was not found".to_string(),
                )),
            },
        );
        assert!(cmds.is_empty());
        assert_eq!(model.lookup, LookupPhase::NotFound);
        assert_eq!(
            model.error.as_deref(),
            Some("Asteroid with id 999999 was not found")
        );
        assert!(model.asteroid.is_none());
        assert!(model.history.is_empty());
    }

    #[test]
    fn test_lookup_transport_failure_shows_generic_message() {
        let mut model = Model {
            lookup: LookupPhase::Loading,
            ..Model::default()
        };
        let cmds = update(
            &mut model,
            Msg::LookupDone {
                id: "3542519".to_string(),
                outcome: Err(ApiError::Internal("status 500".to_string())),
            },
        );
        assert!(cmds.is_empty());
        assert_eq!(model.lookup, LookupPhase::TransportError);
        assert_eq!(model.error.as_deref(), Some(TRANSPORT_ERROR_MESSAGE));
        assert!(!model.is_loading());
    }

    #[test]
    fn test_random_requests_pick_and_keeps_record() {
        let mut model = Model {
            asteroid: Some(sample_asteroid("2000433")),
            ..Model::default()
        };
        let cmds = update(&mut model, Msg::Key(ctrl('r')));
        assert_eq!(cmds, vec![Cmd::PickRandom]);
        assert!(model.is_loading());
        assert!(model.asteroid.is_some());
    }

    #[test]
    fn test_random_ignored_while_loading() {
        let mut model = Model {
            lookup: LookupPhase::Loading,
            ..Model::default()
        };
        let cmds = update(&mut model, Msg::Key(ctrl('r')));
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_submit_ignored_while_loading() {
        let mut model = Model {
            input: "3542519".to_string(),
            lookup: LookupPhase::Loading,
            asteroid: Some(sample_asteroid("2000433")),
            ..Model::default()
        };
        let cmds = update(&mut model, Msg::Key(key(KeyCode::Enter)));
        assert!(cmds.is_empty());
        assert!(model.is_loading());
        assert!(model.error.is_none());
        assert!(model.asteroid.is_some());
    }

    #[test]
    fn test_random_pick_fills_input_and_chains_lookup() {
        let mut model = Model {
            lookup: LookupPhase::Loading,
            ..Model::default()
        };
        let cmds = update(
            &mut model,
            Msg::RandomPicked {
                outcome: Ok("2000433".to_string()),
            },
        );
        assert_eq!(model.input, "2000433");
        assert_eq!(
            cmds,
            vec![Cmd::Lookup {
                id: "2000433".to_string()
            }]
        );
        assert!(model.is_loading());
    }

    #[test]
    fn test_random_pick_failure_keeps_record_and_sets_banner() {
        let mut model = Model {
            lookup: LookupPhase::Loading,
            asteroid: Some(sample_asteroid("2000433")),
            ..Model::default()
        };
        let cmds = update(
            &mut model,
            Msg::RandomPicked {
                outcome: Err(ApiError::Internal("browse returned an empty page".into())),
            },
        );
        assert!(cmds.is_empty());
        assert_eq!(model.error.as_deref(), Some(RANDOM_ERROR_MESSAGE));
        assert!(model.asteroid.is_some());
        assert!(!model.is_loading());
    }

    #[test]
    fn test_image_done_never_touches_banner() {
        let mut model = Model {
            error: Some(TRANSPORT_ERROR_MESSAGE.to_string()),
            image: ImagePhase::Loading,
            ..Model::default()
        };
        let cmds = update(
            &mut model,
            Msg::ImageDone {
                image: crate::domain::DisplayImage::Fallback,
            },
        );
        assert!(cmds.is_empty());
        assert_eq!(model.error.as_deref(), Some(TRANSPORT_ERROR_MESSAGE));
        assert_eq!(
            model.image,
            ImagePhase::Done(crate::domain::DisplayImage::Fallback)
        );
    }

    #[test]
    fn test_late_completion_still_lands() {
        // No supersession: a slow response arriving after the phase moved on
        // still overwrites the screen.
        let mut model = Model::default();
        update(
            &mut model,
            Msg::LookupDone {
                id: "3542519".to_string(),
                outcome: Ok(sample_asteroid("3542519")),
            },
        );
        assert_eq!(model.lookup, LookupPhase::Success);
        assert!(model.asteroid.is_some());
    }

    #[test]
    fn test_tab_needs_history_to_focus_chips() {
        let mut model = Model::default();
        update(&mut model, Msg::Key(key(KeyCode::Tab)));
        assert_eq!(model.focus, Focus::Input);

        model.history.record("3542519");
        update(&mut model, Msg::Key(key(KeyCode::Tab)));
        assert_eq!(model.focus, Focus::Recent);
        update(&mut model, Msg::Key(key(KeyCode::Tab)));
        assert_eq!(model.focus, Focus::Input);
    }

    #[test]
    fn test_recent_selection_clamps_at_edges() {
        let mut model = Model::default();
        model.history.record("1");
        model.history.record("2");
        update(&mut model, Msg::Key(key(KeyCode::Tab)));

        update(&mut model, Msg::Key(key(KeyCode::Left)));
        assert_eq!(model.recent_selected, 0);
        update(&mut model, Msg::Key(key(KeyCode::Right)));
        assert_eq!(model.recent_selected, 1);
        update(&mut model, Msg::Key(key(KeyCode::Right)));
        assert_eq!(model.recent_selected, 1);
    }

    #[test]
    fn test_recent_activation_reloads_without_clearing_record() {
        let mut model = Model {
            asteroid: Some(sample_asteroid("2000433")),
            ..Model::default()
        };
        model.history.record("3542519");
        update(&mut model, Msg::Key(key(KeyCode::Tab)));
        let cmds = update(&mut model, Msg::Key(key(KeyCode::Enter)));

        assert_eq!(model.input, "3542519");
        assert_eq!(model.focus, Focus::Input);
        assert_eq!(
            cmds,
            vec![Cmd::Lookup {
                id: "3542519".to_string()
            }]
        );
        assert!(model.asteroid.is_some());
        assert!(model.is_loading());
    }

    #[test]
    fn test_open_reference_needs_a_record() {
        let mut model = Model::default();
        assert!(update(&mut model, Msg::Key(ctrl('o'))).is_empty());

        model.asteroid = Some(sample_asteroid("3542519"));
        let cmds = update(&mut model, Msg::Key(ctrl('o')));
        assert_eq!(
            cmds,
            vec![Cmd::OpenUrl {
                url: "https://ssd.jpl.nasa.gov/?sstr=3542519".to_string()
            }]
        );
    }

    #[test]
    fn test_escape_quits_from_input_focus() {
        let mut model = Model::default();
        update(&mut model, Msg::Key(key(KeyCode::Esc)));
        assert!(model.quit);
    }

    #[test]
    fn test_escape_leaves_chip_focus_without_quitting() {
        let mut model = Model::default();
        model.history.record("3542519");
        update(&mut model, Msg::Key(key(KeyCode::Tab)));
        update(&mut model, Msg::Key(key(KeyCode::Esc)));
        assert_eq!(model.focus, Focus::Input);
        assert!(!model.quit);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let mut model = Model {
            lookup: LookupPhase::Loading,
            ..Model::default()
        };
        update(&mut model, Msg::Key(ctrl('c')));
        assert!(model.quit);
    }

    #[test]
    fn test_tick_animates_only_with_a_record() {
        let mut model = Model::default();
        update(&mut model, Msg::Tick);
        assert_eq!(model.animation, 0.0);
        assert_eq!(model.spinner_frame, 1);

        model.asteroid = Some(sample_asteroid("3542519"));
        for _ in 0..7 {
            update(&mut model, Msg::Tick);
        }
        assert_eq!(model.animation, 1.0);
    }

    #[test]
    fn test_chip_keys_do_not_type_into_input() {
        let mut model = Model::default();
        model.history.record("3542519");
        update(&mut model, Msg::Key(key(KeyCode::Tab)));
        update(&mut model, Msg::Key(key(KeyCode::Char('x'))));
        assert_eq!(model.input, "");
    }
}
