/// Terminal rendering for the explorer screen
use crate::app::model::{Focus, ImagePhase, Model};
use crate::domain::{next_or_last_approach, ApproachView, Asteroid, DisplayImage};
use crate::utils::{format_quantity, long_date, long_date_str, truncate_chars};
use chrono::Utc;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const SPACE_BLACK: Color = Color::Rgb(10, 10, 15);
const CARD_NAVY: Color = Color::Rgb(26, 26, 46);
const PANEL_NAVY: Color = Color::Rgb(42, 42, 78);
const NEON_GREEN: Color = Color::Rgb(0, 255, 157);
const NEON_PINK: Color = Color::Rgb(255, 0, 229);
const ERROR_RED: Color = Color::Rgb(255, 68, 68);
const ERROR_BG: Color = Color::Rgb(61, 24, 24);
const HAZARD_RED: Color = Color::Rgb(211, 47, 47);
const SAFE_GREEN: Color = Color::Rgb(56, 142, 60);
const TEXT_SOFT: Color = Color::Rgb(187, 187, 187);
const TEXT_DIM: Color = Color::Rgb(153, 153, 153);

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Longest explanation excerpt shown under a resolved image.
const EXPLANATION_LIMIT: usize = 280;

pub fn render(frame: &mut Frame<'_>, model: &Model) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(SPACE_BLACK)),
        area,
    );

    let has_chips = !model.history.is_empty();
    let has_banner = model.error.is_some();

    let mut constraints = vec![
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(1),
    ];
    if has_chips {
        constraints.push(Constraint::Length(1));
    }
    if has_banner {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(area);

    draw_title(frame, chunks[0]);
    draw_input(frame, chunks[1], model);
    draw_actions(frame, chunks[2], model);

    let mut next = 3;
    if has_chips {
        draw_recent(frame, chunks[next], model);
        next += 1;
    }
    if has_banner {
        if let Some(message) = &model.error {
            draw_banner(frame, chunks[next], message);
        }
        next += 1;
    }
    draw_result(frame, chunks[next], model);
    draw_help(frame, chunks[next + 1]);
}

fn draw_title(frame: &mut Frame<'_>, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        "Asteroid Explorer",
        Style::default()
            .fg(NEON_GREEN)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

fn draw_input(frame: &mut Frame<'_>, area: Rect, model: &Model) {
    let border = if model.focus == Focus::Input {
        NEON_GREEN
    } else {
        PANEL_NAVY
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Asteroid ID ");

    let content = if model.input.is_empty() {
        Line::from(Span::styled(
            "Enter Asteroid ID",
            Style::default().fg(TEXT_DIM).add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(Span::styled(
            model.input.clone(),
            Style::default().fg(Color::White),
        ))
    };
    frame.render_widget(
        Paragraph::new(content)
            .style(Style::default().bg(PANEL_NAVY))
            .block(block),
        area,
    );

    if model.focus == Focus::Input {
        let cursor_x = (area.x + 1 + model.input.chars().count() as u16)
            .min(area.x + area.width.saturating_sub(2));
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn draw_actions(frame: &mut Frame<'_>, area: Rect, model: &Model) {
    let line = if model.is_loading() {
        let spinner = SPINNER_FRAMES[model.spinner_frame % SPINNER_FRAMES.len()];
        Line::from(Span::styled(
            format!("{} Searching the catalog…", spinner),
            Style::default().fg(NEON_GREEN),
        ))
    } else {
        Line::from(vec![
            Span::styled("[Enter] Search", Style::default().fg(NEON_GREEN)),
            Span::raw("   "),
            Span::styled("[Ctrl+R] Random Asteroid", Style::default().fg(NEON_PINK)),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_recent(frame: &mut Frame<'_>, area: Rect, model: &Model) {
    let mut spans = vec![Span::styled("Recent: ", Style::default().fg(TEXT_DIM))];
    for (i, id) in model.history.items().iter().enumerate() {
        let selected = model.focus == Focus::Recent && i == model.recent_selected;
        let style = if selected {
            Style::default()
                .fg(SPACE_BLACK)
                .bg(NEON_PINK)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(NEON_GREEN).bg(PANEL_NAVY)
        };
        spans.push(Span::styled(format!(" {} ", id), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_banner(frame: &mut Frame<'_>, area: Rect, message: &str) {
    let banner = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .style(Style::default().bg(ERROR_BG))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ERROR_RED)),
    );
    frame.render_widget(banner, area);
}

fn draw_result(frame: &mut Frame<'_>, area: Rect, model: &Model) {
    match &model.asteroid {
        Some(asteroid) => draw_record_card(frame, area, model, asteroid),
        None if model.is_loading() => {
            let spinner = SPINNER_FRAMES[model.spinner_frame % SPINNER_FRAMES.len()];
            let lines = vec![
                Line::default(),
                Line::from(Span::styled(
                    format!("{} Searching the catalog…", spinner),
                    Style::default().fg(NEON_GREEN),
                )),
            ];
            frame.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center),
                area,
            );
        }
        None => {
            let lines = vec![
                Line::default(),
                Line::from(Span::styled(
                    "Enter an asteroid ID and press Enter.",
                    Style::default().fg(TEXT_DIM),
                )),
                Line::from(Span::styled(
                    "Try 3542519, or Ctrl+R for a random one.",
                    Style::default().fg(TEXT_DIM),
                )),
            ];
            frame.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center),
                area,
            );
        }
    }
}

fn draw_record_card(frame: &mut Frame<'_>, area: Rect, model: &Model, asteroid: &Asteroid) {
    let card_area = entrance_rect(area, model.animation);
    let border = fade(NEON_GREEN, model.animation);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            " Asteroid ",
            Style::default().fg(border).add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(record_lines(model, asteroid))
        .style(Style::default().bg(CARD_NAVY).fg(Color::White))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, card_area);
}

fn record_lines(model: &Model, asteroid: &Asteroid) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        asteroid.name.clone(),
        Style::default()
            .fg(fade(NEON_GREEN, model.animation))
            .add_modifier(Modifier::BOLD),
    )));

    let (hazard_text, hazard_color) = if asteroid.is_potentially_hazardous_asteroid {
        ("! Potentially Hazardous", HAZARD_RED)
    } else {
        ("✓ Not Hazardous", SAFE_GREEN)
    };
    lines.push(Line::from(Span::styled(
        hazard_text,
        Style::default().fg(hazard_color).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());

    push_image_lines(&mut lines, &model.image);

    if let Some(diameter) = &asteroid.estimated_diameter {
        lines.push(label_value(
            "Estimated Diameter: ",
            format!(
                "{:.2} - {:.2} km",
                diameter.kilometers.estimated_diameter_min,
                diameter.kilometers.estimated_diameter_max
            ),
        ));
        lines.push(Line::default());
    }

    push_approach_lines(&mut lines, asteroid);

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "[Ctrl+O] View on NASA JPL →",
        Style::default().fg(NEON_PINK).add_modifier(Modifier::BOLD),
    )));
    lines
}

fn push_image_lines(lines: &mut Vec<Line<'static>>, image: &ImagePhase) {
    match image {
        ImagePhase::Idle => {}
        ImagePhase::Loading => {
            lines.push(Line::from(Span::styled(
                "Fetching picture of the day…",
                Style::default().fg(TEXT_DIM).add_modifier(Modifier::ITALIC),
            )));
            lines.push(Line::default());
        }
        ImagePhase::Done(display) => {
            if let DisplayImage::Resolved { details, .. } = display {
                if !details.title.is_empty() {
                    lines.push(Line::from(Span::styled(
                        details.title.clone(),
                        Style::default()
                            .fg(NEON_GREEN)
                            .add_modifier(Modifier::BOLD),
                    )));
                }
                if !details.date.is_empty() {
                    lines.push(Line::from(Span::styled(
                        long_date_str(&details.date),
                        Style::default().fg(TEXT_DIM),
                    )));
                }
                lines.push(Line::from(Span::styled(
                    format!("© {}", details.copyright),
                    Style::default().fg(TEXT_DIM).add_modifier(Modifier::ITALIC),
                )));
                if !details.explanation.is_empty() {
                    lines.push(Line::from(Span::styled(
                        truncate_chars(&details.explanation, EXPLANATION_LIMIT),
                        Style::default().fg(TEXT_SOFT),
                    )));
                }
            }
            lines.push(label_value("Image: ", display.url().to_string()));
            lines.push(Line::default());
        }
    }
}

fn push_approach_lines(lines: &mut Vec<Line<'static>>, asteroid: &Asteroid) {
    match next_or_last_approach(&asteroid.close_approach_data, Utc::now()) {
        Some(ApproachView::Upcoming {
            approach,
            days_until,
        }) => {
            lines.push(Line::from(Span::styled(
                "Next Approach",
                Style::default().fg(NEON_PINK).add_modifier(Modifier::BOLD),
            )));
            lines.push(label_value(
                "  Date: ",
                long_date(approach.close_approach_date),
            ));
            lines.push(label_value(
                "  Days Until Approach: ",
                format!("{} days", days_until),
            ));
            lines.push(label_value(
                "  Miss Distance: ",
                format!("{} km", format_quantity(&approach.miss_distance.kilometers)),
            ));
            lines.push(label_value(
                "  Relative Velocity: ",
                format!(
                    "{} km/h",
                    format_quantity(&approach.relative_velocity.kilometers_per_hour)
                ),
            ));
        }
        Some(ApproachView::Historical { approach }) => {
            lines.push(Line::from(Span::styled(
                "Last Known Approach",
                Style::default().fg(NEON_PINK).add_modifier(Modifier::BOLD),
            )));
            lines.push(label_value(
                "  Date: ",
                long_date(approach.close_approach_date),
            ));
            lines.push(label_value(
                "  Miss Distance: ",
                format!("{} km", format_quantity(&approach.miss_distance.kilometers)),
            ));
            lines.push(label_value(
                "  Relative Velocity: ",
                format!(
                    "{} km/h",
                    format_quantity(&approach.relative_velocity.kilometers_per_hour)
                ),
            ));
        }
        None => {}
    }
}

fn draw_help(frame: &mut Frame<'_>, area: Rect) {
    let help = Paragraph::new(Line::from(Span::styled(
        "[Enter] search  [Ctrl+R] random  [Tab] recent  [Ctrl+O] open link  [Esc] quit",
        Style::default().fg(TEXT_DIM),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(help, area);
}

fn label_value(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(TEXT_DIM)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

/// Grow the card from 90% to full width as the entrance animation runs.
fn entrance_rect(area: Rect, progress: f32) -> Rect {
    if area.width == 0 {
        return area;
    }
    let pct = 90.0 + 10.0 * ease_out(progress);
    let width = ((area.width as f32 * pct / 100.0) as u16).clamp(1, area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: area.height,
    }
}

/// Blend from the background up to `target` as the animation progresses.
fn fade(target: Color, progress: f32) -> Color {
    let t = ease_out(progress);
    if let (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) = (SPACE_BLACK, target) {
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
    } else {
        target
    }
}

fn ease_out(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p) * (1.0 - p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::model::LookupPhase;
    use crate::domain::{
        CloseApproach, DiameterRange, EstimatedDiameter, MissDistance, RelativeVelocity,
        PLACEHOLDER_IMAGE_URL,
    };
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_to_text(model: &Model) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, model)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn sample_asteroid() -> Asteroid {
        Asteroid {
            id: "3542519".to_string(),
            name: "(2010 PK9)".to_string(),
            nasa_jpl_url: "https://ssd.jpl.nasa.gov".to_string(),
            is_potentially_hazardous_asteroid: true,
            estimated_diameter: Some(EstimatedDiameter {
                kilometers: DiameterRange {
                    estimated_diameter_min: 0.1214940408,
                    estimated_diameter_max: 0.2716689341,
                },
            }),
            close_approach_data: vec![CloseApproach {
                close_approach_date: "2001-03-02".parse().unwrap(),
                relative_velocity: RelativeVelocity {
                    kilometers_per_hour: "30862.992".to_string(),
                },
                miss_distance: MissDistance {
                    kilometers: "28887674.05".to_string(),
                },
            }],
        }
    }

    #[test]
    fn test_render_idle_screen() {
        let text = render_to_text(&Model::default());
        assert!(text.contains("Asteroid Explorer"));
        assert!(text.contains("Asteroid ID"));
        assert!(text.contains("Enter an asteroid ID and press Enter."));
    }

    #[test]
    fn test_render_error_banner() {
        let model = Model {
            error: Some("Asteroid not found".to_string()),
            ..Model::default()
        };
        let text = render_to_text(&model);
        assert!(text.contains("Asteroid not found"));
    }

    #[test]
    fn test_render_loading_state() {
        let model = Model {
            lookup: LookupPhase::Loading,
            ..Model::default()
        };
        let text = render_to_text(&model);
        assert!(text.contains("Searching the catalog"));
    }

    #[test]
    fn test_render_record_details() {
        let model = Model {
            asteroid: Some(sample_asteroid()),
            lookup: LookupPhase::Success,
            animation: 1.0,
            ..Model::default()
        };
        let text = render_to_text(&model);
        assert!(text.contains("(2010 PK9)"));
        assert!(text.contains("Potentially Hazardous"));
        assert!(text.contains("0.12 - 0.27 km"));
        assert!(text.contains("Last Known Approach"));
        assert!(text.contains("March 2, 2001"));
        assert!(text.contains("28,887,674.05 km"));
        assert!(text.contains("View on NASA JPL"));
    }

    #[test]
    fn test_render_recent_chips() {
        let mut model = Model::default();
        model.history.record("3542519");
        model.history.record("2000433");
        let text = render_to_text(&model);
        assert!(text.contains("Recent:"));
        assert!(text.contains("3542519"));
        assert!(text.contains("2000433"));
    }

    #[test]
    fn test_render_fallback_image_url() {
        let model = Model {
            asteroid: Some(sample_asteroid()),
            lookup: LookupPhase::Success,
            image: ImagePhase::Done(DisplayImage::Fallback),
            animation: 1.0,
            ..Model::default()
        };
        let text = render_to_text(&model);
        assert!(text.contains(PLACEHOLDER_IMAGE_URL));
    }

    #[test]
    fn test_render_survives_narrow_terminal() {
        // The margin leaves the card a zero-width area on a 2-column screen.
        let model = Model {
            asteroid: Some(sample_asteroid()),
            lookup: LookupPhase::Success,
            animation: 0.5,
            ..Model::default()
        };
        for (width, height) in [(2, 10), (1, 1)] {
            let backend = TestBackend::new(width, height);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal.draw(|frame| render(frame, &model)).unwrap();
        }
    }
}
