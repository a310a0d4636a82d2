// Rendering for the splash, game and summary screens.
//
// Draw functions only read state; nothing here mutates the session.

use bee_core::{NoticeKind, PlayerColor, SessionState, pluralize};
use bee_types::GameType;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::app::{AppView, Screen};
use super::modal::{HELP_LINES, Modal, celebration_message};
use super::scroll::{ScrollState, render_scrollbar};
use super::splash::{Field, MenuItem, Splash, SplashView};
use crate::subscription::SubscriptionState;

const ACCENT: Color = Color::Yellow;
const MUTED: Color = Color::DarkGray;

const INSTRUCTIONS: &str = "Find words using the grid of seven letters. Each word must \
contain the middle letter. Letters can be used multiple times. There is at least one \
pangram, which contains all the letters in the grid, and is worth extra points.";

const WAITING: &str = "Waiting for the game service...";

pub fn draw(f: &mut Frame, view: &mut AppView) {
    let area = f.area();
    match view.screen() {
        Screen::Splash => render_splash(f, area, view.splash, view.state, view.busy),
        Screen::Game => render_game(f, area, view),
        Screen::Summary => render_summary(f, area, view.state, view.words_scroll),
    }

    if let Some(modal) = view.modal {
        render_modal(f, modal);
    }
}

pub fn player_color(color: PlayerColor) -> Color {
    match color {
        PlayerColor::Red => Color::Red,
        PlayerColor::Blue => Color::Blue,
        PlayerColor::Yellow => Color::Yellow,
        PlayerColor::Green => Color::Green,
    }
}

fn notice_style(kind: NoticeKind) -> Style {
    match kind {
        NoticeKind::Info => Style::default().fg(Color::Cyan),
        NoticeKind::Success => Style::default().fg(Color::Green),
        NoticeKind::Error => Style::default().fg(Color::Red),
    }
}

fn notice_line(state: &SessionState) -> Line<'static> {
    match state.notice() {
        Some(notice) => Line::from(Span::styled(notice.text.clone(), notice_style(notice.kind))),
        None => Line::raw(""),
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn title_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

// Splash

fn render_splash(f: &mut Frame, area: Rect, splash: &Splash, state: &SessionState, busy: bool) {
    const WIDTH: u16 = 64;
    let mut wrapped_rows = 0;
    let mut lines = vec![
        Line::from(Span::styled("Bee Genius", title_style())).centered(),
        Line::raw(""),
    ];

    match &splash.view {
        SplashView::Menu => {
            for (index, item) in MenuItem::ALL.iter().enumerate() {
                let selected = index == splash.selected;
                let marker = if selected { "> " } else { "  " };
                let style = if selected {
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                lines.push(Line::from(Span::styled(
                    format!("{}{}. {}", marker, index + 1, item.label()),
                    style,
                )));
            }
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(
                "Enter to choose, q to quit",
                Style::default().fg(MUTED),
            )));
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled("Instructions:", title_style())));
            lines.push(Line::raw(INSTRUCTIONS));
            // The paragraph wraps; reserve the extra rows
            wrapped_rows = INSTRUCTIONS.len().div_ceil(usize::from(WIDTH - 4)) as u16;
        }
        SplashView::Form(form) => {
            lines.push(Line::from(Span::styled(form.title(), title_style())));
            lines.push(Line::raw(""));
            if form.has_game_code() {
                lines.push(form_field(
                    "Game code",
                    &form.game_code,
                    form.focus == Field::GameCode,
                ));
            }
            lines.push(form_field(
                "Player name",
                &form.player_name,
                form.focus == Field::PlayerName,
            ));
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(
                "Enter to start, Tab to switch field, Esc to go back",
                Style::default().fg(MUTED),
            )));
        }
    }

    lines.push(Line::raw(""));
    if busy {
        lines.push(Line::from(Span::styled(WAITING, Style::default().fg(MUTED))));
    } else {
        lines.push(notice_line(state));
    }

    let height = lines.len() as u16 + wrapped_rows + 2;
    let inner = centered_rect(WIDTH, height, area);
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL)),
        inner,
    );
}

fn form_field(label: &str, value: &str, focused: bool) -> Line<'static> {
    let cursor = if focused { "_" } else { "" };
    let style = if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(format!("{:<13}", format!("{}:", label)), Style::default().fg(MUTED)),
        Span::styled(format!("{}{}", value, cursor), style),
    ])
}

// Game

fn render_game(f: &mut Frame, area: Rect, view: &mut AppView) {
    let state = view.state;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // scores
            Constraint::Min(6),    // found words or grid
            Constraint::Length(4), // entry + notice
            Constraint::Length(1), // key hints
        ])
        .split(area);

    render_score_row(f, rows[0], view);

    if view.found_words_visible {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);
        render_grid(f, columns[0], state);
        render_found_words(f, columns[1], state, view.words_scroll);
    } else {
        render_grid(f, rows[1], state);
    }

    render_entry(f, rows[2], state);
    render_hints(f, rows[3], state, view.busy);
}

fn render_score_row(f: &mut Frame, area: Rect, view: &AppView) {
    let state = view.state;
    let mut spans = vec![
        Span::styled("You: ", Style::default().fg(MUTED)),
        Span::styled(
            state.player_score().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
    ];

    if state.is_multiplayer() {
        spans.push(Span::styled("Team: ", Style::default().fg(MUTED)));
        spans.push(Span::styled(
            state.team_score().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    } else {
        spans.push(Span::styled("Rank: ", Style::default().fg(MUTED)));
        spans.push(Span::styled(state.rank().name().to_string(), title_style()));
    }

    if let Some(distance) = state.rank_distance() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(distance.to_string(), Style::default().fg(ACCENT)));
    }

    let count = state.found_word_count();
    spans.push(Span::raw("   "));
    spans.push(Span::raw(format!(
        "{} word{} found",
        count,
        pluralize(count as i32)
    )));

    let mut title = match state.game_type() {
        Some(GameType::SinglePlayer) | None => " Bee Genius ".to_string(),
        Some(game_type) => format!(
            " Bee Genius | {} | code {} ",
            game_type.label(),
            state.game_code().unwrap_or_default()
        ),
    };
    if state.is_multiplayer() && view.connection != SubscriptionState::Connected {
        title.push_str("| offline ");
    }

    f.render_widget(
        Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title(title)),
        area,
    );
}

/// Seven tiles in three rows. The number in front of each tile is the key
/// that taps it; the center tile is always 4.
fn render_grid(f: &mut Frame, area: Rect, state: &SessionState) {
    let Some(grid) = state.grid() else {
        return;
    };
    let tiles = grid.tiles();

    let tile = |index: usize| -> Vec<Span<'static>> {
        let style = if index == 3 {
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White).bg(MUTED)
        };
        vec![
            Span::styled(format!("{}", index + 1), Style::default().fg(MUTED)),
            Span::styled(format!(" {} ", tiles[index]), style),
        ]
    };

    let row = |indices: &[usize]| -> Line<'static> {
        let mut spans = Vec::new();
        for (position, index) in indices.iter().enumerate() {
            if position > 0 {
                spans.push(Span::raw("   "));
            }
            spans.extend(tile(*index));
        }
        Line::from(spans).centered()
    };

    let lines = vec![
        Line::raw(""),
        row(&[0, 1]),
        Line::raw(""),
        row(&[2, 3, 4]),
        Line::raw(""),
        row(&[5, 6]),
    ];

    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_found_words(f: &mut Frame, area: Rect, state: &SessionState, scroll: &mut ScrollState) {
    let multiplayer = state.is_multiplayer();
    let mut lines = Vec::new();

    if multiplayer {
        let legend: Vec<Span> = state
            .player_entries()
            .into_iter()
            .flat_map(|entry| {
                [
                    Span::styled("● ", Style::default().fg(player_color(entry.color))),
                    Span::raw(format!("{} {}  ", entry.name, entry.score)),
                ]
            })
            .collect();
        lines.push(Line::from(legend));
        lines.push(Line::raw(""));
    }

    for found in state.found_words_sorted() {
        let mut spans = Vec::new();
        if multiplayer {
            let color = state
                .player_color(&found.player)
                .map_or(MUTED, player_color);
            spans.push(Span::styled("● ", Style::default().fg(color)));
        }
        let style = if found.is_pangram {
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default()
        };
        spans.push(Span::styled(found.word.clone(), style));
        lines.push(Line::from(spans));
    }

    let block = Block::default().borders(Borders::ALL).title(" Found words ");
    scroll.update_dimensions(lines.len(), usize::from(block.inner(area).height));

    f.render_widget(
        Paragraph::new(lines).scroll(scroll.vertical()).block(block),
        area,
    );
    render_scrollbar(f, area, scroll);
}

fn render_entry(f: &mut Frame, area: Rect, state: &SessionState) {
    let entry = Line::from(vec![
        Span::styled(
            state.entry().as_str().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("_", Style::default().fg(ACCENT)),
    ]);

    f.render_widget(
        Paragraph::new(vec![entry, notice_line(state)])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_hints(f: &mut Frame, area: Rect, state: &SessionState, busy: bool) {
    let hints = if busy {
        WAITING
    } else if state.is_multiplayer() {
        "Enter submit | Space shuffle | Tab words | Ctrl+S share | Ctrl+E leave | ? help"
    } else {
        "Enter submit | Space shuffle | Tab words | Ctrl+E end game | ? help"
    };
    f.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(MUTED))),
        area,
    );
}

// Summary

fn render_summary(f: &mut Frame, area: Rect, state: &SessionState, scroll: &mut ScrollState) {
    let max = state
        .max_score()
        .map_or_else(|| "?".to_string(), |max| max.to_string());
    let mut header = vec![
        Line::from(Span::styled("Game Over", title_style())).centered(),
        Line::raw(""),
        Line::raw(format!("Score: {} / {}", state.team_score(), max)),
        Line::raw(format!("Rank: {}", state.rank().name())),
    ];

    if state.is_multiplayer() {
        for entry in state.player_entries() {
            header.push(Line::from(vec![
                Span::styled("● ", Style::default().fg(player_color(entry.color))),
                Span::raw(format!("{}: {}", entry.name, entry.score)),
            ]));
        }
    }
    header.push(Line::raw(""));

    let words: Vec<Line> = state
        .summary_words()
        .into_iter()
        .map(|summary| {
            let mark = if summary.found { "✓ " } else { "  " };
            let mut style = if summary.found {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(MUTED)
            };
            if summary.word.is_pangram {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            Line::from(vec![Span::raw(mark), Span::styled(summary.word.word, style)])
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title_bottom(
        Line::from(" Enter to return to the menu | Up/Down/PgUp/PgDn to scroll ").centered(),
    );
    let inner = block.inner(area);
    f.render_widget(block, area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(header.len() as u16), Constraint::Min(0)])
        .split(inner);

    f.render_widget(Paragraph::new(header), sections[0]);

    scroll.update_dimensions(words.len(), usize::from(sections[1].height));
    f.render_widget(Paragraph::new(words).scroll(scroll.vertical()), sections[1]);
    render_scrollbar(f, sections[1], scroll);
}

// Modals

fn render_modal(f: &mut Frame, modal: &Modal) {
    let content: Vec<Line> = match modal {
        Modal::Celebration(rank) => vec![
            Line::raw(""),
            Line::from(Span::styled(celebration_message(rank), title_style())).centered(),
            Line::raw(""),
        ],
        Modal::Share(link) => vec![
            Line::raw("Send this link to other players:"),
            Line::raw(""),
            Line::from(Span::styled(link.clone(), Style::default().fg(ACCENT))),
        ],
        Modal::Help => HELP_LINES
            .iter()
            .map(|(key, description)| {
                Line::from(vec![
                    Span::styled(format!("{:<11}", key), Style::default().fg(ACCENT)),
                    Span::raw(*description),
                ])
            })
            .collect(),
    };

    let height = content.len() as u16 + 2;
    let screen = f.area();
    let area = centered_rect(56, height, screen);
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(Text::from(content))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(ACCENT))
                    .title(format!(" {} ", modal.title())),
            ),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use bee_types::{EndGameResult, FoundWord, GameSession, GameWord, Rank, RankThresholds};
    use indexmap::IndexMap;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn session(game_type: GameType) -> GameSession {
        GameSession {
            id: 1,
            game_code: "HIVE".to_string(),
            game_type,
            outer_letters: "BCDEFG".to_string(),
            center_letter: 'A',
            found_words: vec![FoundWord {
                word: "BADE".to_string(),
                is_pangram: false,
                player: "Alice".to_string(),
                score: 1,
            }],
            scores: IndexMap::from([("Alice".to_string(), 1)]),
            team_score: 1,
            current_rank: Rank::Egg,
            ranks: [("GENIUS", 50), ("QUEEN", 100)]
                .into_iter()
                .collect::<RankThresholds>(),
        }
    }

    /// A single player session with WORD00..WORD39 found.
    fn long_session() -> GameSession {
        let mut session = session(GameType::SinglePlayer);
        session.found_words = (0..40)
            .map(|n| FoundWord {
                word: format!("WORD{:02}", n),
                is_pangram: false,
                player: String::new(),
                score: 1,
            })
            .collect();
        session
    }

    fn view<'a>(
        state: &'a SessionState,
        splash: &'a Splash,
        scroll: &'a mut ScrollState,
    ) -> AppView<'a> {
        AppView {
            state,
            splash,
            found_words_visible: false,
            modal: None,
            connection: SubscriptionState::Disconnected,
            busy: false,
            words_scroll: scroll,
        }
    }

    fn render(view: &mut AppView) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(90, 24)).unwrap();
        terminal.draw(|f| draw(f, view)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn contents(buffer: &Buffer) -> String {
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_splash_lists_menu_and_instructions() {
        let state = SessionState::new();
        let splash = Splash::new();
        let mut scroll = ScrollState::new();
        let text = contents(&render(&mut view(&state, &splash, &mut scroll)));
        assert!(text.contains("New Single Player Game"));
        assert!(text.contains("Join Existing Game"));
        assert!(text.contains("Instructions:"));
        assert!(text.contains("pangram"));
    }

    #[test]
    fn test_game_screen_shows_scores_and_tiles() {
        let mut state = SessionState::new();
        state.load(session(GameType::Cooperative), "Alice").unwrap();
        let splash = Splash::new();
        let mut scroll = ScrollState::new();
        let mut view = view(&state, &splash, &mut scroll);
        view.found_words_visible = true;
        view.connection = SubscriptionState::Connected;

        let text = contents(&render(&mut view));
        assert!(text.contains("You: 1"));
        assert!(text.contains("Team: 1"));
        assert!(text.contains("49 points to genius"));
        assert!(text.contains("1 word found"));
        assert!(text.contains(" A "));
        assert!(text.contains("BADE"));
        assert!(!text.contains("offline"));
    }

    #[test]
    fn test_help_modal_is_drawn_on_top() {
        let mut state = SessionState::new();
        state.load(session(GameType::SinglePlayer), "").unwrap();
        let splash = Splash::new();
        let modal = Modal::Help;
        let mut scroll = ScrollState::new();
        let mut view = view(&state, &splash, &mut scroll);
        view.modal = Some(&modal);

        let text = contents(&render(&mut view));
        assert!(text.contains("shuffle letters"));
    }

    #[test]
    fn test_busy_replaces_key_hints() {
        let mut state = SessionState::new();
        state.load(session(GameType::SinglePlayer), "").unwrap();
        let splash = Splash::new();
        let mut scroll = ScrollState::new();
        let mut view = view(&state, &splash, &mut scroll);
        view.busy = true;

        let text = contents(&render(&mut view));
        assert!(text.contains(WAITING));
        assert!(!text.contains("Space shuffle"));
    }

    #[test]
    fn test_long_found_words_list_scrolls() {
        let mut state = SessionState::new();
        state.load(long_session(), "").unwrap();
        let splash = Splash::new();
        let mut scroll = ScrollState::new();

        let first = {
            let mut view = view(&state, &splash, &mut scroll);
            view.found_words_visible = true;
            contents(&render(&mut view))
        };
        assert!(first.contains("WORD00"));
        assert!(!first.contains("WORD39"));
        assert!(scroll.needs_scrollbar());

        scroll.scroll_to_bottom();
        let last = {
            let mut view = view(&state, &splash, &mut scroll);
            view.found_words_visible = true;
            contents(&render(&mut view))
        };
        assert!(last.contains("WORD39"));
        assert!(!last.contains("WORD00"));
    }

    #[test]
    fn test_long_summary_scrolls() {
        let mut state = SessionState::new();
        state.load(long_session(), "").unwrap();
        state.apply_game_over(EndGameResult {
            all_words: (0..40)
                .map(|n| GameWord {
                    word: format!("WORD{:02}", n),
                    is_pangram: false,
                })
                .collect(),
            game_state: long_session(),
        });
        let splash = Splash::new();
        let mut scroll = ScrollState::new();

        let first = contents(&render(&mut view(&state, &splash, &mut scroll)));
        assert!(first.contains("Game Over"));
        assert!(first.contains("WORD00"));
        assert!(!first.contains("WORD39"));

        scroll.page_down();
        scroll.page_down();
        scroll.page_down();
        let last = contents(&render(&mut view(&state, &splash, &mut scroll)));
        assert!(last.contains("Game Over"));
        assert!(last.contains("WORD39"));
    }
}
