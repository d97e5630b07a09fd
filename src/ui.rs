use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;

use wesplit::{Settings, SplitSession, TipSelection, TotalsView};

/// Form rows that can take keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    CheckAmount,
    PeopleCount,
    Tip,
}

impl Field {
    pub fn next(&self) -> Self {
        match self {
            Field::CheckAmount => Field::PeopleCount,
            Field::PeopleCount => Field::Tip,
            Field::Tip => Field::CheckAmount,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Field::CheckAmount => Field::Tip,
            Field::PeopleCount => Field::CheckAmount,
            Field::Tip => Field::PeopleCount,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Field::CheckAmount => "Amount",
            Field::PeopleCount => "Number of people",
            Field::Tip => "Tip percentage",
        }
    }
}

pub struct App {
    pub session: SplitSession,
    pub focus: Field,
    pub currency_symbol: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        Self {
            session: SplitSession::new(settings.default_tip()),
            focus: Field::CheckAmount,
            currency_symbol: settings.currency_symbol.clone(),
            should_quit: false,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn previous_field(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn totals_view(&self) -> TotalsView {
        TotalsView::new(&self.session.totals(), &self.currency_symbol)
    }

    /// Apply one key press to the form
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('r') => self.session.reset(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.previous_field(),
            KeyCode::Left if self.focus == Field::Tip => self.session.previous_tip(),
            KeyCode::Right if self.focus == Field::Tip => self.session.next_tip(),
            KeyCode::Char(c) if is_decimal_key(c) => match self.focus {
                Field::CheckAmount => self.session.push_check_char(c),
                Field::PeopleCount => self.session.push_people_char(c),
                Field::Tip => {}
            },
            KeyCode::Backspace => match self.focus {
                Field::CheckAmount => self.session.pop_check_char(),
                Field::PeopleCount => self.session.pop_people_char(),
                Field::Tip => {}
            },
            _ => {}
        }
    }
}

/// Keys a decimal pad offers
fn is_decimal_key(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == '-'
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }
    }
    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(4), // Amount + people
            Constraint::Length(3), // Tip picker
            Constraint::Length(4), // Totals
            Constraint::Length(3), // Per person
            Constraint::Min(0),
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0]);
    render_inputs(f, chunks[1], app);
    render_tip_picker(f, chunks[2], app);

    let view = app.totals_view();
    render_totals(f, chunks[3], &view);
    render_per_person(f, chunks[4], &view);

    render_status_bar(f, chunks[6], app);
}

fn plain_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
}

fn section_block(title: &str) -> Block<'_> {
    plain_block().title(format!(" {} ", title))
}

fn field_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "WeSplit",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("v{}", wesplit::VERSION),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_inputs(f: &mut Frame, area: Rect, app: &App) {
    let rows = [
        (Field::CheckAmount, app.session.check_amount()),
        (Field::PeopleCount, app.session.people_count()),
    ];

    let lines: Vec<Line> = rows
        .iter()
        .map(|(field, text)| {
            let focused = app.focus == *field;
            let marker = if focused { "→ " } else { "  " };
            // Placeholder like an empty text field
            let value = if text.is_empty() {
                Span::styled(field.title().to_string(), Style::default().fg(Color::DarkGray))
            } else {
                Span::styled(text.to_string(), Style::default().fg(Color::White))
            };
            let cursor = if focused { "▏" } else { "" };

            Line::from(vec![
                Span::styled(marker, field_style(focused)),
                Span::styled(format!("{:<18}", field.title()), field_style(focused)),
                value,
                Span::styled(cursor, Style::default().fg(Color::Yellow)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(plain_block()), area);
}

fn render_tip_picker(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Field::Tip;
    let selected = app.session.tip();

    let mut spans = vec![Span::styled(if focused { "→ " } else { "  " }, field_style(focused))];
    for (i, option) in TipSelection::all().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" │ "));
        }

        let style = if option == selected {
            Style::default()
                .fg(Color::Black)
                .bg(if focused { Color::Yellow } else { Color::Gray })
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        spans.push(Span::styled(format!(" {} ", option.label()), style));
    }

    let picker = Paragraph::new(Line::from(spans))
        .block(section_block("What tip would you like to leave?"));

    f.render_widget(picker, area);
}

fn render_totals(f: &mut Frame, area: Rect, view: &TotalsView) {
    let lines: Vec<Line> = view.lines()[..2]
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("  {}: ", label), Style::default().fg(Color::Gray)),
                Span::styled(value.to_string(), Style::default().fg(Color::Green)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(section_block("Totals")), area);
}

fn render_per_person(f: &mut Frame, area: Rect, view: &TotalsView) {
    let line = Line::from(Span::styled(
        format!("  {}", view.per_person),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    ));

    f.render_widget(
        Paragraph::new(line).block(section_block("Amount per person")),
        area,
    );
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let help = match app.focus {
        Field::Tip => "←/→ change tip",
        _ => "0-9 . - type  Backspace delete",
    };

    let status_text = vec![Line::from(vec![
        Span::styled(
            format!("{} ", app.focus.title()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("| "),
        Span::styled(help, Style::default().fg(Color::White)),
        Span::raw("  |  Tab/↑↓ move  Ctrl-R reset  Esc quit"),
    ])];

    let status_bar = Paragraph::new(status_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = App::new(&Settings::default());
        assert_eq!(app.focus, Field::CheckAmount);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Field::PeopleCount);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.focus, Field::Tip);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Field::CheckAmount);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Field::Tip);
    }

    #[test]
    fn test_typing_updates_totals() {
        let mut app = App::new(&Settings::default());

        type_text(&mut app, "100");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "4");

        let view = app.totals_view();
        assert_eq!(view.tip, "$20.00");
        assert_eq!(view.grand_total, "$120.00");
        assert_eq!(view.per_person, "$30.00");
    }

    #[test]
    fn test_non_decimal_keys_ignored() {
        let mut app = App::new(&Settings::default());
        type_text(&mut app, "1a2b");
        assert_eq!(app.session.check_amount(), "12");

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session.check_amount(), "1");
    }

    #[test]
    fn test_tip_keys_only_on_picker() {
        let mut app = App::new(&Settings::default());

        press(&mut app, KeyCode::Right);
        assert_eq!(app.session.tip().percentage(), 20);

        app.focus = Field::Tip;
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session.tip().percentage(), 25);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session.tip().percentage(), 0);
        type_text(&mut app, "5");
        assert_eq!(app.session.check_amount(), "");
    }

    fn render_to_text(app: &App) -> String {
        let backend = ratatui::backend::TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();

        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_form_sections_render() {
        let mut app = App::new(&Settings::default());
        type_text(&mut app, "100");

        let screen = render_to_text(&app);

        assert!(screen.contains("What tip would you like to leave?"));
        assert!(screen.contains("Totals"));
        assert!(screen.contains("Amount per person"));
        assert!(screen.contains("$120.00"));
        // The input section has no header
        assert!(!screen.contains(" Bill "));
    }

    #[test]
    fn test_reset_and_quit() {
        let mut app = App::new(&Settings::default());
        type_text(&mut app, "42");

        app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert_eq!(app.session.check_amount(), "");
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_uses_configured_symbol_and_tip() {
        let settings = Settings {
            currency_symbol: "€".to_string(),
            default_tip_index: 0,
            ..Settings::default()
        };
        let mut app = App::new(&settings);
        type_text(&mut app, "50");

        assert_eq!(app.session.tip().percentage(), 10);
        assert_eq!(app.totals_view().grand_total, "€55.00");
    }
}
