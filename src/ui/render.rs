use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::game::deck::Card;
use crate::game::seat::Seat;
use crate::game::table::{Phase, BIG_BLIND, MAX_BOTS};
use crate::ui::app::App;

// ── Color Palette ──────────────────────────────────────────
const FELT_GREEN: Color = Color::Rgb(0, 80, 40);
const CARD_BG: Color = Color::Rgb(200, 198, 193);
const CARD_RED: Color = Color::Rgb(200, 40, 40);
const CARD_BLACK: Color = Color::Rgb(30, 30, 30);
const CARD_BACK: Color = Color::Rgb(60, 60, 120);
const LABEL: Color = Color::Rgb(200, 200, 200);
const GOLD: Color = Color::Yellow;
const DIM: Color = Color::DarkGray;
const TURN_MARKER: Color = Color::LightGreen;
const OVERLAY_BG: Color = Color::Rgb(20, 20, 30);
const OVERLAY_BORDER: Color = Color::Rgb(100, 100, 140);

// ── Helpers ────────────────────────────────────────────────

fn card_span(card: &Card) -> Span<'static> {
    let fg = if card.suit.is_red() { CARD_RED } else { CARD_BLACK };
    Span::styled(
        format!(" {} ", card),
        Style::default().fg(fg).bg(CARD_BG).add_modifier(Modifier::BOLD),
    )
}

fn facedown_span() -> Span<'static> {
    Span::styled(" ▒▒ ", Style::default().fg(CARD_BACK))
}

fn gap() -> Span<'static> {
    Span::raw(" ")
}

fn felt_block(title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(FELT_GREEN))
}

fn overlay_area(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

// ── Entry point ────────────────────────────────────────────

pub fn render(f: &mut Frame, app: &App) {
    if app.table.phase == Phase::Setup {
        render_setup(f, app);
        return;
    }

    render_table(f, app);

    if app.show_help {
        render_help(f);
    }
}

// ── Setup screen ───────────────────────────────────────────

fn render_setup(f: &mut Frame, app: &App) {
    let area = f.area();
    let block = felt_block(" Texas Hold'em ".to_string());
    f.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "ARCADE HOLD'EM",
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "Bots at the table:  {}   (+/- to change, max {})",
            app.table.config.num_bots, MAX_BOTS
        )),
        Line::from(format!(
            "Difficulty:         {}   (D to cycle)",
            app.table.config.difficulty
        )),
        Line::from(""),
        Line::from(format!(
            "Blinds 10/20, starting stack {}.",
            app.table.config.starting_stack
        )),
        Line::from("All-in is only allowed on the river; earlier raises are capped."),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: deal    Q: quit",
            Style::default().fg(LABEL),
        )),
    ];

    let inner = overlay_area(area, 64, lines.len() as u16 + 2);
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, inner);
}

// ── Game screen ────────────────────────────────────────────

fn render_table(f: &mut Frame, app: &App) {
    let table = &app.table;
    let seat_rows = table.seats.len() as u16 + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),         // board + pot
            Constraint::Length(seat_rows), // seats
            Constraint::Length(1),         // banner
            Constraint::Length(4),         // action bar
            Constraint::Min(3),            // hand log
        ])
        .split(f.area());

    render_board(f, app, chunks[0]);
    render_seats(f, app, chunks[1]);
    render_banner(f, app, chunks[2]);
    render_actions(f, app, chunks[3]);
    render_log(f, app, chunks[4]);
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let table = &app.table;
    let title = format!(
        " Hand #{} — {} — Pot ${} ",
        table.hand_number,
        table.street.label(),
        table.pot
    );

    let mut spans: Vec<Span> = Vec::new();
    for card in table.board() {
        spans.push(card_span(card));
        spans.push(gap());
    }
    for _ in table.board().len()..5 {
        spans.push(facedown_span());
        spans.push(gap());
    }

    let block = felt_block(title);
    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn seat_line(app: &App, idx: usize, seat: &Seat) -> Line<'static> {
    let table = &app.table;
    let mut spans: Vec<Span> = Vec::new();

    let on_turn = matches!(table.phase, Phase::Betting | Phase::BotPause)
        && table.current == idx
        && !seat.folded;
    spans.push(if on_turn {
        Span::styled("▶ ", Style::default().fg(TURN_MARKER))
    } else {
        Span::raw("  ")
    });

    spans.push(if table.dealer == idx {
        Span::styled("D ", Style::default().fg(GOLD))
    } else {
        Span::raw("  ")
    });

    let name_style = if seat.folded {
        Style::default().fg(DIM)
    } else if seat.is_human {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(LABEL)
    };
    spans.push(Span::styled(format!("{:<8}", seat.name), name_style));

    spans.push(Span::styled(
        format!("  ${:<6}", seat.stack),
        Style::default().fg(LABEL),
    ));
    spans.push(Span::styled(
        format!("bet {:<5}", seat.bet),
        Style::default().fg(LABEL),
    ));

    let status = if seat.folded {
        "folded "
    } else if seat.all_in {
        "all-in "
    } else {
        "       "
    };
    spans.push(Span::styled(status.to_string(), Style::default().fg(DIM)));

    let show_cards =
        seat.is_human || (table.hole_cards_revealed && !seat.folded && !seat.hole.is_empty());
    if seat.hole.is_empty() {
        spans.push(Span::styled("  --  ", Style::default().fg(DIM)));
    } else if show_cards {
        for card in &seat.hole {
            spans.push(card_span(card));
            spans.push(gap());
        }
    } else if !seat.folded {
        spans.push(facedown_span());
        spans.push(gap());
        spans.push(facedown_span());
    }

    Line::from(spans)
}

fn render_seats(f: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .table
        .seats
        .iter()
        .enumerate()
        .map(|(idx, seat)| seat_line(app, idx, seat))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Seats ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_banner(f: &mut Frame, app: &App, area: Rect) {
    let text = app.table.banner().unwrap_or("");
    let paragraph = Paragraph::new(Span::styled(
        text.to_string(),
        Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn render_actions(f: &mut Frame, app: &App, area: Rect) {
    let table = &app.table;
    let mut lines: Vec<Line> = Vec::new();

    match table.phase {
        Phase::RoundPause => {
            lines.push(Line::from("Street complete."));
            lines.push(Line::from(Span::styled(
                "Enter: continue    M: menu    Q: quit",
                Style::default().fg(LABEL),
            )));
        }
        Phase::HandDone => {
            lines.push(Line::from(table.last_winner_text.clone()));
            lines.push(Line::from(Span::styled(
                "Enter: next hand    M: menu    Q: quit",
                Style::default().fg(LABEL),
            )));
        }
        _ if table.is_humans_turn() => {
            let to_call = table.amount_to_call(table.hero);
            let call_label = if to_call > 0 {
                format!("[C]all {}", to_call)
            } else {
                "[C]heck".to_string()
            };
            let raise_entry = if app.raise_input.is_empty() {
                format!("min {}", table.current_bet + table.minimum_raise_amount())
            } else {
                app.raise_input.clone()
            };
            lines.push(Line::from(format!(
                "[F]old    {}    [R]aise to {}    [P]ot  [M]in  [+/-] step    [A]ll-in",
                call_label, raise_entry
            )));
            let cap_line = if table.can_go_all_in() {
                "Max: all-in".to_string()
            } else {
                format!("Max pre-river: call + min(pot, {})", 4 * BIG_BLIND)
            };
            lines.push(Line::from(Span::styled(
                cap_line,
                Style::default().fg(DIM),
            )));
        }
        _ => {
            lines.push(Line::from(Span::styled(
                "Waiting…",
                Style::default().fg(DIM),
            )));
            lines.push(Line::from(Span::styled(
                "?: help    Q: quit",
                Style::default().fg(DIM),
            )));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Actions ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_log(f: &mut Frame, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let log = &app.table.log;
    let start = log.len().saturating_sub(visible);
    let lines: Vec<Line> = log[start..]
        .iter()
        .map(|entry| Line::from(Span::styled(entry.clone(), Style::default().fg(LABEL))))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Hand log ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_help(f: &mut Frame) {
    let lines = vec![
        Line::from(Span::styled(
            "Keys",
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("F          fold"),
        Line::from("C / X      call or check"),
        Line::from("0-9        type a raise target, R/Enter to submit"),
        Line::from("M / P      prefill minimum / pot-sized raise"),
        Line::from("+ / -      step the raise target by the minimum raise"),
        Line::from("A          all-in (river only)"),
        Line::from("Enter      continue after a street or hand"),
        Line::from("Q          quit"),
        Line::from(""),
        Line::from(Span::styled("?: close help", Style::default().fg(LABEL))),
    ];

    let area = overlay_area(f.area(), 56, lines.len() as u16 + 2);
    f.render_widget(Clear, area);
    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(OVERLAY_BG))
        .border_style(Style::default().fg(OVERLAY_BORDER));
    f.render_widget(Paragraph::new(lines).block(block).alignment(Alignment::Left), area);
}
