//! Matrix view: the shelf grid with a details panel for the cursor

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::slot::SlotView;
use crate::cli::tui::app::App;

const HELP: &[(&str, &str)] = &[
    ("h j k l / arrows", "move"),
    ("Home / End", "first / last compartment"),
    ("a / Enter", "add a book"),
    ("x / Delete", "remove"),
    ("+ / -", "quantity"),
    ("?", "toggle this help"),
    ("q / Esc", "close help, then quit"),
    ("Ctrl-C", "quit"),
];

/// Draw the matrix layout
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let panel_height = if app.show_help() {
        HELP.len() as u16 + 2
    } else {
        7
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Min(5),               // Grid
            Constraint::Length(panel_height), // Details or help
            Constraint::Length(3),            // Status bar
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);
    draw_grid(frame, app, chunks[1]);
    if app.show_help() {
        draw_help(frame, chunks[2]);
    } else {
        draw_details(frame, app, chunks[2]);
    }
    draw_status_bar(frame, app, chunks[3]);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let text = app.matrix().read(|store| {
        let shelf = &store.data().shelf;
        format!(
            "{}  created {}  {} shelves, {} compartments, capacity {}",
            shelf.id,
            shelf.creation_date.format("%Y-%m-%d %H:%M"),
            shelf.structure.num_shelves,
            shelf.structure.total_compartments,
            shelf.structure.max_capacity,
        )
    });

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

fn draw_grid(frame: &mut Frame, app: &App, area: Rect) {
    let view = SlotView {
        cursor: app.cursor(),
        cell_width: app.cell_width(),
    };
    let rows = app.matrix().render_matrix(&view);

    let lines: Vec<Line> = if rows.is_empty() {
        vec![Line::styled("No shelves", Style::default().fg(Color::DarkGray))]
    } else {
        rows.into_iter()
            .enumerate()
            .map(|(shelf, cells)| {
                let mut spans = Vec::with_capacity(cells.len() * 2 + 1);
                spans.push(Span::styled(
                    format!("{:>3} ", shelf),
                    Style::default().fg(Color::DarkGray),
                ));
                for cell in cells {
                    spans.push(cell);
                    spans.push(Span::raw(" "));
                }
                Line::from(spans)
            })
            .collect()
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title("Shelves")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(paragraph, area);
}

fn draw_details(frame: &mut Frame, app: &App, area: Rect) {
    let cursor = app.cursor();

    let lines: Vec<Line> = match app.selected_item() {
        Some(item) => {
            let mut lines = vec![
                Line::from(vec![
                    Span::styled("Id:       ", Style::default().fg(Color::DarkGray)),
                    Span::raw(item.id.to_string()),
                ]),
                Line::from(vec![
                    Span::styled("Category: ", Style::default().fg(Color::DarkGray)),
                    Span::raw(item.category.clone()),
                ]),
                Line::from(vec![
                    Span::styled("Quantity: ", Style::default().fg(Color::DarkGray)),
                    Span::raw(item.quantity.to_string()),
                ]),
            ];

            let meta = item
                .metadata
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(Line::from(vec![
                Span::styled("Metadata: ", Style::default().fg(Color::DarkGray)),
                Span::raw(meta),
            ]));
            lines
        }
        None => vec![Line::styled(
            "Empty compartment",
            Style::default().fg(Color::DarkGray),
        )],
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!("Compartment {}", cursor))
                .borders(Borders::ALL),
        );

    frame.render_widget(paragraph, area);
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = HELP
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{:<18}", keys), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title("Keys")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(paragraph, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let content = app
        .status_message()
        .unwrap_or("[hjkl]move [a]dd [x]remove [+/-]qty [?]help [q]uit");

    let status_text = format!(
        "Shelf [{}] {}  Total: {}",
        app.cursor(),
        content,
        app.matrix().total_items()
    );

    let paragraph = Paragraph::new(status_text).block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ItemInput, MatrixHandle, ShelfData};
    use ratatui::backend::TestBackend;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> App {
        let created = "2024-11-21T10:30:00".parse().unwrap();
        let matrix = MatrixHandle::from_data(ShelfData::new("shelf-001", created, vec![4, 6], 10));
        matrix.add_item(0, 0, ItemInput::new().category("Books").quantity(3));
        App::new(matrix, 4)
    }

    #[test]
    fn shows_header_details_and_total() {
        let screen = render(&app());

        assert!(screen.contains("shelf-001"));
        assert!(screen.contains("created 2024-11-21 10:30"));
        assert!(screen.contains("Category: Books"));
        assert!(screen.contains("x3"));
        assert!(screen.contains("Total: 1"));
    }

    #[test]
    fn help_lists_every_bound_key() {
        let mut app = app();
        app.handle_key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char('?'),
            crossterm::event::KeyModifiers::NONE,
        ))
        .unwrap();
        let screen = render(&app);

        for (keys, _) in HELP {
            assert!(screen.contains(keys), "missing help row for {}", keys);
        }
        assert!(screen.contains("toggle this help"));
        assert!(screen.contains("Ctrl-C"));
    }

    #[test]
    fn empty_grid_says_so() {
        let created = "2024-11-21T10:30:00".parse().unwrap();
        let matrix = MatrixHandle::from_data(ShelfData::new("bare", created, vec![], 0));
        let screen = render(&App::new(matrix, 4));

        assert!(screen.contains("No shelves"));
        assert!(screen.contains("Empty compartment"));
        assert!(screen.contains("Total: 0"));
    }
}
