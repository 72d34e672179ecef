use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::domain::Topic;
use crate::session::Session;
use crate::tui::app::{InputMode, TuiApp};

pub fn render(frame: &mut Frame, app: &mut TuiApp, session: &Session, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Filter bar
            Constraint::Min(10),    // Topic list
            Constraint::Length(7),  // Picked pane
            Constraint::Length(1),  // Status bar
        ])
        .split(frame.area());

    render_filter_bar(frame, app, chunks[0], colors);
    render_topic_list(frame, app, chunks[1], colors);
    render_picked_pane(frame, app, session, chunks[2], colors);
    render_status_bar(frame, app, chunks[3], colors);
}

fn render_filter_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let category = app.query.category.as_deref().unwrap_or("(all)");
    let search = if app.query.search.is_empty() {
        "(none)"
    } else {
        app.query.search.as_str()
    };

    let line = Line::from(vec![
        Span::raw(" window "),
        Span::styled(
            app.query.window.label(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  sort "),
        Span::styled(
            app.query.sort.label(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  category "),
        Span::styled(category, Style::default().fg(colors.category_tag)),
        Span::raw("  search "),
        Span::raw(search),
    ]);

    let block = Block::default()
        .title(" Filters ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_topic_list(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let items: Vec<ListItem> = app
        .view
        .topics
        .iter()
        .map(|topic| topic_list_item(topic, colors))
        .collect();

    let title = format!(
        " Topics ({}) [{}/{}] ",
        app.view.topics.len(),
        app.topic_index + 1,
        app.view.topics.len().max(1)
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn topic_list_item<'a>(topic: &'a Topic, colors: &ColorConfig) -> ListItem<'a> {
    let marker = if topic.done { "✓" } else { " " };
    let stamp = topic
        .completed_at
        .map(|d| d.format("%m/%d").to_string())
        .unwrap_or_else(|| "     ".to_string());

    let mut spans = vec![
        Span::raw(format!("{} ", marker)),
        Span::styled(format!("{} ", stamp), Style::default().fg(colors.stamp)),
        Span::raw(topic.title.as_str()),
    ];
    if !topic.category.is_empty() {
        spans.push(Span::styled(
            format!("  [{}]", topic.category),
            Style::default().fg(colors.category_tag),
        ));
    }

    let style = if topic.done {
        Style::default().fg(colors.done_topic)
    } else {
        Style::default()
            .fg(colors.pending_topic)
            .add_modifier(Modifier::BOLD)
    };

    ListItem::new(Line::from(spans)).style(style)
}

fn render_picked_pane(
    frame: &mut Frame,
    app: &TuiApp,
    session: &Session,
    area: Rect,
    colors: &ColorConfig,
) {
    let content = match app.picked_id.as_deref().and_then(|id| session.find(id)) {
        Some(topic) => {
            let mut lines = vec![Line::from(vec![
                Span::raw("Picked: "),
                Span::styled(
                    topic.title.as_str(),
                    Style::default()
                        .fg(colors.picked_title)
                        .add_modifier(Modifier::BOLD),
                ),
            ])];
            if !topic.category.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("[{}]", topic.category),
                    Style::default().fg(colors.category_tag),
                )));
            }
            let state = match topic.completed_at {
                Some(ts) if topic.done => format!(
                    "completed {}",
                    ts.with_timezone(&chrono::Local).format("%b %e, %I:%M %p")
                ),
                _ => "not yet done".to_string(),
            };
            lines.push(Line::from(Span::styled(
                state,
                Style::default().fg(colors.stamp),
            )));
            Text::from(lines)
        }
        None => Text::from("Press g to pick a random topic."),
    };

    let block = Block::default()
        .title(" Picked ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    frame.render_widget(
        Paragraph::new(content).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let status = match app.input_mode {
        InputMode::Search => format!(
            "Search: {}▏ (Enter keep, Esc clear)",
            app.search_input
        ),
        InputMode::AddTitle => format!(
            "New topic title: {}▏ (Enter next, Esc cancel)",
            app.add_title
        ),
        InputMode::AddCategory => format!(
            "Category for \"{}\": {}▏ (Enter add, Esc cancel)",
            app.add_title, app.add_category
        ),
        InputMode::Normal => {
            if let Some(ref msg) = app.status_message {
                msg.clone()
            } else {
                "j/k:Nav  Space:Done  g:Pick  /:Search  a:Add  w:Window  s:Sort  c:Category  x:Clear  q:Quit"
                    .to_string()
            }
        }
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));
    frame.render_widget(paragraph, area);
}
