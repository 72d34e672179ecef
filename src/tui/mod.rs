pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::KeyCode,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, EaselError, Result};
use crate::config::Config;
use crate::session::Session;

use self::app::{InputMode, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, config).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let mut tui_app = TuiApp::new();
    let event_handler = EventHandler::new(Duration::from_millis(100));

    // The missing-data state keeps the UI alive with an empty list; it is
    // the only terminal error in the system.
    let mut session = match Session::load(&ctx).await {
        Ok(session) => {
            tui_app.set_status(format!(
                "Loaded {} topics from {}",
                session.topics().len(),
                session.source_label()
            ));
            session
        }
        Err(EaselError::NoTopicData) => {
            tui_app.set_status("Error: neither topics.json nor topics.csv found".to_string());
            Session::empty(&ctx)
        }
        Err(e) => return Err(e),
    };
    tui_app.refresh(&session);

    loop {
        terminal.draw(|frame| layout::render(frame, &mut tui_app, &session, &config.colors))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                if tui_app.input_mode != InputMode::Normal {
                    handle_input_key(&mut tui_app, &mut session, key.code)?;
                    continue;
                }

                match config.keybindings.get_action(&key) {
                    Action::Quit => {
                        tui_app.should_quit = true;
                    }
                    Action::MoveUp => tui_app.move_up(),
                    Action::MoveDown => tui_app.move_down(),
                    Action::NextPage => tui_app.next_page(),
                    Action::PrevPage => tui_app.prev_page(),
                    Action::ToggleDone => {
                        if let Some(id) = tui_app.selected_topic().map(|t| t.id.clone()) {
                            let topic = session.toggle_done(&id)?;
                            tui_app.set_status(if topic.done {
                                format!("Marked done: {}", topic.title)
                            } else {
                                format!("Marked not done: {}", topic.title)
                            });
                            tui_app.refresh(&session);
                        }
                    }
                    Action::Pick => match session.pick() {
                        Some(topic) => {
                            tui_app.picked_id = Some(topic.id.clone());
                            tui_app.status_message = None;
                        }
                        None => {
                            tui_app.set_status("No topics available.".to_string());
                        }
                    },
                    Action::Search => {
                        tui_app.input_mode = InputMode::Search;
                        tui_app.search_input = tui_app.query.search.clone();
                    }
                    Action::AddTopic => {
                        tui_app.input_mode = InputMode::AddTitle;
                        tui_app.add_title.clear();
                        tui_app.add_category.clear();
                    }
                    Action::CycleWindow => {
                        tui_app.cycle_window();
                        tui_app.refresh(&session);
                    }
                    Action::CycleSort => {
                        tui_app.cycle_sort();
                        tui_app.refresh(&session);
                    }
                    Action::CycleCategory => {
                        tui_app.cycle_category();
                        tui_app.refresh(&session);
                    }
                    Action::ClearFilters => {
                        tui_app.clear_filters();
                        tui_app.refresh(&session);
                    }
                    Action::None => {}
                }
            }
            AppEvent::Tick => {}
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Key handling while a text input owns the keyboard (search or the
/// two-step add-topic form). Validation failures become status messages,
/// never hard errors.
fn handle_input_key(tui_app: &mut TuiApp, session: &mut Session, code: KeyCode) -> Result<()> {
    match tui_app.input_mode {
        InputMode::Search => match code {
            KeyCode::Enter => {
                tui_app.input_mode = InputMode::Normal;
            }
            KeyCode::Esc => {
                tui_app.search_input.clear();
                tui_app.query.search.clear();
                tui_app.input_mode = InputMode::Normal;
                tui_app.refresh(session);
            }
            KeyCode::Backspace => {
                tui_app.search_input.pop();
                tui_app.query.search = tui_app.search_input.clone();
                tui_app.refresh(session);
            }
            KeyCode::Char(c) => {
                tui_app.search_input.push(c);
                // Live filtering, like typing in the original search box
                tui_app.query.search = tui_app.search_input.clone();
                tui_app.refresh(session);
            }
            _ => {}
        },
        InputMode::AddTitle => match code {
            KeyCode::Enter => {
                tui_app.input_mode = InputMode::AddCategory;
            }
            KeyCode::Esc => {
                tui_app.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                tui_app.add_title.pop();
            }
            KeyCode::Char(c) => {
                tui_app.add_title.push(c);
            }
            _ => {}
        },
        InputMode::AddCategory => match code {
            KeyCode::Enter => {
                let title = tui_app.add_title.clone();
                let category = tui_app.add_category.clone();
                match session.add_topic(&title, &category) {
                    Ok(topic) => {
                        tui_app.set_status(format!("Added: {}", topic.title));
                        tui_app.input_mode = InputMode::Normal;
                        tui_app.refresh(session);
                    }
                    Err(
                        e @ (EaselError::EmptyTitle
                        | EaselError::EmptyCategory
                        | EaselError::DuplicateTopic { .. }),
                    ) => {
                        tui_app.set_status(e.to_string());
                        tui_app.input_mode = InputMode::Normal;
                    }
                    Err(e) => return Err(e),
                }
            }
            KeyCode::Esc => {
                tui_app.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                tui_app.add_category.pop();
            }
            KeyCode::Char(c) => {
                tui_app.add_category.push(c);
            }
            _ => {}
        },
        InputMode::Normal => {}
    }
    Ok(())
}
