use super::*;
use crate::app::action::Action;
use crate::app::command::Command;
use crate::app::state::AppState;
use crate::domain::error::SearchError;
use crate::domain::models::GithubUser;
use crate::domain::search::MockSearchFacade;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use rand::{Rng, SeedableRng};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::sync::Arc;
use tokio::sync::mpsc;

fn user(login: &str) -> GithubUser {
    GithubUser {
        login: login.to_string(),
        kind: Some("User".to_string()),
        html_url: Some(format!("https://github.com/{login}")),
        ..GithubUser::default()
    }
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl_c() -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
}

fn screen(terminal: &Terminal<TestBackend>) -> String {
    let buf = terminal.backend().buffer();
    (0..buf.area.height)
        .map(|y| {
            (0..buf.area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::test]
async fn test_handle_command_search_error_propagation() {
    let mut mock = MockSearchFacade::new();
    mock.expect_search_by_prefix()
        .with(mockall::predicate::eq("oct"))
        .returning(|_| Err(SearchError::Transport("connection refused".to_string())));

    let client = Arc::new(mock);
    let (tx, mut rx) = mpsc::channel(1);

    handle_command(Command::SearchUsers("oct".to_string()), client, tx).unwrap();

    let action = rx.recv().await.unwrap();
    if let Action::SearchFailed(query, error) = action {
        assert_eq!(query, "oct");
        assert!(error.to_string().contains("connection refused"));
    } else {
        panic!("Expected Action::SearchFailed, got {action:?}");
    }
}

#[tokio::test]
async fn test_handle_command_search_trims_query() {
    let mut mock = MockSearchFacade::new();
    mock.expect_search_by_prefix()
        .with(mockall::predicate::eq("oct"))
        .returning(|_| Ok(vec![user("octocat")]));

    let client = Arc::new(mock);
    let (tx, mut rx) = mpsc::channel(1);

    handle_command(Command::SearchUsers(" oct ".to_string()), client, tx).unwrap();

    let action = rx.recv().await.unwrap();
    assert_eq!(
        action,
        Action::UsersLoaded(" oct ".to_string(), vec![user("octocat")])
    );
}

#[tokio::test]
async fn test_handle_command_fetch_user() {
    let mut mock = MockSearchFacade::new();
    mock.expect_fetch_exact()
        .with(mockall::predicate::eq("octocat"))
        .returning(|login| Ok(user(login)));

    let client = Arc::new(mock);
    let (tx, mut rx) = mpsc::channel(1);

    handle_command(Command::FetchUser("octocat".to_string()), client, tx).unwrap();

    let action = rx.recv().await.unwrap();
    assert_eq!(action, Action::UserLoaded(Box::new(user("octocat"))));
}

#[tokio::test]
async fn test_handle_command_rejects_runtime_commands() {
    let client = Arc::new(MockSearchFacade::new());
    let (tx, _rx) = mpsc::channel(1);
    assert!(handle_command(Command::CancelBlurClose(0), client, tx).is_err());
}

#[tokio::test]
async fn test_full_command_error_to_state() {
    let mut mock = MockSearchFacade::new();
    mock.expect_fetch_exact().returning(|_| {
        Err(SearchError::Http {
            status: 404,
            status_text: "Not Found".to_string(),
            message: Some("Not Found".to_string()),
        })
    });

    let client = Arc::new(mock);
    let (tx, mut rx) = mpsc::channel(2);
    let mut state = AppState::default();
    state.pending_login = Some("ghost".to_string());

    handle_command(Command::FetchUser("ghost".to_string()), client, tx).unwrap();

    let action = rx.recv().await.unwrap();
    crate::app::reducer::update(&mut state, action);

    assert_eq!(state.mode, crate::app::state::AppMode::Error);
    assert_eq!(state.pending_login, None);
    let error = state.last_error.unwrap();
    assert!(error.message.contains("Lookup of ghost failed: 404 Not Found"));
    assert!(error.suggestions.iter().any(|s| s.contains("No such user")));
}

#[tokio::test(start_paused = true)]
async fn test_search_select_and_show_details() {
    let mut mock = MockSearchFacade::new();
    mock.expect_search_by_prefix().returning(|prefix| {
        Ok(["octocat", "octokit"]
            .into_iter()
            .filter(|login| login.starts_with(prefix))
            .map(user)
            .collect())
    });
    mock.expect_fetch_exact()
        .with(mockall::predicate::eq("octokit"))
        .returning(|login| {
            Ok(GithubUser {
                name: Some("Octokit".to_string()),
                public_repos: Some(42),
                ..user(login)
            })
        });

    let client = Arc::new(mock);
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    let (event_tx, event_rx) = mpsc::channel(100);

    let driver = tokio::spawn(async move {
        for c in "oct".chars() {
            event_tx.send(Ok(key(KeyCode::Char(c)))).await.unwrap();
        }
        // Past the debounce window and the request.
        tokio::time::sleep(Duration::from_millis(800)).await;
        event_tx.send(Ok(key(KeyCode::Down))).await.unwrap();
        event_tx.send(Ok(key(KeyCode::Down))).await.unwrap();
        event_tx.send(Ok(key(KeyCode::Enter))).await.unwrap();
        tokio::time::sleep(Duration::from_millis(800)).await;
        event_tx.send(Ok(key(KeyCode::Tab))).await.unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        event_tx.send(Ok(key(KeyCode::Char('q')))).await.unwrap();
    });

    run_loop_with_events(
        &mut terminal,
        AppState::default(),
        client,
        Duration::from_millis(500),
        event_rx,
    )
    .await
    .unwrap();
    driver.await.unwrap();

    let text = screen(&terminal);
    assert!(text.contains("\"name\": \"Octokit\""));
    assert!(text.contains("\"public_repos\": 42"));
}

#[tokio::test(start_paused = true)]
async fn test_blur_grace_allows_late_click() {
    let mut mock = MockSearchFacade::new();
    mock.expect_search_by_prefix()
        .returning(|_| Ok(vec![user("octocat")]));
    mock.expect_fetch_exact().returning(|login| Ok(user(login)));

    let client = Arc::new(mock);
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    let (event_tx, event_rx) = mpsc::channel(100);

    let driver = tokio::spawn(async move {
        event_tx.send(Ok(key(KeyCode::Char('o')))).await.unwrap();
        tokio::time::sleep(Duration::from_millis(800)).await;
        // Blur to the details panel, then click the option inside the grace period.
        event_tx.send(Ok(key(KeyCode::Tab))).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        let click = Event::Mouse(crossterm::event::MouseEvent {
            kind: crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: 3,
            row: 5,
            modifiers: KeyModifiers::empty(),
        });
        event_tx.send(Ok(click)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(800)).await;
        event_tx.send(Ok(ctrl_c())).await.unwrap();
    });

    run_loop_with_events(
        &mut terminal,
        AppState::default(),
        client,
        Duration::from_millis(500),
        event_rx,
    )
    .await
    .unwrap();
    driver.await.unwrap();

    let text = screen(&terminal);
    assert!(text.contains("\"login\": \"octocat\""));
}

#[tokio::test]
async fn test_keystroke_fuzzing() {
    let mut mock = MockSearchFacade::new();
    // Setup mock to return some data to avoid crashes in UI
    mock.expect_search_by_prefix().returning(|prefix| {
        Ok((0..prefix.len() % 7)
            .map(|i| user(&format!("{prefix}{i}")))
            .collect())
    });
    mock.expect_fetch_exact().returning(|login| {
        if login.len() % 3 == 0 {
            Err(SearchError::Http {
                status: 404,
                status_text: "Not Found".to_string(),
                message: None,
            })
        } else {
            Ok(user(login))
        }
    });
    mock.expect_origin()
        .returning(|| "https://api.github.com".to_string());

    let client = Arc::new(mock);
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let app_state = AppState::default();

    let (event_tx, event_rx) = mpsc::channel(100);

    // Spawn a task to feed random events
    let fuzzer_handle = tokio::spawn(async move {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..10000 {
            let event = match rng.gen_range(0..100) {
                0..=5 => {
                    let w = rng.gen_range(10..200);
                    let h = rng.gen_range(10..100);
                    Event::Resize(w, h)
                }
                6..=15 => generate_random_mouse(&mut rng, ratatui::layout::Size::new(80, 24)),
                _ => generate_random_key(&mut rng),
            };
            if event_tx.send(Ok(event)).await.is_err() {
                break;
            }
            // Yield to allow the loop to process events
            if rng.gen_bool(0.1) {
                tokio::task::yield_now().await;
            }
        }
        // Dismiss a possible error overlay, then quit
        let _ = event_tx.send(Ok(key(KeyCode::Esc))).await;
        let _ = event_tx.send(Ok(ctrl_c())).await;
    });

    // Run the real loop (with a test backend)
    let result = tokio::time::timeout(
        std::time::Duration::from_secs(30),
        run_loop_with_events(
            &mut terminal,
            app_state,
            client,
            Duration::from_millis(5),
            event_rx,
        ),
    )
    .await;

    match result {
        Ok(res) => res.unwrap(),
        Err(_) => panic!("Fuzzer timed out - possible deadlock or too slow"),
    }

    fuzzer_handle.await.unwrap();
}

fn generate_random_key<R: Rng>(rng: &mut R) -> Event {
    let code = match rng.gen_range(0..20) {
        0 => KeyCode::Esc,
        1 => KeyCode::Enter,
        2 => KeyCode::Left,
        3 => KeyCode::Right,
        4 => KeyCode::Up,
        5 => KeyCode::Down,
        6 => KeyCode::Home,
        7 => KeyCode::End,
        8 => KeyCode::PageUp,
        9 => KeyCode::PageDown,
        10 => KeyCode::Tab,
        11 => KeyCode::BackTab,
        12 => KeyCode::Delete,
        13 => KeyCode::Backspace,
        _ => {
            let c = rng.gen_range(b' '..=b'~') as char;
            KeyCode::Char(c)
        }
    };

    let mut modifiers = KeyModifiers::empty();
    // Ctrl+C would end the run early.
    if rng.gen_bool(0.1) && code != KeyCode::Char('c') {
        modifiers.insert(KeyModifiers::CONTROL);
    }
    if rng.gen_bool(0.1) {
        modifiers.insert(KeyModifiers::ALT);
    }
    if rng.gen_bool(0.1) {
        modifiers.insert(KeyModifiers::SHIFT);
    }

    Event::Key(KeyEvent::new(code, modifiers))
}

fn generate_random_mouse<R: Rng>(rng: &mut R, size: ratatui::layout::Size) -> Event {
    use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
    let kind = match rng.gen_range(0..5) {
        0 => MouseEventKind::Down(MouseButton::Left),
        1 => MouseEventKind::Down(MouseButton::Right),
        2 => MouseEventKind::ScrollUp,
        3 => MouseEventKind::ScrollDown,
        _ => MouseEventKind::Moved,
    };

    let column = rng.gen_range(0..size.width);
    let row = rng.gen_range(0..size.height);

    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::empty(),
    })
}
