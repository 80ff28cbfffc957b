//! Full client lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises the core client
//! operations over real HTTP using ureq. Validates that request building,
//! response parsing and todo ordering work end-to-end with the actual server.

use notes_core::{
    ApiError, CreateNote, CreateTodo, HttpMethod, HttpRequest, HttpResponse, NotesClient, Priority,
    RecordId, UpdateNote, UpdateTodo,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            agent.put(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
        (HttpMethod::Patch, Some(body)) => {
            agent.patch(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
        .collect();
    let body = response.body_mut().read_to_vec().unwrap_or_default();

    HttpResponse {
        status,
        headers,
        body,
    }
}

fn start_server() -> NotesClient {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    NotesClient::new(&format!("http://{addr}"))
}

fn create(client: &NotesClient, title: &str, priority: Option<&str>, deadline: Option<&str>) -> RecordId {
    let input = CreateTodo {
        title: title.to_string(),
        description: None,
        priority: priority.map(Priority::parse),
        deadline: deadline.and_then(notes_core::parse_deadline),
    };
    let req = client.build_create_todo(&input).unwrap();
    client.parse_create_todo(execute(req)).unwrap().id
}

#[test]
fn todo_lifecycle_and_views() {
    let client = start_server();

    // Empty to start with.
    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert!(todos.is_empty(), "expected empty list");

    let low = create(&client, "Water plants", Some("Low"), None);
    let later = create(&client, "Renew passport", Some("Urgent"), Some("2099-01-01T00:00"));
    let sooner = create(&client, "Submit report", Some("Urgent"), Some("2050-01-01T00:00"));
    let odd = create(&client, "Someday", Some("Bogus"), None);

    // The backend returns insertion order; the views reorder.
    let views = client.parse_todo_views(execute(client.build_list_todos())).unwrap();
    let active: Vec<_> = views.active.iter().map(|t| t.id.clone()).collect();
    assert_eq!(active, vec![sooner, later.clone(), odd.clone(), low.clone()]);
    assert!(views.completed.is_empty());

    // Toggle moves a todo into the completed view.
    let toggled = client
        .parse_toggle_todo(execute(client.build_toggle_todo(&later)))
        .unwrap();
    assert!(toggled.completed);
    let views = client.parse_todo_views(execute(client.build_list_todos())).unwrap();
    assert_eq!(views.active.len(), 3);
    assert_eq!(views.completed[0].id, later);

    // Update keeps untouched fields.
    let update = UpdateTodo {
        priority: Some(Priority::High),
        ..UpdateTodo::default()
    };
    let updated = client
        .parse_update_todo(execute(client.build_update_todo(&low, &update).unwrap()))
        .unwrap();
    assert_eq!(updated.priority, Some(Priority::High));
    assert_eq!(updated.title, "Water plants");

    let fetched = client.parse_get_todo(execute(client.build_get_todo(&low))).unwrap();
    assert_eq!(fetched, updated);

    // Delete, then it is gone.
    client
        .parse_delete_todo(execute(client.build_delete_todo(&odd)))
        .unwrap();
    let err = client.parse_get_todo(execute(client.build_get_todo(&odd))).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
    let err = client
        .parse_delete_todo(execute(client.build_delete_todo(&odd)))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
}

#[test]
fn blank_title_is_rejected_by_backend() {
    let client = start_server();
    let input = CreateTodo {
        title: " ".to_string(),
        ..CreateTodo::default()
    };
    let err = client
        .parse_create_todo(execute(client.build_create_todo(&input).unwrap()))
        .unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 422, .. }));
}

#[test]
fn note_lifecycle() {
    let client = start_server();

    let input = CreateNote {
        title: "Standup".to_string(),
        content: "ship the release notes today".to_string(),
        category: Some("work".to_string()),
    };
    let note = client
        .parse_create_note(execute(client.build_create_note(&input).unwrap()))
        .unwrap();
    assert_eq!(note.category.as_deref(), Some("work"));

    let update = UpdateNote {
        title: "Standup".to_string(),
        content: "ship the release notes tomorrow".to_string(),
        category: None,
    };
    let note = client
        .parse_update_note(execute(client.build_update_note(&note.id, &update).unwrap()))
        .unwrap();
    assert_eq!(note.content, "ship the release notes tomorrow");
    assert_eq!(note.category.as_deref(), Some("work"));

    let summary = client
        .parse_summarize_note(execute(client.build_summarize_note(&note.id)))
        .unwrap();
    assert_eq!(summary.summary, "ship the release notes tomorrow");

    let notes = client.parse_list_notes(execute(client.build_list_notes())).unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].summary.as_deref(), Some("ship the release notes tomorrow"));

    let audio = client
        .parse_speak_note(execute(client.build_speak_note(&note.id)))
        .unwrap();
    assert_eq!(audio.content_type, "audio/wav");
    assert!(audio.bytes.starts_with(b"RIFF"));

    client
        .parse_delete_note(execute(client.build_delete_note(&note.id)))
        .unwrap();
    let err = client
        .parse_speak_note(execute(client.build_speak_note(&note.id)))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
}
