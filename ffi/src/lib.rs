//! C-ABI wrapper around `notes-core`.
//!
//! # Overview
//! Exposes the notes and todos API through `extern "C"` functions so any
//! language with a C FFI can build and parse HTTP requests/responses, and get
//! todo snapshots back already ordered and split into active/completed views,
//! without linking to Rust's async runtime or serde directly.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-operation `notes_build_*` / `notes_parse_*` mirrors the core API 1:1.
//! - A single `FfiResult` envelope with `FfiDataTag` + `void* data` conveys
//!   success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `notes_free_*` function to release them.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use chrono::NaiveDateTime;

use notes_core::http::{HttpRequest, HttpResponse};
use notes_core::types::{CreateNote, CreateTodo, UpdateNote, UpdateTodo};
use notes_core::{ApiError, NotesClient, Priority, RecordId};

use types::*;

// ---------------------------------------------------------------------------
// Argument helpers
// ---------------------------------------------------------------------------

/// Borrow a C string as UTF-8. Null or invalid UTF-8 yields `None`.
fn read_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

fn read_string(ptr: *const c_char) -> Option<String> {
    read_str(ptr).map(str::to_string)
}

/// Ids are opaque; only null, invalid UTF-8 and empty text are rejected.
fn read_id(ptr: *const c_char) -> Option<RecordId> {
    read_str(ptr)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

/// `Some(None)` for a null pointer, `None` when the text is not a deadline.
fn read_deadline(ptr: *const c_char) -> Option<Option<NaiveDateTime>> {
    if ptr.is_null() {
        return Some(None);
    }
    read_str(ptr).and_then(notes_core::parse_deadline).map(Some)
}

/// Convert an `FfiHttpResponse` to a core `HttpResponse`.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() || resp.body_len == 0 {
        Vec::new()
    } else {
        unsafe { std::slice::from_raw_parts(resp.body, resp.body_len) }.to_vec()
    };
    let mut core = HttpResponse::new(resp.status, body);
    if let Some(content_type) = read_str(resp.content_type) {
        core = core.with_header("content-type", content_type);
    }
    core
}

fn build_with(
    client: *const FfiNotesClient,
    build: impl FnOnce(&NotesClient) -> Option<HttpRequest>,
) -> *mut FfiHttpRequest {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        match build(&client.inner) {
            Some(req) => FfiHttpRequest::from_core(req),
            None => std::ptr::null_mut(),
        }
    }))
    .unwrap_or(std::ptr::null_mut())
}

fn build_for_id(
    client: *const FfiNotesClient,
    id: *const c_char,
    build: impl FnOnce(&NotesClient, &RecordId) -> HttpRequest,
) -> *mut FfiHttpRequest {
    build_with(client, |c| read_id(id).map(|id| build(c, &id)))
}

fn parse_with<T>(
    op: &str,
    client: *const FfiNotesClient,
    response: *const FfiHttpResponse,
    parse: impl FnOnce(&NotesClient, HttpResponse) -> Result<T, ApiError>,
    wrap: impl FnOnce(T) -> *mut FfiResult,
) -> *mut FfiResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiResult::null_arg("client");
        }
        if response.is_null() {
            return FfiResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let core_resp = ffi_response_to_core(unsafe { &*response });
        match parse(&client.inner, core_resp) {
            Ok(value) => wrap(value),
            Err(e) => FfiResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| FfiResult::panic(&format!("panic in {op}")))
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `NotesClient` bound to `base_url`.
///
/// Returns null if `base_url` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `notes_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn notes_client_new(base_url: *const c_char) -> *mut FfiNotesClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let url = read_str(base_url).unwrap_or("");
        let client = NotesClient::new(url);
        Box::into_raw(Box::new(FfiNotesClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `notes_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn notes_client_free(client: *mut FfiNotesClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Todos: build
// ---------------------------------------------------------------------------

/// Build a request listing all todos.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `notes_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn notes_build_list_todos(client: *const FfiNotesClient) -> *mut FfiHttpRequest {
    build_with(client, |c| Some(c.build_list_todos()))
}

/// Build a request fetching one todo. Returns null on a null or empty `id`.
#[unsafe(no_mangle)]
pub extern "C" fn notes_build_get_todo(
    client: *const FfiNotesClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    build_for_id(client, id, |c, id| c.build_get_todo(id))
}

/// Build a request creating a todo.
///
/// `description`, `priority` and `deadline` may be null. Returns null if
/// `title` is null or `deadline` is given but not a recognizable timestamp.
#[unsafe(no_mangle)]
pub extern "C" fn notes_build_create_todo(
    client: *const FfiNotesClient,
    title: *const c_char,
    description: *const c_char,
    priority: *const c_char,
    deadline: *const c_char,
) -> *mut FfiHttpRequest {
    build_with(client, |c| {
        let input = CreateTodo {
            title: read_string(title)?,
            description: read_string(description),
            priority: read_str(priority).map(Priority::parse),
            deadline: read_deadline(deadline)?,
        };
        c.build_create_todo(&input).ok()
    })
}

/// Build a request updating a todo.
///
/// Null string arguments are left unchanged. `completed` uses tri-state:
/// -1 = skip, 0 = false, 1 = true.
#[unsafe(no_mangle)]
pub extern "C" fn notes_build_update_todo(
    client: *const FfiNotesClient,
    id: *const c_char,
    title: *const c_char,
    description: *const c_char,
    priority: *const c_char,
    deadline: *const c_char,
    completed: i32,
) -> *mut FfiHttpRequest {
    build_with(client, |c| {
        let id = read_id(id)?;
        let input = UpdateTodo {
            title: read_string(title),
            description: read_string(description),
            priority: read_str(priority).map(Priority::parse),
            deadline: read_deadline(deadline)?,
            completed: match completed {
                0 => Some(false),
                1 => Some(true),
                _ => None,
            },
        };
        c.build_update_todo(&id, &input).ok()
    })
}

/// Build a request deleting a todo. Returns null on a null or empty `id`.
#[unsafe(no_mangle)]
pub extern "C" fn notes_build_delete_todo(
    client: *const FfiNotesClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    build_for_id(client, id, |c, id| c.build_delete_todo(id))
}

/// Build a request flipping a todo's completion state.
#[unsafe(no_mangle)]
pub extern "C" fn notes_build_toggle_todo(
    client: *const FfiNotesClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    build_for_id(client, id, |c, id| c.build_toggle_todo(id))
}

// ---------------------------------------------------------------------------
// Todos: parse
// ---------------------------------------------------------------------------

/// Parse a list-todos response as-is. `data_tag = TodoList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn notes_parse_list_todos(
    client: *const FfiNotesClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with(
        "notes_parse_list_todos",
        client,
        response,
        |c, r| c.parse_list_todos(r),
        FfiResult::ok_todo_list,
    )
}

/// Parse a list-todos response into ordered active/completed views.
/// `data_tag = TodoViews` on success.
#[unsafe(no_mangle)]
pub extern "C" fn notes_parse_todo_views(
    client: *const FfiNotesClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with(
        "notes_parse_todo_views",
        client,
        response,
        |c, r| c.parse_todo_views(r),
        FfiResult::ok_todo_views,
    )
}

#[unsafe(no_mangle)]
pub extern "C" fn notes_parse_get_todo(
    client: *const FfiNotesClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with(
        "notes_parse_get_todo",
        client,
        response,
        |c, r| c.parse_get_todo(r),
        FfiResult::ok_todo,
    )
}

/// `data_tag = Todo` on success (status 201).
#[unsafe(no_mangle)]
pub extern "C" fn notes_parse_create_todo(
    client: *const FfiNotesClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with(
        "notes_parse_create_todo",
        client,
        response,
        |c, r| c.parse_create_todo(r),
        FfiResult::ok_todo,
    )
}

#[unsafe(no_mangle)]
pub extern "C" fn notes_parse_update_todo(
    client: *const FfiNotesClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with(
        "notes_parse_update_todo",
        client,
        response,
        |c, r| c.parse_update_todo(r),
        FfiResult::ok_todo,
    )
}

/// `data_tag = None` on success (status 204).
#[unsafe(no_mangle)]
pub extern "C" fn notes_parse_delete_todo(
    client: *const FfiNotesClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with(
        "notes_parse_delete_todo",
        client,
        response,
        |c, r| c.parse_delete_todo(r),
        |()| FfiResult::ok_empty(),
    )
}

#[unsafe(no_mangle)]
pub extern "C" fn notes_parse_toggle_todo(
    client: *const FfiNotesClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with(
        "notes_parse_toggle_todo",
        client,
        response,
        |c, r| c.parse_toggle_todo(r),
        FfiResult::ok_todo,
    )
}

// ---------------------------------------------------------------------------
// Notes: build
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub extern "C" fn notes_build_list_notes(client: *const FfiNotesClient) -> *mut FfiHttpRequest {
    build_with(client, |c| Some(c.build_list_notes()))
}

/// Build a request creating a note. `category` may be null.
#[unsafe(no_mangle)]
pub extern "C" fn notes_build_create_note(
    client: *const FfiNotesClient,
    title: *const c_char,
    content: *const c_char,
    category: *const c_char,
) -> *mut FfiHttpRequest {
    build_with(client, |c| {
        let input = CreateNote {
            title: read_string(title)?,
            content: read_string(content)?,
            category: read_string(category),
        };
        c.build_create_note(&input).ok()
    })
}

/// Build a request replacing a note's title and content. A null `category`
/// keeps the stored one.
#[unsafe(no_mangle)]
pub extern "C" fn notes_build_update_note(
    client: *const FfiNotesClient,
    id: *const c_char,
    title: *const c_char,
    content: *const c_char,
    category: *const c_char,
) -> *mut FfiHttpRequest {
    build_with(client, |c| {
        let id = read_id(id)?;
        let input = UpdateNote {
            title: read_string(title)?,
            content: read_string(content)?,
            category: read_string(category),
        };
        c.build_update_note(&id, &input).ok()
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn notes_build_delete_note(
    client: *const FfiNotesClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    build_for_id(client, id, |c, id| c.build_delete_note(id))
}

#[unsafe(no_mangle)]
pub extern "C" fn notes_build_summarize_note(
    client: *const FfiNotesClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    build_for_id(client, id, |c, id| c.build_summarize_note(id))
}

#[unsafe(no_mangle)]
pub extern "C" fn notes_build_speak_note(
    client: *const FfiNotesClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    build_for_id(client, id, |c, id| c.build_speak_note(id))
}

// ---------------------------------------------------------------------------
// Notes: parse
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub extern "C" fn notes_parse_list_notes(
    client: *const FfiNotesClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with(
        "notes_parse_list_notes",
        client,
        response,
        |c, r| c.parse_list_notes(r),
        FfiResult::ok_note_list,
    )
}

#[unsafe(no_mangle)]
pub extern "C" fn notes_parse_create_note(
    client: *const FfiNotesClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with(
        "notes_parse_create_note",
        client,
        response,
        |c, r| c.parse_create_note(r),
        FfiResult::ok_note,
    )
}

#[unsafe(no_mangle)]
pub extern "C" fn notes_parse_update_note(
    client: *const FfiNotesClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with(
        "notes_parse_update_note",
        client,
        response,
        |c, r| c.parse_update_note(r),
        FfiResult::ok_note,
    )
}

#[unsafe(no_mangle)]
pub extern "C" fn notes_parse_delete_note(
    client: *const FfiNotesClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with(
        "notes_parse_delete_note",
        client,
        response,
        |c, r| c.parse_delete_note(r),
        |()| FfiResult::ok_empty(),
    )
}

/// `data_tag = Summary` on success; `data` is the summary as a `char*`.
#[unsafe(no_mangle)]
pub extern "C" fn notes_parse_summarize_note(
    client: *const FfiNotesClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with(
        "notes_parse_summarize_note",
        client,
        response,
        |c, r| c.parse_summarize_note(r),
        |s| FfiResult::ok_summary(s.summary),
    )
}

/// `data_tag = Audio` on success. Requires `response.content_type` to be an
/// `audio/*` type.
#[unsafe(no_mangle)]
pub extern "C" fn notes_parse_speak_note(
    client: *const FfiNotesClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with(
        "notes_parse_speak_note",
        client,
        response,
        |c, r| c.parse_speak_note(r),
        FfiResult::ok_audio,
    )
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `notes_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn notes_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiHttpRequest::release(req) });
}

/// Free an `FfiResult` returned by any `notes_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn notes_free_result(result: *mut FfiResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiResult::release(result) });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn notes_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| free_c_string(s));
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
