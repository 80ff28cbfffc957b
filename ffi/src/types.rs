//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers plus a length instead of
//! `Vec`, and tagged enums with explicit discriminants. Optional strings are
//! null when absent. Conversion and release helpers live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;

use notes_core::error::ApiError;
use notes_core::http::HttpMethod;
use notes_core::{Note, SpeechAudio, Todo, TodoViews};

/// Opaque handle to a `NotesClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiNotesClient {
    pub(crate) inner: notes_core::NotesClient,
}

/// Copy `s` into a heap C string. Interior NULs are dropped rather than
/// failing the whole conversion.
pub(crate) fn c_string(s: impl Into<String>) -> *mut c_char {
    let mut bytes = s.into().into_bytes();
    bytes.retain(|b| *b != 0);
    CString::new(bytes).unwrap_or_default().into_raw()
}

pub(crate) fn opt_c_string(s: Option<impl Into<String>>) -> *mut c_char {
    s.map_or(std::ptr::null_mut(), c_string)
}

/// Release a C string produced by `c_string`. Null is ignored.
pub(crate) fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Leak a vector as a raw `(ptr, len)` pair; empty vectors become null.
fn leak_vec<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let mut items = items.into_boxed_slice();
    let len = items.len() as u32;
    let ptr = items.as_mut_ptr();
    std::mem::forget(items);
    (ptr, len)
}

/// Reclaim a vector leaked by `leak_vec`.
unsafe fn reclaim_vec<T>(ptr: *mut T, len: u32) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    let slice = std::ptr::slice_from_raw_parts_mut(ptr, len as usize);
    Box::from_raw(slice).into_vec()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
    Patch = 4,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Patch => FfiHttpMethod::Patch,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by the `*_build_*` functions. The C caller executes the request
/// and passes the response back through the matching `*_parse_*` function.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: notes_core::HttpRequest) -> *mut Self {
        let headers: Vec<FfiHeader> = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: c_string(k),
                value: c_string(v),
            })
            .collect();
        let (headers, headers_len) = leak_vec(headers);

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: c_string(req.path),
            headers,
            headers_len,
            body: opt_c_string(req.body),
        }))
    }

    /// Release a request and everything it owns.
    pub(crate) unsafe fn release(req: *mut Self) {
        let req = Box::from_raw(req);
        free_c_string(req.path);
        free_c_string(req.body);
        for h in reclaim_vec(req.headers, req.headers_len) {
            free_c_string(h.key);
            free_c_string(h.value);
        }
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing an HTTP request,
/// then passes a pointer to a `*_parse_*` function. The FFI layer reads but
/// does not free these fields. `content_type` may be null; `body` may be
/// null when `body_len` is zero.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub content_type: *const c_char,
    pub body: *const u8,
    pub body_len: usize,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiResult`.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    NotFound = 1,
    Http = 2,
    Deserialization = 3,
    Serialization = 4,
    Panic = 5,
    NullArg = 6,
    UnexpectedContentType = 7,
}

/// Tag that tells `notes_free_result` what `FfiResult::data` points to.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    Todo = 1,
    TodoList = 2,
    TodoViews = 3,
    Note = 4,
    NoteList = 5,
    /// `data` is a `char*` holding the summary text.
    Summary = 6,
    Audio = 7,
}

/// A single todo item exposed to C.
///
/// `priority` is the label as received (null when absent); `priority_weight`
/// is the rank used for ordering. `deadline` is null when absent or
/// unparseable. `id` is the record id as text, whether the backend sent an
/// integer or a string.
///
/// Strings are NUL-terminated, so any NUL bytes inside a field are removed
/// on the way out.
#[repr(C)]
pub struct FfiTodo {
    pub id: *mut c_char,
    pub title: *mut c_char,
    pub description: *mut c_char,
    pub priority: *mut c_char,
    pub priority_weight: u8,
    pub deadline: *mut c_char,
    pub completed: bool,
    pub created_at: *mut c_char,
}

impl FfiTodo {
    fn from_core(todo: Todo) -> Self {
        let priority_weight = todo.priority_weight();
        FfiTodo {
            id: c_string(todo.id.to_string()),
            title: c_string(todo.title),
            description: opt_c_string(todo.description),
            priority: opt_c_string(todo.priority.map(|p| p.to_string())),
            priority_weight,
            deadline: opt_c_string(todo.deadline.map(|d| notes_core::deadline::format_deadline(&d))),
            completed: todo.completed,
            created_at: opt_c_string(todo.created_at.map(|t| t.to_rfc3339())),
        }
    }

    fn free_fields(&self) {
        free_c_string(self.id);
        free_c_string(self.title);
        free_c_string(self.description);
        free_c_string(self.priority);
        free_c_string(self.deadline);
        free_c_string(self.created_at);
    }
}

/// A list of todo items exposed to C.
#[repr(C)]
pub struct FfiTodoList {
    pub items: *mut FfiTodo,
    pub len: u32,
}

impl FfiTodoList {
    fn from_core(todos: Vec<Todo>) -> Self {
        let (items, len) = leak_vec(todos.into_iter().map(FfiTodo::from_core).collect());
        FfiTodoList { items, len }
    }

    unsafe fn free_items(&self) {
        for item in reclaim_vec(self.items, self.len) {
            item.free_fields();
        }
    }
}

/// Active and completed todos, each already in display order.
#[repr(C)]
pub struct FfiTodoViews {
    pub active: FfiTodoList,
    pub completed: FfiTodoList,
}

/// A note exposed to C. `summary` and `category` are null when absent.
///
/// As with `FfiTodo`, NUL bytes inside `title`, `content` or `summary` are
/// removed.
#[repr(C)]
pub struct FfiNote {
    pub id: *mut c_char,
    pub title: *mut c_char,
    pub content: *mut c_char,
    pub summary: *mut c_char,
    pub category: *mut c_char,
    pub created_at: *mut c_char,
}

impl FfiNote {
    fn from_core(note: Note) -> Self {
        FfiNote {
            id: c_string(note.id.to_string()),
            title: c_string(note.title),
            content: c_string(note.content),
            summary: opt_c_string(note.summary),
            category: opt_c_string(note.category),
            created_at: opt_c_string(note.created_at.map(|t| t.to_rfc3339())),
        }
    }

    fn free_fields(&self) {
        free_c_string(self.id);
        free_c_string(self.title);
        free_c_string(self.content);
        free_c_string(self.summary);
        free_c_string(self.category);
        free_c_string(self.created_at);
    }
}

#[repr(C)]
pub struct FfiNoteList {
    pub items: *mut FfiNote,
    pub len: u32,
}

/// Synthesized speech: raw audio bytes plus their media type.
#[repr(C)]
pub struct FfiAudio {
    pub content_type: *mut c_char,
    pub bytes: *mut u8,
    pub len: usize,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiResult {
    fn ok(data_tag: FfiDataTag, data: *mut c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag,
            data,
        }))
    }

    fn err(error_code: FfiErrorCode, http_status: u16, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiResult {
            error_code,
            error_message: c_string(msg),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn ok_todo(todo: Todo) -> *mut Self {
        let data = Box::into_raw(Box::new(FfiTodo::from_core(todo)));
        Self::ok(FfiDataTag::Todo, data.cast())
    }

    pub(crate) fn ok_todo_list(todos: Vec<Todo>) -> *mut Self {
        let data = Box::into_raw(Box::new(FfiTodoList::from_core(todos)));
        Self::ok(FfiDataTag::TodoList, data.cast())
    }

    pub(crate) fn ok_todo_views(views: TodoViews) -> *mut Self {
        let data = Box::into_raw(Box::new(FfiTodoViews {
            active: FfiTodoList::from_core(views.active),
            completed: FfiTodoList::from_core(views.completed),
        }));
        Self::ok(FfiDataTag::TodoViews, data.cast())
    }

    pub(crate) fn ok_note(note: Note) -> *mut Self {
        let data = Box::into_raw(Box::new(FfiNote::from_core(note)));
        Self::ok(FfiDataTag::Note, data.cast())
    }

    pub(crate) fn ok_note_list(notes: Vec<Note>) -> *mut Self {
        let (items, len) = leak_vec(notes.into_iter().map(FfiNote::from_core).collect());
        let data = Box::into_raw(Box::new(FfiNoteList { items, len }));
        Self::ok(FfiDataTag::NoteList, data.cast())
    }

    pub(crate) fn ok_summary(summary: String) -> *mut Self {
        Self::ok(FfiDataTag::Summary, c_string(summary).cast())
    }

    pub(crate) fn ok_audio(audio: SpeechAudio) -> *mut Self {
        let mut bytes = audio.bytes.into_boxed_slice();
        let len = bytes.len();
        let ptr = if len == 0 {
            std::ptr::null_mut()
        } else {
            let ptr = bytes.as_mut_ptr();
            std::mem::forget(bytes);
            ptr
        };
        let data = Box::into_raw(Box::new(FfiAudio {
            content_type: c_string(audio.content_type),
            bytes: ptr,
            len,
        }));
        Self::ok(FfiDataTag::Audio, data.cast())
    }

    /// Build a success result with no data payload (e.g. delete).
    pub(crate) fn ok_empty() -> *mut Self {
        Self::ok(FfiDataTag::None, std::ptr::null_mut())
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let (error_code, http_status) = match &err {
            ApiError::NotFound => (FfiErrorCode::NotFound, 404u16),
            ApiError::HttpError { status, .. } => (FfiErrorCode::Http, *status),
            ApiError::DeserializationError(_) => (FfiErrorCode::Deserialization, 0),
            ApiError::SerializationError(_) => (FfiErrorCode::Serialization, 0),
            ApiError::UnexpectedContentType(_) => (FfiErrorCode::UnexpectedContentType, 0),
        };
        Self::err(error_code, http_status, err.to_string())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::err(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::err(FfiErrorCode::Panic, 0, msg.to_string())
    }

    /// Release a result and its payload, using `data_tag` to find the type.
    pub(crate) unsafe fn release(result: *mut Self) {
        let result = Box::from_raw(result);
        free_c_string(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Todo => {
                let todo = Box::from_raw(result.data as *mut FfiTodo);
                todo.free_fields();
            }
            FfiDataTag::TodoList => {
                let list = Box::from_raw(result.data as *mut FfiTodoList);
                list.free_items();
            }
            FfiDataTag::TodoViews => {
                let views = Box::from_raw(result.data as *mut FfiTodoViews);
                views.active.free_items();
                views.completed.free_items();
            }
            FfiDataTag::Note => {
                let note = Box::from_raw(result.data as *mut FfiNote);
                note.free_fields();
            }
            FfiDataTag::NoteList => {
                let list = Box::from_raw(result.data as *mut FfiNoteList);
                for note in reclaim_vec(list.items, list.len) {
                    note.free_fields();
                }
            }
            FfiDataTag::Summary => free_c_string(result.data as *mut c_char),
            FfiDataTag::Audio => {
                let audio = Box::from_raw(result.data as *mut FfiAudio);
                free_c_string(audio.content_type);
                if !audio.bytes.is_null() && audio.len > 0 {
                    let slice = std::ptr::slice_from_raw_parts_mut(audio.bytes, audio.len);
                    drop(Box::from_raw(slice));
                }
            }
            FfiDataTag::None => {}
        }
    }
}
