//! Payload validation
//!
//! Every write goes through here before touching the store. Fields of the raw
//! JSON object are checked in a fixed order; the result is the typed payload
//! or a 400 carrying one message per violated rule.
//! A field stops being checked after its first violation; other fields are
//! still checked.

use serde_json::{Map, Value};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{CardCreate, CardUpdate, ListCreate, ListUpdate, Patch, TagCreate, TagUpdate};
use sqlx::SqlitePool;

use crate::db::repository::{card, list, tag};

const MIN_TEXT_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Mandatory fields must be present
    Create,
    /// Only present fields are checked
    Update,
}

/// Raw state of one key in the request body
enum Field<'a> {
    Missing,
    Null,
    Value(&'a Value),
}

fn field<'a>(body: &'a Map<String, Value>, key: &str) -> Field<'a> {
    match body.get(key) {
        None => Field::Missing,
        Some(Value::Null) => Field::Null,
        Some(v) => Field::Value(v),
    }
}

/// Integer from a JSON number or a numeric string (`3`, `"3"`, `" 3 "`)
///
/// Numbers with a fractional part are rejected.
pub fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .filter(|f| *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Collected rule violations, in check order
#[derive(Default)]
struct Violations {
    messages: Vec<String>,
    code: Option<ErrorCode>,
}

impl Violations {
    fn push(&mut self, msg: impl Into<String>) {
        self.messages.push(msg.into());
    }

    /// Record a violation with a specific error code (first one wins)
    fn push_rule(&mut self, code: ErrorCode, msg: impl Into<String>) {
        self.code.get_or_insert(code);
        self.push(msg);
    }

    fn finish<T>(self, value: T) -> AppResult<T> {
        if self.messages.is_empty() {
            return Ok(value);
        }
        let mut err = AppError::validation(self.messages);
        if let Some(code) = self.code {
            err.code = code;
        }
        Err(err)
    }
}

/// Required text field (`name`, `content`)
fn check_text(
    body: &Map<String, Value>,
    key: &str,
    mode: Mode,
    out: &mut Violations,
) -> Option<String> {
    let value = match field(body, key) {
        Field::Missing if mode == Mode::Update => return None,
        Field::Missing | Field::Null => {
            out.push(format!("{key} can't be empty"));
            return None;
        }
        Field::Value(v) => v,
    };

    let Some(text) = value.as_str() else {
        out.push(format!("{key} must be a string"));
        return None;
    };
    if let Some(msg) = text_rule(key, text) {
        out.push(msg);
        return None;
    }
    Some(text.to_string())
}

fn text_rule(key: &str, text: &str) -> Option<String> {
    if text.is_empty() {
        return Some(format!("{key} can't be empty"));
    }
    if text.chars().count() < MIN_TEXT_LEN {
        return Some(format!("{key} must have at least {MIN_TEXT_LEN} caracters"));
    }
    None
}

/// Length rule for a text field after HTML cleaning
pub fn check_cleaned_text(key: &str, text: &str) -> AppResult<()> {
    match text_rule(key, text) {
        Some(msg) => Err(AppError::invalid(msg)),
        None => Ok(()),
    }
}

/// Optional `position`; `null` clears it, `0` is a real position
fn check_position(body: &Map<String, Value>, out: &mut Violations) -> Patch<i64> {
    match field(body, "position") {
        Field::Missing => Patch::Keep,
        Field::Null => Patch::Clear,
        Field::Value(v) => match parse_integer(v) {
            Some(p) => Patch::Set(p),
            None => {
                out.push("position must be a number");
                Patch::Keep
            }
        },
    }
}

/// Optional `color`; any string is accepted, `null` clears it
fn check_color(body: &Map<String, Value>, out: &mut Violations) -> Patch<String> {
    match field(body, "color") {
        Field::Missing => Patch::Keep,
        Field::Null => Patch::Clear,
        Field::Value(Value::String(s)) => Patch::Set(s.clone()),
        Field::Value(_) => {
            out.push("color must be a string");
            Patch::Keep
        }
    }
}

/// `list_id` must parse and point at an existing list
async fn check_list_id(
    pool: &SqlitePool,
    body: &Map<String, Value>,
    mode: Mode,
    out: &mut Violations,
) -> AppResult<Option<i64>> {
    let raw = match field(body, "list_id") {
        Field::Missing if mode == Mode::Update => return Ok(None),
        Field::Missing | Field::Null => None,
        Field::Value(v) => parse_integer(v),
    };
    let Some(list_id) = raw else {
        out.push("list_id must be an integer");
        return Ok(None);
    };
    if list::find_by_id(pool, list_id).await?.is_none() {
        out.push_rule(ErrorCode::CardListMissing, card::LIST_MISSING);
        return Ok(None);
    }
    Ok(Some(list_id))
}

// ==================== List ====================

pub async fn list_create(pool: &SqlitePool, body: &Map<String, Value>) -> AppResult<ListCreate> {
    let mut out = Violations::default();
    let name = check_text(body, "name", Mode::Create, &mut out);
    let position = check_position(body, &mut out);

    if let Some(name) = &name
        && list::find_by_name(pool, name).await?.is_some()
    {
        out.push_rule(ErrorCode::ListNameExists, list::NAME_IN_USE);
    }

    out.finish(ListCreate {
        name: name.unwrap_or_default(),
        position: position.value().copied(),
    })
}

pub async fn list_update(
    pool: &SqlitePool,
    id: i64,
    body: &Map<String, Value>,
) -> AppResult<ListUpdate> {
    let mut out = Violations::default();
    let name = check_text(body, "name", Mode::Update, &mut out);
    let position = check_position(body, &mut out);

    if let Some(name) = &name
        && list::find_other_by_name(pool, name, id).await?.is_some()
    {
        out.push_rule(ErrorCode::ListNameExists, list::NAME_IN_USE_ON_OTHER);
    }

    out.finish(ListUpdate { name, position })
}

// ==================== Card ====================

pub async fn card_create(pool: &SqlitePool, body: &Map<String, Value>) -> AppResult<CardCreate> {
    let mut out = Violations::default();
    let list_id = check_list_id(pool, body, Mode::Create, &mut out).await?;
    let content = check_text(body, "content", Mode::Create, &mut out);
    let position = check_position(body, &mut out);
    let color = check_color(body, &mut out);

    out.finish(CardCreate {
        content: content.unwrap_or_default(),
        position: position.value().copied(),
        color: color.value().cloned(),
        list_id: list_id.unwrap_or_default(),
    })
}

pub async fn card_update(pool: &SqlitePool, body: &Map<String, Value>) -> AppResult<CardUpdate> {
    let mut out = Violations::default();
    let list_id = check_list_id(pool, body, Mode::Update, &mut out).await?;
    let content = check_text(body, "content", Mode::Update, &mut out);
    let position = check_position(body, &mut out);
    let color = check_color(body, &mut out);

    out.finish(CardUpdate {
        content,
        position,
        color,
        list_id,
    })
}

// ==================== Tag ====================

pub async fn tag_create(pool: &SqlitePool, body: &Map<String, Value>) -> AppResult<TagCreate> {
    let mut out = Violations::default();
    let name = check_text(body, "name", Mode::Create, &mut out);

    if let Some(name) = &name
        && tag::find_by_name(pool, name).await?.is_some()
    {
        out.push_rule(ErrorCode::TagNameExists, tag::NAME_IN_USE);
    }

    out.finish(TagCreate {
        name: name.unwrap_or_default(),
    })
}

pub async fn tag_update(
    pool: &SqlitePool,
    id: i64,
    body: &Map<String, Value>,
) -> AppResult<TagUpdate> {
    let mut out = Violations::default();
    let name = check_text(body, "name", Mode::Update, &mut out);

    if let Some(name) = &name
        && tag::find_other_by_name(pool, name, id).await?.is_some()
    {
        out.push_rule(ErrorCode::TagNameExists, tag::NAME_IN_USE_ON_OTHER);
    }

    out.finish(TagUpdate { name })
}
