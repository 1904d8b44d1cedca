//! HTML sanitization of free-text fields
//!
//! Runs once per write, after validation and before the repository call.
//! `name` and `content` are checked again once cleaned: markup that strips
//! down to nothing must not reach the store.

use shared::models::{CardCreate, CardUpdate, ListCreate, ListUpdate, TagCreate, TagUpdate};
use shared::{AppResult, Patch};

use crate::validation::check_cleaned_text;

pub struct HtmlSanitizer {
    cleaner: ammonia::Builder<'static>,
}

impl HtmlSanitizer {
    pub fn new() -> Self {
        let mut cleaner = ammonia::Builder::default();
        cleaner
            .strip_comments(true)
            .link_rel(Some("noopener noreferrer"))
            .rm_tags(&["img"])
            .add_clean_content_tags(&["iframe", "object", "embed", "noscript"]);
        Self { cleaner }
    }

    pub fn clean(&self, html: &str) -> String {
        self.cleaner.clean(html).to_string()
    }

    /// Clean a required text field and re-apply its length rule
    fn clean_text(&self, key: &str, text: &str) -> AppResult<String> {
        let cleaned = self.clean(text);
        check_cleaned_text(key, &cleaned)?;
        Ok(cleaned)
    }
}

impl Default for HtmlSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Payloads whose text fields are cleaned before persistence
pub trait Sanitize: Sized {
    fn sanitize(self, sanitizer: &HtmlSanitizer) -> AppResult<Self>;
}

impl Sanitize for ListCreate {
    fn sanitize(self, sanitizer: &HtmlSanitizer) -> AppResult<Self> {
        Ok(Self {
            name: sanitizer.clean_text("name", &self.name)?,
            ..self
        })
    }
}

impl Sanitize for ListUpdate {
    fn sanitize(self, sanitizer: &HtmlSanitizer) -> AppResult<Self> {
        let name = self
            .name
            .as_deref()
            .map(|n| sanitizer.clean_text("name", n))
            .transpose()?;
        Ok(Self { name, ..self })
    }
}

impl Sanitize for CardCreate {
    fn sanitize(self, sanitizer: &HtmlSanitizer) -> AppResult<Self> {
        Ok(Self {
            content: sanitizer.clean_text("content", &self.content)?,
            color: self.color.map(|c| sanitizer.clean(&c)),
            ..self
        })
    }
}

impl Sanitize for CardUpdate {
    fn sanitize(self, sanitizer: &HtmlSanitizer) -> AppResult<Self> {
        let content = self
            .content
            .as_deref()
            .map(|c| sanitizer.clean_text("content", c))
            .transpose()?;
        let color: Patch<String> = self.color.map(|c| sanitizer.clean(&c));
        Ok(Self {
            content,
            color,
            ..self
        })
    }
}

impl Sanitize for TagCreate {
    fn sanitize(self, sanitizer: &HtmlSanitizer) -> AppResult<Self> {
        Ok(Self {
            name: sanitizer.clean_text("name", &self.name)?,
        })
    }
}

impl Sanitize for TagUpdate {
    fn sanitize(self, sanitizer: &HtmlSanitizer) -> AppResult<Self> {
        let name = self
            .name
            .as_deref()
            .map(|n| sanitizer.clean_text("name", n))
            .transpose()?;
        Ok(Self { name })
    }
}
