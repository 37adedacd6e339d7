//! Parsed entities and their positional field mappers.
//!
//! Each schema maps the tokenized fields of one value tuple onto a typed
//! record in dump column order. Integer columns must parse as integers or
//! the record is rejected; rejection is per-record and never aborts the run.

use crate::tokenizer::clean_value;
use serde::Serialize;

/// Why a single record was rejected. The run continues with the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    /// An integer column did not parse (commonly column-count drift)
    BadInt {
        field: &'static str,
        value: String,
    },
    /// The tuple has fewer fields than the schema expects
    MissingField {
        field: &'static str,
        index: usize,
    },
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowError::BadInt { field, value } => {
                write!(f, "invalid integer for `{}`: {}", field, value)
            }
            RowError::MissingField { field, index } => {
                write!(f, "missing field `{}` at position {}", field, index)
            }
        }
    }
}

/// A table schema the extractor knows how to parse.
///
/// Implementations supply the dump table name, the expected field count,
/// the positional mapper, and the accessors the summary reporter needs.
pub trait TableRecord: Serialize + Sized {
    /// Table name as it appears in the dump's INSERT statement
    const TABLE: &'static str;
    /// Number of positional fields per value tuple
    const FIELD_COUNT: usize;
    /// Built-in cap on lines scanned after the INSERT marker
    const SCAN_LIMIT: Option<usize> = None;

    /// Map one tokenized value tuple onto the schema.
    fn from_fields(fields: &[String]) -> Result<Self, RowError>;

    /// Foreign-key value the summary groups by.
    fn group_key(&self) -> i64;

    /// Human label for the grouping column ("trainer", "program", "unit").
    fn group_label() -> &'static str;

    /// Soft-deleted records are excluded from summaries.
    fn is_deleted(&self) -> bool;

    /// Published check, for schemas that carry a status column.
    fn is_published(&self) -> Option<bool> {
        None
    }
}

/// Positional cursor over the tokenized fields of one tuple.
struct Fields<'a> {
    fields: &'a [String],
    pos: usize,
}

impl<'a> Fields<'a> {
    fn new(fields: &'a [String]) -> Self {
        Self { fields, pos: 0 }
    }

    fn next(&mut self, name: &'static str) -> Result<&'a str, RowError> {
        let token = self.fields.get(self.pos).ok_or(RowError::MissingField {
            field: name,
            index: self.pos,
        })?;
        self.pos += 1;
        Ok(token)
    }

    /// Required integer column. Parses the raw token, so a quoted value
    /// rejects the record the same way column-count drift does.
    fn int(&mut self, name: &'static str) -> Result<i64, RowError> {
        let token = self.next(name)?;
        token.parse::<i64>().map_err(|_| RowError::BadInt {
            field: name,
            value: token.to_string(),
        })
    }

    /// Nullable integer column.
    fn int_opt(&mut self, name: &'static str) -> Result<Option<i64>, RowError> {
        let token = self.next(name)?;
        if token == "NULL" {
            return Ok(None);
        }
        token.parse::<i64>().map(Some).map_err(|_| RowError::BadInt {
            field: name,
            value: token.to_string(),
        })
    }

    /// Nullable text column: `NULL` becomes absent, quoted literals are
    /// unquoted and unescaped.
    fn text(&mut self, name: &'static str) -> Result<Option<String>, RowError> {
        Ok(clean_value(self.next(name)?))
    }
}

const PUBLISHED: &str = "PUBLISHED";

/// One row of `trainer_programs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub id: i64,
    pub trainer_id: i64,
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub picture: Option<String>,
    pub url_slug: Option<String>,
    pub faq: Option<String>,
    pub unit_length: Option<String>,
    pub unit_visibility: Option<String>,
    pub language_id: i64,
    pub status: Option<String>,
    pub comments_enabled: i64,
    pub feedback_enabled: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub deleted_at: Option<String>,
}

impl TableRecord for Program {
    const TABLE: &'static str = "trainer_programs";
    const FIELD_COUNT: usize = 17;

    fn from_fields(fields: &[String]) -> Result<Self, RowError> {
        let mut f = Fields::new(fields);
        Ok(Program {
            id: f.int("id")?,
            trainer_id: f.int("trainer_id")?,
            title: f.text("title")?,
            short_description: f.text("short_description")?,
            description: f.text("description")?,
            picture: f.text("picture")?,
            url_slug: f.text("url_slug")?,
            faq: f.text("faq")?,
            unit_length: f.text("unit_length")?,
            unit_visibility: f.text("unit_visibility")?,
            language_id: f.int("language_id")?,
            status: f.text("status")?,
            comments_enabled: f.int("comments_enabled")?,
            feedback_enabled: f.int("feedback_enabled")?,
            created_at: f.text("created_at")?,
            updated_at: f.text("updated_at")?,
            deleted_at: f.text("deleted_at")?,
        })
    }

    fn group_key(&self) -> i64 {
        self.trainer_id
    }

    fn group_label() -> &'static str {
        "trainer"
    }

    fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    fn is_published(&self) -> Option<bool> {
        Some(self.status.as_deref() == Some(PUBLISHED))
    }
}

/// One row of `trainer_program_units`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramUnit {
    pub id: i64,
    pub program_id: i64,
    pub order: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub deleted_at: Option<String>,
}

impl TableRecord for ProgramUnit {
    const TABLE: &'static str = "trainer_program_units";
    const FIELD_COUNT: usize = 9;

    fn from_fields(fields: &[String]) -> Result<Self, RowError> {
        let mut f = Fields::new(fields);
        Ok(ProgramUnit {
            id: f.int("id")?,
            program_id: f.int("program_id")?,
            order: f.int_opt("order")?,
            title: f.text("title")?,
            description: f.text("description")?,
            status: f.text("status")?,
            created_at: f.text("created_at")?,
            updated_at: f.text("updated_at")?,
            deleted_at: f.text("deleted_at")?,
        })
    }

    fn group_key(&self) -> i64 {
        self.program_id
    }

    fn group_label() -> &'static str {
        "program"
    }

    fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    fn is_published(&self) -> Option<bool> {
        Some(self.status.as_deref() == Some(PUBLISHED))
    }
}

/// One row of `trainer_program_unit_video_materials`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoMaterial {
    pub id: i64,
    pub unit_id: i64,
    pub video_id: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub deleted_at: Option<String>,
}

impl TableRecord for VideoMaterial {
    const TABLE: &'static str = "trainer_program_unit_video_materials";
    const FIELD_COUNT: usize = 6;
    // The materials insert sits in a much larger dump section; the original
    // export only ever scanned the first 500 lines past the marker.
    const SCAN_LIMIT: Option<usize> = Some(500);

    fn from_fields(fields: &[String]) -> Result<Self, RowError> {
        let mut f = Fields::new(fields);
        Ok(VideoMaterial {
            id: f.int("id")?,
            unit_id: f.int("unit_id")?,
            video_id: f.int("video_id")?,
            created_at: f.text("created_at")?,
            updated_at: f.text("updated_at")?,
            deleted_at: f.text("deleted_at")?,
        })
    }

    fn group_key(&self) -> i64 {
        self.unit_id
    }

    fn group_label() -> &'static str {
        "unit"
    }

    fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
