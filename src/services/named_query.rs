use sea_orm::{DbBackend, Statement, Value};

use crate::errors::internal::QueryError;
use crate::errors::InternalError;
use crate::types::internal::{ParamValue, QueryParams};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Sql(String),
    Param(String),
}

/// Native SQL with `:name` placeholders
///
/// `::` casts and anything inside single or double quotes are left alone.
/// Binding rewrites each placeholder into the backend's positional form and
/// expands list values into a comma-separated placeholder run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedQuery {
    segments: Vec<Segment>,
}

impl NamedQuery {
    /// Scan `sql` for named placeholders
    ///
    /// # Returns
    /// * `Ok(NamedQuery)` - Parsed statement
    /// * `Err(InternalError)` - `EmptyParameterName` for a lone `:`
    pub fn new(sql: &str) -> Result<Self, InternalError> {
        let bytes = sql.as_bytes();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut i = 0;

        while i < bytes.len() {
            let c = bytes[i];
            match c {
                b'\'' | b'"' => {
                    let end = quoted_end(bytes, i);
                    literal.push_str(&sql[i..end]);
                    i = end;
                }
                b':' if bytes.get(i + 1) == Some(&b':') => {
                    literal.push_str("::");
                    i += 2;
                }
                b':' => {
                    let start = i + 1;
                    let mut end = start;
                    while end < bytes.len() && is_name_byte(bytes[end], end == start) {
                        end += 1;
                    }
                    if end == start {
                        return Err(QueryError::EmptyParameterName { position: i }.into());
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Sql(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Param(sql[start..end].to_string()));
                    i = end;
                }
                _ => {
                    // Copy the whole run up to the next special byte
                    let end = bytes[i..]
                        .iter()
                        .position(|b| matches!(b, b'\'' | b'"' | b':'))
                        .map(|p| i + p)
                        .unwrap_or(bytes.len());
                    literal.push_str(&sql[i..end]);
                    i = end;
                }
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Sql(literal));
        }

        Ok(Self { segments })
    }

    /// Placeholder names in order of appearance (repeats included)
    pub fn param_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(name) => Some(name.as_str()),
                Segment::Sql(_) => None,
            })
            .collect()
    }

    /// Produce a backend statement with every placeholder bound
    ///
    /// Every placeholder must have an entry in `params`; extra entries are ignored.
    pub fn bind(&self, backend: DbBackend, params: &QueryParams) -> Result<Statement, InternalError> {
        let mut sql = String::new();
        let mut values: Vec<Value> = Vec::new();

        for segment in &self.segments {
            match segment {
                Segment::Sql(text) => sql.push_str(text),
                Segment::Param(name) => match params.get(name) {
                    Some(ParamValue::Single(value)) => {
                        values.push(value.clone());
                        sql.push_str(&placeholder(backend, values.len()));
                    }
                    Some(ParamValue::List(list)) => {
                        if list.is_empty() {
                            return Err(QueryError::EmptyList { name: name.clone() }.into());
                        }
                        let mut run = Vec::with_capacity(list.len());
                        for value in list {
                            values.push(value.clone());
                            run.push(placeholder(backend, values.len()));
                        }
                        sql.push_str(&run.join(", "));
                    }
                    None => {
                        return Err(QueryError::MissingParameter { name: name.clone() }.into());
                    }
                },
            }
        }

        Ok(Statement::from_sql_and_values(backend, sql, values))
    }
}

fn placeholder(backend: DbBackend, position: usize) -> String {
    match backend {
        DbBackend::Postgres => format!("${}", position),
        _ => "?".to_string(),
    }
}

fn is_name_byte(b: u8, first: bool) -> bool {
    b == b'_' || b.is_ascii_alphabetic() || (!first && b.is_ascii_digit())
}

/// Index just past the quote that closes the one at `start`; doubled quotes escape
fn quoted_end(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        if bytes[i] == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}
