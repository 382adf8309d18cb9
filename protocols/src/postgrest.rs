//! # PostgREST query builder
//!
//! Renders table reads and writes into the path and query pairs understood by
//! a PostgREST endpoint:
//!
//! ```text
//! GET /rest/v1/bookings?select=*,cars(make,model)&user_id=eq.42&order=created_at.desc
//! ```
//!
//! Filter values are passed through verbatim. Percent-encoding is the HTTP
//! client's job.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

pub const REST_PATH: &str = "/rest/v1";

/// `Accept` header asking for a single JSON object instead of an array.
pub const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// `Prefer` header asking writes to echo the affected rows.
pub const RETURN_REPRESENTATION: &str = "return=representation";

/// Error code PostgREST uses when a single-object request matched no row.
pub const NO_ROWS_CODE: &str = "PGRST116";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),
}

/// Body of a non-2xx PostgREST response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl ErrorPayload {
    pub fn is_no_rows(&self) -> bool {
        self.code.as_deref() == Some(NO_ROWS_CODE)
    }

    /// Message with details appended when the server sent any.
    pub fn describe(&self) -> Option<String> {
        let message: &str = self.message.as_deref()?;
        Some(match self.details.as_deref() {
            Some(details) if !details.is_empty() => format!("{message} ({details})"),
            _ => message.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Is,
}

impl Operator {
    fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Is => "is",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Filter {
    column: String,
    negated: bool,
    operator: Operator,
    value: String,
}

impl Filter {
    fn render(&self) -> String {
        let prefix: &str = if self.negated { "not." } else { "" };
        format!("{prefix}{}.{}", self.operator.as_str(), self.value)
    }
}

/// Column list of a read, including embedded relations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    columns: Vec<String>,
    embeds: Vec<(String, Vec<String>)>,
}

impl Select {
    /// `*`
    pub fn all() -> Self {
        Self {
            columns: vec!["*".to_string()],
            embeds: Vec::new(),
        }
    }

    pub fn columns(columns: &[&str]) -> Result<Self, QueryError> {
        let columns: Vec<String> = columns
            .iter()
            .map(|c| identifier(c))
            .collect::<Result<Vec<String>, QueryError>>()?;
        Ok(Self {
            columns,
            embeds: Vec::new(),
        })
    }

    /// Adds a related table through its foreign key, e.g. `cars(make,model)`.
    pub fn embed(mut self, table: &str, columns: &[&str]) -> Result<Self, QueryError> {
        let table: String = identifier(table)?;
        let columns: Vec<String> = columns
            .iter()
            .map(|c| identifier(c))
            .collect::<Result<Vec<String>, QueryError>>()?;
        self.embeds.push((table, columns));
        Ok(self)
    }
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.columns.clone();
        for (table, columns) in &self.embeds {
            parts.push(format!("{table}({})", columns.join(",")));
        }
        f.write_str(&parts.join(","))
    }
}

/// A request against one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table: String,
    select: Option<Select>,
    filters: Vec<Filter>,
    order: Vec<(String, Direction)>,
    limit: Option<usize>,
    single: bool,
}

impl Query {
    pub fn table(name: &str) -> Result<Self, QueryError> {
        Ok(Self {
            table: identifier(name)?,
            select: None,
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
            single: false,
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// `/rest/v1/{table}`
    pub fn path(&self) -> String {
        format!("{REST_PATH}/{}", self.table)
    }

    pub fn select(mut self, select: Select) -> Self {
        self.select = Some(select);
        self
    }

    pub fn eq(self, column: &str, value: impl ToString) -> Result<Self, QueryError> {
        self.filter(column, false, Operator::Eq, value)
    }

    pub fn neq(self, column: &str, value: impl ToString) -> Result<Self, QueryError> {
        self.filter(column, false, Operator::Neq, value)
    }

    pub fn gt(self, column: &str, value: impl ToString) -> Result<Self, QueryError> {
        self.filter(column, false, Operator::Gt, value)
    }

    pub fn gte(self, column: &str, value: impl ToString) -> Result<Self, QueryError> {
        self.filter(column, false, Operator::Gte, value)
    }

    pub fn lt(self, column: &str, value: impl ToString) -> Result<Self, QueryError> {
        self.filter(column, false, Operator::Lt, value)
    }

    pub fn lte(self, column: &str, value: impl ToString) -> Result<Self, QueryError> {
        self.filter(column, false, Operator::Lte, value)
    }

    /// `is.null`, `is.true`, `is.false`
    pub fn is(self, column: &str, value: impl ToString) -> Result<Self, QueryError> {
        self.filter(column, false, Operator::Is, value)
    }

    /// Negated filter: `not(column, Operator::Eq, "cancelled")` renders `column=not.eq.cancelled`.
    pub fn not(
        self,
        column: &str,
        operator: Operator,
        value: impl ToString,
    ) -> Result<Self, QueryError> {
        self.filter(column, true, operator, value)
    }

    pub fn order(mut self, column: &str, direction: Direction) -> Result<Self, QueryError> {
        self.order.push((identifier(column)?, direction));
        Ok(self)
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Expect exactly one row back.
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    pub fn is_single(&self) -> bool {
        self.single
    }

    /// Query-string pairs in a stable order: select, filters, order, limit.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = Vec::new();

        if let Some(select) = &self.select {
            params.push(("select".to_string(), select.to_string()));
        }

        for filter in &self.filters {
            params.push((filter.column.clone(), filter.render()));
        }

        if !self.order.is_empty() {
            let order: String = self
                .order
                .iter()
                .map(|(column, direction)| format!("{column}.{}", direction.as_str()))
                .collect::<Vec<String>>()
                .join(",");
            params.push(("order".to_string(), order));
        }

        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }

    fn filter(
        mut self,
        column: &str,
        negated: bool,
        operator: Operator,
        value: impl ToString,
    ) -> Result<Self, QueryError> {
        self.filters.push(Filter {
            column: identifier(column)?,
            negated,
            operator,
            value: value.to_string(),
        });
        Ok(self)
    }
}

fn identifier(name: &str) -> Result<String, QueryError> {
    let valid: bool = !name.is_empty()
        && (name == "*"
            || name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_'));

    if valid {
        Ok(name.to_string())
    } else {
        Err(QueryError::InvalidIdentifier(name.to_string()))
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
