use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{BackendClient, BackendError, BackendResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl FilterOp {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
        }
    }
}

/// Row filter, rendered as the query pair `column=op.value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    pub value: String,
}

impl Filter {
    #[must_use]
    pub fn eq(column: impl Into<String>, value: impl ToString) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::Eq,
            value: value.to_string(),
        }
    }

    #[must_use]
    pub fn query_pair(&self) -> (String, String) {
        (
            self.column.clone(),
            format!("{}.{}", self.op.as_str(), self.value),
        )
    }
}

/// One fully described table operation, executed by [`BackendClient::execute`].
#[derive(Debug, Clone, PartialEq)]
pub enum TableRequest {
    Select {
        table: String,
        columns: String,
        filters: Vec<Filter>,
        limit: Option<usize>,
    },
    Insert {
        table: String,
        rows: Value,
    },
    Upsert {
        table: String,
        rows: Value,
        on_conflict: Option<String>,
        returning: bool,
    },
}

impl TableRequest {
    #[must_use]
    pub fn table(&self) -> &str {
        match self {
            Self::Select { table, .. } | Self::Insert { table, .. } | Self::Upsert { table, .. } => {
                table
            }
        }
    }

    /// URL query pairs of the request.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        match self {
            Self::Select {
                columns,
                filters,
                limit,
                ..
            } => {
                let mut pairs = vec![("select".to_owned(), columns.clone())];
                pairs.extend(filters.iter().map(Filter::query_pair));
                if let Some(limit) = limit {
                    pairs.push(("limit".to_owned(), limit.to_string()));
                }
                pairs
            }
            Self::Insert { .. } => Vec::new(),
            Self::Upsert {
                on_conflict,
                returning,
                ..
            } => {
                let mut pairs = Vec::new();
                if let Some(columns) = on_conflict {
                    pairs.push(("on_conflict".to_owned(), columns.clone()));
                }
                if *returning {
                    pairs.push(("select".to_owned(), "*".to_owned()));
                }
                pairs
            }
        }
    }

    /// Value of the `Prefer` header, if the request needs one.
    #[must_use]
    pub fn prefer_header(&self) -> Option<&'static str> {
        match self {
            Self::Select { .. } => None,
            Self::Insert { .. } => Some("return=minimal"),
            Self::Upsert { returning: true, .. } => {
                Some("resolution=merge-duplicates,return=representation")
            }
            Self::Upsert {
                returning: false, ..
            } => Some("resolution=merge-duplicates,return=minimal"),
        }
    }

    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Select { .. } => None,
            Self::Insert { rows, .. } | Self::Upsert { rows, .. } => Some(rows),
        }
    }
}

/// Query-builder entry point for one table.
pub struct TableRef<'a> {
    client: &'a dyn BackendClient,
    table: String,
}

impl<'a> TableRef<'a> {
    pub(super) fn new(client: &'a dyn BackendClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub fn select(&self, columns: &str) -> SelectQuery<'a> {
        SelectQuery {
            client: self.client,
            table: self.table.clone(),
            columns: columns.to_owned(),
            filters: Vec::new(),
            limit: None,
        }
    }

    pub fn insert<T: Serialize + ?Sized>(&self, rows: &T) -> BackendResult<()> {
        let request = TableRequest::Insert {
            table: self.table.clone(),
            rows: encode_rows(rows)?,
        };
        self.client.execute(&request).map(|_| ())
    }

    pub fn upsert<T: Serialize + ?Sized>(&self, rows: &T) -> UpsertQuery<'a> {
        UpsertQuery {
            client: self.client,
            table: self.table.clone(),
            rows: encode_rows(rows),
            on_conflict: None,
        }
    }
}

fn encode_rows<T: Serialize + ?Sized>(rows: &T) -> BackendResult<Value> {
    serde_json::to_value(rows).map_err(|e| BackendError::Encode(e.to_string()))
}

#[must_use = "queries do nothing until executed"]
pub struct SelectQuery<'a> {
    client: &'a dyn BackendClient,
    table: String,
    columns: String,
    filters: Vec<Filter>,
    limit: Option<usize>,
}

impl<'a> SelectQuery<'a> {
    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push(Filter::eq(column, value));
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn request(&self) -> TableRequest {
        TableRequest::Select {
            table: self.table.clone(),
            columns: self.columns.clone(),
            filters: self.filters.clone(),
            limit: self.limit,
        }
    }

    pub fn execute(self) -> BackendResult<Vec<Value>> {
        self.client.execute(&self.request())
    }

    /// Zero or one row; more than one matching row is an error.
    pub fn maybe_single(mut self) -> BackendResult<Option<Value>> {
        self.limit = Some(2);
        let mut rows = self.execute()?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            n => Err(BackendError::Api {
                status: 406,
                message: format!("expected at most one row, got {n}"),
            }),
        }
    }

    pub fn maybe_single_as<T: DeserializeOwned>(self) -> BackendResult<Option<T>> {
        self.maybe_single()?
            .map(|row| serde_json::from_value(row).map_err(|e| BackendError::Decode(e.to_string())))
            .transpose()
    }
}

#[must_use = "queries do nothing until executed"]
pub struct UpsertQuery<'a> {
    client: &'a dyn BackendClient,
    table: String,
    rows: BackendResult<Value>,
    on_conflict: Option<String>,
}

impl<'a> UpsertQuery<'a> {
    /// Comma-separated unique columns used to detect conflicts.
    pub fn on_conflict(mut self, columns: impl Into<String>) -> Self {
        self.on_conflict = Some(columns.into());
        self
    }

    fn into_request(self, returning: bool) -> BackendResult<(&'a dyn BackendClient, TableRequest)> {
        let rows = self.rows?;
        Ok((
            self.client,
            TableRequest::Upsert {
                table: self.table,
                rows,
                on_conflict: self.on_conflict,
                returning,
            },
        ))
    }

    pub fn execute(self) -> BackendResult<()> {
        let (client, request) = self.into_request(false)?;
        client.execute(&request).map(|_| ())
    }

    /// Executes and returns the stored rows.
    pub fn select(self) -> BackendResult<Vec<Value>> {
        let (client, request) = self.into_request(true)?;
        client.execute(&request)
    }
}
