//! PostgREST query encoding for the handful of filter shapes the repositories use.

/// A single predicate on a table.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    Eq(&'static str, String),
    In(&'static str, Vec<String>),
    /// Disjunction of conjunctions: `or=(and(a.eq.1,b.eq.2),c.eq.3)`.
    Or(Vec<Vec<(&'static str, String)>>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub column: &'static str,
    pub ascending: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    pub table: &'static str,
    columns: &'static str,
    filters: Vec<Filter>,
    order: Option<Order>,
    limit: Option<usize>,
}

impl Query {
    pub fn table(table: &'static str) -> Self {
        Query {
            table,
            columns: "*",
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn select(mut self, columns: &'static str) -> Self {
        self.columns = columns;
        self
    }

    pub fn eq(mut self, column: &'static str, value: impl ToString) -> Self {
        self.filters.push(Filter::Eq(column, value.to_string()));
        self
    }

    pub fn is_in<I, V>(mut self, column: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        self.filters.push(Filter::In(
            column,
            values.into_iter().map(|v| v.to_string()).collect(),
        ));
        self
    }

    pub fn or(mut self, groups: Vec<Vec<(&'static str, String)>>) -> Self {
        self.filters.push(Filter::Or(groups));
        self
    }

    pub fn order(mut self, column: &'static str, ascending: bool) -> Self {
        self.order = Some(Order { column, ascending });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string pairs in PostgREST syntax.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.columns.to_string())];

        for filter in &self.filters {
            match filter {
                Filter::Eq(column, value) => {
                    params.push((column.to_string(), format!("eq.{}", value)));
                }
                Filter::In(column, values) => {
                    let list = values.iter().map(|v| quote(v)).collect::<Vec<_>>().join(",");
                    params.push((column.to_string(), format!("in.({})", list)));
                }
                Filter::Or(groups) => {
                    let terms = groups
                        .iter()
                        .map(|group| match group.as_slice() {
                            [(column, value)] => format!("{}.eq.{}", column, quote(value)),
                            conditions => format!(
                                "and({})",
                                conditions
                                    .iter()
                                    .map(|(column, value)| format!("{}.eq.{}", column, quote(value)))
                                    .collect::<Vec<_>>()
                                    .join(",")
                            ),
                        })
                        .collect::<Vec<_>>()
                        .join(",");
                    params.push(("or".to_string(), format!("({})", terms)));
                }
            }
        }

        if let Some(order) = &self.order {
            let direction = if order.ascending { "asc" } else { "desc" };
            params.push(("order".to_string(), format!("{}.{}", order.column, direction)));
        }

        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }
}

/// Values inside list and logic operators need quoting when they carry
/// PostgREST delimiters.
fn quote(value: &str) -> String {
    let reserved = |c: char| matches!(c, ',' | '.' | ':' | '(' | ')' | '"' | '\\') || c.is_whitespace();
    if value.chars().any(reserved) {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}
