use crate::Value;

/// How a predicate is attached to the ones before it.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    #[default]
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Like,
    NotLike,
}

/// A single condition of a WHERE or HAVING clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `column <op> value`
    Compare {
        column: String,
        op: ComparisonOp,
        value: Value,
    },
    /// `column [NOT] IN (values...)`
    In {
        column: String,
        values: Vec<Value>,
        negated: bool,
    },
    /// `column [NOT] BETWEEN low AND high`
    Between {
        column: String,
        low: Value,
        high: Value,
        negated: bool,
    },
    /// `column IS [NOT] NULL`
    Null { column: String, negated: bool },
    /// SQL written verbatim, it may contain named placeholders.
    Raw(String),
    /// Parenthesized sub-filter.
    Group(Filter),
}

/// Sequence of predicates joined by AND / OR, left to right.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Filter {
    pub predicates: Vec<(Conjunction, Predicate)>,
}

impl Filter {
    pub fn new() -> Self {
        Default::default()
    }
    /// Predicates that render to a condition, groups without any are left out.
    pub fn conditions(&self) -> impl Iterator<Item = &(Conjunction, Predicate)> {
        self.predicates
            .iter()
            .filter(|(_, predicate)| !matches!(predicate, Predicate::Group(f) if f.is_empty()))
    }
    /// Number of conditions rendered.
    pub fn len(&self) -> usize {
        self.conditions().count()
    }
    pub fn is_empty(&self) -> bool {
        self.conditions().next().is_none()
    }
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.push(Conjunction::And, predicate);
        self
    }
    pub fn or(mut self, predicate: Predicate) -> Self {
        self.push(Conjunction::Or, predicate);
        self
    }
    pub fn push(&mut self, conjunction: Conjunction, predicate: Predicate) {
        self.predicates.push((conjunction, predicate));
    }

    pub fn eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.and(Predicate::compare(column, ComparisonOp::Equal, value))
    }
    pub fn ne(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.and(Predicate::compare(column, ComparisonOp::NotEqual, value))
    }
    pub fn lt(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.and(Predicate::compare(column, ComparisonOp::Less, value))
    }
    pub fn gt(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.and(Predicate::compare(column, ComparisonOp::Greater, value))
    }
}

impl Predicate {
    pub fn compare(column: impl Into<String>, op: ComparisonOp, value: impl Into<Value>) -> Self {
        Predicate::Compare {
            column: column.into(),
            op,
            value: value.into(),
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    #[default]
    Inner,
    Left,
    Right,
    Cross,
}

/// Table name with an optional alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub name: String,
    pub alias: Option<String>,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }
    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }
}

impl From<&str> for TableRef {
    fn from(value: &str) -> Self {
        TableRef::new(value)
    }
}

impl From<String> for TableRef {
    fn from(value: String) -> Self {
        TableRef::new(value)
    }
}

/// `(name, alias)`
impl<N: Into<String>, A: Into<String>> From<(N, A)> for TableRef {
    fn from((name, alias): (N, A)) -> Self {
        TableRef::aliased(name, alias)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinCondition {
    /// `lhs = rhs`, both are identifiers.
    Columns(String, String),
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub join: JoinType,
    pub table: TableRef,
    pub on: Option<JoinCondition>,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    #[default]
    ASC,
    DESC,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordered {
    pub column: String,
    pub order: Order,
}

/// An item of the projection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    /// Identifier (possibly `table.column` or `*`), quoted by the grammar.
    Identifier { name: String, alias: Option<String> },
    /// Expression written verbatim.
    Raw { sql: String, alias: Option<String> },
}

impl From<String> for Column {
    fn from(value: String) -> Self {
        Column::Identifier {
            name: value,
            alias: None,
        }
    }
}

impl From<&str> for Column {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}

/// Right hand side of a `SET column = ...` assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    Value(Value),
    Raw(String),
}

/// Clause state of a SELECT, rendered by [`Grammar::write_select`](crate::Grammar::write_select).
#[derive(Default, Debug, Clone, PartialEq)]
pub struct SelectParts {
    pub distinct: bool,
    pub columns: Vec<Column>,
    pub from: Option<TableRef>,
    pub joins: Vec<Join>,
    pub filter: Filter,
    pub group_by: Vec<String>,
    pub having: Filter,
    pub order_by: Vec<Ordered>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Clause state of an INSERT. Every row has one value per column.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct InsertParts {
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Clause state of an UPDATE.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct UpdateParts {
    pub table: String,
    pub assignments: Vec<(String, Assignment)>,
    pub filter: Filter,
    pub order_by: Vec<Ordered>,
    pub limit: Option<u64>,
}
