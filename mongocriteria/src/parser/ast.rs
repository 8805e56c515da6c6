use bson::Bson;

/// One level of a `where` clause, in input order.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Clause {
    pub entries: Vec<ClauseEntry>,
}

#[derive(PartialEq, Debug, Clone)]
pub enum ClauseEntry {
    Field(FieldMatch),
    Logical { op: LogicalOp, clauses: Vec<Clause> },
    /// The `like` shorthand. Each match lands directly at the enclosing
    /// clause level.
    LikeGroup(Vec<FieldMatch>),
}

#[derive(PartialEq, Debug, Clone)]
pub struct FieldMatch {
    pub field: String,
    pub expression: Expression,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum LogicalOp {
    Or,
    And,
    Nor,
}

impl LogicalOp {
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOp::Or => "$or",
            LogicalOp::And => "$and",
            LogicalOp::Nor => "$nor",
        }
    }
}

/// The right-hand side of a field.
#[derive(PartialEq, Debug, Clone)]
pub enum Expression {
    /// Implicit equality.
    Scalar(Bson),
    /// Implicit membership.
    In(Vec<Bson>),
    Modifiers(Vec<(Modifier, Operand)>),
}

#[derive(PartialEq, Debug, Clone)]
pub enum Operand {
    Value(Bson),
    /// Only produced for `Modifier::Not` over a plain document.
    Nested(Box<Expression>),
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Modifier {
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Not,
    Contains,
    Like,
    StartsWith,
    EndsWith,
    /// A store-native operator, kept with its original spelling.
    Passthrough(String),
}

impl Modifier {
    /// The key this modifier is written under in an operator document.
    pub fn output_key(&self) -> &str {
        match self {
            Modifier::LessThan => "$lt",
            Modifier::LessThanOrEqual => "$lte",
            Modifier::GreaterThan => "$gt",
            Modifier::GreaterThanOrEqual => "$gte",
            Modifier::Not => "$not",
            Modifier::Contains => "contains",
            Modifier::Like => "like",
            Modifier::StartsWith => "startsWith",
            Modifier::EndsWith => "endsWith",
            Modifier::Passthrough(key) => key,
        }
    }

    pub fn is_string_match(&self) -> bool {
        matches!(
            self,
            Modifier::Contains | Modifier::Like | Modifier::StartsWith | Modifier::EndsWith
        )
    }
}
