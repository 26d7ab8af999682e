//! Ordering specification: the conditions that define a lexicographic sort key.

use super::conditions::Fragment;
use crate::error::Result;
use crate::validation::validate_order_conditions;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sort direction of a single condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// Which records to select relative to the reference record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Before,
    After,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Before => Side::After,
            Side::After => Side::Before,
        }
    }

    /// Whether moving to this side walks up the sort key of a condition
    /// sorted in `direction`
    pub(crate) fn ascends(self, direction: Direction) -> bool {
        matches!(
            (self, direction),
            (Side::After, Direction::Asc) | (Side::Before, Direction::Desc)
        )
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Before => write!(f, "before"),
            Side::After => write!(f, "after"),
        }
    }
}

/// Position of NULLs in the result order, independent of direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullsOrder {
    First,
    Last,
}

impl NullsOrder {
    pub fn reversed(self) -> Self {
        match self {
            NullsOrder::First => NullsOrder::Last,
            NullsOrder::Last => NullsOrder::First,
        }
    }

    /// Whether NULLs sort on `side` of every non-null value
    pub fn lies_on(self, side: Side) -> bool {
        matches!(
            (self, side),
            (NullsOrder::First, Side::Before) | (NullsOrder::Last, Side::After)
        )
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            NullsOrder::First => "NULLS FIRST",
            NullsOrder::Last => "NULLS LAST",
        }
    }
}

/// Finite, explicitly ordered domain of a condition.
///
/// Values are listed in ascending sort order. `complete` asserts that the
/// attribute can never hold a value outside the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enumeration {
    pub values: Vec<Value>,
    #[serde(default)]
    pub complete: bool,
}

impl Enumeration {
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values,
            complete: false,
        }
    }

    pub fn complete(values: Vec<Value>) -> Self {
        Self {
            values,
            complete: true,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Index of `value`; numbers match by numeric value, so `1.0` finds `1`
    pub fn position(&self, value: &Value) -> Option<usize> {
        self.values
            .iter()
            .position(|candidate| same_value(candidate, value))
    }

    /// Values on `side` of the value at `position`, in enumeration order.
    /// Non-strict includes the value at `position` itself.
    pub fn side_of(
        &self,
        position: usize,
        side: Side,
        direction: Direction,
        strict: bool,
    ) -> Vec<Value> {
        let range = match (side.ascends(direction), strict) {
            (true, true) => position + 1..self.values.len(),
            (true, false) => position..self.values.len(),
            (false, true) => 0..position,
            (false, false) => 0..position + 1,
        };
        self.values[range].to_vec()
    }
}

fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) if x.is_f64() || y.is_f64() => {
            x.as_f64() == y.as_f64()
        }
        _ => a == b,
    }
}

/// One sort key of an [`OrderSpace`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCondition {
    /// Attribute read from the reference record
    pub name: String,
    /// Column reference interpolated verbatim into SQL
    pub column: String,
    pub direction: Direction,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub enumeration: Option<Enumeration>,
    #[serde(default)]
    pub nulls: Option<NullsOrder>,
}

impl OrderCondition {
    pub fn new(name: &str, direction: Direction) -> Self {
        Self {
            name: name.to_string(),
            column: name.to_string(),
            direction,
            unique: false,
            enumeration: None,
            nulls: None,
        }
    }

    pub fn asc(name: &str) -> Self {
        Self::new(name, Direction::Asc)
    }

    pub fn desc(name: &str) -> Self {
        Self::new(name, Direction::Desc)
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn with_column(mut self, column: &str) -> Self {
        self.column = column.to_string();
        self
    }

    pub fn with_enumeration(mut self, enumeration: Enumeration) -> Self {
        self.enumeration = Some(enumeration);
        self
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(NullsOrder::First);
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(NullsOrder::Last);
        self
    }

    /// `ORDER BY` item for this condition
    fn order_by_item(&self, reverse: bool) -> Fragment {
        let direction = if reverse {
            self.direction.reversed()
        } else {
            self.direction
        };

        let (expression, params) = match &self.enumeration {
            Some(enumeration) => {
                let whens = (0..enumeration.len())
                    .map(|rank| format!(" WHEN ? THEN {rank}"))
                    .collect::<String>();
                (
                    format!("CASE {}{whens} END", self.column),
                    enumeration.values.clone(),
                )
            }
            None => (self.column.clone(), Vec::new()),
        };

        let mut sql = format!("{expression} {}", direction.as_sql());
        if let Some(nulls) = self.nulls {
            let nulls = if reverse { nulls.reversed() } else { nulls };
            sql.push(' ');
            sql.push_str(nulls.as_sql());
        }
        Fragment::new(sql, params)
    }
}

/// Validated, ordered sequence of conditions, most significant first.
///
/// Construction rejects malformed specifications: see
/// [`validate_order_conditions`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OrderSpace {
    conditions: Vec<OrderCondition>,
}

impl OrderSpace {
    pub fn new(conditions: Vec<OrderCondition>) -> Result<Self> {
        validate_order_conditions(&conditions)?;
        Ok(Self { conditions })
    }

    pub fn conditions(&self) -> &[OrderCondition] {
        &self.conditions
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Render the `ORDER BY` list matching this space.
    ///
    /// `reverse` flips every direction and NULL placement, which fetches the
    /// page before a reference record nearest-first.
    pub fn order_by_sql(&self, reverse: bool) -> (String, Vec<Value>) {
        let mut items = Vec::with_capacity(self.conditions.len());
        let mut params = Vec::new();
        for condition in &self.conditions {
            let (sql, item_params) = condition.order_by_item(reverse).into_parts();
            items.push(sql);
            params.extend(item_params);
        }
        (items.join(", "), params)
    }
}

impl<'de> Deserialize<'de> for OrderSpace {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let conditions = Vec::<OrderCondition>::deserialize(deserializer)?;
        OrderSpace::new(conditions).map_err(D::Error::custom)
    }
}
