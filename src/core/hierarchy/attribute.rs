/*!

Attributes are key/value annotations. Each type has its own map and the hierarchy as a whole has one more. Attributes
never take part in the order itself; setting one does not advance the structural generation.

*/

use std::fmt::{Display, Formatter};

use crate::abstractions::{HashMap, IString};

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum AttributeValue {
  Flag(bool),
  Integer(i64),
  Text(String),
}

pub type Attributes = HashMap<IString, AttributeValue>;

impl From<bool> for AttributeValue {
  fn from(value: bool) -> Self {
    AttributeValue::Flag(value)
  }
}

impl From<i64> for AttributeValue {
  fn from(value: i64) -> Self {
    AttributeValue::Integer(value)
  }
}

impl From<&str> for AttributeValue {
  fn from(value: &str) -> Self {
    AttributeValue::Text(value.to_string())
  }
}

impl From<String> for AttributeValue {
  fn from(value: String) -> Self {
    AttributeValue::Text(value)
  }
}

impl Display for AttributeValue {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      AttributeValue::Flag(value)    => write!(f, "{}", value),
      AttributeValue::Integer(value) => write!(f, "{}", value),
      AttributeValue::Text(value)    => write!(f, "{:?}", value),
    }
  }
}
