/*!

Types/type aliases that abstract over the implementing backing type.

A motivating example is `NatSet`, a set of small natural numbers used for the compiled ancestor and descendant
vectors. A number of external crates could provide this functionality. This module redirects to whatever chosen
implementation we want, so the rest of the crate never names the backing crate directly.

*/

mod nat_set;
mod string_join;

// Logging
pub mod log;

// A set of natural numbers
pub use nat_set::NatSet;

// Interned string. Type names are interned so that cloning and comparing them is cheap.
pub use string_cache::DefaultAtom as IString;

// Join sequences with a separator
pub use string_join::{join_iter, join_string};

// Hash containers. Iteration order is never observable through the public API; results are sorted where it would be.
pub use std::collections::{HashMap, HashSet};
