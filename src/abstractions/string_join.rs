/*!

Joining sequences with a separator, which the standard library only offers for slices (`[T]::join`). Used to render
type lists, strata, and bit-vectors in diagnostics.

*/

use std::fmt::Display;
use std::iter::once;

/// Interleaves `sep(&item)` between consecutive items of `iter`. The separator is computed from the item that follows
/// it, which lets callers derive it from the item type without allocating a separate value.
///
/// ```
/// use typelattice::abstractions::join_iter;
///
/// let names = ["bird", "mammal"].into_iter();
/// assert_eq!(join_iter(names, |_| " | ").collect::<String>(), "bird | mammal");
/// ```
pub fn join_iter<T>(mut iter: impl Iterator<Item = T>, sep: impl Fn(&T) -> T) -> impl Iterator<Item = T> {
  let first = iter.next();
  first
      .into_iter()
      .chain(iter.flat_map(move |item| once(sep(&item)).chain(once(item))))
}

/// Renders each item with `Display` and joins the results with `sep`.
pub fn join_string<T: Display>(iter: impl Iterator<Item = T>, sep: &str) -> String {
  let mut joined = String::new();
  for (i, item) in iter.enumerate() {
    if i > 0 {
      joined.push_str(sep);
    }
    joined.push_str(&item.to_string());
  }
  joined
}
