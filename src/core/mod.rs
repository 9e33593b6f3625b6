/*!

The implementation behind the public API.

| module       | contents                                                           |
|:-------------|:-------------------------------------------------------------------|
| `hierarchy`  | the graph store: types, parent and child maps, attributes, merging |
| `traversal`  | the one walk that everything else is built from                    |
| `closure`    | ancestor and descendant sets, hull reduction                       |
| `algebra`    | the resolution chain, n-ary joins and meets, sorting               |
| `compiled`   | ancestor and descendant bit-vectors, rebuilt per generation        |
| `caching`    | a bounded memo table for bound lookups                             |

Derived state (the compiled vectors, the memo table) is stamped with the generation of the hierarchy it was computed
from and is rebuilt or dropped at the start of the first read that finds the stamp out of date.

*/

pub mod algebra;
pub mod caching;
pub(crate) mod closure;
pub mod compiled;
pub mod hierarchy;
pub mod traversal;

#[cfg(test)]
pub(crate) mod fixtures;
