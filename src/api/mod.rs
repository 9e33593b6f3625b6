/*!

The public API of the library.

 - [`Type`] and [`TypeName`]: members of a hierarchy and the two reserved values.
 - [`Operand`]: an operand of the binary operations, possibly carrying its own ordering logic.
 - [`TypeOrder`]: the algebra, implemented by [`Hierarchy`](crate::Hierarchy) and its compiled and caching wrappers.
 - [`AlgebraConfig`]: the process-wide configuration.

*/

pub mod config;
pub mod operand;
pub mod ty;
pub mod type_order;

pub use config::{global_config, set_global_config, update_global_config, AlgebraConfig, Sentinels, Verbosity};
pub use operand::{HookAnswer, Operand, Operation, OrderHook, PredicateFn};
pub use ty::{Type, TypeName};
pub use type_order::TypeOrder;
