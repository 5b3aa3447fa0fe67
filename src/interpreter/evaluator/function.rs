/// Builtin dispatch.
///
/// Holds the builtin table (names, arities and handlers) and evaluates calls
/// against it.
pub mod core;
/// Tile-group builtins.
///
/// `single`, `pair`, `pung`, `kong`, `quint` and `sequence`, which turn
/// values and suits into tile codes.
pub mod tile_group;
/// The `complement` builtin.
///
/// Removes one or more elements from a list, keeping the order of the rest.
pub mod complement;
/// The `permutations` builtin.
///
/// Lists every ordering of a list.
pub mod permutations;
/// The `range` builtin and the expansion of `a..b` literals.
pub mod range;
