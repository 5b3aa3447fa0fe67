/// Runtime values.
///
/// Defines the `Value` enum produced by expression evaluation: integers,
/// text, tile symbols, lists, tile groups and builtin references, together
/// with the conversions the evaluator needs.
pub mod core;

/// Tile groups.
///
/// Defines `TileGroup`, the intermediate result of `pair`, `kong`,
/// `sequence` and the other tile-group builtins, before it is flattened into
/// a variation.
pub mod tile_group;

/// Compiler output.
///
/// Defines `Variation`, the terminal unit of a compile, and
/// `CompiledTemplate`, which pairs the variations with the template's
/// metadata for serialization.
pub mod variation;
