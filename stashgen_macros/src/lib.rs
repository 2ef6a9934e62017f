//! Procedural macros for stashgen

mod strategy_table;

use proc_macro::TokenStream;

/// Derives the exact-shape lookup table for a transfer strategy enum.
///
/// # Example
///
/// ```ignore
/// #[derive(StrategyTable)]
/// pub enum TransferStrategy {
///     #[strategy(shape = "int")]
///     Int,
///
///     #[strategy(shape = "java.lang.Integer")]
///     BoxedInt,
///
///     #[strategy(op = "Parcelable")]
///     StructuredTransferable,  // no shape, matched by capability
/// }
/// ```
///
/// This will generate:
/// - `EXACT_TABLE` - every `(shape, variant)` pair in declaration order
/// - `from_exact_shape()` - lookup by canonical type text
/// - `exact_shape()` / `is_exact()` - reverse lookup
/// - `op_suffix()` - the name used for the `get*`/`put*` helper calls, defaults to the variant name
///
/// A shape that is not well formed, or that is listed on more than one variant, is a compile
/// error.
#[proc_macro_derive(StrategyTable, attributes(strategy))]
pub fn derive_strategy_table(input: TokenStream) -> TokenStream {
    strategy_table::derive_strategy_table_impl(input)
}
