//! Derive macros for sqlprep
//!
//! Provides `#[derive(TableRow)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod table_row;

/// Derive `TableRow` for a struct.
///
/// # Example
///
/// ```ignore
/// use sqlprep::TableRow;
///
/// #[derive(Debug, Clone, TableRow)]
/// struct User {
///     #[row(primary)]
///     id: i64,
///     username: String,
///     #[row(column = "email_address")]
///     email: Option<String>,
///     #[row(skip)]
///     cached_score: f64,
/// }
/// ```
///
/// # Attributes
///
/// - `#[row(primary)]` - Primary-key field, used when the row is passed as a value (exactly one)
/// - `#[row(column = "name")]` - Map field to a different column name
/// - `#[row(skip)]` - Leave the field out of `to_array`
///
/// Field types must implement `Clone` and `Into<sqlprep::Value>`.
#[proc_macro_derive(TableRow, attributes(row))]
pub fn derive_table_row(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    table_row::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
