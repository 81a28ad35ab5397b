mod document;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Document)]
// ============================================================================

/// Derive macro that implements `placelist::Document` for a struct.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Document)]
/// #[document(collection = "sharedPlaces")]
/// pub struct Place {
///     #[document(id)]
///     pub id: String,
///     pub name: String,
/// }
/// ```
///
/// - `collection = "..."` names the remote collection. Defaults to the
///   camelCase struct name pluralised (`Place` -> `places`).
/// - `#[document(id)]` marks the identity field. Defaults to a field named `id`.
#[proc_macro_derive(Document, attributes(document))]
pub fn derive_document(input: TokenStream) -> TokenStream {
    document::derive_document(input)
}
