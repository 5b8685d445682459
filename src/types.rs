/// Name of an object-store container.
/// Examples: `inbox`, `en-invoices`
pub type ContainerName = String;
/// Object key within a container, type-prefixed by convention.
/// Example: `pdf/scan1.pdf`
pub type ObjectKey = String;
/// Tag field name.
/// Examples: `DocType`, `Project Name`
pub type TagName = String;
/// Tag field value.
/// Examples: `Invoices`, `Train`
pub type TagValue = String;
/// Lowercased file extension without the leading dot.
/// Examples: `pdf`, `html`
pub type Extension = String;
/// Language code prefixed to migration destination containers.
/// Examples: `en`, `jp`
pub type LanguageCode = String;
/// File base name without its extension.
/// Example: `scan1`
pub type Stem = String;
