/// Wire constants shared by the encoder and decoder
pub const CRLF: &str = "\r\n";

pub const VCARD_COMPONENT: &str = "VCARD";
pub const VCARD_BEGIN_LINE: &str = const_str::concat!("BEGIN:", VCARD_COMPONENT, CRLF);
pub const VCARD_END_LINE: &str = const_str::concat!("END:", VCARD_COMPONENT, CRLF);

/// Indent opening every continuation line of a folded value.
pub const FOLD_INDENT: &str = "  ";
pub const FOLD_SEPARATOR: &str = const_str::concat!(CRLF, FOLD_INDENT);

/// Configuration sources
pub const CONFIG_ENV_PREFIX: &str = "CARDWIRE";
pub const CONFIG_FILE_NAME: &str = "cardwire.toml";
