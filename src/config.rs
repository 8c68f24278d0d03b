//! # Format Constants
//!
//! Centralized wire-format constants for the three container formats.
//!
//! These values are load-bearing for backward compatibility: files produced
//! by prior releases (and by the original web implementation) embed them, so
//! changing any of them is a format break that requires a new version byte.
//!
//! ## Security Considerations
//! - The preset passphrase is a static application-embedded secret, not a
//!   per-message secret. Combined with the all-zero nonce this is a known
//!   weakness of the format, kept for compatibility (see `utils::crypto`).
//! - Decompression output is capped at [`MAX_DECODED_SIZE`] to prevent
//!   decompression bombs.

/// Magic byte identifying a module container
pub const MODULE_MAGIC: u8 = 111;

/// Current (and only) module container version
pub const MODULE_VERSION: u8 = 0;

/// Marker byte preceding each length-prefixed asset block
pub const ASSET_MARKER: u8 = 1;

/// Marker byte terminating the module container
pub const END_MARKER: u8 = 0;

/// Type tag stored in the module metadata envelope
pub const MODULE_TYPE: &str = "risuModule";

/// Envelope version written by the preset encoder
pub const PRESET_VERSION: u8 = 2;

/// Envelope versions the preset decoder accepts
pub const ACCEPTED_PRESET_VERSIONS: [u8; 2] = [0, 2];

/// Type tag written by the preset encoder
pub const PRESET_TYPE: &str = "risupreset";

/// Legacy type tag accepted by the preset decoder
pub const PRESET_TYPE_LEGACY: &str = "preset";

/// Static passphrase the preset cipher key is derived from
pub const PRESET_SECRET: &str = "risupreset";

/// Mandatory archive entry holding the card metadata document
pub const CARD_ENTRY: &str = "card.json";

/// Reserved archive entry holding the optional module container blob
pub const MODULE_ENTRY: &str = "module.risum";

/// Max allowed decoded size for any decompressed block or layer (64 MB)
pub const MAX_DECODED_SIZE: usize = 64 * 1024 * 1024;
