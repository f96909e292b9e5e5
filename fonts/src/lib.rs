//! Embedded CJK face used for worksheet text (Source Han Sans SC).
//!
//! The build script downloads the face into `OUT_DIR`. Offline builds embed an
//! empty buffer instead; check [`has_embedded_font`] before loading it.

pub static FONT_BYTES: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/SourceHanSansSC-Regular.otf"));

pub fn has_embedded_font() -> bool {
    !FONT_BYTES.is_empty()
}
