use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{rngs::OsRng, RngCore};

use crate::modules::upload::aspect_ratio::AspectRatio;

const TOKEN_BYTES: usize = 32;

/// 32 bytes from the OS RNG, URL-safe base64 without padding (43 chars).
pub fn random_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn thumbnail_name(extension: &str) -> String {
    format!("{}.{}", random_token(), extension)
}

pub fn video_key(aspect_ratio: AspectRatio) -> String {
    format!("{}/{}.mp4", aspect_ratio.prefix(), random_token())
}
