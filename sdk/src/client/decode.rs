//! Reply body decoding.
//!
//! The API usually answers in UTF-8, but error lines with Romanian
//! diacritics have been seen in legacy code pages. Bytes that are not valid
//! UTF-8 go through charset detection.

use encoding_rs::Encoding;

/// Decoded reply text and the encoding used to read it.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedReply {
    pub text: String,
    pub encoding: &'static str,
}

/// Detect the charset of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "windows-1250" | "cp1250" => "windows-1250".to_string(),
        "iso-8859-2" | "latin2" => "iso-8859-2".to_string(),
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            "windows-1252".to_string()
        }
        other => other.to_string(),
    }
}

/// Decode a reply body.
pub fn decode_reply(bytes: &[u8]) -> DecodedReply {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return DecodedReply {
            text: text.to_string(),
            encoding: "utf-8",
        };
    }

    let charset = detect_encoding(bytes);
    match Encoding::for_label(charset.as_bytes()) {
        Some(encoding) => {
            let (text, used, _) = encoding.decode(bytes);
            DecodedReply {
                text: text.into_owned(),
                encoding: used.name(),
            }
        }
        None => DecodedReply {
            text: String::from_utf8_lossy(bytes).into_owned(),
            encoding: "utf-8",
        },
    }
}
