//! 文書エンコーダー
//!
//! バイナリ文書を送信可能なBase64ペイロードへ変換する（標準アルファベット、パディングあり）

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{Error, Result};
use crate::types::EncodedFilePart;

/// バイト列をエンコード
pub fn encode_bytes(bytes: &[u8], mime_type: &str) -> EncodedFilePart {
    EncodedFilePart {
        data: STANDARD.encode(bytes),
        mime_type: mime_type.to_string(),
    }
}

/// ペイロードを元のバイト列へ戻す
pub fn decode_payload(part: &EncodedFilePart) -> Result<Vec<u8>> {
    STANDARD
        .decode(part.data.as_bytes())
        .map_err(|e| Error::Decode(e.to_string()))
}
