use cubic_bezier::{CubicBezier, Library};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ToyError;

/// What a share link carries: the saved curves and the curve on screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub library: Library,
    pub current: Option<CubicBezier>,
}

const B64_HEADER_LEN: usize = 4;
const CURRENT_VERSION: u16 = 1;

impl SessionState {
    /// Decode a string produced by [`encode`](SessionState::encode).
    pub fn from_bytes(bytes: &[u8]) -> Result<SessionState, ToyError> {
        let bytes = std::str::from_utf8(bytes)?.trim();
        if bytes.len() > B64_HEADER_LEN {
            let (header, body) = bytes.as_bytes().split_at(B64_HEADER_LEN);
            let version = decode_b64_header(header)?;
            return match version {
                1 => SessionState::from_b64(body),
                n => Err(ToyError::UnexpectedVersion(n)),
            };
        }
        Err(ToyError::InvalidHeader)
    }

    /// Read an exported library, as written by [`to_json`](SessionState::to_json).
    ///
    /// The JSON itself must be a map of strings; entries in it that are not
    /// valid curves are logged and skipped.
    pub fn from_json(bytes: &[u8]) -> Result<SessionState, ToyError> {
        let entries: IndexMap<String, String> = serde_json::from_slice(bytes)?;
        let mut library = Library::new();
        library.load(entries.iter().map(|(name, curve)| (name.as_str(), curve.as_str())));
        Ok(SessionState {
            library,
            ..Default::default()
        })
    }

    pub fn to_json(&self) -> Result<String, ToyError> {
        serde_json::to_string_pretty(&self.library).map_err(Into::into)
    }

    fn from_b64(bytes: &[u8]) -> Result<SessionState, ToyError> {
        let bytes = base64::decode_config(bytes, base64::URL_SAFE)?;
        let mut r = flate2::read::ZlibDecoder::new(bytes.as_slice());
        bincode::deserialize_from(&mut r).map_err(Into::into)
    }

    /// A compact, URL-safe encoding: a version header followed by the
    /// zlib-compressed bincode of `self`, all in base64.
    pub fn encode(&self) -> Result<String, ToyError> {
        use flate2::{write::ZlibEncoder, Compression};
        let mut buf = Vec::with_capacity(128);
        let header = encode_b64_header(CURRENT_VERSION);
        buf.extend_from_slice(&header);
        {
            let b64_writer = base64::write::EncoderWriter::new(&mut buf, base64::URL_SAFE);
            let mut encoder = ZlibEncoder::new(b64_writer, Compression::default());
            bincode::serialize_into(&mut encoder, self)?;
            let mut b64_writer = encoder.finish()?;
            b64_writer.finish()?;
        }
        String::from_utf8(buf).map_err(|e| ToyError::Utf8(e.utf8_error()))
    }
}

fn encode_b64_header(version: u16) -> [u8; 4] {
    let mut out = [b'A'; 4];
    let bytes = version.to_be_bytes();
    base64::encode_config_slice(&bytes, base64::URL_SAFE, &mut out);
    out
}

fn decode_b64_header(header: &[u8]) -> Result<u16, ToyError> {
    if header.len() != B64_HEADER_LEN {
        return Err(ToyError::InvalidHeader);
    }
    match base64::decode_config(header, base64::URL_SAFE).as_deref() {
        Ok(&[hi, lo]) => Ok(u16::from_be_bytes([hi, lo])),
        _ => Err(ToyError::InvalidHeader),
    }
}
