//! Standard file header written at the start of every generated file.
//!
//! Every file produced by the write engine begins with a fixed 64-byte
//! header identifying the file format, the application-defined record kind,
//! the creation time, and a short human-readable description. All integer
//! fields are big-endian so files are portable across targets.
//!
//! Layout:
//!
//! ```text
//! offset  size  field
//!      0     4  magic ("SKYF")
//!      4     4  format version
//!      8     4  header length (64)
//!     12     4  record kind (application-defined)
//!     16     4  creation time, seconds since epoch
//!     20     4  creation time, subsecond nanoseconds
//!     24    32  description, zero-padded UTF-8
//!     56     8  reserved (zero)
//! ```

use chrono::Utc;
use thiserror::Error;

/// Magic number identifying a skyfile header ("SKYF").
pub const HEADER_MAGIC: u32 = 0x534B_5946;

/// Current header format version.
pub const HEADER_VERSION: u32 = 1;

/// Total encoded header length in bytes.
pub const HEADER_LEN: usize = 64;

/// Maximum description length in bytes.
pub const DESCRIPTION_MAX_LEN: usize = 32;

/// Header encode/decode errors.
#[derive(Debug, Error)]
pub enum HeaderError {
    /// Description exceeds [`DESCRIPTION_MAX_LEN`] bytes.
    #[error("Description too long: {len} bytes (max {max})", max = DESCRIPTION_MAX_LEN)]
    DescriptionTooLong { len: usize },

    /// Input shorter than [`HEADER_LEN`] bytes.
    #[error("Header truncated: {len} bytes (need {need})", need = HEADER_LEN)]
    Truncated { len: usize },

    /// Magic number mismatch.
    #[error("Bad header magic: {found:#010x}")]
    BadMagic { found: u32 },

    /// Unsupported format version.
    #[error("Unsupported header version: {found}")]
    BadVersion { found: u32 },
}

/// Decoded form of the standard file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    /// Application-defined record kind tag. Not interpreted by the engine.
    pub record_kind: u32,
    /// Creation time, seconds since the Unix epoch.
    pub time_secs: u32,
    /// Creation time, subsecond nanoseconds.
    pub time_nanos: u32,
    /// Human-readable description, at most [`DESCRIPTION_MAX_LEN`] bytes.
    pub description: String,
}

impl FileHeader {
    /// Creates a header stamped with the current time.
    ///
    /// Fails if the description exceeds [`DESCRIPTION_MAX_LEN`] bytes.
    pub fn new(record_kind: u32, description: &str) -> Result<Self, HeaderError> {
        if description.len() > DESCRIPTION_MAX_LEN {
            return Err(HeaderError::DescriptionTooLong {
                len: description.len(),
            });
        }

        let now = Utc::now();
        Ok(Self {
            record_kind,
            time_secs: clamp_timestamp(now.timestamp()),
            time_nanos: now.timestamp_subsec_nanos(),
            description: description.to_string(),
        })
    }

    /// Encodes the header into its fixed 64-byte wire form.
    ///
    /// Fails if the description exceeds [`DESCRIPTION_MAX_LEN`] bytes, which
    /// can only happen for headers constructed directly rather than through
    /// [`FileHeader::new`].
    pub fn encode(&self) -> Result<[u8; HEADER_LEN], HeaderError> {
        if self.description.len() > DESCRIPTION_MAX_LEN {
            return Err(HeaderError::DescriptionTooLong {
                len: self.description.len(),
            });
        }

        let mut buf = [0u8; HEADER_LEN];
        buf[0..4].copy_from_slice(&HEADER_MAGIC.to_be_bytes());
        buf[4..8].copy_from_slice(&HEADER_VERSION.to_be_bytes());
        buf[8..12].copy_from_slice(&(HEADER_LEN as u32).to_be_bytes());
        buf[12..16].copy_from_slice(&self.record_kind.to_be_bytes());
        buf[16..20].copy_from_slice(&self.time_secs.to_be_bytes());
        buf[20..24].copy_from_slice(&self.time_nanos.to_be_bytes());

        let desc = self.description.as_bytes();
        buf[24..24 + desc.len()].copy_from_slice(desc);

        Ok(buf)
    }

    /// Decodes a header from the start of a file.
    pub fn decode(bytes: &[u8]) -> Result<Self, HeaderError> {
        if bytes.len() < HEADER_LEN {
            return Err(HeaderError::Truncated { len: bytes.len() });
        }

        let u32_at = |offset: usize| {
            let mut field = [0u8; 4];
            field.copy_from_slice(&bytes[offset..offset + 4]);
            u32::from_be_bytes(field)
        };

        let magic = u32_at(0);
        if magic != HEADER_MAGIC {
            return Err(HeaderError::BadMagic { found: magic });
        }

        let version = u32_at(4);
        if version != HEADER_VERSION {
            return Err(HeaderError::BadVersion { found: version });
        }

        let desc_bytes = &bytes[24..24 + DESCRIPTION_MAX_LEN];
        let desc_len = desc_bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(DESCRIPTION_MAX_LEN);
        let description = String::from_utf8_lossy(&desc_bytes[..desc_len]).into_owned();

        Ok(Self {
            record_kind: u32_at(12),
            time_secs: u32_at(16),
            time_nanos: u32_at(20),
            description,
        })
    }
}

/// Clamps a signed epoch timestamp into the header's u32 seconds field.
///
/// Times before the epoch encode as 0 and times past the u32 range (year
/// 2106) saturate at `u32::MAX` rather than wrapping.
fn clamp_timestamp(secs: i64) -> u32 {
    secs.clamp(0, u32::MAX as i64) as u32
}

/// Writes the standard header for a freshly created file.
///
/// Returns the number of bytes written (always [`HEADER_LEN`] on success).
pub fn write_header<S: crate::storage::Storage>(
    storage: &S,
    handle: &mut S::Handle,
    record_kind: u32,
    description: &str,
) -> std::io::Result<usize> {
    let to_io = |e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e);
    let header = FileHeader::new(record_kind, description).map_err(to_io)?;
    let encoded = header.encode().map_err(to_io)?;
    storage.append(handle, &encoded)?;
    Ok(HEADER_LEN)
}
