use crate::bit_set::MAX_IDENTIFIER;

/// Errors raised by the bitmask codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The identifier does not name a bit of the mask.
    #[error("Identifier {0} is out of range (must be within 0..={max})", max = MAX_IDENTIFIER)]
    InvalidIdentifier(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) fn invalid_identifier(raw: i64) -> Error {
    log::debug!("rejected identifier {raw}");
    Error::InvalidIdentifier(raw)
}

/// Narrows a raw identifier to a bit position, rejecting anything outside the mask width.
pub(crate) fn identifier(raw: i64) -> Result<u32> {
    u32::try_from(raw)
        .ok()
        .filter(|&id| id <= MAX_IDENTIFIER)
        .ok_or_else(|| invalid_identifier(raw))
}
