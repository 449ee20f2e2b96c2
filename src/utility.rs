use std::{ffi::OsStr, os::windows::ffi::OsStrExt};

/// NUL-terminated UTF-16 copy of `s` for Win32 calls.
pub fn to_wstring(s: impl AsRef<OsStr>) -> Vec<u16> {
    s.as_ref()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect()
}

/// Little-endian byte view of a UTF-16 buffer, as `REG_SZ` data expects.
pub fn wide_bytes(wide: &[u16]) -> Vec<u8> {
    wide.iter().flat_map(|c| c.to_le_bytes()).collect()
}
