//! Encoder and decoder configuration.

use crate::ExtRegistry;

/// Default container nesting bound for the decoder's frame stack.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Per-kind declared-length limits enforced during decode.
///
/// Each threshold is inclusive: a declared length equal to the limit is
/// accepted, one past it is rejected. An unset limit means only the
/// structural 2^32-1 ceiling applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnpackLimits {
    pub max_str_len: Option<u32>,
    pub max_bin_len: Option<u32>,
    pub max_array_len: Option<u32>,
    pub max_map_len: Option<u32>,
    pub max_ext_len: Option<u32>,
}

/// How invalid UTF-8 in string payloads is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Utf8Policy {
    /// Reject the payload with a format error.
    #[default]
    Strict,
    /// Substitute U+FFFD for invalid sequences.
    Replace,
}

/// Encoder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackOptions {
    /// Encode byte strings with the bin tag family. When disabled, byte
    /// strings use the legacy str family and str8 is never emitted
    /// (the pre-2013 wire format had neither).
    pub use_bin_type: bool,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self { use_bin_type: true }
    }
}

/// Decoder configuration.
#[derive(Debug, Default)]
pub struct UnpackOptions {
    pub limits: UnpackLimits,
    /// Yield str payloads as raw [`crate::PackValue::Bin`] bytes,
    /// skipping UTF-8 validation.
    pub raw_mode: bool,
    pub utf8: Utf8Policy,
    /// Maximum open-container nesting depth; `None` uses
    /// [`DEFAULT_MAX_DEPTH`].
    pub max_depth: Option<usize>,
    pub registry: ExtRegistry,
}

impl UnpackOptions {
    pub(crate) fn depth_bound(&self) -> usize {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }
}
