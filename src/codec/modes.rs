use std::fmt;

use serde::Serialize;

use crate::error::{KatError, KatResult};

/// Extension subcommand carrying AES cipher commands
pub const AES_SUBCOMMAND: u16 = 0;

/// Cipher submodes, numbered as the coprocessor expects them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Submode {
    Ecb = 0,
    Ctr = 1,
    Cbc = 2,
    Gcm = 3,
    Ofb = 4,
    Cfb = 5,
}

impl Submode {
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Submode::Ecb),
            1 => Some(Submode::Ctr),
            2 => Some(Submode::Cbc),
            3 => Some(Submode::Gcm),
            4 => Some(Submode::Ofb),
            5 => Some(Submode::Cfb),
            _ => None,
        }
    }

    /// Whether the submode produces an authentication tag
    pub fn is_aead(self) -> bool {
        matches!(self, Submode::Gcm)
    }

    pub fn code(self) -> &'static str {
        match self {
            Submode::Ecb => "ECB",
            Submode::Ctr => "CTR",
            Submode::Cbc => "CBC",
            Submode::Gcm => "GCM",
            Submode::Ofb => "OFB",
            Submode::Cfb => "CFB",
        }
    }
}

impl fmt::Display for Submode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Supported algorithms: name, extension subcommand, and submodes by 3-letter code
static SUPPORTED_MODES: &[(&str, u16, &[(&str, Submode)])] = &[(
    "AES",
    AES_SUBCOMMAND,
    &[
        ("ECB", Submode::Ecb),
        ("CTR", Submode::Ctr),
        ("CBC", Submode::Cbc),
        ("GCM", Submode::Gcm),
        ("OFB", Submode::Ofb),
        ("CFB", Submode::Cfb),
    ],
)];

/// A resolved algorithm/submode pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CipherMode {
    pub algorithm: &'static str,
    pub subcommand: u16,
    pub submode: Submode,
}

impl CipherMode {
    /// Resolve a node name of the form `"<ALG>:<SUBMODE...>"`.
    ///
    /// Both parts are upper-cased and only the first three characters of the
    /// submode are significant, so `"aes:gcm-128 #4"` resolves to AES/GCM.
    pub fn lookup(node_name: &str) -> KatResult<Self> {
        let (algorithm, submode) =
            split_node_name(node_name).ok_or_else(|| KatError::unknown_mode(node_name))?;

        SUPPORTED_MODES
            .iter()
            .find(|(name, _, _)| *name == algorithm)
            .and_then(|(name, subcommand, submodes)| {
                submodes
                    .iter()
                    .find(|(code, _)| *code == submode)
                    .map(|(_, submode)| CipherMode {
                        algorithm: *name,
                        subcommand: *subcommand,
                        submode: *submode,
                    })
            })
            .ok_or_else(|| KatError::unknown_mode(node_name))
    }
}

impl fmt::Display for CipherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.submode)
    }
}

/// Split a node name into its upper-cased algorithm and 3-character submode
fn split_node_name(node_name: &str) -> Option<(String, String)> {
    let (algorithm, submode) = node_name.split_once(':')?;
    let submode: String = submode.chars().take(3).collect();
    Some((algorithm.to_uppercase(), submode.to_uppercase()))
}

/// Whether a node name selects GCM, which is exempt from the 16-byte IV rule
pub fn is_gcm_name(node_name: &str) -> bool {
    matches!(split_node_name(node_name), Some((_, submode)) if submode == Submode::Gcm.code())
}
