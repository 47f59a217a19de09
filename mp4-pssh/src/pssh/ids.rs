use crate::{Error, Result};
use std::fmt;

const COMMON_SYSTEM_ID: [u8; 16] = hex_id(b"1077efecc0b24d02ace33c1e52e2fb4b");
const FAIRPLAY_SYSTEM_ID: [u8; 16] = hex_id(b"94ce86fb07ff4f43adb893d2fa968ca2");
const PLAYREADY_SYSTEM_ID: [u8; 16] = hex_id(b"9a04f07998404286ab92e65be0885f95");
const WIDEVINE_SYSTEM_ID: [u8; 16] = hex_id(b"edef8ba979d64acea3c827dcd51d21ed");

const fn hex_id(hex: &[u8; 32]) -> [u8; 16] {
    const fn nibble(c: u8) -> u8 {
        match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            _ => panic!("system id constants must be lower case hex"),
        }
    }

    let mut id = [0; 16];
    let mut i = 0;

    while i < 16 {
        id[i] = (nibble(hex[i * 2]) << 4) | nibble(hex[i * 2 + 1]);
        i += 1;
    }

    id
}

fn decode_id(value: &str) -> Result<[u8; 16]> {
    let value = value.replace('-', "");
    let bytes = hex::decode(value)?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| Error::InvalidLength(len))
}

fn uuid(id: &[u8; 16]) -> String {
    let value = hex::encode(id);
    format!(
        "{}-{}-{}-{}-{}",
        &value[..8],
        &value[8..12],
        &value[12..16],
        &value[16..20],
        &value[20..]
    )
}

/// DRM system id parsed from `pssh` box.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SystemId(pub [u8; 16]);

impl SystemId {
    /// W3C common PSSH box format, carries key ids only.
    pub const COMMON: Self = Self(COMMON_SYSTEM_ID);
    pub const FAIRPLAY: Self = Self(FAIRPLAY_SYSTEM_ID);
    pub const PLAYREADY: Self = Self(PLAYREADY_SYSTEM_ID);
    pub const WIDEVINE: Self = Self(WIDEVINE_SYSTEM_ID);

    /// Parse a system id from 32 hex characters, dashes are ignored.
    pub fn from_hex(value: &str) -> Result<Self> {
        decode_id(value).map(Self)
    }

    pub fn kind(&self) -> DrmSystem {
        match self.0 {
            COMMON_SYSTEM_ID => DrmSystem::Common,
            FAIRPLAY_SYSTEM_ID => DrmSystem::FairPlay,
            PLAYREADY_SYSTEM_ID => DrmSystem::PlayReady,
            WIDEVINE_SYSTEM_ID => DrmSystem::WideVine,
            _ => DrmSystem::Other,
        }
    }

    pub fn uuid(&self) -> String {
        uuid(&self.0)
    }
}

/// Key id parsed from `pssh` box.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct KeyId(pub [u8; 16]);

impl KeyId {
    /// Parse a key id from 32 hex characters, dashes are ignored.
    pub fn from_hex(value: &str) -> Result<Self> {
        decode_id(value).map(Self)
    }

    pub fn uuid(&self) -> String {
        uuid(&self.0)
    }
}

impl fmt::Display for SystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SystemId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for KeyId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Known DRM systems.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DrmSystem {
    Common,
    FairPlay,
    Other,
    PlayReady,
    WideVine,
}

impl fmt::Display for DrmSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DrmSystem::Common => "common",
                DrmSystem::FairPlay => "fairplay",
                DrmSystem::Other => "other",
                DrmSystem::PlayReady => "playready",
                DrmSystem::WideVine => "widevine",
            }
        )
    }
}
