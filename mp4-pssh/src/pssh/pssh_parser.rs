/*
    REFERENCES
    ----------

    1. https://github.com/shaka-project/shaka-player/blob/4e933116984beb630d31ce7a0b8c9bc6f8b48c06/lib/util/pssh.js
    2. https://github.com/shaka-project/shaka-packager/blob/56e227267c9091a0f65b4d92d9064dda4557f3a7/packager/tools/pssh/pssh-box.py
    3. https://www.w3.org/TR/eme-initdata-cenc/#common-system

*/

use super::{KeyId, SystemId};
use crate::{FourCC, Mp4Parser, ParsedBox, Result};
use base64::Engine;
use log::debug;

/// A single decoded `PSSH` box.
///
/// ```text
/// version(1) flags(3) system_id(16)
/// [version >= 1] key_id_count(4) key_id(16) * key_id_count
/// data_size(4) data(data_size)
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PsshBox<'a> {
    pub version: u8,
    /// 24 bit flags, unused by every known version.
    pub flags: u32,
    pub system_id: SystemId,
    /// Key ids from the box header, always empty for version 0 boxes.
    pub key_ids: Vec<KeyId>,
    /// System specific data, e.g. a serialized `WidevinePsshData` or a PlayReady object.
    pub data: &'a [u8],
    /// The whole box, header included.
    pub raw: &'a [u8],
}

impl<'a> PsshBox<'a> {
    /// Decode a box yielded by [`Mp4Parser`].
    ///
    /// Returns `Ok(None)` when the box is not a `pssh` box and an error when one of
    /// its fields runs past the end of the box body.
    pub fn new(box_: &ParsedBox<'a>) -> Result<Option<Self>> {
        if box_.name != FourCC::PSSH {
            return Ok(None);
        }

        let mut reader = box_.reader();
        let version = reader.read_u8()?;
        let [f0, f1, f2] = reader.read_array::<3>()?;
        let system_id = SystemId(reader.read_array()?);
        let mut key_ids = Vec::new();

        if version > 0 {
            let num_key_ids = reader.read_u32()?;

            for _ in 0..num_key_ids {
                key_ids.push(KeyId(reader.read_array()?));
            }
        }

        let data_size = reader.read_u32()?;
        let data = reader.read_bytes(data_size as usize)?;

        if reader.has_more_data() {
            debug!(
                "ignoring {} trailing bytes in pssh box at offset {}",
                reader.remaining(),
                box_.start
            );
        }

        Ok(Some(Self {
            version,
            flags: u32::from_be_bytes([0, f0, f1, f2]),
            system_id,
            key_ids,
            data,
            raw: box_.full_data(),
        }))
    }

    /// Size of the system specific data, as declared in the box.
    pub fn data_size(&self) -> u32 {
        self.data.len() as u32
    }

    /// The whole box encoded as base64, the form used by DASH `cenc:pssh`
    /// elements and license requests.
    pub fn as_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self.raw)
    }
}

/// Iterate over every decodable `PSSH` box in `data`, in buffer order.
///
/// Boxes of other types and `pssh` boxes with a malformed body are skipped.
/// Iteration ends at the first box which is truncated by the end of `data`.
pub fn boxes(data: &[u8]) -> impl Iterator<Item = PsshBox<'_>> {
    Mp4Parser::new(data).filter_map(|box_| match PsshBox::new(&box_) {
        Ok(Some(pssh)) => Some(pssh),
        Ok(None) => {
            debug!("skipping {} box at offset {}", box_.name, box_.start);
            None
        }
        Err(e) => {
            debug!("skipping malformed pssh box at offset {}: {}", box_.start, e);
            None
        }
    })
}

/// Parse `PSSH` boxes from init data. Shorthand for [`Pssh::new`].
pub fn parse(data: &[u8]) -> Pssh {
    Pssh::new(data)
}

/// System ids and key ids collected from every `PSSH` box in a buffer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pssh {
    /// One entry per decoded box, in buffer order. Duplicates are kept.
    pub system_ids: Vec<SystemId>,
    /// Key ids of every version 1 box, in buffer order and then in declared order.
    pub cenc_key_ids: Vec<KeyId>,
}

impl Pssh {
    /// Parse `PSSH` boxes from init data. This never fails, boxes which cannot be
    /// decoded contribute nothing.
    pub fn new(data: &[u8]) -> Self {
        boxes(data).collect()
    }

    /// Decode base64 init data and parse it.
    pub fn from_base64(data: &str) -> Result<Self> {
        let data = base64::engine::general_purpose::STANDARD.decode(data.trim())?;
        Ok(Self::new(&data))
    }

    pub fn has_system(&self, system_id: SystemId) -> bool {
        self.system_ids.contains(&system_id)
    }

    pub fn is_empty(&self) -> bool {
        self.system_ids.is_empty()
    }
}

impl<'a> FromIterator<PsshBox<'a>> for Pssh {
    fn from_iter<I: IntoIterator<Item = PsshBox<'a>>>(iter: I) -> Self {
        let mut pssh = Self::default();

        for box_ in iter {
            pssh.system_ids.push(box_.system_id);
            pssh.cenc_key_ids.extend(box_.key_ids);
        }

        pssh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn pssh_box(version: u8, system_id: SystemId, key_ids: &[&[u8; 16]], data: &[u8]) -> Vec<u8> {
        let mut body = vec![version, 0, 0, 1];
        body.extend_from_slice(&system_id.0);

        if version > 0 {
            body.extend_from_slice(&(key_ids.len() as u32).to_be_bytes());
            for key_id in key_ids {
                body.extend_from_slice(*key_id);
            }
        }

        body.extend_from_slice(&(data.len() as u32).to_be_bytes());
        body.extend_from_slice(data);

        let mut out = ((body.len() + 8) as u32).to_be_bytes().to_vec();
        out.extend_from_slice(b"pssh");
        out.extend(body);
        out
    }

    #[test]
    fn decodes_box_fields() {
        let data = pssh_box(1, SystemId::COMMON, &[b"0123456789012345"], &[7, 7]);
        let boxes = boxes(&data).collect::<Vec<_>>();

        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].version, 1);
        assert_eq!(boxes[0].flags, 1);
        assert_eq!(boxes[0].system_id, SystemId::COMMON);
        assert_eq!(boxes[0].key_ids, vec![KeyId(*b"0123456789012345")]);
        assert_eq!(boxes[0].data, &[7, 7]);
        assert_eq!(boxes[0].data_size(), 2);
        assert_eq!(boxes[0].raw, data.as_slice());
    }

    #[test]
    fn non_pssh_box_is_not_decoded() {
        let data = [0, 0, 0, 8, b'f', b'r', b'e', b'e'];
        let box_ = Mp4Parser::new(&data).next().unwrap();
        assert_eq!(PsshBox::new(&box_).unwrap(), None);
    }

    #[test]
    fn malformed_body_is_an_error() {
        // Declares two key ids but carries one.
        let mut data = pssh_box(1, SystemId::COMMON, &[b"0123456789012345"], &[]);
        data[31] = 2;

        let box_ = Mp4Parser::new(&data).next().unwrap();
        assert!(PsshBox::new(&box_).unwrap_err().is_end_of_buffer());
    }

    #[test]
    fn malformed_body_skips_only_that_box() {
        let mut data = pssh_box(0, SystemId::WIDEVINE, &[], &[1, 2, 3]);
        // data_size larger than the body.
        let bad = data.len();
        data.extend(pssh_box(0, SystemId::PLAYREADY, &[], &[1]));
        data[bad + 31] = 9;
        data.extend(pssh_box(1, SystemId::COMMON, &[b"ABCDEFGHIJKLMNOP"], &[]));

        let pssh = Pssh::new(&data);
        assert_eq!(pssh.system_ids, vec![SystemId::WIDEVINE, SystemId::COMMON]);
        assert_eq!(pssh.cenc_key_ids, vec![KeyId(*b"ABCDEFGHIJKLMNOP")]);
    }

    #[test]
    fn collects_from_decoded_boxes() {
        let mut data = pssh_box(1, SystemId::COMMON, &[b"0123456789012345"], &[]);
        data.extend(pssh_box(0, SystemId::WIDEVINE, &[], &[1]));

        let decoded = boxes(&data).collect::<Vec<_>>();
        let pssh = decoded.iter().cloned().collect::<Pssh>();
        assert_eq!(pssh, Pssh::new(&data));
        assert_eq!(pssh.system_ids, vec![SystemId::COMMON, SystemId::WIDEVINE]);
        assert_eq!(pssh.cenc_key_ids, vec![KeyId(*b"0123456789012345")]);
    }

    #[test]
    fn huge_key_id_count_is_malformed() {
        let mut data = pssh_box(1, SystemId::COMMON, &[], &[]);
        data[28..32].copy_from_slice(&u32::MAX.to_be_bytes());
        assert!(Pssh::new(&data).is_empty());
    }

    #[test]
    fn body_shorter_than_system_id() {
        let data = [0, 0, 0, 16, b'p', b's', b's', b'h', 0, 0, 0, 0, 1, 2, 3, 4];
        assert!(Pssh::new(&data).is_empty());
    }

    #[test]
    fn later_versions_carry_key_ids() {
        let data = pssh_box(2, SystemId::COMMON, &[b"0123456789012345"], &[]);
        let pssh = Pssh::new(&data);
        assert_eq!(pssh.system_ids, vec![SystemId::COMMON]);
        assert_eq!(pssh.cenc_key_ids.len(), 1);
    }

    #[test]
    fn trailing_body_bytes_are_ignored() {
        let mut data = pssh_box(0, SystemId::WIDEVINE, &[], &[1]);
        data.extend_from_slice(&[0xaa, 0xbb]);
        data[3] += 2;

        let boxes = boxes(&data).collect::<Vec<_>>();
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].data, &[1]);
        assert_eq!(boxes[0].raw.len(), data.len());
    }

    #[test]
    fn duplicates_are_kept() {
        let mut data = pssh_box(1, SystemId::COMMON, &[b"0123456789012345"], &[]);
        let copy = data.clone();
        data.extend(copy);

        let pssh = parse(&data);
        assert_eq!(pssh.system_ids, vec![SystemId::COMMON; 2]);
        assert_eq!(pssh.cenc_key_ids, vec![KeyId(*b"0123456789012345"); 2]);
        assert!(pssh.has_system(SystemId::COMMON));
        assert!(!pssh.has_system(SystemId::WIDEVINE));
    }

    #[test]
    fn from_base64() {
        let data = pssh_box(0, SystemId::WIDEVINE, &[], &[1, 2, 3, 4]);
        let encoded = base64::engine::general_purpose::STANDARD.encode(&data);

        let pssh = Pssh::from_base64(&format!("{}\n", encoded)).unwrap();
        assert_eq!(pssh.system_ids, vec![SystemId::WIDEVINE]);
        assert_eq!(boxes(&data).next().unwrap().as_base64(), encoded);

        assert!(matches!(
            Pssh::from_base64("not base64!"),
            Err(Error::InvalidBase64(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_ids_as_hex() {
        let data = pssh_box(1, SystemId::COMMON, &[b"0123456789012345"], &[]);
        let json = serde_json::to_string(&Pssh::new(&data)).unwrap();
        assert_eq!(
            json,
            r#"{"system_ids":["1077efecc0b24d02ace33c1e52e2fb4b"],"cenc_key_ids":["30313233343536373839303132333435"]}"#
        );
    }
}
