//! Ray dump reader implementation.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use tracing::{debug, trace, warn};

use super::format::*;
use crate::rays::{CastHitQuery, CastMissQuery, RaySet, ShadowQuery, DEPTH_UNKNOWN};
use crate::util::{Error, Result, Vec3};

/// Upper bound on rays preallocated from an untrusted header.
const MAX_PREALLOC_RAYS: usize = 1 << 20;

/// Decoder for both ray dump layouts.
///
/// The layout is picked from the first i32: [`RAYDUMP_MAGIC`] selects the
/// versioned layout, anything else is taken as the type of the first
/// legacy record.
pub struct RayDumpReader<R: Read> {
    inner: R,
    pos: u64,
}

impl<R: Read> RayDumpReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, pos: 0 }
    }

    /// Bytes consumed so far.
    #[inline]
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Decode the whole stream into a [`RaySet`].
    pub fn read(mut self) -> Result<RaySet> {
        let first = self.try_read_i32()?.ok_or(Error::UnexpectedEof(0))?;
        if first == RAYDUMP_MAGIC {
            self.read_versioned()
        } else {
            self.read_legacy(first)
        }
    }

    fn read_versioned(&mut self) -> Result<RaySet> {
        let version = self.read_i32()?;
        let with_t = match version {
            VERSION_WITH_T => true,
            VERSION_WITHOUT_T => false,
            v => return Err(Error::UnsupportedVersion(v)),
        };

        let num_rays = self.read_i32()?;
        if num_rays < 0 {
            return Err(Error::InvalidRayCount(num_rays));
        }
        let num_rays = num_rays as usize;
        debug!(version, num_rays, "reading versioned ray dump");

        let mut shadows = Vec::with_capacity(num_rays.min(MAX_PREALLOC_RAYS));
        let mut skipped_casts = 0usize;

        for index in 0..num_rays {
            let kind = self.read_i32()?;
            let origin = self.read_vec3()?;
            let direction = self.read_vec3()?;
            let t = if with_t { self.read_f32()? } else { 0.0 };

            let footer = self.read_i32()?;
            if footer != RECORD_FOOTER {
                return Err(Error::BadFooter { index, footer });
            }

            match kind {
                // The versioned layout keeps no usable data for cast rays.
                VERSIONED_TYPE_CAST => skipped_casts += 1,
                VERSIONED_TYPE_SHADOW => shadows.push(ShadowQuery {
                    depth: DEPTH_UNKNOWN,
                    origin,
                    difference: direction,
                    connected: is_connected_t(t),
                }),
                kind => return Err(Error::InvalidRecordType { index, kind }),
            }
        }

        if self.has_trailing_bytes()? {
            warn!(pos = self.pos, "ignoring bytes after the last ray record");
        }
        trace!(shadows = shadows.len(), skipped_casts, "versioned ray dump decoded");

        Ok(RaySet::from_shadows(shadows).with_hits_not_annotated(!with_t))
    }

    fn read_legacy(&mut self, first_kind: i32) -> Result<RaySet> {
        debug!("reading legacy ray dump");
        let mut set = RaySet::new();
        let mut next = Some(first_kind);
        let mut index = 0usize;

        loop {
            let kind = match next {
                // Without the end marker the dump may have been cut mid-write.
                None => return Err(Error::UnexpectedEof(self.pos)),
                Some(LEGACY_END_OF_STREAM) => break,
                Some(kind) => kind,
            };

            let depth = self.read_i32()?;
            let origin = self.read_vec3()?;
            let vector = self.read_vec3()?;

            match kind {
                LEGACY_TYPE_CAST_HIT => set.push_cast_hit(CastHitQuery { depth, origin, difference: vector }),
                LEGACY_TYPE_CAST_MISS => set.push_cast_miss(CastMissQuery { depth, origin, direction: vector }),
                LEGACY_TYPE_SHADOW_BLOCKED | LEGACY_TYPE_SHADOW_CONNECTED => set.push_shadow(ShadowQuery {
                    depth,
                    origin,
                    difference: vector,
                    connected: kind == LEGACY_TYPE_SHADOW_CONNECTED,
                }),
                kind => return Err(Error::InvalidRecordType { index, kind }),
            }

            index += 1;
            next = self.try_read_i32()?;
        }

        trace!(records = index, "legacy ray dump decoded");
        Ok(set)
    }

    fn read_i32(&mut self) -> Result<i32> {
        let v = self
            .inner
            .read_i32::<LittleEndian>()
            .map_err(|e| Error::from_read(e, self.pos))?;
        self.pos += 4;
        Ok(v)
    }

    fn read_f32(&mut self) -> Result<f32> {
        let v = self
            .inner
            .read_f32::<LittleEndian>()
            .map_err(|e| Error::from_read(e, self.pos))?;
        self.pos += 4;
        Ok(v)
    }

    fn read_vec3(&mut self) -> Result<Vec3> {
        let x = self.read_f32()?;
        let y = self.read_f32()?;
        let z = self.read_f32()?;
        Ok(Vec3::new(x, y, z))
    }

    /// Read an i32, or `None` if the stream ends before its first byte.
    fn try_read_i32(&mut self) -> Result<Option<i32>> {
        let mut buf = [0u8; 4];
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::from_read(e, self.pos + filled as u64)),
            }
        }

        match filled {
            0 => Ok(None),
            4 => {
                self.pos += 4;
                Ok(Some(LittleEndian::read_i32(&buf)))
            }
            n => Err(Error::UnexpectedEof(self.pos + n as u64)),
        }
    }

    fn has_trailing_bytes(&mut self) -> Result<bool> {
        let mut probe = [0u8; 1];
        loop {
            match self.inner.read(&mut probe) {
                Ok(n) => return Ok(n > 0),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::from_read(e, self.pos)),
            }
        }
    }
}

/// Decode a ray dump from any byte stream.
pub fn read_ray_dump(reader: impl Read) -> Result<RaySet> {
    RayDumpReader::new(reader).read()
}

/// Open and decode a ray dump file.
///
/// Any failure to open `path` is reported as [`Error::FileNotFound`]; the
/// file is closed before this returns.
pub fn open_ray_dump(path: impl AsRef<Path>) -> Result<RaySet> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::not_found(path, e))?;
    read_ray_dump(BufReader::new(file))
}
