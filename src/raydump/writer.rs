//! Ray dump writer implementation.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use tracing::debug;

use super::format::*;
use crate::rays::RaySet;
use crate::util::{Error, Result, Vec3};

/// Encoder for both ray dump layouts.
pub struct RayDumpWriter<W: Write> {
    inner: W,
    pos: u64,
}

impl RayDumpWriter<BufWriter<File>> {
    /// Create (or truncate) a dump file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> RayDumpWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, pos: 0 }
    }

    /// Bytes written so far.
    #[inline]
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Encode `set` in the given layout and flush.
    ///
    /// The versioned layout stores shadow queries only; with `with_t` the
    /// connectivity survives as [`CONNECTED_T`] or `0.0`, without it every
    /// shadow reads back as occluded. The legacy layout keeps every
    /// category and depth.
    pub fn write(&mut self, set: &RaySet, layout: DumpLayout) -> Result<()> {
        match layout {
            DumpLayout::Versioned { with_t } => self.write_versioned(set, with_t)?,
            DumpLayout::Legacy => self.write_legacy(set)?,
        }
        self.inner.flush()?;
        debug!(bytes = self.pos, ?layout, "ray dump written");
        Ok(())
    }

    /// Hand back the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }

    fn write_versioned(&mut self, set: &RaySet, with_t: bool) -> Result<()> {
        let shadows = set.shadow_queries();
        let count = header_ray_count(shadows.len())?;

        self.write_i32(RAYDUMP_MAGIC)?;
        self.write_i32(if with_t { VERSION_WITH_T } else { VERSION_WITHOUT_T })?;
        self.write_i32(count)?;

        for q in shadows {
            self.write_i32(VERSIONED_TYPE_SHADOW)?;
            self.write_vec3(q.origin)?;
            self.write_vec3(q.difference)?;
            if with_t {
                self.write_f32(if q.connected { CONNECTED_T } else { 0.0 })?;
            }
            self.write_i32(RECORD_FOOTER)?;
        }
        Ok(())
    }

    fn write_legacy(&mut self, set: &RaySet) -> Result<()> {
        for q in set.cast_hits() {
            self.write_legacy_record(LEGACY_TYPE_CAST_HIT, q.depth, q.origin, q.difference)?;
        }
        for q in set.cast_misses() {
            self.write_legacy_record(LEGACY_TYPE_CAST_MISS, q.depth, q.origin, q.direction)?;
        }
        for q in set.shadow_queries() {
            let kind = if q.connected {
                LEGACY_TYPE_SHADOW_CONNECTED
            } else {
                LEGACY_TYPE_SHADOW_BLOCKED
            };
            self.write_legacy_record(kind, q.depth, q.origin, q.difference)?;
        }
        self.write_i32(LEGACY_END_OF_STREAM)
    }

    fn write_legacy_record(&mut self, kind: i32, depth: i32, origin: Vec3, vector: Vec3) -> Result<()> {
        self.write_i32(kind)?;
        self.write_i32(depth)?;
        self.write_vec3(origin)?;
        self.write_vec3(vector)
    }

    fn write_i32(&mut self, value: i32) -> Result<()> {
        self.inner.write_i32::<LittleEndian>(value)?;
        self.pos += 4;
        Ok(())
    }

    fn write_f32(&mut self, value: f32) -> Result<()> {
        self.inner.write_f32::<LittleEndian>(value)?;
        self.pos += 4;
        Ok(())
    }

    fn write_vec3(&mut self, v: Vec3) -> Result<()> {
        self.write_f32(v.x)?;
        self.write_f32(v.y)?;
        self.write_f32(v.z)
    }
}

/// Ray count as stored in the versioned header.
fn header_ray_count(len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| {
        Error::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} shadow queries do not fit a ray dump header", len),
        ))
    })
}

/// Encode `set` into a byte buffer.
pub fn encode_ray_dump(set: &RaySet, layout: DumpLayout) -> Result<Vec<u8>> {
    let mut writer = RayDumpWriter::new(Vec::new());
    writer.write(set, layout)?;
    Ok(writer.into_inner())
}
