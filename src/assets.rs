//! Card art manifest and texture atlas layout
//!
//! One image per card value, packed left to right into a single atlas
//! texture. Orientations are not stored; the renderer rotates UVs instead.

use crate::error::AssetError;

/// Side of one atlas slot in pixels
pub const ATLAS_SLOT: u32 = 128;

/// Where the image for `value` is fetched from
pub fn image_path(value: u8) -> String {
    format!("assets/{}.png", value)
}

/// UV rectangle in the atlas: `[u0, v0, u1, v1]`
pub type UvRect = [f32; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AtlasEntry {
    value: u8,
    slot: u32,
    width: u32,
    height: u32,
}

/// Atlas bookkeeping: which slot holds which value's image
#[derive(Debug, Clone)]
pub struct CardAtlas {
    slot_size: u32,
    slots: u32,
    entries: Vec<AtlasEntry>,
}

impl CardAtlas {
    /// An atlas with one slot per value
    pub fn new(values: &[u8], slot_size: u32) -> Self {
        Self {
            slot_size,
            slots: values.len().max(1) as u32,
            entries: values
                .iter()
                .enumerate()
                .map(|(i, &value)| AtlasEntry {
                    value,
                    slot: i as u32,
                    width: 0,
                    height: 0,
                })
                .collect(),
        }
    }

    /// Atlas texture size in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.slot_size * self.slots, self.slot_size)
    }

    fn entry(&self, value: u8) -> Option<&AtlasEntry> {
        self.entries.iter().find(|e| e.value == value)
    }

    /// Record a loaded image; returns the pixel origin to copy it to
    pub fn place(
        &mut self,
        value: u8,
        width: u32,
        height: u32,
    ) -> Result<(u32, u32), AssetError> {
        let slot_size = self.slot_size;
        if width == 0 || height == 0 || width > slot_size || height > slot_size {
            return Err(AssetError::BadSize {
                path: image_path(value),
                width,
                height,
                slot: slot_size,
            });
        }
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.value == value)
            .ok_or(AssetError::MissingValue(value))?;
        entry.width = width;
        entry.height = height;
        Ok((entry.slot * slot_size, 0))
    }

    /// Fail unless every value has an image
    pub fn check_complete(&self) -> Result<(), AssetError> {
        match self.entries.iter().find(|e| e.width == 0) {
            Some(missing) => Err(AssetError::MissingValue(missing.value)),
            None => Ok(()),
        }
    }

    /// UVs covering the image of `value`
    pub fn uv_rect(&self, value: u8) -> Option<UvRect> {
        let entry = self.entry(value).filter(|e| e.width > 0)?;
        let (w, h) = self.size();
        let (w, h) = (w as f32, h as f32);
        let x0 = (entry.slot * self.slot_size) as f32;
        Some([
            x0 / w,
            0.0,
            (x0 + entry.width as f32) / w,
            entry.height as f32 / h,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_paths() {
        assert_eq!(image_path(1), "assets/1.png");
        assert_eq!(image_path(10), "assets/10.png");
    }

    #[test]
    fn test_place_and_uv() {
        let mut atlas = CardAtlas::new(&[1, 2, 3, 4], 100);
        assert_eq!(atlas.size(), (400, 100));

        assert_eq!(atlas.place(3, 100, 100), Ok((200, 0)));
        assert_eq!(atlas.uv_rect(3), Some([0.5, 0.0, 0.75, 1.0]));

        assert_eq!(atlas.place(1, 50, 100), Ok((0, 0)));
        assert_eq!(atlas.uv_rect(1), Some([0.0, 0.0, 0.125, 1.0]));

        // Not loaded yet
        assert_eq!(atlas.uv_rect(2), None);
        assert_eq!(atlas.check_complete(), Err(AssetError::MissingValue(2)));
    }

    #[test]
    fn test_place_rejects_bad_images() {
        let mut atlas = CardAtlas::new(&[1], 64);
        assert!(matches!(
            atlas.place(1, 65, 10),
            Err(AssetError::BadSize { width: 65, slot: 64, .. })
        ));
        assert_eq!(atlas.place(9, 10, 10), Err(AssetError::MissingValue(9)));
        atlas.place(1, 64, 64).unwrap();
        assert!(atlas.check_complete().is_ok());
    }
}
