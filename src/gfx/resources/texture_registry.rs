//! Texture registration
//!
//! Images are decoded once, flipped so that row 0 is the bottom of the image,
//! expanded to RGBA8 and assigned the next free texture slot. The registry is
//! append-only and never holds more than [`MAX_TEXTURE_SLOTS`] entries; GPU
//! upload of the registered pixels happens separately in
//! [`GpuTextures`](super::texture_resource::GpuTextures), after which the
//! registry's copy of the pixels is discarded.

use std::collections::HashMap;
use std::path::Path;

use crate::error::RegistryError;

/// Number of texture binding points available to a draw
pub const MAX_TEXTURE_SLOTS: usize = 16;

/// Index of the binding point a texture was assigned at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureSlot(pub u32);

impl TextureSlot {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Decoded pixels ready for upload
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Channel count of the source image before RGBA expansion
    pub channels: u8,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// Decodes an image file and flips it vertically
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let image = image::open(path).map_err(|source| RegistryError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let channels = image.color().channel_count();
        let rgba = image.flipv().to_rgba8();

        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            channels,
            rgba: rgba.into_raw(),
        })
    }

    /// Wraps already-decoded RGBA8 pixels
    pub fn from_rgba(width: u32, height: u32, channels: u8, rgba: Vec<u8>) -> Self {
        Self {
            width,
            height,
            channels,
            rgba,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextureEntry {
    pub tag: String,
    pub slot: TextureSlot,
    pub image: DecodedImage,
}

/// Append-only texture storage keyed by tag
#[derive(Debug, Default)]
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
    index: HashMap<String, usize>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes the image at `path` and registers it under `tag`
    ///
    /// On any failure the registry is left unchanged.
    pub fn register_texture(
        &mut self,
        path: impl AsRef<Path>,
        tag: &str,
    ) -> Result<TextureSlot, RegistryError> {
        let path = path.as_ref();
        // Check the cheap conditions before paying for a decode
        self.check_available(tag)?;

        let image = DecodedImage::load(path)?;
        log::info!(
            "Loaded texture '{}' from {}: {}x{}, {} channels",
            tag,
            path.display(),
            image.width,
            image.height,
            image.channels
        );
        self.register(tag, image)
    }

    /// Registers already decoded pixels under `tag`
    pub fn register(&mut self, tag: &str, image: DecodedImage) -> Result<TextureSlot, RegistryError> {
        self.check_available(tag)?;

        if !matches!(image.channels, 3 | 4) {
            return Err(RegistryError::UnsupportedChannels {
                tag: tag.to_string(),
                channels: image.channels,
            });
        }

        let slot = TextureSlot(self.entries.len() as u32);
        self.index.insert(tag.to_string(), self.entries.len());
        self.entries.push(TextureEntry {
            tag: tag.to_string(),
            slot,
            image,
        });
        Ok(slot)
    }

    fn check_available(&self, tag: &str) -> Result<(), RegistryError> {
        if self.index.contains_key(tag) {
            return Err(RegistryError::DuplicateTag(tag.to_string()));
        }
        if self.entries.len() >= MAX_TEXTURE_SLOTS {
            return Err(RegistryError::SlotsExhausted {
                tag: tag.to_string(),
                limit: MAX_TEXTURE_SLOTS,
            });
        }
        Ok(())
    }

    pub fn find_texture(&self, tag: &str) -> Option<&TextureEntry> {
        self.index.get(tag).map(|&i| &self.entries[i])
    }

    pub fn find_texture_slot(&self, tag: &str) -> Option<TextureSlot> {
        self.find_texture(tag).map(|entry| entry.slot)
    }

    /// Entries in slot order
    pub fn entries(&self) -> &[TextureEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Frees the decoded pixels of the first `uploaded` entries
    ///
    /// Dimensions, tags and slots stay, so lookups keep working once the GPU
    /// holds the only copy of the image.
    pub fn discard_pixels(&mut self, uploaded: usize) {
        let mut freed = 0;
        for entry in self.entries.iter_mut().take(uploaded) {
            freed += entry.image.rgba.len();
            entry.image.rgba = Vec::new();
        }
        if freed > 0 {
            log::debug!("Freed {freed} bytes of uploaded texture pixels");
        }
    }

    /// Drops every entry, freeing all slots
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(channels: u8) -> DecodedImage {
        DecodedImage::from_rgba(1, 1, channels, vec![255, 0, 0, 255])
    }

    #[test]
    fn test_slots_follow_registration_order() {
        let mut registry = TextureRegistry::new();
        let tags = ["Floor", "Yellow_rubber", "Bottle_label", "Metal_wrap"];
        let slots: Vec<_> = tags
            .iter()
            .map(|tag| registry.register(tag, pixel(4)).unwrap())
            .collect();

        for (tag, slot) in tags.iter().zip(&slots) {
            assert_eq!(registry.find_texture_slot(tag), Some(*slot));
            assert_eq!(registry.entries()[slot.index()].tag, *tag);
        }
        assert_eq!(slots[2], TextureSlot(2));
    }

    #[test]
    fn test_overflow_rejected_without_corrupting_slots() {
        let mut registry = TextureRegistry::new();
        for i in 0..MAX_TEXTURE_SLOTS {
            registry.register(&format!("tex{i}"), pixel(3)).unwrap();
        }

        let result = registry.register("one_too_many", pixel(4));
        assert!(matches!(
            result,
            Err(RegistryError::SlotsExhausted { limit: MAX_TEXTURE_SLOTS, .. })
        ));
        assert_eq!(registry.len(), MAX_TEXTURE_SLOTS);
        assert_eq!(registry.find_texture_slot("one_too_many"), None);
        for i in 0..MAX_TEXTURE_SLOTS {
            assert_eq!(
                registry.find_texture_slot(&format!("tex{i}")),
                Some(TextureSlot(i as u32))
            );
        }
    }

    #[test]
    fn test_clear_frees_slots() {
        let mut registry = TextureRegistry::new();
        registry.register("a", pixel(4)).unwrap();
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.find_texture("a").map(|e| e.slot), None);
        assert_eq!(registry.register("b", pixel(4)).unwrap(), TextureSlot(0));
    }

    #[test]
    fn test_clear_after_unknown_lookup_restarts_at_slot_zero() {
        let mut registry = TextureRegistry::new();
        registry.register("Floor", pixel(4)).unwrap();
        registry.register("Metal_wrap", pixel(3)).unwrap();
        assert_eq!(registry.find_texture_slot("Glass"), None);

        registry.clear();
        assert_eq!(registry.find_texture_slot("Floor"), None);
        assert_eq!(registry.find_texture_slot("Glass"), None);
        assert_eq!(registry.register("Glass", pixel(4)).unwrap(), TextureSlot(0));
        assert_eq!(registry.find_texture_slot("Glass"), Some(TextureSlot(0)));
    }

    #[test]
    fn test_discard_pixels_keeps_lookups() {
        let mut registry = TextureRegistry::new();
        registry.register("Floor", pixel(4)).unwrap();
        registry.register("Bottle_label", pixel(4)).unwrap();

        registry.discard_pixels(1);
        let floor = registry.find_texture("Floor").unwrap();
        assert!(floor.image.rgba.is_empty());
        assert_eq!((floor.image.width, floor.image.height), (1, 1));
        assert_eq!(registry.find_texture_slot("Floor"), Some(TextureSlot(0)));
        assert_eq!(registry.find_texture("Bottle_label").unwrap().image.rgba.len(), 4);

        registry.discard_pixels(registry.len());
        assert!(registry.entries().iter().all(|e| e.image.rgba.is_empty()));
    }

    #[test]
    fn test_unsupported_channel_count_leaves_registry_unchanged() {
        let mut registry = TextureRegistry::new();
        let result = registry.register("grey", pixel(1));
        assert!(matches!(
            result,
            Err(RegistryError::UnsupportedChannels { channels: 1, .. })
        ));
        assert!(registry.is_empty());

        // The failed tag stays available
        assert!(registry.register("grey", pixel(3)).is_ok());
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        let mut registry = TextureRegistry::new();
        registry.register("Wall", pixel(4)).unwrap();
        assert!(matches!(
            registry.register("Wall", pixel(4)),
            Err(RegistryError::DuplicateTag(_))
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let mut registry = TextureRegistry::new();
        let result = registry.register_texture("does/not/exist.png", "Door");
        assert!(matches!(result, Err(RegistryError::Decode { .. })));
        assert!(registry.find_texture("Door").is_none());
    }

    #[test]
    fn test_loaded_image_is_flipped() {
        let path = std::env::temp_dir().join("still_life_flip_test.png");
        let mut source = image::RgbaImage::new(1, 2);
        source.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        source.put_pixel(0, 1, image::Rgba([0, 0, 255, 255]));
        source.save(&path).unwrap();

        let decoded = DecodedImage::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(decoded.channels, 4);
        assert_eq!((decoded.width, decoded.height), (1, 2));
        // The bottom (blue) row comes first after flipping
        assert_eq!(&decoded.rgba[0..4], &[0, 0, 255, 255]);
        assert_eq!(&decoded.rgba[4..8], &[255, 0, 0, 255]);
    }
}
