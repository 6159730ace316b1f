use crate::foundation::core::Size;

/// Audio part of an [`EncodingDescriptor`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AudioDescriptor {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u32,
    /// Channel layout name.
    pub channel_layout: String,
}

/// Final output parameters for a render job.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EncodingDescriptor {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Pixel format name.
    pub pix_fmt: String,
    /// Color space; `None` leaves it unspecified.
    pub color_space: Option<String>,
    /// Color transfer; `None` leaves it unspecified.
    pub color_transfer: Option<String>,
    /// Color primaries; `None` leaves it unspecified.
    pub color_primaries: Option<String>,
    /// Absent when no contributing clip has audio.
    pub audio: Option<AudioDescriptor>,
}

impl EncodingDescriptor {
    /// Output dimensions.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
