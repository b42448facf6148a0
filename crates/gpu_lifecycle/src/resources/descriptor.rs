//! Resource descriptors
//!
//! A descriptor is the CPU-side state a resource is built from. Keeping it
//! around is what makes recreation after a context loss possible.

use super::ResourceError;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Saved creation state of a GPU resource
pub trait ResourceDescriptor {
    /// Name used in logs and failure reports
    fn label(&self) -> &str;

    /// Check the descriptor can produce a resource
    fn validate(&self) -> Result<(), ResourceError> {
        Ok(())
    }
}

/// Texture sampling filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextureFilter {
    /// Rounds to nearest pixel; crisp, pixellated appearance
    Nearest,
    /// Bilinear interpolation between texels
    #[default]
    Bilinear,
}

/// One RGBA8 texel
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Rgba8 {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Rgba8 {
    /// Build a texel from its channels
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// 2D texture creation state (RGBA8 pixel data)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureDescriptor {
    /// Texture label
    pub label: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Sampling filter
    pub filter: TextureFilter,
    /// Tightly packed RGBA8 bytes, row-major with the origin at the top-left
    pub pixels: Vec<u8>,
}

impl TextureDescriptor {
    /// Describe a texture from raw RGBA8 bytes
    pub fn new(label: impl Into<String>, width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            width,
            height,
            filter: TextureFilter::default(),
            pixels,
        }
    }

    /// Describe a texture from texels
    pub fn from_texels(
        label: impl Into<String>,
        width: u32,
        height: u32,
        texels: &[Rgba8],
    ) -> Self {
        Self::new(label, width, height, bytemuck::cast_slice(texels).to_vec())
    }

    /// Set the sampling filter
    pub fn with_filter(mut self, filter: TextureFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Number of bytes the pixel data must contain
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * std::mem::size_of::<Rgba8>()
    }

    /// Pixel data viewed as texels, if it is a whole number of them
    pub fn texels(&self) -> Option<&[Rgba8]> {
        bytemuck::try_cast_slice(&self.pixels).ok()
    }
}

impl ResourceDescriptor for TextureDescriptor {
    fn label(&self) -> &str {
        &self.label
    }

    fn validate(&self) -> Result<(), ResourceError> {
        if self.width == 0 || self.height == 0 {
            return Err(ResourceError::InvalidDescriptor {
                label: self.label.clone(),
                reason: format!("zero-sized texture {}x{}", self.width, self.height),
            });
        }
        if self.pixels.len() != self.expected_len() {
            return Err(ResourceError::InvalidDescriptor {
                label: self.label.clone(),
                reason: format!(
                    "expected {} bytes of RGBA8 data, found {}",
                    self.expected_len(),
                    self.pixels.len()
                ),
            });
        }
        Ok(())
    }
}

/// Shader program creation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderProgramDescriptor {
    /// Program label
    pub label: String,
    /// Vertex stage source
    pub vertex_source: String,
    /// Fragment stage source
    pub fragment_source: String,
    /// Vertex attribute names in binding order
    pub attributes: Vec<String>,
}

impl ShaderProgramDescriptor {
    /// Describe a program from its stage sources
    pub fn new(
        label: impl Into<String>,
        vertex_source: impl Into<String>,
        fragment_source: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            vertex_source: vertex_source.into(),
            fragment_source: fragment_source.into(),
            attributes: Vec::new(),
        }
    }

    /// Append a vertex attribute binding
    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(name.into());
        self
    }
}

impl ResourceDescriptor for ShaderProgramDescriptor {
    fn label(&self) -> &str {
        &self.label
    }

    fn validate(&self) -> Result<(), ResourceError> {
        let missing = if self.vertex_source.trim().is_empty() {
            Some("vertex")
        } else if self.fragment_source.trim().is_empty() {
            Some("fragment")
        } else {
            None
        };
        match missing {
            Some(stage) => Err(ResourceError::InvalidDescriptor {
                label: self.label.clone(),
                reason: format!("empty {stage} shader source"),
            }),
            None => Ok(()),
        }
    }
}

/// How a buffer is bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BufferUsage {
    /// Vertex data
    Vertex,
    /// Index data
    Index,
    /// Uniform block
    Uniform,
}

/// Buffer creation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferDescriptor {
    /// Buffer label
    pub label: String,
    /// Binding usage
    pub usage: BufferUsage,
    /// Initial contents
    pub contents: Vec<u8>,
}

impl BufferDescriptor {
    /// Describe a buffer from plain-old-data elements
    pub fn from_pod<T: Pod>(label: impl Into<String>, usage: BufferUsage, data: &[T]) -> Self {
        Self {
            label: label.into(),
            usage,
            contents: bytemuck::cast_slice(data).to_vec(),
        }
    }
}

impl ResourceDescriptor for BufferDescriptor {
    fn label(&self) -> &str {
        &self.label
    }

    fn validate(&self) -> Result<(), ResourceError> {
        if self.contents.is_empty() {
            return Err(ResourceError::InvalidDescriptor {
                label: self.label.clone(),
                reason: "empty buffer".to_string(),
            });
        }
        Ok(())
    }
}
