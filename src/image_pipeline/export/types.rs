//! PNG export types

pub const NORMAL_MAP_FILE_NAME: &str = "normal_map.png";
pub const MATERIAL_MAP_FILE_NAME: &str = "material_map_mra.png";

/// Which generated map to export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapKind {
    Normal,
    /// Packed metallic / roughness / AO
    Material,
}

impl MapKind {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Normal => NORMAL_MAP_FILE_NAME,
            Self::Material => MATERIAL_MAP_FILE_NAME,
        }
    }
}

/// PNG compression levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PngCompression {
    /// Fastest encoding, largest file
    Fast,
    /// Encoder default
    #[default]
    Balanced,
    /// Smallest file (slower)
    Best,
}
