use std::path::Path;

use serde::Deserialize;
use voxland_geom::Vec3;

use crate::archetype::TreeArchetype;
use crate::definition::{TreeDefinition, TreePart};
use crate::library::TreeLoadError;

/// One record of the tree editor's scene export.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartRecord {
    position: PositionRecord,
    #[serde(default)]
    material_props: MaterialRecord,
    #[serde(default)]
    additional_data: ExtraRecord,
}

#[derive(Debug, Deserialize)]
struct PositionRecord {
    x: f32,
    y: f32,
    z: f32,
}

#[derive(Debug, Deserialize)]
struct MaterialRecord {
    #[serde(default = "default_color")]
    color: ColorValue,
}

impl Default for MaterialRecord {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

fn default_color() -> ColorValue {
    ColorValue::Number(0xff_ffff)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ColorValue {
    Number(u32),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct ExtraRecord {
    #[serde(default = "one")]
    width: f32,
    #[serde(default = "one")]
    height: f32,
    #[serde(default = "one")]
    depth: f32,
    #[serde(default)]
    name: Option<String>,
}

impl Default for ExtraRecord {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
            name: None,
        }
    }
}

fn one() -> f32 {
    1.0
}

/// Parses a CSS-style color: `#rrggbb`, `0xrrggbb`, `#rgb` or a few named colors.
pub fn parse_color(text: &str) -> Option<u32> {
    let t = text.trim();
    let lower = t.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix('#').or_else(|| lower.strip_prefix("0x")) {
        return match hex.len() {
            6 => u32::from_str_radix(hex, 16).ok(),
            3 => {
                let v = u32::from_str_radix(hex, 16).ok()?;
                let (r, g, b) = ((v >> 8) & 0xf, (v >> 4) & 0xf, v & 0xf);
                Some((r * 0x11) << 16 | (g * 0x11) << 8 | b * 0x11)
            }
            _ => None,
        };
    }
    let named = match lower.as_str() {
        "white" => 0xff_ffff,
        "black" => 0x00_0000,
        "red" => 0xff_0000,
        "green" => 0x00_8000,
        "yellow" => 0xff_ff00,
        "orange" => 0xff_a500,
        "darkorange" => 0xff_8c00,
        "forestgreen" => 0x22_8b22,
        "darkgreen" => 0x00_6400,
        "brown" => 0xa5_2a2a,
        _ => return None,
    };
    Some(named)
}

/// Parses a JSON array of part records into a definition.
///
/// `origin` only labels errors.
pub fn parse_definition(
    archetype: TreeArchetype,
    json: &str,
    origin: &Path,
) -> Result<TreeDefinition, TreeLoadError> {
    let records: Vec<PartRecord> =
        serde_json::from_str(json).map_err(|e| TreeLoadError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;
    if records.is_empty() {
        return Err(TreeLoadError::Empty {
            path: origin.to_path_buf(),
        });
    }

    let mut parts = Vec::with_capacity(records.len());
    for (i, rec) in records.into_iter().enumerate() {
        let color = match rec.material_props.color {
            ColorValue::Number(c) => c,
            ColorValue::Text(ref s) => parse_color(s).ok_or_else(|| TreeLoadError::Parse {
                path: origin.to_path_buf(),
                message: format!("record {i}: unrecognised color {s:?}"),
            })?,
        };
        let offset = Vec3::new(rec.position.x, rec.position.y, rec.position.z);
        let extra = rec.additional_data;
        let size = Vec3::new(extra.width, extra.height, extra.depth);
        if !offset.is_finite() || !size.is_finite() {
            return Err(TreeLoadError::Parse {
                path: origin.to_path_buf(),
                message: format!("record {i}: non-finite position or size"),
            });
        }
        parts.push(TreePart::new(offset, size, extra.name.as_deref(), color));
    }

    let def = TreeDefinition { archetype, parts };
    let footprint = def.footprint();
    if !footprint.contains(&(0, 0, 0)) || !footprint.contains(&(0, 1, 0)) {
        return Err(TreeLoadError::Parse {
            path: origin.to_path_buf(),
            message: "no trunk: cells (0, 0, 0) and (0, 1, 0) must be covered".into(),
        });
    }
    Ok(def)
}
