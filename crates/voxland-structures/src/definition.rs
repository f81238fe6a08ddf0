use std::path::PathBuf;

use voxland_geom::Vec3;

use crate::archetype::TreeArchetype;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TreeRole {
    Trunk,
    Foliage,
}

impl TreeRole {
    /// Part names the tree editor uses for bark; everything else is leaves.
    pub fn from_part_name(name: Option<&str>) -> TreeRole {
        match name {
            Some("wood") | Some("oak") => TreeRole::Trunk,
            _ => TreeRole::Foliage,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PartMaterial {
    pub color: u32,
    pub opacity: f32,
    pub side_texture: Option<PathBuf>,
    pub top_texture: Option<PathBuf>,
}

impl PartMaterial {
    pub fn color(color: u32) -> Self {
        Self {
            color,
            opacity: 1.0,
            side_texture: None,
            top_texture: None,
        }
    }

    /// Material for a named editor part; unknown names keep the plain color.
    pub fn for_part(name: Option<&str>, color: u32) -> Self {
        match name {
            Some("wood") | Some("oak") => Self {
                color,
                opacity: 1.0,
                side_texture: Some(PathBuf::from("assets/wood1.jpg")),
                top_texture: Some(PathBuf::from("assets/wood2.jpg")),
            },
            Some(leaf @ ("darkgreen" | "orange" | "forestgreen")) => {
                let texture = match leaf {
                    "forestgreen" => "assets/forest.jpg",
                    "orange" => "assets/orange.jpg",
                    _ => "assets/darkgreen.jpg",
                };
                Self {
                    color,
                    opacity: 0.7,
                    side_texture: Some(texture.into()),
                    top_texture: Some(texture.into()),
                }
            }
            _ => Self::color(color),
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// One box of a tree, positioned relative to the tree base cell.
#[derive(Clone, Debug, PartialEq)]
pub struct TreePart {
    pub offset: Vec3,
    pub size: Vec3,
    pub role: TreeRole,
    pub name: Option<String>,
    pub material: PartMaterial,
}

impl TreePart {
    pub fn new(offset: Vec3, size: Vec3, name: Option<&str>, color: u32) -> Self {
        Self {
            offset,
            size,
            role: TreeRole::from_part_name(name),
            name: name.map(str::to_owned),
            material: PartMaterial::for_part(name, color),
        }
    }

    /// Cell range covered along each axis, as `(start, count)` relative to the base.
    ///
    /// The anchor cell is `floor(offset)`; a box `n = max(1, round(size))`
    /// cells long starts `(n - 1) / 2` cells before it.
    pub fn cell_extent(&self) -> [(i32, i32); 3] {
        let axis = |offset: f32, size: f32| {
            let n = (size.round() as i32).max(1);
            let anchor = offset.floor() as i32;
            (anchor - (n - 1) / 2, n)
        };
        [
            axis(self.offset.x, self.size.x),
            axis(self.offset.y, self.size.y),
            axis(self.offset.z, self.size.z),
        ]
    }

    /// Every cell the box occupies, relative to the base, as `(dx, dy, dz)`.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, i32)> {
        let [(x0, nx), (y0, ny), (z0, nz)] = self.cell_extent();
        (x0..x0 + nx).flat_map(move |dx| {
            (y0..y0 + ny).flat_map(move |dy| (z0..z0 + nz).map(move |dz| (dx, dy, dz)))
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TreeDefinition {
    pub archetype: TreeArchetype,
    pub parts: Vec<TreePart>,
}

const WOOD: u32 = 0x96_6f33;
const OAK_BARK: u32 = 0xd8_b589;
const YELLOW: u32 = 0xff_ff00;
const RED: u32 = 0xff_0000;
const GREEN: u32 = 0x00_8000;

impl TreeDefinition {
    /// Procedural stand-ins used when no definition files are configured.
    pub fn builtin(archetype: TreeArchetype) -> TreeDefinition {
        let trunk = || {
            TreePart::new(
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 3.0, 1.0),
                Some("wood"),
                WOOD,
            )
        };
        let crown = |color| {
            TreePart::new(
                Vec3::new(0.0, 3.0, 0.0),
                Vec3::new(3.0, 1.0, 3.0),
                None,
                color,
            )
        };
        let parts = match archetype {
            TreeArchetype::Autumn => vec![trunk(), crown(YELLOW)],
            TreeArchetype::Oak => vec![trunk(), crown(RED)],
            TreeArchetype::Default => {
                let mut parts: Vec<TreePart> = (0..3)
                    .map(|y| {
                        TreePart::new(Vec3::new(0.0, y as f32, 0.0), Vec3::ONE, Some("oak"), OAK_BARK)
                    })
                    .collect();
                parts.push(crown(GREEN));
                parts.push(TreePart::new(Vec3::new(0.0, 4.0, 0.0), Vec3::ONE, None, GREEN));
                parts
            }
        };
        TreeDefinition { archetype, parts }
    }

    /// Union of all part cells relative to the base, deduplicated and sorted.
    pub fn footprint(&self) -> Vec<(i32, i32, i32)> {
        let mut cells: Vec<(i32, i32, i32)> =
            self.parts.iter().flat_map(|p| p.cells()).collect();
        cells.sort_unstable();
        cells.dedup();
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_boxes_center_on_the_anchor() {
        let part = TreePart::new(Vec3::new(0.0, 3.0, 0.0), Vec3::new(3.0, 1.0, 3.0), None, 0);
        assert_eq!(part.cell_extent(), [(-1, 3), (3, 1), (-1, 3)]);
        assert_eq!(part.cells().count(), 9);
    }

    #[test]
    fn even_and_tiny_boxes() {
        let part = TreePart::new(Vec3::new(0.4, -0.2, 2.0), Vec3::new(2.0, 0.1, 4.0), None, 0);
        assert_eq!(part.cell_extent(), [(0, 2), (-1, 1), (1, 4)]);
    }

    #[test]
    fn builtin_trunks_cover_the_two_lowest_cells() {
        for a in TreeArchetype::ALL {
            let fp = TreeDefinition::builtin(a).footprint();
            assert!(fp.contains(&(0, 0, 0)), "{a}");
            assert!(fp.contains(&(0, 1, 0)), "{a}");
        }
        assert_eq!(TreeDefinition::builtin(TreeArchetype::Autumn).footprint().len(), 12);
        assert_eq!(TreeDefinition::builtin(TreeArchetype::Default).footprint().len(), 13);
    }

    #[test]
    fn part_names_pick_roles_and_materials() {
        let trunk = TreePart::new(Vec3::ZERO, Vec3::ONE, Some("oak"), OAK_BARK);
        assert_eq!(trunk.role, TreeRole::Trunk);
        assert_eq!(
            trunk.material.side_texture.as_deref(),
            Some(std::path::Path::new("assets/wood1.jpg"))
        );
        let leaf = TreePart::new(Vec3::ZERO, Vec3::ONE, Some("forestgreen"), 0x22_8b22);
        assert_eq!(leaf.role, TreeRole::Foliage);
        assert!(leaf.material.is_transparent());
        assert_eq!(
            leaf.material.top_texture.as_deref(),
            Some(std::path::Path::new("assets/forest.jpg"))
        );
        let plain = TreePart::new(Vec3::ZERO, Vec3::ONE, Some("marble"), 7);
        assert_eq!(plain.material, PartMaterial::color(7));
    }
}
