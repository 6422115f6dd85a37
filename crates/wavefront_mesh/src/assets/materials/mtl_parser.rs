//! MTL (Material Template Library) file parser
//!
//! Parses Wavefront .mtl streams into structured material records.
//! Supports ambient/diffuse/specular colors, shininess, transparency and
//! the matching texture maps.

use std::collections::HashMap;
use std::io::BufRead;

use crate::assets::{parse_floats, rest_of_line, split_directive, ObjError};
use crate::foundation::math::Vec3;

/// Materials keyed by `newmtl` name
pub type MaterialMap = HashMap<String, Material>;

/// Parsed MTL material data (Wavefront Phong model)
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Material name
    pub name: String,
    /// Ambient color (Ka)
    pub ka: Vec3,
    /// Diffuse color (Kd)
    pub kd: Vec3,
    /// Specular color (Ks)
    pub ks: Vec3,
    /// Specular exponent (Ns)
    pub ns: f32,
    /// Transparency as written by `d` or `Tr`
    pub tr: f32,
    /// Ambient texture map (map_Ka)
    pub ka_map: Option<String>,
    /// Diffuse texture map (map_Kd)
    pub kd_map: Option<String>,
    /// Specular texture map (map_Ks)
    pub ks_map: Option<String>,
}

impl Material {
    /// Create a material with every property unset
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ka: Vec3::zeros(),
            kd: Vec3::zeros(),
            ks: Vec3::zeros(),
            ns: 0.0,
            tr: 0.0,
            ka_map: None,
            kd_map: None,
            ks_map: None,
        }
    }
}

/// MTL file parser
pub struct MtlParser;

impl MtlParser {
    /// Parse MTL file contents into a map of material name -> Material
    pub fn parse(contents: &str) -> Result<MaterialMap, ObjError> {
        Self::parse_reader(contents.as_bytes())
    }

    /// Parse an MTL stream line by line
    ///
    /// Properties apply to the most recent `newmtl`; anything before the
    /// first `newmtl` is ignored. A later material with the same name
    /// replaces the earlier one.
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<MaterialMap, ObjError> {
        let mut materials = MaterialMap::new();
        let mut current_material: Option<Material> = None;

        for (line_idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_num = line_idx + 1;
            let Some((command, operands)) = split_directive(&line) else {
                continue;
            };
            let content = line.trim();

            if command == "newmtl" {
                if let Some(mat) = current_material.take() {
                    materials.insert(mat.name.clone(), mat);
                }
                let name = rest_of_line(&operands, command, line_num)?;
                current_material = Some(Material::new(name));
                continue;
            }

            let Some(mat) = current_material.as_mut() else {
                continue;
            };

            match command {
                "Ka" => mat.ka = Self::parse_color(&operands, command, line_num, content)?,
                "Kd" => mat.kd = Self::parse_color(&operands, command, line_num, content)?,
                "Ks" => mat.ks = Self::parse_color(&operands, command, line_num, content)?,
                "Ns" => {
                    let [ns] = parse_floats::<1>(&operands, command, line_num, content)?;
                    mat.ns = ns;
                }
                "d" | "Tr" => {
                    let [tr] = parse_floats::<1>(&operands, command, line_num, content)?;
                    mat.tr = tr;
                }
                "map_Ka" => mat.ka_map = Some(rest_of_line(&operands, command, line_num)?),
                "map_Kd" => mat.kd_map = Some(rest_of_line(&operands, command, line_num)?),
                "map_Ks" => mat.ks_map = Some(rest_of_line(&operands, command, line_num)?),
                // Ignore unknown commands silently
                _ => {}
            }
        }

        if let Some(mat) = current_material {
            materials.insert(mat.name.clone(), mat);
        }

        Ok(materials)
    }

    fn parse_color(operands: &[&str], command: &str, line_num: usize, content: &str) -> Result<Vec3, ObjError> {
        let [r, g, b] = parse_floats::<3>(operands, command, line_num, content)?;
        Ok(Vec3::new(r, g, b))
    }
}
