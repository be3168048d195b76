//! Model serialization
//!
//! Renders a [`Model`] as a self-initializing JavaScript module for the
//! retro n-gon renderer. Output is a pure function of the model and the
//! configuration: tables are written in insertion order, coordinates with
//! exactly four decimals, and line endings are always `\n`.

use std::io::{self, Write};

use crate::config::ExportConfig;
use crate::foundation::math::Vec3;
use crate::model::{Material, Model, Ngon, Normals, Texture, Vertex};
use crate::scene::PropertyValue;

const PREAMBLE: &str = "\
/*
 * A 3d model exported for the retro n-gon renderer.
 *
 * Usage:
 *	- call .initialize(), which loads the textures and populates .ngons
 *	- once it has finished, the n-gons are available via .ngons
 *	- to wait for it before rendering, await .initialize() inside an async()=>{} wrapper
 */

\"use strict\";
";

/// Writes models as renderer model modules
pub struct ModelSerializer<'a> {
    config: &'a ExportConfig,
}

impl<'a> ModelSerializer<'a> {
    /// Create a serializer for the given configuration
    pub fn new(config: &'a ExportConfig) -> Self {
        Self { config }
    }

    /// Write the artifact for `model` to `writer`
    pub fn write<W: Write>(&self, model: &Model, writer: &mut W) -> io::Result<()> {
        let runtime = &self.config.runtime;
        let binding = if self.config.export_binding { "export const" } else { "const" };

        writeln!(writer, "{PREAMBLE}")?;
        writeln!(writer, "{binding} {} =", self.config.model_name)?;
        writeln!(writer, "{{")?;
        writeln!(writer, "\tngons:[],")?;
        writeln!(writer, "\ttextures:{{}},")?;
        writeln!(writer, "\tmaterials:{{}},")?;
        writeln!(writer, "\tinitialize: async function()")?;
        writeln!(writer, "\t{{")?;

        writeln!(writer, "\t\t// Shorthands, for a smaller file size.")?;
        writeln!(writer, "\t\tconst n = {};", runtime.ngon)?;
        writeln!(writer, "\t\tconst no = {};", runtime.vector)?;
        writeln!(writer, "\t\tconst v = {};", runtime.vertex)?;
        writeln!(writer, "\t\tconst c = {};", runtime.color)?;
        writeln!(writer, "\t\tconst ct = {};", runtime.texture_loader)?;
        writeln!(writer)?;

        writeln!(writer, "\t\t// Load the textures.")?;
        let textures = model.textures.iter().map(|(key, texture)| texture_entry(key, texture));
        writeln!(writer, "\t\tconst t = this.textures = {};", object_literal(textures))?;
        writeln!(writer)?;

        writeln!(writer, "\t\t// Set up the materials.")?;
        let materials = model.materials.iter().map(|(key, material)| material_entry(key, material));
        writeln!(writer, "\t\tconst m = this.materials = {};", object_literal(materials))?;
        writeln!(writer)?;

        writeln!(writer, "\t\t// N-gons.")?;
        writeln!(writer, "\t\tthis.ngons = [")?;
        for group in &model.groups {
            writeln!(writer, "\t\t\t// Parent mesh: {}.", comment_text(&group.mesh_name))?;
            for ngon in &group.ngons {
                writeln!(writer, "\t\t\t{},", ngon_call(ngon))?;
            }
        }
        writeln!(writer, "\t\t];")?;
        writeln!(writer)?;

        writeln!(writer, "\t\tObject.freeze(this.textures);")?;
        writeln!(writer, "\t\tObject.freeze(this.materials);")?;
        writeln!(writer, "\t\tObject.freeze(this.ngons);")?;
        writeln!(writer, "\t}}")?;
        writeln!(writer, "}};")?;

        Ok(())
    }

    /// Render the artifact for `model` into a string
    pub fn render(&self, model: &Model) -> String {
        let mut buffer = Vec::new();
        // Writes into a Vec do not fail.
        if let Err(error) = self.write(model, &mut buffer) {
            log::error!("Failed to render model in memory: {}", error);
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

fn object_literal(entries: impl Iterator<Item = String>) -> String {
    let entries: Vec<String> = entries.collect();
    if entries.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", entries.join(", "))
    }
}

fn texture_entry(key: &str, texture: &Texture) -> String {
    format!("{}: await ct({})", quoted(key), quoted(&texture.path))
}

fn material_entry(key: &str, material: &Material) -> String {
    let color = material.color;
    let mut fields = vec![format!("color: c({},{},{})", color.r, color.g, color.b)];

    if let Some(texture) = &material.texture {
        fields.push(format!("texture: t[{}]", quoted(texture)));
    }

    for (flag, value) in &material.flags {
        fields.push(format!("{}: {}", flag.property_name(), property_literal(value)));
    }

    format!("{}: {{ {} }}", quoted(key), fields.join(", "))
}

fn ngon_call(ngon: &Ngon) -> String {
    let vertices: Vec<String> = ngon.vertices.iter().map(vertex_call).collect();

    let material = match &ngon.material {
        Some(key) => format!("m[{}]", quoted(key)),
        None => "undefined".to_string(),
    };

    let normals = match &ngon.normals {
        Normals::Flat(normal) => normal_call(normal),
        Normals::Smooth(normals) => {
            let normals: Vec<String> = normals.iter().map(normal_call).collect();
            format!("[{}]", normals.join(","))
        }
    };

    format!("n([{}],{material},{normals})", vertices.join(","))
}

fn vertex_call(vertex: &Vertex) -> String {
    let p = &vertex.position;
    match &vertex.uv {
        Some(uv) => format!(
            "v({},{},{},{},{})",
            coordinate(p.x),
            coordinate(p.y),
            coordinate(p.z),
            coordinate(uv.x),
            coordinate(uv.y)
        ),
        None => format!("v({},{},{})", coordinate(p.x), coordinate(p.y), coordinate(p.z)),
    }
}

fn normal_call(normal: &Vec3) -> String {
    format!("no({},{},{})", coordinate(normal.x), coordinate(normal.y), coordinate(normal.z))
}

/// Fixed four-decimal coordinate; non-finite values use the JS names
fn coordinate(value: f32) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        (if value > 0.0 { "Infinity" } else { "-Infinity" }).to_string()
    } else {
        format!("{value:.4}")
    }
}

/// JS literal for an uninspected custom property value
fn property_literal(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Bool(flag) => flag.to_string(),
        PropertyValue::Int(number) => number.to_string(),
        PropertyValue::Float(number) if number.is_nan() => "NaN".to_string(),
        PropertyValue::Float(number) if number.is_infinite() => {
            (if *number > 0.0 { "Infinity" } else { "-Infinity" }).to_string()
        }
        PropertyValue::Float(number) => number.to_string(),
        PropertyValue::Text(text) => quoted(text),
        PropertyValue::List(values) => {
            let values: Vec<String> = values.iter().map(property_literal).collect();
            format!("[{}]", values.join(","))
        }
    }
}

/// Double-quoted JS string literal
fn quoted(text: &str) -> String {
    let mut literal = String::with_capacity(text.len() + 2);
    literal.push('"');
    for ch in text.chars() {
        match ch {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            '\u{2028}' => literal.push_str("\\u2028"),
            '\u{2029}' => literal.push_str("\\u2029"),
            ch if ch.is_control() => literal.push_str(&format!("\\u{:04x}", u32::from(ch))),
            ch => literal.push(ch),
        }
    }
    literal.push('"');
    literal
}

/// Object name made safe for a single-line comment
fn comment_text(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_control() || ch == '\u{2028}' || ch == '\u{2029}' { ' ' } else { ch })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::collections::KeyedTable;
    use crate::foundation::math::Vec2;
    use crate::model::{Color, MaterialFlag, NgonGroup};

    fn flat_triangle(material: Option<&str>) -> Ngon {
        Ngon {
            vertices: vec![
                Vertex::new(Vec3::new(0.0, 0.0, 0.0)),
                Vertex::new(Vec3::new(1.0, 0.0, 0.0)),
                Vertex::new(Vec3::new(0.0, 0.0, 1.0)),
            ],
            material: material.map(str::to_string),
            normals: Normals::Flat(Vec3::new(0.0, 1.0, 0.0)),
        }
    }

    #[test]
    fn test_ngon_call() {
        assert_eq!(
            ngon_call(&flat_triangle(Some("Red"))),
            "n([v(0.0000,0.0000,0.0000),v(1.0000,0.0000,0.0000),v(0.0000,0.0000,1.0000)],m[\"Red\"],no(0.0000,1.0000,0.0000))"
        );
        assert_eq!(
            ngon_call(&flat_triangle(None)),
            "n([v(0.0000,0.0000,0.0000),v(1.0000,0.0000,0.0000),v(0.0000,0.0000,1.0000)],undefined,no(0.0000,1.0000,0.0000))"
        );
    }

    #[test]
    fn test_smooth_normals_are_a_list() {
        let mut ngon = flat_triangle(None);
        ngon.normals = Normals::Smooth(vec![Vec3::y(), Vec3::x(), Vec3::z()]);
        assert!(ngon_call(&ngon).ends_with(
            ",undefined,[no(0.0000,1.0000,0.0000),no(1.0000,0.0000,0.0000),no(0.0000,0.0000,1.0000)])"
        ));
    }

    #[test]
    fn test_vertex_with_uv() {
        let vertex = Vertex::with_uv(Vec3::new(-1.0, 0.5, 2.0), Vec2::new(0.25, 1.0 / 3.0));
        assert_eq!(vertex_call(&vertex), "v(-1.0000,0.5000,2.0000,0.2500,0.3333)");
    }

    #[test]
    fn test_coordinate_formatting() {
        assert_eq!(coordinate(0.123_456), "0.1235");
        assert_eq!(coordinate(12.0), "12.0000");
        assert_eq!(coordinate(f32::NAN), "NaN");
        assert_eq!(coordinate(f32::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_material_entry() {
        let mut material = Material::new(Color::new(300, -5, 0));
        material.texture = Some("wood".to_string());
        material.flags = vec![
            (MaterialFlag::TextureMapping, PropertyValue::from("affine")),
            (MaterialFlag::IsTwoSided, PropertyValue::from(true)),
        ];

        assert_eq!(
            material_entry("Crate", &material),
            "\"Crate\": { color: c(300,-5,0), texture: t[\"wood\"], textureMapping: \"affine\", isTwoSided: true }"
        );
    }

    #[test]
    fn test_property_literals() {
        assert_eq!(property_literal(&PropertyValue::Int(-3)), "-3");
        assert_eq!(property_literal(&PropertyValue::Float(0.3)), "0.3");
        assert_eq!(property_literal(&PropertyValue::Float(f64::INFINITY)), "Infinity");
        assert_eq!(
            property_literal(&PropertyValue::from(vec![PropertyValue::from(1_i64), PropertyValue::from("a")])),
            "[1,\"a\"]"
        );
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(quoted("plain"), "\"plain\"");
        assert_eq!(quoted("say \"hi\"\\"), "\"say \\\"hi\\\"\\\\\"");
        assert_eq!(quoted("a\nb\u{1}"), "\"a\\nb\\u0001\"");
        assert_eq!(comment_text("two\nlines"), "two lines");
    }

    #[test]
    fn test_empty_model() {
        let config = ExportConfig::new();
        let output = ModelSerializer::new(&config).render(&Model::default());

        assert!(output.contains("\"use strict\";\n"));
        assert!(output.contains("\nconst model =\n{\n\tngons:[],\n\ttextures:{},\n\tmaterials:{},\n"));
        assert!(output.contains("\t\tconst t = this.textures = {};\n"));
        assert!(output.contains("\t\tconst m = this.materials = {};\n"));
        assert!(output.contains("\t\tthis.ngons = [\n\t\t];\n"));
        assert!(output.ends_with("\t\tObject.freeze(this.ngons);\n\t}\n};\n"));
        assert!(!output.contains('\r'));
    }

    #[test]
    fn test_runtime_bindings_and_export_keyword() {
        let mut config = ExportConfig::new().with_model_name("scene").with_export_binding(true);
        config.runtime.color = "Rngon.color_rgba".to_string();
        let output = ModelSerializer::new(&config).render(&Model::default());

        assert!(output.contains("\nexport const scene =\n"));
        assert!(output.contains("\t\tconst n = Rngon.ngon;\n"));
        assert!(output.contains("\t\tconst no = Rngon.vector;\n"));
        assert!(output.contains("\t\tconst c = Rngon.color_rgba;\n"));
        assert!(output.contains("\t\tconst ct = Rngon.texture.load;\n"));
    }

    #[test]
    fn test_tables_in_insertion_order() {
        let textures: KeyedTable<Texture> = [
            ("wood".to_string(), Texture::deferred("wood", "", "json")),
            ("bark".to_string(), Texture::deferred("bark", "", "json")),
        ]
        .into_iter()
        .collect();
        let model = Model::new(
            textures,
            [("Red".to_string(), Material::new(Color::new(255, 0, 0)))].into_iter().collect(),
            vec![NgonGroup { mesh_name: "Tri".to_string(), ngons: vec![flat_triangle(Some("Red"))] }],
        );

        let config = ExportConfig::new();
        let output = ModelSerializer::new(&config).render(&model);

        assert!(output.contains(
            "const t = this.textures = { \"wood\": await ct(\"wood.json\"), \"bark\": await ct(\"bark.json\") };"
        ));
        assert!(output.contains("const m = this.materials = { \"Red\": { color: c(255,0,0) } };"));
        assert!(output.contains("\t\t\t// Parent mesh: Tri.\n\t\t\tn([v("));
    }
}
