//! Rendering and serialization for CLI output.

use std::{fs, io::Write as _, process::ExitCode};

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use geojson::{FeatureCollection, GeoJson};
use geoq_client::{Feature, IndexDescriptor, IndexFields};
use geoq_style::StyleDescriptor;
use serde_json::{Map, Value, json};

use crate::panel::{FilterControl, input::NUMERIC_COMPARATORS};

/// Renders the index listing as a table.
pub fn indices_table(indices: &[IndexDescriptor]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Index"]);
    for index in indices {
        table.add_row(vec![Cell::new(&index.name)]);
    }
    table
}

/// Renders an index's fields as a table.
pub fn fields_table(fields: &IndexFields) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Field", "Kind", "Default style"]);
    for field in &fields.fields {
        let style = if fields.styles.contains_key(&field.name) {
            "yes"
        } else {
            ""
        };
        table.add_row(vec![
            Cell::new(&field.name),
            Cell::new(field.kind.to_string()),
            Cell::new(style),
        ]);
    }
    table
}

/// Renders result features as a table over the chosen output fields.
pub fn features_table(features: &[Feature], fields: &[String]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);

    let mut header = vec!["Id".to_string()];
    header.extend(fields.iter().cloned());
    header.push("Geometry".to_string());
    table.set_header(header);

    for feature in features {
        let mut row = vec![Cell::new(&feature.id)];
        for field in fields {
            row.push(Cell::new(render_attribute(feature.attributes.get(field))));
        }
        row.push(Cell::new(geometry_kind(&feature.geometry)));
        table.add_row(row);
    }
    table
}

/// Renders one attribute value for table output.
fn render_attribute(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Short name of a geometry for table output.
fn geometry_kind(geometry: &geojson::Geometry) -> &'static str {
    match geometry.value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

/// Describes a filter control, one line per property.
pub fn control_lines(control: &FilterControl) -> Vec<String> {
    match control {
        FilterControl::Numeric { field, kind, hint } => {
            let comparators: Vec<String> = NUMERIC_COMPARATORS
                .iter()
                .map(ToString::to_string)
                .collect();
            let mut lines = vec![
                format!("{field}: numeric input ({kind})"),
                format!("  comparators: {}", comparators.join(" ")),
            ];
            match hint {
                Some(stats) => lines.push(format!("  range hint: {} .. {}", stats.min, stats.max)),
                None => lines.push("  range hint: (no values)".to_string()),
            }
            lines
        }
        FilterControl::MultiSelect { field, options } => {
            let mut lines = vec![format!(
                "{field}: multi-select, {} option(s)",
                options.len()
            )];
            for option in options {
                lines.push(format!("  - {option}"));
            }
            lines
        }
        FilterControl::Text { field } => {
            vec![format!("{field}: text input (exact match)")]
        }
    }
}

/// Assembles the result layer: a FeatureCollection carrying its style as a
/// foreign member.
pub fn layer(features: Vec<Feature>, style: &StyleDescriptor) -> GeoJson {
    let mut foreign_members = Map::new();
    foreign_members.insert(
        "style".to_string(),
        serde_json::to_value(style).unwrap_or(Value::Null),
    );

    GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features: features.into_iter().map(Feature::into_geojson).collect(),
        foreign_members: Some(foreign_members),
    })
}

/// Writes a GeoJSON layer to a file, or stdout for `-`.
pub fn write_layer(target: &str, layer: &GeoJson) -> ExitCode {
    let text = layer.to_string();
    if target == "-" {
        println!("{text}");
        return ExitCode::SUCCESS;
    }
    match fs::File::create(target).and_then(|mut file| writeln!(file, "{text}")) {
        Ok(()) => {
            println!("Wrote {target}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write {target}: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints the dedicated no-results message.
pub fn print_no_results() {
    println!("No results found.");
}

/// Prints a JSON document, reporting serialization failures.
pub fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// JSON shape for one feature in `--json` output.
pub fn feature_json(feature: &Feature) -> Value {
    json!({
        "id": feature.id,
        "geometry": serde_json::to_value(&feature.geometry).unwrap_or(Value::Null),
        "attributes": feature.attributes,
    })
}

#[cfg(test)]
mod tests {
    use geoq_query::{FieldDescriptor, FieldKind};
    use serde_json::json;

    use super::*;

    fn feature() -> Feature {
        Feature {
            id: "7".to_string(),
            geometry: geojson::Geometry::new(geojson::Value::Point(vec![-6.0, 37.4])),
            attributes: json!({ "area": 120.5 }).as_object().unwrap().clone(),
        }
    }

    #[test]
    fn features_table_lists_requested_fields() {
        let table = features_table(&[feature()], &["area".to_string()]);
        let rendered = table.to_string();
        assert!(rendered.contains("120.5"));
        assert!(rendered.contains("Point"));
    }

    #[test]
    fn fields_table_marks_style_defaults() {
        let mut fields = IndexFields {
            fields: vec![FieldDescriptor::new("type", FieldKind::Keyword)],
            styles: Default::default(),
        };
        fields.styles.insert(
            "type".to_string(),
            serde_json::from_value(json!({
                "kind": "categorical",
                "categories": {}
            }))
            .unwrap(),
        );

        let rendered = fields_table(&fields).to_string();
        assert!(rendered.contains("type"));
        assert!(rendered.contains("yes"));
    }

    #[test]
    fn layer_carries_style_and_features() {
        let style = StyleDescriptor::flat_default();
        let geojson = layer(vec![feature()], &style);

        let GeoJson::FeatureCollection(collection) = geojson else {
            panic!("expected a feature collection");
        };
        assert_eq!(collection.features.len(), 1);
        let members = collection.foreign_members.unwrap();
        assert_eq!(members["style"]["kind"], json!("flat"));
    }

    #[test]
    fn control_lines_describe_each_shape() {
        let numeric = FilterControl::Numeric {
            field: "area".to_string(),
            kind: FieldKind::Float,
            hint: None,
        };
        assert!(control_lines(&numeric)[0].contains("numeric"));

        let select = FilterControl::MultiSelect {
            field: "type".to_string(),
            options: vec![],
        };
        // Zero options renders a valid, empty control.
        assert!(control_lines(&select)[0].contains("0 option(s)"));
    }
}
