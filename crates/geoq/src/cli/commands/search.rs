//! Implementation of `geoq search`.

use std::{
    fs,
    io::{self, Read as _},
    process::ExitCode,
};

use geoq_client::{Client, Feature};
use geoq_query::{
    Bounds, GEOMETRY_FIELD, MapCrs, Point, SpatialState, parse_filter,
};
use geoq_style::{Classification, Color, StyleSpec, select_style};
use serde_json::{Value, json};

use crate::{
    cli::{
        args::{SearchCommand, SpatialArgs, StyleArgs, StyleMethod},
        context::CommandContext,
        output,
    },
    panel::{Panel, PanelEvent, Tab},
};

/// Builds and executes a search, emitting the result layer.
pub async fn run(ctx: &mut CommandContext, cmd: &SearchCommand) -> ExitCode {
    let default_index = ctx.config.panel.default_index.clone();
    let client = match ctx.client() {
        Ok(client) => client.clone(),
        Err(code) => return code,
    };

    let Some(index) = cmd.index.clone().or(default_index) else {
        eprintln!("error: no index given and no panel.default_index configured");
        return ExitCode::FAILURE;
    };

    let mut panel = Panel::new();
    if let Err(code) = drive_panel(&mut panel, &client, &index, cmd).await {
        return code;
    }

    let body = match panel.build_request() {
        Ok(body) => body,
        Err(e) => {
            eprintln!("error: invalid request body: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cmd.explain {
        match serde_json::to_string_pretty(&body) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("error: failed to serialize request: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    let features = match client.search(&index, &body).await {
        Ok(features) => features,
        Err(e) => {
            eprintln!("error: search failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Zero hits is its own path: say so and leave any existing layer alone.
    if features.is_empty() {
        output::print_no_results();
        return ExitCode::SUCCESS;
    }

    let spec = match style_spec(&cmd.style, &cmd.fields) {
        Ok(spec) => spec,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };
    let style_field = spec
        .as_ref()
        .map(|s| s.field.clone())
        .or_else(|| cmd.fields.first().cloned());
    let field_values: Vec<Value> = match &style_field {
        Some(field) => features
            .iter()
            .filter_map(|feature| feature.attributes.get(field).cloned())
            .collect(),
        None => Vec::new(),
    };
    let style = select_style(
        spec.as_ref(),
        &field_values,
        style_field.as_deref(),
        &panel.state().metadata.styles,
    );

    if let Some(target) = &cmd.geojson {
        return output::write_layer(target, &output::layer(features, &style));
    }

    if cmd.output.json {
        let document = json!({
            "style": style,
            "features": features.iter().map(output::feature_json).collect::<Vec<_>>(),
        });
        return output::print_json(&document);
    }

    let columns = table_columns(cmd, &features);
    println!("{}", output::features_table(&features, &columns));
    println!("{} feature(s)", features.len());
    ExitCode::SUCCESS
}

/// Folds the command's flags into panel events.
///
/// Guided mode loads index metadata and resolves filter expressions against
/// field kinds; raw mode skips the builder entirely and edits the raw tab.
async fn drive_panel(
    panel: &mut Panel,
    client: &Client,
    index: &str,
    cmd: &SearchCommand,
) -> Result<(), ExitCode> {
    if let Some(source) = &cmd.raw {
        let body = read_raw(source).map_err(|e| {
            eprintln!("error: failed to read raw request body: {e}");
            ExitCode::FAILURE
        })?;
        panel.apply(PanelEvent::TabSwitched(Tab::Raw));
        panel.apply(PanelEvent::RawEdited(body));
        return Ok(());
    }

    panel.select_index(client, index).await.map_err(|e| {
        eprintln!("error: failed to load metadata for '{index}': {e}");
        ExitCode::FAILURE
    })?;

    for field in &cmd.fields {
        if field != GEOMETRY_FIELD && panel.state().metadata.get(field).is_none() {
            eprintln!("error: index '{index}' has no field '{field}'");
            list_available_fields(panel);
            return Err(ExitCode::FAILURE);
        }
        panel.apply(PanelEvent::OutputFieldAdded(field.clone()));
    }

    for text in &cmd.filters {
        let expr = parse_filter(text).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?;
        let Some(descriptor) = panel.state().metadata.get(&expr.field) else {
            eprintln!("error: index '{index}' has no field '{}'", expr.field);
            list_available_fields(panel);
            return Err(ExitCode::FAILURE);
        };
        let kind = descriptor.kind;
        let entry = expr.into_entry(kind).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?;
        panel.apply(PanelEvent::FilterSet(entry));
    }

    let spatial = parse_spatial(&cmd.spatial).map_err(|message| {
        eprintln!("error: {message}");
        ExitCode::FAILURE
    })?;
    panel.apply(PanelEvent::SpatialSet(spatial));

    if cmd.no_filters {
        panel.apply(PanelEvent::ThematicToggled(false));
    }

    Ok(())
}

/// Prints the filterable fields of the loaded index as a hint.
fn list_available_fields(panel: &Panel) {
    let names: Vec<&str> = panel
        .state()
        .metadata
        .filterable()
        .map(|f| f.name.as_str())
        .collect();
    if !names.is_empty() {
        eprintln!("Available fields: {}", names.join(", "));
    }
}

/// Reads the raw request body from a file or stdin (`-`).
fn read_raw(source: &str) -> io::Result<String> {
    if source == "-" {
        let mut body = String::new();
        io::stdin().read_to_string(&mut body)?;
        Ok(body)
    } else {
        fs::read_to_string(source)
    }
}

/// Parses the spatial flags into a spatial state.
fn parse_spatial(args: &SpatialArgs) -> Result<SpatialState, String> {
    let crs = if args.mercator {
        MapCrs::WebMercator
    } else {
        MapCrs::Wgs84
    };

    if let Some(near) = &args.near {
        let parts = parse_numbers(near, 3, "--near expects X,Y,KM")?;
        return Ok(SpatialState::distance(
            crs,
            Point::new(parts[0], parts[1]),
            parts[2],
        ));
    }

    if let Some(bbox) = &args.bbox {
        let parts = parse_numbers(bbox, 4, "--bbox expects MINX,MINY,MAXX,MAXY")?;
        return Ok(SpatialState::bounding_box(
            crs,
            Bounds {
                min_x: parts[0],
                min_y: parts[1],
                max_x: parts[2],
                max_y: parts[3],
            },
        ));
    }

    Ok(SpatialState::default())
}

/// Parses a comma-separated list of exactly `expected` numbers.
fn parse_numbers(text: &str, expected: usize, usage: &str) -> Result<Vec<f64>, String> {
    let parts: Vec<f64> = text
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| usage.to_string())?;
    if parts.len() != expected {
        return Err(usage.to_string());
    }
    Ok(parts)
}

/// Builds the style spec from the style flags, if styling was requested.
fn style_spec(args: &StyleArgs, output_fields: &[String]) -> Result<Option<StyleSpec>, String> {
    let Some(method) = args.style else {
        return Ok(None);
    };

    let Some(field) = args.style_field.clone().or_else(|| output_fields.first().cloned()) else {
        return Err("--style needs --style-field or at least one output field".to_string());
    };

    let start = Color::from_hex(&args.color_start).map_err(|e| e.to_string())?;
    let end = Color::from_hex(&args.color_end).map_err(|e| e.to_string())?;

    Ok(Some(StyleSpec {
        field,
        method: match method {
            StyleMethod::Quantile => Classification::Quantile,
            StyleMethod::Jenks => Classification::Jenks,
            StyleMethod::Categories => Classification::Categories,
        },
        start,
        end,
        classes: args.classes,
    }))
}

/// Columns for the feature table: the chosen output fields, or every
/// attribute of the first feature when none were chosen (raw mode).
fn table_columns(cmd: &SearchCommand, features: &[Feature]) -> Vec<String> {
    if !cmd.fields.is_empty() {
        return cmd.fields.clone();
    }
    features
        .first()
        .map(|feature| feature.attributes.keys().cloned().collect())
        .unwrap_or_default()
}
