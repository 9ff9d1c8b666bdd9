use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use itertools::Itertools;

use crate::{
  generator::{graph::SchemaGraph, model::CodeModel},
  ui::{Colors, colors::to_comfy, term_width},
  utils::loader::ModelLoader,
};

/// One row of the model listing.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ModelRow {
  name: String,
  parent: String,
  discriminator: String,
  role: &'static str,
  properties: usize,
}

fn model_rows(code_model: &CodeModel) -> Vec<ModelRow> {
  let graph = SchemaGraph::new(code_model);
  graph
    .models()
    .map(|model| {
      let role = match (graph.is_dispatch_root(&model.name), model.parent.is_some()) {
        (true, _) => "dispatch root",
        (false, true) => "derived",
        (false, false) => "model",
      };
      ModelRow {
        name: model.name.clone(),
        parent: model.parent.clone().unwrap_or_default(),
        discriminator: graph.discriminator_name(&model.name).unwrap_or_default().to_string(),
        role,
        properties: model.properties.len(),
      }
    })
    .sorted_by(|a, b| a.name.cmp(&b.name))
    .collect()
}

pub async fn list_models(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let code_model = ModelLoader::open(input).await?.parse()?;

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  for title in ["MODEL", "PARENT", "DISCRIMINATOR", "ROLE", "PROPERTIES"] {
    header.add_cell(Cell::new(title).fg(to_comfy(colors.label())));
  }
  table.set_header(header);

  for row in model_rows(&code_model) {
    let mut cells = Row::new();
    cells.add_cell(
      Cell::new(row.name)
        .fg(to_comfy(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    cells.add_cell(Cell::new(row.parent).fg(to_comfy(colors.primary())));
    cells.add_cell(Cell::new(row.discriminator).fg(to_comfy(colors.accent())));
    cells.add_cell(Cell::new(row.role).fg(to_comfy(colors.primary())));
    cells.add_cell(
      Cell::new(row.properties)
        .fg(to_comfy(colors.value()))
        .set_alignment(CellAlignment::Right),
    );
    table.add_row(cells);
  }

  println!("{table}");

  Ok(())
}
