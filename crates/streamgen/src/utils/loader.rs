use std::path::Path;

use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use itertools::Itertools;

use crate::generator::model::CodeModel;

/// A memory-mapped code-model document.
pub struct ModelLoader {
  file: AsyncMmapFile,
}

impl ModelLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let file = AsyncMmapFile::open(path).await?;
    Ok(Self { file })
  }

  /// Decodes the document, naming the JSON path of the first field that fails.
  pub fn parse(&self) -> anyhow::Result<CodeModel> {
    parse_code_model(self.file.as_slice())
  }
}

pub fn parse_code_model(bytes: &[u8]) -> anyhow::Result<CodeModel> {
  let mut deserializer = serde_json::Deserializer::from_slice(bytes);
  let code_model: CodeModel = serde_path_to_error::deserialize(&mut deserializer)?;

  if let Some(name) = code_model.models.iter().map(|model| model.name.as_str()).duplicates().next() {
    anyhow::bail!("duplicate model name '{name}'");
  }
  if let Some(name) = code_model.enums.iter().map(|definition| definition.name.as_str()).duplicates().next() {
    anyhow::bail!("duplicate enum name '{name}'");
  }

  Ok(code_model)
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  #[test]
  fn test_parse_reports_json_path() {
    let document = br#"{"name": "Pets", "version": "1", "models": [{"name": "Pet", "properties": [{"name": "tags", "type": "list<string"}]}]}"#;
    let error = parse_code_model(document).unwrap_err();
    assert!(error.to_string().starts_with("models[0].properties[0].type"), "{error}");
  }

  #[test]
  fn test_parse_rejects_duplicate_models() {
    let document = br#"{"name": "Pets", "version": "1", "models": [{"name": "Pet"}, {"name": "Pet"}]}"#;
    let error = parse_code_model(document).unwrap_err();
    assert_eq!(error.to_string(), "duplicate model name 'Pet'");
  }

  #[test]
  fn test_parse_enums() {
    let document = br#"{"name": "Pets", "version": "1", "enums": [
      {"name": "DogKind", "expandable": true, "values": [{"value": "golden", "description": "A golden retriever."}]},
      {"name": "DogKind", "values": []}
    ]}"#;
    let error = parse_code_model(document).unwrap_err();
    assert_eq!(error.to_string(), "duplicate enum name 'DogKind'");

    let document = br#"{"name": "Pets", "version": "1", "enums": [{"name": "DogKind", "values": [{"name": "Golden"}]}]}"#;
    let error = parse_code_model(document).unwrap_err();
    assert!(error.to_string().starts_with("enums[0].values[0]"), "{error}");
  }

  #[tokio::test]
  async fn test_loader_reads_mapped_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file
      .write_all(br#"{"name": "Pets", "version": "2.0", "models": [{"name": "Pet", "properties": []}]}"#)
      .unwrap();

    let code_model = ModelLoader::open(file.path()).await.unwrap().parse().unwrap();
    assert_eq!(code_model.name, "Pets");
    assert_eq!(code_model.models.len(), 1);
  }
}
