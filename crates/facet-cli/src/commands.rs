//! Subcommand implementations. Each returns the text to print.

use std::collections::HashMap;

use anyhow::Context as _;
use facet_core::{
  ColumnSpec, ValueType,
  document::Entry,
  host::{Host, IdCleaner as _, Markup as _},
  render::render,
  store::{AttributeQuery, AttributeStore, Grouping},
  values::STORED_SEPARATOR,
};

/// Parsed declarations as pretty JSON.
pub fn column(declarations: &[String]) -> anyhow::Result<String> {
  let specs: Vec<ColumnSpec> = declarations.iter().map(|d| ColumnSpec::parse(d)).collect();
  serde_json::to_string_pretty(&specs).context("failed to serialise columns")
}

/// Normalize `pairs` and store them on `page`.
pub fn put<S>(
  store: &S,
  host: &impl Host,
  page: &str,
  title: Option<String>,
  pairs: &[(String, String)],
) -> anyhow::Result<String>
where
  S: AttributeStore,
{
  let mut entry = Entry::new(host.clean_id(page), title);
  for (declaration, raw) in pairs {
    entry.add_raw(declaration, raw, host);
  }

  let empty: Vec<_> = entry
    .attributes
    .iter()
    .filter(|a| a.values.is_empty())
    .map(|a| a.column.title.as_str())
    .collect();
  if !empty.is_empty() {
    tracing::info!("no usable value for: {}", empty.join(", "));
  }

  let document = store
    .save_entry(&entry)
    .with_context(|| format!("failed to save {}", entry.page))?;
  Ok(format!(
    "saved {} attributes on {}",
    entry.attributes.len(),
    document.page
  ))
}

/// Render one page. Without declarations every stored key is shown as text.
pub fn show<S>(
  store: &S,
  host: &impl Host,
  page: &str,
  declarations: &[String],
) -> anyhow::Result<String>
where
  S: AttributeStore,
{
  let page = host.clean_id(page);
  let document = store
    .get_document(&page)
    .context("failed to load document")?
    .ok_or_else(|| facet_core::Error::UnknownDocument(page.clone()))?;

  let rows = store
    .query_attributes(&AttributeQuery::page(&document.page))
    .context("failed to load attributes")?;

  // Stored keys are already parsed; re-parsing would strip a trailing `s`.
  let columns: Vec<ColumnSpec> = if declarations.is_empty() {
    rows
      .iter()
      .map(|r| ColumnSpec {
        key:   r.key.clone(),
        kind:  ValueType::Text,
        multi: false,
        title: r.key.clone(),
      })
      .collect()
  } else {
    declarations.iter().map(|d| ColumnSpec::parse(d)).collect()
  };
  let values: HashMap<&str, &str> =
    rows.iter().map(|r| (r.key.as_str(), r.value.as_str())).collect();

  let mut lines = vec![document.title.unwrap_or(document.page)];
  for column in &columns {
    let stored = values.get(column.key.as_str()).copied().unwrap_or_default();
    lines.push(format!(
      "{}: {}",
      column.title,
      render(&column.key, stored, &column.kind, host)
    ));
  }
  Ok(lines.join("\n"))
}

/// One tab-separated line per document with the rendered columns.
pub fn table<S>(store: &S, host: &impl Host, declarations: &[String]) -> anyhow::Result<String>
where
  S: AttributeStore,
{
  let columns: Vec<ColumnSpec> = declarations.iter().map(|d| ColumnSpec::parse(d)).collect();
  let rows = store
    .query_attributes(&AttributeQuery::default())
    .context("failed to load attributes")?;

  let mut by_page: HashMap<(&str, &str), &str> = HashMap::new();
  for row in &rows {
    by_page.insert((row.page.as_str(), row.key.as_str()), row.value.as_str());
  }

  let mut header = vec!["page".to_owned()];
  header.extend(columns.iter().map(|c| c.title.clone()));
  let mut lines = vec![header.join("\t")];

  for document in store.list_documents().context("failed to list documents")? {
    let page_link = host.internal_link(&format!(":{}", document.page), document.title.as_deref());
    let mut cells = vec![page_link];
    for column in &columns {
      let stored = by_page
        .get(&(document.page.as_str(), column.key.as_str()))
        .copied()
        .unwrap_or_default();
      cells.push(render(&column.key, stored, &column.kind, host));
    }
    lines.push(cells.join("\t"));
  }
  Ok(lines.join("\n"))
}

/// Distinct values of one column across all documents.
///
/// With a separator the aggregated stored values are printed as-is;
/// otherwise they are rendered for the column's type.
pub fn values<S>(
  store: &S,
  host: &impl Host,
  declaration: &str,
  separator: Option<&str>,
) -> anyhow::Result<String>
where
  S: AttributeStore,
{
  let column = ColumnSpec::parse(declaration);
  let stored_separator = STORED_SEPARATOR.to_string();
  let groups = store
    .aggregate(
      &AttributeQuery::key(&column.key),
      Grouping::ByKey,
      separator.unwrap_or(&stored_separator),
    )
    .context("failed to aggregate values")?;

  let joined = groups.into_iter().next().map(|g| g.value).unwrap_or_default();
  Ok(match separator {
    Some(_) => joined,
    None => render(&column.key, &joined, &column.kind, host),
  })
}
