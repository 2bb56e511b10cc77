//! Chart and stat widgets flattened into two-column tables.

use super::formatter::{column_widths, format_ascii_table};
use crate::document::{DocumentError, DocumentModel};
use crate::page_translator::text_normalizer::clean_text;
use std::collections::HashSet;

/// One kind of chart widget: what marks it, and where its values and labels live.
struct ChartFamily {
    name: &'static str,
    triggers: &'static str,
    values: &'static str,
    labels: &'static str,
    value_header: &'static str,
}

const CHART_FAMILIES: &[ChartFamily] = &[
    ChartFamily {
        name: "bar",
        triggers: ".bar-graph, [class*=chart], [class*=graph]",
        values: "[class*=number], [class*=percentage], [class*=value]",
        labels: "[class*=tag], [class*=label], [class*=title]",
        value_header: "Value",
    },
    ChartFamily {
        name: "percentage",
        triggers: "[class*=percentage], [class*=metric], [class*=stat]",
        values: "[class*=number], [class*=percentage], [class*=value], [class*=stat]",
        labels: "[class*=tag], [class*=label], [class*=title], [class*=name]",
        value_header: "Percentage",
    },
];

const CONTAINER_SELECTOR: &str = "section, div";

fn pair_rows<D: DocumentModel>(
    doc: &D,
    container: D::Node,
    family: &ChartFamily,
) -> Result<Vec<Vec<String>>, DocumentError> {
    let values = doc.query_all_within(container, family.values)?;
    let labels = doc.query_all_within(container, family.labels)?;

    Ok(labels
        .iter()
        .zip(values.iter())
        .filter_map(|(&label, &value)| {
            let label = clean_text(&doc.text_content(label));
            let value = clean_text(&doc.text_content(value));
            (!label.is_empty() && !value.is_empty()).then(|| vec![label, value])
        })
        .collect())
}

fn extract_family<D: DocumentModel>(
    doc: &D,
    family: &ChartFamily,
    tables: &mut Vec<(D::Node, String)>,
) -> Result<(), DocumentError> {
    let mut visited: HashSet<D::Node> = HashSet::new();
    let mut accepted: Vec<D::Node> = Vec::new();

    for trigger in doc.query_all(family.triggers)? {
        let Some(container) = doc.closest(trigger, CONTAINER_SELECTOR)? else {
            continue;
        };
        if !visited.insert(container) {
            continue;
        }
        // A widget nested in an already tabulated container would repeat its rows.
        if accepted
            .iter()
            .any(|&outer| doc.descendants(outer).contains(&container))
        {
            continue;
        }

        let rows = match pair_rows(doc, container, family) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::debug!("Skipping {} chart {:?}: {}", family.name, container, e);
                continue;
            }
        };
        if rows.is_empty() {
            continue;
        }

        let headers = vec!["Metric".to_string(), family.value_header.to_string()];
        let widths = column_widths(&headers, &rows);
        tables.push((container, format_ascii_table(&headers, &rows, &widths)));
        accepted.push(container);
    }
    Ok(())
}

/// Chart tables for both widget families, bar charts first.
pub fn extract_chart_tables<D: DocumentModel>(
    doc: &D,
) -> Result<Vec<(D::Node, String)>, DocumentError> {
    let mut tables = Vec::new();
    for family in CHART_FAMILIES {
        extract_family(doc, family, &mut tables)?;
    }
    Ok(tables)
}
