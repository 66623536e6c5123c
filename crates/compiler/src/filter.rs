use crate::rule::{FieldKind, QueryConfig};
use crate::value::{quote, reference};

/// `['host', 'cpu']` for the configured group-by tags.
pub fn group_by(query: &QueryConfig) -> String {
    let tags: Vec<_> = query.group_by.tags.iter().map(|t| quote(t)).collect();
    format!("[{}]", tags.join(", "))
}

/// Tag filter lambda for the `from` node.
///
/// Values of one tag key are OR'd inside parentheses and the key groups are
/// AND'd together, sorted by their text. Rejected tags only flip the
/// comparison to `!=`.
pub fn where_filter(query: &QueryConfig) -> String {
    let op = if query.are_tags_accepted { "==" } else { "!=" };
    let mut clauses: Vec<String> = query
        .tags
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(key, values)| {
            let key = reference(key);
            let terms: Vec<_> = values
                .iter()
                .map(|v| format!("{key} {op} {}", quote(v)))
                .collect();
            format!("({})", terms.join(" OR "))
        })
        .collect();
    clauses.sort();

    if let Some(field) = field_name(query) {
        clauses.push(format!("isPresent({})", reference(field)));
    }
    if clauses.is_empty() {
        return "lambda: TRUE".to_string();
    }
    format!("lambda: {}", clauses.join(" AND "))
}

/// Expression for the alert id: the rule name, suffixed with the group when
/// the query groups by tags.
pub fn id_var(query: &QueryConfig) -> String {
    if query.group_by.tags.is_empty() {
        "name".to_string()
    } else {
        "name + ':{{.Group}}'".to_string()
    }
}

/// The first field the query reads, looking through function arguments.
pub fn field_name(query: &QueryConfig) -> Option<&str> {
    query.fields.iter().find_map(|field| match field.kind {
        FieldKind::Field => field.name(),
        FieldKind::Func => field
            .args
            .iter()
            .find(|arg| arg.kind == FieldKind::Field)
            .and_then(|arg| arg.name()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Field;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn field(name: &str) -> Field {
        Field {
            value: json!(name),
            kind: FieldKind::Field,
            ..Default::default()
        }
    }

    fn tags(pairs: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
            .collect()
    }

    #[test]
    fn groups_sorted_or_within_and_across() {
        let query = QueryConfig {
            fields: vec![field("status")],
            tags: tags(&[("host", &["h1", "prod"]), ("cpu", &["cpu_total"])]),
            are_tags_accepted: true,
            ..Default::default()
        };
        assert_eq!(
            where_filter(&query),
            r#"lambda: ("cpu" == 'cpu_total') AND ("host" == 'h1' OR "host" == 'prod') AND isPresent("status")"#
        );
    }

    #[test]
    fn rejected_tags_flip_comparison_only() {
        let query = QueryConfig {
            tags: tags(&[("host", &["h1", "h2"]), ("cpu", &["cpu0"])]),
            are_tags_accepted: false,
            ..Default::default()
        };
        assert_eq!(
            where_filter(&query),
            r#"lambda: ("cpu" != 'cpu0') AND ("host" != 'h1' OR "host" != 'h2')"#
        );
    }

    #[test]
    fn fallbacks() {
        let only_field = QueryConfig {
            fields: vec![field("usage")],
            ..Default::default()
        };
        assert_eq!(where_filter(&only_field), r#"lambda: isPresent("usage")"#);
        assert_eq!(where_filter(&QueryConfig::default()), "lambda: TRUE");
    }

    #[test]
    fn empty_tag_lists_are_skipped_and_values_escaped() {
        let query = QueryConfig {
            tags: tags(&[("host", &[]), ("name", &["o'neil"])]),
            are_tags_accepted: true,
            ..Default::default()
        };
        assert_eq!(where_filter(&query), r#"lambda: ("name" == 'o\'neil')"#);
    }

    #[test]
    fn group_by_list() {
        let mut query = QueryConfig::default();
        assert_eq!(group_by(&query), "[]");
        query.group_by.tags = vec!["host".into(), "cpu".into()];
        assert_eq!(group_by(&query), "['host', 'cpu']");
        assert_eq!(id_var(&query), "name + ':{{.Group}}'");
        assert_eq!(id_var(&QueryConfig::default()), "name");
    }

    #[test]
    fn field_name_reads_function_arguments() {
        let query = QueryConfig {
            fields: vec![Field {
                value: json!("mean"),
                kind: FieldKind::Func,
                args: vec![field("usage_idle")],
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(field_name(&query), Some("usage_idle"));
        assert_eq!(field_name(&QueryConfig::default()), None);
    }
}
