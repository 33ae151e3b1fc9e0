//! Build the predicate fragments the report templates are assembled from.
//!
//! Every builder is a pure function of its input. A builder given an empty set
//! returns an empty string or fragment so that the caller drops the predicate
//! together with its connective.

use query_engine_request::{IssueType, Polygon, TimeRange};
use query_engine_sql::sql::ast::{Connective, Fragment};
use query_engine_sql::sql::helpers;

use super::error::Error;
use super::helpers::{project_tag, to_spaced_json};

// Hashtags //

/// Changeset tag fields a hashtag can appear in.
const HASHTAGS_FIELD: &str = "hashtags";
const COMMENT_FIELD: &str = "comment";

/// Match changesets carrying any of the project tags or hashtags, in either the
/// `hashtags` or the `comment` tag.
///
/// Tokens are every `hotosm-project-<id>` followed by every hashtag, each in input
/// order. Four patterns are emitted per token: all `%<token>;%` against `hashtags`,
/// then all `%<token> %` against `comment`, then `%<token>` against `hashtags` and
/// `comment` token by token.
pub fn hashtag_filter(project_ids: &[i64], hashtags: &[String]) -> Fragment {
    let tokens: Vec<String> = project_ids
        .iter()
        .map(|project_id| project_tag(*project_id))
        .chain(hashtags.iter().cloned())
        .collect();

    let hashtags_field = helpers::hstore_get("tags", HASHTAGS_FIELD);
    let comment_field = helpers::hstore_get("tags", COMMENT_FIELD);

    let delimited = tokens
        .iter()
        .map(|token| helpers::like(&hashtags_field, &format!("%{token};%")));
    let spaced = tokens
        .iter()
        .map(|token| helpers::like(&comment_field, &format!("%{token} %")));
    let trailing = tokens.iter().flat_map(|token| {
        let pattern = format!("%{token}");
        [
            helpers::like(&hashtags_field, &pattern),
            helpers::like(&comment_field, &pattern),
        ]
    });

    Fragment::and(helpers::join(Connective::Or, delimited.chain(spaced).chain(trailing)))
}

// Time //

/// `"created_at" between '<from>'::timestamp AND '<to>'::timestamp`
pub fn created_at_filter(time_range: &TimeRange) -> String {
    format!(
        "{} between {}::timestamp AND {}::timestamp",
        helpers::quote_identifier("created_at"),
        helpers::quote_literal(&time_range.start_iso()),
        helpers::quote_literal(&time_range.end_iso()),
    )
}

/// `<column> BETWEEN '<from>'::timestamp AND '<to>'::timestamp`
pub fn timestamp_between(column: &str, time_range: &TimeRange) -> String {
    format!(
        "{column} BETWEEN {}::timestamp AND {}::timestamp",
        helpers::quote_literal(&time_range.start_iso()),
        helpers::quote_literal(&time_range.end_iso()),
    )
}

/// `timestamp between '<from>' and  '<to>'`, with space separated date and time.
pub fn validation_timestamp_filter(time_range: &TimeRange) -> String {
    format!(
        "timestamp between {} and  {}",
        helpers::quote_literal(&time_range.start_spaced()),
        helpers::quote_literal(&time_range.end_spaced()),
    )
}

// Geometry //

/// Restrict validation rows to those located inside the polygon.
pub fn geometry_filter(polygon: &Polygon) -> Result<String, Error> {
    let geojson = to_spaced_json(polygon)?;
    Ok(format!(
        "WHERE ST_CONTAINS(ST_GEOMFROMGEOJSON({}), location)",
        helpers::quote_literal(&geojson)
    ))
}

// Issues //

/// `'<code>'=ANY(status) OR ...`
pub fn issue_filter<'a>(issue_types: impl IntoIterator<Item = &'a IssueType>) -> Fragment {
    Fragment::and(helpers::join(
        Connective::Or,
        issue_types
            .into_iter()
            .map(|issue_type| helpers::any_of(issue_type.as_str(), "status")),
    ))
}

/// `unnest_status in ('<code>', ...)`
pub fn unnest_status_filter<'a>(issue_types: impl IntoIterator<Item = &'a IssueType>) -> String {
    helpers::in_list(
        "unnest_status",
        issue_types.into_iter().map(|issue_type| issue_type.as_str()),
    )
}

// Identity //

/// Changesets tagged with any of the projects: `'hotosm-project-<id>'=ANY(hashtags) OR ...`
pub fn project_scope_filter<'a>(project_ids: impl IntoIterator<Item = &'a i64>) -> String {
    helpers::join(
        Connective::Or,
        project_ids
            .into_iter()
            .map(|project_id| helpers::any_of(&project_tag(*project_id), "hashtags")),
    )
}

/// Users with any of the names: `'<name>'=username OR ...`
pub fn username_filter<'a>(usernames: impl IntoIterator<Item = &'a String>) -> String {
    helpers::join(
        Connective::Or,
        usernames
            .into_iter()
            .map(|username| helpers::literal_equals(username, "username")),
    )
}

/// `AND unnest_hashtags in ('<tag>', ...)`, or nothing when there are no hashtags.
pub fn unnest_hashtags_filter(hashtags: &[String]) -> String {
    if hashtags.is_empty() {
        String::new()
    } else {
        format!("AND {}", helpers::in_list("unnest_hashtags", hashtags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> TimeRange {
        TimeRange::parse("2021-08-27T9:00:00", "2021-08-27T11:00:00").unwrap()
    }

    #[test]
    fn hashtag_filter_emits_four_predicates_per_token() {
        let fragment = hashtag_filter(&[1, 2, 3], &["a".to_string(), "b".to_string()]);
        assert_eq!(fragment.sql.split(" OR ").count(), 4 * 5);
    }

    #[test]
    fn hashtag_filter_order() {
        let fragment = hashtag_filter(&[7], &["tag".to_string()]);
        assert_eq!(
            fragment.sql,
            [
                r#"("tags" -> 'hashtags') ~~ '%hotosm-project-7;%'"#,
                r#"("tags" -> 'hashtags') ~~ '%tag;%'"#,
                r#"("tags" -> 'comment') ~~ '%hotosm-project-7 %'"#,
                r#"("tags" -> 'comment') ~~ '%tag %'"#,
                r#"("tags" -> 'hashtags') ~~ '%hotosm-project-7'"#,
                r#"("tags" -> 'comment') ~~ '%hotosm-project-7'"#,
                r#"("tags" -> 'hashtags') ~~ '%tag'"#,
                r#"("tags" -> 'comment') ~~ '%tag'"#,
            ]
            .join(" OR ")
        );
    }

    #[test]
    fn empty_hashtag_filter() {
        assert!(hashtag_filter(&[], &[]).is_empty());
    }

    #[test]
    fn timestamp_renderings() {
        assert_eq!(
            created_at_filter(&range()),
            r#""created_at" between '2021-08-27T09:00:00'::timestamp AND '2021-08-27T11:00:00'::timestamp"#
        );
        assert_eq!(
            timestamp_between("osh.timestamp", &range()),
            "osh.timestamp BETWEEN '2021-08-27T09:00:00'::timestamp AND '2021-08-27T11:00:00'::timestamp"
        );
        assert_eq!(
            validation_timestamp_filter(&range()),
            "timestamp between '2021-08-27 09:00:00' and  '2021-08-27 11:00:00'"
        );
    }

    #[test]
    fn identity_filters_keep_input_order() {
        assert_eq!(
            project_scope_filter(&[9928, 4730]),
            "'hotosm-project-9928'=ANY(hashtags) OR 'hotosm-project-4730'=ANY(hashtags)"
        );
        assert_eq!(
            username_filter(&["b".to_string(), "a".to_string()]),
            "'b'=username OR 'a'=username"
        );
    }

    #[test]
    fn usernames_are_escaped() {
        assert_eq!(
            username_filter(&["o'brien".to_string()]),
            "'o''brien'=username"
        );
    }

    #[test]
    fn issue_filters() {
        let issues = [IssueType::Badgeom, IssueType::Badvalue];
        assert_eq!(
            issue_filter(&issues).sql,
            "'badgeom'=ANY(status) OR 'badvalue'=ANY(status)"
        );
        assert_eq!(
            unnest_status_filter(&issues),
            "unnest_status in ('badgeom', 'badvalue')"
        );
    }

    #[test]
    fn unnest_hashtags_filter_is_omitted_without_hashtags() {
        assert_eq!(unnest_hashtags_filter(&[]), "");
        assert_eq!(
            unnest_hashtags_filter(&["missingmaps".to_string()]),
            "AND unnest_hashtags in ('missingmaps')"
        );
    }
}
