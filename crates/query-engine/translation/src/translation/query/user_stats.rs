//! Statements of the per-user statistics report.

use query_engine_request::UserStatsParams;
use query_engine_sql::sql::string::SQL;

use super::mapathon;
use crate::translation::filters;

/// Pick the statement for the request: scoped to the user's matching changesets when
/// projects or hashtags are given, otherwise over all of the user's edits.
pub fn user_statistics(params: &UserStatsParams) -> String {
    if params.is_scoped() {
        user_statistics_with_hashtags_query(params)
    } else {
        user_statistics_query(params)
    }
}

/// Feature and action counts of the user's ways and relations, restricted to the
/// changesets matching the projects and hashtags of the request.
pub fn user_statistics_with_hashtags_query(params: &UserStatsParams) -> String {
    let user_id = params.user_id();
    let changesets = mapathon::scoped_changeset_query(
        params.project_ids(),
        params.hashtags(),
        params.time_range(),
    );

    let mut sql = SQL::new();
    sql.append_line("            WITH T1 AS (");
    sql.append_line("                ");
    sql.append_syntax(&changesets.sql);
    sql.append_syntax(&format!(" AND user_id = {user_id}"));
    sql.append_line("            )");
    sql.append_line("            ");
    sql.append_line("            SELECT (each(osh.tags)).key as feature, osh.action, count(distinct osh.id)");
    sql.append_line("            FROM osm_element_history AS osh, T1");
    sql.append_line(&format!(
        "            WHERE {}",
        filters::timestamp_between("osh.timestamp", params.time_range())
    ));
    sql.append_line(&format!("            AND osh.uid = {user_id}"));
    sql.append_line("            AND osh.type in ('way','relation')");
    sql.append_line("            AND T1.changeset_id = osh.changeset");
    sql.append_line("            GROUP BY feature, action");
    sql.append_line("        ");
    sql.append_line("        ");
    sql.into_string()
}

/// Feature and action counts of all of the user's ways and relations in the window.
pub fn user_statistics_query(params: &UserStatsParams) -> String {
    let mut sql = SQL::new();
    sql.append_line("            SELECT (each(tags)).key as feature, action, count(distinct id)");
    sql.append_line("            FROM osm_element_history");
    sql.append_line(&format!(
        "            WHERE {}",
        filters::timestamp_between("timestamp", params.time_range())
    ));
    sql.append_line(&format!("            AND uid = {}", params.user_id()));
    sql.append_line("            AND type in ('way','relation')");
    sql.append_line("            GROUP BY feature, action");
    sql.append_line("        ");
    sql.into_string()
}
