//! Statements of the data-quality reports over the `validation` table.

use query_engine_request::{
    DataQualityHashtagParams, DataQualityParams, DataQualityProjectParams,
    DataQualityUsernameParams, HashtagScope,
};
use query_engine_sql::sql::ast::Fragment;
use query_engine_sql::sql::helpers;
use query_engine_sql::sql::string::SQL;

use crate::translation::error::Error;
use crate::translation::filters;

/// Pick the statement for a project or username scoped request.
pub fn report_query(params: &DataQualityParams) -> String {
    match params {
        DataQualityParams::Project(params) => project_query(params),
        DataQualityParams::Username(params) => username_query(params),
    }
}

/// Issues found in changesets of the given Tasking Manager projects.
pub fn project_query(params: &DataQualityProjectParams) -> String {
    let mut sql = SQL::new();
    sql.append_syntax("   with t1 as (");
    sql.append_line("        select id");
    sql.append_line("                From changesets ");
    sql.append_line("                WHERE");
    sql.append_line("                  ");
    sql.append_syntax(&filters::project_scope_filter(params.project_ids().iter()));
    sql.append_line("            ),");
    append_issue_projection(&mut sql, false);
    sql.append_line("");
    sql.append_line("        FROM validation join t1 on change_id = t1.id");
    sql.append_line("        WHERE");
    sql.append_line("        ");
    sql.append_syntax(&filters::issue_filter(params.issue_types().iter()).sql);
    sql.append_line("                )");
    sql.append_line("        select *");
    sql.append_line("        from t2");
    sql.append_line("        ");
    sql.into_string()
}

/// Issues found in edits of the given users, optionally within a time window.
pub fn username_query(params: &DataQualityUsernameParams) -> String {
    let time_filter = params
        .time_range()
        .map(filters::validation_timestamp_filter)
        .unwrap_or_default();
    let conditions = helpers::combine(&[
        filters::issue_filter(params.issue_types().iter())
            .parenthesized(),
        Fragment::and(time_filter).parenthesized(),
    ]);

    let mut sql = SQL::new();
    sql.append_syntax("   with t1 as (");
    sql.append_line("        select id,username as username");
    sql.append_line("                From users ");
    sql.append_line("                WHERE");
    sql.append_line("                  ");
    sql.append_syntax(&filters::username_filter(params.osm_usernames().iter()));
    sql.append_line("            ),");
    append_issue_projection(&mut sql, true);
    sql.append_line("                ");
    sql.append_line("        FROM validation join t1 on user_id = t1.id  ");
    sql.append_line("        WHERE");
    sql.append_line("        ");
    sql.append_syntax(&conditions);
    sql.append_line("                )");
    sql.append_line("        select *");
    sql.append_line("        from t2");
    sql.append_line("        order by username");
    sql.append_line("        ");
    sql.into_string()
}

/// Issues per element, restricted to changesets of the time window and to either
/// the given hashtags or the elements located inside a polygon.
pub fn hashtag_query(params: &DataQualityHashtagParams) -> Result<String, Error> {
    let (geometry_filter, hashtag_filter) = match params.scope() {
        HashtagScope::Geometry(polygon) => (filters::geometry_filter(polygon)?, String::new()),
        HashtagScope::Hashtags(hashtags) => (
            String::new(),
            filters::unnest_hashtags_filter(&hashtags.iter().cloned().collect::<Vec<_>>()),
        ),
    };

    let mut sql = SQL::new();
    sql.append_line(&format!(
        "        WITH t1 AS (SELECT osm_id, change_id, st_x(location) AS lat, st_y(location) AS lon, unnest(status) AS unnest_status from validation {geometry_filter}),"
    ));
    sql.append_line(&format!(
        "        t2 AS (SELECT id, created_at, unnest(hashtags) AS unnest_hashtags from changesets WHERE {})",
        filters::timestamp_between("created_at", params.time_range())
    ));
    sql.append_line("        SELECT t1.osm_id,");
    sql.append_line("            t1.change_id as changeset_id,");
    sql.append_line("            t1.lat,");
    sql.append_line("            t1.lon,");
    sql.append_line("            t2.created_at,");
    sql.append_line("            ARRAY_TO_STRING(ARRAY_AGG(t1.unnest_status), ',') AS issues");
    sql.append_line("            FROM t1, t2 WHERE t1.change_id = t2.id");
    sql.append_line(&format!("            {hashtag_filter}"));
    sql.append_line(&format!(
        "            AND {}",
        filters::unnest_status_filter(params.issue_types().iter())
    ));
    sql.append_line("            GROUP BY t1.osm_id, t1.lat, t1.lon, t2.created_at, t1.change_id;");
    sql.append_line("    ");
    Ok(sql.into_string())
}

/// The `t2` stage selecting the columns shared by the project and username reports.
fn append_issue_projection(sql: &mut SQL, with_username: bool) {
    sql.append_line("        t2 AS (");
    sql.append_line("             SELECT osm_id as Osm_id,");
    sql.append_line("                change_id as Changeset_id,");
    sql.append_line("                timestamp::text as Changeset_timestamp,");
    sql.append_line("                status::text as Issue_type,");
    if with_username {
        sql.append_line("                t1.username as username,");
    }
    sql.append_line("                ST_X(location::geometry) as lng,");
    sql.append_line("                ST_Y(location::geometry) as lat");
}
