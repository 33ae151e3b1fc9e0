//! Statements of the mapathon reports.
//!
//! Every statement is built on the changeset selection of [`changeset_query`]: the
//! changesets created in the time window whose tags mention one of the projects or
//! hashtags.

use query_engine_request::{MapathonParams, TimeRange};
use query_engine_sql::sql::ast::Fragment;
use query_engine_sql::sql::helpers;
use query_engine_sql::sql::string::SQL;

use crate::translation::filters;
use crate::translation::helpers::project_id_csv;

/// The changeset selection together with the filters it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangesetQuery {
    pub sql: String,
    pub hashtag_filter: String,
    pub timestamp_filter: String,
}

impl ChangesetQuery {
    /// The timestamp filter, then the hashtag filter when there is one.
    pub fn where_clause(&self) -> String {
        helpers::combine(&[
            Fragment::and(self.timestamp_filter.as_str()),
            Fragment::and(self.hashtag_filter.as_str()).parenthesized(),
        ])
    }
}

/// Select `user_id`, `changeset_id` and `username` of the matching changesets.
pub fn changeset_query(params: &MapathonParams) -> ChangesetQuery {
    scoped_changeset_query(params.project_ids(), params.hashtags(), params.time_range())
}

pub(crate) fn scoped_changeset_query(
    project_ids: &[i64],
    hashtags: &[String],
    time_range: &TimeRange,
) -> ChangesetQuery {
    let hashtag_filter = filters::hashtag_filter(project_ids, hashtags).sql;
    let timestamp_filter = filters::created_at_filter(time_range);

    let mut changesets = ChangesetQuery {
        sql: String::new(),
        hashtag_filter,
        timestamp_filter,
    };

    let mut sql = SQL::new();
    sql.append_line("    SELECT user_id, id as changeset_id, user_name as username");
    sql.append_line("    FROM osm_changeset");
    sql.append_line("    WHERE ");
    sql.append_syntax(&changesets.where_clause());
    sql.append_line("    ");

    changesets.sql = sql.into_string();
    changesets
}

/// Count the distinct elements touched per tag key and action, most frequent first.
pub fn osm_history_query(changesets: &ChangesetQuery, with_username: bool) -> String {
    let (columns, grouping) = if with_username {
        ("action, username", "feature, action, username")
    } else {
        ("action", "feature, action")
    };

    let mut sql = SQL::new();
    sql.append_line("    WITH T1 AS(");
    sql.append_syntax(&changesets.sql);
    sql.append_syntax(")");
    sql.append_line(&format!(
        "    SELECT (each(tags)).key AS feature, {columns}, count(distinct id) AS count FROM osm_element_history AS t2, t1"
    ));
    sql.append_line("    WHERE t1.changeset_id = t2.changeset");
    sql.append_line(&format!("    GROUP BY {grouping} ORDER BY count DESC"));
    sql.append_line("    ");
    sql.into_string()
}

/// Count the distinct users that authored a matching changeset.
pub fn total_contributors_query(changesets: &ChangesetQuery) -> String {
    let mut sql = SQL::new();
    sql.append_line("                SELECT COUNT(distinct user_id) as contributors_count");
    sql.append_line("                FROM osm_changeset");
    sql.append_line("                WHERE ");
    sql.append_syntax(&changesets.where_clause());
    sql.append_line("            ");
    sql.into_string()
}

/// Per-user building totals together with mapped and validated task counts and the
/// editors used, the last three computed by the `tasks_per_user` and
/// `editors_per_user` database routines.
pub fn users_contributions_query(params: &MapathonParams, changesets: &ChangesetQuery) -> String {
    let project_ids = helpers::quote_literal(&project_id_csv(params.project_ids()));
    let from = helpers::quote_literal(&params.time_range().start_iso());
    let to = helpers::quote_literal(&params.time_range().end_iso());

    let mut sql = SQL::new();
    sql.append_line("    WITH T1 AS(");
    sql.append_syntax(&changesets.sql);
    sql.append_syntax("),");
    sql.append_line("    T2 AS (");
    sql.append_line("        SELECT (each(tags)).key AS feature,");
    sql.append_line("            user_id,");
    sql.append_line("            username,");
    sql.append_line("            count(distinct id) AS count");
    sql.append_line("        FROM osm_element_history AS t2, t1");
    sql.append_line("        WHERE t1.changeset_id    = t2.changeset");
    sql.append_line("        GROUP BY feature, user_id, username");
    sql.append_line("    ),");
    sql.append_line("    T3 AS (");
    sql.append_line("        SELECT user_id,");
    sql.append_line("            username,");
    sql.append_line("            SUM(count) AS total_buildings");
    sql.append_line("        FROM T2");
    sql.append_line("        WHERE feature = 'building'");
    sql.append_line("        GROUP BY user_id, username");
    sql.append_line("    )");
    sql.append_line("    SELECT user_id,");
    sql.append_line("        username,");
    sql.append_line("        total_buildings,");
    for (status, alias) in [("MAPPED", "mapped_tasks"), ("VALIDATED", "validated_tasks")] {
        sql.append_line("        public.tasks_per_user(user_id,");
        sql.append_line(&format!("            {project_ids},"));
        sql.append_line(&format!("            {from},"));
        sql.append_line(&format!("            {to},"));
        sql.append_line("            ");
        sql.append_literal(status);
        sql.append_syntax(&format!(") AS {alias},"));
    }
    sql.append_line("        public.editors_per_user(user_id,");
    sql.append_line(&format!("            {from},"));
    sql.append_line(&format!("            {to}) AS editors"));
    sql.append_line("    FROM T3;");
    sql.append_line("    ");
    sql.into_string()
}
