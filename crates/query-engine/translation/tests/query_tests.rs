mod common;

use query_engine_request::{
    DataQualityHashtagParams, DataQualityParams, MapathonParams, ReportRequest, TimeRange,
    UserStatsParams,
};
use query_engine_translation::translation::query::{data_quality, mapathon, translate, user_stats};
use similar_asserts::assert_eq;

mod mapathon_queries {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn osm_history() {
        let params: MapathonParams = common::read_request("mapathon_osm_history");
        let changesets = mapathon::changeset_query(&params);
        assert_eq!(
            mapathon::osm_history_query(&changesets, false),
            common::expected_sql("mapathon_osm_history")
        );
    }

    #[test]
    fn total_contributors() {
        let params: MapathonParams = common::read_request("mapathon_total_contributors");
        let changesets = mapathon::changeset_query(&params);
        assert_eq!(
            mapathon::total_contributors_query(&changesets),
            common::expected_sql("mapathon_total_contributors")
        );
    }

    #[test]
    fn users_contributions() {
        let params: MapathonParams = common::read_request("mapathon_users_contributions");
        let changesets = mapathon::changeset_query(&params);
        assert_eq!(
            mapathon::users_contributions_query(&params, &changesets),
            common::expected_sql("mapathon_users_contributions")
        );
    }

    #[test]
    fn osm_history_by_username_groups_by_username() {
        let params: MapathonParams = common::read_request("mapathon_osm_history");
        let changesets = mapathon::changeset_query(&params);
        let sql = mapathon::osm_history_query(&changesets, true);
        assert!(sql.contains(
            "SELECT (each(tags)).key AS feature, action, username, count(distinct id) AS count"
        ));
        assert!(sql.contains("GROUP BY feature, action, username ORDER BY count DESC"));
    }

    #[test]
    fn filter_has_four_predicates_per_token() {
        let params: MapathonParams = common::read_request("mapathon_osm_history");
        let changesets = mapathon::changeset_query(&params);
        let tokens = params.project_ids().len() + params.hashtags().len();
        assert_eq!(changesets.hashtag_filter.split(" OR ").count(), 4 * tokens);
    }

    #[test]
    fn unscoped_changesets_have_no_dangling_connective() {
        let time_range = TimeRange::parse("2021-08-27T09:00:00", "2021-08-27T11:00:00").unwrap();
        let params = MapathonParams::new(vec![], vec![], time_range).unwrap();
        let changesets = mapathon::changeset_query(&params);
        assert_eq!(
            changesets.sql,
            "\n    SELECT user_id, id as changeset_id, user_name as username\n    FROM osm_changeset\n    WHERE \"created_at\" between '2021-08-27T09:00:00'::timestamp AND '2021-08-27T11:00:00'::timestamp\n    "
        );
        let total = mapathon::total_contributors_query(&changesets);
        assert!(!total.contains(" AND ("));
        assert!(!total.contains("()"));
    }
}

mod user_stats_queries {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn with_hashtags() {
        let params: UserStatsParams = common::read_request("user_statistics_with_hashtags");
        assert_eq!(
            user_stats::user_statistics_with_hashtags_query(&params),
            common::expected_sql("user_statistics_with_hashtags")
        );
    }

    #[test]
    fn without_changeset_scope() {
        let params: UserStatsParams = common::read_request("user_statistics");
        assert_eq!(
            user_stats::user_statistics_query(&params),
            common::expected_sql("user_statistics")
        );
    }

    #[test]
    fn dispatch_depends_on_scope() {
        let scoped: UserStatsParams = common::read_request("user_statistics_with_hashtags");
        assert!(user_stats::user_statistics(&scoped).contains("WITH T1 AS ("));

        let unscoped = UserStatsParams::new(scoped.user_id(), vec![], vec![], *scoped.time_range())
            .unwrap();
        let sql = user_stats::user_statistics(&unscoped);
        assert!(!sql.contains("WITH"));
        assert_eq!(sql, user_stats::user_statistics_query(&unscoped));
    }
}

mod data_quality_queries {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn projects() {
        let params: DataQualityParams = common::read_request("data_quality_projects");
        assert!(matches!(params, DataQualityParams::Project(_)));
        assert_eq!(
            data_quality::report_query(&params),
            common::expected_sql("data_quality_projects")
        );
    }

    #[test]
    fn usernames() {
        let params: DataQualityParams = common::read_request("data_quality_usernames");
        assert!(matches!(params, DataQualityParams::Username(_)));
        assert_eq!(
            data_quality::report_query(&params),
            common::expected_sql("data_quality_usernames")
        );
    }

    #[test]
    fn usernames_without_time_range() {
        let params: DataQualityParams = serde_json::from_value(serde_json::json!({
            "osm_usernames": ["MANUEL_PC"],
            "issue_types": ["badgeom"]
        }))
        .unwrap();
        let sql = data_quality::report_query(&params);
        assert!(sql.contains("        WHERE\n        ('badgeom'=ANY(status))\n                )"));
        assert!(!sql.contains("timestamp between"));
    }

    #[test]
    fn hashtags() {
        let params: DataQualityHashtagParams = common::read_request("data_quality_hashtags");
        assert_eq!(
            data_quality::hashtag_query(&params).unwrap(),
            common::expected_sql("data_quality_hashtags")
        );
    }

    #[test]
    fn geometry() {
        let params: DataQualityHashtagParams = common::read_request("data_quality_geometry");
        assert_eq!(
            data_quality::hashtag_query(&params).unwrap(),
            common::expected_sql("data_quality_geometry")
        );
    }
}

#[test]
fn mapathon_summary_plan() {
    let request: ReportRequest = serde_json::from_value(serde_json::json!({
        "report": "mapathon_summary",
        "project_ids": [11224],
        "fromTimestamp": "2021-08-27T09:00:00",
        "toTimestamp": "2021-08-27T11:00:00"
    }))
    .unwrap();
    let plan = translate(&request).unwrap();
    assert_eq!(plan.report, "mapathon_summary");
    assert_eq!(
        plan.statements
            .iter()
            .map(|statement| statement.name)
            .collect::<Vec<_>>(),
        vec!["summary", "total_contributors"]
    );
}
