use query_engine_request::{
    DataQualityHashtagParams, DataQualityParams, HashtagScope, IssueType, OutputType,
    ReportRequest, ValidationError,
};
use serde_json::json;

fn polygon() -> serde_json::Value {
    json!({
        "type": "Polygon",
        "coordinates": [[
            [-74.80708971619606, 11.002032789290594],
            [-74.80621799826622, 11.002032789290594],
            [-74.80621799826622, 11.00265678856572],
            [-74.80708971619606, 11.00265678856572],
            [-74.80708971619606, 11.002032789290594]
        ]]
    })
}

fn validation_message<T>(value: serde_json::Value) -> String
where
    T: serde::de::DeserializeOwned + std::fmt::Debug,
{
    serde_json::from_value::<T>(value).unwrap_err().to_string()
}

#[test]
fn hashtag_report_without_scope_and_empty_range_is_rejected() {
    let message = validation_message::<DataQualityHashtagParams>(json!({
        "hashtags": [],
        "issueType": ["badgeom"],
        "outputType": "geojson",
        "fromTimestamp": "2020-12-11T00:00:00",
        "toTimestamp": "2020-12-11T00:00:00"
    }));
    assert!(message.contains("must be earlier than"), "{message}");
}

#[test]
fn hashtag_report_with_geometry_and_empty_range_is_rejected() {
    let message = validation_message::<DataQualityHashtagParams>(json!({
        "issueType": ["badgeom"],
        "outputType": "geojson",
        "fromTimestamp": "2020-12-11T00:00:00",
        "toTimestamp": "2020-12-11T00:00:00",
        "geometry": polygon()
    }));
    assert!(message.contains("must be earlier than"), "{message}");
}

#[test]
fn hashtag_report_needs_a_scope() {
    let message = validation_message::<DataQualityHashtagParams>(json!({
        "issueType": ["badgeom"],
        "fromTimestamp": "2020-12-10T00:00:00",
        "toTimestamp": "2020-12-11T00:00:00"
    }));
    assert_eq!(message, "one of hashtags or geometry is required");
}

#[test]
fn hashtag_report_rejects_hashtags_with_geometry() {
    let message = validation_message::<DataQualityHashtagParams>(json!({
        "hashtags": ["missingmaps"],
        "issueType": ["badgeom"],
        "fromTimestamp": "2020-12-10T00:00:00",
        "toTimestamp": "2020-12-11T00:00:00",
        "geometry": polygon()
    }));
    assert_eq!(message, "hashtags and geometry are mutually exclusive");
}

#[test]
fn hashtag_report_with_geometry() {
    let params: DataQualityHashtagParams = serde_json::from_value(json!({
        "issueType": ["badgeom", "badvalue"],
        "outputType": "csv",
        "fromTimestamp": "2020-12-10T00:00:00",
        "toTimestamp": "2020-12-11T00:00:00",
        "geometry": polygon()
    }))
    .unwrap();
    assert!(matches!(params.scope(), HashtagScope::Geometry(_)));
    assert_eq!(params.output_type(), OutputType::Csv);
    assert_eq!(
        params.issue_types().iter().copied().collect::<Vec<_>>(),
        vec![IssueType::Badgeom, IssueType::Badvalue]
    );
}

#[test]
fn data_quality_is_project_or_username_scoped() {
    let project: DataQualityParams = serde_json::from_value(json!({
        "project_ids": [9928, 4730, 5663],
        "issue_types": ["badgeom", "badvalue"],
        "output_type": "geojson"
    }))
    .unwrap();
    assert!(matches!(project, DataQualityParams::Project(_)));

    let username: DataQualityParams = serde_json::from_value(json!({
        "osm_usernames": ["MANUEL_PC", "piticasuno"],
        "issue_types": ["badgeom"],
        "fromTimestamp": "2021-10-7T9:00:00",
        "toTimestamp": "2021-10-7T11:00:00"
    }))
    .unwrap();
    match username {
        DataQualityParams::Username(params) => {
            assert_eq!(params.osm_usernames().len(), 2);
            assert_eq!(
                params.time_range().map(|range| range.start_spaced()),
                Some("2021-10-07 09:00:00".to_string())
            );
        }
        DataQualityParams::Project(_) => panic!("expected a username scoped request"),
    }
}

#[test]
fn data_quality_rejects_both_scopes() {
    let message = validation_message::<DataQualityParams>(json!({
        "project_ids": [9928],
        "osm_usernames": ["MANUEL_PC"],
        "issue_types": ["badgeom"]
    }));
    assert_eq!(
        message,
        "project_ids and osm_usernames are mutually exclusive"
    );
}

#[test]
fn data_quality_rejects_no_scope() {
    let message = validation_message::<DataQualityParams>(json!({
        "project_ids": [],
        "issue_types": ["badgeom"]
    }));
    assert_eq!(message, "one of project_ids or osm_usernames is required");
}

#[test]
fn data_quality_requires_issue_types() {
    let message = validation_message::<DataQualityParams>(json!({
        "project_ids": [9928],
        "issue_types": []
    }));
    assert_eq!(message, "issue_types must not be empty");
}

#[test]
fn data_quality_rejects_half_a_time_range() {
    let message = validation_message::<DataQualityParams>(json!({
        "osm_usernames": ["MANUEL_PC"],
        "issue_types": ["badgeom"],
        "fromTimestamp": "2021-10-07T09:00:00"
    }));
    assert_eq!(message, ValidationError::IncompleteTimeRange.to_string());
}

#[test]
fn unknown_issue_types_are_rejected() {
    let result = serde_json::from_value::<DataQualityParams>(json!({
        "project_ids": [9928],
        "issue_types": ["notanissue"]
    }));
    assert!(result.is_err());
}

#[test]
fn report_requests_are_tagged() {
    let request: ReportRequest = serde_json::from_value(json!({
        "report": "data_quality_hashtags",
        "hashtags": ["missingmaps"],
        "issueType": ["badgeom"],
        "fromTimestamp": "2020-12-10T00:00:00",
        "toTimestamp": "2020-12-11T00:00:00"
    }))
    .unwrap();
    assert_eq!(request.name(), "data_quality_hashtags");

    let request: ReportRequest = serde_json::from_value(json!({
        "report": "user_statistics",
        "userId": 11593794,
        "fromTimestamp": "2021-08-27T09:00:00",
        "toTimestamp": "2021-08-27T11:00:00"
    }))
    .unwrap();
    assert!(matches!(request, ReportRequest::UserStatistics(_)));
}

#[test]
fn unknown_reports_are_rejected() {
    let result = serde_json::from_value::<ReportRequest>(json!({
        "report": "leaderboard",
        "fromTimestamp": "2020-12-10T00:00:00",
        "toTimestamp": "2020-12-11T00:00:00"
    }));
    assert!(result.is_err());
}

#[test]
fn every_report_has_a_parameter_schema() {
    let schemas = query_engine_request::report::parameter_schemas();
    let names = schemas.iter().map(|(name, _)| *name).collect::<Vec<_>>();
    similar_asserts::assert_eq!(
        names,
        vec![
            "mapathon_summary",
            "mapathon_detail",
            "user_statistics",
            "data_quality",
            "data_quality_hashtags",
        ]
    );

    let user_statistics = serde_json::to_value(&schemas[2].1).unwrap();
    assert!(user_statistics["properties"]["userId"].is_object());
}
