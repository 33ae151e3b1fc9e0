//! Helpers shared by the filter builders and the query templates.

use std::io;

use serde::Serialize;

use super::error::Error;

/// The hashtag a HOT Tasking Manager project stamps on its changesets.
pub fn project_tag(project_id: i64) -> String {
    format!("hotosm-project-{project_id}")
}

/// Project ids as the comma separated list the task routines expect: `1,2,3`.
pub fn project_id_csv(project_ids: &[i64]) -> String {
    project_ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// A JSON formatter that puts a space after every `,` and `:`.
///
/// The containment filter embeds GeoJSON in this layout, e.g.
/// `{"coordinates": [[[1.0, 2.0]]], "type": "Polygon"}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Serialize a value as single-line JSON with spaced separators.
pub fn to_spaced_json<T: Serialize>(value: &T) -> Result<String, Error> {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, SpacedFormatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buffer)?)
}
