//! Group aggregator
//!
//! Organizes parsed records into named groups for presentation and
//! edit-batching. Groups appear in first-seen order; within a group, records
//! keep parse order.

use ipc_proto::{Group, ImageRecord};

/// Group records by their `group_name`.
///
/// Every record must cross the process/UI boundary as plain data; a record
/// that fails the serialization check is dropped with a diagnostic rather
/// than failing the whole batch.
pub fn group_records(records: Vec<ImageRecord>) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();

    for record in records {
        if let Err(e) = serde_json::to_value(&record) {
            tracing::error!(
                "Dropping unserializable record {} ({}): {}",
                record.index,
                record.original_path,
                e
            );
            continue;
        }

        match groups.iter_mut().find(|g| g.name == record.group_name) {
            Some(group) => group.images.push(record),
            None => groups.push(Group {
                name: record.group_name.clone(),
                images: vec![record],
            }),
        }
    }

    groups
}
