//! Rooms and their bookable partitions.

use serde::{Deserialize, Serialize};

use crate::{DepartmentId, PartitionId, RoomId};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_id: RoomId,
    pub room_name: String,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
}

/// `GET /rooms` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RoomsResponse {
    #[serde(default)]
    pub rooms: Vec<Room>,
}

/// A bookable sub-unit of a room
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Partition {
    pub room_partition_id: PartitionId,
    #[serde(default)]
    pub partition_number: String,
    #[serde(default)]
    pub room_name: String,
    #[serde(default)]
    pub room_id: Option<RoomId>,
}

impl Partition {
    /// Label used in tables, e.g. "306-A"
    pub fn label(&self) -> String {
        if self.partition_number.is_empty() {
            self.room_name.clone()
        } else {
            format!("{}-{}", self.room_name, self.partition_number)
        }
    }
}

/// `GET /partitions` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PartitionsResponse {
    #[serde(default)]
    pub partitions: Vec<Partition>,
}

/// `GET /partitions/rooms/{roomId}` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PartitionItems {
    #[serde(default)]
    pub items: Vec<Partition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_label() {
        let p: Partition = serde_json::from_str(
            r#"{"roomPartitionId":3,"partitionNumber":"A","roomName":"306","roomId":1}"#,
        )
        .unwrap();
        assert_eq!(p.label(), "306-A");

        let p: Partition =
            serde_json::from_str(r#"{"roomPartitionId":4,"roomName":"428"}"#).unwrap();
        assert_eq!(p.label(), "428");
    }
}
