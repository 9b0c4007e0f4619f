//! `/rooms` and `/partitions` endpoints

use futures::future::try_join_all;
use studyroom_types::{
    Partition, PartitionId, PartitionItems, PartitionsResponse, Room, RoomId, RoomsResponse,
};

use super::{ApiClient, ApiError};

/// GET /rooms
pub async fn all_rooms(client: &ApiClient) -> Result<Vec<Room>, ApiError> {
    let resp: RoomsResponse = client.get("/rooms").await?;
    Ok(resp.rooms)
}

/// GET /rooms/{roomId}
pub async fn room(client: &ApiClient, room_id: RoomId) -> Result<Room, ApiError> {
    client.get(&format!("/rooms/{}", room_id)).await
}

/// Several rooms by id, fetched concurrently, in the order given
pub async fn rooms(client: &ApiClient, room_ids: &[RoomId]) -> Result<Vec<Room>, ApiError> {
    try_join_all(room_ids.iter().map(|&id| room(client, id))).await
}

/// GET /partitions
pub async fn all_partitions(client: &ApiClient) -> Result<Vec<Partition>, ApiError> {
    let resp: PartitionsResponse = client.get("/partitions").await?;
    Ok(resp.partitions)
}

/// GET /partitions/{partitionId}
pub async fn partition(client: &ApiClient, partition_id: PartitionId) -> Result<Partition, ApiError> {
    client.get(&format!("/partitions/{}", partition_id)).await
}

/// GET /partitions/rooms/{roomId} for each room, flattened
pub async fn partitions_by_room_ids(client: &ApiClient, room_ids: &[RoomId]) -> Result<Vec<Partition>, ApiError> {
    let per_room = try_join_all(room_ids.iter().map(|id| async move {
        let items: PartitionItems = client.get(&format!("/partitions/rooms/{}", id)).await?;
        Ok::<_, ApiError>(items.items)
    }))
    .await?;
    Ok(per_room.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock;
    use axum::{extract::Path, routing::get, Json, Router};
    use serde_json::json;

    #[tokio::test]
    async fn test_partitions_by_room_ids_flattens_in_order() {
        let router = Router::new().route(
            "/partitions/rooms/{id}",
            get(|Path(id): Path<i64>| async move {
                Json(json!({ "data": { "items": [
                    { "roomPartitionId": id * 10, "partitionNumber": "A", "roomName": id.to_string() },
                    { "roomPartitionId": id * 10 + 1, "partitionNumber": "B", "roomName": id.to_string() },
                ] } }))
            }),
        );
        let client = ApiClient::new(&mock::serve(router).await).unwrap();

        let partitions = partitions_by_room_ids(&client, &[306, 428]).await.unwrap();
        let ids: Vec<_> = partitions.iter().map(|p| p.room_partition_id).collect();
        assert_eq!(ids, vec![3060, 3061, 4280, 4281]);
    }

    #[tokio::test]
    async fn test_rooms_fails_if_any_room_fails() {
        let router = Router::new().route(
            "/rooms/{id}",
            get(|Path(id): Path<i64>| async move {
                if id == 1 {
                    Ok(Json(json!({ "data": { "roomId": 1, "roomName": "306" } })))
                } else {
                    Err(axum::http::StatusCode::NOT_FOUND)
                }
            }),
        );
        let client = ApiClient::new(&mock::serve(router).await).unwrap();

        assert_eq!(rooms(&client, &[1]).await.unwrap()[0].room_name, "306");
        let err = rooms(&client, &[1, 2]).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
