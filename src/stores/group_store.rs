use std::collections::{HashSet, VecDeque};

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::errors::internal::GroupError;
use crate::errors::InternalError;
use crate::types::db::group::{self, Entity as Group};
use crate::types::db::Status;

/// Read access to the organisation group hierarchy
#[derive(Debug, Default)]
pub struct GroupStore {}

impl GroupStore {
    pub fn new() -> Self {
        Self {}
    }

    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        id: i32,
    ) -> Result<Option<group::Model>, InternalError> {
        Group::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_group_by_id", e))
    }

    /// Like [`GroupStore::find_by_id`] but a missing group is an error
    pub async fn get_by_id(
        &self,
        conn: &impl ConnectionTrait,
        id: i32,
    ) -> Result<group::Model, InternalError> {
        self.find_by_id(conn, id)
            .await?
            .ok_or_else(|| GroupError::GroupIdNotFound { group_id: id }.into())
    }

    /// All groups in display order
    pub async fn find_all(&self, conn: &impl ConnectionTrait) -> Result<Vec<group::Model>, InternalError> {
        Group::find()
            .order_by_asc(group::Column::SortOrder)
            .order_by_asc(group::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("find_all_groups", e))
    }

    /// Direct children of `id` with the given status
    pub async fn child_list(
        &self,
        conn: &impl ConnectionTrait,
        id: i32,
        status: Status,
    ) -> Result<Vec<group::Model>, InternalError> {
        Group::find()
            .filter(group::Column::ParentId.eq(id))
            .filter(group::Column::Status.eq(status))
            .order_by_asc(group::Column::SortOrder)
            .order_by_asc(group::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("find_child_groups", e))
    }

    /// Root id followed by every descendant reachable through enabled groups
    ///
    /// A disabled group is skipped together with its subtree. The root itself
    /// is always included.
    ///
    /// # Returns
    /// * `Ok(Vec<i32>)` - Root first, then descendants breadth-first
    /// * `Err(InternalError)` - `GroupIdNotFound` for an unknown root, or a database error
    pub async fn expand_descendant_ids(
        &self,
        conn: &impl ConnectionTrait,
        root_id: i32,
    ) -> Result<Vec<i32>, InternalError> {
        self.get_by_id(conn, root_id).await?;

        let mut ids = vec![root_id];
        let mut seen = HashSet::from([root_id]);
        let mut pending = VecDeque::from([root_id]);

        while let Some(parent_id) = pending.pop_front() {
            for child in self.child_list(conn, parent_id, Status::Enable).await? {
                // Guards against cycles in hand-edited data
                if seen.insert(child.id) {
                    ids.push(child.id);
                    pending.push_back(child.id);
                }
            }
        }

        tracing::trace!("Group {} expands to {} ids", root_id, ids.len());

        Ok(ids)
    }
}
