use thiserror::Error;

#[derive(Error, Debug)]
pub enum GroupError {
    #[error("Group ID not found: {group_id}")]
    GroupIdNotFound { group_id: i32 },
}
