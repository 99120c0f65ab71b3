use sea_orm::entity::prelude::*;

use super::enums::{Sex, Status};

/// Login name of the built-in super administrator
pub const ADMIN: &str = "admin";

/// Password given to new or reset accounts when none is supplied
pub const DEFAULT_PASSWORD: &str = "666666";

/// Column widths of `sys_user`, in characters
pub const LOGIN_NAME_MAX_LEN: usize = 20;
pub const NAME_MAX_LEN: usize = 20;
pub const EMAIL_MAX_LEN: usize = 50;
pub const MOBILE_MAX_LEN: usize = 11;
pub const TEL_MAX_LEN: usize = 15;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sys_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub login_name: String,
    pub name: Option<String>,
    pub password: String,
    pub salt: Option<String>,
    pub sex: Sex,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub tel: Option<String>,
    pub status: Status,
    pub group_id: Option<i32>,
    pub create_time: i64,
    pub update_time: i64,
}

impl Model {
    pub fn is_super_admin(&self) -> bool {
        self.login_name == ADMIN
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::group::Entity",
        from = "Column::GroupId",
        to = "super::group::Column::Id",
        on_delete = "SetNull"
    )]
    Group,
    #[sea_orm(has_many = "super::user_role::Entity")]
    UserRoles,
}

impl Related<super::group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl Related<super::user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRoles.def()
    }
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_role::Relation::Role.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::user_role::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
