use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sys_role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub enabled: bool,

    // Permission strings (JSON array)
    pub permissions: Option<String>,

    pub create_time: i64,
}

impl Model {
    /// Permission strings granted by this role
    ///
    /// A missing or malformed column yields no permissions.
    pub fn permission_list(&self) -> Vec<String> {
        self.permissions
            .as_deref()
            .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
            .unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_role::Entity")]
    UserRoles,
    #[sea_orm(has_many = "super::group_role::Entity")]
    GroupRoles,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_role::Relation::User.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::user_role::Relation::Role.def().rev())
    }
}

impl Related<super::group::Entity> for Entity {
    fn to() -> RelationDef {
        super::group_role::Relation::Group.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::group_role::Relation::Role.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
