use sea_orm::entity::prelude::*;

/// Vehicle came online (`online = true`) or went offline
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bus_on_off_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub vin: String,
    pub group_id: Option<i32>,
    pub log_year: i32,
    pub log_month: i32,
    pub log_day: i32,
    pub log_time: i64,
    pub online: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
