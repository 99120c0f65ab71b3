use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bus")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub vin: String,
    pub plate_no: Option<String>,
    pub model_id: Option<i32>,
    pub group_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bus_model::Entity",
        from = "Column::ModelId",
        to = "super::bus_model::Column::Id",
        on_delete = "SetNull"
    )]
    BusModel,
}

impl Related<super::bus_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BusModel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
