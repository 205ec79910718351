use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub color: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::chore::Entity")]
    Chore,
}

impl Related<super::chore::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chore.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
