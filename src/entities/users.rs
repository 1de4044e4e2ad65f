use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::logins::Entity")]
    Logins,
    #[sea_orm(has_many = "super::logoffs::Entity")]
    Logoffs,
}

impl Related<super::logins::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Logins.def()
    }
}

impl Related<super::logoffs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Logoffs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
