//! SeaORM Entity for questions table

use chrono::{DateTime, Duration, Utc};
use sea_orm::entity::prelude::*;
use std::fmt;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(Some(200))")]
    pub question_text: String,
    #[sea_orm(column_type = "TimestampWithTimeZone")]
    pub pub_date: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::choices::Entity")]
    Choices,
}

impl Related<super::choices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Choices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// True when `pub_date` falls within the last day, both ends inclusive.
    /// Questions scheduled in the future are never recent.
    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        let window_start = now - Duration::days(crate::constants::RECENT_WINDOW_DAYS);
        window_start <= self.pub_date && self.pub_date <= now
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.question_text)
    }
}
