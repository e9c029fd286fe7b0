use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{NewProduct, Product, UpdateProduct};

/// Sea-ORM Entity for products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub name: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub quantity: i32,
    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub category: String,
    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub supplier: String,
    #[sea_orm(column_type = "String(StringLen::N(200))")]
    pub img: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            quantity: model.quantity,
            category: model.category,
            supplier: model.supplier,
            img: model.img,
        }
    }
}

// Id is left to the SERIAL sequence
impl From<NewProduct> for ActiveModel {
    fn from(input: NewProduct) -> Self {
        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            price: Set(input.price),
            quantity: Set(input.quantity),
            category: Set(input.category),
            supplier: Set(input.supplier),
            img: Set(input.img),
        }
    }
}

impl ActiveModel {
    /// Overwrite every mutable column with `input`
    pub fn apply_update(&mut self, input: UpdateProduct) {
        self.name = Set(input.name);
        self.price = Set(input.price);
        self.quantity = Set(input.quantity);
        self.category = Set(input.category);
        self.supplier = Set(input.supplier);
        self.img = Set(input.img);
    }
}
