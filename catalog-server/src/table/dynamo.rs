//! DynamoDB-backed product table

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use shared::Product;

use super::ProductTable;
use crate::BoxError;

const ATTR_CODE: &str = "ma_sp";
const ATTR_NAME: &str = "ten_sp";
const ATTR_QUANTITY: &str = "so_luong";
const ATTR_IMAGE_URL: &str = "image_url";

type Item = HashMap<String, AttributeValue>;

pub struct DynamoProductTable {
    client: Client,
    table: String,
}

impl DynamoProductTable {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

#[async_trait]
impl ProductTable for DynamoProductTable {
    async fn scan(&self) -> Result<Vec<Product>, BoxError> {
        let output = self.client.scan().table_name(&self.table).send().await?;

        // Single page only; listings are not paginated.
        if output.last_evaluated_key().is_some() {
            tracing::warn!(
                table = %self.table,
                "Scan stopped at the 1 MB page limit, listing is incomplete"
            );
        }

        output.items().iter().map(item_to_product).collect()
    }

    async fn put(&self, product: &Product) -> Result<(), BoxError> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(product_to_item(product)))
            .send()
            .await?;
        Ok(())
    }

    async fn delete(&self, code: i64) -> Result<(), BoxError> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .key(ATTR_CODE, AttributeValue::N(code.to_string()))
            .send()
            .await?;
        Ok(())
    }
}

fn product_to_item(product: &Product) -> Item {
    let mut item = HashMap::from([
        (
            ATTR_CODE.to_string(),
            AttributeValue::N(product.code.to_string()),
        ),
        (
            ATTR_NAME.to_string(),
            AttributeValue::S(product.name.clone()),
        ),
        (
            ATTR_QUANTITY.to_string(),
            AttributeValue::N(product.quantity.to_string()),
        ),
    ]);
    if let Some(url) = &product.image_url {
        item.insert(ATTR_IMAGE_URL.to_string(), AttributeValue::S(url.clone()));
    }
    item
}

fn item_to_product(item: &Item) -> Result<Product, BoxError> {
    Ok(Product {
        code: number_attr(item, ATTR_CODE)?,
        name: string_attr(item, ATTR_NAME)?
            .ok_or_else(|| format!("record is missing '{ATTR_NAME}'"))?,
        quantity: number_attr(item, ATTR_QUANTITY)?,
        image_url: string_attr(item, ATTR_IMAGE_URL)?,
    })
}

fn number_attr(item: &Item, name: &str) -> Result<i64, BoxError> {
    let value = item
        .get(name)
        .ok_or_else(|| format!("record is missing '{name}'"))?;
    let n = value
        .as_n()
        .map_err(|_| format!("'{name}' is not a number attribute"))?;
    n.parse()
        .map_err(|e| format!("'{name}' = {n} is not an integer: {e}").into())
}

fn string_attr(item: &Item, name: &str) -> Result<Option<String>, BoxError> {
    match item.get(name) {
        None | Some(AttributeValue::Null(_)) => Ok(None),
        Some(AttributeValue::S(s)) => Ok(Some(s.clone())),
        Some(_) => Err(format!("'{name}' is not a string attribute").into()),
    }
}
